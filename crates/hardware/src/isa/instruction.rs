//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the four MIPS views of a 32-bit instruction word
//! (opcode-only, R-format, I-format, J-format) and the decoded [`Instruction`]
//! sum type. Each `Instruction` variant carries only the fields of its own
//! format, so a handler cannot read a field that its format does not define.

use std::fmt;

/// Bit mask for the opcode field (bits 26-31).
pub const OPCODE_MASK: u32 = 0xFC00_0000;
/// Bit mask for the function field (bits 0-5).
pub const FUNCT_MASK: u32 = 0x0000_003F;
/// Bit mask for the 26-bit remainder below the opcode.
pub const REST_MASK: u32 = 0x03FF_FFFF;
/// Bit mask for a 5-bit register index once shifted down.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the 5-bit shift amount once shifted down.
pub const SHAMT_MASK: u32 = 0x1F;
/// Bit mask for the 16-bit immediate (bits 0-15).
pub const IMM_MASK: u32 = 0xFFFF;
/// Bit mask for the 26-bit jump address (bits 0-25).
pub const ADDRESS_MASK: u32 = 0x03FF_FFFF;

/// Shift that aligns the opcode field.
pub const OPCODE_SHIFT: u32 = 26;
/// Shift that aligns the `rs` field.
pub const RS_SHIFT: u32 = 21;
/// Shift that aligns the `rt` field.
pub const RT_SHIFT: u32 = 16;
/// Shift that aligns the `rd` field.
pub const RD_SHIFT: u32 = 11;
/// Shift that aligns the `shamt` field.
pub const SHAMT_SHIFT: u32 = 6;

/// Upper PC bits kept by a J-format jump (the current 256 MiB segment).
pub const JUMP_SEGMENT_MASK: u32 = 0xF000_0000;

/// Trait for extracting instruction fields from encoded instructions.
///
/// No validation happens here: any word can be viewed through any format.
/// Picking the right view is decode's job.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 26-31).
    fn opcode(&self) -> u32;

    /// Extracts the 26 bits below the opcode.
    fn rest(&self) -> u32;

    /// Extracts the first source register field (bits 21-25).
    fn rs(&self) -> usize;

    /// Extracts the second source / immediate target register field (bits 16-20).
    fn rt(&self) -> usize;

    /// Extracts the R-format destination register field (bits 11-15).
    fn rd(&self) -> usize;

    /// Extracts the R-format shift amount (bits 6-10).
    fn shamt(&self) -> u32;

    /// Extracts the R-format function code (bits 0-5).
    fn funct(&self) -> u32;

    /// Extracts the raw I-format immediate (bits 0-15).
    fn imm(&self) -> u16;

    /// Extracts the J-format word address (bits 0-25).
    fn address(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self & OPCODE_MASK) >> OPCODE_SHIFT
    }

    #[inline(always)]
    fn rest(&self) -> u32 {
        self & REST_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & SHAMT_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm(&self) -> u16 {
        (self & IMM_MASK) as u16
    }

    #[inline(always)]
    fn address(&self) -> u32 {
        self & ADDRESS_MASK
    }
}

/// Register-format fields: `opcode | rs | rt | rd | shamt | funct`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RType {
    /// First source register.
    pub rs: usize,
    /// Second source register.
    pub rt: usize,
    /// Destination register.
    pub rd: usize,
    /// Shift amount (unused by the supported subset).
    pub shamt: u32,
    /// Function code.
    pub funct: u32,
}

impl From<u32> for RType {
    fn from(word: u32) -> Self {
        Self {
            rs: word.rs(),
            rt: word.rt(),
            rd: word.rd(),
            shamt: word.shamt(),
            funct: word.funct(),
        }
    }
}

/// Immediate-format fields: `opcode | rs | rt | imm`.
///
/// The immediate is kept as raw bits; each handler picks zero or sign extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IType {
    /// Source (base) register.
    pub rs: usize,
    /// Target register.
    pub rt: usize,
    /// Raw 16-bit immediate.
    pub imm: u16,
}

impl IType {
    /// Immediate zero-extended to 32 bits.
    #[inline]
    pub const fn imm_zext(&self) -> u32 {
        self.imm as u32
    }

    /// Immediate sign-extended to 32 bits.
    #[inline]
    pub const fn imm_sext(&self) -> i32 {
        self.imm as i16 as i32
    }

    /// Branch displacement added to the already-advanced next PC.
    ///
    /// Fetch staged `PC + 4`, so the taken target `PC + 4 + (imm - 1) * 4`
    /// needs `(imm - 1) << 2` on top of it.
    #[inline]
    pub const fn branch_offset(&self) -> u32 {
        (self.imm_sext().wrapping_sub(1) as u32) << 2
    }
}

impl From<u32> for IType {
    fn from(word: u32) -> Self {
        Self {
            rs: word.rs(),
            rt: word.rt(),
            imm: word.imm(),
        }
    }
}

/// Jump-format fields: `opcode | address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JType {
    /// 26-bit word address.
    pub address: u32,
}

impl JType {
    /// Jump target relative to the PC of the jump instruction itself.
    #[inline]
    pub const fn target(&self, pc: u32) -> u32 {
        (pc & JUMP_SEGMENT_MASK) | (self.address << 2)
    }
}

impl From<u32> for JType {
    fn from(word: u32) -> Self {
        Self {
            address: word.address(),
        }
    }
}

/// Instruction mnemonic, independent of operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mnemonic {
    /// Signed add.
    Add,
    /// Unsigned add.
    Addu,
    /// Signed subtract.
    Sub,
    /// Unsigned subtract.
    Subu,
    /// Jump register.
    Jr,
    /// Load upper immediate.
    Lui,
    /// OR immediate.
    Ori,
    /// Add immediate.
    Addi,
    /// Add immediate unsigned (executes as OR immediate).
    Addiu,
    /// Load word.
    Lw,
    /// Store word.
    Sw,
    /// Branch on not equal.
    Bne,
    /// Branch on equal.
    Beq,
    /// Branch on greater than zero.
    Bgtz,
    /// Set on less than immediate.
    Slti,
    /// Store byte.
    Sb,
    /// Load byte.
    Lb,
    /// Jump.
    J,
    /// Jump and link.
    Jal,
    /// Load immediate pseudoinstruction.
    Li,
    /// Stop the simulation.
    Halt,
}

impl Mnemonic {
    /// Every mnemonic, in encoding-table order followed by `Li` and `Halt`.
    pub const ALL: [Self; 21] = [
        Self::Add,
        Self::Addu,
        Self::Sub,
        Self::Subu,
        Self::Jr,
        Self::Lui,
        Self::Ori,
        Self::Addi,
        Self::Addiu,
        Self::Lw,
        Self::Sw,
        Self::Bne,
        Self::Beq,
        Self::Bgtz,
        Self::Slti,
        Self::J,
        Self::Jal,
        Self::Sb,
        Self::Lb,
        Self::Li,
        Self::Halt,
    ];

    /// Lower-case assembler name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addu => "addu",
            Self::Sub => "sub",
            Self::Subu => "subu",
            Self::Jr => "jr",
            Self::Lui => "lui",
            Self::Ori => "ori",
            Self::Addi => "addi",
            Self::Addiu => "addiu",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::Bne => "bne",
            Self::Beq => "beq",
            Self::Bgtz => "bgtz",
            Self::Slti => "slti",
            Self::Sb => "sb",
            Self::Lb => "lb",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Li => "li",
            Self::Halt => "halt",
        }
    }

    /// Broad category used for statistics.
    pub const fn class(self) -> InstructionClass {
        match self {
            Self::Add
            | Self::Addu
            | Self::Sub
            | Self::Subu
            | Self::Lui
            | Self::Ori
            | Self::Addi
            | Self::Addiu
            | Self::Slti => InstructionClass::Alu,
            Self::Lw | Self::Lb => InstructionClass::Load,
            Self::Sw | Self::Sb => InstructionClass::Store,
            Self::Bne | Self::Beq | Self::Bgtz => InstructionClass::Branch,
            Self::Jr | Self::J | Self::Jal => InstructionClass::Jump,
            Self::Li => InstructionClass::Pseudo,
            Self::Halt => InstructionClass::Halt,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instruction category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionClass {
    /// Register or immediate arithmetic/logic.
    Alu,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    Branch,
    /// Unconditional jump.
    Jump,
    /// Pseudoinstruction with no architectural effect.
    Pseudo,
    /// Simulation stop.
    Halt,
}

/// A decoded instruction: one variant per supported operation, each holding
/// only the fields of its own encoding format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `add rd, rs, rt`
    Add(RType),
    /// `addu rd, rs, rt`
    Addu(RType),
    /// `sub rd, rs, rt`
    Sub(RType),
    /// `subu rd, rs, rt`
    Subu(RType),
    /// `jr rs`
    Jr(RType),
    /// `lui rt, imm`
    Lui(IType),
    /// `ori rt, rs, imm`
    Ori(IType),
    /// `addi rt, rs, imm`
    Addi(IType),
    /// `addiu rt, rs, imm`
    Addiu(IType),
    /// `lw rt, (rs)`
    Lw(IType),
    /// `sw rt, (rs)`
    Sw(IType),
    /// `bne rs, rt, offset`
    Bne(IType),
    /// `beq rs, rt, offset`
    Beq(IType),
    /// `bgtz rs, offset`
    Bgtz(IType),
    /// `slti rt, rs, imm`
    Slti(IType),
    /// `sb rt, (rs)`
    Sb(IType),
    /// `lb rt, (rs)`
    Lb(IType),
    /// `j target`
    J(JType),
    /// `jal target`
    Jal(JType),
    /// `li` pseudoinstruction. It has no machine encoding, so decode never
    /// produces it; executing it changes nothing.
    Li,
    /// Any word that matches no encoding. Carries the raw word for diagnostics.
    Halt(u32),
}

impl Instruction {
    /// Mnemonic of this instruction.
    pub const fn mnemonic(&self) -> Mnemonic {
        match self {
            Self::Add(_) => Mnemonic::Add,
            Self::Addu(_) => Mnemonic::Addu,
            Self::Sub(_) => Mnemonic::Sub,
            Self::Subu(_) => Mnemonic::Subu,
            Self::Jr(_) => Mnemonic::Jr,
            Self::Lui(_) => Mnemonic::Lui,
            Self::Ori(_) => Mnemonic::Ori,
            Self::Addi(_) => Mnemonic::Addi,
            Self::Addiu(_) => Mnemonic::Addiu,
            Self::Lw(_) => Mnemonic::Lw,
            Self::Sw(_) => Mnemonic::Sw,
            Self::Bne(_) => Mnemonic::Bne,
            Self::Beq(_) => Mnemonic::Beq,
            Self::Bgtz(_) => Mnemonic::Bgtz,
            Self::Slti(_) => Mnemonic::Slti,
            Self::Sb(_) => Mnemonic::Sb,
            Self::Lb(_) => Mnemonic::Lb,
            Self::J(_) => Mnemonic::J,
            Self::Jal(_) => Mnemonic::Jal,
            Self::Li => Mnemonic::Li,
            Self::Halt(_) => Mnemonic::Halt,
        }
    }

    /// Broad category of this instruction.
    pub const fn class(&self) -> InstructionClass {
        self.mnemonic().class()
    }
}
