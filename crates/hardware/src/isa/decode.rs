//! MIPS Instruction Decoder.
//!
//! Turns a raw 32-bit word into an [`Instruction`]. Dispatch is an exhaustive
//! match on the opcode and, for `OP_SPECIAL`, the function code. The same
//! encodings are also published as a `(pattern, mask)` table, [`ENCODINGS`],
//! for table introspection: [`lookup`], [`Mnemonic::encoding`] and
//! [`Encoding::overlaps`] let callers query the encoding space and check it
//! against [`decode`]. Execution never goes through the table.
//!
//! Register-format entries mask both the opcode and the function field, so no
//! two entries can ever match the same word and table order carries no meaning.

use crate::isa::funct;
use crate::isa::instruction::{
    FUNCT_MASK, IType, Instruction, InstructionBits, JType, Mnemonic, OPCODE_MASK, OPCODE_SHIFT,
    RType,
};
use crate::isa::opcodes;

/// One row of the encoding table: a word encodes `mnemonic` when
/// `word & mask == pattern`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoding {
    /// Required bit values under `mask`.
    pub pattern: u32,
    /// Bits that take part in the match.
    pub mask: u32,
    /// Instruction selected by this encoding.
    pub mnemonic: Mnemonic,
}

impl Encoding {
    /// Register-format encoding: opcode 0 plus a function code.
    pub const fn special(funct: u32, mnemonic: Mnemonic) -> Self {
        Self {
            pattern: (opcodes::OP_SPECIAL << OPCODE_SHIFT) | funct,
            mask: OPCODE_MASK | FUNCT_MASK,
            mnemonic,
        }
    }

    /// Encoding selected by the primary opcode alone.
    pub const fn primary(opcode: u32, mnemonic: Mnemonic) -> Self {
        Self {
            pattern: opcode << OPCODE_SHIFT,
            mask: OPCODE_MASK,
            mnemonic,
        }
    }

    /// Returns `true` if `word` carries this encoding.
    #[inline]
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask == self.pattern
    }

    /// Returns `true` if some word could match both encodings.
    ///
    /// Two encodings are disjoint when they disagree on a bit both of them test.
    pub const fn overlaps(&self, other: &Self) -> bool {
        (self.pattern ^ other.pattern) & self.mask & other.mask == 0
    }
}

/// Every machine-encoded instruction. `Li` and `Halt` have no encoding.
pub const ENCODINGS: [Encoding; 19] = [
    Encoding::special(funct::ADD, Mnemonic::Add),
    Encoding::special(funct::ADDU, Mnemonic::Addu),
    Encoding::special(funct::SUB, Mnemonic::Sub),
    Encoding::special(funct::SUBU, Mnemonic::Subu),
    Encoding::special(funct::JR, Mnemonic::Jr),
    Encoding::primary(opcodes::OP_LUI, Mnemonic::Lui),
    Encoding::primary(opcodes::OP_ORI, Mnemonic::Ori),
    Encoding::primary(opcodes::OP_ADDI, Mnemonic::Addi),
    Encoding::primary(opcodes::OP_ADDIU, Mnemonic::Addiu),
    Encoding::primary(opcodes::OP_LW, Mnemonic::Lw),
    Encoding::primary(opcodes::OP_SW, Mnemonic::Sw),
    Encoding::primary(opcodes::OP_BNE, Mnemonic::Bne),
    Encoding::primary(opcodes::OP_BEQ, Mnemonic::Beq),
    Encoding::primary(opcodes::OP_BGTZ, Mnemonic::Bgtz),
    Encoding::primary(opcodes::OP_SLTI, Mnemonic::Slti),
    Encoding::primary(opcodes::OP_J, Mnemonic::J),
    Encoding::primary(opcodes::OP_JAL, Mnemonic::Jal),
    Encoding::primary(opcodes::OP_SB, Mnemonic::Sb),
    Encoding::primary(opcodes::OP_LB, Mnemonic::Lb),
];

impl Mnemonic {
    /// Table entry for this mnemonic, if it has a machine encoding.
    pub fn encoding(self) -> Option<&'static Encoding> {
        ENCODINGS.iter().find(|e| e.mnemonic == self)
    }
}

/// Decodes a 32-bit word into an [`Instruction`].
///
/// Never fails: a word that matches no encoding decodes to
/// [`Instruction::Halt`] carrying the raw word.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction encoding to decode.
pub fn decode(word: u32) -> Instruction {
    match word.opcode() {
        opcodes::OP_SPECIAL => decode_special(word),

        opcodes::OP_LUI => Instruction::Lui(IType::from(word)),
        opcodes::OP_ORI => Instruction::Ori(IType::from(word)),
        opcodes::OP_ADDI => Instruction::Addi(IType::from(word)),
        opcodes::OP_ADDIU => Instruction::Addiu(IType::from(word)),
        opcodes::OP_LW => Instruction::Lw(IType::from(word)),
        opcodes::OP_SW => Instruction::Sw(IType::from(word)),
        opcodes::OP_BNE => Instruction::Bne(IType::from(word)),
        opcodes::OP_BEQ => Instruction::Beq(IType::from(word)),
        opcodes::OP_BGTZ => Instruction::Bgtz(IType::from(word)),
        opcodes::OP_SLTI => Instruction::Slti(IType::from(word)),
        opcodes::OP_SB => Instruction::Sb(IType::from(word)),
        opcodes::OP_LB => Instruction::Lb(IType::from(word)),

        opcodes::OP_J => Instruction::J(JType::from(word)),
        opcodes::OP_JAL => Instruction::Jal(JType::from(word)),

        _ => Instruction::Halt(word),
    }
}

/// Decodes an `OP_SPECIAL` word by its function code.
fn decode_special(word: u32) -> Instruction {
    let r = RType::from(word);
    match r.funct {
        funct::ADD => Instruction::Add(r),
        funct::ADDU => Instruction::Addu(r),
        funct::SUB => Instruction::Sub(r),
        funct::SUBU => Instruction::Subu(r),
        funct::JR => Instruction::Jr(r),
        _ => Instruction::Halt(word),
    }
}

/// Table introspection: scans [`ENCODINGS`] with last-match-wins, the way a
/// flat pattern table is searched. Agrees with [`decode`] on every word because
/// the entries are disjoint.
pub fn lookup(word: u32) -> Option<Mnemonic> {
    ENCODINGS
        .iter()
        .rev()
        .find(|e| e.matches(word))
        .map(|e| e.mnemonic)
}
