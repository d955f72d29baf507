//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcodes, function codes, field extraction and decoding for the
//! supported MIPS32 subset:
//!
//! * R-format: `add`, `addu`, `sub`, `subu`, `jr`
//! * I-format: `lui`, `ori`, `addi`, `addiu`, `lw`, `sw`, `bne`, `beq`, `bgtz`,
//!   `slti`, `sb`, `lb`
//! * J-format: `j`, `jal`
//! * Pseudo: `li`

/// Register name mappings (o32 ABI).
pub mod abi;

/// Word-to-instruction decoding and the encoding table.
pub mod decode;

/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;

/// Function codes for register-format instructions.
pub mod funct;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Primary opcodes.
pub mod opcodes;

pub use decode::decode;
pub use instruction::{IType, Instruction, InstructionBits, JType, Mnemonic, RType};
