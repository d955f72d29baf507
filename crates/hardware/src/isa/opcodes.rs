//! MIPS primary opcodes (bits 31-26).
//!
//! Opcode `OP_SPECIAL` holds every register-format instruction; those are told
//! apart by their function field (see [`super::funct`]).

/// Register-format instructions (ADD, ADDU, SUB, SUBU, JR).
pub const OP_SPECIAL: u32 = 0x00;

/// Jump (J).
pub const OP_J: u32 = 0x02;

/// Jump and link (JAL).
pub const OP_JAL: u32 = 0x03;

/// Branch on equal (BEQ).
pub const OP_BEQ: u32 = 0x04;

/// Branch on not equal (BNE).
pub const OP_BNE: u32 = 0x05;

/// Branch on greater than zero (BGTZ).
pub const OP_BGTZ: u32 = 0x07;

/// Add immediate (ADDI).
pub const OP_ADDI: u32 = 0x08;

/// Add immediate unsigned (ADDIU).
pub const OP_ADDIU: u32 = 0x09;

/// Set on less than immediate (SLTI).
pub const OP_SLTI: u32 = 0x0A;

/// OR immediate (ORI).
pub const OP_ORI: u32 = 0x0D;

/// Load upper immediate (LUI).
pub const OP_LUI: u32 = 0x0F;

/// Load byte (LB).
pub const OP_LB: u32 = 0x20;

/// Load word (LW).
pub const OP_LW: u32 = 0x23;

/// Store byte (SB).
pub const OP_SB: u32 = 0x28;

/// Store word (SW).
pub const OP_SW: u32 = 0x2B;
