//! Function codes (bits 5-0) for `OP_SPECIAL` register-format instructions.

/// Jump register (JR).
pub const JR: u32 = 0x08;

/// Add, signed view (ADD).
pub const ADD: u32 = 0x20;

/// Add unsigned (ADDU).
pub const ADDU: u32 = 0x21;

/// Subtract, signed view (SUB).
pub const SUB: u32 = 0x22;

/// Subtract unsigned (SUBU).
pub const SUBU: u32 = 0x23;
