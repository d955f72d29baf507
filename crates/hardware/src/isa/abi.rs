//! MIPS o32 register names and well-known register indices.

/// Register $0 (hard-wired zero).
pub const REG_ZERO: usize = 0;
/// Register $2 (first return value, v0).
pub const REG_V0: usize = 2;
/// Register $4 (first argument, a0).
pub const REG_A0: usize = 4;
/// Register $8 (first temporary, t0).
pub const REG_T0: usize = 8;
/// Register $29 (stack pointer, sp).
pub const REG_SP: usize = 29;
/// Register $31 (return address, ra). Written by `jal`.
pub const REG_RA: usize = 31;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// ABI names for $0 to $31.
pub const REG_NAMES: [&str; NUM_REGS] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp", "fp",
    "ra",
];

/// Returns the ABI name for a register index, or `"??"` when out of range.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("??")
}
