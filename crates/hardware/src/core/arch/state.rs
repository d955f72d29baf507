//! Architectural state snapshot.
//!
//! One `ArchState` holds everything an instruction can observe or change:
//! the GPR file, the program counter, and the HI/LO pair. The CPU keeps two
//! of them, the state before the current instruction and the state after it.

use super::gpr::Gpr;

/// Registers and program counter at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchState {
    /// General-purpose registers.
    pub gpr: Gpr,
    /// Multiply/divide HI register. No supported instruction writes it; the shell can.
    pub hi: u32,
    /// Multiply/divide LO register. No supported instruction writes it; the shell can.
    pub lo: u32,
    /// Program counter.
    pub pc: u32,
}

impl ArchState {
    /// Creates a zeroed state with the PC at `pc`.
    pub const fn new(pc: u32) -> Self {
        Self {
            gpr: Gpr::new(),
            hi: 0,
            lo: 0,
            pc,
        }
    }
}
