//! MIPS architecture-specific components.
//!
//! This module contains the architectural register state. It includes the following modules:
//! 1. **GPRs:** General-Purpose Register file implementation.
//! 2. **State:** The register + PC snapshot the CPU double-buffers.

/// General-Purpose Register file implementation.
pub mod gpr;

/// Architectural state snapshot (GPRs, HI/LO, PC).
pub mod state;

pub use gpr::Gpr;
pub use state::ArchState;
