//! Core processor implementation.
//!
//! This module contains the architectural register state and the single-cycle
//! CPU that fetches, decodes and executes one instruction per call.

/// Architecture-specific components (register file, state snapshots).
pub mod arch;

/// CPU core implementation and instruction semantics.
pub mod cpu;

pub use self::cpu::{Cpu, Retired};
