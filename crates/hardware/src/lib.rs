//! MIPS subset instruction-set simulator library.
//!
//! This crate implements a single-cycle functional simulator for a small MIPS
//! integer subset:
//! 1. **ISA:** Field extraction, table-driven decode into a typed [`isa::Instruction`], and disassembly.
//! 2. **Core:** Current/next architectural state and the per-instruction execution semantics.
//! 3. **SoC:** A sparse little-endian memory map of named regions behind the [`soc::MemoryBus`] trait.
//! 4. **Simulation:** Program loading, the run loops, register and memory dumps, and the command shell.

/// Common constants and error types.
pub mod common;
/// Simulator configuration (memory map, start PC, run limits).
pub mod config;
/// CPU core (architectural state and execution).
pub mod core;
/// Instruction set (field extraction, decode, ABI names, disassembly).
pub mod isa;
/// Loader, simulator driver and interactive shell.
pub mod sim;
/// Memory regions and the bus that routes accesses to them.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// CPU type; holds the current and next architectural state and the run flag.
pub use crate::core::Cpu;
/// Top-level simulator; owns the CPU, the bus and the counters.
pub use crate::sim::Simulator;
/// Memory bus routing accesses to configured regions.
pub use crate::soc::Bus;
