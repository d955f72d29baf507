//! Memory subsystem.
//!
//! This module provides:
//! 1. **Traits:** [`MemoryBus`], the word read/write interface the CPU consumes.
//! 2. **Memory:** Named, zero-initialised regions.
//! 3. **Interconnect:** [`Bus`], routing addresses to regions in little-endian order.

/// Address routing across memory regions.
pub mod interconnect;

/// Memory region storage.
pub mod memory;

/// Memory interface consumed by the CPU.
pub mod traits;

pub use interconnect::Bus;
pub use memory::Memory;
pub use traits::MemoryBus;
