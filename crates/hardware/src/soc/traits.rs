//! Memory collaborator interface consumed by the CPU core.
//!
//! The core only ever touches memory through [`MemoryBus`]: one 32-bit read and
//! one 32-bit write. Byte order, address mapping and what happens for unmapped
//! addresses all belong to the implementor.

/// Word-granular memory seen by the CPU.
pub trait MemoryBus {
    /// Reads the 32-bit word at `addr`.
    fn read_u32(&mut self, addr: u32) -> u32;

    /// Writes the 32-bit word `val` at `addr`.
    fn write_u32(&mut self, addr: u32, val: u32);
}
