//! Common constants used throughout the simulator.
//!
//! Defines instruction geometry and the default memory map.

/// Size of one instruction word in bytes; fetch advances the PC by this much.
pub const INSTRUCTION_BYTES: u32 = 4;

/// Size of every default memory region (1 MiB).
pub const REGION_SIZE: u32 = 0x0010_0000;

/// Base of the user text segment. Programs load here and execution starts here.
pub const MEM_TEXT_START: u32 = 0x0040_0000;

/// Base of the user data segment.
pub const MEM_DATA_START: u32 = 0x1000_0000;

/// Base of the user stack region.
pub const MEM_STACK_START: u32 = 0x7FF0_0000;

/// Base of the kernel text segment.
pub const MEM_KTEXT_START: u32 = 0x8000_0000;

/// Base of the kernel data segment.
pub const MEM_KDATA_START: u32 = 0x9000_0000;
