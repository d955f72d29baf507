//! CPU Core Definition and Single-Cycle Driver.
//!
//! This module defines the central `Cpu` structure. It coordinates the following:
//! 1. **State Management:** Two architectural snapshots, `current` (inputs to the
//!    instruction in flight) and `next` (its outputs), plus the run flag.
//! 2. **Register Access:** Reads come from `current`, writes land in `next`, and
//!    register `$zero` is protected on both paths.
//! 3. **Cycle Driver:** `fetch`, decode and `execute` for exactly one instruction.
//!
//! Committing `next` into `current` happens between cycles and is the caller's
//! job (see [`Cpu::commit`] and [`crate::sim::Simulator`]).

/// Per-instruction semantics.
pub mod execution;

use tracing::trace;

use crate::common::constants::INSTRUCTION_BYTES;
use crate::core::arch::ArchState;
use crate::isa::decode::decode;
use crate::isa::disasm::format_instruction;
use crate::isa::instruction::Instruction;
use crate::soc::MemoryBus;

/// What one processed instruction did, for the driver's bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// The decoded instruction.
    pub inst: Instruction,
    /// A conditional branch whose condition held. The target may still be `PC + 4`.
    pub branch_taken: bool,
}

/// Single-cycle MIPS CPU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    /// State before the instruction in flight.
    pub current: ArchState,
    /// State after the instruction in flight.
    pub next: ArchState,
    /// Cleared by the halt handler; no further cycles should run once false.
    pub run_bit: bool,
}

impl Cpu {
    /// Creates a CPU with zeroed registers, both snapshots at `start_pc`, running.
    pub const fn new(start_pc: u32) -> Self {
        let state = ArchState::new(start_pc);
        Self {
            current: state,
            next: state,
            run_bit: true,
        }
    }

    /// Reads register `idx` from the current state. `$zero` reads as 0.
    #[inline]
    pub const fn read_reg(&self, idx: usize) -> u32 {
        self.current.gpr.read(idx)
    }

    /// Writes register `idx` in the next state. Writes to `$zero` are dropped.
    #[inline]
    pub const fn write_reg(&mut self, idx: usize, val: u32) {
        self.next.gpr.write(idx, val);
    }

    /// Adds `offset` to the next-state PC, wrapping.
    #[inline]
    pub const fn advance_pc(&mut self, offset: u32) {
        self.next.pc = self.next.pc.wrapping_add(offset);
    }

    /// Returns `true` while the run flag is set.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.run_bit
    }

    /// Clears the run flag.
    #[inline]
    pub const fn halt(&mut self) {
        self.run_bit = false;
    }

    /// Copies the next state into the current state.
    #[inline]
    pub const fn commit(&mut self) {
        self.current = self.next;
    }

    /// Reads the instruction word at the current PC and stages `PC + 4` as next PC.
    pub fn fetch<M: MemoryBus + ?Sized>(&mut self, mem: &mut M) -> u32 {
        let word = mem.read_u32(self.current.pc);
        self.next.pc = self.current.pc.wrapping_add(INSTRUCTION_BYTES);
        word
    }

    /// Processes exactly one instruction: fetch, decode, execute.
    ///
    /// Returns the decoded instruction and its branch outcome so the caller can
    /// count it. The result of the instruction sits in [`Cpu::next`] until committed.
    pub fn process_instruction<M: MemoryBus + ?Sized>(&mut self, mem: &mut M) -> Retired {
        let pc = self.current.pc;
        let word = self.fetch(mem);
        let inst = decode(word);
        trace!(
            pc = %format_args!("{pc:#010x}"),
            word = %format_args!("{word:#010x}"),
            asm = %format_instruction(&inst),
            "execute"
        );
        let branch_taken = self.execute(inst, mem);
        Retired { inst, branch_taken }
    }
}
