//! Simulation statistics collection and reporting.
//!
//! This module tracks what the simulated program did. It provides:
//! 1. **Throughput:** Retired instructions and host-side instructions per second.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, pseudo).
//! 3. **Control flow:** Taken and not-taken conditional branches.

use std::io::{self, Write};
use std::time::Instant;

use crate::isa::instruction::{Instruction, InstructionClass};

/// Simulation statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of instructions committed (retired), including the halting one.
    pub instructions_retired: u64,

    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of unconditional jumps retired.
    pub inst_jump: u64,
    /// Count of pseudoinstructions retired.
    pub inst_pseudo: u64,
    /// Count of halts (words that matched no encoding).
    pub halts: u64,

    /// Conditional branches whose condition held.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_pseudo: 0,
            halts: 0,
            branches_taken: 0,
            branches_not_taken: 0,
        }
    }
}

impl SimStats {
    /// Records one retired instruction.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instruction that just executed.
    /// * `branch_taken` - Whether a conditional branch's condition held.
    pub const fn record(&mut self, inst: &Instruction, branch_taken: bool) {
        self.instructions_retired += 1;
        match inst.class() {
            InstructionClass::Alu => self.inst_alu += 1,
            InstructionClass::Load => self.inst_load += 1,
            InstructionClass::Store => self.inst_store += 1,
            InstructionClass::Branch => {
                self.inst_branch += 1;
                if branch_taken {
                    self.branches_taken += 1;
                } else {
                    self.branches_not_taken += 1;
                }
            }
            InstructionClass::Jump => self.inst_jump += 1,
            InstructionClass::Pseudo => self.inst_pseudo += 1,
            InstructionClass::Halt => self.halts += 1,
        }
    }

    /// Writes the statistics report to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_report(&self, out: &mut dyn Write) -> io::Result<()> {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;
        let mips = if seconds > 0.0 {
            (self.instructions_retired as f64 / seconds) / 1_000_000.0
        } else {
            0.0
        };

        writeln!(out, "==========================================================")?;
        writeln!(out, "MIPS SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "host_seconds             {seconds:.4} s")?;
        writeln!(out, "sim_insts                {}", self.instructions_retired)?;
        writeln!(out, "sim_mips                 {mips:.2}")?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "INSTRUCTION MIX")?;
        for (name, count) in [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.jump", self.inst_jump),
            ("op.pseudo", self.inst_pseudo),
            ("op.halt", self.halts),
        ] {
            writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count))?;
        }
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "BRANCHES")?;
        writeln!(out, "  branch.taken           {}", self.branches_taken)?;
        writeln!(out, "  branch.not_taken       {}", self.branches_not_taken)?;
        writeln!(out, "==========================================================")?;
        Ok(())
    }
}
