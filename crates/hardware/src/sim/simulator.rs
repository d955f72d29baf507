//! Simulator: owns the CPU, the memory bus and the run bookkeeping.
//!
//! The CPU only processes one instruction per call and leaves its result in the
//! next-state snapshot. The simulator is the driver around it: it commits next
//! into current after every instruction, counts instructions, and implements
//! the `run n` / `go` loops and the register and memory dumps.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::common::constants::INSTRUCTION_BYTES;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::ArchState;
use crate::isa::instruction::Instruction;
use crate::sim::loader::ProgramImage;
use crate::soc::{Bus, MemoryBus};
use crate::stats::SimStats;

/// How a `run` or `go` request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run flag was already clear; nothing executed.
    AlreadyHalted,
    /// The requested number of instructions executed and the CPU is still running.
    Completed {
        /// Instructions executed by this request.
        executed: u64,
    },
    /// The CPU halted during this request.
    Halted {
        /// Instructions executed by this request, including the halting one.
        executed: u64,
    },
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural state.
    pub cpu: Cpu,
    /// Memory.
    pub bus: Bus,
    /// Configuration the simulator was built from.
    pub config: Config,
    /// Instructions committed since the last reset.
    pub instruction_count: u64,
    /// Instruction mix statistics.
    pub stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with the configured memory map and start PC.
    pub fn new(config: Config) -> Self {
        let bus = Bus::from_config(&config);
        let cpu = Cpu::new(config.general.start_pc);
        Self {
            cpu,
            bus,
            config,
            instruction_count: 0,
            stats: SimStats::default(),
        }
    }

    /// Clears registers, memory and counters and restarts at the configured PC.
    pub fn reset(&mut self) {
        self.cpu = Cpu::new(self.config.general.start_pc);
        self.bus.clear();
        self.instruction_count = 0;
        self.stats = SimStats::default();
    }

    /// Writes a program into memory and points both state snapshots at its entry.
    ///
    /// Bytes that fall outside every memory region are dropped with a warning.
    pub fn load_image(&mut self, image: &ProgramImage) {
        for segment in &image.segments {
            let unmapped = (0..segment.bytes.len())
                .filter(|&i| !self.bus.is_valid_address(segment.addr.wrapping_add(i as u32)))
                .count();
            if unmapped > 0 {
                warn!(
                    addr = %format_args!("{:#010x}", segment.addr),
                    unmapped,
                    "segment bytes outside every memory region dropped"
                );
            }
            self.bus.load_bytes(segment.addr, &segment.bytes);
        }
        if !self.bus.is_valid_address(image.entry) {
            warn!(entry = %format_args!("{:#010x}", image.entry), "entry point is unmapped");
        }
        self.cpu.current.pc = image.entry;
        self.cpu.next.pc = image.entry;
    }

    /// Executes one instruction and commits its result.
    pub fn cycle(&mut self) -> Instruction {
        let retired = self.cpu.process_instruction(&mut self.bus);
        self.cpu.commit();
        self.instruction_count += 1;
        self.stats.record(&retired.inst, retired.branch_taken);
        retired.inst
    }

    /// Executes up to `cycles` instructions, stopping early if the CPU halts.
    pub fn run(&mut self, cycles: u64) -> RunOutcome {
        if !self.cpu.is_running() {
            return RunOutcome::AlreadyHalted;
        }
        debug!(cycles, "run");
        for executed in 1..=cycles {
            let _ = self.cycle();
            if !self.cpu.is_running() {
                return RunOutcome::Halted { executed };
            }
        }
        RunOutcome::Completed { executed: cycles }
    }

    /// Executes until the CPU halts or the configured instruction cap is reached.
    pub fn go(&mut self) -> RunOutcome {
        if !self.cpu.is_running() {
            return RunOutcome::AlreadyHalted;
        }
        debug!(cap = ?self.config.general.max_instructions, "go");
        let mut executed = 0;
        while self.cpu.is_running() {
            if self
                .config
                .general
                .max_instructions
                .is_some_and(|cap| executed >= cap)
            {
                return RunOutcome::Completed { executed };
            }
            let _ = self.cycle();
            executed += 1;
        }
        RunOutcome::Halted { executed }
    }

    /// Sets a register in both snapshots so the value survives the next commit.
    pub const fn set_register(&mut self, idx: usize, val: u32) {
        self.cpu.current.gpr.write(idx, val);
        self.cpu.next.gpr.write(idx, val);
    }

    /// Sets HI in both snapshots.
    pub const fn set_hi(&mut self, val: u32) {
        self.cpu.current.hi = val;
        self.cpu.next.hi = val;
    }

    /// Sets LO in both snapshots.
    pub const fn set_lo(&mut self, val: u32) {
        self.cpu.current.lo = val;
        self.cpu.next.lo = val;
    }

    /// Current architectural state.
    pub const fn state(&self) -> &ArchState {
        &self.cpu.current
    }

    /// Reads a memory word.
    pub fn read_word(&mut self, addr: u32) -> u32 {
        self.bus.read_u32(addr)
    }

    /// Writes the instruction count, PC, all registers, HI and LO.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn rdump(&self, out: &mut dyn Write) -> io::Result<()> {
        let state = self.state();
        writeln!(out, "Current register/bus values :")?;
        writeln!(out, "-------------------------------------")?;
        writeln!(out, "Instruction Count : {}", self.instruction_count)?;
        writeln!(out, "PC                : 0x{:08x}", state.pc)?;
        writeln!(out, "Registers:")?;
        for (idx, val) in state.gpr.iter() {
            writeln!(out, "R{idx}: 0x{val:08x}")?;
        }
        writeln!(out, "HI: 0x{:08x}", state.hi)?;
        writeln!(out, "LO: 0x{:08x}", state.lo)?;
        writeln!(out)?;
        Ok(())
    }

    /// Writes every word from `start` to `stop` inclusive, 4 bytes apart.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn mdump(&mut self, start: u32, stop: u32, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Memory content [0x{start:08x}..0x{stop:08x}] :")?;
        writeln!(out, "-------------------------------------")?;
        let mut addr = u64::from(start);
        while addr <= u64::from(stop) {
            let a = addr as u32;
            let word = self.bus.read_u32(a);
            writeln!(out, "  0x{a:08x} ({a}) : 0x{word:08x}")?;
            addr += u64::from(INSTRUCTION_BYTES);
        }
        writeln!(out)?;
        Ok(())
    }
}
