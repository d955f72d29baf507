//! # Simulator Driver Tests
//!
//! Run loops, register access from outside the CPU, dumps and reset.

use mipsim_core::Simulator;
use mipsim_core::common::constants::{MEM_DATA_START, MEM_TEXT_START};
use mipsim_core::isa::abi::REG_T0 as T0;
use mipsim_core::sim::RunOutcome;
use mipsim_core::config::RegionConfig;
use mipsim_core::sim::loader::{ProgramImage, parse_hex_image};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::*;
use crate::common::harness::{TestContext, small_config};

fn dump_to_string(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut out = Vec::new();
    f(&mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn new_simulator_starts_at_configured_pc() {
    let mut config = small_config();
    config.general.start_pc = MEM_TEXT_START + 0x40;
    let sim = Simulator::new(config);
    assert_eq!(sim.state().pc, MEM_TEXT_START + 0x40);
    assert_eq!(sim.cpu.next.pc, MEM_TEXT_START + 0x40);
    assert!(sim.cpu.is_running());
    assert_eq!(sim.instruction_count, 0);
}

#[test]
fn run_completes_requested_cycles() {
    let mut ctx = TestContext::new().program(&[addiu(T0, T0, 1); 8]);
    assert_eq!(ctx.run(3), RunOutcome::Completed { executed: 3 });
    assert_eq!(ctx.get_reg(T0), 1);
    assert_eq!(ctx.pc(), MEM_TEXT_START + 12);
    assert_eq!(ctx.sim.instruction_count, 3);
}

#[test]
fn run_zero_does_nothing() {
    let mut ctx = TestContext::new().program(&[addiu(T0, 0, 1)]);
    assert_eq!(ctx.run(0), RunOutcome::Completed { executed: 0 });
    assert_eq!(ctx.pc(), MEM_TEXT_START);
}

#[test]
fn run_stops_at_halt_and_refuses_afterwards() {
    let mut ctx = TestContext::new().program(&[addiu(T0, 0, 1), HALT, addiu(T0, 0, 2)]);
    assert_eq!(ctx.run(10), RunOutcome::Halted { executed: 2 });
    assert_eq!(ctx.run(10), RunOutcome::AlreadyHalted);
    assert_eq!(ctx.go(), RunOutcome::AlreadyHalted);
    assert_eq!(ctx.get_reg(T0), 1);
    assert_eq!(ctx.sim.instruction_count, 2);
}

#[test]
fn go_respects_instruction_cap() {
    let mut config = small_config();
    config.general.max_instructions = Some(4);
    // Infinite loop: j to itself.
    let mut ctx = TestContext::with_config(config)
        .program(&[j(jump_field(MEM_TEXT_START))]);
    assert_eq!(ctx.go(), RunOutcome::Completed { executed: 4 });
    assert!(ctx.cpu().is_running());
    assert_eq!(ctx.go(), RunOutcome::Completed { executed: 4 });
    assert_eq!(ctx.sim.instruction_count, 8);
}

#[test]
fn taken_branch_to_fall_through_counts_as_taken() {
    let mut ctx = TestContext::new().program(&[beq(0, 0, 1), bne(0, 0, 1), HALT]);
    let _ = ctx.step();
    let _ = ctx.step();
    assert_eq!(ctx.pc(), MEM_TEXT_START + 8);
    assert_eq!(ctx.sim.stats.branches_taken, 1);
    assert_eq!(ctx.sim.stats.branches_not_taken, 1);
}

#[test]
fn register_set_from_outside_survives_commit() {
    let mut ctx = TestContext::new().program(&[addiu(9, 0, 1)]);
    ctx.set_reg(T0, 0x55);
    ctx.sim.set_hi(1);
    ctx.sim.set_lo(2);
    let _ = ctx.step();
    assert_eq!(ctx.get_reg(T0), 0x55);
    assert_eq!(ctx.sim.state().hi, 1);
    assert_eq!(ctx.sim.state().lo, 2);
}

#[test]
fn load_image_places_segments_and_entry() {
    let mut sim = Simulator::new(small_config());
    let image = ProgramImage::from_words(MEM_TEXT_START + 8, &[addiu(T0, 0, 3), HALT]);
    sim.load_image(&image);
    assert_eq!(sim.state().pc, MEM_TEXT_START + 8);
    assert_eq!(sim.read_word(MEM_TEXT_START + 8), addiu(T0, 0, 3));
    assert_eq!(sim.go(), RunOutcome::Halted { executed: 2 });
    assert_eq!(sim.cpu.read_reg(T0), 3);
}

#[test]
fn hex_image_enters_at_configured_start_pc() {
    let mut config = small_config();
    config.general.start_pc = MEM_TEXT_START + 0x10;
    let image = parse_hex_image("24080001", config.general.start_pc).unwrap();
    let mut sim = Simulator::new(config);
    sim.load_image(&image);
    assert_eq!(sim.state().pc, MEM_TEXT_START + 0x10);
    assert_eq!(sim.cpu.next.pc, MEM_TEXT_START + 0x10);
    assert_eq!(sim.go(), RunOutcome::Halted { executed: 2 });
    assert_eq!(sim.cpu.read_reg(T0), 1);
}

#[test]
fn hex_image_runs_from_relocated_text_region() {
    let mut config = small_config();
    config.memory.regions[0] = RegionConfig::new("text", 0x0050_0000, 0x1000);
    config.general.start_pc = 0x0050_0000;
    let image = parse_hex_image("24080007\n00000000", config.general.start_pc).unwrap();
    let mut sim = Simulator::new(config);
    sim.load_image(&image);
    assert_eq!(sim.read_word(0x0050_0000), 0x2408_0007);
    assert_eq!(sim.go(), RunOutcome::Halted { executed: 2 });
    assert_eq!(sim.cpu.read_reg(T0), 7);
}

#[test]
fn load_image_drops_unmapped_bytes() {
    let mut sim = Simulator::new(small_config());
    sim.load_image(&ProgramImage::from_words(0x6000_0000, &[0x2408_0007]));
    assert!(!sim.bus.is_valid_address(0x6000_0000));
    assert_eq!(sim.read_word(0x6000_0000), 0);
    assert_eq!(sim.state().pc, 0x6000_0000);
}

#[test]
fn reset_restores_initial_state() {
    let mut ctx = TestContext::new().program(&[addiu(T0, 0, 9), HALT]);
    ctx.write_word(MEM_DATA_START, 0xFFFF_FFFF);
    let _ = ctx.go();
    ctx.sim.reset();
    assert!(ctx.cpu().is_running());
    assert_eq!(ctx.pc(), MEM_TEXT_START);
    assert_eq!(ctx.get_reg(T0), 0);
    assert_eq!(ctx.sim.instruction_count, 0);
    assert_eq!(ctx.sim.stats.instructions_retired, 0);
    assert_eq!(ctx.read_word(MEM_DATA_START), 0);
}

#[test]
fn rdump_lists_count_pc_and_registers() {
    let mut ctx = TestContext::new().program(&[addiu(T0, 0, 5)]);
    ctx.sim.set_hi(0xABCD);
    let _ = ctx.step();
    let text = dump_to_string(|out| ctx.sim.rdump(out).unwrap());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Current register/bus values :");
    assert_eq!(lines[2], "Instruction Count : 1");
    assert_eq!(lines[3], "PC                : 0x00400004");
    assert_eq!(lines[4], "Registers:");
    assert_eq!(lines[5], "R0: 0x00000000");
    assert_eq!(lines[5 + T0], "R8: 0x00000005");
    assert_eq!(lines[37], "HI: 0x0000abcd");
    assert_eq!(lines[38], "LO: 0x00000000");
    assert_eq!(lines.len(), 40);
}

#[test]
fn mdump_prints_inclusive_word_range() {
    let mut ctx = TestContext::new();
    ctx.write_word(MEM_DATA_START, 1);
    let text = dump_to_string(|out| ctx.sim.mdump(MEM_DATA_START, MEM_DATA_START + 8, out).unwrap());
    assert_eq!(
        text,
        "\nMemory content [0x10000000..0x10000008] :\n\
         -------------------------------------\n  \
         0x10000000 (268435456) : 0x00000001\n  \
         0x10000004 (268435460) : 0x00000000\n  \
         0x10000008 (268435464) : 0x00000000\n\n"
    );
}

#[test]
fn mdump_empty_and_top_of_memory_ranges_terminate() {
    let mut ctx = TestContext::new();
    let empty = dump_to_string(|out| ctx.sim.mdump(0x20, 0x10, out).unwrap());
    assert_eq!(empty.lines().filter(|l| l.starts_with("  0x")).count(), 0);

    let top = dump_to_string(|out| ctx.sim.mdump(0xFFFF_FFF8, 0xFFFF_FFFF, out).unwrap());
    assert_eq!(top.lines().filter(|l| l.starts_with("  0x")).count(), 2);
}

#[test]
fn stats_track_branch_outcomes() {
    let program = [
        addiu(T0, 0, 3),
        addi(T0, T0, -1),
        bne(T0, 0, -1), // back to the addi
        sw(T0, 4, 0),
        HALT,
    ];
    let mut ctx = TestContext::new().program(&program).with_reg(4, MEM_DATA_START);
    let _ = ctx.go();
    let stats = &ctx.sim.stats;
    assert_eq!(stats.branches_taken, 2);
    assert_eq!(stats.branches_not_taken, 1);
    assert_eq!(stats.inst_branch, 3);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.halts, 1);
    assert_eq!(stats.instructions_retired, ctx.sim.instruction_count);
}
