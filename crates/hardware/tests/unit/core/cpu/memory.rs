//! # Load and Store Instructions
//!
//! Loads and stores address memory at `rs` alone; the encoded displacement is
//! ignored. Byte accesses work on the low byte of the addressed word.

use mipsim_core::core::Cpu;
use mipsim_core::isa::abi::{REG_A0 as A0, REG_T0 as T0};
use mipsim_core::isa::decode::decode;
use mockall::predicate::eq;
use mockall::Sequence;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;
use crate::common::mocks::memory::MockBus;

const DATA: u32 = 0x1000_0000;

fn cpu_with(base: u32, value: u32) -> Cpu {
    let mut cpu = Cpu::new(0x0040_0000);
    cpu.current.gpr.write(A0, base);
    cpu.current.gpr.write(T0, value);
    cpu.next = cpu.current;
    cpu
}

#[test]
fn lw_reads_word_at_rs_ignoring_displacement() {
    let mut mem = MockBus::new();
    let _ = mem
        .expect_read_u32()
        .with(eq(DATA))
        .times(1)
        .return_const(0xCAFE_F00Du32);

    let mut cpu = cpu_with(DATA, 0);
    let _ = cpu.execute(decode(lw(T0, A0, 8)), &mut mem);
    assert_eq!(cpu.next.gpr.read(T0), 0xCAFE_F00D);
}

#[test]
fn sw_writes_word_at_rs_ignoring_displacement() {
    let mut mem = MockBus::new();
    let _ = mem
        .expect_write_u32()
        .with(eq(DATA), eq(0x1234_5678))
        .times(1)
        .return_const(());

    let mut cpu = cpu_with(DATA, 0x1234_5678);
    let _ = cpu.execute(decode(sw(T0, A0, -16)), &mut mem);
}

#[test]
fn lb_zero_extends_low_byte() {
    let mut mem = MockBus::new();
    let _ = mem
        .expect_read_u32()
        .with(eq(DATA))
        .times(1)
        .return_const(0xAABB_CCF0u32);

    let mut cpu = cpu_with(DATA, 0);
    let _ = cpu.execute(decode(lb(T0, A0, 3)), &mut mem);
    assert_eq!(cpu.next.gpr.read(T0), 0xF0);
}

#[test]
fn sb_replaces_only_low_byte() {
    let mut seq = Sequence::new();
    let mut mem = MockBus::new();
    let _ = mem
        .expect_read_u32()
        .with(eq(DATA))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(0xAABB_CCDDu32);
    let _ = mem
        .expect_write_u32()
        .with(eq(DATA), eq(0xAABB_CCEE))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut cpu = cpu_with(DATA, 0x1234_56EE);
    let _ = cpu.execute(decode(sb(T0, A0, 1)), &mut mem);
}

#[test]
fn stores_do_not_touch_registers() {
    let mut mem = MockBus::new();
    let _ = mem.expect_read_u32().return_const(0u32);
    let _ = mem.expect_write_u32().return_const(());

    let mut cpu = cpu_with(DATA, 0xFF);
    let before = cpu.next.gpr;
    let _ = cpu.execute(decode(sw(T0, A0, 0)), &mut mem);
    let _ = cpu.execute(decode(sb(T0, A0, 0)), &mut mem);
    assert_eq!(cpu.next.gpr, before);
}

#[test]
fn store_then_load_round_trips_through_bus() {
    let mut ctx = TestContext::new()
        .program(&[sw(T0, A0, 0), lw(9, A0, 0), lb(10, A0, 0)])
        .with_reg(A0, DATA)
        .with_reg(T0, 0x8899_AABB);
    let _ = ctx.run(3);
    assert_eq!(ctx.read_word(DATA), 0x8899_AABB);
    assert_eq!(ctx.get_reg(9), 0x8899_AABB);
    assert_eq!(ctx.get_reg(10), 0xBB);
}

#[test]
fn words_are_little_endian_in_memory() {
    let mut ctx = TestContext::new()
        .program(&[sw(T0, A0, 0)])
        .with_reg(A0, DATA)
        .with_reg(T0, 0x1122_3344);
    let _ = ctx.step();
    assert_eq!(ctx.sim.bus.read_u8(DATA), 0x44);
    assert_eq!(ctx.sim.bus.read_u8(DATA + 3), 0x11);
}

#[test]
fn sb_preserves_upper_bytes_in_memory() {
    let mut ctx = TestContext::new()
        .program(&[sb(T0, A0, 0)])
        .with_reg(A0, DATA)
        .with_reg(T0, 0xEE);
    ctx.write_word(DATA, 0xAABB_CCDD);
    let _ = ctx.step();
    assert_eq!(ctx.read_word(DATA), 0xAABB_CCEE);
}

#[test]
fn load_from_unmapped_address_reads_zero() {
    let mut ctx = TestContext::new()
        .program(&[lw(T0, A0, 0)])
        .with_reg(A0, 0x5000_0000)
        .with_reg(T0, 0xFFFF_FFFF);
    let _ = ctx.step();
    assert_eq!(ctx.get_reg(T0), 0);
}
