//! # Bus Routing Tests
//!
//! Word accesses are assembled little-endian from bytes; unmapped bytes read
//! as zero and drop writes.

use mipsim_core::config::Config;
use mipsim_core::soc::{Bus, Memory, MemoryBus};
use proptest::prelude::*;

fn two_region_bus() -> Bus {
    let mut bus = Bus::new();
    bus.add_region(Memory::new("high", 0x2000, 0x100));
    bus.add_region(Memory::new("low", 0x1000, 0x100));
    bus
}

#[test]
fn regions_are_sorted_by_base() {
    let bus = two_region_bus();
    let names: Vec<&str> = bus.regions().iter().map(Memory::name).collect();
    assert_eq!(names, vec!["low", "high"]);
}

#[test]
fn default_config_maps_five_regions() {
    let bus = Bus::from_config(&Config::default());
    assert_eq!(bus.regions().len(), 5);
    assert!(bus.is_valid_address(0x0040_0000));
    assert!(bus.is_valid_address(0x1000_0000));
    assert!(bus.is_valid_address(0x7FF0_0000));
    assert!(bus.is_valid_address(0x8000_0000));
    assert!(bus.is_valid_address(0x9000_0000));
    assert!(!bus.is_valid_address(0x0000_0000));
    assert!(!bus.is_valid_address(0x0050_0000));
}

#[test]
fn word_round_trip_little_endian() {
    let mut bus = two_region_bus();
    bus.write_u32(0x1010, 0xA1B2_C3D4);
    assert_eq!(bus.read_u32(0x1010), 0xA1B2_C3D4);
    assert_eq!(bus.read_u8(0x1010), 0xD4);
    assert_eq!(bus.read_u8(0x1013), 0xA1);
}

#[test]
fn unmapped_reads_zero_and_drops_writes() {
    let mut bus = two_region_bus();
    bus.write_u32(0x5000, 0xFFFF_FFFF);
    assert_eq!(bus.read_u32(0x5000), 0);
}

#[test]
fn word_straddling_region_end_keeps_mapped_bytes() {
    let mut bus = two_region_bus();
    bus.write_u32(0x10FE, 0x4433_2211);
    assert_eq!(bus.read_u8(0x10FE), 0x11);
    assert_eq!(bus.read_u8(0x10FF), 0x22);
    assert_eq!(bus.read_u32(0x10FE), 0x0000_2211);
}

#[test]
fn load_words_and_bytes() {
    let mut bus = two_region_bus();
    bus.load_words(0x1000, &[0x1111_1111, 0x2222_2222]);
    bus.load_bytes(0x2000, &[1, 2, 3, 4]);
    assert_eq!(bus.read_u32(0x1004), 0x2222_2222);
    assert_eq!(bus.read_u32(0x2000), 0x0403_0201);
}

#[test]
fn alternating_regions_route_correctly() {
    let mut bus = two_region_bus();
    for i in 0..8u32 {
        bus.write_u32(0x1000 + i * 4, i);
        bus.write_u32(0x2000 + i * 4, i + 100);
    }
    for i in 0..8u32 {
        assert_eq!(bus.read_u32(0x1000 + i * 4), i);
        assert_eq!(bus.read_u32(0x2000 + i * 4), i + 100);
    }
}

#[test]
fn clear_zeroes_every_region() {
    let mut bus = two_region_bus();
    bus.write_u32(0x1000, 1);
    bus.write_u32(0x2000, 2);
    bus.clear();
    assert_eq!(bus.read_u32(0x1000), 0);
    assert_eq!(bus.read_u32(0x2000), 0);
}

proptest! {
    #[test]
    fn mapped_word_round_trip(offset in 0u32..0xFD, val in any::<u32>()) {
        let mut bus = two_region_bus();
        bus.write_u32(0x1000 + offset, val);
        prop_assert_eq!(bus.read_u32(0x1000 + offset), val);
    }
}
