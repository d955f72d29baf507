//! System interconnect (bus) for memory access.
//!
//! This module implements the bus that routes addresses to memory regions. It provides:
//! 1. **Region registration:** Regions are added by address range and kept sorted for lookup.
//! 2. **Access routing:** Little-endian word read/write, one byte at a time, so words
//!    that straddle a region edge still behave byte-exactly.
//! 3. **Loading:** Byte and word blobs written at an absolute address.
//!
//! Bytes outside every region read as zero and silently drop writes.

use super::memory::Memory;
use super::traits::MemoryBus;
use crate::config::Config;

/// Address router over a set of non-overlapping memory regions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bus {
    regions: Vec<Memory>,
    last_region_idx: usize,
}

impl Bus {
    /// Creates an empty bus; add regions with [`Bus::add_region`].
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
            last_region_idx: 0,
        }
    }

    /// Builds a bus with one region per configured memory region.
    pub fn from_config(config: &Config) -> Self {
        let mut bus = Self::new();
        for region in &config.memory.regions {
            bus.add_region(Memory::from(region));
        }
        bus
    }

    /// Registers a region; regions are sorted by base address.
    pub fn add_region(&mut self, region: Memory) {
        self.regions.push(region);
        self.regions.sort_by_key(|r| r.address_range().0);
        self.last_region_idx = 0;
    }

    /// Registered regions in address order.
    pub fn regions(&self) -> &[Memory] {
        &self.regions
    }

    /// Returns whether any region contains `addr`.
    pub fn is_valid_address(&self, addr: u32) -> bool {
        self.regions.iter().any(|r| r.offset_of(addr).is_some())
    }

    /// Finds the region containing `addr`, checking the last hit first.
    fn find_region(&mut self, addr: u32) -> Option<(&mut Memory, usize)> {
        let idx = match self.regions.get(self.last_region_idx) {
            Some(r) if r.offset_of(addr).is_some() => self.last_region_idx,
            _ => {
                let idx = self.regions.iter().position(|r| r.offset_of(addr).is_some())?;
                self.last_region_idx = idx;
                idx
            }
        };
        let region = &mut self.regions[idx];
        let offset = region.offset_of(addr)?;
        Some((region, offset))
    }

    /// Reads one byte; unmapped addresses read as zero.
    pub fn read_u8(&mut self, addr: u32) -> u8 {
        self.find_region(addr)
            .map_or(0, |(region, offset)| region.read_u8(offset))
    }

    /// Writes one byte; writes to unmapped addresses are dropped.
    pub fn write_u8(&mut self, addr: u32, val: u8) {
        if let Some((region, offset)) = self.find_region(addr) {
            region.write_u8(offset, val);
        }
    }

    /// Writes a byte blob starting at `addr`.
    pub fn load_bytes(&mut self, addr: u32, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), *byte);
        }
    }

    /// Writes consecutive words starting at `addr`.
    pub fn load_words(&mut self, addr: u32, words: &[u32]) {
        for (i, word) in words.iter().enumerate() {
            self.write_u32(addr.wrapping_add((i as u32) * 4), *word);
        }
    }

    /// Zeroes every region.
    pub fn clear(&mut self) {
        for region in &mut self.regions {
            region.clear();
        }
    }
}

impl MemoryBus for Bus {
    fn read_u32(&mut self, addr: u32) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u32));
        }
        u32::from_le_bytes(bytes)
    }

    fn write_u32(&mut self, addr: u32, val: u32) {
        for (i, byte) in val.to_le_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), byte);
        }
    }
}
