//! Physical memory region.
//!
//! A [`Memory`] is one named, zero-initialised byte array mapped at a base
//! address. Byte access uses region-relative offsets; out-of-range offsets
//! read as zero and drop writes.

use crate::config::RegionConfig;

/// One mapped region of simulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    name: String,
    base: u32,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled region of `size` bytes at `base`.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name (e.g. `"text"`).
    /// * `base` - First address covered by the region.
    /// * `size` - Length in bytes.
    pub fn new(name: impl Into<String>, base: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            base,
            data: vec![0; size as usize],
        }
    }

    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `(base_address, size_in_bytes)`.
    pub fn address_range(&self) -> (u32, u32) {
        (self.base, self.data.len() as u32)
    }

    /// Offset of `addr` inside this region, if the region contains it.
    #[inline]
    pub fn offset_of(&self, addr: u32) -> Option<usize> {
        let offset = addr.checked_sub(self.base)? as usize;
        (offset < self.data.len()).then_some(offset)
    }

    /// Reads one byte at a region-relative offset.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }

    /// Writes one byte at a region-relative offset.
    #[inline]
    pub fn write_u8(&mut self, offset: usize, val: u8) {
        if let Some(byte) = self.data.get_mut(offset) {
            *byte = val;
        }
    }

    /// Zeroes the whole region.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl From<&RegionConfig> for Memory {
    fn from(region: &RegionConfig) -> Self {
        Self::new(region.name.clone(), region.base, region.size)
    }
}
