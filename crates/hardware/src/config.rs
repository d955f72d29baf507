//! Configuration system for the MIPS simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** The classic five-region memory map and text-segment start PC.
//! 2. **Structures:** General run settings and the memory region list.
//! 3. **Loading:** JSON parsing with validation of the memory map.
//!
//! Every field has a default, so an empty JSON object is a valid configuration.
//!
//! # Example
//!
//! ```
//! use mipsim_core::config::Config;
//!
//! let json = r#"{
//!     "general": { "trace_instructions": true, "max_instructions": 1000 },
//!     "memory": { "regions": [ { "name": "text", "base": 4194304, "size": 4096 } ] }
//! }"#;
//!
//! let config = Config::from_json_str(json).unwrap();
//! assert!(config.general.trace_instructions);
//! assert_eq!(config.general.start_pc, 0x0040_0000);
//! assert_eq!(config.memory.regions.len(), 1);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::common::constants::{
    MEM_DATA_START, MEM_KDATA_START, MEM_KTEXT_START, MEM_STACK_START, MEM_TEXT_START,
    REGION_SIZE,
};
use crate::common::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Memory map.
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// errors of [`Config::validate`] for a bad memory map.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that the memory map is usable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoRegions`] if there are no regions.
    /// - [`ConfigError::InvalidRegion`] for an empty region or one that wraps past 4 GiB.
    /// - [`ConfigError::OverlappingRegions`] if two regions share an address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let regions = &self.memory.regions;
        if regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }
        for region in regions {
            if region.size == 0 || region.end() > 1 << 32 {
                return Err(ConfigError::InvalidRegion {
                    name: region.name.clone(),
                });
            }
        }

        let mut sorted: Vec<&RegionConfig> = regions.iter().collect();
        sorted.sort_by_key(|r| r.base);
        for pair in sorted.windows(2) {
            if pair[0].end() > u64::from(pair[1].base) {
                warn!(first = %pair[0].name, second = %pair[1].name, "overlapping memory regions");
                return Err(ConfigError::OverlappingRegions {
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction at trace level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC value (defaults to the text segment base).
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Upper bound on instructions executed by one `go`. `None` runs until halt.
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    const fn default_start_pc() -> u32 {
        MEM_TEXT_START
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: Self::default_start_pc(),
            max_instructions: None,
        }
    }
}

/// Memory map configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Mapped regions. Addresses outside every region read as zero and ignore writes.
    #[serde(default = "MemoryConfig::default_regions")]
    pub regions: Vec<RegionConfig>,
}

impl MemoryConfig {
    /// Text, data, stack, kernel text and kernel data, 1 MiB each.
    fn default_regions() -> Vec<RegionConfig> {
        vec![
            RegionConfig::new("text", MEM_TEXT_START, REGION_SIZE),
            RegionConfig::new("data", MEM_DATA_START, REGION_SIZE),
            RegionConfig::new("stack", MEM_STACK_START, REGION_SIZE),
            RegionConfig::new("ktext", MEM_KTEXT_START, REGION_SIZE),
            RegionConfig::new("kdata", MEM_KDATA_START, REGION_SIZE),
        ]
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            regions: Self::default_regions(),
        }
    }
}

/// One mapped memory region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionConfig {
    /// Display name.
    pub name: String,
    /// First address.
    pub base: u32,
    /// Length in bytes.
    pub size: u32,
}

impl RegionConfig {
    /// Creates a region description.
    pub fn new(name: impl Into<String>, base: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            base,
            size,
        }
    }

    /// One past the last address, widened so a region ending at 4 GiB is representable.
    pub fn end(&self) -> u64 {
        u64::from(self.base) + u64::from(self.size)
    }
}
