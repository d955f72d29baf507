//! Error types for the simulator's fallible edges.
//!
//! The CPU core itself cannot fail: every word decodes and every instruction
//! executes. Errors only come from the layers around it:
//! 1. **Loading:** Reading and parsing program images.
//! 2. **Configuration:** Reading, parsing and validating the memory map.
//! 3. **Shell:** Parsing and running interactive commands.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read program image '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A token in a hex image is not a 32-bit hexadecimal word.
    #[error("line {line}: '{token}' is not a 32-bit hex word")]
    InvalidWord {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The ELF container could not be parsed.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// The ELF image targets another architecture, word size or byte order.
    #[error("ELF image is for {machine}, expected 32-bit little-endian MIPS")]
    NotMips {
        /// Architecture reported by the ELF header.
        machine: String,
    },

    /// A segment does not fit in the 32-bit address space.
    #[error("segment at {addr:#x} does not fit a 32-bit address space")]
    SegmentOutOfRange {
        /// Segment virtual address.
        addr: u64,
    },

    /// The image contains no instructions or loadable data.
    #[error("program image is empty")]
    Empty,
}

/// Failure while reading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`crate::config::Config`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// No memory regions were configured.
    #[error("memory map has no regions")]
    NoRegions,

    /// A region has zero size or runs past the end of the address space.
    #[error("region '{name}' has an invalid extent")]
    InvalidRegion {
        /// Region name.
        name: String,
    },

    /// Two regions claim the same address.
    #[error("regions '{first}' and '{second}' overlap")]
    OverlappingRegions {
        /// Lower region.
        first: String,
        /// Higher region.
        second: String,
    },
}

/// Failure while parsing or executing a shell command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The line was blank.
    #[error("empty command")]
    Empty,

    /// The command word is not recognised.
    #[error("invalid command '{0}'")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{command} requires {argument}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Description of the missing argument.
        argument: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("'{token}' is not a valid number: {source}")]
    InvalidNumber {
        /// Offending token.
        token: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// Register index outside 0-31.
    #[error("register {0} does not exist")]
    RegisterOutOfRange(u32),

    /// Writing command output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
