//! Common utilities and types used throughout the simulator.
//!
//! This module provides building blocks shared across components:
//! 1. **Constants:** Instruction width and the default memory map.
//! 2. **Error Handling:** Error enums for loading, configuration and the shell.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{ConfigError, LoadError, ShellError};
