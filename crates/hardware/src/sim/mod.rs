//! Simulation driver, program loading and the interactive shell.
//!
//! - [`loader`] turns hex text or MIPS ELF files into a [`loader::ProgramImage`].
//! - [`simulator`] owns the CPU and memory and drives the commit loop.
//! - [`shell`] parses and runs the interactive commands.

pub mod loader;
pub mod shell;
pub mod simulator;

pub use self::shell::{Command, Shell, ShellAction};
pub use self::simulator::{RunOutcome, Simulator};
