//! Interactive command shell.
//!
//! Parses the classic simulator commands and runs them against a [`Simulator`].
//! A command is picked by its first letter, so `r 10`, `run 10` and `rdump`
//! (second letter `d`) all work:
//!
//! | Command | Effect |
//! |---|---|
//! | `go` | run until halt |
//! | `run n` | run `n` instructions |
//! | `mdump low high` | dump memory words, addresses in hex |
//! | `rdump` | dump registers |
//! | `input reg value` | set a register |
//! | `high value` / `low value` | set HI / LO |
//! | `?` | help |
//! | `quit` | leave |
//!
//! `rdump` and `mdump` also go to the dump sink when one is attached.

use std::fmt;
use std::io::Write;

use crate::common::error::ShellError;
use crate::isa::abi::NUM_REGS;
use crate::sim::simulator::{RunOutcome, Simulator};

/// Help text printed by `?`.
pub const HELP: &str = "\
----------------MIPS ISIM Help-----------------------
go                     -  run program to completion
run n                  -  execute program for n instructions
mdump low high         -  dump memory from low to high (hex)
rdump                  -  dump the register & bus values
input reg_no reg_value -  set GPR reg_no to reg_value
high value             -  set the HI register to value
low value              -  set the LO register to value
?                      -  display this help menu
quit                   -  exit the program
";

/// A parsed shell command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run until halt.
    Go,
    /// Run a fixed number of instructions.
    Run(u64),
    /// Dump memory words between two addresses, inclusive.
    MemDump {
        /// First address.
        start: u32,
        /// Last address.
        stop: u32,
    },
    /// Dump registers.
    RegDump,
    /// Set a general-purpose register.
    Input {
        /// Register index.
        reg: usize,
        /// New value.
        value: u32,
    },
    /// Set HI.
    High(u32),
    /// Set LO.
    Low(u32),
    /// Print help.
    Help,
    /// Leave the shell.
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// - [`ShellError::Empty`] for a blank line.
    /// - [`ShellError::UnknownCommand`] for an unrecognised command word.
    /// - [`ShellError::MissingArgument`] / [`ShellError::InvalidNumber`] for bad arguments.
    /// - [`ShellError::RegisterOutOfRange`] for `input` with a register above 31.
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let mut parts = line.split_whitespace();
        let word = parts.next().ok_or(ShellError::Empty)?;
        let lower = word.to_ascii_lowercase();
        if lower == "help" {
            return Ok(Self::Help);
        }

        let mut chars = lower.chars();
        let (first, second) = (chars.next(), chars.next());
        match first {
            Some('g') => Ok(Self::Go),
            Some('m') => {
                let start = parse_hex(arg(parts.next(), "mdump", "a low address")?)?;
                let stop = parse_hex(arg(parts.next(), "mdump", "a high address")?)?;
                Ok(Self::MemDump { start, stop })
            }
            Some('?') => Ok(Self::Help),
            Some('q') => Ok(Self::Quit),
            Some('r') if second == Some('d') => Ok(Self::RegDump),
            Some('r') => {
                let count = parse_u64(arg(parts.next(), "run", "an instruction count")?)?;
                Ok(Self::Run(count))
            }
            Some('i') => {
                let reg = parse_u32(arg(parts.next(), "input", "a register number")?)?;
                let value = parse_u32(arg(parts.next(), "input", "a value")?)?;
                if reg as usize >= NUM_REGS {
                    return Err(ShellError::RegisterOutOfRange(reg));
                }
                Ok(Self::Input {
                    reg: reg as usize,
                    value,
                })
            }
            Some('h') => Ok(Self::High(parse_u32(arg(parts.next(), "high", "a value")?)?)),
            Some('l') => Ok(Self::Low(parse_u32(arg(parts.next(), "low", "a value")?)?)),
            _ => Err(ShellError::UnknownCommand(word.to_string())),
        }
    }
}

/// What the caller should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellAction {
    /// Keep prompting.
    Continue,
    /// Leave the shell.
    Quit,
}

/// A simulator plus an optional sink that receives a copy of every dump.
pub struct Shell {
    /// The simulator commands act on.
    pub sim: Simulator,
    dump: Option<Box<dyn Write>>,
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("sim", &self.sim)
            .field("dump", &self.dump.is_some())
            .finish()
    }
}

impl Shell {
    /// Wraps a simulator with no dump sink.
    pub const fn new(sim: Simulator) -> Self {
        Self { sim, dump: None }
    }

    /// Attaches a sink that also receives `rdump` and `mdump` output.
    #[must_use]
    pub fn with_dump(mut self, sink: Box<dyn Write>) -> Self {
        self.dump = Some(sink);
        self
    }

    /// Parses and executes one line.
    ///
    /// # Errors
    ///
    /// As [`Command::parse`] and [`Shell::execute`].
    pub fn execute_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
    ) -> Result<ShellAction, ShellError> {
        let command = Command::parse(line)?;
        self.execute(command, out)
    }

    /// Executes a parsed command, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] if `out` or the dump sink fails.
    pub fn execute(
        &mut self,
        command: Command,
        out: &mut dyn Write,
    ) -> Result<ShellAction, ShellError> {
        match command {
            Command::Go => {
                if !self.sim.cpu.is_running() {
                    writeln!(out, "Can't simulate, Simulator is halted\n")?;
                    return Ok(ShellAction::Continue);
                }
                writeln!(out, "Simulating...\n")?;
                match self.sim.go() {
                    RunOutcome::Halted { .. } | RunOutcome::AlreadyHalted => {
                        writeln!(out, "Simulator halted\n")?;
                    }
                    RunOutcome::Completed { executed } => {
                        writeln!(out, "Stopped after {executed} instructions (limit reached)\n")?;
                    }
                }
            }
            Command::Run(count) => {
                if !self.sim.cpu.is_running() {
                    writeln!(out, "Can't simulate, Simulator is halted\n")?;
                    return Ok(ShellAction::Continue);
                }
                writeln!(out, "Simulating for {count} cycles...\n")?;
                if let RunOutcome::Halted { .. } = self.sim.run(count) {
                    writeln!(out, "Simulator halted\n")?;
                }
            }
            Command::MemDump { start, stop } => {
                self.sim.mdump(start, stop, out)?;
                if let Some(dump) = self.dump.as_mut() {
                    self.sim.mdump(start, stop, &mut **dump)?;
                }
            }
            Command::RegDump => {
                self.sim.rdump(out)?;
                if let Some(dump) = self.dump.as_mut() {
                    self.sim.rdump(&mut **dump)?;
                }
            }
            Command::Input { reg, value } => self.sim.set_register(reg, value),
            Command::High(value) => self.sim.set_hi(value),
            Command::Low(value) => self.sim.set_lo(value),
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => {
                writeln!(out, "Bye.")?;
                return Ok(ShellAction::Quit);
            }
        }
        Ok(ShellAction::Continue)
    }
}

fn arg<'a>(
    token: Option<&'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ShellError> {
    token.ok_or(ShellError::MissingArgument { command, argument })
}

fn invalid(token: &str) -> impl FnOnce(std::num::ParseIntError) -> ShellError + '_ {
    move |source| ShellError::InvalidNumber {
        token: token.to_string(),
        source,
    }
}

/// Hex with or without `0x`.
fn parse_hex(token: &str) -> Result<u32, ShellError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).map_err(invalid(token))
}

/// Decimal, `0x` hex, or a negative decimal taken as two's complement.
fn parse_u32(token: &str) -> Result<u32, ShellError> {
    if token.starts_with("0x") || token.starts_with("0X") {
        parse_hex(token)
    } else if token.starts_with('-') {
        token.parse::<i32>().map(|v| v as u32).map_err(invalid(token))
    } else {
        token.parse::<u32>().map_err(invalid(token))
    }
}

fn parse_u64(token: &str) -> Result<u64, ShellError> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(digits, 16).map_err(invalid(token)),
        None => token.parse::<u64>().map_err(invalid(token)),
    }
}
