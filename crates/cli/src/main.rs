//! MIPS instruction-set simulator CLI.
//!
//! This binary provides a single entry point for the simulator. It performs:
//! 1. **Setup:** Reads an optional JSON config and installs the log subscriber.
//! 2. **Batch run:** With `--go`, runs the program to completion and prints the registers and statistics.
//! 3. **Interactive run:** Otherwise starts the `MIPS-SIM> ` command prompt.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mipsim_core::config::Config;
use mipsim_core::sim::loader;
use mipsim_core::sim::{RunOutcome, Shell, ShellAction, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "Single-cycle MIPS subset simulator",
    long_about = "Load a hex-text or 32-bit MIPS ELF program and run it.\n\nWithout --go an interactive shell starts; type ? for its commands.\n\nExamples:\n  mipsim prog.hex\n  mipsim --go --trace prog.hex\n  mipsim --config map.json prog.elf"
)]
struct Cli {
    /// Program image (hex words or MIPS ELF).
    program: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every executed instruction.
    #[arg(short, long)]
    trace: bool,

    /// Run to completion instead of starting the shell.
    #[arg(short, long)]
    go: bool,

    /// File that receives a copy of every rdump and mdump.
    #[arg(long, default_value = "dumpsim")]
    dump_file: PathBuf,

    /// Stop `go` after this many instructions.
    #[arg(long)]
    max_instructions: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };
    if cli.trace {
        config.general.trace_instructions = true;
    }
    if cli.max_instructions.is_some() {
        config.general.max_instructions = cli.max_instructions;
    }

    init_tracing(config.general.trace_instructions);

    let image = loader::load_program(&cli.program, config.general.start_pc).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let mut sim = Simulator::new(config);
    sim.load_image(&image);

    if cli.go {
        cmd_go(sim);
    } else {
        cmd_shell(sim, &cli.dump_file);
    }
}

/// Installs the fmt subscriber; `RUST_LOG` wins over the defaults.
fn init_tracing(trace_instructions: bool) {
    let default = if trace_instructions {
        "info,mipsim_core=trace"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs to halt (or the instruction cap), then dumps registers and statistics.
fn cmd_go(mut sim: Simulator) {
    let outcome = sim.go();
    if let Err(e) = report(&sim, outcome, &mut io::stdout().lock()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Writes the run outcome, the register dump and the statistics report.
fn report(sim: &Simulator, outcome: RunOutcome, out: &mut dyn Write) -> io::Result<()> {
    match outcome {
        RunOutcome::Completed { executed } => {
            writeln!(out, "[*] Instruction limit reached after {executed} instructions\n")?;
        }
        RunOutcome::Halted { executed } => {
            writeln!(out, "[*] Halted after {executed} instructions\n")?;
        }
        RunOutcome::AlreadyHalted => writeln!(out, "[*] Halted\n")?,
    }
    sim.rdump(out)?;
    sim.stats.write_report(out)?;
    out.flush()
}

/// Reads commands from stdin until `quit` or end of input.
fn cmd_shell(sim: Simulator, dump_path: &Path) {
    let mut shell = Shell::new(sim);
    match File::create(dump_path) {
        Ok(file) => shell = shell.with_dump(Box::new(file)),
        Err(e) => eprintln!(
            "Warning: could not create dump file '{}': {e}",
            dump_path.display()
        ),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("MIPS-SIM> ");
        if let Err(e) = stdout.flush() {
            eprintln!("Error: {e}");
            process::exit(1);
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        match shell.execute_line(&line, &mut stdout) {
            Ok(ShellAction::Continue) => {}
            Ok(ShellAction::Quit) => break,
            Err(e) => println!("Error: {e}"),
        }
    }
}
