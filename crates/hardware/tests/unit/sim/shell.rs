//! # Shell Command Tests
//!
//! Parsing by first letter, number formats, and what each command prints.

use std::fs;

use mipsim_core::common::constants::{MEM_DATA_START, MEM_TEXT_START};
use mipsim_core::common::error::ShellError;
use mipsim_core::sim::shell::HELP;
use mipsim_core::sim::{Command, Shell, ShellAction};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

fn shell_with(program: &[u32]) -> Shell {
    Shell::new(TestContext::new().program(program).sim)
}

fn exec(shell: &mut Shell, line: &str) -> (ShellAction, String) {
    let mut out = Vec::new();
    let action = shell.execute_line(line, &mut out).unwrap();
    (action, String::from_utf8(out).unwrap())
}

// ──────────────────────────────────────────────────────────
// Parsing
// ──────────────────────────────────────────────────────────

#[rstest]
#[case("go", Command::Go)]
#[case("g", Command::Go)]
#[case("GO", Command::Go)]
#[case("run 10", Command::Run(10))]
#[case("r 0x10", Command::Run(16))]
#[case("rdump", Command::RegDump)]
#[case("rd", Command::RegDump)]
#[case("mdump 0x10000000 10000010", Command::MemDump { start: 0x1000_0000, stop: 0x1000_0010 })]
#[case("input 8 42", Command::Input { reg: 8, value: 42 })]
#[case("i 31 0xffffffff", Command::Input { reg: 31, value: 0xFFFF_FFFF })]
#[case("input 2 -1", Command::Input { reg: 2, value: 0xFFFF_FFFF })]
#[case("high 7", Command::High(7))]
#[case("low 0x20", Command::Low(0x20))]
#[case("?", Command::Help)]
#[case("help", Command::Help)]
#[case("quit", Command::Quit)]
#[case("  q  ", Command::Quit)]
fn parses_command(#[case] line: &str, #[case] expected: Command) {
    assert_eq!(Command::parse(line).unwrap(), expected);
}

#[test]
fn blank_line_is_empty() {
    assert!(matches!(Command::parse("   "), Err(ShellError::Empty)));
}

#[test]
fn unknown_command_keeps_word() {
    match Command::parse("xyzzy 1") {
        Err(ShellError::UnknownCommand(word)) => assert_eq!(word, "xyzzy"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
#[case("run", "run")]
#[case("mdump 0x10", "mdump")]
#[case("input 3", "input")]
#[case("high", "high")]
#[case("low", "low")]
fn missing_argument(#[case] line: &str, #[case] expected: &str) {
    match Command::parse(line) {
        Err(ShellError::MissingArgument { command, .. }) => assert_eq!(command, expected),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
#[case("run ten")]
#[case("mdump 0xzz 0x10")]
#[case("high 0x1ffffffff")]
fn invalid_number(#[case] line: &str) {
    assert!(matches!(
        Command::parse(line),
        Err(ShellError::InvalidNumber { .. })
    ));
}

#[test]
fn register_above_31_is_rejected() {
    assert!(matches!(
        Command::parse("input 32 1"),
        Err(ShellError::RegisterOutOfRange(32))
    ));
}

// ──────────────────────────────────────────────────────────
// Execution
// ──────────────────────────────────────────────────────────

#[test]
fn run_reports_and_halts() {
    let mut shell = shell_with(&[addiu(8, 0, 1), HALT]);

    let (action, text) = exec(&mut shell, "run 1");
    assert_eq!(action, ShellAction::Continue);
    assert_eq!(text, "Simulating for 1 cycles...\n\n");

    let (_, text) = exec(&mut shell, "run 5");
    assert_eq!(text, "Simulating for 5 cycles...\n\nSimulator halted\n\n");

    let (_, text) = exec(&mut shell, "run 5");
    assert_eq!(text, "Can't simulate, Simulator is halted\n\n");
}

#[test]
fn go_runs_to_halt() {
    let mut shell = shell_with(&[addiu(8, 0, 1), addiu(9, 0, 2), HALT]);
    let (_, text) = exec(&mut shell, "go");
    assert_eq!(text, "Simulating...\n\nSimulator halted\n\n");
    assert_eq!(shell.sim.cpu.read_reg(9), 2);

    let (_, text) = exec(&mut shell, "go");
    assert_eq!(text, "Can't simulate, Simulator is halted\n\n");
}

#[test]
fn input_high_low_set_state() {
    let mut shell = shell_with(&[]);
    let _ = exec(&mut shell, "input 8 0x1234");
    let _ = exec(&mut shell, "input 0 99");
    let _ = exec(&mut shell, "high 5");
    let _ = exec(&mut shell, "low 6");
    let state = shell.sim.state();
    assert_eq!(state.gpr.read(8), 0x1234);
    assert_eq!(state.gpr.read(0), 0);
    assert_eq!(state.hi, 5);
    assert_eq!(state.lo, 6);
}

#[test]
fn rdump_and_mdump_print() {
    let mut shell = shell_with(&[addiu(8, 0, 1)]);
    let (_, text) = exec(&mut shell, "rdump");
    assert!(text.starts_with("Current register/bus values :\n"));
    assert!(text.contains(&format!("PC                : 0x{MEM_TEXT_START:08x}")));

    let (_, text) = exec(&mut shell, &format!("mdump {MEM_TEXT_START:x} {MEM_TEXT_START:x}"));
    assert!(text.contains(&format!("0x{:08x}", addiu(8, 0, 1))), "{text}");
}

#[test]
fn dumps_are_copied_to_sink() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut shell = shell_with(&[]).with_dump(Box::new(file.reopen().unwrap()));

    let (_, screen) = exec(&mut shell, "rdump");
    let (_, mem) = exec(&mut shell, &format!("mdump {MEM_DATA_START:x} {MEM_DATA_START:x}"));
    let _ = exec(&mut shell, "run 0");
    drop(shell);

    let copied = fs::read_to_string(file.path()).unwrap();
    assert_eq!(copied, format!("{screen}{mem}"));
}

#[test]
fn help_and_quit() {
    let mut shell = shell_with(&[]);
    let (action, text) = exec(&mut shell, "?");
    assert_eq!(action, ShellAction::Continue);
    assert_eq!(text, HELP);

    let (action, _) = exec(&mut shell, "quit");
    assert_eq!(action, ShellAction::Quit);
}
