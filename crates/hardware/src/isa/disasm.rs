//! Instruction Disassembler for the supported MIPS subset.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for instruction tracing, the shell, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use mipsim_core::isa::disasm::disassemble;
//! let text = disassemble(0x012A_4021); // addu $t0, $t1, $t2
//! assert_eq!(text, "addu $t0, $t1, $t2");
//! ```

use crate::isa::abi::reg_name;
use crate::isa::decode::decode;
use crate::isa::instruction::{IType, Instruction, RType};

/// Disassembles a 32-bit word into assembler text.
///
/// Words that match no encoding come out as `.word 0x........`.
///
/// # Arguments
///
/// * `word` - The raw 32-bit instruction encoding.
pub fn disassemble(word: u32) -> String {
    format_instruction(&decode(word))
}

/// Formats an already decoded instruction.
///
/// Loads and stores print their raw displacement even though execution
/// ignores it, so the listing matches the encoded bits.
pub fn format_instruction(inst: &Instruction) -> String {
    let mn = inst.mnemonic();
    match *inst {
        Instruction::Add(r) | Instruction::Addu(r) | Instruction::Sub(r) | Instruction::Subu(r) => {
            three_reg(mn.name(), r)
        }
        Instruction::Jr(r) => format!("jr ${}", reg_name(r.rs)),

        Instruction::Lui(i) => format!("lui ${}, {:#x}", reg_name(i.rt), i.imm),
        Instruction::Ori(i) | Instruction::Addiu(i) => {
            format!("{mn} ${}, ${}, {:#x}", reg_name(i.rt), reg_name(i.rs), i.imm)
        }
        Instruction::Addi(i) | Instruction::Slti(i) => format!(
            "{mn} ${}, ${}, {}",
            reg_name(i.rt),
            reg_name(i.rs),
            i.imm_sext()
        ),
        Instruction::Lw(i) | Instruction::Sw(i) | Instruction::Lb(i) | Instruction::Sb(i) => {
            memory(mn.name(), i)
        }
        Instruction::Beq(i) | Instruction::Bne(i) => format!(
            "{mn} ${}, ${}, {}",
            reg_name(i.rs),
            reg_name(i.rt),
            i.imm_sext()
        ),
        Instruction::Bgtz(i) => format!("bgtz ${}, {}", reg_name(i.rs), i.imm_sext()),

        Instruction::J(j) | Instruction::Jal(j) => format!("{mn} {:#09x}", j.address << 2),

        Instruction::Li => "li".to_string(),
        Instruction::Halt(word) => format!(".word {word:#010x}"),
    }
}

fn three_reg(mn: &str, r: RType) -> String {
    format!(
        "{mn} ${}, ${}, ${}",
        reg_name(r.rd),
        reg_name(r.rs),
        reg_name(r.rt)
    )
}

fn memory(mn: &str, i: IType) -> String {
    format!(
        "{mn} ${}, {}(${})",
        reg_name(i.rt),
        i.imm_sext(),
        reg_name(i.rs)
    )
}
