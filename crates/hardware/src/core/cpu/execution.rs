//! Instruction semantics.
//!
//! One handler per instruction. Every handler reads operands from the current
//! state and writes results into the next state (or memory), so nothing an
//! instruction writes is visible to itself.
//!
//! Arithmetic wraps at 32 bits and never traps. A few handlers deliberately keep
//! non-standard behaviour of the reference simulator:
//! - `addiu` ORs the immediate instead of adding it.
//! - `lw`, `sw`, `lb`, `sb` address memory at `rs` and ignore the displacement.
//! - `bgtz` and `slti` compare unsigned.

use tracing::{debug, warn};

use super::Cpu;
use crate::isa::abi::REG_RA;
use crate::isa::instruction::{IType, Instruction, JType, RType};
use crate::soc::MemoryBus;

/// Low byte of a word.
const BYTE_MASK: u32 = 0x0000_00FF;

impl Cpu {
    /// Executes a decoded instruction against this CPU and `mem`.
    ///
    /// Returns `true` only for a conditional branch whose condition held.
    pub fn execute<M: MemoryBus + ?Sized>(&mut self, inst: Instruction, mem: &mut M) -> bool {
        match inst {
            Instruction::Add(r) => self.exec_add(r),
            Instruction::Addu(r) => self.exec_addu(r),
            Instruction::Sub(r) => self.exec_sub(r),
            Instruction::Subu(r) => self.exec_subu(r),
            Instruction::Jr(r) => self.exec_jr(r),

            Instruction::Lui(i) => self.exec_lui(i),
            Instruction::Ori(i) => self.exec_ori(i),
            Instruction::Addi(i) => self.exec_addi(i),
            Instruction::Addiu(i) => self.exec_addiu(i),
            Instruction::Lw(i) => self.exec_lw(i, mem),
            Instruction::Sw(i) => self.exec_sw(i, mem),
            Instruction::Bne(i) => return self.exec_bne(i),
            Instruction::Beq(i) => return self.exec_beq(i),
            Instruction::Bgtz(i) => return self.exec_bgtz(i),
            Instruction::Slti(i) => self.exec_slti(i),
            Instruction::Sb(i) => self.exec_sb(i, mem),
            Instruction::Lb(i) => self.exec_lb(i, mem),

            Instruction::J(j) => self.exec_j(j),
            Instruction::Jal(j) => self.exec_jal(j),

            Instruction::Li => {}
            Instruction::Halt(word) => self.exec_halt(word),
        }
        false
    }

    // ── R-format ──────────────────────────────────────

    fn exec_add(&mut self, r: RType) {
        let rs = self.read_reg(r.rs) as i32;
        let rt = self.read_reg(r.rt) as i32;
        self.write_reg(r.rd, rs.wrapping_add(rt) as u32);
    }

    fn exec_addu(&mut self, r: RType) {
        let rs = self.read_reg(r.rs);
        let rt = self.read_reg(r.rt);
        self.write_reg(r.rd, rs.wrapping_add(rt));
    }

    fn exec_sub(&mut self, r: RType) {
        let rs = self.read_reg(r.rs) as i32;
        let rt = self.read_reg(r.rt) as i32;
        self.write_reg(r.rd, rs.wrapping_sub(rt) as u32);
    }

    fn exec_subu(&mut self, r: RType) {
        let rs = self.read_reg(r.rs);
        let rt = self.read_reg(r.rt);
        self.write_reg(r.rd, rs.wrapping_sub(rt));
    }

    fn exec_jr(&mut self, r: RType) {
        self.next.pc = self.read_reg(r.rs);
    }

    // ── I-format ──────────────────────────────────────

    fn exec_lui(&mut self, i: IType) {
        self.write_reg(i.rt, i.imm_zext() << 16);
    }

    fn exec_ori(&mut self, i: IType) {
        let rs = self.read_reg(i.rs);
        self.write_reg(i.rt, rs | i.imm_zext());
    }

    fn exec_addi(&mut self, i: IType) {
        let rs = self.read_reg(i.rs) as i32;
        self.write_reg(i.rt, rs.wrapping_add(i.imm_sext()) as u32);
    }

    fn exec_addiu(&mut self, i: IType) {
        let rs = self.read_reg(i.rs);
        self.write_reg(i.rt, rs | i.imm_zext());
    }

    fn exec_lw<M: MemoryBus + ?Sized>(&mut self, i: IType, mem: &mut M) {
        let addr = self.read_reg(i.rs);
        let val = mem.read_u32(addr);
        self.write_reg(i.rt, val);
    }

    fn exec_sw<M: MemoryBus + ?Sized>(&mut self, i: IType, mem: &mut M) {
        let addr = self.read_reg(i.rs);
        let val = self.read_reg(i.rt);
        mem.write_u32(addr, val);
    }

    fn exec_bne(&mut self, i: IType) -> bool {
        let taken = self.read_reg(i.rs) != self.read_reg(i.rt);
        self.branch_if(taken, i)
    }

    fn exec_beq(&mut self, i: IType) -> bool {
        let taken = self.read_reg(i.rs) == self.read_reg(i.rt);
        self.branch_if(taken, i)
    }

    fn exec_bgtz(&mut self, i: IType) -> bool {
        let taken = self.read_reg(i.rs) > 0;
        self.branch_if(taken, i)
    }

    const fn branch_if(&mut self, taken: bool, i: IType) -> bool {
        if taken {
            self.advance_pc(i.branch_offset());
        }
        taken
    }

    fn exec_slti(&mut self, i: IType) {
        let rs = self.read_reg(i.rs);
        self.write_reg(i.rt, (rs < i.imm_zext()) as u32);
    }

    fn exec_lb<M: MemoryBus + ?Sized>(&mut self, i: IType, mem: &mut M) {
        let addr = self.read_reg(i.rs);
        let val = mem.read_u32(addr) & BYTE_MASK;
        self.write_reg(i.rt, val);
    }

    fn exec_sb<M: MemoryBus + ?Sized>(&mut self, i: IType, mem: &mut M) {
        let addr = self.read_reg(i.rs);
        let byte = self.read_reg(i.rt) & BYTE_MASK;
        let word = mem.read_u32(addr);
        mem.write_u32(addr, (word & !BYTE_MASK) | byte);
    }

    // ── J-format ──────────────────────────────────────

    fn exec_j(&mut self, j: JType) {
        self.next.pc = j.target(self.current.pc);
    }

    fn exec_jal(&mut self, j: JType) {
        self.write_reg(REG_RA, self.current.pc.wrapping_add(4));
        self.next.pc = j.target(self.current.pc);
    }

    // ── Other ─────────────────────────────────────────

    fn exec_halt(&mut self, word: u32) {
        if word == 0 {
            debug!(pc = %format_args!("{:#010x}", self.current.pc), "halt on zero word");
        } else {
            warn!(
                pc = %format_args!("{:#010x}", self.current.pc),
                word = %format_args!("{word:#010x}"),
                "no encoding matches instruction word, halting"
            );
        }
        self.halt();
    }
}
