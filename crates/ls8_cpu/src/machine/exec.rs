mod alu;
mod control;
mod stack;
mod system;

use ls8_common::Console;

use super::Machine;
use crate::error::MachineError;
use crate::isa::Opcode;

impl Machine {
    /// Execute a non-ALU, non-HLT instruction.
    pub(super) fn exec_opcode<C: Console>(
        &mut self,
        console: &mut C,
        op: Opcode,
        operand_a: u8,
        operand_b: u8,
    ) -> Result<(), MachineError> {
        match op {
            Opcode::Nop => Ok(()),
            Opcode::Ldi => self.exec_ldi(operand_a, operand_b),
            Opcode::Ld => self.exec_ld(operand_a, operand_b),
            Opcode::St => self.exec_st(operand_a, operand_b),
            Opcode::Prn => self.exec_prn(console, operand_a),
            Opcode::Pra => self.exec_pra(console, operand_a),

            Opcode::Push => self.exec_push(operand_a),
            Opcode::Pop => self.exec_pop(operand_a),
            Opcode::Call => self.exec_call(operand_a),
            Opcode::Ret => self.exec_ret(),

            Opcode::Jmp
            | Opcode::Jeq
            | Opcode::Jne
            | Opcode::Jgt
            | Opcode::Jlt
            | Opcode::Jle
            | Opcode::Jge => self.exec_jump(op, operand_a),

            // HLT is handled by `step`; ALU opcodes carry the ALU bit and
            // never reach this table.
            Opcode::Hlt
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::Cmp
            | Opcode::And
            | Opcode::Not
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Shl
            | Opcode::Shr => unreachable!("{} dispatched outside its class", op),
        }
    }
}
