use crate::error::MachineError;
use crate::isa::Opcode;
use crate::machine::Machine;
use crate::regs::Flags;

impl Machine {
    #[inline]
    fn jump_condition(&self, op: Opcode) -> bool {
        let fl = self.regs.fl;
        match op {
            Opcode::Jmp => true,
            Opcode::Jeq => fl.contains(Flags::EQUAL),
            Opcode::Jne => !fl.contains(Flags::EQUAL),
            Opcode::Jgt => fl.contains(Flags::GREATER),
            Opcode::Jlt => fl.contains(Flags::LESS),
            Opcode::Jle => fl.intersects(Flags::LESS | Flags::EQUAL),
            Opcode::Jge => fl.intersects(Flags::GREATER | Flags::EQUAL),
            _ => unreachable!("{} is not a jump", op),
        }
    }

    /// JMP and the conditional jumps. Target is `reg[a]`; a jump not taken
    /// steps over this two-byte instruction.
    pub(super) fn exec_jump(&mut self, op: Opcode, a: u8) -> Result<(), MachineError> {
        let target = self.reg(a)?;
        self.pc = if self.jump_condition(op) {
            target
        } else {
            self.pc.wrapping_add(op.decoded().len())
        };
        Ok(())
    }
}
