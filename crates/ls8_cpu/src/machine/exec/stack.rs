use crate::error::MachineError;
use crate::machine::Machine;
use crate::STACK_BASE;

impl Machine {
    /// Push with the stack-floor check: decrement SP, then write.
    pub(in crate::machine) fn push_u8(&mut self, value: u8) -> Result<(), MachineError> {
        let sp = self.regs.sp();
        if usize::from(sp) <= self.stack_floor {
            return Err(MachineError::StackOverflow { sp, pc: self.pc });
        }
        self.push_u8_unchecked(value);
        Ok(())
    }

    /// Push without the floor check. SP wraps below address 0.
    fn push_u8_unchecked(&mut self, value: u8) {
        let sp = self.regs.sp().wrapping_sub(1);
        self.regs.set_sp(sp);
        self.memory.write(sp, value);
    }

    /// Top of the stack, without moving SP.
    fn peek_u8(&self) -> Result<u8, MachineError> {
        let sp = self.regs.sp();
        if sp >= STACK_BASE {
            return Err(MachineError::StackUnderflow { sp, pc: self.pc });
        }
        Ok(self.memory.read(sp))
    }

    /// Read the top of the stack, then increment SP.
    pub(in crate::machine) fn pop_u8(&mut self) -> Result<u8, MachineError> {
        let value = self.peek_u8()?;
        self.regs.set_sp(self.regs.sp().wrapping_add(1));
        Ok(value)
    }

    pub(super) fn exec_push(&mut self, a: u8) -> Result<(), MachineError> {
        let value = self.reg(a)?;
        self.push_u8(value)
    }

    /// POP: `reg[a] = memory[SP]`, then SP += 1.
    ///
    /// The increment reads SP after the write, so `POP R7` leaves SP one past
    /// the popped byte.
    pub(super) fn exec_pop(&mut self, a: u8) -> Result<(), MachineError> {
        // Validate the destination before touching the stack.
        self.reg(a)?;
        let value = self.peek_u8()?;
        self.set_reg(a, value)?;
        self.regs.set_sp(self.regs.sp().wrapping_add(1));
        Ok(())
    }

    /// CALL: push the address after this two-byte instruction and jump to
    /// the address held in `reg[a]`.
    pub(super) fn exec_call(&mut self, a: u8) -> Result<(), MachineError> {
        let target = self.reg(a)?;
        let ret = self.pc.wrapping_add(2);
        if self.config.guard_call {
            self.push_u8(ret)?;
        } else {
            self.push_u8_unchecked(ret);
        }
        self.pc = target;
        Ok(())
    }

    pub(super) fn exec_ret(&mut self) -> Result<(), MachineError> {
        self.pc = self.pop_u8()?;
        Ok(())
    }
}
