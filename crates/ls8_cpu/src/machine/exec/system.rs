use ls8_common::Console;

use crate::error::MachineError;
use crate::machine::{Machine, State};

impl Machine {
    pub(super) fn exec_ldi(&mut self, a: u8, immediate: u8) -> Result<(), MachineError> {
        self.set_reg(a, immediate)
    }

    /// LD: `reg[a] = memory[reg[b]]`.
    pub(super) fn exec_ld(&mut self, a: u8, b: u8) -> Result<(), MachineError> {
        let addr = self.reg(b)?;
        let value = self.memory.read(addr);
        self.set_reg(a, value)
    }

    /// ST: `memory[reg[a]] = reg[b]`.
    pub(super) fn exec_st(&mut self, a: u8, b: u8) -> Result<(), MachineError> {
        let addr = self.reg(a)?;
        let value = self.reg(b)?;
        self.memory.write(addr, value);
        Ok(())
    }

    pub(super) fn exec_prn<C: Console>(
        &mut self,
        console: &mut C,
        a: u8,
    ) -> Result<(), MachineError> {
        let value = self.reg(a)?;
        console.write_number(value).map_err(MachineError::Output)
    }

    pub(super) fn exec_pra<C: Console>(
        &mut self,
        console: &mut C,
        a: u8,
    ) -> Result<(), MachineError> {
        let value = self.reg(a)?;
        console.write_char(value).map_err(MachineError::Output)
    }

    pub(in crate::machine) fn exec_hlt<C: Console>(
        &mut self,
        console: &mut C,
    ) -> Result<(), MachineError> {
        self.state = State::Halted;
        log::debug!("HLT at {:#04X}, registers {:02X?}", self.pc, self.regs.as_array());
        if self.config.echo_on_halt {
            let r0 = self.regs.as_array()[0];
            console.write_number(r0).map_err(MachineError::Output)?;
        }
        Ok(())
    }
}
