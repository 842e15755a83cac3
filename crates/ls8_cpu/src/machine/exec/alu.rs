use crate::error::MachineError;
use crate::isa::Opcode;
use crate::machine::Machine;
use crate::regs::Flags;

impl Machine {
    /// Run an ALU instruction on `reg[a]` and `reg[b]`.
    ///
    /// Registers are 8 bits wide and every operation wraps.
    pub(in crate::machine) fn exec_alu(
        &mut self,
        op: Opcode,
        a: u8,
        b: u8,
    ) -> Result<(), MachineError> {
        debug_assert!(op.decoded().is_alu);

        let lhs = self.reg(a)?;
        let result = match op {
            // Single-operand group: `b` is never read.
            Opcode::Inc => lhs.wrapping_add(1),
            Opcode::Dec => lhs.wrapping_sub(1),
            Opcode::Not => !lhs,

            Opcode::Add => lhs.wrapping_add(self.reg(b)?),
            Opcode::Sub => lhs.wrapping_sub(self.reg(b)?),
            Opcode::Mul => lhs.wrapping_mul(self.reg(b)?),
            Opcode::Div | Opcode::Mod => {
                let rhs = self.reg(b)?;
                let quotient = if op == Opcode::Div {
                    lhs.checked_div(rhs)
                } else {
                    lhs.checked_rem(rhs)
                };
                match quotient {
                    Some(value) => value,
                    None => {
                        // Recoverable: leave reg[a] alone and keep going.
                        log::warn!(
                            "division by zero is undefined: {} R{}, R{} at {:#04X}",
                            op,
                            a,
                            b,
                            self.pc
                        );
                        return Ok(());
                    }
                }
            }
            Opcode::And => lhs & self.reg(b)?,
            Opcode::Or => lhs | self.reg(b)?,
            Opcode::Xor => lhs ^ self.reg(b)?,
            Opcode::Shl => lhs.checked_shl(u32::from(self.reg(b)?)).unwrap_or(0),
            Opcode::Shr => lhs.checked_shr(u32::from(self.reg(b)?)).unwrap_or(0),
            Opcode::Cmp => {
                self.regs.fl = Flags::compare(lhs, self.reg(b)?);
                return Ok(());
            }
            _ => unreachable!("{} is not an ALU opcode", op),
        };
        self.set_reg(a, result)
    }
}
