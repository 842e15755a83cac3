use std::fmt::Write;

use super::Machine;

impl Machine {
    /// One-line dump of the machine state at the current PC.
    ///
    /// `TRACE: PC | IR A B | R0 R1 R2 R3 R4 R5 R6 R7`, all in hex.
    pub fn trace_line(&self) -> String {
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc,
            self.memory.read(self.pc),
            self.memory.read(self.pc.wrapping_add(1)),
            self.memory.read(self.pc.wrapping_add(2)),
        );
        for value in self.regs.as_array() {
            // Writing to a String can't fail.
            let _ = write!(line, " {:02X}", value);
        }
        line
    }
}
