use thiserror::Error;

use crate::MEMORY_SIZE;

/// Fatal conditions that stop the machine.
///
/// Division by zero is deliberately absent: it is reported through the log
/// and execution continues.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The byte at PC is not a known instruction (including the reserved
    /// interrupt encodings).
    #[error("unknown opcode {opcode:#04X} at address {pc:#04X}")]
    UnknownOpcode { opcode: u8, pc: u8 },
    #[error("stack overflow at address {pc:#04X}: SP {sp:#04X} is at the stack floor")]
    StackOverflow { sp: u8, pc: u8 },
    #[error("stack underflow at address {pc:#04X}: SP {sp:#04X}, nothing to pop")]
    StackUnderflow { sp: u8, pc: u8 },
    /// A register operand that the instruction uses is not in R0–R7.
    #[error("invalid register R{index} at address {pc:#04X}")]
    InvalidRegister { index: u8, pc: u8 },
    #[error("program is {len} bytes but memory holds {}", MEMORY_SIZE)]
    ProgramTooLarge { len: usize },
    #[error("failed to write to console")]
    Output(#[source] std::io::Error),
    #[error("machine is halted")]
    Halted,
}
