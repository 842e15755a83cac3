pub mod config;
pub mod error;
pub mod isa;
pub mod machine;
pub mod memory;
pub mod regs;

pub use config::MachineConfig;
pub use error::MachineError;
pub use isa::{Decoded, DispatchTable, Opcode};
pub use machine::{Machine, State, StepOutcome};
pub use memory::Memory;
pub use regs::{Flags, Registers};

/// Total addressable memory (256 bytes, addresses 0x00–0xFF).
pub const MEMORY_SIZE: usize = 256;
/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;
/// Register reserved as the stack pointer.
pub const SP: u8 = 7;
/// Power-on value of the stack pointer.
///
/// The stack grows downward from here; 0xF4–0xFF is the empty-stack region.
pub const STACK_BASE: u8 = 0xF4;
