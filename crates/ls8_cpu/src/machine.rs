mod exec;
mod trace;


use ls8_common::Console;

use crate::config::MachineConfig;
use crate::error::MachineError;
use crate::isa::{Decoded, DispatchTable, Opcode};
use crate::memory::Memory;
use crate::regs::{Flags, Registers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// Result of a single successful [`Machine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Halted,
}

/// The LS-8 machine: 256 bytes of RAM, eight registers and a program counter.
pub struct Machine {
    memory: Memory,
    regs: Registers,
    pc: u8,
    state: State,
    /// Lowest address PUSH may still decrement past; set to the program length.
    stack_floor: usize,
    dispatch: DispatchTable,
    config: MachineConfig,
    /// Instructions retired since the last reset.
    steps: u64,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("pc", &self.pc)
            .field("regs", &self.regs)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl Machine {
    /// Construct a machine in its power-on state with the default config.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            memory: Memory::new(),
            regs: Registers::default(),
            pc: 0,
            state: State::Running,
            stack_floor: 0,
            dispatch: DispatchTable::new(),
            config,
            steps: 0,
        }
    }

    /// Reset registers, flags and PC to their power-on values.
    ///
    /// Memory (and with it the loaded program) is preserved.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.pc = 0;
        self.state = State::Running;
        self.steps = 0;
    }

    /// Copy `program` to address 0 and point PC at it.
    ///
    /// Memory beyond the program is zeroed. The program's length becomes the
    /// floor the stack may not grow into.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MachineError> {
        self.memory.load(program)?;
        self.stack_floor = program.len();
        self.reset();
        log::info!("Loaded {} byte program", program.len());
        Ok(())
    }

    #[inline]
    pub fn ram_read(&self, addr: u8) -> u8 {
        self.memory.read(addr)
    }

    #[inline]
    pub fn ram_write(&mut self, addr: u8, value: u8) {
        self.memory.write(addr, value);
    }

    /// Fetch, decode and execute one instruction.
    pub fn step<C: Console>(&mut self, console: &mut C) -> Result<StepOutcome, MachineError> {
        if self.state == State::Halted {
            return Err(MachineError::Halted);
        }
        if self.config.trace {
            log::trace!("{}", self.trace_line());
        }

        // Always fetch a three byte window; handlers ignore operands they
        // don't take.
        let ir = self.memory.read(self.pc);
        let operand_a = self.memory.read(self.pc.wrapping_add(1));
        let operand_b = self.memory.read(self.pc.wrapping_add(2));
        let decoded = Decoded::new(ir);

        if decoded.is_alu {
            let op = self.decode(ir)?;
            self.exec_alu(op, operand_a, operand_b)?;
        } else if ir == Opcode::Hlt.byte() {
            self.exec_hlt(console)?;
            self.steps += 1;
            return Ok(StepOutcome::Halted);
        } else {
            let op = self.decode(ir)?;
            self.exec_opcode(console, op, operand_a, operand_b)?;
        }

        if !decoded.sets_pc {
            self.pc = self.pc.wrapping_add(decoded.len());
        }
        self.steps += 1;
        Ok(StepOutcome::Continue)
    }

    /// Step until HLT or a fatal error.
    pub fn run<C: Console>(&mut self, console: &mut C) -> Result<(), MachineError> {
        self.state = State::Running;
        let result = loop {
            match self.step(console) {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Halted) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        console.flush().map_err(MachineError::Output)?;
        match &result {
            Ok(()) => log::info!("Halted after {} instructions", self.steps),
            Err(err) => log::error!("Stopped after {} instructions: {}", self.steps, err),
        }
        result
    }

    fn decode(&self, byte: u8) -> Result<Opcode, MachineError> {
        self.dispatch
            .lookup(byte)
            .ok_or(MachineError::UnknownOpcode {
                opcode: byte,
                pc: self.pc,
            })
    }

    /// Read register `index`, failing if the operand names no register.
    #[inline]
    fn reg(&self, index: u8) -> Result<u8, MachineError> {
        self.regs.get(index).ok_or(MachineError::InvalidRegister {
            index,
            pc: self.pc,
        })
    }

    #[inline]
    fn set_reg(&mut self, index: u8, value: u8) -> Result<(), MachineError> {
        let pc = self.pc;
        let slot = self
            .regs
            .get_mut(index)
            .ok_or(MachineError::InvalidRegister { index, pc })?;
        *slot = value;
        Ok(())
    }

    pub fn pc(&self) -> u8 {
        self.pc
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Value of register `index`, or `None` outside R0–R7.
    pub fn register(&self, index: u8) -> Option<u8> {
        self.regs.get(index)
    }

    pub fn flags(&self) -> Flags {
        self.regs.fl
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
