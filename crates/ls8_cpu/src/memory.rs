use crate::error::MachineError;
use crate::MEMORY_SIZE;

/// Flat 256-byte RAM.
///
/// Addresses are `u8`, so every address computation wraps modulo 256 before
/// it reaches this type.
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.cells[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u8, value: u8) {
        self.cells[addr as usize] = value;
    }

    /// Zero memory and copy `program` to address 0.
    pub fn load(&mut self, program: &[u8]) -> Result<(), MachineError> {
        if program.len() > MEMORY_SIZE {
            return Err(MachineError::ProgramTooLarge { len: program.len() });
        }
        self.clear();
        self.cells[..program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells = [0; MEMORY_SIZE];
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.cells.chunks(16).enumerate() {
            write!(f, "{:02X}:", row * 16)?;
            for byte in chunk {
                write!(f, " {:02X}", byte)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_zeroes_stale_bytes() {
        let mut mem = Memory::new();
        mem.write(0x10, 0xAA);
        mem.load(&[1, 2, 3]).unwrap();
        assert_eq!(&mem.as_slice()[..4], &[1, 2, 3, 0]);
        assert_eq!(mem.read(0x10), 0);
    }

    #[test]
    fn load_accepts_exactly_full_memory() {
        let mut mem = Memory::new();
        let program = vec![0x47; MEMORY_SIZE];
        mem.load(&program).unwrap();
        assert_eq!(mem.read(0xFF), 0x47);
    }

    #[test]
    fn load_rejects_oversized_program() {
        let mut mem = Memory::new();
        let err = mem.load(&vec![0; MEMORY_SIZE + 1]).unwrap_err();
        assert!(matches!(err, MachineError::ProgramTooLarge { len: 257 }));
    }
}
