use std::cmp::Ordering;

use bitflags::bitflags;

use crate::{NUM_REGS, SP, STACK_BASE};

bitflags! {
    /// The `FL` register, laid out as `0b00000LGE`.
    ///
    /// Only CMP writes it; the conditional jumps read it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const EQUAL = 0b0000_0001;
        const GREATER = 0b0000_0010;
        const LESS = 0b0000_0100;
    }
}

impl Flags {
    /// Flags produced by comparing `lhs` against `rhs`.
    pub fn compare(lhs: u8, rhs: u8) -> Self {
        match lhs.cmp(&rhs) {
            Ordering::Less => Flags::LESS,
            Ordering::Equal => Flags::EQUAL,
            Ordering::Greater => Flags::GREATER,
        }
    }
}

/// Register file: R0–R7 plus the flags register.
///
/// R7 doubles as the stack pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    gpr: [u8; NUM_REGS],
    pub fl: Flags,
}

impl Default for Registers {
    fn default() -> Self {
        let mut gpr = [0; NUM_REGS];
        gpr[SP as usize] = STACK_BASE;
        Self {
            gpr,
            fl: Flags::empty(),
        }
    }
}

impl Registers {
    /// Value of register `index`, or `None` if there is no such register.
    #[inline]
    pub fn get(&self, index: u8) -> Option<u8> {
        self.gpr.get(index as usize).copied()
    }

    #[inline]
    pub fn get_mut(&mut self, index: u8) -> Option<&mut u8> {
        self.gpr.get_mut(index as usize)
    }

    #[inline]
    pub fn sp(&self) -> u8 {
        self.gpr[SP as usize]
    }

    #[inline]
    pub fn set_sp(&mut self, value: u8) {
        self.gpr[SP as usize] = value;
    }

    pub fn as_array(&self) -> &[u8; NUM_REGS] {
        &self.gpr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let regs = Registers::default();
        assert_eq!(regs.as_array(), &[0, 0, 0, 0, 0, 0, 0, 0xF4]);
        assert_eq!(regs.sp(), STACK_BASE);
        assert!(regs.fl.is_empty());
    }

    #[test]
    fn out_of_range_index_is_none() {
        let mut regs = Registers::default();
        assert_eq!(regs.get(8), None);
        assert!(regs.get_mut(0xFF).is_none());
    }

    #[test]
    fn compare_sets_exactly_one_flag() {
        assert_eq!(Flags::compare(1, 2), Flags::LESS);
        assert_eq!(Flags::compare(2, 2), Flags::EQUAL);
        assert_eq!(Flags::compare(3, 2), Flags::GREATER);
        assert_eq!(Flags::compare(3, 2).bits(), 0b0000_0010);
    }
}
