use std::cmp::Ordering;

use crate::cpu::{CpuError, Result};

pub const NUM_REGISTERS: usize = 8;

/// Register reserved for the stack pointer.
pub const SP: u8 = 7;

/// Stack pointer value at the start of every run. The stack grows down from
/// here, away from the program loaded at address 0.
pub const SP_INITIAL: u8 = 0xF4;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    slots: [u8; NUM_REGISTERS],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            ..Default::default()
        }
    }

    /// Zeroes every register and points the stack pointer at [`SP_INITIAL`].
    pub fn reset(&mut self) {
        self.slots = [0; NUM_REGISTERS];
        self.set_sp(SP_INITIAL);
    }

    pub fn read(&self, idx: u8) -> Result<u8> {
        self.slots
            .get(idx as usize)
            .copied()
            .ok_or(CpuError::InvalidRegister(idx))
    }

    pub fn write(&mut self, idx: u8, value: u8) -> Result<()> {
        let slot = self
            .slots
            .get_mut(idx as usize)
            .ok_or(CpuError::InvalidRegister(idx))?;
        *slot = value;
        Ok(())
    }

    pub fn sp(&self) -> u8 {
        self.slots[SP as usize]
    }

    pub fn set_sp(&mut self, value: u8) {
        self.slots[SP as usize] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots
    }
}

/// Outcome of the most recent comparison. At most one bit is ever set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    pub const EQUAL: u8 = 0b0000_0001;
    pub const GREATER: u8 = 0b0000_0010;

    pub fn from_comparison(a: u8, b: u8) -> Self {
        match a.cmp(&b) {
            Ordering::Equal => Flags(Self::EQUAL),
            Ordering::Greater => Flags(Self::GREATER),
            Ordering::Less => Flags(0),
        }
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_equal(&self) -> bool {
        self.0 & Self::EQUAL != 0
    }

    pub fn is_greater(&self) -> bool {
        self.0 & Self::GREATER != 0
    }

    /// Neither flag is set, i.e. the left operand was less than the right.
    pub fn is_clear(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_are_zeroed() {
        let regs = Registers::new();
        assert_eq!(regs.as_slice(), &[0; NUM_REGISTERS]);
    }

    #[test]
    fn test_reset_sets_stack_pointer() {
        let mut regs = Registers::new();
        regs.write(0, 42).unwrap();
        regs.reset();
        assert_eq!(regs.read(0).unwrap(), 0);
        assert_eq!(regs.sp(), SP_INITIAL);
        assert_eq!(regs.read(SP).unwrap(), SP_INITIAL);
    }

    #[test]
    fn test_invalid_register_index() {
        let mut regs = Registers::new();
        assert!(matches!(regs.read(8), Err(CpuError::InvalidRegister(8))));
        assert!(matches!(
            regs.write(0xFF, 1),
            Err(CpuError::InvalidRegister(0xFF))
        ));
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        for _ in 0..1000 {
            let a: u8 = rand::random();
            let b: u8 = rand::random();
            let flags = Flags::from_comparison(a, b);
            assert_eq!(flags.is_equal(), a == b);
            assert_eq!(flags.is_greater(), a > b);
            assert_eq!(flags.is_clear(), a < b);
            let set = [flags.is_equal(), flags.is_greater(), flags.is_clear()];
            assert_eq!(set.iter().filter(|&&s| s).count(), 1);
        }
    }

    #[test]
    fn test_flag_bits() {
        assert_eq!(Flags::from_comparison(3, 3).bits(), 0b01);
        assert_eq!(Flags::from_comparison(4, 3).bits(), 0b10);
        assert_eq!(Flags::from_comparison(2, 3).bits(), 0b00);
        assert_eq!(Flags::default().bits(), 0);
    }
}
