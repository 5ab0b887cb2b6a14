use std::fmt;

use ls8_core::Ram;

use crate::cpu::Result;
use crate::registers::Registers;

/// Downward-growing stack living in RAM, addressed through the SP register.
/// Return addresses pushed by CALL share the stack with values pushed by PUSH.
pub struct Ls8Stack<'a, const N: usize> {
    regs: &'a mut Registers,
    ram: &'a mut Ram<N>,
}

impl<'a, const N: usize> fmt::Debug for Ls8Stack<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LS8 Stack")
            .field("sp", &format_args!("0x{:02X}", self.regs.sp()))
            .finish()
    }
}

impl<'a, const N: usize> Ls8Stack<'a, N> {
    pub fn new(regs: &'a mut Registers, ram: &'a mut Ram<N>) -> Self {
        Ls8Stack { regs, ram }
    }

    pub fn push(&mut self, value: u8) -> Result<()> {
        let sp = self.regs.sp().wrapping_sub(1);
        self.regs.set_sp(sp);
        self.ram.write_u8(sp as usize, value)?;
        Ok(())
    }

    /// Decrements SP, then stores register `idx`. Pushing SP itself stores
    /// the already-decremented value.
    pub fn push_register(&mut self, idx: u8) -> Result<()> {
        let sp = self.regs.sp().wrapping_sub(1);
        self.regs.set_sp(sp);
        let value = self.regs.read(idx)?;
        self.ram.write_u8(sp as usize, value)?;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u8> {
        let sp = self.regs.sp();
        let value = self.ram.read_u8(sp as usize)?;
        self.regs.set_sp(sp.wrapping_add(1));
        Ok(value)
    }

    /// Loads the top of stack into register `idx`, then increments SP.
    pub fn pop_register(&mut self, idx: u8) -> Result<()> {
        let value = self.ram.read_u8(self.regs.sp() as usize)?;
        self.regs.write(idx, value)?;
        self.regs.set_sp(self.regs.sp().wrapping_add(1));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::CpuError;
    use crate::registers::SP_INITIAL;

    fn harness() -> (Registers, Ram<256>) {
        let mut regs = Registers::new();
        regs.reset();
        (regs, Ram::new("RAM"))
    }

    #[test]
    fn test_push_pop_restores_value_and_sp() {
        let (mut regs, mut ram) = harness();
        regs.write(0, 99).unwrap();

        let mut stack = Ls8Stack::new(&mut regs, &mut ram);
        stack.push_register(0).unwrap();
        drop(stack);
        assert_eq!(regs.sp(), SP_INITIAL - 1);
        assert_eq!(ram.as_slice()[(SP_INITIAL - 1) as usize], 99);

        regs.write(0, 0).unwrap();
        Ls8Stack::new(&mut regs, &mut ram).pop_register(0).unwrap();
        assert_eq!(regs.read(0).unwrap(), 99);
        assert_eq!(regs.sp(), SP_INITIAL);
    }

    #[test]
    fn test_stack_is_last_in_first_out() {
        let (mut regs, mut ram) = harness();
        let mut stack = Ls8Stack::new(&mut regs, &mut ram);
        for value in 1..=5 {
            stack.push(value).unwrap();
        }
        for value in (1..=5).rev() {
            assert_eq!(stack.pop().unwrap(), value);
        }
        drop(stack);
        assert_eq!(regs.sp(), SP_INITIAL);
    }

    #[test]
    fn test_stack_pointer_wraps() {
        let (mut regs, mut ram) = harness();
        regs.set_sp(0);
        let mut stack = Ls8Stack::new(&mut regs, &mut ram);
        stack.push(7).unwrap();
        drop(stack);
        assert_eq!(regs.sp(), 0xFF);
        assert_eq!(ram.as_slice()[0xFF], 7);

        assert_eq!(Ls8Stack::new(&mut regs, &mut ram).pop().unwrap(), 7);
        assert_eq!(regs.sp(), 0);
    }

    #[test]
    fn test_push_invalid_register() {
        let (mut regs, mut ram) = harness();
        let mut stack = Ls8Stack::new(&mut regs, &mut ram);
        assert!(matches!(
            stack.push_register(9),
            Err(CpuError::InvalidRegister(9))
        ));
    }

    #[test]
    fn test_stack_outside_small_memory_faults() {
        let mut regs = Registers::new();
        regs.reset();
        let mut ram = Ram::<16>::new("RAM");
        let mut stack = Ls8Stack::new(&mut regs, &mut ram);
        assert!(matches!(stack.push(1), Err(CpuError::Storage(_))));
    }
}
