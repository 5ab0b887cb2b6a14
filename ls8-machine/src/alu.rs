use crate::cpu::{CpuError, Result};
use crate::isa::opcodes;
use crate::registers::Registers;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Mul,
}

impl AluOp {
    /// Marker written to the output channel each time the operation runs.
    pub fn marker(&self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
        }
    }
}

impl TryFrom<u8> for AluOp {
    type Error = CpuError;

    fn try_from(opcode: u8) -> Result<Self> {
        match opcode {
            opcodes::ADD => Ok(AluOp::Add),
            opcodes::MUL => Ok(AluOp::Mul),
            _ => Err(CpuError::UnsupportedAluOperation(opcode)),
        }
    }
}

/// `reg_a := reg_a <op> reg_b`, truncated to 8 bits.
pub fn alu(op: AluOp, regs: &mut Registers, reg_a: u8, reg_b: u8) -> Result<()> {
    let a = regs.read(reg_a)?;
    let b = regs.read(reg_b)?;
    let result = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Mul => a.wrapping_mul(b),
    };
    regs.write(reg_a, result)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn apply(op: AluOp, a: u8, b: u8) -> u8 {
        let mut regs = Registers::new();
        regs.write(0, a).unwrap();
        regs.write(1, b).unwrap();
        alu(op, &mut regs, 0, 1).unwrap();
        assert_eq!(regs.read(1).unwrap(), b);
        regs.read(0).unwrap()
    }

    #[test]
    fn test_add_wraps_at_8_bits() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let (a, b): (u8, u8) = (rng.gen(), rng.gen());
            assert_eq!(apply(AluOp::Add, a, b) as u32, (a as u32 + b as u32) % 256);
        }
        assert_eq!(apply(AluOp::Add, 0xFF, 0x01), 0x00);
    }

    #[test]
    fn test_mul_wraps_at_8_bits() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let (a, b): (u8, u8) = (rng.gen(), rng.gen());
            assert_eq!(apply(AluOp::Mul, a, b) as u32, (a as u32 * b as u32) % 256);
        }
        assert_eq!(apply(AluOp::Mul, 8, 9), 72);
        assert_eq!(apply(AluOp::Mul, 16, 16), 0);
    }

    #[test]
    fn test_same_register_operands() {
        let mut regs = Registers::new();
        regs.write(2, 10).unwrap();
        alu(AluOp::Add, &mut regs, 2, 2).unwrap();
        assert_eq!(regs.read(2).unwrap(), 20);
    }

    #[test]
    fn test_unsupported_operations() {
        assert_eq!(AluOp::try_from(opcodes::ADD).unwrap(), AluOp::Add);
        assert_eq!(AluOp::try_from(opcodes::MUL).unwrap(), AluOp::Mul);
        for opcode in [opcodes::CMP, opcodes::LDI, 0x00] {
            assert!(matches!(
                AluOp::try_from(opcode),
                Err(CpuError::UnsupportedAluOperation(op)) if op == opcode
            ));
        }
    }

    #[test]
    fn test_invalid_register_leaves_state_untouched() {
        let mut regs = Registers::new();
        regs.write(0, 5).unwrap();
        assert!(alu(AluOp::Add, &mut regs, 0, 8).is_err());
        assert_eq!(regs.read(0).unwrap(), 5);
    }
}
