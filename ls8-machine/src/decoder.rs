use ls8_core::cpu::decoder::{DecodeError, DecodeOne, Result};
use ls8_core::cpu::Instruction;

use crate::isa::{opcodes, Ls8Instruction};

#[derive(Clone, Copy, Debug, Default)]
pub struct Ls8Decoder {}

impl DecodeOne for Ls8Decoder {
    type Instruction = Ls8Instruction;

    fn decode_one(&self, bytes: &[u8]) -> Result<Self::Instruction> {
        let (&opcode, operands) = bytes.split_first().ok_or(DecodeError::Empty)?;
        let a = operands.first().copied().unwrap_or_default();
        let b = operands.get(1).copied().unwrap_or_default();

        let ins = match opcode {
            opcodes::LDI => Ls8Instruction::Ldi { reg: a, value: b },
            opcodes::PRN => Ls8Instruction::Prn { reg: a },
            opcodes::HLT => Ls8Instruction::Hlt,
            opcodes::ADD => Ls8Instruction::Add { reg_a: a, reg_b: b },
            opcodes::MUL => Ls8Instruction::Mul { reg_a: a, reg_b: b },
            opcodes::PUSH => Ls8Instruction::Push { reg: a },
            opcodes::POP => Ls8Instruction::Pop { reg: a },
            opcodes::CALL => Ls8Instruction::Call { reg: a },
            opcodes::RET => Ls8Instruction::Ret,
            opcodes::CMP => Ls8Instruction::Cmp { reg_a: a, reg_b: b },
            opcodes::JMP => Ls8Instruction::Jmp { reg: a },
            opcodes::JEQ => Ls8Instruction::Jeq { reg: a },
            opcodes::JNE => Ls8Instruction::Jne { reg: a },
            _ => Err(DecodeError::UnknownOpcode(opcode))?,
        };

        if bytes.len() < ins.len_bytes() {
            return Err(DecodeError::Truncated {
                opcode,
                needed: ins.len_bytes(),
                available: bytes.len(),
            });
        }
        Ok(ins)
    }
}
