use std::fmt;

use ls8_core::cpu::{opcode::Opcode8, Instruction};

use super::opcodes;

/// A decoded LS8 instruction. Register operands are raw indices and have not
/// been range-checked; that happens when the register file is accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ls8Instruction {
    Ldi { reg: u8, value: u8 },
    Prn { reg: u8 },
    Hlt,
    Add { reg_a: u8, reg_b: u8 },
    Mul { reg_a: u8, reg_b: u8 },
    Push { reg: u8 },
    Pop { reg: u8 },
    Call { reg: u8 },
    Ret,
    Cmp { reg_a: u8, reg_b: u8 },
    Jmp { reg: u8 },
    Jeq { reg: u8 },
    Jne { reg: u8 },
}

impl Ls8Instruction {
    pub fn opcode(&self) -> Opcode8 {
        let value = match self {
            Self::Ldi { .. } => opcodes::LDI,
            Self::Prn { .. } => opcodes::PRN,
            Self::Hlt => opcodes::HLT,
            Self::Add { .. } => opcodes::ADD,
            Self::Mul { .. } => opcodes::MUL,
            Self::Push { .. } => opcodes::PUSH,
            Self::Pop { .. } => opcodes::POP,
            Self::Call { .. } => opcodes::CALL,
            Self::Ret => opcodes::RET,
            Self::Cmp { .. } => opcodes::CMP,
            Self::Jmp { .. } => opcodes::JMP,
            Self::Jeq { .. } => opcodes::JEQ,
            Self::Jne { .. } => opcodes::JNE,
        };
        Opcode8::new(value)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Ldi { .. } => "LDI",
            Self::Prn { .. } => "PRN",
            Self::Hlt => "HLT",
            Self::Add { .. } => "ADD",
            Self::Mul { .. } => "MUL",
            Self::Push { .. } => "PUSH",
            Self::Pop { .. } => "POP",
            Self::Call { .. } => "CALL",
            Self::Ret => "RET",
            Self::Cmp { .. } => "CMP",
            Self::Jmp { .. } => "JMP",
            Self::Jeq { .. } => "JEQ",
            Self::Jne { .. } => "JNE",
        }
    }
}

impl Instruction for Ls8Instruction {
    fn len_bytes(&self) -> usize {
        self.opcode().len_bytes()
    }

    fn sets_pc(&self) -> bool {
        self.opcode().sets_pc()
    }
}

impl fmt::Display for Ls8Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.mnemonic();
        match *self {
            Self::Hlt | Self::Ret => f.write_str(mnemonic),
            Self::Ldi { reg, value } => write!(f, "{} R{}, {}", mnemonic, reg, value),
            Self::Add { reg_a, reg_b } | Self::Mul { reg_a, reg_b } | Self::Cmp { reg_a, reg_b } => {
                write!(f, "{} R{}, R{}", mnemonic, reg_a, reg_b)
            }
            Self::Prn { reg }
            | Self::Push { reg }
            | Self::Pop { reg }
            | Self::Call { reg }
            | Self::Jmp { reg }
            | Self::Jeq { reg }
            | Self::Jne { reg } => write!(f, "{} R{}", mnemonic, reg),
        }
    }
}
