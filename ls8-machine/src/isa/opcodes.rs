//! Opcode encodings. Bits 7-6 hold the operand count, bit 5 marks ALU
//! instructions and bit 4 marks instructions that set the program counter.

pub const LDI: u8 = 0b1000_0010;
pub const PRN: u8 = 0b0100_0111;
pub const HLT: u8 = 0b0000_0001;
pub const ADD: u8 = 0b1010_0000;
pub const MUL: u8 = 0b1010_0010;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;
pub const CALL: u8 = 0b0101_0000;
pub const RET: u8 = 0b0001_0001;
pub const CMP: u8 = 0b1010_0111;
pub const JMP: u8 = 0b0101_0100;
pub const JEQ: u8 = 0b0101_0101;
pub const JNE: u8 = 0b0101_0110;

pub const ALL: [u8; 13] = [
    LDI, PRN, HLT, ADD, MUL, PUSH, POP, CALL, RET, CMP, JMP, JEQ, JNE,
];
