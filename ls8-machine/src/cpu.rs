use std::io;

use ls8_core::cpu::decoder::{DecodeError, DecodeOne};
use ls8_core::cpu::Instruction;
use ls8_core::{Component, ComponentId, HaltReason, Ram, StorageError};
use thiserror::Error;

use crate::alu::{alu, AluOp};
use crate::decoder::Ls8Decoder;
use crate::isa::{Ls8Instruction, MAX_INSTRUCTION_LEN};
use crate::output::Output;
use crate::registers::{Flags, Registers};
use crate::stack::Ls8Stack;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("register index {0} out of bounds, must be [0, 8)")]
    InvalidRegister(u8),
    #[error("unsupported ALU operation 0x{0:02X}")]
    UnsupportedAluOperation(u8),
    #[error("failed to decode instruction at 0x{address:02X}")]
    Decode {
        address: usize,
        #[source]
        source: DecodeError,
    },
    #[error("return address 0x{0:X} does not fit in the stack")]
    ReturnAddressOutOfRange(usize),
    #[error("failed to write to output")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CpuError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    /// Constructed but never run.
    Idle,
    Running,
    Halted(HaltReason),
    /// The last executed instruction faulted. Registers and PC are left as
    /// they were at the fault.
    Faulted,
}

#[derive(Debug)]
pub struct Ls8Cpu {
    id: ComponentId,
    decoder: Ls8Decoder,
    regs: Registers,
    flags: Flags,
    pc: usize,
    state: CpuState,
    cycles: u64,
}

impl Component for Ls8Cpu {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

impl Default for Ls8Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8Cpu {
    pub fn new() -> Self {
        Ls8Cpu {
            id: ComponentId::new("LS8 CPU"),
            decoder: Ls8Decoder::default(),
            regs: Registers::new(),
            flags: Flags::default(),
            pc: 0,
            state: CpuState::Idle,
            cycles: 0,
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    /// Number of instructions executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn reset(&mut self) {
        self.regs.reset();
        self.flags = Flags::default();
        self.pc = 0;
        self.cycles = 0;
        self.state = CpuState::Running;
    }

    /// Resets the CPU and executes from address 0 until the program halts,
    /// hits an unknown opcode, or faults.
    pub fn run<const N: usize, O: Output>(
        &mut self,
        ram: &mut Ram<N>,
        out: &mut O,
    ) -> Result<HaltReason> {
        let _span = tracing::info_span!("run", cpu = %self.id).entered();
        self.reset();
        tracing::info!("starting execution");

        loop {
            match self.step(ram, out) {
                Ok(Some(reason)) => {
                    tracing::info!("stopped after {} cycles: {:?}", self.cycles, reason);
                    return Ok(reason);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::error!("fault at 0x{:02X}: {}", self.pc, err);
                    return Err(err);
                }
            }
        }
    }

    /// Executes a single instruction. Returns the halt reason once the CPU
    /// stops; stepping a halted CPU does nothing. Any error leaves the CPU in
    /// [`CpuState::Faulted`].
    pub fn step<const N: usize, O: Output>(
        &mut self,
        ram: &mut Ram<N>,
        out: &mut O,
    ) -> Result<Option<HaltReason>> {
        if let CpuState::Halted(reason) = self.state {
            return Ok(Some(reason));
        }
        self.execute(ram, out).map_err(|err| {
            self.state = CpuState::Faulted;
            err
        })
    }

    fn execute<const N: usize, O: Output>(
        &mut self,
        ram: &mut Ram<N>,
        out: &mut O,
    ) -> Result<Option<HaltReason>> {
        self.trace(ram);

        let address = self.pc;
        let bytes = ram.read_window(address, MAX_INSTRUCTION_LEN)?;
        let instruction = match self.decoder.decode_one(&bytes) {
            Ok(instruction) => instruction,
            Err(DecodeError::UnknownOpcode(opcode)) => {
                tracing::warn!("unknown opcode 0x{:02X} at 0x{:02X}", opcode, address);
                out.unknown_opcode(opcode)?;
                return Ok(Some(self.halt(HaltReason::UnknownOpcode { opcode, address })));
            }
            Err(source) => return Err(CpuError::Decode { address, source }),
        };
        tracing::debug!("0x{:02X}: {}", address, instruction);

        self.cycles += 1;
        let next_pc = address + instruction.len_bytes();

        match instruction {
            Ls8Instruction::Ldi { reg, value } => {
                self.regs.write(reg, value)?;
                self.pc = next_pc;
            }
            Ls8Instruction::Prn { reg } => {
                out.value(self.regs.read(reg)?)?;
                self.pc = next_pc;
            }
            Ls8Instruction::Hlt => {
                return Ok(Some(self.halt(HaltReason::Halted)));
            }
            Ls8Instruction::Add { reg_a, reg_b } | Ls8Instruction::Mul { reg_a, reg_b } => {
                let op = AluOp::try_from(instruction.opcode().value())?;
                alu(op, &mut self.regs, reg_a, reg_b)?;
                out.marker(op.marker())?;
                self.pc = next_pc;
            }
            Ls8Instruction::Push { reg } => {
                Ls8Stack::new(&mut self.regs, ram).push_register(reg)?;
                self.pc = next_pc;
            }
            Ls8Instruction::Pop { reg } => {
                Ls8Stack::new(&mut self.regs, ram).pop_register(reg)?;
                self.pc = next_pc;
            }
            Ls8Instruction::Call { reg } => {
                let return_address =
                    u8::try_from(next_pc).map_err(|_| CpuError::ReturnAddressOutOfRange(next_pc))?;
                Ls8Stack::new(&mut self.regs, ram).push(return_address)?;
                self.pc = self.regs.read(reg)? as usize;
            }
            Ls8Instruction::Ret => {
                self.pc = Ls8Stack::new(&mut self.regs, ram).pop()? as usize;
            }
            Ls8Instruction::Cmp { reg_a, reg_b } => {
                self.flags = Flags::from_comparison(self.regs.read(reg_a)?, self.regs.read(reg_b)?);
                self.pc = next_pc;
            }
            Ls8Instruction::Jmp { reg } => {
                self.pc = self.regs.read(reg)? as usize;
            }
            Ls8Instruction::Jeq { reg } => {
                self.pc = if self.flags.is_equal() {
                    self.regs.read(reg)? as usize
                } else {
                    next_pc
                };
            }
            Ls8Instruction::Jne { reg } => {
                self.pc = if self.flags.is_clear() {
                    self.regs.read(reg)? as usize
                } else {
                    next_pc
                };
            }
        }
        Ok(None)
    }

    fn halt(&mut self, reason: HaltReason) -> HaltReason {
        self.state = CpuState::Halted(reason);
        reason
    }

    /// Dumps PC, flags, the bytes at PC and the register file at TRACE level.
    pub fn trace<const N: usize>(&self, ram: &Ram<N>) {
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        let memory = ram.as_slice();
        let end = (self.pc + MAX_INSTRUCTION_LEN).min(memory.len());
        let window = memory.get(self.pc..end).unwrap_or_default();
        tracing::trace!(
            "pc: 0x{:02X} | flags: 0b{:08b} | ir: {:02X?} | regs: {:02X?}",
            self.pc,
            self.flags.bits(),
            window,
            self.regs.as_slice()
        );
    }
}
