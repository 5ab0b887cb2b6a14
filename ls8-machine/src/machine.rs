use std::fs;
use std::path::Path;

use ls8_core::{Component, ComponentId, HaltReason, Machine, MachineError, Ram, Result};

use crate::cpu::{CpuError, Ls8Cpu};
use crate::loader::{self, LoadError};
use crate::output::Output;

pub const MEMORY_SIZE: usize = 256;

pub type Ls8Ram = Ram<MEMORY_SIZE>;

impl From<CpuError> for MachineError {
    fn from(err: CpuError) -> Self {
        MachineError::Cpu(Box::new(err))
    }
}

impl From<LoadError> for MachineError {
    fn from(err: LoadError) -> Self {
        MachineError::Load(Box::new(err))
    }
}

#[derive(Debug)]
pub struct Ls8Machine<O: Output> {
    id: ComponentId,
    cpu: Ls8Cpu,
    ram: Ls8Ram,
    output: O,
}

impl<O: Output> Component for Ls8Machine<O> {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

impl<O: Output> Machine for Ls8Machine<O> {
    fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MEMORY_SIZE {
            return Err(LoadError::ProgramTooLarge {
                len: program.len(),
                capacity: MEMORY_SIZE,
            }
            .into());
        }
        self.ram.write(0, program)?;
        tracing::info!("loaded {} byte program into {}", program.len(), self.ram.id());
        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let _span = tracing::info_span!("load", path = %path.display()).entered();
        let text = fs::read_to_string(path)
            .map_err(|err| MachineError::FileLoad(path.display().to_string(), err))?;
        let program = loader::parse_program(&text)?;
        self.load_program(&program)
    }

    fn run(&mut self) -> Result<HaltReason> {
        tracing::info!("starting LS8 machine");
        Ok(self.cpu.run(&mut self.ram, &mut self.output)?)
    }
}

impl<O: Output> Ls8Machine<O> {
    pub fn new(output: O) -> Self {
        Ls8Machine {
            id: ComponentId::new("LS8"),
            cpu: Ls8Cpu::new(),
            ram: Ls8Ram::new("LS8 RAM"),
            output,
        }
    }

    pub fn cpu(&self) -> &Ls8Cpu {
        &self.cpu
    }

    pub fn ram(&self) -> &Ls8Ram {
        &self.ram
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
