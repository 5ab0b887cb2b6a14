use std::path::PathBuf;

use ls8_core::{HaltReason, Machine, MachineError};
use ls8_machine::loader::parse_program;
use ls8_machine::machine::Ls8Machine;
use ls8_machine::output::{OutputEvent, RecordingOutput, WriterOutput};

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(name)
}

fn run_asset(name: &str) -> (HaltReason, Ls8Machine<RecordingOutput>) {
    let mut machine = Ls8Machine::new(RecordingOutput::new());
    machine.load_file(&asset(name)).unwrap();
    let reason = machine.run().unwrap();
    (reason, machine)
}

#[test]
fn test_print8() {
    let (reason, machine) = run_asset("print8.ls8");
    assert_eq!(reason, HaltReason::Halted);
    assert_eq!(machine.output().values(), vec![8]);
}

#[test]
fn test_mult() {
    let (reason, machine) = run_asset("mult.ls8");
    assert_eq!(reason, HaltReason::Halted);
    assert_eq!(
        machine.output().events(),
        &[OutputEvent::Marker(String::from("MUL")), OutputEvent::Value(72)]
    );
}

#[test]
fn test_stack() {
    let (_, machine) = run_asset("stack.ls8");
    assert_eq!(machine.output().values(), vec![2, 4, 1]);
    assert_eq!(machine.cpu().registers().sp(), 0xF4);
}

#[test]
fn test_call() {
    let (reason, machine) = run_asset("call.ls8");
    assert_eq!(reason, HaltReason::Halted);
    assert_eq!(machine.output().values(), vec![20, 30, 36, 60]);
    let markers = machine
        .output()
        .events()
        .iter()
        .filter(|event| matches!(event, OutputEvent::Marker(m) if m == "ADD"))
        .count();
    assert_eq!(markers, 4);
    assert_eq!(machine.cpu().registers().sp(), 0xF4);
}

#[test]
fn test_conditional_jumps() {
    let (reason, machine) = run_asset("sctest.ls8");
    assert_eq!(reason, HaltReason::Halted);
    assert_eq!(machine.output().values(), vec![1, 2, 3, 4]);
}

#[test]
fn test_unknown_opcode_program() {
    let program = parse_program("11111111\n10000010\n00000000\n00000001\n").unwrap();
    let mut machine = Ls8Machine::new(RecordingOutput::new());
    machine.load_program(&program).unwrap();
    assert_eq!(
        machine.run().unwrap(),
        HaltReason::UnknownOpcode {
            opcode: 0xFF,
            address: 0,
        }
    );
    assert_eq!(
        machine.output().events(),
        &[OutputEvent::UnknownOpcode(0xFF)]
    );
    assert_eq!(machine.cpu().registers().read(0).unwrap(), 0);
}

#[test]
fn test_writer_output_text() {
    let mut machine = Ls8Machine::new(WriterOutput::new(Vec::new()));
    machine.load_file(&asset("mult.ls8")).unwrap();
    machine.run().unwrap();
    let text = String::from_utf8(machine.into_output().into_inner()).unwrap();
    assert_eq!(text, "MUL\n72\n");
}

#[test]
fn test_rerun_starts_from_fresh_state() {
    let (_, mut machine) = run_asset("stack.ls8");
    machine.run().unwrap();
    assert_eq!(machine.output().values(), vec![2, 4, 1, 2, 4, 1]);
}

#[test]
fn test_malformed_program_is_rejected_before_execution() {
    let mut machine = Ls8Machine::new(RecordingOutput::new());
    let program = "10000010\nnot binary\n";
    let err = parse_program(program)
        .map_err(MachineError::from)
        .and_then(|bytes| machine.load_program(&bytes))
        .unwrap_err();
    assert!(matches!(err, MachineError::Load(_)));
    assert!(machine.output().events().is_empty());
}
