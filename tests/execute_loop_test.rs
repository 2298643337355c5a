//! Tests for the execution loop: halting, run options, hooks, the trace sink
//! and pacing.

use lib65xx::{
    FlatMemory, HaltReason, MemoryBus, Pacer, RunOptions, RunState, StopReason, CPU,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.set_irq_vector(0xA000);
    memory.load(0x8000, program);
    CPU::new(memory)
}

/// Write sink that keeps everything in a shared buffer.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct RecordingPacer(Arc<Mutex<Vec<u64>>>);

impl Pacer for RecordingPacer {
    fn wait_cycles(&mut self, cycles: u64) {
        self.0.lock().unwrap().push(cycles);
    }
}

// ========== Halting ==========

#[test]
fn test_illegal_opcode_halts() {
    let mut cpu = setup_cpu(&[0xE8, 0x02, 0xE8]);

    assert_eq!(cpu.step().unwrap(), RunState::Running);
    let state = cpu.step().unwrap();

    let reason = HaltReason::IllegalOpcode {
        opcode: 0x02,
        address: 0x8001,
    };
    assert_eq!(state, RunState::Halted(reason));
    assert_eq!(cpu.state(), RunState::Halted(reason));
    assert_eq!(cpu.halt_reason(), Some(reason));
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_halted_cpu_stays_halted() {
    let mut cpu = setup_cpu(&[0x02, 0xE8]);

    cpu.step().unwrap();
    let cycles = cpu.cycles();
    let state = cpu.step().unwrap();

    assert!(matches!(state, RunState::Halted(_)));
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.cycles(), cycles);
}

#[test]
fn test_halt_reason_display() {
    let reason = HaltReason::IllegalOpcode {
        opcode: 0x02,
        address: 0x8001,
    };

    let text = reason.to_string();
    assert!(text.contains("02"));
    assert!(text.contains("8001"));
}

// ========== run ==========

#[test]
fn test_run_until_halt() {
    let mut cpu = setup_cpu(&[0xE8, 0xE8, 0xE8, 0x02]);

    let state = cpu.run(RunOptions::default()).unwrap();

    assert_eq!(
        state,
        RunState::Halted(HaltReason::IllegalOpcode {
            opcode: 0x02,
            address: 0x8003
        })
    );
    assert_eq!(cpu.x(), 3);
    assert_eq!(cpu.instructions_processed(), 3);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_run_on_halted_cpu_returns_immediately() {
    let mut cpu = setup_cpu(&[0x02]);
    cpu.step().unwrap();

    let state = cpu.run(RunOptions::default()).unwrap();

    assert!(matches!(state, RunState::Halted(_)));
    assert_eq!(cpu.instructions_processed(), 0);
}

#[test]
fn test_run_continues_through_brk_by_default() {
    let mut cpu = setup_cpu(&[0x00, 0x00]);
    cpu.memory_mut().load(0xA000, &[0xC8, 0x02]); // INY; illegal

    let state = cpu.run(RunOptions::default()).unwrap();

    assert!(matches!(state, RunState::Halted(_)));
    assert_eq!(cpu.y(), 1);
    assert_eq!(cpu.pc(), 0xA002);
}

#[test]
fn test_stop_on_break() {
    let mut cpu = setup_cpu(&[0xE8, 0x00, 0x00]);

    let options = RunOptions {
        stop_on_break: true,
        ..RunOptions::default()
    };
    let state = cpu.run(options).unwrap();

    assert_eq!(state, RunState::Stopped(StopReason::Break));
    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.instructions_processed(), 2);
}

#[test]
fn test_break_hook_can_stop() {
    let mut cpu = setup_cpu(&[0x00, 0x00]);
    cpu.memory_mut().load(0xA000, &[0x02]);
    cpu.set_break_hook(|registers| registers.pc == 0xA000);

    let state = cpu.run(RunOptions::default()).unwrap();

    assert_eq!(state, RunState::Stopped(StopReason::Break));
}

#[test]
fn test_break_hook_can_continue() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);

    let mut cpu = setup_cpu(&[0x00, 0x00]);
    cpu.memory_mut().load(0xA000, &[0x02]);
    cpu.set_break_hook(move |_| {
        *counter.lock().unwrap() += 1;
        false
    });

    let state = cpu.run(RunOptions::default()).unwrap();

    assert!(matches!(state, RunState::Halted(_)));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_step_hook_suspends_and_resumes() {
    let mut cpu = setup_cpu(&[0xE8; 8]);
    let budget = Arc::new(Mutex::new(3));
    let remaining = Arc::clone(&budget);
    cpu.set_step_hook(move |_| {
        let mut left = remaining.lock().unwrap();
        if *left == 0 {
            return false;
        }
        *left -= 1;
        true
    });

    assert_eq!(cpu.run(RunOptions::default()).unwrap(), RunState::Suspended);
    assert_eq!(cpu.instructions_processed(), 3);
    assert_eq!(cpu.pc(), 0x8003);

    *budget.lock().unwrap() = 2;
    assert_eq!(cpu.run(RunOptions::default()).unwrap(), RunState::Suspended);
    assert_eq!(cpu.x(), 5);
}

#[test]
fn test_unsupported_instruction_propagates_from_run() {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.load(0x8000, &[0xEA, 0xDB]);
    let mut cpu = CPU::with_config(memory, lib65xx::CpuConfig::new(lib65xx::CpuClass::Cmos65C02));

    let result = cpu.run(RunOptions::default());

    assert!(result.is_err());
    assert_eq!(cpu.instructions_processed(), 1);
}

// ========== Instruction Callback ==========

#[test]
fn test_instruction_callback_sees_each_instruction() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let mut cpu = setup_cpu(&[0xA9, 0x42, 0x8D, 0x00, 0x02, 0x02]);
    cpu.set_instruction_callback(move |event| {
        sink.lock().unwrap().push((
            event.address,
            event.mnemonic,
            event.operand.to_string(),
            event.instruction_cycles,
            event.registers.a,
        ));
    });

    cpu.run(RunOptions::default()).unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            (0x8000, "LDA", "#$42".to_string(), 2, 0x42),
            (0x8002, "STA", "$0200".to_string(), 4, 0x42),
        ]
    );
}

#[test]
fn test_callback_reports_running_totals() {
    let totals = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&totals);

    let mut cpu = setup_cpu(&[0xEA, 0xEA, 0x02]);
    cpu.set_instruction_callback(move |event| {
        sink.lock()
            .unwrap()
            .push((event.total_cycles, event.instructions_processed));
    });

    cpu.run(RunOptions::default()).unwrap();

    assert_eq!(*totals.lock().unwrap(), vec![(2, 1), (4, 2)]);
}

#[test]
fn test_clear_hooks_removes_callback() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);

    let mut cpu = setup_cpu(&[0xEA, 0xEA]);
    cpu.set_instruction_callback(move |_| *counter.lock().unwrap() += 1);
    cpu.step().unwrap();
    cpu.clear_hooks();
    cpu.step().unwrap();

    assert_eq!(*calls.lock().unwrap(), 1);
}

// ========== Trace Sink ==========

#[test]
fn test_write_instructions_traces_to_sink() {
    let buffer = SharedBuffer::default();
    let mut cpu = setup_cpu(&[0xA9, 0x42, 0x8D, 0x00, 0x02, 0x02]);
    cpu.set_trace_sink(buffer.clone());

    let options = RunOptions {
        write_instructions: true,
        ..RunOptions::default()
    };
    cpu.run(options).unwrap();

    assert_eq!(
        buffer.contents(),
        "8000 LDA   #$42        A:42 X:00 Y:00 SP:FD  nv-bdIzc\n\
         8002 STA   $0200       A:42 X:00 Y:00 SP:FD  nv-bdIzc\n"
    );
}

#[test]
fn test_trace_sink_silent_by_default() {
    let buffer = SharedBuffer::default();
    let mut cpu = setup_cpu(&[0xEA, 0x02]);
    cpu.set_trace_sink(buffer.clone());

    cpu.run(RunOptions::default()).unwrap();

    assert!(buffer.contents().is_empty());
}

// ========== Pacing and Cycle Budgets ==========

#[test]
fn test_pacer_receives_instruction_cycles() {
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let mut cpu = setup_cpu(&[0xA9, 0x42, 0x8D, 0x00, 0x02, 0x02]);
    cpu.set_pacer(RecordingPacer(Arc::clone(&recorded)));

    cpu.run(RunOptions::default()).unwrap();

    assert_eq!(*recorded.lock().unwrap(), vec![2, 4]);
}

#[test]
fn test_run_for_cycles_budget() {
    let mut cpu = setup_cpu(&[0xEA; 16]);

    let consumed = cpu.run_for_cycles(7).unwrap();

    // Four NOPs: the last one starts before the budget runs out.
    assert_eq!(consumed, 8);
    assert_eq!(cpu.pc(), 0x8004);
}

#[test]
fn test_run_for_cycles_stops_at_halt() {
    let mut cpu = setup_cpu(&[0xEA, 0x02]);

    let consumed = cpu.run_for_cycles(100).unwrap();

    assert_eq!(consumed, 2);
    assert!(cpu.is_halted());
}

#[test]
fn test_memory_survives_into_memory() {
    let mut cpu = setup_cpu(&[0xA9, 0x07, 0x85, 0x10]);
    cpu.step().unwrap();
    cpu.step().unwrap();

    let memory = cpu.into_memory();

    assert_eq!(memory.read(0x0010), 0x07);
}
