//! Test harness: assemble, load, run, observe.

use pipe16_core::core::pipeline::HazardInfo;
use pipe16_core::isa::assembler::assemble;
use pipe16_core::{Config, Cpu};

/// Wraps an engine with assembly loading and invariant-checked running.
pub struct TestContext {
    pub cpu: Cpu,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Fresh engine with default configuration.
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(&Config::default()),
        }
    }

    /// Fresh engine with a program already assembled and loaded.
    pub fn with_program(source: &str) -> Self {
        let mut ctx = Self::new();
        ctx.load_asm(source);
        ctx
    }

    /// Assembles and loads `source`, panicking with diagnostics on failure.
    pub fn load_asm(&mut self, source: &str) {
        let words = match assemble(source) {
            Ok(words) => words,
            Err(errors) => {
                let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                panic!("assembly failed:\n{}", msgs.join("\n"));
            }
        };
        self.cpu.load(&words).expect("program fits in memory");
    }

    /// Runs `cycles` ticks, checking machine invariants after each.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.cpu.tick();
            self.check_invariants();
        }
    }

    /// Runs `cycles` ticks, collecting the hazard record of each.
    pub fn run_collecting_hazards(&mut self, cycles: u64) -> Vec<HazardInfo> {
        let mut seen = Vec::with_capacity(cycles as usize);
        for _ in 0..cycles {
            self.cpu.tick();
            self.check_invariants();
            seen.push(self.cpu.hazards);
        }
        seen
    }

    /// Invariants that must hold after every tick of every program.
    pub fn check_invariants(&self) {
        assert_eq!(self.cpu.regs.read(0), 0, "r0 must stay hardwired to 0");
        for code in [
            self.cpu.hazards.forward_a.code(),
            self.cpu.hazards.forward_b.code(),
        ] {
            assert!(
                matches!(code, "00" | "01" | "10"),
                "forward selector produced invalid code {code}"
            );
        }
    }

    /// Reads a register.
    pub fn reg(&self, idx: usize) -> i16 {
        self.cpu.regs.read(idx)
    }

    /// Reads a data-memory cell.
    pub fn mem(&self, addr: usize) -> i16 {
        self.cpu.dmem.read(addr)
    }
}
