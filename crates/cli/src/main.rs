//! 16-bit pipelined CPU simulator CLI.
//!
//! This binary is the driver for the simulation engine. It performs:
//! 1. **Assemble:** Convert a source file to machine words (`asm`).
//! 2. **Disassemble:** Convert hex words back to mnemonics (`dis`).
//! 3. **Run:** Assemble, load, and run a program for a bounded number of
//!    cycles, optionally rate-limited and traced, then print final state
//!    as text or a JSON snapshot (`run`).

use clap::{Parser, Subcommand};
use std::process;

use pipe16_core::isa::assembler::assemble;
use pipe16_core::isa::disasm::disassemble;
use pipe16_core::{Config, Runner};

#[derive(Parser, Debug)]
#[command(
    name = "pipe16",
    author,
    version,
    about = "Cycle-accurate 16-bit 5-stage pipelined CPU simulator",
    long_about = "Assemble, disassemble, and run programs for the 16-bit pipelined \
                  processor model.\n\nExamples:\n  pipe16 asm programs/fib.s\n  \
                  pipe16 run programs/fib.s --cycles 60\n  pipe16 run programs/fib.s --json\n  \
                  pipe16 dis 0x1045 0x403f"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a source file and print the machine words.
    Asm {
        /// Assembly source file.
        file: String,

        /// Also print a disassembly listing next to each word.
        #[arg(long)]
        list: bool,
    },

    /// Disassemble 16-bit words given as hex (with or without 0x).
    Dis {
        /// Words to disassemble.
        words: Vec<String>,
    },

    /// Assemble, load, and run a program, then print final state.
    Run {
        /// Assembly source file.
        file: String,

        /// Number of cycles to run (default: config budget).
        #[arg(long)]
        cycles: Option<u64>,

        /// Rate-limit ticking to this frequency (1-100 Hz).
        #[arg(long)]
        hz: Option<u64>,

        /// Rate-limit ticking at the configured default rate.
        #[arg(long)]
        paced: bool,

        /// Emit per-stage trace lines on stderr.
        #[arg(long)]
        trace: bool,

        /// Print the final snapshot as JSON instead of a text summary.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Asm { file, list } => cmd_asm(&file, list),
        Commands::Dis { words } => cmd_dis(&words),
        Commands::Run {
            file,
            cycles,
            hz,
            paced,
            trace,
            json,
        } => cmd_run(&file, cycles, hz, paced, trace, json),
    }
}

/// Reads a source file, exiting with a message when it cannot be read.
fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: could not read '{path}': {e}");
        process::exit(1);
    })
}

/// Assembles a file, printing every diagnostic and exiting on failure.
fn assemble_or_exit(path: &str) -> Vec<u16> {
    let source = read_source(path);
    assemble(&source).unwrap_or_else(|errors| {
        for err in &errors {
            eprintln!("{path}: {err}");
        }
        process::exit(1);
    })
}

fn cmd_asm(file: &str, list: bool) {
    let words = assemble_or_exit(file);
    for (addr, word) in words.iter().enumerate() {
        if list {
            println!("{addr:3}  {word:04x}  {}", disassemble(*word));
        } else {
            println!("{word:04x}");
        }
    }
}

fn cmd_dis(words: &[String]) {
    if words.is_empty() {
        eprintln!("error: no words given");
        process::exit(1);
    }
    for token in words {
        let raw = token.trim_start_matches("0x").trim_start_matches("0X");
        match u16::from_str_radix(raw, 16) {
            Ok(word) => println!("{word:04x}  {}", disassemble(word)),
            Err(_) => {
                eprintln!("error: '{token}' is not a 16-bit hex word");
                process::exit(1);
            }
        }
    }
}

fn cmd_run(file: &str, cycles: Option<u64>, hz: Option<u64>, paced: bool, trace: bool, json: bool) {
    let words = assemble_or_exit(file);

    let config = Config {
        trace,
        ..Config::default()
    };
    let cycles = cycles.unwrap_or(config.max_cycles);

    let mut runner = Runner::new(config);
    if let Err(e) = runner.cpu.load(&words) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    match hz {
        Some(hz) => runner.run_at(hz, cycles),
        None if paced => runner.run_paced(cycles),
        None => runner.run(cycles),
    }

    if json {
        let snapshot = runner.cpu.snapshot();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: snapshot serialization failed: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let snapshot = runner.cpu.snapshot();
    println!("cycle {}  pc {}", snapshot.cycle, snapshot.pc);
    for (idx, val) in snapshot.registers.iter().enumerate() {
        println!("r{idx} = {val}");
    }
    if !snapshot.memory.is_empty() {
        println!("memory:");
        for cell in &snapshot.memory {
            println!("  [{:3}] = {}", cell.addr, cell.value);
        }
    }
    println!();
    runner.cpu.stats.report();
}
