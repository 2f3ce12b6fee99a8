//! RV32I pipeline simulator CLI.
//!
//! Loads a hex program, runs it to completion on either the single-cycle or the
//! five-stage pipelined core, and prints the state dump.

use std::{fs, process};

use clap::Parser;

use rv32i_pipeline_sim::common::SimError;
use rv32i_pipeline_sim::config::Config;
use rv32i_pipeline_sim::core::pipeline::PipelinedCpu;
use rv32i_pipeline_sim::core::single_cycle::SingleCycleCpu;
use rv32i_pipeline_sim::sim::loader;

/// Command-line arguments for the RV32I pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I single-cycle and pipelined simulator")]
struct Args {
    /// Path to the hex program file.
    program: String,

    /// Run the five-stage pipelined core instead of the single-cycle core.
    #[arg(long)]
    pipelined: bool,

    /// Emit a per-tick trace of fetch/decode/execute/memory/writeback activity.
    #[arg(long)]
    debug: bool,

    /// Optional TOML config file overriding the built-in defaults.
    #[arg(long)]
    config: Option<String>,

    /// Memory window to print after the run, as `<addr-hex>,<word-count>`.
    #[arg(long, value_name = "ADDR,WORDS")]
    mem_dump: Option<String>,
}

fn parse_mem_dump(spec: &str) -> Option<(u32, usize)> {
    let (addr_str, words_str) = spec.split_once(',')?;
    let addr = u32::from_str_radix(addr_str.trim_start_matches("0x"), 16).ok()?;
    let words = words_str.trim().parse().ok()?;
    Some((addr, words))
}

fn load_config(path: Option<&str>) -> Result<Config, SimError> {
    match path {
        None => Ok(Config::default()),
        Some(p) => {
            let text = fs::read_to_string(p)?;
            Ok(Config::from_toml(&text)?)
        }
    }
}

fn main() {
    let args = Args::parse();
    let mut config = match load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };
    config.debug = config.debug || args.debug;

    let memory = match loader::load_program(&args.program, config.memory_size) {
        Ok(mem) => mem,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };

    let (mem_start, mem_words) = args
        .mem_dump
        .as_deref()
        .and_then(parse_mem_dump)
        .unwrap_or((0, 0));

    if args.pipelined {
        let mut cpu = PipelinedCpu::new(memory);
        cpu.trace = config.debug;
        cpu.run(config.pipelined_max_cycles, config.pipelined_max_instructions);
        print!("{}", cpu.dump_state(mem_start, mem_words));
    } else {
        let mut cpu = SingleCycleCpu::new(memory);
        cpu.trace = config.debug;
        cpu.run(config.single_cycle_max_cycles);
        print!("{}", cpu.dump_state(mem_start, mem_words));
    }
}
