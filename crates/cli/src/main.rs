//! LC-3b pipeline simulator CLI.
//!
//! This binary loads a microcode image and one or more programs and then either:
//! 1. **Interactive shell:** Reads `go`, `run n`, `mdump`, `rdump`, `pdump`, `idump`,
//!    `cdump`, `stats`, `?` and `quit` commands from standard input.
//! 2. **Batch run:** With `--go`, runs to completion, prints the final state and exits.
//!
//! Every dump is echoed to the dump file (`dumpsim` by default) as well as the terminal.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lc3b_pipe_core::config::Config;
use lc3b_pipe_core::sim::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "lc3b-sim",
    author,
    version,
    about = "Cycle-accurate LC-3b pipeline simulator",
    long_about = "Load a micro-code image and one or more programs, then drive the pipeline from an interactive shell.\n\nExamples:\n  lc3b-sim ucode/lc3b.ucode prog.hex\n  lc3b-sim --go ucode/lc3b.ucode prog.hex vectors.hex"
)]
struct Cli {
    /// Micro-code image, one 23-bit row per line.
    ucode: PathBuf,

    /// Program files: a start byte address followed by hex words.
    #[arg(required = true)]
    programs: Vec<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File every dump is also written to.
    #[arg(long, default_value = "dumpsim")]
    dump_file: PathBuf,

    /// Run to completion without the interactive shell.
    #[arg(long)]
    go: bool,

    /// Log loader progress and halt detection.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_ref().map(Config::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => fatal(&e),
    };
    init_logging(&config, cli.verbose);

    let mut sim = match Simulator::initialize(&config, &cli.ucode, &cli.programs) {
        Ok(sim) => sim,
        Err(e) => fatal(&e),
    };
    let mut dump = match File::create(&cli.dump_file) {
        Ok(file) => file,
        Err(e) => fatal(&format!(
            "cannot open dump file `{}`: {e}",
            cli.dump_file.display()
        )),
    };

    if cli.go {
        let _ = sim.run_to_halt();
        emit(&mut dump, sim.dump_registers());
        sim.stats.print();
        return;
    }

    println!("\nLC-3b Pipeline Simulator\n");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("LC-3b-SIM> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if !execute(&mut sim, &mut dump, &line) {
            break;
        }
    }
    println!("Bye.");
}

/// Runs one shell command; returns `false` when the shell should exit.
fn execute(sim: &mut Simulator, dump: &mut File, line: &str) -> bool {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return true;
    };
    let args: Vec<&str> = words.collect();

    match command.to_ascii_lowercase().as_str() {
        "g" | "go" => {
            let cycles = sim.run_to_halt();
            println!("Simulated {cycles} cycles.\n");
        }
        "r" | "run" => match args.first().and_then(|n| n.parse::<u64>().ok()) {
            Some(n) => {
                let cycles = sim.run(n);
                println!("Simulated {cycles} cycles.\n");
            }
            None => println!("Usage: run <cycles>"),
        },
        "m" | "mdump" => match (
            args.first().and_then(|n| parse_number(n)),
            args.get(1).and_then(|n| parse_number(n)),
        ) {
            (Some(start), Some(stop)) => match sim.dump_memory_range(start, stop) {
                Ok(mem) => emit(dump, mem),
                Err(e) => println!("Error: {e}"),
            },
            _ => println!("Usage: mdump <low> <high>"),
        },
        "rd" | "rdump" => emit(dump, sim.dump_registers()),
        "p" | "pdump" => emit(dump, sim.dump_pipeline_latches()),
        "i" | "idump" => emit(dump, sim.timing_diagram()),
        "c" | "cdump" => emit(dump, sim.dump_control_store()),
        "s" | "stats" => sim.stats.print(),
        "?" | "help" => help(),
        "q" | "quit" => return false,
        _ => println!("Invalid Command"),
    }
    true
}

fn help() {
    println!("----------------LC-3b-SIM Help-----------------------");
    println!("go               -  run program to completion");
    println!("run n            -  execute program for n cycles");
    println!("mdump low high   -  dump memory from low to high");
    println!("rdump            -  dump the architectural state");
    println!("pdump            -  dump the pipeline latches");
    println!("idump            -  dump the pipeline timing diagram");
    println!("cdump            -  dump the control store");
    println!("stats            -  print performance statistics");
    println!("?                -  display this help menu");
    println!("quit             -  exit the program\n");
}

/// Parses a decimal or `0x`/`x`-prefixed hexadecimal number.
fn parse_number(text: &str) -> Option<u16> {
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('x'))
        .or_else(|| text.strip_prefix('X'));
    match hex {
        Some(digits) => u16::from_str_radix(digits, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Prints a dump and appends it to the dump file.
fn emit(dump: &mut File, item: impl Display) {
    let text = item.to_string();
    println!("{text}");
    if let Err(e) = writeln!(dump, "{text}").and_then(|()| dump.flush()) {
        tracing::warn!(%e, "failed to write dump file");
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let default = if config.general.trace_instructions {
        "trace"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn fatal(error: &dyn Display) -> ! {
    eprintln!("\n[!] FATAL: {error}");
    process::exit(1);
}
