//! VM Manager - Main Entry Point
//!
//! Usage: vm_manager [OPTIONS]
//!
//! Without `--input` the simulator runs the interactive menu on stdin.
//! With `--input FILE` it translates every `segment offset` pair in the file
//! and writes the physical addresses (or -1) to `--output`, or stdout.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::LevelFilter;

use vm_manager::constants::{DEFAULT_MEMORY_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_SEGMENTS};
use vm_manager::io::{format_results, read_accesses, render_stats, write_results};
use vm_manager::shell::run_menu;
use vm_manager::translation::{ToOutput, translate_batch};
use vm_manager::{ManagerConfig, PolicyKind, VMManager};

/// Command-line configuration
#[derive(Parser, Debug)]
#[command(name = "vm_manager")]
#[command(about = "Segmented, demand-paged virtual memory simulator")]
struct Cli {
    /// Total memory size in bytes
    #[arg(short, long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,

    /// Page size in bytes
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Segment names, repeated or comma-separated
    #[arg(short, long = "segment", value_delimiter = ',')]
    segments: Vec<String>,

    /// Page replacement policy (fifo or lru)
    #[arg(long, default_value = "fifo")]
    policy: PolicyKind,

    /// Physical frames, if fewer than the number of pages
    #[arg(short, long)]
    frames: Option<usize>,

    /// Reject sizes that leave unaddressable remainder bytes
    #[arg(long)]
    strict: bool,

    /// File of `segment offset` pairs to translate in batch
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where batch results go (stdout if omitted)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Print detailed translation information
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn manager_config(&self) -> ManagerConfig {
        let names: Vec<String> = if self.segments.is_empty() {
            DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.segments.clone()
        };
        let mut config = ManagerConfig::new(self.memory_size, self.page_size, names.as_slice(), self.policy)
            .strict(self.strict);
        if let Some(frames) = self.frames {
            config = config.with_frames(frames);
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    // Run the VM manager and handle any errors
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main logic separated from main() for cleaner error handling
fn run(cli: &Cli) -> Result<(), String> {
    let config = cli.manager_config();
    let mut vmm = VMManager::with_config(&config).map_err(|e| e.to_string())?;

    match &cli.input {
        Some(input) => run_batch(&mut vmm, cli, input),
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout().lock();
            run_menu(&mut vmm, &mut input, &mut out).map_err(|e| format!("I/O error: {}", e))
        }
    }
}

fn run_batch(vmm: &mut VMManager, cli: &Cli, input: &Path) -> Result<(), String> {
    let accesses = read_accesses(input)?;

    let results = if cli.verbose {
        translate_verbose(vmm, &accesses)
    } else {
        translate_batch(vmm, &accesses)
    };

    match &cli.output {
        Some(path) => write_results(path, &results)?,
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", format_results(&results))
                .map_err(|e| format!("Failed to write results: {}", e))?;
        }
    }

    if cli.verbose {
        eprint!("{}", render_stats(vmm));
    }
    Ok(())
}

/// Translate with verbose output
fn translate_verbose(vmm: &mut VMManager, accesses: &[(usize, usize)]) -> Vec<i64> {
    accesses
        .iter()
        .map(|&(segment, offset)| {
            let result = vmm.access(segment, offset);
            match &result {
                Ok(t) => eprintln!(
                    "({}, {}) -> LA {} (p={}, w={}) -> PA {}{}",
                    segment,
                    offset,
                    t.logical_address,
                    t.page,
                    t.page_offset,
                    t.physical_address,
                    if t.faulted { " [Page fault]" } else { "" }
                ),
                Err(e) => eprintln!("({}, {}) -> ERROR: {}", segment, offset, e),
            }
            result.to_output()
        })
        .collect()
}
