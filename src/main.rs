use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ls8_core::{HaltReason, Machine};
use ls8_machine::machine::Ls8Machine;
use ls8_machine::output::WriterOutput;
use tracing_flame::FlameLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Runs an LS8 program image.
#[derive(Debug, Parser)]
#[command(name = "ls8", version)]
struct Args {
    /// Program image, one binary byte literal per line. `#` starts a comment.
    program: PathBuf,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv per-cycle trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write folded span timings to PATH for flamegraph rendering.
    #[arg(long, value_name = "PATH")]
    flame: Option<PathBuf>,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stderr_format = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(log_level(args.verbose));
    let (flame_layer, _flame_guard) = match &args.flame {
        Some(path) => {
            let (layer, guard) = FlameLayer::with_file(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    tracing_subscriber::registry()
        .with(stderr_format)
        .with(flame_layer)
        .init();

    tracing::info!("loading LS8 program {}", args.program.display());
    let mut machine = Ls8Machine::new(WriterOutput::new(io::stdout().lock()));
    machine
        .load_file(&args.program)
        .with_context(|| format!("failed to load {}", args.program.display()))?;

    match machine.run().context("execution failed")? {
        HaltReason::Halted => tracing::info!("program halted"),
        HaltReason::UnknownOpcode { opcode, address } => {
            tracing::info!("stopped at unknown opcode 0x{:02X} (0x{:02X})", opcode, address)
        }
    }
    Ok(())
}
