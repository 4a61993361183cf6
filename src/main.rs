use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use codeserver::args::{ArgProcessor, SystemResolver};
use codeserver::logging::init_tracing;
use codeserver::{ArgError, ErrorKind, Options};

const PROGRAM: &str = "codeserver";

fn main() -> ExitCode {
    let log_filter = init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let resolver = SystemResolver;

    let processor = match ArgProcessor::new(&resolver) {
        Ok(processor) => processor,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let options = match processor.parse(&args) {
        Ok(options) => options,
        Err(ArgError::HelpRequested) => {
            print!("{}", processor.usage(PROGRAM));
            return ExitCode::SUCCESS;
        }
        Err(err) if err.kind() == ErrorKind::Validation => {
            eprintln!("Usage: {}", err);
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{}", err);
            eprint!("{}", processor.usage(PROGRAM));
            return ExitCode::FAILURE;
        }
    };

    log_filter.set_level(options.log_level());

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Resolve the remaining startup state and report the configuration.
fn run(options: &Options) -> Result<()> {
    let work_dir = match options.work_dir() {
        Some(dir) => dir.to_path_buf(),
        None => temp_work_dir()?,
    };
    info!(work_dir = %work_dir.display(), "using work directory");

    println!("{}", options);
    println!("resolvedWorkDir: {}", work_dir.display());
    Ok(())
}

/// Fresh temporary directory for compiler output, kept after exit.
fn temp_work_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix("codeserver-")
        .tempdir()
        .context("Failed to create temporary work directory")?;
    Ok(dir.keep())
}
