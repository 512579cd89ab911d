//! Benchmark runner for the four matmul variants.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use matmul_cache::platform;
use matmul_cache::{BenchConfig, BenchmarkRunner, Result};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = BenchConfig::from_env()?;
    let pause = config.pause_on_exit;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut runner = BenchmarkRunner::new(config, platform::host());
    runner.run(&mut out)?;

    if pause {
        write!(out, "Press any key to exit...")?;
        out.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
    }

    Ok(())
}
