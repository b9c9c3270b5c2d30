use clap::Parser;
use tracing_subscriber::EnvFilter;
use treeline::cli::{execute, Cli};

/// Environment variable holding a tracing filter.
const LOG_ENV: &str = "TREELINE_LOG";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let out = execute(&cli)?;
    print!("{out}");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
