use anyhow::Result;
use clap::Parser;
use junclift::{cli, pipeline};
use mimalloc::MiMalloc;
use std::io::Write as _;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Initialize tracing subscriber; logs go to stderr so the result rows
    // on stdout stay clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let stats = pipeline::run(&args, &mut out)?;
    out.flush()?;

    tracing::info!(
        junctions = stats.junctions,
        lifted = stats.lifted,
        emitted = stats.emitted,
        unmapped_output = stats.unmapped_output,
        key_collisions = stats.key_collisions,
        "junclift: liftover complete"
    );
    Ok(())
}
