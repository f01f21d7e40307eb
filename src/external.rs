//! Synchronous wrappers around the two external collaborators: the UCSC
//! liftOver executable and the system `sort` utility. Both run to
//! completion before the next stage starts; a non-zero exit aborts the run.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Run liftOver in exact-match mode.
///
/// `-minMatch=1.0` together with `-ends=2` guarantees each input interval
/// maps to at most one output interval (no multi-piece results), which the
/// downstream merge join depends on.
pub fn run_liftover(
    liftover: &Path,
    chain: &Path,
    bed_in: &Path,
    bed_out: &Path,
    unmapped: &Path,
) -> Result<()> {
    tracing::info!(exe = %liftover.display(), chain = %chain.display(), "running liftOver");
    let status = Command::new(liftover)
        .arg("-ends=2")
        .arg("-minMatch=1.0")
        .arg(bed_in)
        .arg(chain)
        .arg(bed_out)
        .arg(unmapped)
        .status()
        .with_context(|| format!("failed to launch liftOver at {}", liftover.display()))?;
    if !status.success() {
        bail!("liftOver exited with {status}");
    }
    Ok(())
}

/// Sort the combined stream by (chrom, start, end).
///
/// Only contiguity of rows with identical keys matters downstream.
/// `LC_ALL=C` keeps chromosome ordering byte-stable across locales, and
/// `-T` keeps sort's spill files inside our private temp dir.
pub fn run_sort(input: &Path, output: &Path, temp_dir: &Path) -> Result<()> {
    tracing::info!(input = %input.display(), "running external sort");
    let status = Command::new("sort")
        .env("LC_ALL", "C")
        .arg("-t")
        .arg("\t")
        .arg("-k1,1")
        .arg("-k2,2n")
        .arg("-k3,3n")
        .arg("-T")
        .arg(temp_dir)
        .arg("-o")
        .arg(output)
        .arg(input)
        .status()
        .context("failed to launch sort")?;
    if !status.success() {
        bail!("sort exited with {status}");
    }
    Ok(())
}
