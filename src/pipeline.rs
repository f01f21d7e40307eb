//! Stage orchestration: normalize -> liftOver -> combine -> sort -> merge
//! join. Strict staging; stages hand off through files inside one private
//! temp dir that is removed on every exit path.

use crate::cli::Args;
use crate::emit;
use crate::external;
use crate::merge;
use crate::record::JunctionRecord;
use anyhow::{bail, Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug, Default)]
pub struct Stats {
    pub junctions: u64,
    pub lifted: u64,
    pub emitted: u64,
    pub unmapped_output: u64,
    pub key_collisions: u64,
}

fn open_gz(path: &Path) -> Result<BufReader<MultiGzDecoder<File>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(MultiGzDecoder::new(file)))
}

pub fn run(args: &Args, out: &mut impl Write) -> Result<Stats> {
    let temp_dir = match &args.temp_dir {
        Some(dir) => TempDir::new_in(dir)
            .with_context(|| format!("creating temp dir under {}", dir.display()))?,
        None => TempDir::new().context("creating temp dir")?,
    };
    let hg38_bed = temp_dir.path().join("hg38.bed");
    let hg19_bed = temp_dir.path().join("hg19.bed");
    let unmapped_bed = temp_dir.path().join("unmapped.bed");
    let combined = temp_dir.path().join("intropolis_and_liftover.tsv");
    let sorted = temp_dir.path().join("sorted_together.tsv");

    let mut stats = Stats::default();

    // Stage 1: normalize junctions to half-open BED intervals for liftOver,
    // preserving input order. Malformed lines fail the run here.
    {
        let mut bed = BufWriter::new(File::create(&hg38_bed)?);
        let reader = open_gz(&args.intropolis)?;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let record = JunctionRecord::parse(&line, stats.junctions).with_context(|| {
                format!("{} line {}", args.intropolis.display(), i + 1)
            })?;
            writeln!(bed, "{}", record.bed_line())?;
            stats.junctions += 1;
        }
        bed.flush()?;
    }
    tracing::info!(junctions = stats.junctions, "wrote liftOver input");

    // Stage 2: external liftOver. The unmapped file is required by the tool
    // but its contents are not consumed.
    external::run_liftover(&args.liftover, &args.chain, &hg38_bed, &hg19_bed, &unmapped_bed)?;

    // Stage 3: one stream holding the reconstructed lift rows followed by
    // every original junction line verbatim.
    {
        let mut both = BufWriter::new(File::create(&combined)?);
        let mapped = BufReader::new(
            File::open(&hg19_bed)
                .with_context(|| format!("opening liftOver output {}", hg19_bed.display()))?,
        );
        stats.lifted = merge::write_lift_rows(mapped, &mut both)?;
        let origin = open_gz(&args.intropolis)?;
        merge::write_origin_rows(origin, &mut both)?;
        both.flush()?;
    }
    tracing::info!(lifted = stats.lifted, "combined lift and origin rows");

    // Stage 4: external sort, making rows with identical keys adjacent.
    external::run_sort(&combined, &sorted, temp_dir.path())?;

    // Stage 5: merge join, one output row per junction.
    let sorted_reader = BufReader::new(File::open(&sorted)?);
    let emit_stats = emit::merge_join(sorted_reader, out)?;
    stats.emitted = emit_stats.emitted;
    stats.unmapped_output = emit_stats.unmapped;
    stats.key_collisions = emit_stats.collisions;

    // The one-output-row-per-junction guarantee; a mismatch means the
    // intermediate stream was corrupted somewhere upstream.
    if stats.emitted != stats.junctions {
        bail!(
            "merge join emitted {} rows for {} input junctions",
            stats.emitted,
            stats.junctions
        );
    }

    Ok(stats)
}
