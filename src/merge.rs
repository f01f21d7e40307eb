//! Combine the liftOver output with the original junction lines into one
//! stream keyed by the hg38 coordinates, ready for the external sort.

use crate::record::SyntheticName;
use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Trailing field on every lift row. Never a real field value; the merge
/// join detects a row's shape by field count and discards this.
pub const LIFT_MARKER: &str = "FAKE";

/// Write one reconstructed 9-field lift row per mapped BED line.
///
/// The hg38 key is recovered from the synthetic name; both the hg38 and the
/// lifted start get `+1` to restore the 1-based inclusive convention of the
/// input TSV. Returns the number of lift rows written.
pub fn write_lift_rows(mapped: impl BufRead, out: &mut impl Write) -> Result<u64> {
    let mut written = 0u64;
    for (i, line) in mapped.lines().enumerate() {
        let line = line.context("reading liftOver output")?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 6 {
            bail!(
                "liftOver output line {} has {} fields, expected at least 6",
                i + 1,
                fields.len()
            );
        }
        let name = SyntheticName::decode(fields[3])
            .with_context(|| format!("liftOver output line {}", i + 1))?;
        let lifted_start: u64 = fields[1]
            .parse()
            .with_context(|| format!("non-numeric start on liftOver output line {}", i + 1))?;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            name.chrom,
            name.start(),
            name.end,
            name.strand,
            fields[0],
            lifted_start + 1,
            fields[2],
            fields[5],
            LIFT_MARKER
        )?;
        written += 1;
    }
    Ok(written)
}

/// Append every original junction line verbatim. The normalizer pass has
/// already validated each line's shape. Returns the number of lines copied.
pub fn write_origin_rows(input: impl BufRead, out: &mut impl Write) -> Result<u64> {
    let mut written = 0u64;
    for line in input.lines() {
        let line = line.context("re-reading junction input")?;
        if line.is_empty() {
            continue;
        }
        writeln!(out, "{line}")?;
        written += 1;
    }
    Ok(written)
}
