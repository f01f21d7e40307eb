use anyhow::{anyhow, bail, Context, Result};

/// One splice junction as read from the intropolis TSV.
///
/// Coordinate conventions:
/// - The input TSV is 1-based, inclusive on both ends.
/// - BED (what liftOver consumes) is 0-based, half-open, so `bed_line()`
///   emits `start - 1` and keeps `end` as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionRecord {
    /// 0-based ordinal assigned by input order.
    pub ordinal: u64,
    pub chrom: String,
    /// 1-based inclusive start.
    pub start: u64,
    /// 1-based inclusive end.
    pub end: u64,
    pub strand: char,
    pub left_motif: String,
    pub right_motif: String,
    /// Indexes of samples in which the junction was found.
    pub samples: Vec<u64>,
    /// Read counts per sample, parallel to `samples`.
    pub counts: Vec<u64>,
}

impl JunctionRecord {
    /// Parse one tab-separated junction line.
    ///
    /// Any malformed line is an error: the merge join downstream requires an
    /// exact one-record-per-line correspondence with the input file, so
    /// skipping records silently would desynchronize the whole run.
    pub fn parse(line: &str, ordinal: u64) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 8 {
            bail!("expected 8 tab-separated fields, found {}", fields.len());
        }
        let start: u64 = fields[1]
            .parse()
            .with_context(|| format!("non-numeric start {:?}", fields[1]))?;
        if start == 0 {
            bail!("start coordinate is 1-based, found 0");
        }
        let end: u64 = fields[2]
            .parse()
            .with_context(|| format!("non-numeric end {:?}", fields[2]))?;
        let strand = match fields[3] {
            "+" => '+',
            "-" => '-',
            other => bail!("invalid strand {:?}", other),
        };
        let samples = parse_int_list(fields[6]).context("sample index list")?;
        let counts = parse_int_list(fields[7]).context("read count list")?;
        if samples.len() != counts.len() {
            bail!(
                "sample index list has {} entries but read count list has {}",
                samples.len(),
                counts.len()
            );
        }
        Ok(Self {
            ordinal,
            chrom: fields[0].to_string(),
            start,
            end,
            strand,
            left_motif: fields[4].to_string(),
            right_motif: fields[5].to_string(),
            samples,
            counts,
        })
    }

    /// The identity string smuggled through liftOver in the BED name column.
    /// `;` never occurs in chromosome names, coordinates, or strand symbols.
    pub fn synthetic_name(&self) -> String {
        format!(
            "info_{};{};{};{};{}",
            self.ordinal,
            self.chrom,
            self.start - 1,
            self.end,
            self.strand
        )
    }

    /// BED line for liftOver: 0-based half-open interval, synthetic name,
    /// constant score.
    pub fn bed_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t1\t{}",
            self.chrom,
            self.start - 1,
            self.end,
            self.synthetic_name(),
            self.strand
        )
    }
}

fn parse_int_list(field: &str) -> Result<Vec<u64>> {
    field
        .split(',')
        .map(|tok| {
            tok.parse::<u64>()
                .map_err(|_| anyhow!("non-numeric list entry {tok:?}"))
        })
        .collect()
}

/// The original junction identity recovered from a lifted BED name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticName {
    pub ordinal: u64,
    pub chrom: String,
    /// 0-based half-open start, exactly as written to the BED file.
    pub start0: u64,
    pub end: u64,
    pub strand: String,
}

impl SyntheticName {
    /// Decode a BED name written by [`JunctionRecord::synthetic_name`].
    /// liftOver passes the name column through unchanged, so a name that
    /// fails to decode means the mapped file was not produced from our input.
    pub fn decode(name: &str) -> Result<Self> {
        let tokens: Vec<&str> = name.split(';').collect();
        if tokens.len() != 5 {
            bail!("synthetic name has {} `;`-separated tokens, expected 5", tokens.len());
        }
        let ordinal = tokens[0]
            .strip_prefix("info_")
            .ok_or_else(|| anyhow!("synthetic name missing info_ prefix: {:?}", tokens[0]))?
            .parse::<u64>()
            .with_context(|| format!("non-numeric ordinal in {:?}", tokens[0]))?;
        let start0: u64 = tokens[2]
            .parse()
            .with_context(|| format!("non-numeric start in synthetic name {name:?}"))?;
        let end: u64 = tokens[3]
            .parse()
            .with_context(|| format!("non-numeric end in synthetic name {name:?}"))?;
        Ok(Self {
            ordinal,
            chrom: tokens[1].to_string(),
            start0,
            end,
            strand: tokens[4].to_string(),
        })
    }

    /// The original 1-based inclusive start (inverse of the BED conversion).
    pub fn start(&self) -> u64 {
        self.start0 + 1
    }
}
