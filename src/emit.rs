//! Merge join over the sorted combined stream.
//!
//! After the external sort, every junction contributes either one row (no
//! liftover) or two adjacent rows (liftover available) sharing the same
//! 4-field hg38 key. The emitter walks the stream with two lookahead
//! buffers and writes exactly one 12-field output row per original junction.

use crate::merge::LIFT_MARKER;
use anyhow::{bail, Context, Result};
use std::io::{BufRead, Lines, Write};

/// Row shape, detected by field count when the sorted stream is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    /// Original junction line: 4 key fields + motifs + sample lists.
    Origin,
    /// Reconstructed liftOver result: 4 key fields + 4 hg19 fields + marker.
    Lift,
}

#[derive(Debug, Clone)]
struct KeyedRow {
    fields: Vec<String>,
    kind: RowKind,
}

impl KeyedRow {
    fn parse(line: &str, line_no: u64) -> Result<Self> {
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        let kind = match fields.len() {
            8 => RowKind::Origin,
            9 => RowKind::Lift,
            n => bail!("sorted stream line {line_no} has {n} fields, expected 8 or 9"),
        };
        if kind == RowKind::Lift && fields[8] != LIFT_MARKER {
            bail!(
                "sorted stream line {line_no}: 9-field row does not end in the lift marker: {:?}",
                fields[8]
            );
        }
        Ok(Self { fields, kind })
    }

    /// The hg38 (chrom, start, end, strand) join key.
    fn key(&self) -> &[String] {
        &self.fields[..4]
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmitStats {
    /// Output rows written; must equal the input junction count.
    pub emitted: u64,
    /// Output rows carrying hg19 coordinates.
    pub paired: u64,
    /// Output rows carrying `NA` hg19 fields.
    pub unmapped: u64,
    /// Distinct junctions found sharing an identical hg38 key.
    pub collisions: u64,
    /// Lift rows discarded because their key collided.
    pub dropped_lifts: u64,
}

struct RowReader<R> {
    lines: Lines<R>,
    line_no: u64,
}

impl<R: BufRead> RowReader<R> {
    /// Next parsed row, or `None` at end of stream. A blank line also ends
    /// the stream, matching the trailing-newline behavior of `sort -o`.
    fn next_row(&mut self) -> Result<Option<KeyedRow>> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                let line = line.context("reading sorted stream")?;
                self.line_no += 1;
                if line.is_empty() {
                    return Ok(None);
                }
                KeyedRow::parse(&line, self.line_no).map(Some)
            }
        }
    }
}

struct Emitter<'a, W> {
    out: &'a mut W,
    stats: EmitStats,
    /// Key of the most recent same-shape adjacency, kept so that the
    /// leftover lift row of a colliding pair is dropped instead of being
    /// treated as stream corruption.
    collision_key: Option<Vec<String>>,
}

impl<W: Write> Emitter<'_, W> {
    /// One junction with no liftover: origin fields plus four `NA`s.
    /// A lift row can only land here through a key collision; any other
    /// orphan lift means the stream is corrupt.
    fn emit_unmapped(&mut self, row: KeyedRow) -> Result<()> {
        match row.kind {
            RowKind::Origin => {
                writeln!(self.out, "{}\tNA\tNA\tNA\tNA", row.fields.join("\t"))?;
                self.stats.emitted += 1;
                self.stats.unmapped += 1;
                Ok(())
            }
            RowKind::Lift => {
                if self.collision_key.as_deref() == Some(row.key()) {
                    tracing::warn!(
                        key = %row.key().join(":"),
                        "dropping leftover lift row for colliding hg38 key"
                    );
                    self.stats.dropped_lifts += 1;
                    Ok(())
                } else {
                    bail!(
                        "lift row with no matching origin row in sorted stream: {}",
                        row.fields.join("\t")
                    )
                }
            }
        }
    }

    /// One junction with a liftover: origin fields plus the lift row's four
    /// hg19 fields. The marker field is discarded here.
    fn emit_paired(&mut self, a: KeyedRow, b: KeyedRow) -> Result<()> {
        let (origin, lift) = match (a.kind, b.kind) {
            (RowKind::Origin, RowKind::Lift) => (a, b),
            (RowKind::Lift, RowKind::Origin) => (b, a),
            // callers only pair rows of different shapes
            _ => unreachable!("emit_paired called with same-shape rows"),
        };
        writeln!(
            self.out,
            "{}\t{}",
            origin.fields.join("\t"),
            lift.fields[4..8].join("\t")
        )?;
        self.stats.emitted += 1;
        self.stats.paired += 1;
        Ok(())
    }

    fn note_collision(&mut self, key: &[String], kind: RowKind) {
        tracing::warn!(
            key = %key.join(":"),
            shape = ?kind,
            "two distinct junctions share an identical hg38 key; emitting both without pairing"
        );
        self.stats.collisions += 1;
        self.collision_key = Some(key.to_vec());
    }
}

/// Walk the sorted combined stream and write one output row per junction.
///
/// `current`/`next` hold the two lookahead rows. Terminal conditions: the
/// stream is empty, a single row is left over (emitted unmapped), or the
/// final pair consumes the stream exactly.
pub fn merge_join<R: BufRead, W: Write>(reader: R, out: &mut W) -> Result<EmitStats> {
    let mut rows = RowReader { lines: reader.lines(), line_no: 0 };
    let mut emitter = Emitter { out, stats: EmitStats::default(), collision_key: None };

    let Some(mut current) = rows.next_row()? else {
        return Ok(emitter.stats);
    };
    let mut next = rows.next_row()?;

    loop {
        let Some(next_row) = next else {
            emitter.emit_unmapped(current)?;
            break;
        };
        if current.key() != next_row.key() {
            // no pairing partner for `current` in this window
            emitter.emit_unmapped(current)?;
            current = next_row;
            next = rows.next_row()?;
            continue;
        }
        match (current.kind, next_row.kind) {
            (RowKind::Origin, RowKind::Lift) | (RowKind::Lift, RowKind::Origin) => {
                emitter.emit_paired(current, next_row)?;
                current = match rows.next_row()? {
                    Some(row) => row,
                    None => break,
                };
                next = rows.next_row()?;
            }
            (RowKind::Origin, RowKind::Origin) => {
                emitter.note_collision(next_row.key(), RowKind::Origin);
                emitter.emit_unmapped(current)?;
                current = next_row;
                next = rows.next_row()?;
            }
            (RowKind::Lift, RowKind::Lift) => {
                emitter.note_collision(next_row.key(), RowKind::Lift);
                emitter.stats.dropped_lifts += 1;
                current = next_row;
                next = rows.next_row()?;
            }
        }
    }

    Ok(emitter.stats)
}
