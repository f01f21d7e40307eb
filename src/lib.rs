//! junclift: lift intropolis splice junctions from hg38 to hg19 and emit
//! both coordinate systems side by side.
//!
//! The pipeline normalizes 1-based inclusive junctions to half-open BED
//! intervals, runs the external UCSC liftOver tool in exact-match mode,
//! recombines its output with the original records, sorts the combined
//! stream with the system `sort`, and merge-joins the sorted stream into
//! one 12-field output row per junction. Junctions with no valid mapping
//! carry four literal `NA` fields.
//!
//! Output goes to stdout in sort-key order (hg38 chrom, start, end), not
//! input order.

pub mod cli;
pub mod emit;
pub mod external;
pub mod merge;
pub mod pipeline;
pub mod record;

// Flat re-exports for the most commonly used types.
pub use emit::{merge_join, EmitStats};
pub use merge::LIFT_MARKER;
pub use record::{JunctionRecord, SyntheticName};
