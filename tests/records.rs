//! Tests for junction parsing, BED normalization, and the synthetic-name
//! round trip.

use junclift::{JunctionRecord, SyntheticName};

const LINE: &str = "chr1\t100\t200\t+\tGT\tAG\t0,1\t5,10";

#[test]
fn parse_extracts_all_fields() {
    let rec = JunctionRecord::parse(LINE, 7).expect("parse");
    assert_eq!(rec.ordinal, 7);
    assert_eq!(rec.chrom, "chr1");
    assert_eq!(rec.start, 100);
    assert_eq!(rec.end, 200);
    assert_eq!(rec.strand, '+');
    assert_eq!(rec.left_motif, "GT");
    assert_eq!(rec.right_motif, "AG");
    assert_eq!(rec.samples, vec![0, 1]);
    assert_eq!(rec.counts, vec![5, 10]);
}

#[test]
fn bed_line_uses_half_open_coordinates() {
    let rec = JunctionRecord::parse(LINE, 0).expect("parse");
    assert_eq!(rec.bed_line(), "chr1\t99\t200\tinfo_0;chr1;99;200;+\t1\t+");
}

#[test]
fn synthetic_name_round_trips_the_start_coordinate() {
    let rec = JunctionRecord::parse(LINE, 42).expect("parse");
    let name = SyntheticName::decode(&rec.synthetic_name()).expect("decode");
    assert_eq!(name.ordinal, 42);
    assert_eq!(name.chrom, "chr1");
    assert_eq!(name.start(), rec.start);
    assert_eq!(name.end, rec.end);
    assert_eq!(name.strand, "+");
}

#[test]
fn wrong_field_count_is_rejected() {
    let err = JunctionRecord::parse("chr1\t100\t200\t+\tGT\tAG\t0,1", 0).unwrap_err();
    assert!(err.to_string().contains("8 tab-separated fields"), "{err}");
}

#[test]
fn non_numeric_coordinate_is_rejected() {
    assert!(JunctionRecord::parse("chr1\tx\t200\t+\tGT\tAG\t0\t5", 0).is_err());
    assert!(JunctionRecord::parse("chr1\t100\ty\t+\tGT\tAG\t0\t5", 0).is_err());
}

#[test]
fn zero_start_is_rejected() {
    // coordinates are 1-based; a 0 start would underflow the BED conversion
    assert!(JunctionRecord::parse("chr1\t0\t200\t+\tGT\tAG\t0\t5", 0).is_err());
}

#[test]
fn invalid_strand_is_rejected() {
    assert!(JunctionRecord::parse("chr1\t100\t200\t.\tGT\tAG\t0\t5", 0).is_err());
}

#[test]
fn unequal_sample_lists_are_rejected() {
    let err = JunctionRecord::parse("chr1\t100\t200\t+\tGT\tAG\t0,1\t5", 0).unwrap_err();
    assert!(err.to_string().contains("entries"), "{err}");
}

#[test]
fn synthetic_name_with_wrong_token_count_is_rejected() {
    assert!(SyntheticName::decode("info_0;chr1;99;200").is_err());
}

#[test]
fn synthetic_name_without_prefix_is_rejected() {
    assert!(SyntheticName::decode("0;chr1;99;200;+").is_err());
}
