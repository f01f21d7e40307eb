use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "junclift",
    about = "Lift intropolis splice junctions from hg38 to hg19, keeping both coordinate systems",
    version
)]
pub struct Args {
    /// Path to the UCSC liftOver executable
    #[arg(long = "liftover", value_name = "EXE")]
    pub liftover: PathBuf,

    /// Unzipped liftover chain (hg38ToHg19.over.chain)
    #[arg(long = "chain", value_name = "CHAIN")]
    pub chain: PathBuf,

    /// Gzipped junction TSV (intropolis.v2.hg38.tsv.gz)
    #[arg(long = "intropolis", value_name = "TSV.GZ")]
    pub intropolis: PathBuf,

    /// Where to store temporary files; defaults to the platform temp dir
    #[arg(long = "temp-dir", value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
