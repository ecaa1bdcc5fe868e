use clap::{Args, Parser, Subcommand, ValueEnum};
use geolink_core::{FoldMode, LinkConfig, MatchMode};
use std::path::PathBuf;

/// CLI arguments for geolink
#[derive(Debug, Parser)]
#[command(
    name = "geolink",
    version,
    about = "Link country/province/city records against a haystack by exact or near-exact key"
)]
pub struct CliArgs {
    /// JSON config file; flags given on the command line take precedence
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match every needle against the haystack and write both result sets
    Link(LinkArgs),

    /// Print the edit distance between two strings after folding
    Distance {
        a: String,
        b: String,
        #[arg(long, value_enum)]
        fold: Option<FoldArg>,
    },

    /// Print the comparison key built from three locality fields
    Key {
        country: String,
        province: String,
        city: String,
        #[arg(long, value_enum)]
        fold: Option<FoldArg>,
    },
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Records to look up (id,country,province,city)
    #[arg(short = 'n', long = "needles", default_value = "key_x.csv")]
    pub needles: PathBuf,

    /// Candidate records scanned for every needle
    #[arg(short = 's', long = "haystack", default_value = "key_y.csv")]
    pub haystack: PathBuf,

    /// Matched output (default: results.csv, or results_simple.csv in simple mode)
    #[arg(short = 'm', long = "matched")]
    pub matched: Option<PathBuf>,

    /// Unmatched output (default: noresults.csv, or noresults_simple.csv in simple mode)
    #[arg(short = 'u', long = "unmatched")]
    pub unmatched: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Largest accepted edit distance in extended mode
    #[arg(short = 't', long)]
    pub threshold: Option<usize>,

    #[arg(long, value_enum)]
    pub fold: Option<FoldArg>,

    /// Input files start with a header row
    #[arg(long = "headers")]
    pub headers: bool,

    /// Match needles across a worker pool
    #[arg(short = 'p', long)]
    pub parallel: bool,

    /// Worker count (implies --parallel)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Needles per parallel batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Print run statistics as JSON
    #[arg(long = "report-json")]
    pub report_json: bool,
}

impl LinkArgs {
    /// Layers the flags that were given over `config`.
    pub fn apply(&self, config: &mut LinkConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(fold) = self.fold {
            config.fold = fold.into();
        }
        if self.headers {
            config.has_headers = true;
        }
        if self.parallel || self.threads.is_some() {
            config.parallel = true;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
    }

    /// Output paths, falling back to the per-mode defaults.
    pub fn output_paths(&self, mode: MatchMode) -> (PathBuf, PathBuf) {
        let (matched, unmatched) = match mode {
            MatchMode::Extended => ("results.csv", "noresults.csv"),
            MatchMode::Simple => ("results_simple.csv", "noresults_simple.csv"),
        };
        (
            self.matched.clone().unwrap_or_else(|| matched.into()),
            self.unmatched.clone().unwrap_or_else(|| unmatched.into()),
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Extended,
    Simple,
}

impl From<ModeArg> for MatchMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Extended => MatchMode::Extended,
            ModeArg::Simple => MatchMode::Simple,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FoldArg {
    Lowercase,
    Transliterate,
}

impl From<FoldArg> for FoldMode {
    fn from(f: FoldArg) -> Self {
        match f {
            FoldArg::Lowercase => FoldMode::Lowercase,
            FoldArg::Transliterate => FoldMode::Transliterate,
        }
    }
}
