// crates/geolink-core/src/lib.rs

//! # geolink-core
//!
//! Approximate record linkage of `(country, province, city)` location keys.
//!
//! Each *needle* record is compared with every record of a *haystack*. A
//! needle is matched when a haystack key is identical after case folding, or
//! (in extended mode) within a Levenshtein threshold of it. Every needle ends
//! up in exactly one of two output sets: matched (one row per candidate) or
//! unmatched (one row per needle).
//!
//! ```rust
//! use geolink_core::prelude::*;
//!
//! let haystack = Haystack::from_records(
//!     [LocalityRecord::new("9", "usa", "ca", "losangeles")],
//!     FoldMode::Lowercase,
//! );
//! let linker = Linker::new(&LinkConfig::default(), &haystack)?;
//!
//! let mut sink = MemorySink::new();
//! let stats = linker.run_records([LocalityRecord::new("1", "USA", "CA", "LosAngeles")], &mut sink)?;
//!
//! assert_eq!(stats.matched, 1);
//! assert_eq!(sink.matched[0][0].distance, 0);
//! # Ok::<(), geolink_core::LinkError>(())
//! ```

pub mod common;
pub mod config;
pub mod distance;
pub mod error;
pub mod haystack;
pub mod loader;
pub mod matcher;
pub mod record;
pub mod run;
pub mod sink;
pub mod text;

// Re-exports
pub use crate::common::{CandidateMatch, NoMatchRecord, RunStats};
pub use crate::config::LinkConfig;
pub use crate::distance::{edit_distance, DistanceSummary};
pub use crate::error::{LinkError, RecordSet, Result};
pub use crate::haystack::Haystack;
pub use crate::loader::{ReadOptions, RecordReader};
pub use crate::matcher::{ComparisonPolicy, MatchMode, MatchOutcome, Matcher};
pub use crate::record::{build_key, ComparisonKey, KeyedRecord, LocalityRecord};
pub use crate::run::Linker;
pub use crate::sink::{CsvSink, MatchSink, MemorySink};
pub use crate::text::FoldMode;

pub mod prelude {
    pub use crate::{
        build_key, edit_distance, CandidateMatch, ComparisonPolicy, CsvSink, FoldMode, Haystack,
        LinkConfig, LinkError, Linker, LocalityRecord, MatchMode, MatchOutcome, MatchSink,
        Matcher, MemorySink, NoMatchRecord, ReadOptions, RecordReader, RecordSet, Result,
        RunStats,
    };
}
