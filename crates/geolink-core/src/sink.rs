// crates/geolink-core/src/sink.rs

//! # Output Sinks
//!
//! The two result sets are written through a [`MatchSink`] handed to the
//! run by its caller. The run calls [`MatchSink::begin_run`] exactly once,
//! before any needle, so the sink can discard output from a previous run.

use crate::common::{CandidateMatch, NoMatchRecord};
use crate::error::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Destination for the matched and unmatched sets.
pub trait MatchSink {
    /// Reset both destinations. Called once per run, before any write.
    fn begin_run(&mut self) -> Result<()>;

    /// All candidates of one needle, in haystack scan order.
    fn write_matched(&mut self, candidates: &[CandidateMatch]) -> Result<()>;

    fn write_unmatched(&mut self, record: &NoMatchRecord) -> Result<()>;

    /// Flush anything still buffered.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects both sets in memory.
///
/// `matched` keeps one entry per needle so the per-needle grouping survives.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub matched: Vec<Vec<CandidateMatch>>,
    pub unmatched: Vec<NoMatchRecord>,
    pub runs_started: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every candidate row, flattened in write order.
    pub fn candidates(&self) -> impl Iterator<Item = &CandidateMatch> {
        self.matched.iter().flatten()
    }
}

impl MatchSink for MemorySink {
    fn begin_run(&mut self) -> Result<()> {
        self.matched.clear();
        self.unmatched.clear();
        self.runs_started += 1;
        Ok(())
    }

    fn write_matched(&mut self, candidates: &[CandidateMatch]) -> Result<()> {
        self.matched.push(candidates.to_vec());
        Ok(())
    }

    fn write_unmatched(&mut self, record: &NoMatchRecord) -> Result<()> {
        self.unmatched.push(record.clone());
        Ok(())
    }
}

type CsvOut = csv::Writer<BufWriter<File>>;

/// Writes the two sets as headerless CSV files.
///
/// Text fields are quoted, numeric fields are not. Each needle's rows are
/// flushed right away, so a later failure leaves earlier output intact.
pub struct CsvSink {
    matched_path: PathBuf,
    unmatched_path: PathBuf,
    with_diagnostics: bool,
    matched: Option<CsvOut>,
    unmatched: Option<CsvOut>,
}

impl CsvSink {
    /// `with_diagnostics` adds the min/max distance columns to unmatched rows
    /// (extended mode).
    pub fn new(
        matched_path: impl Into<PathBuf>,
        unmatched_path: impl Into<PathBuf>,
        with_diagnostics: bool,
    ) -> Self {
        Self {
            matched_path: matched_path.into(),
            unmatched_path: unmatched_path.into(),
            with_diagnostics,
            matched: None,
            unmatched: None,
        }
    }

    pub fn matched_path(&self) -> &Path {
        &self.matched_path
    }

    pub fn unmatched_path(&self) -> &Path {
        &self.unmatched_path
    }

    fn create(path: &Path) -> Result<CsvOut> {
        let file = File::create(path)?;
        Ok(csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(BufWriter::new(file)))
    }

    fn opened<'a>(slot: &'a mut Option<CsvOut>, path: &Path) -> Result<&'a mut CsvOut> {
        let writer = match slot.take() {
            Some(w) => w,
            None => Self::create(path)?,
        };
        Ok(slot.insert(writer))
    }
}

fn opt_num(v: Option<usize>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

impl MatchSink for CsvSink {
    fn begin_run(&mut self) -> Result<()> {
        self.matched = Some(Self::create(&self.matched_path)?);
        self.unmatched = Some(Self::create(&self.unmatched_path)?);
        log::debug!(
            "Reset {} and {}",
            self.matched_path.display(),
            self.unmatched_path.display()
        );
        Ok(())
    }

    fn write_matched(&mut self, candidates: &[CandidateMatch]) -> Result<()> {
        let out = Self::opened(&mut self.matched, &self.matched_path)?;
        for c in candidates {
            out.write_record([
                c.distance.to_string().as_str(),
                &c.needle_id,
                &c.needle_key,
                &c.haystack_id,
                &c.haystack_key,
            ])?;
        }
        out.flush()?;
        log::debug!(
            "Writing {} rows into {}",
            candidates.len(),
            self.matched_path.display()
        );
        Ok(())
    }

    fn write_unmatched(&mut self, r: &NoMatchRecord) -> Result<()> {
        let out = Self::opened(&mut self.unmatched, &self.unmatched_path)?;
        if self.with_diagnostics {
            out.write_record([
                r.needle_id.as_str(),
                &r.country,
                &r.province,
                &r.city,
                &opt_num(r.min_distance),
                &opt_num(r.max_distance),
            ])?;
        } else {
            out.write_record([&r.needle_id, &r.country, &r.province, &r.city])?;
        }
        out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(w) = self.matched.as_mut() {
            w.flush()?;
        }
        if let Some(w) = self.unmatched.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}
