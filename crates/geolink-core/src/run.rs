// crates/geolink-core/src/run.rs

//! # Run Orchestration
//!
//! Drives one linkage run: resets the sink, streams needles, matches each one
//! against the shared [`Haystack`] and writes the outcome.

use crate::common::{NoMatchRecord, RunStats};
use crate::config::LinkConfig;
use crate::error::{LinkError, Result};
use crate::haystack::Haystack;
use crate::matcher::{MatchOutcome, Matcher};
use crate::record::{KeyedRecord, LocalityRecord};
use crate::sink::MatchSink;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Matches needles against one materialized haystack.
#[derive(Debug, Clone)]
pub struct Linker<'h> {
    haystack: &'h Haystack,
    matcher: Matcher,
    config: LinkConfig,
}

impl<'h> Linker<'h> {
    /// Fails when `config` is invalid or folds keys differently from `haystack`.
    pub fn new(config: &LinkConfig, haystack: &'h Haystack) -> Result<Self> {
        config.validate()?;
        if config.fold != haystack.fold() {
            return Err(LinkError::InvalidConfig(format!(
                "haystack was folded with {:?} but the run uses {:?}",
                haystack.fold(),
                config.fold
            )));
        }
        Ok(Self {
            haystack,
            matcher: Matcher::new(config.policy()),
            config: config.clone(),
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Runs every needle from a fallible stream.
    ///
    /// The first `Err` in `needles` aborts the run after the needles before it
    /// have been written; nothing already written is rolled back.
    pub fn run<I, S>(&self, needles: I, sink: &mut S) -> Result<RunStats>
    where
        I: IntoIterator<Item = Result<LocalityRecord>>,
        S: MatchSink + ?Sized,
    {
        log::info!(
            "Linking against {} haystack rows (mode={:?}, threshold={}, parallel={})",
            self.haystack.len(),
            self.config.mode,
            self.config.threshold,
            self.config.parallel
        );

        sink.begin_run()?;
        let mut stats = RunStats {
            haystack: self.haystack.len(),
            ..RunStats::default()
        };

        if self.config.parallel {
            self.run_parallel(needles.into_iter(), sink, &mut stats)?;
        } else {
            self.run_sequential(needles.into_iter(), sink, &mut stats)?;
        }

        sink.finish()?;
        log::info!(
            "Done: {} needles, {} matched, {} unmatched, {} candidate rows",
            stats.needles,
            stats.matched,
            stats.unmatched,
            stats.candidates
        );
        Ok(stats)
    }

    /// Convenience for in-memory needles that cannot fail to parse.
    pub fn run_records<I, S>(&self, needles: I, sink: &mut S) -> Result<RunStats>
    where
        I: IntoIterator<Item = LocalityRecord>,
        S: MatchSink + ?Sized,
    {
        self.run(needles.into_iter().map(Ok), sink)
    }

    fn keyed(&self, record: LocalityRecord) -> KeyedRecord {
        KeyedRecord::new(record, self.haystack.fold())
    }

    fn run_sequential<I, S>(&self, needles: I, sink: &mut S, stats: &mut RunStats) -> Result<()>
    where
        I: Iterator<Item = Result<LocalityRecord>>,
        S: MatchSink + ?Sized,
    {
        for record in needles {
            let needle = self.keyed(record?);
            log::debug!("Matching: {}", needle.key.raw());
            let outcome = self.matcher.match_needle(&needle, self.haystack);
            emit(&needle, &outcome, sink, stats)?;
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<I, S>(&self, needles: I, sink: &mut S, stats: &mut RunStats) -> Result<()>
    where
        I: Iterator<Item = Result<LocalityRecord>>,
        S: MatchSink + ?Sized,
    {
        log::warn!("Built without the 'parallel' feature; matching sequentially");
        self.run_sequential(needles, sink, stats)
    }

    /// Reads `batch_size` needles, matches them on the pool, writes them in
    /// input order, repeat.
    #[cfg(feature = "parallel")]
    fn run_parallel<I, S>(&self, mut needles: I, sink: &mut S, stats: &mut RunStats) -> Result<()>
    where
        I: Iterator<Item = Result<LocalityRecord>>,
        S: MatchSink + ?Sized,
    {
        let pool = match self.config.threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| LinkError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        let batch_size = self.config.batch_size;
        loop {
            let mut batch = Vec::with_capacity(batch_size);
            let mut pending_err = None;
            for record in needles.by_ref().take(batch_size) {
                match record {
                    Ok(r) => batch.push(self.keyed(r)),
                    Err(e) => {
                        pending_err = Some(e);
                        break;
                    }
                }
            }
            if batch.is_empty() && pending_err.is_none() {
                break;
            }

            let outcomes = match &pool {
                Some(p) => p.install(|| self.match_batch(&batch)),
                None => self.match_batch(&batch),
            };
            log::debug!("Matched batch of {} needles", batch.len());

            for (needle, outcome) in batch.iter().zip(&outcomes) {
                emit(needle, outcome, sink, stats)?;
            }
            if let Some(e) = pending_err {
                return Err(e);
            }
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn match_batch(&self, batch: &[KeyedRecord]) -> Vec<MatchOutcome> {
        batch
            .par_iter()
            .map(|needle| self.matcher.match_needle(needle, self.haystack))
            .collect()
    }
}

fn emit<S: MatchSink + ?Sized>(
    needle: &KeyedRecord,
    outcome: &MatchOutcome,
    sink: &mut S,
    stats: &mut RunStats,
) -> Result<()> {
    stats.needles += 1;
    match outcome {
        MatchOutcome::Matched(candidates) => {
            stats.matched += 1;
            stats.candidates += candidates.len();
            sink.write_matched(candidates)
        }
        MatchOutcome::Unmatched(diagnostics) => {
            log::debug!("No candidates found for {}", needle.id());
            stats.unmatched += 1;
            sink.write_unmatched(&NoMatchRecord::new(needle, diagnostics.as_ref()))
        }
    }
}
