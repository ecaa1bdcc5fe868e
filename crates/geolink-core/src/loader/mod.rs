// crates/geolink-core/src/loader/mod.rs

//! # Record Loader
//!
//! Handles the physical layer (files, decompression, CSV framing) and hands
//! validated [`LocalityRecord`]s to the matcher.

use crate::error::{LinkError, RecordSet, Result};
use crate::haystack::Haystack;
use crate::record::LocalityRecord;
use crate::text::FoldMode;
use std::io::Read;
use std::path::Path;

pub mod common_io;

/// Options for reading an input record set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Skip the first row as a header.
    pub has_headers: bool,
}

/// Streaming reader over `(id, country, province, city)` CSV rows.
///
/// Rows are numbered from 1, counting data rows only. Rows of any width are
/// read; a width other than four surfaces as
/// [`LinkError::MalformedRecord`](crate::error::LinkError::MalformedRecord).
pub struct RecordReader<R: Read> {
    inner: csv::StringRecordsIntoIter<R>,
    set: RecordSet,
    row: usize,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R, set: RecordSet, options: ReadOptions) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(options.has_headers)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self { inner, set, row: 0 }
    }
}

impl RecordReader<Box<dyn Read>> {
    /// Opens `path` (gzip-aware) for reading.
    pub fn from_path(path: impl AsRef<Path>, set: RecordSet, options: ReadOptions) -> Result<Self> {
        let stream = common_io::open_stream(path.as_ref())?;
        Ok(Self::new(stream, set, options))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<LocalityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.inner.next()?;
        self.row += 1;
        Some(
            row.map_err(LinkError::from)
                .and_then(|fields| LocalityRecord::from_fields(&fields, self.set, self.row)),
        )
    }
}

impl Haystack {
    /// Reads and materializes a haystack file, failing on the first bad row.
    pub fn load_from_path(
        path: impl AsRef<Path>,
        options: ReadOptions,
        fold: FoldMode,
    ) -> Result<Self> {
        let path = path.as_ref();
        let reader = RecordReader::from_path(path, RecordSet::Haystack, options)?;
        let haystack = Haystack::try_from_records(reader, fold)?;
        log::info!(
            "Loaded {} haystack rows from {}",
            haystack.len(),
            path.display()
        );
        Ok(haystack)
    }
}
