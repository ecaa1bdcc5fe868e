// crates/geolink-core/src/config.rs
use crate::error::{LinkError, Result};
use crate::loader::ReadOptions;
use crate::matcher::{ComparisonPolicy, MatchMode, DEFAULT_THRESHOLD};
use crate::text::FoldMode;
use serde::{Deserialize, Serialize};

#[cfg(feature = "json")]
use std::path::Path;

/// Needles matched per parallel batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Settings for one linkage run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes:
///
/// ```json
/// { "threshold": 2, "mode": "extended", "parallel": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Largest edit distance still accepted in extended mode.
    pub threshold: usize,
    pub mode: MatchMode,
    pub fold: FoldMode,
    /// Input files start with a header row.
    pub has_headers: bool,
    /// Match needles across a worker pool.
    pub parallel: bool,
    /// Worker count for `parallel`; `None` uses the global pool.
    pub threads: Option<usize>,
    /// Needles read and matched per parallel batch.
    pub batch_size: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: MatchMode::default(),
            fold: FoldMode::default(),
            has_headers: false,
            parallel: false,
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl LinkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(LinkError::InvalidConfig(
                "batch_size must be greater than 0".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(LinkError::InvalidConfig(
                "threads must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> ComparisonPolicy {
        ComparisonPolicy::for_mode(self.mode, self.threshold)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            has_headers: self.has_headers,
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: LinkConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    #[cfg(feature = "json")]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LinkError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}
