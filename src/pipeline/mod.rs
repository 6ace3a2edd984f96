//! Loader -> sanitizer -> framer, composed into one synchronous pass.

use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

pub mod frame;
pub mod loader;
pub mod patches;
pub mod sanitize;

pub use frame::frame_data;
pub use loader::load_formatted_data;
pub use patches::{builtin_patches, DataPatch};
pub use sanitize::{sanitize_data, ColumnSanitizer, SanitizerRegistry};

use crate::config::Config;
use crate::error::Result;
use crate::metrics::PipelineMetrics;
use crate::types::{CleanRecord, Table};

/// Summary of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub rows: usize,
    /// Present cells rejected by each sanitizer, in application order
    pub cleared_by_sanitizer: Vec<(String, usize)>,
    pub addresses_derived: usize,
    /// Missing cells per output column
    pub missing: Vec<(String, usize)>,
    pub duration_ms: u128,
}

/// Configurable cleaning pipeline
pub struct Pipeline {
    patches: Vec<DataPatch>,
    sanitizers: SanitizerRegistry,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            patches: config.all_patches(),
            sanitizers: SanitizerRegistry::new(),
        }
    }

    /// Pipeline with explicit patches and the built-in sanitizers
    pub fn with_patches(patches: Vec<DataPatch>) -> Self {
        Self {
            patches,
            sanitizers: SanitizerRegistry::new(),
        }
    }

    pub fn with_sanitizers(mut self, sanitizers: SanitizerRegistry) -> Self {
        self.sanitizers = sanitizers;
        self
    }

    /// Load, sanitize and frame the registry at `path`
    #[instrument(skip(self, path), fields(file = %path.as_ref().display()))]
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<(Table<CleanRecord>, PipelineReport)> {
        let start = Instant::now();

        let mut table = load_formatted_data(path, &self.patches)?;
        let sanitize_report = self.sanitizers.apply(&mut table);
        let framed = frame_data(table);

        let report = PipelineReport {
            rows: framed.len(),
            cleared_by_sanitizer: sanitize_report
                .steps
                .into_iter()
                .map(|s| (s.sanitizer, s.cleared))
                .collect(),
            addresses_derived: framed.iter().filter(|r| r.address.is_some()).count(),
            missing: framed
                .missing_counts()
                .into_iter()
                .map(|(name, count)| (name.to_string(), count))
                .collect(),
            duration_ms: start.elapsed().as_millis(),
        };

        PipelineMetrics::record_run(report.rows, start.elapsed().as_secs_f64());
        info!(
            rows = report.rows,
            addresses = report.addresses_derived,
            duration_ms = report.duration_ms as u64,
            "Pipeline finished"
        );

        Ok((framed, report))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_patches(builtin_patches())
    }
}

/// Run the whole cleaning pipeline with the built-in corrections.
pub fn load_clean<P: AsRef<Path>>(path: P) -> Result<Table<CleanRecord>> {
    let table = load_formatted_data(path, &builtin_patches())?;
    Ok(frame_data(sanitize_data(table)))
}

/// [`load_clean`] on the default cached export path
pub fn load_clean_default() -> Result<Table<CleanRecord>> {
    load_clean(crate::constants::default_data_path())
}
