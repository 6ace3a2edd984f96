//! Pipeline counters, emitted through the `metrics` facade.
//!
//! No recorder is installed by this crate; an embedding application may install
//! one to collect these.

use crate::types::Column;

/// Metrics for fetching the registry export
pub struct FetchMetrics;

impl FetchMetrics {
    pub fn record_cache_hit() {
        ::metrics::counter!("dae_fetch_cache_hits_total").increment(1);
    }

    pub fn record_download(bytes: usize, duration_secs: f64) {
        ::metrics::counter!("dae_fetch_downloads_total").increment(1);
        ::metrics::histogram!("dae_fetch_payload_bytes").record(bytes as f64);
        ::metrics::histogram!("dae_fetch_duration_seconds").record(duration_secs);
    }

    pub fn record_error() {
        ::metrics::counter!("dae_fetch_errors_total").increment(1);
    }
}

/// Metrics for the loading phase
pub struct LoaderMetrics;

impl LoaderMetrics {
    pub fn record_rows_loaded(rows: usize) {
        ::metrics::counter!("dae_loader_rows_total").increment(rows as u64);
    }

    pub fn record_patches_applied(cells: usize) {
        ::metrics::counter!("dae_loader_patched_cells_total").increment(cells as u64);
    }
}

/// Metrics for the sanitizing phase
pub struct SanitizeMetrics;

impl SanitizeMetrics {
    /// Present cells a column rule turned into missing ones
    pub fn record_cells_cleared(column: Column, cleared: usize) {
        ::metrics::counter!("dae_sanitize_cleared_cells_total", "column" => column.name())
            .increment(cleared as u64);
    }
}

/// Whole-run metrics
pub struct PipelineMetrics;

impl PipelineMetrics {
    pub fn record_run(rows: usize, duration_secs: f64) {
        ::metrics::counter!("dae_pipeline_runs_total").increment(1);
        ::metrics::gauge!("dae_pipeline_rows").set(rows as f64);
        ::metrics::histogram!("dae_pipeline_duration_seconds").record(duration_secs);
    }
}
