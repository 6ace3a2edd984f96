//! Loader and cleaning pipeline for the Montpellier defibrillator (DAE) registry.
//!
//! The raw CSV export is read into a typed table, each free-text column is
//! normalized by its own rule, and the address parts are framed into a single
//! `address` field.

pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{RegistryError, Result};
pub use fetch::Fetcher;
pub use pipeline::{load_clean, load_clean_default, Pipeline, PipelineReport};
pub use types::{CleanRecord, Column, Record, Table};
