//! Declarative corrections for known-bad rows of the source export.
//!
//! Patches are keyed by the stable `gid` identifier of a row, never by its
//! position in the file.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::LoaderMetrics;
use crate::types::{Column, Record, Table};

/// Force one cell of one row to a fixed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPatch {
    /// `gid` of the row to correct
    pub key: String,
    pub column: Column,
    /// Raw replacement text, coerced like any loaded cell. `None` forces missing.
    #[serde(default)]
    pub value: Option<String>,
}

impl DataPatch {
    pub fn missing(key: &str, column: Column) -> Self {
        Self {
            key: key.to_string(),
            column,
            value: None,
        }
    }
}

/// Rows of the export whose maintenance fields were entered swapped.
const KNOWN_BAD_MAINTENANCE_ROWS: &[&str] = &["52"];

/// Corrections that apply to every load of the registry
pub fn builtin_patches() -> Vec<DataPatch> {
    KNOWN_BAD_MAINTENANCE_ROWS
        .iter()
        .flat_map(|key| {
            [
                DataPatch::missing(key, Column::MaintenanceFrequency),
                DataPatch::missing(key, Column::LastMaintenanceDate),
            ]
        })
        .collect()
}

/// Apply patches to matching rows. Returns the number of cells written.
pub fn apply_patches(table: &mut Table<Record>, patches: &[DataPatch]) -> usize {
    let mut applied = 0;
    for patch in patches {
        let mut matched = false;
        for row in table.iter_mut().filter(|r| r.id.as_deref() == Some(patch.key.as_str())) {
            row.set_raw(patch.column, patch.value.as_deref());
            matched = true;
            applied += 1;
        }

        if matched {
            debug!(key = %patch.key, column = %patch.column, "Applied data patch");
        } else {
            warn!(key = %patch.key, column = %patch.column, "Data patch matched no row");
        }
    }

    LoaderMetrics::record_patches_applied(applied);
    applied
}
