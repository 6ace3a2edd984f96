use tracing::debug;

use crate::constants::MAINTENANCE_FREQUENCY;
use crate::pipeline::sanitize::{present, ColumnSanitizer};
use crate::types::Column;

/// Collapses every present maintenance frequency to one canonical phrase.
///
/// The column only tells whether a maintenance schedule exists.
pub struct MaintenanceFrequencySanitizer;

impl ColumnSanitizer for MaintenanceFrequencySanitizer {
    fn column(&self) -> Column {
        Column::MaintenanceFrequency
    }

    fn name(&self) -> &str {
        "maintenance_frequency"
    }

    fn sanitize(&self, value: Option<&str>) -> Option<String> {
        let normalized = present(value)?.to_lowercase().replace("tout", "tous");
        if normalized != MAINTENANCE_FREQUENCY {
            debug!(original = %normalized, "Collapsing maintenance frequency");
        }
        Some(MAINTENANCE_FREQUENCY.to_string())
    }
}
