use tracing::{debug, info};

use super::sanitizers::{
    AddressNumberSanitizer, CityNameSanitizer, MaintenanceFrequencySanitizer, PhoneSanitizer,
    PostalCodeSanitizer, StreetNameSanitizer,
};
use super::ColumnSanitizer;
use crate::metrics::SanitizeMetrics;
use crate::types::{Column, Record, Table};

/// Outcome of one sanitizer pass over a column
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeStep {
    pub sanitizer: String,
    pub column: Column,
    /// Present cells the rule rejected as unusable
    pub cleared: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizeReport {
    pub steps: Vec<SanitizeStep>,
}

impl SanitizeReport {
    pub fn total_cleared(&self) -> usize {
        self.steps.iter().map(|s| s.cleared).sum()
    }
}

/// Ordered collection of column rules
pub struct SanitizerRegistry {
    sanitizers: Vec<Box<dyn ColumnSanitizer>>,
}

impl SanitizerRegistry {
    /// Registry with the built-in rules, in application order
    pub fn new() -> Self {
        Self {
            sanitizers: vec![
                Box::new(PhoneSanitizer),
                Box::new(AddressNumberSanitizer),
                Box::new(StreetNameSanitizer),
                Box::new(CityNameSanitizer),
                Box::new(PostalCodeSanitizer),
                Box::new(MaintenanceFrequencySanitizer),
            ],
        }
    }

    /// Empty registry, for callers composing their own rule set
    pub fn empty() -> Self {
        Self {
            sanitizers: Vec::new(),
        }
    }

    /// Append a rule; it runs after every rule already registered
    pub fn register(&mut self, sanitizer: Box<dyn ColumnSanitizer>) {
        self.sanitizers.push(sanitizer);
    }

    /// Names of the registered rules, in application order
    pub fn list(&self) -> Vec<&str> {
        self.sanitizers.iter().map(|s| s.name()).collect()
    }

    /// Apply every rule to its column
    pub fn apply(&self, table: &mut Table<Record>) -> SanitizeReport {
        let mut report = SanitizeReport::default();

        for sanitizer in &self.sanitizers {
            let column = sanitizer.column();
            let cleared = table.transform(column, |value| sanitizer.sanitize(value));

            debug!(sanitizer = sanitizer.name(), %column, cleared, "Sanitized column");
            SanitizeMetrics::record_cells_cleared(column, cleared);

            report.steps.push(SanitizeStep {
                sanitizer: sanitizer.name().to_string(),
                column,
                cleared,
            });
        }

        info!(cleared = report.total_cleared(), "Sanitized registry data");
        report
    }
}

impl Default for SanitizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
