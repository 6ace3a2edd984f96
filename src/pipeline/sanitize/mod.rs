use tracing::instrument;

use crate::types::{Column, Record, Table};

pub mod registry;
pub mod sanitizers;

pub use registry::{SanitizeReport, SanitizerRegistry};

/// A normalization rule scoped to a single column.
///
/// Rules are pure: each cell is rewritten independently of its row and of
/// every other cell.
pub trait ColumnSanitizer: Send + Sync {
    /// Column this rule rewrites
    fn column(&self) -> Column;

    /// Human-readable name for logs and reports
    fn name(&self) -> &str;

    /// Rewrite one cell. `None` is the missing marker in both directions.
    fn sanitize(&self, value: Option<&str>) -> Option<String>;
}

/// Run every built-in column rule over the table, in the fixed order.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn sanitize_data(mut table: Table<Record>) -> Table<Record> {
    SanitizerRegistry::new().apply(&mut table);
    table
}

/// Trimmed cell content, or `None` for missing and blank cells
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Upper-case the first character, leaving the rest untouched
pub(crate) fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some(" 12 ")), Some("12"));
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("jean"), "Jean");
        assert_eq!(capitalize_first("émile"), "Émile");
        assert_eq!(capitalize_first(""), "");
    }
}
