use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

use super::patches::{apply_patches, DataPatch};
use crate::constants::HEADER_ID;
use crate::error::{RegistryError, Result};
use crate::metrics::LoaderMetrics;
use crate::types::{Column, Record, Table};

/// Tokens read as "no value" in any column
const NA_VALUES: &[&str] = &[
    "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "NULL", "null", "#N/A", "<NA>",
];

/// Extra token read as "no value" in coordinate columns only
const COORDINATE_NA: &str = "-";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalize a raw text cell: blank and NA tokens become `None`.
pub fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NA_VALUES.contains(&trimmed) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Coerce a coordinate cell to f64. Dashes, text and NaN become `None`.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == COORDINATE_NA {
        return None;
    }
    parse_text(trimmed)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a maintenance date written in any of the formats seen in the export.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = parse_text(raw)?;
    let trimmed = trimmed.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    debug!("Unparsable maintenance date: {}", trimmed);
    None
}

/// Positions of the pertinent columns in the CSV header
struct HeaderIndex {
    id: Option<usize>,
    columns: HashMap<Column, usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let mut columns = HashMap::new();
        for column in Column::ALL {
            let index = position(column.header())
                .ok_or_else(|| RegistryError::MissingColumn(column.header().to_string()))?;
            columns.insert(column, index);
        }

        Ok(Self {
            id: position(HEADER_ID),
            columns,
        })
    }

    fn record(&self, row: &StringRecord) -> Record {
        let mut record = Record {
            id: self.id.and_then(|i| row.get(i)).and_then(parse_text).map(|s| s.trim().to_string()),
            ..Default::default()
        };
        for (column, index) in &self.columns {
            record.set_raw(*column, row.get(*index));
        }
        record
    }
}

/// Read the registry CSV into a typed table, ignoring non-pertinent columns.
///
/// Missing file, unreadable file and rows with the wrong number of fields are
/// fatal. Cells that fail to coerce become missing.
#[instrument(skip(path, patches), fields(file = %path.as_ref().display()))]
pub fn load_formatted_data<P: AsRef<Path>>(path: P, patches: &[DataPatch]) -> Result<Table<Record>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RegistryError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)?;

    let header_index = HeaderIndex::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push(header_index.record(&row));
    }

    let mut table = Table::new(rows);
    let applied = apply_patches(&mut table, patches);

    LoaderMetrics::record_rows_loaded(table.len());
    info!(rows = table.len(), patches_applied = applied, "Loaded registry data");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "gid,nom,lat_coor1,long_coor1,adr_num,adr_voie,com_cp,com_nom,tel1,freq_mnt,dermnt";

    fn write_csv(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn test_parse_text_missing_markers() {
        assert_eq!(parse_text(""), None);
        assert_eq!(parse_text(" "), None);
        assert_eq!(parse_text("NaN"), None);
        assert_eq!(parse_text("Mairie"), Some("Mairie".to_string()));
        // Dash is only missing for coordinates
        assert_eq!(parse_text("-"), Some("-".to_string()));
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("43.6108"), Some(43.6108));
        assert_eq!(parse_coordinate(" 3.8767 "), Some(3.8767));
        assert_eq!(parse_coordinate("-"), None);
        assert_eq!(parse_coordinate("-3.5"), Some(-3.5));
        assert_eq!(parse_coordinate("pas de gps"), None);
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate("inf"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 5, 12);
        assert_eq!(parse_date("2021-05-12"), expected);
        assert_eq!(parse_date("12/05/2021"), expected);
        assert_eq!(parse_date("2021/05/12"), expected);
        assert_eq!(parse_date("2021-05-12T08:30:00"), expected);
        assert_eq!(parse_date("2021-05-12T08:30:00+02:00"), expected);
        assert_eq!(parse_date("tous les ans"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_load_selects_columns_by_header() {
        let file = write_csv(
            "1,Mairie,43.61,3.87,1,place Georges Frêche,34000,Montpellier,04 67 34 70 00,annuelle,2021-05-12\n",
        );
        let table = load_formatted_data(file.path(), &[]).unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.id.as_deref(), Some("1"));
        assert_eq!(row.name.as_deref(), Some("Mairie"));
        assert_eq!(row.latitude, Some(43.61));
        assert_eq!(row.street_name.as_deref(), Some("place Georges Frêche"));
        assert_eq!(row.last_maintenance_date, NaiveDate::from_ymd_opt(2021, 5, 12));
    }

    #[test]
    fn test_load_rejects_wrong_field_count() {
        let file = write_csv("1,Mairie,43.61\n");
        let result = load_formatted_data(file.path(), &[]);
        assert!(matches!(result, Err(RegistryError::Csv(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_formatted_data("does/not/exist.csv", &[]);
        assert!(matches!(result, Err(RegistryError::FileNotFound(_))));
    }

    #[test]
    fn test_load_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "nom,lat_coor1").unwrap();
        writeln!(file, "Mairie,43.6").unwrap();

        let result = load_formatted_data(file.path(), &[]);
        match result {
            Err(RegistryError::MissingColumn(name)) => assert_eq!(name, "long_coor1"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }
}
