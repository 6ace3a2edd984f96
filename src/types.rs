use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::*;
use crate::pipeline::loader::{parse_coordinate, parse_date, parse_text};

/// Columns of the registry as loaded from the CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Latitude,
    Longitude,
    AddressNumber,
    StreetName,
    PostalCode,
    CityName,
    Phone,
    MaintenanceFrequency,
    LastMaintenanceDate,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Name,
        Column::Latitude,
        Column::Longitude,
        Column::AddressNumber,
        Column::StreetName,
        Column::PostalCode,
        Column::CityName,
        Column::Phone,
        Column::MaintenanceFrequency,
        Column::LastMaintenanceDate,
    ];

    /// Header of this column in the source CSV
    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => HEADER_NAME,
            Column::Latitude => HEADER_LATITUDE,
            Column::Longitude => HEADER_LONGITUDE,
            Column::AddressNumber => HEADER_ADDRESS_NUMBER,
            Column::StreetName => HEADER_STREET_NAME,
            Column::PostalCode => HEADER_POSTAL_CODE,
            Column::CityName => HEADER_CITY_NAME,
            Column::Phone => HEADER_PHONE,
            Column::MaintenanceFrequency => HEADER_MAINTENANCE_FREQUENCY,
            Column::LastMaintenanceDate => HEADER_LAST_MAINTENANCE_DATE,
        }
    }

    /// Field name used in the typed table
    pub fn name(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::AddressNumber => "address_number",
            Column::StreetName => "street_name",
            Column::PostalCode => "postal_code",
            Column::CityName => "city_name",
            Column::Phone => "phone",
            Column::MaintenanceFrequency => "maintenance_frequency",
            Column::LastMaintenanceDate => "last_maintenance_date",
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Latitude | Column::Longitude => ColumnType::Float,
            Column::LastMaintenanceDate => ColumnType::Date,
            _ => ColumnType::Text,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Float,
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Float => "float64",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

/// A row type with a fixed, ordered schema
pub trait TableRow {
    /// Column names and types in output order
    fn schema() -> Vec<(&'static str, ColumnType)>;

    /// Whether the cell at `index` in `schema()` order holds no value
    fn is_missing(&self, index: usize) -> bool;
}

/// One row of the registry after loading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable source identifier (`gid`), used to key data patches
    pub id: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_number: Option<String>,
    pub street_name: Option<String>,
    pub postal_code: Option<String>,
    pub city_name: Option<String>,
    pub phone: Option<String>,
    pub maintenance_frequency: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
}

impl Record {
    /// Mutable access to a text cell. `None` for numeric and date columns.
    pub fn text_mut(&mut self, column: Column) -> Option<&mut Option<String>> {
        match column {
            Column::Name => Some(&mut self.name),
            Column::AddressNumber => Some(&mut self.address_number),
            Column::StreetName => Some(&mut self.street_name),
            Column::PostalCode => Some(&mut self.postal_code),
            Column::CityName => Some(&mut self.city_name),
            Column::Phone => Some(&mut self.phone),
            Column::MaintenanceFrequency => Some(&mut self.maintenance_frequency),
            Column::Latitude | Column::Longitude | Column::LastMaintenanceDate => None,
        }
    }

    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => self.name.as_deref(),
            Column::AddressNumber => self.address_number.as_deref(),
            Column::StreetName => self.street_name.as_deref(),
            Column::PostalCode => self.postal_code.as_deref(),
            Column::CityName => self.city_name.as_deref(),
            Column::Phone => self.phone.as_deref(),
            Column::MaintenanceFrequency => self.maintenance_frequency.as_deref(),
            Column::Latitude | Column::Longitude | Column::LastMaintenanceDate => None,
        }
    }

    /// Overwrite a cell from raw text, applying the same coercion as the loader.
    pub fn set_raw(&mut self, column: Column, raw: Option<&str>) {
        match column {
            Column::Latitude => self.latitude = raw.and_then(parse_coordinate),
            Column::Longitude => self.longitude = raw.and_then(parse_coordinate),
            Column::LastMaintenanceDate => self.last_maintenance_date = raw.and_then(parse_date),
            text_column => {
                if let Some(cell) = self.text_mut(text_column) {
                    *cell = raw.and_then(parse_text);
                }
            }
        }
    }

    pub fn is_missing_column(&self, column: Column) -> bool {
        match column {
            Column::Latitude => self.latitude.is_none(),
            Column::Longitude => self.longitude.is_none(),
            Column::LastMaintenanceDate => self.last_maintenance_date.is_none(),
            text_column => self.text(text_column).is_none(),
        }
    }
}

impl TableRow for Record {
    fn schema() -> Vec<(&'static str, ColumnType)> {
        Column::ALL.iter().map(|c| (c.name(), c.column_type())).collect()
    }

    fn is_missing(&self, index: usize) -> bool {
        Column::ALL
            .get(index)
            .map(|c| self.is_missing_column(*c))
            .unwrap_or(true)
    }
}

/// One row of the registry after framing. Field order is the output schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub maintenance_frequency: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
}

impl TableRow for CleanRecord {
    fn schema() -> Vec<(&'static str, ColumnType)> {
        vec![
            ("name", ColumnType::Text),
            ("address", ColumnType::Text),
            ("latitude", ColumnType::Float),
            ("longitude", ColumnType::Float),
            ("phone", ColumnType::Text),
            ("maintenance_frequency", ColumnType::Text),
            ("last_maintenance_date", ColumnType::Date),
        ]
    }

    fn is_missing(&self, index: usize) -> bool {
        match index {
            0 => self.name.is_none(),
            1 => self.address.is_none(),
            2 => self.latitude.is_none(),
            3 => self.longitude.is_none(),
            4 => self.phone.is_none(),
            5 => self.maintenance_frequency.is_none(),
            6 => self.last_maintenance_date.is_none(),
            _ => true,
        }
    }
}

/// In-memory table: an ordered set of rows sharing one schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, R> {
        self.rows.iter_mut()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Build a new table by mapping every row
    pub fn map_rows<S, F>(self, f: F) -> Table<S>
    where
        F: FnMut(R) -> S,
    {
        Table::new(self.rows.into_iter().map(f).collect())
    }
}

impl<R: TableRow> Table<R> {
    pub fn schema(&self) -> Vec<(&'static str, ColumnType)> {
        R::schema()
    }

    /// Number of missing cells per column, in schema order
    pub fn missing_counts(&self) -> Vec<(&'static str, usize)> {
        R::schema()
            .into_iter()
            .enumerate()
            .map(|(index, (name, _))| {
                let missing = self.rows.iter().filter(|row| row.is_missing(index)).count();
                (name, missing)
            })
            .collect()
    }
}

impl Table<Record> {
    /// Apply a per-cell rule to one text column.
    ///
    /// Returns how many present cells the rule turned into missing ones.
    pub fn transform<F>(&mut self, column: Column, rule: F) -> usize
    where
        F: Fn(Option<&str>) -> Option<String>,
    {
        let mut cleared = 0;
        for row in self.rows.iter_mut() {
            if let Some(cell) = row.text_mut(column) {
                let was_present = cell.is_some();
                let next = rule(cell.as_deref());
                if was_present && next.is_none() {
                    cleared += 1;
                }
                *cell = next;
            }
        }
        cleared
    }
}

impl<R> IntoIterator for Table<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
