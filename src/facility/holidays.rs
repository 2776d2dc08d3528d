//! Holiday calendar
//!
//! Facilities do not schedule appointments on holidays unless the registry is
//! configured to allow it. Holidays come from configuration entries or from a
//! CSV file with a `local_date,label` header.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::types::HolidayEntry;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Dates on which facilities are closed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Holidays {
    dates: BTreeMap<NaiveDate, String>,
}

#[derive(Debug, Deserialize)]
struct HolidayRow {
    local_date: String,
    #[serde(default)]
    label: String,
}

impl Holidays {
    /// Create an empty calendar
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a calendar from configuration entries
    pub fn from_entries(entries: &[HolidayEntry]) -> Self {
        let mut holidays = Self::new();
        for entry in entries {
            holidays.insert(entry.date, entry.label.clone());
        }
        holidays
    }

    /// Load a calendar from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> FacilityResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let holidays = Self::from_csv_reader(BufReader::new(file))?;

        info!("Loaded {} holidays from {}", holidays.len(), path.display());
        Ok(holidays)
    }

    /// Load a calendar from CSV data
    pub fn from_csv_reader<R: Read>(reader: R) -> FacilityResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut holidays = Self::new();
        for (line, result) in reader.deserialize::<HolidayRow>().enumerate() {
            let row = result?;
            let date = NaiveDate::parse_from_str(&row.local_date, "%Y-%m-%d").map_err(|e| {
                // +2: header line and 1-based numbering
                FacilityError::configuration_error(format!(
                    "holiday file line {}: invalid date '{}': {}",
                    line + 2,
                    row.local_date,
                    e
                ))
            })?;
            holidays.insert(date, row.label);
        }

        debug!("Parsed {} holiday rows", holidays.len());
        Ok(holidays)
    }

    /// Add a holiday, replacing the label of an existing date
    pub fn insert(&mut self, date: NaiveDate, label: impl Into<String>) {
        self.dates.insert(date, label.into());
    }

    /// Merge another calendar into this one
    pub fn extend(&mut self, other: Holidays) {
        self.dates.extend(other.dates);
    }

    /// Whether the date is a holiday
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains_key(&date)
    }

    /// Label of a holiday, if the date is one
    pub fn label(&self, date: NaiveDate) -> Option<&str> {
        self.dates.get(&date).map(String::as_str)
    }

    /// Number of holidays
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no holidays are loaded
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.dates.iter().map(|(date, label)| (*date, label.as_str()))
    }
}
