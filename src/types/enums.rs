//! Enumeration types for the clinic facility registry
//!
//! This module contains the weekday enumeration used by facility schedules
//! and the severity levels reported by configuration checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days of the week a facility can be open
///
/// Serialized as the two-letter codes `"MO"` .. `"SU"`; the three-letter and
/// full English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    #[serde(rename = "MO", alias = "Mon", alias = "Monday")]
    Monday,
    /// Tuesday
    #[serde(rename = "TU", alias = "Tue", alias = "Tuesday")]
    Tuesday,
    /// Wednesday
    #[serde(rename = "WE", alias = "Wed", alias = "Wednesday")]
    Wednesday,
    /// Thursday
    #[serde(rename = "TH", alias = "Thu", alias = "Thursday")]
    Thursday,
    /// Friday
    #[serde(rename = "FR", alias = "Fri", alias = "Friday")]
    Friday,
    /// Saturday
    #[serde(rename = "SA", alias = "Sat", alias = "Saturday")]
    Saturday,
    /// Sunday
    #[serde(rename = "SU", alias = "Sun", alias = "Sunday")]
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday through Friday
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Two-letter code, as written in configuration files
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }

    /// Zero-based index, Monday = 0
    pub fn index(&self) -> usize {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// The weekday of a calendar date
    pub fn of(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self::from(date.weekday())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mo" | "mon" | "monday" => Ok(Weekday::Monday),
            "tu" | "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "we" | "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "th" | "thu" | "thursday" => Ok(Weekday::Thursday),
            "fr" | "fri" | "friday" => Ok(Weekday::Friday),
            "sa" | "sat" | "saturday" => Ok(Weekday::Saturday),
            "su" | "sun" | "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Unknown weekday: {}", s)),
        }
    }
}

/// Severity of a configuration check finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueLevel {
    /// Advisory only, the registry still works
    Warning,
    /// The configuration cannot be loaded as written
    Error,
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLevel::Warning => write!(f, "Warning"),
            IssueLevel::Error => write!(f, "Error"),
        }
    }
}
