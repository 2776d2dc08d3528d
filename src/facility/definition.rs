//! Validated facility definitions and the built-in clinic schedules
//!
//! A [`FacilityDefinition`] can only be built from a consistent schedule:
//! one slot count per open weekday, no weekday listed twice.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::types::{limits, DefinitionConfig, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the built-in clinic open every day
pub const SEVEN_DAY_CLINIC: &str = "7-day-clinic";
/// Name of the built-in clinic open Monday to Friday
pub const FIVE_DAY_CLINIC: &str = "5-day-clinic";
/// Name of the built-in clinic open Tuesday to Thursday
pub const THREE_DAY_CLINIC: &str = "3-day-clinic";

/// A weekly clinic schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityDefinition {
    name: String,
    days: Vec<Weekday>,
    slots: Vec<u32>,
    best_effort: bool,
}

impl FacilityDefinition {
    /// Create a definition, rejecting inconsistent schedules
    pub fn new(
        name: impl Into<String>,
        days: Vec<Weekday>,
        slots: Vec<u32>,
        best_effort: bool,
    ) -> FacilityResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(FacilityError::configuration_error("facility name must not be blank"));
        }
        if days.is_empty() {
            return Err(FacilityError::configuration_error(format!(
                "facility '{}' must be open on at least one day",
                name
            )));
        }
        if slots.len() != days.len() {
            return Err(FacilityError::configuration_error(format!(
                "facility '{}' lists {} days but {} slot counts",
                name,
                days.len(),
                slots.len()
            )));
        }
        if let Some(day) = first_duplicate(&days) {
            return Err(FacilityError::configuration_error(format!(
                "facility '{}' lists {} more than once",
                name, day
            )));
        }

        Ok(Self { name, days, slots, best_effort })
    }

    /// Build a definition from its configuration form
    pub fn from_config(name: &str, config: &DefinitionConfig) -> FacilityResult<Self> {
        Self::new(
            name,
            config.days.clone(),
            config.slots.clone(),
            config.best_effort_available_datetime,
        )
    }

    /// Facility name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open weekdays, in configured order
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Per-day capacity, aligned with [`days`](Self::days)
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    /// Whether unavailable requests round forward to the next open day
    pub fn best_effort(&self) -> bool {
        self.best_effort
    }

    /// Daily capacity on a weekday, `None` when closed
    pub fn capacity_for(&self, day: Weekday) -> Option<u32> {
        self.days.iter().position(|d| *d == day).map(|idx| self.slots[idx])
    }

    /// Total slots offered per week
    pub fn weekly_capacity(&self) -> u64 {
        self.slots.iter().map(|slots| u64::from(*slots)).sum()
    }

    /// Convert back to the configuration form
    pub fn to_config(&self) -> DefinitionConfig {
        DefinitionConfig {
            days: self.days.clone(),
            slots: self.slots.clone(),
            best_effort_available_datetime: self.best_effort,
        }
    }
}

impl fmt::Display for FacilityDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<&str> = self.days.iter().map(Weekday::code).collect();
        write!(f, "{}: {} slots={:?}", self.name, days.join(","), self.slots)?;
        if self.best_effort {
            write!(f, " best-effort")?;
        }
        Ok(())
    }
}

fn first_duplicate(days: &[Weekday]) -> Option<Weekday> {
    let mut seen = [false; 7];
    for day in days {
        if seen[day.index()] {
            return Some(*day);
        }
        seen[day.index()] = true;
    }
    None
}

/// The built-in clinic schedules used when nothing is configured
pub fn default_definitions() -> BTreeMap<String, DefinitionConfig> {
    let slots = |n: usize| vec![limits::DEFAULT_DAILY_SLOTS; n];

    let mut definitions = BTreeMap::new();
    definitions.insert(
        SEVEN_DAY_CLINIC.to_string(),
        DefinitionConfig::new(Weekday::ALL.to_vec(), slots(7)),
    );
    definitions.insert(
        FIVE_DAY_CLINIC.to_string(),
        DefinitionConfig::new(Weekday::WORKWEEK.to_vec(), slots(5)),
    );
    definitions.insert(
        THREE_DAY_CLINIC.to_string(),
        DefinitionConfig::new(
            vec![Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday],
            slots(3),
        )
        .best_effort(),
    );
    definitions
}
