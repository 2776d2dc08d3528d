//! Facility registry and lookup by name
//!
//! This module contains the FacilityRegistry struct, which validates the
//! configured facility definitions once and hands out [`Facility`] values
//! built from them.

use crate::facility::definition::{default_definitions, FacilityDefinition};
use crate::facility::error::{FacilityError, FacilityResult};
use crate::facility::facility::Facility;
use crate::facility::holidays::Holidays;
use crate::types::FacilityConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Named facility definitions with lookup capabilities
#[derive(Debug, Clone)]
pub struct FacilityRegistry {
    /// Validated definitions keyed by facility name
    definitions: BTreeMap<String, FacilityDefinition>,
    /// Holiday calendar shared by every facility
    holidays: Arc<Holidays>,
    horizon_days: u32,
    schedule_on_holidays: bool,
    using_defaults: bool,
    advisory: Option<String>,
}

impl FacilityRegistry {
    /// Build a registry from configuration
    ///
    /// Explicit definitions replace the built-in clinics entirely. Every
    /// definition is validated here, so a broken schedule fails at startup
    /// rather than on the first query.
    pub fn new(config: &FacilityConfig) -> FacilityResult<Self> {
        config.validate().map_err(|e| FacilityError::configuration_error(e.to_string()))?;

        let using_defaults = !config.has_definitions();
        let source = if using_defaults {
            default_definitions()
        } else {
            config.definitions.clone().unwrap_or_default()
        };

        let mut definitions = BTreeMap::new();
        for (name, definition) in &source {
            let definition = FacilityDefinition::from_config(name, definition)?;
            debug!("Registered facility {}", definition);
            definitions.insert(name.clone(), definition);
        }

        let mut holidays = Holidays::from_entries(&config.holidays);
        if let Some(path) = &config.holiday_file {
            holidays.extend(Holidays::from_csv_path(path)?);
        }

        let advisory = (using_defaults && !config.use_defaults_silently)
            .then(|| defaults_advisory(definitions.keys()));
        if let Some(message) = &advisory {
            warn!("{}", message);
        }

        info!(
            "Facility registry loaded {} facilities ({} holidays, horizon {} days)",
            definitions.len(),
            holidays.len(),
            config.best_effort_horizon_days
        );

        Ok(Self {
            definitions,
            holidays: Arc::new(holidays),
            horizon_days: config.best_effort_horizon_days,
            schedule_on_holidays: config.schedule_on_holidays,
            using_defaults,
            advisory,
        })
    }

    /// Build a registry of the built-in clinics with default settings
    pub fn with_defaults() -> FacilityResult<Self> {
        Self::new(&FacilityConfig::default())
    }

    /// Get a facility by name
    pub fn get_facility(&self, name: &str) -> FacilityResult<Facility> {
        self.definitions
            .get(name)
            .map(|definition| self.build(definition))
            .ok_or_else(|| FacilityError::NotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// All facilities keyed by name, built fresh on every call
    pub fn facilities(&self) -> BTreeMap<String, Facility> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.clone(), self.build(definition)))
            .collect()
    }

    /// Get a definition by name
    pub fn definition(&self, name: &str) -> Option<&FacilityDefinition> {
        self.definitions.get(name)
    }

    /// Names of all facilities, sorted
    pub fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    /// Check if a facility exists in the registry
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Get total number of facilities
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry holds no facilities
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Whether the built-in clinics are in use
    pub fn using_defaults(&self) -> bool {
        self.using_defaults
    }

    /// The defaults warning, if one was issued
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// The shared holiday calendar
    pub fn holidays(&self) -> &Holidays {
        &self.holidays
    }

    /// Best-effort horizon given to every facility
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    fn build(&self, definition: &FacilityDefinition) -> Facility {
        Facility::new(definition.clone())
            .with_holidays(Arc::clone(&self.holidays))
            .with_horizon(self.horizon_days)
            .schedule_on_holidays(self.schedule_on_holidays)
    }
}

fn defaults_advisory<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let names: Vec<&str> = names.map(String::as_str).collect();
    format!(
        "Facility definitions not defined. Using the built-in definitions ({}). \
         To silence, set use_defaults_silently to true.",
        names.join(", ")
    )
}
