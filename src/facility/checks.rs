//! Configuration checks
//!
//! Pure functions a host runs during its own startup checks. Unlike
//! [`FacilityDefinition::new`](crate::facility::FacilityDefinition::new), they
//! never fail: every problem found is reported as an [`Issue`].

use crate::facility::holidays::Holidays;
use crate::types::{DefinitionConfig, FacilityConfig, IssueLevel, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Facility open on no day
pub const E_NO_DAYS: &str = "facility.E001";
/// Slot count differs from day count
pub const E_SLOT_MISMATCH: &str = "facility.E002";
/// Weekday listed twice
pub const E_DUPLICATE_DAY: &str = "facility.E003";
/// Blank facility name
pub const E_BLANK_NAME: &str = "facility.E004";
/// Every slot count is zero
pub const W_NO_CAPACITY: &str = "facility.W001";
/// No definitions configured
pub const W_DEFAULTS_IN_USE: &str = "facility.W002";
/// Holiday calendar is empty
pub const W_NO_HOLIDAYS: &str = "facility.W003";

/// A finding reported by a configuration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Stable check identifier, e.g. `facility.E002`
    pub id: &'static str,
    /// Severity
    pub level: IssueLevel,
    /// What is wrong
    pub message: String,
    /// How to fix it
    pub hint: Option<String>,
}

impl Issue {
    fn error(id: &'static str, message: String) -> Self {
        Self { id, level: IssueLevel::Error, message, hint: None }
    }

    fn warning(id: &'static str, message: String) -> Self {
        Self { id, level: IssueLevel::Warning, message, hint: None }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Whether this issue blocks loading the configuration
    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

/// Check facility definitions, warning when none are configured
pub fn validate_configuration(
    definitions: Option<&BTreeMap<String, DefinitionConfig>>,
) -> Vec<Issue> {
    validate_configuration_with(definitions, false)
}

/// Check facility definitions, optionally silencing the defaults warning
pub fn validate_configuration_with(
    definitions: Option<&BTreeMap<String, DefinitionConfig>>,
    use_defaults_silently: bool,
) -> Vec<Issue> {
    let definitions = match definitions {
        Some(defs) if !defs.is_empty() => defs,
        _ => {
            if use_defaults_silently {
                return Vec::new();
            }
            return vec![Issue::warning(
                W_DEFAULTS_IN_USE,
                "Facility definitions not defined. Using the built-in clinic definitions."
                    .to_string(),
            )
            .with_hint("Configure `definitions`, or set `use_defaults_silently` to true.")];
        }
    };

    let mut issues = Vec::new();
    for (name, definition) in definitions {
        check_definition(name, definition, &mut issues);
    }
    issues
}

fn check_definition(name: &str, definition: &DefinitionConfig, issues: &mut Vec<Issue>) {
    if name.trim().is_empty() {
        issues.push(Issue::error(E_BLANK_NAME, "A facility has a blank name.".to_string()));
    }

    if definition.days.is_empty() {
        issues.push(
            Issue::error(E_NO_DAYS, format!("Facility '{}' is not open on any day.", name))
                .with_hint("List at least one weekday in `days`."),
        );
    }

    if definition.slots.len() != definition.days.len() {
        issues.push(
            Issue::error(
                E_SLOT_MISMATCH,
                format!(
                    "Facility '{}' lists {} days but {} slot counts.",
                    name,
                    definition.days.len(),
                    definition.slots.len()
                ),
            )
            .with_hint("Give one slot count per open day, in the same order as `days`."),
        );
    }

    let mut seen: Vec<Weekday> = Vec::with_capacity(definition.days.len());
    for day in &definition.days {
        if seen.contains(day) {
            issues.push(Issue::error(
                E_DUPLICATE_DAY,
                format!("Facility '{}' lists {} more than once.", name, day),
            ));
        } else {
            seen.push(*day);
        }
    }

    if !definition.slots.is_empty() && definition.slots.iter().all(|s| *s == 0) {
        issues.push(Issue::warning(
            W_NO_CAPACITY,
            format!("Facility '{}' has no appointment slots on any day.", name),
        ));
    }
}

/// Check that a holiday calendar is loaded
pub fn holiday_check(holidays: &Holidays) -> Vec<Issue> {
    if holidays.is_empty() {
        vec![Issue::warning(
            W_NO_HOLIDAYS,
            "No holidays loaded. Appointments may be scheduled on public holidays.".to_string(),
        )
        .with_hint("Add `holidays` or a `holiday_file` to the configuration.")]
    } else {
        Vec::new()
    }
}

/// Run every configuration check
pub fn run_checks(config: &FacilityConfig, holidays: &Holidays) -> Vec<Issue> {
    let mut issues =
        validate_configuration_with(config.definitions.as_ref(), config.use_defaults_silently);
    issues.extend(holiday_check(holidays));
    issues
}

/// Whether any issue is an error
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}
