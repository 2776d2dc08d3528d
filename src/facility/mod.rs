//! Facility definitions, availability and lookup
//!
//! This module manages named clinic facilities: their weekly schedules, the
//! holiday calendar, availability resolution, and the registry that hands
//! them out by name.
//!
//! # Overview
//!
//! - **FacilityDefinition**: validated schedule (open weekdays, slots per day, best-effort flag)
//! - **Facility**: resolves requested dates to available dates and books slots
//! - **Holidays**: dates on which facilities do not schedule
//! - **FacilityRegistry**: name lookup over configured or built-in definitions
//! - **checks**: configuration checks for the host's startup phase
//!
//! # Usage Example
//!
//! ```rust
//! use clinic_facility::facility::*;
//! use chrono::NaiveDate;
//!
//! let registry = FacilityRegistry::with_defaults().unwrap();
//! let clinic = registry.get_facility("3-day-clinic").unwrap();
//!
//! // Monday rounds forward to Tuesday
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
//! let date = clinic.available_date(monday).unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
//! ```

pub mod checks;
pub mod definition;
pub mod error;
pub mod facility;
pub mod holidays;
pub mod registry;

pub use checks::{
    holiday_check, run_checks, validate_configuration, validate_configuration_with, Issue,
};
pub use definition::{
    default_definitions, FacilityDefinition, FIVE_DAY_CLINIC, SEVEN_DAY_CLINIC, THREE_DAY_CLINIC,
};
pub use error::{FacilityError, FacilityResult, UnavailableReason};
pub use facility::{AppointmentWindow, Booking, DayState, Facility};
pub use holidays::Holidays;
pub use registry::FacilityRegistry;
