//! Clinic Facility
//!
//! Named clinic facility definitions (which weekdays are open and how many
//! appointment slots each day offers), looked up by name and queried for
//! appointment availability.
//!
//! # Overview
//!
//! A [`FacilityRegistry`] is built once from a [`FacilityConfig`]. When the
//! configuration carries no definitions, three built-in clinics are used and
//! a warning is logged unless `use_defaults_silently` is set:
//!
//! | name           | open          | slots/day | best effort |
//! |----------------|---------------|-----------|-------------|
//! | `7-day-clinic` | Mon - Sun     | 100       | no          |
//! | `5-day-clinic` | Mon - Fri     | 100       | no          |
//! | `3-day-clinic` | Tue, Wed, Thu | 100       | yes         |
//!
//! A [`Facility`] resolves a requested date to the best available date. A
//! best-effort facility rounds a closed or full day forward to the next open
//! day with capacity, within a bounded horizon; any other facility fails with
//! [`FacilityError::NoAvailableSlot`].
//!
//! ## Quick Start
//!
//! ```rust
//! use clinic_facility::*;
//! use chrono::NaiveDate;
//!
//! let config = FacilityConfig { use_defaults_silently: true, ..Default::default() };
//! let registry = FacilityRegistry::new(&config)?;
//!
//! let mut clinic = registry.get_facility("5-day-clinic")?;
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
//! let booking = clinic.book(monday)?;
//! assert_eq!(booking.remaining, 99);
//!
//! // Saturday is closed and the 5-day clinic does not round forward
//! let saturday = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
//! assert!(clinic.available_date(saturday).is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: weekday enum, identifiers, and configuration
//! - [`facility`]: definitions, availability, holidays, registry, and checks
//! - [`runtime`]: logging setup and the startup trace
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod facility;
pub mod runtime;
pub mod types;

// Configuration and core types
pub use types::{
    BookingId, CliArgs, ConfigError, ConfigValidationError, DefinitionConfig, FacilityConfig,
    HolidayEntry, IssueLevel, Weekday,
};

// Facilities and lookup
pub use facility::{
    default_definitions, holiday_check, run_checks, validate_configuration,
    validate_configuration_with, AppointmentWindow, Booking, DayState, Facility,
    FacilityDefinition, FacilityError, FacilityRegistry, FacilityResult, Holidays, Issue,
    UnavailableReason,
};

// Runtime support
pub use runtime::LoggingConfig;
