//! Error types for facility lookup and availability
//!
//! This module contains the error type returned by the registry and by
//! facility availability queries.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Why a requested date could not be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The facility is not open on that weekday
    Closed,
    /// Every slot on that date is taken
    Full,
    /// The date is a holiday
    Holiday,
    /// Best-effort scan found nothing within the horizon
    HorizonExceeded {
        /// Days scanned past the requested date
        days: u32,
    },
    /// Nothing open inside the appointment window
    OutsideWindow,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Closed => write!(f, "facility is closed on that day"),
            UnavailableReason::Full => write!(f, "all slots are taken"),
            UnavailableReason::Holiday => write!(f, "date is a holiday"),
            UnavailableReason::HorizonExceeded { days } => {
                write!(f, "no open slot within {} days", days)
            }
            UnavailableReason::OutsideWindow => {
                write!(f, "no open slot inside the appointment window")
            }
        }
    }
}

/// Errors that can occur while configuring or querying facilities
#[derive(Debug, Error)]
pub enum FacilityError {
    /// A definition or holiday calendar is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No facility with that name is configured
    #[error("Facility '{name}' does not exist. Expected one of {available:?}.")]
    NotFound {
        /// The requested name
        name: String,
        /// Names of all configured facilities
        available: Vec<String>,
    },

    /// No open slot could be found under the facility's policy
    #[error("No available slot at '{facility}' for {requested}: {reason}")]
    NoAvailableSlot {
        /// Facility name
        facility: String,
        /// The date that was asked for
        requested: NaiveDate,
        /// What blocked the request
        reason: UnavailableReason,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Holiday CSV error
    #[error("Holiday file error: {0}")]
    Csv(#[from] csv::Error),
}

impl FacilityError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// A caller can retry an unavailable slot with another date or facility;
    /// configuration problems need a fix before anything works.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FacilityError::Configuration(_) => false,
            FacilityError::NotFound { .. } => true,
            FacilityError::NoAvailableSlot { .. } => true,
            FacilityError::Io(_) => false,
            FacilityError::Csv(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            FacilityError::Configuration(_) => "Configuration",
            FacilityError::NotFound { .. } => "Lookup",
            FacilityError::NoAvailableSlot { .. } => "Availability",
            FacilityError::Io(_) => "IO",
            FacilityError::Csv(_) => "Holiday File",
        }
    }
}

/// Result type for facility operations
pub type FacilityResult<T> = Result<T, FacilityError>;
