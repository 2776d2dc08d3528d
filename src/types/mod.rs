//! Core types and configuration for the clinic facility registry
//!
//! # Overview
//!
//! - **Enums**: the [`Weekday`] schedule enumeration and check severity levels
//! - **Identifiers**: UUID-based booking identifiers
//! - **Configuration**: registry configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use clinic_facility::types::*;
//! use std::collections::BTreeMap;
//!
//! let mut definitions = BTreeMap::new();
//! definitions.insert(
//!     "weekend-clinic".to_string(),
//!     DefinitionConfig::new(vec![Weekday::Saturday, Weekday::Sunday], vec![20, 20]),
//! );
//!
//! let config = FacilityConfig {
//!     best_effort_horizon_days: 14,
//!     ..FacilityConfig::with_definitions(definitions)
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

pub use config::*;
pub use enums::*;
pub use identifiers::*;
