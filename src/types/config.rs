//! Configuration structures for the clinic facility registry
//!
//! This module contains the facility configuration structure, the raw
//! definition form read from configuration files, CLI arguments, and the
//! validation logic applied before a registry is built.

use super::Weekday;
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Scheduling limits and built-in values
pub mod limits {
    /// Days scanned forward by a best-effort facility before giving up
    pub const DEFAULT_HORIZON_DAYS: u32 = 28;

    /// Largest accepted best-effort horizon (one leap year)
    pub const MAX_HORIZON_DAYS: u32 = 366;

    /// Per-day capacity of the built-in clinic definitions
    pub const DEFAULT_DAILY_SLOTS: u32 = 100;
}

/// A facility definition as written in configuration, before validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefinitionConfig {
    /// Weekdays the facility is open
    pub days: Vec<Weekday>,
    /// Appointment capacity for each open day, same order as `days`
    pub slots: Vec<u32>,
    /// Round forward to the next open day instead of failing
    #[serde(default, alias = "best_effort")]
    pub best_effort_available_datetime: bool,
}

impl DefinitionConfig {
    /// Create a definition that fails when the requested day is unavailable
    pub fn new(days: Vec<Weekday>, slots: Vec<u32>) -> Self {
        Self { days, slots, best_effort_available_datetime: false }
    }

    /// Enable best-effort date resolution
    pub fn best_effort(mut self) -> Self {
        self.best_effort_available_datetime = true;
        self
    }
}

/// A single holiday in configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HolidayEntry {
    /// Calendar date (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Human-readable name of the holiday
    #[serde(default)]
    pub label: String,
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "clinic-facility",
    version = "0.1.0",
    about = "Clinic Facility - Weekly clinic schedules and appointment availability",
    long_about = "Loads named clinic facility definitions (open weekdays and per-day slot capacity), runs configuration checks, and answers availability queries.

EXAMPLES:
    # List the built-in facilities
    clinic-facility --list

    # Use a configuration file
    clinic-facility --config facilities.json --list

    # Find the best available date at a facility
    clinic-facility --facility 3-day-clinic --date 2024-01-08

    # Book three slots in a row
    clinic-facility --facility 5-day-clinic --date 2024-01-08 --book 3

    # Run configuration checks only
    clinic-facility --config facilities.json --check

    # Generate configuration template
    clinic-facility --print-config > facilities.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Do not warn when the built-in definitions are in use
    #[arg(long, help = "Silence the warning about built-in facility definitions")]
    pub use_defaults_silently: bool,

    /// Best-effort scan horizon in days
    #[arg(
        long,
        help = "Best-effort scan horizon in days",
        long_help = "How many days past the requested date a best-effort facility searches for an open slot. Range: 1-366. Default: 28"
    )]
    pub horizon_days: Option<u32>,

    /// Holiday calendar CSV file
    #[arg(
        long,
        help = "Holiday calendar CSV file",
        long_help = "CSV file with a `local_date,label` header listing dates on which facilities are closed."
    )]
    pub holiday_file: Option<String>,

    /// Allow appointments on holidays
    #[arg(long, help = "Allow appointments on holidays")]
    pub schedule_on_holidays: bool,

    /// Facility to query
    #[arg(short, long, help = "Facility name to query")]
    pub facility: Option<String>,

    /// Requested appointment date
    #[arg(long, help = "Requested date (YYYY-MM-DD)")]
    pub date: Option<String>,

    /// Number of slots to book starting at the requested date
    #[arg(long, help = "Book this many slots starting at the requested date")]
    pub book: Option<u32>,

    /// List the loaded facilities and exit
    #[arg(long, help = "List loaded facilities and exit")]
    pub list: bool,

    /// Run configuration checks and exit
    #[arg(long, help = "Run configuration checks and exit")]
    pub check: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without answering queries
    #[arg(long, help = "Validate configuration without answering queries")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

impl CliArgs {
    /// Parse the `--date` argument, if given
    pub fn requested_date(&self) -> Result<Option<NaiveDate>, ConfigError> {
        self.date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| ConfigError::InvalidDate(format!("{}: {}", raw, e)))
            })
            .transpose()
    }
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Facility definitions keyed by name
    pub definitions: Option<BTreeMap<String, DefinitionConfig>>,

    /// Silence the built-in definitions warning
    pub use_defaults_silently: Option<bool>,

    /// Best-effort scan horizon in days
    pub best_effort_horizon_days: Option<u32>,

    /// Allow appointments on holidays
    pub schedule_on_holidays: Option<bool>,

    /// Holidays listed inline
    pub holidays: Option<Vec<HolidayEntry>>,

    /// Holiday calendar CSV file
    pub holiday_file: Option<String>,
}

/// Configuration for the facility registry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacilityConfig {
    /// Facility definitions keyed by name; `None` (or empty) selects the built-in clinics
    pub definitions: Option<BTreeMap<String, DefinitionConfig>>,

    /// Do not warn when the built-in definitions are in use
    pub use_defaults_silently: bool,

    /// Days scanned forward by best-effort facilities
    pub best_effort_horizon_days: u32,

    /// Allow appointments on holidays
    pub schedule_on_holidays: bool,

    /// Holidays listed inline
    pub holidays: Vec<HolidayEntry>,

    /// Holiday calendar CSV file, merged with `holidays`
    pub holiday_file: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A date argument could not be parsed
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

/// Validation errors for facility configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Best-effort horizon is out of range
    #[error("Best-effort horizon must be between 1 and {max} days, got {value}")]
    InvalidHorizon {
        /// The configured horizon
        value: u32,
        /// The largest accepted horizon
        max: u32,
    },

    /// Holiday file does not exist
    #[error("Holiday file not found: {0}")]
    HolidayFileNotFound(String),
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            definitions: None,
            use_defaults_silently: false,
            best_effort_horizon_days: limits::DEFAULT_HORIZON_DAYS,
            schedule_on_holidays: false,
            holidays: Vec::new(),
            holiday_file: None,
        }
    }
}

impl FacilityConfig {
    /// Configuration with explicit definitions and otherwise default settings
    pub fn with_definitions(definitions: BTreeMap<String, DefinitionConfig>) -> Self {
        Self { definitions: Some(definitions), ..Self::default() }
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            definitions: config_file.definitions.or(defaults.definitions),
            use_defaults_silently: config_file
                .use_defaults_silently
                .unwrap_or(defaults.use_defaults_silently),
            best_effort_horizon_days: config_file
                .best_effort_horizon_days
                .unwrap_or(defaults.best_effort_horizon_days),
            schedule_on_holidays: config_file
                .schedule_on_holidays
                .unwrap_or(defaults.schedule_on_holidays),
            holidays: config_file.holidays.unwrap_or(defaults.holidays),
            holiday_file: config_file.holiday_file.or(defaults.holiday_file),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if args.use_defaults_silently {
            config.use_defaults_silently = true;
        }
        if let Some(value) = args.horizon_days {
            config.best_effort_horizon_days = value;
        }
        if let Some(value) = args.holiday_file {
            config.holiday_file = Some(value);
        }
        if args.schedule_on_holidays {
            config.schedule_on_holidays = true;
        }
    }

    /// Whether explicit definitions were supplied
    ///
    /// An empty mapping counts as not configured.
    pub fn has_definitions(&self) -> bool {
        self.definitions.as_ref().is_some_and(|defs| !defs.is_empty())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    ///
    /// Facility definitions are validated when the registry is built.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.best_effort_horizon_days == 0
            || self.best_effort_horizon_days > limits::MAX_HORIZON_DAYS
        {
            return Err(ConfigValidationError::InvalidHorizon {
                value: self.best_effort_horizon_days,
                max: limits::MAX_HORIZON_DAYS,
            });
        }

        if let Some(path) = &self.holiday_file {
            if !Path::new(path).exists() {
                return Err(ConfigValidationError::HolidayFileNotFound(path.clone()));
            }
        }

        Ok(())
    }
}
