//! Startup trace and check reporting
//!
//! Human-readable output written when a host loads the registry. The format
//! is cosmetic and may change.

use crate::facility::{FacilityRegistry, Issue};
use std::io::{self, Write};
use tracing::{error, warn};

/// Display name used in the startup trace
pub const VERBOSE_NAME: &str = "Clinic Facility";

/// Write the list of loaded facilities
pub fn load_facilities<W: Write>(registry: &FacilityRegistry, out: &mut W) -> io::Result<()> {
    writeln!(out, "Loading {} ...", VERBOSE_NAME)?;
    for facility in registry.facilities().values() {
        writeln!(out, " * {}.", facility)?;
    }
    writeln!(out, " Done loading {}.", VERBOSE_NAME)?;
    Ok(())
}

/// Log check findings at their severity and write them to `out`
pub fn report_issues<W: Write>(issues: &[Issue], out: &mut W) -> io::Result<()> {
    for issue in issues {
        if issue.is_error() {
            error!(check = issue.id, "{}", issue.message);
        } else {
            warn!(check = issue.id, "{}", issue.message);
        }
        writeln!(out, "{} {}", issue.level, issue)?;
    }
    Ok(())
}
