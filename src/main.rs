// Clinic Facility - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/clinic-facility --list
// ```
//
// Or query a facility:
//
// ```console
// $ ./target/release/clinic-facility --facility 3-day-clinic --date 2024-01-08 --verbose
// ```

use anyhow::{bail, Context};
use clap::Parser;
use clinic_facility::facility::checks::has_errors;
use clinic_facility::runtime::{load_facilities, report_issues, LoggingConfig};
use clinic_facility::types::config::CliArgs;
use clinic_facility::{run_checks, validate_configuration_with, FacilityConfig, FacilityRegistry};
use std::io::{self, Write};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match FacilityConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: warnings only, so the defaults advisory still shows
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    info!("Starting Clinic Facility");

    let config =
        FacilityConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    let mut stderr = io::stderr();

    if args.check || args.dry_run {
        // Report broken definitions as issues before the registry rejects them
        let issues = validate_configuration_with(config.definitions.as_ref(), true);
        if has_errors(&issues) {
            report_issues(&issues, &mut stderr)?;
            bail!("Configuration checks reported errors");
        }
    }

    let registry = FacilityRegistry::new(&config).context("Failed to build facility registry")?;
    load_facilities(&registry, &mut stderr)?;

    if args.check || args.dry_run {
        let issues = run_checks(&config, registry.holidays());
        report_issues(&issues, &mut stderr)?;
        eprintln!("Configuration checks passed ({} warnings).", issues.len());
        return Ok(());
    }

    let mut stdout = io::stdout().lock();

    if args.list {
        for (name, facility) in registry.facilities() {
            writeln!(stdout, "{}\t{}", name, facility)?;
        }
        return Ok(());
    }

    let Some(name) = args.facility.as_deref() else {
        return Ok(());
    };

    let requested = args
        .requested_date()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut facility = registry.get_facility(name)?;

    match args.book {
        Some(count) => {
            for _ in 0..count {
                let booking = facility.book(requested)?;
                writeln!(stdout, "{}", serde_json::to_string(&booking)?)?;
            }
        }
        None => {
            let date = facility.available_date(requested)?;
            writeln!(
                stdout,
                "{}\t{}\t{} slots free",
                facility.name(),
                date,
                facility.remaining_on(date)
            )?;
        }
    }

    info!("Clinic Facility completed successfully");
    Ok(())
}
