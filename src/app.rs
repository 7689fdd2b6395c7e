//! Application orchestrator.
//! Loads settings, initializes logging, installs the interrupt handler,
//! loads the manifest, runs one command and saves the manifest if it changed.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use linksym::cli::{Args, Command};
use linksym::output as out;
use linksym::{Decision, LinksymError, Manifest, commands, load_settings, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let mut settings = load_settings()?.unwrap_or_default();
    args.apply_overrides(&mut settings);

    let guard_opt = init_tracing(settings.log_level, settings.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current step...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install interrupt handler")?;
    }

    debug!(?args, ?settings, "Starting linksym");

    let result = std::env::current_dir()
        .context("determine current directory")
        .and_then(|cwd| {
            let manifest_path = args.manifest_path(&cwd);
            execute(&args.command, &cwd, &manifest_path)
        });

    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn execute(command: &Command, cwd: &Path, manifest_path: &Path) -> Result<()> {
    let mut manifest = match command {
        Command::Init => {
            commands::init(cwd, manifest_path)?;
            out::print_success(&format!(
                "Initialised {} managing {}",
                manifest_path.display(),
                cwd.display()
            ));
            return Ok(());
        }
        _ => Manifest::load(manifest_path)?,
    };
    let pristine = manifest.clone();

    match command {
        Command::Init => {}
        Command::Add {
            source,
            destination,
            dry_run,
        } => {
            let decision = commands::add(&mut manifest, source, destination.as_deref(), *dry_run)?;
            report_add(&decision, *dry_run);
        }
        Command::Remove { path, dry_run } => {
            let record = commands::remove(&mut manifest, path, *dry_run)?;
            if *dry_run {
                out::print_info(&format!(
                    "Dry run: would restore '{}' from '{}'",
                    record.source_path.display(),
                    record.destination_path.display()
                ));
            } else {
                out::print_success(&format!(
                    "Restored '{}' and removed record {}",
                    record.source_path.display(),
                    record.name
                ));
            }
        }
        Command::Source => {
            let report = commands::source(&manifest)?;
            out::print_success(&format!(
                "{} linked, {} already in place",
                report.linked, report.skipped
            ));
            for (name, reason) in &report.failed {
                out::print_warn(&format!("{name}: {reason}"));
            }
            if !report.failed.is_empty() {
                bail!("{} record(s) could not be linked", report.failed.len());
            }
        }
        Command::Update => {
            let previous = commands::update(&mut manifest, cwd);
            out::print_success(&format!(
                "Managed directory moved from {} to {}",
                previous.display(),
                cwd.display()
            ));
        }
    }

    if manifest != pristine {
        manifest.save(manifest_path)?;
    }
    Ok(())
}

fn report_add(decision: &Decision, dry_run: bool) {
    if dry_run {
        out::print_info(&format!("Dry run: would {decision}"));
        return;
    }
    if let Some(t) = decision.transition() {
        out::print_success(&format!(
            "Linked '{}' -> '{}'",
            t.source.display(),
            t.destination.display()
        ));
    }
}

fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<LinksymError>() {
        Some(le) => error!(code = le.code(), kind = le.kind(), error = %le, "Command failed"),
        None => error!(error = %format!("{e:#}"), "Command failed"),
    }
}
