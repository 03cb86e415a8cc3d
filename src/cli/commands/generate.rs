use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use post_stubs::{Config, GeneratorConfig, ScheduleSource, StubGenerator};

use crate::cli::utils::{format_elapsed, pluralize};

pub fn handle_generate(matches: &ArgMatches, config: &Config) -> Result<()> {
    let settings = apply_overrides(matches, config.generator.clone());
    let dry_run = matches.get_flag("dry-run");

    let source = ScheduleSource::from_arg(settings.input.as_ref());
    let text = source.read()?;

    info!(
        "Generating stubs from {} into {}",
        source,
        settings.posts_dir.display()
    );
    if dry_run {
        info!("Running in dry-run mode");
    }

    let generator = StubGenerator::from_config(&settings).with_dry_run(dry_run);
    let start_time = Instant::now();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = generator
        .generate(&text, &mut out)
        .with_context(|| format!("Failed to generate stubs from {}", source))?;

    info!(
        "Wrote {} in {}, skipped {}",
        pluralize(report.written.len(), "stub"),
        format_elapsed(start_time.elapsed()),
        pluralize(report.skipped_lines, "line")
    );

    if !report.is_success() {
        for failure in &report.failures {
            warn!("Line {}: {}", failure.line_number, failure.message);
        }
        anyhow::bail!(
            "{} could not be generated",
            pluralize(report.failures.len(), "stub")
        );
    }

    Ok(())
}

/// Command-line flags win over file and environment configuration
fn apply_overrides(matches: &ArgMatches, mut settings: GeneratorConfig) -> GeneratorConfig {
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        settings.input = Some(input.clone());
    }
    if let Some(posts_dir) = matches.get_one::<PathBuf>("posts-dir") {
        settings.posts_dir = posts_dir.clone();
    }
    if let Some(year) = matches.get_one::<i32>("year") {
        settings.year = *year;
    }
    if matches.get_flag("strict") {
        settings.strict = true;
    }
    if matches.get_flag("keep-going") {
        settings.keep_going = true;
    }
    if matches.get_flag("create-dir") {
        settings.create_posts_dir = true;
    }
    settings
}
