//! Directory validation: resource setup, progress display, and report output.

use std::path::PathBuf;
use std::time::Instant;

use diskpass_core::{
    BatchEvent, BatchOrchestrator, BatchSettings, BatchSummary, CommandViewer, Config,
    ScreenshotViewer,
};
use indicatif::{ProgressBar, ProgressStyle};

/// Arguments for validating one directory.
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    /// Directory holding the disk images
    pub directory: PathBuf,
    /// Skip opening screenshots
    pub no_viewer: bool,
}

/// Validate a directory and print both reports to stdout.
pub fn execute(args: ValidateArgs, config: &Config) -> anyhow::Result<()> {
    let viewer = build_viewer(&config.batch, args.no_viewer);
    let orchestrator = BatchOrchestrator::from_config(config, viewer)?;

    let start_time = Instant::now();
    let mut progress: Option<ProgressBar> = None;
    let outcome = orchestrator.validate_directory_with_progress(&args.directory, &mut |event| {
        match event {
            BatchEvent::Discovered { total } => {
                progress = Some(create_progress_bar(total as u64));
            }
            BatchEvent::Processing { image, .. } => {
                if let Some(pb) = &progress {
                    pb.set_message(image.stem());
                }
            }
            BatchEvent::Processed { result, .. } => {
                if let Some(pb) = &progress {
                    if !result.is_ok() {
                        pb.println(format!("  {} {}", result.code, result.image.file_name()));
                    }
                    pb.inc(1);
                }
            }
            BatchEvent::AnomalyReport { report, .. } => {
                if let Some(pb) = progress.take() {
                    pb.finish_and_clear();
                }
                // Duplicate detection may still fail after this point.
                println!("{report}");
            }
        }
    });
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let summary = outcome?;

    println!("{}", summary.duplicate_report);

    print_summary(&summary, start_time.elapsed());
    Ok(())
}

/// Pick the screenshot viewer, if any.
fn build_viewer(batch: &BatchSettings, no_viewer: bool) -> Option<Box<dyn ScreenshotViewer>> {
    if no_viewer {
        return None;
    }
    batch
        .viewer()
        .map(|program| Box::new(CommandViewer::new(program)) as Box<dyn ScreenshotViewer>)
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the batch.
fn print_summary(summary: &BatchSummary, elapsed: std::time::Duration) {
    let processed = summary.results.len();
    let anomalies = summary.anomaly_count();

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Processed:    {:>8}", processed);
    eprintln!("    Clean:        {:>8}", processed - anomalies);
    if anomalies > 0 {
        eprintln!(
            "    Anomalies:    {:>8}",
            console::style(anomalies).yellow().for_stderr()
        );
    }
    if !summary.duplicates.is_empty() {
        eprintln!(
            "    Dup. groups:  {:>8}",
            console::style(summary.duplicates.len()).yellow().for_stderr()
        );
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Reports:      {}", summary.validation_dir.display());
    eprintln!("  ====================================");
}
