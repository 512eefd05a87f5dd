//! Batch orchestration - stages, automates, and reports on a directory.

use std::path::Path;

use crate::config::{AutomationResources, BatchSettings, Config};
use crate::error::{PipelineError, PipelineResult, Result};
use crate::report::{
    format_anomaly_report, format_duplicate_report, write_report, AnomalyAggregator,
    DuplicateDetector, ANOMALY_REPORT_FILE, DUPLICATE_REPORT_FILE,
};
use crate::types::{BatchEvent, BatchSummary, ProcessingResult, StagedTarget};

use super::automation::{Automation, AutomationRequest, ScriptAutomation};
use super::discovery::FileDiscovery;
use super::stage::{ensure_dir, stage_target};
use super::viewer::ScreenshotViewer;

/// Runs every disk image in a directory through the automation, one at a time.
pub struct BatchOrchestrator {
    settings: BatchSettings,
    resources: AutomationResources,
    automation: Box<dyn Automation>,
    viewer: Option<Box<dyn ScreenshotViewer>>,
    discovery: FileDiscovery,
}

impl BatchOrchestrator {
    /// Create an orchestrator from resolved settings and collaborators.
    pub fn new(
        settings: BatchSettings,
        resources: AutomationResources,
        automation: Box<dyn Automation>,
        viewer: Option<Box<dyn ScreenshotViewer>>,
    ) -> Self {
        let discovery = FileDiscovery::new(settings.disk_image_extension.clone());
        Self {
            settings,
            resources,
            automation,
            viewer,
            discovery,
        }
    }

    /// Create an orchestrator that runs the configured automation script.
    ///
    /// Resolves every file resource first, so a bad config fails before
    /// any image is touched.
    pub fn from_config(
        config: &Config,
        viewer: Option<Box<dyn ScreenshotViewer>>,
    ) -> Result<Self> {
        let resources = AutomationResources::from_config(config)?;
        let automation = ScriptAutomation::new(
            config.batch.automation_interpreter.clone(),
            resources.automation_runner.clone(),
        );
        Ok(Self::new(
            config.batch.clone(),
            resources,
            Box::new(automation),
            viewer,
        ))
    }

    /// Validate every disk image directly inside `dir`.
    pub fn validate_directory(&self, dir: &Path) -> PipelineResult<BatchSummary> {
        self.validate_directory_with_progress(dir, &mut |_| {})
    }

    /// Validate a directory, reporting progress through `on_event`.
    ///
    /// Stops at the first fatal error. Staged disks from images processed
    /// before the failure stay in place. A failure while processing images
    /// writes no reports; a failure during duplicate detection comes after
    /// the anomaly report was written and announced.
    pub fn validate_directory_with_progress(
        &self,
        dir: &Path,
        on_event: &mut dyn FnMut(BatchEvent),
    ) -> PipelineResult<BatchSummary> {
        let base_dir = std::path::absolute(dir)
            .map_err(|_| PipelineError::NotADirectory(dir.to_path_buf()))?;
        if !base_dir.is_dir() {
            return Err(PipelineError::NotADirectory(base_dir));
        }

        let validation_dir = base_dir.join(&self.settings.validation_dir);
        ensure_dir(&validation_dir)?;

        let images = self.discovery.discover(&base_dir)?;
        tracing::info!("Found {} disk image(s) in {}", images.len(), base_dir.display());
        on_event(BatchEvent::Discovered {
            total: images.len(),
        });

        let mut results = Vec::with_capacity(images.len());
        let mut staged_disks = Vec::with_capacity(images.len());
        let mut screenshots = Vec::with_capacity(images.len());

        for (index, image) in images.into_iter().enumerate() {
            let target = StagedTarget::for_image(
                &image,
                &validation_dir,
                &self.settings.working_extension,
                &self.settings.screenshot_extension,
            );

            stage_target(&self.resources.blank_disk_image, &target.disk)?;

            tracing::info!("Processing image file: {}", image.stem());
            on_event(BatchEvent::Processing {
                index,
                image: image.clone(),
            });

            let request = AutomationRequest {
                source: image.path().to_path_buf(),
                target: target.disk.clone(),
                screenshot: target.screenshot.clone(),
                program: self.resources.validation_program.clone(),
            };
            let code = self
                .automation
                .run(&request)?
                .into_result_code(image.path())?;

            let result = ProcessingResult::new(image, code);
            if !result.is_ok() {
                tracing::warn!("{}: {}", result.image.file_name(), result.code);
            }
            on_event(BatchEvent::Processed {
                index,
                result: result.clone(),
            });

            staged_disks.push(target.disk);
            screenshots.push(target.screenshot);
            results.push(result);
        }

        let anomalies = AnomalyAggregator::aggregate(&results);
        let anomaly_report = format_anomaly_report(&anomalies);
        let anomaly_report_path =
            write_report(&validation_dir, ANOMALY_REPORT_FILE, &anomaly_report)?;
        on_event(BatchEvent::AnomalyReport {
            report: anomaly_report.clone(),
            path: anomaly_report_path.clone(),
        });

        if let Some(viewer) = &self.viewer {
            viewer.open(&screenshots);
        }

        let duplicates = DuplicateDetector::find_duplicates(&staged_disks)?;
        let duplicate_report = format_duplicate_report(&duplicates);
        let duplicate_report_path =
            write_report(&validation_dir, DUPLICATE_REPORT_FILE, &duplicate_report)?;

        tracing::info!(
            "Validated {} image(s): {} anomaly group(s), {} duplicate group(s)",
            results.len(),
            anomalies.len(),
            duplicates.len()
        );

        Ok(BatchSummary {
            validation_dir,
            results,
            anomalies,
            duplicates,
            anomaly_report,
            duplicate_report,
            anomaly_report_path,
            duplicate_report_path,
        })
    }
}
