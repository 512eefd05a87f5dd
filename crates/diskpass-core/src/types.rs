//! Core data types for the diskpass validation pipeline.
//!
//! Everything here is transient: rebuilt on every run from the target
//! directory and the automation's answers.

use std::path::{Path, PathBuf};

/// Result code the automation prints when an image read cleanly.
pub const SUCCESS_CODE: &str = "OK";

/// A source disk image discovered in the target directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceImage {
    path: PathBuf,
}

impl SourceImage {
    /// Wrap an (absolute) path to a discovered image.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including extension, e.g. `Choplifter.woz`.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    /// File name without extension; the base name of every validation artifact.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Paths of the artifacts produced for one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedTarget {
    /// Working disk the automation writes to
    pub disk: PathBuf,
    /// Screenshot the automation saves
    pub screenshot: PathBuf,
}

impl StagedTarget {
    /// Derive `<validation_dir>/<stem>.<ext>` paths for a source image.
    pub fn for_image(
        image: &SourceImage,
        validation_dir: &Path,
        working_extension: &str,
        screenshot_extension: &str,
    ) -> Self {
        let stem = image.stem();
        Self {
            disk: validation_dir.join(format!("{stem}.{working_extension}")),
            screenshot: validation_dir.join(format!("{stem}.{screenshot_extension}")),
        }
    }
}

/// The automation's verdict on one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub image: SourceImage,
    pub code: String,
}

impl ProcessingResult {
    pub fn new(image: SourceImage, code: impl Into<String>) -> Self {
        Self {
            image,
            code: code.into(),
        }
    }

    /// Whether the automation reported the success code.
    pub fn is_ok(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Source file names sharing one non-success result code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyGroup {
    /// Classification code reported by the automation
    pub code: String,
    /// Source file names, sorted
    pub images: Vec<String>,
}

/// Staged file names whose contents hash identically.
///
/// Members are sorted in reverse order; there are always at least two.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DuplicateGroup {
    pub files: Vec<String>,
}

/// Everything a completed batch produced.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Absolute path of the validation subdirectory
    pub validation_dir: PathBuf,
    /// Result per processed image, in processing order
    pub results: Vec<ProcessingResult>,
    pub anomalies: Vec<AnomalyGroup>,
    pub duplicates: Vec<DuplicateGroup>,
    pub anomaly_report: String,
    pub duplicate_report: String,
    pub anomaly_report_path: PathBuf,
    pub duplicate_report_path: PathBuf,
}

impl BatchSummary {
    /// Number of images whose result code was not the success code.
    pub fn anomaly_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_ok()).count()
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Discovery finished
    Discovered { total: usize },
    /// An image is about to be staged and handed to the automation
    Processing { index: usize, image: SourceImage },
    /// The automation returned a result code for an image
    Processed {
        index: usize,
        result: ProcessingResult,
    },
    /// The anomaly report was written; duplicate detection has not run yet
    AnomalyReport { report: String, path: PathBuf },
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_image_names() {
        let image = SourceImage::new("/disks/Lode Runner.woz");
        assert_eq!(image.file_name(), "Lode Runner.woz");
        assert_eq!(image.stem(), "Lode Runner");
    }

    #[test]
    fn test_staged_target_paths() {
        let image = SourceImage::new("/disks/Karateka.side1.woz");
        let target = StagedTarget::for_image(&image, Path::new("/disks/validation"), "dsk", "png");
        assert_eq!(target.disk, PathBuf::from("/disks/validation/Karateka.side1.dsk"));
        assert_eq!(
            target.screenshot,
            PathBuf::from("/disks/validation/Karateka.side1.png")
        );
    }

    #[test]
    fn test_processing_result_success() {
        let image = SourceImage::new("/disks/a.woz");
        assert!(ProcessingResult::new(image.clone(), "OK").is_ok());
        assert!(!ProcessingResult::new(image.clone(), "FRE").is_ok());
        assert!(!ProcessingResult::new(image, "ok").is_ok());
    }
}
