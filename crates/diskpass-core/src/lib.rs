//! Diskpass Core - batch validation of disk images through emulator automation.
//!
//! Given a directory of disk images, diskpass stages a blank working disk for
//! each one, has an external emulator automation read the image onto it, and
//! collects a result code and a screenshot. Two plain-text reports come out
//! of a run: images that did not read cleanly, and working disks whose
//! contents are byte-identical.
//!
//! # Architecture
//!
//! ```text
//! Discover → Stage blank disk → Automation (result code, screenshot) → Reports
//! ```
//!
//! Images are processed strictly one at a time: the automation drives a
//! single interactive emulator instance.
//!
//! # Usage
//!
//! ```rust,ignore
//! use diskpass_core::{BatchOrchestrator, Config};
//!
//! let config = Config::load(None)?;
//! let orchestrator = BatchOrchestrator::from_config(&config, None)?;
//! let summary = orchestrator.validate_directory("./disks".as_ref())?;
//! print!("{}", summary.anomaly_report);
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;

// Re-exports for convenient access
pub use config::{AutomationResources, BatchSettings, Config};
pub use error::{ConfigError, DiskpassError, PipelineError, PipelineResult, Result};
pub use pipeline::{
    Automation, BatchOrchestrator, CommandViewer, Hasher, ScreenshotViewer, ScriptAutomation,
};
pub use report::{AnomalyAggregator, DuplicateDetector};
pub use types::{
    AnomalyGroup, BatchEvent, BatchSummary, DuplicateGroup, ProcessingResult, SourceImage,
    StagedTarget, SUCCESS_CODE,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
