//! Post-batch reports.
//!
//! - **anomalies**: images whose result code was not `OK`, grouped by code
//! - **duplicates**: staged disks with identical contents
//! - **multimap**: the insertion-ordered grouping both builders share
//!
//! Report text is written verbatim to the validation directory, so the
//! exact newline layout is part of the output format.

pub mod anomalies;
pub mod duplicates;
pub mod multimap;

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

pub use anomalies::{format_anomaly_report, AnomalyAggregator, NO_ANOMALIES_REPORT};
pub use duplicates::{format_duplicate_report, DuplicateDetector, NO_DUPLICATES_REPORT};
pub use multimap::OrderedMultiMap;

/// File name of the anomaly report inside the validation directory.
pub const ANOMALY_REPORT_FILE: &str = "process_anomaly_report.txt";

/// File name of the duplicate report inside the validation directory.
pub const DUPLICATE_REPORT_FILE: &str = "duplicate_report.txt";

/// Write `report` to `dir/file_name`, replacing any previous report.
pub fn write_report(dir: &Path, file_name: &str, report: &str) -> PipelineResult<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, report).map_err(|source| PipelineError::Report {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}
