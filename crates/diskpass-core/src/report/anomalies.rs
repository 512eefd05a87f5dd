//! Processing anomaly aggregation and the anomaly report.

use crate::types::{AnomalyGroup, ProcessingResult};

use super::multimap::OrderedMultiMap;

/// Report written when every image read cleanly.
///
/// Replaces the header-only report rather than repeating the header with
/// no groups under it.
pub const NO_ANOMALIES_REPORT: &str = "No processing anomalies\n\n";

const ANOMALY_REPORT_HEADER: &str = "Processing anomaly report\n\n";

/// Groups processed images by their non-success result code.
pub struct AnomalyAggregator;

impl AnomalyAggregator {
    /// Collect source file names under each non-`OK` code.
    ///
    /// Groups are ordered by code and members sorted by name, so the report
    /// does not depend on processing order.
    pub fn aggregate(results: &[ProcessingResult]) -> Vec<AnomalyGroup> {
        let mut by_code = OrderedMultiMap::new();
        for result in results.iter().filter(|r| !r.is_ok()) {
            by_code.insert_or_append(result.code.clone(), result.image.file_name());
        }

        let mut groups: Vec<AnomalyGroup> = by_code
            .into_iter()
            .map(|(code, mut images)| {
                images.sort();
                AnomalyGroup { code, images }
            })
            .collect();
        groups.sort_by(|a, b| a.code.cmp(&b.code));
        groups
    }
}

/// Render anomaly groups as the plain-text report.
pub fn format_anomaly_report(groups: &[AnomalyGroup]) -> String {
    if groups.is_empty() {
        return NO_ANOMALIES_REPORT.to_string();
    }

    let mut report = String::from(ANOMALY_REPORT_HEADER);
    for group in groups {
        report.push_str(&group.code);
        report.push('\n');
        for image in &group.images {
            report.push_str("  ");
            report.push_str(image);
            report.push('\n');
        }
        report.push('\n');
    }
    report
}
