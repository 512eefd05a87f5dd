//! Content-based duplicate detection over staged disks.

use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::Hasher;
use crate::types::{file_name_of, DuplicateGroup};

use super::multimap::OrderedMultiMap;

/// Report written when every staged disk is unique.
pub const NO_DUPLICATES_REPORT: &str = "No duplicate images\n\n";

const DUPLICATE_REPORT_HEADER: &str = "Duplicate image report\n\n";

/// Finds staged disks with byte-identical contents.
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Group file names by content digest, keeping groups of two or more.
    ///
    /// Members are sorted in reverse order and groups in forward order by
    /// their members. A file that cannot be hashed aborts detection.
    pub fn find_duplicates(paths: &[PathBuf]) -> PipelineResult<Vec<DuplicateGroup>> {
        let mut by_digest = OrderedMultiMap::new();
        for path in paths {
            let digest = Hasher::content_hash(path).map_err(|source| PipelineError::Hash {
                path: path.clone(),
                source,
            })?;
            by_digest.insert_or_append(digest, file_name_of(path));
        }

        let mut groups: Vec<DuplicateGroup> = by_digest
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(_, mut files)| {
                files.sort_by(|a, b| b.cmp(a));
                DuplicateGroup { files }
            })
            .collect();
        groups.sort();

        tracing::debug!(
            "Hashed {} staged disk(s), {} duplicate group(s)",
            paths.len(),
            groups.len()
        );
        Ok(groups)
    }
}

/// Render duplicate groups as the plain-text report.
pub fn format_duplicate_report(groups: &[DuplicateGroup]) -> String {
    if groups.is_empty() {
        return NO_DUPLICATES_REPORT.to_string();
    }

    let mut report = String::from(DUPLICATE_REPORT_HEADER);
    for group in groups {
        for file in &group.files {
            report.push_str(file);
            report.push('\n');
        }
        report.push('\n');
    }
    report
}
