//! File discovery for finding disk images in a directory.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{PipelineError, PipelineResult};
use crate::types::SourceImage;

/// Discovers source disk images directly inside a directory.
pub struct FileDiscovery {
    extension: String,
}

impl FileDiscovery {
    /// Create a discovery instance for one image extension (without the dot).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Discover matching files at the top level of `dir` (no recursion).
    ///
    /// Results are sorted by path so runs are reproducible regardless of
    /// the order the filesystem returns entries in.
    pub fn discover(&self, dir: &Path) -> PipelineResult<Vec<SourceImage>> {
        let mut images = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| PipelineError::Discovery {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if path.is_file() && self.is_supported(path) {
                images.push(SourceImage::new(path));
            }
        }

        images.sort();
        tracing::debug!(
            "Discovered {} *.{} image(s) in {}",
            images.len(),
            self.extension,
            dir.display()
        );
        Ok(images)
    }

    /// Check if a file has exactly the configured extension.
    ///
    /// Case-sensitive: `game.woz` and `game.WOZ` would otherwise share one
    /// staged disk, since staged paths are derived from the stem.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == self.extension)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new("woz");

        assert!(discovery.is_supported(Path::new("game.woz")));
        assert!(discovery.is_supported(Path::new("GAME.woz")));
        assert!(!discovery.is_supported(Path::new("game.WOZ")));
        assert!(!discovery.is_supported(Path::new("game.dsk")));
        assert!(!discovery.is_supported(Path::new("game.woz.txt")));
        assert!(!discovery.is_supported(Path::new("woz")));
    }

    #[test]
    fn test_discover_top_level_only_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zork.woz", "Aztec.woz", "readme.txt", "blank.dsk"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let nested = dir.path().join("validation");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("nested.woz"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("folder.woz")).unwrap();

        let images = FileDiscovery::new("woz").discover(dir.path()).unwrap();
        let names: Vec<String> = images.iter().map(SourceImage::file_name).collect();
        assert_eq!(names, vec!["Aztec.woz", "zork.woz"]);
    }

    #[test]
    fn test_discover_skips_other_case_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("game.woz"), b"one").unwrap();
        // Case-insensitive filesystems fold this onto game.woz.
        if !dir.path().join("game.WOZ").exists() {
            std::fs::write(dir.path().join("game.WOZ"), b"two").unwrap();
        }

        let images = FileDiscovery::new("woz").discover(dir.path()).unwrap();
        let names: Vec<String> = images.iter().map(SourceImage::file_name).collect();
        assert_eq!(names, vec!["game.woz"]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileDiscovery::new("woz")
            .discover(dir.path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_discover_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDiscovery::new("woz")
            .discover(&dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Discovery { .. }));
    }
}
