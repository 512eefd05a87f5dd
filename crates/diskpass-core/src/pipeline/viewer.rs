//! Opening screenshots for review once a batch finishes.

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Opens a set of screenshots in an external viewer.
///
/// Best-effort: the viewer is spawned and not waited on, and failures are
/// logged rather than returned.
pub trait ScreenshotViewer {
    fn open(&self, screenshots: &[PathBuf]);
}

/// Spawns `<program> <screenshot>...`.
pub struct CommandViewer {
    program: String,
}

impl CommandViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ScreenshotViewer for CommandViewer {
    fn open(&self, screenshots: &[PathBuf]) {
        if screenshots.is_empty() {
            return;
        }
        let spawned = Command::new(&self.program)
            .args(screenshots)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                // Not waited on; the viewer outlives the batch.
                drop(child);
                tracing::debug!("Opened {} screenshot(s) in {}", screenshots.len(), self.program);
            }
            Err(e) => tracing::warn!("Could not open screenshots with {}: {e}", self.program),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_viewer_does_not_panic() {
        let viewer = CommandViewer::new("/nonexistent/viewer");
        viewer.open(&[PathBuf::from("/tmp/a.png")]);
    }

    #[test]
    fn test_empty_list_is_noop() {
        CommandViewer::new("/nonexistent/viewer").open(&[]);
    }
}
