//! Typed sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};

/// Batch layout and external program settings (`[batch]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Extension of source disk images to discover (without the dot)
    pub disk_image_extension: String,

    /// Extension of the staged working disk
    pub working_extension: String,

    /// Extension of the screenshot the automation saves
    pub screenshot_extension: String,

    /// Name of the subdirectory holding staged disks, screenshots and reports
    pub validation_dir: String,

    /// Interpreter that runs the emulator automation script
    pub automation_interpreter: String,

    /// Program used to open screenshots after the batch; empty disables it
    pub screenshot_viewer: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            disk_image_extension: "woz".to_string(),
            working_extension: "dsk".to_string(),
            screenshot_extension: "png".to_string(),
            validation_dir: "validation".to_string(),
            automation_interpreter: "/usr/bin/osascript".to_string(),
            screenshot_viewer: default_viewer().to_string(),
        }
    }
}

impl BatchSettings {
    /// The configured viewer, or `None` when disabled.
    pub fn viewer(&self) -> Option<&str> {
        let viewer = self.screenshot_viewer.trim();
        (!viewer.is_empty()).then_some(viewer)
    }
}

#[cfg(target_os = "macos")]
fn default_viewer() -> &'static str {
    "/usr/bin/open"
}

#[cfg(not(target_os = "macos"))]
fn default_viewer() -> &'static str {
    "xdg-open"
}

/// Logging settings (`[logging]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
