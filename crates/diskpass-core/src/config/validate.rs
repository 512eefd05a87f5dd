//! Configuration validation for the typed sections.

use std::path::{Component, Path};

use crate::error::ConfigError;

use super::BatchSettings;

impl BatchSettings {
    /// Validate that extensions and the validation directory name are usable.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("batch.disk_image_extension", &self.disk_image_extension),
            ("batch.working_extension", &self.working_extension),
            ("batch.screenshot_extension", &self.screenshot_extension),
        ] {
            if value.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must not be empty"
                )));
            }
            if value.starts_with('.') {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must not start with '.' (got \"{value}\")"
                )));
            }
        }

        let mut components = Path::new(&self.validation_dir).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(ConfigError::ValidationError(format!(
                "batch.validation_dir must be a single directory name (got \"{}\")",
                self.validation_dir
            )));
        }

        if self.automation_interpreter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "batch.automation_interpreter must not be empty".into(),
            ));
        }
        Ok(())
    }
}
