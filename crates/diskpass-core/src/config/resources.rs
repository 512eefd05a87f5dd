//! Resolution of the file resources a batch needs before it can start.

use std::path::PathBuf;

use crate::error::ConfigError;

use super::{Config, BASE_CONFIG, FILE_RESOURCES};

/// Resolved, existing files used for every image in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationResources {
    /// Blank disk copied into place as each image's staged target
    pub blank_disk_image: PathBuf,

    /// Emulator automation script, selected by `base_config.emulator`
    pub automation_runner: PathBuf,

    /// Disk holding the validation program the emulator boots
    pub validation_program: PathBuf,
}

impl AutomationResources {
    /// Resolve every resource, failing on the first missing key or file.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let base_resource_path = config.get(BASE_CONFIG, "base_resource_path")?;
        let base = PathBuf::from(shellexpand::tilde(&base_resource_path).into_owned());

        let blank_disk_image =
            config.get_file_path(FILE_RESOURCES, "blank_disk_image_path", Some(&base))?;

        let emulator = config.get(BASE_CONFIG, "emulator")?;
        let automation_runner = config.get_file_path(FILE_RESOURCES, &emulator, Some(&base))?;

        let validation_program =
            config.get_file_path(FILE_RESOURCES, "passport_disk_image_path", Some(&base))?;

        tracing::debug!(
            "Resources: blank={}, runner={} ({emulator}), program={}",
            blank_disk_image.display(),
            automation_runner.display(),
            validation_program.display()
        );

        Ok(Self {
            blank_disk_image,
            automation_runner,
            validation_program,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config_for(base: &Path, emulator: &str) -> Config {
        let content = format!(
            r#"
[base_config]
base_resource_path = {base:?}
emulator = "{emulator}"

[file_resources]
blank_disk_image_path = "blank.dsk"
virtual_ii = "virtual_ii.applescript"
passport_disk_image_path = "passport.dsk"
"#,
            base = base.to_str().unwrap()
        );
        Config::from_toml_str(PathBuf::from("test.toml"), &content).unwrap()
    }

    fn seed(base: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(base.join(name), name.as_bytes()).unwrap();
        }
    }

    #[test]
    fn test_resolves_all_resources() {
        let dir = tempfile::tempdir().unwrap();
        seed(
            dir.path(),
            &["blank.dsk", "virtual_ii.applescript", "passport.dsk"],
        );

        let resources = AutomationResources::from_config(&config_for(dir.path(), "virtual_ii"))
            .unwrap();
        assert_eq!(resources.blank_disk_image, dir.path().join("blank.dsk"));
        assert_eq!(
            resources.automation_runner,
            dir.path().join("virtual_ii.applescript")
        );
        assert_eq!(resources.validation_program, dir.path().join("passport.dsk"));
    }

    #[test]
    fn test_unknown_emulator_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        seed(
            dir.path(),
            &["blank.dsk", "virtual_ii.applescript", "passport.dsk"],
        );

        let err = AutomationResources::from_config(&config_for(dir.path(), "mame")).unwrap_err();
        assert!(err.to_string().contains("key [mame] not found"));
    }

    #[test]
    fn test_missing_resource_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), &["blank.dsk", "virtual_ii.applescript"]);

        let err = AutomationResources::from_config(&config_for(dir.path(), "virtual_ii"))
            .unwrap_err();
        assert!(err.to_string().contains("passport_disk_image_path"));
    }
}
