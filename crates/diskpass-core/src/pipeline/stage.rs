//! Staging of blank working disks.

use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// What staging did for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The template was copied to the target
    Created,
    /// The target already existed and was left untouched
    AlreadyStaged,
}

/// Copy `template` to `target` unless `target` already exists.
///
/// An existing target is never overwritten: it may hold the automation's
/// output from an earlier run.
pub fn stage_target(template: &Path, target: &Path) -> PipelineResult<StageOutcome> {
    if target.exists() {
        tracing::debug!("Already staged: {}", target.display());
        return Ok(StageOutcome::AlreadyStaged);
    }

    std::fs::copy(template, target).map_err(|source| PipelineError::Stage {
        path: target.to_path_buf(),
        source,
    })?;
    tracing::debug!("Staged {} -> {}", template.display(), target.display());
    Ok(StageOutcome::Created)
}

/// Create the validation directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> PipelineResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| PipelineError::Stage {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_copies_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("blank.dsk");
        std::fs::write(&template, b"blank disk").unwrap();
        let target = dir.path().join("game.dsk");

        assert_eq!(stage_target(&template, &target).unwrap(), StageOutcome::Created);
        assert_eq!(std::fs::read(&target).unwrap(), b"blank disk");
    }

    #[test]
    fn test_stage_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("blank.dsk");
        std::fs::write(&template, b"blank disk").unwrap();
        let target = dir.path().join("game.dsk");
        std::fs::write(&target, b"SENTINEL").unwrap();

        assert_eq!(
            stage_target(&template, &target).unwrap(),
            StageOutcome::AlreadyStaged
        );
        assert_eq!(
            stage_target(&template, &target).unwrap(),
            StageOutcome::AlreadyStaged
        );
        assert_eq!(std::fs::read(&target).unwrap(), b"SENTINEL");
    }

    #[test]
    fn test_stage_missing_template_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = stage_target(&dir.path().join("absent.dsk"), &dir.path().join("t.dsk"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Stage { .. }));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let validation = dir.path().join("validation");
        ensure_dir(&validation).unwrap();
        ensure_dir(&validation).unwrap();
        assert!(validation.is_dir());
    }
}
