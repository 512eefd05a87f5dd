//! Emulator automation: the external step that reads a disk image.
//!
//! The automation boots the emulator with the source image and a validation
//! program, lets the program copy the image onto the staged working disk,
//! saves a screenshot, and prints a short result code such as `OK` or `FRE`
//! (fatal read error). Result codes are opaque strings to this crate.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PipelineError, PipelineResult};

/// The four arguments handed to the automation for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationRequest {
    /// Source disk image to read
    pub source: PathBuf,
    /// Staged working disk to write
    pub target: PathBuf,
    /// Where to save the screenshot
    pub screenshot: PathBuf,
    /// Disk holding the validation program
    pub program: PathBuf,
}

impl AutomationRequest {
    /// Arguments in the order the automation script expects them.
    pub fn args(&self) -> [&OsStr; 4] {
        [
            self.source.as_os_str(),
            self.target.as_os_str(),
            self.screenshot.as_os_str(),
            self.program.as_os_str(),
        ]
    }
}

/// What the automation process returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationOutput {
    /// Exit status; `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl AutomationOutput {
    /// Interpret the output as a result code.
    ///
    /// A non-zero exit means the automation itself failed to run, which is
    /// fatal and distinct from a processing anomaly. Otherwise the trimmed
    /// standard output is the result code.
    pub fn into_result_code(self, image: &Path) -> PipelineResult<String> {
        match self.status {
            Some(0) => Ok(self.stdout.trim().to_string()),
            _ => Err(PipelineError::Invocation {
                image: image.to_path_buf(),
                stderr: self.stderr.trim().to_string(),
            }),
        }
    }
}

/// Runs the automation step for one image, blocking until it finishes.
///
/// Implementations must not run requests concurrently: the emulator is an
/// interactive desktop application with a single instance.
pub trait Automation {
    fn run(&self, request: &AutomationRequest) -> PipelineResult<AutomationOutput>;
}

/// Runs an automation script through an interpreter (`osascript` by default).
pub struct ScriptAutomation {
    interpreter: String,
    script: PathBuf,
}

impl ScriptAutomation {
    pub fn new(interpreter: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
        }
    }
}

impl Automation for ScriptAutomation {
    fn run(&self, request: &AutomationRequest) -> PipelineResult<AutomationOutput> {
        tracing::debug!(
            "Running {} {} for {}",
            self.interpreter,
            self.script.display(),
            request.source.display()
        );

        let output = Command::new(&self.interpreter)
            .arg(&self.script)
            .args(request.args())
            .output()
            .map_err(|source| PipelineError::Spawn {
                program: self.interpreter.clone(),
                source,
            })?;

        Ok(AutomationOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AutomationRequest {
        AutomationRequest {
            source: PathBuf::from("/disks/a.woz"),
            target: PathBuf::from("/disks/validation/a.dsk"),
            screenshot: PathBuf::from("/disks/validation/a.png"),
            program: PathBuf::from("/res/passport.dsk"),
        }
    }

    #[test]
    fn test_success_output_is_trimmed_code() {
        let output = AutomationOutput {
            status: Some(0),
            stdout: "  FRE\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.into_result_code(Path::new("a.woz")).unwrap(), "FRE");
    }

    #[test]
    fn test_nonzero_exit_is_invocation_error() {
        let output = AutomationOutput {
            status: Some(1),
            stdout: "OK".to_string(),
            stderr: "execution error: Can't get window 1 (-1728)\n".to_string(),
        };
        let err = output.into_result_code(Path::new("a.woz")).unwrap_err();
        match err {
            PipelineError::Invocation { stderr, .. } => {
                assert_eq!(stderr, "execution error: Can't get window 1 (-1728)")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_signal_termination_is_invocation_error() {
        let output = AutomationOutput {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(output.into_result_code(Path::new("a.woz")).is_err());
    }

    #[test]
    fn test_request_argument_order() {
        let req = request();
        let args: Vec<&OsStr> = req.args().to_vec();
        assert_eq!(
            args,
            vec![
                OsStr::new("/disks/a.woz"),
                OsStr::new("/disks/validation/a.dsk"),
                OsStr::new("/disks/validation/a.png"),
                OsStr::new("/res/passport.dsk"),
            ]
        );
    }

    #[test]
    fn test_missing_interpreter_is_spawn_error() {
        let automation = ScriptAutomation::new("/nonexistent/interpreter", "/tmp/script");
        let err = automation.run(&request()).unwrap_err();
        assert!(matches!(err, PipelineError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_script_receives_arguments_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("echo_args.sh");
        std::fs::write(&script, "printf '%s|%s|%s|%s\\n' \"$1\" \"$2\" \"$3\" \"$4\"\n").unwrap();

        let output = ScriptAutomation::new("sh", &script).run(&request()).unwrap();
        assert_eq!(output.status, Some(0));
        assert_eq!(
            output.into_result_code(Path::new("a.woz")).unwrap(),
            "/disks/a.woz|/disks/validation/a.dsk|/disks/validation/a.png|/res/passport.dsk"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_script_failure_captures_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fail.sh");
        std::fs::write(&script, "echo 'emulator not running' >&2\nexit 3\n").unwrap();

        let output = ScriptAutomation::new("sh", &script).run(&request()).unwrap();
        assert_eq!(output.status, Some(3));
        let err = output.into_result_code(Path::new("/disks/a.woz")).unwrap_err();
        assert!(err.to_string().contains("emulator not running"));
    }
}
