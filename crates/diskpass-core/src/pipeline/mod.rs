//! Batch validation pipeline components.
//!
//! This module contains all the stages a disk image passes through:
//! - **discovery**: Find disk images at the top level of a directory
//! - **stage**: Copy the blank working disk into the validation directory
//! - **automation**: Drive the emulator against one image and read its result code
//! - **hash**: Content hashing for duplicate detection
//! - **viewer**: Open the screenshots once the batch is done
//! - **orchestrator**: Runs the stages sequentially and writes the reports

pub mod automation;
pub mod discovery;
pub mod hash;
pub mod orchestrator;
pub mod stage;
pub mod viewer;

// Re-exports for convenient access
pub use automation::{Automation, AutomationOutput, AutomationRequest, ScriptAutomation};
pub use discovery::FileDiscovery;
pub use hash::Hasher;
pub use orchestrator::BatchOrchestrator;
pub use stage::{stage_target, StageOutcome};
pub use viewer::{CommandViewer, ScreenshotViewer};
