//! diskpass CLI - validate a directory of disk images through emulator automation.
//!
//! Every disk image in the directory is read by the configured emulator
//! automation onto a staged blank disk. Afterwards diskpass prints (and
//! saves under `validation/`) a report of images that did not read cleanly
//! and a report of staged disks with identical contents.
//!
//! # Usage
//!
//! ```bash
//! # Validate every *.woz image in a directory
//! diskpass ~/disks/incoming
//!
//! # Use a specific config file instead of ~/.diskpass.toml
//! diskpass --config ./diskpass.toml ~/disks/incoming
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

mod cli;
mod logging;

/// Exit status when no directory was given.
const USAGE_EXIT_CODE: u8 = 2;

/// diskpass - batch-validate disk images through emulator automation.
#[derive(Parser, Debug)]
#[command(name = "diskpass")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the disk images to validate
    directory: Option<PathBuf>,

    /// Config file (defaults to $DISKPASS_CONFIG_PATH, then ~/.diskpass.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,

    /// Do not open the screenshots after the batch
    #[arg(long)]
    no_viewer: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let Some(directory) = cli.directory else {
        eprintln!("You must specify a directory to process\n");
        eprintln!("{}", Cli::command().render_usage());
        return Ok(ExitCode::from(USAGE_EXIT_CODE));
    };

    // Logging isn't initialized until the config is loaded; on failure,
    // fall back to defaults so the error still gets a subscriber.
    let config = match diskpass_core::Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(if cli.verbose { "debug" } else { "info" }, cli.json_logs);
            return Err(e.into());
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("diskpass v{}", diskpass_core::VERSION);

    let args = cli::validate::ValidateArgs {
        directory,
        no_viewer: cli.no_viewer,
    };
    cli::validate::execute(args, &config)?;
    Ok(ExitCode::SUCCESS)
}
