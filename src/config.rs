// src/config.rs
//! Command-line configuration for the `notion-blocks` inspector.

use crate::constants::STDIN_PATH;
use crate::types::{BlockId, ValidationError};
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Saved block-children listing (JSON file, or `-` for stdin)
    pub input: String,

    /// Print the append-children request body instead of the stored form
    #[arg(short, long, default_value_t = false)]
    pub draft: bool,

    /// Insert the drafted children after this block (ID or Notion URL)
    #[arg(long, requires = "draft")]
    pub after: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the listing is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// Which encoding the inspector prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// The listing re-encoded as stored, envelope included.
    Stored,
    /// An append request carrying the listing's blocks in write mode.
    Draft { after: Option<BlockId> },
}

/// Resolved inspector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    pub source: InputSource,
    pub mode: OutputMode,
    pub pretty: bool,
    pub verbose: bool,
}

impl InspectConfig {
    pub fn resolve(cli: CommandLineInput) -> Result<Self, ValidationError> {
        let source = if cli.input == STDIN_PATH {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(cli.input))
        };

        let mode = if cli.draft {
            let after = cli.after.as_deref().map(BlockId::parse).transpose()?;
            OutputMode::Draft { after }
        } else {
            OutputMode::Stored
        };

        Ok(Self {
            source,
            mode,
            pretty: cli.pretty,
            verbose: cli.verbose,
        })
    }
}
