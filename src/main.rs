// src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_blocks::config::{CommandLineInput, InputSource, InspectConfig, OutputMode};
use notion_blocks::constants::{LOG_FILE_NAME, LOG_PATTERN};
use notion_blocks::{
    encode_append_children_value, parse_block_children, AppendBlockChildren, BlockChildren,
    BlockType,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

/// Sets up logging configuration.
///
/// Everything goes to stderr so stdout carries only the encoded JSON.
fn setup_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose { LOG_PATTERN } else { "{m}{n}" };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Decodes a saved listing and prints it back in the requested encoding.
struct Inspector<'a> {
    config: &'a InspectConfig,
}

impl<'a> Inspector<'a> {
    fn new(config: &'a InspectConfig) -> Self {
        Self { config }
    }

    fn run(&self) -> Result<()> {
        let body = self.read_input()?;
        let listing = parse_block_children(&body).context("decoding block-children listing")?;
        self.log_listing(&listing);

        let value = self.encode(listing)?;
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        println!("{}", rendered);
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        match &self.config.source {
            InputSource::Stdin => {
                let mut body = String::new();
                std::io::stdin()
                    .read_to_string(&mut body)
                    .context("reading listing from stdin")?;
                Ok(body)
            }
            InputSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("reading listing from {}", path.display())),
        }
    }

    fn encode(&self, listing: BlockChildren) -> Result<Value> {
        match &self.config.mode {
            OutputMode::Stored => Ok(serde_json::to_value(&listing)?),
            OutputMode::Draft { after } => {
                let mut request = AppendBlockChildren::new(listing.results);
                if let Some(after) = after {
                    request = request.after(after.clone());
                }
                encode_append_children_value(&request).context("encoding append request")
            }
        }
    }

    /// Logs a per-kind breakdown of every block in the listing, nested ones included.
    fn log_listing(&self, listing: &BlockChildren) {
        log::info!(
            "Decoded {} top-level block(s), has_more: {}",
            listing.len(),
            listing.has_more
        );
        if let Some(cursor) = &listing.next_cursor {
            log::debug!("  next_cursor: {}", cursor);
        }

        let mut counts: BTreeMap<BlockType, usize> = BTreeMap::new();
        let mut unknown_tags = Vec::new();
        for block in listing.results.iter().flat_map(|b| b.iter_tree()) {
            *counts.entry(block.block_type()).or_default() += 1;
            if block.block_type() == BlockType::Unsupported {
                unknown_tags.push(block.wire_tag().to_string());
            }
        }
        for (kind, count) in &counts {
            log::debug!("  {}: {}", kind, count);
        }
        if !unknown_tags.is_empty() {
            log::warn!(
                "Listing holds {} unsupported block(s): {}",
                unknown_tags.len(),
                unknown_tags.join(", ")
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = InspectConfig::resolve(cli)?;

    Inspector::new(&config).run()
}
