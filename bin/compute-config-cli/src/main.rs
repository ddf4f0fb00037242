// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use azure_compute_api_types::ImageReference;
use clap::{Parser, Subcommand};
use compute_config::{
    expand_source_image_reference, flatten_source_image_reference,
    source_image_reference_schema, SourceImageReference, SOURCE_IMAGE_ID,
    SOURCE_IMAGE_REFERENCE,
};
use serde::{Deserialize, Serialize};
use slog::{info, o, Drain, Level, Logger};

#[derive(Debug, Parser)]
#[clap(about, version)]
/// Convert machine image sources between configuration and API forms
struct Opt {
    /// Enable debugging
    #[clap(short, long, action)]
    debug: bool,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Expand a configured image source into an API request payload
    Expand {
        /// TOML file naming a managed image or describing a platform image
        #[clap(action)]
        config: PathBuf,
    },

    /// Flatten an API image reference back into configuration form
    Flatten {
        /// JSON file holding an image reference from an API response
        #[clap(action)]
        reference: PathBuf,
    },

    /// Print the schema of the source_image_reference block
    Schema,
}

/// A machine's image source as written in its config file.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
struct ImageSourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_image_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    source_image_reference: Vec<SourceImageReference>,
}

fn parse_config(contents: &str) -> anyhow::Result<ImageSourceConfig> {
    let config: ImageSourceConfig = toml::from_str(contents)?;

    // Checks a config frontend would derive from the block's schema:
    // at most one block, never alongside the managed image ID.
    if config.source_image_reference.len() > 1 {
        bail!(
            "at most one `{}` block may be specified",
            SOURCE_IMAGE_REFERENCE
        );
    }
    if config.source_image_id.is_some()
        && !config.source_image_reference.is_empty()
    {
        bail!(
            "`{}` conflicts with `{}`",
            SOURCE_IMAGE_REFERENCE,
            SOURCE_IMAGE_ID
        );
    }
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<ImageSourceConfig> {
    let file_data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(
        std::str::from_utf8(&file_data)
            .context("config should be valid utf-8")?,
    )
}

fn run_expand(log: &Logger, path: &Path) -> anyhow::Result<()> {
    let config = read_config(path)?;
    info!(log, "expanding image source";
        "managed_id" => config.source_image_id.is_some(),
        "reference_blocks" => config.source_image_reference.len());

    let image_id = config.source_image_id.as_deref().unwrap_or("");
    let reference = expand_source_image_reference(
        &config.source_image_reference,
        image_id,
    )?;
    println!("{}", serde_json::to_string_pretty(&reference)?);
    Ok(())
}

fn run_flatten(log: &Logger, path: &Path) -> anyhow::Result<()> {
    let file_data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // A JSON `null` stands for a machine with no image reference at all.
    let reference: Option<ImageReference> =
        serde_json::from_slice(&file_data)
            .context("failed to parse image reference")?;

    // A reference naming a managed image surfaces as `source_image_id`;
    // anything else becomes a reference block.
    let config = ImageSourceConfig {
        source_image_id: reference
            .as_ref()
            .and_then(|reference| reference.id.clone()),
        source_image_reference: flatten_source_image_reference(
            reference.as_ref(),
        ),
    };
    info!(log, "flattened image reference";
        "managed_id" => config.source_image_id.is_some(),
        "reference_blocks" => config.source_image_reference.len());
    print!("{}", toml::to_string(&config)?);
    Ok(())
}

fn run_schema() -> anyhow::Result<()> {
    let schema = source_image_reference_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn create_logger(opt: &Opt) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let level = if opt.debug { Level::Debug } else { Level::Info };
    let drain = slog::LevelFilter(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    let log = create_logger(&opt);

    match &opt.cmd {
        Command::Expand { config } => run_expand(&log, config),
        Command::Flatten { reference } => run_flatten(&log, reference),
        Command::Schema => run_schema(),
    }
}
