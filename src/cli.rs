//! Command-line argument parsing
//!
//! Supports:
//! - Loading a definition directory (recursively or by order files)
//! - Switching single maps or every registered map
//! - Printing the resulting active maps as text or JSON

use std::path::PathBuf;

use clap::Parser;

use crate::variant::SwitchTarget;

/// Load swappable keymaps and switch between their variants
#[derive(Parser, Debug)]
#[command(name = "altmap", version, about = "Swappable key-binding maps")]
pub struct CliArgs {
    /// Directory of definition files (defaults to ~/.config/altmap/maps)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Descend into every subdirectory, not only those named by order files
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Use this config file instead of ~/.config/altmap/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Switch a map, e.g. `foo-map=alternate` or `foo-map=backup`
    #[arg(short = 's', long = "switch", value_name = "NAME=VARIANT")]
    pub switches: Vec<String>,

    /// Switch every map with an alternate
    #[arg(long, value_name = "VARIANT")]
    pub switch_all: Option<String>,

    /// Only print these maps
    #[arg(long, value_name = "NAME")]
    pub show: Vec<String>,

    /// Print maps as JSON
    #[arg(long)]
    pub json: bool,

    /// Log info-level messages to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// What a run should do, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub definitions_dir: Option<PathBuf>,
    pub recursive: bool,
    pub config_path: Option<PathBuf>,
    pub switches: Vec<(String, SwitchTarget)>,
    pub switch_all: Option<SwitchTarget>,
    pub show: Vec<String>,
    pub json: bool,
}

impl CliArgs {
    /// Validate parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let switches = self
            .switches
            .iter()
            .map(|spec| parse_switch(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let switch_all = self
            .switch_all
            .as_deref()
            .map(str::parse::<SwitchTarget>)
            .transpose()?;

        let definitions_dir = self.dir.or_else(|| {
            crate::config_paths::maps_dir().filter(|dir| dir.is_dir())
        });

        Ok(RunConfig {
            definitions_dir,
            recursive: self.recursive,
            config_path: self.config,
            switches,
            switch_all,
            show: self.show,
            json: self.json,
        })
    }
}

/// Parse `NAME=VARIANT`
fn parse_switch(spec: &str) -> Result<(String, SwitchTarget), String> {
    let (name, target) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VARIANT, got {}", spec))?;
    if name.is_empty() {
        return Err(format!("missing map name in {}", spec));
    }
    Ok((name.to_string(), target.parse()?))
}
