use anyhow::{Context, Result};
use clap::Parser;

use altmap::cli::CliArgs;
use altmap::report::{capture_all, MapReport};
use altmap::{Altmap, AltmapConfig};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    altmap::tracing::init(args.verbose);

    let run = args.into_config().map_err(anyhow::Error::msg)?;

    let config = match &run.config_path {
        Some(path) => AltmapConfig::load_from(path).map_err(anyhow::Error::msg)?,
        None => AltmapConfig::load(),
    };
    let mut altmap = Altmap::new(config);

    if let Some(dir) = &run.definitions_dir {
        let loaded = altmap
            .load_directory(dir, run.recursive)
            .with_context(|| format!("Failed to load definitions from {}", dir.display()))?;
        tracing::info!("Loaded {} definition files", loaded.len());
    } else {
        tracing::warn!("No definition directory given and none found in the config directory");
    }

    for (name, target) in &run.switches {
        altmap
            .switch(name, *target)
            .with_context(|| format!("Failed to switch {} to {}", name, target))?;
    }

    if let Some(target) = run.switch_all {
        let count = altmap
            .switch_all(target)
            .with_context(|| format!("Failed to switch all maps to {}", target))?;
        tracing::info!("Switched {} maps to {}", count, target);
    }

    let reports = capture_all(&altmap, &run.show);
    if run.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!(
            "{}",
            reports
                .iter()
                .map(MapReport::render_text)
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(())
}
