use anyhow::{bail, Context};
use flamecore::config::{ConfigManager, ConfigSection};
use flamecore::engine::{render, HistogramSink};
use flamecore::variations;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--list-variations") => list_variations(),
        Some("--config-manifest") => config_manifest(),
        Some(path) if !path.starts_with('-') => run(path),
        _ => {
            bail!("usage: flamecore <flame.toml> | --list-variations | --config-manifest");
        }
    }
}

fn list_variations() -> anyhow::Result<()> {
    let manifest = variations::manifest();
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

fn config_manifest() -> anyhow::Result<()> {
    let manifest = flamecore::RunConfig::default().to_manifest();
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

fn run(path: &str) -> anyhow::Result<()> {
    let manager = ConfigManager::new();
    manager
        .load_from_file(path)
        .with_context(|| format!("loading {}", path))?;
    let config = manager.get();
    let genome = manager.build_genome().context("building genome")?;

    let sink = HistogramSink::new(64, 2.0);
    let stats = render(&genome, &config.run, &sink);

    let histogram = sink.into_histogram();
    log::info!(
        "histogram: {} of {} bins occupied, {} in-window hit(s)",
        histogram.occupied_bins(),
        histogram.size() * histogram.size(),
        histogram.total_hits()
    );

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
