use anyhow::anyhow;
use clap::Parser;
use draft_store::{
    geofile::geojson::{read_drafts_from_geojson, write_render_event},
    projection::mercator::Viewport,
    DraftStore, LocalBus, StoreConfig, WebMercatorProjector,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Replay a drafting session and write what the map would render.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
struct ScriptedSignal {
    name: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize, Debug)]
struct Config {
    drafts_geojson_path: PathBuf,
    output_path: PathBuf,
    #[serde(default)]
    store: StoreConfig,
    viewport: Viewport,
    #[serde(default)]
    signals: Vec<ScriptedSignal>,
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;

    let drafts = read_drafts_from_geojson(&config.drafts_geojson_path)?;
    log::info!(
        "Read {} drafts from {:?}",
        drafts.len(),
        &config.drafts_geojson_path
    );

    let mut store = DraftStore::new(
        WebMercatorProjector::new(config.viewport),
        LocalBus::new(),
        config.store,
    );
    store.add_many(drafts)?;

    for signal in &config.signals {
        if !store.bus_mut().fire(&signal.name, &signal.payload)? {
            log::warn!("Signal {} was not delivered", signal.name);
        }
    }
    let num_handled = store.pump();
    log::info!(
        "Handled {} signals, {} drafts still in progress",
        num_handled,
        store.len()
    );

    let event = store
        .bus()
        .last_published()
        .ok_or_else(|| anyhow!("The store did not publish anything"))?;
    log::info!(
        "Writing {} rendered features to {:?}",
        event.geojson.features.len(),
        &config.output_path
    );
    write_render_event(event, &config.output_path)?;
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
