use std::{fs, path::Path};

use anyhow::{anyhow, Context};

use crate::{draft::Draft, events::RenderEvent};

pub fn read_drafts_from_geojson(filepath: &Path) -> anyhow::Result<Vec<Draft>> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading drafts from {:?}", filepath))?;
    let geojson: geojson::GeoJson = contents.parse()?;
    let feature_collection = geojson::FeatureCollection::try_from(geojson)?;
    feature_collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            Draft::try_from(feature)
                .map_err(|err| anyhow!("Could not read feature {} as a draft, {}", index, err))
        })
        .collect()
}

pub fn write_render_event(event: &RenderEvent, output_filepath: &Path) -> anyhow::Result<()> {
    let geojson_contents = geojson::GeoJson::from(event.geojson.clone());
    fs::write(output_filepath, geojson_contents.to_string())
        .with_context(|| format!("Writing render output to {:?}", output_filepath))
}
