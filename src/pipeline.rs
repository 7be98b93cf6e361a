//! One render pass: load both sources, join, classify, then draw the map and the chart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    classify::{make_color_scale, ColorScale},
    common::ensure_dir_exists,
    config::RenderConfig,
    data::{join, AttributeTable, ExpressedAttribute, JoinedFeature},
    geom::{make_path_generator, make_projection, Graticule},
    io::{decode_features, fetch_text, read_attribute_table, Source, SvgCanvas},
    render::{render_chart, render_map, CHART_STYLES, MAP_STYLES},
};

/// The two inputs of a render pass.
#[derive(Clone, Debug)]
pub struct Sources {
    pub attributes: Source,
    pub topology: Source,
}

/// Per-run choices that are not compiled in.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Attribute to express; the first attribute column when `None`.
    pub attribute: Option<String>,
    /// Topology object holding the state boundaries; the configured default when `None`.
    pub object: Option<String>,
}

/// Everything a finished pass produced.
#[derive(Debug)]
pub struct Rendered {
    pub attribute: ExpressedAttribute,
    pub scale: ColorScale,
    pub features: Vec<JoinedFeature>,
    pub map: SvgCanvas,
    pub chart: SvgCanvas,
}

impl Rendered {
    /// Write `map.svg` and `chart.svg` into `dir`, refusing to overwrite unless `force`.
    pub fn save(&self, dir: &Path, force: bool) -> Result<(PathBuf, PathBuf)> {
        ensure_dir_exists(dir)?;
        let map_path = dir.join("map.svg");
        let chart_path = dir.join("chart.svg");
        for path in [&map_path, &chart_path] {
            anyhow::ensure!(force || !path.exists(),
                "[pipeline] {} already exists (use --force to overwrite)", path.display());
        }
        self.map.save(&map_path)?;
        self.chart.save(&chart_path)?;
        Ok((map_path, chart_path))
    }
}

/// Fetch both sources concurrently, then render. If either fetch fails nothing is drawn.
pub async fn run(sources: &Sources, options: &RenderOptions, config: &RenderConfig) -> Result<Rendered> {
    let (csv, topology) = tokio::try_join!(
        fetch_text(&sources.attributes),
        fetch_text(&sources.topology),
    )?;
    info!("[pipeline] loaded {} ({} bytes) and {} ({} bytes)",
        sources.attributes, csv.len(), sources.topology, topology.len());

    render(&csv, &topology, options, config)
}

/// The synchronous half of a pass, starting from already-fetched source text.
pub fn render(csv: &str, topology: &str, options: &RenderOptions, config: &RenderConfig) -> Result<Rendered> {
    let table = read_attribute_table(csv, &config.key_field)
        .context("[pipeline] Failed to load attribute data")?;
    let object = options.object.as_deref().unwrap_or(&config.topology_object);
    let features = decode_features(topology, object)
        .context("[pipeline] Failed to decode state boundaries")?;
    let attribute = table.select(options.attribute.as_deref())?;
    info!("[pipeline] {} records, {} features, expressing {attribute}", table.len(), features.len());

    let joined = join(&features, table.records(), table.attributes(), &config.key_field)?;
    let matched = joined.iter().filter(|f| f.is_matched()).count();
    info!("[pipeline] joined {matched} of {} features", joined.len());

    draw(&table, joined, attribute, config)
}

/// Classify once, then hand the same scale to both renderers.
fn draw(table: &AttributeTable, features: Vec<JoinedFeature>, attribute: ExpressedAttribute, config: &RenderConfig) -> Result<Rendered> {
    let scale = make_color_scale(table.records(), &attribute, config);
    info!("[pipeline] quantile breaks for {attribute}: {:?}", scale.thresholds());

    let projection = make_projection(&config.projection, config.map.width, config.map.height);
    let path = make_path_generator(&projection);
    let graticule = Graticule::new(config.map.graticule_step).centered_on(projection.central_meridian());

    let mut map = SvgCanvas::new("map", config.map.width, config.map.height).with_styles(MAP_STYLES);
    render_map(&features, &attribute, &path, &graticule, &scale, &mut map);

    let mut chart = SvgCanvas::new("chart", config.chart.width, config.chart.height).with_styles(CHART_STYLES);
    render_chart(table.records(), &attribute, &scale, &config.chart, &mut chart);

    Ok(Rendered { attribute, scale, features, map, chart })
}
