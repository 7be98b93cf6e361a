use anyhow::Result;
use tracing::info;

use crate::cli::{AttributesArgs, Cli, RenderArgs};
use crate::config::RenderConfig;
use crate::io::{fetch_text, read_attribute_table, Source};
use crate::pipeline::{self, RenderOptions, Sources};

pub async fn render(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let sources = Sources {
        attributes: Source::parse(&args.data),
        topology: Source::parse(&args.topology),
    };
    let options = RenderOptions { attribute: args.attribute.clone(), object: args.object.clone() };

    let rendered = pipeline::run(&sources, &options, &RenderConfig::default()).await?;
    let (map, chart) = rendered.save(&args.out, args.force)?;

    info!("[render] wrote {} and {}", map.display(), chart.display());
    if cli.verbose > 0 {
        println!("Rendered {} into {} and {}", rendered.attribute, map.display(), chart.display());
    }
    Ok(())
}

pub async fn attributes(_cli: &Cli, args: &AttributesArgs) -> Result<()> {
    let csv = fetch_text(&Source::parse(&args.data)).await?;
    let table = read_attribute_table(&csv, &RenderConfig::default().key_field)?;
    for name in table.attributes() {
        println!("{name}");
    }
    Ok(())
}
