use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Choropleth map and bar chart renderer (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "usmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render map.svg and chart.svg for one attribute
    Render(RenderArgs),

    /// List the attribute columns available in a data file
    Attributes(AttributesArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Attribute CSV (path or http(s) URL)
    #[arg(long, value_hint = ValueHint::AnyPath)]
    pub data: String,

    /// State boundaries TopoJSON (path or http(s) URL)
    #[arg(long, value_hint = ValueHint::AnyPath)]
    pub topology: String,

    /// Attribute to express (defaults to the first attribute column)
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Topology object containing the states
    #[arg(long)]
    pub object: Option<String>,

    /// Output directory for map.svg and chart.svg
    #[arg(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub out: PathBuf,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct AttributesArgs {
    /// Attribute CSV (path or http(s) URL)
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn schema_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::parse_from([
            "usmap", "-vv", "render", "--data", "d.csv", "--topology", "s.topojson", "-a", "rate", "--out", "out",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.data, "d.csv");
                assert_eq!(args.attribute.as_deref(), Some("rate"));
                assert_eq!(args.out, PathBuf::from("out"));
                assert!(!args.force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
