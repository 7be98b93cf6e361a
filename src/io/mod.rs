//! Format-specific reading and writing: CSV attribute tables, TopoJSON boundaries,
//! source fetching and SVG output.

pub mod csv;
pub mod fetch;
pub mod svg;
pub mod topojson;

pub use csv::read_attribute_table;
pub use fetch::{fetch_text, LoadError, Source};
pub use svg::{Element, Rgb, SvgCanvas};
pub use topojson::{decode_features, Topology};
