//! Quantile classification of one attribute into a fixed palette.

mod scale;

pub use scale::ColorScale;

use crate::{config::RenderConfig, data::{AttributeRecord, ExpressedAttribute}};

/// Build the single color scale shared by the map and the chart for one render pass.
pub fn make_color_scale(records: &[AttributeRecord], attribute: &ExpressedAttribute, config: &RenderConfig) -> ColorScale {
    ColorScale::from_records(records, attribute, &config.palette, config.no_data)
}
