//! The two coordinated views: the choropleth map and the bar chart.

mod axis;
mod chart;
mod map;

pub use axis::LinearScale;
pub use chart::{render_chart, sort_for_chart};
pub use map::render_map;

pub(crate) use chart::CHART_STYLES;
pub(crate) use map::MAP_STYLES;
