//! Compiled-in rendering constants.
//!
//! Every literal that frames the map or the chart lives here, so the same pipeline can be
//! pointed at another region or dataset by swapping a config value instead of editing the
//! renderers.

use crate::io::Rgb;

/// Property / column that identifies a state in both sources.
pub const KEY_FIELD: &str = "adm1_code";

/// Name of the state boundaries object inside the topology file.
pub const TOPOLOGY_OBJECT: &str = "ne_10m_admin_1_states_provinces";

/// Five-class sequential palette, light to dark.
pub const PALETTE: [Rgb; 5] = [
    Rgb { r: 0xd4, g: 0xb9, b: 0xda },
    Rgb { r: 0xc9, g: 0x94, b: 0xc7 },
    Rgb { r: 0xdf, g: 0x65, b: 0xb0 },
    Rgb { r: 0xdd, g: 0x1c, b: 0x77 },
    Rgb { r: 0x98, g: 0x00, b: 0x43 },
];

/// Fill for features and bars without a finite value.
pub const NO_DATA: Rgb = Rgb { r: 0xcc, g: 0xcc, b: 0xcc };

/// Conic equal-area parameters, all angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    /// (longitude, latitude) that lands on the canvas center, in the rotated frame.
    pub center: (f64, f64),
    /// Longitude rotation applied before projecting.
    pub rotate: f64,
    /// Standard parallels.
    pub parallels: (f64, f64),
    /// Pixels per unit-sphere radian.
    pub scale: f64,
}

/// Albers framing for the continental U.S.
pub const US_ALBERS: ProjectionConfig = ProjectionConfig {
    center: (0.0, 37.0902),
    rotate: 100.0,
    parallels: (43.0, 62.0),
    scale: 800.0,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    /// Graticule spacing (longitude, latitude) in degrees.
    pub graticule_step: (f64, f64),
}

pub const MAP: MapConfig = MapConfig {
    width: 960.0,
    height: 460.0,
    graticule_step: (15.0, 15.0),
};

/// Bar chart frame and value scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    pub top_bottom_padding: f64,
    /// Value range mapped onto the inner height. Not clamped.
    pub domain: (f64, f64),
    pub title_position: (f64, f64),
    /// Approximate tick count handed to the axis.
    pub ticks: usize,
}

impl ChartConfig {
    #[inline] pub fn inner_width(&self) -> f64 { self.width - self.left_padding - self.right_padding }

    #[inline] pub fn inner_height(&self) -> f64 { self.height - self.top_bottom_padding * 2.0 }
}

/// 0.425 of a 960px viewport, 473px tall (463px inner).
pub const CHART: ChartConfig = ChartConfig {
    width: 408.0,
    height: 473.0,
    left_padding: 25.0,
    right_padding: 2.0,
    top_bottom_padding: 5.0,
    domain: (0.0, 50.0),
    title_position: (40.0, 40.0),
    ticks: 10,
};

/// Everything one render pass needs besides the data.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub key_field: String,
    pub topology_object: String,
    pub projection: ProjectionConfig,
    pub map: MapConfig,
    pub chart: ChartConfig,
    pub palette: [Rgb; 5],
    pub no_data: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            key_field: KEY_FIELD.to_string(),
            topology_object: TOPOLOGY_OBJECT.to_string(),
            projection: US_ALBERS,
            map: MAP,
            chart: CHART,
            palette: PALETTE,
            no_data: NO_DATA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_inner_dimensions() {
        assert_eq!(CHART.inner_width(), 381.0);
        assert_eq!(CHART.inner_height(), 463.0);
    }
}
