//! Projection, path generation and the reference grid.

mod graticule;
mod path;
mod proj;

pub use graticule::Graticule;
pub use path::{DrawablePath, PathCommand, PathGenerator};
pub use proj::Projection;

use crate::config::ProjectionConfig;

/// Build the fixed projection for a canvas of the given size.
pub fn make_projection(config: &ProjectionConfig, width: f64, height: f64) -> Projection {
    Projection::albers(config, width, height)
}

/// Path generator bound to `projection`.
pub fn make_path_generator(projection: &Projection) -> PathGenerator<'_> {
    PathGenerator::new(projection)
}
