use std::f64::consts::PI;

use geo::Coord;

use crate::config::ProjectionConfig;

/// Conic equal-area (Albers) projection on the unit sphere, scaled and translated onto a
/// canvas. Stateless once built; `project` can be shared across any number of features.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Longitude rotation in radians.
    rotate: f64,
    n: f64,
    c: f64,
    rho0: f64,
    scale: f64,
    /// Canvas position of the center point.
    translate: (f64, f64),
    /// Raw (unscaled) projection of the center point.
    origin: (f64, f64),
}

/// Wrap a longitude in radians into [-π, π].
#[inline]
fn wrap_longitude(lambda: f64) -> f64 {
    if lambda > PI { lambda - 2.0 * PI }
    else if lambda < -PI { lambda + 2.0 * PI }
    else { lambda }
}

impl Projection {
    /// Build the projection for a canvas of `width` × `height`, centered on the canvas.
    pub fn albers(config: &ProjectionConfig, width: f64, height: f64) -> Self {
        let (phi0, phi1) = (config.parallels.0.to_radians(), config.parallels.1.to_radians());
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let rho0 = c.sqrt() / n;

        let mut projection = Self {
            rotate: config.rotate.to_radians(),
            n, c, rho0,
            scale: config.scale,
            translate: (width / 2.0, height / 2.0),
            origin: (0.0, 0.0),
        };
        // center is given in the rotated frame, so it is projected without rotation
        projection.origin = projection.raw(config.center.0.to_radians(), config.center.1.to_radians());
        projection
    }

    /// Central meridian of the projection in degrees (the longitude that rotates to 0).
    #[inline] pub fn central_meridian(&self) -> f64 { -self.rotate.to_degrees() }

    /// Rotated longitude in degrees, in [-180, 180].
    #[inline]
    pub fn rotated_longitude(&self, lon: f64) -> f64 {
        wrap_longitude(lon.to_radians() + self.rotate).to_degrees()
    }

    /// Unit-sphere conic projection of (λ, φ) in radians.
    fn raw(&self, lambda: f64, phi: f64) -> (f64, f64) {
        // clamp guards the poles where rounding can push the radicand below zero
        let rho = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let theta = lambda * self.n;
        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    /// Project (longitude, latitude) in degrees to canvas coordinates (y down).
    pub fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let lambda = wrap_longitude(coord.x.to_radians() + self.rotate);
        let (x, y) = self.raw(lambda, coord.y.to_radians());
        (
            self.translate.0 + self.scale * (x - self.origin.0),
            self.translate.1 - self.scale * (y - self.origin.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::US_ALBERS;

    fn us() -> Projection { Projection::albers(&US_ALBERS, 960.0, 460.0) }

    #[test]
    fn center_lands_on_canvas_center() {
        let (x, y) = us().project(&Coord { x: -100.0, y: 37.0902 });
        assert!((x - 480.0).abs() < 1e-9, "x = {x}");
        assert!((y - 230.0).abs() < 1e-9, "y = {y}");
    }

    #[test]
    fn orientation_is_east_right_north_up() {
        let p = us();
        let (west, _) = p.project(&Coord { x: -120.0, y: 37.0902 });
        let (east, _) = p.project(&Coord { x: -80.0, y: 37.0902 });
        let (_, north) = p.project(&Coord { x: -100.0, y: 47.0 });
        let (_, south) = p.project(&Coord { x: -100.0, y: 30.0 });
        assert!(west < 480.0 && east > 480.0);
        assert!(north < 230.0 && south > 230.0);
    }

    #[test]
    fn central_meridian_is_vertical() {
        let p = us();
        let (x1, _) = p.project(&Coord { x: -100.0, y: 25.0 });
        let (x2, _) = p.project(&Coord { x: -100.0, y: 49.0 });
        assert!((x1 - 480.0).abs() < 1e-9 && (x2 - 480.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_wraps_across_the_seam() {
        let p = us();
        assert!((p.central_meridian() + 100.0).abs() < 1e-9);
        assert!((p.rotated_longitude(-100.0)).abs() < 1e-9);
        assert!((p.rotated_longitude(100.0) - (-160.0)).abs() < 1e-9);
        assert!((p.rotated_longitude(170.0) - (-90.0)).abs() < 1e-9);
    }
}
