use geo::{Coord, LineString, Polygon};

const EPSILON: f64 = 1e-6;
/// Sampling interval along every grid line, in degrees.
const PRECISION: f64 = 2.5;
/// Major grid: meridians every 90°, the equator only.
const MAJOR_STEP: (f64, f64) = (90.0, 360.0);

/// Lon/lat rectangle in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Extent { x0: f64, x1: f64, y0: f64, y1: f64 }

/// `start, start + step, ...` strictly below `stop`.
fn range(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Latitude/longitude reference grid.
///
/// Major meridians reach ±(90−ε), minor meridians ±(80+ε), parallels fall strictly
/// inside ±80°. Each line is sampled every 2.5° so it bends with the projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Graticule {
    major: Extent,
    minor: Extent,
    step: (f64, f64),
}

impl Graticule {
    /// Global grid with the given (longitude, latitude) step for the minor lines.
    pub fn new(step: (f64, f64)) -> Self {
        Self {
            major: Extent { x0: -180.0, x1: 180.0, y0: -90.0 + EPSILON, y1: 90.0 - EPSILON },
            minor: Extent { x0: -180.0, x1: 180.0, y0: -80.0 - EPSILON, y1: 80.0 + EPSILON },
            step,
        }
    }

    /// Shift the longitude extent to span `central_meridian ± 180°` (minus ε), so that
    /// no line or outline edge crosses the seam of a projection centered there.
    pub fn centered_on(mut self, central_meridian: f64) -> Self {
        let (x0, x1) = (central_meridian - 180.0 + EPSILON, central_meridian + 180.0 - EPSILON);
        self.major.x0 = x0;
        self.major.x1 = x1;
        self.minor.x0 = x0;
        self.minor.x1 = x1;
        self
    }

    /// Meridian at `x` from `y0` to `y1`.
    fn meridian(x: f64, y0: f64, y1: f64) -> Vec<Coord<f64>> {
        range(y0, y1 - EPSILON, PRECISION).into_iter()
            .chain(std::iter::once(y1))
            .map(|y| Coord { x, y })
            .collect()
    }

    /// Parallel at `y` from `x0` to `x1`.
    fn parallel(y: f64, x0: f64, x1: f64) -> Vec<Coord<f64>> {
        range(x0, x1 - EPSILON, PRECISION).into_iter()
            .chain(std::iter::once(x1))
            .map(|x| Coord { x, y })
            .collect()
    }

    /// One line string per grid line: major meridians, the equator, minor meridians,
    /// then minor parallels.
    pub fn lines(&self) -> Vec<LineString<f64>> {
        let (major, minor) = (self.major, self.minor);
        let (dx, dy) = self.step;
        let off_major = |v: f64, step: f64| (v % step).abs() > EPSILON;

        let major_meridians = range((major.x0 / MAJOR_STEP.0).ceil() * MAJOR_STEP.0, major.x1, MAJOR_STEP.0)
            .into_iter()
            .map(|x| Self::meridian(x, major.y0, major.y1));
        let major_parallels = range((major.y0 / MAJOR_STEP.1).ceil() * MAJOR_STEP.1, major.y1, MAJOR_STEP.1)
            .into_iter()
            .map(|y| Self::parallel(y, major.x0, major.x1));
        let minor_meridians = range((minor.x0 / dx).ceil() * dx, minor.x1, dx)
            .into_iter()
            .filter(|&x| off_major(x, MAJOR_STEP.0))
            .map(|x| Self::meridian(x, minor.y0, minor.y1));
        let minor_parallels = range((minor.y0 / dy).ceil() * dy, minor.y1, dy)
            .into_iter()
            .filter(|&y| off_major(y, MAJOR_STEP.1))
            .map(|y| Self::parallel(y, minor.x0, minor.x1));

        major_meridians
            .chain(major_parallels)
            .chain(minor_meridians)
            .chain(minor_parallels)
            .map(LineString::from)
            .collect()
    }

    /// Closed ring around the major extent: up the west edge, east along the top,
    /// down the east edge, back west along the bottom.
    pub fn outline(&self) -> Polygon<f64> {
        let Extent { x0, x1, y0, y1 } = self.major;

        let mut ring = Self::meridian(x0, y0, y1);
        ring.extend(Self::parallel(y1, x0, x1).into_iter().skip(1));
        ring.extend(Self::meridian(x1, y0, y1).into_iter().rev().skip(1));
        ring.extend(Self::parallel(y0, x0, x1).into_iter().rev().skip(1));

        Polygon::new(LineString::from(ring), vec![])
    }
}
