use std::fmt;

use geo::{Coord, Geometry, LineString, MultiPolygon, Polygon};

use super::Projection;

/// A single drawing command in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
}

/// Sequence of drawing commands produced for one geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawablePath(pub Vec<PathCommand>);

impl DrawablePath {
    #[inline] pub fn commands(&self) -> &[PathCommand] { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Number of subpaths (MoveTo commands).
    pub fn subpaths(&self) -> usize {
        self.0.iter().filter(|c| matches!(c, PathCommand::MoveTo(..))).count()
    }
}

impl fmt::Display for DrawablePath {
    /// SVG path data: "Mx,y Lx,y ... Z"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.0.iter().enumerate() {
            if i > 0 && !matches!(command, PathCommand::ClosePath) { f.write_str(" ")? }
            match command {
                PathCommand::MoveTo(x, y) => write!(f, "M{x:.3},{y:.3}")?,
                PathCommand::LineTo(x, y) => write!(f, "L{x:.3},{y:.3}")?,
                PathCommand::ClosePath => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Turns geographic geometries into drawable paths through a fixed projection.
/// Holds no mutable state, so one generator serves every feature.
#[derive(Clone, Copy, Debug)]
pub struct PathGenerator<'a> {
    projection: &'a Projection,
}

impl<'a> PathGenerator<'a> {
    pub fn new(projection: &'a Projection) -> Self { Self { projection } }

    pub fn generate(&self, geometry: &Geometry<f64>) -> DrawablePath {
        let mut out = Vec::new();
        self.append(geometry, &mut out);
        DrawablePath(out)
    }

    /// Borrowed shortcut for the common case of a state outline.
    pub fn multipolygon(&self, shape: &MultiPolygon<f64>) -> DrawablePath {
        let mut out = Vec::new();
        shape.0.iter().for_each(|polygon| self.polygon(polygon, &mut out));
        DrawablePath(out)
    }

    /// Borrowed shortcut for an open polyline such as a graticule line.
    pub fn line_string(&self, line: &LineString<f64>) -> DrawablePath {
        let mut out = Vec::new();
        self.line(&line.0, &mut out);
        DrawablePath(out)
    }

    fn append(&self, geometry: &Geometry<f64>, out: &mut Vec<PathCommand>) {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
            Geometry::Line(line) => self.line(&[line.start, line.end], out),
            Geometry::LineString(ls) => self.line(&ls.0, out),
            Geometry::MultiLineString(mls) => mls.0.iter().for_each(|ls| self.line(&ls.0, out)),
            Geometry::Polygon(polygon) => self.polygon(polygon, out),
            Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|polygon| self.polygon(polygon, out)),
            Geometry::Rect(rect) => self.polygon(&rect.to_polygon(), out),
            Geometry::Triangle(triangle) => self.polygon(&triangle.to_polygon(), out),
            Geometry::GeometryCollection(collection) => collection.0.iter().for_each(|g| self.append(g, out)),
        }
    }

    /// Open polyline, broken wherever consecutive vertices straddle the projection seam.
    fn line(&self, coords: &[Coord<f64>], out: &mut Vec<PathCommand>) {
        let mut previous: Option<f64> = None;
        for coord in coords {
            let lambda = self.projection.rotated_longitude(coord.x);
            let (x, y) = self.projection.project(coord);
            let jump = previous.is_some_and(|p| (lambda - p).abs() > 180.0);
            out.push(if previous.is_none() || jump { PathCommand::MoveTo(x, y) } else { PathCommand::LineTo(x, y) });
            previous = Some(lambda);
        }
    }

    fn polygon(&self, polygon: &Polygon<f64>, out: &mut Vec<PathCommand>) {
        self.ring(polygon.exterior(), out);
        for interior in polygon.interiors() {
            self.ring(interior, out);
        }
    }

    /// Closed ring as "M ... L ... Z"; the duplicated closing vertex is dropped.
    fn ring(&self, ring: &LineString<f64>, out: &mut Vec<PathCommand>) {
        let coords = match ring.0.as_slice() {
            [rest @ .., last] if rest.len() > 1 && rest.first() == Some(last) => rest,
            coords => coords,
        };
        if coords.is_empty() { return }

        let mut projected = coords.iter().map(|coord| self.projection.project(coord));
        if let Some((x, y)) = projected.next() {
            out.push(PathCommand::MoveTo(x, y));
            out.extend(projected.map(|(x, y)| PathCommand::LineTo(x, y)));
            out.push(PathCommand::ClosePath);
        }
    }
}
