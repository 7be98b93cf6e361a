//! TopoJSON decoding into per-feature polygon geometries.
//!
//! Topologies store shared boundary arcs once; each polygon ring references arcs by
//! index (`~i`, i.e. `-i - 1`, for a reversed arc). Quantized topologies carry a
//! `transform` and delta-encoded integer positions.

use std::collections::HashMap;

use anyhow::{anyhow, bail, ensure, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::SpatialFeature;

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct TopologyDoc {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    objects: HashMap<String, TopoGeometry>,
}

/// A geometry object; `arcs` stays untyped until `type` says how deep it nests.
#[derive(Debug, Deserialize)]
struct TopoGeometry {
    #[serde(rename = "type")]
    ty: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    geometries: Vec<TopoGeometry>,
}

/// A parsed topology with its arcs already decoded to absolute coordinates.
#[derive(Debug)]
pub struct Topology {
    arcs: Vec<Vec<Coord<f64>>>,
    objects: HashMap<String, TopoGeometry>,
}

impl Topology {
    /// Parse and validate TopoJSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: TopologyDoc = serde_json::from_str(text)
            .context("[io::topojson] Failed to parse topology JSON")?;
        ensure!(doc.ty == "Topology", "[io::topojson] expected type \"Topology\", got {:?}", doc.ty);

        let arcs = doc.arcs.iter().enumerate()
            .map(|(i, arc)| decode_arc(arc, doc.transform.as_ref())
                .with_context(|| format!("[io::topojson] arc {i} is malformed")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { arcs, objects: doc.objects })
    }

    /// Names of the objects in the topology, sorted.
    pub fn object_names(&self) -> Vec<&str> {
        let mut names = self.objects.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Decode object `name` into features. When the topology holds a single object,
    /// it is used regardless of its name.
    pub fn features(&self, name: &str) -> Result<Vec<SpatialFeature>> {
        let object = match self.objects.get(name) {
            Some(object) => object,
            None if self.objects.len() == 1 => self.objects.values().next()
                .ok_or_else(|| anyhow!("[io::topojson] topology has no objects"))?,
            None => bail!("[io::topojson] object {name:?} not found; available: {:?}", self.object_names()),
        };

        match object.ty.as_deref() {
            Some("GeometryCollection") => object.geometries.iter()
                .map(|geometry| self.feature(geometry))
                .collect(),
            _ => Ok(vec![self.feature(object)?]),
        }
    }

    fn feature(&self, geometry: &TopoGeometry) -> Result<SpatialFeature> {
        let shape = match geometry.ty.as_deref() {
            None => None,
            Some("Polygon") => {
                let rings: Vec<Vec<i64>> = self.arc_refs(geometry)?;
                Some(MultiPolygon(vec![self.polygon(&rings)?]))
            }
            Some("MultiPolygon") => {
                let polygons: Vec<Vec<Vec<i64>>> = self.arc_refs(geometry)?;
                let polygons = polygons.iter()
                    .map(|rings| self.polygon(rings))
                    .collect::<Result<Vec<_>>>()?;
                Some(MultiPolygon(polygons))
            }
            Some(other) => bail!("[io::topojson] unsupported geometry type {other:?} for a boundary feature"),
        };

        Ok(SpatialFeature {
            id: geometry.id.clone(),
            properties: geometry.properties.clone().unwrap_or_default(),
            geometry: shape,
        })
    }

    fn arc_refs<T: serde::de::DeserializeOwned>(&self, geometry: &TopoGeometry) -> Result<T> {
        let arcs = geometry.arcs.clone().unwrap_or(Value::Array(vec![]));
        serde_json::from_value(arcs).context("[io::topojson] geometry has malformed arc references")
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Polygon<f64>> {
        let mut rings = rings.iter().map(|refs| self.ring(refs));
        let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
        let interiors = rings.collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, interiors))
    }

    /// Stitch arcs into one ring; consecutive arcs share their joining point.
    fn ring(&self, refs: &[i64]) -> Result<LineString<f64>> {
        let mut points: Vec<Coord<f64>> = Vec::new();
        for &arc_ref in refs {
            let (index, reversed) = if arc_ref < 0 { (!arc_ref as usize, true) } else { (arc_ref as usize, false) };
            let arc = self.arcs.get(index)
                .ok_or_else(|| anyhow!("[io::topojson] arc index {arc_ref} out of range ({} arcs)", self.arcs.len()))?;

            points.pop();
            if reversed {
                points.extend(arc.iter().rev());
            } else {
                points.extend(arc.iter());
            }
        }
        // degenerate rings are padded so they still close
        if let Some(&first) = points.first() {
            while points.len() < 4 { points.push(first) }
        }
        Ok(LineString::new(points))
    }
}

/// Absolute coordinates of one arc, undoing quantization if a transform is present.
fn decode_arc(positions: &[Vec<f64>], transform: Option<&Transform>) -> Result<Vec<Coord<f64>>> {
    let mut coords = Vec::with_capacity(positions.len());
    let (mut x, mut y) = (0.0, 0.0);
    for position in positions {
        let [px, py] = position.get(..2)
            .and_then(|p| <[f64; 2]>::try_from(p).ok())
            .ok_or_else(|| anyhow!("[io::topojson] position with fewer than two values"))?;
        coords.push(match transform {
            Some(t) => {
                x += px;
                y += py;
                Coord { x: x * t.scale[0] + t.translate[0], y: y * t.scale[1] + t.translate[1] }
            }
            None => Coord { x: px, y: py },
        });
    }
    Ok(coords)
}

/// Decode `object` of the topology in `text` into features.
pub fn decode_features(text: &str, object: &str) -> Result<Vec<SpatialFeature>> {
    Topology::from_json(text)?.features(object)
}
