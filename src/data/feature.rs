use ahash::AHashMap;
use geo::MultiPolygon;
use serde_json::{Map, Value};

use super::ExpressedAttribute;

/// One state's boundary plus the identifying properties it was decoded with.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialFeature {
    pub id: Option<Value>,
    pub properties: Map<String, Value>,
    /// `None` for features whose topology geometry was null.
    pub geometry: Option<MultiPolygon<f64>>,
}

impl SpatialFeature {
    pub fn new(properties: Map<String, Value>, geometry: Option<MultiPolygon<f64>>) -> Self {
        Self { id: None, properties, geometry }
    }

    /// Join key read from `field`. Strings are used as-is, numbers by their JSON text.
    pub fn key(&self, field: &str) -> Option<String> {
        match self.properties.get(field)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A feature together with the attribute values copied from its matching record.
/// Unmatched features carry an empty attribute map.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedFeature {
    pub feature: SpatialFeature,
    pub key: Option<String>,
    pub attributes: AHashMap<String, f64>,
}

impl JoinedFeature {
    /// Value of `name`; NaN when the feature had no match or the value was not numeric.
    pub fn attribute(&self, name: &str) -> f64 {
        self.attributes.get(name).copied().unwrap_or(f64::NAN)
    }

    #[inline]
    pub fn value(&self, attribute: &ExpressedAttribute) -> f64 { self.attribute(attribute.name()) }

    #[inline] pub fn is_matched(&self) -> bool { !self.attributes.is_empty() }
}
