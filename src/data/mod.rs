//! Attribute records, spatial features and the join between them.

mod feature;
mod join;
mod record;

pub use feature::{JoinedFeature, SpatialFeature};
pub use join::join;
pub use record::{parse_value, AttributeRecord, AttributeTable, ExpressedAttribute};
