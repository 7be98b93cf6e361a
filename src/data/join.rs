//! Attach tabular attributes to spatial features by key.

use ahash::AHashMap;
use anyhow::{ensure, Result};
use tracing::debug;

use super::{AttributeRecord, JoinedFeature, SpatialFeature};

/// Join `records` onto `features` through the `key_field` property.
///
/// The record index is built once, so the join is linear in the number of features.
/// Every named attribute of a matching record is copied (parsed, NaN if not numeric);
/// features without a match get no attributes. Inputs are left untouched.
pub fn join(
    features: &[SpatialFeature],
    records: &[AttributeRecord],
    attribute_names: &[String],
    key_field: &str,
) -> Result<Vec<JoinedFeature>> {
    let mut index: AHashMap<&str, &AttributeRecord> = AHashMap::with_capacity(records.len());
    for record in records {
        ensure!(index.insert(record.key(), record).is_none(),
            "[data::join] duplicate record key {:?}", record.key());
    }

    let joined = features.iter()
        .map(|feature| {
            let key = feature.key(key_field);
            let attributes: AHashMap<String, f64> = key.as_deref()
                .and_then(|key| index.get(key))
                .map(|record| {
                    attribute_names.iter()
                        .map(|name| (name.clone(), record.value(name)))
                        .collect()
                })
                .unwrap_or_default();
            if let (Some(key), true) = (&key, attributes.is_empty()) {
                debug!("[data::join] feature {key:?} has no matching record");
            }
            JoinedFeature { feature: feature.clone(), key, attributes }
        })
        .collect::<Vec<_>>();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let matched = joined.iter().filter_map(|f| f.key.as_deref()).collect::<ahash::AHashSet<_>>();
        for record in records.iter().filter(|r| !matched.contains(r.key())) {
            debug!("[data::join] record {:?} has no matching feature", record.key());
        }
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn feature(key: &str) -> SpatialFeature {
        let mut properties = Map::new();
        properties.insert("adm1_code".into(), json!(key));
        properties.insert("name".into(), json!(format!("State {key}")));
        SpatialFeature::new(properties, None)
    }

    fn names() -> Vec<String> { vec!["rate".into(), "count".into()] }

    #[test]
    fn matched_features_receive_parsed_values() {
        let features = vec![feature("A"), feature("B")];
        let records = vec![
            AttributeRecord::new("B", [("rate", "20"), ("count", "7")]),
            AttributeRecord::new("A", [("rate", "10.5"), ("count", "3")]),
        ];

        let joined = join(&features, &records, &names(), "adm1_code").unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].attribute("rate"), 10.5);
        assert_eq!(joined[0].attribute("count"), 3.0);
        assert_eq!(joined[1].attribute("rate"), 20.0);
        assert_eq!(joined[1].attributes.len(), 2);
        // identifying properties survive untouched
        assert_eq!(joined[1].feature.properties["name"], Value::from("State B"));
    }

    #[test]
    fn unmatched_feature_has_no_values() {
        let features = vec![feature("A"), feature("Z")];
        let records = vec![AttributeRecord::new("A", [("rate", "1"), ("count", "2")])];

        let joined = join(&features, &records, &names(), "adm1_code").unwrap();
        assert!(joined[0].is_matched());
        assert!(!joined[1].is_matched());
        assert!(joined[1].attribute("rate").is_nan());
    }

    #[test]
    fn non_numeric_values_become_nan_but_are_kept() {
        let records = vec![AttributeRecord::new("A", [("rate", "n/a")])];
        let joined = join(&[feature("A")], &records, &names(), "adm1_code").unwrap();
        assert!(joined[0].attributes.contains_key("rate"));
        assert!(joined[0].attribute("rate").is_nan());
        assert!(joined[0].attribute("count").is_nan());
    }

    #[test]
    fn join_is_idempotent_and_does_not_mutate_inputs() {
        let features = vec![feature("A"), feature("B")];
        let before = features.clone();
        let records = vec![AttributeRecord::new("A", [("rate", "4"), ("count", "5")])];

        let first = join(&features, &records, &names(), "adm1_code").unwrap();
        let second = join(&features, &records, &names(), "adm1_code").unwrap();
        assert_eq!(first, second);
        assert_eq!(features, before);
    }

    #[test]
    fn duplicate_record_keys_fail() {
        let records = vec![
            AttributeRecord::new("A", [("rate", "1")]),
            AttributeRecord::new("A", [("rate", "2")]),
        ];
        assert!(join(&[feature("A")], &records, &names(), "adm1_code").is_err());
    }
}
