use geo::Geometry;
use tracing::debug;

use crate::{
    classify::ColorScale,
    data::{ExpressedAttribute, JoinedFeature},
    geom::{Graticule, PathGenerator},
    io::SvgCanvas,
};

pub(crate) const MAP_STYLES: &str = r#"
    .gratBackground { fill: #d5e3ff; }
    .gratLines { fill: none; stroke: #999999; stroke-width: 1px; }
    .states { stroke: #ffffff; stroke-width: 0.5px; stroke-linecap: round; }
"#;

/// Draw the graticule background, the graticule lines, then one path per feature.
///
/// States are painted last so they sit above the grid. Features without geometry still
/// get a (empty) path; features without a value get the scale's no-data fill.
pub fn render_map(
    features: &[JoinedFeature],
    attribute: &ExpressedAttribute,
    path: &PathGenerator,
    graticule: &Graticule,
    scale: &ColorScale,
    canvas: &mut SvgCanvas,
) {
    let background = path.generate(&Geometry::Polygon(graticule.outline()));
    canvas.path("gratBackground", background.to_string(), None);

    let lines = graticule.lines();
    for line in &lines {
        canvas.path("gratLines", path.line_string(line).to_string(), None);
    }

    for feature in features {
        let d = feature.feature.geometry.as_ref()
            .map(|shape| path.multipolygon(shape).to_string())
            .unwrap_or_default();
        let class = match &feature.key {
            Some(key) => format!("states {key}"),
            None => "states".to_string(),
        };
        canvas.path(class, d, Some(scale.apply(feature.value(attribute))));
    }

    debug!("[render::map] drew {} grid lines and {} features", lines.len(), features.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{MAP, NO_DATA, PALETTE, US_ALBERS},
        data::{join, AttributeRecord, SpatialFeature},
        geom::Projection,
    };
    use geo::{polygon, MultiPolygon};
    use serde_json::{json, Map};

    fn state(key: &str, lon: f64) -> SpatialFeature {
        let mut properties = Map::new();
        properties.insert("adm1_code".into(), json!(key));
        let square = polygon![(x: lon, y: 35.0), (x: lon + 2.0, y: 35.0), (x: lon + 2.0, y: 37.0), (x: lon, y: 37.0)];
        SpatialFeature::new(properties, Some(MultiPolygon(vec![square])))
    }

    fn draw(features: &[JoinedFeature], scale: &ColorScale) -> SvgCanvas {
        let projection = Projection::albers(&US_ALBERS, MAP.width, MAP.height);
        let path = PathGenerator::new(&projection);
        let graticule = Graticule::new(MAP.graticule_step).centered_on(projection.central_meridian());
        let mut canvas = SvgCanvas::new("map", MAP.width, MAP.height);
        render_map(features, &ExpressedAttribute::new("rate"), &path, &graticule, scale, &mut canvas);
        canvas
    }

    #[test]
    fn draw_order_is_background_lines_states() {
        let records = vec![AttributeRecord::new("A", [("rate", "1")])];
        let features = join(&[state("A", -100.0)], &records, &["rate".into()], "adm1_code").unwrap();
        let scale = ColorScale::fit([1.0], &PALETTE, NO_DATA);
        let canvas = draw(&features, &scale);

        let classes = canvas.elements().iter().map(|e| e.class()).collect::<Vec<_>>();
        assert_eq!(classes.first(), Some(&"gratBackground"));
        assert_eq!(classes.last(), Some(&"states A"));
        assert_eq!(classes.iter().filter(|c| **c == "gratLines").count(), 35);
        assert!(classes[1..36].iter().all(|c| *c == "gratLines"));
    }

    #[test]
    fn every_feature_gets_exactly_one_path() {
        let mut nameless = state("X", -90.0);
        nameless.properties.clear();
        let mut empty = state("C", -80.0);
        empty.geometry = None;
        let features = [state("A", -100.0), state("B", -110.0), empty, nameless];

        let records = vec![AttributeRecord::new("A", [("rate", "3")]), AttributeRecord::new("C", [("rate", "5")])];
        let joined = join(&features, &records, &["rate".into()], "adm1_code").unwrap();
        let scale = ColorScale::fit([3.0, 5.0], &PALETTE, NO_DATA);
        let canvas = draw(&joined, &scale);

        let states = canvas.elements_with_class("states").collect::<Vec<_>>();
        assert_eq!(states.len(), 4);
        assert_ne!(states[0].fill(), Some(NO_DATA));
        // no join match
        assert_eq!(states[1].fill(), Some(NO_DATA));
        // matched, but nothing to draw
        assert!(matches!(states[2], crate::io::Element::Path { d, .. } if d.is_empty()));
        assert_eq!(states[3].class(), "states");
        assert_eq!(states[3].fill(), Some(NO_DATA));
    }
}
