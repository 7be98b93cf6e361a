use std::cmp::Ordering;

use tracing::debug;

use crate::{
    classify::ColorScale,
    config::ChartConfig,
    data::{AttributeRecord, ExpressedAttribute},
    io::SvgCanvas,
};

use super::axis::{format_tick, LinearScale};

pub(crate) const CHART_STYLES: &str = r#"
    .chartBackground { fill: #ffffff; }
    .chartFrame { fill: none; stroke: #999999; stroke-width: 3px; shape-rendering: crispEdges; }
    .chartTitle { font-size: 1.5em; font-weight: bold; }
    .axis line, .axis path { fill: none; stroke: #000000; shape-rendering: crispEdges; }
    .axis text { font-size: 10px; font-family: sans-serif; }
"#;

/// Descending by value; non-finite values go last. Ties keep input order.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Records in paint order: stably sorted by descending value of `attribute`.
pub fn sort_for_chart<'a>(records: &'a [AttributeRecord], attribute: &ExpressedAttribute) -> Vec<&'a AttributeRecord> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| descending(a.value(attribute.name()), b.value(attribute.name())));
    sorted
}

/// Draw one bar per record plus the title, the value axis and the frame.
///
/// Bar `i` of the sorted sequence takes the `i`-th horizontal slot; its height comes
/// from the fixed linear value scale, which is not clamped. Fills come from the same
/// `scale` the map uses.
pub fn render_chart(
    records: &[AttributeRecord],
    attribute: &ExpressedAttribute,
    scale: &ColorScale,
    layout: &ChartConfig,
    canvas: &mut SvgCanvas,
) {
    let inner_width = layout.inner_width();
    let inner_height = layout.inner_height();
    let y = LinearScale::new(layout.domain, (inner_height, 0.0));

    canvas.rect("chartBackground", layout.left_padding, layout.top_bottom_padding, inner_width, inner_height, None);

    let sorted = sort_for_chart(records, attribute);
    let slot = if sorted.is_empty() { 0.0 } else { inner_width / sorted.len() as f64 };
    for (i, record) in sorted.iter().enumerate() {
        let value = record.value(attribute.name());
        // bars without a value sit flat on the baseline
        let top = if value.is_finite() { y.apply(value) } else { inner_height };
        canvas.rect(
            format!("bar {}", record.key()),
            i as f64 * slot + layout.left_padding,
            top + layout.top_bottom_padding,
            (slot - 1.0).max(0.0),
            inner_height - top,
            Some(scale.apply(value)),
        );
    }

    let (title_x, title_y) = layout.title_position;
    canvas.text("chartTitle", title_x, title_y, None, format!("{attribute} in each state"));

    draw_axis(&y, layout, canvas);

    canvas.rect("chartFrame", layout.left_padding, layout.top_bottom_padding, inner_width, inner_height, None);

    debug!("[render::chart] drew {} bars for {attribute}", sorted.len());
}

/// Left axis: domain line plus a tick mark and label per tick.
fn draw_axis(y: &LinearScale, layout: &ChartConfig, canvas: &mut SvgCanvas) {
    const TICK_SIZE: f64 = 6.0;
    let (x, dy) = (layout.left_padding, layout.top_bottom_padding);
    let (d0, d1) = y.domain();

    canvas.path("axis domain", format!("M{:.3},{:.3}H{x:.3}V{:.3}H{:.3}",
        x - TICK_SIZE, y.apply(d0) + dy, y.apply(d1) + dy, x - TICK_SIZE), None);

    for tick in y.ticks(layout.ticks) {
        let ty = y.apply(tick) + dy;
        canvas.line("axis tick", (x - TICK_SIZE, ty), (x, ty));
        canvas.text("axis label", x - TICK_SIZE - 3.0, ty + 3.0, Some("end"), format_tick(tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::{CHART, NO_DATA, PALETTE}, io::Element};

    fn records(values: &[(&str, &str)]) -> Vec<AttributeRecord> {
        values.iter().map(|(key, rate)| AttributeRecord::new(*key, [("rate", *rate)])).collect()
    }

    fn draw(records: &[AttributeRecord]) -> SvgCanvas {
        let rate = ExpressedAttribute::new("rate");
        let scale = ColorScale::from_records(records, &rate, &PALETTE, NO_DATA);
        let mut canvas = SvgCanvas::new("chart", CHART.width, CHART.height);
        render_chart(records, &rate, &scale, &CHART, &mut canvas);
        canvas
    }

    fn bars(canvas: &SvgCanvas) -> Vec<(String, f64, f64, f64)> {
        canvas.elements_with_class("bar")
            .map(|e| match e {
                Element::Rect { class, x, y, height, .. } => (class.clone(), *x, *y, *height),
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn bars_are_ranked_descending_regardless_of_input_order() {
        for input in [
            records(&[("A", "5"), ("B", "50"), ("C", "25")]),
            records(&[("C", "25"), ("A", "5"), ("B", "50")]),
        ] {
            let bars = bars(&draw(&input));
            let order = bars.iter().map(|b| b.0.as_str()).collect::<Vec<_>>();
            assert_eq!(order, vec!["bar B", "bar C", "bar A"]);
            assert!(bars[0].1 < bars[1].1 && bars[1].1 < bars[2].1);
            assert_eq!(bars[0].1, CHART.left_padding);
        }
    }

    #[test]
    fn bar_geometry_follows_the_value_scale() {
        let bars = bars(&draw(&records(&[("B", "50"), ("A", "25"), ("Z", "0")])));
        // 50 reaches the top of the inner frame
        assert_eq!(bars[0].2, CHART.top_bottom_padding);
        assert_eq!(bars[0].3, CHART.inner_height());
        assert_eq!(bars[1].3, CHART.inner_height() / 2.0);
        assert_eq!(bars[2].3, 0.0);
        assert_eq!(bars[1].1, CHART.inner_width() / 3.0 + CHART.left_padding);
    }

    #[test]
    fn values_above_the_domain_are_not_clamped() {
        let bars = bars(&draw(&records(&[("A", "100")])));
        assert!(bars[0].2 < 0.0);
        assert!(bars[0].3 > CHART.inner_height());
    }

    #[test]
    fn missing_values_draw_flat_no_data_bars_last() {
        let canvas = draw(&records(&[("A", "n/a"), ("B", "10"), ("C", "20")]));
        let drawn = canvas.elements_with_class("bar").collect::<Vec<_>>();
        assert_eq!(drawn.last().unwrap().class(), "bar A");
        assert_eq!(drawn.last().unwrap().fill(), Some(NO_DATA));
        assert_eq!(bars(&canvas)[2].3, 0.0);
    }

    #[test]
    fn decorations_are_drawn_once() {
        let canvas = draw(&records(&[("A", "1"), ("B", "2"), ("C", "3"), ("D", "4")]));
        assert_eq!(canvas.elements_with_class("chartTitle").count(), 1);
        assert_eq!(canvas.elements_with_class("chartFrame").count(), 1);
        assert_eq!(canvas.elements_with_class("domain").count(), 1);
        assert_eq!(canvas.elements_with_class("tick").count(), 11);
        assert!(matches!(canvas.elements().last(), Some(Element::Rect { class, .. }) if class == "chartFrame"));
    }

    #[test]
    fn empty_dataset_still_draws_decorations() {
        let canvas = draw(&[]);
        assert_eq!(canvas.elements_with_class("bar").count(), 0);
        assert_eq!(canvas.elements_with_class("chartFrame").count(), 1);
    }
}
