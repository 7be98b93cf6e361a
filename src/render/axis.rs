//! Linear scale and axis ticks for the chart.

/// Maps a numeric domain onto a pixel range without clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self { Self { domain, range } }

    #[inline] pub fn domain(&self) -> (f64, f64) { self.domain }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 { return r0 }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = if self.domain.0 <= self.domain.1 { self.domain } else { (self.domain.1, self.domain.0) };
        if count == 0 || !(stop - start).is_finite() { return Vec::new() }
        if start == stop { return vec![start] }

        let step = tick_step(start, stop, count);
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        // multiply integers by the step to keep values like 0.3 exact-looking
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Step of 1, 2, 5 or 10 times a power of ten giving close to `count` intervals.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() { 10.0 }
        else if error >= 10f64.sqrt() { 5.0 }
        else if error >= 2f64.sqrt() { 2.0 }
        else { 1.0 };
    factor * 10f64.powf(power)
}

/// Tick label without trailing zeros.
pub(crate) fn format_tick(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scale_maps_zero_to_baseline_and_fifty_to_top() {
        let y = LinearScale::new((0.0, 50.0), (463.0, 0.0));
        assert_eq!(y.apply(0.0), 463.0);
        assert_eq!(y.apply(50.0), 0.0);
        assert_eq!(y.apply(25.0), 231.5);
        // not clamped
        assert!(y.apply(60.0) < 0.0);
        assert!(y.apply(-10.0) > 463.0);
    }

    #[test]
    fn ten_ticks_over_zero_to_fifty() {
        let ticks = LinearScale::new((0.0, 50.0), (463.0, 0.0)).ticks(10);
        assert_eq!(ticks, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0]);
    }

    #[test]
    fn small_domains_use_fractional_steps() {
        let ticks = LinearScale::new((0.0, 1.0), (0.0, 100.0)).ticks(5);
        assert_eq!(ticks.len(), 6);
        assert_eq!(format_tick(ticks[1]), "0.2");
    }

    #[test]
    fn labels_drop_trailing_zeros() {
        assert_eq!(format_tick(45.0), "45");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(-0.0), "0");
    }
}
