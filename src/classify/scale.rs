use crate::{data::{AttributeRecord, ExpressedAttribute}, io::Rgb};

/// Quantile color scale: each palette color covers roughly the same number of records.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    /// Sorted finite domain values.
    domain: Vec<f64>,
    /// `palette.len() - 1` ascending break points.
    thresholds: Vec<f64>,
    palette: Vec<Rgb>,
    no_data: Rgb,
}

/// Quantile of sorted `values` at `p`, interpolating between closest ranks (R-7).
fn quantile_sorted(values: &[f64], p: f64) -> Option<f64> {
    let n = values.len();
    if n == 0 { return None }
    if n == 1 || p <= 0.0 { return values.first().copied() }
    if p >= 1.0 { return values.last().copied() }

    let h = (n - 1) as f64 * p;
    let i = h.floor() as usize;
    let (lo, hi) = (values[i], values[(i + 1).min(n - 1)]);
    Some(lo + (hi - lo) * (h - i as f64))
}

impl ColorScale {
    /// Fit the scale to `values`. Non-finite values are tolerated and left out of the fit.
    pub fn fit(values: impl IntoIterator<Item = f64>, palette: &[Rgb], no_data: Rgb) -> Self {
        assert!(!palette.is_empty(), "[classify] palette must not be empty");

        let mut domain = values.into_iter().filter(|v| v.is_finite()).collect::<Vec<_>>();
        domain.sort_by(f64::total_cmp);

        let classes = palette.len();
        let thresholds = (1..classes)
            .filter_map(|i| quantile_sorted(&domain, i as f64 / classes as f64))
            .collect();

        Self { domain, thresholds, palette: palette.to_vec(), no_data }
    }

    /// Fit over the expressed attribute of every record.
    pub fn from_records(records: &[AttributeRecord], attribute: &ExpressedAttribute, palette: &[Rgb], no_data: Rgb) -> Self {
        Self::fit(records.iter().map(|record| record.value(attribute.name())), palette, no_data)
    }

    #[inline] pub fn domain(&self) -> &[f64] { &self.domain }

    #[inline] pub fn thresholds(&self) -> &[f64] { &self.thresholds }

    /// Palette index for `value`, or `None` when it is not a finite number.
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if !value.is_finite() { return None }
        Some(self.thresholds.partition_point(|&t| t <= value))
    }

    /// Fill color for `value`.
    pub fn apply(&self, value: f64) -> Rgb {
        self.bucket(value)
            .map(|i| self.palette[i])
            .unwrap_or(self.no_data)
    }
}
