// File: crates/chart-core/src/downsample.rs
// Summary: Time bucket aggregation for XY series.

/// Aggregate points into buckets of `width` along X, averaging Y.
///
/// Buckets are aligned to multiples of `width`; each output point sits at the
/// start of its bucket. Input must be sorted by X. Non-finite Y values are
/// skipped. A non-positive width returns the finite input unchanged.
pub fn aggregate_time_buckets(points: &[(f64, f64)], width: f64) -> Vec<(f64, f64)> {
    let finite = points.iter().copied().filter(|(_, y)| y.is_finite());
    if width <= 0.0 { return finite.collect(); }

    let mut out: Vec<(f64, f64)> = Vec::new();
    let mut current: Option<(f64, f64, usize)> = None;

    for (x, y) in finite {
        let bucket = (x / width).floor() * width;
        match current {
            Some((start, sum, count)) if start == bucket => {
                current = Some((start, sum + y, count + 1));
            }
            Some((start, sum, count)) => {
                out.push((start, sum / count as f64));
                current = Some((bucket, y, 1));
            }
            None => current = Some((bucket, y, 1)),
        }
    }
    if let Some((start, sum, count)) = current {
        out.push((start, sum / count as f64));
    }
    out
}

/// Mean of the finite Y values, if any.
pub fn mean_y(points: &[(f64, f64)]) -> Option<f64> {
    let (sum, count) = points
        .iter()
        .filter(|(_, y)| y.is_finite())
        .fold((0.0, 0usize), |(s, n), &(_, y)| (s + y, n + 1));
    (count > 0).then(|| sum / count as f64)
}
