/// Interpolated percentile of `samples`.
///
/// Sorts a copy, takes rank `k = (n - 1) * pct / 100` and interpolates
/// linearly between the two bounding order statistics. `pct` is clamped
/// to `[0, 100]`. Returns `None` for an empty slice.
pub fn percentile(samples: &[i64], pct: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let last = sorted.len() - 1;
    let k = last as f64 * (pct.clamp(0.0, 100.0) / 100.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(last);

    if f == c {
        return Some(sorted[f] as f64);
    }

    let lower = sorted[f] as f64;
    let upper = sorted[c] as f64;
    Some(lower + (upper - lower) * (k - f as f64))
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(samples: &[i64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|&v| v as f64).sum();
    Some(sum / samples.len() as f64)
}
