//! Descriptive statistics over `f64` samples.
//!
//! Conventions follow the usual dataframe defaults:
//! - standard deviation is the sample estimate (`n - 1` denominator)
//! - quantiles interpolate linearly between the two closest ranks
//!
//! Callers filter out nulls first.

/// Arithmetic mean. `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation. `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() as f64 - 1.0)).sqrt())
}

/// Linear-interpolated quantile of an ascending-sorted sample.
///
/// `q` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() as f64 - 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Median (the 0.5 quantile) of an unsorted sample.
pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile_sorted(&sorted, 0.5)
}

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Count, mean, std, min, quartiles and max of a sample.
pub fn describe(values: &[f64]) -> Describe {
    let sorted = sorted_copy(values);
    Describe {
        count: sorted.len(),
        mean: mean(&sorted),
        std: sample_std(&sorted),
        min: sorted.first().copied(),
        q25: quantile_sorted(&sorted, 0.25),
        q50: quantile_sorted(&sorted, 0.50),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Round to `decimals` places; exact halves go to the even digit.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate_linearly() {
        let d = describe(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(d.count, 4);
        assert_eq!(d.min, Some(1.0));
        assert_eq!(d.max, Some(4.0));
        assert!((d.q25.unwrap() - 1.75).abs() < 1e-12);
        assert!((d.q50.unwrap() - 2.5).abs() < 1e-12);
        assert!((d.q75.unwrap() - 3.25).abs() < 1e-12);
        assert!((d.mean.unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn std_uses_sample_denominator() {
        let s = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((s - 2.138089935).abs() < 1e-8);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn empty_sample_has_no_moments() {
        let d = describe(&[]);
        assert_eq!(d.count, 0);
        assert_eq!(d.mean, None);
        assert_eq!(d.q50, None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_of_odd_and_even_samples() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(1234.5678, 2), 1234.57);
        assert_eq!(round_to(-0.125, 1), -0.1);
    }

    #[test]
    fn round_to_sends_halves_to_even() {
        assert_eq!(round_to(1000.125, 2), 1000.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
