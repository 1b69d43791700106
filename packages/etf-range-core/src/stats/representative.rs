//! Representative values: two-decimal rounding, linear quantiles and rounded modes.

use std::collections::BTreeMap;

/// Round to two decimal places, ties to even on the exact decimal value.
///
/// `1.115` is stored as `1.11499...` and rounds down; `10.125` is an exact tie
/// and rounds to the even `10.12`. Non-finite values pass through.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }

    let floor = scaled.floor();
    if scaled - floor == 0.5 {
        // Fused multiply-add yields the exact rounding error of the product.
        let residual = value.mul_add(100.0, -scaled);
        if residual > 0.0 {
            return (floor + 1.0) / 100.0;
        }
        if residual < 0.0 {
            return floor / 100.0;
        }
    }
    scaled.round_ties_even() / 100.0
}

/// Round to two decimal places by scaling to cents, ties to even.
///
/// Works on `value * 100`, so a product landing exactly on `.5` counts as a
/// tie even when the input was slightly below it (`1.115` gives `1.12`).
/// This is how a price table is rounded column-wise.
#[inline]
pub fn round2_scaled(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Quantile with linear interpolation between order statistics.
///
/// For sorted values `x` of length `n`, the position is `h = (n - 1) * q` and
/// the result is `x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])`.
/// `q` is clamped to `[0, 1]`.
///
/// # Returns
///
/// `None` for an empty slice.
///
/// # Example
///
/// ```rust
/// use etf_range_core::stats::quantile_linear;
///
/// let values = vec![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile_linear(&values, 0.75), Some(3.25));
/// assert_eq!(quantile_linear(&values, 0.25), Some(1.75));
/// ```
pub fn quantile_linear(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Most frequent value after rounding each input to two decimals.
///
/// Ties go to the smallest value among the most frequent ones.
///
/// # Returns
///
/// `None` for an empty slice.
pub fn mode_rounded(values: &[f64]) -> Option<f64> {
    // Keyed by integer cents so equal rounded prices compare exactly.
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &value in values {
        *counts.entry((value * 100.0).round_ties_even() as i64).or_insert(0) += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (&cents, &count) in &counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((cents, count)),
        }
    }

    best.map(|(cents, _)| cents as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round2() {
        assert_eq!(round2(8.333333), 8.33);
        assert_eq!(round2(6.6377605), 6.64);
        assert_eq!(round2(-1.234), -1.23);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(10.125), 10.12);
        assert_eq!(round2(0.375), 0.38);
        // Stored just below the tie
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(-0.125), -0.12);
        assert!(round2(f64::INFINITY).is_infinite());
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn test_round2_scaled() {
        assert_eq!(round2_scaled(10.125), 10.12);
        assert_eq!(round2_scaled(1.115), 1.12);
        assert_eq!(round2_scaled(8.333333), 8.33);
        assert!(round2_scaled(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_quantile_linear_interpolates() {
        let values = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        assert_relative_eq!(quantile_linear(&values, 0.5).unwrap(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(quantile_linear(&values, 0.75).unwrap(), 40.0, epsilon = 1e-9);
        assert_relative_eq!(quantile_linear(&values, 0.1).unwrap(), 14.0, epsilon = 1e-9);
        assert_relative_eq!(quantile_linear(&values, 0.0).unwrap(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(quantile_linear(&values, 1.0).unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quantile_linear_unsorted_input() {
        let values = vec![3.0, 1.0, 4.0, 2.0];
        assert_relative_eq!(quantile_linear(&values, 0.75).unwrap(), 3.25, epsilon = 1e-9);
        assert_relative_eq!(quantile_linear(&values, 0.25).unwrap(), 1.75, epsilon = 1e-9);
    }

    #[test]
    fn test_quantile_linear_single_and_empty() {
        assert_eq!(quantile_linear(&[7.5], 0.25), Some(7.5));
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn test_mode_rounded_basic() {
        assert_eq!(mode_rounded(&[10.0, 10.0, 12.0, 11.0]), Some(10.0));
        assert_eq!(mode_rounded(&[5.0, 5.0, 6.0, 5.0]), Some(5.0));
    }

    #[test]
    fn test_mode_rounded_groups_after_rounding() {
        // 100.004 and 100.001 both round to 100.00
        let values = vec![100.004, 101.5, 100.001, 101.5, 100.0];
        assert_eq!(mode_rounded(&values), Some(100.0));
    }

    #[test]
    fn test_mode_rounded_tie_takes_smallest() {
        let values = vec![12.0, 11.0, 12.0, 11.0, 13.0];
        assert_eq!(mode_rounded(&values), Some(11.0));

        // All distinct: every value ties, smallest wins
        let values = vec![503.21, 499.87, 501.02];
        assert_eq!(mode_rounded(&values), Some(499.87));
    }

    #[test]
    fn test_mode_rounded_ties_to_even_cents() {
        // 10.125 lands on 1012.5 cents and rounds to 10.12
        let values = vec![10.125, 10.125, 10.13];
        assert_eq!(mode_rounded(&values), Some(10.12));
    }

    #[test]
    fn test_mode_rounded_empty() {
        assert_eq!(mode_rounded(&[]), None);
    }
}
