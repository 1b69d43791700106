//! Per-day range ratios and the narrowest/widest days of a series.

use super::representative::round2_scaled;
use crate::types::{DailyBar, RangeDay};

/// Intraday range ratio `(high - low) / low * 100`, rounded to 2 decimals.
///
/// A zero low yields infinity (or NaN when the high is zero too), which
/// ranks the bar as the widest day.
pub fn range_ratio(high: f64, low: f64) -> f64 {
    round2_scaled((high - low) / low * 100.0)
}

/// Annotate each bar with its range ratio, preserving order.
pub fn annotate_days(bars: &[DailyBar]) -> Vec<RangeDay> {
    bars.iter()
        .map(|&bar| RangeDay {
            bar,
            range_ratio: range_ratio(bar.high, bar.low),
        })
        .collect()
}

/// Find the days with the smallest and largest range ratio.
///
/// Ties resolve to the earliest day. Days with a NaN ratio are skipped; if
/// every ratio is NaN the first day is both min and max.
///
/// # Returns
///
/// `(min_day, max_day)`, or `None` when `days` is empty.
pub fn min_max_range_days(days: &[RangeDay]) -> Option<(RangeDay, RangeDay)> {
    let mut ranked = days.iter().copied().filter(|day| !day.range_ratio.is_nan());
    let first = match ranked.next() {
        Some(day) => day,
        None => {
            let day = *days.first()?;
            return Some((day, day));
        }
    };
    let mut min_day = first;
    let mut max_day = first;

    for day in ranked {
        if day.range_ratio < min_day.range_ratio {
            min_day = day;
        }
        if day.range_ratio > max_day.range_ratio {
            max_day = day;
        }
    }

    Some((min_day, max_day))
}
