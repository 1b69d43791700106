//! Plain-text rendering of range summaries.
//!
//! Percentages always carry two decimals and a sign; absent values render as `-`.

use std::fmt::Write;

use crate::types::{RangeDay, RangeSummary};

/// Placeholder for values that were not computed.
pub const PLACEHOLDER: &str = "-";

/// Format a percentage as `+8.33%`, `-1.20%` or `0.00%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.2}%", v),
        Some(v) if v < 0.0 => format!("{:.2}%", v),
        Some(_) => "0.00%".to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a price with two decimals.
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => PLACEHOLDER.to_string(),
    }
}

fn day_line(label: &str, day: &RangeDay) -> String {
    format!(
        "{:<22}{}  H {:.2}  L {:.2}  C {:.2}  ({})",
        label,
        day.bar.date,
        day.bar.high,
        day.bar.low,
        day.bar.close,
        format_percent(Some(day.range_ratio)),
    )
}

/// Render the headline figures and range days of a summary.
pub fn render_summary(summary: &RangeSummary) -> String {
    let mut out = String::new();
    let rows = [
        ("Symbol", summary.symbol.clone()),
        ("Policy", summary.policy.to_string()),
        ("Representative high", format_price(Some(summary.representative_high))),
        ("Representative low", format_price(Some(summary.representative_low))),
        ("Width ratio", format_percent(Some(summary.width_ratio_percent))),
        ("Purchase price", format_price(summary.purchase_price)),
        ("Current price", format_price(Some(summary.current_price))),
        ("Profit", format_percent(summary.profit_percent)),
        ("Profit after tax", format_percent(summary.tax_adjusted_profit_percent)),
    ];

    for (label, value) in rows {
        let _ = writeln!(out, "{:<22}{}", label, value);
    }
    let _ = writeln!(out, "{}", day_line("Narrowest day", &summary.min_range_day));
    let _ = writeln!(out, "{}", day_line("Widest day", &summary.max_range_day));

    out
}

/// Render every day as a fixed-width table.
pub fn render_table(days: &[RangeDay]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12}{:>10}{:>10}{:>10}{:>10}",
        "Date", "High", "Low", "Close", "Range %"
    );
    for day in days {
        let _ = writeln!(
            out,
            "{:<12}{:>10.2}{:>10.2}{:>10.2}{:>10.2}",
            day.bar.date.to_string(),
            day.bar.high,
            day.bar.low,
            day.bar.close,
            day.range_ratio
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{compute_summary, SummaryRequest};
    use crate::types::{DailyBar, PriceSeries};
    use chrono::NaiveDate;

    fn series() -> PriceSeries {
        let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        PriceSeries::new(
            "VOO",
            vec![
                DailyBar::new(day(3), 10.0, 5.0, 9.0),
                DailyBar::new(day(4), 10.0, 5.0, 9.5),
                DailyBar::new(day(5), 12.0, 6.0, 11.0),
                DailyBar::new(day(6), 11.0, 5.0, 10.0),
            ],
        )
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(8.33)), "+8.33%");
        assert_eq!(format_percent(Some(-1.2)), "-1.20%");
        assert_eq!(format_percent(Some(0.0)), "0.00%");
        assert_eq!(format_percent(None), "-");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(650.0)), "650.00");
        assert_eq!(format_price(Some(612.345)), "612.35");
        assert_eq!(format_price(None), "-");
    }

    #[test]
    fn test_render_summary_without_purchase() {
        let summary = compute_summary(&series(), &SummaryRequest::default()).unwrap();
        let text = render_summary(&summary);

        assert!(text.contains("Representative high   10.00"));
        assert!(text.contains("Width ratio           +100.00%"));
        assert!(text.contains("Purchase price        -"));
        assert!(text.contains("Profit after tax      -"));
        assert!(text.contains("Narrowest day"));
    }

    #[test]
    fn test_render_summary_with_profit() {
        let request = SummaryRequest::default()
            .with_purchase_price(Some(600.0))
            .with_current_price(Some(650.0));
        let summary = compute_summary(&series(), &request).unwrap();
        let text = render_summary(&summary);

        assert!(text.contains("Profit                +8.33%"));
        assert!(text.contains("Profit after tax      +6.64%"));
    }

    #[test]
    fn test_render_table() {
        let summary = compute_summary(&series(), &SummaryRequest::default()).unwrap();
        let table = render_table(&summary.days);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("2024-06-03"));
        assert!(lines[1].ends_with("100.00"));
    }
}
