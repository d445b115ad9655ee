//! Pure scoring and formatting helpers for dashboard display.
//!
//! Everything here is stateless and deterministic: a metric value plus its
//! target maps to a qualitative level, a color token, and an uncapped
//! percent-of-target; amounts format as US-style currency strings.

use shared::ScoreLevel;

/// Ratio thresholds for the qualitative bands.
const EXCELLENT_RATIO: f64 = 1.0;
const GOOD_RATIO: f64 = 0.85;
const WARNING_RATIO: f64 = 0.70;

/// Classify a metric against its target.
///
/// A non-positive target cannot be meaningfully met, so it always scores
/// Poor regardless of the value.
pub fn score_level(value: f64, target: f64) -> ScoreLevel {
    if target <= 0.0 {
        return ScoreLevel::Poor;
    }
    let ratio = value / target;
    if ratio >= EXCELLENT_RATIO {
        ScoreLevel::Excellent
    } else if ratio >= GOOD_RATIO {
        ScoreLevel::Good
    } else if ratio >= WARNING_RATIO {
        ScoreLevel::Warning
    } else {
        ScoreLevel::Poor
    }
}

/// Color token for a score level, matching the dashboard palette.
pub fn score_color(level: ScoreLevel) -> &'static str {
    match level {
        ScoreLevel::Excellent => "#22c55e",
        ScoreLevel::Good => "#3b82f6",
        ScoreLevel::Warning => "#f59e0b",
        ScoreLevel::Poor => "#ef4444",
    }
}

/// Percent of target as a rounded integer, deliberately uncapped above
/// 100 so over-performance stays visible. Non-positive targets yield 0.
pub fn score_percentage(value: f64, target: f64) -> u32 {
    if target <= 0.0 {
        return 0;
    }
    (100.0 * value / target).round().max(0.0) as u32
}

/// Format an amount as a US-style currency string: comma-grouped integer
/// part, two decimals, minus sign ahead of the dollar sign.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}
