//! Domain layer: models plus the aggregation, dashboard, and scoring
//! services. Everything here is a synchronous transform over in-memory
//! data; storage reads and writes happen in the orchestrating methods.

pub mod dashboard_service;
pub mod kpi_service;
pub mod models;
pub mod scoring;

pub use dashboard_service::DashboardService;
pub use kpi_service::KpiService;

/// Percentage of `numerator` over `denominator`, rounded half-up and
/// capped at 100. A zero or negative denominator resolves to 0, never
/// NaN/Infinity.
pub(crate) fn ratio_percent(numerator: f64, denominator: f64) -> u32 {
    if denominator <= 0.0 {
        return 0;
    }
    let percent = (100.0 * numerator / denominator).round();
    if percent >= 100.0 {
        100
    } else if percent <= 0.0 {
        0
    } else {
        percent as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_percent_rounds_half_up() {
        assert_eq!(ratio_percent(20.0, 24.0), 83);
        assert_eq!(ratio_percent(1.0, 8.0), 13); // 12.5 rounds up
    }

    #[test]
    fn ratio_percent_guards_zero_denominator() {
        assert_eq!(ratio_percent(5.0, 0.0), 0);
    }

    #[test]
    fn ratio_percent_caps_at_one_hundred() {
        assert_eq!(ratio_percent(12.0, 8.0), 100);
    }
}
