use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Qualitative performance band for a metric measured against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    Excellent,
    Good,
    Warning,
    Poor,
}

/// Filter selecting which slice of the data the dashboard should show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthFilter {
    /// Calendar month, 1-12
    pub month: u32,
    /// Four-digit year
    pub year: i32,
    /// Restrict to a single division; None means company-wide
    pub division_id: Option<String>,
}

impl Default for MonthFilter {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
            division_id: None,
        }
    }
}

/// Sums re-derived directly from the month's daily submissions.
///
/// These are always recomputed from raw entries (never read back from
/// cached KPI rows) so the summary cards stay fresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub service_revenue: f64,
    pub retail_sales: f64,
    pub hours_worked: f64,
    pub hours_booked: f64,
    pub consults: u32,
    pub consult_converted: u32,
    pub new_clients: u32,
}

/// One division's row on the company scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionPerformance {
    pub division_id: String,
    pub name: String,
    /// Revenue after the three-tier fallback (explicit revenue fields,
    /// else average ticket x new clients, else 0)
    pub total_revenue: f64,
    pub productivity_rate: u32,
    pub prebook_rate: u32,
    pub new_clients: u32,
    pub average_ticket: f64,
}

/// Productivity value for one division at one trend month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendValue {
    pub division_id: String,
    pub productivity_rate: u32,
}

/// One of the six points on the productivity trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Short month + year label, e.g. "Jan 2025"
    pub label: String,
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    pub values: Vec<TrendValue>,
}

/// Company-wide snapshot plus trend series for the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    pub company_sales: f64,
    /// Mean of per-division productivity rates, rounded
    pub company_productivity: u32,
    pub service_revenue: f64,
    pub retail_sales: f64,
    pub consults: u32,
    pub consult_converted: u32,
    pub daily: DailyMetrics,
    pub divisions: Vec<DivisionPerformance>,
    pub trend: Vec<TrendPoint>,
}

impl DashboardMetrics {
    /// Empty snapshot used when composition fails; the view renders zeros
    /// instead of blanking out.
    pub fn zeroed(month: String, year: i32) -> Self {
        Self {
            month,
            year,
            company_sales: 0.0,
            company_productivity: 0,
            service_revenue: 0.0,
            retail_sales: 0.0,
            consults: 0,
            consult_converted: 0,
            daily: DailyMetrics::default(),
            divisions: Vec::new(),
            trend: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_filter_defaults_to_current_month() {
        let filter = MonthFilter::default();
        assert!((1..=12).contains(&filter.month));
        assert!(filter.division_id.is_none());
    }

    #[test]
    fn zeroed_metrics_have_no_divisions_or_trend() {
        let metrics = DashboardMetrics::zeroed("03".to_string(), 2025);
        assert_eq!(metrics.month, "03");
        assert_eq!(metrics.company_sales, 0.0);
        assert!(metrics.divisions.is_empty());
        assert!(metrics.trend.is_empty());
    }

    #[test]
    fn score_level_serializes_lowercase() {
        let json = serde_json::to_string(&ScoreLevel::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
    }
}
