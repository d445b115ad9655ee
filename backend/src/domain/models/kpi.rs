//! Monthly KPI scorecard models for divisions and employees.

use serde::{Deserialize, Serialize};

/// One division's monthly scorecard. Composite identity is
/// (division, month, year) with `month` a two-digit string "01".."12".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub division_id: String,
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    /// Booked hours as a percentage of worked hours, 0-100
    pub productivity_rate: u32,
    /// Pre-booked appointments as a percentage of total clients seen, 0-100
    pub prebook_rate: u32,
    /// Consult-conversion ratio, used as the retention proxy until a
    /// dedicated retention signal is captured
    pub first_time_retention_rate: u32,
    /// first_time_retention_rate + 10, capped at 100
    pub repeat_retention_rate: u32,
    /// Retail share of total revenue, 0-100
    pub retail_percentage: u32,
    pub clients_retail_percentage: u32,
    pub new_clients: u32,
    pub average_ticket: f64,
    pub service_sales_per_hour: f64,
    pub hours_sold: f64,
    /// 0-10 scale; a constant 8.5 until a source signal exists
    pub happiness_score: f64,
    /// Despite the name this is a currency-scale amount
    /// (round(total revenue x 0.7)), not a percentage. Downstream
    /// consumers depend on the currency-scale number.
    pub net_cash_percentage: f64,
    /// Raw revenue sums, present only on aggregator-produced rows.
    /// Hand-entered rows leave these absent and the dashboard falls back
    /// to average_ticket x new_clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_sales: Option<f64>,
}

impl KpiData {
    /// All-zero scorecard for a key with no qualifying submissions and no
    /// previously stored row.
    pub fn zeroed(division_id: String, month: String, year: i32) -> Self {
        Self {
            division_id,
            month,
            year,
            productivity_rate: 0,
            prebook_rate: 0,
            first_time_retention_rate: 0,
            repeat_retention_rate: 0,
            retail_percentage: 0,
            clients_retail_percentage: 0,
            new_clients: 0,
            average_ticket: 0.0,
            service_sales_per_hour: 0.0,
            hours_sold: 0.0,
            happiness_score: 0.0,
            net_cash_percentage: 0.0,
            service_revenue: None,
            retail_sales: None,
        }
    }

    pub fn upsert_key(&self) -> Option<String> {
        if self.division_id.is_empty() || self.month.is_empty() {
            return None;
        }
        Some(format!("{}-{}-{}", self.division_id, self.month, self.year))
    }
}

/// One employee's monthly scorecard. Same shape as [`KpiData`] plus the
/// employee-only fields. Composite identity is (employee, month, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeKpiData {
    pub employee_id: String,
    pub division_id: String,
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    pub productivity_rate: u32,
    pub prebook_rate: u32,
    pub first_time_retention_rate: u32,
    pub repeat_retention_rate: u32,
    pub retail_percentage: u32,
    pub clients_retail_percentage: u32,
    pub new_clients: u32,
    pub average_ticket: f64,
    pub service_sales_per_hour: f64,
    pub hours_sold: f64,
    pub happiness_score: f64,
    /// Currency-scale amount, same naming mismatch as on [`KpiData`]
    pub net_cash_percentage: f64,
    pub attendance_rate: u32,
    pub training_hours: f64,
    pub customer_satisfaction_score: f64,
}

impl EmployeeKpiData {
    pub fn upsert_key(&self) -> Option<String> {
        if self.employee_id.is_empty() || self.month.is_empty() {
            return None;
        }
        Some(format!("{}-{}-{}", self.employee_id, self.month, self.year))
    }
}
