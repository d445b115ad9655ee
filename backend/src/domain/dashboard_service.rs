//! Dashboard composition: one company-wide snapshot plus a six-month
//! productivity trend, built fresh on every call from the persisted
//! collections.
//!
//! [`compose_dashboard`] is a pure function over plain data;
//! [`DashboardService`] loads the collections, runs it, and degrades to a
//! zeroed snapshot when a storage read fails so the view never blanks out.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shared::{
    DailyMetrics, DashboardMetrics, DivisionPerformance, MonthFilter, TrendPoint, TrendValue,
};

use crate::domain::models::{
    month_key, DailySubmission, Division, Employee, EmployeeKpiData, KpiData,
};
use crate::storage::traits::{Connection, EmployeeStorage, KpiStorage, SubmissionStorage};

/// Number of points on the trend chart, current month included.
const TREND_MONTHS: i32 = 6;
/// Jitter half-width for the trend fallback when a month has no data.
const TREND_JITTER: i32 = 5;
/// Company revenue split used when no daily-derived values exist.
const SERVICE_SHARE: f64 = 0.7;
const RETAIL_SHARE: f64 = 0.3;
/// Consult estimates used when no daily-derived counts exist.
const CONSULT_PER_NEW_CLIENT: f64 = 1.5;
const CONSULT_CONVERSION_ESTIMATE: f64 = 0.75;

/// Build the full dashboard snapshot for a month.
///
/// Daily metrics are re-derived from raw submissions with the same
/// active+submitted filter the aggregator uses, never read back from
/// cached scorecards. The trend fallback draws jitter from `rng`, the one
/// intentionally randomized path in the system; callers wanting
/// reproducible output seed it.
#[allow(clippy::too_many_arguments)]
pub fn compose_dashboard(
    month: u32,
    year: i32,
    division_filter: Option<&str>,
    kpi_data: &[KpiData],
    employee_kpis: &[EmployeeKpiData],
    submissions: &[DailySubmission],
    employees: &[Employee],
    divisions: &[Division],
    rng: &mut impl Rng,
) -> DashboardMetrics {
    let daily = derive_daily_metrics(submissions, month, year, division_filter);

    let month_str = month_key(month);
    let shown_divisions: Vec<&Division> = divisions
        .iter()
        .filter(|d| division_filter.map_or(true, |f| d.id == f))
        .collect();

    let mut division_rows = Vec::with_capacity(shown_divisions.len());
    let mut productivity_sum: u64 = 0;
    let mut productivity_count: u32 = 0;
    let mut kpi_new_clients: u32 = 0;

    for division in &shown_divisions {
        let kpi = kpi_data
            .iter()
            .find(|k| k.division_id == division.id && k.month == month_str && k.year == year);

        if let Some(kpi) = kpi {
            productivity_sum += kpi.productivity_rate as u64;
            productivity_count += 1;
            kpi_new_clients += kpi.new_clients;
        }
        division_rows.push(DivisionPerformance {
            division_id: division.id.clone(),
            name: division.name.clone(),
            total_revenue: kpi.map_or(0.0, division_revenue),
            productivity_rate: kpi.map_or(0, |k| k.productivity_rate),
            prebook_rate: kpi.map_or(0, |k| k.prebook_rate),
            new_clients: kpi.map_or(0, |k| k.new_clients),
            average_ticket: kpi.map_or(0.0, |k| k.average_ticket),
        });
    }

    let daily_revenue = daily.service_revenue + daily.retail_sales;
    let company_sales = if daily_revenue > 0.0 {
        daily_revenue
    } else {
        division_rows.iter().map(|d| d.total_revenue).sum()
    };
    let company_productivity = if productivity_count > 0 {
        (productivity_sum as f64 / productivity_count as f64).round() as u32
    } else {
        0
    };

    // Without daily data the revenue split is a fixed 70/30 heuristic.
    let (service_revenue, retail_sales) = if daily_revenue > 0.0 {
        (daily.service_revenue, daily.retail_sales)
    } else {
        (
            (company_sales * SERVICE_SHARE).round(),
            (company_sales * RETAIL_SHARE).round(),
        )
    };

    let (consults, consult_converted) = if daily.consults > 0 {
        (daily.consults, daily.consult_converted)
    } else {
        let base_new_clients = if daily.new_clients > 0 {
            daily.new_clients
        } else {
            kpi_new_clients
        };
        let estimated = (base_new_clients as f64 * CONSULT_PER_NEW_CLIENT).round() as u32;
        (
            estimated,
            (estimated as f64 * CONSULT_CONVERSION_ESTIMATE).round() as u32,
        )
    };

    let trend = build_trend(
        month,
        year,
        &division_rows,
        kpi_data,
        employee_kpis,
        employees,
        rng,
    );

    info!(
        "📈 DASHBOARD: composed {}/{} snapshot: sales={:.2} productivity={} divisions={}",
        month,
        year,
        company_sales,
        company_productivity,
        division_rows.len()
    );

    DashboardMetrics {
        month: month_str,
        year,
        company_sales,
        company_productivity,
        service_revenue,
        retail_sales,
        consults,
        consult_converted,
        daily,
        divisions: division_rows,
        trend,
    }
}

/// Sum the month's active+submitted entries straight from the raw
/// submissions.
fn derive_daily_metrics(
    submissions: &[DailySubmission],
    month: u32,
    year: i32,
    division_filter: Option<&str>,
) -> DailyMetrics {
    let mut daily = DailyMetrics::default();
    let entries = submissions
        .iter()
        .filter(|s| s.is_in_month(month, year))
        .filter(|s| division_filter.map_or(true, |f| s.division_id == f))
        .flat_map(|s| s.entries.iter())
        .filter(|e| e.counts_toward_totals());

    for entry in entries {
        daily.service_revenue += entry.service_revenue;
        daily.retail_sales += entry.retail_sales;
        daily.hours_worked += entry.hours_worked;
        daily.hours_booked += entry.hours_booked;
        daily.consults += entry.consults;
        daily.consult_converted += entry.consult_converted;
        daily.new_clients += entry.new_clients;
    }
    daily
}

/// Three-tier revenue for a division's scorecard row: explicit revenue
/// fields when present and nonzero, else average ticket times new clients,
/// else zero.
fn division_revenue(kpi: &KpiData) -> f64 {
    let explicit = kpi.service_revenue.unwrap_or(0.0) + kpi.retail_sales.unwrap_or(0.0);
    if explicit > 0.0 {
        return explicit;
    }
    let estimated = kpi.average_ticket * kpi.new_clients as f64;
    if estimated > 0.0 {
        estimated
    } else {
        0.0
    }
}

/// Six trend points ending at the selected month. Per division and month,
/// the plotted productivity comes from that month's scorecard if present,
/// else the mean of that month's employee scorecards in the division, else
/// jitter around the division's current productivity.
fn build_trend(
    month: u32,
    year: i32,
    division_rows: &[DivisionPerformance],
    kpi_data: &[KpiData],
    employee_kpis: &[EmployeeKpiData],
    employees: &[Employee],
    rng: &mut impl Rng,
) -> Vec<TrendPoint> {
    let mut trend = Vec::with_capacity(TREND_MONTHS as usize);

    for back in (0..TREND_MONTHS).rev() {
        let mut m = month as i32 - back;
        let mut y = year;
        while m <= 0 {
            m += 12;
            y -= 1;
        }
        let m = m as u32;
        let month_str = month_key(m);
        let label = NaiveDate::from_ymd_opt(y, m, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default();

        let values = division_rows
            .iter()
            .map(|row| TrendValue {
                division_id: row.division_id.clone(),
                productivity_rate: trend_productivity(
                    row,
                    &month_str,
                    y,
                    kpi_data,
                    employee_kpis,
                    employees,
                    rng,
                ),
            })
            .collect();

        trend.push(TrendPoint {
            label,
            month: month_str,
            year: y,
            values,
        });
    }
    trend
}

fn trend_productivity(
    row: &DivisionPerformance,
    month_str: &str,
    year: i32,
    kpi_data: &[KpiData],
    employee_kpis: &[EmployeeKpiData],
    employees: &[Employee],
    rng: &mut impl Rng,
) -> u32 {
    if let Some(kpi) = kpi_data
        .iter()
        .find(|k| k.division_id == row.division_id && k.month == month_str && k.year == year)
    {
        return kpi.productivity_rate;
    }

    let rates: Vec<u32> = employee_kpis
        .iter()
        .filter(|e| e.month == month_str && e.year == year)
        .filter(|e| record_division(e, employees) == Some(row.division_id.as_str()))
        .map(|e| e.productivity_rate)
        .collect();
    if !rates.is_empty() {
        let sum: u64 = rates.iter().map(|&r| r as u64).sum();
        return (sum as f64 / rates.len() as f64).round() as u32;
    }

    let jitter = rng.gen_range(-TREND_JITTER..=TREND_JITTER);
    (row.productivity_rate as i32 + jitter).clamp(0, 100) as u32
}

/// Division owning an employee scorecard, via the record itself or the
/// employee directory when the record predates the division_id field.
fn record_division<'a>(record: &'a EmployeeKpiData, employees: &'a [Employee]) -> Option<&'a str> {
    if !record.division_id.is_empty() {
        return Some(record.division_id.as_str());
    }
    employees
        .iter()
        .find(|e| e.id == record.employee_id)
        .map(|e| e.division_id.as_str())
}

/// Loads the persisted collections and composes the dashboard snapshot.
pub struct DashboardService<C: Connection> {
    kpi_repository: C::KpiRepository,
    submission_repository: C::SubmissionRepository,
    employee_repository: C::EmployeeRepository,
    trend_rng: Mutex<StdRng>,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self::with_rng(connection, StdRng::from_entropy())
    }

    /// Fixed-seed constructor so the trend fallback is reproducible.
    pub fn with_trend_seed(connection: Arc<C>, seed: u64) -> Self {
        Self::with_rng(connection, StdRng::seed_from_u64(seed))
    }

    fn with_rng(connection: Arc<C>, rng: StdRng) -> Self {
        Self {
            kpi_repository: connection.create_kpi_repository(),
            submission_repository: connection.create_submission_repository(),
            employee_repository: connection.create_employee_repository(),
            trend_rng: Mutex::new(rng),
        }
    }

    /// Compose the snapshot for a filter, degrading to a zeroed snapshot
    /// on storage errors so the caller's view renders zeros instead of
    /// disappearing.
    pub fn dashboard_metrics(&self, filter: &MonthFilter) -> DashboardMetrics {
        match self.try_compose(filter) {
            Ok(metrics) => metrics,
            Err(err) => {
                warn!(
                    "📈 DASHBOARD: composition failed for {}/{}: {err:#}, returning zeroed snapshot",
                    filter.month, filter.year
                );
                DashboardMetrics::zeroed(month_key(filter.month), filter.year)
            }
        }
    }

    fn try_compose(&self, filter: &MonthFilter) -> Result<DashboardMetrics> {
        let kpi_data = self.kpi_repository.list_kpis()?;
        let employee_kpis = self.kpi_repository.list_employee_kpis()?;
        let submissions = self.submission_repository.list_submissions()?;
        let employees = self.employee_repository.list_employees()?;
        let divisions = self.employee_repository.list_divisions()?;

        let mut rng = self
            .trend_rng
            .lock()
            .map_err(|_| anyhow!("trend rng lock poisoned"))?;

        Ok(compose_dashboard(
            filter.month,
            filter.year,
            filter.division_id.as_deref(),
            &kpi_data,
            &employee_kpis,
            &submissions,
            &employees,
            &divisions,
            &mut *rng,
        ))
    }
}
