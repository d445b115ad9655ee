//! KPI aggregation: rolls a month of daily submissions up into divisional
//! and per-employee scorecards.
//!
//! The aggregation functions are pure and synchronous; [`KpiService`]
//! orchestrates loading submissions, running the aggregation, upserting
//! the derived rows, and publishing change notifications. Derived rows are
//! recomputed in full whenever the underlying submissions change — no
//! record is ever patched field by field.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::Datelike;
use log::{debug, info};

use crate::domain::models::{
    month_key, DailyEntry, DailySubmission, Employee, EmployeeKpiData, KpiData,
};
use crate::domain::ratio_percent;
use crate::storage::notifier::{ChangeNotifier, StoreEvent};
use crate::storage::traits::{Connection, EmployeeStorage, KpiStorage, SubmissionStorage};

/// Placeholder happiness score; no source signal is captured yet.
const HAPPINESS_PLACEHOLDER: f64 = 8.5;
const ATTENDANCE_PLACEHOLDER: u32 = 95;
const TRAINING_HOURS_PLACEHOLDER: f64 = 8.0;
const CSAT_PLACEHOLDER: f64 = 9.0;
/// Fixed heuristic share of revenue counted as net cash.
const NET_CASH_SHARE: f64 = 0.7;
/// Offset added to first-time retention to estimate repeat retention.
const REPEAT_RETENTION_OFFSET: u32 = 10;

/// Reduce one division's qualifying submissions for a calendar month into
/// exactly one scorecard.
///
/// Only entries with status Active and is_submitted contribute. When no
/// entry qualifies, the previously persisted scorecard is returned
/// unchanged if one exists, else an all-zero scorecard, so an empty month
/// never erases earlier data.
pub fn aggregate_division(
    submissions: &[DailySubmission],
    existing: Option<&KpiData>,
    division_id: &str,
    month: u32,
    year: i32,
) -> KpiData {
    let entries: Vec<&DailyEntry> = submissions
        .iter()
        .filter(|s| s.division_id == division_id && s.is_in_month(month, year))
        .flat_map(|s| s.entries.iter())
        .filter(|e| e.counts_toward_totals())
        .collect();

    if entries.is_empty() {
        debug!(
            "📊 KPI: no qualifying entries for {} {}/{}, keeping stored scorecard",
            division_id, month, year
        );
        return existing.cloned().unwrap_or_else(|| {
            KpiData::zeroed(division_id.to_string(), month_key(month), year)
        });
    }

    let mut hours_worked = 0.0;
    let mut hours_booked = 0.0;
    let mut service_revenue = 0.0;
    let mut retail_sales = 0.0;
    let mut new_clients: u32 = 0;
    let mut consults: u32 = 0;
    let mut consult_converted: u32 = 0;
    let mut total_clients: u32 = 0;
    let mut prebooks: u32 = 0;

    for entry in &entries {
        hours_worked += entry.hours_worked;
        hours_booked += entry.hours_booked;
        service_revenue += entry.service_revenue;
        retail_sales += entry.retail_sales;
        new_clients += entry.new_clients;
        consults += entry.consults;
        consult_converted += entry.consult_converted;
        total_clients += entry.total_clients;
        prebooks += entry.prebooks;
    }

    // Each ratio is rounded individually before any downstream use.
    let productivity_rate = ratio_percent(hours_booked, hours_worked);
    let prebook_rate = ratio_percent(prebooks as f64, total_clients as f64);
    let first_time_retention_rate = ratio_percent(consult_converted as f64, consults as f64);
    let repeat_retention_rate = (first_time_retention_rate + REPEAT_RETENTION_OFFSET).min(100);

    let total_revenue = service_revenue + retail_sales;
    let retail_percentage = ratio_percent(retail_sales, total_revenue);
    let average_ticket = if new_clients > 0 {
        (total_revenue / new_clients as f64).round()
    } else {
        0.0
    };
    let service_sales_per_hour = if hours_booked > 0.0 {
        (service_revenue / hours_booked).round()
    } else {
        0.0
    };

    info!(
        "📊 KPI: aggregated {} entries for {} {}/{}: productivity={} revenue={:.2}",
        entries.len(),
        division_id,
        month,
        year,
        productivity_rate,
        total_revenue
    );

    KpiData {
        division_id: division_id.to_string(),
        month: month_key(month),
        year,
        productivity_rate,
        prebook_rate,
        first_time_retention_rate,
        repeat_retention_rate,
        retail_percentage,
        clients_retail_percentage: retail_percentage,
        new_clients,
        average_ticket,
        service_sales_per_hour,
        hours_sold: hours_booked,
        happiness_score: HAPPINESS_PLACEHOLDER,
        // Currency-scale despite the field name; downstream consumers
        // depend on the currency-scale number.
        net_cash_percentage: (total_revenue * NET_CASH_SHARE).round(),
        service_revenue: Some(service_revenue),
        retail_sales: Some(retail_sales),
    }
}

/// Roll the month's qualifying entries up into per-employee scorecards.
///
/// Entries are processed in submission array order, and several fields are
/// deliberately last-write-wins (see [`fold_entry`]), so the result is
/// order-dependent. That matches the historical dashboard numbers and must
/// be preserved bit-for-bit.
///
/// Entries whose employee has no active directory match are skipped; the
/// rest of the pass continues.
pub fn aggregate_employees(
    submissions: &[DailySubmission],
    employees: &[Employee],
    month: u32,
    year: i32,
) -> Vec<EmployeeKpiData> {
    let directory: HashMap<&str, &Employee> = employees
        .iter()
        .filter(|e| e.is_active)
        .map(|e| (e.id.as_str(), e))
        .collect();

    let mut records: Vec<EmployeeKpiData> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for submission in submissions.iter().filter(|s| s.is_in_month(month, year)) {
        for entry in &submission.entries {
            if !entry.counts_toward_totals() {
                continue;
            }
            let Some(employee) = directory.get(entry.employee_id.as_str()) else {
                debug!(
                    "📊 KPI: skipping entry for unmatched employee {}",
                    entry.employee_id
                );
                continue;
            };

            match index.get(entry.employee_id.as_str()) {
                None => {
                    index.insert(entry.employee_id.clone(), records.len());
                    records.push(seed_record(entry, employee, month, year));
                }
                Some(&i) => fold_entry(&mut records[i], entry),
            }
        }
    }

    info!(
        "📊 KPI: aggregated employee scorecards for {}/{}: {} employees",
        month,
        year,
        records.len()
    );
    records
}

/// First entry for an employee in the pass seeds the record from that
/// single entry. Percentages come from the entry's own recomputed ratios.
fn seed_record(entry: &DailyEntry, employee: &Employee, month: u32, year: i32) -> EmployeeKpiData {
    let entry_revenue = entry.service_revenue + entry.retail_sales;
    let first_time_retention_rate =
        ratio_percent(entry.consult_converted as f64, entry.consults as f64);

    EmployeeKpiData {
        employee_id: entry.employee_id.clone(),
        division_id: employee.division_id.clone(),
        month: month_key(month),
        year,
        productivity_rate: ratio_percent(entry.hours_booked, entry.hours_worked),
        prebook_rate: ratio_percent(entry.prebooks as f64, entry.total_clients as f64),
        first_time_retention_rate,
        repeat_retention_rate: (first_time_retention_rate + REPEAT_RETENTION_OFFSET).min(100),
        retail_percentage: ratio_percent(entry.retail_sales, entry_revenue),
        clients_retail_percentage: if entry.retail_sales > 0.0 { 50 } else { 0 },
        new_clients: entry.new_clients,
        average_ticket: if entry.new_clients > 0 {
            (entry_revenue / entry.new_clients as f64).round()
        } else {
            0.0
        },
        service_sales_per_hour: (entry.service_revenue / entry.hours_booked.max(1.0)).round(),
        hours_sold: entry.hours_booked,
        happiness_score: HAPPINESS_PLACEHOLDER,
        net_cash_percentage: (entry_revenue * NET_CASH_SHARE).round(),
        attendance_rate: ATTENDANCE_PLACEHOLDER,
        training_hours: TRAINING_HOURS_PLACEHOLDER,
        customer_satisfaction_score: CSAT_PLACEHOLDER,
    }
}

/// Fold a subsequent entry for the same employee into its record.
///
/// The accumulation is deliberately asymmetric and preserved as-is:
/// hours_sold and new_clients accumulate; service_sales_per_hour blends as
/// a weighted average; productivity_rate is overwritten by the latest
/// entry (last write wins, not averaged); retail_percentage,
/// average_ticket and the revenue-derived placeholders are recomputed from
/// the latest entry alone, discarding prior accumulation. The seeded
/// prebook and retention rates are left untouched.
fn fold_entry(record: &mut EmployeeKpiData, entry: &DailyEntry) {
    let prev_rate = record.service_sales_per_hour;
    let prev_hours = record.hours_sold;
    record.service_sales_per_hour = if prev_hours > 0.0 {
        ((prev_rate * prev_hours + entry.service_revenue) / (prev_hours + entry.hours_booked))
            .round()
    } else {
        (entry.service_revenue / entry.hours_booked.max(1.0)).round()
    };

    record.hours_sold += entry.hours_booked;
    record.new_clients += entry.new_clients;
    record.productivity_rate = ratio_percent(entry.hours_booked, entry.hours_worked);

    let entry_revenue = entry.service_revenue + entry.retail_sales;
    record.retail_percentage = ratio_percent(entry.retail_sales, entry_revenue);
    record.average_ticket = if entry.new_clients > 0 {
        (entry_revenue / entry.new_clients as f64).round()
    } else {
        0.0
    };
    record.clients_retail_percentage = if entry.retail_sales > 0.0 { 50 } else { 0 };
    record.net_cash_percentage = (entry_revenue * NET_CASH_SHARE).round();
}

/// Orchestrates submission writes and scorecard recomputation against the
/// storage traits.
pub struct KpiService<C: Connection> {
    submission_repository: C::SubmissionRepository,
    kpi_repository: C::KpiRepository,
    employee_repository: C::EmployeeRepository,
    notifier: ChangeNotifier,
}

impl<C: Connection> KpiService<C> {
    pub fn new(connection: Arc<C>, notifier: ChangeNotifier) -> Self {
        Self {
            submission_repository: connection.create_submission_repository(),
            kpi_repository: connection.create_kpi_repository(),
            employee_repository: connection.create_employee_repository(),
            notifier,
        }
    }

    /// Store (or replace) a daily submission and recompute every derived
    /// scorecard its month touches.
    pub fn submit_daily(
        &self,
        submission: DailySubmission,
    ) -> Result<(KpiData, Vec<EmployeeKpiData>)> {
        let division_id = submission.division_id.clone();
        let month = submission.date.month();
        let year = submission.date.year();
        info!(
            "📋 SUBMIT: {} entries for {} on {}",
            submission.entries.len(),
            division_id,
            submission.date.format("%Y-%m-%d")
        );

        self.submission_repository.upsert_submission(&submission)?;
        self.notifier.publish(StoreEvent::SubmissionsChanged {
            division_id: division_id.clone(),
            month: month_key(month),
            year,
        });

        let kpi = self.recompute_division_month(&division_id, month, year)?;
        let employee_kpis = self.recompute_employee_month(month, year)?;
        Ok((kpi, employee_kpis))
    }

    /// Recompute one division's scorecard for a month and upsert it.
    pub fn recompute_division_month(
        &self,
        division_id: &str,
        month: u32,
        year: i32,
    ) -> Result<KpiData> {
        let submissions = self
            .submission_repository
            .list_submissions_for_month(month, year)?;
        let existing = self.kpi_repository.get_kpi(division_id, month, year)?;
        let kpi = aggregate_division(&submissions, existing.as_ref(), division_id, month, year);

        self.kpi_repository.upsert_kpi(&kpi)?;
        self.notifier.publish(StoreEvent::KpiDataChanged {
            division_id: division_id.to_string(),
            month: month_key(month),
            year,
        });
        Ok(kpi)
    }

    /// Recompute every employee scorecard for a month and upsert them.
    pub fn recompute_employee_month(
        &self,
        month: u32,
        year: i32,
    ) -> Result<Vec<EmployeeKpiData>> {
        let submissions = self
            .submission_repository
            .list_submissions_for_month(month, year)?;
        let employees = self.employee_repository.list_employees()?;
        let records = aggregate_employees(&submissions, &employees, month, year);

        for record in &records {
            self.kpi_repository.upsert_employee_kpi(record)?;
        }
        if !records.is_empty() {
            self.notifier.publish(StoreEvent::EmployeeKpiChanged {
                month: month_key(month),
                year,
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EntryStatus;
    use crate::storage::json::JsonConnection;
    use chrono::{TimeZone, Utc};

    fn entry(employee_id: &str) -> DailyEntry {
        DailyEntry {
            employee_id: employee_id.to_string(),
            date: Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap(),
            status: EntryStatus::Active,
            hours_worked: 8.0,
            hours_booked: 6.0,
            service_revenue: 1000.0,
            retail_sales: 200.0,
            new_clients: 2,
            consults: 3,
            consult_converted: 2,
            total_clients: 10,
            prebooks: 6,
            productivity_percentage: 0,
            consult_conversion_percentage: 0,
            prebook_percentage: 0,
            is_submitted: true,
        }
    }

    fn employee(id: &str, division_id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_string(),
            division_id: division_id.to_string(),
            role: "technician".to_string(),
            is_active: true,
        }
    }

    fn submission_on(day: u32, division_id: &str, entries: Vec<DailyEntry>) -> DailySubmission {
        DailySubmission::new(
            division_id.to_string(),
            Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            entries,
            true,
        )
    }

    /// Three active+submitted days for "laser" in 2025-01, checked against
    /// hand-computed expectations.
    #[test]
    fn division_aggregation_scenario() {
        let hours_worked = [8.0, 8.0, 8.0];
        let hours_booked = [6.0, 7.0, 7.0];
        let service_revenue = [1000.0, 1200.0, 1100.0];
        let retail_sales = [200.0, 150.0, 180.0];
        let new_clients = [2, 3, 2];
        let consults = [3, 4, 3];
        let consult_converted = [2, 3, 2];
        let total_clients = [10, 12, 11];
        let prebooks = [6, 7, 6];

        let submissions: Vec<DailySubmission> = (0..3)
            .map(|i| {
                let mut e = entry("emp-1");
                e.hours_worked = hours_worked[i];
                e.hours_booked = hours_booked[i];
                e.service_revenue = service_revenue[i];
                e.retail_sales = retail_sales[i];
                e.new_clients = new_clients[i];
                e.consults = consults[i];
                e.consult_converted = consult_converted[i];
                e.total_clients = total_clients[i];
                e.prebooks = prebooks[i];
                submission_on(10 + i as u32, "laser", vec![e])
            })
            .collect();

        let kpi = aggregate_division(&submissions, None, "laser", 1, 2025);

        assert_eq!(kpi.productivity_rate, 83); // round(100 * 20 / 24)
        assert_eq!(kpi.retail_percentage, 14); // round(100 * 530 / 3830)
        assert_eq!(kpi.clients_retail_percentage, 14);
        assert_eq!(kpi.average_ticket, 547.0); // round(3830 / 7)
        assert_eq!(kpi.service_sales_per_hour, 165.0); // round(3300 / 20)
        assert_eq!(kpi.first_time_retention_rate, 70); // round(100 * 7 / 10)
        assert_eq!(kpi.repeat_retention_rate, 80);
        assert_eq!(kpi.net_cash_percentage, 2681.0); // round(3830 * 0.7)
        assert_eq!(kpi.hours_sold, 20.0);
        assert_eq!(kpi.new_clients, 7);
        assert_eq!(kpi.happiness_score, 8.5);
        assert_eq!(kpi.service_revenue, Some(3300.0));
        assert_eq!(kpi.retail_sales, Some(530.0));
    }

    #[test]
    fn zero_worked_hours_yields_zero_productivity_not_nan() {
        let mut e = entry("emp-1");
        e.hours_worked = 0.0;
        e.hours_booked = 0.0;
        e.service_revenue = 0.0;
        e.retail_sales = 0.0;
        e.new_clients = 0;
        e.consults = 0;
        e.total_clients = 0;
        let submissions = vec![submission_on(10, "laser", vec![e])];

        let kpi = aggregate_division(&submissions, None, "laser", 1, 2025);
        assert_eq!(kpi.productivity_rate, 0);
        assert_eq!(kpi.prebook_rate, 0);
        assert_eq!(kpi.average_ticket, 0.0);
        assert_eq!(kpi.service_sales_per_hour, 0.0);
    }

    #[test]
    fn inert_entries_do_not_contribute() {
        let mut away = entry("emp-1");
        away.status = EntryStatus::Away;
        let mut unsubmitted = entry("emp-2");
        unsubmitted.is_submitted = false;
        let active = entry("emp-3");
        let submissions = vec![submission_on(10, "laser", vec![away, unsubmitted, active])];

        let kpi = aggregate_division(&submissions, None, "laser", 1, 2025);
        // Only the single active entry's hours count
        assert_eq!(kpi.hours_sold, 6.0);
        assert_eq!(kpi.new_clients, 2);
    }

    #[test]
    fn empty_month_returns_stored_scorecard_unchanged() {
        let mut stored = KpiData::zeroed("laser".to_string(), "01".to_string(), 2025);
        stored.productivity_rate = 77;
        stored.average_ticket = 432.0;

        let kpi = aggregate_division(&[], Some(&stored), "laser", 1, 2025);
        assert_eq!(kpi, stored);
    }

    #[test]
    fn empty_month_without_stored_scorecard_is_all_zero() {
        let kpi = aggregate_division(&[], None, "laser", 1, 2025);
        assert_eq!(
            kpi,
            KpiData::zeroed("laser".to_string(), "01".to_string(), 2025)
        );
    }

    #[test]
    fn other_divisions_and_months_are_filtered_out() {
        let submissions = vec![
            submission_on(10, "laser", vec![entry("emp-1")]),
            submission_on(11, "hormone", vec![entry("emp-2")]),
            DailySubmission::new(
                "laser".to_string(),
                Utc.with_ymd_and_hms(2024, 12, 31, 9, 0, 0).unwrap(),
                vec![entry("emp-3")],
                true,
            ),
        ];

        let kpi = aggregate_division(&submissions, None, "laser", 1, 2025);
        assert_eq!(kpi.hours_sold, 6.0); // only the single January laser entry
    }

    #[test]
    fn aggregated_percentages_stay_within_bounds() {
        // Overbooked day: booked hours exceed worked hours
        let mut e = entry("emp-1");
        e.hours_worked = 4.0;
        e.hours_booked = 9.0;
        let submissions = vec![submission_on(10, "laser", vec![e])];

        let kpi = aggregate_division(&submissions, None, "laser", 1, 2025);
        assert!(kpi.productivity_rate <= 100);
        assert!(kpi.prebook_rate <= 100);
        assert!(kpi.retail_percentage <= 100);
        assert!(kpi.average_ticket >= 0.0);
        assert!(kpi.net_cash_percentage >= 0.0);
    }

    #[test]
    fn employee_productivity_is_last_write_wins() {
        // Entry 1 computes to 60% (6/10), entry 2 to 90% (9/10)
        let mut first = entry("emp-1");
        first.hours_worked = 10.0;
        first.hours_booked = 6.0;
        let mut second = entry("emp-1");
        second.hours_worked = 10.0;
        second.hours_booked = 9.0;

        let submissions = vec![
            submission_on(10, "laser", vec![first]),
            submission_on(11, "laser", vec![second]),
        ];
        let employees = vec![employee("emp-1", "laser")];

        let records = aggregate_employees(&submissions, &employees, 1, 2025);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].productivity_rate, 90); // not an average of 60 and 90
    }

    #[test]
    fn employee_hours_and_new_clients_accumulate() {
        let mut first = entry("emp-1");
        first.hours_booked = 6.0;
        first.new_clients = 2;
        first.service_revenue = 900.0;
        let mut second = entry("emp-1");
        second.hours_booked = 4.0;
        second.new_clients = 3;
        second.service_revenue = 500.0;

        let submissions = vec![
            submission_on(10, "laser", vec![first]),
            submission_on(11, "laser", vec![second]),
        ];
        let employees = vec![employee("emp-1", "laser")];

        let records = aggregate_employees(&submissions, &employees, 1, 2025);
        let record = &records[0];
        assert_eq!(record.hours_sold, 10.0);
        assert_eq!(record.new_clients, 5);
        // Weighted blend: round((round(900/6)*6 + 500) / (6 + 4)) = round(1400/10)
        assert_eq!(record.service_sales_per_hour, 140.0);
    }

    #[test]
    fn employee_retail_and_ticket_follow_latest_entry_only() {
        let mut first = entry("emp-1");
        first.service_revenue = 1000.0;
        first.retail_sales = 1000.0; // 50% retail
        first.new_clients = 2; // ticket 1000
        let mut second = entry("emp-1");
        second.service_revenue = 900.0;
        second.retail_sales = 100.0; // 10% retail
        second.new_clients = 4; // ticket 250

        let submissions = vec![
            submission_on(10, "laser", vec![first]),
            submission_on(11, "laser", vec![second]),
        ];
        let employees = vec![employee("emp-1", "laser")];

        let record = &aggregate_employees(&submissions, &employees, 1, 2025)[0];
        assert_eq!(record.retail_percentage, 10);
        assert_eq!(record.average_ticket, 250.0);
    }

    #[test]
    fn employee_aggregation_is_order_dependent() {
        let mut low = entry("emp-1");
        low.hours_worked = 10.0;
        low.hours_booked = 5.0;
        let mut high = entry("emp-1");
        high.hours_worked = 10.0;
        high.hours_booked = 10.0;

        let employees = vec![employee("emp-1", "laser")];
        let forward = vec![
            submission_on(10, "laser", vec![low.clone()]),
            submission_on(11, "laser", vec![high.clone()]),
        ];
        let reversed = vec![
            submission_on(10, "laser", vec![high]),
            submission_on(11, "laser", vec![low]),
        ];

        let a = aggregate_employees(&forward, &employees, 1, 2025);
        let b = aggregate_employees(&reversed, &employees, 1, 2025);
        assert_eq!(a[0].productivity_rate, 100);
        assert_eq!(b[0].productivity_rate, 50);
    }

    #[test]
    fn unmatched_and_inactive_employees_are_skipped_without_aborting() {
        let mut inactive = employee("emp-2", "laser");
        inactive.is_active = false;
        let employees = vec![employee("emp-1", "laser"), inactive];

        let submissions = vec![submission_on(
            10,
            "laser",
            vec![entry("emp-1"), entry("emp-2"), entry("emp-ghost")],
        )];

        let records = aggregate_employees(&submissions, &employees, 1, 2025);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, "emp-1");
    }

    #[test]
    fn employee_constants_are_seeded() {
        let submissions = vec![submission_on(10, "laser", vec![entry("emp-1")])];
        let employees = vec![employee("emp-1", "laser")];

        let record = &aggregate_employees(&submissions, &employees, 1, 2025)[0];
        assert_eq!(record.happiness_score, 8.5);
        assert_eq!(record.attendance_rate, 95);
        assert_eq!(record.training_hours, 8.0);
        assert_eq!(record.customer_satisfaction_score, 9.0);
        assert_eq!(record.clients_retail_percentage, 50); // retail sales > 0
        assert_eq!(record.division_id, "laser");
    }

    #[test]
    fn submit_daily_persists_submission_and_scorecards() {
        let dir = tempfile::tempdir().unwrap();
        let connection = Arc::new(JsonConnection::new(dir.path()).unwrap());
        let notifier = ChangeNotifier::new();
        let service: KpiService<JsonConnection> =
            KpiService::new(connection.clone(), notifier.clone());

        connection
            .create_employee_repository()
            .upsert_employee(&employee("emp-1", "laser"))
            .unwrap();

        let events = Arc::new(std::sync::Mutex::new(Vec::new()));
        let events_clone = events.clone();
        notifier.subscribe(move |event| {
            events_clone.lock().unwrap().push(event.clone());
        });

        let (kpi, employee_kpis) = service
            .submit_daily(submission_on(15, "laser", vec![entry("emp-1")]))
            .unwrap();

        assert_eq!(kpi.division_id, "laser");
        assert_eq!(kpi.month, "01");
        assert_eq!(employee_kpis.len(), 1);

        let kpi_repo = connection.create_kpi_repository();
        assert_eq!(kpi_repo.get_kpi("laser", 1, 2025).unwrap().unwrap(), kpi);
        assert_eq!(
            kpi_repo.get_employee_kpi("emp-1", 1, 2025).unwrap().unwrap(),
            employee_kpis[0]
        );

        let seen = events.lock().unwrap();
        assert!(seen
            .iter()
            .any(|e| matches!(e, StoreEvent::SubmissionsChanged { .. })));
        assert!(seen
            .iter()
            .any(|e| matches!(e, StoreEvent::KpiDataChanged { .. })));
        assert!(seen
            .iter()
            .any(|e| matches!(e, StoreEvent::EmployeeKpiChanged { .. })));
    }

    #[test]
    fn resubmission_recomputes_rather_than_double_counts() {
        let dir = tempfile::tempdir().unwrap();
        let connection = Arc::new(JsonConnection::new(dir.path()).unwrap());
        let service: KpiService<JsonConnection> =
            KpiService::new(connection.clone(), ChangeNotifier::new());

        connection
            .create_employee_repository()
            .upsert_employee(&employee("emp-1", "laser"))
            .unwrap();

        service
            .submit_daily(submission_on(15, "laser", vec![entry("emp-1")]))
            .unwrap();
        // Same (division, day) submitted again: replaces, so totals stay flat
        let (kpi, _) = service
            .submit_daily(submission_on(15, "laser", vec![entry("emp-1")]))
            .unwrap();

        assert_eq!(kpi.hours_sold, 6.0);
        assert_eq!(kpi.new_clients, 2);
    }
}
