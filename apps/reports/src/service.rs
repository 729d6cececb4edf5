//! # Report Service
//!
//! Composes the three reports: resolve the period, fetch snapshots from the
//! Data Store, hand them to the core aggregations.
//!
//! ## One Render
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now (captured once by the caller)                                      │
//! │   │                                                                     │
//! │   ├──► resolve(today) ──► fetch ──► summarize ──┐                      │
//! │   ├──► resolve(week)  ──► fetch ──► summarize ──┼──► CashFlowReport    │
//! │   └──► resolve(month) ──► fetch ──► summarize ──┘                      │
//! │                                                                         │
//! │  Each period is fetched and summarized on its own; the week total is   │
//! │  never derived from the day totals.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use barberdesk_core::{
    commission_lines, resolve, resolve_month, summarize, summarize_by_barber, unit_metrics,
    Barber, BarberRates, ClientMetrics, CommissionLine, CommissionRate, DateRange, FinancialSummary,
    PeriodTag, TransactionStatus, UnitMetrics,
};
use barberdesk_db::DataStore;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Report Types
// =============================================================================

/// Totals for one named period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeriodSummary {
    pub period: PeriodTag,
    pub range: DateRange,
    pub summary: FinancialSummary,
}

/// Today / this week / this month for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CashFlowReport {
    pub unit_id: String,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
    pub periods: Vec<PeriodSummary>,
}

impl CashFlowReport {
    /// The summary for one period tag.
    pub fn period(&self, tag: PeriodTag) -> Option<&FinancialSummary> {
        self.periods
            .iter()
            .find(|p| p.period == tag)
            .map(|p| &p.summary)
    }
}

/// One barber's row in the commission report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BarberCommission {
    pub barber_id: String,
    /// Absent when the barber is no longer on the roster.
    pub barber_name: Option<String>,
    /// Rate shown next to the name: negotiated, else the default.
    pub rate: CommissionRate,
    pub summary: FinancialSummary,
}

/// Commission report for one month of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionReport {
    pub unit_id: String,
    pub year: i32,
    /// Zero-based (January = 0).
    pub month_index: u32,
    pub range: DateRange,
    /// The barber filter, if one was applied.
    pub barber_id: Option<String>,
    pub summary: FinancialSummary,
    pub by_barber: Vec<BarberCommission>,
    pub lines: Vec<CommissionLine>,
}

/// Client activity per unit plus the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientReport {
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
    pub units: Vec<UnitMetrics>,
    pub total: ClientMetrics,
}

// =============================================================================
// Report Service
// =============================================================================

/// Builds reports from a [`DataStore`].
#[derive(Debug, Clone)]
pub struct ReportService<S> {
    store: S,
    fallback_rate: Option<CommissionRate>,
}

impl<S: DataStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        ReportService {
            store,
            fallback_rate: None,
        }
    }

    /// Sets the rate used when neither appointment nor barber carries one.
    pub fn with_fallback_rate(mut self, rate: CommissionRate) -> Self {
        self.fallback_rate = Some(rate);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn rates_for_unit(&self, unit_id: &str) -> ReportResult<(BarberRates, Vec<Barber>)> {
        let barbers = self.store.fetch_barbers(unit_id).await?;
        let rates = BarberRates::from_barbers(&barbers).with_fallback(self.fallback_rate);
        Ok((rates, barbers))
    }

    /// Revenue, commission and profit for today, this week and this month.
    pub async fn cash_flow<Tz: TimeZone>(
        &self,
        unit_id: &str,
        now: &DateTime<Tz>,
    ) -> ReportResult<CashFlowReport> {
        let (rates, _) = self.rates_for_unit(unit_id).await?;
        let mut periods = Vec::with_capacity(PeriodTag::ALL.len());

        for tag in PeriodTag::ALL {
            let range = resolve(tag, now)?;
            let transactions = self
                .store
                .fetch_transactions(&range, unit_id, None, TransactionStatus::Completed)
                .await?;
            let summary = summarize(&transactions, &rates)?;

            debug!(
                unit_id = %unit_id,
                period = %tag,
                count = summary.count,
                revenue = %summary.total_revenue,
                "Period summarized"
            );
            periods.push(PeriodSummary {
                period: tag,
                range,
                summary,
            });
        }

        info!(unit_id = %unit_id, "Cash flow report generated");
        Ok(CashFlowReport {
            unit_id: unit_id.to_string(),
            generated_at: now.with_timezone(&Utc),
            periods,
        })
    }

    /// Commission report for one month, optionally for a single barber.
    ///
    /// `month_index` is zero-based. Deactivated barbers are included.
    pub async fn commission_report<Tz: TimeZone>(
        &self,
        unit_id: &str,
        year: i32,
        month_index: u32,
        barber_id: Option<&str>,
        zone: &Tz,
    ) -> ReportResult<CommissionReport> {
        let range = resolve_month(year, month_index, zone)?;
        let (rates, barbers) = self.rates_for_unit(unit_id).await?;

        if let Some(id) = barber_id {
            if !barbers.iter().any(|b| b.id == id) {
                return Err(ReportError::UnknownBarber {
                    unit_id: unit_id.to_string(),
                    barber_id: id.to_string(),
                });
            }
        }

        let transactions = self
            .store
            .fetch_transactions(&range, unit_id, barber_id, TransactionStatus::Completed)
            .await?;

        let summary = summarize(&transactions, &rates)?;
        let lines = commission_lines(&transactions, &rates)?;
        let by_barber = summarize_by_barber(&transactions, &rates)?
            .into_iter()
            .map(|row| BarberCommission {
                barber_name: barbers
                    .iter()
                    .find(|b| b.id == row.barber_id)
                    .map(|b| b.name.clone()),
                rate: rates.display_rate(&row.barber_id),
                barber_id: row.barber_id,
                summary: row.summary,
            })
            .collect();

        info!(
            unit_id = %unit_id,
            year,
            month_index,
            barber_id = ?barber_id,
            count = summary.count,
            commission = %summary.total_commission,
            "Commission report generated"
        );

        Ok(CommissionReport {
            unit_id: unit_id.to_string(),
            year,
            month_index,
            range,
            barber_id: barber_id.map(str::to_string),
            summary,
            by_barber,
            lines,
        })
    }

    /// Client activity for every unit, plus the grand total.
    pub async fn client_report<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> ReportResult<ClientReport> {
        let units = self.store.fetch_units().await?;
        let unit_ids: Vec<String> = units.iter().map(|u| u.id.clone()).collect();
        let clients = self.store.fetch_clients(&unit_ids).await?;

        let rows = unit_metrics(&units, &clients, now);
        let total = ClientMetrics::rollup(rows.iter().map(|r| &r.metrics));

        info!(
            units = rows.len(),
            clients = total.total_clients,
            active = total.active,
            "Client report generated"
        );

        Ok(ClientReport {
            generated_at: now.with_timezone(&Utc),
            units: rows,
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{barber, client, tx, unit, FakeStore};
    use chrono::{Duration, FixedOffset};

    fn sao_paulo() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    // Friday 2024-03-15 10:00 local
    fn now() -> DateTime<FixedOffset> {
        sao_paulo().with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn local(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        sao_paulo()
            .with_ymd_and_hms(2024, m, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn store() -> FakeStore {
        FakeStore {
            units: vec![],
            barbers: vec![barber("b1", "u1", Some(4000), true), barber("b2", "u1", None, false)],
            clients: vec![],
            transactions: vec![
                tx("today", "b1", "u1", 10000, local(3, 15, 9), TransactionStatus::Completed),
                tx("monday", "b2", "u1", 5000, local(3, 11, 0), TransactionStatus::Completed),
                tx("sunday", "b1", "u1", 3000, local(3, 10, 23), TransactionStatus::Completed),
                tx("first", "b2", "u1", 2000, local(3, 1, 0), TransactionStatus::Completed),
                tx("feb", "b1", "u1", 9999, local(2, 29, 23), TransactionStatus::Completed),
                tx("cancelled", "b1", "u1", 7000, local(3, 15, 8), TransactionStatus::Cancelled),
                tx("other-unit", "b9", "u2", 8000, local(3, 15, 8), TransactionStatus::Completed),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_cash_flow_periods() {
        let service = ReportService::new(store());
        let report = service.cash_flow("u1", &now()).await.unwrap();

        let today = report.period(PeriodTag::Today).unwrap();
        assert_eq!(today.count, 1);
        assert_eq!(today.total_revenue.cents(), 10000);
        assert_eq!(today.total_commission.cents(), 4000);

        // Monday 00:00 is in, Sunday 23:00 is out
        let week = report.period(PeriodTag::Week).unwrap();
        assert_eq!(week.count, 2);
        assert_eq!(week.total_revenue.cents(), 15000);

        let month = report.period(PeriodTag::Month).unwrap();
        assert_eq!(month.count, 4);
        assert_eq!(month.total_revenue.cents(), 20000);
        assert!(month.is_balanced());

        assert_eq!(report.generated_at, now().with_timezone(&Utc));
    }

    #[tokio::test]
    async fn test_cash_flow_fetches_each_period() {
        let service = ReportService::new(store());
        service.cash_flow("u1", &now()).await.unwrap();
        assert_eq!(service.store().transaction_fetches(), 3);
    }

    #[tokio::test]
    async fn test_commission_report_month() {
        let service = ReportService::new(store());
        let report = service
            .commission_report("u1", 2024, 2, None, &sao_paulo())
            .await
            .unwrap();

        assert_eq!(report.summary.count, 4);
        assert_eq!(report.summary.total_revenue.cents(), 20000);
        // b1: 13000 × 40% = 5200; b2 (default 50%): 7000 × 50% = 3500
        assert_eq!(report.summary.total_commission.cents(), 8700);
        assert_eq!(report.summary.total_profit.cents(), 11300);
        assert_eq!(report.lines.len(), 4);

        assert_eq!(report.by_barber.len(), 2);
        let b2 = report.by_barber.iter().find(|r| r.barber_id == "b2").unwrap();
        assert_eq!(b2.rate.bps(), 5000);
        assert_eq!(b2.barber_name.as_deref(), Some("B2"));
    }

    #[tokio::test]
    async fn test_commission_report_barber_filter() {
        let service = ReportService::new(store());
        let report = service
            .commission_report("u1", 2024, 2, Some("b2"), &sao_paulo())
            .await
            .unwrap();

        assert_eq!(report.barber_id.as_deref(), Some("b2"));
        assert_eq!(report.summary.count, 2);
        assert!(report.lines.iter().all(|l| l.barber_id == "b2"));
    }

    #[tokio::test]
    async fn test_commission_report_uses_configured_fallback() {
        let service = ReportService::new(store()).with_fallback_rate(CommissionRate::from_percent(30));
        let report = service
            .commission_report("u1", 2024, 2, Some("b2"), &sao_paulo())
            .await
            .unwrap();

        assert_eq!(report.summary.total_commission.cents(), 2100);
        assert_eq!(report.by_barber[0].rate.bps(), 3000);
    }

    #[tokio::test]
    async fn test_commission_report_errors() {
        let service = ReportService::new(store());

        let err = service
            .commission_report("u1", 2024, 12, None, &sao_paulo())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Core(_)));

        let err = service
            .commission_report("u1", 2024, 2, Some("ghost"), &sao_paulo())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::UnknownBarber { .. }));
    }

    #[tokio::test]
    async fn test_empty_month_is_all_zero() {
        let service = ReportService::new(store());
        let report = service
            .commission_report("u1", 2023, 0, None, &sao_paulo())
            .await
            .unwrap();

        assert_eq!(report.summary, FinancialSummary::default());
        assert!(report.by_barber.is_empty());
    }

    #[tokio::test]
    async fn test_client_report_rollup() {
        let now_utc = now().with_timezone(&Utc);
        let fake = FakeStore {
            units: vec![
                unit("u1", "Centro"),
                unit("u2", "Norte"),
            ],
            clients: vec![
                client("c1", "u1", Some(now_utc - Duration::days(3)), 5),
                client("c2", "u1", None, 0),
                client("c3", "u2", Some(now_utc - Duration::days(90)), 12),
            ],
            ..Default::default()
        };

        let report = ReportService::new(fake).client_report(&now()).await.unwrap();
        assert_eq!(report.units.len(), 2);
        assert_eq!(report.units[0].metrics.total_clients, 2);
        assert_eq!(report.units[0].metrics.active, 1);
        assert_eq!(report.units[1].metrics.inactive, 1);

        assert_eq!(report.total.total_clients, 3);
        assert_eq!(report.total.active, 1);
        assert_eq!(report.total.inactive, 2);
        assert_eq!(report.total.total_visits, 17);
    }
}
