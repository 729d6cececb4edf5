//! # Client Metrics Module
//!
//! Buckets a unit's clients by activity, birthday month and signup month.
//!
//! ## Buckets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now = 2024-03-15 10:00                                                 │
//! │                                                                         │
//! │  active    last_visit_at >= now − 30 days      (2024-02-14 10:00)      │
//! │  inactive  everything else, including never visited                   │
//! │  birthday  birth_date month == March (year ignored)                    │
//! │  new       created_at >= 2024-03-01 00:00 local                        │
//! │                                                                         │
//! │  active + inactive == total_clients for every row.                     │
//! │  birthday and new overlap freely with the other buckets.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::period::start_of_month;
use crate::types::{Client, Unit};

/// A client is active if their last visit is at most this many days old.
pub const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Counts for one group of clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientMetrics {
    pub total_clients: usize,
    pub active: usize,
    pub inactive: usize,
    pub birthday_this_month: usize,
    pub new_this_month: usize,
    /// Sum of the clients' visit counters.
    pub total_visits: i64,
}

impl ClientMetrics {
    /// Sums already-computed rows into a grand total.
    ///
    /// ```rust
    /// use barberdesk_core::clients::ClientMetrics;
    ///
    /// let a = ClientMetrics { total_clients: 3, active: 2, inactive: 1, ..Default::default() };
    /// let b = ClientMetrics { total_clients: 1, inactive: 1, ..Default::default() };
    /// let total = ClientMetrics::rollup(&[a, b]);
    /// assert_eq!(total.total_clients, 4);
    /// assert_eq!(total.inactive, 2);
    /// ```
    pub fn rollup<'a, I>(rows: I) -> ClientMetrics
    where
        I: IntoIterator<Item = &'a ClientMetrics>,
    {
        rows.into_iter().fold(ClientMetrics::default(), |mut acc, row| {
            acc.total_clients += row.total_clients;
            acc.active += row.active;
            acc.inactive += row.inactive;
            acc.birthday_this_month += row.birthday_this_month;
            acc.new_this_month += row.new_this_month;
            acc.total_visits = acc.total_visits.saturating_add(row.total_visits);
            acc
        })
    }
}

/// Classifies clients relative to `now`.
///
/// Month comparisons use `now`'s local calendar. The visit total saturates
/// at `i64::MAX`.
pub fn classify<'a, Tz, I>(clients: I, now: &DateTime<Tz>) -> ClientMetrics
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a Client>,
{
    let active_since = now.with_timezone(&Utc) - Duration::days(ACTIVE_WINDOW_DAYS);
    let month_start = start_of_month(now);
    let current_month = now.month();

    let mut metrics = ClientMetrics::default();

    for client in clients {
        metrics.total_clients += 1;

        match client.last_visit_at {
            Some(visit) if visit >= active_since => metrics.active += 1,
            _ => metrics.inactive += 1,
        }

        if client
            .birth_date
            .map_or(false, |birth| birth.month() == current_month)
        {
            metrics.birthday_this_month += 1;
        }

        if client.created_at >= month_start {
            metrics.new_this_month += 1;
        }

        metrics.total_visits = metrics.total_visits.saturating_add(client.total_visits);
    }

    metrics
}

/// Metrics row for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitMetrics {
    pub unit_id: String,
    pub unit_name: String,
    pub metrics: ClientMetrics,
}

/// Partitions `clients` by unit and classifies each partition.
///
/// One row per entry of `units`, in that order. Units without clients get
/// an all-zero row; clients of units not listed are ignored.
pub fn unit_metrics<Tz: TimeZone>(
    units: &[Unit],
    clients: &[Client],
    now: &DateTime<Tz>,
) -> Vec<UnitMetrics> {
    let mut by_unit: HashMap<&str, Vec<&Client>> = HashMap::new();
    for client in clients {
        by_unit.entry(client.unit_id.as_str()).or_default().push(client);
    }

    units
        .iter()
        .map(|unit| UnitMetrics {
            unit_id: unit.id.clone(),
            unit_name: unit.name.clone(),
            metrics: by_unit
                .get(unit.id.as_str())
                .map(|members| classify(members.iter().copied(), now))
                .unwrap_or_default(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn client(id: &str, unit: &str) -> Client {
        Client {
            id: id.to_string(),
            unit_id: unit.to_string(),
            name: format!("Client {id}"),
            phone: None,
            last_visit_at: None,
            birth_date: None,
            created_at: Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap(),
            total_visits: 0,
        }
    }

    fn unit(id: &str, name: &str) -> Unit {
        Unit {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_classify_empty() {
        let none: &[Client] = &[];
        assert_eq!(classify(none, &now()), ClientMetrics::default());
    }

    #[test]
    fn test_activity_window() {
        let recent = Client {
            last_visit_at: Some(now() - Duration::days(10)),
            ..client("c1", "u1")
        };
        let lapsed = Client {
            last_visit_at: Some(now() - Duration::days(40)),
            ..client("c2", "u1")
        };
        let never = client("c3", "u1");
        let edge = Client {
            last_visit_at: Some(now() - Duration::days(ACTIVE_WINDOW_DAYS)),
            ..client("c4", "u1")
        };

        let metrics = classify(&[recent, lapsed, never, edge], &now());
        assert_eq!(metrics.total_clients, 4);
        assert_eq!(metrics.active, 2);
        assert_eq!(metrics.inactive, 2);
    }

    #[test]
    fn test_birthday_ignores_year() {
        let march = Client {
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 15),
            ..client("c1", "u1")
        };
        let april = Client {
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 15),
            ..client("c2", "u1")
        };
        let metrics = classify(&[march, april, client("c3", "u1")], &now());
        assert_eq!(metrics.birthday_this_month, 1);
    }

    #[test]
    fn test_new_this_month_boundary() {
        let month_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let on_boundary = Client {
            created_at: month_start,
            ..client("c1", "u1")
        };
        let just_before = Client {
            created_at: month_start - Duration::nanoseconds(1),
            ..client("c2", "u1")
        };
        let metrics = classify(&[on_boundary, just_before], &now());
        assert_eq!(metrics.new_this_month, 1);
    }

    #[test]
    fn test_total_visits() {
        let a = Client {
            total_visits: 12,
            ..client("c1", "u1")
        };
        let b = Client {
            total_visits: 3,
            ..client("c2", "u1")
        };
        assert_eq!(classify(&[a, b], &now()).total_visits, 15);
    }

    #[test]
    fn test_total_visits_saturate() {
        let heavy = Client {
            total_visits: i64::MAX,
            ..client("c1", "u1")
        };
        let regular = Client {
            total_visits: 5,
            ..client("c2", "u1")
        };
        let metrics = classify(&[heavy, regular], &now());
        assert_eq!(metrics.total_visits, i64::MAX);
        assert_eq!(metrics.total_clients, 2);

        let rolled = ClientMetrics::rollup(&[metrics, metrics]);
        assert_eq!(rolled.total_visits, i64::MAX);
        assert_eq!(rolled.total_clients, 4);
    }

    #[test]
    fn test_unit_metrics_partitions_by_unit() {
        let units = vec![
            unit("u1", "Centro"),
            unit("u2", "Norte"),
            unit("u3", "Sul"),
        ];
        let clients = vec![
            client("c1", "u1"),
            client("c2", "u2"),
            client("c3", "u1"),
            client("c4", "elsewhere"),
        ];

        let rows = unit_metrics(&units, &clients, &now());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].unit_name, "Centro");
        assert_eq!(rows[0].metrics.total_clients, 2);
        assert_eq!(rows[1].metrics.total_clients, 1);
        assert_eq!(rows[2].metrics, ClientMetrics::default());

        let total = ClientMetrics::rollup(rows.iter().map(|r| &r.metrics));
        assert_eq!(total.total_clients, 3);
    }

    proptest! {
        #[test]
        fn test_rollup_matches_whole(
            assignments in proptest::collection::vec((0usize..4, 0i64..50, proptest::option::of(0i64..90)), 0..60)
        ) {
            let units: Vec<Unit> = (0..4)
                .map(|i| unit(&format!("u{i}"), &format!("Unit {i}")))
                .collect();
            let clients: Vec<Client> = assignments
                .iter()
                .enumerate()
                .map(|(n, (unit, visits, days_ago))| Client {
                    total_visits: *visits,
                    last_visit_at: days_ago.map(|d| now() - Duration::days(d)),
                    ..client(&format!("c{n}"), &format!("u{unit}"))
                })
                .collect();

            let rows = unit_metrics(&units, &clients, &now());
            let rolled = ClientMetrics::rollup(rows.iter().map(|r| &r.metrics));
            let whole = classify(&clients, &now());

            prop_assert_eq!(rolled, whole);
            prop_assert_eq!(rolled.active + rolled.inactive, rolled.total_clients);
        }
    }
}
