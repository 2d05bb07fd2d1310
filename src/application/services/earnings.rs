//! Earnings totals over completed rides.

use chrono::{DateTime, Datelike, Duration, Local, NaiveTime, TimeZone, Utc};

use crate::domain::entities::Ride;

/// Earnings per period, in the wallet currency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EarningsSummary {
    pub today: f64,
    pub last_7_days: f64,
    pub this_month: f64,
    pub total: f64,
    pub rides: usize,
}

impl EarningsSummary {
    /// Sums completed rides relative to `now` in the local time zone.
    ///
    /// Rides without any timestamp only count toward the total.
    #[must_use]
    pub fn compute<Tz: TimeZone>(rides: &[Ride], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let local_start = |date: chrono::NaiveDate| {
            tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
                .earliest()
                .map(|start| start.with_timezone(&Utc))
        };

        let today_start = local_start(now.date_naive());
        let week_start = now.with_timezone(&Utc) - Duration::days(7);
        let month_start = now
            .date_naive()
            .with_day(1)
            .and_then(local_start);

        let mut summary = Self::default();
        for ride in rides {
            let amount = ride.amount();
            summary.total += amount;
            summary.rides += 1;

            let Some(at) = ride.settled_at() else {
                continue;
            };
            if today_start.is_some_and(|start| at >= start) {
                summary.today += amount;
            }
            if at >= week_start {
                summary.last_7_days += amount;
            }
            if month_start.is_some_and(|start| at >= start) {
                summary.this_month += amount;
            }
        }
        summary
    }

    /// [`compute`](Self::compute) against the current local time.
    #[must_use]
    pub fn now(rides: &[Ride]) -> Self {
        Self::compute(rides, &Local::now())
    }
}
