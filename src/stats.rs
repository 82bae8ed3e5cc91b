/// Block statistics and time filters, evaluated in the user's local offset

use crate::account::BlockedAccount;
use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Window of `blockedAt` values the list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub today: usize,
    pub week: usize,
    pub average_per_day: f64,
}

fn start_of_day(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).single())
        .unwrap_or(*now)
}

fn local_date(account: &BlockedAccount, now: &DateTime<FixedOffset>) -> NaiveDate {
    account.blocked_at.with_timezone(&now.timezone()).date_naive()
}

impl TimeFilter {
    /// Earliest `blockedAt` the filter keeps
    pub fn cutoff(self, now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            TimeFilter::All => None,
            TimeFilter::Today => Some(start_of_day(now)),
            TimeFilter::Week => Some(*now - Duration::days(7)),
            TimeFilter::Month => now.checked_sub_months(Months::new(1)),
        }
    }

    pub fn keeps(self, account: &BlockedAccount, now: &DateTime<FixedOffset>) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => account.blocked_at >= cutoff,
            None => true,
        }
    }

    pub fn apply<'a>(
        self,
        accounts: impl IntoIterator<Item = &'a BlockedAccount>,
        now: &DateTime<FixedOffset>,
    ) -> Vec<&'a BlockedAccount> {
        accounts
            .into_iter()
            .filter(|a| self.keeps(a, now))
            .collect()
    }
}

pub fn today_count(accounts: &[BlockedAccount], now: &DateTime<FixedOffset>) -> usize {
    let today = now.date_naive();
    accounts
        .iter()
        .filter(|a| local_date(a, now) == today)
        .count()
}

/// Blocks since midnight seven days ago
pub fn week_count(accounts: &[BlockedAccount], now: &DateTime<FixedOffset>) -> usize {
    let cutoff = start_of_day(now) - Duration::days(7);
    accounts.iter().filter(|a| a.blocked_at >= cutoff).count()
}

/// Blocks per day since the oldest block, at least one day
pub fn average_per_day(accounts: &[BlockedAccount], now: &DateTime<FixedOffset>) -> f64 {
    let Some(oldest) = accounts.iter().map(|a| a.blocked_at).min() else {
        return 0.0;
    };

    let elapsed_ms = (start_of_day(now).to_utc() - oldest).num_milliseconds();
    let day_ms = Duration::days(1).num_milliseconds();
    let days = ((elapsed_ms as f64) / (day_ms as f64)).ceil().max(1.0);

    accounts.len() as f64 / days
}

pub fn summary(accounts: &[BlockedAccount], now: &DateTime<FixedOffset>) -> Summary {
    Summary {
        total: accounts.len(),
        today: today_count(accounts, now),
        week: week_count(accounts, now),
        average_per_day: average_per_day(accounts, now),
    }
}

/// Per-day counts for the last seven days, oldest first
pub fn last_seven_days(accounts: &[BlockedAccount], now: &DateTime<FixedOffset>) -> Vec<DayCount> {
    let today = now.date_naive();
    (0..7)
        .rev()
        .filter_map(|back| today.checked_sub_days(chrono::Days::new(back)))
        .map(|date| DayCount {
            date,
            count: accounts
                .iter()
                .filter(|a| local_date(a, now) == date)
                .count(),
        })
        .collect()
}

/// Accounts grouped by local block date, newest day first
pub fn group_by_day<'a>(
    accounts: &'a [BlockedAccount],
    now: &DateTime<FixedOffset>,
) -> Vec<(NaiveDate, Vec<&'a BlockedAccount>)> {
    let mut groups: Vec<(NaiveDate, Vec<&BlockedAccount>)> = Vec::new();
    for account in accounts {
        let date = local_date(account, now);
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, members)) => members.push(account),
            None => groups.push((date, vec![account])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}
