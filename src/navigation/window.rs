use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zone used when the caller does not supply one
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Length of the Upcoming tab, counted from now
pub const UPCOMING_DAYS: i64 = 7;

/// Listing tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Featured,
    Today,
    Tomorrow,
    Upcoming,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Featured, Tab::Today, Tab::Tomorrow, Tab::Upcoming];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Featured => "Featured",
            Tab::Today => "Today",
            Tab::Tomorrow => "Tomorrow",
            Tab::Upcoming => "Upcoming",
        }
    }

    /// Time range of games eligible for this tab
    pub fn window(&self, now: DateTime<Utc>, tz: Tz) -> TimeWindow {
        match self {
            Tab::Featured | Tab::Today => TimeWindow::today(now, tz),
            Tab::Tomorrow => TimeWindow::tomorrow(now, tz),
            Tab::Upcoming => TimeWindow::upcoming(now),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowParseError {
    #[error("unknown tab: {0}")]
    Tab(String),
    #[error("unknown time zone: {0}")]
    TimeZone(String),
}

impl FromStr for Tab {
    type Err = WindowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WindowParseError::Tab(s.to_string()))
    }
}

/// Parse an IANA zone name such as `America/Chicago`
pub fn parse_time_zone(name: &str) -> Result<Tz, WindowParseError> {
    Tz::from_str(name.trim()).map_err(|_| WindowParseError::TimeZone(name.to_string()))
}

/// Closed time interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Local `00:00:00` through local `23:59:59` of `date` in `tz`
    pub fn day(date: NaiveDate, tz: Tz) -> Self {
        let start = resolve_local(tz, date.and_time(NaiveTime::MIN), Probe::Forward);
        let end = resolve_local(
            tz,
            date.and_hms_opt(23, 59, 59).unwrap_or(date.and_time(NaiveTime::MIN)),
            Probe::Backward,
        );
        Self { start, end }
    }

    pub fn today(now: DateTime<Utc>, tz: Tz) -> Self {
        Self::day(local_date(now, tz), tz)
    }

    pub fn tomorrow(now: DateTime<Utc>, tz: Tz) -> Self {
        let today = local_date(now, tz);
        Self::day(today.succ_opt().unwrap_or(today), tz)
    }

    /// From now through seven days later
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            end: now + Duration::days(UPCOMING_DAYS),
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Calendar date of `time` as seen in `tz`
pub fn local_date(time: DateTime<Utc>, tz: Tz) -> NaiveDate {
    time.with_timezone(&tz).date_naive()
}

/// True for games on the current local day or any later one
pub fn is_today_or_later(time: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> bool {
    local_date(time, tz) >= local_date(now, tz)
}

#[derive(Clone, Copy)]
enum Probe {
    Forward,
    Backward,
}

/// Map a local wall-clock time to UTC. Ambiguous times take the earlier
/// (forward) or later (backward) instant; times inside a DST gap move to the
/// nearest valid minute in the probe direction.
fn resolve_local(tz: Tz, local: NaiveDateTime, probe: Probe) -> DateTime<Utc> {
    let step = match probe {
        Probe::Forward => Duration::minutes(1),
        Probe::Backward => Duration::minutes(-1),
    };

    let mut candidate = local;
    for _ in 0..(24 * 60) {
        let resolved = tz.from_local_datetime(&candidate);
        let picked = match probe {
            Probe::Forward => resolved.earliest(),
            Probe::Backward => resolved.latest(),
        };
        if let Some(dt) = picked {
            return dt.with_timezone(&Utc);
        }
        candidate += step;
    }

    Utc.from_utc_datetime(&local)
}
