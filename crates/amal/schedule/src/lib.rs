//! Amal Schedule - when is a recurring observance due?
//!
//! Habits recur daily, weekly, monthly, yearly, or on explicit special
//! dates, optionally against the Hijri calendar. This crate answers two
//! questions for the surrounding application: which period does a given
//! date fall into (the completion-log key), and is a habit due on that
//! date. It also keeps the consecutive-period streak arithmetic.

#![deny(unsafe_code)]

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How often a habit recurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Explicit calendar dates, one period per date.
    Special,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown frequency '{0}'")]
pub struct UnknownFrequency(pub String);

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            "special" => Ok(Frequency::Special),
            other => Err(UnknownFrequency(other.to_string())),
        }
    }
}

/// Day selectors for one habit. Empty selector lists mean "every period".
///
/// Days of week are numbered 0 = Sunday through 6 = Saturday, matching the
/// convention of the completion logs this crate feeds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub dow: Vec<u32>,
    pub dom: Vec<u32>,
    pub month: Option<u32>,
    pub mdom: Vec<u32>,
    pub dates: Vec<NaiveDate>,

    pub reminder_dow: Vec<u32>,
    pub reminder_dom: Vec<u32>,
    pub reminder_month: Option<u32>,
    pub reminder_mdom: Vec<u32>,

    /// Interpret monthly/yearly selectors against the Hijri calendar.
    pub use_hijri: bool,
    pub hdom: Vec<u32>,
    pub hmonth: Option<u32>,
    pub hmdom: Vec<u32>,
}

/// A date in the tabular Hijri calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Convert a Gregorian date to an approximate Hijri date.
///
/// Tabular (arithmetic) conversion via the Julian day number; accuracy is
/// generally within a day of the observed calendar.
pub fn gregorian_to_hijri(date: NaiveDate) -> HijriDate {
    let d = i64::from(date.day());
    let m = i64::from(date.month());
    let y = i64::from(date.year());

    let a = (m - 14).div_euclid(12);
    let jd = (1461 * (y + 4800 + a)).div_euclid(4)
        + (367 * (m - 2 - 12 * a)).div_euclid(12)
        - (3 * (y + 4900 + a).div_euclid(100)).div_euclid(4)
        + d
        - 32075;

    let l = jd - 1948440 + 10632;
    let n = (l - 1).div_euclid(10631);
    let i = l - 10631 * n + 354;
    let j = (10985 - i).div_euclid(5316) * (50 * i).div_euclid(17719)
        + i.div_euclid(5670) * (43 * i).div_euclid(15238);
    let k = i
        - (30 - j).div_euclid(15) * (17719 * j).div_euclid(50)
        - j.div_euclid(16) * (15238 * j).div_euclid(43)
        + 29;

    let month = (24 * k).div_euclid(709);
    let day = k - (709 * month).div_euclid(24);
    let year = 30 * n + j - 30;

    HijriDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
    }
}

fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// The completion-log key for the period `date` falls into.
pub fn period_key(freq: Frequency, date: NaiveDate) -> String {
    match freq {
        Frequency::Daily | Frequency::Special => date.format("%Y-%m-%d").to_string(),
        Frequency::Weekly => iso_week_key(date),
        Frequency::Monthly => date.format("%Y-%m").to_string(),
        Frequency::Yearly => date.format("%Y").to_string(),
    }
}

/// The key of the period immediately before the one `date` falls into.
///
/// Used by streak bookkeeping to decide whether a completion extends a run.
pub fn previous_period_key(freq: Frequency, date: NaiveDate) -> String {
    let previous = match freq {
        Frequency::Daily | Frequency::Special => date - Days::new(1),
        Frequency::Weekly => date - Days::new(7),
        Frequency::Monthly => date.with_day(1).unwrap_or(date) - Days::new(1),
        Frequency::Yearly => date.with_ordinal(1).unwrap_or(date) - Days::new(1),
    };
    period_key(freq, previous)
}

fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Is the habit due on `date`?
pub fn is_due_on(schedule: &Schedule, freq: Frequency, date: NaiveDate) -> bool {
    match freq {
        Frequency::Daily => true,
        Frequency::Weekly => {
            schedule.dow.is_empty() || schedule.dow.contains(&day_of_week(date))
        }
        Frequency::Monthly => {
            if schedule.use_hijri {
                let hijri = gregorian_to_hijri(date);
                schedule.hdom.is_empty() || schedule.hdom.contains(&hijri.day)
            } else {
                schedule.dom.is_empty() || schedule.dom.contains(&date.day())
            }
        }
        Frequency::Yearly => {
            if schedule.use_hijri {
                let hijri = gregorian_to_hijri(date);
                (schedule.hmonth.is_none() && schedule.hmdom.is_empty())
                    || (schedule.hmonth == Some(hijri.month)
                        && (schedule.hmdom.is_empty() || schedule.hmdom.contains(&hijri.day)))
            } else {
                (schedule.month.is_none() && schedule.mdom.is_empty())
                    || (schedule.month == Some(date.month())
                        && (schedule.mdom.is_empty() || schedule.mdom.contains(&date.day())))
            }
        }
        Frequency::Special => schedule.dates.is_empty() || schedule.dates.contains(&date),
    }
}

/// Should a reminder fire on `date`?
///
/// Special-date habits remind on the scheduled date itself, and a habit
/// with no reminder selectors reminds on every due day.
pub fn is_reminder_scheduled_on(schedule: &Schedule, freq: Frequency, date: NaiveDate) -> bool {
    let no_selectors = schedule.reminder_dow.is_empty()
        && schedule.reminder_dom.is_empty()
        && schedule.reminder_mdom.is_empty();

    match freq {
        Frequency::Special => true,
        _ if no_selectors => true,
        Frequency::Daily | Frequency::Weekly => {
            schedule.reminder_dow.contains(&day_of_week(date))
        }
        Frequency::Monthly => schedule.reminder_dom.contains(&date.day()),
        Frequency::Yearly => {
            schedule.reminder_month == Some(date.month())
                && schedule.reminder_mdom.contains(&date.day())
        }
    }
}

/// Consecutive-period completion streak.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
    /// Period key of the most recent completion.
    pub last: Option<String>,
}

impl Streak {
    /// Register a completion for `period`. Extends the run when the last
    /// completion was exactly one period earlier, otherwise restarts at 1.
    /// Completing the same period twice is a no-op.
    pub fn record(&mut self, period: &str, previous_period: &str) {
        if self.last.as_deref() == Some(period) {
            return;
        }
        self.current = if self.last.as_deref() == Some(previous_period) {
            self.current + 1
        } else {
            1
        };
        self.best = self.best.max(self.current);
        self.last = Some(period.to_string());
    }
}
