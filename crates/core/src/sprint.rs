// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sprint model: calendar window, effort aggregates, burndown.
//!
//! A sprint is identified by a compact year+week code and owns a
//! computed day sequence ending on the ISO week's Friday. Aggregates
//! delegate to [`Database`] and are recomputed on every call; nothing
//! is cached between requests.

use chrono::{DateTime, Days, NaiveDate, Utc, Weekday};
use std::fmt;

use crate::config::SprintConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::issue::{round2, DoneRecord, EffortSummary, IssueRow, StatusFilter};

/// Compact sprint identifier: one year digit plus a two-digit ISO week.
///
/// With year prefix "201", code "211" names the sprint ending in week
/// 11 of 2012.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintCode(String);

impl SprintCode {
    /// Parse and validate a sprint code.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidSprintCode(s.to_string()));
        }
        let week: u32 = s[1..]
            .parse()
            .map_err(|_| Error::InvalidSprintCode(s.to_string()))?;
        if !(1..=53).contains(&week) {
            return Err(Error::InvalidSprintCode(s.to_string()));
        }
        Ok(SprintCode(s.to_string()))
    }

    /// The raw code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ISO week number encoded in the code (1..=53).
    pub fn week(&self) -> u32 {
        // Validated digits in parse().
        self.0[1..].parse().unwrap_or(1)
    }

    /// Calendar year: the configured three-digit prefix plus the code's
    /// leading year digit.
    pub fn year(&self, year_prefix: &str) -> Result<i32> {
        format!("{year_prefix}{}", &self.0[..1])
            .parse()
            .map_err(|_| Error::InvalidSprintCode(self.0.clone()))
    }
}

impl fmt::Display for SprintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Burndown series for one sprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Burndown {
    /// The sprint's day sequence.
    pub days: Vec<NaiveDate>,
    /// Ideal line: total effort down to zero, one point per day.
    pub ideal: Vec<f64>,
    /// Effort left at the end of each elapsed day; future days omitted.
    pub remaining: Vec<f64>,
    /// Total estimated effort the lines start from.
    pub total: f64,
}

/// A sprint with its computed calendar window.
#[derive(Debug, Clone)]
pub struct Sprint {
    code: SprintCode,
    days: Vec<NaiveDate>,
}

impl Sprint {
    /// Build a sprint from its code and the configured calendar policy.
    ///
    /// The sprint ends on the Friday of the code's ISO week (the
    /// anchor-Thursday week rule via [`NaiveDate::from_isoywd_opt`])
    /// and starts `days - 5` days before that week's Monday, so the
    /// weekend lead-in is part of the window.
    pub fn new(code: SprintCode, config: &SprintConfig) -> Result<Self> {
        if config.days < 6 {
            return Err(Error::Config(format!(
                "sprint length must be at least 6 days, got {}",
                config.days
            )));
        }
        let year = code.year(&config.year_prefix)?;
        let monday = NaiveDate::from_isoywd_opt(year, code.week(), Weekday::Mon)
            .ok_or_else(|| Error::DateOutOfRange(code.to_string()))?;
        let start = monday
            .checked_sub_days(Days::new(u64::from(config.days - 5)))
            .ok_or_else(|| Error::DateOutOfRange(code.to_string()))?;

        let days = (0..config.days)
            .map(|i| {
                start
                    .checked_add_days(Days::new(u64::from(i)))
                    .ok_or_else(|| Error::DateOutOfRange(code.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Sprint { code, days })
    }

    /// The sprint's identifier.
    pub fn code(&self) -> &SprintCode {
        &self.code
    }

    /// Ordered day sequence, first day through the closing Friday.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// First calendar day of the sprint.
    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    /// Last calendar day of the sprint (the closing Friday).
    pub fn last_day(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    /// Issues tagged with this sprint, filtered by status bucket.
    pub fn issues(&self, db: &Database, filter: StatusFilter) -> Result<Vec<IssueRow>> {
        db.issues_for_sprint(&self.code, filter)
    }

    /// Total estimated effort, rounded to 2 decimals.
    pub fn total_effort(&self, db: &Database) -> Result<f64> {
        db.total_effort(&self.code)
    }

    /// Effort in done statuses, rounded to 2 decimals.
    pub fn done_effort(&self, db: &Database) -> Result<f64> {
        db.done_effort(&self.code)
    }

    /// Effort in open statuses, rounded to 2 decimals.
    pub fn open_effort(&self, db: &Database) -> Result<f64> {
        db.open_effort(&self.code)
    }

    /// Total, done, and open effort in one summary.
    pub fn summary(&self, db: &Database) -> Result<EffortSummary> {
        Ok(EffortSummary::new(
            self.total_effort(db)?,
            self.done_effort(db)?,
            self.open_effort(db)?,
        ))
    }

    /// Burndown series: ideal line over the whole window, actual
    /// remaining effort for each day up to `today` inclusive.
    pub fn burndown(
        &self,
        db: &Database,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Burndown> {
        let total = self.total_effort(db)?;
        let records = db.done_records(&self.code, now)?;

        let remaining = self
            .days
            .iter()
            .filter(|day| **day <= today)
            .map(|day| round2(total - daily_done_effort(*day, &records)))
            .collect();

        Ok(Burndown {
            days: self.days.clone(),
            ideal: ideal_line(total, self.days.len()),
            remaining,
            total,
        })
    }
}

/// Effort done by the end of `day`: the sum over every record whose
/// Implemented timestamp falls on or before that day.
///
/// Monotonically non-decreasing across a sprint's day sequence for a
/// fixed record set.
pub fn daily_done_effort(day: NaiveDate, records: &[DoneRecord]) -> f64 {
    round2(
        records
            .iter()
            .filter(|r| r.done_at.date_naive() <= day)
            .map(|r| r.effort)
            .sum(),
    )
}

/// Straight line from `total` down to zero across `points` values.
/// All zeros when there is no effort or fewer than two points.
pub fn ideal_line(total: f64, points: usize) -> Vec<f64> {
    if total <= 0.0 || points < 2 {
        return vec![0.0; points];
    }
    let step = total / (points - 1) as f64;
    (0..points)
        .map(|i| round2(total - step * i as f64))
        .collect()
}

#[cfg(test)]
#[path = "sprint_tests.rs"]
mod tests;
