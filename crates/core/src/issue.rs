// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for sprint reporting.
//!
//! This module contains the fundamental data types: Status, StatusFilter,
//! IssueRow, DoneRecord, and EffortSummary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Workflow status of a tracker issue.
///
/// Mirrors the tracker's status set; each variant maps to a numeric
/// tracker ID through [`crate::config::StatusIds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    Assigned,
    InProgress,
    OnHold,
    ReOpened,
    Planned,
    Implemented,
    Verified,
    Integrated,
    Rejected,
    Resolved,
    Closed,
    Open,
}

/// Statuses counted as "done" for effort aggregation and burndown.
pub const DONE_STATUSES: [Status; 4] = [
    Status::Integrated,
    Status::Implemented,
    Status::Verified,
    Status::Rejected,
];

/// Statuses counted as "open" (work remaining) for effort aggregation.
pub const OPEN_STATUSES: [Status; 6] = [
    Status::New,
    Status::Assigned,
    Status::InProgress,
    Status::OnHold,
    Status::ReOpened,
    Status::Planned,
];

impl Status {
    /// Returns the string representation used in configuration and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Assigned => "assigned",
            Status::InProgress => "in_progress",
            Status::OnHold => "on_hold",
            Status::ReOpened => "re_opened",
            Status::Planned => "planned",
            Status::Implemented => "implemented",
            Status::Verified => "verified",
            Status::Integrated => "integrated",
            Status::Rejected => "rejected",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
            Status::Open => "open",
        }
    }

    /// Returns true if this status counts toward done effort.
    pub fn is_done(&self) -> bool {
        DONE_STATUSES.contains(self)
    }

    /// Returns true if this status counts toward open effort.
    pub fn is_open(&self) -> bool {
        OPEN_STATUSES.contains(self)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "assigned" => Ok(Status::Assigned),
            "in_progress" => Ok(Status::InProgress),
            "on_hold" => Ok(Status::OnHold),
            "re_opened" => Ok(Status::ReOpened),
            "planned" => Ok(Status::Planned),
            "implemented" => Ok(Status::Implemented),
            "verified" => Ok(Status::Verified),
            "integrated" => Ok(Status::Integrated),
            "rejected" => Ok(Status::Rejected),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            "open" => Ok(Status::Open),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Which slice of a sprint's issues a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every issue tagged with the sprint.
    All,
    /// Only issues in a done status.
    Done,
    /// Only issues in an open status.
    Open,
}

impl StatusFilter {
    /// Returns the string representation used in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Done => "done",
            StatusFilter::Open => "open",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "done" => Ok(StatusFilter::Done),
            "open" => Ok(StatusFilter::Open),
            _ => Err(Error::InvalidStatusFilter(s.to_string())),
        }
    }
}

/// One issue as listed in a sprint report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRow {
    /// Human-readable ticket code (e.g. "PROJ-123").
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Status name as stored by the tracker (e.g. "In Progress").
    pub status: String,
    /// Estimated effort in man-days; 0.0 when the custom field is unset.
    pub effort: f64,
    /// Assignee identifier, if any.
    pub assignee: Option<String>,
}

/// A done issue together with the moment it reached Implemented.
///
/// Issues that entered a done status without ever passing through
/// Implemented (a straight rejection) carry the caller-supplied "now"
/// and effort according to the configured rejected-effort policy.
#[derive(Debug, Clone, PartialEq)]
pub struct DoneRecord {
    /// Human-readable ticket code.
    pub key: String,
    /// Effort counted for this issue, in man-days.
    pub effort: f64,
    /// First time the issue's status became Implemented.
    pub done_at: DateTime<Utc>,
}

/// Planned/done/open effort totals for a sprint, in man-days.
///
/// `done + open` need not equal `total`: issues can sit in a status
/// that belongs to neither bucket (e.g. Resolved).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffortSummary {
    pub total: f64,
    pub done: f64,
    pub open: f64,
}

impl EffortSummary {
    /// Builds a summary with all values rounded to 2 decimals.
    pub fn new(total: f64, done: f64, open: f64) -> Self {
        EffortSummary {
            total: round2(total),
            done: round2(done),
            open: round2(open),
        }
    }

    /// Done effort as a percentage of total; 0.0 when total is zero.
    pub fn done_percent(&self) -> f64 {
        if self.total > 0.0 {
            round2(self.done / self.total * 100.0)
        } else {
            0.0
        }
    }

    /// Open effort as a percentage of total; 0.0 when total is zero.
    pub fn open_percent(&self) -> f64 {
        if self.total > 0.0 {
            round2(self.open / self.total * 100.0)
        } else {
            0.0
        }
    }
}

/// Round to 2 decimals, the precision used for all reported effort.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
