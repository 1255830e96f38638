// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration for the sprint reporting service.
//!
//! All tracker-schema knowledge lives here: the numeric IDs of the
//! sprint and effort custom fields and of every workflow status. These
//! are fixed per tracker installation and never discovered at runtime,
//! so [`Config::validate`] checks them once at startup instead of
//! trusting them silently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::{Status, DONE_STATUSES, OPEN_STATUSES};

/// Top-level configuration, loaded from a TOML file by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub fields: FieldConfig,
    pub statuses: StatusIds,
    #[serde(default)]
    pub sprint: SprintConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where the tracker database lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the tracker's SQLite database file.
    pub path: PathBuf,
}

/// Numeric IDs of the custom fields used for sprint reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Custom field holding the sprint code (string value).
    pub sprint: i64,
    /// Custom field holding the effort estimate in man-days (number value).
    pub effort: i64,
}

/// Numeric tracker ID for each workflow status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusIds {
    pub new: i64,
    pub assigned: i64,
    pub in_progress: i64,
    pub on_hold: i64,
    pub re_opened: i64,
    pub planned: i64,
    pub implemented: i64,
    pub verified: i64,
    pub integrated: i64,
    pub rejected: i64,
    pub resolved: i64,
    pub closed: i64,
    pub open: i64,
}

impl StatusIds {
    /// Returns the tracker ID for a status.
    pub fn id(&self, status: Status) -> i64 {
        match status {
            Status::New => self.new,
            Status::Assigned => self.assigned,
            Status::InProgress => self.in_progress,
            Status::OnHold => self.on_hold,
            Status::ReOpened => self.re_opened,
            Status::Planned => self.planned,
            Status::Implemented => self.implemented,
            Status::Verified => self.verified,
            Status::Integrated => self.integrated,
            Status::Rejected => self.rejected,
            Status::Resolved => self.resolved,
            Status::Closed => self.closed,
            Status::Open => self.open,
        }
    }

    /// Tracker IDs of the statuses counted as done.
    pub fn done_ids(&self) -> Vec<i64> {
        DONE_STATUSES.iter().map(|s| self.id(*s)).collect()
    }

    /// Tracker IDs of the statuses counted as open.
    pub fn open_ids(&self) -> Vec<i64> {
        OPEN_STATUSES.iter().map(|s| self.id(*s)).collect()
    }

    fn all_ids(&self) -> [i64; 13] {
        [
            self.new,
            self.assigned,
            self.in_progress,
            self.on_hold,
            self.re_opened,
            self.planned,
            self.implemented,
            self.verified,
            self.integrated,
            self.rejected,
            self.resolved,
            self.closed,
            self.open,
        ]
    }
}

/// How much effort a rejected issue with no Implemented transition
/// contributes to done effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RejectedEffortPolicy {
    /// Contribute nothing.
    #[default]
    Zero,
    /// Contribute the original estimate.
    Estimate,
}

impl RejectedEffortPolicy {
    /// Returns the string representation used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectedEffortPolicy::Zero => "zero",
            RejectedEffortPolicy::Estimate => "estimate",
        }
    }
}

impl fmt::Display for RejectedEffortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RejectedEffortPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(RejectedEffortPolicy::Zero),
            "estimate" => Ok(RejectedEffortPolicy::Estimate),
            _ => Err(Error::InvalidPolicy(s.to_string())),
        }
    }
}

/// Sprint calendar policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintConfig {
    /// Sprint length in days, weekend lead-in included.
    #[serde(default = "default_sprint_days")]
    pub days: u32,
    /// First three digits of the years sprints can fall in.
    #[serde(default = "default_year_prefix")]
    pub year_prefix: String,
    /// Effort contribution of rejected issues without an Implemented
    /// transition.
    #[serde(default)]
    pub rejected_effort: RejectedEffortPolicy,
}

impl Default for SprintConfig {
    fn default() -> Self {
        SprintConfig {
            days: default_sprint_days(),
            year_prefix: default_year_prefix(),
            rejected_effort: RejectedEffortPolicy::default(),
        }
    }
}

fn default_sprint_days() -> u32 {
    12
}

fn default_year_prefix() -> String {
    "201".to_string()
}

/// Web front end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Directory chart images are written to and served from.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen: default_listen(),
            image_dir: default_image_dir(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("./static")
}

impl Config {
    /// Validates the configuration once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending value when
    /// field IDs collide, status IDs collide or are non-positive, the
    /// sprint length cannot reach back to a Monday, or the year prefix
    /// is not three digits.
    pub fn validate(&self) -> Result<()> {
        if self.fields.sprint <= 0 || self.fields.effort <= 0 {
            return Err(Error::Config(
                "custom field IDs must be positive".to_string(),
            ));
        }
        if self.fields.sprint == self.fields.effort {
            return Err(Error::Config(format!(
                "sprint and effort custom fields share ID {}",
                self.fields.sprint
            )));
        }

        let mut ids = self.statuses.all_ids();
        if let Some(bad) = ids.iter().find(|id| **id <= 0) {
            return Err(Error::Config(format!(
                "status IDs must be positive, got {bad}"
            )));
        }
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::Config(
                "status IDs must be pairwise distinct".to_string(),
            ));
        }

        // The sprint start rule walks back days - 5 from the end week's
        // Monday; anything shorter than a work week cannot anchor.
        if self.sprint.days < 6 {
            return Err(Error::Config(format!(
                "sprint length must be at least 6 days, got {}",
                self.sprint.days
            )));
        }

        if self.sprint.year_prefix.len() != 3
            || !self.sprint.year_prefix.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::Config(format!(
                "year prefix must be exactly three digits, got '{}'",
                self.sprint.year_prefix
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
