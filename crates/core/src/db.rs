// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only data access against the tracker's relational schema.
//!
//! The [`Database`] struct issues parameterized queries over the
//! tracker's own tables: `issue`, `custom_field_value`, `issue_status`,
//! and the status-change history in `change_group`/`change_item`.
//! Which custom fields and status IDs to query comes from [`Config`];
//! nothing is discovered at runtime.
//!
//! Effort sums return 0.0 when no rows match; a query failure is a
//! typed error, so callers can tell "no data" from "broken query".

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::config::{Config, FieldConfig, RejectedEffortPolicy, StatusIds};
use crate::error::{Error, Result};
use crate::issue::{round2, DoneRecord, IssueRow, Status, StatusFilter};
use crate::sprint::SprintCode;

/// Tracker database connection plus the schema IDs needed to query it.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
    fields: FieldConfig,
    statuses: StatusIds,
    policy: RejectedEffortPolicy,
}

/// Parse a change-history timestamp; trackers store either RFC 3339 or
/// the bare `YYYY-MM-DD HH:MM:SS` form (taken as UTC).
fn parse_created(value: &str, key: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .map_err(|_| {
            Error::CorruptedData(format!(
                "invalid change timestamp '{value}' for issue '{key}'"
            ))
        })
}

/// `?, ?, ...` for an IN list of `n` values.
fn placeholders(n: usize) -> String {
    let mut s = String::with_capacity(n * 3);
    for i in 0..n {
        if i > 0 {
            s.push_str(", ");
        }
        s.push('?');
    }
    s
}

impl Database {
    /// Open the tracker database read-only at the configured path.
    pub fn open(config: &Config) -> Result<Self> {
        let conn = Connection::open_with_flags(
            &config.database.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA query_only = ON; PRAGMA busy_timeout = 5000;")?;
        Ok(Database {
            conn,
            fields: config.fields,
            statuses: config.statuses,
            policy: config.sprint.rejected_effort,
        })
    }

    /// Open an in-memory database (for testing); writable so fixtures
    /// can be loaded through `conn`.
    pub fn open_in_memory(config: &Config) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database {
            conn,
            fields: config.fields,
            statuses: config.statuses,
            policy: config.sprint.rejected_effort,
        })
    }

    /// Status IDs selected by a filter, or `None` for no status clause.
    fn filter_ids(&self, filter: StatusFilter) -> Option<Vec<i64>> {
        match filter {
            StatusFilter::All => None,
            StatusFilter::Done => Some(self.statuses.done_ids()),
            StatusFilter::Open => Some(self.statuses.open_ids()),
        }
    }

    /// List a sprint's issues, optionally restricted to done or open
    /// statuses, ordered by ticket code.
    pub fn issues_for_sprint(
        &self,
        code: &SprintCode,
        filter: StatusFilter,
    ) -> Result<Vec<IssueRow>> {
        let mut sql = String::from(
            "SELECT i.pkey, i.summary, s.pname, v.numbervalue, i.assignee
             FROM custom_field_value v
             JOIN issue i ON v.issue = i.id
             JOIN issue_status s ON i.issuestatus = s.id
             WHERE v.customfield = ?
               AND i.id IN (SELECT issue FROM custom_field_value
                            WHERE customfield = ? AND stringvalue = ?)",
        );

        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(self.fields.effort),
            Box::new(self.fields.sprint),
            Box::new(code.as_str().to_string()),
        ];

        if let Some(ids) = self.filter_ids(filter) {
            sql.push_str(&format!(
                " AND i.issuestatus IN ({})",
                placeholders(ids.len())
            ));
            for id in ids {
                params_vec.push(Box::new(id));
            }
        }

        sql.push_str(" ORDER BY i.pkey");

        let mut stmt = self.conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), |row| {
                let effort: Option<f64> = row.get(3)?;
                Ok(IssueRow {
                    key: row.get(0)?,
                    summary: row.get(1)?,
                    status: row.get(2)?,
                    effort: round2(effort.unwrap_or(0.0)),
                    assignee: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Sum the effort field over a sprint's issues, optionally
    /// restricted to a status ID set. 0.0 when nothing matches.
    fn effort_sum(&self, code: &SprintCode, status_ids: Option<Vec<i64>>) -> Result<f64> {
        let mut sql = String::from(
            "SELECT SUM(v.numbervalue)
             FROM custom_field_value v
             JOIN issue i ON v.issue = i.id
             WHERE v.customfield = ?
               AND i.id IN (SELECT issue FROM custom_field_value
                            WHERE customfield = ? AND stringvalue = ?)",
        );

        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(self.fields.effort),
            Box::new(self.fields.sprint),
            Box::new(code.as_str().to_string()),
        ];

        if let Some(ids) = status_ids {
            sql.push_str(&format!(
                " AND i.issuestatus IN ({})",
                placeholders(ids.len())
            ));
            for id in ids {
                params_vec.push(Box::new(id));
            }
        }

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let sum: Option<f64> =
            self.conn
                .query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;

        Ok(round2(sum.unwrap_or(0.0)))
    }

    /// Total estimated effort for the sprint, all statuses.
    pub fn total_effort(&self, code: &SprintCode) -> Result<f64> {
        self.effort_sum(code, None)
    }

    /// Effort of the sprint's issues in a done status.
    pub fn done_effort(&self, code: &SprintCode) -> Result<f64> {
        self.effort_sum(code, Some(self.statuses.done_ids()))
    }

    /// Effort of the sprint's issues still in an open status.
    pub fn open_effort(&self, code: &SprintCode) -> Result<f64> {
        self.effort_sum(code, Some(self.statuses.open_ids()))
    }

    /// First time an issue's status was changed to Implemented, from
    /// the change history; `None` if it never was.
    fn implemented_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let created: Option<String> = self
            .conn
            .query_row(
                "SELECT g.created
                 FROM change_group g
                 JOIN change_item c ON c.groupid = g.id
                 WHERE g.issueid = (SELECT id FROM issue WHERE pkey = ?1)
                   AND c.field = 'status' AND c.newvalue = ?2
                 ORDER BY g.created LIMIT 1",
                params![key, self.statuses.id(Status::Implemented).to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match created {
            None => Ok(None),
            Some(s) => parse_created(&s, key).map(Some),
        }
    }

    /// Each done issue with its effort and the moment it reached
    /// Implemented, for the burndown curve.
    ///
    /// An issue that entered a done status without an Implemented
    /// transition (rejected outright) gets `done_at = now` and effort
    /// according to the configured rejected-effort policy.
    pub fn done_records(&self, code: &SprintCode, now: DateTime<Utc>) -> Result<Vec<DoneRecord>> {
        let issues = self.issues_for_sprint(code, StatusFilter::Done)?;

        let mut records = Vec::with_capacity(issues.len());
        for issue in issues {
            match self.implemented_at(&issue.key)? {
                Some(done_at) => records.push(DoneRecord {
                    key: issue.key,
                    effort: issue.effort,
                    done_at,
                }),
                None => {
                    let effort = match self.policy {
                        RejectedEffortPolicy::Zero => 0.0,
                        RejectedEffortPolicy::Estimate => issue.effort,
                    };
                    records.push(DoneRecord {
                        key: issue.key,
                        effort,
                        done_at: now,
                    });
                }
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
