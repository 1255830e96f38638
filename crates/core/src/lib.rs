// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sp-core: Shared library for sprint progress reporting.
//!
//! This crate provides the data model, tracker-schema configuration,
//! read-only data access, and the sprint/burndown math used by the
//! sprintd web front end.

pub mod config;
pub mod db;
pub mod error;
pub mod issue;
pub mod sprint;

pub use config::{
    Config, DatabaseConfig, FieldConfig, RejectedEffortPolicy, ServerConfig, SprintConfig,
    StatusIds,
};
pub use db::Database;
pub use error::{Error, Result};
pub use issue::{
    DoneRecord, EffortSummary, IssueRow, Status, StatusFilter, DONE_STATUSES, OPEN_STATUSES,
};
pub use sprint::{daily_done_effort, ideal_line, Burndown, Sprint, SprintCode};
