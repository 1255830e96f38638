// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use sp_core::{DatabaseConfig, FieldConfig, ServerConfig, SprintConfig, StatusIds};
use std::path::PathBuf;
use yare::parameterized;

fn test_config(db_path: PathBuf) -> Config {
    Config {
        database: DatabaseConfig { path: db_path },
        fields: FieldConfig {
            sprint: 10032,
            effort: 10033,
        },
        statuses: StatusIds {
            new: 10000,
            assigned: 10001,
            in_progress: 3,
            on_hold: 10006,
            re_opened: 4,
            planned: 10007,
            implemented: 10002,
            verified: 10004,
            integrated: 10003,
            rejected: 10005,
            resolved: 5,
            closed: 6,
            open: 1,
        },
        sprint: SprintConfig::default(),
        server: ServerConfig::default(),
    }
}

#[parameterized(
    plotburn = { "plotburn", Command::PlotBurn },
    ploteffort = { "ploteffort", Command::PlotEffort },
    plotbar = { "plotbar", Command::PlotBar },
    issuesstatus = { "issuesstatus", Command::IssuesStatus },
    allissues = { "allissues", Command::AllIssues },
    issues_alias = { "issues", Command::AllIssues },
    doneissues = { "doneissues", Command::DoneIssues },
    openissues = { "openissues", Command::OpenIssues },
    effortsummary = { "effortsummary", Command::EffortSummary },
)]
fn command_parse_valid(input: &str, expected: Command) {
    assert_eq!(Command::parse(input), Some(expected));
}

#[parameterized(
    unknown = { "plotpie" },
    empty = { "" },
    case_sensitive = { "PlotBurn" },
)]
fn command_parse_invalid(input: &str) {
    assert_eq!(Command::parse(input), None);
}

#[parameterized(
    digits = { "211", "211" },
    space = { "a b", "a%20b" },
    ampersand = { "a&b", "a%26b" },
    tilde_kept = { "a~b", "a~b" },
)]
fn urlencode_cases(input: &str, expected: &str) {
    assert_eq!(urlencode(input), expected);
}

#[test]
fn invalid_sprint_code_is_reported_as_such() {
    let config = test_config(PathBuf::from("/nonexistent/tracker.db"));
    let result = run_command(&config, "not-a-code", Command::EffortSummary);
    assert!(matches!(
        result,
        Err(Error::Core(sp_core::Error::InvalidSprintCode(_)))
    ));
}

#[test]
fn missing_database_is_an_error() {
    let config = test_config(PathBuf::from("/nonexistent/tracker.db"));
    let result = run_command(&config, "211", Command::EffortSummary);
    assert!(matches!(
        result,
        Err(Error::Core(sp_core::Error::Database(_)))
    ));
}
