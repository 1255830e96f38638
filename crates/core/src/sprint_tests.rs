// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::config::{Config, DatabaseConfig, FieldConfig, ServerConfig, StatusIds};
use chrono::TimeZone;
use std::path::PathBuf;
use yare::parameterized;

fn sprint_config() -> SprintConfig {
    SprintConfig::default()
}

fn code(s: &str) -> SprintCode {
    SprintCode::parse(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// SprintCode parsing tests
#[parameterized(
    week_11 = { "211" },
    week_01 = { "201" },
    week_53 = { "253" },
)]
fn sprint_code_valid(input: &str) {
    assert_eq!(SprintCode::parse(input).unwrap().as_str(), input);
}

#[parameterized(
    empty = { "" },
    short = { "21" },
    long = { "2111" },
    letters = { "2w1" },
    week_zero = { "200" },
    week_54 = { "254" },
)]
fn sprint_code_invalid(input: &str) {
    assert!(matches!(
        SprintCode::parse(input),
        Err(Error::InvalidSprintCode(_))
    ));
}

#[test]
fn sprint_code_year_and_week() {
    let c = code("211");
    assert_eq!(c.week(), 11);
    assert_eq!(c.year("201").unwrap(), 2012);
}

#[test]
fn sprint_window_ends_friday_of_iso_week() {
    // 2012 ISO week 11: Monday 2012-03-12, Friday 2012-03-16.
    let sprint = Sprint::new(code("211"), &sprint_config()).unwrap();
    assert_eq!(sprint.days().len(), 12);
    assert_eq!(sprint.first_day(), date(2012, 3, 5));
    assert_eq!(sprint.last_day(), date(2012, 3, 16));
}

#[test]
fn sprint_days_are_consecutive() {
    let sprint = Sprint::new(code("211"), &sprint_config()).unwrap();
    for pair in sprint.days().windows(2) {
        assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
    }
}

#[test]
fn shorter_sprint_starts_later() {
    let mut config = sprint_config();
    config.days = 7;
    let sprint = Sprint::new(code("211"), &config).unwrap();
    // Monday minus 2 days: Saturday before the week.
    assert_eq!(sprint.first_day(), date(2012, 3, 10));
    assert_eq!(sprint.last_day(), date(2012, 3, 16));
}

#[test]
fn ideal_line_interpolates_to_zero() {
    let line = ideal_line(8.0, 5);
    assert_eq!(line, vec![8.0, 6.0, 4.0, 2.0, 0.0]);
}

#[test]
fn ideal_line_zero_effort_is_flat() {
    assert_eq!(ideal_line(0.0, 4), vec![0.0; 4]);
}

#[test]
fn daily_done_effort_is_monotone() {
    let records = vec![
        DoneRecord {
            key: "PRJ-1".into(),
            effort: 3.0,
            done_at: Utc.with_ymd_and_hms(2012, 3, 6, 10, 0, 0).unwrap(),
        },
        DoneRecord {
            key: "PRJ-2".into(),
            effort: 2.0,
            done_at: Utc.with_ymd_and_hms(2012, 3, 9, 16, 0, 0).unwrap(),
        },
    ];

    let sprint = Sprint::new(code("211"), &sprint_config()).unwrap();
    let mut previous = 0.0;
    for day in sprint.days() {
        let done = daily_done_effort(*day, &records);
        assert!(done >= previous);
        previous = done;
    }
    assert_eq!(previous, 5.0);
}

#[test]
fn daily_done_effort_counts_on_or_before_day() {
    let records = vec![DoneRecord {
        key: "PRJ-1".into(),
        effort: 3.0,
        done_at: Utc.with_ymd_and_hms(2012, 3, 6, 23, 0, 0).unwrap(),
    }];

    assert_eq!(daily_done_effort(date(2012, 3, 5), &records), 0.0);
    assert_eq!(daily_done_effort(date(2012, 3, 6), &records), 3.0);
    assert_eq!(daily_done_effort(date(2012, 3, 7), &records), 3.0);
}

// End-to-end fixture: two issues in sprint 211, one done on day two of
// the working week, one still open.

const FIXTURE_SCHEMA: &str = r#"
CREATE TABLE issue (
    id INTEGER PRIMARY KEY,
    pkey TEXT NOT NULL UNIQUE,
    summary TEXT NOT NULL,
    issuestatus INTEGER NOT NULL,
    assignee TEXT
);
CREATE TABLE issue_status (
    id INTEGER PRIMARY KEY,
    pname TEXT NOT NULL
);
CREATE TABLE custom_field_value (
    issue INTEGER NOT NULL,
    customfield INTEGER NOT NULL,
    numbervalue REAL,
    stringvalue TEXT
);
CREATE TABLE change_group (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issueid INTEGER NOT NULL,
    created TEXT NOT NULL
);
CREATE TABLE change_item (
    groupid INTEGER NOT NULL,
    field TEXT NOT NULL,
    newvalue TEXT
);

INSERT INTO issue_status (id, pname) VALUES
    (3, 'In Progress'), (10002, 'Implemented'), (10003, 'Integrated');

INSERT INTO issue (id, pkey, summary, issuestatus, assignee) VALUES
    (1, 'PRJ-1', 'Finished early', 10003, 'ann'),
    (2, 'PRJ-2', 'Still going', 3, 'bob');

INSERT INTO custom_field_value (issue, customfield, stringvalue) VALUES
    (1, 10032, '211'), (2, 10032, '211');
INSERT INTO custom_field_value (issue, customfield, numbervalue) VALUES
    (1, 10033, 3.0), (2, 10033, 5.0);

INSERT INTO change_group (id, issueid, created) VALUES
    (1, 1, '2012-03-06 14:00:00');
INSERT INTO change_item (groupid, field, newvalue) VALUES
    (1, 'status', '10002');
"#;

fn fixture_config() -> Config {
    Config {
        database: DatabaseConfig {
            path: PathBuf::from("unused"),
        },
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

fn fixture_db(config: &Config) -> Database {
    let db = Database::open_in_memory(config).unwrap();
    db.conn.execute_batch(FIXTURE_SCHEMA).unwrap();
    db
}

#[test]
fn end_to_end_effort_summary() {
    let config = fixture_config();
    let db = fixture_db(&config);
    let sprint = Sprint::new(code("211"), &config.sprint).unwrap();

    assert_eq!(sprint.total_effort(&db).unwrap(), 8.0);
    assert_eq!(sprint.done_effort(&db).unwrap(), 3.0);
    assert_eq!(sprint.open_effort(&db).unwrap(), 5.0);
}

#[test]
fn summary_is_stable_across_requeries() {
    let config = fixture_config();
    let db = fixture_db(&config);
    let sprint = Sprint::new(code("211"), &config.sprint).unwrap();

    let first = sprint.summary(&db).unwrap();
    let second = sprint.summary(&db).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.done_percent(), second.done_percent());
    assert_eq!(first.open_percent(), second.open_percent());
}

#[test]
fn burndown_plots_elapsed_days_only() {
    let config = fixture_config();
    let db = fixture_db(&config);
    let sprint = Sprint::new(code("211"), &config.sprint).unwrap();

    let today = date(2012, 3, 8);
    let now = Utc.with_ymd_and_hms(2012, 3, 8, 12, 0, 0).unwrap();
    let burndown = sprint.burndown(&db, today, now).unwrap();

    assert_eq!(burndown.total, 8.0);
    assert_eq!(burndown.ideal.len(), 12);
    assert_eq!(burndown.ideal[0], 8.0);
    assert_eq!(burndown.ideal[11], 0.0);
    // Days 03-05 through 03-08; PRJ-1 became Implemented on 03-06.
    assert_eq!(burndown.remaining, vec![8.0, 5.0, 5.0, 5.0]);
}

#[test]
fn burndown_before_sprint_start_has_no_actual_points() {
    let config = fixture_config();
    let db = fixture_db(&config);
    let sprint = Sprint::new(code("211"), &config.sprint).unwrap();

    let today = date(2012, 3, 1);
    let now = Utc.with_ymd_and_hms(2012, 3, 1, 12, 0, 0).unwrap();
    let burndown = sprint.burndown(&db, today, now).unwrap();
    assert!(burndown.remaining.is_empty());
}

#[test]
fn empty_sprint_burndown_is_flat_zero() {
    let config = fixture_config();
    let db = fixture_db(&config);
    let sprint = Sprint::new(code("250"), &config.sprint).unwrap();

    let today = date(2012, 12, 14);
    let now = Utc.with_ymd_and_hms(2012, 12, 14, 12, 0, 0).unwrap();
    let burndown = sprint.burndown(&db, today, now).unwrap();
    assert_eq!(burndown.total, 0.0);
    assert_eq!(burndown.ideal, vec![0.0; 12]);
    assert!(burndown.remaining.iter().all(|v| *v == 0.0));
}
