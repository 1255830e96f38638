// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request dispatch for the sprint report front end.
//!
//! One route carries the whole surface: `GET /` with `sprint` and
//! `command` query parameters. Each request opens its own read-only
//! connection to the tracker database and drops it when the response
//! is built; nothing is shared between requests but the config.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::{Local, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

use sp_core::{Config, Database, Sprint, SprintCode, StatusFilter};

use crate::chart;
use crate::error::{Error, Result};
use crate::html;

/// Shared state: the validated configuration, nothing else.
pub struct AppState {
    pub config: Config,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let image_dir = state.config.server.image_dir.clone();
    Router::new()
        .route("/", get(index))
        .route("/query", post(query))
        .nest_service("/static", ServeDir::new(image_dir))
        .with_state(state)
}

/// The report commands reachable from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlotBurn,
    PlotEffort,
    PlotBar,
    IssuesStatus,
    AllIssues,
    DoneIssues,
    OpenIssues,
    EffortSummary,
}

impl Command {
    /// Map a query-string command to a report; `issues` is an alias
    /// kept for old bookmarks.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plotburn" => Some(Command::PlotBurn),
            "ploteffort" => Some(Command::PlotEffort),
            "plotbar" => Some(Command::PlotBar),
            "issuesstatus" => Some(Command::IssuesStatus),
            "allissues" | "issues" => Some(Command::AllIssues),
            "doneissues" => Some(Command::DoneIssues),
            "openissues" => Some(Command::OpenIssues),
            "effortsummary" => Some(Command::EffortSummary),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub sprint: Option<String>,
    pub command: Option<String>,
}

async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Html<String> {
    let (sprint, command) = match (query.sprint.as_deref(), query.command.as_deref()) {
        (Some(s), Some(c)) if !s.is_empty() && !c.is_empty() => (s, c),
        _ => return Html(html::welcome_page()),
    };

    let Some(command) = Command::parse(command) else {
        return Html(html::info_page(
            Some(sprint),
            &format!("Unknown command '{command}'"),
        ));
    };

    match run_command(&state.config, sprint, command) {
        Ok(body) => Html(body),
        Err(Error::Core(err @ sp_core::Error::InvalidSprintCode(_))) => {
            Html(html::info_page(Some(sprint), &err.to_string()))
        }
        Err(err) => {
            tracing::error!("report for sprint {sprint} failed: {err}");
            Html(html::info_page(
                Some(sprint),
                "There was a problem getting information on the sprint; \
                 the tracker database may be unavailable.",
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    pub sprint: String,
    pub command: String,
}

/// The HTML form posts here; redirect so the request shows up in the
/// address bar as a bookmarkable query.
async fn query(Form(form): Form<QueryForm>) -> Redirect {
    Redirect::to(&format!(
        "/?sprint={}&command={}",
        urlencode(&form.sprint),
        urlencode(&form.command)
    ))
}

/// Percent-encode everything outside the URL-safe set.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Run one report command against a fresh read-only connection.
fn run_command(config: &Config, code_str: &str, command: Command) -> Result<String> {
    let code = SprintCode::parse(code_str)?;
    let sprint = Sprint::new(code, &config.sprint)?;
    let db = Database::open(config)?;

    let body = match command {
        Command::AllIssues => html::issue_list_page(
            sprint.code(),
            StatusFilter::All,
            &sprint.issues(&db, StatusFilter::All)?,
        ),
        Command::DoneIssues => html::issue_list_page(
            sprint.code(),
            StatusFilter::Done,
            &sprint.issues(&db, StatusFilter::Done)?,
        ),
        Command::OpenIssues => html::issue_list_page(
            sprint.code(),
            StatusFilter::Open,
            &sprint.issues(&db, StatusFilter::Open)?,
        ),
        Command::IssuesStatus => {
            let done = sprint.issues(&db, StatusFilter::Done)?;
            let open = sprint.issues(&db, StatusFilter::Open)?;
            html::issues_status_page(sprint.code(), &done, &open)
        }
        Command::EffortSummary => {
            html::summary_page(sprint.code(), &sprint.summary(&db)?)
        }
        Command::PlotBurn => {
            let burndown = sprint.burndown(&db, Local::now().date_naive(), Utc::now())?;
            let file = chart::burndown_file(sprint.code());
            let stamp = Local::now().format("%Y-%m-%d %H:%M").to_string();
            chart::burndown_chart(
                &config.server.image_dir.join(&file),
                sprint.code(),
                &burndown,
                &stamp,
            )?;
            html::chart_page(sprint.code(), &file)
        }
        Command::PlotEffort => {
            let summary = sprint.summary(&db)?;
            let file = chart::effort_file(sprint.code());
            chart::effort_bars_chart(
                &config.server.image_dir.join(&file),
                sprint.code(),
                &summary,
            )?;
            html::chart_page(sprint.code(), &file)
        }
        Command::PlotBar => {
            let summary = sprint.summary(&db)?;
            let file = chart::effort_stack_file(sprint.code());
            chart::effort_stack_chart(
                &config.server.image_dir.join(&file),
                sprint.code(),
                &summary,
            )?;
            html::chart_page(sprint.code(), &file)
        }
    };
    Ok(body)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
