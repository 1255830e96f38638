// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTML fragments for the sprint report pages.
//!
//! Everything is rendered into a single layout with the query form at
//! the top, the way the reports are meant to be used: punch in a
//! sprint code, pick a command, read the result below.

use sp_core::{EffortSummary, IssueRow, SprintCode, StatusFilter};

/// Escape text for safe inclusion in HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body fragment in the shared page layout with the query form.
pub fn layout(sprint: Option<&str>, body: &str) -> String {
    let sprint_value = sprint.map(escape).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Sprint reports</title></head>
<body>
<h1>Sprint reports</h1>
<form method="post" action="/query">
  <label>Sprint (YWW): <input type="text" name="sprint" value="{sprint_value}"></label>
  <select name="command">
    <option value="effortsummary">Effort summary</option>
    <option value="allissues">All issues</option>
    <option value="doneissues">Done issues</option>
    <option value="openissues">Open issues</option>
    <option value="issuesstatus">Issues per status</option>
    <option value="plotburn">Burndown chart</option>
    <option value="ploteffort">Effort bars</option>
    <option value="plotbar">Effort stacked bar</option>
  </select>
  <input type="submit" value="Show">
</form>
<hr>
{body}
</body>
</html>
"#
    )
}

/// Landing page shown when sprint or command is missing.
pub fn welcome_page() -> String {
    layout(
        None,
        "<p>Enter the sprint you are interested in, using YWW format \
         (year digit + ISO week number). For example '211' is the sprint \
         ending in week 11 of 2012.</p>",
    )
}

/// Informational page for invalid input or a failed query.
pub fn info_page(sprint: Option<&str>, message: &str) -> String {
    layout(sprint, &format!("<p>{}</p>", escape(message)))
}

/// Issue table for one status bucket, with the bucket's effort sum.
pub fn issue_table(filter: StatusFilter, rows: &[IssueRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<h2>{} issues</h2>\n<table border=\"1\">\n\
         <tr><th>Key</th><th>Summary</th><th>Status</th>\
         <th>Effort</th><th>Assignee</th></tr>\n",
        escape(filter.as_str())
    ));
    let mut sum = 0.0;
    for row in rows {
        sum += row.effort;
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>\n",
            escape(&row.key),
            escape(&row.summary),
            escape(&row.status),
            row.effort,
            escape(row.assignee.as_deref().unwrap_or("-")),
        ));
    }
    out.push_str(&format!(
        "</table>\n<p>{} issues, {:.2} man-days</p>\n",
        rows.len(),
        sum
    ));
    out
}

/// Page listing one bucket of a sprint's issues.
pub fn issue_list_page(code: &SprintCode, filter: StatusFilter, rows: &[IssueRow]) -> String {
    layout(
        Some(code.as_str()),
        &format!(
            "<h1>Sprint {}</h1>\n{}",
            escape(code.as_str()),
            issue_table(filter, rows)
        ),
    )
}

/// Page listing done issues followed by open issues.
pub fn issues_status_page(code: &SprintCode, done: &[IssueRow], open: &[IssueRow]) -> String {
    layout(
        Some(code.as_str()),
        &format!(
            "<h1>Sprint {}</h1>\n{}{}",
            escape(code.as_str()),
            issue_table(StatusFilter::Done, done),
            issue_table(StatusFilter::Open, open)
        ),
    )
}

/// Effort summary page: totals plus done/open percentages.
pub fn summary_page(code: &SprintCode, summary: &EffortSummary) -> String {
    layout(
        Some(code.as_str()),
        &format!(
            "<h1>Sprint {} effort</h1>\n<table border=\"1\">\n\
             <tr><th>Total</th><td>{:.2}</td><td></td></tr>\n\
             <tr><th>Done</th><td>{:.2}</td><td>{:.2}%</td></tr>\n\
             <tr><th>Open</th><td>{:.2}</td><td>{:.2}%</td></tr>\n\
             </table>\n",
            escape(code.as_str()),
            summary.total,
            summary.done,
            summary.done_percent(),
            summary.open,
            summary.open_percent(),
        ),
    )
}

/// Page embedding a freshly generated chart image.
pub fn chart_page(code: &SprintCode, file_name: &str) -> String {
    layout(
        Some(code.as_str()),
        &format!(
            "<h1>Sprint {}</h1>\n<img src=\"/static/{}\" alt=\"sprint chart\">\n",
            escape(code.as_str()),
            escape(file_name)
        ),
    )
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
