// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chart rendering: burndown line, effort bars, stacked effort bar.
//!
//! Charts are written as PNG files named `{Chart}Sprint{code}.png`
//! into the configured image directory and served back via `/static`.

use plotters::prelude::*;
use sp_core::{Burndown, EffortSummary, SprintCode};
use std::path::Path;

use crate::error::{Error, Result};

const CHART_SIZE: (u32, u32) = (800, 600);

fn draw_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

/// File name for a sprint's burndown chart.
pub fn burndown_file(code: &SprintCode) -> String {
    format!("BurndownSprint{}.png", code.as_str())
}

/// File name for a sprint's grouped effort bars.
pub fn effort_file(code: &SprintCode) -> String {
    format!("EffortSprint{}.png", code.as_str())
}

/// File name for a sprint's stacked effort bar.
pub fn effort_stack_file(code: &SprintCode) -> String {
    format!("EffortStackSprint{}.png", code.as_str())
}

/// Render the burndown chart: ideal line across the whole sprint,
/// actual remaining effort up to today.
pub fn burndown_chart(
    path: &Path,
    code: &SprintCode,
    burndown: &Burndown,
    generated_at: &str,
) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let points = burndown.days.len().max(2);
    let y_max = (burndown.total * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Burndown of sprint {} @ {}", code.as_str(), generated_at),
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(70)
        .y_label_area_size(50)
        .build_cartesian_2d(0i32..(points as i32 - 1), 0f64..y_max)
        .map_err(draw_err)?;

    let day_label = |i: &i32| {
        burndown
            .days
            .get(*i as usize)
            .map(|d| d.format("%y-%m-%d %a").to_string())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .y_desc("Man days effort")
        .x_labels(points)
        .x_label_formatter(&day_label)
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            burndown
                .ideal
                .iter()
                .enumerate()
                .map(|(i, v)| (i as i32, *v)),
            BLUE.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label("Ideal")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            burndown
                .remaining
                .iter()
                .enumerate()
                .map(|(i, v)| (i as i32, *v)),
            GREEN.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label("Actual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Render the grouped bars: planned, done, and left effort side by side
/// with the value printed above each bar.
pub fn effort_bars_chart(path: &Path, code: &SprintCode, summary: &EffortSummary) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let y_max = (summary.total.max(summary.done + summary.open) * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Man days effort for sprint {}", code.as_str()),
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..2.5f64, 0f64..y_max)
        .map_err(draw_err)?;

    let labels = ["Planned effort", "Effort done", "Effort left"];
    let bar_label = move |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 0.01 && (0.0..=2.0).contains(&i) {
            labels[i as usize].to_string()
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Effort man days")
        .x_labels(3)
        .x_label_formatter(&bar_label)
        .draw()
        .map_err(draw_err)?;

    let bars = [
        (0.0, summary.total, BLUE),
        (1.0, summary.done, GREEN),
        (2.0, summary.open, RED),
    ];
    for (x, value, color) in bars {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x - 0.25, 0.0), (x + 0.25, value)],
                color.filled(),
            )))
            .map_err(draw_err)?;
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{value:.2}"),
                (x - 0.15, value + y_max * 0.02),
                ("sans-serif", 16),
            )))
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Render the stacked bar: done effort with the remaining effort on top.
pub fn effort_stack_chart(path: &Path, code: &SprintCode, summary: &EffortSummary) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let y_max = ((summary.done + summary.open) * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Done vs left for sprint {}", code.as_str()),
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..0.5f64, 0f64..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("Effort man days")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(-0.1, 0.0), (0.1, summary.done)],
            GREEN.filled(),
        )))
        .map_err(draw_err)?
        .label("Effort done")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], GREEN.filled()));

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(-0.1, summary.done), (0.1, summary.done + summary.open)],
            RED.filled(),
        )))
        .map_err(draw_err)?
        .label("Effort left")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.filled()));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
