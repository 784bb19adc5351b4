//! Before/after chart rendering with plotters' SVG backend.

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use rustc_hash::FxHashMap;

use super::data::{Bin, MissingGrid};
use crate::error::{PrepError, Result};

type DrawResult<T = ()> = std::result::Result<T, Box<dyn Error>>;
type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const IMAGE_SIZE: (u32, u32) = (1400, 600);
const CAPTION_STYLE: (&str, f64) = ("sans-serif", 22.0);
const LABEL_STYLE: (&str, f64) = ("sans-serif", 11.0);

fn chart_error(path: &Path, e: &dyn Error) -> PrepError {
    PrepError::Chart(format!("failed to draw {}: {e}", path.display()))
}

/// White canvas split into a left and a right panel
fn panels(path: &Path) -> DrawResult<(Panel<'_>, Panel<'_>, Panel<'_>)> {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut halves = root.split_evenly((1, 2)).into_iter();
    let (Some(left), Some(right)) = (halves.next(), halves.next()) else {
        return Err("drawing area could not be split".into());
    };
    Ok((root, left, right))
}

fn upper_bound(max: usize) -> f64 {
    (max.max(1) as f64 * 1.1).ceil()
}

fn heatmap_panel(area: &Panel<'_>, title: &str, grid: &MissingGrid) -> DrawResult {
    let rows = grid.rows.max(1) as i32;
    let columns = &grid.columns;
    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_STYLE)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..columns.len().max(1) as i32, 0..rows)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(columns.len())
        .x_label_style(LABEL_STYLE)
        .x_label_formatter(&|x: &i32| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| columns.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .y_desc("Row")
        .draw()?;

    // row 0 at the top
    chart.draw_series(grid.missing.iter().map(|&(row, col)| {
        let x = col as i32;
        let y = rows - 1 - row as i32;
        Rectangle::new([(x, y), (x + 1, y + 1)], RED.filled())
    }))?;
    Ok(())
}

/// Missing-value grid before and after cleaning
pub fn draw_missing_heatmap(path: &Path, before: &MissingGrid, after: &MissingGrid) -> Result<()> {
    let draw = || -> DrawResult {
        let (root, left, right) = panels(path)?;
        heatmap_panel(&left, "Missing values before cleaning", before)?;
        heatmap_panel(&right, "Missing values after cleaning", after)?;
        root.present()?;
        Ok(())
    };
    draw().map_err(|e| chart_error(path, e.as_ref()))
}

fn histogram_panel(
    area: &Panel<'_>,
    title: &str,
    column: &str,
    bins: &[Bin],
    y_max: f64,
) -> DrawResult {
    let start = bins.first().map_or(0.0, |b| b.start);
    let end = bins.last().map_or(1.0, |b| b.end);
    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_STYLE)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column)
        .y_desc("Count")
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            BLUE.mix(0.7).filled(),
        )
    }))?;
    Ok(())
}

/// Histogram of a numeric column before and after cleaning
///
/// Both panels must share bin edges.
pub fn draw_histogram(path: &Path, column: &str, before: &[Bin], after: &[Bin]) -> Result<()> {
    let y_max = upper_bound(
        before
            .iter()
            .chain(after)
            .map(|b| b.count)
            .max()
            .unwrap_or(0),
    );
    let draw = || -> DrawResult {
        let (root, left, right) = panels(path)?;
        let title = format!("{column} before cleaning");
        histogram_panel(&left, &title, column, before, y_max)?;
        let title = format!("{column} after cleaning");
        histogram_panel(&right, &title, column, after, y_max)?;
        root.present()?;
        Ok(())
    };
    draw().map_err(|e| chart_error(path, e.as_ref()))
}

fn bar_panel(
    area: &Panel<'_>,
    title: &str,
    categories: &[String],
    counts: &FxHashMap<String, usize>,
    y_max: f64,
) -> DrawResult {
    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_STYLE)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..categories.len().max(1) as i32, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_style(LABEL_STYLE)
        .x_label_formatter(&|x: &i32| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| categories.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .y_desc("Count")
        .draw()?;

    chart.draw_series(categories.iter().enumerate().map(|(i, category)| {
        let x = i as i32;
        let count = counts.get(category).copied().unwrap_or(0) as f64;
        Rectangle::new([(x, 0.0), (x + 1, count)], GREEN.mix(0.7).filled())
    }))?;
    Ok(())
}

/// Value counts of a categorical column before and after cleaning
pub fn draw_category_counts(
    path: &Path,
    column: &str,
    categories: &[String],
    before: &FxHashMap<String, usize>,
    after: &FxHashMap<String, usize>,
) -> Result<()> {
    let y_max = upper_bound(
        before
            .values()
            .chain(after.values())
            .copied()
            .max()
            .unwrap_or(0),
    );
    let draw = || -> DrawResult {
        let (root, left, right) = panels(path)?;
        let title = format!("{column} before cleaning");
        bar_panel(&left, &title, categories, before, y_max)?;
        let title = format!("{column} after cleaning");
        bar_panel(&right, &title, categories, after, y_max)?;
        root.present()?;
        Ok(())
    };
    draw().map_err(|e| chart_error(path, e.as_ref()))
}
