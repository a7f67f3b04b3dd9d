// ============================================================
// Layer 6 — Training Curve Renderer
// ============================================================
// Draws training_history.png: two side-by-side line charts,
//
//   [ Model Accuracy ]  [ Model Loss ]
//
// each with a training and a validation series over the
// completed epochs, "Epoch" on the x axis, the metric name on
// the y axis, and a legend.
//
// Uses the plotters bitmap backend. Text is rendered with a
// system sans-serif font.

use std::{ops::Range, path::Path};

use anyhow::{anyhow, Result};
use plotters::{coord::Shift, prelude::*};

use crate::infra::metrics::TrainingHistory;

const WIDTH:  u32 = 1200;
const HEIGHT: u32 = 400;

/// One chart: a title, a y-axis name and two series.
struct Panel<'a> {
    title:  &'a str,
    metric: &'a str,
    train:  Vec<f64>,
    val:    Vec<f64>,
}

/// y range covering both series with 5% headroom.
/// Non-finite values are ignored; a flat or empty series
/// still gets a non-empty range.
pub fn value_range(series: &[&[f64]]) -> Range<f64> {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if lo > hi {
        return 0.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    (lo - pad)..(hi + pad)
}

/// x range for `epochs` points plotted at 1..=epochs.
pub fn epoch_range(epochs: usize) -> Range<f64> {
    1.0..(epochs.max(2) as f64)
}

pub fn render_history(history: &TrainingHistory, path: &Path) -> Result<()> {
    if history.is_empty() {
        anyhow::bail!("No epochs recorded, nothing to plot");
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("Plot background: {e}"))?;

    let (left, right) = root.split_horizontally(WIDTH / 2);

    draw_panel(&left, &Panel {
        title:  "Model Accuracy",
        metric: "Accuracy",
        train:  history.accuracy(),
        val:    history.val_accuracy(),
    })?;
    draw_panel(&right, &Panel {
        title:  "Model Loss",
        metric: "Loss",
        train:  history.loss(),
        val:    history.val_loss(),
    })?;

    root.present()
        .map_err(|e| anyhow!("Cannot write plot to '{}': {e}", path.display()))?;

    tracing::info!("Training curves saved to '{}'", path.display());
    Ok(())
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel<'_>) -> Result<()> {
    let x_range = epoch_range(panel.train.len());
    let y_range = value_range(&[&panel.train, &panel.val]);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| anyhow!("Plot axes: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc(panel.metric)
        .draw()
        .map_err(|e| anyhow!("Plot mesh: {e}"))?;

    let series = [
        (format!("Train {}", panel.metric.to_lowercase()), &panel.train, BLUE),
        (format!("Validation {}", panel.metric.to_lowercase()), &panel.val, RED),
    ];

    for (label, values, color) in series {
        let points = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| ((i + 1) as f64, *v));

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(|e| anyhow!("Plot series: {e}"))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("Plot legend: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_pads_both_ends() {
        let r = value_range(&[&[0.2, 0.8], &[0.5]]);
        assert!(r.start < 0.2 && r.end > 0.8);
    }

    #[test]
    fn test_value_range_ignores_nan() {
        let r = value_range(&[&[f64::NAN, 1.0, 2.0]]);
        assert!(r.start.is_finite() && r.end.is_finite());
        assert!(r.start < 1.0 && r.end > 2.0);
    }

    #[test]
    fn test_flat_and_empty_series_get_nonempty_range() {
        let flat = value_range(&[&[0.5, 0.5]]);
        assert!(flat.start < flat.end);
        assert_eq!(value_range(&[&[]]), 0.0..1.0);
    }

    #[test]
    fn test_single_epoch_x_range() {
        assert_eq!(epoch_range(1), 1.0..2.0);
        assert_eq!(epoch_range(30), 1.0..30.0);
    }
}
