use std::path::Path;

use plotters::prelude::*;

use crate::pipeline::trend::AgeTrend;
use crate::report::ReportError;

// 12x5 inches at 300 DPI.
const CHART_SIZE: (u32, u32) = (3600, 1500);

const VELOCITY_BAR: RGBColor = RGBColor(135, 206, 235);

fn chart_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Chart(e.to_string())
}

/// Renders the trend chart: smoothed aging curve as a line, per-age
/// velocity as bars, detected golden times as filled markers on the
/// curve.
pub fn render_turning_points(path: &Path, trend: &AgeTrend) -> Result<(), ReportError> {
    if trend.ages.is_empty() {
        return Err(ReportError::Chart("no ages to plot".to_string()));
    }

    let x_min = *trend.ages.first().unwrap_or(&0) as f64 - 1.0;
    let x_max = *trend.ages.last().unwrap_or(&0) as f64 + 1.0;

    let mut y_min = 0.0f64;
    let mut y_max = 0.0f64;
    for &v in trend.smoothed.iter().chain(trend.velocity.iter()) {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    if (y_max - y_min).abs() < 1e-9 {
        y_min -= 0.5;
        y_max += 0.5;
    }
    let pad = (y_max - y_min) * 0.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Skin aging velocity and golden times by age",
            ("sans-serif", 48),
        )
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(120)
        .build_cartesian_2d(x_min..x_max, (y_min - pad)..(y_max + pad))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("age")
        .y_desc("aging score / velocity")
        .axis_desc_style(("sans-serif", 40))
        .label_style(("sans-serif", 30))
        .draw()
        .map_err(chart_err)?;

    // Velocity is aligned to the second age onward.
    chart
        .draw_series(trend.velocity.iter().enumerate().map(|(i, &v)| {
            let x = trend.ages[i + 1] as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], VELOCITY_BAR.mix(0.7).filled())
        }))
        .map_err(chart_err)?
        .label("aging velocity")
        .legend(|(x, y)| Rectangle::new([(x, y - 8), (x + 20, y + 8)], VELOCITY_BAR.filled()));

    chart
        .draw_series(LineSeries::new(
            trend
                .ages
                .iter()
                .zip(trend.smoothed.iter())
                .map(|(&age, &s)| (age as f64, s)),
            BLACK.stroke_width(4),
        ))
        .map_err(chart_err)?
        .label("aging trend")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(4)));

    chart
        .draw_series(trend.golden_ages.iter().filter_map(|&age| {
            let idx = trend.ages.iter().position(|&a| a == age)?;
            Some(Circle::new(
                (age as f64, trend.smoothed[idx]),
                12,
                RED.filled(),
            ))
        }))
        .map_err(chart_err)?
        .label("golden time")
        .legend(|(x, y)| Circle::new((x + 10, y), 8, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 36))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}
