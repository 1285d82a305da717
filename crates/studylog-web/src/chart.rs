//! PNG chart rendering for the productivity series.

use chrono::{Duration, NaiveDateTime};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render the (timestamp, productivity) series as a PNG line chart: time
/// ascending left-to-right on the x-axis, score in [0, 1] on the y-axis.
///
/// An empty series renders an empty chart over a default one-day window
/// rather than failing.
pub fn render_series_png(
    series: &[(NaiveDateTime, f64)],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ChartError> {
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (x_start, x_end) = time_bounds(series);
        let mut chart = ChartBuilder::on(&root)
            .caption("Productivity Over Time", ("sans-serif", 28))
            .margin(12)
            .x_label_area_size(44)
            .y_label_area_size(52)
            .build_cartesian_2d(RangedDateTime::from(x_start..x_end), 0f64..1.05f64)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|ts| ts.format("%m-%d %H:%M").to_string())
            .x_desc("Date and Time")
            .y_desc("Productivity")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
            .map_err(draw_err)?;
        chart
            .draw_series(
                series
                    .iter()
                    .map(|(ts, score)| Circle::new((*ts, *score), 3, BLUE.filled())),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&raw, width, height, ExtendedColorType::Rgb8)?;
    Ok(png)
}

fn draw_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// X-axis bounds: the series extent padded by an hour, or a one-day window
/// around now for an empty series.
fn time_bounds(series: &[(NaiveDateTime, f64)]) -> (NaiveDateTime, NaiveDateTime) {
    match (series.first(), series.last()) {
        (Some((first, _)), Some((last, _))) => {
            let pad = Duration::hours(1);
            (*first - pad, *last + pad)
        }
        _ => {
            let now = chrono::Local::now().naive_local();
            (now - Duration::hours(12), now + Duration::hours(12))
        }
    }
}
