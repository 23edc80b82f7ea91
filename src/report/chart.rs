//! Mood and energy trend chart.
//!
//! Renders the two stacked time-series panels into an RGB pixel buffer. The
//! chart is drawn without any text so the rasterizer needs no font support;
//! the PDF layer provides the captions.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;

use super::ReportError;
use crate::summary::CheckIn;

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 540;

const MOOD_COLOR: RGBColor = RGBColor(0x4B, 0x9C, 0xD3);
const ENERGY_COLOR: RGBColor = RGBColor(0xF2, 0x65, 0x22);

/// Renders the chart and returns raw RGB pixels, `CHART_WIDTH * CHART_HEIGHT * 3`
/// bytes, row-major.
pub fn render_chart(check_ins: &[CheckIn]) -> Result<Vec<u8>, ReportError> {
    let mood_points: Vec<(NaiveDate, f64)> = check_ins
        .iter()
        .map(|c| (c.created_at.date_naive(), c.mood_score))
        .collect();
    let energy_points: Vec<(NaiveDate, f64)> = check_ins
        .iter()
        .map(|c| (c.created_at.date_naive(), c.energy_level))
        .collect();

    let mut min_date = mood_points
        .iter()
        .map(|(d, _)| *d)
        .min()
        .ok_or_else(|| ReportError::Chart("no data points".to_string()))?;
    let mut max_date = mood_points
        .iter()
        .map(|(d, _)| *d)
        .max()
        .ok_or_else(|| ReportError::Chart("no data points".to_string()))?;
    if min_date == max_date {
        // A zero-width x range cannot be plotted.
        min_date -= Duration::days(1);
        max_date += Duration::days(1);
    }

    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ReportError::Chart(e.to_string()))?;

        let panels = root.split_evenly((2, 1));
        draw_panel(&panels[0], min_date, max_date, &mood_points, MOOD_COLOR)?;
        draw_panel(&panels[1], min_date, max_date, &energy_points, ENERGY_COLOR)?;

        root.present()
            .map_err(|e| ReportError::Chart(e.to_string()))?;
    }
    Ok(buf)
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    min_date: NaiveDate,
    max_date: NaiveDate,
    points: &[(NaiveDate, f64)],
    color: RGBColor,
) -> Result<(), ReportError> {
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .build_cartesian_2d(min_date..max_date, 0f64..10f64)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .draw()
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &color))
        .map_err(|e| ReportError::Chart(e.to_string()))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|(d, v)| Circle::new((*d, *v), 4, color.filled())),
        )
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn check_in(day: u32, score: f64, energy: f64) -> CheckIn {
        CheckIn {
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            mood: "neutral".to_string(),
            mood_score: score,
            energy_level: energy,
        }
    }

    #[test]
    fn chart_buffer_has_expected_size() {
        let check_ins = vec![check_in(1, 3.0, 4.0), check_in(2, 6.0, 5.0), check_in(3, 8.0, 7.0)];
        let buf = render_chart(&check_ins).unwrap();
        assert_eq!(buf.len(), (CHART_WIDTH * CHART_HEIGHT * 3) as usize);
    }

    #[test]
    fn chart_contains_series_colors() {
        let check_ins = vec![check_in(1, 3.0, 4.0), check_in(2, 6.0, 5.0), check_in(3, 8.0, 7.0)];
        let buf = render_chart(&check_ins).unwrap();
        let has_pixel = |r: u8, g: u8, b: u8| {
            buf.chunks_exact(3)
                .any(|p| p[0] == r && p[1] == g && p[2] == b)
        };
        assert!(has_pixel(0x4B, 0x9C, 0xD3));
        assert!(has_pixel(0xF2, 0x65, 0x22));
        assert!(has_pixel(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn single_check_in_still_renders() {
        let buf = render_chart(&[check_in(5, 5.0, 5.0)]).unwrap();
        assert_eq!(buf.len(), (CHART_WIDTH * CHART_HEIGHT * 3) as usize);
    }

    #[test]
    fn empty_batch_is_an_error() {
        assert!(render_chart(&[]).is_err());
    }
}
