//! PDF mood reports.
//!
//! Lays out a single A4 page: title, report period, summary statistics, the
//! trend chart and a band-dependent recommendation block. Rendering is CPU
//! bound and should run under `spawn_blocking` from async contexts.

mod chart;

pub use chart::render_chart;

use printpdf::image_crate::{DynamicImage, RgbImage};
use printpdf::{BuiltinFont, ImageTransform, Mm, PdfDocument};

use crate::summary::{CheckIn, CheckInStats, ScoreBand, SummaryError};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("pdf assembly failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// A rendered report, held in memory until the response is written.
#[derive(Clone, Debug)]
pub struct MoodReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

pub fn render_report(check_ins: &[CheckIn], user_id: &str) -> Result<MoodReport, ReportError> {
    let stats = CheckInStats::compute(check_ins)?;
    let pixels = chart::render_chart(check_ins)?;

    let first_date = check_ins
        .iter()
        .map(|c| c.created_at.date_naive())
        .min()
        .ok_or(SummaryError::NoCheckIns)?;
    let last_date = check_ins
        .iter()
        .map(|c| c.created_at.date_naive())
        .max()
        .ok_or(SummaryError::NoCheckIns)?;

    let (doc, page, layer) = PdfDocument::new(
        "Mood Summary Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    // Coordinates are in mm from the bottom-left corner.
    layer.use_text("Mood Summary Report", 16.0, Mm(70.0), Mm(280.0), &font_bold);
    layer.use_text(
        format!(
            "Report period: {} to {}",
            first_date.format("%Y-%m-%d"),
            last_date.format("%Y-%m-%d")
        ),
        12.0,
        Mm(10.0),
        Mm(268.0),
        &font,
    );

    layer.use_text("Summary Statistics:", 14.0, Mm(10.0), Mm(256.0), &font_bold);
    layer.use_text(
        format!("Average Mood Score: {:.1}/10", stats.avg_score),
        12.0,
        Mm(10.0),
        Mm(248.0),
        &font,
    );
    layer.use_text(
        format!("Average Energy Level: {:.1}/10", stats.avg_energy),
        12.0,
        Mm(10.0),
        Mm(241.0),
        &font,
    );
    layer.use_text(
        format!("Most Common Mood: {}", stats.most_common_mood),
        12.0,
        Mm(10.0),
        Mm(234.0),
        &font,
    );

    layer.use_text(
        "Mood and Energy Trends:",
        14.0,
        Mm(10.0),
        Mm(224.0),
        &font_bold,
    );

    let image = RgbImage::from_raw(chart::CHART_WIDTH, chart::CHART_HEIGHT, pixels)
        .ok_or_else(|| ReportError::Pdf("chart buffer size mismatch".to_string()))?;
    let image = printpdf::Image::from_dynamic_image(&DynamicImage::ImageRgb8(image));
    // 120 dpi scales 900x540 px to roughly 190x114 mm.
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(10.0)),
            translate_y: Some(Mm(105.0)),
            dpi: Some(120.0),
            ..Default::default()
        },
    );

    layer.use_text("Recommendations:", 14.0, Mm(10.0), Mm(92.0), &font_bold);
    let bullets: [&str; 3] = match ScoreBand::for_score(stats.avg_score) {
        ScoreBand::Low => [
            "- Consider speaking with a mental health professional",
            "- Prioritize self-care and rest",
            "- Try daily mood-boosting activities",
        ],
        ScoreBand::Moderate => [
            "- Maintain healthy habits",
            "- Incorporate mindfulness practices",
            "- Stay connected with supportive people",
        ],
        ScoreBand::High => [
            "- Great job maintaining positive mental health",
            "- Continue your current wellness practices",
            "- Share your strategies with others who might benefit",
        ],
    };
    for (i, bullet) in bullets.iter().enumerate() {
        layer.use_text(*bullet, 12.0, Mm(10.0), Mm(84.0 - 7.0 * i as f32), &font);
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    Ok(MoodReport {
        filename: format!("mood_summary_{user_id}.pdf"),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn check_in(day: u32, mood: &str, score: f64, energy: f64) -> CheckIn {
        CheckIn {
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            mood: mood.to_string(),
            mood_score: score,
            energy_level: energy,
        }
    }

    #[test]
    fn report_is_a_pdf_with_the_user_in_the_filename() {
        let check_ins = vec![
            check_in(1, "happy", 8.0, 6.0),
            check_in(2, "neutral", 5.0, 5.0),
            check_in(3, "happy", 7.0, 6.0),
        ];
        let report = render_report(&check_ins, "user-123").unwrap();
        assert_eq!(report.filename, "mood_summary_user-123.pdf");
        assert!(report.bytes.starts_with(b"%PDF"));
        assert!(report.bytes.len() > 1000);
    }

    #[test]
    fn single_check_in_renders() {
        let report = render_report(&[check_in(10, "sad", 2.0, 3.0)], "u").unwrap();
        assert!(report.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(
            render_report(&[], "u"),
            Err(ReportError::Summary(SummaryError::NoCheckIns))
        ));
    }
}
