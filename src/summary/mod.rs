//! Weekly check-in summaries.
//!
//! Aggregates a batch of check-ins into averages, the dominant mood and a
//! first-to-last trend, then renders the fixed insight and recommendation
//! templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One mood check-in as stored by the backend.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CheckIn {
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub mood: String,
    #[serde(rename = "moodScore")]
    pub mood_score: f64,
    #[serde(rename = "energyLevel")]
    pub energy_level: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("No check-in data provided")]
    NoCheckIns,
}

/// Mood trend over the batch, judged from first and last scores only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Declined,
    Stable,
}

/// Score bands shared by the summary and the report recommendations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Moderate,
    High,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score < 4.0 {
            Self::Low
        } else if score < 7.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// Aggregate statistics over a batch of check-ins.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckInStats {
    pub avg_score: f64,
    pub avg_energy: f64,
    pub most_common_mood: String,
    pub first_score: f64,
    pub last_score: f64,
    pub count: usize,
}

impl CheckInStats {
    pub fn compute(check_ins: &[CheckIn]) -> Result<Self, SummaryError> {
        if check_ins.is_empty() {
            return Err(SummaryError::NoCheckIns);
        }

        let count = check_ins.len();
        let avg_score = check_ins.iter().map(|c| c.mood_score).sum::<f64>() / count as f64;
        let avg_energy = check_ins.iter().map(|c| c.energy_level).sum::<f64>() / count as f64;

        // Ties break toward the first mood seen.
        let mut mood_counts: Vec<(&str, usize)> = Vec::new();
        for check_in in check_ins {
            if check_in.mood.is_empty() {
                continue;
            }
            match mood_counts.iter_mut().find(|(m, _)| *m == check_in.mood) {
                Some((_, n)) => *n += 1,
                None => mood_counts.push((&check_in.mood, 1)),
            }
        }
        // Only a strictly greater count displaces the current winner, so the
        // first mood to reach the maximum keeps it.
        let mut most_common_mood = "neutral".to_string();
        let mut best = 0usize;
        for (mood, n) in &mood_counts {
            if *n > best {
                best = *n;
                most_common_mood = mood.to_string();
            }
        }

        Ok(Self {
            avg_score,
            avg_energy,
            most_common_mood,
            first_score: check_ins[0].mood_score,
            last_score: check_ins[count - 1].mood_score,
            count,
        })
    }

    /// Trend is only reported once there are at least three data points.
    pub fn trend(&self) -> Option<Trend> {
        if self.count < 3 {
            return None;
        }
        Some(if self.last_score > self.first_score {
            Trend::Improving
        } else if self.last_score < self.first_score {
            Trend::Declined
        } else {
            Trend::Stable
        })
    }
}

/// The rendered weekly summary.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WeeklySummary {
    pub insights: String,
    pub recommendations: String,
}

pub fn generate_summary(check_ins: &[CheckIn]) -> Result<WeeklySummary, SummaryError> {
    let stats = CheckInStats::compute(check_ins)?;

    let mut insights = format!(
        "This week, your average mood score was {:.1}/10 and your average energy level was {:.1}/10. ",
        stats.avg_score, stats.avg_energy
    );
    insights.push_str(&format!(
        "You most frequently reported feeling {}. ",
        stats.most_common_mood
    ));
    match stats.trend() {
        Some(Trend::Improving) => {
            insights.push_str("Your mood has been improving over the week. ");
        }
        Some(Trend::Declined) => {
            insights.push_str("Your mood has slightly declined over the week. ");
        }
        Some(Trend::Stable) => {
            insights.push_str("Your mood has remained relatively stable. ");
        }
        None => {}
    }

    let mut recommendations =
        String::from("Based on your mood patterns this week, consider the following:\n\n");
    match ScoreBand::for_score(stats.avg_score) {
        ScoreBand::Low => {
            recommendations.push_str("• Your mood has been on the lower side. Consider scheduling time with a trusted friend or mental health professional.\n");
            recommendations.push_str("• Set aside time each day for self-care activities that have helped you feel better in the past.\n");
            recommendations.push_str("• Ensure you're getting adequate sleep, nutrition, and some light physical activity.\n");
        }
        ScoreBand::Moderate => {
            recommendations.push_str("• Your mood has been moderate. Pay attention to what activities boost your mood and try to incorporate more of them.\n");
            recommendations.push_str("• Practice mindfulness or meditation to help maintain emotional balance.\n");
            recommendations.push_str("• Consider setting small, achievable goals to build momentum and confidence.\n");
        }
        ScoreBand::High => {
            recommendations.push_str("• Your mood has been positive! Reflect on what's working well and continue these practices.\n");
            recommendations.push_str("• Share your positive energy with others through acts of kindness or connection.\n");
            recommendations.push_str("• Document what's going well to reference during more challenging times.\n");
        }
    }
    if stats.avg_energy < 4.0 {
        recommendations.push_str("• Your energy has been low. Check your sleep quality and quantity.\n");
        recommendations.push_str("• Consider gentle exercise like walking or stretching to naturally boost energy.\n");
    } else if stats.avg_energy > 7.0 {
        recommendations.push_str("• You've had high energy. Channel this productively into activities that matter to you.\n");
        recommendations.push_str("• Ensure you're also building in adequate rest periods to sustain your energy.\n");
    }

    Ok(WeeklySummary {
        insights,
        recommendations,
    })
}
