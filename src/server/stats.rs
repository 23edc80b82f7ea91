//! In-process analysis counters served by the stats endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::analysis::Mood;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisKind {
    Voice,
    Text,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Text => "text",
        }
    }
}

#[derive(Default)]
pub struct ServiceStats {
    voice_analyses: AtomicU64,
    text_analyses: AtomicU64,
    score_total: AtomicU64,
    // Insertion order decides ties, like the summary aggregation.
    mood_counts: Mutex<Vec<(Mood, u64)>>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StatsSnapshot {
    pub total_analyses: u64,
    pub voice_analyses: u64,
    pub text_analyses: u64,
    pub most_common_mood: String,
    pub average_mood_score: f64,
}

impl ServiceStats {
    pub fn record_analysis(&self, kind: AnalysisKind, mood: Mood, score: u8) {
        match kind {
            AnalysisKind::Voice => self.voice_analyses.fetch_add(1, Ordering::Relaxed),
            AnalysisKind::Text => self.text_analyses.fetch_add(1, Ordering::Relaxed),
        };
        self.score_total.fetch_add(score as u64, Ordering::Relaxed);

        let mut counts = self.mood_counts.lock().unwrap();
        match counts.iter_mut().find(|(m, _)| *m == mood) {
            Some((_, n)) => *n += 1,
            None => counts.push((mood, 1)),
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let voice = self.voice_analyses.load(Ordering::Relaxed);
        let text = self.text_analyses.load(Ordering::Relaxed);
        let total = voice + text;
        let score_total = self.score_total.load(Ordering::Relaxed);

        let most_common_mood = {
            let counts = self.mood_counts.lock().unwrap();
            // First mood to reach the maximum keeps it on ties.
            let mut winner = "neutral";
            let mut best = 0u64;
            for (mood, n) in counts.iter() {
                if *n > best {
                    best = *n;
                    winner = mood.as_str();
                }
            }
            winner.to_string()
        };

        let average_mood_score = if total == 0 {
            0.0
        } else {
            (score_total as f64 / total as f64 * 10.0).round() / 10.0
        };

        StatsSnapshot {
            total_analyses: total,
            voice_analyses: voice,
            text_analyses: text,
            most_common_mood,
            average_mood_score,
        }
    }
}
