//! Mini-game recommendations.

use serde::Serialize;

use crate::analysis::Mood;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTier {
    Low,
    Medium,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Game {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub suitable_for: &'static [&'static str],
    pub energy_required: EnergyTier,
}

static GAMES: [Game; 3] = [
    Game {
        id: "breathing",
        name: "Breathing Exercise",
        description: "A guided breathing exercise to help reduce stress and anxiety.",
        suitable_for: &["anxious", "stressed", "sad", "angry"],
        energy_required: EnergyTier::Low,
    },
    Game {
        id: "memory",
        name: "Memory Match",
        description: "A fun memory matching game to help focus your mind on a pleasant task.",
        suitable_for: &["neutral", "sad", "bored", "tired"],
        energy_required: EnergyTier::Medium,
    },
    Game {
        id: "color-relax",
        name: "Color Relaxation",
        description: "A color-based relaxation exercise to calm your mind.",
        suitable_for: &["anxious", "angry", "stressed", "energetic"],
        energy_required: EnergyTier::Low,
    },
];

fn game_ids(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &["memory", "color-relax"],
        Mood::Sad => &["breathing", "memory"],
        Mood::Anxious => &["breathing", "color-relax"],
        Mood::Angry => &["breathing", "color-relax"],
        Mood::Neutral => &["memory", "color-relax"],
        Mood::Tired => &["breathing"],
        Mood::Energetic => &["memory", "color-relax"],
    }
}

/// Picks the games suited to the mood, ordered by how well their energy
/// requirement matches the reported energy level.
///
/// An unrecognized mood gets the breathing and color-relaxation defaults.
/// The sort is stable so catalog order breaks ties.
pub fn games_for(mood: &str, energy_level: i64) -> Vec<Game> {
    let mut games: Vec<Game> = match Mood::parse(mood) {
        Some(mood) => {
            let ids = game_ids(mood);
            GAMES
                .iter()
                .filter(|g| ids.contains(&g.id))
                .cloned()
                .collect()
        }
        None => vec![GAMES[0].clone(), GAMES[2].clone()],
    };

    let preferred = if energy_level < 4 {
        EnergyTier::Low
    } else {
        EnergyTier::Medium
    };
    games.sort_by_key(|g| g.energy_required != preferred);
    games
}
