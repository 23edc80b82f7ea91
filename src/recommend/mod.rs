//! Content recommendations.
//!
//! A static catalog keyed by mood. Each request gets the first entry from
//! each of the four shelves for the normalized mood.

pub mod games;

use serde::Serialize;

use crate::analysis::{normalize_mood, Mood};

pub use games::{games_for, Game};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Music,
    Video,
    Activity,
    Journal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RecommendationItem {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'static str>,
    pub mood: Mood,
}

struct CatalogEntry {
    title: &'static str,
    description: &'static str,
    link: Option<&'static str>,
}

struct Shelf {
    music: &'static [CatalogEntry],
    video: &'static [CatalogEntry],
    activity: &'static [CatalogEntry],
    journal: &'static [CatalogEntry],
}

const fn entry(
    title: &'static str,
    description: &'static str,
    link: Option<&'static str>,
) -> CatalogEntry {
    CatalogEntry {
        title,
        description,
        link,
    }
}

static HAPPY: Shelf = Shelf {
    music: &[
        entry(
            "Happy Upbeat Playlist",
            "Energetic songs to match your positive mood",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX3rxVfibe1L0"),
        ),
        entry(
            "Feel-Good Classics",
            "Timeless songs that will keep your good mood going",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX9XIFQuFvzM4"),
        ),
    ],
    video: &[
        entry(
            "Funny Animal Compilations",
            "Cute and funny animal videos to keep you smiling",
            Some("https://www.youtube.com/results?search_query=funny+animal+compilation"),
        ),
        entry(
            "Comedy Specials",
            "Laugh out loud with these stand-up comedy shows",
            Some("https://www.youtube.com/results?search_query=best+comedy+specials"),
        ),
    ],
    activity: &[
        entry(
            "Creative Expression",
            "Channel your positive energy into a creative project like painting or crafting",
            None,
        ),
        entry(
            "Social Connection",
            "Share your good mood with friends or family - plan a get-together",
            None,
        ),
    ],
    journal: &[
        entry(
            "Gratitude Reflection",
            "Write down three things you're grateful for today",
            None,
        ),
        entry(
            "Positive Moments",
            "Document what made you happy today so you can revisit these moments later",
            None,
        ),
    ],
};

static SAD: Shelf = Shelf {
    music: &[
        entry(
            "Calm & Comforting Playlist",
            "Soothing music to help process your emotions",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX3Ogo9pFvBkY"),
        ),
        entry(
            "Uplifting Melodies",
            "Gently uplifting songs to improve your mood",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX9tPFwDMOaN1"),
        ),
    ],
    video: &[
        entry(
            "Heartwarming Stories",
            "Videos that restore faith in humanity",
            Some("https://www.youtube.com/results?search_query=heartwarming+stories+that+restore+faith+in+humanity"),
        ),
        entry(
            "Relaxing Nature Documentaries",
            "Immerse yourself in the beauty of nature",
            Some("https://www.youtube.com/results?search_query=beautiful+nature+documentary"),
        ),
    ],
    activity: &[
        entry(
            "Gentle Movement",
            "A short, gentle walk outdoors to get fresh air and shift your perspective",
            None,
        ),
        entry(
            "Self-Care Ritual",
            "Take a warm bath or shower, make some tea, and wrap yourself in a cozy blanket",
            None,
        ),
    ],
    journal: &[
        entry(
            "Emotional Release",
            "Write freely about what you're feeling without judgment",
            None,
        ),
        entry(
            "Self-Compassion Letter",
            "Write to yourself with the same kindness you'd offer a good friend",
            None,
        ),
    ],
};

static ANXIOUS: Shelf = Shelf {
    music: &[
        entry(
            "Calm Meditation Music",
            "Peaceful sounds to help reduce anxiety",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX3Ogo9pFvBkY"),
        ),
        entry(
            "Ambient Soundscapes",
            "Ambient music to help you focus and calm your mind",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX3Ogo9pFvBkY"),
        ),
    ],
    video: &[
        entry(
            "Guided Breathing Exercises",
            "Follow along with these calming breathing techniques",
            Some("https://www.youtube.com/results?search_query=guided+breathing+exercises+for+anxiety"),
        ),
        entry(
            "Gentle Yoga for Anxiety",
            "Simple yoga poses to release tension",
            Some("https://www.youtube.com/results?search_query=gentle+yoga+for+anxiety+relief"),
        ),
    ],
    activity: &[
        entry(
            "5-4-3-2-1 Grounding Exercise",
            "Name 5 things you can see, 4 things you can touch, 3 things you can hear, 2 things you can smell, and 1 thing you can taste",
            None,
        ),
        entry(
            "Progressive Muscle Relaxation",
            "Tense and then release each muscle group in your body to release physical tension",
            None,
        ),
    ],
    journal: &[
        entry(
            "Worry Dump",
            "Write down all your worries to get them out of your head",
            None,
        ),
        entry(
            "Evidence Challenging",
            "List your anxious thoughts and then write evidence for and against them",
            None,
        ),
    ],
};

static ANGRY: Shelf = Shelf {
    music: &[
        entry(
            "Calming Classical",
            "Soothing classical pieces to help you cool down",
            Some("https://open.spotify.com/playlist/37i9dQZF1DWWEJlAGA9gs0"),
        ),
        entry(
            "Release Playlist",
            "Music to help process and release anger",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX3YSRoSdA634"),
        ),
    ],
    video: &[
        entry(
            "Guided Anger Meditation",
            "Meditation specifically designed to help with anger",
            Some("https://www.youtube.com/results?search_query=guided+meditation+for+anger"),
        ),
        entry(
            "Nature Time-lapses",
            "Beautiful, slow-moving nature videos to shift your focus",
            Some("https://www.youtube.com/results?search_query=beautiful+nature+time+lapse"),
        ),
    ],
    activity: &[
        entry(
            "Physical Release",
            "Go for a run, hit a pillow, or do jumping jacks to release the physical energy of anger",
            None,
        ),
        entry(
            "Cool Down Strategy",
            "Place a cool washcloth on your face or neck, or hold an ice cube - the cold sensation can help reset your nervous system",
            None,
        ),
    ],
    journal: &[
        entry(
            "Anger Letter (Don't Send)",
            "Write an uncensored letter expressing your feelings, but don't send it",
            None,
        ),
        entry(
            "Needs Identification",
            "What need isn't being met? Write about what you really need in this situation",
            None,
        ),
    ],
};

static NEUTRAL: Shelf = Shelf {
    music: &[
        entry(
            "Discover Weekly",
            "Explore new music tailored to your taste",
            Some("https://open.spotify.com/playlist/37i9dQZEVXcQ9Aow7qH0GW"),
        ),
        entry(
            "Focus Playlist",
            "Background music to help you focus on tasks",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6"),
        ),
    ],
    video: &[
        entry(
            "Fascinating Documentaries",
            "Learn something new and interesting",
            Some("https://www.youtube.com/results?search_query=best+short+documentaries"),
        ),
        entry(
            "TED Talks",
            "Inspiring talks on various topics",
            Some("https://www.youtube.com/c/TED/videos"),
        ),
    ],
    activity: &[
        entry(
            "Skill Building",
            "Use this neutral state to learn something new or practice a skill",
            None,
        ),
        entry(
            "Mindful Activity",
            "Do a routine activity (like washing dishes) but with complete focus and attention to the sensory experience",
            None,
        ),
    ],
    journal: &[
        entry(
            "Goal Setting",
            "Use this balanced state to think about your goals and what steps you can take toward them",
            None,
        ),
        entry(
            "Reflection Questions",
            "What's been on your mind lately? What are you looking forward to?",
            None,
        ),
    ],
};

static TIRED: Shelf = Shelf {
    music: &[
        entry(
            "Gentle Wake-Up Playlist",
            "Soft, gradually energizing music",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX1n9whBbBKoL"),
        ),
        entry(
            "Low-Fi Beats",
            "Relaxing background music that won't overstimulate",
            Some("https://open.spotify.com/playlist/37i9dQZF1DWWQRwui0ExPn"),
        ),
    ],
    video: &[
        entry(
            "Gentle Morning Yoga",
            "Easy stretches to wake up your body",
            Some("https://www.youtube.com/results?search_query=gentle+morning+yoga"),
        ),
        entry(
            "Motivational Short Videos",
            "Brief inspiration to get you going",
            Some("https://www.youtube.com/results?search_query=short+motivational+videos"),
        ),
    ],
    activity: &[
        entry(
            "Nature Reset",
            "Spend 10 minutes outside in natural light to help reset your circadian rhythm",
            None,
        ),
        entry(
            "Micro-Exercise",
            "Do just 5 minutes of movement - often that's enough to boost your energy",
            None,
        ),
    ],
    journal: &[
        entry(
            "Energy Audit",
            "What's draining your energy lately? What gives you energy?",
            None,
        ),
        entry(
            "Rest Reflection",
            "Are you getting enough quality rest? What could help improve your sleep?",
            None,
        ),
    ],
};

static ENERGETIC: Shelf = Shelf {
    music: &[
        entry(
            "Workout Beats",
            "High-energy music for maximum motivation",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX76Wlfdnj7AP"),
        ),
        entry(
            "Dance Party Mix",
            "Upbeat songs to match your energy",
            Some("https://open.spotify.com/playlist/37i9dQZF1DX0BcQWzuB7ZO"),
        ),
    ],
    video: &[
        entry(
            "Dance Workouts",
            "Fun dance routines to channel your energy",
            Some("https://www.youtube.com/results?search_query=fun+dance+workout"),
        ),
        entry(
            "DIY Project Tutorials",
            "Productive ways to use your high energy",
            Some("https://www.youtube.com/results?search_query=quick+DIY+projects"),
        ),
    ],
    activity: &[
        entry(
            "Creative Project",
            "Start that project you've been thinking about - your energy will help you make progress",
            None,
        ),
        entry(
            "High Intensity Exercise",
            "Channel your energy into a workout that will leave you feeling accomplished",
            None,
        ),
    ],
    journal: &[
        entry(
            "Inspiration Capture",
            "Write down all the ideas coming to you while your energy is high",
            None,
        ),
        entry(
            "Achievement Planning",
            "What could you accomplish today with this energy? Make an action plan",
            None,
        ),
    ],
};

fn shelf(mood: Mood) -> &'static Shelf {
    match mood {
        Mood::Happy => &HAPPY,
        Mood::Sad => &SAD,
        Mood::Anxious => &ANXIOUS,
        Mood::Angry => &ANGRY,
        Mood::Neutral => &NEUTRAL,
        Mood::Tired => &TIRED,
        Mood::Energetic => &ENERGETIC,
    }
}

/// Picks one item from each shelf for the given mood.
///
/// `mood` may be any free-form label; it is normalized first. The detected
/// emotions are accepted for API compatibility but do not influence the
/// selection.
pub fn recommendations_for(
    mood: &str,
    energy_level: i64,
    _detected_emotions: &[String],
) -> Vec<RecommendationItem> {
    let mood = normalize_mood(mood, energy_level);
    let shelf = shelf(mood);

    let mut items = Vec::with_capacity(4);
    let picks = [
        (RecommendationKind::Music, shelf.music),
        (RecommendationKind::Video, shelf.video),
        (RecommendationKind::Activity, shelf.activity),
        (RecommendationKind::Journal, shelf.journal),
    ];
    for (kind, entries) in picks {
        if let Some(entry) = entries.first() {
            items.push(RecommendationItem {
                kind,
                title: entry.title,
                description: entry.description,
                link: entry.link,
                mood,
            });
        }
    }
    items
}
