//! Dialogue context — the personalization fields templates draw from.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Values interpolated into dialogue templates. Empty fields fall back to
/// defaults at interpolation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionContext {
    pub arc_title: String,
    pub boss: String,
    pub final_form: String,
    pub mood: String,
}

/// Meditation scripts draw from the same fields as reflection.
pub type MeditationParams = ReflectionContext;

impl ReflectionContext {
    pub fn from_profile(profile: &Profile, mood: &str) -> Self {
        Self {
            arc_title: profile.arc_title.clone(),
            boss: profile.boss.clone(),
            final_form: profile.final_form.clone(),
            mood: mood.to_string(),
        }
    }

    /// Copy of this context with the mood formatted for display.
    pub(crate) fn with_display_mood(&self) -> Self {
        Self {
            mood: format_mood(&self.mood),
            ..self.clone()
        }
    }
}

/// Capitalize the first character and lower-case the rest; `"present"`
/// when empty.
pub fn format_mood(mood: &str) -> String {
    let mut chars = mood.chars();
    match chars.next() {
        None => "present".to_string(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}

/// Moods offered at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Overwhelmed,
    Calm,
    Drained,
    Motivated,
    Lonely,
    Hopeful,
    Anxious,
    Grateful,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Self::Overwhelmed,
        Self::Calm,
        Self::Drained,
        Self::Motivated,
        Self::Lonely,
        Self::Hopeful,
        Self::Anxious,
        Self::Grateful,
    ];

    /// Identifier passed to the dialogue engine as the mood string.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Overwhelmed => "overwhelmed",
            Self::Calm => "calm",
            Self::Drained => "drained",
            Self::Motivated => "motivated",
            Self::Lonely => "lonely",
            Self::Hopeful => "hopeful",
            Self::Anxious => "anxious",
            Self::Grateful => "grateful",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overwhelmed => "Overwhelmed",
            Self::Calm => "Calm",
            Self::Drained => "Drained",
            Self::Motivated => "Motivated",
            Self::Lonely => "Lonely",
            Self::Hopeful => "Hopeful",
            Self::Anxious => "Anxious",
            Self::Grateful => "Grateful",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Overwhelmed => "😰",
            Self::Calm => "😌",
            Self::Drained => "😔",
            Self::Motivated => "💪",
            Self::Lonely => "🥺",
            Self::Hopeful => "🌟",
            Self::Anxious => "😟",
            Self::Grateful => "🙏",
        }
    }

    /// Look up a mood by id or label, ignoring case and surrounding space.
    pub fn parse(input: &str) -> Option<Mood> {
        let needle = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.id() == needle)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
