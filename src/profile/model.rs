//! Profile and onboarding choice models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user's long-lived narrative identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Label for the user's current life chapter.
    pub arc_title: String,
    /// Label for the user's primary current struggle.
    pub boss: String,
    /// Description of the aspirational self.
    pub final_form: String,
    /// Set once, when onboarding finishes. Never cleared.
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// One-line summary for logs and the summary screen.
    pub fn summary(&self) -> String {
        format!(
            "Arc: {} | Boss: {} | Final Form: {}",
            or_placeholder(&self.arc_title, "Your Journey"),
            or_placeholder(&self.boss, "Unknown"),
            or_placeholder(&self.final_form, "your true self"),
        )
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Preset bosses offered during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossOption {
    Stress,
    Motivation,
    Sleep,
    Confidence,
    Loneliness,
    Overthinking,
    /// Free text supplied by the user.
    Other,
}

impl BossOption {
    pub const ALL: [BossOption; 7] = [
        Self::Stress,
        Self::Motivation,
        Self::Sleep,
        Self::Confidence,
        Self::Loneliness,
        Self::Overthinking,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stress => "Stress",
            Self::Motivation => "Motivation",
            Self::Sleep => "Sleep",
            Self::Confidence => "Confidence",
            Self::Loneliness => "Loneliness",
            Self::Overthinking => "Overthinking",
            Self::Other => "Other",
        }
    }

    /// Resolve the boss value stored in the profile.
    ///
    /// Presets store their label; `Other` stores the trimmed custom text,
    /// or `None` when that text is blank.
    pub fn resolve(&self, custom: &str) -> Option<String> {
        match self {
            Self::Other => {
                let trimmed = custom.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            preset => Some(preset.label().to_string()),
        }
    }
}

impl std::fmt::Display for BossOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
