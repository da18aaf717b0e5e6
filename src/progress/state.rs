//! Ritual step state machine — which steps of today's episode are open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three steps of a daily episode.
///
/// Unlocks linearly: CheckIn → Reflect → ZenQuest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RitualStep {
    CheckIn,
    Reflect,
    ZenQuest,
}

impl RitualStep {
    /// All steps in unlock order.
    pub const ALL: [RitualStep; 3] = [Self::CheckIn, Self::Reflect, Self::ZenQuest];

    /// The step that must be completed before this one unlocks.
    pub fn prerequisite(&self) -> Option<RitualStep> {
        match self {
            Self::CheckIn => None,
            Self::Reflect => Some(Self::CheckIn),
            Self::ZenQuest => Some(Self::Reflect),
        }
    }

    /// Card title shown on the home screen.
    pub fn title(&self) -> &'static str {
        match self {
            Self::CheckIn => "Check-In",
            Self::Reflect => "Reflect With Eva",
            Self::ZenQuest => "Zen Quest",
        }
    }

    /// Card description shown on the home screen.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CheckIn => "Acknowledge the start of today's episode.",
            Self::Reflect => "Talk to Eva about what's happening internally.",
            Self::ZenQuest => "Your daily meditation quest to strengthen your Final Form.",
        }
    }
}

impl std::fmt::Display for RitualStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CheckIn => "check_in",
            Self::Reflect => "reflect",
            Self::ZenQuest => "zen_quest",
        };
        write!(f, "{s}")
    }
}

/// Status of a single ritual step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Locked,
    Active,
    Completed,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locked => write!(f, "locked"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Today's completion flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub has_checked_in: bool,
    pub has_reflected: bool,
    pub has_completed_zen_quest: bool,
}

impl DailyProgress {
    /// Whether `step` has been marked complete.
    pub fn is_done(&self, step: RitualStep) -> bool {
        match step {
            RitualStep::CheckIn => self.has_checked_in,
            RitualStep::Reflect => self.has_reflected,
            RitualStep::ZenQuest => self.has_completed_zen_quest,
        }
    }

    /// Whether every step of the episode is complete.
    pub fn is_finished(&self) -> bool {
        RitualStep::ALL.iter().all(|step| self.is_done(*step))
    }
}

/// Derived state for one step: what the view layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub status: StepStatus,
    /// The view must refuse to open a disabled step.
    pub disabled: bool,
}

/// Derive the status of `step` from today's progress.
pub fn derive_status(step: RitualStep, progress: &DailyProgress) -> StepState {
    let unlocked = match step.prerequisite() {
        Some(prereq) => progress.is_done(prereq),
        None => true,
    };

    let status = if !unlocked {
        StepStatus::Locked
    } else if progress.is_done(step) {
        StepStatus::Completed
    } else {
        StepStatus::Active
    };

    StepState {
        status,
        disabled: !unlocked,
    }
}

/// A home-screen card for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCard {
    pub step: RitualStep,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub state: StepState,
}

impl StepCard {
    pub fn new(step: RitualStep, progress: &DailyProgress) -> Self {
        Self {
            step,
            title: step.title(),
            description: step.description(),
            state: derive_status(step, progress),
        }
    }
}

/// One day's cycle through the ritual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Fresh for every reset.
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub progress: DailyProgress,
}

impl Episode {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            progress: DailyProgress::default(),
        }
    }

    /// Cards for all three steps, in unlock order.
    pub fn cards(&self) -> Vec<StepCard> {
        RitualStep::ALL
            .iter()
            .map(|step| StepCard::new(*step, &self.progress))
            .collect()
    }
}

impl Default for Episode {
    fn default() -> Self {
        Self::new()
    }
}
