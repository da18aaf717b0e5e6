//! Onboarding flow — walks a new user through naming their arc, boss and
//! final form, writing each answer into the profile store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::BossOption;
use super::store::ProfileStore;
use crate::error::OnboardingError;

/// The phases of onboarding.
///
/// Progresses linearly: Welcome → MeetEva → ArcTitle → Boss → FinalForm →
/// Summary → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingPhase {
    Welcome,
    MeetEva,
    ArcTitle,
    Boss,
    FinalForm,
    Summary,
    Complete,
}

impl OnboardingPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: OnboardingPhase) -> bool {
        self.next() == Some(target)
    }

    /// Whether this phase is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether the phase collects a profile field.
    pub fn needs_input(&self) -> bool {
        matches!(self, Self::ArcTitle | Self::Boss | Self::FinalForm)
    }

    /// Get the next phase in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingPhase> {
        use OnboardingPhase::*;
        match self {
            Welcome => Some(MeetEva),
            MeetEva => Some(ArcTitle),
            ArcTitle => Some(Boss),
            Boss => Some(FinalForm),
            FinalForm => Some(Summary),
            Summary => Some(Complete),
            Complete => None,
        }
    }

    /// Prompt shown to the user for this phase.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Welcome => "Every day is an episode. Let's begin yours.",
            Self::MeetEva => "I'm Eva. I'll walk beside you through each episode.",
            Self::ArcTitle => {
                "If your life right now was an anime arc, what would it be called?"
            }
            Self::Boss => "What are you battling most right now?",
            Self::FinalForm => "Describe the version of you you're growing into.",
            Self::Summary => "Here's your story so far.",
            Self::Complete => "",
        }
    }
}

impl std::fmt::Display for OnboardingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::MeetEva => "meet_eva",
            Self::ArcTitle => "arc_title",
            Self::Boss => "boss",
            Self::FinalForm => "final_form",
            Self::Summary => "summary",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Drives onboarding against a profile store.
pub struct OnboardingFlow {
    store: Arc<ProfileStore>,
    phase: OnboardingPhase,
}

impl OnboardingFlow {
    /// Start the flow. A profile that already finished onboarding starts
    /// at `Complete`.
    pub fn new(store: Arc<ProfileStore>) -> Self {
        let phase = if store.is_complete() {
            OnboardingPhase::Complete
        } else {
            OnboardingPhase::Welcome
        };
        Self { store, phase }
    }

    pub fn phase(&self) -> OnboardingPhase {
        self.phase
    }

    /// Advance past a phase that collects no input.
    ///
    /// Advancing from `Summary` completes onboarding on the profile.
    pub fn advance(&mut self) -> Result<OnboardingPhase, OnboardingError> {
        if self.phase.needs_input() {
            return Err(OnboardingError::InputRequired { phase: self.phase });
        }
        if self.phase == OnboardingPhase::Summary {
            self.store.complete_onboarding();
        }
        self.step()
    }

    /// Submit the arc title. Blank titles are refused.
    pub fn submit_arc_title(&mut self, title: &str) -> Result<OnboardingPhase, OnboardingError> {
        self.expect(OnboardingPhase::ArcTitle)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(OnboardingError::EmptyInput { field: "arc title" });
        }
        self.store.set_arc_title(title);
        self.step()
    }

    /// Submit the boss. `custom` is only read for [`BossOption::Other`].
    pub fn submit_boss(
        &mut self,
        option: BossOption,
        custom: &str,
    ) -> Result<OnboardingPhase, OnboardingError> {
        self.expect(OnboardingPhase::Boss)?;
        let boss = option
            .resolve(custom)
            .ok_or(OnboardingError::EmptyInput { field: "boss" })?;
        self.store.set_boss(boss);
        self.step()
    }

    /// Submit the final form. Any text is accepted, including blank.
    pub fn submit_final_form(&mut self, form: &str) -> Result<OnboardingPhase, OnboardingError> {
        self.expect(OnboardingPhase::FinalForm)?;
        self.store.set_final_form(form.trim());
        self.step()
    }

    fn expect(&self, expected: OnboardingPhase) -> Result<(), OnboardingError> {
        if self.phase.is_terminal() {
            return Err(OnboardingError::AlreadyComplete);
        }
        if self.phase != expected {
            return Err(OnboardingError::WrongPhase {
                expected,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn step(&mut self) -> Result<OnboardingPhase, OnboardingError> {
        let next = self.phase.next().ok_or(OnboardingError::AlreadyComplete)?;
        info!(from = %self.phase, to = %next, "Onboarding phase advanced");
        self.phase = next;
        Ok(next)
    }
}
