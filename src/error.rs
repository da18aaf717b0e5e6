//! Error types for the daily ritual core.

use crate::profile::OnboardingPhase;
use crate::progress::RitualStep;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid rollover schedule {schedule:?}: {reason}")]
    InvalidSchedule { schedule: String, reason: String },
}

/// Store access outside the scope that owns the stores.
///
/// This is a programmer error: the view layer asked for a store before
/// `AppScope::init` or after `AppScope::teardown`.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("{store} used outside its initialization scope")]
    OutsideScope { store: &'static str },
}

/// Daily progress errors.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("{step} is locked until {prerequisite} is completed")]
    StepLocked {
        step: RitualStep,
        prerequisite: RitualStep,
    },
}

/// Onboarding flow errors.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("{field} must not be empty")]
    EmptyInput { field: &'static str },

    #[error("Onboarding is already complete")]
    AlreadyComplete,

    #[error("Expected onboarding phase {expected}, but the flow is at {phase}")]
    WrongPhase {
        expected: OnboardingPhase,
        phase: OnboardingPhase,
    },

    #[error("Phase {phase} needs input before it can advance")]
    InputRequired { phase: OnboardingPhase },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
