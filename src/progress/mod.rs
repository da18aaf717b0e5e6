//! Daily progression — the Check-In → Reflect → Zen Quest unlock chain.
//!
//! `state` holds the pure derivation of each step's status; `tracker` owns
//! today's flags; `rollover` resets them when the day ends.

pub mod rollover;
pub mod state;
pub mod tracker;

pub use rollover::spawn_rollover_task;
pub use state::{
    DailyProgress, Episode, RitualStep, StepCard, StepState, StepStatus, derive_status,
};
pub use tracker::DailyProgressTracker;
