//! Profile — the user's arc, boss and final form, and the onboarding flow
//! that fills them in.

pub mod model;
pub mod onboarding;
pub mod store;

pub use model::{BossOption, Profile};
pub use onboarding::{OnboardingFlow, OnboardingPhase};
pub use store::ProfileStore;
