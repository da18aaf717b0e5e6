//! Profile store — the single in-process copy of the user's profile.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::model::Profile;
use crate::dialogue::ReflectionContext;

/// Holds the profile behind one lock; `read()` hands out snapshots.
pub struct ProfileStore {
    profile: RwLock<Profile>,
}

impl ProfileStore {
    /// Create a store with an empty, incomplete profile.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            profile: RwLock::new(Profile::default()),
        })
    }

    /// Current profile, by value.
    pub fn read(&self) -> Profile {
        self.profile.read().clone()
    }

    pub fn is_complete(&self) -> bool {
        self.profile.read().is_complete
    }

    /// Replace the arc title verbatim.
    pub fn set_arc_title(&self, title: impl Into<String>) {
        let title = title.into();
        debug!(len = title.chars().count(), "Arc title set");
        self.profile.write().arc_title = title;
    }

    /// Replace the boss verbatim.
    pub fn set_boss(&self, boss: impl Into<String>) {
        let boss = boss.into();
        debug!(boss = %boss, "Boss set");
        self.profile.write().boss = boss;
    }

    /// Replace the final form verbatim.
    pub fn set_final_form(&self, form: impl Into<String>) {
        let form = form.into();
        debug!(len = form.chars().count(), "Final form set");
        self.profile.write().final_form = form;
    }

    /// Mark onboarding complete. Later calls change nothing.
    pub fn complete_onboarding(&self) {
        let mut profile = self.profile.write();
        if profile.is_complete {
            return;
        }
        profile.is_complete = true;
        profile.completed_at = Some(chrono::Utc::now());
        info!("Onboarding completed");
    }

    /// Dialogue context for today, built from the current profile.
    pub fn reflection_context(&self, mood: &str) -> ReflectionContext {
        ReflectionContext::from_profile(&self.read(), mood)
    }
}
