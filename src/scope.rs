//! App scope — the single construction and teardown point for the stores.
//!
//! View code asks the scope for a store handle. Asking before `init` or
//! after `teardown` is an integration bug and surfaces as
//! [`ScopeError::OutsideScope`] instead of handing back default data.

use std::sync::Arc;

use tracing::info;

use crate::error::ScopeError;
use crate::profile::ProfileStore;
use crate::progress::DailyProgressTracker;

#[derive(Default)]
pub struct AppScope {
    profile: Option<Arc<ProfileStore>>,
    progress: Option<Arc<DailyProgressTracker>>,
}

impl AppScope {
    /// Create both stores with their initial state.
    pub fn init() -> Self {
        let scope = Self {
            profile: Some(ProfileStore::new()),
            progress: Some(DailyProgressTracker::new()),
        };
        info!("App scope initialized");
        scope
    }

    /// A scope that owns no stores yet.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.profile.is_some() && self.progress.is_some()
    }

    pub fn profile(&self) -> Result<Arc<ProfileStore>, ScopeError> {
        self.profile.clone().ok_or(ScopeError::OutsideScope {
            store: "ProfileStore",
        })
    }

    pub fn progress(&self) -> Result<Arc<DailyProgressTracker>, ScopeError> {
        self.progress.clone().ok_or(ScopeError::OutsideScope {
            store: "DailyProgressTracker",
        })
    }

    /// Drop the scope's handles. Later accessor calls fail.
    ///
    /// Handles already given out keep working until their holders drop them.
    pub fn teardown(&mut self) {
        let had_profile = self.profile.take().is_some();
        let had_progress = self.progress.take().is_some();
        if had_profile || had_progress {
            info!("App scope torn down");
        }
    }
}
