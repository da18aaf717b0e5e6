//! Daily Ritual — the Check-In → Reflect → Zen Quest progression and Eva's
//! templated dialogue.

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod profile;
pub mod progress;
pub mod scope;
