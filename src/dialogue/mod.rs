//! Dialogue — Eva's templated voice for reflection and meditation.
//!
//! Nothing here calls a model. Replies are chosen from fixed templates by
//! input length and a string hash, then personalized from the profile.

pub mod context;
pub mod engine;
pub mod templates;

pub use context::{MeditationParams, Mood, ReflectionContext, format_mood};
pub use engine::{
    DialogueMessage, Speaker, interpolate, meditation_script, meditation_template_index,
    opening_messages, reply, reply_template_index, split_lines, text_hash,
};
