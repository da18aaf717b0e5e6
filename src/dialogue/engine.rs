//! Deterministic dialogue engine.
//!
//! Template selection depends only on the input text and the arc title, so
//! identical inputs always produce identical output. No operation here can
//! fail: missing context degrades to default wording.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::{MeditationParams, ReflectionContext};
use super::templates::{
    EMPTY_INPUT_REPLY, MEDITATION_TEMPLATES, OPENING_TEMPLATES, REPLY_TEMPLATES,
};

/// Who is speaking in a dialogue line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Eva,
    User,
}

/// One line of dialogue for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueMessage {
    pub role: Speaker,
    pub text: String,
}

impl DialogueMessage {
    pub fn eva(text: impl Into<String>) -> Self {
        Self {
            role: Speaker::Eva,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            text: text.into(),
        }
    }
}

/// The closed set of template tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    ArcTitle,
    Boss,
    FinalForm,
    Mood,
}

impl Token {
    fn parse(name: &str) -> Option<Token> {
        match name {
            "arcTitle" => Some(Self::ArcTitle),
            "boss" => Some(Self::Boss),
            "finalForm" => Some(Self::FinalForm),
            "mood" => Some(Self::Mood),
            _ => None,
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            Self::ArcTitle => "Your Journey",
            Self::Boss => "your challenge",
            Self::FinalForm => "your true self",
            Self::Mood => "present",
        }
    }

    fn value<'a>(&self, context: &'a ReflectionContext) -> &'a str {
        let raw = match self {
            Self::ArcTitle => &context.arc_title,
            Self::Boss => &context.boss,
            Self::FinalForm => &context.final_form,
            Self::Mood => &context.mood,
        };
        if raw.is_empty() {
            self.default_value()
        } else {
            raw
        }
    }
}

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(arcTitle|boss|finalForm|mood)\}").expect("token pattern is valid")
});

/// Substitute every known token in one pass. Unknown `{...}` text is left
/// as-is, and substituted values are never rescanned.
pub fn interpolate(template: &str, context: &ReflectionContext) -> String {
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures<'_>| match Token::parse(&caps[1]) {
            Some(token) => token.value(context).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// 32-bit rolling string hash over UTF-16 code units (`h = h * 31 + c`,
/// wrapping), returned as an absolute value.
///
/// Not cryptographic; only spreads replies across templates.
pub fn text_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
        .unsigned_abs()
}

/// Index into [`REPLY_TEMPLATES`] for a non-blank utterance.
///
/// Under 30 code units → 4 or 5; under 100 → 0, 1 or 2; otherwise 3 or 6.
pub fn reply_template_index(text: &str) -> usize {
    let length = text.encode_utf16().count();
    let hash = text_hash(text) as usize;

    if length < 30 {
        4 + hash % 2
    } else if length < 100 {
        hash % 3
    } else if hash % 2 == 0 {
        3
    } else {
        6
    }
}

/// Index into [`MEDITATION_TEMPLATES`]: arc title length modulo 4.
pub fn meditation_template_index(arc_title: &str) -> usize {
    arc_title.encode_utf16().count() % MEDITATION_TEMPLATES.len()
}

/// Eva's two opening messages for a reflection session.
pub fn opening_messages(context: &ReflectionContext) -> Vec<DialogueMessage> {
    let context = context.with_display_mood();
    OPENING_TEMPLATES
        .iter()
        .map(|template| DialogueMessage::eva(interpolate(template, &context)))
        .collect()
}

/// Eva's reply to one user utterance.
pub fn reply(user_text: &str, context: &ReflectionContext) -> DialogueMessage {
    if user_text.trim().is_empty() {
        return DialogueMessage::eva(EMPTY_INPUT_REPLY);
    }

    let index = reply_template_index(user_text);
    debug!(template = index, "Selected reflection reply");

    let context = context.with_display_mood();
    DialogueMessage::eva(interpolate(REPLY_TEMPLATES[index], &context))
}

/// Today's Zen Quest meditation script.
pub fn meditation_script(params: &MeditationParams) -> String {
    let index = meditation_template_index(&params.arc_title);
    debug!(template = index, "Selected meditation script");

    interpolate(MEDITATION_TEMPLATES[index], &params.with_display_mood())
}

/// Non-blank trimmed lines of a script, in order.
///
/// The iterator borrows `script`; call again to restart.
pub fn split_lines(script: &str) -> impl Iterator<Item = &str> + Clone + '_ {
    script.lines().map(str::trim).filter(|line| !line.is_empty())
}
