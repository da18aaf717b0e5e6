//! Eva's template text.
//!
//! Tokens: `{arcTitle}`, `{boss}`, `{finalForm}`, `{mood}`. Indices are part
//! of the selection contract in `engine`; do not reorder.

/// Fallback reply for blank input.
pub const EMPTY_INPUT_REPLY: &str = "I'm here when you're ready to share.";

/// Opening messages for a reflection session.
pub const OPENING_TEMPLATES: [&str; 2] = [
    "I noticed how you checked in today. {mood} is a valid place to be.",
    "What's one thing that's been weighing on you lately?",
];

/// Reflection replies. 0–2 medium input, 3 and 6 long input, 4–5 short input.
pub const REPLY_TEMPLATES: [&str; 7] = [
    // 0: arc-focused acknowledgment
    "Thank you for sharing that. I can sense a lot behind those words.
Within your arc \"{arcTitle}\", moments like this are important.
When you think about {boss} — what part of this feels the heaviest right now?",
    // 1: mood-connected validation
    "I hear you. Feeling {mood} while carrying this makes sense.
Your journey toward {finalForm} isn't always a straight line.
What would it feel like to release just 1% of this weight?",
    // 2: boss-focused encouragement
    "That sounds like {boss} showing up in a familiar way.
It's okay — recognizing it is already progress.
In your arc \"{arcTitle}\", what small truth does this reveal about you?",
    // 3: final form aspiration
    "You're being honest with yourself, and that matters.
The version of you that is {finalForm} — they've walked through moments like this too.
What would they tell you right now?",
    // 4: mood validation, open question
    "When you feel {mood}, it's a signal — not a sentence.
Your arc \"{arcTitle}\" holds space for all of this.
What's one thing underneath this feeling that wants to be seen?",
    // 5: short and grounding
    "That's real. Thank you for not hiding it.
{boss} may feel heavy, but you're not carrying it alone.
What would feel like a tiny step forward from here?",
    // 6: emotional depth
    "I sense something deeper here. Your words carry weight.
Within \"{arcTitle}\", this is part of your story — not the end of it.
If {boss} could speak, what would it be asking of you?",
];

/// Zen Quest meditation scripts, one line per reveal.
pub const MEDITATION_TEMPLATES: [&str; 4] = [
    // 0: breathing focus
    "Close your eyes.
Inhale slowly… exhale gently.
Today's mood: {mood}. Let it rise and fall like a passing cloud.
Your arc, \"{arcTitle}\", continues to unfold.
With each breath, release one thread of {boss}.
You don't have to solve it — just loosen your grip.
Step toward your {finalForm}.
You are moving with intention.
One percent at a time.",
    // 1: visualization
    "Take a slow breath in… and let it go.
Picture yourself walking a quiet path.
The weight of {boss} is a stone in your pocket.
You don't have to throw it away — just set it down for a moment.
In your arc \"{arcTitle}\", you are allowed to rest.
Your {finalForm} self is waiting, patient and kind.
Breathe in possibility. Breathe out tension.
You are exactly where you need to be.",
    // 2: body-centered release
    "Settle into stillness.
Notice where {mood} lives in your body right now.
Breathe into that space… and soften.
Your arc, \"{arcTitle}\", holds all of this.
{boss} may feel heavy, but you are not defined by its weight.
With each exhale, imagine 1% dissolving.
Your {finalForm} grows clearer with every breath.
You are becoming.",
    // 3: determination
    "Close your eyes, warrior.
Your arc — \"{arcTitle}\" — is not over. It's unfolding.
{boss} is not your enemy. It's your teacher.
Breathe in the lesson. Breathe out the struggle.
Feeling {mood} is part of the journey, not a detour.
Your {finalForm} awaits on the other side of this moment.
One breath. One step. One choice.
You've got this.",
];
