use super::mood_analysis::MoodReading;

/// Ordered rules; the first rule with any matching keyword wins.
const RULES: &[(&[&str], &str, &str)] = &[
    (&["sad", "lonely"], "sad", "You seem down. Take a moment to breathe."),
    (&["happy", "excited"], "happy", "Glad you're feeling good!"),
    (
        &["anxious", "overwhelmed", "worried"],
        "anxious",
        "Try grounding yourself. You're doing great.",
    ),
    (&["calm", "peaceful"], "calm", "Enjoy the serenity."),
    (&["angry", "frustrated"], "angry", "Let it out. Your feelings are valid."),
    (
        &["grateful", "thankful"],
        "grateful",
        "Gratitude is powerful. Keep it flowing.",
    ),
    (&["hopeful", "optimistic"], "hopeful", "Hope is a strength. Hold onto it."),
    (
        &["reflective", "thinking"],
        "reflective",
        "Reflection brings clarity. Keep exploring.",
    ),
];

/// Keyword-based mood detection used when the language model is not
/// consulted or is unavailable.
pub fn detect(text: &str) -> MoodReading {
    let text = text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, mood, feedback)| MoodReading {
            mood: (*mood).to_string(),
            feedback: (*feedback).to_string(),
        })
        .unwrap_or_else(|| MoodReading {
            mood: "unclear".to_string(),
            feedback: "Couldn't detect mood clearly.".to_string(),
        })
}
