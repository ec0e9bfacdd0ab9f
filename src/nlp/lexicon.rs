// =============================================================================
// Preprocessing Lexicons
// =============================================================================
//
// Fixed keyword tables consulted while building the analysis context.
// Surface forms are lowercase; entity forms are matched as substrings of the
// lowercased article, sentiment and emotion words as whole tokens.

use crate::types::Ideology;

/// Surface form -> ideology tag, in detection order.
pub const ENTITY_LEXICON: &[(&str, Ideology)] = &[
    ("biden", Ideology::Left),
    ("democrats", Ideology::Left),
    ("democratic", Ideology::Left),
    ("harris", Ideology::Left),
    ("obama", Ideology::Left),
    ("pelosi", Ideology::Left),
    ("schumer", Ideology::Left),
    ("progressive", Ideology::Left),
    ("climate", Ideology::Left),
    ("regulation", Ideology::Left),
    ("trump", Ideology::Right),
    ("republicans", Ideology::Right),
    ("republican", Ideology::Right),
    ("mcconnell", Ideology::Right),
    ("desantis", Ideology::Right),
    ("pence", Ideology::Right),
    ("cpac", Ideology::Right),
    ("conservative", Ideology::Right),
    ("freedom", Ideology::Right),
    ("market", Ideology::Right),
    ("congress", Ideology::Neutral),
    ("senate", Ideology::Neutral),
    ("house", Ideology::Neutral),
    ("bill", Ideology::Neutral),
];

/// Signed sentiment weight per word.
pub const SENTIMENT_LEXICON: &[(&str, f64)] = &[
    ("great", 0.5),
    ("excellent", 0.6),
    ("good", 0.4),
    ("wonderful", 0.6),
    ("strong", 0.3),
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("poor", -0.4),
    ("weak", -0.3),
    ("corrupt", -0.7),
    ("failed", -0.5),
];

/// Emotionally charged words, regardless of polarity.
pub const EMOTION_LEXICON: &[&str] = &[
    "angry",
    "furious",
    "outraged",
    "shocking",
    "devastating",
    "alarming",
    "beautiful",
    "inspiring",
    "wonderful",
];

/// Emotion added per charged token.
pub const EMOTION_INCREMENT: f64 = 0.3;

/// Emotion ceiling.
pub const EMOTION_CEILING: f64 = 1.0;

pub fn sentiment_weight(token: &str) -> Option<f64> {
    SENTIMENT_LEXICON
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, weight)| *weight)
}

pub fn is_positive_word(token: &str) -> bool {
    sentiment_weight(token).is_some_and(|w| w > 0.0)
}

pub fn is_emotional_word(token: &str) -> bool {
    EMOTION_LEXICON.contains(&token)
}
