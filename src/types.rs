// =============================================================================
// Shared types used across the bias analysis pipeline
// =============================================================================

use serde::{Deserialize, Serialize};

/// One news article, the unit of analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub url: String,
    /// Bare hostname (e.g. "foxnews.com"), used as an exact-match key.
    #[serde(default)]
    pub domain: String,
}

impl ArticleInput {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        url: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
            domain: domain.into(),
        }
    }

    /// Title and body joined by a single space.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Political alignment of a detected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ideology {
    Left,
    Right,
    Neutral,
    Unknown,
}

impl Default for Ideology {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for Ideology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Neutral => write!(f, "neutral"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A lexicon hit on a political entity, enriched with sentiment and emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub name: String,
    pub ideology: Ideology,
    /// In [-1, 1]. Zero until the sentiment stage runs.
    pub sentiment: f64,
    /// In [0, 1]. Zero until the emotion stage runs.
    pub emotion: f64,
}

impl EntityMention {
    pub fn new(name: impl Into<String>, ideology: Ideology) -> Self {
        Self {
            name: name.into(),
            ideology,
            sentiment: 0.0,
            emotion: 0.0,
        }
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Categorical verdict. The seven buckets partition [-1, 1]; the eighth
/// variant marks a refused analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiasLabel {
    #[serde(rename = "Strong Left")]
    StrongLeft,
    #[serde(rename = "Moderate Left")]
    ModerateLeft,
    #[serde(rename = "Slight Left")]
    SlightLeft,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Slight Right")]
    SlightRight,
    #[serde(rename = "Moderate Right")]
    ModerateRight,
    #[serde(rename = "Strong Right")]
    StrongRight,
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
}

impl BiasLabel {
    /// Bucket a score. Thresholds are evaluated from the right pole down.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            Self::StrongRight
        } else if score >= 0.3 {
            Self::ModerateRight
        } else if score >= 0.1 {
            Self::SlightRight
        } else if score > -0.1 {
            Self::Neutral
        } else if score >= -0.3 {
            Self::SlightLeft
        } else if score >= -0.6 {
            Self::ModerateLeft
        } else {
            Self::StrongLeft
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongLeft => "Strong Left",
            Self::ModerateLeft => "Moderate Left",
            Self::SlightLeft => "Slight Left",
            Self::Neutral => "Neutral",
            Self::SlightRight => "Slight Right",
            Self::ModerateRight => "Moderate Right",
            Self::StrongRight => "Strong Right",
            Self::InsufficientData => "Insufficient Data",
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(
            self,
            Self::SlightRight | Self::ModerateRight | Self::StrongRight
        )
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Self::SlightLeft | Self::ModerateLeft | Self::StrongLeft)
    }
}

impl std::fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Results
// =============================================================================

/// The share of the final score attributable to one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub name: String,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Verdict for a single article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasResult {
    /// In [-1, 1]; negative leans left, positive leans right.
    pub score: f64,
    pub label: BiasLabel,
    /// In [0, 1]. A diagnostic, not a calibrated probability.
    pub confidence: f64,
    /// One entry per signal in registration order.
    pub explanations: Vec<String>,
    #[serde(default)]
    pub contributions: Vec<SignalContribution>,
}

impl BiasResult {
    /// The refusal verdict for input too thin to analyze.
    pub fn insufficient(reason: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            label: BiasLabel::InsufficientData,
            confidence: 0.0,
            explanations: vec![reason.into()],
            contributions: Vec::new(),
        }
    }

    pub fn is_refusal(&self) -> bool {
        self.label == BiasLabel::InsufficientData
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_match_thresholds() {
        assert_eq!(BiasLabel::from_score(1.0), BiasLabel::StrongRight);
        assert_eq!(BiasLabel::from_score(0.6), BiasLabel::StrongRight);
        assert_eq!(BiasLabel::from_score(0.5999), BiasLabel::ModerateRight);
        assert_eq!(BiasLabel::from_score(0.3), BiasLabel::ModerateRight);
        assert_eq!(BiasLabel::from_score(0.2999), BiasLabel::SlightRight);
        assert_eq!(BiasLabel::from_score(0.1), BiasLabel::SlightRight);
        assert_eq!(BiasLabel::from_score(0.0999), BiasLabel::Neutral);
        assert_eq!(BiasLabel::from_score(0.0), BiasLabel::Neutral);
        assert_eq!(BiasLabel::from_score(-0.0999), BiasLabel::Neutral);
        assert_eq!(BiasLabel::from_score(-0.1), BiasLabel::SlightLeft);
        assert_eq!(BiasLabel::from_score(-0.3), BiasLabel::SlightLeft);
        assert_eq!(BiasLabel::from_score(-0.3001), BiasLabel::ModerateLeft);
        assert_eq!(BiasLabel::from_score(-0.6), BiasLabel::ModerateLeft);
        assert_eq!(BiasLabel::from_score(-0.6001), BiasLabel::StrongLeft);
        assert_eq!(BiasLabel::from_score(-1.0), BiasLabel::StrongLeft);
    }

    #[test]
    fn every_score_maps_to_one_of_seven_buckets() {
        let mut score = -1.0;
        while score <= 1.0 {
            let label = BiasLabel::from_score(score);
            assert_ne!(label, BiasLabel::InsufficientData);
            assert!(label.is_left() || label.is_right() || label == BiasLabel::Neutral);
            score += 0.001;
        }
    }

    #[test]
    fn label_serialises_as_display_text() {
        let json = serde_json::to_string(&BiasLabel::ModerateLeft).unwrap();
        assert_eq!(json, "\"Moderate Left\"");
        let back: BiasLabel = serde_json::from_str("\"Insufficient Data\"").unwrap();
        assert_eq!(back, BiasLabel::InsufficientData);
        assert_eq!(BiasLabel::StrongRight.to_string(), "Strong Right");
    }

    #[test]
    fn ideology_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Ideology::Right).unwrap(), "\"right\"");
        assert_eq!(Ideology::default(), Ideology::Unknown);
    }

    #[test]
    fn insufficient_result_is_zeroed() {
        let r = BiasResult::insufficient("too short");
        assert!(r.is_refusal());
        assert_eq!(r.score, 0.0);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.explanations, vec!["too short".to_string()]);
        assert!(r.contributions.is_empty());
    }

    #[test]
    fn article_deserialises_with_missing_fields() {
        let a: ArticleInput = serde_json::from_str(r#"{ "title": "t", "domain": "cnn.com" }"#).unwrap();
        assert_eq!(a.title, "t");
        assert_eq!(a.body, "");
        assert_eq!(a.full_text(), "t ");
    }
}
