// =============================================================================
// Outlet Table — domain -> bias score lookup
// =============================================================================
//
// File format (produced by the reconciliation tool or written by hand):
//
//   { "outlets": { "foxnews.com": 0.7,
//                  "cnn.com": { "score": -0.2, "confidence": 0.95, ... } } }
//
// Loading happens before analysis; lookups are read-only afterwards.
// =============================================================================

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Either a bare score or an object carrying one. Anything else lands in
/// `Unusable` so one bad entry does not reject the whole file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OutletEntry {
    Score(f64),
    Detailed { score: f64 },
    Unusable(serde_json::Value),
}

impl OutletEntry {
    pub(crate) fn score(&self) -> Option<f64> {
        match self {
            Self::Score(s) => Some(*s),
            Self::Detailed { score } => Some(*score),
            Self::Unusable(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutletFile {
    pub(crate) outlets: HashMap<String, OutletEntry>,
}

impl OutletFile {
    pub(crate) fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read outlet file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse outlet file {}", path.display()))
    }

    /// Valid scores, clamped into [-1, 1]. Malformed entries and non-finite
    /// scores are dropped, so those domains fall back to 0 on lookup.
    pub(crate) fn into_scores(self) -> HashMap<String, f64> {
        self.outlets
            .into_iter()
            .filter_map(|(domain, entry)| {
                let Some(score) = entry.score() else {
                    warn!(domain = %domain, entry = ?entry, "skipping malformed outlet entry");
                    return None;
                };
                if !score.is_finite() {
                    warn!(domain = %domain, "skipping outlet with non-finite score");
                    return None;
                }
                if !(-1.0..=1.0).contains(&score) {
                    warn!(domain = %domain, score, "outlet score out of range, clamping");
                }
                Some((domain, score.clamp(-1.0, 1.0)))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutletTable {
    scores: HashMap<String, f64>,
}

impl OutletTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table of well-known outlets.
    pub fn seeded() -> Self {
        let seed = [
            ("foxnews.com", 0.7),
            ("msnbc.com", -0.6),
            ("cnn.com", -0.2),
            ("bbc.com", -0.05),
            ("apnews.com", 0.0),
            ("reuters.com", 0.0),
            ("nytimes.com", -0.3),
            ("wsj.com", 0.2),
            ("breitbart.com", 0.8),
            ("huffpost.com", -0.5),
        ];
        Self {
            scores: seed
                .into_iter()
                .map(|(domain, score)| (domain.to_string(), score))
                .collect(),
        }
    }

    /// Load a table from a JSON outlet file.
    ///
    /// Fails when the file is unreadable, is not valid JSON, or lacks an
    /// `outlets` object, so the caller can choose between aborting and
    /// falling back to `seeded()`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scores = OutletFile::read(path)?.into_scores();
        info!(path = %path.display(), outlets = scores.len(), "outlet table loaded");
        Ok(Self { scores })
    }

    /// Score for a bare domain; 0 when unknown.
    pub fn get(&self, domain: &str) -> f64 {
        self.scores.get(domain).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.scores.contains_key(domain)
    }

    /// Insert one score, clamped into [-1, 1]. Non-finite scores are ignored.
    pub fn insert(&mut self, domain: impl Into<String>, score: f64) {
        if score.is_finite() {
            self.scores.insert(domain.into(), score.clamp(-1.0, 1.0));
        }
    }

    /// Overlay `other` onto this table; its entries win.
    pub fn merge(&mut self, other: OutletTable) {
        self.scores.extend(other.scores);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
