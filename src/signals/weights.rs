// =============================================================================
// Signal Weights — convex-combination basis for the aggregator
// =============================================================================
//
// A mapping from signal name to non-negative weight. Every mutation goes
// through `set`, which renormalizes so the table sums to 1.0. A lookup for
// a name that was never registered yields 0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::signals::{
    EMOTIONAL_DIRECTION, ENTITY_SENTIMENT, OUTLET_BASELINE, POLICY_FRAMING, SEMANTIC_BIAS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalWeights {
    weights: HashMap<String, f64>,
}

impl Default for SignalWeights {
    fn default() -> Self {
        let mut weights = HashMap::new();
        weights.insert(OUTLET_BASELINE.to_string(), 0.15);
        weights.insert(ENTITY_SENTIMENT.to_string(), 0.30);
        weights.insert(POLICY_FRAMING.to_string(), 0.20);
        weights.insert(EMOTIONAL_DIRECTION.to_string(), 0.15);
        weights.insert(SEMANTIC_BIAS.to_string(), 0.20);
        Self::from_map(weights)
    }
}

impl SignalWeights {
    /// Build a table from raw weights. Invalid entries are zeroed, then the
    /// table is renormalized.
    pub fn from_map(weights: HashMap<String, f64>) -> Self {
        let weights = weights
            .into_iter()
            .map(|(name, w)| {
                let w = sanitize(&name, w);
                (name, w)
            })
            .collect();
        let mut table = Self { weights };
        table.normalize();
        table
    }

    /// Re-validate a table that bypassed `from_map` (e.g. deserialised from
    /// a config file).
    pub fn into_normalized(self) -> Self {
        Self::from_map(self.weights)
    }

    /// Weight for `name`, or 0 when absent.
    pub fn get(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    /// Insert or overwrite one weight and renormalize.
    pub fn set(&mut self, name: impl Into<String>, weight: f64) {
        let name = name.into();
        let weight = sanitize(&name, weight);
        self.weights.insert(name, weight);
        self.normalize();
    }

    /// Scale every weight so the table sums to 1.0. An all-zero table is
    /// left untouched.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for w in self.weights.values_mut() {
                *w /= total;
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn sanitize(name: &str, weight: f64) -> f64 {
    if !weight.is_finite() || weight < 0.0 {
        warn!(signal = name, weight, "invalid signal weight, using 0");
        0.0
    } else {
        weight
    }
}
