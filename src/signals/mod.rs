// =============================================================================
// Signals Module
// =============================================================================
//
// Independent bias heuristics, each reading the shared analysis context and
// producing a bounded opinion in [-1, 1] (negative = left, positive = right):
// - Outlet baseline (publisher reputation lookup)
// - Entity sentiment (tone toward left vs right entities)
// - Policy framing (weighted policy vocabulary)
// - Emotional direction (charged negativity toward each side)
// - Semantic bias (cosine similarity to hand-built reference vectors)
//
// Signals hold no per-call state: `compute` returns a `SignalReading` and
// `explain` renders that reading, so one signal set can serve concurrent
// analyses.

pub mod emotional_direction;
pub mod entity_sentiment;
pub mod outlet_baseline;
pub mod policy_framing;
pub mod semantic_bias;
pub mod weights;

pub use emotional_direction::EmotionalDirectionSignal;
pub use entity_sentiment::EntitySentimentSignal;
pub use outlet_baseline::OutletBaselineSignal;
pub use policy_framing::PolicyFramingSignal;
pub use semantic_bias::SemanticBiasSignal;
pub use weights::SignalWeights;

use serde::{Deserialize, Serialize};

use crate::nlp::AnalysisContext;
use crate::types::{ArticleInput, EntityMention, Ideology};

pub const OUTLET_BASELINE: &str = "OutletBaseline";
pub const ENTITY_SENTIMENT: &str = "EntitySentiment";
pub const POLICY_FRAMING: &str = "PolicyFraming";
pub const EMOTIONAL_DIRECTION: &str = "EmotionalDirection";
pub const SEMANTIC_BIAS: &str = "SemanticBias";

/// Outcome of one `compute` call. `left` and `right` hold the per-side
/// evidence each signal reports (averages, term weights, similarities).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalReading {
    pub score: f64,
    pub left: f64,
    pub right: f64,
}

impl SignalReading {
    /// Build a reading, clamping the score into [-1, 1].
    pub fn new(score: f64, left: f64, right: f64) -> Self {
        Self {
            score: clamp_unit(score),
            left,
            right,
        }
    }
}

/// A bias heuristic.
pub trait BiasSignal: Send + Sync {
    /// Stable identifier used as the weight-table key.
    fn name(&self) -> &'static str;

    fn compute(&self, ctx: &AnalysisContext, article: &ArticleInput) -> SignalReading;

    /// Human-readable account of a reading this signal produced.
    fn explain(&self, reading: &SignalReading) -> String;
}

/// Clamp into [-1, 1]; NaN maps to 0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(-1.0, 1.0)
    }
}

/// Average `value` over left-tagged and right-tagged entities separately.
/// An empty side averages to 0.
pub(crate) fn partition_means<F>(ctx: &AnalysisContext, value: F) -> (f64, f64)
where
    F: Fn(&EntityMention) -> f64,
{
    let mean = |ideology: Ideology| {
        let (sum, n) = ctx
            .entities_with(ideology)
            .fold((0.0_f64, 0usize), |(s, n), e| (s + value(e), n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    };
    (mean(Ideology::Left), mean(Ideology::Right))
}
