// =============================================================================
// Bias Aggregator — context building, refusal, weighting and confidence
// =============================================================================
//
// One `analyze` call:
//   1. Build the shared `AnalysisContext` once.
//   2. Refuse thin input (too few tokens or entities) without running any
//      signal.
//   3. Run every signal in registration order.
//   4. score = clamp( Σ(score_i * w_i) / Σ(w_i) )   (0 when Σw = 0)
//   5. confidence = (agreement + data) / 2
//        agreement = 1 / (1 + variance(signal scores))
//        data      = (min(1, tokens/1000) + min(1, entities/10)) / 2
//   6. Bucket the score into a label.
//
// Concurrency: the weight table sits behind `RwLock<Arc<SignalWeights>>`.
// Writers build a new renormalized table and swap the `Arc`; each
// `analyze` clones the `Arc` once up front, so it always sees one whole
// table. Signals are stateless, so `&self` analysis is safe from any
// number of threads.
// =============================================================================

use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::nlp::{AnalysisContext, Preprocessor};
use crate::outlets::OutletTable;
use crate::runtime_config::AnalyzerConfig;
use crate::signals::{
    clamp_unit, BiasSignal, EmotionalDirectionSignal, EntitySentimentSignal,
    OutletBaselineSignal, PolicyFramingSignal, SemanticBiasSignal, SignalWeights,
};
use crate::types::{ArticleInput, BiasLabel, BiasResult, SignalContribution};

pub const REFUSAL_MESSAGE: &str =
    "Article is too short or has too few entities for reliable analysis";

/// Token count at which the length half of data confidence saturates.
const FULL_CONFIDENCE_TOKENS: f64 = 1000.0;
/// Entity count at which the entity half of data confidence saturates.
const FULL_CONFIDENCE_ENTITIES: f64 = 10.0;

/// Minimum material an article needs before it is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefusalPolicy {
    pub min_tokens: usize,
    pub min_entities: usize,
}

impl Default for RefusalPolicy {
    fn default() -> Self {
        Self {
            min_tokens: 100,
            min_entities: 1,
        }
    }
}

impl RefusalPolicy {
    pub fn refuses(&self, ctx: &AnalysisContext) -> bool {
        ctx.token_count() < self.min_tokens || ctx.entity_count() < self.min_entities
    }
}

pub struct BiasAggregator {
    preprocessor: Preprocessor,
    signals: Vec<Box<dyn BiasSignal>>,
    weights: RwLock<Arc<SignalWeights>>,
    refusal: RefusalPolicy,
}

impl Default for BiasAggregator {
    fn default() -> Self {
        Self::new(OutletTable::seeded())
    }
}

impl BiasAggregator {
    /// The five standard signals with default weights and refusal policy.
    pub fn new(outlets: OutletTable) -> Self {
        Self::with_signals(
            standard_signals(outlets),
            SignalWeights::default(),
            RefusalPolicy::default(),
        )
    }

    /// Build from configuration. A configured outlet file is merged over the
    /// seeded table; failing to load it is an error.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let mut outlets = OutletTable::seeded();
        if let Some(path) = &config.outlets_path {
            outlets.merge(OutletTable::load(path)?);
        }
        Ok(Self::with_signals(
            standard_signals(outlets),
            config.weights.clone(),
            config.refusal(),
        ))
    }

    /// Custom signal set. Signals run, and explanations appear, in the order
    /// given; weights are looked up by `BiasSignal::name`.
    pub fn with_signals(
        signals: Vec<Box<dyn BiasSignal>>,
        weights: SignalWeights,
        refusal: RefusalPolicy,
    ) -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            signals,
            weights: RwLock::new(Arc::new(weights.into_normalized())),
            refusal,
        }
    }

    /// Current weight table snapshot.
    pub fn weights(&self) -> Arc<SignalWeights> {
        Arc::clone(&self.weights.read())
    }

    pub fn signal_names(&self) -> Vec<&'static str> {
        self.signals.iter().map(|s| s.name()).collect()
    }

    /// Set one weight and renormalize. In-flight analyses keep the table
    /// they started with.
    pub fn set_weight(&self, name: &str, weight: f64) {
        let mut guard = self.weights.write();
        let mut next = SignalWeights::clone(&guard);
        next.set(name, weight);
        debug!(signal = name, weight = next.get(name), "signal weight updated");
        *guard = Arc::new(next);
    }

    /// Swap in a whole new table (renormalized first).
    pub fn replace_weights(&self, weights: SignalWeights) {
        let next = Arc::new(weights.into_normalized());
        *self.weights.write() = next;
        debug!("signal weights replaced");
    }

    /// Score one article. Never fails: thin input yields the refusal result.
    pub fn analyze(&self, article: &ArticleInput) -> BiasResult {
        let ctx = self.preprocessor.process(article);

        if self.refusal.refuses(&ctx) {
            debug!(
                tokens = ctx.token_count(),
                entities = ctx.entity_count(),
                domain = %article.domain,
                "article refused"
            );
            return BiasResult::insufficient(REFUSAL_MESSAGE);
        }

        let weights = self.weights();

        let mut scores = Vec::with_capacity(self.signals.len());
        let mut explanations = Vec::with_capacity(self.signals.len());
        for signal in &self.signals {
            let reading = signal.compute(&ctx, article);
            trace!(
                signal = signal.name(),
                score = reading.score,
                left = reading.left,
                right = reading.right,
                "signal reading"
            );
            scores.push((signal.name(), reading.score));
            explanations.push(signal.explain(&reading));
        }

        let weight_sum: f64 = scores.iter().map(|(name, _)| weights.get(name)).sum();
        let contributions: Vec<SignalContribution> = scores
            .iter()
            .map(|&(name, score)| {
                let weight = weights.get(name);
                let contribution = if weight_sum > 0.0 {
                    score * weight / weight_sum
                } else {
                    0.0
                };
                SignalContribution {
                    name: name.to_string(),
                    score,
                    weight,
                    contribution,
                }
            })
            .collect();

        let score = clamp_unit(contributions.iter().map(|c| c.contribution).sum());
        let signal_scores: Vec<f64> = scores.iter().map(|(_, s)| *s).collect();
        let confidence = confidence(&signal_scores, &ctx);
        let label = BiasLabel::from_score(score);

        debug!(
            domain = %article.domain,
            tokens = ctx.token_count(),
            entities = ctx.entity_count(),
            score,
            confidence,
            label = %label,
            "article analyzed"
        );

        BiasResult {
            score,
            label,
            confidence,
            explanations,
            contributions,
        }
    }
}

fn standard_signals(outlets: OutletTable) -> Vec<Box<dyn BiasSignal>> {
    vec![
        Box::new(OutletBaselineSignal::new(Arc::new(outlets))),
        Box::new(EntitySentimentSignal),
        Box::new(PolicyFramingSignal),
        Box::new(EmotionalDirectionSignal),
        Box::new(SemanticBiasSignal),
    ]
}

/// Population variance; 0 for an empty slice.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

fn confidence(signal_scores: &[f64], ctx: &AnalysisContext) -> f64 {
    let agreement = 1.0 / (1.0 + variance(signal_scores));
    let data = ((ctx.token_count() as f64 / FULL_CONFIDENCE_TOKENS).min(1.0)
        + (ctx.entity_count() as f64 / FULL_CONFIDENCE_ENTITIES).min(1.0))
        / 2.0;
    let confidence = (agreement + data) / 2.0;
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
