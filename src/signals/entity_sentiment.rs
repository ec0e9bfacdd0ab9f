// =============================================================================
// Entity Sentiment — tone toward left- vs right-tagged entities
// =============================================================================
//
//   score = clamp(mean_sentiment(left) - mean_sentiment(right))
//
// Neutral and unknown entities are ignored; an empty side averages to 0.

use crate::nlp::AnalysisContext;
use crate::signals::{partition_means, BiasSignal, SignalReading, ENTITY_SENTIMENT};
use crate::types::ArticleInput;

#[derive(Debug, Clone, Copy, Default)]
pub struct EntitySentimentSignal;

impl BiasSignal for EntitySentimentSignal {
    fn name(&self) -> &'static str {
        ENTITY_SENTIMENT
    }

    fn compute(&self, ctx: &AnalysisContext, _article: &ArticleInput) -> SignalReading {
        let (left_avg, right_avg) = partition_means(ctx, |e| e.sentiment);
        SignalReading::new(left_avg - right_avg, left_avg, right_avg)
    }

    fn explain(&self, reading: &SignalReading) -> String {
        let verdict = if reading.left < reading.right {
            "more negative toward left entities"
        } else if reading.left > reading.right {
            "more negative toward right entities"
        } else {
            "balanced sentiment"
        };
        format!(
            "Entity sentiment: left entities avg={:.3}, right entities avg={:.3} ({verdict})",
            reading.left, reading.right
        )
    }
}
