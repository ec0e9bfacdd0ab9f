// =============================================================================
// Emotional Direction — charged negativity aimed at each side
// =============================================================================
//
// Each entity contributes emotion * (-sentiment): an emotionally loaded,
// negatively toned mention yields a positive "directed negativity" value.
//
//   score = clamp(mean_directed(left) - mean_directed(right))
//
// Emotion is measured over the whole document, not per entity, so the
// signal mostly reflects how sentiment and emotion co-occur in the article.

use crate::nlp::AnalysisContext;
use crate::signals::{partition_means, BiasSignal, SignalReading, EMOTIONAL_DIRECTION};
use crate::types::{ArticleInput, EntityMention};

#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionalDirectionSignal;

fn directed_negativity(entity: &EntityMention) -> f64 {
    entity.emotion * -entity.sentiment
}

impl BiasSignal for EmotionalDirectionSignal {
    fn name(&self) -> &'static str {
        EMOTIONAL_DIRECTION
    }

    fn compute(&self, ctx: &AnalysisContext, _article: &ArticleInput) -> SignalReading {
        let (left, right) = partition_means(ctx, directed_negativity);
        SignalReading::new(left - right, left, right)
    }

    fn explain(&self, reading: &SignalReading) -> String {
        let verdict = if reading.left > reading.right {
            "more emotional negativity toward left (right bias signal)"
        } else if reading.right > reading.left {
            "more emotional negativity toward right (left bias signal)"
        } else {
            "balanced emotional tone"
        };
        format!(
            "Emotional direction: left entity emotions={:.3}, right entity emotions={:.3} ({verdict})",
            reading.left, reading.right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ideology;

    fn mention(name: &str, ideology: Ideology, sentiment: f64, emotion: f64) -> EntityMention {
        EntityMention {
            name: name.to_string(),
            ideology,
            sentiment,
            emotion,
        }
    }

    #[test]
    fn negativity_toward_left_reads_right() {
        let ctx = AnalysisContext {
            entities: vec![mention("pelosi", Ideology::Left, -0.5, 0.6)],
            ..Default::default()
        };
        let r = EmotionalDirectionSignal.compute(&ctx, &ArticleInput::default());
        assert!((r.score - 0.3).abs() < 1e-12);
        assert!(EmotionalDirectionSignal.explain(&r).contains("toward left"));
    }

    #[test]
    fn negativity_toward_right_reads_left() {
        let ctx = AnalysisContext {
            entities: vec![
                mention("trump", Ideology::Right, -0.6, 0.9),
                mention("mcconnell", Ideology::Right, -0.6, 0.9),
            ],
            ..Default::default()
        };
        let r = EmotionalDirectionSignal.compute(&ctx, &ArticleInput::default());
        assert!((r.score + 0.54).abs() < 1e-12);
    }

    #[test]
    fn no_emotion_means_no_signal() {
        let ctx = AnalysisContext {
            entities: vec![
                mention("biden", Ideology::Left, -0.7, 0.0),
                mention("trump", Ideology::Right, 0.5, 0.0),
            ],
            ..Default::default()
        };
        let r = EmotionalDirectionSignal.compute(&ctx, &ArticleInput::default());
        assert_eq!(r.score, 0.0);
        assert!(EmotionalDirectionSignal.explain(&r).contains("balanced"));
    }
}
