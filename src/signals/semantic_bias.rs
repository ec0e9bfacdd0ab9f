// =============================================================================
// Semantic Bias — cosine similarity to hand-built ideological poles
// =============================================================================
//
// Four abstract dimensions:
//   0 collectivism   1 individualism   2 regulation   3 change
//
// The article is embedded by counting lexicon terms in the lowercased
// title + body. Every occurrence adds TERM_INCREMENT * orientation to the
// term's dimension; the vector is then L2-normalized and compared with the
// two reference poles.
//
//   score = clamp(cos(article, RIGHT_POLE) - cos(article, LEFT_POLE))
//
// Term matching is by substring, so inflected forms ("reforms") count and
// so do overlaps ("deregulation" also contains "regulation").
// =============================================================================

use tracing::trace;

use crate::nlp::AnalysisContext;
use crate::signals::{BiasSignal, SignalReading, SEMANTIC_BIAS};
use crate::types::ArticleInput;

pub const DIMENSIONS: usize = 4;

const COLLECTIVISM: usize = 0;
const INDIVIDUALISM: usize = 1;
const REGULATION: usize = 2;
const CHANGE: usize = 3;

pub const LEFT_POLE: [f64; DIMENSIONS] = [0.8, -0.5, 0.7, 0.75];
pub const RIGHT_POLE: [f64; DIMENSIONS] = [-0.8, 0.85, -0.7, -0.7];

const TERM_INCREMENT: f64 = 0.3;

/// Norms below this are treated as zero.
const NORM_EPSILON: f64 = 1e-6;

/// (term, dimension, orientation along that dimension)
const LEFT_TERMS: &[(&str, usize, f64)] = &[
    ("equality", COLLECTIVISM, 1.0),
    ("justice", COLLECTIVISM, 1.0),
    ("community", COLLECTIVISM, 1.0),
    ("collective", COLLECTIVISM, 1.0),
    ("workers", INDIVIDUALISM, -1.0),
    ("rights", INDIVIDUALISM, -1.0),
    ("welfare", REGULATION, 1.0),
    ("regulation", REGULATION, 1.0),
    ("healthcare", REGULATION, 1.0),
    ("environment", REGULATION, 1.0),
    ("progress", CHANGE, 1.0),
    ("reform", CHANGE, 1.0),
    ("change", CHANGE, 1.0),
    ("innovation", CHANGE, 1.0),
];

const RIGHT_TERMS: &[(&str, usize, f64)] = &[
    ("freedom", INDIVIDUALISM, 1.0),
    ("liberty", INDIVIDUALISM, 1.0),
    ("individual", INDIVIDUALISM, 1.0),
    ("personal", INDIVIDUALISM, 1.0),
    ("market", REGULATION, -1.0),
    ("business", REGULATION, -1.0),
    ("deregulation", REGULATION, -1.0),
    ("growth", REGULATION, -1.0),
    ("tradition", CHANGE, -1.0),
    ("family", CHANGE, -1.0),
    ("stability", CHANGE, -1.0),
    ("strength", CHANGE, -1.0),
];

/// Embed lowercased text into the four-dimensional space, L2-normalized.
/// Text with no lexicon terms embeds to the zero vector.
pub fn embed(text: &str) -> [f64; DIMENSIONS] {
    let mut vector = [0.0; DIMENSIONS];
    for (term, dimension, orientation) in LEFT_TERMS.iter().chain(RIGHT_TERMS) {
        let count = text.matches(term).count();
        vector[*dimension] += count as f64 * TERM_INCREMENT * orientation;
    }

    let norm = l2_norm(&vector);
    if norm > NORM_EPSILON {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity; 0 when either operand has (near-)zero norm or the
/// lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a < NORM_EPSILON || norm_b < NORM_EPSILON {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticBiasSignal;

impl BiasSignal for SemanticBiasSignal {
    fn name(&self) -> &'static str {
        SEMANTIC_BIAS
    }

    fn compute(&self, _ctx: &AnalysisContext, article: &ArticleInput) -> SignalReading {
        let embedding = embed(&article.full_text().to_lowercase());
        let left = cosine_similarity(&embedding, &LEFT_POLE);
        let right = cosine_similarity(&embedding, &RIGHT_POLE);
        trace!(?embedding, left, right, "semantic similarities");
        SignalReading::new(right - left, left, right)
    }

    fn explain(&self, reading: &SignalReading) -> String {
        let lean = if reading.right > reading.left {
            "right-leaning semantic space"
        } else if reading.left > reading.right {
            "left-leaning semantic space"
        } else {
            "no semantic lean"
        };
        format!(
            "Semantic bias: left similarity={:.3}, right similarity={:.3} ({lean})",
            reading.left, reading.right
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn reading(body: &str) -> SignalReading {
        let article = ArticleInput::new("", body, "", "");
        SemanticBiasSignal.compute(&AnalysisContext::default(), &article)
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0; 4], &LEFT_POLE), 0.0);
        assert_eq!(cosine_similarity(&LEFT_POLE, &[0.0; 4]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &LEFT_POLE), 0.0);
    }

    #[test]
    fn cosine_basic_values() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 3.0])).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn embedding_is_unit_length_or_zero() {
        let v = embed("justice and freedom and family");
        assert!((l2_norm(&v) - 1.0).abs() < 1e-12);
        assert_eq!(embed("nothing relevant here"), [0.0; DIMENSIONS]);
    }

    #[test]
    fn embedding_counts_every_occurrence() {
        let v = embed("justice justice freedom");
        // raw: [0.6, 0.3, 0, 0] before normalization
        let norm = (0.6_f64 * 0.6 + 0.3 * 0.3).sqrt();
        assert!((v[COLLECTIVISM] - 0.6 / norm).abs() < 1e-12);
        assert!((v[INDIVIDUALISM] - 0.3 / norm).abs() < 1e-12);
    }

    #[test]
    fn no_terms_scores_zero_without_nan() {
        let r = reading("The weather was mild on Sunday.");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.right, 0.0);
        assert!(SemanticBiasSignal.explain(&r).contains("no semantic lean"));
    }

    #[test]
    fn collectivist_language_leans_left() {
        let r = reading("Equality, justice and community welfare.");
        assert!(r.score < 0.0, "expected left lean, got {}", r.score);
        assert!(r.left > r.right);
    }

    #[test]
    fn individualist_language_leans_right() {
        let r = reading("Freedom, liberty, business growth, family stability.");
        assert!(r.score > 0.0, "expected right lean, got {}", r.score);
        assert!(SemanticBiasSignal.explain(&r).contains("right-leaning"));
    }

    #[test]
    fn case_insensitive_on_article_text() {
        assert_eq!(reading("FREEDOM").score, reading("freedom").score);
    }

    #[test]
    fn score_is_bounded() {
        let r = reading("freedom liberty individual personal market business tradition");
        assert!(r.score <= 1.0 && r.score >= -1.0);
    }
}
