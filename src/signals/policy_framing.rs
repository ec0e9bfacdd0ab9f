// =============================================================================
// Policy Framing — weighted policy vocabulary per side
// =============================================================================
//
// Scans the token stream for policy language:
//   1. At each position, try the bigram lexicons first; a bigram hit consumes
//      both tokens.
//   2. Otherwise try the unigram lexicons (a term may sit on both sides).
//   3. Boost a hit x1.5 when the previous token is a negative intensifier,
//      and x1.25 when the following token is a positive sentiment word.
//
//   score = (right_total - left_total) / (right_total + left_total)
//
// Below MIN_EVIDENCE combined weight the signal abstains with 0.
// =============================================================================

use tracing::trace;

use crate::nlp::lexicon::is_positive_word;
use crate::nlp::AnalysisContext;
use crate::signals::{BiasSignal, SignalReading, POLICY_FRAMING};
use crate::types::ArticleInput;

/// Combined weight below which there is not enough policy language to judge.
const MIN_EVIDENCE: f64 = 0.1;

const INTENSIFIER_BOOST: f64 = 1.5;
const POSITIVE_FOLLOWER_BOOST: f64 = 1.25;

const LEFT_UNIGRAMS: &[(&str, f64)] = &[
    ("inequality", 1.0),
    ("climate", 0.8),
    ("regulation", 0.6),
    ("workers", 0.7),
    ("rights", 0.5),
    ("justice", 0.7),
    ("welfare", 0.8),
    ("progressive", 1.0),
    ("reform", 0.5),
    ("taxes", 0.3),
    ("rich", 0.4),
    ("action", 0.2),
];

const LEFT_BIGRAMS: &[(&str, &str, f64)] = &[
    ("climate", "action", 1.5),
    ("social", "justice", 1.5),
    ("income", "inequality", 1.5),
    ("workers", "rights", 1.2),
    ("living", "wage", 1.2),
    ("universal", "healthcare", 1.5),
    ("wealth", "gap", 1.2),
];

const RIGHT_UNIGRAMS: &[(&str, f64)] = &[
    ("freedom", 0.8),
    ("liberty", 0.8),
    ("market", 0.6),
    ("deregulation", 1.0),
    ("business", 0.4),
    ("growth", 0.4),
    ("entrepreneur", 0.7),
    ("innovation", 0.3),
    ("conservative", 1.0),
    ("traditional", 0.6),
    ("fiscal", 0.6),
    ("taxes", 0.3),
    ("government", 0.3),
];

const RIGHT_BIGRAMS: &[(&str, &str, f64)] = &[
    ("free", "market", 1.5),
    ("tax", "cuts", 1.2),
    ("small", "government", 1.5),
    ("government", "overreach", 1.5),
    ("border", "security", 1.2),
    ("fiscal", "responsibility", 1.2),
    ("family", "values", 1.2),
];

const NEGATIVE_INTENSIFIERS: &[&str] = &[
    "radical",
    "extreme",
    "so-called",
    "dangerous",
    "reckless",
    "disastrous",
];

/// Weight added to each side by the match at one position.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Hit {
    len: usize,
    left: f64,
    right: f64,
}

fn bigram_weight(table: &[(&str, &str, f64)], first: &str, second: &str) -> f64 {
    table
        .iter()
        .find(|(a, b, _)| *a == first && *b == second)
        .map_or(0.0, |(_, _, w)| *w)
}

fn unigram_weight(table: &[(&str, f64)], token: &str) -> f64 {
    table
        .iter()
        .find(|(term, _)| *term == token)
        .map_or(0.0, |(_, w)| *w)
}

fn match_at(tokens: &[String], i: usize) -> Hit {
    if let Some(next) = tokens.get(i + 1) {
        let left = bigram_weight(LEFT_BIGRAMS, &tokens[i], next);
        let right = bigram_weight(RIGHT_BIGRAMS, &tokens[i], next);
        if left > 0.0 || right > 0.0 {
            return Hit { len: 2, left, right };
        }
    }

    let left = unigram_weight(LEFT_UNIGRAMS, &tokens[i]);
    let right = unigram_weight(RIGHT_UNIGRAMS, &tokens[i]);
    if left > 0.0 || right > 0.0 {
        Hit { len: 1, left, right }
    } else {
        Hit::default()
    }
}

fn boost_at(tokens: &[String], start: usize, len: usize) -> f64 {
    let mut boost = 1.0;
    if start > 0 && NEGATIVE_INTENSIFIERS.contains(&tokens[start - 1].as_str()) {
        boost *= INTENSIFIER_BOOST;
    }
    if tokens.get(start + len).is_some_and(|t| is_positive_word(t)) {
        boost *= POSITIVE_FOLLOWER_BOOST;
    }
    boost
}

/// Weighted (left, right) policy-language totals for a token stream.
pub fn policy_totals(tokens: &[String]) -> (f64, f64) {
    let mut left_total = 0.0;
    let mut right_total = 0.0;
    let mut i = 0;

    while i < tokens.len() {
        let hit = match_at(tokens, i);
        if hit.len == 0 {
            i += 1;
            continue;
        }
        let boost = boost_at(tokens, i, hit.len);
        left_total += hit.left * boost;
        right_total += hit.right * boost;
        i += hit.len;
    }

    (left_total, right_total)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyFramingSignal;

impl BiasSignal for PolicyFramingSignal {
    fn name(&self) -> &'static str {
        POLICY_FRAMING
    }

    fn compute(&self, ctx: &AnalysisContext, _article: &ArticleInput) -> SignalReading {
        let (left, right) = policy_totals(&ctx.tokens);
        let total = left + right;
        trace!(left, right, "policy framing totals");

        if total < MIN_EVIDENCE {
            return SignalReading::new(0.0, left, right);
        }
        SignalReading::new((right - left) / total, left, right)
    }

    fn explain(&self, reading: &SignalReading) -> String {
        let verdict = if reading.left + reading.right < MIN_EVIDENCE {
            "insufficient policy language"
        } else if reading.left > reading.right {
            "predominantly left-framed language"
        } else if reading.right > reading.left {
            "predominantly right-framed language"
        } else {
            "balanced language"
        };
        format!(
            "Policy framing: left-aligned weight={:.2}, right-aligned weight={:.2} ({verdict})",
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
    use crate::nlp::preprocessor::tokenize;

    fn reading(text: &str) -> SignalReading {
        let ctx = AnalysisContext {
            tokens: tokenize(text),
            ..Default::default()
        };
        PolicyFramingSignal.compute(&ctx, &ArticleInput::default())
    }

    #[test]
    fn left_only_language_is_minus_one() {
        let r = reading("Inequality hurts workers and welfare matters.");
        assert_eq!(r.score, -1.0);
        assert!((r.left - 2.5).abs() < 1e-12);
        assert_eq!(r.right, 0.0);
    }

    #[test]
    fn bigram_consumes_both_tokens() {
        let r = reading("a free market");
        assert!((r.right - 1.5).abs() < 1e-12);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.score, 1.0);

        let r = reading("climate action now");
        assert!((r.left - 1.5).abs() < 1e-12);
    }

    #[test]
    fn shared_term_counts_on_both_sides() {
        let r = reading("taxes");
        assert!((r.left - 0.3).abs() < 1e-12);
        assert!((r.right - 0.3).abs() < 1e-12);
        assert_eq!(r.score, 0.0);
        assert!(PolicyFramingSignal.explain(&r).contains("balanced"));
    }

    #[test]
    fn intensifier_boosts_following_match() {
        let r = reading("a radical progressive agenda");
        assert!((r.left - 1.5).abs() < 1e-12);
    }

    #[test]
    fn positive_follower_boosts_match() {
        let r = reading("tax cuts good for everyone");
        assert!((r.right - 1.5).abs() < 1e-12);
    }

    #[test]
    fn both_boosts_multiply() {
        let r = reading("reckless deregulation great");
        assert!((r.right - 1.0 * 1.5 * 1.25).abs() < 1e-12);
    }

    #[test]
    fn no_policy_language_abstains() {
        let r = reading("The weather was mild on Sunday.");
        assert_eq!(r.score, 0.0);
        assert!(PolicyFramingSignal.explain(&r).contains("insufficient"));
    }

    #[test]
    fn mixed_language_ratio() {
        // left: inequality 1.0 ; right: liberty 0.8 + fiscal 0.6
        let r = reading("inequality liberty fiscal");
        let expected = (1.4 - 1.0) / 2.4;
        assert!((r.score - expected).abs() < 1e-12);
    }
}
