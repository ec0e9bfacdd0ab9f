// =============================================================================
// Preprocessor — raw article to AnalysisContext
// =============================================================================
//
// Pipeline:
//   1. Tokenize title + body (whitespace split, edge punctuation stripped,
//      lowercased)
//   2. Split the body into sentences
//   3. Spot entities by substring search against the entity lexicon
//   4. Sentiment per entity: mean weight of sentiment-lexicon tokens
//   5. Emotion per entity: 0.3 per charged token, capped at 1.0
//
// Sentence splitting is an approximation: abbreviations and decimals can
// split mid-sentence. Sentiment and emotion are computed over the whole
// document, so every entity in an article gets the same values.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::nlp::context::AnalysisContext;
use crate::nlp::lexicon::{
    is_emotional_word, sentiment_weight, EMOTION_CEILING, EMOTION_INCREMENT, ENTITY_LEXICON,
};
use crate::types::{ArticleInput, EntityMention};

static SENTENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

/// Stateless context builder. `process` is a pure function of the article.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, article: &ArticleInput) -> AnalysisContext {
        let full_text = article.full_text();

        let mut ctx = AnalysisContext {
            tokens: tokenize(&full_text),
            sentences: split_sentences(&article.body),
            ..Default::default()
        };

        extract_entities(&mut ctx, &full_text);
        compute_sentiment(&mut ctx);
        compute_emotion(&mut ctx);

        trace!(
            tokens = ctx.token_count(),
            sentences = ctx.sentence_count(),
            entities = ctx.entity_count(),
            "context built"
        );

        ctx
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One mention per lexicon entry found anywhere in the text.
fn extract_entities(ctx: &mut AnalysisContext, full_text: &str) {
    let haystack = full_text.to_lowercase();
    for (surface, ideology) in ENTITY_LEXICON {
        if haystack.contains(surface) {
            ctx.add_entity(EntityMention::new(*surface, *ideology));
        }
    }
}

/// Mean signed weight of sentiment words in the token stream, if any occur.
fn document_sentiment(tokens: &[String]) -> Option<f64> {
    let (total, count) = tokens
        .iter()
        .filter_map(|t| sentiment_weight(t))
        .fold((0.0_f64, 0usize), |(sum, n), w| (sum + w, n + 1));

    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

fn compute_sentiment(ctx: &mut AnalysisContext) {
    for i in 0..ctx.entities.len() {
        let name = ctx.entities[i].name.clone();
        let sentiment = match ctx.cached_sentiment(&name) {
            Some(cached) => cached,
            None => {
                let computed = document_sentiment(&ctx.tokens).unwrap_or(0.0);
                ctx.cache_sentiment(name, computed);
                computed
            }
        };
        ctx.entities[i].sentiment = sentiment;
    }
}

fn compute_emotion(ctx: &mut AnalysisContext) {
    let charged = ctx.tokens.iter().filter(|t| is_emotional_word(t)).count();
    let emotion = (charged as f64 * EMOTION_INCREMENT).min(EMOTION_CEILING);
    for entity in &mut ctx.entities {
        entity.emotion = emotion;
    }
}
