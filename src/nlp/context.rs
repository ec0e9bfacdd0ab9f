// =============================================================================
// Analysis Context — shared linguistic state for one article
// =============================================================================
//
// Built once per `analyze` call and dropped afterwards. Nothing is cached
// across articles.

use std::collections::HashMap;

use crate::types::{EntityMention, Ideology};

#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    /// Lowercased word tokens of title + body, in order, duplicates kept.
    pub tokens: Vec<String>,
    /// Sentences of the body.
    pub sentences: Vec<String>,
    /// Entities in detection order.
    pub entities: Vec<EntityMention>,
    /// Entity name -> sentiment, filled by the sentiment stage.
    pub sentiment_cache: HashMap<String, f64>,
}

impl AnalysisContext {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn add_entity(&mut self, entity: EntityMention) {
        self.entities.push(entity);
    }

    pub fn cache_sentiment(&mut self, key: impl Into<String>, score: f64) {
        self.sentiment_cache.insert(key.into(), score);
    }

    pub fn cached_sentiment(&self, key: &str) -> Option<f64> {
        self.sentiment_cache.get(key).copied()
    }

    /// Entities carrying the given ideology tag.
    pub fn entities_with(&self, ideology: Ideology) -> impl Iterator<Item = &EntityMention> {
        self.entities.iter().filter(move |e| e.ideology == ideology)
    }
}
