// =============================================================================
// Analysis Record — auditable envelope around one article verdict
// =============================================================================
//
// Pairs a `BiasResult` with the article's identifying fields, a unique id
// and a timestamp so batches of verdicts can be logged, stored and diffed.
// =============================================================================

use serde::Serialize;

use crate::types::{ArticleInput, BiasResult};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    /// Unique identifier for this analysis (UUID v4).
    pub id: String,

    pub title: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    pub domain: String,

    /// "ANALYZED" or "REFUSED".
    pub outcome: String,

    pub result: BiasResult,

    /// ISO 8601 timestamp of when the analysis finished.
    pub analyzed_at: String,
}

impl AnalysisRecord {
    pub fn new(article: &ArticleInput, result: BiasResult) -> Self {
        let outcome = if result.is_refusal() {
            "REFUSED"
        } else {
            "ANALYZED"
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: article.title.clone(),
            url: article.url.clone(),
            domain: article.domain.clone(),
            outcome: outcome.to_string(),
            result,
            analyzed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
