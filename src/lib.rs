// =============================================================================
// Bias Lens — political-leaning estimator for news articles
// =============================================================================
//
// Pipeline: article -> shared linguistic context -> independent signals ->
// weighted aggregate, confidence and label. Thin input is refused rather
// than scored.
//
//   let aggregator = BiasAggregator::default();
//   let result = aggregator.analyze(&article);
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
pub mod aggregator;
pub mod analysis_record;
pub mod nlp;
pub mod outlets;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use aggregator::{BiasAggregator, RefusalPolicy, REFUSAL_MESSAGE};
pub use analysis_record::AnalysisRecord;
pub use outlets::{OutletReconciler, OutletTable};
pub use runtime_config::AnalyzerConfig;
pub use signals::{BiasSignal, SignalReading, SignalWeights};
pub use types::{ArticleInput, BiasLabel, BiasResult, Ideology};
