// =============================================================================
// NLP Module
// =============================================================================
//
// Turns raw article text into a reusable analysis context:
// - Tokenization and sentence splitting
// - Keyword-spotting entity extraction against a fixed lexicon
// - Per-entity sentiment and emotion from fixed word lists
//
// The lexicons are hand-authored stand-ins for trained components.

pub mod context;
pub mod lexicon;
pub mod preprocessor;

pub use context::AnalysisContext;
pub use preprocessor::Preprocessor;
