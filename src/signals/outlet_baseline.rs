// =============================================================================
// Outlet Baseline — publisher reputation lookup
// =============================================================================

use std::sync::Arc;

use crate::nlp::AnalysisContext;
use crate::outlets::OutletTable;
use crate::signals::{BiasSignal, SignalReading, OUTLET_BASELINE};
use crate::types::ArticleInput;

/// Scores an article by its domain's entry in the outlet table. Unknown
/// domains score 0.
pub struct OutletBaselineSignal {
    table: Arc<OutletTable>,
}

impl OutletBaselineSignal {
    pub fn new(table: Arc<OutletTable>) -> Self {
        Self { table }
    }
}

impl Default for OutletBaselineSignal {
    fn default() -> Self {
        Self::new(Arc::new(OutletTable::seeded()))
    }
}

impl BiasSignal for OutletBaselineSignal {
    fn name(&self) -> &'static str {
        OUTLET_BASELINE
    }

    fn compute(&self, _ctx: &AnalysisContext, article: &ArticleInput) -> SignalReading {
        let score = self.table.get(&article.domain);
        SignalReading::new(score, score.min(0.0).abs(), score.max(0.0))
    }

    fn explain(&self, reading: &SignalReading) -> String {
        let score = reading.score;
        let verdict = if score > 0.5 {
            "strong right-leaning outlet"
        } else if score > 0.2 {
            "moderately right-leaning outlet"
        } else if score < -0.5 {
            "strong left-leaning outlet"
        } else if score < -0.2 {
            "moderately left-leaning outlet"
        } else {
            "neutral outlet"
        };
        format!("Outlet baseline bias: {score:.2} ({verdict})")
    }
}
