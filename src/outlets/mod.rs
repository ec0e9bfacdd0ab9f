// =============================================================================
// Outlets Module — publisher bias tables and dataset reconciliation
// =============================================================================

pub mod reconcile;
pub mod table;

pub use reconcile::{
    AgreementStatus, MergedOutlet, OutletReconciler, ReconciliationRecord, ReconciliationStats,
};
pub use table::OutletTable;
