// =============================================================================
// reconcile-outlets — merge AllSides and MBFC ratings into outlets.json
// =============================================================================
//
// Reads from BIAS_LENS_OUTLET_DIR (default: config):
//   name_to_domain_mapping.json   optional AllSides name -> domain mapping
//   allsides_outlets.json
//   mbfc_outlets.json
// Writes into the same directory:
//   validation_report.txt
//   outlets.json
// =============================================================================

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bias_lens::OutletReconciler;

fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dir = PathBuf::from(
        std::env::var("BIAS_LENS_OUTLET_DIR").unwrap_or_else(|_| "config".to_string()),
    );

    let mut reconciler = OutletReconciler::new();
    if let Err(e) = reconciler.load_name_mapping(dir.join("name_to_domain_mapping.json")) {
        warn!(error = %e, "Failed to load name mapping, AllSides names used as-is");
    }
    reconciler.load_allsides(dir.join("allsides_outlets.json"))?;
    reconciler.load_mbfc(dir.join("mbfc_outlets.json"))?;

    reconciler.reconcile();
    let stats = reconciler.statistics();
    info!(
        total = stats.total_outlets,
        in_both = stats.in_both,
        only_allsides = stats.only_allsides,
        only_mbfc = stats.only_mbfc,
        agreement_rate_pct = stats.agreement_rate_pct(),
        "reconciliation complete"
    );

    let report_path = dir.join("validation_report.txt");
    reconciler.write_report(&report_path)?;
    info!(path = %report_path.display(), "validation report written");

    reconciler.write_merged(dir.join("outlets.json"))?;

    print!("{}", reconciler.render_report());
    Ok(())
}
