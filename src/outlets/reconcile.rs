// =============================================================================
// Outlet Reconciler — merge two third-party outlet-bias datasets
// =============================================================================
//
// Compares the AllSides and MBFC ratings outlet by outlet, classifies how
// well they agree, and produces the merged table the outlet baseline signal
// consumes.
//
// Agreement policy (|allsides - mbfc|):
//   < 0.1           => Agreement     confidence 0.95
//   < 0.3           => SlightDiff    confidence 0.70
//   otherwise       => MajorDiff     confidence 0.30
//   AllSides only   => OnlyAllSides  confidence 0.50
//   MBFC only       => OnlyMbfc      confidence 0.60
//
// Merged score: mean of both ratings when both exist, else the one present.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::outlets::table::{OutletFile, OutletTable};

const AGREEMENT_DIFF: f64 = 0.1;
const SLIGHT_DIFF: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    Agreement,
    SlightDiff,
    MajorDiff,
    #[serde(rename = "only_allsides")]
    OnlyAllSides,
    OnlyMbfc,
}

impl AgreementStatus {
    fn classify(allsides: Option<f64>, mbfc: Option<f64>) -> Self {
        match (allsides, mbfc) {
            (Some(a), Some(m)) => {
                let diff = (a - m).abs();
                if diff < AGREEMENT_DIFF {
                    Self::Agreement
                } else if diff < SLIGHT_DIFF {
                    Self::SlightDiff
                } else {
                    Self::MajorDiff
                }
            }
            (Some(_), None) => Self::OnlyAllSides,
            _ => Self::OnlyMbfc,
        }
    }

    /// How far the merged score for an outlet with this status can be trusted.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Agreement => 0.95,
            Self::SlightDiff => 0.70,
            Self::MajorDiff => 0.30,
            Self::OnlyAllSides => 0.50,
            Self::OnlyMbfc => 0.60,
        }
    }
}

/// Side-by-side comparison for one outlet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationRecord {
    pub outlet: String,
    pub allsides: Option<f64>,
    pub mbfc: Option<f64>,
    /// |allsides - mbfc| when both exist, else 0.
    pub score_diff: f64,
    pub confidence: f64,
    pub status: AgreementStatus,
}

impl ReconciliationRecord {
    fn new(outlet: String, allsides: Option<f64>, mbfc: Option<f64>) -> Self {
        let status = AgreementStatus::classify(allsides, mbfc);
        let score_diff = match (allsides, mbfc) {
            (Some(a), Some(m)) => (a - m).abs(),
            _ => 0.0,
        };
        Self {
            outlet,
            allsides,
            mbfc,
            score_diff,
            confidence: status.confidence(),
            status,
        }
    }

    /// Merged score and the dataset(s) it came from.
    pub fn merged_score(&self) -> (f64, &'static str) {
        match (self.allsides, self.mbfc) {
            (Some(a), Some(m)) => ((a + m) / 2.0, "both"),
            (Some(a), None) => (a, "allsides"),
            (None, Some(m)) => (m, "mbfc"),
            (None, None) => (0.0, "none"),
        }
    }
}

/// Aggregate counts over a reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReconciliationStats {
    pub total_outlets: usize,
    pub in_both: usize,
    pub only_allsides: usize,
    pub only_mbfc: usize,
    pub strong_agreement: usize,
    pub moderate_agreement: usize,
    pub major_disagreement: usize,
}

impl ReconciliationStats {
    /// Percentage of shared outlets whose ratings differ by less than 0.3.
    pub fn agreement_rate_pct(&self) -> f64 {
        if self.in_both == 0 {
            0.0
        } else {
            100.0 * (self.strong_agreement + self.moderate_agreement) as f64 / self.in_both as f64
        }
    }
}

/// One entry of the merged outlet file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedOutlet {
    pub score: f64,
    pub confidence: f64,
    pub source: String,
    pub status: AgreementStatus,
}

#[derive(Debug, Serialize)]
struct MergedFile<'a> {
    outlets: &'a BTreeMap<String, MergedOutlet>,
}

#[derive(Debug, Deserialize)]
struct NameMappingFile {
    name_to_domain: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct OutletReconciler {
    name_to_domain: HashMap<String, String>,
    allsides: HashMap<String, f64>,
    mbfc: HashMap<String, f64>,
    records: Vec<ReconciliationRecord>,
}

impl OutletReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the AllSides outlet-name -> domain mapping. Must run before
    /// `load_allsides` to take effect.
    pub fn load_name_mapping(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read name mapping {}", path.display()))?;
        let file: NameMappingFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse name mapping {}", path.display()))?;
        if file.name_to_domain.is_empty() {
            bail!("name mapping {} is empty", path.display());
        }
        self.name_to_domain = file.name_to_domain;
        info!(path = %path.display(), entries = self.name_to_domain.len(), "name mapping loaded");
        Ok(self.name_to_domain.len())
    }

    /// Load the AllSides dataset, rewriting outlet names to domains.
    pub fn load_allsides(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let scores = read_dataset(path.as_ref())?;
        self.allsides = scores
            .into_iter()
            .map(|(name, score)| {
                let key = self.name_to_domain.get(&name).cloned().unwrap_or(name);
                (key, score)
            })
            .collect();
        Ok(self.allsides.len())
    }

    pub fn load_mbfc(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.mbfc = read_dataset(path.as_ref())?;
        Ok(self.mbfc.len())
    }

    /// Insert ratings directly, bypassing files. AllSides names are mapped
    /// like `load_allsides` does.
    pub fn with_ratings(
        mut self,
        allsides: impl IntoIterator<Item = (String, f64)>,
        mbfc: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        for (name, score) in allsides {
            let key = self.name_to_domain.get(&name).cloned().unwrap_or(name);
            self.allsides.insert(key, score);
        }
        self.mbfc.extend(mbfc);
        self
    }

    /// Compare both datasets. Records are sorted by outlet.
    pub fn reconcile(&mut self) -> &[ReconciliationRecord] {
        let outlets: BTreeSet<&String> = self.allsides.keys().chain(self.mbfc.keys()).collect();

        self.records = outlets
            .into_iter()
            .map(|outlet| {
                ReconciliationRecord::new(
                    outlet.clone(),
                    self.allsides.get(outlet).copied(),
                    self.mbfc.get(outlet).copied(),
                )
            })
            .collect();

        for record in self.records.iter().filter(|r| r.status == AgreementStatus::MajorDiff) {
            debug!(
                outlet = %record.outlet,
                diff = record.score_diff,
                "datasets disagree on outlet"
            );
        }

        &self.records
    }

    pub fn records(&self) -> &[ReconciliationRecord] {
        &self.records
    }

    pub fn statistics(&self) -> ReconciliationStats {
        let mut stats = ReconciliationStats {
            total_outlets: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status {
                AgreementStatus::Agreement => {
                    stats.in_both += 1;
                    stats.strong_agreement += 1;
                }
                AgreementStatus::SlightDiff => {
                    stats.in_both += 1;
                    stats.moderate_agreement += 1;
                }
                AgreementStatus::MajorDiff => {
                    stats.in_both += 1;
                    stats.major_disagreement += 1;
                }
                AgreementStatus::OnlyAllSides => stats.only_allsides += 1,
                AgreementStatus::OnlyMbfc => stats.only_mbfc += 1,
            }
        }
        stats
    }

    /// Plain-text validation report.
    pub fn render_report(&self) -> String {
        ValidationReport(self).to_string()
    }

    fn with_status(&self, status: AgreementStatus) -> impl Iterator<Item = &ReconciliationRecord> {
        self.records.iter().filter(move |r| r.status == status)
    }

    /// Merged outlet entries keyed by domain.
    pub fn merged_outlets(&self) -> BTreeMap<String, MergedOutlet> {
        self.records
            .iter()
            .map(|r| {
                let (score, source) = r.merged_score();
                (
                    r.outlet.clone(),
                    MergedOutlet {
                        score,
                        confidence: r.confidence,
                        source: source.to_string(),
                        status: r.status,
                    },
                )
            })
            .collect()
    }

    /// The merged scores as a lookup table.
    pub fn merged_table(&self) -> OutletTable {
        let mut table = OutletTable::new();
        for r in &self.records {
            table.insert(r.outlet.clone(), r.merged_score().0);
        }
        table
    }

    /// Write the merged outlet file atomically (tmp + rename).
    pub fn write_merged(&self, path: impl AsRef<Path>) -> Result<()> {
        let merged = self.merged_outlets();
        let content = serde_json::to_string_pretty(&MergedFile { outlets: &merged })
            .context("failed to serialise merged outlets")?;
        write_atomic(path.as_ref(), &content)?;
        info!(path = %path.as_ref().display(), outlets = merged.len(), "merged outlets written");
        Ok(())
    }

    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomic(path.as_ref(), &self.render_report())
    }
}

/// Display adapter that renders the validation report.
struct ValidationReport<'a>(&'a OutletReconciler);

impl fmt::Display for ValidationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reconciler = self.0;
        let stats = reconciler.statistics();

        writeln!(f, "=== Outlet Bias Validation Report ===\n")?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Total unique outlets: {}", stats.total_outlets)?;
        writeln!(f, "  In both datasets: {}", stats.in_both)?;
        writeln!(f, "  Only in AllSides: {}", stats.only_allsides)?;
        writeln!(f, "  Only in MBFC: {}\n", stats.only_mbfc)?;
        writeln!(f, "Agreement Statistics (outlets in both):")?;
        writeln!(f, "  Strong agreement (diff < 0.1): {}", stats.strong_agreement)?;
        writeln!(f, "  Moderate agreement (diff 0.1-0.3): {}", stats.moderate_agreement)?;
        writeln!(f, "  Major disagreement (diff >= 0.3): {}\n", stats.major_disagreement)?;
        writeln!(f, "Overall agreement rate: {:.1}%\n", stats.agreement_rate_pct())?;

        writeln!(f, "=== Major Disagreements (diff >= 0.3) ===")?;
        for r in reconciler.with_status(AgreementStatus::MajorDiff) {
            writeln!(
                f,
                "  {}: {:.2} (AllSides) vs {:.2} (MBFC), diff={:.2}",
                r.outlet,
                r.allsides.unwrap_or_default(),
                r.mbfc.unwrap_or_default(),
                r.score_diff
            )?;
        }
        writeln!(f)?;

        writeln!(f, "=== Only in AllSides ===")?;
        for r in reconciler.with_status(AgreementStatus::OnlyAllSides) {
            writeln!(f, "  {}: {:.2}", r.outlet, r.allsides.unwrap_or_default())?;
        }
        writeln!(f)?;

        writeln!(f, "=== Only in MBFC ===")?;
        for r in reconciler.with_status(AgreementStatus::OnlyMbfc) {
            writeln!(f, "  {}: {:.2}", r.outlet, r.mbfc.unwrap_or_default())?;
        }
        Ok(())
    }
}

fn read_dataset(path: &Path) -> Result<HashMap<String, f64>> {
    let scores = OutletFile::read(path)?.into_scores();
    if scores.is_empty() {
        warn!(path = %path.display(), "outlet dataset has no usable entries");
        bail!("outlet dataset {} is empty", path.display());
    }
    info!(path = %path.display(), outlets = scores.len(), "outlet dataset loaded");
    Ok(scores)
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, content)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to rename {} to {}", tmp_path.display(), path.display()))?;
    Ok(())
}
