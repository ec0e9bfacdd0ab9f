// =============================================================================
// Analyzer Configuration — signal weights, refusal thresholds, outlet table
// =============================================================================
//
// Every field carries a serde default so a partial (or empty) JSON file
// loads cleanly and adding new fields never breaks older files.
//
// Persistence uses an atomic tmp + rename pattern.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregator::RefusalPolicy;
use crate::signals::SignalWeights;

fn default_min_tokens() -> usize {
    100
}

fn default_min_entities() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Outlet bias file merged over the seeded table. `None` uses the seed
    /// table alone.
    #[serde(default)]
    pub outlets_path: Option<PathBuf>,

    /// Relative signal weights. Renormalized on load.
    #[serde(default)]
    pub weights: SignalWeights,

    /// Articles with fewer tokens are refused.
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,

    /// Articles with fewer detected entities are refused.
    #[serde(default = "default_min_entities")]
    pub min_entities: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            outlets_path: None,
            weights: SignalWeights::default(),
            min_tokens: default_min_tokens(),
            min_entities: default_min_entities(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analyzer config from {}", path.display()))?;

        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analyzer config from {}", path.display()))?;
        config.weights = config.weights.into_normalized();
        if config.weights.is_empty() {
            warn!(path = %path.display(), "no signal weights configured, every score will be 0");
        }

        info!(
            path = %path.display(),
            outlets_path = ?config.outlets_path,
            signals = config.weights.len(),
            min_tokens = config.min_tokens,
            min_entities = config.min_entities,
            "analyzer config loaded"
        );

        Ok(config)
    }

    /// Persist to `path` with an atomic write (write `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise analyzer config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analyzer config saved (atomic)");
        Ok(())
    }

    pub fn refusal(&self) -> RefusalPolicy {
        RefusalPolicy {
            min_tokens: self.min_tokens,
            min_entities: self.min_entities,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{ENTITY_SENTIMENT, OUTLET_BASELINE, SEMANTIC_BIAS};

    #[test]
    fn default_config_has_expected_values() {
        let cfg = AnalyzerConfig::default();
        assert!(cfg.outlets_path.is_none());
        assert_eq!(cfg.min_tokens, 100);
        assert_eq!(cfg.min_entities, 1);
        assert_eq!(cfg.weights, SignalWeights::default());
        assert_eq!(cfg.refusal(), RefusalPolicy::default());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: AnalyzerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AnalyzerConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "min_tokens": 50, "outlets_path": "config/outlets.json" }"#;
        let cfg: AnalyzerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.min_tokens, 50);
        assert_eq!(cfg.min_entities, 1);
        assert_eq!(cfg.outlets_path, Some(PathBuf::from("config/outlets.json")));
        assert!((cfg.weights.get(ENTITY_SENTIMENT) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn load_renormalizes_weights() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut f,
            br#"{ "weights": { "OutletBaseline": 2.0, "SemanticBias": 6.0 } }"#,
        )
        .unwrap();
        let cfg = AnalyzerConfig::load(f.path()).unwrap();
        assert!((cfg.weights.get(OUTLET_BASELINE) - 0.25).abs() < 1e-12);
        assert!((cfg.weights.get(SEMANTIC_BIAS) - 0.75).abs() < 1e-12);
        assert_eq!(cfg.weights.get(ENTITY_SENTIMENT), 0.0);
    }

    #[test]
    fn load_accepts_empty_weight_table() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, br#"{ "weights": {} }"#).unwrap();
        let cfg = AnalyzerConfig::load(f.path()).unwrap();
        assert!(cfg.weights.is_empty());
        assert_eq!(cfg.weights.total(), 0.0);
    }

    #[test]
    fn load_missing_file_is_error() {
        assert!(AnalyzerConfig::load("/no/such/dir/bias_lens.json").is_err());
    }

    #[test]
    fn save_then_load_preserves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bias_lens.json");
        let mut cfg = AnalyzerConfig::default();
        cfg.min_entities = 3;
        cfg.weights.set(SEMANTIC_BIAS, 0.5);
        cfg.save(&path).unwrap();

        let loaded = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(loaded.min_entities, 3);
        for (name, w) in cfg.weights.iter() {
            assert!((loaded.weights.get(name) - w).abs() < 1e-12);
        }
        assert!(!path.with_extension("json.tmp").exists());
    }
}
