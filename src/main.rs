// =============================================================================
// Bias Lens — demo driver
// =============================================================================
//
// Usage: bias-lens [articles.json]
//
// Analyzes a JSON array of articles (or a few built-in samples) on a shared
// aggregator and prints one analysis record per article as pretty JSON.
//
// Environment:
//   BIAS_LENS_CONFIG   analyzer config path (default: bias_lens.json)
//   RUST_LOG           tracing filter (default: info)
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use bias_lens::{AnalysisRecord, AnalyzerConfig, ArticleInput, BiasAggregator};

const DEFAULT_CONFIG_PATH: &str = "bias_lens.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path =
        std::env::var("BIAS_LENS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AnalyzerConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalyzerConfig::default()
    });

    // ── 2. Aggregator ────────────────────────────────────────────────────
    let aggregator = match BiasAggregator::from_config(&config) {
        Ok(agg) => agg,
        Err(e) => {
            warn!(error = %e, "Failed to load outlet table, using seeded outlets");
            let seeded_only = AnalyzerConfig {
                outlets_path: None,
                ..config.clone()
            };
            BiasAggregator::from_config(&seeded_only)?
        }
    };
    let aggregator = Arc::new(aggregator);
    info!(signals = ?aggregator.signal_names(), "aggregator ready");
    for (name, weight) in aggregator.weights().iter() {
        debug!(signal = name, weight, "signal weight");
    }

    // ── 3. Articles ──────────────────────────────────────────────────────
    let articles = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read articles from {path}"))?;
            serde_json::from_str::<Vec<ArticleInput>>(&content)
                .with_context(|| format!("failed to parse articles from {path}"))?
        }
        None => sample_articles(),
    };
    info!(count = articles.len(), "analyzing articles");

    // ── 4. Analyze concurrently ──────────────────────────────────────────
    let handles: Vec<_> = articles
        .into_iter()
        .map(|article| {
            let agg = Arc::clone(&aggregator);
            tokio::task::spawn_blocking(move || {
                let result = agg.analyze(&article);
                AnalysisRecord::new(&article, result)
            })
        })
        .collect();

    let mut records = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(record) => records.push(record),
            Err(e) => error!(error = %e, "analysis task failed"),
        }
    }

    for record in &records {
        info!(
            domain = %record.domain,
            label = %record.result.label,
            score = record.result.score,
            confidence = record.result.confidence,
            "analysis complete"
        );
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&records).context("failed to serialise records")?
    );
    Ok(())
}

fn sample_articles() -> Vec<ArticleInput> {
    vec![
        ArticleInput::new(
            "Climate Action Bill Clears Senate With Broad Democratic Backing",
            "After weeks of debate the Senate passed a sweeping climate action bill with strong \
             support from Democratic lawmakers. The progressive package targets income inequality \
             and environmental justice by funding renewable energy and worker protection programs. \
             Republicans warned of government overreach and the cost to business. Supporters said \
             the reform protects workers rights and community welfare while tightening pollution \
             regulation. Advocates called it a victory for social justice, equality and the \
             environment, and promised further change on universal healthcare and a living wage. \
             Critics argued the bill failed to address energy prices, but organizers described the \
             vote as a turning point for collective climate progress across the country this year.",
            "https://msnbc.com/climate-bill",
            "msnbc.com",
        ),
        ArticleInput::new(
            "Free Market Package Promises Business Growth",
            "The Senate approved a business package that promotes free market entrepreneurship and \
             trims government rules. Conservative lawmakers championed the plan as essential for \
             growth, innovation and fiscal responsibility. The bill removes regulations that limit \
             business freedom and market competition, and includes tax cuts for small firms. \
             Entrepreneurs praised the focus on individual liberty, family values and stability. \
             Democrats raised concerns about worker protections and environmental oversight, calling \
             parts of the plan reckless deregulation. Republican leaders said the approach restores \
             personal freedom and tradition, and predicted strong hiring as companies expand across \
             the region over the next several quarters according to the sponsors of the measure.",
            "https://foxnews.com/business-bill",
            "foxnews.com",
        ),
        ArticleInput::new(
            "Congress Debates Budget",
            "Congress met briefly on Tuesday.",
            "https://apnews.com/congress-budget",
            "apnews.com",
        ),
    ]
}
