// End-to-end scenarios through the public aggregator API.

use std::sync::Arc;

use bias_lens::signals::semantic_bias::{cosine_similarity, LEFT_POLE};
use bias_lens::signals::{ENTITY_SENTIMENT, OUTLET_BASELINE};
use bias_lens::{ArticleInput, BiasAggregator, BiasLabel, OutletTable, REFUSAL_MESSAGE};

/// Sixteen tokens free of every lexicon term.
const FILLER: &str =
    "The officials spoke with local residents about the schedule for the coming week near the river. ";

fn padded(lead: &str, repeats: usize) -> String {
    format!("{lead} {}", FILLER.repeat(repeats))
}

fn word_article(lead: &str, filler_words: usize) -> ArticleInput {
    let body = format!("{lead} {}", "residents ".repeat(filler_words));
    ArticleInput::new("", body, "", "")
}

#[test]
fn right_outlet_with_criticised_right_entities_scores_right() {
    let article = ArticleInput::new(
        "Trump meets Republicans",
        padded("Critics called the plan corrupt and said it failed.", 7),
        "https://foxnews.com/story",
        "foxnews.com",
    );
    let r = BiasAggregator::default().analyze(&article);

    assert!(!r.is_refusal());
    // outlet 0.7 * 0.15 + entity sentiment 0.6 * 0.30
    assert!((r.score - 0.285).abs() < 1e-9, "score {}", r.score);
    assert_eq!(r.label, BiasLabel::SlightRight);
    assert!(r.label.is_right());
    assert_eq!(r.explanations.len(), 5);
    assert!(r.confidence > 0.0 && r.confidence <= 1.0);
}

#[test]
fn left_outlet_with_criticised_left_entities_scores_left() {
    let article = ArticleInput::new(
        "Pelosi and Schumer respond",
        padded("Observers called the effort corrupt and said it failed.", 7),
        "",
        "msnbc.com",
    );
    let r = BiasAggregator::default().analyze(&article);
    assert!((r.score + 0.27).abs() < 1e-9, "score {}", r.score);
    assert_eq!(r.label, BiasLabel::SlightLeft);
}

#[test]
fn unknown_domain_contributes_nothing() {
    let article = ArticleInput::new(
        "Trump meets Republicans",
        padded("Critics called the plan corrupt and said it failed.", 7),
        "",
        "unknown-outlet.example",
    );
    let r = BiasAggregator::default().analyze(&article);
    let outlet = r
        .contributions
        .iter()
        .find(|c| c.name == OUTLET_BASELINE)
        .unwrap();
    assert_eq!(outlet.score, 0.0);
    assert!((r.score - 0.18).abs() < 1e-9);
}

#[test]
fn refusal_boundary_is_one_hundred_tokens() {
    let agg = BiasAggregator::default();

    let r = agg.analyze(&word_article("Trump", 98));
    assert!(r.is_refusal());
    assert_eq!(r.score, 0.0);
    assert_eq!(r.confidence, 0.0);
    assert_eq!(r.label, BiasLabel::InsufficientData);
    assert_eq!(r.explanations, vec![REFUSAL_MESSAGE.to_string()]);

    let r = agg.analyze(&word_article("Trump", 99));
    assert!(!r.is_refusal());
}

#[test]
fn empty_article_is_refused_not_an_error() {
    let r = BiasAggregator::default().analyze(&ArticleInput::default());
    assert!(r.is_refusal());
}

#[test]
fn set_weight_renormalizes_and_reweights_results() {
    let agg = BiasAggregator::default();
    let article = ArticleInput::new(
        "Trump meets Republicans",
        padded("Critics called the plan corrupt and said it failed.", 7),
        "",
        "foxnews.com",
    );

    agg.set_weight(ENTITY_SENTIMENT, 0.0);
    let w = agg.weights();
    assert!((w.total() - 1.0).abs() < 1e-12);
    assert!((w.get(OUTLET_BASELINE) - 0.15 / 0.70).abs() < 1e-12);

    let r = agg.analyze(&article);
    // only the outlet signal is non-zero
    assert!((r.score - 0.7 * 0.15 / 0.70).abs() < 1e-9);
}

#[test]
fn scores_and_confidence_stay_bounded_across_inputs() {
    let agg = BiasAggregator::default();
    let bodies = [
        "Radical progressive climate action and social justice for workers rights. \
         Outraged, furious, shocking, devastating. Biden and Harris praised it as great.",
        "Reckless deregulation, free market, tax cuts and small government. \
         Trump and DeSantis were called terrible and corrupt by angry critics.",
        "Congress and the Senate held hearings on the bill in the House.",
    ];
    for body in bodies {
        for domain in ["foxnews.com", "msnbc.com", "reuters.com", ""] {
            let article = ArticleInput::new("Report", padded(body, 6), "", domain);
            let r = agg.analyze(&article);
            assert!(!r.is_refusal());
            assert!((-1.0..=1.0).contains(&r.score));
            assert!((0.0..=1.0).contains(&r.confidence));
            assert_eq!(r.label, BiasLabel::from_score(r.score));
        }
    }
}

#[test]
fn zero_vector_semantic_similarity_is_zero() {
    assert_eq!(cosine_similarity(&[0.0; 4], &LEFT_POLE), 0.0);
}

#[test]
fn shared_aggregator_across_threads() {
    let mut outlets = OutletTable::seeded();
    outlets.insert("local.news", -0.4);
    let agg = Arc::new(BiasAggregator::new(outlets));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let agg = Arc::clone(&agg);
            std::thread::spawn(move || {
                let domain = if i % 2 == 0 { "local.news" } else { "foxnews.com" };
                let article = ArticleInput::new(
                    "Trump meets Republicans",
                    padded("Critics called the plan corrupt and said it failed.", 7),
                    "",
                    domain,
                );
                agg.analyze(&article).score
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        let score = h.join().unwrap();
        let expected = if i % 2 == 0 { -0.4 * 0.15 + 0.18 } else { 0.285 };
        assert!((score - expected).abs() < 1e-9);
    }
}
