//! Integration tests for actant-pipeline
//!
//! These tests run small corpora end to end: loading, coverage checks,
//! parallel analysis, failure isolation and report output.

use actant_aggregator::read_report;
use actant_domain::{ActionType, Document, EntityType};
use actant_extractor::{DocumentAnalyzer, PairContext, RoleScorer, RoleScores, WeightedScorer};
use actant_pipeline::{Pipeline, PipelineConfig, PipelineError};
use std::fs;

const KENYA_TEXT: &str = "Kenya built the new railway with China. The line links Mombasa and Nairobi.";
const GREECE_TEXT: &str = "Greece expanded trade with China through the port of Piraeus.";

fn config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.pipeline.max_concurrent_documents = 2;
    config.pipeline.min_text_length = 20;
    config
}

fn header(country: &str) -> String {
    format!(
        "title: Statement\ndate: 2024-05-01\nseed_url:\nfinal_url:\ncountry: {}\nlanguage: en\nsource: test\n---\n",
        country
    )
}

/// Panics for person entities, delegates otherwise
struct PanickingScorer(WeightedScorer);

impl RoleScorer for PanickingScorer {
    fn score(&self, context: &PairContext) -> RoleScores {
        if context.entity_type == EntityType::Person {
            panic!("scorer refused a person");
        }
        self.0.score(context)
    }
}

#[tokio::test]
async fn test_run_aggregates_documents() {
    let pipeline = Pipeline::new(config()).unwrap();
    let documents = vec![
        Document::new("k1", KENYA_TEXT).with_country("Kenya").with_language("en"),
        Document::new("g1", GREECE_TEXT).with_country("Greece").with_language("en"),
        Document::new("q1", "Kenya, Greece and the coast of Egypt.").with_country("Egypt").with_language("en"),
    ];

    let outcome = pipeline.run(documents).await.unwrap();

    assert_eq!(outcome.metrics.documents_seen, 3);
    assert_eq!(outcome.metrics.documents_processed, 3);
    assert_eq!(outcome.metrics.documents_without_actions, 1);
    assert_eq!(outcome.metrics.total_failed(), 0);
    assert_eq!(outcome.model.documents_processed(), 3);

    assert_eq!(outcome.model.entity_count(EntityType::Country, "China"), 2);
    assert_eq!(outcome.model.action_count_for("Kenya", ActionType::Construction), 1);
    assert_eq!(outcome.model.action_count_for("Greece", ActionType::Trade), 1);
    assert!(outcome.metrics.relations > 0);
    assert_eq!(outcome.metrics.relations as u64, outcome.model.model().relations_total());
}

#[tokio::test]
async fn test_results_are_identical_across_runs() {
    let pipeline = Pipeline::new(config()).unwrap();
    let documents: Vec<Document> = (0..12)
        .map(|i| {
            let text = if i % 2 == 0 { KENYA_TEXT } else { GREECE_TEXT };
            Document::new(format!("d{}", i), text).with_language("en")
        })
        .collect();

    let first = pipeline.run(documents.clone()).await.unwrap();
    let second = pipeline.run(documents).await.unwrap();

    assert_eq!(first.model, second.model);
}

#[tokio::test]
async fn test_uncovered_language_stops_the_run() {
    let pipeline = Pipeline::new(config()).unwrap();
    let documents = vec![Document::new("r1", "Россия и Китай подписали соглашение.").with_language("ru")];

    let err = pipeline.run(documents).await.unwrap_err();
    assert!(matches!(err, PipelineError::CoverageMissing { ref language } if language == "ru"));
}

#[tokio::test]
async fn test_region_tagged_and_unlisted_latin_languages_run() {
    let pipeline = Pipeline::new(config()).unwrap();
    let documents = vec![
        Document::new("k1", KENYA_TEXT).with_country("Kenya").with_language("en"),
        Document::new("k2", KENYA_TEXT).with_country("Kenya").with_language("en-US"),
        Document::new("k3", KENYA_TEXT).with_country("Kenya").with_language("it"),
        Document::new("k4", KENYA_TEXT).with_country("Kenya").with_language("nl"),
    ];

    let outcome = pipeline.run(documents).await.unwrap();
    assert_eq!(outcome.metrics.documents_processed, 4);
    assert_eq!(outcome.metrics.total_failed(), 0);
    assert_eq!(outcome.model.action_count_for("Kenya", ActionType::Construction), 4);
}

#[tokio::test]
async fn test_recognition_failure_is_skipped_when_not_strict() {
    let mut config = config();
    config.pipeline.strict_coverage = false;
    let pipeline = Pipeline::new(config).unwrap();
    let documents = vec![
        Document::new("r1", "Россия и Китай подписали соглашение о сотрудничестве."),
        Document::new("k1", KENYA_TEXT).with_country("Kenya"),
    ];

    let outcome = pipeline.run(documents).await.unwrap();
    assert_eq!(outcome.metrics.documents_processed, 1);
    assert_eq!(outcome.metrics.failures.get("recognition"), Some(&1));
    assert_eq!(outcome.model.action_count(ActionType::Construction), 1);
}

#[tokio::test]
async fn test_worker_panic_is_isolated() {
    let mut config = config();
    config.extractor.gazetteers.insert("Person".to_string(), vec!["Ruto".to_string()]);
    let analyzer = DocumentAnalyzer::new(config.extractor.clone())
        .unwrap()
        .with_scorer(PanickingScorer(WeightedScorer::default()));
    let pipeline = Pipeline::with_analyzer(config, analyzer);

    let documents = vec![
        Document::new("p1", "Ruto built a bridge in Kisumu.").with_country("Kenya").with_language("en"),
        Document::new("g1", GREECE_TEXT).with_country("Greece").with_language("en"),
    ];

    let outcome = pipeline.run(documents).await.unwrap();
    assert_eq!(outcome.metrics.failures.get("panic"), Some(&1));
    assert_eq!(outcome.metrics.documents_processed, 1);
    assert_eq!(outcome.model.action_count_for("Greece", ActionType::Trade), 1);
    assert_eq!(outcome.model.action_count(ActionType::Construction), 0);
}

#[tokio::test]
async fn test_run_dir_writes_report() {
    let corpus = tempfile::tempdir().unwrap();
    fs::write(
        corpus.path().join("kenya_statehouse_1.txt"),
        format!("{}{}", header("Kenya"), KENYA_TEXT),
    )
    .unwrap();
    fs::write(
        corpus.path().join("greece_mfa_1.txt"),
        format!("{}{}", header(""), GREECE_TEXT),
    )
    .unwrap();
    fs::write(corpus.path().join("greece_mfa_2.txt"), format!("{}short", header(""))).unwrap();

    let out = tempfile::tempdir().unwrap();
    let mut config = config();
    config.output.path = out.path().join("reports").join("actant.json");
    let pipeline = Pipeline::new(config.clone()).unwrap();

    let outcome = pipeline.run_dir(corpus.path()).await.unwrap();
    assert_eq!(outcome.metrics.documents_seen, 3);
    assert_eq!(outcome.metrics.documents_filtered, 1);
    assert_eq!(outcome.metrics.documents_processed, 2);

    let report = pipeline.write_report(&outcome).unwrap();
    let back = read_report(&config.output.path).unwrap();
    assert_eq!(back.run_id, report.run_id);
    assert_eq!(back.metrics.documents_processed, 2);
    assert!(back.action_distribution.by_country.contains_key("Greece"));
    assert!(back.action_distribution.by_country.contains_key("Kenya"));
    assert!(!back.network.edges.is_empty());
}

#[tokio::test]
async fn test_malformed_jsonl_line_is_counted_not_fatal() {
    let corpus = tempfile::tempdir().unwrap();
    let jsonl = format!(
        "{}\n{{\"text\": \n{}\n",
        serde_json::json!({"country": "Kenya", "language": "en", "text": KENYA_TEXT}),
        serde_json::json!({"country": "Greece", "language": "en", "text": GREECE_TEXT}),
    );
    fs::write(corpus.path().join("statements.jsonl"), jsonl).unwrap();

    let pipeline = Pipeline::new(config()).unwrap();
    let outcome = pipeline.run_dir(corpus.path()).await.unwrap();

    assert_eq!(outcome.metrics.documents_seen, 3);
    assert_eq!(outcome.metrics.documents_processed, 2);
    assert_eq!(outcome.metrics.failures.get("corpus"), Some(&1));
    assert_eq!(outcome.model.action_count_for("Greece", ActionType::Trade), 1);
}
