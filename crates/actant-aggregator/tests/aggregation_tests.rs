//! Integration tests for actant-aggregator
//!
//! These tests verify that accumulation is additive and order independent,
//! and that the finalized views report what was applied.

use actant_aggregator::{entity_node_id, action_node_id, AggregatedModel, Aggregator, RunMetrics};
use actant_domain::{
    ActantRelation, ActantRole, Action, ActionId, ActionType, Confidence, DocumentAnalysis, DocumentId, Entity,
    EntityId, EntityType, Span,
};
use proptest::prelude::*;

fn entity(id: u32, doc: &DocumentId, name: &str, entity_type: EntityType) -> Entity {
    Entity {
        id: EntityId(id),
        surface_form: name.to_string(),
        normalized_form: name.to_string(),
        entity_type,
        span: Span::new(id as usize * 20, id as usize * 20 + name.len()),
        document_id: doc.clone(),
    }
}

fn action(id: u32, doc: &DocumentId, lemma: &str, action_type: ActionType) -> Action {
    let start = 500 + id as usize * 20;
    Action {
        id: ActionId(id),
        surface_form: lemma.to_string(),
        lemma: lemma.to_string(),
        action_type,
        span: Span::new(start, start + lemma.len()),
        phrase_span: Span::new(start, start + lemma.len()),
        document_id: doc.clone(),
    }
}

fn relation(entity_id: u32, action_id: u32, doc: &DocumentId, role: ActantRole, confidence: f64) -> ActantRelation {
    ActantRelation {
        entity_id: EntityId(entity_id),
        action_id: ActionId(action_id),
        role,
        confidence: Confidence::new(confidence),
        document_id: doc.clone(),
        evidence: String::new(),
    }
}

fn kenya_financing() -> DocumentAnalysis {
    let doc = DocumentId::from("kenya-1");
    let mut analysis = DocumentAnalysis::empty(doc.clone(), "Kenya", "en");
    analysis.entities = vec![
        entity(0, &doc, "China", EntityType::Country),
        entity(1, &doc, "Kenya", EntityType::Country),
        entity(2, &doc, "Standard Gauge Railway", EntityType::Project),
    ];
    analysis.actions = vec![action(0, &doc, "finance", ActionType::Financing)];
    analysis.relations = vec![
        relation(0, 0, &doc, ActantRole::Subject, 0.8),
        relation(1, 0, &doc, ActantRole::Receiver, 0.6),
        relation(2, 0, &doc, ActantRole::Object, 0.7),
    ];
    analysis
}

fn greece_trade() -> DocumentAnalysis {
    let doc = DocumentId::from("greece-1");
    let mut analysis = DocumentAnalysis::empty(doc.clone(), "Greece", "en");
    analysis.entities = vec![
        entity(0, &doc, "Greece", EntityType::Country),
        entity(1, &doc, "China", EntityType::Country),
    ];
    analysis.actions = vec![action(0, &doc, "trade", ActionType::Trade)];
    analysis.relations = vec![
        relation(0, 0, &doc, ActantRole::Subject, 0.9),
        relation(1, 0, &doc, ActantRole::Helper, 0.5),
    ];
    analysis
}

#[test]
fn test_finalized_views() {
    let mut aggregator = Aggregator::new();
    aggregator.apply(&kenya_financing());
    aggregator.apply(&greece_trade());
    let finalized = aggregator.finalize();

    assert_eq!(finalized.documents_processed(), 2);
    assert_eq!(finalized.entity_count(EntityType::Country, "China"), 2);
    assert_eq!(finalized.entity_frequencies()[0].normalized_form, "China");
    assert_eq!(finalized.entity_frequencies()[0].documents, 2);

    let top = finalized.top_entities(EntityType::Country, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].normalized_form, "China");

    assert_eq!(finalized.action_count(ActionType::Financing), 1);
    assert_eq!(finalized.action_count_for("Greece", ActionType::Trade), 1);
    assert_eq!(finalized.action_count_for("Greece", ActionType::Financing), 0);

    let heatmap = finalized.role_heatmap();
    assert_eq!(heatmap.countries, vec!["Greece".to_string(), "Kenya".to_string()]);
    assert_eq!(heatmap.get("Kenya", ActantRole::Receiver), 1);
    assert_eq!(heatmap.get("Greece", ActantRole::Helper), 1);
    assert_eq!(heatmap.get("Greece", ActantRole::Opponent), 0);

    let matrix = finalized.cooccurrence();
    let financing = matrix.action_types.iter().position(|t| *t == ActionType::Financing).unwrap();
    let country = matrix.entity_types.iter().position(|t| *t == EntityType::Country).unwrap();
    let project = matrix.entity_types.iter().position(|t| *t == EntityType::Project).unwrap();
    assert_eq!(matrix.cells[financing][country], 2);
    assert_eq!(matrix.cells[financing][project], 1);

    let network = finalized.model().network();
    let edge = network
        .edge(
            &entity_node_id(EntityType::Country, "China"),
            &action_node_id(ActionType::Financing),
            ActantRole::Subject,
        )
        .unwrap();
    assert_eq!(edge.weight, 1);
    assert!((edge.confidence - 0.8).abs() < 1e-12);
    assert_eq!(network.node_weight(&entity_node_id(EntityType::Country, "China")), 2);
}

#[test]
fn test_action_free_document_counts_as_processed() {
    let mut aggregator = Aggregator::new();
    let doc = DocumentId::from("quiet");
    let mut quiet = DocumentAnalysis::empty(doc.clone(), "Egypt", "en");
    quiet.entities = vec![entity(0, &doc, "Egypt", EntityType::Country)];

    aggregator.apply(&quiet);
    let finalized = aggregator.finalize();

    assert_eq!(finalized.documents_processed(), 1);
    assert_eq!(finalized.model().documents_without_actions(), 1);
    assert_eq!(finalized.entity_count(EntityType::Country, "Egypt"), 1);
    assert!(finalized.action_distribution().global.is_empty());
    assert!(finalized.role_heatmap().countries.is_empty());
    assert!(finalized.network().edges.is_empty());
}

#[test]
fn test_duplicate_ingestion_double_counts() {
    let mut aggregator = Aggregator::new();
    aggregator.apply(&greece_trade());
    aggregator.apply(&greece_trade());
    let finalized = aggregator.finalize();

    assert_eq!(finalized.documents_processed(), 2);
    assert_eq!(finalized.action_count(ActionType::Trade), 2);
}

#[test]
fn test_report_shape() {
    let mut aggregator = Aggregator::with_sample_limit(2);
    aggregator.apply(&kenya_financing());
    aggregator.apply(&greece_trade());

    let mut metrics = RunMetrics::new();
    metrics.record_processed(3, 1, 3, 0);
    metrics.record_processed(2, 1, 2, 0);

    let report = aggregator.finalize().to_report(metrics, 1);
    assert_eq!(report.relation_samples.len(), 2);
    assert_eq!(report.top_entities["Country"].len(), 1);
    assert_eq!(report.top_entities["Project"][0].normalized_form, "Standard Gauge Railway");
    assert!(!report.top_entities.contains_key("Person"));
    assert_eq!(report.action_distribution.by_country["Kenya"]["Financing"], 1);
    assert_eq!(report.metrics.relations, 5);
    assert!(uuid::Uuid::parse_str(&report.run_id).is_ok());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["role_heatmap"]["roles"][0], "Subject");
    assert!(json["network"]["nodes"][0]["type"].is_string());
}

const COUNTRIES: &[&str] = &["Kenya", "Greece", "Pakistan"];
const NAMES: &[(&str, EntityType)] = &[
    ("China", EntityType::Country),
    ("AIIB", EntityType::Organization),
    ("Gwadar Port", EntityType::Project),
    ("Xi Jinping", EntityType::Person),
];

fn analysis_strategy(index: usize) -> impl Strategy<Value = DocumentAnalysis> {
    (
        prop::sample::select(COUNTRIES),
        prop::collection::vec(prop::sample::select(NAMES), 0..5),
        prop::collection::vec(prop::sample::select(ActionType::ALL.to_vec()), 0..4),
        prop::collection::vec((0usize..5, 0usize..4, prop::sample::select(ActantRole::ALL.to_vec()), 1u32..=10), 0..8),
    )
        .prop_map(move |(country, names, action_types, pairs)| {
            let doc = DocumentId::new(format!("doc-{}", index));
            let mut analysis = DocumentAnalysis::empty(doc.clone(), country, "en");
            analysis.entities = names
                .iter()
                .enumerate()
                .map(|(i, (name, entity_type))| entity(i as u32, &doc, name, *entity_type))
                .collect();
            analysis.actions = action_types
                .iter()
                .enumerate()
                .map(|(i, action_type)| action(i as u32, &doc, "act", *action_type))
                .collect();

            let mut seen = std::collections::BTreeSet::new();
            for (e, a, role, tenths) in pairs {
                if e < analysis.entities.len() && a < analysis.actions.len() && seen.insert((e, a)) {
                    analysis
                        .relations
                        .push(relation(e as u32, a as u32, &doc, role, f64::from(tenths) / 10.0));
                }
            }
            analysis
        })
}

fn assert_same_tables(left: &AggregatedModel, right: &AggregatedModel) -> Result<(), TestCaseError> {
    prop_assert_eq!(left.documents_processed(), right.documents_processed());
    prop_assert_eq!(left.documents_without_actions(), right.documents_without_actions());
    prop_assert_eq!(left.relations_total(), right.relations_total());
    prop_assert_eq!(left.entity_frequency(), right.entity_frequency());
    prop_assert_eq!(left.action_global(), right.action_global());
    prop_assert_eq!(left.action_by_country(), right.action_by_country());
    prop_assert_eq!(left.heatmap(), right.heatmap());
    prop_assert_eq!(left.cooccurrence(), right.cooccurrence());

    let weights = |model: &AggregatedModel| {
        model
            .network()
            .edges()
            .into_iter()
            .map(|e| (e.source_id, e.target_id, e.role, e.weight))
            .collect::<Vec<_>>()
    };
    prop_assert_eq!(weights(left), weights(right));
    prop_assert_eq!(left.network().nodes(), right.network().nodes());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn application_order_does_not_matter(d1 in analysis_strategy(1), d2 in analysis_strategy(2)) {
        let mut forward = Aggregator::new();
        forward.apply(&d1);
        forward.apply(&d2);

        let mut backward = Aggregator::new();
        backward.apply(&d2);
        backward.apply(&d1);

        assert_same_tables(forward.model(), backward.model())?;
    }

    #[test]
    fn merged_partials_match_sequential_application(
        d1 in analysis_strategy(1),
        d2 in analysis_strategy(2),
        d3 in analysis_strategy(3),
    ) {
        let mut sequential = Aggregator::new();
        for doc in [&d1, &d2, &d3] {
            sequential.apply(doc);
        }

        let mut left = AggregatedModel::contribution(&d1, 50);
        left.absorb(AggregatedModel::contribution(&d2, 50), 50);
        let mut reduced = Aggregator::new();
        reduced.absorb(AggregatedModel::contribution(&d3, 50));
        reduced.absorb(left);

        assert_same_tables(sequential.model(), reduced.model())?;
    }
}
