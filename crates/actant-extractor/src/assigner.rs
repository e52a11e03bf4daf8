//! Actant role assignment

use crate::cues::CueTable;
use crate::scoring::{best_role, CueMatch, PairContext, Position, RoleScorer, WeightedScorer};
use crate::text::{excerpt, floor_char_boundary, sentence_index};
use actant_domain::{ActantRelation, Action, Confidence, DocumentId, Entity, Span};

/// Longest evidence excerpt kept on a relation, in characters
pub const MAX_EVIDENCE_CHARS: usize = 200;

/// How far back (bytes) a cue is looked for when the entity precedes the action
const BEFORE_CUE_LOOKBACK: usize = 60;

/// Relations for one document plus the number of tied pairs
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// One relation per scored (entity, action) pair
    pub relations: Vec<ActantRelation>,
    /// Pairs whose best roles tied
    pub ambiguities: usize,
}

/// Links entities to nearby actions and labels each pair with one role
pub struct RoleAssigner {
    scorer: Box<dyn RoleScorer>,
    cues: CueTable,
    window: usize,
    min_confidence: f64,
}

impl std::fmt::Debug for RoleAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAssigner")
            .field("cues", &self.cues.len())
            .field("window", &self.window)
            .field("min_confidence", &self.min_confidence)
            .finish()
    }
}

impl RoleAssigner {
    /// Create an assigner with the weighted scorer
    pub fn new(cues: CueTable, window: usize, min_confidence: f64, cross_sentence_penalty: f64) -> Self {
        Self {
            scorer: Box::new(WeightedScorer::with_penalty(cross_sentence_penalty)),
            cues,
            window,
            min_confidence,
        }
    }

    /// Replace the scoring function
    pub fn with_scorer(mut self, scorer: impl RoleScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Score every entity within the window of every action
    ///
    /// Each (entity, action) pair is scored once and yields at most one
    /// relation, with the best-scoring role. Pairs below `min_confidence`
    /// are dropped.
    pub fn assign(
        &self,
        document_id: &DocumentId,
        text: &str,
        sentences: &[Span],
        entities: &[Entity],
        actions: &[Action],
    ) -> Assignment {
        let mut assignment = Assignment::default();

        for action in actions {
            let phrase = action.phrase_span;
            let action_sentence = sentence_index(sentences, action.span.start);
            let evidence = sentences
                .get(action_sentence)
                .map(|s| excerpt(text, *s, MAX_EVIDENCE_CHARS))
                .unwrap_or_default();

            for entity in entities {
                let distance = entity.span.gap(&phrase);
                if distance > self.window {
                    continue;
                }

                let position = if entity.span.end <= phrase.start {
                    Position::Before
                } else if entity.span.start >= phrase.end {
                    Position::After
                } else {
                    Position::Inside
                };

                let entity_sentence = sentence_index(sentences, entity.span.start);
                let segment = self.cue_segment(text, sentences, entity_sentence, entity.span, phrase, position);
                let cue = self.cues.find(text, segment, entity.span).map(|c| CueMatch {
                    role: c.role,
                    strength: c.strength,
                });

                let context = PairContext {
                    entity_type: entity.entity_type,
                    position,
                    distance,
                    window: self.window,
                    same_sentence: entity_sentence == action_sentence,
                    cue,
                };
                let scores = self.scorer.score(&context);
                let (role, score, tied) = best_role(&scores);

                if score <= 0.0 || score < self.min_confidence {
                    continue;
                }
                if tied {
                    assignment.ambiguities += 1;
                }

                assignment.relations.push(ActantRelation {
                    entity_id: entity.id,
                    action_id: action.id,
                    role,
                    confidence: Confidence::clamped(score),
                    document_id: document_id.clone(),
                    evidence: evidence.clone(),
                });
            }
        }

        assignment
    }

    /// Text a cue for this entity may come from
    fn cue_segment(
        &self,
        text: &str,
        sentences: &[Span],
        entity_sentence: usize,
        entity: Span,
        phrase: Span,
        position: Position,
    ) -> Span {
        let start = match position {
            Position::After => phrase.end,
            Position::Inside => phrase.start,
            Position::Before => {
                let sentence_start = sentences.get(entity_sentence).map(|s| s.start).unwrap_or(0);
                let lookback = floor_char_boundary(text, entity.start.saturating_sub(BEFORE_CUE_LOOKBACK));
                sentence_start.max(lookback)
            }
        };
        Span::new(start.min(entity.start), entity.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RoleScores;
    use actant_domain::{ActantRole, ActionId, ActionType, EntityId, EntityType};

    fn entity(id: u32, text: &str, surface: &str, entity_type: EntityType) -> Entity {
        let start = text.find(surface).unwrap();
        Entity {
            id: EntityId(id),
            surface_form: surface.to_string(),
            normalized_form: surface.to_string(),
            entity_type,
            span: Span::new(start, start + surface.len()),
            document_id: DocumentId::from("d1"),
        }
    }

    fn action(text: &str, head: &str, phrase: &str) -> Action {
        let p = text.find(phrase).unwrap();
        let h = text.find(head).unwrap();
        Action {
            id: ActionId(0),
            surface_form: head.to_string(),
            lemma: head.to_lowercase(),
            action_type: ActionType::Construction,
            span: Span::new(h, h + head.len()),
            phrase_span: Span::new(p, p + phrase.len()),
            document_id: DocumentId::from("d1"),
        }
    }

    fn roles(assignment: &Assignment) -> Vec<ActantRole> {
        assignment.relations.iter().map(|r| r.role).collect()
    }

    #[test]
    fn test_positions_and_cues() {
        let text = "With the support of the World Bank, Kenya built the Lamu Port for Uganda.";
        let entities = vec![
            entity(0, text, "World Bank", EntityType::Organization),
            entity(1, text, "Kenya", EntityType::Country),
            entity(2, text, "Lamu Port", EntityType::Project),
            entity(3, text, "Uganda", EntityType::Country),
        ];
        let actions = vec![action(text, "built", "built")];
        let sentences = crate::text::sentence_spans(text);

        let assigner = RoleAssigner::new(CueTable::builtin(), 120, 0.05, 0.5);
        let assignment = assigner.assign(&DocumentId::from("d1"), text, &sentences, &entities, &actions);

        assert_eq!(
            roles(&assignment),
            vec![ActantRole::Helper, ActantRole::Subject, ActantRole::Object, ActantRole::Receiver]
        );
        assert!(assignment.relations.iter().all(|r| r.evidence == text));
    }

    #[test]
    fn test_window_excludes_far_entities() {
        let text = format!("Kenya {} built a port.", "and more ".repeat(20));
        let entities = vec![entity(0, &text, "Kenya", EntityType::Country)];
        let actions = vec![action(&text, "built", "built")];
        let sentences = crate::text::sentence_spans(&text);

        let assigner = RoleAssigner::new(CueTable::builtin(), 40, 0.05, 0.5);
        let assignment = assigner.assign(&DocumentId::from("d1"), &text, &sentences, &entities, &actions);
        assert!(assignment.relations.is_empty());
    }

    #[test]
    fn test_cross_sentence_pairs_are_kept_with_lower_confidence() {
        let text = "Greece agreed. Ports were built.";
        let entities = vec![entity(0, text, "Greece", EntityType::Country)];
        let actions = vec![action(text, "built", "built")];
        let sentences = crate::text::sentence_spans(text);

        let assigner = RoleAssigner::new(CueTable::builtin(), 120, 0.05, 0.5);
        let assignment = assigner.assign(&DocumentId::from("d1"), text, &sentences, &entities, &actions);
        assert_eq!(assignment.relations.len(), 1);
        assert!(assignment.relations[0].confidence.value() < 0.5);
    }

    #[test]
    fn test_min_confidence_filters() {
        let text = "Greece agreed. Ports were built.";
        let entities = vec![entity(0, text, "Greece", EntityType::Country)];
        let actions = vec![action(text, "built", "built")];
        let sentences = crate::text::sentence_spans(text);

        let assigner = RoleAssigner::new(CueTable::builtin(), 120, 0.5, 0.5);
        let assignment = assigner.assign(&DocumentId::from("d1"), text, &sentences, &entities, &actions);
        assert!(assignment.relations.is_empty());
    }

    struct FlatScorer;

    impl RoleScorer for FlatScorer {
        fn score(&self, _context: &PairContext) -> RoleScores {
            [0.4, 0.4, 0.1, 0.1, 0.1, 0.1]
        }
    }

    #[test]
    fn test_custom_scorer_and_ambiguity_count() {
        let text = "Kenya built ports.";
        let entities = vec![entity(0, text, "Kenya", EntityType::Country)];
        let actions = vec![action(text, "built", "built")];
        let sentences = crate::text::sentence_spans(text);

        let assigner = RoleAssigner::new(CueTable::builtin(), 120, 0.05, 0.5).with_scorer(FlatScorer);
        let assignment = assigner.assign(&DocumentId::from("d1"), text, &sentences, &entities, &actions);
        assert_eq!(roles(&assignment), vec![ActantRole::Subject]);
        assert_eq!(assignment.ambiguities, 1);
    }
}
