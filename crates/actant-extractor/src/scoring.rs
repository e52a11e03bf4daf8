//! Role scoring
//!
//! A [`RoleScorer`] turns the observable context of one entity/action pair
//! into a score per actant role. Scorers are pure: the same context always
//! yields the same scores, which is what keeps assignment deterministic.

use actant_domain::{ActantRole, EntityType};

/// Where the entity sits relative to the action phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Entity ends before the phrase starts
    Before,
    /// Entity starts after the phrase ends
    After,
    /// Entity overlaps the phrase
    Inside,
}

/// A cue found right before the entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueMatch {
    /// Role the cue signals
    pub role: ActantRole,
    /// Cue strength in (0, 1]
    pub strength: f64,
}

/// Everything a scorer may look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContext {
    /// Type of the entity
    pub entity_type: EntityType,
    /// Position relative to the action phrase
    pub position: Position,
    /// Bytes between entity and phrase (0 when inside)
    pub distance: usize,
    /// Configured proximity window
    pub window: usize,
    /// Entity and action head share a sentence
    pub same_sentence: bool,
    /// Cue preceding the entity, if any
    pub cue: Option<CueMatch>,
}

/// Score per role, indexed by [`ActantRole::index`]
pub type RoleScores = [f64; 6];

/// Pluggable role scoring function
pub trait RoleScorer: Send + Sync {
    /// Score every role for one pair; each score must lie in `[0, 1]`
    fn score(&self, context: &PairContext) -> RoleScores;
}

/// How well an entity type fits a role
pub fn affinity(role: ActantRole, entity_type: EntityType) -> f64 {
    use ActantRole::*;
    use EntityType::*;

    match (role, entity_type) {
        (Subject, Project) => 0.5,
        (Subject, _) => 1.0,
        (Object, Project) => 1.0,
        (Object, Person) => 0.5,
        (Object, _) => 0.6,
        (Sender, Person) => 0.9,
        (Sender, Project) => 0.3,
        (Sender, _) => 1.0,
        (Receiver, Country) => 1.0,
        (Receiver, Project) => 0.6,
        (Receiver, _) => 0.9,
        (Helper, Person) => 0.9,
        (Helper, Project) => 0.5,
        (Helper, _) => 1.0,
        (Opponent, Project) => 0.5,
        (Opponent, _) => 1.0,
    }
}

/// 1.0 when adjacent, falling linearly to 0.5 at the window edge
pub fn proximity_factor(distance: usize, window: usize) -> f64 {
    let ratio = distance as f64 / (window as f64 + 1.0);
    0.5 + 0.5 * (1.0 - ratio.min(1.0))
}

/// Best role, its score, and whether another role tied with it
///
/// Ties resolve to the role declared first in [`ActantRole::ALL`].
pub fn best_role(scores: &RoleScores) -> (ActantRole, f64, bool) {
    const EPSILON: f64 = 1e-9;

    let mut best = ActantRole::ALL[0];
    let mut best_score = scores[0];
    for role in ActantRole::ALL.iter().skip(1) {
        if scores[role.index()] > best_score + EPSILON {
            best = *role;
            best_score = scores[role.index()];
        }
    }

    let tied = best_score > 0.0
        && ActantRole::ALL
            .iter()
            .filter(|r| (scores[r.index()] - best_score).abs() <= EPSILON)
            .count()
            > 1;

    (best, best_score, tied)
}

/// Positional weights plus cue evidence, scaled by proximity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScorer {
    /// Base weight for an entity before the action
    pub subject_weight: f64,
    /// Base weight for an entity after the action
    pub object_weight: f64,
    /// Extra factor on the object weight for entities inside the phrase
    pub inside_factor: f64,
    /// Multiplier when entity and action are in different sentences
    pub cross_sentence_penalty: f64,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self {
            subject_weight: 0.8,
            object_weight: 0.7,
            inside_factor: 0.8,
            cross_sentence_penalty: 0.5,
        }
    }
}

impl WeightedScorer {
    /// Default weights with a custom cross-sentence penalty
    pub fn with_penalty(cross_sentence_penalty: f64) -> Self {
        Self {
            cross_sentence_penalty,
            ..Self::default()
        }
    }
}

impl RoleScorer for WeightedScorer {
    fn score(&self, context: &PairContext) -> RoleScores {
        let factor = proximity_factor(context.distance, context.window);
        let entity_type = context.entity_type;
        let mut scores = [0.0; 6];

        let (positional_role, weight) = match context.position {
            Position::Before => (ActantRole::Subject, self.subject_weight),
            Position::After => (ActantRole::Object, self.object_weight),
            Position::Inside => (ActantRole::Object, self.object_weight * self.inside_factor),
        };
        scores[positional_role.index()] = weight * affinity(positional_role, entity_type) * factor;

        if let Some(cue) = context.cue {
            let cue_score = cue.strength * affinity(cue.role, entity_type) * factor;
            let slot = &mut scores[cue.role.index()];
            *slot = slot.max(cue_score);
        }

        if !context.same_sentence {
            for score in scores.iter_mut() {
                *score *= self.cross_sentence_penalty;
            }
        }

        for score in scores.iter_mut() {
            *score = score.clamp(0.0, 1.0);
        }
        scores
    }
}
