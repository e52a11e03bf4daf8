//! Predicate detection and classification

use crate::lexicon::{lemma_matches, ActionLexicon, GappedPattern};
use crate::text::{is_capitalized, sentence_index, Token};
use actant_domain::{Action, ActionId, ActionType, DocumentId, Span};

/// Frequent reporting and event verbs without a lexicon category
const COMMON_VERBS: &[&str] = &[
    "said", "says", "say", "held", "hold", "holds", "made", "make", "makes", "agreed", "agree",
    "agrees", "announced", "pledged", "promote", "promoted", "promotes", "support", "supported",
    "supports", "oppose", "opposed", "opposes", "help", "helped", "helps", "assisted", "aided",
    "signed", "called", "urged", "welcomed", "expressed", "noted", "stressed", "reiterated",
    "praised", "attended", "opened", "launched", "completed", "provided", "delivered",
    "increased", "improved", "expanded", "deepened", "strengthened", "enhanced", "boosted",
    "resisted", "challenged", "hosted", "joined", "adopted",
];

const MODALS: &[&str] = &["will", "shall", "would", "should", "can", "could", "may", "might", "must"];

/// Words after a modal that are not the predicate itself
const NON_PREDICATES: &[&str] = &[
    "be", "not", "also", "further", "still", "always", "never", "jointly", "continue", "have", "the", "a", "an",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "its", "their", "our", "his", "her",
];

/// `-ed` words that are not past-tense predicates
const ED_EXCLUSIONS: &[&str] = &[
    "need", "needed", "indeed", "speed", "seed", "feed", "united", "based", "related", "limited",
    "hundred", "red", "bed", "shed", "advanced", "detailed", "interested", "concerned",
    "experienced", "skilled", "talented", "sophisticated", "so-called", "renowned", "dedicated",
    "distinguished", "esteemed", "respected",
];

/// A candidate predicate before clustering
#[derive(Debug, Clone)]
struct Predicate {
    head: Span,
    phrase: Span,
    lemma: String,
    action_type: ActionType,
    /// lexicon lemma/keyword 0, pattern 1, generic verb 2
    priority: u8,
}

/// Finds predicate spans and classifies them into the action taxonomy
#[derive(Debug, Clone)]
pub struct ActionExtractor {
    lexicon: ActionLexicon,
}

impl ActionExtractor {
    /// Create an extractor over `lexicon`
    pub fn new(lexicon: ActionLexicon) -> Self {
        Self { lexicon }
    }

    /// The lexicon in use
    pub fn lexicon(&self) -> &ActionLexicon {
        &self.lexicon
    }

    /// Extract actions ordered by span start
    ///
    /// Overlapping candidates (a pattern spanning a lexicon word, a generic
    /// verb inside a pattern) collapse into a single action headed by the
    /// most specific candidate. Unmatched predicates classify as `Other`.
    pub fn extract(&self, document_id: &DocumentId, text: &str, tokens: &[Token<'_>], sentences: &[Span]) -> Vec<Action> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let token_sentence: Vec<usize> = tokens
            .iter()
            .map(|t| sentence_index(sentences, t.span.start))
            .collect();
        let sentence_initial: Vec<bool> = (0..tokens.len())
            .map(|i| i == 0 || token_sentence[i] != token_sentence[i - 1])
            .collect();

        let mut candidates = Vec::new();
        self.lexicon_candidates(tokens, &lowered, &sentence_initial, &mut candidates);
        self.pattern_candidates(text, tokens, &lowered, &token_sentence, sentences, &mut candidates);
        self.keyword_candidates(text, &mut candidates);
        generic_candidates(tokens, &lowered, &token_sentence, &mut candidates);

        cluster(candidates)
            .into_iter()
            .enumerate()
            .filter_map(|(i, (rep, phrase))| {
                let surface = rep.head.slice(text)?;
                Some(Action {
                    id: ActionId(i as u32),
                    surface_form: surface.to_string(),
                    lemma: rep.lemma,
                    action_type: rep.action_type,
                    span: rep.head,
                    phrase_span: phrase,
                    document_id: document_id.clone(),
                })
            })
            .collect()
    }

    fn lexicon_candidates(&self, tokens: &[Token<'_>], lowered: &[String], sentence_initial: &[bool], out: &mut Vec<Predicate>) {
        for (i, token) in tokens.iter().enumerate() {
            if is_proper_noun(token.text, sentence_initial[i]) {
                continue;
            }
            if let Some((lemma, action_type)) = self.lexicon.classify(&lowered[i]) {
                out.push(Predicate {
                    head: token.span,
                    phrase: token.span,
                    lemma: lemma.to_string(),
                    action_type,
                    priority: 0,
                });
            }
        }
    }

    fn pattern_candidates(
        &self,
        text: &str,
        tokens: &[Token<'_>],
        lowered: &[String],
        token_sentence: &[usize],
        sentences: &[Span],
        out: &mut Vec<Predicate>,
    ) {
        for pattern in self.lexicon.patterns() {
            if pattern.han {
                han_pattern_matches(text, sentences, pattern, out);
                continue;
            }
            let Some(first) = pattern.parts.first() else {
                continue;
            };
            for start in 0..tokens.len() {
                if !lemma_matches(&lowered[start], first) {
                    continue;
                }
                let mut last = start;
                let mut matched = true;
                for part in &pattern.parts[1..] {
                    let limit = (last + 1 + pattern.max_gap).min(tokens.len().saturating_sub(1));
                    let next = (last + 1..=limit)
                        .take_while(|&k| token_sentence[k] == token_sentence[start])
                        .find(|&k| lemma_matches(&lowered[k], part));
                    match next {
                        Some(k) => last = k,
                        None => {
                            matched = false;
                            break;
                        }
                    }
                }
                if matched && last > start {
                    out.push(Predicate {
                        head: tokens[start].span,
                        phrase: tokens[start].span.cover(&tokens[last].span),
                        lemma: pattern.key.clone(),
                        action_type: pattern.action_type,
                        priority: 1,
                    });
                }
            }
        }
    }

    fn keyword_candidates(&self, text: &str, out: &mut Vec<Predicate>) {
        for (keyword, action_type) in self.lexicon.keywords() {
            for (start, _) in text.match_indices(keyword) {
                let span = Span::new(start, start + keyword.len());
                out.push(Predicate {
                    head: span,
                    phrase: span,
                    lemma: keyword.to_string(),
                    action_type,
                    priority: 0,
                });
            }
        }
    }
}

/// Han patterns: the next part must follow within `max_gap * 2` characters
/// of the same sentence
fn han_pattern_matches(text: &str, sentences: &[Span], pattern: &GappedPattern, out: &mut Vec<Predicate>) {
    let Some(first) = pattern.parts.first() else {
        return;
    };
    for (start, _) in text.match_indices(first.as_str()) {
        let head = Span::new(start, start + first.len());
        let sentence_end = sentences
            .get(sentence_index(sentences, start))
            .map(|s| s.end)
            .unwrap_or(text.len())
            .max(head.end);

        let mut cursor = head.end;
        let mut matched = true;
        for part in &pattern.parts[1..] {
            let window_end = text[cursor..sentence_end]
                .char_indices()
                .nth(pattern.max_gap * 2 + part.chars().count())
                .map(|(i, _)| cursor + i)
                .unwrap_or(sentence_end);
            match text[cursor..window_end].find(part.as_str()) {
                Some(offset) => cursor += offset + part.len(),
                None => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            out.push(Predicate {
                head,
                phrase: Span::new(start, cursor),
                lemma: pattern.key.clone(),
                action_type: pattern.action_type,
                priority: 1,
            });
        }
    }
}

fn generic_candidates(tokens: &[Token<'_>], lowered: &[String], token_sentence: &[usize], out: &mut Vec<Predicate>) {
    for (i, token) in tokens.iter().enumerate() {
        let word = lowered[i].as_str();
        if !token.text.chars().next().is_some_and(char::is_lowercase) {
            continue;
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
            continue;
        }

        let previous = (i > 0 && token_sentence[i - 1] == token_sentence[i]).then(|| lowered[i - 1].as_str());
        let after_modal = previous.is_some_and(|p| MODALS.contains(&p)) && !NON_PREDICATES.contains(&word);
        let past_tense = word.len() >= 5
            && word.ends_with("ed")
            && !ED_EXCLUSIONS.contains(&word)
            && !previous.is_some_and(|p| DETERMINERS.contains(&p));

        if COMMON_VERBS.contains(&word) || after_modal || past_tense {
            out.push(Predicate {
                head: token.span,
                phrase: token.span,
                lemma: word.to_string(),
                action_type: ActionType::Other,
                priority: 2,
            });
        }
    }
}

/// Capitalized words are names ("Joint Statement", "Trade Minister") unless
/// they open a sentence
fn is_proper_noun(word: &str, sentence_initial: bool) -> bool {
    !sentence_initial && is_capitalized(word)
}

/// Merge overlapping candidates; each cluster yields its most specific
/// candidate and the union of the phrases
fn cluster(mut candidates: Vec<Predicate>) -> Vec<(Predicate, Span)> {
    candidates.sort_by_key(|c| (c.phrase.start, c.phrase.end, c.priority));

    let mut groups: Vec<(Vec<Predicate>, Span)> = Vec::new();
    for candidate in candidates {
        match groups.last_mut() {
            Some((members, cover)) if cover.overlaps(&candidate.phrase) => {
                *cover = cover.cover(&candidate.phrase);
                members.push(candidate);
            }
            _ => {
                let cover = candidate.phrase;
                groups.push((vec![candidate], cover));
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|(members, cover)| {
            members
                .into_iter()
                .min_by_key(|c| (c.priority, c.head.start))
                .map(|rep| (rep, cover))
        })
        .collect()
}
