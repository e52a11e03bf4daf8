//! Gazetteer terms and pattern heuristics for the rule-based recognizer

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::text::term_script;
use actant_domain::{EntityType, Script, Span};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Built-in bilingual gazetteer
const BUILTIN_TERMS: &[(&str, EntityType)] = &[
    // Participating and frequently cited countries
    ("China", EntityType::Country),
    ("Chinese", EntityType::Country),
    ("People's Republic of China", EntityType::Country),
    ("PRC", EntityType::Country),
    ("中国", EntityType::Country),
    ("中华人民共和国", EntityType::Country),
    ("Russia", EntityType::Country),
    ("Russian Federation", EntityType::Country),
    ("俄罗斯", EntityType::Country),
    ("Kazakhstan", EntityType::Country),
    ("哈萨克斯坦", EntityType::Country),
    ("Indonesia", EntityType::Country),
    ("印度尼西亚", EntityType::Country),
    ("印尼", EntityType::Country),
    ("Egypt", EntityType::Country),
    ("埃及", EntityType::Country),
    ("Ethiopia", EntityType::Country),
    ("埃塞俄比亚", EntityType::Country),
    ("Nigeria", EntityType::Country),
    ("尼日利亚", EntityType::Country),
    ("Mongolia", EntityType::Country),
    ("蒙古", EntityType::Country),
    ("Serbia", EntityType::Country),
    ("塞尔维亚", EntityType::Country),
    ("Uzbekistan", EntityType::Country),
    ("乌兹别克斯坦", EntityType::Country),
    ("Morocco", EntityType::Country),
    ("摩洛哥", EntityType::Country),
    ("Tanzania", EntityType::Country),
    ("坦桑尼亚", EntityType::Country),
    ("Uganda", EntityType::Country),
    ("乌干达", EntityType::Country),
    ("South Africa", EntityType::Country),
    ("南非", EntityType::Country),
    ("Kenya", EntityType::Country),
    ("肯尼亚", EntityType::Country),
    ("Nepal", EntityType::Country),
    ("尼泊尔", EntityType::Country),
    ("Greece", EntityType::Country),
    ("希腊", EntityType::Country),
    ("Pakistan", EntityType::Country),
    ("巴基斯坦", EntityType::Country),
    ("Bangladesh", EntityType::Country),
    ("孟加拉国", EntityType::Country),
    ("Myanmar", EntityType::Country),
    ("缅甸", EntityType::Country),
    ("Laos", EntityType::Country),
    ("老挝", EntityType::Country),
    ("Cambodia", EntityType::Country),
    ("柬埔寨", EntityType::Country),
    ("Thailand", EntityType::Country),
    ("泰国", EntityType::Country),
    ("Malaysia", EntityType::Country),
    ("马来西亚", EntityType::Country),
    ("Singapore", EntityType::Country),
    ("新加坡", EntityType::Country),
    ("Philippines", EntityType::Country),
    ("菲律宾", EntityType::Country),
    ("Vietnam", EntityType::Country),
    ("Viet Nam", EntityType::Country),
    ("越南", EntityType::Country),
    ("United States", EntityType::Country),
    ("United States of America", EntityType::Country),
    ("USA", EntityType::Country),
    ("U.S.", EntityType::Country),
    ("美国", EntityType::Country),
    ("United Kingdom", EntityType::Country),
    ("英国", EntityType::Country),
    // Organizations
    ("United Nations", EntityType::Organization),
    ("UN", EntityType::Organization),
    ("联合国", EntityType::Organization),
    ("European Union", EntityType::Organization),
    ("EU", EntityType::Organization),
    ("欧盟", EntityType::Organization),
    ("African Union", EntityType::Organization),
    ("非盟", EntityType::Organization),
    ("ASEAN", EntityType::Organization),
    ("东盟", EntityType::Organization),
    ("World Bank", EntityType::Organization),
    ("世界银行", EntityType::Organization),
    ("IMF", EntityType::Organization),
    ("International Monetary Fund", EntityType::Organization),
    ("国际货币基金组织", EntityType::Organization),
    ("WTO", EntityType::Organization),
    ("World Trade Organization", EntityType::Organization),
    ("世界贸易组织", EntityType::Organization),
    ("UNESCO", EntityType::Organization),
    ("BRICS", EntityType::Organization),
    ("金砖国家", EntityType::Organization),
    ("AIIB", EntityType::Organization),
    ("Asian Infrastructure Investment Bank", EntityType::Organization),
    ("亚投行", EntityType::Organization),
    ("亚洲基础设施投资银行", EntityType::Organization),
    ("Silk Road Fund", EntityType::Organization),
    ("丝路基金", EntityType::Organization),
    ("China Development Bank", EntityType::Organization),
    ("国家开发银行", EntityType::Organization),
    ("Export-Import Bank of China", EntityType::Organization),
    ("中国进出口银行", EntityType::Organization),
    ("Shanghai Cooperation Organisation", EntityType::Organization),
    ("Shanghai Cooperation Organization", EntityType::Organization),
    ("SCO", EntityType::Organization),
    ("上海合作组织", EntityType::Organization),
    ("上合组织", EntityType::Organization),
    // Initiatives and projects
    ("Belt and Road Initiative", EntityType::Project),
    ("Belt and Road", EntityType::Project),
    ("BRI", EntityType::Project),
    ("One Belt One Road", EntityType::Project),
    ("One Belt, One Road", EntityType::Project),
    ("OBOR", EntityType::Project),
    ("一带一路", EntityType::Project),
    ("一带一路倡议", EntityType::Project),
    ("Silk Road Economic Belt", EntityType::Project),
    ("丝绸之路经济带", EntityType::Project),
    ("21st Century Maritime Silk Road", EntityType::Project),
    ("Maritime Silk Road", EntityType::Project),
    ("21世纪海上丝绸之路", EntityType::Project),
    ("China-Pakistan Economic Corridor", EntityType::Project),
    ("CPEC", EntityType::Project),
    ("中巴经济走廊", EntityType::Project),
    ("Mombasa-Nairobi Standard Gauge Railway", EntityType::Project),
    ("蒙内铁路", EntityType::Project),
    ("China-Laos Railway", EntityType::Project),
    ("中老铁路", EntityType::Project),
    ("Piraeus Port", EntityType::Project),
    ("比雷埃夫斯港", EntityType::Project),
    // Leaders named often enough to list
    ("习近平", EntityType::Person),
    ("李克强", EntityType::Person),
    ("王毅", EntityType::Person),
];

/// Fragments that the pattern heuristics produce but that are never entities
const INVALID_FRAGMENTS: &[&str] = &[
    "中", "华", "国", "阿", "尼", "俄", "印", "埃", "蒙", "塞", "乌", "摩", "坦", "乌干",
    "中阿", "中尼", "中俄", "中印", "中埃", "中蒙", "中塞", "中乌", "中摩", "中坦",
    "家", "人", "民", "政", "府", "部", "长", "大", "使", "主", "席",
];

/// Words that open a sentence or phrase but never start a name
const LEADING_FUNCTION_WORDS: &[&str] = &[
    "The", "A", "An", "This", "That", "These", "Those", "Both", "Its", "Their", "Our",
    "In", "On", "At", "By", "With", "For", "From", "And", "As", "Under", "Through",
];

static EN_ORG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z][\w'&-]*\s+){1,4}(?:Ministry|Department|Organization|Organisation|Institution|Bank|Fund|Committee|Commission|Embassy|Council|Corporation|Company|Group|Agency|Authority|University|Forum)\b|\bMinistry\s+of\s+[A-Z][a-z]+(?:\s+(?:and\s+)?[A-Z][a-z]+){0,3}",
    )
    .expect("organization pattern compiles")
});

static EN_PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z][\w'&-]*\s+){1,4}(?:Project|Initiative|Program|Programme|Corridor|Railway|Highway|Expressway|Port|Bridge|Park|Zone|Pipeline|Dam|Airport)\b",
    )
    .expect("project pattern compiles")
});

static EN_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Vice President|President|Vice Premier|Premier|Prime Minister|Foreign Minister|Minister|Ambassador|Chairman|Secretary-General|Secretary General|Secretary|Governor|Mayor|King|Queen|Prince|Sheikh|Mr\.|Mrs\.|Ms\.|Dr\.|H\.E\.)\s+([A-Z][\w'-]+(?:\s+[A-Z][\w'-]+){0,2})",
    )
    .expect("person pattern compiles")
});

static ZH_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([王李张刘陈杨赵黄周吴徐孙胡朱高林何郭马罗梁宋郑谢韩唐冯于董萧程曹袁邓许傅沈曾彭吕苏卢蒋蔡贾丁魏薛叶阎余潘杜戴夏钟汪田任姜范方石姚谭廖邹熊金陆郝孔白崔康毛邱秦江史顾侯邵孟龙万段雷钱汤尹黎易常武乔贺赖龚文习][\p{Han}]{1,2}?)(?:主席|总理|部长|外长|总统|大使|总书记|国务委员)",
    )
    .expect("chinese person pattern compiles")
});

static ZH_ORG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\p{Han}--[与和同及在对的为是了将把被向并也等]]{2,8}?(?:外交部|商务部|委员会|组织|机构|银行|基金|论坛|大使馆|使馆)",
    )
    .expect("chinese organization pattern compiles")
});

static ZH_PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\p{Han}--[与和同及在对的为是了将把被向并也等]]{2,10}?(?:合作项目|项目|倡议|走廊|经济带|铁路|港口|大桥|工业园|电站)",
    )
    .expect("chinese project pattern compiles")
});

/// Where a candidate came from; lower ranks win ties between equal spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum CandidateSource {
    Gazetteer,
    Model,
    Person,
    Pattern,
}

/// A typed span proposed by one of the recognition sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub span: Span,
    pub entity_type: EntityType,
    pub source: CandidateSource,
}

/// One gazetteer term with its compiled matcher
#[derive(Debug, Clone)]
pub struct GazetteerTerm {
    /// Term as listed
    pub term: String,
    /// Type assigned to every match
    pub entity_type: EntityType,
    /// Script of the term
    pub script: Script,
    matcher: Regex,
    probe: String,
    case_sensitive: bool,
}

impl GazetteerTerm {
    fn compile(term: &str, entity_type: EntityType) -> Result<Self, ExtractorError> {
        let script = term_script(term);
        let body = term
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");

        let case_sensitive = script == Script::Han || is_acronym(term);
        let pattern = if script == Script::Han {
            body
        } else {
            let mut pattern = String::new();
            if !case_sensitive {
                pattern.push_str("(?i)");
            }
            if term.chars().next().is_some_and(char::is_alphanumeric) {
                pattern.push_str(r"\b");
            }
            pattern.push_str(&body);
            if term.chars().last().is_some_and(char::is_alphanumeric) {
                pattern.push_str(r"\b");
            }
            pattern
        };

        let first_word = term.split_whitespace().next().unwrap_or(term);
        let probe = if case_sensitive {
            first_word.to_string()
        } else {
            first_word.to_lowercase()
        };

        Ok(Self {
            term: term.trim().to_string(),
            entity_type,
            script,
            matcher: Regex::new(&pattern)?,
            probe,
            case_sensitive,
        })
    }
}

/// Short all-caps terms ("UN", "U.S.") only match in upper case
fn is_acronym(term: &str) -> bool {
    let letters: Vec<char> = term.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty() && letters.len() <= 6 && letters.iter().all(|c| c.is_uppercase())
}

/// Compiled gazetteer
#[derive(Debug, Clone)]
pub struct Gazetteer {
    terms: Vec<GazetteerTerm>,
    scripts: BTreeSet<Script>,
}

impl Gazetteer {
    /// Compile a gazetteer from `(term, type)` pairs, dropping duplicates
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, EntityType)>) -> Result<Self, ExtractorError> {
        let mut seen = BTreeSet::new();
        let mut terms = Vec::new();
        let mut scripts = BTreeSet::new();

        for (term, entity_type) in entries {
            let trimmed = term.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !seen.insert((trimmed.to_lowercase(), entity_type)) {
                continue;
            }
            let compiled = GazetteerTerm::compile(trimmed, entity_type)?;
            scripts.insert(compiled.script);
            terms.push(compiled);
        }

        Ok(Self { terms, scripts })
    }

    /// Built-in terms (when enabled) plus the configured ones
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        let mut entries: Vec<(&str, EntityType)> = Vec::new();
        if config.use_builtin_gazetteer {
            entries.extend(BUILTIN_TERMS.iter().copied());
        }
        for (type_name, list) in &config.gazetteers {
            let entity_type = type_name.parse::<EntityType>().map_err(ExtractorError::Config)?;
            entries.extend(list.iter().map(|term| (term.as_str(), entity_type)));
        }
        Self::new(entries)
    }

    /// Whether any term is written in `script`
    pub fn covers(&self, script: Script) -> bool {
        self.scripts.contains(&script)
    }

    /// Compiled terms
    pub fn terms(&self) -> &[GazetteerTerm] {
        &self.terms
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the gazetteer has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every match of every term, overlapping ones included
    pub(crate) fn find_all(&self, text: &str) -> Vec<Candidate> {
        let lower = text.to_lowercase();
        let mut found = Vec::new();

        for term in &self.terms {
            let haystack = if term.case_sensitive { text } else { lower.as_str() };
            if !haystack.contains(&term.probe) {
                continue;
            }
            for m in term.matcher.find_iter(text) {
                found.push(Candidate {
                    span: Span::new(m.start(), m.end()),
                    entity_type: term.entity_type,
                    source: CandidateSource::Gazetteer,
                });
            }
        }

        found
    }
}

/// Candidates from the capitalization, title and suffix heuristics
pub(crate) fn pattern_candidates(text: &str) -> Vec<Candidate> {
    let mut found = Vec::new();

    for (regex, entity_type) in [
        (&*EN_ORG, EntityType::Organization),
        (&*EN_PROJECT, EntityType::Project),
    ] {
        for m in regex.find_iter(text) {
            if let Some(span) = trim_leading_function_words(text, Span::new(m.start(), m.end())) {
                found.push(Candidate {
                    span,
                    entity_type,
                    source: CandidateSource::Pattern,
                });
            }
        }
    }

    for (regex, entity_type) in [
        (&*ZH_ORG, EntityType::Organization),
        (&*ZH_PROJECT, EntityType::Project),
    ] {
        for m in regex.find_iter(text) {
            found.push(Candidate {
                span: Span::new(m.start(), m.end()),
                entity_type,
                source: CandidateSource::Pattern,
            });
        }
    }

    for regex in [&*EN_PERSON, &*ZH_PERSON] {
        for caps in regex.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                found.push(Candidate {
                    span: Span::new(name.start(), name.end()),
                    entity_type: EntityType::Person,
                    source: CandidateSource::Person,
                });
            }
        }
    }

    found.retain(|c| c.span.slice(text).is_some_and(is_plausible_entity));
    found
}

/// Strip leading "The", "In", ... and require two words to remain
fn trim_leading_function_words(text: &str, span: Span) -> Option<Span> {
    let mut start = span.start;
    loop {
        let rest = text.get(start..span.end)?;
        let word = rest.split_whitespace().next()?;
        if !LEADING_FUNCTION_WORDS.contains(&word) {
            break;
        }
        let skip = rest.find(word)? + word.len();
        start += skip + (rest[skip..].len() - rest[skip..].trim_start().len());
    }

    let trimmed = Span::new(start, span.end);
    let words = trimmed.slice(text)?.split_whitespace().count();
    (words >= 2).then_some(trimmed)
}

/// Length, numeric and fragment filters for heuristic and model output
pub(crate) fn is_plausible_entity(surface: &str) -> bool {
    let surface = surface.trim();
    let han = term_script(surface) == Script::Han;
    let min_chars = if han { 2 } else { 3 };

    if surface.chars().count() < min_chars {
        return false;
    }
    if INVALID_FRAGMENTS.contains(&surface) {
        return false;
    }
    if surface.chars().all(|c| c.is_numeric()) {
        return false;
    }
    surface.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces<'a>(text: &'a str, candidates: &[Candidate]) -> Vec<&'a str> {
        candidates.iter().map(|c| c.span.slice(text).unwrap()).collect()
    }

    #[test]
    fn test_builtin_gazetteer_covers_latin_and_han() {
        let gazetteer = Gazetteer::from_config(&ExtractorConfig::default()).unwrap();
        assert!(gazetteer.covers(Script::Latin));
        assert!(gazetteer.covers(Script::Han));
        assert!(!gazetteer.covers(Script::Cyrillic));
    }

    #[test]
    fn test_case_insensitive_words_and_boundaries() {
        let gazetteer = Gazetteer::new([("Kenya", EntityType::Country)]).unwrap();
        let text = "KENYA and kenya, but not Kenyan";
        let found = gazetteer.find_all(text);
        assert_eq!(surfaces(text, &found), vec!["KENYA", "kenya"]);
    }

    #[test]
    fn test_acronyms_are_case_sensitive() {
        let gazetteer = Gazetteer::new([("US", EntityType::Country)]).unwrap();
        let text = "Let us trade with the US.";
        let found = gazetteer.find_all(text);
        assert_eq!(surfaces(text, &found), vec!["US"]);
    }

    #[test]
    fn test_multiword_terms_tolerate_whitespace_runs() {
        let gazetteer = Gazetteer::new([("Belt and Road", EntityType::Project)]).unwrap();
        let text = "the Belt  and\nRoad";
        assert_eq!(gazetteer.find_all(text).len(), 1);
    }

    #[test]
    fn test_han_terms_match_as_substrings() {
        let gazetteer = Gazetteer::new([("一带一路", EntityType::Project)]).unwrap();
        let text = "共建一带一路倡议";
        assert_eq!(surfaces(text, &gazetteer.find_all(text)), vec!["一带一路"]);
    }

    #[test]
    fn test_invalid_configured_type() {
        let mut config = ExtractorConfig::default();
        config.gazetteers.insert("city".to_string(), vec!["Gwadar".to_string()]);
        assert!(Gazetteer::from_config(&config).is_err());
    }

    #[test]
    fn test_english_patterns() {
        let text = "The Kenya Ports Authority met President William Ruto at the Lamu Port.";
        let found = pattern_candidates(text);
        let names = surfaces(text, &found);
        assert!(names.contains(&"Kenya Ports Authority"));
        assert!(names.contains(&"Lamu Port"));
        assert!(names.contains(&"William Ruto"));
    }

    #[test]
    fn test_leading_function_word_alone_is_dropped() {
        let text = "The Bank said so.";
        assert!(pattern_candidates(text).is_empty());
    }

    #[test]
    fn test_chinese_person_pattern() {
        let text = "习近平主席会见了王毅外长。";
        let found: Vec<_> = pattern_candidates(text)
            .into_iter()
            .filter(|c| c.entity_type == EntityType::Person)
            .collect();
        assert_eq!(surfaces(text, &found), vec!["习近平", "王毅"]);
    }

    #[test]
    fn test_plausibility_filter() {
        assert!(!is_plausible_entity("中"));
        assert!(!is_plausible_entity("中俄"));
        assert!(!is_plausible_entity("EU"));
        assert!(!is_plausible_entity("2023"));
        assert!(is_plausible_entity("希腊"));
        assert!(is_plausible_entity("Lamu Port"));
    }
}
