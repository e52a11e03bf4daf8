//! Text utilities: language/script detection, sentences and tokens

use actant_domain::{Script, Span};
use unicode_segmentation::UnicodeSegmentation;

/// Han share of alphanumeric characters above which a text counts as Chinese
const HAN_RATIO_THRESHOLD: f64 = 0.3;

/// Detect the language of a text: `zh`, `en`, or `unknown` when it has no
/// alphanumeric characters at all
pub fn detect_language(text: &str) -> String {
    let mut han = 0usize;
    let mut total = 0usize;
    for c in text.chars() {
        if Script::of_char(c) == Some(Script::Han) {
            han += 1;
            total += 1;
        } else if c.is_alphanumeric() {
            total += 1;
        }
    }

    if total == 0 {
        return "unknown".to_string();
    }
    if han as f64 / total as f64 > HAN_RATIO_THRESHOLD {
        "zh".to_string()
    } else {
        "en".to_string()
    }
}

/// Majority script of the alphabetic characters in `text`
pub fn detect_script(text: &str) -> Script {
    let mut counts = [0usize; 5];
    for c in text.chars() {
        if let Some(script) = Script::of_char(c) {
            counts[script as usize] += 1;
        }
    }

    // Han characters carry roughly a word each, Latin letters a fraction of one
    counts[Script::Han as usize] *= 3;

    Script::ALL
        .iter()
        .copied()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(script, _)| script)
        .unwrap_or(Script::Other)
}

/// Script of a gazetteer term or cue phrase (its first alphabetic character)
pub fn term_script(term: &str) -> Script {
    term.chars()
        .find_map(Script::of_char)
        .unwrap_or(Script::Other)
}

/// Sentence spans, trimmed of surrounding whitespace, empty ones dropped
pub fn sentence_spans(text: &str) -> Vec<Span> {
    text.split_sentence_bound_indices()
        .filter_map(|(start, sentence)| {
            let leading = sentence.len() - sentence.trim_start().len();
            let trimmed = sentence.trim();
            if trimmed.is_empty() {
                return None;
            }
            let s = start + leading;
            Some(Span::new(s, s + trimmed.len()))
        })
        .collect()
}

/// Index of the sentence containing `offset` (the last one starting at or before it)
pub fn sentence_index(sentences: &[Span], offset: usize) -> usize {
    match sentences.binary_search_by(|s| s.start.cmp(&offset)) {
        Ok(i) => i,
        Err(0) => 0,
        Err(i) => i - 1,
    }
}

/// A word token with its byte span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text
    pub text: &'a str,
    /// Byte offsets
    pub span: Span,
}

/// Word tokens (UAX #29 word boundaries, alphanumeric pieces only)
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_word_bound_indices()
        .filter(|(_, w)| w.chars().any(char::is_alphanumeric))
        .map(|(start, w)| Token {
            text: w,
            span: Span::new(start, start + w.len()),
        })
        .collect()
}

/// Whether the first character is uppercase
pub fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Largest char boundary `<= index`
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Collapse whitespace runs into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of `span`, collapsed and cut to at most `max_chars` characters
pub fn excerpt(text: &str, span: Span, max_chars: usize) -> String {
    let raw = span.slice(text).unwrap_or_default();
    let collapsed = collapse_whitespace(raw);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    collapsed.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("China and Kenya signed an agreement."), "en");
        assert_eq!(detect_language("中国与肯尼亚签署合作协议。"), "zh");
        assert_eq!(detect_language("一带一路 Belt and Road"), "zh");
        assert_eq!(detect_language("... 2023 ---"), "en");
        assert_eq!(detect_language(" --- "), "unknown");
    }

    #[test]
    fn test_detect_script() {
        assert_eq!(detect_script("Belt and Road"), Script::Latin);
        assert_eq!(detect_script("共建一带一路 BRI"), Script::Han);
        assert_eq!(detect_script("Россия и Китай"), Script::Cyrillic);
        assert_eq!(detect_script("2023"), Script::Other);
    }

    #[test]
    fn test_sentence_spans() {
        let text = "Kenya signed. China agreed!  Egypt?";
        let spans = sentence_spans(text);
        let sentences: Vec<&str> = spans.iter().map(|s| s.slice(text).unwrap()).collect();
        assert_eq!(sentences, vec!["Kenya signed.", "China agreed!", "Egypt?"]);
    }

    #[test]
    fn test_sentence_spans_chinese() {
        let text = "中国和希腊合作。双方签署协议。";
        assert_eq!(sentence_spans(text).len(), 2);
    }

    #[test]
    fn test_sentence_index() {
        let text = "One two. Three four. Five.";
        let spans = sentence_spans(text);
        assert_eq!(sentence_index(&spans, 0), 0);
        assert_eq!(sentence_index(&spans, 10), 1);
        assert_eq!(sentence_index(&spans, text.len() - 1), 2);
    }

    #[test]
    fn test_tokenize_keeps_offsets() {
        let text = "Kenya's railway, built 2017.";
        let tokens = tokenize(text);
        let words: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(words, vec!["Kenya's", "railway", "built", "2017"]);
        for token in tokens {
            assert_eq!(token.span.slice(text), Some(token.text));
        }
    }

    #[test]
    fn test_excerpt_truncates_on_chars() {
        let text = "中国 与  希腊 合作";
        let span = Span::new(0, text.len());
        assert_eq!(excerpt(text, span, 4), "中国 与");
    }

    #[test]
    fn test_floor_char_boundary() {
        let text = "a中";
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(floor_char_boundary(text, 99), text.len());
    }
}
