//! Text normalisation and lexicon phrase matching.
//!
//! Matching is exact phrase containment on normalised text: no stemming,
//! no fuzzy matching. Every hit can be shown back to the user as evidence.
//!
//! Lexicons are compiled into an Aho-Corasick automaton once, at taxonomy
//! load, and searched with overlapping iteration so a phrase nested inside a
//! longer one (e.g. "fixed effects" inside "two way fixed effects") is still
//! counted.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::Result;

/// Terms of this many characters or fewer only match on word boundaries.
pub const SHORT_TERM_MAX_CHARS: usize = 3;

/// Lowercase, turn every non-alphanumeric run (hyphens, punctuation,
/// whitespace) into a single space, and trim.
///
/// "Difference-in-Differences" → "difference in differences"
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

/// Count distinct `terms` present in `text`. Both sides are normalised.
///
/// Ad hoc helper for one-off term lists; lexicons go through [`PhraseMatcher`].
pub fn count_term_matches(text: &str, terms: &[&str]) -> usize {
    let text = normalize_text(text);
    let mut seen: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = normalize_text(term);
        if term.is_empty() || seen.contains(&term) {
            continue;
        }
        if contains_term(&text, &term) {
            seen.push(term);
        }
    }
    seen.len()
}

/// Whether normalised `text` contains normalised `term`, honouring the
/// word-boundary rule for short terms.
pub fn contains_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if !is_short_term(term) {
        return text.contains(term);
    }
    contains_words(text, term)
}

/// Whether normalised `term` occurs in `text` as whole words.
pub fn contains_words(text: &str, term: &str) -> bool {
    !term.is_empty()
        && text
            .match_indices(term)
            .any(|(start, _)| at_word_boundary(text, start, start + term.len()))
}

fn is_short_term(term: &str) -> bool {
    term.chars().count() <= SHORT_TERM_MAX_CHARS
}

/// Normalised text only separates tokens with single spaces, so a boundary
/// is the string edge or a space byte.
fn at_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before = start == 0 || bytes[start - 1] == b' ';
    let after = end == bytes.len() || bytes[end] == b' ';
    before && after
}

/// A compiled phrase list.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    terms: Vec<String>,
    short: Vec<bool>,
    automaton: Option<AhoCorasick>,
}

impl PhraseMatcher {
    /// Compile a phrase list. Phrases are normalised and de-duplicated;
    /// empty phrases are dropped.
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = Vec::new();
        for phrase in phrases {
            let term = normalize_text(phrase.as_ref());
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }

        let automaton = if terms.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::Standard)
                    .build(&terms)?,
            )
        };
        let short = terms.iter().map(|t| is_short_term(t)).collect();

        Ok(Self { terms, short, automaton })
    }

    /// An empty matcher that never matches.
    pub fn empty() -> Self {
        Self { terms: Vec::new(), short: Vec::new(), automaton: None }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Indices of the distinct terms found in normalised `text`, in lexicon order.
    pub fn matched_indices(&self, text: &str) -> Vec<usize> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        let mut hit = vec![false; self.terms.len()];
        for mat in automaton.find_overlapping_iter(text) {
            let idx = mat.pattern().as_usize();
            if hit[idx] {
                continue;
            }
            if self.short[idx] && !at_word_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            hit[idx] = true;
        }

        hit.iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(i))
            .collect()
    }

    /// The distinct terms found in normalised `text`, in lexicon order.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        self.matched_indices(text)
            .into_iter()
            .map(|i| self.terms[i].as_str())
            .collect()
    }

    pub fn count(&self, text: &str) -> u32 {
        self.matched_indices(text).len() as u32
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.matched_indices(text).is_empty()
    }
}
