//! Meta-characteristics: what kind of paper this is, independent of topic.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use paperscope_common::text::contains_term;

pub const SYNTHESIS_METHODS: &[&str] = &["meta_analysis", "systematic_review", "literature_review"];
pub const THEORY_METHODS: &[&str] = &["game_theory", "formal_modeling"];
pub const QUALITATIVE_METHODS: &[&str] = &[
    "qualitative_methods",
    "interviews",
    "ethnography",
    "case_study",
    "process_tracing",
    "qualitative_content",
    "focus_groups",
];

const EVIDENTIARY_TERMS: &[&str] = &["empirical", "evidence", "we find", "findings", "data from"];

static FORMAL_RESULT_RE: OnceLock<Regex> = OnceLock::new();
static PROVE_RE: OnceLock<Regex> = OnceLock::new();

fn formal_result_re() -> &'static Regex {
    FORMAL_RESULT_RE.get_or_init(|| {
        Regex::new(r"\b(?:theorem|theorems|lemma|lemmas|corollary|proposition \d+)\b")
            .expect("Invalid formal result regex")
    })
}

fn prove_re() -> &'static Regex {
    PROVE_RE.get_or_init(|| Regex::new(r"\bprove[sdn]?\b").expect("Invalid prove regex"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFlags {
    pub is_empirical: bool,
    pub is_theoretical: bool,
    pub is_review: bool,
    pub is_quantitative: bool,
    pub is_qualitative: bool,
}

impl MetaFlags {
    /// Classify from normalised title + abstract and the detected method ids.
    pub fn classify<'a>(text: &str, method_ids: impl IntoIterator<Item = &'a str> + Clone) -> Self {
        let has_any = |ids: &[&str]| method_ids.clone().into_iter().any(|m| ids.iter().any(|id| *id == m));
        let has = |term: &str| contains_term(text, term);

        let is_review = has_any(SYNTHESIS_METHODS) || (has("review") && (has("literature") || has("systematic")));

        let is_theoretical = has_any(THEORY_METHODS)
            || formal_result_re().is_match(text)
            || (has("model") && prove_re().is_match(text));

        let is_qualitative = has_any(QUALITATIVE_METHODS);

        let estimates = has("regression") || has("estimate") || has("estimation");
        let is_quantitative = (estimates || (has("data") && has("sample"))) && !is_qualitative && !is_theoretical;

        let evidentiary = EVIDENTIARY_TERMS.iter().any(|&t| has(t));
        let is_empirical = (is_quantitative || is_qualitative || evidentiary) && !is_review && !is_theoretical;

        Self { is_empirical, is_theoretical, is_review, is_quantitative, is_qualitative }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperscope_common::normalize_text;

    fn classify(text: &str, methods: &[&str]) -> MetaFlags {
        MetaFlags::classify(&normalize_text(text), methods.iter().copied())
    }

    #[test]
    fn test_quantitative_empirical() {
        let flags = classify("We estimate the effect using panel data and find large effects.", &[]);
        assert!(flags.is_quantitative);
        assert!(flags.is_empirical);
        assert!(!flags.is_theoretical);
    }

    #[test]
    fn test_theory_from_propositions() {
        let flags = classify("Proposition 2 shows that turnout falls; we estimate nothing.", &[]);
        assert!(flags.is_theoretical);
        assert!(!flags.is_quantitative);
        assert!(!flags.is_empirical);

        let flags = classify("We build a model and prove that equilibria are unique.", &[]);
        assert!(flags.is_theoretical);

        // "improve" is not "prove"
        let flags = classify("A model to improve forecasts.", &[]);
        assert!(!flags.is_theoretical);
    }

    #[test]
    fn test_review_blocks_empirical() {
        let flags = classify("We review the literature and summarize the evidence.", &[]);
        assert!(flags.is_review);
        assert!(!flags.is_empirical);

        let flags = classify("Pooled results.", &["meta_analysis"]);
        assert!(flags.is_review);
    }

    #[test]
    fn test_qualitative_excludes_quantitative() {
        let flags = classify("We draw on data from a sample of 40 interviews.", &["interviews"]);
        assert!(flags.is_qualitative);
        assert!(!flags.is_quantitative);
        assert!(flags.is_empirical);
    }

    #[test]
    fn test_plain_essay_has_no_flags() {
        assert_eq!(classify("Thoughts on the discipline.", &[]), MetaFlags::default());
    }
}
