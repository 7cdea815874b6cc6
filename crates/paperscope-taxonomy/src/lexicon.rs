//! Compiled signal lexicons.

use paperscope_common::text::contains_term;
use paperscope_common::{normalize_text, PhraseMatcher, SignalCounts};

use crate::node::SignalLexicon;

#[derive(Debug, Clone)]
struct CompiledContextual {
    term: String,
    requires: PhraseMatcher,
}

/// A [`SignalLexicon`] with every tier compiled to a [`PhraseMatcher`].
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    pub strong: PhraseMatcher,
    pub moderate: PhraseMatcher,
    pub weak: PhraseMatcher,
    pub negative: PhraseMatcher,
    contextual: Vec<CompiledContextual>,
}

/// Tier counts plus the phrases that produced them.
#[derive(Debug, Clone, Default)]
pub struct LexiconHits<'a> {
    pub counts: SignalCounts,
    /// Strong hits first, then moderate, then weak.
    pub evidence: Vec<&'a str>,
}

impl CompiledLexicon {
    pub fn compile(spec: &SignalLexicon) -> paperscope_common::Result<Self> {
        let contextual = spec
            .contextual
            .iter()
            .map(|c| {
                Ok(CompiledContextual {
                    term: normalize_text(&c.term),
                    requires: PhraseMatcher::new(&c.requires)?,
                })
            })
            .collect::<paperscope_common::Result<Vec<_>>>()?;

        Ok(Self {
            strong: PhraseMatcher::new(&spec.strong)?,
            moderate: PhraseMatcher::new(&spec.moderate)?,
            weak: PhraseMatcher::new(&spec.weak)?,
            negative: PhraseMatcher::new(&spec.negative)?,
            contextual,
        })
    }

    /// Scan normalised text. Contextual signals are not included; see
    /// [`CompiledLexicon::contextual_hits`].
    pub fn scan<'a>(&'a self, text: &str) -> LexiconHits<'a> {
        let strong = self.strong.matches(text);
        let moderate = self.moderate.matches(text);
        let weak = self.weak.matches(text);
        let counts = SignalCounts {
            strong: strong.len() as u32,
            moderate: moderate.len() as u32,
            weak: weak.len() as u32,
            negative: self.negative.count(text),
        };

        let mut evidence = strong;
        evidence.extend(moderate);
        evidence.extend(weak);
        LexiconHits { counts, evidence }
    }

    /// Ambiguous terms present in `text` together with at least one of
    /// their required companions.
    pub fn contextual_hits<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.contextual
            .iter()
            .filter(|c| contains_term(text, &c.term) && c.requires.is_match(text))
            .map(|c| c.term.as_str())
            .collect()
    }

    /// Total number of compiled phrases (for load statistics).
    pub fn phrase_count(&self) -> usize {
        self.strong.terms().len()
            + self.moderate.terms().len()
            + self.weak.terms().len()
            + self.negative.terms().len()
            + self.contextual.len()
    }
}
