//! Batch scoring: score, rank and truncate a paper collection for one user.

use std::cmp::Ordering;

use tracing::info;

use paperscope_common::{BatchResult, MatchTier, Paper, ScoredPaper, UserProfile};

use crate::expand::ExpandedUserProfile;
use crate::scorer::RelevanceScorer;

pub const EMPTY_SUMMARY: &str = "No papers found.";

impl RelevanceScorer<'_> {
    /// Score every paper for `profile`, best first, keeping at most
    /// `batch.max_results`.
    pub fn score_batch(&self, papers: &[Paper], profile: &UserProfile) -> BatchResult {
        if papers.is_empty() {
            return BatchResult { papers: Vec::new(), summary: EMPTY_SUMMARY.to_string() };
        }

        let user = self.expand(profile);
        let mut scored = self.score_all(papers, &user);
        let total = scored.len();
        let core = scored.iter().filter(|p| p.match_tier == MatchTier::Core).count();

        // Stable: equal scores keep input order.
        scored.sort_by(|a, b| b.relevance_score.partial_cmp(&a.relevance_score).unwrap_or(Ordering::Equal));
        scored.truncate(self.config().batch.max_results);

        let summary = format!("Scored {total} papers · showing {} · {core} core matches", scored.len());
        info!("{summary}");

        BatchResult { papers: scored, summary }
    }

    /// Score papers in input order, on the rayon pool above the configured threshold.
    pub fn score_all(&self, papers: &[Paper], user: &ExpandedUserProfile) -> Vec<ScoredPaper> {
        #[cfg(feature = "parallel")]
        {
            let threshold = self.config().batch.parallel_threshold;
            if papers.len() > threshold && threshold > 0 {
                use rayon::prelude::*;
                return papers.par_iter()
                    .map(|paper| self.to_scored_paper(paper, user))
                    .collect();
            }
        }
        papers.iter()
            .map(|paper| self.to_scored_paper(paper, user))
            .collect()
    }
}
