//! Paper quality score: journal tier blended with citation impact.
//!
//! quality = 0.6 × tier_score + 0.4 × cite_score, in [0, 1].
//! Recent papers have had no time to collect citations, so for papers with
//! fewer than 10 citations the cite score is floored by age.

use chrono::{DateTime, NaiveDate};

use paperscope_common::Paper;

const TIER_WEIGHT: f64 = 0.6;
const CITATION_WEIGHT: f64 = 0.4;

/// Papers with at least this many citations never get a recency floor.
const RECENCY_CITATION_LIMIT: u64 = 10;
const SIX_MONTHS_DAYS: i64 = 183;
const ONE_YEAR_DAYS: i64 = 365;

/// Journal tier score. Tiers outside 1..=3 score as unranked.
pub fn tier_score(tier: u8) -> f64 {
    match tier {
        1 => 1.0,
        2 => 0.8,
        3 => 0.6,
        _ => 0.35,
    }
}

/// Banded citation score.
pub fn citation_score(citations: u64) -> f64 {
    match citations {
        100.. => 1.0,
        50..=99 => 0.9,
        25..=49 => 0.8,
        10..=24 => 0.65,
        5..=9 => 0.5,
        1..=4 => 0.4,
        0 => 0.25,
    }
}

/// Minimum cite score for a paper of this age, if any.
pub fn recency_floor(age_days: i64) -> Option<f64> {
    if age_days < SIX_MONTHS_DAYS {
        Some(0.5)
    } else if age_days < ONE_YEAR_DAYS {
        Some(0.4)
    } else {
        None
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM`, `YYYY` or an RFC 3339 timestamp.
/// Partial dates resolve to the first day of the period.
pub fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Days between publication and `as_of`; future dates count as 0.
/// `None` when the date is missing or unparseable.
pub fn age_days(paper: &Paper, as_of: NaiveDate) -> Option<i64> {
    let published = parse_publication_date(paper.publication_date.as_deref()?)?;
    Some((as_of - published).num_days().max(0))
}

pub fn quality_score(paper: &Paper, as_of: NaiveDate) -> f64 {
    let citations = paper.citations();
    let mut cite = citation_score(citations);
    if citations < RECENCY_CITATION_LIMIT {
        if let Some(floor) = age_days(paper, as_of).and_then(recency_floor) {
            cite = cite.max(floor);
        }
    }
    (TIER_WEIGHT * tier_score(paper.tier()) + CITATION_WEIGHT * cite).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn paper(tier: Option<i64>, citations: i64, date: Option<&str>) -> Paper {
        Paper {
            journal_tier: tier,
            cited_by_count: citations,
            publication_date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_top_journal_well_cited() {
        let q = quality_score(&paper(Some(1), 80, Some("2015-03-01")), as_of());
        assert!((q - 0.96).abs() < 1e-9, "got {q}");
    }

    #[test]
    fn test_citation_bands() {
        assert_eq!(citation_score(0), 0.25);
        assert_eq!(citation_score(1), 0.4);
        assert_eq!(citation_score(5), 0.5);
        assert_eq!(citation_score(10), 0.65);
        assert_eq!(citation_score(25), 0.8);
        assert_eq!(citation_score(50), 0.9);
        assert_eq!(citation_score(100), 1.0);
        assert_eq!(citation_score(12_000), 1.0);
    }

    #[test]
    fn test_unranked_tiers() {
        assert_eq!(tier_score(4), 0.35);
        assert_eq!(tier_score(0), 0.35);
        let q = quality_score(&paper(None, 0, None), as_of());
        assert!((q - (0.6 * 0.35 + 0.4 * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn test_recency_floor_for_new_papers() {
        // 0 citations, 2 months old → floor 0.5
        let q = quality_score(&paper(Some(2), 0, Some("2024-04-01")), as_of());
        assert!((q - (0.6 * 0.8 + 0.4 * 0.5)).abs() < 1e-9);

        // 9 months old → floor 0.4
        let q = quality_score(&paper(Some(2), 0, Some("2023-09")), as_of());
        assert!((q - (0.6 * 0.8 + 0.4 * 0.4)).abs() < 1e-9);

        // floors never lower a better band
        let q = quality_score(&paper(Some(2), 7, Some("2024-05-20")), as_of());
        assert!((q - (0.6 * 0.8 + 0.4 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_no_floor_for_cited_or_undated_papers() {
        let q = quality_score(&paper(Some(1), 12, Some("2024-05-01")), as_of());
        assert!((q - (0.6 + 0.4 * 0.65)).abs() < 1e-9);

        let q = quality_score(&paper(Some(1), 0, Some("sometime")), as_of());
        assert!((q - (0.6 + 0.4 * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn test_future_dates_count_as_new() {
        let p = paper(Some(3), 0, Some("2025-01-01"));
        assert_eq!(age_days(&p, as_of()), Some(0));
        assert!((quality_score(&p, as_of()) - (0.6 * 0.6 + 0.4 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_date_formats() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(parse_publication_date("2021-07-15"), d(2021, 7, 15));
        assert_eq!(parse_publication_date("2021-07"), d(2021, 7, 1));
        assert_eq!(parse_publication_date("2021"), d(2021, 1, 1));
        assert_eq!(parse_publication_date("2021-07-15T10:30:00Z"), d(2021, 7, 15));
        assert_eq!(parse_publication_date("2021-13"), None);
        assert_eq!(parse_publication_date("July 2021"), None);
        assert_eq!(parse_publication_date(""), None);
    }
}
