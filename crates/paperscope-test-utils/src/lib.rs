//! Shared fixtures for Paperscope tests: reference papers, onboarding
//! profiles and a fixed reference date so scores are reproducible.

use chrono::NaiveDate;

use paperscope_common::{ConceptTag, Paper, UserProfile};

pub use pretty_assertions;

/// The date every fixture is scored against.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date")
}

fn paper(id: &str, title: &str, abstract_text: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: title.to_string(),
        abstract_text: abstract_text.to_string(),
        ..Default::default()
    }
}

// ── Papers ───────────────────────────────────────────────────────────────────

/// Top-journal difference-in-differences study of the minimum wage.
pub fn minimum_wage_did_paper() -> Paper {
    Paper {
        journal: "American Economic Review".to_string(),
        journal_tier: Some(1),
        publication_date: Some("2016-05-01".to_string()),
        cited_by_count: 80,
        journal_field: Some("economics".to_string()),
        ..paper(
            "W-minwage",
            "The Effect of Minimum Wage Increases on Employment: A Difference-in-Differences Approach",
            "We study the effect of state minimum wage increases on teen employment using a \
             difference-in-differences design. Exploiting staggered policy changes across states, we \
             estimate two-way fixed effects models and test the parallel trends assumption using \
             event-study plots. We find small negative employment effects concentrated among \
             low-wage workers in restaurants.",
        )
    }
}

/// Survey-based political science paper on polarization and partisan media.
pub fn polarization_media_paper() -> Paper {
    Paper {
        journal: "American Political Science Review".to_string(),
        journal_tier: Some(1),
        publication_date: Some("2021-02".to_string()),
        cited_by_count: 140,
        journal_field: Some("polisci".to_string()),
        concepts: vec![
            ConceptTag { name: "Political polarization".to_string(), score: 0.82 },
            ConceptTag { name: "Mass media".to_string(), score: 0.55 },
        ],
        ..paper(
            "W-polar",
            "Partisan Media and Affective Polarization",
            "Using a nationally representative survey and a survey experiment, we examine whether \
             exposure to partisan news deepens affective polarization among voters. Respondents \
             randomly assigned to partisan outlets report greater partisan animosity. We find \
             effects concentrated among strong partisans.",
        )
    }
}

/// Narrative literature review, mid-tier journal.
pub fn minimum_wage_review_paper() -> Paper {
    Paper {
        journal: "Journal of Economic Perspectives".to_string(),
        journal_tier: Some(2),
        publication_date: Some("2019".to_string()),
        cited_by_count: 30,
        journal_field: Some("economics".to_string()),
        ..paper(
            "W-review",
            "Minimum Wages and Employment: A Review of the Literature",
            "This review of the literature summarizes three decades of research on minimum wages \
             and employment, and outlines a research agenda.",
        )
    }
}

/// Game-theoretic model of electoral accountability.
pub fn formal_theory_paper() -> Paper {
    Paper {
        journal: "Journal of Politics".to_string(),
        journal_tier: Some(2),
        publication_date: Some("2018-09-01".to_string()),
        cited_by_count: 12,
        journal_field: Some("polisci".to_string()),
        ..paper(
            "W-theory",
            "Electoral Accountability with Imperfect Information",
            "We develop a game theoretic model of elections in which voters observe noisy signals \
             of incumbent performance. We characterize the unique perfect Bayesian equilibrium and \
             prove that accountability improves with transparency. Proposition 2 shows when \
             incumbents pander.",
        )
    }
}

/// Interview study of platform workers, sociology.
pub fn gig_work_interview_paper() -> Paper {
    Paper {
        journal: "American Sociological Review".to_string(),
        journal_tier: Some(1),
        publication_date: Some("2022-11-15".to_string()),
        cited_by_count: 45,
        journal_field: Some("sociology".to_string()),
        ..paper(
            "W-gig",
            "Algorithmic Control and the Experience of Gig Work",
            "Drawing on semi-structured interviews with 60 ride-hail drivers and participant \
             observation, we examine how workers interpret algorithmic management. Informants \
             describe strategies of resistance.",
        )
    }
}

/// Recent, uncited preprint-like paper in an unranked outlet.
pub fn recent_uncited_paper() -> Paper {
    Paper {
        journal: "Working Paper Series".to_string(),
        journal_tier: None,
        publication_date: Some("2024-04-15".to_string()),
        cited_by_count: 0,
        journal_field: Some("economics".to_string()),
        ..paper(
            "W-recent",
            "Remote Work and Urban Housing Demand",
            "We estimate how remote work shifted housing demand from urban cores to suburbs using \
             listings data from a large sample of metropolitan areas.",
        )
    }
}

/// A varied collection of the fixtures above.
pub fn reference_corpus() -> Vec<Paper> {
    vec![
        minimum_wage_did_paper(),
        polarization_media_paper(),
        minimum_wage_review_paper(),
        formal_theory_paper(),
        gig_work_interview_paper(),
        recent_uncited_paper(),
    ]
}

/// `n` papers cycling through [`reference_corpus`], each with a unique id.
pub fn sized_corpus(n: usize) -> Vec<Paper> {
    let base = reference_corpus();
    (0..n)
        .map(|i| {
            let mut p = base[i % base.len()].clone();
            p.id = format!("{}-{i}", p.id);
            p
        })
        .collect()
}

/// JSON array of `papers`, as the CLI reads it.
pub fn papers_json(papers: &[Paper]) -> String {
    serde_json::to_string_pretty(papers).expect("fixture papers serialize")
}

// ── Profiles ─────────────────────────────────────────────────────────────────

/// Interested only in causal inference, no method preferences.
pub fn causal_inference_profile(exploration_level: f64) -> UserProfile {
    UserProfile {
        name: "Reviewer".to_string(),
        academic_level: "Faculty".to_string(),
        interests: vec!["Causal Inference".to_string()],
        exploration_level,
        ..Default::default()
    }
}

/// Labor economist who uses difference-in-differences.
pub fn labor_economist_profile() -> UserProfile {
    UserProfile {
        name: "Ada".to_string(),
        academic_level: "PhD Student".to_string(),
        primary_field: "Economics".to_string(),
        interests: vec!["Labor Economics".to_string()],
        methods: vec!["Difference-in-Differences".to_string()],
        exploration_level: 0.3,
        ..Default::default()
    }
}

/// Political scientist who opts in to economics as an adjacent field.
pub fn political_scientist_profile() -> UserProfile {
    UserProfile {
        name: "Grace".to_string(),
        academic_level: "Postdoc".to_string(),
        primary_field: "Political Science".to_string(),
        interests: vec!["Elections & Voting".to_string(), "Polarization".to_string()],
        methods: vec!["Survey Experiments".to_string()],
        exploration_level: 0.6,
        include_adjacent_fields: true,
        selected_adjacent_fields: vec!["Economics".to_string()],
    }
}

/// No interests, no methods, no home field.
pub fn generalist_profile() -> UserProfile {
    UserProfile {
        name: "Sam".to_string(),
        academic_level: "Undergraduate".to_string(),
        primary_field: "Interdisciplinary".to_string(),
        ..Default::default()
    }
}
