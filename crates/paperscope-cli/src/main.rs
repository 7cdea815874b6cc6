//! Paperscope — personalised research paper ranking.
//! Entry point for the `paperscope` binary.

mod input;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use paperscope_common::EngineConfig;
use paperscope_profiler::PaperProfiler;
use paperscope_ranker::RelevanceScorer;
use paperscope_taxonomy::Taxonomy;

use crate::output::Format;

#[derive(Parser, Debug)]
#[command(name = "paperscope", version, about = "Score research papers against a researcher's profile")]
struct Cli {
    /// Reference date for paper age (YYYY-MM-DD); defaults to today.
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Directory with methods.yaml, topics.yaml, fields.yaml and lookups.yaml
    /// to use instead of the built-in taxonomy.
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score and rank a JSON array of papers for a profile.
    Score {
        #[arg(long)]
        papers: PathBuf,
        #[arg(long)]
        profile: PathBuf,
    },

    /// Show the detected methods, topics and quality of one paper.
    Profile {
        #[arg(long)]
        paper: PathBuf,
    },

    /// Show how a profile resolves against the taxonomy.
    Expand {
        #[arg(long)]
        profile: PathBuf,
    },

    /// Full score breakdown for one paper and profile.
    Explain {
        #[arg(long)]
        paper: PathBuf,
        #[arg(long)]
        profile: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paperscope=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load().context("loading engine configuration")?;
    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    let custom;
    let taxonomy = match &cli.taxonomy {
        Some(dir) => {
            custom = input::load_taxonomy(dir)?;
            &custom
        }
        None => Taxonomy::embedded(),
    };
    info!("Scoring as of {as_of}");

    let scorer = RelevanceScorer::new(taxonomy, config, as_of);

    let rendered = match &cli.command {
        Commands::Score { papers, profile } => {
            let papers = input::read_papers(papers)?;
            let profile = input::read_profile(profile)?;
            output::render(&scorer.score_batch(&papers, &profile), cli.format)?
        }
        Commands::Profile { paper } => {
            let paper = input::read_paper(paper)?;
            let profiler = PaperProfiler::new(taxonomy, as_of);
            output::render(&profiler.profile(&paper), cli.format)?
        }
        Commands::Expand { profile } => {
            let profile = input::read_profile(profile)?;
            output::render(&scorer.expand(&profile), cli.format)?
        }
        Commands::Explain { paper, profile } => {
            let paper = input::read_paper(paper)?;
            let user = scorer.expand(&input::read_profile(profile)?);
            output::render(&scorer.score_detailed(&paper, &user), cli.format)?
        }
    };

    println!("{rendered}");
    Ok(())
}
