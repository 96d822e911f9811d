use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wikigate::{score_breakdown, ScoreBreakdown, ValidationMode, Validator, Verdict};
use wikigate_common::{Article, Config, TagPolicy};

#[derive(Parser)]
#[command(name = "wikigate")]
#[command(about = "Validate and score wiki submissions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an article read from a JSON file, or stdin with `-`
    Validate {
        path: PathBuf,

        /// Report every failing rule instead of stopping at the first
        #[arg(long)]
        all: bool,
    },

    /// Print the quality score of an article
    Score { path: PathBuf },

    /// Print the JSON schema of the article wire format
    Schema,
}

#[derive(Serialize)]
struct ValidateOutput {
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u8>,
}

#[derive(Serialize)]
struct ScoreOutput {
    score: u8,
    breakdown: ScoreBreakdown,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {e:#}");
        return ExitCode::from(2);
    }

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wikigate=info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Returns whether the article passed.
async fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Validate { path, all } => {
            let config = Config::from_env()?;
            config.log_summary();

            let mut article = read_article(&path).await?;
            let validator = Validator::from_config(&config)?;
            let mode = if all {
                ValidationMode::CollectAll
            } else {
                ValidationMode::FailFast
            };

            let verdict = validator.validate_with(&article, mode).await?;
            let score = if verdict.is_valid() {
                if validator.tag_policy() == TagPolicy::Drop {
                    article.retain_recognized_tags();
                }
                Some(wikigate::score(&article))
            } else {
                None
            };
            info!(wiki = %article.id, valid = verdict.is_valid(), "Validation complete");

            let valid = verdict.is_valid();
            print_json(&ValidateOutput { verdict, score })?;
            Ok(valid)
        }
        Commands::Score { path } => {
            let article = read_article(&path).await?;
            let breakdown = score_breakdown(&article);
            print_json(&ScoreOutput {
                score: breakdown.total(),
                breakdown,
            })?;
            Ok(true)
        }
        Commands::Schema => {
            print_json(&schemars::schema_for!(Article))?;
            Ok(true)
        }
    }
}

async fn read_article(path: &Path) -> Result<Article> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read article from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Article is not valid JSON")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
