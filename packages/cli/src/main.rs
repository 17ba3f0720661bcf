#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the Census population AI reporting pipeline.
//!
//! `fetch` queries the Census API and documents the returned records;
//! `report` runs the full fetch -> process -> report pipeline and writes
//! a Markdown file. Configuration comes from the environment (optionally
//! a `.env` file in the working directory): `TEST_API_KEY` for the
//! Census API, `AI_BACKEND` / `OLLAMA_API_KEY` / `OPENAI_API_KEY` /
//! `AI_MODEL` / `OLLAMA_BASE_URL` for the AI backend.

mod pipeline;

use std::path::PathBuf;

use census_report_acs::AcsQuery;
use census_report_acs_models::fips::{STATE_FIPS, state_abbr};
use census_report_acs_models::DEFAULT_YEAR;
use census_report_ai::{BackendConfig, BackendKind, create_provider};
use census_report_analytics::format::group_thousands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "census_report_cli", about = "Census population AI reporting tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the Census API and document the returned records
    Fetch {
        /// Comma-separated state FIPS codes, or "all" for every state
        #[arg(long)]
        states: Option<String>,
        /// ACS vintage year
        #[arg(long)]
        year: Option<u16>,
    },
    /// Run the full fetch -> process -> report pipeline
    Report {
        /// Comma-separated state FIPS codes, or "all" for every state
        #[arg(long)]
        states: Option<String>,
        /// ACS vintage year
        #[arg(long)]
        year: Option<u16>,
        /// AI backend (ollama, ollama_cloud, openai); overrides `AI_BACKEND`
        #[arg(long)]
        backend: Option<String>,
        /// Model name; overrides `AI_MODEL`
        #[arg(long)]
        model: Option<String>,
        /// Output file for the Markdown report
        #[arg(long, default_value = "report.md")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Fetch { states, year } => {
            let query = build_query(states.as_deref(), year);
            fetch_and_document(&query).await
        }
        Commands::Report {
            states,
            year,
            backend,
            model,
            output,
        } => {
            let query = build_query(states.as_deref(), year);
            let year = year.unwrap_or(DEFAULT_YEAR);

            let kind = backend.as_deref().map(BackendKind::parse).transpose()?;
            let mut config = BackendConfig::from_env_with(kind)?;
            if model.is_some() {
                config = config.with_model(model);
            }

            log::info!("AI backend: {}", config.kind.name());
            let provider = create_provider(&config)?;

            pipeline::run(&query, provider.as_ref(), year, &output).await?;
            println!("Done. Report: {}", output.display());
            Ok(())
        }
    }
}

/// Builds the ACS query from CLI flags and the `TEST_API_KEY` env var.
/// A missing key only lowers the daily request limit, so it warns rather
/// than fails.
fn build_query(states: Option<&str>, year: Option<u16>) -> AcsQuery {
    let api_key = std::env::var("TEST_API_KEY").ok();
    if api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
        log::warn!("TEST_API_KEY not set; the Census API allows 500 requests/day without a key");
    }

    let mut query = AcsQuery::new().with_api_key(api_key);
    if let Some(states) = states {
        let states = parse_states(states);
        for code in unknown_states(&states) {
            log::warn!("Unrecognized state FIPS code '{code}'; the Census API may reject it");
        }
        query = query.with_states(states);
    }
    if let Some(year) = year {
        query = query.with_year(year);
    }
    query
}

/// Parses the `--states` flag: a comma-separated FIPS list, or "all" /
/// "*" for the wildcard (empty list).
fn parse_states(s: &str) -> Vec<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("all") {
        return Vec::new();
    }
    trimmed
        .split(',')
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Returns the codes that are not valid state FIPS codes. The query is
/// still sent as given; the Census API has the final say.
fn unknown_states(states: &[String]) -> Vec<&str> {
    states
        .iter()
        .map(String::as_str)
        .filter(|c| !STATE_FIPS.contains(c))
        .collect()
}

/// Runs the fetch stage only and documents the results.
async fn fetch_and_document(query: &AcsQuery) -> Result<(), Box<dyn std::error::Error>> {
    let records = query.fetch().await?;

    println!("Number of records: {}", records.len());
    println!("Key fields per record: NAME, B01001_001E, state");
    println!();
    for (i, r) in records.iter().enumerate() {
        println!(
            "  {}. {} ({}) population={}",
            i + 1,
            r.name,
            state_abbr(&r.fips_code),
            group_thousands(r.population)
        );
    }

    Ok(())
}
