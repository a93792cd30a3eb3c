//! Command-line interface for the enrichment client.
//!
//! Provides commands for running a streamed analysis, checking a domain
//! against previous analyses, and inspecting configuration.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{ApiClient, EnrichmentService};
use crate::config;
use crate::core::{lookup_key, Analyzer};
use crate::domain::{ResultSummary, RunState, StepStatus};

/// enrich - streaming client for the e-commerce enrichment pipeline
#[derive(Parser, Debug)]
#[command(name = "enrich")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a company URL (or brand name) with live progress
    Analyze {
        /// URL or free-text brand to analyze
        url: String,

        /// Re-analyze without prompting when the domain was seen before
        #[arg(short, long)]
        yes: bool,

        /// Print the raw result payload as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check whether a URL or domain was analyzed before
    Check {
        /// URL or domain to look up
        target: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze { url, yes, json } => analyze(&url, yes, json).await,
            Commands::Check { target } => check(&target).await,
            Commands::Config => show_config(),
        }
    }
}

/// Run a gated, streamed analysis and render progress to the terminal
async fn analyze(url: &str, auto_confirm: bool, raw_json: bool) -> Result<()> {
    let config = config::get()?;
    let mut analyzer = Analyzer::new(ApiClient::from_config(config));

    let mut renderer = StepRenderer::default();
    let mut observer = move |state: &RunState| renderer.render(state);

    analyzer.analyze(url, &mut observer).await?;

    // The gate may have parked the submission behind a prompt
    if let Some(duplicate) = analyzer.state().duplicate.clone() {
        let domain = duplicate.domain.as_deref().unwrap_or("this domain");
        eprintln!("{} was analyzed before.", domain);
        if let Some(when) = duplicate.last_analyzed.as_deref() {
            eprintln!("Last analyzed: {}", when);
        }

        if auto_confirm || prompt_yes_no("Analyze again? [y/N] ")? {
            analyzer.confirm_analyze(&mut observer).await?;
        } else {
            analyzer.dismiss_duplicate();
            eprintln!("Skipped.");
            return Ok(());
        }
    }

    print_outcome(analyzer.state(), raw_json)
}

/// Print the final result (or fail with the run's error)
fn print_outcome(state: &RunState, raw_json: bool) -> Result<()> {
    if let Some(error) = &state.error {
        eprintln!("\n[Analysis failed: {}]", error);
        std::process::exit(1);
    }

    let Some(results) = &state.results else {
        eprintln!("\n[Stream ended without a result]");
        std::process::exit(1);
    };

    if raw_json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    match ResultSummary::from_value(results) {
        Some(summary) => print_summary(&summary),
        // Unknown shape: fall back to raw output rather than dropping it
        None => println!("{}", serde_json::to_string_pretty(results)?),
    }
    Ok(())
}

fn print_summary(summary: &ResultSummary) {
    println!();
    print_field("Company", summary.company_name.as_deref());
    print_field("Domain", summary.domain.as_deref());
    print_field("Platform", summary.platform.as_deref());
    print_field("Category", summary.category.as_deref());
    print_field("Instagram", summary.instagram_url.as_deref());
    if let Some(followers) = summary.ig_followers {
        println!("IG followers: {}", followers);
    }
    if let (Some(size), Some(health)) = (summary.ig_size_score, summary.ig_health_score) {
        println!("IG scores: size {} / health {}", size, health);
    }
    print_field("LinkedIn", summary.company_linkedin.as_deref());
    print_field("Contact", summary.contact_name.as_deref());
    print_field("Email", summary.contact_email.as_deref());
    if let Some(employees) = summary.number_employes {
        println!("Employees: {}", employees);
    }
    if let Some(prediction) = &summary.prediction {
        println!(
            "Estimated orders/month: {} (p10 {}, p90 {}, confidence {})",
            prediction.predicted_orders_p50,
            prediction.predicted_orders_p10,
            prediction.predicted_orders_p90,
            prediction.prediction_confidence,
        );
    }
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        println!("{}: {}", label, v);
    }
}

/// Prints each step transition exactly once as state snapshots arrive
#[derive(Default)]
struct StepRenderer {
    printed: HashMap<String, StepStatus>,
}

impl StepRenderer {
    fn render(&mut self, state: &RunState) {
        for record in &state.steps {
            if self.printed.get(&record.step) == Some(&record.status) {
                continue;
            }
            self.printed.insert(record.step.clone(), record.status);

            let duration = record
                .duration_ms
                .filter(|_| record.status.is_terminal())
                .map(|ms| format!(" ({} ms)", ms))
                .unwrap_or_default();
            let detail = record
                .detail
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!(" - {}", d))
                .unwrap_or_default();

            eprintln!("  {} {}{}{}", record.status.glyph(), record.step, duration, detail);
        }
    }
}

/// Ask a yes/no question on the terminal
fn prompt_yes_no(question: &str) -> Result<bool> {
    eprint!("{}", question);
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation from stdin")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Look up a URL or domain against previous analyses
async fn check(target: &str) -> Result<()> {
    let config = config::get()?;
    let client = ApiClient::from_config(config);

    let domain = lookup_key(target);
    let result = client
        .check_duplicate(&domain)
        .await
        .with_context(|| format!("Duplicate lookup failed for '{}'", domain))?;

    if result.exists {
        println!("{}: already analyzed", domain);
        if let Some(when) = result.last_analyzed.as_deref() {
            println!("Last analyzed: {}", when);
        }
    } else {
        println!("{}: not analyzed yet", domain);
    }
    Ok(())
}

/// Print the resolved configuration
fn show_config() -> Result<()> {
    let config = config::get()?;

    println!("API URL: {}", config.api_url);
    println!("Lookup timeout: {}s", config.timeout_seconds);
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none found, using defaults)"),
    }
    Ok(())
}
