//! Command-line interface for veritas.
//!
//! Provides commands for analyzing text against the reliability
//! service, checking service health, and inspecting configuration.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::adapters::{Analyzer, HttpAnalyzer};
use crate::config;
use crate::domain::{AnalysisResult, RequestState, Session, SubmitOutcome};
use crate::highlight::{normalize, segments};

const HIGHLIGHT_ON: &str = "\x1b[43m\x1b[30m"; // black on yellow
const HIGHLIGHT_OFF: &str = "\x1b[0m";

/// veritas - text reliability analysis client
#[derive(Parser, Debug)]
#[command(name = "veritas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze text and print the reliability report
    Analyze {
        /// Text to analyze (reads from --input or stdin if not provided)
        text: Option<String>,

        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Check that the analysis service is reachable
    Health,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze { text, input } => run_analyze(text, input).await,
            Commands::Health => check_health().await,
            Commands::Config => show_config(),
        }
    }
}

/// Read the text to analyze: argument, then file, then stdin
fn read_text(text: Option<String>, input: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = input {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

async fn run_analyze(text: Option<String>, input: Option<PathBuf>) -> Result<()> {
    let cfg = config::config()?;
    let text = read_text(text, input)?;
    let text = text.trim().to_string();

    // Mirror the service's upper bound so doomed requests never leave
    // the client
    if text.chars().count() > cfg.analysis.max_text_chars {
        anyhow::bail!(
            "Text too long: maximum is {} characters, got {}",
            cfg.analysis.max_text_chars,
            text.chars().count()
        );
    }

    let analyzer = HttpAnalyzer::new(&cfg.service_url);
    let mut session = Session::new(cfg.analysis.min_text_chars);

    println!("Analyzing text ({} bytes)...", text.len());
    match session.analyze(&analyzer, &text, cfg.timeout()).await {
        SubmitOutcome::TooShort {
            trimmed_chars,
            minimum,
        } => {
            anyhow::bail!(
                "Text too short: minimum is {} characters, got {}",
                minimum,
                trimmed_chars
            );
        }
        SubmitOutcome::InFlight => {
            anyhow::bail!("A request is already in flight for this session");
        }
        SubmitOutcome::Accepted(_) => {}
    }

    match session.state() {
        RequestState::Success { result } => {
            print_report(&text, result);
            Ok(())
        }
        RequestState::Failed { error } => {
            anyhow::bail!("Analysis failed: {}", error)
        }
        // The driver settles before returning
        RequestState::Idle | RequestState::Loading => {
            anyhow::bail!("Analysis did not settle")
        }
    }
}

/// Print the reliability report with highlighted suspicious phrases
fn print_report(text: &str, result: &AnalysisResult) {
    println!();
    println!("═══ Reliability Report ═══");
    println!();
    println!("Score:       {}/100 ({})", result.score, result.level);
    println!("Confidence:  {:.0}%", result.confidence * 100.0);
    println!();
    println!("{}", result.explanation);

    if !result.warning.is_empty() {
        println!();
        println!("⚠ {}", result.warning);
    }

    let normalized = normalize(text, &result.spans);
    for (span, violation) in &normalized.rejected {
        warn!(
            start = span.start,
            end = span.end,
            %violation,
            "excluding invalid span from rendering"
        );
    }

    if normalized.spans.is_empty() {
        return;
    }

    println!();
    println!("─── Analyzed text ───");
    for segment in segments(text, &normalized.spans) {
        if segment.is_highlight() {
            print!("{}{}{}", HIGHLIGHT_ON, segment.content, HIGHLIGHT_OFF);
        } else {
            print!("{}", segment.content);
        }
    }
    println!();

    println!();
    println!("─── Suspicious phrases ───");
    for span in &normalized.spans {
        println!(
            "  \"{}\" — {} ({:.0}% confidence)",
            span.text,
            span.reason,
            span.confidence * 100.0
        );
    }
}

async fn check_health() -> Result<()> {
    let cfg = config::config()?;
    let analyzer = HttpAnalyzer::new(&cfg.service_url);

    analyzer
        .health_check()
        .await
        .with_context(|| format!("Service at {} is not healthy", cfg.service_url))?;

    println!("✓ Service at {} is healthy", cfg.service_url);
    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Resolved configuration:");
    println!("  service_url:        {}", cfg.service_url);
    println!("  timeout_seconds:    {}", cfg.timeout_seconds);
    println!("  min_text_chars:     {}", cfg.analysis.min_text_chars);
    println!("  max_text_chars:     {}", cfg.analysis.max_text_chars);
    println!("  reliable_threshold: {}", cfg.analysis.reliable_threshold);
    println!("  caution_threshold:  {}", cfg.analysis.caution_threshold);
    match &cfg.config_file {
        Some(path) => println!("  config_file:        {}", path.display()),
        None => println!("  config_file:        (none, using defaults)"),
    }

    Ok(())
}
