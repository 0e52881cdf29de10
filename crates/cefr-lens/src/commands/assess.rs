//! Assess command: CEFR level of one or more text files.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use cefr_lens_core::config::Config;
use cefr_lens_core::{AssessmentReport, CefrLevel, ScoreConfig, ScoreOption, Weights, assess};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::read_input_file;

/// Arguments for the `assess` subcommand.
#[derive(Args, Debug, Default)]
pub struct AssessArgs {
    /// Text files to assess.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Analyze long texts whole instead of sampling.
    #[arg(long)]
    pub full: bool,

    /// Word count above which texts are sampled.
    #[arg(long, value_name = "WORDS")]
    pub sampling_threshold: Option<usize>,

    /// Sub-score weights, comma-separated; ignored unless they sum to 1.0.
    #[arg(long, value_name = "V,S,R", value_parser = parse_weights)]
    pub weights: Option<Weights>,

    /// Fail if any text is assessed above this level.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub max_level: Option<CefrLevel>,
}

impl AssessArgs {
    /// Score options from config, then from flags, so flags win.
    fn score_config(&self, config: &Config) -> ScoreConfig {
        let mut options = config.score_options();
        if let Some(w) = self.weights {
            options.push(ScoreOption::Weights(w.vocabulary, w.syntax, w.readability));
        }
        if self.full {
            options.push(ScoreOption::FullAnalysis);
        }
        if let Some(threshold) = self.sampling_threshold {
            options.push(ScoreOption::SamplingThreshold(threshold));
        }
        ScoreConfig::from_options(options)
    }
}

fn parse_weights(s: &str) -> Result<Weights, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid weight: {e}"))?;
    match parts.as_slice() {
        [vocabulary, syntax, readability] => Ok(Weights {
            vocabulary: *vocabulary,
            syntax: *syntax,
            readability: *readability,
        }),
        _ => Err(format!("expected three weights, got {}", parts.len())),
    }
}

#[derive(Serialize)]
struct FileReport {
    file: Utf8PathBuf,
    report: AssessmentReport,
}

/// Assess each file and print its level.
#[instrument(name = "cmd_assess", skip_all, fields(files = args.files.len()))]
pub fn cmd_assess(
    args: AssessArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let score_config = args.score_config(config);
    let max_level = args.max_level.or(config.max_level);
    debug!(?score_config, ?max_level, "executing assess command");

    let progress = if args.files.len() > 1 {
        let pb = ProgressBar::new(args.files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .context("invalid progress template")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(args.files.len());
    for file in args.files {
        progress.set_message(file.to_string());
        let content = read_input_file(&file, max_input_bytes)?;
        let report =
            assess(&content, &score_config).with_context(|| format!("failed to assess {file}"))?;
        results.push(FileReport { file, report });
        progress.inc(1);
    }
    progress.finish_and_clear();

    if global_json {
        if let [single] = results.as_slice() {
            println!("{}", serde_json::to_string_pretty(&single.report)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    } else {
        for result in &results {
            print_report(result);
        }
    }

    if let Some(max) = max_level {
        let over: Vec<String> = results
            .iter()
            .filter(|r| r.report.exceeds(max))
            .map(|r| format!("{} ({})", r.file, r.report.level))
            .collect();
        if !over.is_empty() {
            bail!("above max level {max}: {}", over.join(", "));
        }
    }

    Ok(())
}

fn print_report(result: &FileReport) {
    let report = &result.report;
    let level = match report.level {
        CefrLevel::A1 | CefrLevel::A2 => report.level.green().to_string(),
        CefrLevel::B1 | CefrLevel::B2 => report.level.yellow().to_string(),
        CefrLevel::C1 | CefrLevel::C2 => report.level.red().to_string(),
    };
    print!(
        "{}: {} (score {:.2}, confidence {:.2})",
        result.file.bold(),
        level,
        report.score,
        report.confidence,
    );
    if report.segments > 1 {
        print!(" {}", format!("[{} segments sampled]", report.segments).dimmed());
    }
    println!();

    let v = &report.vocabulary;
    println!(
        "  {:<12} {:.2}  {} {:.0}%  {} {}",
        "vocabulary",
        v.score,
        "unknown".dimmed(),
        v.unknown_ratio * 100.0,
        "content words".dimmed(),
        v.content_words,
    );
    let s = &report.syntax;
    println!(
        "  {:<12} {:.2}  {} {:.1}  {} {:.2}  {} {:.2}  {} {}",
        "syntax",
        s.score,
        "words/sentence".dimmed(),
        s.avg_sentence_length,
        "subordination".dimmed(),
        s.subordination_index,
        "passive".dimmed(),
        s.passive_rate,
        "connectors".dimmed(),
        s.connector_diversity,
    );
    let r = &report.readability;
    println!(
        "  {:<12} {:.2}  {} {:.1}  {} {:.1}  {} {:.1}",
        "readability",
        r.score,
        "fkgl".dimmed(),
        r.fkgl,
        "fre".dimmed(),
        r.fre,
        "cli".dimmed(),
        r.cli,
    );
}
