//! Attune CLI entrypoint.
//!
//! Reads blank-line-separated candidate blocks from a file (or stdin), ranks
//! them against the reference corpus and prints the annotated list. Ctrl-C
//! cancels the in-flight run.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use attune::config::Config;
use attune::embedding::{MiniLmConfig, MiniLmEmbedder};
use attune::pipeline::{PipelineError, RankPipeline, RunObserver, RunOptions, Stage};
use attune::scoring::PresetName;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "\
Usage: attune [OPTIONS] [FILE]

Ranks blank-line-separated text candidates by semantic naturalness.
Reads from FILE, or stdin when no file is given.

Options:
  --preset NAME   Scoring preset: balanced | naturalness | reference | strict | broad
  --lang CODE     Reference-set language (en, ja)
  --json          Emit results as JSON instead of a table
  --stub          Use deterministic stub embeddings (no model files needed)
  -h, --help      Show this help

Environment:
  ATTUNE_MODEL_DIR   Directory with config.json / model.safetensors / tokenizer.json
  ATTUNE_LANG        Default language
  ATTUNE_PRESET      Default preset
  ATTUNE_BATCH_SIZE  Texts embedded per batch (default 10)
";

struct CliArgs {
    file: Option<PathBuf>,
    preset: Option<PresetName>,
    language: Option<String>,
    json: bool,
    stub: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = CliArgs {
        file: None,
        preset: None,
        language: None,
        json: false,
        stub: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            "--json" => args.json = true,
            "--stub" => args.stub = true,
            "--preset" => {
                let value = iter.next().context("--preset requires a value")?;
                args.preset = Some(value.parse()?);
            }
            "--lang" => {
                args.language = Some(iter.next().context("--lang requires a value")?);
            }
            other if other.starts_with('-') => {
                anyhow::bail!("unknown option '{other}' (see --help)");
            }
            path => {
                anyhow::ensure!(args.file.is_none(), "only one input file may be given");
                args.file = Some(PathBuf::from(path));
            }
        }
    }

    Ok(args)
}

/// Prints stage transitions and embedding progress to stderr so long
/// model-backed runs stay visible.
struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn stage(&self, stage: Stage) {
        eprintln!("[{}/5] {stage:?}", stage.number());
    }

    fn embed_progress(&self, percent: u8) {
        eprintln!("      embedding {percent}%");
    }
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn build_embedder(config: &Config, stub: bool) -> anyhow::Result<MiniLmEmbedder> {
    let embedder_config = match (&config.model_dir, stub) {
        (_, true) | (None, _) => {
            if !stub {
                warn!("ATTUNE_MODEL_DIR not set; falling back to stub embeddings");
            }
            MiniLmConfig {
                batch_size: config.batch_size,
                ..MiniLmConfig::stub()
            }
        }
        (Some(model_dir), false) => MiniLmConfig {
            batch_size: config.batch_size,
            ..MiniLmConfig::new(model_dir.clone())
        },
    };

    MiniLmEmbedder::load(embedder_config).context("failed to load the embedding model")
}

fn print_table(report: &attune::pipeline::RunReport) {
    println!(
        "rank  score   confidence  candidate  (preset: {}, language: {}, {} ms)",
        report.preset,
        report.language,
        report.elapsed.as_millis()
    );
    for result in &report.results {
        let meta = if result.candidate.meta.is_empty() {
            String::new()
        } else {
            let mut pairs: Vec<String> = result
                .candidate
                .meta
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            pairs.sort();
            format!("  [{}]", pairs.join(" "))
        };
        println!(
            "{:>4}  {:.4}  {:<10}  {}{meta}",
            result.rank,
            result.score,
            result.confidence.to_string(),
            result.candidate.eval_text
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;
    let input = read_input(args.file.as_ref())?;

    let embedder = build_embedder(&config, args.stub)?;
    let pipeline = RankPipeline::new(Arc::new(embedder));

    let options = RunOptions {
        preset: args.preset.unwrap_or(config.preset),
        language: args.language.unwrap_or(config.language),
    };

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    match pipeline.run(&input, &options, &cancel, &ConsoleObserver).await {
        Ok(report) => {
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report.results)?);
            } else {
                print_table(&report);
            }
            Ok(())
        }
        Err(PipelineError::Cancelled) => {
            eprintln!("cancelled");
            Ok(())
        }
        Err(PipelineError::NoCandidates) => {
            anyhow::bail!("no candidates found - paste at least one non-empty block")
        }
        Err(err) => Err(err).context("processing failed"),
    }
}
