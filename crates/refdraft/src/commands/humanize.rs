//! Humanize command.

use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use refdraft_core::config::Config;
use refdraft_core::{DetectionReport, SeededRandom, detection, generation, humanizer};

use super::{print_detection, read_input_file};

/// Arguments for the `humanize` subcommand.
#[derive(Args, Debug)]
pub struct HumanizeArgs {
    /// Text file to rewrite (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Probability that each transformation fires, between 0 and 1.
    #[arg(long)]
    pub creativity: Option<f64>,

    /// Seed for a reproducible rewrite.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Serialize)]
struct HumanizeOutput {
    content: String,
    creativity: f64,
    detection: DetectionReport,
}

/// Rewrite a text file and print the result.
#[instrument(name = "cmd_humanize", skip_all, fields(file = %args.file))]
pub fn cmd_humanize(
    args: HumanizeArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let creativity =
        generation::clamp_creativity(args.creativity.unwrap_or(config.generation.creativity));
    debug!(creativity, seed = ?args.seed, "executing humanize command");

    let text = read_input_file(&args.file, config.effective_max_input_bytes())?;
    let mut rng = SeededRandom::from_optional_seed(args.seed.or(config.seed));
    let content = humanizer::humanize(&text, creativity, &mut rng);
    let report = detection::estimate(&content);

    if global_json {
        let out = HumanizeOutput {
            content,
            creativity,
            detection: report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{content}");
        if !quiet {
            print_detection(&report);
        }
    }
    Ok(())
}
