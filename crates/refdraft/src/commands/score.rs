//! Score command: heuristic detectability, or the simulated detector with `--simulate`.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use refdraft_core::config::Config;
use refdraft_core::{Pipeline, SeededRandom, detection};

use super::{print_detection, read_input_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Text file to score (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Ask the simulated external detector instead of the heuristic.
    #[arg(long)]
    pub simulate: bool,

    /// Seed for the simulated detector.
    #[arg(long, requires = "simulate")]
    pub seed: Option<u64>,
}

/// Score a text file.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file, simulate = args.simulate))]
pub async fn cmd_score(args: ScoreArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing score command");

    let text = read_input_file(&args.file, config.effective_max_input_bytes())?;
    let report = if args.simulate {
        let mut rng = SeededRandom::from_optional_seed(args.seed.or(config.seed));
        Pipeline::from_config(config)
            .check_detection(&text, &mut rng)
            .await
            .with_context(|| format!("cannot check {}", args.file))?
    } else {
        detection::estimate(&text)
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.score);
    print_detection(&report);
    for count in &report.categories {
        eprintln!(
            "  {}: {}",
            count.category.as_str().dimmed(),
            count.matches
        );
    }
    Ok(())
}
