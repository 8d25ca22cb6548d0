//! Topics command.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use refdraft_core::analyzer::{self, ReferenceAnalysis};
use refdraft_core::config::Config;

use super::read_input_file;

/// Arguments for the `topics` subcommand.
#[derive(Args, Debug)]
pub struct TopicsArgs {
    /// Reference file (`-` for stdin).
    pub file: Utf8PathBuf,
}

#[derive(Serialize)]
struct TopicsOutput {
    #[serde(flatten)]
    analysis: ReferenceAnalysis,
    keywords: Vec<String>,
}

/// Print what the analyzer sees in a reference file.
#[instrument(name = "cmd_topics", skip_all, fields(file = %args.file))]
pub fn cmd_topics(args: TopicsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing topics command");

    let text = read_input_file(&args.file, config.effective_max_input_bytes())?;
    let out = TopicsOutput {
        analysis: analyzer::analyze_reference(&text),
        keywords: analyzer::preview_keywords(&text),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "Topics".bold().underline());
    for (i, topic) in out.analysis.topics.iter().enumerate() {
        println!("{}. {}", i + 1, topic.cyan());
    }
    println!();
    println!("{}", "Key sentences".bold().underline());
    for sentence in &out.analysis.key_sentences {
        println!("- {sentence}");
    }
    println!();
    println!("{}: {}", "Keywords".dimmed(), out.keywords.join(", "));
    println!("{}: {}", "Characters".dimmed(), out.analysis.char_count);
    Ok(())
}
