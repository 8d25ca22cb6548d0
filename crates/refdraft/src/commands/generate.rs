//! Generate command: reference file in, templated (optionally humanized) document out.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use refdraft_core::config::Config;
use refdraft_core::reference::load_reference_file;
use refdraft_core::{
    DetectionReport, GenerationConfig, GenerationOverrides, Pipeline, PipelineOutput,
    SeededRandom, Tone, export,
};

use super::print_detection;

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Reference file (.txt, .pdf or .docx).
    pub file: Utf8PathBuf,

    /// Voice named in the content summary.
    #[arg(long, value_enum)]
    pub tone: Option<Tone>,

    /// Target length in words.
    #[arg(long)]
    pub length: Option<u32>,

    /// Humanizer creativity between 0 and 1.
    #[arg(long)]
    pub creativity: Option<f64>,

    /// Include Key Topics and Detailed Analysis.
    #[arg(long, overrides_with = "no_headings")]
    pub headings: bool,

    /// Omit Key Topics and Detailed Analysis.
    #[arg(long, overrides_with = "headings")]
    pub no_headings: bool,

    /// Include Main Points.
    #[arg(long, overrides_with = "no_bullets")]
    pub bullets: bool,

    /// Omit Main Points.
    #[arg(long, overrides_with = "bullets")]
    pub no_bullets: bool,

    /// Include the FAQ section.
    #[arg(long, overrides_with = "no_faq")]
    pub faq: bool,

    /// Omit the FAQ section.
    #[arg(long, overrides_with = "faq")]
    pub no_faq: bool,

    /// Include the Conclusion.
    #[arg(long, overrides_with = "no_conclusion")]
    pub conclusion: bool,

    /// Omit the Conclusion.
    #[arg(long, overrides_with = "conclusion")]
    pub no_conclusion: bool,

    /// Include the Next Steps call to action.
    #[arg(long, overrides_with = "no_cta")]
    pub cta: bool,

    /// Omit the Next Steps call to action.
    #[arg(long, overrides_with = "cta")]
    pub no_cta: bool,

    /// Run the humanizer over the generated document.
    #[arg(long)]
    pub humanize: bool,

    /// Also run the simulated external detection check.
    #[arg(long)]
    pub check: bool,

    /// Seed for reproducible humanization.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the result into DIR as `<name>_content.txt`.
    #[arg(long, value_name = "DIR")]
    pub export: Option<Utf8PathBuf>,
}

/// `Some(true)` for `--x`, `Some(false)` for `--no-x`, `None` when neither
/// was given. The later flag wins when both appear.
const fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl GenerateArgs {
    fn overrides(&self) -> GenerationOverrides {
        GenerationOverrides {
            tone: self.tone,
            length: self.length,
            creativity: self.creativity,
            include_headings: switch(self.headings, self.no_headings),
            include_bullets: switch(self.bullets, self.no_bullets),
            include_faq: switch(self.faq, self.no_faq),
            include_conclusion: switch(self.conclusion, self.no_conclusion),
            include_cta: switch(self.cta, self.no_cta),
        }
    }

    /// Apply flag overrides on top of the configured generation settings.
    fn generation_config(&self, base: &GenerationConfig) -> GenerationConfig {
        self.overrides().apply(base)
    }
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    source: &'a str,
    #[serde(flatten)]
    output: &'a PipelineOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<&'a DetectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported: Option<&'a Utf8PathBuf>,
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Generate a document from a reference file.
#[instrument(name = "cmd_generate", skip_all, fields(file = %args.file))]
pub async fn cmd_generate(
    args: GenerateArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let generation = args.generation_config(&config.generation);
    debug!(
        tone = %generation.tone,
        creativity = generation.creativity,
        humanize = args.humanize,
        "executing generate command"
    );

    let reference = load_reference_file(&args.file, config.effective_max_input_bytes())
        .with_context(|| format!("failed to load reference {}", args.file))?;
    let pipeline = Pipeline::from_config(config);
    let mut rng = SeededRandom::from_optional_seed(args.seed.or(config.seed));

    let progress = spinner(!global_json && !quiet);
    progress.set_message(format!("Generating from {}", reference.name));
    let output = pipeline
        .run(&reference.content, &generation, args.humanize, &mut rng)
        .await;
    let output = match output {
        Ok(output) => output,
        Err(e) => {
            progress.finish_and_clear();
            return Err(anyhow::Error::new(e).context("generation failed"));
        }
    };

    let check = if args.check {
        progress.set_message("Checking detectability");
        let report = pipeline.check_detection(&output.content, &mut rng).await;
        Some(report.inspect_err(|_| progress.finish_and_clear())?)
    } else {
        None
    };
    progress.finish_and_clear();

    let exported = match args.export {
        Some(ref dir) => Some(
            export::export_content(dir, Some(&reference.name), &output.content)
                .with_context(|| format!("failed to export into {dir}"))?,
        ),
        None => None,
    };

    if global_json {
        let json = GenerateOutput {
            source: &reference.name,
            output: &output,
            check: check.as_ref(),
            exported: exported.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", output.content);
    if !quiet {
        print_detection(&output.detection);
        if let Some(ref report) = check {
            print_detection(report);
        }
        if let Some(ref path) = exported {
            eprintln!("{} {}", "Exported:".green(), path);
        }
    }
    Ok(())
}
