//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use owo_colors::OwoColorize;
use refdraft_core::{DetectionReport, Verdict};

pub mod generate;
pub mod humanize;
pub mod info;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod topics;

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a text file, or stdin for `-`, and validate its size against the
/// configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read standard input")?;
        check_size(path, content.len(), max_bytes)?;
        return Ok(content);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    check_size(path, usize::try_from(metadata.len()).unwrap_or(usize::MAX), max_bytes)?;

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn check_size(path: &Utf8Path, size: usize, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && size > max
    {
        anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
    }
    Ok(())
}

/// Print a detection report as one colored line on stderr.
pub fn print_detection(report: &DetectionReport) {
    let score = format!("{}%", report.score);
    let score = match report.verdict {
        Verdict::Low => score.green().to_string(),
        Verdict::Elevated => score.yellow().to_string(),
    };
    eprintln!(
        "{} {} ({}): {}",
        "Detection score:".bold(),
        score,
        report.model.as_str().dimmed(),
        report.verdict.message()
    );
}
