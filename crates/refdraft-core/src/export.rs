//! Plain-text export of generated content.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{GenerationError, GenerationResult};
use crate::text;

/// File name used when no source document is known.
pub const DEFAULT_EXPORT_NAME: &str = "generated_content.txt";

/// Suffix appended to the source document's base name.
pub const EXPORT_SUFFIX: &str = "_content.txt";

/// Content shorter than this many characters is not worth exporting or
/// checking.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Export file name for content generated from `source_name`.
///
/// The base name is everything before the first `.`, so `report.v2.txt`
/// exports as `report_content.txt`. A missing or empty source name falls back
/// to [`DEFAULT_EXPORT_NAME`].
pub fn export_file_name(source_name: Option<&str>) -> String {
    match source_name {
        Some(name) if !name.is_empty() => {
            let base = name.split('.').next().unwrap_or_default();
            format!("{base}{EXPORT_SUFFIX}")
        }
        _ => DEFAULT_EXPORT_NAME.to_string(),
    }
}

/// Reject content too short to export or check.
pub fn ensure_substantial(content: &str) -> GenerationResult<()> {
    let length = text::char_len(content);
    if length < MIN_CONTENT_CHARS {
        return Err(GenerationError::InsufficientContent {
            length,
            minimum: MIN_CONTENT_CHARS,
        });
    }
    Ok(())
}

/// Write `content` into `dir` under the export name for `source_name`.
///
/// The bytes written are exactly the bytes of `content`. Returns the path of
/// the written file.
#[tracing::instrument(skip(content), fields(content_len = content.len()))]
pub fn export_content(
    dir: &Utf8Path,
    source_name: Option<&str>,
    content: &str,
) -> GenerationResult<Utf8PathBuf> {
    ensure_substantial(content)?;

    let path = dir.join(export_file_name(source_name));
    std::fs::write(path.as_std_path(), content.as_bytes()).map_err(|source| {
        GenerationError::Write {
            path: path.clone(),
            source,
        }
    })?;
    tracing::info!(path = %path, "content exported");
    Ok(path)
}
