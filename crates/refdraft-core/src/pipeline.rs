//! Async generation pipeline: validate, wait, analyze, humanize, score.
//!
//! The waits stand in for the latency of a remote model. Dropping a pipeline
//! future is the only way to cancel it and leaves nothing behind.

use std::time::Duration;

use serde::Serialize;

use crate::analyzer;
use crate::config::{Config, DEFAULT_DETECT_DELAY, DEFAULT_GENERATE_DELAY, DEFAULT_MAX_INPUT_BYTES};
use crate::detection::{self, DetectionReport};
use crate::document::GeneratedDocument;
use crate::error::{GenerationError, GenerationResult};
use crate::export;
use crate::generation::GenerationConfig;
use crate::humanizer;
use crate::random::RandomSource;

/// Everything one generation run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// The assembled document before humanization.
    pub document: GeneratedDocument,
    /// Final text: the rendered document, humanized when requested.
    pub content: String,
    /// Whether `content` went through the humanizer.
    pub humanized: bool,
    /// Heuristic score of `content`.
    pub detection: DetectionReport,
}

/// Generation and detection calls with simulated latency.
#[derive(Debug, Clone)]
pub struct Pipeline {
    generate_delay: Duration,
    detect_delay: Duration,
    max_input_bytes: Option<usize>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            generate_delay: DEFAULT_GENERATE_DELAY,
            detect_delay: DEFAULT_DETECT_DELAY,
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }
}

impl Pipeline {
    /// Pipeline with the default delays and input limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline using the delays and input limit from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            generate_delay: config.generate_delay(),
            detect_delay: config.detect_delay(),
            max_input_bytes: config.effective_max_input_bytes(),
        }
    }

    /// Set the wait before each generation.
    pub const fn with_generate_delay(mut self, delay: Duration) -> Self {
        self.generate_delay = delay;
        self
    }

    /// Set the wait before each detection check.
    pub const fn with_detect_delay(mut self, delay: Duration) -> Self {
        self.detect_delay = delay;
        self
    }

    /// Set the reference size limit in bytes. `None` disables it.
    pub const fn with_max_input_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Reject empty, whitespace-only and oversized references.
    pub fn validate_reference(&self, reference: &str) -> GenerationResult<()> {
        if reference.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }
        if let Some(limit) = self.max_input_bytes
            && reference.len() > limit
        {
            return Err(GenerationError::InputTooLarge {
                size: reference.len(),
                limit,
            });
        }
        Ok(())
    }

    /// Validate `reference`, wait, then analyze it on the blocking pool.
    #[tracing::instrument(skip_all, fields(reference_len = reference.len(), tone = %config.tone))]
    pub async fn generate(
        &self,
        reference: &str,
        config: &GenerationConfig,
    ) -> GenerationResult<GeneratedDocument> {
        self.validate_reference(reference)?;
        tokio::time::sleep(self.generate_delay).await;

        let reference = reference.to_string();
        let config = config.clone();
        let document = run_blocking(move || analyzer::analyze(&reference, &config)).await?;
        tracing::info!(
            sections = document.sections.len(),
            topics = document.topics.len(),
            "document generated"
        );
        Ok(document)
    }

    /// Generate, optionally humanize, then score the result.
    pub async fn run(
        &self,
        reference: &str,
        config: &GenerationConfig,
        humanize: bool,
        rng: &mut (dyn RandomSource + Send),
    ) -> GenerationResult<PipelineOutput> {
        let document = self.generate(reference, config).await?;
        let rendered = document.render();
        let content = if humanize {
            humanizer::humanize(&rendered, config.creativity(), rng)
        } else {
            rendered
        };
        let detection = detection::estimate(&content);
        Ok(PipelineOutput {
            document,
            content,
            humanized: humanize,
            detection,
        })
    }

    /// Simulated external detection check on editor content.
    ///
    /// Content under 100 characters is rejected before the wait.
    #[tracing::instrument(skip_all, fields(content_len = content.len()))]
    pub async fn check_detection(
        &self,
        content: &str,
        rng: &mut (dyn RandomSource + Send),
    ) -> GenerationResult<DetectionReport> {
        export::ensure_substantial(content)?;
        tokio::time::sleep(self.detect_delay).await;
        let report = detection::simulate(rng);
        tracing::info!(score = report.score, "detection check complete");
        Ok(report)
    }
}

/// Run `f` on the blocking pool, turning a panic into [`GenerationError::Processing`].
async fn run_blocking<F, T>(f: F) -> GenerationResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "processing task failed");
        GenerationError::Processing(e.to_string())
    })
}
