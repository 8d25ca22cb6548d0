//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes generation, humanization and scoring over the MCP
//! protocol, making them available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer: it wraps the same core library that
//! the CLI commands use. Each `#[tool]` method delegates to `refdraft-core`
//! and converts [`GenerationError`]s to `McpError`s by kind. Invalid input
//! becomes an `invalid_params` error, everything else an internal error.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use refdraft_core::config::{Config, DEFAULT_MAX_INPUT_BYTES};
use refdraft_core::{
    ErrorKind, GenerationConfig, GenerationError, GenerationOverrides, Pipeline, SeededRandom,
    analyzer, detection, humanizer,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `generate_document` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GenerateDocumentParams {
    /// Reference text to build the document from.
    pub reference: String,
    /// Generation settings. Omitted fields keep the server's configured values.
    pub settings: Option<GenerationOverrides>,
    /// Run the humanizer over the generated document.
    #[serde(default)]
    pub humanize: bool,
    /// Seed for a reproducible rewrite.
    pub seed: Option<u64>,
}

/// Parameters for the `humanize_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct HumanizeTextParams {
    /// The text to rewrite.
    pub text: String,
    /// Probability that each transformation fires, between 0 and 1.
    pub creativity: Option<f64>,
    /// Seed for a reproducible rewrite.
    pub seed: Option<u64>,
}

/// Parameters for the `estimate_detection` and `extract_topics` tools.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `simulate_detection` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SimulateDetectionParams {
    /// The text to check; at least 100 characters.
    pub text: String,
    /// Seed for the simulated detector.
    pub seed: Option<u64>,
}

#[derive(Serialize)]
struct HumanizeResponse {
    content: String,
    creativity: f64,
    detection: detection::DetectionReport,
}

#[derive(Serialize)]
struct TopicsResponse {
    #[serde(flatten)]
    analysis: analyzer::ReferenceAnalysis,
    keywords: Vec<String>,
}

/// MCP server exposing refdraft to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct DraftServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    pipeline: Pipeline,
    defaults: GenerationConfig,
    seed: Option<u64>,
    max_input_bytes: Option<usize>,
}

impl Default for DraftServer {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftServer {
    /// Server configured from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            pipeline: Pipeline::from_config(config),
            defaults: config.generation.clone(),
            seed: config.seed,
            max_input_bytes: config.effective_max_input_bytes(),
            ..Self::new()
        }
    }

    /// Replace the pipeline, e.g. to change its delays.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    fn rng(&self, seed: Option<u64>) -> SeededRandom {
        SeededRandom::from_optional_seed(seed.or(self.seed))
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(limit) if text.len() > limit => Err(tool_error(GenerationError::InputTooLarge {
                size: text.len(),
                limit,
            })),
            _ => Ok(()),
        }
    }
}

/// Map a core error onto an MCP error by its kind.
fn tool_error(err: GenerationError) -> McpError {
    match err.kind() {
        ErrorKind::InvalidInput => McpError::invalid_params(err.to_string(), None),
        ErrorKind::FileReadFailure | ErrorKind::ProcessingFailure => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_router]
impl DraftServer {
    /// Create a new MCP server instance with default settings.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            pipeline: Pipeline::new(),
            defaults: GenerationConfig::default(),
            seed: None,
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Generate a document from reference text.
    #[tool(
        description = "Generate a structured document (headings, bullets, summary, optional FAQ, conclusion and call to action) from reference text. Optionally humanize it. Returns the content and a heuristic detection score."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", humanize = params.humanize))]
    async fn generate_document(
        &self,
        Parameters(params): Parameters<GenerateDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "generate_document",
            reference_len = params.reference.len(),
            "executing MCP tool"
        );

        let settings = params
            .settings
            .map_or_else(|| self.defaults.clone(), |o| o.apply(&self.defaults));
        let mut rng = self.rng(params.seed);
        let output = self
            .pipeline
            .run(&params.reference, &settings, params.humanize, &mut rng)
            .await
            .map_err(tool_error)?;

        tracing::info!(
            tool = "generate_document",
            score = output.detection.score,
            "MCP tool completed"
        );
        json_result(&output)
    }

    /// Humanize text.
    #[tool(
        description = "Rewrite text with transition openers, paragraph frames and small lexical variations so it reads less machine-written. Creativity (0-1) sets how often each change fires."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn humanize_text(
        &self,
        Parameters(params): Parameters<HumanizeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "humanize_text", creativity = ?params.creativity, "executing MCP tool");
        self.check_size(&params.text)?;

        let creativity = refdraft_core::generation::clamp_creativity(
            params.creativity.unwrap_or(self.defaults.creativity),
        );
        let mut rng = self.rng(params.seed);
        let content = humanizer::humanize(&params.text, creativity, &mut rng);
        let response = HumanizeResponse {
            detection: detection::estimate(&content),
            content,
            creativity,
        };

        tracing::info!(tool = "humanize_text", "MCP tool completed");
        json_result(&response)
    }

    /// Heuristic detection score.
    #[tool(
        description = "Estimate how likely text is to be flagged as AI-generated (10-50%, lower is more human). Deterministic; returns per-category pattern counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn estimate_detection(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "estimate_detection", "executing MCP tool");
        self.check_size(&params.text)?;

        let report = detection::estimate(&params.text);

        tracing::info!(
            tool = "estimate_detection",
            score = report.score,
            "MCP tool completed"
        );
        json_result(&report)
    }

    /// Simulated external detector.
    #[tool(
        description = "Run the simulated external AI-detection check (random 5-18%, independent of the text). Requires at least 100 characters."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn simulate_detection(
        &self,
        Parameters(params): Parameters<SimulateDetectionParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "simulate_detection", "executing MCP tool");
        self.check_size(&params.text)?;

        let mut rng = self.rng(params.seed);
        let report = self
            .pipeline
            .check_detection(&params.text, &mut rng)
            .await
            .map_err(tool_error)?;

        tracing::info!(
            tool = "simulate_detection",
            score = report.score,
            "MCP tool completed"
        );
        json_result(&report)
    }

    /// Topics, key sentences and keyword chips of a reference text.
    #[tool(
        description = "Extract the top five topics, up to ten key sentences and up to eight keywords from reference text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn extract_topics(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "extract_topics", "executing MCP tool");
        self.check_size(&params.text)?;

        let response = TopicsResponse {
            analysis: analyzer::analyze_reference(&params.text),
            keywords: analyzer::preview_keywords(&params.text),
        };

        tracing::info!(
            tool = "extract_topics",
            topics = response.analysis.topics.len(),
            "MCP tool completed"
        );
        json_result(&response)
    }
}

#[tool_handler]
impl ServerHandler for DraftServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Generate documents from reference text, humanize them, and score detectability.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
