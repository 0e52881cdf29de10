//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes CEFR assessment over the MCP protocol so AI assistants can grade
//! text through stdio transport. Each tool is a thin wrapper over
//! `cefr_lens_core`; the server itself holds only the scoring defaults and
//! the input limit resolved from configuration.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use cefr_lens_core::{AssessError, AssessmentReport, CefrLevel, ScoreConfig, ScoreOption, Weights};

use crate::commands::lemma::lemma_entries;

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

/// Parameters for the `assess_text` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct AssessTextParams {
    /// The English text to assess.
    pub text: String,
    /// Analyze long texts whole instead of sampling.
    pub full_analysis: Option<bool>,
    /// Word count above which texts are sampled.
    pub sampling_threshold: Option<usize>,
    /// Sub-score weights; ignored unless non-negative and summing to 1.0.
    pub weights: Option<Weights>,
    /// Highest acceptable level. The response reports whether the text passes.
    pub max_level: Option<CefrLevel>,
}

/// Parameters for the `lemmatize` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct LemmatizeParams {
    /// Words to reduce to their base form.
    pub words: Vec<String>,
}

#[derive(Serialize)]
struct AssessTextResponse {
    #[serde(flatten)]
    report: AssessmentReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_level: Option<CefrLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pass: Option<bool>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

fn assess_error(err: AssessError) -> McpError {
    match err {
        AssessError::LexicalStoreUnavailable(_) => McpError::internal_error(err.to_string(), None),
        _ => McpError::invalid_params(err.to_string(), None),
    }
}

/// MCP server exposing CEFR assessment to AI assistants.
#[derive(Clone)]
pub struct CefrServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    score_config: ScoreConfig,
    max_input_bytes: Option<usize>,
}

impl Default for CefrServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl CefrServer {
    /// Create a server with default scoring and the default input limit.
    pub fn new() -> Self {
        Self::with_config(
            ScoreConfig::default(),
            Some(cefr_lens_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }

    /// Create a server with configured scoring defaults and input limit.
    pub fn with_config(score_config: ScoreConfig, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            score_config,
            max_input_bytes,
        }
    }

    /// Report the server version and the scoring defaults it applies.
    #[tool(description = "Get the cefr-lens version and the default scoring settings (weights, sampling threshold)")]
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
            "score_config": self.score_config,
        });

        let text = if params.format == "json" {
            to_json(&info)?
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

    /// Assess the CEFR level of a text.
    #[tool(
        description = "Estimate the CEFR level (A1-C2) of English text. Returns the level, a 1.0-6.0 score, confidence, and vocabulary, syntax, and readability sub-scores."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn assess_text(
        &self,
        Parameters(params): Parameters<AssessTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "assess_text", "executing MCP tool");

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        let mut config = self.score_config;
        if let Some(w) = params.weights {
            config = config.apply(ScoreOption::Weights(w.vocabulary, w.syntax, w.readability));
        }
        if params.full_analysis == Some(true) {
            config = config.apply(ScoreOption::FullAnalysis);
        }
        if let Some(threshold) = params.sampling_threshold {
            config = config.apply(ScoreOption::SamplingThreshold(threshold));
        }

        let report = cefr_lens_core::assess(&params.text, &config).map_err(assess_error)?;
        let pass = params.max_level.map(|max| !report.exceeds(max));

        tracing::info!(
            tool = "assess_text",
            level = %report.level,
            score = report.score,
            "MCP tool completed"
        );
        let response = AssessTextResponse {
            report,
            max_level: params.max_level,
            pass,
        };
        Ok(CallToolResult::success(vec![Content::text(to_json(&response)?)]))
    }

    /// Reduce words to their base forms.
    #[tool(
        description = "Lemmatize English words (running -> run, children -> child) and report each word's CEFR level when known."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", words = params.words.len()))]
    fn lemmatize(
        &self,
        Parameters(params): Parameters<LemmatizeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "lemmatize", "executing MCP tool");

        let store = cefr_lens_core::lexicon::initialize()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let entries = lemma_entries(&params.words, store);

        tracing::info!(tool = "lemmatize", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&entries)?)]))
    }
}

#[tool_handler]
impl ServerHandler for CefrServer {
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
                "{} MCP server. Use assess_text to estimate the CEFR level of English text and lemmatize to find base forms.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
