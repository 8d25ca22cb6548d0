//! Generation settings passed explicitly to the analyzer and humanizer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default creativity when none is configured.
pub const DEFAULT_CREATIVITY: f64 = 0.7;

/// Default advisory target length in words.
pub const DEFAULT_LENGTH: u32 = 1000;

/// Voice the generated document claims to be written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Tone {
    /// Formal business register (default).
    #[default]
    Professional,
    /// Relaxed, spoken register.
    Conversational,
    /// Warm and approachable.
    Friendly,
    /// Confident and expert.
    Authoritative,
    /// Precise and domain-specific.
    Technical,
}

impl Tone {
    /// Returns the tone as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Conversational => "conversational",
            Self::Friendly => "friendly",
            Self::Authoritative => "authoritative",
            Self::Technical => "technical",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one generation call.
///
/// Every field has a default, so partial tables in config files and partial
/// JSON objects in MCP calls deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerationConfig {
    /// Voice named in the content summary.
    pub tone: Tone,
    /// Target length in words. Advisory only; the template does not use it.
    pub length: u32,
    /// Probability that each humanizer transformation fires, in `[0, 1]`.
    pub creativity: f64,
    /// Emit the Key Topics and Detailed Analysis sections.
    pub include_headings: bool,
    /// Emit the Main Points section.
    pub include_bullets: bool,
    /// Emit the Frequently Asked Questions section.
    pub include_faq: bool,
    /// Emit the Conclusion section.
    pub include_conclusion: bool,
    /// Emit the Next Steps call to action.
    pub include_cta: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            length: DEFAULT_LENGTH,
            creativity: DEFAULT_CREATIVITY,
            include_headings: true,
            include_bullets: true,
            include_faq: false,
            include_conclusion: true,
            include_cta: true,
        }
    }
}

impl GenerationConfig {
    /// Creativity clamped to `[0, 1]`. NaN is treated as zero.
    pub fn creativity(&self) -> f64 {
        clamp_creativity(self.creativity)
    }
}

/// Per-call changes to a base [`GenerationConfig`].
///
/// Unset fields keep the base value, so a caller can flip one section
/// without restating the rest of the configured settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerationOverrides {
    /// Voice named in the content summary.
    pub tone: Option<Tone>,
    /// Target length in words.
    pub length: Option<u32>,
    /// Humanizer creativity in `[0, 1]`.
    pub creativity: Option<f64>,
    /// Emit the Key Topics and Detailed Analysis sections.
    pub include_headings: Option<bool>,
    /// Emit the Main Points section.
    pub include_bullets: Option<bool>,
    /// Emit the Frequently Asked Questions section.
    pub include_faq: Option<bool>,
    /// Emit the Conclusion section.
    pub include_conclusion: Option<bool>,
    /// Emit the Next Steps call to action.
    pub include_cta: Option<bool>,
}

impl GenerationOverrides {
    /// `base` with every set field replaced.
    pub fn apply(&self, base: &GenerationConfig) -> GenerationConfig {
        GenerationConfig {
            tone: self.tone.unwrap_or(base.tone),
            length: self.length.unwrap_or(base.length),
            creativity: self.creativity.unwrap_or(base.creativity),
            include_headings: self.include_headings.unwrap_or(base.include_headings),
            include_bullets: self.include_bullets.unwrap_or(base.include_bullets),
            include_faq: self.include_faq.unwrap_or(base.include_faq),
            include_conclusion: self.include_conclusion.unwrap_or(base.include_conclusion),
            include_cta: self.include_cta.unwrap_or(base.include_cta),
        }
    }
}

/// Clamp a creativity value to `[0, 1]`, mapping NaN to zero.
pub fn clamp_creativity(creativity: f64) -> f64 {
    if creativity.is_nan() {
        0.0
    } else {
        creativity.clamp(0.0, 1.0)
    }
}
