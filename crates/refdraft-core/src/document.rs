//! The generated document and its sections.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which template slot a section fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Top-level heading.
    Title,
    /// Bulleted list of topics.
    KeyTopics,
    /// First three key sentences as bullets.
    MainPoints,
    /// Tone, size and leading topics.
    ContentSummary,
    /// Key sentences four to six under numbered sub-headings.
    DetailedAnalysis,
    /// Three numbered recommendations.
    Recommendations,
    /// Three fixed questions and answers.
    Faq,
    /// Closing paragraph naming every topic.
    Conclusion,
    /// Fixed next-steps text.
    CallToAction,
}

/// One rendered section of a [`GeneratedDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    /// Template slot.
    pub kind: SectionKind,
    /// Markdown text, including its heading and trailing blank line.
    pub content: String,
}

/// A document assembled from a reference text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedDocument {
    /// Sections in render order.
    pub sections: Vec<Section>,
    /// Topics the document was built from, most frequent first.
    pub topics: Vec<String>,
    /// Key sentences the document was built from, in reference order.
    pub key_sentences: Vec<String>,
}

impl GeneratedDocument {
    /// Concatenate every section into one text blob.
    pub fn render(&self) -> String {
        self.sections.iter().map(|s| s.content.as_str()).collect()
    }

    /// The section of the given kind, if present.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Kinds of every section, in render order.
    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}

impl std::fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for section in &self.sections {
            f.write_str(&section.content)?;
        }
        Ok(())
    }
}
