//! Pattern catalogs shared by the humanizer and the detectability estimator.
//!
//! Three coarse lexical categories are matched case-insensitively with no
//! word boundaries: pronoun + verb phrases, transition phrases, and filler
//! words. Alternatives are tried in listed order, so a short entry such as
//! "In" shadows a longer one such as "In conclusion" that starts the same way.
//! An ellipsis inside an entry ("Both...and") stands for any three characters
//! other than a newline.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Subject pronouns that open a verb phrase.
pub const SUBJECT_PRONOUNS: &[&str] = &["I", "we", "you", "they", "he", "she", "it"];

/// Verbs that follow a subject pronoun in a verb phrase.
pub const PHRASE_VERBS: &[&str] = &[
    "think", "believe", "feel", "know", "understand", "realize", "notice", "find", "see",
    "consider", "suggest", "propose", "argue", "claim", "state", "mention", "point out",
    "emphasize", "highlight", "note", "observe", "recognize", "acknowledge", "admit", "concede",
    "agree", "disagree", "doubt", "question", "wonder", "suspect", "assume", "presume", "guess",
    "estimate", "predict", "expect", "hope", "wish", "want", "need", "desire", "prefer", "choose",
    "decide", "plan", "intend", "attempt", "try", "manage", "succeed", "fail", "achieve",
    "accomplish", "complete", "finish", "start", "begin", "continue", "keep", "maintain",
    "sustain", "support", "help", "assist", "aid", "facilitate", "enable", "allow", "permit",
    "prevent", "stop", "halt", "cease", "end", "terminate", "conclude", "summarize", "review",
    "analyze", "examine", "investigate", "study", "research", "explore", "discover", "learn",
    "teach", "instruct", "guide", "direct", "lead", "follow", "pursue", "chase", "seek", "search",
    "look", "locate", "identify", "determine", "establish", "set", "fix", "repair", "correct",
    "adjust", "modify", "change", "alter", "transform", "convert", "turn", "make", "create",
    "produce", "generate", "develop", "build", "construct", "form", "shape", "design", "organize",
    "arrange", "prepare", "ready", "set up", "put", "place", "position", "situate", "install",
    "implement", "apply", "use", "utilize", "employ", "adopt", "adapt",
];

/// Transition words and phrases.
pub const TRANSITION_PHRASES: &[&str] = &[
    "In", "On", "At", "By", "For", "With", "Without", "Through", "Throughout", "During", "Before",
    "After", "Since", "Until", "While", "As", "Because", "So", "Therefore", "Thus", "Hence",
    "Consequently", "Accordingly", "As a result", "For this reason", "For these reasons",
    "In conclusion", "To conclude", "To sum up", "In summary", "In short", "In brief",
    "In other words", "That is", "Namely", "Specifically", "In particular", "For example",
    "For instance", "Such as", "Like", "Unlike", "In contrast", "On the other hand", "However",
    "Nevertheless", "Nonetheless", "Still", "Yet", "Even so", "Despite", "In spite of",
    "Although", "Though", "Even though", "Whereas", "On the contrary", "Conversely",
    "In comparison", "Similarly", "Likewise", "In the same way", "Also", "Moreover",
    "Furthermore", "In addition", "Additionally", "Besides", "What's more", "Not only...but also",
    "Both...and", "Either...or", "Neither...nor", "Whether...or", "Not...but", "Rather than",
    "Instead of", "As well as", "Along with", "Together with", "Including", "Especially",
    "Particularly", "Excluding", "Except", "Apart from", "Other than", "In addition to", "As for",
    "Regarding", "Concerning", "With respect to", "With regard to", "In terms of",
    "In relation to", "In connection with", "In the case of", "When it comes to", "As far as",
    "As long as", "As soon as", "As much as", "As many as", "As few as", "As little as",
    "As often as", "As early as", "As late as", "As high as", "As low as", "As big as",
    "As small as", "As good as", "As bad as", "As important as", "As necessary as",
    "As possible as", "As likely as", "As unlikely as", "As certain as", "As uncertain as",
    "As clear as", "As unclear as", "As simple as", "As complex as", "As easy as",
    "As difficult as", "As hard as", "As soft as", "As strong as", "As weak as", "As fast as",
    "As slow as", "As quick as",
];

/// Filler words and hedges.
pub const FILLER_WORDS: &[&str] = &[
    "actually", "basically", "essentially", "practically", "virtually", "literally",
    "figuratively", "technically", "theoretically", "realistically", "ideally", "hopefully",
    "thankfully", "fortunately", "unfortunately", "sadly", "regrettably", "apparently",
    "evidently", "obviously", "clearly", "plainly", "simply", "merely", "just", "only", "even",
    "still", "yet", "already", "now", "then", "soon", "later", "eventually", "finally",
    "ultimately", "fundamentally", "primarily", "mainly", "mostly", "largely", "partly",
    "partially", "somewhat", "slightly", "marginally", "significantly", "substantially",
    "considerably", "greatly", "highly", "extremely", "very", "quite", "rather", "fairly",
    "pretty",
];

/// Sentence openers used to wrap every third sentence.
pub const SENTENCE_TEMPLATES: &[&str] = &[
    "However, {content}",
    "In fact, {content}",
    "Interestingly, {content}",
    "Surprisingly, {content}",
    "Notably, {content}",
    "Specifically, {content}",
    "Particularly, {content}",
    "Especially, {content}",
    "Importantly, {content}",
    "Crucially, {content}",
    "Significantly, {content}",
    "Fundamentally, {content}",
    "Essentially, {content}",
    "Basically, {content}",
    "Primarily, {content}",
    "Mainly, {content}",
    "Mostly, {content}",
    "Largely, {content}",
    "Partly, {content}",
    "Partially, {content}",
];

/// Three-clause paragraph frames. Every `{content}` slot receives the same text.
pub const PARAGRAPH_TEMPLATES: &[&str] = &[
    "First, {content}. Then, {content}. Finally, {content}.",
    "Initially, {content}. Subsequently, {content}. Ultimately, {content}.",
    "To begin with, {content}. Moreover, {content}. In conclusion, {content}.",
    "On one hand, {content}. On the other hand, {content}. Therefore, {content}.",
    "While {content}, {content}. As a result, {content}.",
];

/// Placeholder replaced by the wrapped sentence or paragraph.
pub const CONTENT_SLOT: &str = "{content}";

/// Discourse connectives appended after a conjunction.
pub const CONNECTIVES: &[&str] = &["however", "moreover", "furthermore", "nevertheless"];

/// One of the three pattern categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Pronoun followed by a verb ("we believe", "it helps").
    VerbPhrase,
    /// Transition words and phrases ("However", "In addition").
    TransitionPhrase,
    /// Filler words and hedges ("basically", "very").
    FillerWord,
}

impl PatternCategory {
    /// All categories in matching order.
    pub const ALL: [Self; 3] = [Self::VerbPhrase, Self::TransitionPhrase, Self::FillerWord];

    /// The compiled matcher for this category.
    pub fn regex(self) -> &'static Regex {
        match self {
            Self::VerbPhrase => &VERB_PHRASE_PATTERN,
            Self::TransitionPhrase => &TRANSITION_PATTERN,
            Self::FillerWord => &FILLER_PATTERN,
        }
    }

    /// Number of matches of this category in `text`.
    pub fn count_matches(self, text: &str) -> usize {
        self.regex().find_iter(text).count()
    }

    /// Returns the category name as a snake_case string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VerbPhrase => "verb_phrase",
            Self::TransitionPhrase => "transition_phrase",
            Self::FillerWord => "filler_word",
        }
    }
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escaped alternatives, keeping `...` as a three-character wildcard.
fn alternation(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| regex::escape(item).replace(r"\.\.\.", "..."))
        .collect::<Vec<_>>()
        .join("|")
}

static VERB_PHRASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?i)(?:{}) (?:{})",
        alternation(SUBJECT_PRONOUNS),
        alternation(PHRASE_VERBS)
    ))
    .expect("valid regex")
});

static TRANSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)(?:{})", alternation(TRANSITION_PHRASES))).expect("valid regex")
});

static FILLER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)(?:{})", alternation(FILLER_WORDS))).expect("valid regex")
});

/// Forms of "to be" that take a trailing "actually".
pub(crate) static BE_VERBS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:is|are|was|were)\b").expect("valid regex"));

/// Intensifiers that take a trailing "quite".
pub(crate) static INTENSIFIERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:very|really|quite)\b").expect("valid regex"));

/// Conjunctions that take a trailing connective.
pub(crate) static CONJUNCTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:and|but|or)\b").expect("valid regex"));
