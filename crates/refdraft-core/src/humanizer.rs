//! Stylistic perturbation that makes text read less machine-written.
//!
//! [`humanize`] runs three passes, each gated by the creativity probability:
//!
//! 1. Structural: every third sentence is wrapped in a transition opener and
//!    every second paragraph is poured into a three-clause frame.
//! 2. Pattern: for each [`PatternCategory`], one match is picked at random and
//!    its first occurrence is replaced by a [`vary`]-ed copy.
//! 3. Lexical: [`vary`] runs once over the whole result.
//!
//! Output is never shorter than input. No attempt is made to keep the text
//! grammatical.

use regex::Captures;

use crate::generation::clamp_creativity;
use crate::patterns::{
    BE_VERBS, CONJUNCTIONS, CONNECTIVES, CONTENT_SLOT, INTENSIFIERS, PARAGRAPH_TEMPLATES,
    PatternCategory, SENTENCE_TEMPLATES,
};
use crate::random::RandomSource;

/// Chance of appending "actually" after a form of "to be".
pub const ACTUALLY_PROBABILITY: f64 = 0.3;

/// Chance of appending "quite" after an intensifier.
pub const QUITE_PROBABILITY: f64 = 0.4;

/// Chance of appending a connective after a conjunction.
pub const CONNECTIVE_PROBABILITY: f64 = 0.3;

/// Rewrite `text` with the given creativity in `[0, 1]`.
///
/// Values outside the range are clamped. At `0.0` the text is returned
/// unchanged; at `1.0` every creativity gate opens, so at least the first
/// sentence is always rewritten.
#[tracing::instrument(skip(text, rng), fields(text_len = text.len()))]
pub fn humanize(text: &str, creativity: f64, rng: &mut dyn RandomSource) -> String {
    let creativity = clamp_creativity(creativity);
    if creativity == 0.0 {
        return text.to_string();
    }

    let mut out = text.to_string();

    if rng.chance(creativity) {
        out = restructure_sentences(&out, creativity, rng);
        out = restructure_paragraphs(&out, creativity, rng);
    }

    for category in PatternCategory::ALL {
        if rng.chance(creativity) {
            out = vary_one_match(&out, category, rng);
        }
    }

    let out = vary(&out, rng);
    tracing::debug!(
        input_len = text.len(),
        output_len = out.len(),
        "humanized"
    );
    out
}

/// Apply the three lexical variations in sequence over the whole text.
///
/// Each match is extended independently: "is/are/was/were" gain " actually",
/// "very/really/quite" gain " quite", and "and/but/or" gain a comma and a
/// random connective.
pub fn vary(text: &str, rng: &mut dyn RandomSource) -> String {
    let step = BE_VERBS
        .replace_all(text, |caps: &Captures<'_>| {
            if rng.chance(ACTUALLY_PROBABILITY) {
                format!("{} actually", &caps[0])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    let step = INTENSIFIERS
        .replace_all(&step, |caps: &Captures<'_>| {
            if rng.chance(QUITE_PROBABILITY) {
                format!("{} quite", &caps[0])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    CONJUNCTIONS
        .replace_all(&step, |caps: &Captures<'_>| {
            if rng.chance(CONNECTIVE_PROBABILITY) {
                let connective = CONNECTIVES[rng.pick(CONNECTIVES.len())];
                format!("{}, {connective}", &caps[0])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn fill(template: &str, content: &str) -> String {
    template.replace(CONTENT_SLOT, content)
}

fn restructure_sentences(text: &str, creativity: f64, rng: &mut dyn RandomSource) -> String {
    text.split(". ")
        .enumerate()
        .map(|(i, sentence)| {
            if i % 3 == 0 && rng.chance(creativity) {
                let template = SENTENCE_TEMPLATES[rng.pick(SENTENCE_TEMPLATES.len())];
                fill(template, sentence)
            } else {
                sentence.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(". ")
}

fn restructure_paragraphs(text: &str, creativity: f64, rng: &mut dyn RandomSource) -> String {
    text.split("\n\n")
        .enumerate()
        .map(|(i, paragraph)| {
            if i % 2 == 0 && rng.chance(creativity) {
                let template = PARAGRAPH_TEMPLATES[rng.pick(PARAGRAPH_TEMPLATES.len())];
                // The same paragraph fills all three slots.
                fill(template, paragraph)
            } else {
                paragraph.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn vary_one_match(text: &str, category: PatternCategory, rng: &mut dyn RandomSource) -> String {
    let matches: Vec<&str> = category
        .regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if matches.is_empty() {
        return text.to_string();
    }

    let chosen = matches[rng.pick(matches.len())];
    let varied = vary(chosen, rng);
    tracing::trace!(%category, chosen, varied = %varied, "pattern varied");
    text.replacen(chosen, &varied, 1)
}
