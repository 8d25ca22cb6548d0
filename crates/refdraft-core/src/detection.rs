//! Detectability scoring.
//!
//! Two independent score models exist and are kept apart on purpose:
//!
//! - [`estimate_score`] is a deterministic heuristic in `[10, 50]` that drops
//!   as human-like pattern density rises.
//! - [`simulated_detection_score`] stands in for an external detector and
//!   returns a uniform random value in `[5, 18]`, whatever the input.
//!
//! [`DetectionReport::model`] records which one produced a score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::patterns::PatternCategory;
use crate::random::RandomSource;

/// Score assigned to text with no human-like patterns.
pub const BASE_SCORE: u8 = 50;

/// Floor of the heuristic score.
pub const MIN_HEURISTIC_SCORE: u8 = 10;

/// Score reduction per pattern match.
pub const REDUCTION_PER_MATCH: usize = 2;

/// Largest total reduction.
pub const MAX_REDUCTION: usize = 40;

/// Lowest simulated score.
pub const MIN_SIMULATED_SCORE: u8 = 5;

/// Highest simulated score.
pub const MAX_SIMULATED_SCORE: u8 = 18;

/// Scores below this are reported as low risk.
pub const LOW_RISK_THRESHOLD: u8 = 20;

/// Which score model produced a [`DetectionReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreModel {
    /// Pattern-density heuristic, `[10, 50]`.
    Heuristic,
    /// Random stand-in for an external detector, `[5, 18]`.
    Simulated,
}

impl ScoreModel {
    /// Lowercase name of the model.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Simulated => "simulated",
        }
    }
}

impl std::fmt::Display for ScoreModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How likely the text is to be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Low probability of being flagged as AI-generated.
    Low,
    /// May be flagged; consider regenerating.
    Elevated,
}

impl Verdict {
    /// Verdict for a percentage score.
    pub const fn for_score(score: u8) -> Self {
        if score < LOW_RISK_THRESHOLD {
            Self::Low
        } else {
            Self::Elevated
        }
    }

    /// One-line explanation for display.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Low => "low probability of being flagged as AI-generated",
            Self::Elevated => "may be detected as AI-generated; consider regenerating",
        }
    }
}

/// Match count for one pattern category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCount {
    /// The pattern category.
    pub category: PatternCategory,
    /// Matches found.
    pub matches: usize,
}

/// Result of scoring a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionReport {
    /// Detection percentage.
    pub score: u8,
    /// Model that produced the score.
    pub model: ScoreModel,
    /// Total pattern matches (zero for the simulated model).
    pub total_matches: usize,
    /// Per-category matches (empty for the simulated model).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<CategoryCount>,
    /// Risk verdict derived from the score.
    pub verdict: Verdict,
}

/// Map a match count onto the heuristic score.
///
/// Non-increasing in `total_matches` and always within `[10, 50]`.
pub fn score_for_matches(total_matches: usize) -> u8 {
    let reduction = total_matches
        .saturating_mul(REDUCTION_PER_MATCH)
        .min(MAX_REDUCTION);
    let score = (BASE_SCORE as usize).saturating_sub(reduction);
    score.max(MIN_HEURISTIC_SCORE as usize) as u8
}

/// Heuristic detectability score of `text`, in `[10, 50]`.
pub fn estimate_score(text: &str) -> u8 {
    let total: usize = PatternCategory::ALL
        .iter()
        .map(|c| c.count_matches(text))
        .sum();
    score_for_matches(total)
}

/// Heuristic score with per-category detail.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn estimate(text: &str) -> DetectionReport {
    let categories: Vec<CategoryCount> = PatternCategory::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            matches: category.count_matches(text),
        })
        .collect();
    let total_matches = categories.iter().map(|c| c.matches).sum();
    let score = score_for_matches(total_matches);
    tracing::debug!(total_matches, score, "heuristic score computed");

    DetectionReport {
        score,
        model: ScoreModel::Heuristic,
        total_matches,
        categories,
        verdict: Verdict::for_score(score),
    }
}

/// Random detection percentage in `[5, 18]`, independent of any text.
pub fn simulated_detection_score(rng: &mut dyn RandomSource) -> u8 {
    let span = (MAX_SIMULATED_SCORE - MIN_SIMULATED_SCORE + 1) as usize;
    MIN_SIMULATED_SCORE + rng.pick(span) as u8
}

/// Simulated score wrapped in a report.
pub fn simulate(rng: &mut dyn RandomSource) -> DetectionReport {
    let score = simulated_detection_score(rng);
    DetectionReport {
        score,
        model: ScoreModel::Simulated,
        total_matches: 0,
        categories: Vec::new(),
        verdict: Verdict::for_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRandom, SequenceSource};

    #[test]
    fn plain_text_scores_base() {
        assert_eq!(estimate_score(""), 50);
        assert_eq!(estimate_score("zzz qqq"), 50);
    }

    #[test]
    fn score_is_monotonic_and_clamped() {
        let mut previous = u8::MAX;
        for matches in 0..100 {
            let score = score_for_matches(matches);
            assert!((10..=50).contains(&score));
            assert!(score <= previous);
            previous = score;
        }
        assert_eq!(score_for_matches(0), 50);
        assert_eq!(score_for_matches(5), 40);
        assert_eq!(score_for_matches(20), 10);
        assert_eq!(score_for_matches(usize::MAX), 10);
    }

    #[test]
    fn more_patterns_never_raise_the_score() {
        let mut text = String::from("zzz");
        let mut previous = estimate_score(&text);
        for _ in 0..30 {
            text.push_str(" we believe");
            let score = estimate_score(&text);
            assert!(score <= previous);
            previous = score;
        }
        assert_eq!(previous, 10);
    }

    #[test]
    fn correlative_pairs_count_once() {
        for text in ["both A and B", "either X or Y", "not a but b"] {
            assert_eq!(estimate_score(text), 48, "{text}");
        }
    }

    #[test]
    fn report_breaks_down_categories() {
        let report = estimate("We believe this. However, basically done.");
        assert_eq!(report.model, ScoreModel::Heuristic);
        assert_eq!(report.categories.len(), 3);
        let sum: usize = report.categories.iter().map(|c| c.matches).sum();
        assert_eq!(sum, report.total_matches);
        assert_eq!(report.score, score_for_matches(report.total_matches));
        assert_eq!(report.score, estimate_score("We believe this. However, basically done."));
    }

    #[test]
    fn simulated_range() {
        let mut rng = SeededRandom::from_seed(3);
        for _ in 0..1000 {
            let score = simulated_detection_score(&mut rng);
            assert!((5..=18).contains(&score));
        }
    }

    #[test]
    fn simulated_extremes() {
        assert_eq!(simulated_detection_score(&mut SequenceSource::constant(0.0)), 5);
        assert_eq!(simulated_detection_score(&mut SequenceSource::constant(0.999)), 18);
    }

    #[test]
    fn simulated_report_is_low_risk() {
        let report = simulate(&mut SequenceSource::constant(0.5));
        assert_eq!(report.model, ScoreModel::Simulated);
        assert_eq!(report.verdict, Verdict::Low);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn verdict_threshold() {
        assert_eq!(Verdict::for_score(19), Verdict::Low);
        assert_eq!(Verdict::for_score(20), Verdict::Elevated);
    }
}
