//! Core library for refdraft.
//!
//! Turns reference text into a templated article, rewrites it to read less
//! machine-made, and scores how detectable the result is.
//!
//! # Modules
//!
//! - [`analyzer`] - Topic and key-sentence extraction, document assembly
//! - [`humanizer`] - Probabilistic stylistic rewriting
//! - [`detection`] - Heuristic and simulated detectability scores
//! - [`pipeline`] - Async generation and detection calls
//! - [`reference`] - Reference file loading, plus [`reference::ReferenceLibrary`]
//!   for holding several references and switching the active one
//! - [`generation`] - Generation settings and per-call overrides
//! - [`export`] - Plain-text export
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use refdraft_core::{analyzer, detection, humanizer, GenerationConfig, SeededRandom};
//!
//! let reference = std::fs::read_to_string("notes.txt").unwrap();
//! let config = GenerationConfig::default();
//! let document = analyzer::analyze(&reference, &config);
//!
//! let mut rng = SeededRandom::from_seed(7);
//! let content = humanizer::humanize(&document.render(), config.creativity(), &mut rng);
//! println!("score: {}%", detection::estimate_score(&content));
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod detection;
pub mod document;
pub mod error;
pub mod export;
pub mod generation;
pub mod humanizer;
pub mod patterns;
pub mod pipeline;
pub mod random;
pub mod reference;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use detection::{DetectionReport, ScoreModel, Verdict};
pub use document::{GeneratedDocument, Section, SectionKind};
pub use error::{ConfigError, ConfigResult, ErrorKind, GenerationError, GenerationResult};
pub use generation::{GenerationConfig, GenerationOverrides, Tone};
pub use pipeline::{Pipeline, PipelineOutput};
pub use random::{RandomSource, SeededRandom, SequenceSource};
pub use reference::{ReferenceDocument, ReferenceLibrary};
