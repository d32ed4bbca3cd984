// muzzle-core/src/lib.rs
//! # Muzzle Core Library
//!
//! `muzzle-core` provides the fundamental, platform-independent logic for
//! profanity detection and censoring. It defines a small pattern DSL for
//! describing obscene terms, a transformer pipeline that normalizes text
//! before matching (defeating leetspeak, confusable glyphs, and
//! repeated-letter evasion), a whitelist-aware matcher, and a censor that
//! rewrites matched spans into safe replacement text.
//!
//! The library is designed to be pure and synchronous, focusing solely on
//! the transformation of input data based on configured terms, without
//! concerns for I/O or application-specific state management. All public
//! indices count Unicode codepoints, with inclusive span ends.
//!
//! ## Modules
//!
//! * `config`: Defines `TermRule`s and `FilterConfig` for specifying blacklisted terms.
//! * `patterns`: The pattern DSL: parser, compiler, and execution engine.
//! * `transformers`: The pre-matching normalization pipeline and its built-ins.
//! * `codepoints`: Codepoint-indexed views and the transformed→original offset map.
//! * `intervals`: The whitelist span index with containment queries.
//! * `matches`: The `Match` payload and content-gated debug logging.
//! * `engine`: Defines the `Matcher` trait, enabling a modular design.
//! * `engines`: Contains concrete implementations of the `Matcher` trait.
//! * `censor`: The `TextCensor` and its replacement strategies.
//! * `headless`: Convenience wrappers for one-shot use of the default terms.
//!
//! ## Usage Example
//!
//! ```rust
//! use muzzle_core::{parse, BlacklistedTerm, Matcher, PatternMatcher, TextCensor};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Describe the terms to detect with the pattern DSL.
//!     let terms = vec![
//!         BlacklistedTerm { id: 1, pattern: parse("fuck")? },
//!         BlacklistedTerm { id: 2, pattern: parse("penis")? },
//!     ];
//!
//!     // 2. Build the matcher; whitelisted phrases suppress contained hits.
//!     let mut matcher = PatternMatcher::new(terms, vec!["pen is".to_string()])?;
//!
//!     // 3. Query and censor.
//!     let input = "the pen is mightier, fuck yeah";
//!     let matches = matcher.get_all_matches(input, true);
//!     let mut censor = TextCensor::default();
//!     println!("{}", censor.apply_to(input, &matches));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Pattern syntax errors carry a message plus 1-based line/column; every
//! construction-time validation failure surfaces as a [`MuzzleError`]
//! before any matcher or censor instance exists. Queries on a constructed
//! matcher are infallible.
//!
//! ## Design Principles
//!
//! * **Pluggable Architecture:** The `Matcher` trait and closure-based
//!   censor strategies allow behavior to be swapped out seamlessly.
//! * **Compile Once:** Terms are validated and compiled at construction;
//!   nothing is cached across calls except the compiled terms and the
//!   reset-per-call transformer state.
//! * **Testable:** Logic is easily unit-testable in isolation.
//!
//! ---
//! License: MIT OR Apache-2.0

// All modules must be declared before they can be used.
pub mod censor;
pub mod codepoints;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod intervals;
pub mod matches;
pub mod patterns;
pub mod transformers;

/// Re-exports the public configuration types and functions for managing
/// term lists.
pub use config::{merge_configs, FilterConfig, TermRule};

/// Re-exports the custom error types for clear error reporting.
pub use errors::{MuzzleError, ParseError};

/// Re-exports types related to the core matcher trait.
pub use engine::{Matcher, MatcherOptions};

/// Re-exports the concrete `PatternMatcher` implementation and its term
/// type.
pub use engines::pattern_engine::{BlacklistedTerm, PatternMatcher};

/// Re-exports the match payload and logging helpers.
pub use matches::{redact_for_log, Match};

/// Re-exports the pattern DSL surface.
pub use patterns::{compile, parse, potentially_matches_empty_string, Node, Pattern, Program};

/// Re-exports the transformer pipeline model and built-ins.
pub use transformers::builtin::{
    collapse_duplicates, recommended_blacklist_transformers, recommended_whitelist_transformers,
    resolve_confusables, resolve_leet_speak, skip_non_alphabetic, to_lower_case,
    CollapseDuplicatesOptions,
};
pub use transformers::{StatefulTransformer, Transformer, TransformerSet};

/// Re-exports the whitelist span index.
pub use intervals::IntervalCollection;

/// Re-exports the censor and its built-in strategies.
pub use censor::{
    asterisk, fixed_char, fixed_phrase, grawlix, keep_end, keep_start, random_char_from_set,
    CensorContext, CensorStrategy, TextCensor, GRAWLIX_CHARSET,
};

/// Re-exports the transformed-text view used by custom integrations.
pub use codepoints::TransformedText;

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{censor_text, contains_profanity};
