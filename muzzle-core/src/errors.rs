//! errors.rs - Custom error types for the muzzle-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// A syntax error raised while parsing a blacklist pattern.
///
/// `line` and `column` are 1-based and point at the offending codepoint of
/// the pattern source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// This enum represents all possible error types in the `muzzle-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MuzzleError {
    #[error("Failed to parse pattern for term {0}: {1}")]
    TermPatternError(u32, ParseError),

    #[error("Duplicate blacklisted term id: {0}")]
    DuplicateTermId(u32),

    #[error("Pattern for term {0} can match the empty string")]
    EmptyMatchingPattern(u32),

    #[error("Whitelisted terms must not be empty")]
    EmptyWhitelistedTerm,

    #[error("Collapse threshold for {0} must be at least 1")]
    InvalidCollapseThreshold(String),

    #[error("Censor charset needs at least 2 distinct characters, found {0}")]
    CharsetTooSmall(usize),

    #[error(transparent)]
    PatternSyntax(#[from] ParseError),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
