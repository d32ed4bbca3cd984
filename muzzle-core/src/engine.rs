// muzzle-core/src/engine.rs
//! Defines the core Matcher trait and related option types.
//!
//! The `Matcher` trait provides a pluggable interface for different
//! matching methods. This module defines the contract that all such
//! matchers must adhere to, ensuring a consistent and interchangeable core
//! API for the surrounding application.
//!
//! License: MIT OR APACHE 2.0

use crate::matches::Match;
use crate::transformers::Transformer;

/// A trait that defines the core functionality of a profanity matcher.
///
/// This trait decouples the high-level application logic from the specific
/// implementation of a matching method, allowing for different matchers to
/// be used interchangeably.
///
/// Queries take `&mut self`: a matcher owns per-run transformer state that
/// is mutated during a call and reset at its end, so a single instance must
/// not be shared across threads without external synchronization.
pub trait Matcher {
    /// Returns `true` as soon as one accepted (non-whitelisted) match is
    /// found, without materializing the full match list.
    fn has_match(&mut self, text: &str) -> bool;

    /// Returns every accepted match in original-string codepoint
    /// coordinates. When `sorted` is requested, the result is ordered by
    /// ascending `(start, end, term_id)`.
    fn get_all_matches(&mut self, text: &str, sorted: bool) -> Vec<Match>;
}

/// Options controlling how a matcher normalizes text before scanning.
///
/// The two transformer lists are independent: the blacklist side typically
/// normalizes aggressively (dropping punctuation, collapsing repeats) while
/// the whitelist side stays close to the original so whitelisted phrases
/// keep their spacing.
#[derive(Debug, Default)]
pub struct MatcherOptions {
    pub blacklist_transformers: Vec<Transformer>,
    pub whitelist_transformers: Vec<Transformer>,
}
