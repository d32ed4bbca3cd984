// muzzle-core/src/engines/pattern_engine.rs
//! A `Matcher` implementation that executes compiled blacklist patterns
//! against transformer-normalized text.
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use log::{debug, log_enabled, Level};

use crate::codepoints::TransformedText;
use crate::config::FilterConfig;
use crate::engine::{Matcher, MatcherOptions};
use crate::errors::MuzzleError;
use crate::intervals::IntervalCollection;
use crate::matches::{log_match_debug, log_suppressed_match_debug, Match};
use crate::patterns::{compile, parse, potentially_matches_empty_string, Pattern, Program};
use crate::transformers::TransformerSet;

/// A blacklist entry supplied at matcher construction: a unique id plus the
/// parsed pattern it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistedTerm {
    pub id: u32,
    pub pattern: Pattern,
}

/// A blacklisted term compiled once at construction and reused for the
/// matcher's lifetime.
#[derive(Debug)]
struct CompiledTerm {
    id: u32,
    program: Program,
}

/// The concrete pattern-driven `Matcher`.
///
/// Construction is atomic: every validation and compilation step runs up
/// front, and any failure aborts before an instance exists. Per-call
/// structures (offset maps, interval collections, match lists) are created
/// and discarded inside a single query; only the compiled terms and the
/// reset-per-call transformer state persist.
#[derive(Debug)]
pub struct PatternMatcher {
    terms: Vec<CompiledTerm>,
    whitelist: Vec<Vec<char>>,
    blacklist_transformers: TransformerSet,
    whitelist_transformers: TransformerSet,
}

impl PatternMatcher {
    /// Builds a matcher without any text normalization.
    pub fn new(terms: Vec<BlacklistedTerm>, whitelisted: Vec<String>) -> Result<Self, MuzzleError> {
        Self::with_options(terms, whitelisted, MatcherOptions::default())
    }

    /// Builds a matcher with explicit transformer chains.
    ///
    /// Fails on a duplicate term id, a pattern that could match the empty
    /// string, or an empty whitelisted term.
    pub fn with_options(
        terms: Vec<BlacklistedTerm>,
        whitelisted: Vec<String>,
        options: MatcherOptions,
    ) -> Result<Self, MuzzleError> {
        let mut seen_ids = HashSet::new();
        let mut compiled = Vec::with_capacity(terms.len());
        for term in &terms {
            if !seen_ids.insert(term.id) {
                return Err(MuzzleError::DuplicateTermId(term.id));
            }
            if potentially_matches_empty_string(&term.pattern) {
                return Err(MuzzleError::EmptyMatchingPattern(term.id));
            }
            compiled.push(CompiledTerm { id: term.id, program: compile(&term.pattern) });
        }
        let mut whitelist = Vec::with_capacity(whitelisted.len());
        for term in &whitelisted {
            if term.is_empty() {
                return Err(MuzzleError::EmptyWhitelistedTerm);
            }
            whitelist.push(term.chars().collect());
        }
        debug!("Compiled {} blacklisted terms ({} whitelisted).", compiled.len(), whitelist.len());
        Ok(Self {
            terms: compiled,
            whitelist,
            blacklist_transformers: TransformerSet::new(options.blacklist_transformers),
            whitelist_transformers: TransformerSet::new(options.whitelist_transformers),
        })
    }

    /// Builds a matcher from a term-list configuration, parsing each active
    /// term's pattern source.
    pub fn from_config(config: &FilterConfig, options: MatcherOptions) -> Result<Self, MuzzleError> {
        let mut terms = Vec::new();
        for rule in config.active_terms() {
            let pattern =
                parse(&rule.pattern).map_err(|e| MuzzleError::TermPatternError(rule.id, e))?;
            terms.push(BlacklistedTerm { id: rule.id, pattern });
        }
        Self::with_options(terms, config.whitelist.clone(), options)
    }

    /// Runs the whitelist pass: scans the whitelist-transformed text for
    /// non-overlapping literal occurrences of every whitelisted term and
    /// records each occurrence's original-coordinate span.
    fn build_whitelist_intervals(&mut self, text: &str) -> IntervalCollection {
        let mut intervals = IntervalCollection::new();
        if self.whitelist.is_empty() {
            return intervals;
        }
        let transformed = TransformedText::new(&mut self.whitelist_transformers, text);
        let haystack = transformed.chars();
        for term in &self.whitelist {
            let mut from = 0;
            while from + term.len() <= haystack.len() {
                if haystack[from..from + term.len()] == term[..] {
                    intervals.insert(
                        transformed.original_index(from),
                        transformed.original_index(from + term.len() - 1),
                    );
                    // Advance past the occurrence so the same region cannot
                    // match twice.
                    from += term.len();
                } else {
                    from += 1;
                }
            }
        }
        intervals
    }

    fn scan(&mut self, text: &str, first_only: bool) -> Vec<Match> {
        let mut whitelist_intervals = self.build_whitelist_intervals(text);
        let transformed = TransformedText::new(&mut self.blacklist_transformers, text);
        let mut matches = Vec::new();
        'terms: for term in &self.terms {
            for (from, to) in term.program.find_iter(transformed.chars()) {
                let start = transformed.original_index(from);
                let end = transformed.original_index(to);
                let accepted = !whitelist_intervals.query(start, end);
                if log_enabled!(Level::Debug) {
                    let content: String = text.chars().skip(start).take(end - start + 1).collect();
                    if accepted {
                        log_match_debug(module_path!(), term.id, &content);
                    } else {
                        log_suppressed_match_debug(module_path!(), term.id, &content);
                    }
                }
                if !accepted {
                    continue;
                }
                matches.push(Match { term_id: term.id, start, end, len: end - start + 1 });
                if first_only {
                    break 'terms;
                }
            }
        }
        self.blacklist_transformers.reset_all();
        self.whitelist_transformers.reset_all();
        matches
    }
}

impl Matcher for PatternMatcher {
    fn has_match(&mut self, text: &str) -> bool {
        !self.scan(text, true).is_empty()
    }

    fn get_all_matches(&mut self, text: &str, sorted: bool) -> Vec<Match> {
        let mut matches = self.scan(text, false);
        if sorted {
            matches.sort_by(|a, b| a.span_order(b));
        }
        matches
    }
}
