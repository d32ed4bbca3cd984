// muzzle-core/src/matches.rs
//! Provides the core match payload type and utility functions for logging
//! matched content within the `muzzle-core` library.

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A static boolean that is initialized once to determine if matched content
/// is allowed to appear verbatim in debug logs.
static CONTENT_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("MUZZLE_ALLOW_DEBUG_CONTENT")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// A single occurrence of a blacklisted term in the original input.
///
/// `start` and `end` are codepoint indices into the original string (not
/// bytes, not UTF-16 units) and `end` is inclusive. `len` is the codepoint
/// count of the matched span, so `len == end - start + 1` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Match {
    pub term_id: u32,
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

impl Match {
    /// The span ordering used by `get_all_matches(.., sorted = true)` and by
    /// the censor: ascending `(start, end, term_id)`.
    pub fn span_order(&self, other: &Self) -> std::cmp::Ordering {
        (self.start, self.end, self.term_id).cmp(&(other.start, other.end, other.term_id))
    }
}

/// Replaces matched content with a placeholder suitable for log output.
pub fn redact_for_log(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let count = s.chars().count();
    if count <= MAX_LEN {
        "[FILTERED]".to_string()
    } else {
        format!("[FILTERED: {} chars]", count)
    }
}

fn loggable_content(content: &str) -> String {
    if *CONTENT_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_for_log(content)
    }
}

pub fn log_match_debug(module_path: &str, term_id: u32, matched_content: &str) {
    debug!(
        "{} Found match: term={}, content='{}'",
        module_path,
        term_id,
        loggable_content(matched_content)
    );
}

pub fn log_suppressed_match_debug(module_path: &str, term_id: u32, matched_content: &str) {
    debug!(
        "{} Whitelisted span suppressed match: term={}, content='{}'",
        module_path,
        term_id,
        loggable_content(matched_content)
    );
}
