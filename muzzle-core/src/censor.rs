// muzzle-core/src/censor.rs
//! Rewrites matched spans into safe replacement text.
//!
//! A `TextCensor` walks a sorted match list over the original input,
//! resolving overlaps deterministically, and delegates the replacement text
//! for each span to a pluggable strategy. Strategies are plain closures
//! over a [`CensorContext`]; the built-ins at the bottom of this module
//! cover the common cases and two combinators.
//!
//! License: MIT OR APACHE 2.0

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::MuzzleError;
use crate::matches::Match;

/// Ephemeral record passed to a replacement strategy for one match.
#[derive(Debug, Clone, Copy)]
pub struct CensorContext<'a> {
    /// The original input, as codepoints.
    pub input: &'a [char],
    /// First codepoint index the strategy is responsible for. When the
    /// match partially overlaps an earlier one, this is clamped past the
    /// already-censored region.
    pub start: usize,
    /// Inclusive end of the match in the original input.
    pub end: usize,
    /// Number of codepoints the strategy's output should cover.
    pub len: usize,
    pub term_id: u32,
    /// Whether the span begins inside an earlier match's output.
    pub overlaps_at_start: bool,
    /// Whether the next match starts before this span ends.
    pub overlaps_at_end: bool,
}

/// A replacement strategy: maps one censor context to replacement text.
pub type CensorStrategy = Box<dyn FnMut(&CensorContext<'_>) -> String + Send>;

/// Applies a replacement strategy to every match in a text.
pub struct TextCensor {
    strategy: CensorStrategy,
}

impl Default for TextCensor {
    /// A censor using the grawlix strategy.
    fn default() -> Self {
        Self { strategy: grawlix() }
    }
}

impl std::fmt::Debug for TextCensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCensor").finish_non_exhaustive()
    }
}

impl TextCensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: CensorStrategy) -> Self {
        Self { strategy }
    }

    /// Replaces the configured strategy.
    pub fn set_strategy(&mut self, strategy: CensorStrategy) {
        self.strategy = strategy;
    }

    /// Produces the censored rendition of `text`.
    ///
    /// Matches may be passed in any order; they are sorted by
    /// `(start, end, term_id)` before the sweep. Indices are codepoint
    /// offsets into `text`, as produced by the matcher. An empty match list
    /// returns the input unchanged.
    pub fn apply_to(&mut self, text: &str, matches: &[Match]) -> String {
        if matches.is_empty() {
            return text.to_string();
        }
        let input: Vec<char> = text.chars().collect();
        let mut sorted: Vec<Match> = matches.to_vec();
        sorted.sort_by(|a, b| a.span_order(b));

        let mut output = String::with_capacity(text.len());
        let mut last_index = 0usize;
        for (i, m) in sorted.iter().enumerate() {
            // Fully covered by earlier output.
            if m.end < last_index {
                continue;
            }
            let overlaps_at_start = m.start < last_index;
            if !overlaps_at_start {
                output.extend(&input[last_index..m.start]);
            }
            let actual_start = last_index.max(m.start);
            let overlaps_at_end = sorted.get(i + 1).is_some_and(|next| next.start < m.end);
            let context = CensorContext {
                input: &input,
                start: actual_start,
                end: m.end,
                len: m.end - actual_start + 1,
                term_id: m.term_id,
                overlaps_at_start,
                overlaps_at_end,
            };
            output.push_str(&(self.strategy)(&context));
            last_index = m.end + 1;
        }
        if last_index < input.len() {
            output.extend(&input[last_index..]);
        }
        output
    }
}

/// Strategy: repeat a single codepoint for the covered length.
pub fn fixed_char(c: char) -> CensorStrategy {
    Box::new(move |ctx: &CensorContext<'_>| std::iter::repeat(c).take(ctx.len).collect())
}

/// Strategy: always emit the constant phrase, regardless of match length.
pub fn fixed_phrase(phrase: impl Into<String>) -> CensorStrategy {
    let phrase = phrase.into();
    Box::new(move |_ctx: &CensorContext<'_>| phrase.clone())
}

/// Strategy: draw each output codepoint at random from `charset`, never
/// emitting the same codepoint twice in a row.
///
/// Fails at construction when `charset` holds fewer than 2 distinct
/// codepoints. Produces the empty string for a zero-length context.
pub fn random_char_from_set(charset: &str) -> Result<CensorStrategy, MuzzleError> {
    let mut distinct: Vec<char> = Vec::new();
    for c in charset.chars() {
        if !distinct.contains(&c) {
            distinct.push(c);
        }
    }
    if distinct.len() < 2 {
        return Err(MuzzleError::CharsetTooSmall(distinct.len()));
    }
    Ok(random_from(distinct))
}

fn random_from(chars: Vec<char>) -> CensorStrategy {
    let mut rng = StdRng::from_os_rng();
    Box::new(move |ctx: &CensorContext<'_>| {
        let mut out = String::with_capacity(ctx.len);
        let mut previous: Option<usize> = None;
        for _ in 0..ctx.len {
            let pick = match previous {
                None => rng.random_range(0..chars.len()),
                // Draw from the set minus the previous pick.
                Some(last) => {
                    let mut pick = rng.random_range(0..chars.len() - 1);
                    if pick >= last {
                        pick += 1;
                    }
                    pick
                }
            };
            out.push(chars[pick]);
            previous = Some(pick);
        }
        out
    })
}

/// The symbol set used by [`grawlix`].
pub const GRAWLIX_CHARSET: &str = "%@$&*";

/// Strategy: comic-book symbol noise, e.g. `%@$&*`.
pub fn grawlix() -> CensorStrategy {
    random_from(GRAWLIX_CHARSET.chars().collect())
}

/// Strategy: asterisks.
pub fn asterisk() -> CensorStrategy {
    fixed_char('*')
}

/// Combinator: keep the match's first original codepoint, delegating the
/// rest to `base`. Falls back to `base` entirely when the match overlaps at
/// its start.
pub fn keep_start(mut base: CensorStrategy) -> CensorStrategy {
    Box::new(move |ctx: &CensorContext<'_>| {
        if ctx.overlaps_at_start {
            return base(ctx);
        }
        if ctx.len == 0 {
            return String::new();
        }
        let mut out = String::new();
        out.push(ctx.input[ctx.start]);
        if ctx.len > 1 {
            let rest = CensorContext { len: ctx.len - 1, ..*ctx };
            out.push_str(&base(&rest));
        }
        out
    })
}

/// Combinator: keep the match's last original codepoint, delegating the
/// rest to `base`. Falls back to `base` entirely when the match overlaps at
/// its end.
pub fn keep_end(mut base: CensorStrategy) -> CensorStrategy {
    Box::new(move |ctx: &CensorContext<'_>| {
        if ctx.overlaps_at_end {
            return base(ctx);
        }
        if ctx.len == 0 {
            return String::new();
        }
        let rest = CensorContext { len: ctx.len - 1, ..*ctx };
        let mut out = base(&rest);
        out.push(ctx.input[ctx.end]);
        out
    })
}
