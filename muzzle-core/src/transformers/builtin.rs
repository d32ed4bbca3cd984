// muzzle-core/src/transformers/builtin.rs
//! Built-in transformers and the recommended transformer sets for the
//! bundled English terms.
//!
//! The confusable-glyph and leet-speak tables are static data: per ASCII
//! letter, a string of codepoints that render similarly enough to be used
//! for evasion. Both maps are one-to-one at the codepoint level.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;

use super::{StatefulTransformer, Transformer};
use crate::errors::MuzzleError;

/// Lookalike glyphs, keyed by the lowercase ASCII letter they resolve to.
///
/// Sources are given in lowercase form only; `to_lower_case` runs earlier in
/// the recommended sets, so uppercase lookalikes arrive here already folded.
const CONFUSABLE_GLYPHS: &[(char, &str)] = &[
    ('a', "àáâãäåāăąǎȧаαɑ⍺ａ"),
    ('b', "ƀɓƅβьｂ"),
    ('c', "çćĉċčсϲⅽｃ"),
    ('d', "ďđԁⅾｄ"),
    ('e', "èéêëēĕėęěɛеεｅ"),
    ('f', "ƒϝｆ"),
    ('g', "ĝğġģɡｇ"),
    ('h', "ĥħнｈ"),
    ('i', "ìíîïĩīĭįıɩіｉ"),
    ('j', "ĵјｊ"),
    ('k', "ķκкｋ"),
    ('l', "ĺļľŀłⅼｌ"),
    ('m', "ɱмｍ"),
    ('n', "ñńņňŋпｎ"),
    ('o', "òóôõöøōŏőǒοоσｏ"),
    ('p', "ƥρрｐ"),
    ('q', "ԛｑ"),
    ('r', "ŕŗřгｒ"),
    ('s', "śŝşšѕｓ"),
    ('t', "ţťŧтｔ"),
    ('u', "ùúûüũūŭůűųµυｕ"),
    ('v', "ѵνｖ"),
    ('w', "ŵωѡｗ"),
    ('x', "×хｘ"),
    ('y', "ýÿŷуγｙ"),
    ('z', "źżžｚ"),
];

/// Leet-speak substitutions, keyed by the letter they stand in for.
const LEET_GLYPHS: &[(char, &str)] = &[
    ('a', "4@"),
    ('b', "8"),
    ('e', "3"),
    ('g', "69"),
    ('i', "1!"),
    ('o', "0"),
    ('s', "$5"),
    ('t', "7+"),
    ('z', "2"),
];

static CONFUSABLES: Lazy<HashMap<char, char>> = Lazy::new(|| build_glyph_map(CONFUSABLE_GLYPHS));
static LEET_SPEAK: Lazy<HashMap<char, char>> = Lazy::new(|| build_glyph_map(LEET_GLYPHS));

fn build_glyph_map(entries: &[(char, &str)]) -> HashMap<char, char> {
    let mut map = HashMap::new();
    for &(target, sources) in entries {
        for source in sources.chars() {
            if map.insert(source, target).is_some() {
                warn!("Glyph '{}' mapped more than once; keeping the latest target '{}'.", source, target);
            }
        }
    }
    map
}

/// Folds every codepoint to lowercase.
///
/// Multi-codepoint lowercase expansions keep their first codepoint so the
/// map stays one-to-one.
pub fn to_lower_case() -> Transformer {
    Transformer::stateless(|c| Some(c.to_lowercase().next().unwrap_or(c)))
}

/// Resolves confusable Unicode glyphs to their ASCII equivalent.
pub fn resolve_confusables() -> Transformer {
    Transformer::stateless(|c| Some(*CONFUSABLES.get(&c).unwrap_or(&c)))
}

/// Resolves leet-speak substitutions to the letters they stand in for.
pub fn resolve_leet_speak() -> Transformer {
    Transformer::stateless(|c| Some(*LEET_SPEAK.get(&c).unwrap_or(&c)))
}

/// Drops every non-alphabetic codepoint, defeating punctuation-insertion
/// evasion such as `f.u.c.k`.
pub fn skip_non_alphabetic() -> Transformer {
    Transformer::stateless(|c| if c.is_alphabetic() { Some(c) } else { None })
}

/// Options for [`collapse_duplicates`].
#[derive(Debug, Clone)]
pub struct CollapseDuplicatesOptions {
    /// Maximum allowed run length for codepoints without a custom threshold.
    pub default_threshold: usize,
    /// Per-codepoint overrides. `usize::MAX` means "never collapse".
    pub custom_thresholds: HashMap<char, usize>,
}

impl Default for CollapseDuplicatesOptions {
    fn default() -> Self {
        Self { default_threshold: 1, custom_thresholds: HashMap::new() }
    }
}

struct CollapseDuplicates {
    options: CollapseDuplicatesOptions,
    last: Option<char>,
    remaining: usize,
}

impl StatefulTransformer for CollapseDuplicates {
    fn transform(&mut self, c: char) -> Option<char> {
        if self.last == Some(c) {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(c)
        } else {
            let threshold = self
                .options
                .custom_thresholds
                .get(&c)
                .copied()
                .unwrap_or(self.options.default_threshold);
            self.last = Some(c);
            self.remaining = threshold - 1;
            Some(c)
        }
    }

    fn reset(&mut self) {
        self.last = None;
        self.remaining = 0;
    }
}

/// Collapses runs of a repeated codepoint down to a per-codepoint threshold,
/// defeating repeated-letter evasion such as `fuuuuck`.
///
/// Stateful: the owning `TransformerSet` resets the run tracking between
/// top-level matcher calls. Every threshold must be at least 1.
pub fn collapse_duplicates(options: CollapseDuplicatesOptions) -> Result<Transformer, MuzzleError> {
    if options.default_threshold == 0 {
        return Err(MuzzleError::InvalidCollapseThreshold("the default".to_string()));
    }
    if let Some((&c, _)) = options.custom_thresholds.iter().find(|(_, &t)| t == 0) {
        return Err(MuzzleError::InvalidCollapseThreshold(format!("'{}'", c)));
    }
    Ok(Transformer::stateful(move || {
        Box::new(CollapseDuplicates { options: options.clone(), last: None, remaining: 0 })
            as Box<dyn StatefulTransformer + Send>
    }))
}

/// The transformer chain the bundled English terms are written against.
pub fn recommended_blacklist_transformers() -> Vec<Transformer> {
    let custom_thresholds: HashMap<char, usize> =
        [('b', 2), ('e', 2), ('g', 2), ('l', 2), ('o', 2), ('s', 2), ('z', 2)]
            .into_iter()
            .collect();
    let collapse = collapse_duplicates(CollapseDuplicatesOptions {
        default_threshold: 1,
        custom_thresholds,
    })
    .expect("built-in collapse thresholds are non-zero");
    vec![to_lower_case(), resolve_confusables(), resolve_leet_speak(), skip_non_alphabetic(), collapse]
}

/// The whitelist-side chain: normalizes glyphs and case but keeps spacing
/// and punctuation so whitelisted phrases such as "pen is" still line up.
pub fn recommended_whitelist_transformers() -> Vec<Transformer> {
    vec![to_lower_case(), resolve_confusables(), resolve_leet_speak()]
}
