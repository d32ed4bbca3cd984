// muzzle-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot use of the default English terms.
//! Provides the two operations the surrounding application consumes: "does
//! this text contain a match?" and "give me the censored text".
//!
//! Both wrappers build a fresh matcher per call, which keeps them
//! dependency-free but pays the compilation cost every time; construct a
//! `PatternMatcher` and `TextCensor` once when issuing repeated queries.

use anyhow::Result;

use crate::censor::TextCensor;
use crate::config::FilterConfig;
use crate::engine::{Matcher, MatcherOptions};
use crate::engines::pattern_engine::PatternMatcher;
use crate::transformers::builtin::{
    recommended_blacklist_transformers, recommended_whitelist_transformers,
};

fn default_matcher() -> Result<PatternMatcher> {
    let config = FilterConfig::load_default_terms()?;
    let options = MatcherOptions {
        blacklist_transformers: recommended_blacklist_transformers(),
        whitelist_transformers: recommended_whitelist_transformers(),
    };
    Ok(PatternMatcher::from_config(&config, options)?)
}

/// Returns whether `text` contains any of the default English terms.
pub fn contains_profanity(text: &str) -> Result<bool> {
    let mut matcher = default_matcher()?;
    Ok(matcher.has_match(text))
}

/// Censors every occurrence of the default English terms in `text`, using
/// the default grawlix strategy.
pub fn censor_text(text: &str) -> Result<String> {
    let mut matcher = default_matcher()?;
    let matches = matcher.get_all_matches(text, true);
    let mut censor = TextCensor::default();
    Ok(censor.apply_to(text, &matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_profanity() -> Result<()> {
        assert!(contains_profanity("oh FUCK off")?);
        assert!(contains_profanity("what a b1tch")?);
        assert!(!contains_profanity("a perfectly clean sentence")?);
        Ok(())
    }

    #[test]
    fn test_whitelisted_phrases_are_clean() -> Result<()> {
        assert!(!contains_profanity("the pen is mightier than the sword")?);
        assert!(!contains_profanity("an assassin from Scunthorpe")?);
        Ok(())
    }

    #[test]
    fn test_censor_text_rewrites_matches() -> Result<()> {
        let censored = censor_text("fuck this")?;
        assert_ne!(censored, "fuck this");
        assert!(censored.ends_with(" this"));
        assert_eq!(censored.chars().count(), "fuck this".chars().count());
        Ok(())
    }

    #[test]
    fn test_censor_text_leaves_clean_input_unchanged() -> Result<()> {
        assert_eq!(censor_text("nothing to see here")?, "nothing to see here");
        Ok(())
    }
}
