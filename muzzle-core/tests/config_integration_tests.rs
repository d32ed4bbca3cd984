// muzzle-core/tests/config_integration_tests.rs
use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use muzzle_core::{
    recommended_blacklist_transformers, recommended_whitelist_transformers, FilterConfig, Matcher,
    MatcherOptions, PatternMatcher,
};

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(yaml.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_load_from_file_round_trip() -> Result<()> {
    let file = write_config(
        r#"
terms:
  - id: 1
    pattern: "fuck"
  - id: 2
    pattern: "bitch[e][s]"
    description: "With optional plural."
whitelist:
  - "class"
"#,
    );

    let config = FilterConfig::load_from_file(file.path())?;
    assert_eq!(config.terms.len(), 2);
    assert_eq!(config.terms[0].id, 1);
    assert_eq!(config.terms[1].pattern, "bitch[e][s]");
    assert_eq!(config.terms[1].description.as_deref(), Some("With optional plural."));
    assert_eq!(config.whitelist, vec!["class".to_string()]);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_duplicate_ids() {
    let file = write_config(
        r#"
terms:
  - id: 1
    pattern: "fuck"
  - id: 1
    pattern: "ass"
"#,
    );

    let err = FilterConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate term id"));
}

#[test]
fn test_load_from_file_rejects_bad_pattern_with_position() {
    let file = write_config(
        r#"
terms:
  - id: 1
    pattern: "a[bc"
"#,
    );

    let err = FilterConfig::load_from_file(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("invalid pattern"));
    assert!(message.contains("line 1, column 2"));
}

#[test]
fn test_load_from_file_rejects_empty_matchable_pattern() {
    let file = write_config(
        r#"
terms:
  - id: 3
    pattern: "[a][b]"
"#,
    );

    let err = FilterConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("can match the empty string"));
}

#[test]
fn test_load_from_file_rejects_empty_whitelist_entry() {
    let file = write_config(
        r#"
terms:
  - id: 1
    pattern: "fuck"
whitelist:
  - ""
"#,
    );

    let err = FilterConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Whitelist entry 0 is empty"));
}

#[test]
fn test_load_from_file_missing_file_fails() {
    assert!(FilterConfig::load_from_file("definitely/not/a/real/path.yaml").is_err());
}

#[test]
fn test_default_terms_load_and_validate() -> Result<()> {
    let config = FilterConfig::load_default_terms()?;
    assert!(!config.terms.is_empty());
    assert!(!config.whitelist.is_empty());
    Ok(())
}

#[test]
fn test_default_terms_build_a_working_matcher() -> Result<()> {
    let config = FilterConfig::load_default_terms()?;
    let options = MatcherOptions {
        blacklist_transformers: recommended_blacklist_transformers(),
        whitelist_transformers: recommended_whitelist_transformers(),
    };
    let mut matcher = PatternMatcher::from_config(&config, options)?;

    assert!(matcher.has_match("FUUUUCK"));
    assert!(matcher.has_match("what a b1tch"));
    assert!(matcher.has_match("f.u.c.k this"));
    assert!(!matcher.has_match("the scunthorpe problem"));
    assert!(!matcher.has_match("a first-class massage"));
    assert!(!matcher.has_match("reading the documentation"));
    Ok(())
}

#[test]
fn test_disabled_terms_are_not_compiled() -> Result<()> {
    let mut config = FilterConfig::load_default_terms()?;
    let fuck_ids: Vec<u32> = config
        .terms
        .iter()
        .filter(|t| t.pattern.contains("ck"))
        .map(|t| t.id)
        .collect();
    config.set_active_terms(&[], &fuck_ids);

    let mut matcher = PatternMatcher::from_config(&config, MatcherOptions::default())?;
    assert!(!matcher.has_match("fuck"));
    assert!(matcher.has_match("shit"));
    Ok(())
}
