//! Configuration management for `muzzle-core`.
//!
//! This module defines the serializable structures for blacklisted-term
//! lists and whitelists. It handles serialization/deserialization of YAML
//! configurations and provides utilities for loading, merging, and
//! validating these configs before a matcher is built from them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::patterns::{parse, potentially_matches_empty_string};

/// A single blacklisted-term rule as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TermRule {
    /// Unique numeric id, reported in every match of this term.
    pub id: u32,
    /// Pattern source in the blacklist DSL.
    pub pattern: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl Default for TermRule {
    fn default() -> Self {
        Self { id: 0, pattern: String::new(), description: None, enabled: None, tags: None }
    }
}

/// Represents the top-level term-list configuration for Muzzle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Blacklisted-term rules in the pattern DSL.
    pub terms: Vec<TermRule>,
    /// Literal strings whose occurrences suppress contained matches.
    pub whitelist: Vec<String>,
}

impl FilterConfig {
    /// Loads a term-list configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom terms from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FilterConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_terms(&config)?;
        info!("Loaded {} terms from file {}.", config.terms.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in English terms from the embedded configuration.
    pub fn load_default_terms() -> Result<Self> {
        debug!("Loading default terms from embedded string...");
        let default_yaml = include_str!("../config/english_terms.yaml");
        let config: FilterConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default terms")?;

        validate_terms(&config)?;
        debug!("Loaded {} default terms.", config.terms.len());
        Ok(config)
    }

    /// The rules a matcher should compile: everything not explicitly
    /// disabled.
    pub fn active_terms(&self) -> impl Iterator<Item = &TermRule> {
        self.terms.iter().filter(|term| term.enabled != Some(false))
    }

    /// Flags rules on or off based on enable/disable id lists.
    pub fn set_active_terms(&mut self, enable: &[u32], disable: &[u32]) {
        let enable_set: HashSet<u32> = enable.iter().copied().collect();
        let disable_set: HashSet<u32> = disable.iter().copied().collect();
        let all_ids: HashSet<u32> = self.terms.iter().map(|t| t.id).collect();

        for id in enable_set.difference(&all_ids) {
            warn!("Term id {} in `enable` list does not exist.", id);
        }
        for id in disable_set.difference(&all_ids) {
            warn!("Term id {} in `disable` list does not exist.", id);
        }

        for term in &mut self.terms {
            if disable_set.contains(&term.id) {
                term.enabled = Some(false);
            } else if enable_set.contains(&term.id) {
                term.enabled = Some(true);
            }
        }
    }
}

/// Merges user-defined terms and whitelist entries with defaults.
///
/// A user rule replaces the default rule with the same id; whitelist
/// entries are unioned, keeping the default ordering first.
pub fn merge_configs(default_config: FilterConfig, user_config: Option<FilterConfig>) -> FilterConfig {
    debug!("merge_configs called. Initial default terms count: {}", default_config.terms.len());

    let mut merged_terms: Vec<TermRule> = default_config.terms;
    let mut whitelist = default_config.whitelist;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user terms.", user_cfg.terms.len());
        let mut by_id: HashMap<u32, usize> =
            merged_terms.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        for user_term in user_cfg.terms {
            match by_id.get(&user_term.id) {
                Some(&i) => merged_terms[i] = user_term,
                None => {
                    by_id.insert(user_term.id, merged_terms.len());
                    merged_terms.push(user_term);
                }
            }
        }
        for entry in user_cfg.whitelist {
            if !whitelist.contains(&entry) {
                whitelist.push(entry);
            }
        }
    }

    debug!("Final total terms after merge: {}", merged_terms.len());
    FilterConfig { terms: merged_terms, whitelist }
}

/// Validates term-list integrity (unique ids, parseable patterns that
/// cannot match the empty string, non-empty whitelist entries), collecting
/// every problem before failing.
fn validate_terms(config: &FilterConfig) -> Result<()> {
    let mut term_ids = HashSet::new();
    let mut errors = Vec::new();

    for term in &config.terms {
        if !term_ids.insert(term.id) {
            errors.push(format!("Duplicate term id found: {}.", term.id));
        }

        if term.pattern.is_empty() {
            errors.push(format!("Term {} has an empty `pattern` field.", term.id));
            continue;
        }

        match parse(&term.pattern) {
            Ok(pattern) => {
                if potentially_matches_empty_string(&pattern) {
                    errors.push(format!("Term {}: pattern can match the empty string.", term.id));
                }
            }
            Err(e) => {
                errors.push(format!("Term {} has an invalid pattern: {}.", term.id, e));
            }
        }
    }

    for (index, entry) in config.whitelist.iter().enumerate() {
        if entry.is_empty() {
            errors.push(format!("Whitelist entry {} is empty.", index));
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Term validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
