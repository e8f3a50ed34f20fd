//! Accent-connection sub-tags.
//!
//! The `aConType` column lists how a word changes the accent of the word it
//! attaches to, one comma-separated item per part of speech of that word,
//! e.g. `動詞%F2@0,形容詞%F1`. The extractor keeps the verb, adjective and
//! noun items as separate features.
//!
//! `F6` items carry two comma-separated numbers (`名詞%F6@1,-1`), so an `F6`
//! item is joined with the item after it before classification.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static VERB_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("動詞%F").unwrap());
static ADJECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("形容詞%F").unwrap());
static NOUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("名詞%F").unwrap());
static F6_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("F6").unwrap());

/// Accent-connection items by the part of speech they apply to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentConnection {
    pub verb: Option<String>,
    pub adjective: Option<String>,
    pub noun: Option<String>,
}

impl AccentConnection {
    /// Split an `aConType` value into its sub-tags. When several items match
    /// the same part of speech, the last one is kept.
    pub fn parse(a_con_type: &str) -> Self {
        let mut connection = AccentConnection::default();

        for item in merged_items(a_con_type) {
            if VERB_PATTERN.is_match(&item) {
                connection.verb = Some(item.clone());
            }
            if ADJECTIVE_PATTERN.is_match(&item) {
                connection.adjective = Some(item.clone());
            }
            if NOUN_PATTERN.is_match(&item) {
                connection.noun = Some(item);
            }
        }

        connection
    }
}

fn merged_items(a_con_type: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut parts = a_con_type.split(',');

    while let Some(part) = parts.next() {
        if F6_PATTERN.is_match(part) {
            if let Some(next) = parts.next() {
                items.push(format!("{part},{next}"));
                continue;
            }
        }
        items.push(part.to_string());
    }

    items
}
