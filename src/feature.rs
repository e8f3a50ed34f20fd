//! Mora-level feature extraction for accent-nucleus prediction.
//!
//! The extractor reads the analyzer's morpheme stream (one
//! [`MorphemeRecord`](crate::record::MorphemeRecord) per line, a blank line
//! ending an accent-phrase group) and appends 22 derived columns to every
//! record, producing the input of the sequence tagger.
//!
//! # Derived columns
//!
//! ```text
//! nmora morph1 morphl nmorph issushi isjosushi relAType josushiType two juuon
//! mora1 mora2 mora3 mora4 mora5 mora6 mora7 aType1 aConTypeFV aConTypeFA aConTypeFN
//! MaType1
//! ```
//!
//! # Modules
//!
//! - [`extractor::MoraFeatureExtractor`] - the buffering line processor
//! - [`counter`] - counter-word class lookup
//! - [`connection`] - accent-connection sub-tags

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{ABSENT, MorphemeRecord};

pub mod connection;
pub mod counter;
pub mod extractor;

pub use connection::AccentConnection;
pub use extractor::MoraFeatureExtractor;

/// Number of columns the extractor appends to each record.
pub const DERIVED_FIELD_COUNT: usize = 22;

/// Number of slots in the mora context window.
pub const MORA_WINDOW: usize = 7;

/// Features derived for one morpheme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoraFeatures {
    pub mora_count: usize,
    /// First record of its phrase group
    pub first_in_phrase: bool,
    /// Last record of its phrase group
    pub last_in_phrase: bool,
    /// Number of records in the phrase group
    pub phrase_size: usize,
    pub is_numeral: bool,
    pub is_counter: bool,
    /// Where the word's own accent falls: `non`, `mora`, the last two moras
    /// or `else`. `None` for auxiliary symbols.
    pub accent_class: Option<String>,
    /// Counter-word class letter, only for counter words
    pub counter_class: Option<char>,
    /// Two moras or fewer
    pub short: bool,
    /// Contains a palatalized, geminate, nasal or long mora
    pub heavy: bool,
    /// First two moras, the three moras around the accent-type candidate,
    /// last two moras
    pub mora_window: [Option<String>; MORA_WINDOW],
    pub first_accent_type: Option<i32>,
    pub connection: AccentConnection,
    /// First accent-type candidate after the accent modification
    pub modified_accent_type: Option<i32>,
}

impl MoraFeatures {
    /// Features of an auxiliary symbol: every flag cleared, every value
    /// absent.
    pub fn auxiliary() -> Self {
        Self::default()
    }

    /// The derived columns in output order.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(DERIVED_FIELD_COUNT);
        fields.push(self.mora_count.to_string());
        fields.push(flag(self.first_in_phrase));
        fields.push(flag(self.last_in_phrase));
        fields.push(self.phrase_size.to_string());
        fields.push(flag(self.is_numeral));
        fields.push(flag(self.is_counter));
        fields.push(or_absent(self.accent_class.as_deref()));
        fields.push(
            self.counter_class
                .map(String::from)
                .unwrap_or_else(|| ABSENT.to_string()),
        );
        fields.push(flag(self.short));
        fields.push(flag(self.heavy));
        for mora in &self.mora_window {
            fields.push(or_absent(mora.as_deref()));
        }
        fields.push(number_or_absent(self.first_accent_type));
        fields.push(or_absent(self.connection.verb.as_deref()));
        fields.push(or_absent(self.connection.adjective.as_deref()));
        fields.push(or_absent(self.connection.noun.as_deref()));
        fields.push(number_or_absent(self.modified_accent_type));
        fields
    }
}

fn flag(value: bool) -> String {
    let text = if value { "1" } else { "0" };
    text.to_string()
}

fn or_absent(value: Option<&str>) -> String {
    value.unwrap_or(ABSENT).to_string()
}

fn number_or_absent(value: Option<i32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| ABSENT.to_string())
}

/// A morpheme together with its derived features.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub morpheme: MorphemeRecord,
    pub features: MoraFeatures,
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let derived = self.features.to_fields();
        let fields: Vec<&str> = self
            .morpheme
            .fields()
            .into_iter()
            .chain(derived.iter().map(String::as_str))
            .collect();
        f.write_str(&fields.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auxiliary_fields() {
        let fields = MoraFeatures::auxiliary().to_fields();
        assert_eq!(fields.len(), DERIVED_FIELD_COUNT);
        assert_eq!(
            fields.join(" "),
            "0 0 0 0 0 0 * * 0 0 * * * * * * * * * * * *"
        );
    }

    #[test]
    fn test_field_order() {
        let features = MoraFeatures {
            mora_count: 3,
            first_in_phrase: true,
            last_in_phrase: false,
            phrase_size: 2,
            is_numeral: false,
            is_counter: true,
            accent_class: Some("else".to_string()),
            counter_class: Some('b'),
            short: false,
            heavy: true,
            mora_window: [
                Some("ホ".to_string()),
                Some("ン".to_string()),
                None,
                Some("ホ".to_string()),
                Some("ン".to_string()),
                Some("ン".to_string()),
                Some("ン".to_string()),
            ],
            first_accent_type: Some(1),
            connection: AccentConnection::default(),
            modified_accent_type: Some(1),
        };
        assert_eq!(
            features.to_fields().join(" "),
            "3 1 0 2 0 1 else b 0 1 ホ ン * ホ ン ン ン 1 * * * 1"
        );
    }
}
