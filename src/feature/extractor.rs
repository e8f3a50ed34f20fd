//! Line-oriented feature extractor.
//!
//! Records are buffered per phrase group because three of the derived
//! columns (first/last in group, group size) depend on the whole group.
//! A group ends at a blank line or at the end of the input; blank lines are
//! copied to the output.
//!
//! # Examples
//!
//! ```
//! use akusento::feature::MoraFeatureExtractor;
//!
//! let input = "世界 セカイ 名詞-普通名詞-一般-* * * 世界-セカイ 漢 * 1 C1 * O /\n";
//! let output = MoraFeatureExtractor::new().extract(input).unwrap();
//! let fields: Vec<&str> = output.lines().next().unwrap().split(' ').collect();
//!
//! assert_eq!(fields.len(), 35);
//! assert_eq!(fields[13], "3"); // mora count
//! assert_eq!(fields[19], "else"); // nucleus on the first of three moras
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{AkusentoError, Result};
use crate::feature::counter::counter_class;
use crate::feature::{AccentConnection, FeatureRecord, MORA_WINDOW, MoraFeatures};
use crate::mora::split_moras;
use crate::record::{MorphemeRecord, modified_accent_type};

static NUMERAL_POS: LazyLock<Regex> = LazyLock::new(|| Regex::new("-数詞").unwrap());
static COUNTER_POS: LazyLock<Regex> = LazyLock::new(|| Regex::new("-助数詞").unwrap());
static HEAVY_MORA: LazyLock<Regex> = LazyLock::new(|| Regex::new("ャ|ュ|ョ|ー|ン|ッ").unwrap());

/// Accent class of a word whose own accent type is 0.
pub const FLAT_CLASS: &str = "non";
/// Accent class of a word accented on its last mora.
pub const FINAL_CLASS: &str = "mora";
/// Accent class of every other position.
pub const OTHER_CLASS: &str = "else";

/// Computes tagger features for a morpheme stream.
#[derive(Clone, Debug, Default)]
pub struct MoraFeatureExtractor;

impl MoraFeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        MoraFeatureExtractor
    }

    /// Extract features for a whole input.
    ///
    /// Every line must be blank or a 13-field morpheme record; any other
    /// line fails the whole input with a format error naming the line.
    pub fn extract(&self, text: &str) -> Result<String> {
        let mut group = PhraseGroup::default();
        let mut output = Vec::new();
        let mut records = 0;

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                group.flush_into(&mut output);
                output.push(String::new());
                continue;
            }

            let record = self.extract_line(line).map_err(|e| at_line(index + 1, e))?;
            group.push(record);
            records += 1;
        }

        if !group.is_empty() {
            group.flush_into(&mut output);
            output.push(String::new());
        }

        debug!(records, "extracted mora features");
        Ok(output.join("\n"))
    }

    /// Parse one morpheme line and compute its morpheme-local features.
    ///
    /// The phrase-local fields are left unset; they are filled in when the
    /// record's group is flushed.
    pub fn extract_line(&self, line: &str) -> Result<FeatureRecord> {
        let morpheme = MorphemeRecord::parse_line(line)?;
        let features = if morpheme.is_auxiliary() {
            MoraFeatures::auxiliary()
        } else {
            Self::morpheme_features(&morpheme)?
        };

        Ok(FeatureRecord { morpheme, features })
    }

    /// Morpheme-local features of a pronounced morpheme.
    pub fn morpheme_features(record: &MorphemeRecord) -> Result<MoraFeatures> {
        let moras = split_moras(&record.pron);
        let mora_count = moras.len();

        let is_numeral = NUMERAL_POS.is_match(&record.pos);
        let is_counter = COUNTER_POS.is_match(&record.pos);

        let accent_type = record.first_accent_type();
        let modification = record.accent_modification()?;
        let modified = modified_accent_type(modification.as_ref(), mora_count, accent_type)?;

        Ok(MoraFeatures {
            mora_count,
            is_numeral,
            is_counter,
            accent_class: Some(accent_class(&record.a_type, &moras)),
            counter_class: is_counter.then(|| counter_class(&record.orth)),
            short: mora_count <= 2,
            heavy: HEAVY_MORA.is_match(&record.pron),
            mora_window: mora_window(&moras, accent_type),
            first_accent_type: accent_type,
            connection: AccentConnection::parse(&record.a_con_type),
            modified_accent_type: modified,
            ..MoraFeatures::default()
        })
    }
}

/// Classify where the word's own accent falls. `a_type` is compared as
/// written, so a candidate list never matches a position.
fn accent_class(a_type: &str, moras: &[&str]) -> String {
    let count = moras.len();
    if a_type == "0" {
        FLAT_CLASS.to_string()
    } else if a_type == count.to_string() {
        FINAL_CLASS.to_string()
    } else if count >= 2 && a_type == (count - 1).to_string() {
        moras[count - 2..].concat()
    } else {
        OTHER_CLASS.to_string()
    }
}

/// First two moras, the moras before, at and after the accent nucleus, and
/// the last two moras. Slots that fall outside the word stay empty.
fn mora_window(moras: &[&str], accent_type: Option<i32>) -> [Option<String>; MORA_WINDOW] {
    let at = |index: i64| -> Option<String> {
        usize::try_from(index)
            .ok()
            .and_then(|i| moras.get(i))
            .map(|m| m.to_string())
    };
    let count = moras.len() as i64;
    let around_nucleus = |shift: i64| accent_type.and_then(|a| at(i64::from(a) + shift));
    let (second, second_last) = if count >= 2 {
        (at(1), at(count - 2))
    } else {
        (None, None)
    };

    [
        at(0),
        second,
        around_nucleus(-2),
        around_nucleus(-1),
        around_nucleus(0),
        second_last,
        at(count - 1),
    ]
}

fn at_line(line: usize, error: AkusentoError) -> AkusentoError {
    match error {
        AkusentoError::Format(msg) => AkusentoError::format(format!("line {line}: {msg}")),
        other => other,
    }
}

/// Records of the phrase group being collected.
#[derive(Debug, Default)]
struct PhraseGroup {
    records: Vec<FeatureRecord>,
}

impl PhraseGroup {
    fn push(&mut self, record: FeatureRecord) {
        self.records.push(record);
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fill in the phrase-local fields and emit the group.
    fn flush_into(&mut self, output: &mut Vec<String>) {
        let size = self.records.len();
        for (index, mut record) in self.records.drain(..).enumerate() {
            record.features.first_in_phrase = index == 0;
            record.features.last_in_phrase = index + 1 == size;
            record.features.phrase_size = size;
            output.push(record.to_string());
        }
    }
}
