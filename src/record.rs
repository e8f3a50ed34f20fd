//! Fixed-schema records exchanged between pipeline stages.
//!
//! - [`MorphemeRecord`] - one analyzed word, the 13-field analyzer line
//! - [`AccentModification`] - the parsed `aModType` column
//! - [`TaggedRecord`] - a tagger output line as consumed by the formatter
//!
//! Lines are whitespace-delimited. Field order of a morpheme line:
//!
//! ```text
//! 0 orth  1 pron  2 pos  3 cType  4 cForm  5 lemma  6 goshu  7 iType
//! 8 aType  9 aConType  10 aModType  11 irex  12 boundary
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AkusentoError, Result};

/// Number of fields in an analyzer line.
pub const BASE_FIELD_COUNT: usize = 13;

/// Minimum number of fields in a tagger output line.
pub const TAGGED_MIN_FIELDS: usize = 36;

/// Pronunciation value marking an auxiliary symbol (punctuation).
pub const AUXILIARY_PRON: &str = "*";

/// Placeholder for an absent value.
pub const ABSENT: &str = "*";

const BOUNDARY_FIELD: usize = 12;
const MORA_COUNT_FIELD: usize = 13;

/// Phrase-boundary flag carried by every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryFlag {
    /// `/`: a new accent phrase starts at this record
    Start,
    /// `-`: this record continues the current accent phrase
    Continue,
}

impl BoundaryFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryFlag::Start => "/",
            BoundaryFlag::Continue => "-",
        }
    }
}

impl FromStr for BoundaryFlag {
    type Err = AkusentoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "/" => Ok(BoundaryFlag::Start),
            "-" => Ok(BoundaryFlag::Continue),
            other => Err(AkusentoError::format(format!(
                "invalid boundary flag '{other}', expected '/' or '-'"
            ))),
        }
    }
}

impl fmt::Display for BoundaryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analyzed morpheme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphemeRecord {
    /// Surface form
    pub orth: String,
    /// Katakana pronunciation, `*` for auxiliary symbols
    pub pron: String,
    /// Part-of-speech tag, levels joined by `-`
    pub pos: String,
    pub c_type: String,
    pub c_form: String,
    /// Lemma and lemma reading joined by `-`
    pub lemma: String,
    /// Word-origin class
    pub goshu: String,
    /// Prefix-interaction tag
    pub i_type: String,
    /// Accent type, possibly a comma-separated candidate list
    pub a_type: String,
    /// Accent-connection tag
    pub a_con_type: String,
    /// Accent-modification tag, `<kind>@<offset>` or `*`
    pub a_mod_type: String,
    /// Named-entity tag
    pub irex: String,
    pub boundary: BoundaryFlag,
}

impl MorphemeRecord {
    /// Parse one analyzer line. The line must have exactly
    /// [`BASE_FIELD_COUNT`] whitespace-separated fields.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        Self::from_fields(&fields)
    }

    /// Build a record from already split fields.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() != BASE_FIELD_COUNT {
            return Err(AkusentoError::format(format!(
                "expected {BASE_FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        Ok(MorphemeRecord {
            orth: fields[0].to_string(),
            pron: fields[1].to_string(),
            pos: fields[2].to_string(),
            c_type: fields[3].to_string(),
            c_form: fields[4].to_string(),
            lemma: fields[5].to_string(),
            goshu: fields[6].to_string(),
            i_type: fields[7].to_string(),
            a_type: fields[8].to_string(),
            a_con_type: fields[9].to_string(),
            a_mod_type: fields[10].to_string(),
            irex: fields[11].to_string(),
            boundary: fields[BOUNDARY_FIELD].parse()?,
        })
    }

    /// Returns true for punctuation and other unpronounced symbols.
    pub fn is_auxiliary(&self) -> bool {
        self.pron == AUXILIARY_PRON
    }

    /// The fields in line order.
    pub fn fields(&self) -> [&str; BASE_FIELD_COUNT] {
        [
            &self.orth,
            &self.pron,
            &self.pos,
            &self.c_type,
            &self.c_form,
            &self.lemma,
            &self.goshu,
            &self.i_type,
            &self.a_type,
            &self.a_con_type,
            &self.a_mod_type,
            &self.irex,
            self.boundary.as_str(),
        ]
    }

    /// The first accent-type candidate as written (everything before the
    /// first comma).
    pub fn first_accent_candidate(&self) -> &str {
        match self.a_type.split_once(',') {
            Some((first, _)) => first,
            None => &self.a_type,
        }
    }

    /// The first accent-type candidate as an integer, `None` when absent.
    pub fn first_accent_type(&self) -> Option<i32> {
        self.first_accent_candidate().parse().ok()
    }

    /// The parsed accent modification, `None` for `*`.
    pub fn accent_modification(&self) -> Result<Option<AccentModification>> {
        if self.a_mod_type == ABSENT {
            return Ok(None);
        }
        self.a_mod_type.parse().map(Some)
    }
}

impl fmt::Display for MorphemeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(" "))
    }
}

/// Kind of an accent modification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModificationKind {
    M1,
    M2,
    M4,
    /// Any other kind; leaves the accent type untouched
    Other(String),
}

impl From<&str> for ModificationKind {
    fn from(kind: &str) -> Self {
        match kind {
            "M1" => ModificationKind::M1,
            "M2" => ModificationKind::M2,
            "M4" => ModificationKind::M4,
            other => ModificationKind::Other(other.to_string()),
        }
    }
}

/// A parsed `<kind>@<offset>` accent modification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentModification {
    pub kind: ModificationKind,
    pub offset: i32,
}

impl AccentModification {
    /// Apply the modification to a word of `mora_count` moras whose first
    /// accent-type candidate is `accent_type`.
    ///
    /// - `M1`: `n - v`
    /// - `M2`: `n - v` when the accent type is 0, else unchanged
    /// - `M4`: unchanged for 0, 1 and absent, else `a - v`
    ///
    /// An offset that takes the result out of the `i32` range is a format
    /// error.
    pub fn apply(&self, mora_count: usize, accent_type: Option<i32>) -> Result<Option<i32>> {
        let from_end = || {
            i32::try_from(mora_count)
                .ok()
                .and_then(|n| n.checked_sub(self.offset))
                .map(Some)
                .ok_or_else(|| self.out_of_range())
        };
        match self.kind {
            ModificationKind::M1 => from_end(),
            ModificationKind::M2 => match accent_type {
                Some(0) => from_end(),
                other => Ok(other),
            },
            ModificationKind::M4 => match accent_type {
                None | Some(0) | Some(1) => Ok(accent_type),
                Some(a) => a
                    .checked_sub(self.offset)
                    .map(Some)
                    .ok_or_else(|| self.out_of_range()),
            },
            ModificationKind::Other(_) => Ok(accent_type),
        }
    }

    fn out_of_range(&self) -> AkusentoError {
        AkusentoError::format(format!(
            "accent modification offset {} out of range",
            self.offset
        ))
    }
}

/// Accent type after an optional modification (`MaType1`).
pub fn modified_accent_type(
    modification: Option<&AccentModification>,
    mora_count: usize,
    accent_type: Option<i32>,
) -> Result<Option<i32>> {
    match modification {
        Some(modification) => modification.apply(mora_count, accent_type),
        None => Ok(accent_type),
    }
}

impl FromStr for AccentModification {
    type Err = AkusentoError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, offset) = s.split_once('@').ok_or_else(|| {
            AkusentoError::format(format!("invalid accent modification '{s}'"))
        })?;
        let offset = offset.parse().map_err(|_| {
            AkusentoError::format(format!("invalid accent modification offset in '{s}'"))
        })?;

        Ok(AccentModification {
            kind: ModificationKind::from(kind),
            offset,
        })
    }
}

/// A tagger output line reduced to what the formatter reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedRecord {
    pub orth: String,
    pub pron: String,
    pub boundary: BoundaryFlag,
    /// Mora count column; `0` for auxiliary symbols
    pub mora_count: usize,
    /// Absolute accent-nucleus position within the morpheme, 0 for flat
    pub accent: i32,
}

impl TaggedRecord {
    /// Parse a tagger output line.
    ///
    /// Returns `None` for lines the formatter skips: fewer than
    /// [`TAGGED_MIN_FIELDS`] fields, an unknown boundary flag, or a
    /// non-numeric mora count on a pronounced morpheme. A non-numeric
    /// accent column reads as 0.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < TAGGED_MIN_FIELDS {
            return None;
        }

        let boundary = fields[BOUNDARY_FIELD].parse().ok()?;
        let pron = fields[1];
        let (mora_count, accent) = if pron == AUXILIARY_PRON {
            (0, 0)
        } else {
            let mora_count = fields[MORA_COUNT_FIELD].parse().ok()?;
            let accent = fields[fields.len() - 1].parse().unwrap_or(0);
            (mora_count, accent)
        };

        Some(TaggedRecord {
            orth: fields[0].to_string(),
            pron: pron.to_string(),
            boundary,
            mora_count,
            accent,
        })
    }

    pub fn is_auxiliary(&self) -> bool {
        self.pron == AUXILIARY_PRON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "学習 ガクシュウ 名詞-普通名詞-サ変可能-* * * 学習-ガクシュウ 漢 * 0 C2 * O /";

    #[test]
    fn test_parse_line() {
        let record = MorphemeRecord::parse_line(LINE).unwrap();
        assert_eq!(record.orth, "学習");
        assert_eq!(record.pron, "ガクシュウ");
        assert_eq!(record.a_type, "0");
        assert_eq!(record.boundary, BoundaryFlag::Start);
        assert!(!record.is_auxiliary());
        assert_eq!(record.to_string(), LINE);
    }

    #[test]
    fn test_parse_line_wrong_field_count() {
        let err = MorphemeRecord::parse_line("学習 ガクシュウ 名詞").unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("expected 13 fields, found 3"));
    }

    #[test]
    fn test_parse_line_bad_boundary() {
        let line = LINE.replace(" /", " x");
        assert!(MorphemeRecord::parse_line(&line).unwrap_err().is_format());
    }

    #[test]
    fn test_first_accent_candidate() {
        let mut record = MorphemeRecord::parse_line(LINE).unwrap();
        record.a_type = "2,0".to_string();
        assert_eq!(record.first_accent_candidate(), "2");
        assert_eq!(record.first_accent_type(), Some(2));

        record.a_type = "*".to_string();
        assert_eq!(record.first_accent_type(), None);
    }

    #[test]
    fn test_accent_modification_parse() {
        let modification: AccentModification = "M2@1".parse().unwrap();
        assert_eq!(modification.kind, ModificationKind::M2);
        assert_eq!(modification.offset, 1);

        assert!("M2".parse::<AccentModification>().is_err());
        assert!("M2@x".parse::<AccentModification>().is_err());
    }

    #[test]
    fn test_modified_accent_type_table() {
        let m1 = AccentModification {
            kind: ModificationKind::M1,
            offset: 1,
        };
        assert_eq!(m1.apply(4, Some(0)).unwrap(), Some(3));
        assert_eq!(m1.apply(4, None).unwrap(), Some(3));

        let m2 = AccentModification {
            kind: ModificationKind::M2,
            offset: 2,
        };
        assert_eq!(m2.apply(5, Some(0)).unwrap(), Some(3));
        assert_eq!(m2.apply(5, Some(4)).unwrap(), Some(4));
        assert_eq!(m2.apply(5, None).unwrap(), None);

        let m4 = AccentModification {
            kind: ModificationKind::M4,
            offset: 1,
        };
        assert_eq!(m4.apply(5, Some(0)).unwrap(), Some(0));
        assert_eq!(m4.apply(5, Some(1)).unwrap(), Some(1));
        assert_eq!(m4.apply(5, None).unwrap(), None);
        assert_eq!(m4.apply(5, Some(3)).unwrap(), Some(2));

        let other = AccentModification {
            kind: ModificationKind::from("P2"),
            offset: 1,
        };
        assert_eq!(other.apply(5, Some(3)).unwrap(), Some(3));

        assert_eq!(modified_accent_type(None, 5, Some(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_extreme_modification_offset_is_format_error() {
        let m1: AccentModification = "M1@-2147483648".parse().unwrap();
        assert!(m1.apply(2, Some(0)).unwrap_err().is_format());

        let m4 = AccentModification {
            kind: ModificationKind::M4,
            offset: i32::MAX,
        };
        assert!(m4.apply(2, Some(-2)).unwrap_err().is_format());
        assert_eq!(m4.apply(2, Some(3)).unwrap(), Some(3 - i32::MAX));
    }

    #[test]
    fn test_tagged_record() {
        let mut fields = vec!["x"; TAGGED_MIN_FIELDS];
        fields[0] = "世界";
        fields[1] = "セカイ";
        fields[12] = "-";
        fields[13] = "3";
        fields[35] = "1";
        let record = TaggedRecord::parse_line(&fields.join(" ")).unwrap();
        assert_eq!(record.orth, "世界");
        assert_eq!(record.boundary, BoundaryFlag::Continue);
        assert_eq!(record.mora_count, 3);
        assert_eq!(record.accent, 1);

        fields[35] = "*";
        let record = TaggedRecord::parse_line(&fields.join(" ")).unwrap();
        assert_eq!(record.accent, 0);

        assert!(TaggedRecord::parse_line(&fields[..35].join(" ")).is_none());
    }
}
