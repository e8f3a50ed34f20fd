//! A single accent phrase.

use crate::mora::{is_non_mora, moras};
use crate::phrase::{BOUNDARY_MARKER, NUCLEUS_MARKER};
use crate::record::TaggedRecord;

/// The pronounced morphemes of one accent phrase.
///
/// Auxiliary symbols are not part of the phrase; the formatter splices them
/// in after rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccentPhrase {
    morphemes: Vec<TaggedRecord>,
}

impl AccentPhrase {
    /// Create an empty phrase.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, morpheme: TaggedRecord) {
        self.morphemes.push(morpheme);
    }

    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    pub fn clear(&mut self) {
        self.morphemes.clear();
    }

    /// Total number of moras in the phrase.
    pub fn mora_count(&self) -> usize {
        self.morpheme_mora_counts().sum()
    }

    /// 1-based mora position of the phrase's accent nucleus, `None` when the
    /// phrase is flat.
    ///
    /// The last morpheme with a positive accent decides; its accent counts
    /// from the first mora of that morpheme.
    pub fn nucleus(&self) -> Option<usize> {
        let mut preceding = 0;
        let mut nucleus = None;

        for (morpheme, count) in self.morphemes.iter().zip(self.morpheme_mora_counts()) {
            if morpheme.accent > 0 {
                nucleus = Some(preceding + morpheme.accent as usize);
            }
            preceding += count;
        }

        nucleus
    }

    /// Render the phrase followed by a boundary marker.
    ///
    /// The nucleus marker follows the nucleus mora unless the nucleus is the
    /// last mora, lies beyond it, or is absent; then it closes the phrase.
    pub fn render(&self) -> String {
        let total = self.mora_count();
        let nucleus = self.nucleus();
        let mut rendered = String::new();

        for (index, mora) in moras(&self.pronunciation()).enumerate() {
            rendered.push_str(mora);
            if nucleus == Some(index + 1) && index + 1 < total {
                rendered.push(NUCLEUS_MARKER);
            }
        }

        if nucleus.is_none_or(|n| n >= total) {
            rendered.push(NUCLEUS_MARKER);
        }
        rendered.push(BOUNDARY_MARKER);
        rendered
    }

    /// The morphemes' pronunciations as one string.
    fn pronunciation(&self) -> String {
        self.morphemes.iter().map(|m| m.pron.as_str()).collect()
    }

    /// Moras each morpheme contributes. Small kana opening a morpheme
    /// extend the last mora already emitted, so they only count when
    /// nothing precedes them.
    fn morpheme_mora_counts(&self) -> impl Iterator<Item = usize> + '_ {
        let mut emitted = false;
        self.morphemes.iter().map(move |morpheme| {
            let mut count = moras(&morpheme.pron).count();
            if emitted && morpheme.pron.starts_with(is_non_mora) {
                count -= 1;
            }
            emitted |= count > 0;
            count
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BoundaryFlag;

    fn morpheme(pron: &str, accent: i32) -> TaggedRecord {
        TaggedRecord {
            orth: pron.to_string(),
            pron: pron.to_string(),
            boundary: BoundaryFlag::Continue,
            mora_count: moras(pron).count(),
            accent,
        }
    }

    fn phrase(parts: &[(&str, i32)]) -> AccentPhrase {
        let mut phrase = AccentPhrase::new();
        for (pron, accent) in parts {
            phrase.push(morpheme(pron, *accent));
        }
        phrase
    }

    #[test]
    fn test_flat_phrase() {
        let phrase = phrase(&[("コンニチワ", 0)]);
        assert_eq!(phrase.nucleus(), None);
        assert_eq!(phrase.render(), "コンニチワ'/");
    }

    #[test]
    fn test_inline_nucleus() {
        assert_eq!(phrase(&[("セカイ", 1)]).render(), "セ'カイ/");
        assert_eq!(phrase(&[("ムズカシイト", 4)]).render(), "ムズカシ'イト/");
    }

    #[test]
    fn test_nucleus_on_last_mora_trails() {
        let phrase = phrase(&[("ハシ", 2)]);
        assert_eq!(phrase.nucleus(), Some(2));
        assert_eq!(phrase.render(), "ハシ'/");
    }

    #[test]
    fn test_nucleus_beyond_phrase_trails() {
        assert_eq!(phrase(&[("ハシ", 5)]).render(), "ハシ'/");
    }

    #[test]
    fn test_nucleus_counts_across_morphemes() {
        let phrase = phrase(&[("クセ", 2), ("ヤ", 0)]);
        assert_eq!(phrase.mora_count(), 3);
        assert_eq!(phrase.nucleus(), Some(2));
        assert_eq!(phrase.render(), "クセ'ヤ/");
    }

    #[test]
    fn test_last_accented_morpheme_wins() {
        let phrase = phrase(&[("ギジュツ", 1), ("リョク", 1)]);
        assert_eq!(phrase.mora_count(), 5);
        assert_eq!(phrase.nucleus(), Some(4));
        assert_eq!(phrase.render(), "ギジュツリョ'ク/");

        let phrase = self::phrase(&[("ギジュツ", 3), ("リョク", 0)]);
        assert_eq!(phrase.render(), "ギジュツ'リョク/");
    }

    #[test]
    fn test_digraph_moras() {
        assert_eq!(
            phrase(&[("シュウチュウスル", 5), ("ト", 0)]).render(),
            "シュウチュウス'ルト/"
        );
    }

    #[test]
    fn test_leading_small_kana_joins_previous_morpheme() {
        let phrase = phrase(&[("キ", 0), ("ャア", 1)]);
        assert_eq!(phrase.mora_count(), 2);
        assert_eq!(phrase.nucleus(), Some(2));
        assert_eq!(phrase.render(), "キャア'/");

        let phrase = self::phrase(&[("ト", 0), ("ョ", 0), ("タ", 1)]);
        assert_eq!(phrase.mora_count(), 2);
        assert_eq!(phrase.render(), "トョタ'/");
    }

    #[test]
    fn test_leading_small_kana_opening_phrase_is_a_mora() {
        let phrase = phrase(&[("ャ", 0), ("ア", 1)]);
        assert_eq!(phrase.mora_count(), 2);
        assert_eq!(phrase.render(), "ャア'/");
    }

    #[test]
    fn test_exactly_one_nucleus_marker() {
        for accent in 0..6 {
            let rendered = phrase(&[("オナジ", accent)]).render();
            assert_eq!(rendered.matches(NUCLEUS_MARKER).count(), 1, "{rendered}");
        }
    }
}
