//! Elongation-mark resolution.
//!
//! Speech front-ends expect the vowel of a lengthened mora to be spelled
//! out, so `カー` has to become `カア`. The vowel is found by looking back
//! from the mark over nucleus and boundary markers to the closest kana;
//! a two-character unit such as `ファ` or `ディ` wins over its last
//! character alone. When nothing usable precedes the mark, `ウ` is used.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::warn;

use super::CharFilter;
use crate::phrase::{BOUNDARY_MARKER, ELONGATION_MARK, NUCLEUS_MARKER};

/// Vowel used when the preceding unit is unknown.
pub const FALLBACK_VOWEL: char = 'ウ';

/// Punctuation dropped from the output. `、` and `？` are kept.
pub const REMOVED_PUNCTUATION: &[char] = &['。', '！', '…', '〜', '～', '・'];

const VOWEL_COLUMNS: &[(&str, char)] = &[
    ("ア", 'ア'), ("カ", 'ア'), ("サ", 'ア'), ("タ", 'ア'), ("ナ", 'ア'),
    ("ハ", 'ア'), ("マ", 'ア'), ("ヤ", 'ア'), ("ラ", 'ア'), ("ワ", 'ア'),
    ("ガ", 'ア'), ("ザ", 'ア'), ("ダ", 'ア'), ("バ", 'ア'), ("パ", 'ア'),
    ("ファ", 'ア'), ("ヴァ", 'ア'),
    ("イ", 'イ'), ("キ", 'イ'), ("シ", 'イ'), ("チ", 'イ'), ("ニ", 'イ'),
    ("ヒ", 'イ'), ("ミ", 'イ'), ("リ", 'イ'), ("ギ", 'イ'), ("ジ", 'イ'),
    ("ビ", 'イ'), ("ピ", 'イ'), ("ディ", 'イ'), ("ティ", 'イ'), ("フィ", 'イ'),
    ("ヴィ", 'イ'),
    ("ウ", 'ウ'), ("ク", 'ウ'), ("ス", 'ウ'), ("ツ", 'ウ'), ("ヌ", 'ウ'),
    ("フ", 'ウ'), ("ム", 'ウ'), ("ユ", 'ウ'), ("ル", 'ウ'), ("グ", 'ウ'),
    ("ズ", 'ウ'), ("ブ", 'ウ'), ("プ", 'ウ'), ("ドゥ", 'ウ'), ("トゥ", 'ウ'),
    ("ヴ", 'ウ'), ("ッ", 'ウ'),
    ("エ", 'エ'), ("ケ", 'エ'), ("セ", 'エ'), ("テ", 'エ'), ("ネ", 'エ'),
    ("ヘ", 'エ'), ("メ", 'エ'), ("レ", 'エ'), ("ゲ", 'エ'), ("ゼ", 'エ'),
    ("デ", 'エ'), ("ベ", 'エ'), ("ペ", 'エ'), ("フェ", 'エ'), ("ヴェ", 'エ'),
    ("オ", 'オ'), ("コ", 'オ'), ("ソ", 'オ'), ("ト", 'オ'), ("ノ", 'オ'),
    ("ホ", 'オ'), ("モ", 'オ'), ("ヨ", 'オ'), ("ロ", 'オ'), ("ヲ", 'オ'),
    ("ゴ", 'オ'), ("ゾ", 'オ'), ("ド", 'オ'), ("ボ", 'オ'), ("ポ", 'オ'),
    ("フォ", 'オ'), ("ヴォ", 'オ'),
    ("ン", 'ン'),
    // small kana closing a digraph
    ("ャ", 'ア'), ("ュ", 'ウ'), ("ョ", 'オ'),
    ("ァ", 'ア'), ("ィ", 'イ'), ("ゥ", 'ウ'), ("ェ", 'エ'), ("ォ", 'オ'),
];

static VOWEL_MAP: LazyLock<HashMap<&'static str, char>> =
    LazyLock::new(|| VOWEL_COLUMNS.iter().copied().collect());

/// Vowel that lengthens `unit`, if `unit` is a known kana unit.
pub fn vowel_of(unit: &str) -> Option<char> {
    VOWEL_MAP.get(unit).copied()
}

/// Resolves elongation marks into vowels and removes punctuation the
/// notation does not accept.
#[derive(Clone, Debug, Default)]
pub struct ElongationCharFilter;

impl ElongationCharFilter {
    pub fn new() -> Self {
        ElongationCharFilter
    }

    /// Vowel for an elongation mark following `emitted`.
    fn resolve(emitted: &[char]) -> Option<char> {
        let last = emitted
            .iter()
            .rposition(|c| *c != NUCLEUS_MARKER && *c != BOUNDARY_MARKER)?;

        if last > 0 {
            let pair: String = emitted[last - 1..=last].iter().collect();
            if let Some(vowel) = vowel_of(&pair) {
                return Some(vowel);
            }
        }

        let mut buf = [0u8; 4];
        vowel_of(emitted[last].encode_utf8(&mut buf))
    }
}

impl CharFilter for ElongationCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut emitted: Vec<char> = Vec::with_capacity(input.chars().count());

        for c in input.chars() {
            if c == ELONGATION_MARK {
                let vowel = Self::resolve(&emitted).unwrap_or_else(|| {
                    warn!(text = input, "no kana before elongation mark, using fallback vowel");
                    FALLBACK_VOWEL
                });
                emitted.push(vowel);
            } else if !REMOVED_PUNCTUATION.contains(&c) {
                emitted.push(c);
            }
        }

        emitted.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "elongation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(input: &str) -> String {
        ElongationCharFilter::new().filter(input)
    }

    #[test]
    fn test_vowel_columns() {
        assert_eq!(resolve("アー"), "アア");
        assert_eq!(resolve("カー"), "カア");
        assert_eq!(resolve("スー"), "スウ");
        assert_eq!(resolve("ケー"), "ケエ");
        assert_eq!(resolve("ポー"), "ポオ");
        assert_eq!(resolve("ビー"), "ビイ");
    }

    #[test]
    fn test_digraph_preferred_over_last_char() {
        assert_eq!(resolve("ファー"), "ファア");
        assert_eq!(resolve("ディー"), "ディイ");
        assert_eq!(resolve("ドゥー"), "ドゥウ");
    }

    #[test]
    fn test_palatalized_mora_uses_small_kana() {
        assert_eq!(resolve("スケジュール"), "スケジュウル");
        assert_eq!(resolve("キャー"), "キャア");
        assert_eq!(resolve("ショー"), "ショオ");
    }

    #[test]
    fn test_skips_markers() {
        assert_eq!(resolve("オツカレサマ'ー"), "オツカレサマ'ア");
        assert_eq!(resolve("ダヨ'/ー"), "ダヨ'/オ");
    }

    #[test]
    fn test_repeated_marks() {
        assert_eq!(resolve("ネーー"), "ネエエ");
    }

    #[test]
    fn test_fallback_vowel() {
        assert_eq!(resolve("ー"), "ウ");
        assert_eq!(resolve("'/ー"), "'/ウ");
        assert_eq!(resolve("、ー"), "、ウ");
    }

    #[test]
    fn test_removes_punctuation() {
        assert_eq!(resolve("ナ'ルネ…"), "ナ'ルネ");
        assert_eq!(resolve("エラ'イッ！"), "エラ'イッ");
        assert_eq!(resolve("ア'ト。"), "ア'ト");
        assert_eq!(resolve("ア・イ"), "アイ");
    }

    #[test]
    fn test_keeps_comma_and_question_mark() {
        assert_eq!(resolve("アレレ'、スケ"), "アレレ'、スケ");
        assert_eq!(resolve("ノ'カモ？"), "ノ'カモ？");
    }
}
