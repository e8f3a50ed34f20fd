use super::CharFilter;
use crate::phrase::ELONGATION_MARK;

const WAVE_DASHES: [char; 2] = ['〜', '～'];

/// Rewrites wave dashes (`〜` U+301C, `～` U+FF5E), commonly typed for a
/// drawn-out vowel, into the elongation mark.
#[derive(Clone, Debug, Default)]
pub struct LongVowelCharFilter;

impl LongVowelCharFilter {
    pub fn new() -> Self {
        LongVowelCharFilter
    }
}

impl CharFilter for LongVowelCharFilter {
    fn filter(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| {
                if WAVE_DASHES.contains(&c) {
                    ELONGATION_MARK
                } else {
                    c
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "long_vowel"
    }
}
