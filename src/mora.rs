//! Mora decomposition of katakana pronunciations.
//!
//! A mora is one base character followed by any run of small kana
//! (`ァ ィ ゥ ェ ォ ャ ュ ョ`), which never stand on their own. A run of small
//! kana at the very start of a string has no base to attach to and forms
//! its own mora.
//!
//! The feature extractor decomposes each morpheme on its own. The
//! accent-phrase formatter decomposes a whole phrase at once, so small kana
//! opening a morpheme extend the last mora of the morpheme before it.
//!
//! # Examples
//!
//! ```
//! use akusento::mora::split_moras;
//!
//! assert_eq!(split_moras("キョウ"), vec!["キョ", "ウ"]);
//! assert_eq!(split_moras("ファイル"), vec!["ファ", "イ", "ル"]);
//! ```

/// Characters that attach to the preceding character instead of counting
/// as a mora of their own.
pub const NON_MORA_CHARS: [char; 8] = ['ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ'];

/// Returns true if `c` combines with the preceding character.
pub fn is_non_mora(c: char) -> bool {
    NON_MORA_CHARS.contains(&c)
}

/// Iterator over the moras of a pronunciation string.
///
/// Each item borrows from the input, so concatenating all items gives back
/// the original string.
#[derive(Clone, Debug)]
pub struct Moras<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Iterator for Moras<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.offset..];
        let mut chars = rest.char_indices();
        // The head is taken unconditionally, even when it is a small kana.
        let (_, head) = chars.next()?;
        let mut end = head.len_utf8();
        for (index, c) in chars {
            if !is_non_mora(c) {
                break;
            }
            end = index + c.len_utf8();
        }

        let start = self.offset;
        self.offset += end;
        Some(&self.text[start..self.offset])
    }
}

/// Iterate over the moras of `pron`.
pub fn moras(pron: &str) -> Moras<'_> {
    Moras {
        text: pron,
        offset: 0,
    }
}

/// Split `pron` into its moras.
pub fn split_moras(pron: &str) -> Vec<&str> {
    moras(pron).collect()
}

/// Number of moras in `pron`.
pub fn count_moras(pron: &str) -> usize {
    moras(pron).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_kana() {
        assert_eq!(split_moras("コンニチワ"), vec!["コ", "ン", "ニ", "チ", "ワ"]);
        assert_eq!(count_moras("コンニチワ"), 5);
    }

    #[test]
    fn test_split_digraphs() {
        assert_eq!(split_moras("シュウチュウ"), vec!["シュ", "ウ", "チュ", "ウ"]);
        assert_eq!(split_moras("ティー"), vec!["ティ", "ー"]);
    }

    #[test]
    fn test_geminate_and_long_vowel_are_moras() {
        assert_eq!(split_moras("スッキリ"), vec!["ス", "ッ", "キ", "リ"]);
        assert_eq!(split_moras("ループ"), vec!["ル", "ー", "プ"]);
    }

    #[test]
    fn test_run_of_small_kana_attaches_to_one_base() {
        assert_eq!(split_moras("キャァ"), vec!["キャァ"]);
    }

    #[test]
    fn test_leading_small_kana_forms_its_own_mora() {
        assert_eq!(split_moras("ャア"), vec!["ャ", "ア"]);
        assert_eq!(split_moras("ァィ"), vec!["ァィ"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_moras("").is_empty());
        assert_eq!(count_moras(""), 0);
    }

    #[test]
    fn test_count_and_reconstruction() {
        for pron in ["アインシュタイン", "ボオチョオ", "ヴァイオリン", "ッ", "ギジュツリョク"] {
            let parts = split_moras(pron);
            assert_eq!(parts.concat(), pron);

            let total = pron.chars().count();
            let combining = pron.chars().filter(|c| is_non_mora(*c)).count();
            assert_eq!(parts.len(), total - combining, "{pron}");
        }
    }
}
