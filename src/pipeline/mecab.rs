//! MeCab morphological analysis reshaped into morpheme records.
//!
//! MeCab prints one `surface<TAB>feature,feature,...` line per word and
//! `EOS` after every input line. UniDic dictionaries come in two feature
//! layouts, 25 columns and 29 or more; both are mapped onto the 13-field
//! record. Words with fewer features (unknown words, symbols) become
//! auxiliary records with pronunciation `*`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::command::CommandStage;
use super::stage::Stage;
use crate::error::Result;
use crate::record::{ABSENT, AUXILIARY_PRON, BoundaryFlag};

/// Fewest features of a fully described word.
pub const MIN_DESCRIBED_FEATURES: usize = 25;

/// Fewest features of the extended UniDic layout.
pub const EXTENDED_LAYOUT_FEATURES: usize = 29;

/// Named-entity tag written to every record.
const IREX_OUTSIDE: &str = "O";

const END_OF_SENTENCE: &str = "EOS";

/// Column positions of one feature layout.
struct FeatureLayout {
    orth: usize,
    pron: usize,
    goshu: usize,
    i_type: [usize; 3],
    a_type: usize,
    a_con_type: usize,
    a_mod_type: usize,
}

const COMPACT_LAYOUT: FeatureLayout = FeatureLayout {
    orth: 8,
    pron: 9,
    goshu: 11,
    i_type: [16, 17, 18],
    a_type: 22,
    a_con_type: 23,
    a_mod_type: 24,
};

const EXTENDED_LAYOUT: FeatureLayout = FeatureLayout {
    orth: 8,
    pron: 9,
    goshu: 12,
    i_type: [13, 14, 17],
    a_type: 24,
    a_con_type: 25,
    a_mod_type: 26,
};

/// Split a feature string on commas outside double quotes.
///
/// Quotes are dropped; empty fields become `*`.
pub fn split_features(features: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in features.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    for field in &mut fields {
        if field.is_empty() {
            field.push_str(ABSENT);
        }
    }
    fields
}

fn field(features: &[String], index: usize) -> &str {
    features.get(index).map_or(ABSENT, String::as_str)
}

fn auxiliary_line(surface: &str, features: &[String], flag: BoundaryFlag) -> String {
    let pos = (0..4).map(|i| field(features, i)).collect::<Vec<_>>().join("-");
    [
        surface,
        AUXILIARY_PRON,
        pos.as_str(),
        field(features, 4),
        ABSENT,
        "*-*",
        ABSENT,
        "*-*-*",
        ABSENT,
        ABSENT,
        ABSENT,
        IREX_OUTSIDE,
        flag.as_str(),
    ]
    .join(" ")
}

fn described_line(features: &[String], layout: &FeatureLayout, flag: BoundaryFlag) -> String {
    let f = |i: usize| field(features, i);
    let pos = format!("{}-{}-{}-{}", f(0), f(1), f(2), f(3));
    let lemma = format!("{}-{}", f(7), f(6));
    let i_type = layout.i_type.map(f).join("-");
    [
        f(layout.orth),
        f(layout.pron),
        pos.as_str(),
        f(4),
        f(5),
        lemma.as_str(),
        f(layout.goshu),
        i_type.as_str(),
        f(layout.a_type),
        f(layout.a_con_type),
        f(layout.a_mod_type),
        IREX_OUTSIDE,
        flag.as_str(),
    ]
    .join(" ")
}

/// Reshape raw MeCab output into the morpheme record stream.
///
/// `EOS` becomes a blank line and starts a new phrase group. The first
/// record of a group is flagged `/`, the rest `-`. Lines without a tab are
/// ignored, as are words with 26 to 28 features, which match no known
/// layout.
pub fn reshape(mecab_output: &str) -> String {
    let mut lines = Vec::new();
    let mut flag = BoundaryFlag::Start;
    let mut dropped = 0;

    for line in mecab_output.trim().lines() {
        if line == END_OF_SENTENCE {
            lines.push(String::new());
            flag = BoundaryFlag::Start;
            continue;
        }

        let Some((surface, features)) = line.split_once('\t') else {
            continue;
        };
        let features = split_features(features);

        let reshaped = match features.len() {
            n if n < MIN_DESCRIBED_FEATURES => auxiliary_line(surface, &features, flag),
            MIN_DESCRIBED_FEATURES => described_line(&features, &COMPACT_LAYOUT, flag),
            n if n >= EXTENDED_LAYOUT_FEATURES => {
                described_line(&features, &EXTENDED_LAYOUT, flag)
            }
            _ => {
                dropped += 1;
                flag = BoundaryFlag::Continue;
                continue;
            }
        };
        lines.push(reshaped);
        flag = BoundaryFlag::Continue;
    }

    if dropped > 0 {
        debug!(dropped, "dropped words with an unknown feature layout");
    }
    lines.join("\n")
}

/// Runs MeCab with a dictionary and reshapes its output.
#[derive(Clone, Debug)]
pub struct MecabAnalyzer {
    command: CommandStage,
}

impl MecabAnalyzer {
    /// Analyzer running `mecab` with the given dictionary directory and
    /// optional user dictionary.
    pub fn new<P: AsRef<Path>>(dicdir: P, userdic: Option<PathBuf>) -> Self {
        Self::with_program("mecab", dicdir, userdic)
    }

    /// Like [`MecabAnalyzer::new`] with a different executable.
    pub fn with_program<S: Into<String>, P: AsRef<Path>>(
        program: S,
        dicdir: P,
        userdic: Option<PathBuf>,
    ) -> Self {
        let mut args = vec![format!("--dicdir={}", dicdir.as_ref().display())];
        if let Some(userdic) = userdic {
            args.push(format!("--userdic={}", userdic.display()));
        }
        MecabAnalyzer {
            command: CommandStage::new(program, args).with_label("analyzer"),
        }
    }

    pub fn command(&self) -> &CommandStage {
        &self.command
    }
}

impl Stage for MecabAnalyzer {
    fn run(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Ok(String::new());
        }
        let output = self.command.run(input)?;
        Ok(reshape(&output))
    }

    fn name(&self) -> &'static str {
        "mecab"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BASE_FIELD_COUNT, MorphemeRecord};

    fn compact_word(orth: &str, pron: &str) -> String {
        let mut f = vec![String::new(); MIN_DESCRIBED_FEATURES];
        f[0] = "名詞".into();
        f[1] = "普通名詞".into();
        f[2] = "一般".into();
        f[6] = "世界".into();
        f[7] = "セカイ".into();
        f[8] = orth.into();
        f[9] = pron.into();
        f[11] = "漢".into();
        f[22] = "1".into();
        f[23] = "C1".into();
        format!("{orth}\t{}", f.join(","))
    }

    #[test]
    fn test_split_features_honours_quotes() {
        assert_eq!(
            split_features(r#"補助記号,"読点,句点",,x"#),
            vec!["補助記号", "読点,句点", "*", "x"]
        );
        assert_eq!(split_features(""), vec!["*"]);
    }

    #[test]
    fn test_compact_layout() {
        let output = format!("{}\nEOS\n", compact_word("世界", "セカイ"));
        let reshaped = reshape(&output);
        let mut lines = reshaped.lines();

        let record = MorphemeRecord::parse_line(lines.next().unwrap()).unwrap();
        assert_eq!(record.orth, "世界");
        assert_eq!(record.pron, "セカイ");
        assert_eq!(record.pos, "名詞-普通名詞-一般-*");
        assert_eq!(record.lemma, "セカイ-世界");
        assert_eq!(record.goshu, "漢");
        assert_eq!(record.i_type, "*-*-*");
        assert_eq!(record.a_type, "1");
        assert_eq!(record.a_con_type, "C1");
        assert_eq!(record.a_mod_type, "*");
        assert_eq!(record.irex, "O");
        assert_eq!(record.boundary, BoundaryFlag::Start);
        assert_eq!(reshaped, format!("{record}\n"));
    }

    #[test]
    fn test_extended_layout() {
        let mut f = vec!["*".to_string(); EXTENDED_LAYOUT_FEATURES + 1];
        f[8] = "は".into();
        f[9] = "ワ".into();
        f[12] = "和".into();
        f[24] = "*".into();
        f[25] = "動詞%F2@0".into();
        f[26] = "M4@1".into();
        let output = format!("は\t{}\n", f.join(","));

        let record = MorphemeRecord::parse_line(&reshape(&output)).unwrap();
        assert_eq!(record.orth, "は");
        assert_eq!(record.pron, "ワ");
        assert_eq!(record.goshu, "和");
        assert_eq!(record.a_con_type, "動詞%F2@0");
        assert_eq!(record.a_mod_type, "M4@1");
    }

    #[test]
    fn test_short_feature_list_is_auxiliary() {
        let output = "「\t補助記号,括弧開,*,*,*,*\nEOS\n";
        let reshaped = reshape(output);
        let record = MorphemeRecord::parse_line(reshaped.lines().next().unwrap()).unwrap();
        assert!(record.is_auxiliary());
        assert_eq!(record.orth, "「");
        assert_eq!(record.pos, "補助記号-括弧開-*-*");
        assert_eq!(record.fields().len(), BASE_FIELD_COUNT);
    }

    #[test]
    fn test_flags_and_sentence_breaks() {
        let output = [
            compact_word("今日", "キョー"),
            compact_word("は", "ワ"),
            "EOS".to_string(),
            compact_word("晴れ", "ハレ"),
            "EOS".to_string(),
        ]
        .join("\n");
        let reshaped = reshape(&output);
        let flags: Vec<&str> = reshaped
            .lines()
            .map(|line| line.rsplit(' ').next().unwrap_or(""))
            .collect();
        assert_eq!(flags, vec!["/", "-", "", "/"]);
    }

    #[test]
    fn test_unknown_layout_and_untabbed_lines_are_dropped() {
        let odd = format!("謎\t{}", vec!["x"; 27].join(","));
        let output = format!("header line\n{odd}\n{}\nEOS", compact_word("世界", "セカイ"));
        let reshaped = reshape(&output);
        let records: Vec<_> = reshaped
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| MorphemeRecord::parse_line(line).unwrap())
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].orth, "世界");
        assert_eq!(records[0].boundary, BoundaryFlag::Continue);
    }

    #[test]
    fn test_empty_input_skips_process() {
        let analyzer = MecabAnalyzer::with_program("akusento-no-such-mecab", "/dic", None);
        assert_eq!(analyzer.run("  \n").unwrap(), "");
    }

    #[test]
    fn test_command_line() {
        let analyzer = MecabAnalyzer::new("/usr/src/app/unidic", Some(PathBuf::from("user.dic")));
        assert_eq!(analyzer.command().program(), "mecab");
        assert_eq!(
            analyzer.command().args(),
            ["--dicdir=/usr/src/app/unidic", "--userdic=user.dic"]
        );
    }
}
