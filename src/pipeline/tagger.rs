//! Accent-nucleus taggers.
//!
//! A tagger reads feature records and appends one predicted column, the
//! accent-nucleus position of each morpheme, which the formatter reads.

use std::path::{Path, PathBuf};

use super::command::CommandStage;
use super::stage::Stage;
use crate::error::Result;
use crate::feature::DERIVED_FIELD_COUNT;
use crate::record::BASE_FIELD_COUNT;

/// Fields of a feature record.
pub const FEATURE_RECORD_FIELDS: usize = BASE_FIELD_COUNT + DERIVED_FIELD_COUNT;

/// Runs CRF++ `crf_test` with a trained accent model.
#[derive(Clone, Debug)]
pub struct CrfTagger {
    model: PathBuf,
    command: CommandStage,
}

impl CrfTagger {
    pub fn new<P: AsRef<Path>>(model: P) -> Self {
        Self::with_program("crf_test", model)
    }

    /// Like [`CrfTagger::new`] with a different executable.
    pub fn with_program<S: Into<String>, P: AsRef<Path>>(program: S, model: P) -> Self {
        let model = model.as_ref().to_path_buf();
        let args = vec!["-m".to_string(), model.display().to_string()];
        CrfTagger {
            command: CommandStage::new(program, args).with_label("tagger"),
            model,
        }
    }

    pub fn model(&self) -> &Path {
        &self.model
    }
}

impl Stage for CrfTagger {
    fn run(&self, input: &str) -> Result<String> {
        self.command.run(input)
    }

    fn name(&self) -> &'static str {
        "crf"
    }
}

/// Tags every morpheme with its dictionary accent type.
///
/// The prediction is the record's own modified accent type (the last
/// feature column), or 0 when that is absent or negative. Useful without a
/// trained model and as a deterministic tagger in tests. Blank lines and
/// lines that are not feature records pass through untouched.
#[derive(Clone, Debug, Default)]
pub struct DictionaryTagger;

impl DictionaryTagger {
    pub fn new() -> Self {
        DictionaryTagger
    }

    fn tag_line(line: &str) -> String {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < FEATURE_RECORD_FIELDS {
            return line.to_string();
        }
        let accent = fields[FEATURE_RECORD_FIELDS - 1]
            .parse::<i32>()
            .map_or(0, |accent| accent.max(0));
        format!("{} {accent}", fields.join(" "))
    }
}

impl Stage for DictionaryTagger {
    fn run(&self, input: &str) -> Result<String> {
        Ok(input
            .split('\n')
            .map(Self::tag_line)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
