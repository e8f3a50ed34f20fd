//! Configuration for the accent pipeline.
//!
//! # Examples
//!
//! ```
//! use akusento::pipeline::config::{PipelineConfig, TaggerKind};
//!
//! let config = PipelineConfig::from_toml_str(
//!     r#"
//!     [analyzer]
//!     dicdir = "/opt/unidic"
//!
//!     [tagger]
//!     kind = "dictionary"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.analyzer.program, "mecab");
//! assert_eq!(config.tagger.kind, TaggerKind::Dictionary);
//! assert!(config.build().is_ok());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::AccentPipeline;
use super::command::CommandStage;
use super::mecab::MecabAnalyzer;
use super::stage::Stage;
use super::tagger::{CrfTagger, DictionaryTagger};
use crate::error::{AkusentoError, Result};

pub const DEFAULT_MECAB_PROGRAM: &str = "mecab";
pub const DEFAULT_DICDIR: &str = "/usr/src/app/unidic";
pub const DEFAULT_CRF_PROGRAM: &str = "crf_test";
pub const DEFAULT_MODEL: &str = "model_accent";

/// Configuration of the whole pipeline.
///
/// Optional stages that are not configured pass their input through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub analyzer: AnalyzerConfig,
    pub tagger: TaggerConfig,
    /// Splits the text into one accent phrase per line
    pub segmenter: Option<CommandConfig>,
    /// Rule-based accent baseline
    pub rule: Option<CommandConfig>,
    /// Absolute to relative accent labels, before tagging
    pub encoder: Option<CommandConfig>,
    /// Relative to absolute accent labels, after tagging
    pub decoder: Option<CommandConfig>,
}

/// MeCab settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub program: String,
    pub dicdir: PathBuf,
    pub userdic: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_MECAB_PROGRAM.to_string(),
            dicdir: PathBuf::from(DEFAULT_DICDIR),
            userdic: None,
        }
    }
}

/// Which tagger predicts the accent nuclei.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggerKind {
    /// CRF++ with a trained model
    #[default]
    Crf,
    /// Dictionary accent types, no model
    Dictionary,
}

/// Tagger settings. `program` and `model` are only read for `crf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerConfig {
    pub kind: TaggerKind,
    pub program: String,
    pub model: PathBuf,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            kind: TaggerKind::Crf,
            program: DEFAULT_CRF_PROGRAM.to_string(),
            model: PathBuf::from(DEFAULT_MODEL),
        }
    }
}

/// An external command given as `[program, arg, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    pub command: Vec<String>,
}

impl CommandConfig {
    fn stage(&self, label: &'static str) -> Result<Arc<dyn Stage>> {
        let stage = CommandStage::from_argv(&self.command)
            .map_err(|_| AkusentoError::config(format!("[{label}] command must name a program")))?;
        Ok(Arc::new(stage.with_label(label)))
    }
}

impl PipelineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AkusentoError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.analyzer.program.trim().is_empty() {
            return Err(AkusentoError::config("[analyzer] program must not be empty"));
        }
        if self.analyzer.dicdir.as_os_str().is_empty() {
            return Err(AkusentoError::config("[analyzer] dicdir must not be empty"));
        }
        if self.tagger.kind == TaggerKind::Crf {
            if self.tagger.program.trim().is_empty() {
                return Err(AkusentoError::config("[tagger] program must not be empty"));
            }
            if self.tagger.model.as_os_str().is_empty() {
                return Err(AkusentoError::config("[tagger] model must not be empty"));
            }
        }
        for (label, command) in self.optional_stages() {
            if let Some(command) = command {
                command.stage(label)?;
            }
        }
        Ok(())
    }

    fn optional_stages(&self) -> [(&'static str, Option<&CommandConfig>); 4] {
        [
            ("segmenter", self.segmenter.as_ref()),
            ("rule", self.rule.as_ref()),
            ("encoder", self.encoder.as_ref()),
            ("decoder", self.decoder.as_ref()),
        ]
    }

    /// Build the pipeline this configuration describes.
    pub fn build(&self) -> Result<AccentPipeline> {
        self.validate()?;

        let analyzer = Arc::new(MecabAnalyzer::with_program(
            self.analyzer.program.clone(),
            &self.analyzer.dicdir,
            self.analyzer.userdic.clone(),
        ));
        let tagger: Arc<dyn Stage> = match self.tagger.kind {
            TaggerKind::Crf => Arc::new(CrfTagger::with_program(
                self.tagger.program.clone(),
                &self.tagger.model,
            )),
            TaggerKind::Dictionary => Arc::new(DictionaryTagger::new()),
        };

        let mut pipeline = AccentPipeline::new(analyzer, tagger);
        if let Some(command) = &self.segmenter {
            pipeline = pipeline.with_segmenter(command.stage("segmenter")?);
        }
        if let Some(command) = &self.rule {
            pipeline = pipeline.with_rule(command.stage("rule")?);
        }
        if let Some(command) = &self.encoder {
            pipeline = pipeline.with_encoder(command.stage("encoder")?);
        }
        if let Some(command) = &self.decoder {
            pipeline = pipeline.with_decoder(command.stage("decoder")?);
        }
        Ok(pipeline)
    }
}
