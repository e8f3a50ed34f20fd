//! The accent annotation pipeline.
//!
//! [`AccentPipeline`] runs one request through every stage in order:
//!
//! 1. Input char filters: wave dashes become elongation marks
//! 2. Segmenter: one accent phrase per line
//! 3. Analyzer: morpheme records
//! 4. [`MoraFeatureExtractor`]
//! 5. Rule baseline, label encoder, tagger, label decoder
//! 6. [`AccentPhraseFormatter`]
//! 7. Output char filters: elongation resolution and punctuation
//!    normalization
//!
//! Stages are [`Stage`] trait objects, so external programs and in-process
//! implementations are interchangeable. Any stage failure aborts the
//! request; no partial result is returned.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use akusento::error::Result;
//! use akusento::pipeline::{AccentPipeline, DictionaryTagger, Stage};
//!
//! /// Stands in for MeCab with a canned analysis.
//! struct CannedAnalyzer;
//!
//! impl Stage for CannedAnalyzer {
//!     fn run(&self, _input: &str) -> Result<String> {
//!         Ok("世界 セカイ 名詞-普通名詞-一般-* * * セカイ-世界 漢 * 1 C1 * O /\n".to_string())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "canned"
//!     }
//! }
//!
//! let pipeline = AccentPipeline::new(Arc::new(CannedAnalyzer), Arc::new(DictionaryTagger::new()));
//! assert_eq!(pipeline.convert("世界").unwrap(), "セ'カイ");
//! assert_eq!(pipeline.convert("  ").unwrap(), "");
//! ```

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::char_filter::elongation::ElongationCharFilter;
use crate::char_filter::long_vowel::LongVowelCharFilter;
use crate::char_filter::punctuation::PunctuationCharFilter;
use crate::char_filter::{CharFilter, apply_all};
use crate::error::Result;
use crate::feature::MoraFeatureExtractor;
use crate::phrase::AccentPhraseFormatter;

pub mod command;
pub mod config;
pub mod mecab;
pub mod stage;
pub mod tagger;

pub use command::CommandStage;
pub use config::PipelineConfig;
pub use mecab::MecabAnalyzer;
pub use stage::{PassthroughStage, Stage};
pub use tagger::{CrfTagger, DictionaryTagger};

/// Filters applied to raw text before segmentation.
pub fn input_filters() -> Vec<Arc<dyn CharFilter>> {
    vec![Arc::new(LongVowelCharFilter::new())]
}

/// Filters applied to the formatter output.
pub fn output_filters() -> Vec<Arc<dyn CharFilter>> {
    vec![
        Arc::new(ElongationCharFilter::new()),
        Arc::new(PunctuationCharFilter::new()),
    ]
}

/// Format tagger output with `formatter` and pass a non-empty result
/// through `filters`.
pub fn render(
    formatter: &AccentPhraseFormatter,
    filters: &[Arc<dyn CharFilter>],
    tagged: &str,
) -> String {
    let formatted = formatter.format(tagged);
    if formatted.is_empty() {
        return formatted;
    }
    apply_all(filters, &formatted)
}

/// Text to accent notation, end to end.
///
/// Holds only immutable stages, so one pipeline can serve many threads.
#[derive(Clone)]
pub struct AccentPipeline {
    input_filters: Vec<Arc<dyn CharFilter>>,
    segmenter: Arc<dyn Stage>,
    analyzer: Arc<dyn Stage>,
    extractor: MoraFeatureExtractor,
    rule: Arc<dyn Stage>,
    encoder: Arc<dyn Stage>,
    tagger: Arc<dyn Stage>,
    decoder: Arc<dyn Stage>,
    formatter: AccentPhraseFormatter,
    output_filters: Vec<Arc<dyn CharFilter>>,
}

impl AccentPipeline {
    /// Create a pipeline around an analyzer and a tagger. The other stages
    /// pass their input through until replaced.
    pub fn new(analyzer: Arc<dyn Stage>, tagger: Arc<dyn Stage>) -> Self {
        let passthrough: Arc<dyn Stage> = Arc::new(PassthroughStage::new());
        AccentPipeline {
            input_filters: input_filters(),
            segmenter: passthrough.clone(),
            analyzer,
            extractor: MoraFeatureExtractor::new(),
            rule: passthrough.clone(),
            encoder: passthrough.clone(),
            tagger,
            decoder: passthrough,
            formatter: AccentPhraseFormatter::new(),
            output_filters: output_filters(),
        }
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Stage>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_rule(mut self, rule: Arc<dyn Stage>) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn Stage>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn Stage>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Names of the external stages in execution order: segmenter,
    /// analyzer, rule, encoder, tagger, decoder.
    pub fn stage_names(&self) -> Vec<&'static str> {
        [
            &self.segmenter,
            &self.analyzer,
            &self.rule,
            &self.encoder,
            &self.tagger,
            &self.decoder,
        ]
        .iter()
        .map(|stage| stage.name())
        .collect()
    }

    /// Convert one text into accent notation.
    ///
    /// Whitespace-only input yields an empty string without running any
    /// stage.
    pub fn convert(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let text = apply_all(&self.input_filters, text);
        let segmented = run_stage(&self.segmenter, &text)?;
        let morphemes = run_stage(&self.analyzer, &segmented)?;
        let features = self.extractor.extract(&morphemes)?;
        let ruled = run_stage(&self.rule, &features)?;
        let encoded = run_stage(&self.encoder, &ruled)?;
        let tagged = run_stage(&self.tagger, &encoded)?;
        let decoded = run_stage(&self.decoder, &tagged)?;

        Ok(self.render(&decoded))
    }

    /// Convert independent texts in parallel. Results keep the input order.
    pub fn convert_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Result<String>> {
        texts
            .par_iter()
            .map(|text| self.convert(text.as_ref()))
            .collect()
    }

    /// Format tagger output and normalize the result.
    pub fn render(&self, tagged: &str) -> String {
        render(&self.formatter, &self.output_filters, tagged)
    }

    /// Apply the output char filters to an already rendered string.
    pub fn normalize(&self, rendered: &str) -> String {
        apply_all(&self.output_filters, rendered)
    }
}

impl fmt::Debug for AccentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |filters: &[Arc<dyn CharFilter>]| {
            filters.iter().map(|filter| filter.name()).collect::<Vec<_>>()
        };
        f.debug_struct("AccentPipeline")
            .field("input_filters", &names(&self.input_filters))
            .field("stages", &self.stage_names())
            .field("output_filters", &names(&self.output_filters))
            .finish()
    }
}

fn run_stage(stage: &Arc<dyn Stage>, input: &str) -> Result<String> {
    let output = stage.run(input)?;
    debug!(
        stage = stage.name(),
        input_bytes = input.len(),
        output_bytes = output.len(),
        "stage finished"
    );
    Ok(output)
}
