//! # akusento
//!
//! Mora-level pitch-accent annotation of Japanese text for speech synthesis
//! front-ends.
//!
//! Text goes through morphological analysis, mora feature extraction and a
//! sequence tagger, and comes out in a notation such as
//! `コンニチワ'/セ'カイ`: `/` separates accent phrases, `'` follows the
//! accent-nucleus mora, `、` marks a pause and `？` a rising ending.
//!
//! ## Modules
//!
//! - [`mora`] - splitting katakana pronunciations into moras
//! - [`record`] - the whitespace-separated record formats between stages
//! - [`feature`] - mora features for the tagger
//! - [`phrase`] - accent phrases and the notation formatter
//! - [`char_filter`] - elongation and punctuation rewrites
//! - [`pipeline`] - stage orchestration, external processes and configuration
//! - [`cli`] - the command-line front-end

pub mod char_filter;
pub mod cli;
pub mod error;
pub mod feature;
pub mod mora;
pub mod phrase;
pub mod pipeline;
pub mod record;

pub mod prelude {
    pub use crate::error::{AkusentoError, Result};
    pub use crate::pipeline::{AccentPipeline, PipelineConfig, Stage};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
