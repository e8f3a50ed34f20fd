//! Command line argument parsing for the akusento CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// akusento - pitch-accent annotation of Japanese text
#[derive(Parser, Debug, Clone)]
#[command(name = "akusento")]
#[command(about = "Annotate Japanese text with mora-level pitch accent for speech synthesis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AkusentoArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AkusentoArgs {
    /// Effective verbosity: 0 quiet, 1 default, 2 verbose, 3 debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            1 + self.verbose.min(2)
        }
    }

    /// Log filter directive for the effective verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert text to accent notation with the full pipeline
    Convert(ConvertArgs),

    /// Append mora features to a morpheme record stream
    Features(FeaturesArgs),

    /// Render tagger output as accent notation
    Format(FormatArgs),

    /// Resolve elongation marks and normalize punctuation of a rendered string
    Normalize(NormalizeArgs),
}

/// Arguments for the full pipeline
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Text to convert; each non-empty stdin line is converted when absent
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// MeCab dictionary directory
    #[arg(long, env = "MECAB_DICDIR", value_name = "DIR")]
    pub dicdir: Option<PathBuf>,

    /// MeCab user dictionary
    #[arg(long, env = "MECAB_USERDIC", value_name = "FILE")]
    pub userdic: Option<PathBuf>,

    /// CRF++ accent model
    #[arg(long, env = "AKUSENTO_MODEL", value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Use dictionary accent types instead of the CRF model
    #[arg(long)]
    pub dictionary_tagger: bool,
}

/// Arguments for feature extraction
#[derive(Args, Debug, Clone)]
pub struct FeaturesArgs {
    /// Morpheme record file, `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,
}

/// Arguments for formatting tagger output
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Tagger output file, `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,
}

/// Arguments for normalizing a rendered string
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Rendered accent string
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// The bare result
    Human,
    /// `{"accent": ...}` objects
    Json,
}
