//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::Result;

/// Result of a conversion, in the shape of the HTTP service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentResult {
    pub accent: String,
}

/// Result of feature extraction: one entry per output line, blank entries
/// separating phrase groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureResult {
    pub records: Vec<String>,
}

/// Write one accent string.
pub fn write_accent<W: Write>(out: &mut W, accent: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => writeln!(out, "{accent}")?,
        OutputFormat::Json => {
            let result = AccentResult {
                accent: accent.to_string(),
            };
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
        }
    }
    Ok(())
}

/// Write feature extractor output.
pub fn write_features<W: Write>(out: &mut W, features: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => writeln!(out, "{features}")?,
        OutputFormat::Json => {
            let result = FeatureResult {
                records: features.split('\n').map(str::to_string).collect(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
    }
    Ok(())
}
