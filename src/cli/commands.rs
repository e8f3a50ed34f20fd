//! Command implementations for the akusento CLI.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use tracing::info;

use crate::char_filter::apply_all;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::feature::MoraFeatureExtractor;
use crate::phrase::AccentPhraseFormatter;
use crate::pipeline::config::{PipelineConfig, TaggerKind};
use crate::pipeline::{output_filters, render};

/// Execute a CLI command.
pub fn execute_command(args: AkusentoArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Convert(convert_args) => convert(convert_args, args.output_format, &mut out),
        Command::Features(features_args) => {
            extract_features(features_args, args.output_format, &mut out)
        }
        Command::Format(format_args) => format_tagged(format_args, args.output_format, &mut out),
        Command::Normalize(normalize_args) => {
            normalize(normalize_args, args.output_format, &mut out)
        }
    }
}

/// Resolve the pipeline configuration: command-line flags and their
/// environment variables override the configuration file.
pub fn resolve_config(args: &ConvertArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(dicdir) = &args.dicdir {
        config.analyzer.dicdir = dicdir.clone();
    }
    if let Some(userdic) = &args.userdic {
        config.analyzer.userdic = (!userdic.as_os_str().is_empty()).then(|| userdic.clone());
    }
    if let Some(model) = &args.model {
        config.tagger.model = model.clone();
    }
    if args.dictionary_tagger {
        config.tagger.kind = TaggerKind::Dictionary;
    }

    config.validate()?;
    Ok(config)
}

/// Run the full pipeline on the argument text or on every stdin line.
fn convert<W: Write>(args: &ConvertArgs, format: OutputFormat, out: &mut W) -> Result<()> {
    let pipeline = resolve_config(args)?.build()?;

    if let Some(text) = &args.text {
        let accent = pipeline.convert(text)?;
        return write_accent(out, &accent, format);
    }

    let mut requests = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            requests.push(line);
        }
    }

    let start = Instant::now();
    let results = pipeline.convert_batch(&requests);
    info!(
        requests = requests.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "converted"
    );

    for result in results {
        write_accent(out, &result?, format)?;
    }
    Ok(())
}

/// Run the feature extractor alone.
fn extract_features<W: Write>(
    args: &FeaturesArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let input = read_input(&args.input)?;
    let features = MoraFeatureExtractor::new().extract(&input)?;
    write_features(out, &features, format)
}

/// Render tagger output into the final notation.
fn format_tagged<W: Write>(args: &FormatArgs, format: OutputFormat, out: &mut W) -> Result<()> {
    let input = read_input(&args.input)?;
    let rendered = render(&AccentPhraseFormatter::new(), &output_filters(), &input);
    write_accent(out, &rendered, format)
}

/// Apply the output filters to an already rendered string.
fn normalize<W: Write>(args: &NormalizeArgs, format: OutputFormat, out: &mut W) -> Result<()> {
    write_accent(out, &apply_all(&output_filters(), &args.text), format)
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::error::AkusentoError;
    use crate::record::TAGGED_MIN_FIELDS;

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["akusento", "convert"];
        full.extend_from_slice(argv);
        match AkusentoArgs::try_parse_from(full).unwrap().command {
            Command::Convert(args) => args,
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("akusento.toml");
        fs::write(
            &path,
            "[analyzer]\ndicdir = \"/from/file\"\nuserdic = \"/file/user.dic\"\n\n[tagger]\nmodel = \"file_model\"\n",
        )
        .unwrap();

        let mut args = convert_args(&["--dicdir", "/from/flag"]);
        args.config = Some(path);
        args.userdic = None;
        args.model = None;
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.analyzer.dicdir, PathBuf::from("/from/flag"));
        assert_eq!(config.analyzer.userdic, Some(PathBuf::from("/file/user.dic")));
        assert_eq!(config.tagger.model, PathBuf::from("file_model"));
        assert_eq!(config.tagger.kind, TaggerKind::Crf);
    }

    #[test]
    fn test_empty_userdic_disables_it() {
        let mut args = convert_args(&["--dictionary-tagger"]);
        args.userdic = Some(PathBuf::new());
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.analyzer.userdic, None);
        assert_eq!(config.tagger.kind, TaggerKind::Dictionary);
    }

    #[test]
    fn test_format_command() {
        let mut fields = vec!["*"; TAGGED_MIN_FIELDS];
        fields[0] = "世界";
        fields[1] = "セカイ";
        fields[12] = "/";
        fields[13] = "3";
        fields[TAGGED_MIN_FIELDS - 1] = "1";

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.txt");
        fs::write(&path, fields.join(" ")).unwrap();

        let mut out = Vec::new();
        format_tagged(&FormatArgs { input: path }, OutputFormat::Human, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "セ'カイ\n");
    }

    #[test]
    fn test_normalize_command() {
        let mut out = Vec::new();
        let args = NormalizeArgs {
            text: "/ル'ー/プ/、".to_string(),
        };
        normalize(&args, OutputFormat::Json, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"accent\":\"ル'ウ/プ\"}\n");
    }

    #[test]
    fn test_features_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        fs::write(
            &path,
            "世界 セカイ 名詞-普通名詞-一般-* * * セカイ-世界 漢 * 1 C1 * O /\n",
        )
        .unwrap();

        let mut out = Vec::new();
        extract_features(&FeaturesArgs { input: path }, OutputFormat::Human, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first.split(' ').count(), 35);
        assert!(first.starts_with("世界 セカイ"));
    }

    #[test]
    fn test_missing_input_file() {
        let args = FormatArgs {
            input: PathBuf::from("/nonexistent/tagged.txt"),
        };
        let err = format_tagged(&args, OutputFormat::Human, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AkusentoError::Anyhow(_)));
        assert!(err.to_string().starts_with("cannot read /nonexistent/tagged.txt: "));
    }
}
