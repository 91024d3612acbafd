#![deny(missing_docs)]
//! mdtoc output: CommonMark and JSON serializers, and the parse, index and
//! render pipeline.

/// CommonMark writer.
pub mod commonmark;
/// JSON node view.
pub mod json;

pub use commonmark::to_markdown;
pub use json::{JsonNode, json_nodes, to_json, to_json_value};

use mdtoc_core::{ParseOptions, TocError, TocOptions, index_stream, parse_stream};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CommonMark text.
    #[default]
    Markdown,
    /// Pretty-printed JSON node tree.
    Json,
}

/// Parses `input`, indexes its headings and serializes the result.
///
/// Options are resolved first, so an invalid depth range fails before any
/// parsing happens.
pub fn generate(
    input: &str,
    options: &TocOptions,
    format: OutputFormat,
) -> Result<String, TocError> {
    let config = options.resolve()?;
    let stream = parse_stream(input, &ParseOptions::default())?;
    let output = index_stream(&stream, &config)?;
    log::debug!("Rendered index as {:?}", format);
    match format {
        OutputFormat::Markdown => Ok(to_markdown(&output)),
        OutputFormat::Json => to_json(&output),
    }
}

/// [`generate`] for a file on disk. Parse errors report the file path.
pub fn generate_file(
    path: impl AsRef<Path>,
    options: &TocOptions,
    format: OutputFormat,
) -> Result<String, TocError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    generate(&input, options, format).map_err(|err| err.in_file(path.display().to_string()))
}
