use mdtoc_core::{ParseOptions, Slugger, TocError, TocOptions, heading_events, parse_stream};
use mdtoc_render::{OutputFormat, generate as render};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Options accepted by [`generate`]: every index option plus the output
/// format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WasmTocConfig {
    #[serde(flatten)]
    pub options: TocOptions,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

fn parse_config(config: JsValue) -> Result<WasmTocConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmTocConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&TocError::invalid_options(e.to_string()).to_string()))
}

// ============================================================================
// Index API
// ============================================================================

/// Generates the table of contents for `source`.
///
/// # Arguments
///
/// * `source` - Markdown text
/// * `options` - Optional object: `type`, `link`, `depth`, `max`, `prefix`,
///   `base`, `bullet`, `delimiter`, `title`, `level`, `splitRootLists`,
///   `standalone` and `format` (`"markdown"` or `"json"`)
///
/// # Returns
///
/// The document with the index injected at `<!-- @toc -->` (or appended), or
/// only the index when `standalone` is set.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { generate } from './mdtoc_wasm';
///
/// const toc = generate('# A\n\n## B\n', { standalone: true });
/// // "- [A](#a)\n  - [B](#b)\n"
/// ```
#[wasm_bindgen]
pub fn generate(source: &str, options: JsValue) -> Result<String, JsError> {
    let cfg = parse_config(options)?;
    render(source, &cfg.options, cfg.format.unwrap_or_default())
        .map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// Heading API
// ============================================================================

/// Heading metadata extracted from the document.
#[derive(Debug, Clone, Serialize)]
pub struct HeadingEntry {
    /// Heading depth (1-6).
    pub depth: u8,
    /// Anchor slug, or `None` when the heading is itself a link.
    pub slug: Option<String>,
    /// Visible heading text.
    pub text: String,
}

/// Lists the headings of `source` in document order with the anchors the
/// index would link to.
pub fn heading_entries(source: &str) -> Result<Vec<HeadingEntry>, TocError> {
    let stream = parse_stream(source, &ParseOptions::default())?;
    let mut slugger = Slugger::new();
    Ok(heading_events(&stream)
        .map(|event| {
            let text = event.literal();
            let slug = (!event.is_preformatted_link()).then(|| slugger.next_slug(&text));
            HeadingEntry {
                depth: event.level(),
                slug,
                text,
            }
        })
        .collect())
}

/// Returns an array of `{ depth, slug, text }` objects.
#[wasm_bindgen]
pub fn headings(source: &str) -> Result<JsValue, JsError> {
    let entries = heading_entries(source).map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&entries)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
