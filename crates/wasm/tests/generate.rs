use mdtoc_wasm::{generate, headings};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct HeadingEntry {
    depth: u8,
    slug: Option<String>,
    text: String,
}

/// Converts JSON text into a plain JS object.
fn options(json: &str) -> JsValue {
    let value: serde_json::Value = serde_json::from_str(json).expect("valid json");
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .expect("to js")
}

#[wasm_bindgen_test]
fn generate_with_default_options() {
    let out = generate("# Doc\n\n<!-- @toc -->\n\n## Install\n", JsValue::UNDEFINED)
        .expect("generate should succeed");
    assert_eq!(
        out,
        "# Doc\n\n- [Doc](#doc)\n  - [Install](#install)\n\n## Install\n"
    );
}

#[wasm_bindgen_test]
fn generate_accepts_js_option_names() {
    let out = generate(
        "# A\n\n## B\n\n## C\n",
        options(r#"{ "type": "ordered", "standalone": true, "delimiter": "." }"#),
    )
    .expect("generate should succeed");
    assert_eq!(out, "1. [A](#a)\n   1. [B](#b)\n   2. [C](#c)\n");
}

#[wasm_bindgen_test]
fn generate_json_format() {
    let out = generate(
        "# A\n",
        options(r#"{ "standalone": true, "format": "json" }"#),
    )
    .expect("generate should succeed");
    let value: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(value[1]["type"], "list");
}

#[wasm_bindgen_test]
fn generate_rejects_inverted_range() {
    let result = generate("# A\n", options(r#"{ "depth": 3, "max": 1 }"#));
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn headings_lists_anchors() {
    let value = headings("# Intro\n\n## Intro\n\n## [Docs](https://example.com)\n")
        .expect("headings should succeed");
    let entries: Vec<HeadingEntry> = serde_wasm_bindgen::from_value(value).expect("deserialize");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].depth, 1);
    assert_eq!(entries[0].slug.as_deref(), Some("intro"));
    assert_eq!(entries[1].slug.as_deref(), Some("intro-1"));
    assert_eq!(entries[2].slug, None);
    assert_eq!(entries[2].text, "Docs");
}
