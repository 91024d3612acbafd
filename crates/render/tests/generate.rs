use mdtoc_core::{TocError, TocOptions};
use mdtoc_render::{OutputFormat, generate, generate_file};

fn markdown(input: &str, options: TocOptions) -> String {
    generate(input, &options, OutputFormat::Markdown).expect("generate")
}

fn standalone() -> TocOptions {
    TocOptions {
        standalone: Some(true),
        ..Default::default()
    }
}

#[test]
fn index_replaces_marker() {
    let input = "# Doc\n\n<!-- @toc -->\n\n## Install\n\n## Usage\n";
    insta::assert_snapshot!(markdown(input, TocOptions::default()), @r"
    # Doc

    - [Doc](#doc)
      - [Install](#install)
      - [Usage](#usage)

    ## Install

    ## Usage
    ");
}

#[test]
fn index_is_appended_without_marker() {
    let options = TocOptions {
        title: Some("Contents".into()),
        ..Default::default()
    };
    assert_eq!(
        markdown("# One\n\nText.\n", options),
        "# One\n\nText.\n\n# Contents\n\n- [One](#one)\n"
    );
}

#[test]
fn standalone_ordered_from_level_two() {
    let options = TocOptions {
        list_type: Some("ordered".into()),
        depth: Some(2),
        ..standalone()
    };
    let input = "# Doc\n\n## A\n\n### A.1\n\n## B\n";
    insta::assert_snapshot!(markdown(input, options), @r"
    1) [A](#a)
       1) [A.1](#a1)
    2) [B](#b)
    ");
}

#[test]
fn base_and_prefix_build_destinations() {
    let options = TocOptions {
        base: Some("/guide".into()),
        ..standalone()
    };
    assert_eq!(
        markdown("## Install\n", options),
        "- [Install](/guide#install)\n"
    );
}

#[test]
fn plain_entries_with_custom_bullet() {
    let options = TocOptions {
        link: Some(false),
        bullet: Some("*".into()),
        ..standalone()
    };
    assert_eq!(markdown("# Install\n# Usage\n", options), "* Install\n* Usage\n");
}

#[test]
fn duplicate_headings_across_document() {
    let input = "# API\n\n## Errors\n\n# CLI\n\n## Errors\n";
    insta::assert_snapshot!(markdown(input, standalone()), @r"
    - [API](#api)
      - [Errors](#errors)
    - [CLI](#cli)
      - [Errors](#errors-1)
    ");
}

#[test]
fn json_output_is_framed() {
    let text = generate("# A\n", &standalone(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let types: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["document", "list", "eof"]);
    assert_eq!(value[1]["children"][0]["children"][0]["destination"], "#a");
}

#[test]
fn invalid_depth_range_is_rejected() {
    let options = TocOptions {
        depth: Some(4),
        max: Some(2),
        ..Default::default()
    };
    let err = generate("# A\n", &options, OutputFormat::Markdown).unwrap_err();
    assert!(matches!(
        err,
        TocError::InvalidDepthRange {
            floor: 4,
            ceiling: 2
        }
    ));
}

#[test]
fn generate_from_file() {
    let path = std::env::temp_dir().join(format!("mdtoc-generate-{}.md", std::process::id()));
    std::fs::write(&path, "# One\n\n## Two\n").unwrap();
    let out = generate_file(&path, &standalone(), OutputFormat::Markdown);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(out.unwrap(), "- [One](#one)\n  - [Two](#two)\n");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = generate_file(
        "/nonexistent/mdtoc/input.md",
        &TocOptions::default(),
        OutputFormat::Markdown,
    )
    .unwrap_err();
    assert!(matches!(err, TocError::IoError(_)));
}
