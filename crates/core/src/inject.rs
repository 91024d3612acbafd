//! Placing a generated index into an output stream.
//!
//! In standalone mode the input is discarded and the output is the index
//! framed as its own document. Otherwise the input passes through unchanged,
//! except that the first marker comment (`<!-- @toc -->`) is replaced by the
//! index. Without a marker the index is appended just before `Eof`.

use crate::TocError;
use crate::destination::Destination;
use crate::heading::heading_events;
use crate::indexer::{build, build_with};
use crate::node::{Arena, NodeId, NodeKind, NodeStream, NodeType};
use crate::options::TocConfig;

/// Token identifying the injection marker.
pub const MARKER: &str = "@toc";

/// Whether `id` is an HTML comment block carrying [`MARKER`].
pub fn is_marker(arena: &Arena, id: NodeId) -> bool {
    match arena.kind(id) {
        NodeKind::HtmlBlock { literal } => {
            literal.trim_start().starts_with("<!--") && literal.contains(MARKER)
        }
        _ => false,
    }
}

/// The index as a complete stream: `Document`, index nodes, `Eof`.
pub fn standalone(toc: &NodeStream) -> NodeStream {
    let mut out = NodeStream::new();
    out.push(NodeKind::Document);
    append_all(&mut out, toc);
    out.push(NodeKind::Eof);
    out
}

/// Copies `input`, splicing `toc` in place of the first marker, or before the
/// terminal `Eof` when there is no marker.
pub fn splice(input: &NodeStream, toc: &NodeStream) -> NodeStream {
    let source = input.arena();
    let mut out = NodeStream::new();
    let mut spliced = false;

    for &id in input.nodes() {
        if source.is(id, NodeType::Eof) {
            continue;
        }
        if is_marker(source, id) {
            if spliced {
                log::debug!("Dropping extra index marker");
            } else {
                log::debug!("Injecting index at marker");
                append_all(&mut out, toc);
                spliced = true;
            }
            continue;
        }
        let copy = out.arena_mut().clone_from(source, id);
        out.push_id(copy);
    }

    if !spliced {
        append_all(&mut out, toc);
    }
    out.push(NodeKind::Eof);
    out
}

fn append_all(out: &mut NodeStream, toc: &NodeStream) {
    for &id in toc.nodes() {
        let copy = out.arena_mut().clone_from(toc.arena(), id);
        out.push_id(copy);
    }
}

/// Indexes the headings of `input` and places the index according to
/// `config.standalone`.
pub fn index_stream(input: &NodeStream, config: &TocConfig) -> Result<NodeStream, TocError> {
    let toc = build(heading_events(input), config)?;
    Ok(place(input, &toc, config))
}

/// [`index_stream`] with a custom destination.
pub fn index_stream_with<D: Destination>(
    input: &NodeStream,
    config: &TocConfig,
    destination: D,
) -> Result<NodeStream, TocError> {
    let toc = build_with(heading_events(input), config, destination)?;
    Ok(place(input, &toc, config))
}

fn place(input: &NodeStream, toc: &NodeStream, config: &TocConfig) -> NodeStream {
    if config.standalone {
        standalone(toc)
    } else {
        splice(input, toc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(blocks: &[NodeKind]) -> NodeStream {
        let mut stream = NodeStream::new();
        stream.push(NodeKind::Document);
        for kind in blocks {
            if let NodeKind::Heading { level } = kind {
                stream.push_heading(*level, &format!("Heading {}", level));
            } else {
                stream.push(kind.clone());
            }
        }
        stream.push(NodeKind::Eof);
        stream
    }

    fn marker() -> NodeKind {
        NodeKind::HtmlBlock {
            literal: "<!-- @toc -->".into(),
        }
    }

    #[test]
    fn marker_detection() {
        let mut arena = Arena::new();
        let yes = arena.create(marker());
        let other_comment = arena.create(NodeKind::HtmlBlock {
            literal: "<!-- note -->".into(),
        });
        let not_comment = arena.create(NodeKind::HtmlBlock {
            literal: "<div>@toc</div>".into(),
        });
        assert!(is_marker(&arena, yes));
        assert!(!is_marker(&arena, other_comment));
        assert!(!is_marker(&arena, not_comment));
    }

    #[test]
    fn splices_at_marker() {
        let input = document(&[
            NodeKind::Paragraph,
            marker(),
            NodeKind::Heading { level: 1 },
        ]);
        let out = index_stream(&input, &TocConfig::default()).unwrap();
        assert_eq!(
            out.types(),
            vec![
                NodeType::Document,
                NodeType::Paragraph,
                NodeType::List,
                NodeType::Heading,
                NodeType::Eof
            ]
        );
    }

    #[test]
    fn only_first_marker_receives_the_index() {
        let input = document(&[marker(), NodeKind::Heading { level: 1 }, marker()]);
        let out = index_stream(&input, &TocConfig::default()).unwrap();
        assert_eq!(
            out.types(),
            vec![
                NodeType::Document,
                NodeType::List,
                NodeType::Heading,
                NodeType::Eof
            ]
        );
    }

    #[test]
    fn appends_before_eof_without_marker() {
        let config = TocConfig {
            title: Some("Contents".into()),
            ..Default::default()
        };
        let input = document(&[NodeKind::Heading { level: 1 }, NodeKind::Paragraph]);
        let out = index_stream(&input, &config).unwrap();
        assert_eq!(
            out.types(),
            vec![
                NodeType::Document,
                NodeType::Heading,
                NodeType::Paragraph,
                NodeType::Heading,
                NodeType::List,
                NodeType::Eof
            ]
        );
    }

    #[test]
    fn standalone_discards_input() {
        let config = TocConfig {
            standalone: true,
            ..Default::default()
        };
        let input = document(&[NodeKind::Heading { level: 1 }, NodeKind::Paragraph]);
        let out = index_stream(&input, &config).unwrap();
        assert_eq!(
            out.types(),
            vec![NodeType::Document, NodeType::List, NodeType::Eof]
        );
        let list = out.nodes()[1];
        assert_eq!(out.arena().children(list).len(), 1);
    }

    #[test]
    fn custom_destination_is_used() {
        let input = document(&[NodeKind::Heading { level: 2 }]);
        let out = index_stream_with(&input, &TocConfig::default(), |_: &str| {
            "#custom".to_string()
        })
        .unwrap();
        let arena = out.arena();
        let list = out.nodes()[2];
        let item = arena.first_child(list).unwrap();
        let link = arena.first_child(item).unwrap();
        assert_eq!(arena.kind(link).destination(), Some("#custom"));
    }
}
