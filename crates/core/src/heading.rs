//! Heading events captured from a node stream.

use crate::node::{Arena, NodeId, NodeStream, NodeType};

/// A heading as seen by the indexer: its level and inline content.
///
/// Borrows the arena that owns the heading; the heading itself is never
/// modified.
#[derive(Debug, Clone, Copy)]
pub struct HeadingEvent<'a> {
    arena: &'a Arena,
    node: NodeId,
    level: u8,
}

impl<'a> HeadingEvent<'a> {
    /// Captures `node` if it is a heading.
    pub fn from_node(arena: &'a Arena, node: NodeId) -> Option<Self> {
        let level = arena.level(node)?;
        Some(Self { arena, node, level })
    }

    /// Heading level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Arena holding the heading.
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    /// Heading node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Inline children of the heading.
    pub fn inline_children(&self) -> &'a [NodeId] {
        self.arena.children(self.node)
    }

    /// The author supplied link, when the first inline child is a link.
    pub fn preformatted_link(&self) -> Option<NodeId> {
        self.arena
            .first_child(self.node)
            .filter(|child| self.arena.is(*child, NodeType::Link))
    }

    /// Whether the first inline child is already a link.
    pub fn is_preformatted_link(&self) -> bool {
        self.preformatted_link().is_some()
    }

    /// Text descendants in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        self.arena.collect(self.node, NodeType::Text)
    }

    /// Concatenated text of all text descendants.
    pub fn literal(&self) -> String {
        self.text_nodes()
            .into_iter()
            .filter_map(|id| self.arena.literal(id))
            .collect()
    }
}

/// Heading events for the top-level headings of a stream.
pub fn heading_events(stream: &NodeStream) -> impl Iterator<Item = HeadingEvent<'_>> {
    let arena = stream.arena();
    stream
        .nodes()
        .iter()
        .filter_map(move |id| HeadingEvent::from_node(arena, *id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn literal_concatenates_nested_text() {
        let mut stream = NodeStream::new();
        let heading = stream.push(NodeKind::Heading { level: 2 });
        let arena = stream.arena_mut();
        let plain = arena.create(NodeKind::text("Using "));
        let strong = arena.create(NodeKind::Strong);
        let bold = arena.create(NodeKind::text("bold"));
        let code = arena.create(NodeKind::Code {
            literal: "code".into(),
        });
        arena.append_child(heading, plain);
        arena.append_child(heading, strong);
        arena.append_child(strong, bold);
        arena.append_child(heading, code);

        let event = HeadingEvent::from_node(stream.arena(), heading).unwrap();
        assert_eq!(event.level(), 2);
        assert_eq!(event.literal(), "Using bold");
        assert_eq!(event.inline_children().len(), 3);
        assert!(!event.is_preformatted_link());
    }

    #[test]
    fn detects_leading_link() {
        let mut stream = NodeStream::new();
        let heading = stream.push(NodeKind::Heading { level: 1 });
        let arena = stream.arena_mut();
        let link = arena.create(NodeKind::link("https://example.com"));
        let text = arena.create(NodeKind::text("Example"));
        arena.append_child(link, text);
        arena.append_child(heading, link);

        let event = HeadingEvent::from_node(stream.arena(), heading).unwrap();
        assert_eq!(event.preformatted_link(), Some(link));
    }

    #[test]
    fn only_headings_become_events() {
        let mut stream = NodeStream::new();
        stream.push(NodeKind::Document);
        stream.push_heading(1, "One");
        stream.push(NodeKind::Paragraph);
        stream.push_heading(3, "Three");
        stream.push(NodeKind::Eof);

        let levels: Vec<u8> = heading_events(&stream).map(|e| e.level()).collect();
        assert_eq!(levels, vec![1, 3]);
    }
}
