//! Arena-backed document node model.
//!
//! Nodes live in an [`Arena`] and are addressed by [`NodeId`]. The `children`
//! vector of a node is the only ownership edge; `parent` is a back reference
//! used for lookups and upward walks. Subtrees can be deep-copied between
//! arenas with [`Arena::clone_from`], which always yields a detached node.

use serde::Serialize;

/// Index of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// List flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// Unordered list using a bullet character.
    #[default]
    Bullet,
    /// Numbered list using a delimiter.
    Ordered,
}

/// Layout attributes shared by list and item nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    /// Bullet or ordered.
    #[serde(rename = "type")]
    pub list_type: ListType,
    /// Whether items are rendered without blank lines between them.
    pub tight: bool,
    /// Width of the marker plus trailing space.
    pub padding: usize,
    /// Indentation before the marker.
    pub marker_offset: usize,
    /// First number of an ordered list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// `.` or `)` for ordered lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    /// `-`, `+` or `*` for bullet lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_char: Option<char>,
}

impl ListData {
    /// Bullet list data with the given marker character.
    pub fn bullet(bullet_char: char) -> Self {
        Self {
            list_type: ListType::Bullet,
            tight: true,
            padding: 2,
            marker_offset: 0,
            start: None,
            delimiter: None,
            bullet_char: Some(bullet_char),
        }
    }

    /// Ordered list data starting at `start`.
    pub fn ordered(start: u32, delimiter: char) -> Self {
        Self {
            list_type: ListType::Ordered,
            tight: true,
            padding: ordered_padding(start, delimiter),
            marker_offset: 0,
            start: Some(start),
            delimiter: Some(delimiter),
            bullet_char: None,
        }
    }
}

/// Marker width for an ordered item: digits, delimiter and one space.
pub fn ordered_padding(number: u32, delimiter: char) -> usize {
    number.to_string().len() + delimiter.len_utf8() + 1
}

/// Type tag of a node, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Document root or stream start marker.
    Document,
    /// Block quote container.
    BlockQuote,
    /// List container.
    List,
    /// List item container.
    Item,
    /// Paragraph.
    Paragraph,
    /// ATX or setext heading.
    Heading,
    /// Horizontal rule.
    ThematicBreak,
    /// Fenced or indented code.
    CodeBlock,
    /// Raw HTML block.
    HtmlBlock,
    /// Plain text run.
    Text,
    /// Soft line break.
    Softbreak,
    /// Hard line break.
    Linebreak,
    /// Inline code span.
    Code,
    /// Raw inline HTML.
    HtmlInline,
    /// Emphasis.
    Emph,
    /// Strong emphasis.
    Strong,
    /// Inline link.
    Link,
    /// Inline image.
    Image,
    /// End of stream marker.
    Eof,
}

impl NodeType {
    /// Lower-case tag used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Document => "document",
            NodeType::BlockQuote => "block_quote",
            NodeType::List => "list",
            NodeType::Item => "item",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::ThematicBreak => "thematic_break",
            NodeType::CodeBlock => "code_block",
            NodeType::HtmlBlock => "html_block",
            NodeType::Text => "text",
            NodeType::Softbreak => "softbreak",
            NodeType::Linebreak => "linebreak",
            NodeType::Code => "code",
            NodeType::HtmlInline => "html_inline",
            NodeType::Emph => "emph",
            NodeType::Strong => "strong",
            NodeType::Link => "link",
            NodeType::Image => "image",
            NodeType::Eof => "eof",
        }
    }
}

/// Node variant with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root or stream start marker.
    Document,
    /// Block quote container.
    BlockQuote,
    /// List container.
    List {
        /// Layout attributes.
        data: ListData,
        /// Whether a blank line follows the list.
        last_line_blank: bool,
    },
    /// List item container.
    Item {
        /// Layout attributes.
        data: ListData,
    },
    /// Paragraph.
    Paragraph,
    /// Heading with its level (1-6).
    Heading {
        /// Heading level.
        level: u8,
    },
    /// Horizontal rule.
    ThematicBreak,
    /// Fenced or indented code.
    CodeBlock {
        /// Info string after the opening fence.
        info: String,
        /// Code content.
        literal: String,
        /// Whether the block was fenced.
        fenced: bool,
    },
    /// Raw HTML block.
    HtmlBlock {
        /// Raw HTML.
        literal: String,
    },
    /// Plain text run.
    Text {
        /// Text content.
        literal: String,
    },
    /// Soft line break.
    Softbreak,
    /// Hard line break.
    Linebreak,
    /// Inline code span.
    Code {
        /// Code content.
        literal: String,
    },
    /// Raw inline HTML.
    HtmlInline {
        /// Raw HTML.
        literal: String,
    },
    /// Emphasis.
    Emph,
    /// Strong emphasis.
    Strong,
    /// Inline link.
    Link {
        /// Link URL.
        destination: String,
        /// Optional title, empty when absent.
        title: String,
    },
    /// Inline image; alt text is carried by child nodes.
    Image {
        /// Image URL.
        destination: String,
        /// Optional title, empty when absent.
        title: String,
    },
    /// End of stream marker.
    Eof,
}

impl NodeKind {
    /// Type tag of this variant.
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::BlockQuote => NodeType::BlockQuote,
            NodeKind::List { .. } => NodeType::List,
            NodeKind::Item { .. } => NodeType::Item,
            NodeKind::Paragraph => NodeType::Paragraph,
            NodeKind::Heading { .. } => NodeType::Heading,
            NodeKind::ThematicBreak => NodeType::ThematicBreak,
            NodeKind::CodeBlock { .. } => NodeType::CodeBlock,
            NodeKind::HtmlBlock { .. } => NodeType::HtmlBlock,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::Softbreak => NodeType::Softbreak,
            NodeKind::Linebreak => NodeType::Linebreak,
            NodeKind::Code { .. } => NodeType::Code,
            NodeKind::HtmlInline { .. } => NodeType::HtmlInline,
            NodeKind::Emph => NodeType::Emph,
            NodeKind::Strong => NodeType::Strong,
            NodeKind::Link { .. } => NodeType::Link,
            NodeKind::Image { .. } => NodeType::Image,
            NodeKind::Eof => NodeType::Eof,
        }
    }

    /// Heading level, if this is a heading.
    pub fn level(&self) -> Option<u8> {
        match self {
            NodeKind::Heading { level } => Some(*level),
            _ => None,
        }
    }

    /// Literal text carried by leaf variants.
    pub fn literal(&self) -> Option<&str> {
        match self {
            NodeKind::CodeBlock { literal, .. }
            | NodeKind::HtmlBlock { literal }
            | NodeKind::Text { literal }
            | NodeKind::Code { literal }
            | NodeKind::HtmlInline { literal } => Some(literal),
            _ => None,
        }
    }

    /// Link or image destination.
    pub fn destination(&self) -> Option<&str> {
        match self {
            NodeKind::Link { destination, .. } | NodeKind::Image { destination, .. } => {
                Some(destination)
            }
            _ => None,
        }
    }

    /// List data of list and item nodes.
    pub fn list_data(&self) -> Option<&ListData> {
        match self {
            NodeKind::List { data, .. } | NodeKind::Item { data } => Some(data),
            _ => None,
        }
    }

    /// Shorthand for a text node.
    pub fn text(literal: impl Into<String>) -> Self {
        NodeKind::Text {
            literal: literal.into(),
        }
    }

    /// Shorthand for a link node without title.
    pub fn link(destination: impl Into<String>) -> Self {
        NodeKind::Link {
            destination: destination.into(),
            title: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Node storage. Every node created here stays addressable for the arena's
/// lifetime, detached nodes included.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes ever created in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Removes `id` from its parent's children.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Node variant.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Mutable node variant.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    /// Type tag.
    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.kind(id).node_type()
    }

    /// Whether `id` is of type `ty`.
    pub fn is(&self, id: NodeId, ty: NodeType) -> bool {
        self.node_type(id) == ty
    }

    /// Heading level, if `id` is a heading.
    pub fn level(&self, id: NodeId) -> Option<u8> {
        self.kind(id).level()
    }

    /// Literal text of leaf nodes.
    pub fn literal(&self, id: NodeId) -> Option<&str> {
        self.kind(id).literal()
    }

    /// Owning parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First child.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Following sibling under the same parent.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Collects `id` and its descendants of type `ty` in document order.
    pub fn collect(&self, id: NodeId, ty: NodeType) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.is(current, ty) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev());
        }
        found
    }

    /// Deep-copies the subtree rooted at `id` in `source` into this arena.
    /// The copy is detached.
    pub fn clone_from(&mut self, source: &Arena, id: NodeId) -> NodeId {
        let copy = self.create(source.kind(id).clone());
        for &child in source.children(id) {
            let child_copy = self.clone_from(source, child);
            self.append_child(copy, child_copy);
        }
        copy
    }
}

/// Ordered sequence of top-level nodes sharing one arena.
///
/// Parsed documents are streamed as a `Document` marker, each top-level block
/// as a detached subtree, then an `Eof` marker. Index output uses the same
/// type without markers.
#[derive(Debug, Clone, Default)]
pub struct NodeStream {
    arena: Arena,
    nodes: Vec<NodeId>,
}

impl NodeStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a stream from an arena and its top-level nodes.
    pub fn from_parts(arena: Arena, nodes: Vec<NodeId>) -> Self {
        Self { arena, nodes }
    }

    /// Backing arena.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable backing arena.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Top-level nodes in stream order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the stream has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a node and appends it at top level.
    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = self.arena.create(kind);
        self.nodes.push(id);
        id
    }

    /// Appends an existing detached node at top level.
    pub fn push_id(&mut self, id: NodeId) {
        self.nodes.push(id);
    }

    /// Appends a heading holding a single text node.
    pub fn push_heading(&mut self, level: u8, text: &str) -> NodeId {
        let heading = self.push(NodeKind::Heading { level });
        let child = self.arena.create(NodeKind::text(text));
        self.arena.append_child(heading, child);
        heading
    }

    /// Top-level nodes with their types.
    pub fn types(&self) -> Vec<NodeType> {
        self.nodes.iter().map(|id| self.arena.node_type(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Arena, NodeId) {
        let mut arena = Arena::new();
        let para = arena.create(NodeKind::Paragraph);
        let a = arena.create(NodeKind::text("a"));
        let em = arena.create(NodeKind::Emph);
        let b = arena.create(NodeKind::text("b"));
        let c = arena.create(NodeKind::text("c"));
        arena.append_child(para, a);
        arena.append_child(para, em);
        arena.append_child(em, b);
        arena.append_child(para, c);
        (arena, para)
    }

    #[test]
    fn tree_links() {
        let (arena, para) = sample();
        let a = arena.first_child(para).unwrap();
        let em = arena.next_sibling(a).unwrap();
        assert!(arena.is(em, NodeType::Emph));
        assert_eq!(arena.parent(em), Some(para));
        assert_eq!(arena.next_sibling(arena.last_child(para).unwrap()), None);
        assert_eq!(arena.parent(para), None);
    }

    #[test]
    fn collect_is_document_order() {
        let (arena, para) = sample();
        let texts: Vec<&str> = arena
            .collect(para, NodeType::Text)
            .into_iter()
            .filter_map(|id| arena.literal(id))
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn append_child_moves_node() {
        let mut arena = Arena::new();
        let first = arena.create(NodeKind::Paragraph);
        let second = arena.create(NodeKind::Paragraph);
        let text = arena.create(NodeKind::text("moved"));
        arena.append_child(first, text);
        arena.append_child(second, text);
        assert!(arena.children(first).is_empty());
        assert_eq!(arena.children(second), &[text]);
        assert_eq!(arena.parent(text), Some(second));
    }

    #[test]
    fn clone_from_is_detached_deep_copy() {
        let (source, para) = sample();
        let mut target = Arena::new();
        let copy = target.clone_from(&source, para);
        assert_eq!(target.parent(copy), None);
        assert_eq!(target.len(), source.len());
        assert_eq!(target.collect(copy, NodeType::Text).len(), 3);
        // Mutating the copy leaves the source untouched.
        let first = target.first_child(copy).unwrap();
        *target.kind_mut(first) = NodeKind::text("changed");
        assert_eq!(source.literal(source.first_child(para).unwrap()), Some("a"));
    }

    #[test]
    fn ordered_padding_accounts_for_digits() {
        assert_eq!(ordered_padding(1, ')'), 3);
        assert_eq!(ordered_padding(10, '.'), 4);
        assert_eq!(ListData::ordered(100, ')').padding, 5);
    }

    #[test]
    fn stream_push_heading() {
        let mut stream = NodeStream::new();
        let h = stream.push_heading(2, "Title");
        assert_eq!(stream.types(), vec![NodeType::Heading]);
        assert_eq!(stream.arena().level(h), Some(2));
        let text = stream.arena().first_child(h).unwrap();
        assert_eq!(stream.arena().literal(text), Some("Title"));
    }
}
