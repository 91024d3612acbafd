//! Markdown parsing into node streams.
//!
//! markdown-rs produces an mdast tree; [`parse_stream`] converts it into the
//! arena node model and streams it as a `Document` marker, one detached
//! subtree per top-level block, then an `Eof` marker. Constructs without a
//! node counterpart (tables, definitions, frontmatter, footnotes, math) are
//! carried through as raw HTML holding their original source text.

use crate::node::{Arena, ListData, NodeId, NodeKind, NodeStream};
use crate::{SourceLocation, TocError};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Allow raw HTML nodes in the AST. Index markers are HTML comments, so
    /// this is on by default.
    pub raw_html: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
}

impl ParseOptions {
    /// CommonMark only.
    pub const fn commonmark() -> Self {
        Self {
            gfm: false,
            frontmatter: false,
            code_indented: true,
            raw_html: true,
            math: false,
        }
    }

    /// Markdown-friendly defaults: GFM and frontmatter enabled.
    pub const fn markdown() -> Self {
        Self {
            gfm: true,
            frontmatter: true,
            code_indented: true,
            raw_html: true,
            math: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Parse markdown into an MDAST tree using core options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, TocError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| TocError::MarkdownAdapter {
        message: err.to_string(),
        location: message_location(&err),
    })
}

/// Parse markdown into a node stream.
pub fn parse_stream(input: &str, options: &ParseOptions) -> Result<NodeStream, TocError> {
    let root = parse_mdast(input, options)?;
    Ok(mdast_to_stream(&root, input))
}

/// Converts an mdast root into a node stream. `source` must be the text the
/// tree was parsed from.
pub fn mdast_to_stream(root: &Node, source: &str) -> NodeStream {
    let mut converter = Converter {
        source,
        arena: Arena::new(),
    };

    let mut nodes = vec![converter.arena.create(NodeKind::Document)];
    if let Some(children) = root.children() {
        for child in children {
            nodes.extend(converter.block(child, None));
        }
    }
    nodes.push(converter.arena.create(NodeKind::Eof));

    NodeStream::from_parts(converter.arena, nodes)
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

struct Converter<'s> {
    source: &'s str,
    arena: Arena,
}

impl Converter<'_> {
    fn raw(&self, node: &Node) -> Option<&str> {
        let position = node.position()?;
        self.source.get(position.start.offset..position.end.offset)
    }

    fn container(&mut self, kind: NodeKind, children: &[Node], inline: bool) -> NodeId {
        let id = self.arena.create(kind);
        for child in children {
            let converted = if inline {
                self.inline(child)
            } else {
                self.block(child, None)
            };
            for node in converted {
                self.arena.append_child(id, node);
            }
        }
        id
    }

    /// Converts a block node. `item_data` is set for the children of a list.
    fn block(&mut self, node: &Node, item_data: Option<ListData>) -> Vec<NodeId> {
        let id = match node {
            Node::Paragraph(p) => self.container(NodeKind::Paragraph, &p.children, true),
            Node::Heading(h) => {
                self.container(NodeKind::Heading { level: h.depth }, &h.children, true)
            }
            Node::Blockquote(q) => self.container(NodeKind::BlockQuote, &q.children, false),
            Node::ThematicBreak(_) => self.arena.create(NodeKind::ThematicBreak),
            Node::Code(code) => {
                let fenced = self
                    .raw(node)
                    .map(|raw| {
                        let raw = raw.trim_start();
                        raw.starts_with("```") || raw.starts_with("~~~")
                    })
                    .unwrap_or(true);
                let info = match (&code.lang, &code.meta) {
                    (Some(lang), Some(meta)) => format!("{} {}", lang, meta),
                    (Some(lang), None) => lang.clone(),
                    _ => String::new(),
                };
                self.arena.create(NodeKind::CodeBlock {
                    info,
                    literal: code.value.clone(),
                    fenced,
                })
            }
            Node::Html(html) => self.arena.create(NodeKind::HtmlBlock {
                literal: html.value.clone(),
            }),
            Node::List(list) => {
                let data = self.list_data(node, list.ordered, list.start, list.spread);
                let id = self.arena.create(NodeKind::List {
                    data: data.clone(),
                    last_line_blank: false,
                });
                for (index, child) in list.children.iter().enumerate() {
                    let mut item_data = data.clone();
                    if let Some(start) = item_data.start.as_mut() {
                        *start += index as u32;
                    }
                    for item in self.block(child, Some(item_data)) {
                        self.arena.append_child(id, item);
                    }
                }
                id
            }
            Node::ListItem(item) => {
                let data = item_data.unwrap_or_else(|| ListData::bullet('-'));
                self.container(NodeKind::Item { data }, &item.children, false)
            }
            other => match self.raw(other).map(str::to_string) {
                Some(literal) => self.arena.create(NodeKind::HtmlBlock {
                    literal: literal.trim_end().to_string(),
                }),
                None => {
                    log::warn!("Dropping block node without position: {:?}", other);
                    return Vec::new();
                }
            },
        };
        vec![id]
    }

    fn inline(&mut self, node: &Node) -> Vec<NodeId> {
        let id = match node {
            Node::Text(text) => return self.text(&text.value),
            Node::Emphasis(e) => self.container(NodeKind::Emph, &e.children, true),
            Node::Strong(s) => self.container(NodeKind::Strong, &s.children, true),
            Node::InlineCode(code) => self.arena.create(NodeKind::Code {
                literal: code.value.clone(),
            }),
            Node::Break(_) => self.arena.create(NodeKind::Linebreak),
            Node::Html(html) => self.arena.create(NodeKind::HtmlInline {
                literal: html.value.clone(),
            }),
            Node::Link(link) => self.container(
                NodeKind::Link {
                    destination: link.url.clone(),
                    title: link.title.clone().unwrap_or_default(),
                },
                &link.children,
                true,
            ),
            Node::Image(image) => {
                let id = self.arena.create(NodeKind::Image {
                    destination: image.url.clone(),
                    title: image.title.clone().unwrap_or_default(),
                });
                if !image.alt.is_empty() {
                    let alt = self.arena.create(NodeKind::text(image.alt.as_str()));
                    self.arena.append_child(id, alt);
                }
                id
            }
            other => match self.raw(other).map(str::to_string) {
                Some(literal) => self.arena.create(NodeKind::HtmlInline { literal }),
                None => {
                    log::warn!("Dropping inline node without position: {:?}", other);
                    return Vec::new();
                }
            },
        };
        vec![id]
    }

    /// Splits text on line endings into text and soft break nodes.
    fn text(&mut self, value: &str) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        for (index, line) in value.split('\n').enumerate() {
            if index > 0 {
                nodes.push(self.arena.create(NodeKind::Softbreak));
            }
            if !line.is_empty() {
                nodes.push(self.arena.create(NodeKind::text(line)));
            }
        }
        nodes
    }

    /// Recovers the marker character from the source, which mdast does not
    /// keep.
    fn list_data(&self, node: &Node, ordered: bool, start: Option<u32>, spread: bool) -> ListData {
        let raw = self.raw(node).unwrap_or_default().trim_start();
        let mut data = if ordered {
            let delimiter = raw
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .chars()
                .next()
                .filter(|c| *c == '.' || *c == ')')
                .unwrap_or('.');
            ListData::ordered(start.unwrap_or(1), delimiter)
        } else {
            let bullet = raw
                .chars()
                .next()
                .filter(|c| matches!(c, '-' | '+' | '*'))
                .unwrap_or('-');
            ListData::bullet(bullet)
        };
        data.tight = !spread;
        data
    }
}
