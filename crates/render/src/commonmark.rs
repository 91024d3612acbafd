//! CommonMark writer for node streams.
//!
//! Blocks are rendered to lines; containers (block quotes, list items) prefix
//! or indent the lines of their children. Top-level blocks are separated by a
//! blank line. `Document` and `Eof` markers produce no output.

use mdtoc_core::{Arena, ListType, NodeId, NodeKind, NodeStream, NodeType};

/// Renders a stream as CommonMark text.
pub fn to_markdown(stream: &NodeStream) -> String {
    let arena = stream.arena();
    let mut top_level = Vec::new();
    for &id in stream.nodes() {
        match arena.kind(id) {
            NodeKind::Document => top_level.extend(arena.children(id).iter().copied()),
            NodeKind::Eof => {}
            _ => top_level.push(id),
        }
    }

    let mut out = String::new();
    let mut previous: Option<NodeId> = None;
    for id in top_level {
        let lines = block_lines(arena, id);
        if lines.is_empty() {
            continue;
        }
        if let Some(prev) = previous {
            out.push('\n');
            if lists_would_merge(arena, prev, id) {
                log::debug!("Separating adjacent lists with an empty comment");
                out.push_str("<!-- -->\n\n");
            }
        }
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        previous = Some(id);
    }
    out
}

/// Two consecutive lists with the same marker would be read back as one.
fn lists_would_merge(arena: &Arena, first: NodeId, second: NodeId) -> bool {
    match (
        arena.kind(first).list_data(),
        arena.kind(second).list_data(),
    ) {
        (Some(a), Some(b)) if arena.is(first, NodeType::List) && arena.is(second, NodeType::List) => {
            a.list_type == b.list_type
                && match a.list_type {
                    ListType::Bullet => a.bullet_char == b.bullet_char,
                    ListType::Ordered => a.delimiter == b.delimiter,
                }
        }
        _ => false,
    }
}

fn block_lines(arena: &Arena, id: NodeId) -> Vec<String> {
    match arena.kind(id) {
        NodeKind::Document => join_blocks(arena, arena.children(id), false),
        NodeKind::Paragraph => split_lines(&inlines(arena, id)),
        NodeKind::Heading { level } => {
            let text = inlines(arena, id).replace('\n', " ");
            let hashes = "#".repeat(usize::from(*level));
            if text.is_empty() {
                vec![hashes]
            } else {
                vec![format!("{} {}", hashes, text)]
            }
        }
        NodeKind::ThematicBreak => vec!["***".to_string()],
        NodeKind::CodeBlock {
            info,
            literal,
            fenced,
        } => code_block_lines(info, literal, *fenced),
        NodeKind::HtmlBlock { literal } => split_lines(literal.trim_end_matches('\n')),
        NodeKind::BlockQuote => join_blocks(arena, arena.children(id), false)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect(),
        NodeKind::List { .. } => list_lines(arena, id),
        NodeKind::Item { data } => join_blocks(arena, arena.children(id), data.tight),
        NodeKind::Eof => Vec::new(),
        _ => {
            let mut text = String::new();
            inline_node(arena, id, &mut text);
            split_lines(&text)
        }
    }
}

fn join_blocks(arena: &Arena, blocks: &[NodeId], tight: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, &block) in blocks.iter().enumerate() {
        if index > 0 && !tight {
            lines.push(String::new());
        }
        lines.extend(block_lines(arena, block));
    }
    lines
}

fn list_lines(arena: &Arena, list: NodeId) -> Vec<String> {
    let Some(data) = arena.kind(list).list_data() else {
        return Vec::new();
    };
    let mut lines = Vec::new();

    for (index, &item) in arena.children(list).iter().enumerate() {
        if index > 0 && !data.tight {
            lines.push(String::new());
        }
        let marker = match data.list_type {
            ListType::Bullet => data.bullet_char.unwrap_or('-').to_string(),
            ListType::Ordered => format!(
                "{}{}",
                data.start.unwrap_or(1) + index as u32,
                data.delimiter.unwrap_or('.')
            ),
        };
        let indent = " ".repeat(marker.len() + 1);
        let content = join_blocks(arena, arena.children(item), data.tight);

        if content.is_empty() {
            lines.push(marker);
            continue;
        }
        for (line_index, line) in content.into_iter().enumerate() {
            if line_index == 0 {
                lines.push(format!("{} {}", marker, line));
            } else if line.is_empty() {
                lines.push(line);
            } else {
                lines.push(format!("{}{}", indent, line));
            }
        }
    }
    lines
}

fn code_block_lines(info: &str, literal: &str, fenced: bool) -> Vec<String> {
    if !fenced {
        return literal.lines().map(|line| format!("    {}", line)).collect();
    }
    let longest = longest_run(literal, '`');
    let fence = "`".repeat(longest.max(2) + 1);
    let mut lines = vec![format!("{}{}", fence, info)];
    lines.extend(literal.lines().map(str::to_string));
    lines.push(fence);
    lines
}

fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

fn inlines(arena: &Arena, id: NodeId) -> String {
    let mut out = String::new();
    for &child in arena.children(id) {
        inline_node(arena, child, &mut out);
    }
    out
}

fn inline_node(arena: &Arena, id: NodeId, out: &mut String) {
    match arena.kind(id) {
        NodeKind::Text { literal } => escape_text(literal, out),
        NodeKind::Softbreak => out.push('\n'),
        NodeKind::Linebreak => out.push_str("\\\n"),
        NodeKind::Code { literal } => code_span(literal, out),
        NodeKind::HtmlInline { literal } => out.push_str(literal),
        NodeKind::Emph => {
            out.push('*');
            out.push_str(&inlines(arena, id));
            out.push('*');
        }
        NodeKind::Strong => {
            out.push_str("**");
            out.push_str(&inlines(arena, id));
            out.push_str("**");
        }
        NodeKind::Link { destination, title } => {
            out.push('[');
            out.push_str(&inlines(arena, id));
            out.push_str("](");
            link_target(destination, title, out);
            out.push(')');
        }
        NodeKind::Image { destination, title } => {
            out.push_str("![");
            out.push_str(&inlines(arena, id));
            out.push_str("](");
            link_target(destination, title, out);
            out.push(')');
        }
        other => {
            log::warn!("Unhandled inline node type: {:?}", other.node_type());
            out.push_str(&inlines(arena, id));
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        if matches!(ch, '\\' | '*' | '_' | '`' | '[' | ']' | '<') {
            out.push('\\');
        }
        out.push(ch);
    }
}

fn code_span(literal: &str, out: &mut String) {
    let ticks = "`".repeat(longest_run(literal, '`') + 1);
    let pad = literal.starts_with('`') || literal.ends_with('`');
    out.push_str(&ticks);
    if pad {
        out.push(' ');
    }
    out.push_str(literal);
    if pad {
        out.push(' ');
    }
    out.push_str(&ticks);
}

fn link_target(destination: &str, title: &str, out: &mut String) {
    if destination.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        out.push('<');
        out.push_str(destination);
        out.push('>');
    } else {
        out.push_str(destination);
    }
    if !title.is_empty() {
        out.push_str(" \"");
        out.push_str(&title.replace('"', "\\\""));
        out.push('"');
    }
}

fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
