//! JSON view of node streams.

use mdtoc_core::{Arena, ListData, NodeId, NodeKind, NodeStream, TocError};
use serde::Serialize;

/// Serializable snapshot of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonNode<'a> {
    /// Node type name, e.g. `"list"` or `"html_block"`.
    #[serde(rename = "type")]
    pub node_type: &'static str,
    /// Heading level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Literal content of leaf nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<&'a str>,
    /// Link or image destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<&'a str>,
    /// Link or image title, when not empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    /// Code block info string, when not empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<&'a str>,
    /// List attributes of lists and items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_data: Option<&'a ListData>,
    /// Set on lists only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_line_blank: Option<bool>,
    /// Child nodes in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode<'a>>,
}

impl<'a> JsonNode<'a> {
    /// Builds the view of `id` and its descendants.
    pub fn from_arena(arena: &'a Arena, id: NodeId) -> Self {
        let kind = arena.kind(id);
        let non_empty = |s: &'a str| (!s.is_empty()).then_some(s);

        let (title, info) = match kind {
            NodeKind::Link { title, .. } | NodeKind::Image { title, .. } => {
                (non_empty(title.as_str()), None)
            }
            NodeKind::CodeBlock { info, .. } => (None, non_empty(info.as_str())),
            _ => (None, None),
        };
        let last_line_blank = match kind {
            NodeKind::List {
                last_line_blank, ..
            } => Some(*last_line_blank),
            _ => None,
        };

        Self {
            node_type: kind.node_type().as_str(),
            level: kind.level(),
            literal: kind.literal(),
            destination: kind.destination(),
            title,
            info,
            list_data: kind.list_data(),
            last_line_blank,
            children: arena
                .children(id)
                .iter()
                .map(|child| JsonNode::from_arena(arena, *child))
                .collect(),
        }
    }
}

/// The top-level nodes of `stream` as JSON views.
pub fn json_nodes(stream: &NodeStream) -> Vec<JsonNode<'_>> {
    stream
        .nodes()
        .iter()
        .map(|id| JsonNode::from_arena(stream.arena(), *id))
        .collect()
}

/// Serializes `stream` as a pretty-printed JSON array.
pub fn to_json(stream: &NodeStream) -> Result<String, TocError> {
    Ok(serde_json::to_string_pretty(&json_nodes(stream))?)
}

/// Serializes `stream` into a [`serde_json::Value`].
pub fn to_json_value(stream: &NodeStream) -> Result<serde_json::Value, TocError> {
    Ok(serde_json::to_value(json_nodes(stream))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtoc_core::{TocConfig, build, heading_events};
    use serde_json::json;

    fn toc(entries: &[(u8, &str)], config: &TocConfig) -> NodeStream {
        let mut input = NodeStream::new();
        for (level, text) in entries {
            input.push_heading(*level, text);
        }
        build(heading_events(&input), config).unwrap()
    }

    #[test]
    fn bullet_index_shape() {
        let value = to_json_value(&toc(&[(1, "Intro")], &TocConfig::default())).unwrap();
        assert_eq!(
            value,
            json!([{
                "type": "list",
                "listData": {
                    "type": "bullet",
                    "tight": true,
                    "padding": 0,
                    "markerOffset": 0,
                    "bulletChar": "-"
                },
                "lastLineBlank": true,
                "children": [{
                    "type": "item",
                    "listData": {
                        "type": "bullet",
                        "tight": true,
                        "padding": 0,
                        "markerOffset": 0,
                        "bulletChar": "-"
                    },
                    "children": [{
                        "type": "link",
                        "destination": "#intro",
                        "children": [{ "type": "text", "literal": "Intro" }]
                    }]
                }]
            }])
        );
    }

    #[test]
    fn ordered_items_carry_their_number() {
        let value =
            to_json_value(&toc(&[(1, "A"), (1, "B")], &TocConfig::ordered())).unwrap();
        let items = value[0]["children"].as_array().unwrap();
        assert_eq!(items[0]["listData"]["start"], json!(1));
        assert_eq!(items[1]["listData"]["start"], json!(2));
        assert_eq!(items[1]["listData"]["delimiter"], json!(")"));
    }

    #[test]
    fn pretty_output_is_valid_json() {
        let text = to_json(&toc(&[(2, "A")], &TocConfig::default())).unwrap();
        assert!(text.starts_with("[\n"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["type"], json!("list"));
    }
}
