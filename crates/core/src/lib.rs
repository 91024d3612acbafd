#![deny(missing_docs)]
//! mdtoc core: document node model, heading indexer and anchor slugs.

/// Link destinations for index entries.
pub mod destination;
/// Core error types.
pub mod error;
/// Heading events captured from node streams.
pub mod heading;
/// Heading-to-nested-list indexer.
pub mod indexer;
/// Splicing the index into an output stream.
pub mod inject;
/// List attribute bundles and ordered numbering.
pub mod list_data;
/// Arena-backed node model.
pub mod node;
/// Index options and validated configuration.
pub mod options;
/// Markdown parsing into node streams.
pub mod parse;
/// Slug generation utilities.
pub mod slug;

pub use destination::{AnchorDestination, Destination};
pub use error::{SourceLocation, TocError};
pub use heading::{HeadingEvent, heading_events};
pub use indexer::{Indexer, IndexerState, build, build_with};
pub use inject::{MARKER, index_stream, index_stream_with, is_marker, splice, standalone};
pub use list_data::{Counters, list_data};
pub use node::{Arena, ListData, ListType, NodeId, NodeKind, NodeStream, NodeType};
pub use options::{TocConfig, TocOptions};
pub use parse::{ParseOptions, mdast_to_stream, parse_mdast, parse_stream};
pub use slug::{Slugger, slugify};
