//! Heading indexer.
//!
//! Builds nested lists from headings fed in document order:
//!
//! - a heading at the floor level goes into the current root list;
//! - a deeper heading opens one nested list under the previous item, however
//!   many levels it skips;
//! - a shallower heading walks back up the item/list chain and continues the
//!   list found at that depth.
//!
//! Headings outside `[depth_floor, depth_ceiling]` are ignored entirely.

use crate::TocError;
use crate::destination::{AnchorDestination, Destination};
use crate::heading::HeadingEvent;
use crate::list_data::{Counters, list_data};
use crate::node::{Arena, ListData, ListType, NodeId, NodeKind, NodeStream, ordered_padding};
use crate::options::TocConfig;

/// Mutable bookkeeping of an [`Indexer`].
#[derive(Debug, Clone, Default)]
pub struct IndexerState {
    current_level: u8,
    current_item: Option<NodeId>,
    root_lists: Vec<NodeId>,
    /// Heading level of each open nesting depth, root first. Levels are
    /// strictly increasing.
    depths: Vec<u8>,
    counters: Option<Counters>,
}

impl IndexerState {
    /// Level of the last indexed heading, 0 before the first one.
    pub fn current_level(&self) -> u8 {
        self.current_level
    }

    /// Most recently created item.
    pub fn current_item(&self) -> Option<NodeId> {
        self.current_item
    }

    /// Root lists in creation order.
    pub fn root_lists(&self) -> &[NodeId] {
        &self.root_lists
    }

    /// Ordered-mode numbering; `None` for bullet output.
    pub fn counters(&self) -> Option<&Counters> {
        self.counters.as_ref()
    }

    /// Number of open nesting depths.
    pub fn depth(&self) -> usize {
        self.depths.len()
    }
}

/// Accumulates headings into a table of contents.
#[derive(Debug)]
pub struct Indexer<D = AnchorDestination> {
    config: TocConfig,
    destination: D,
    arena: Arena,
    title: Option<NodeId>,
    state: IndexerState,
}

impl Indexer<AnchorDestination> {
    /// Creates an indexer using anchor destinations built from the configured
    /// prefix and base.
    pub fn new(config: TocConfig) -> Result<Self, TocError> {
        let destination = AnchorDestination::new(config.prefix.clone(), config.base.clone());
        Self::with_destination(config, destination)
    }
}

impl<D: Destination> Indexer<D> {
    /// Creates an indexer with a custom destination function.
    pub fn with_destination(config: TocConfig, destination: D) -> Result<Self, TocError> {
        config.validate()?;

        let mut arena = Arena::new();
        let title = config.title.as_ref().map(|text| {
            let heading = arena.create(NodeKind::Heading {
                level: config.title_level,
            });
            let literal = arena.create(NodeKind::text(text.as_str()));
            arena.append_child(heading, literal);
            heading
        });

        let mut state = IndexerState {
            counters: (config.list_type == ListType::Ordered).then(Counters::new),
            ..IndexerState::default()
        };

        // Created after the counters so ordered list data is consistent.
        let data = list_data(
            &config,
            state.counters.as_ref(),
            config.depth_floor,
            Some(0),
            None,
        );
        let root = arena.create(NodeKind::List {
            data,
            last_line_blank: false,
        });
        state.root_lists.push(root);

        Ok(Self {
            config,
            destination,
            arena,
            title,
            state,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    /// Current bookkeeping.
    pub fn state(&self) -> &IndexerState {
        &self.state
    }

    /// Arena holding the lists built so far.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Indexes one heading.
    pub fn ingest(&mut self, event: &HeadingEvent<'_>) {
        let level = event.level();
        if !self.config.accepts(level) {
            log::debug!(
                "Skipping level {} heading outside {}..={}",
                level,
                self.config.depth_floor,
                self.config.depth_ceiling
            );
            return;
        }

        let floor = self.config.depth_floor;
        let entering = level > self.state.current_level;
        if let Some(counters) = self.state.counters.as_mut() {
            counters.advance(level, entering);
        }

        let padding = if level == floor { 0 } else { 2 };
        let data = self.list_data(level, Some(padding));
        let item = self.arena.create(NodeKind::Item { data });
        let label = self.label(event);
        self.arena.append_child(item, label);

        let list = self.place(level);
        self.arena.append_child(list, item);
        self.sync_number(list, item, level);
        self.state.current_item = Some(item);
        self.state.current_level = level;
    }

    /// Finishes the index: the title heading, if any, followed by the root
    /// lists. Only the last list is marked as followed by a blank line.
    pub fn finalize(mut self) -> NodeStream {
        if let Some(&last) = self.state.root_lists.last()
            && let NodeKind::List {
                last_line_blank, ..
            } = self.arena.kind_mut(last)
        {
            *last_line_blank = true;
        }

        let mut nodes = Vec::with_capacity(self.state.root_lists.len() + 1);
        nodes.extend(self.title);
        nodes.extend(self.state.root_lists.iter().copied());
        NodeStream::from_parts(self.arena, nodes)
    }

    fn list_data(&self, level: u8, padding: Option<usize>) -> ListData {
        list_data(
            &self.config,
            self.state.counters.as_ref(),
            level,
            padding,
            None,
        )
    }

    fn new_list(&mut self, level: u8) -> NodeId {
        let data = self.list_data(level, None);
        self.arena.create(NodeKind::List {
            data,
            last_line_blank: false,
        })
    }

    /// Builds the item label: a copy of an author supplied link, or the
    /// heading text wrapped in a link or paragraph.
    fn label(&mut self, event: &HeadingEvent<'_>) -> NodeId {
        let source = event.arena();
        if let Some(link) = event.preformatted_link() {
            return self.arena.clone_from(source, link);
        }

        let texts = event.text_nodes();
        let container = if self.config.link {
            let destination = self.destination.destination(&event.literal());
            self.arena.create(NodeKind::link(destination))
        } else {
            self.arena.create(NodeKind::Paragraph)
        };

        for text in texts {
            let copy = self.arena.clone_from(source, text);
            self.arena.append_child(container, copy);
        }
        container
    }

    /// Picks the list the next item at `level` goes into, opening a nested
    /// list when the heading is deeper than the previous one.
    fn place(&mut self, level: u8) -> NodeId {
        let floor = self.config.depth_floor;

        if level == floor {
            if self.config.split_root_lists && self.state.current_level > floor {
                let list = self.new_list(level);
                self.state.root_lists.push(list);
            }
            self.state.depths.clear();
            self.state.depths.push(level);
            return self.current_root();
        }

        let Some(current) = self.state.current_item else {
            // Nothing indexed yet: the root list hosts the first heading
            // whatever its level.
            self.state.depths.clear();
            self.state.depths.push(level);
            return self.current_root();
        };

        let current_level = self.state.current_level;
        if level > current_level {
            let list = self.new_list(level);
            self.arena.append_child(current, list);
            self.state.depths.push(level);
            list
        } else if level == current_level {
            self.parent_list(current)
        } else {
            self.ascend(current, level)
        }
    }

    /// Ordered items are numbered by their position in `list`. The level
    /// counter follows, which only changes anything when a heading has joined
    /// a list opened at a different level.
    fn sync_number(&mut self, list: NodeId, item: NodeId, level: u8) {
        let Some(counters) = self.state.counters.as_mut() else {
            return;
        };
        let start = self
            .arena
            .kind(list)
            .list_data()
            .and_then(|data| data.start)
            .unwrap_or(1);
        let number = start + self.arena.children(list).len().saturating_sub(1) as u32;
        if counters.get(level) == Some(number) {
            return;
        }

        counters.set(level, number);
        if let NodeKind::Item { data } = self.arena.kind_mut(item) {
            data.start = Some(number);
            data.padding = ordered_padding(number, self.config.delimiter);
        }
    }

    /// Walks up from `current` to the list that continues at `level`.
    fn ascend(&mut self, current: NodeId, level: u8) -> NodeId {
        let mut list = self.parent_list(current);
        let depths = &mut self.state.depths;

        while depths.len() > 1 && depths[depths.len() - 2] >= level {
            depths.pop();
            let owner = self
                .arena
                .parent(list)
                .and_then(|item| self.arena.parent(item));
            match owner {
                Some(parent) => list = parent,
                None => break,
            }
        }

        // A heading between two open depths joins the deeper one.
        if let Some(top) = depths.last_mut()
            && *top > level
        {
            *top = level;
        }
        list
    }

    fn parent_list(&self, item: NodeId) -> NodeId {
        self.arena
            .parent(item)
            .unwrap_or_else(|| self.current_root())
    }

    fn current_root(&self) -> NodeId {
        // The constructor always creates the first root list.
        self.state.root_lists[self.state.root_lists.len() - 1]
    }
}

/// Builds a table of contents from `events` using anchor destinations.
pub fn build<'a, I>(events: I, config: &TocConfig) -> Result<NodeStream, TocError>
where
    I: IntoIterator<Item = HeadingEvent<'a>>,
{
    let mut indexer = Indexer::new(config.clone())?;
    for event in events {
        indexer.ingest(&event);
    }
    Ok(indexer.finalize())
}

/// Builds a table of contents from `events` with a custom destination.
pub fn build_with<'a, I, D>(
    events: I,
    config: &TocConfig,
    destination: D,
) -> Result<NodeStream, TocError>
where
    I: IntoIterator<Item = HeadingEvent<'a>>,
    D: Destination,
{
    let mut indexer = Indexer::with_destination(config.clone(), destination)?;
    for event in events {
        indexer.ingest(&event);
    }
    Ok(indexer.finalize())
}
