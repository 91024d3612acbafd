//! List attribute bundles and ordered-list numbering.

use crate::node::{ListData, ListType, ordered_padding};
use crate::options::TocConfig;
use std::collections::BTreeMap;

/// Per-level numbering for ordered output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    levels: BTreeMap<u8, u32>,
}

impl Counters {
    /// Creates empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number at `level`, if the level has been visited.
    pub fn get(&self, level: u8) -> Option<u32> {
        self.levels.get(&level).copied()
    }

    /// Overrides the number at `level`.
    pub fn set(&mut self, level: u8, number: u32) {
        self.levels.insert(level, number);
    }

    /// Advances the counter at `level` and returns the new number. A level
    /// entered from above restarts at 1.
    pub fn advance(&mut self, level: u8, entering: bool) -> u32 {
        let counter = self.levels.entry(level).or_insert(0);
        *counter += 1;
        if entering {
            *counter = 1;
        }
        *counter
    }
}

/// Builds the list data for a new list or item at `level`.
///
/// Padding defaults to 2 and the marker offset to 0. Ordered bundles take
/// their start number from `counters` and, once the level has a number,
/// recompute the padding from it so that markers line up.
pub fn list_data(
    config: &TocConfig,
    counters: Option<&Counters>,
    level: u8,
    padding: Option<usize>,
    marker_offset: Option<usize>,
) -> ListData {
    let mut data = ListData {
        list_type: config.list_type,
        tight: true,
        padding: padding.unwrap_or(2),
        marker_offset: marker_offset.unwrap_or(0),
        start: None,
        delimiter: None,
        bullet_char: None,
    };

    match config.list_type {
        ListType::Ordered => {
            let number = counters.and_then(|c| c.get(level));
            data.start = Some(number.unwrap_or(1));
            data.delimiter = Some(config.delimiter);
            if let Some(number) = number {
                data.padding = ordered_padding(number, config.delimiter);
            }
        }
        ListType::Bullet => {
            data.bullet_char = Some(config.bullet_char);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_restart_on_entry() {
        let mut counters = Counters::new();
        assert_eq!(counters.advance(1, true), 1);
        assert_eq!(counters.advance(2, true), 1);
        assert_eq!(counters.advance(2, false), 2);
        assert_eq!(counters.advance(1, false), 2);
        assert_eq!(counters.advance(2, true), 1);
        assert_eq!(counters.get(3), None);
    }

    #[test]
    fn bullet_data_uses_configured_char() {
        let config = TocConfig {
            bullet_char: '+',
            ..Default::default()
        };
        let data = list_data(&config, None, 1, Some(0), None);
        assert_eq!(data.list_type, ListType::Bullet);
        assert_eq!(data.bullet_char, Some('+'));
        assert_eq!(data.padding, 0);
        assert_eq!(data.start, None);
        assert!(data.tight);
    }

    #[test]
    fn ordered_padding_follows_counter() {
        let config = TocConfig::ordered();
        let mut counters = Counters::new();
        for _ in 0..10 {
            counters.advance(1, false);
        }
        let data = list_data(&config, Some(&counters), 1, Some(0), None);
        assert_eq!(data.start, Some(10));
        assert_eq!(data.delimiter, Some(')'));
        assert_eq!(data.padding, 4);
    }

    #[test]
    fn ordered_without_counter_keeps_default_padding() {
        let config = TocConfig::ordered();
        let data = list_data(&config, Some(&Counters::new()), 1, None, Some(3));
        assert_eq!(data.start, Some(1));
        assert_eq!(data.padding, 2);
        assert_eq!(data.marker_offset, 3);
    }
}
