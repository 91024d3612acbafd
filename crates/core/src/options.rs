//! Index options.
//!
//! [`TocOptions`] is the loose, deserializable form accepted from callers and
//! bindings. [`TocOptions::resolve`] turns it into a validated [`TocConfig`],
//! falling back to defaults for values that are absent or not recognised.

use crate::TocError;
use crate::node::ListType;
use serde::{Deserialize, Serialize};

/// Default bullet character.
pub const DEFAULT_BULLET: char = '-';
/// Default ordered list delimiter.
pub const DEFAULT_DELIMITER: char = ')';
/// Default link prefix.
pub const DEFAULT_PREFIX: &str = "#";
/// Deepest heading level indexed by default.
pub const DEFAULT_MAX_DEPTH: u8 = 6;

const BULLETS: [char; 3] = ['-', '+', '*'];
const DELIMITERS: [char; 2] = ['.', ')'];

/// Caller supplied options. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TocOptions {
    /// `"bullet"` or `"ordered"`.
    #[serde(alias = "type", alias = "listType")]
    pub list_type: Option<String>,
    /// Whether entries link to their headings.
    pub link: Option<bool>,
    /// Headings above this level (numerically below) are ignored.
    pub depth: Option<i64>,
    /// Headings below this level (numerically above) are ignored.
    pub max: Option<i64>,
    /// Link prefix, typically `#`, `/` or empty.
    pub prefix: Option<String>,
    /// Base path placed before the prefix.
    pub base: Option<String>,
    /// Bullet character: `-`, `+` or `*`.
    pub bullet: Option<String>,
    /// Ordered list delimiter: `.` or `)`.
    pub delimiter: Option<String>,
    /// Title heading placed before the index.
    pub title: Option<String>,
    /// Level of the title heading.
    #[serde(alias = "level", alias = "titleLevel")]
    pub title_level: Option<i64>,
    /// Start a new root list whenever a top-level heading follows nested ones.
    /// Off by default: `# A`, `## B`, `# C` then give one root list holding
    /// `A` and `C`, with `B` nested under `A`.
    #[serde(alias = "splitRootLists")]
    pub split_root_lists: Option<bool>,
    /// Emit only the index document, discarding the input.
    pub standalone: Option<bool>,
}

impl TocOptions {
    /// Validates the options and fills in defaults.
    pub fn resolve(&self) -> Result<TocConfig, TocError> {
        let list_type = match self.list_type.as_deref() {
            None | Some("bullet") => ListType::Bullet,
            Some("ordered") => ListType::Ordered,
            Some(other) => {
                log::warn!("Unknown list type {:?}, using bullet", other);
                ListType::Bullet
            }
        };

        let config = TocConfig {
            list_type,
            link: self.link.unwrap_or(true),
            depth_floor: positive_level(self.depth, "depth").unwrap_or(1),
            depth_ceiling: positive_level(self.max, "max").unwrap_or(DEFAULT_MAX_DEPTH),
            prefix: self
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            base: self.base.clone().unwrap_or_default(),
            bullet_char: single_char(self.bullet.as_deref(), &BULLETS, "bullet")
                .unwrap_or(DEFAULT_BULLET),
            delimiter: single_char(self.delimiter.as_deref(), &DELIMITERS, "delimiter")
                .unwrap_or(DEFAULT_DELIMITER),
            title: self.title.clone().filter(|t| !t.is_empty()),
            title_level: positive_level(self.title_level, "title level")
                .filter(|l| *l <= 6)
                .unwrap_or(1),
            split_root_lists: self.split_root_lists.unwrap_or(false),
            standalone: self.standalone.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

fn positive_level(value: Option<i64>, name: &str) -> Option<u8> {
    let value = value?;
    match u8::try_from(value) {
        Ok(level) if level > 0 => Some(level),
        _ => {
            log::warn!("Ignoring {} {}, expected a positive level", name, value);
            None
        }
    }
}

fn single_char(value: Option<&str>, allowed: &[char], name: &str) -> Option<char> {
    let value = value?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if allowed.contains(&ch) => Some(ch),
        _ => {
            log::warn!("Ignoring {} {:?}, expected one of {:?}", name, value, allowed);
            None
        }
    }
}

/// Validated index configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocConfig {
    /// Bullet or ordered output lists.
    pub list_type: ListType,
    /// Whether entries link to their headings.
    pub link: bool,
    /// Lowest heading level indexed; also the level of root list entries.
    pub depth_floor: u8,
    /// Highest heading level indexed.
    pub depth_ceiling: u8,
    /// Link prefix.
    pub prefix: String,
    /// Base path placed before the prefix.
    pub base: String,
    /// Bullet character for bullet lists.
    pub bullet_char: char,
    /// Delimiter for ordered lists.
    pub delimiter: char,
    /// Optional title heading text.
    pub title: Option<String>,
    /// Level of the title heading.
    pub title_level: u8,
    /// Start a new root list when returning to the floor level. When false,
    /// floor-level headings always append to the single root list.
    pub split_root_lists: bool,
    /// Discard the input and emit only the index document.
    pub standalone: bool,
}

impl TocConfig {
    /// Ordered output with otherwise default settings.
    pub fn ordered() -> Self {
        Self {
            list_type: ListType::Ordered,
            ..Self::default()
        }
    }

    /// Rejects configurations that can never index a heading.
    pub fn validate(&self) -> Result<(), TocError> {
        if self.depth_floor > self.depth_ceiling {
            return Err(TocError::InvalidDepthRange {
                floor: self.depth_floor,
                ceiling: self.depth_ceiling,
            });
        }
        Ok(())
    }

    /// Whether headings at `level` are indexed.
    pub fn accepts(&self, level: u8) -> bool {
        (self.depth_floor..=self.depth_ceiling).contains(&level)
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            list_type: ListType::Bullet,
            link: true,
            depth_floor: 1,
            depth_ceiling: DEFAULT_MAX_DEPTH,
            prefix: DEFAULT_PREFIX.to_string(),
            base: String::new(),
            bullet_char: DEFAULT_BULLET,
            delimiter: DEFAULT_DELIMITER,
            title: None,
            title_level: 1,
            split_root_lists: false,
            standalone: false,
        }
    }
}
