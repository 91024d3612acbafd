//! Link destinations for generated index entries.

use crate::slug::Slugger;

/// Builds the URL of an index entry from the plain text of its heading.
///
/// Called once per heading that receives an automatic link. Implementations
/// own slugification and disambiguation.
pub trait Destination {
    /// Returns the link destination for the heading text `literal`.
    fn destination(&mut self, literal: &str) -> String;
}

impl<F> Destination for F
where
    F: FnMut(&str) -> String,
{
    fn destination(&mut self, literal: &str) -> String {
        (self)(literal)
    }
}

/// Default destination: `base + prefix + slug`, with repeated slugs suffixed.
#[derive(Debug, Clone)]
pub struct AnchorDestination {
    prefix: String,
    base: String,
    slugger: Slugger,
}

impl AnchorDestination {
    /// Creates a generator with the given prefix (usually `#`, `/` or empty)
    /// and base path.
    pub fn new(prefix: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            base: base.into(),
            slugger: Slugger::new(),
        }
    }

    /// Slugs handed out so far.
    pub fn slugger(&self) -> &Slugger {
        &self.slugger
    }
}

impl Default for AnchorDestination {
    fn default() -> Self {
        Self::new("#", "")
    }
}

impl Destination for AnchorDestination {
    fn destination(&mut self, literal: &str) -> String {
        let slug = self.slugger.next_slug(literal);
        format!("{}{}{}", self.base, self.prefix, slug)
    }
}
