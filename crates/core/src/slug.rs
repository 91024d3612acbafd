use std::collections::HashMap;

/// GitHub-style automatic header identifier.
///
/// Lower-cases the text, drops every character that is not an ASCII letter,
/// digit, space, underscore or hyphen, turns spaces into hyphens and collapses
/// runs of hyphens into one.
///
/// # Examples
///
/// ```
/// use mdtoc_core::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("A -- B"), "a-b");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for ch in text.to_lowercase().chars() {
        let mapped = match ch {
            'a'..='z' | '0'..='9' | '_' => ch,
            ' ' | '-' => '-',
            // Remaining characters (punctuation, tabs, non-ASCII) are dropped
            _ => continue,
        };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }

    slug
}

/// Slug generator that disambiguates repeated headings.
///
/// The first occurrence of a slug is returned as is; the n-th occurrence gets
/// a `-<n-1>` suffix. Suffixed slugs are recorded too, so a later heading whose
/// own slug matches one of them is suffixed instead of colliding.
#[derive(Debug, Default, Clone)]
pub struct Slugger {
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Generates the next slug for the given heading text.
    pub fn next_slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let Some(&count) = self.counts.get(&base) else {
            self.counts.insert(base.clone(), 1);
            return base;
        };

        let mut n = count;
        let mut slug = format!("{}-{}", base, n);
        while self.counts.contains_key(&slug) {
            n += 1;
            slug = format!("{}-{}", base, n);
        }
        self.counts.insert(base, n + 1);
        self.counts.insert(slug.clone(), 1);

        slug
    }

    /// Number of times `slug` has been requested or handed out.
    pub fn seen(&self, slug: &str) -> usize {
        self.counts.get(slug).copied().unwrap_or(0)
    }
}
