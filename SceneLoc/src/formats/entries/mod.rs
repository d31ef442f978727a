//! Entry-list scripts
//!
//! The decrypted payload of a dialogue scene is a flat list of
//! `<entry name="X">content</entry>` elements wrapped in `<entries>`.
//! Content is opaque: it is never escaped or unescaped, and it cannot
//! contain `<`.

mod reader;
mod writer;

pub use reader::{Token, parse_entries, tokenize};
pub use writer::render_entries;

use indexmap::IndexMap;
use indexmap::map::Iter;

/// Opening tag of the wrapper block
pub const ROOT_OPEN: &str = "<entries>";

/// Closing tag of the wrapper block
pub const ROOT_CLOSE: &str = "</entries>";

/// Start of an entry's opening tag, up to the name value
pub const ENTRY_OPEN_PREFIX: &str = "<entry name=\"";

/// End of an entry's opening tag, after the name value
pub const ENTRY_OPEN_SUFFIX: &str = "\">";

/// Closing tag of an entry
pub const ENTRY_CLOSE: &str = "</entry>";

/// Ordered `name -> content` entries of one scene.
///
/// Order is the order in which names were first inserted. Inserting an
/// existing name replaces its content in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: IndexMap<String, String>,
}

impl EntryList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry, keeping the position of the first insertion.
    ///
    /// Returns the previous content if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), content.into())
    }

    /// Replace the content of an existing entry.
    ///
    /// Returns `false` (and changes nothing) if the entry does not exist.
    pub fn set_content(&mut self, name: &str, content: impl Into<String>) -> bool {
        match self.entries.get_mut(name) {
            Some(slot) => {
                *slot = content.into();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, content)` pairs in order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Entry names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for EntryList {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut list = EntryList::new();
        for (name, content) in iter {
            list.insert(name, content);
        }
        list
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut list = EntryList::new();
        list.insert("A", "1");
        list.insert("B", "2");
        assert_eq!(list.insert("A", "3"), Some("1".to_string()));
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(list.get("A"), Some("3"));
    }

    #[test]
    fn test_set_content_never_adds() {
        let mut list: EntryList = [("A", "1")].into_iter().collect();
        assert!(!list.set_content("B", "2"));
        assert!(list.set_content("A", ""));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("A"), Some(""));
    }
}
