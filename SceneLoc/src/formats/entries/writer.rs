//! Entry-list rendering

use super::{ENTRY_CLOSE, ENTRY_OPEN_PREFIX, ENTRY_OPEN_SUFFIX, EntryList, ROOT_CLOSE, ROOT_OPEN};

/// Render entries as a wrapped, newline-separated script.
///
/// Content is written verbatim. Content containing `<` (or a name containing
/// `"`) cannot be read back by [`parse_entries`](super::parse_entries) and is
/// reported with a warning.
#[must_use]
pub fn render_entries(entries: &EntryList) -> String {
    let body_len: usize = entries
        .iter()
        .map(|(name, content)| {
            ENTRY_OPEN_PREFIX.len() + name.len() + ENTRY_OPEN_SUFFIX.len() + content.len() + ENTRY_CLOSE.len() + 1
        })
        .sum();

    let mut out = String::with_capacity(ROOT_OPEN.len() + ROOT_CLOSE.len() + body_len + 2);
    out.push_str(ROOT_OPEN);
    out.push('\n');

    for (i, (name, content)) in entries.iter().enumerate() {
        if content.contains('<') || name.contains('"') {
            tracing::warn!("Entry '{}' contains markup characters and will not read back", name);
        }
        if i > 0 {
            out.push('\n');
        }
        out.push_str(ENTRY_OPEN_PREFIX);
        out.push_str(name);
        out.push_str(ENTRY_OPEN_SUFFIX);
        out.push_str(content);
        out.push_str(ENTRY_CLOSE);
    }

    out.push('\n');
    out.push_str(ROOT_CLOSE);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::entries::parse_entries;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_layout() {
        let list: EntryList = [("A", "bye"), ("B", "")].into_iter().collect();
        assert_eq!(
            render_entries(&list),
            "<entries>\n<entry name=\"A\">bye</entry>\n<entry name=\"B\"></entry>\n</entries>\n"
        );
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_entries(&EntryList::new()), "<entries>\n\n</entries>\n");
    }

    #[test]
    fn test_render_then_parse_preserves_order_and_content() {
        let list: EntryList = [
            ("Z_last", "first in file"),
            ("A_first", ""),
            ("mid", "multi\nline & \"quotes\" > ok"),
            ("中文", "你好"),
        ]
        .into_iter()
        .collect();

        assert_eq!(parse_entries(&render_entries(&list)), list);
    }

    #[test]
    fn test_render_keeps_markup_verbatim() {
        let list: EntryList = [("A", "a<b")].into_iter().collect();
        let rendered = render_entries(&list);
        assert!(rendered.contains("<entry name=\"A\">a<b</entry>"));
        assert!(parse_entries(&rendered).is_empty());
    }
}
