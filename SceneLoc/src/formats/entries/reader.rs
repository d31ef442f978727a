//! Entry-list tokenizer and parser
//!
//! Grammar (anything that does not fit is skipped):
//!
//! ```text
//! entry   = open content? close
//! open    = "<entry name=\"" name "\">"
//! name    = 1*(any char except '"')
//! content = 1*(any char except '<')
//! close   = "</entry>"
//! ```

use super::{ENTRY_CLOSE, ENTRY_OPEN_PREFIX, ENTRY_OPEN_SUFFIX, EntryList};

/// Lexical unit of an entry-list script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<entry name="...">` carrying the name value
    Open(&'a str),
    /// Run of text up to the next `<`
    Text(&'a str),
    /// `</entry>`
    Close,
    /// A `<` that starts no recognized tag (wrapper tags, stray markup)
    Markup,
}

/// Split a script into tokens.
#[must_use]
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < src.len() {
        let rest = &src[pos..];
        if rest.starts_with('<') {
            let (token, consumed) = lex_tag(rest);
            tokens.push(token);
            pos += consumed;
        } else {
            let len = rest.find('<').unwrap_or(rest.len());
            tokens.push(Token::Text(&rest[..len]));
            pos += len;
        }
    }

    tokens
}

/// Lex the tag starting at `rest[0] == '<'`, returning the token and bytes consumed.
fn lex_tag(rest: &str) -> (Token<'_>, usize) {
    if rest.starts_with(ENTRY_CLOSE) {
        return (Token::Close, ENTRY_CLOSE.len());
    }

    if let Some(after_prefix) = rest.strip_prefix(ENTRY_OPEN_PREFIX) {
        if let Some(name_len) = after_prefix.find('"') {
            let name = &after_prefix[..name_len];
            if !name.is_empty() && after_prefix[name_len..].starts_with(ENTRY_OPEN_SUFFIX) {
                let consumed = ENTRY_OPEN_PREFIX.len() + name_len + ENTRY_OPEN_SUFFIX.len();
                return (Token::Open(name), consumed);
            }
        }
    }

    (Token::Markup, 1)
}

/// Parse a decrypted script into its ordered entries.
///
/// Duplicate names keep the position of their first occurrence and the
/// content of their last.
#[must_use]
pub fn parse_entries(src: &str) -> EntryList {
    let mut list = EntryList::new();
    let mut pending: Option<(&str, &str)> = None;

    for token in tokenize(src) {
        pending = match (pending, token) {
            (_, Token::Open(name)) => Some((name, "")),
            (Some((name, "")), Token::Text(text)) => Some((name, text)),
            (Some((name, content)), Token::Close) => {
                if list.insert(name, content).is_some() {
                    tracing::debug!("Duplicate entry '{}', keeping last content", name);
                }
                None
            }
            _ => None,
        };
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_wrapped_entry() {
        let tokens = tokenize("<entries>\n<entry name=\"A\">hi</entry>\n</entries>");
        assert_eq!(
            tokens,
            vec![
                Token::Markup,
                Token::Text("entries>\n"),
                Token::Open("A"),
                Token::Text("hi"),
                Token::Close,
                Token::Text("\n"),
                Token::Markup,
                Token::Text("/entries>"),
            ]
        );
    }

    #[test]
    fn test_parse_basic_and_empty_content() {
        let list = parse_entries("<entry name=\"A\">hi</entry><entry name=\"B\"></entry>");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("A"), Some("hi"));
        assert_eq!(list.get("B"), Some(""));
    }

    #[test]
    fn test_parse_duplicate_last_wins_first_position() {
        let list = parse_entries(
            "<entry name=\"A\">one</entry><entry name=\"B\">b</entry><entry name=\"A\">two</entry>",
        );
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(list.get("A"), Some("two"));
    }

    #[test]
    fn test_parse_content_is_raw() {
        let list = parse_entries("<entry name=\"A\">Tom &amp; Jerry &lt;3 \"quoted\"\nline</entry>");
        assert_eq!(list.get("A"), Some("Tom &amp; Jerry &lt;3 \"quoted\"\nline"));
    }

    #[test]
    fn test_parse_skips_entry_with_markup_in_content() {
        let list = parse_entries("<entry name=\"A\">x<b>y</b></entry><entry name=\"B\">ok</entry>");
        assert!(!list.contains("A"));
        assert_eq!(list.get("B"), Some("ok"));
    }

    #[test]
    fn test_parse_skips_unclosed_entry() {
        let list = parse_entries("<entry name=\"A\">dangling<entry name=\"B\">ok</entry>");
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_parse_rejects_other_attribute_shapes() {
        let list = parse_entries(
            "<entry id=\"A\">x</entry><entry name=\"\">y</entry><entry  name=\"C\">z</entry><entry name=\"D\" >w</entry>",
        );
        assert!(list.is_empty());
    }

    #[test]
    fn test_parse_name_may_contain_angle_brackets() {
        let list = parse_entries("<entry name=\"a>b\">c</entry>");
        assert_eq!(list.get("a>b"), Some("c"));
    }

    #[test]
    fn test_parse_recovers_after_broken_open_tag() {
        let list = parse_entries("<entry name=\"x<entry name=\"y\">z</entry>");
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["y"]);
        assert_eq!(list.get("y"), Some("z"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries("<entries>\n\n</entries>\n").is_empty());
    }
}
