//! Replace-next and replace-all
//!
//! Both are the loop an editor host runs on top of find + substitute:
//! find, build the replacement from the live match, splice it into the
//! document, and move on past the inserted text.

use tracing::debug;

use super::document::{Document, TextDocument};
use super::engine::SearchError;
use super::search::{RegexSearch, SearchRequest};

/// One splice made by a replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Where the match started
    pub position: usize,
    /// Bytes removed (the match length)
    pub removed: usize,
    /// Text inserted in its place
    pub text: String,
}

/// Replace the match `request` finds (forward or backward) and return what
/// was spliced in, or `None` if nothing matched.
pub fn replace_next(
    search: &mut RegexSearch,
    doc: &mut TextDocument,
    request: &SearchRequest<'_>,
    template: &str,
) -> Result<Option<Replacement>, SearchError> {
    let Some(found) = search.find_text(&*doc, request)? else {
        return Ok(None);
    };
    let text = search.substitute_by_position(&*doc, template)?;
    doc.replace_range(found.position, found.length, &text);

    Ok(Some(Replacement {
        position: found.position,
        removed: found.length,
        text,
    }))
}

/// Replace every match starting inside the request's range, front to back.
///
/// The range end follows the edits. After an empty match the scan skips one
/// character so it cannot match the same spot again.
pub fn replace_all(
    search: &mut RegexSearch,
    doc: &mut TextDocument,
    request: &SearchRequest<'_>,
    template: &str,
) -> Result<Vec<Replacement>, SearchError> {
    let mut pos = request.min_pos.min(request.max_pos);
    let mut end = request.min_pos.max(request.max_pos).min(doc.length());
    let mut replacements = Vec::new();

    while pos <= end {
        let step = SearchRequest {
            min_pos: pos,
            max_pos: end,
            ..*request
        };
        let Some(replacement) = replace_next(search, doc, &step, template)? else {
            break;
        };

        let inserted_end = replacement.position + replacement.text.len();
        end = (end + replacement.text.len()).saturating_sub(replacement.removed);

        pos = if replacement.removed == 0 {
            if inserted_end >= doc.length() {
                replacements.push(replacement);
                break;
            }
            doc.move_position_outside_char(inserted_end + 1, 1, false)
        } else {
            inserted_end
        };
        replacements.push(replacement);
    }

    debug!(
        pattern = request.pattern,
        count = replacements.len(),
        "replace all"
    );
    Ok(replacements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_all(text: &str, pattern: &str, template: &str) -> (String, usize) {
        let mut doc = TextDocument::new(text);
        let mut search = RegexSearch::new();
        let request = SearchRequest::new(pattern, 0, text.len());
        let done = replace_all(&mut search, &mut doc, &request, template).unwrap();
        (doc.into_text(), done.len())
    }

    #[test]
    fn test_replace_next() {
        let mut doc = TextDocument::new("Call 123-456");
        let mut search = RegexSearch::new();
        let request = SearchRequest::new(r"(\d+)-(\d+)", 0, 12);
        let done = replace_next(&mut search, &mut doc, &request, r"\2-\1")
            .unwrap()
            .unwrap();
        assert_eq!(done.position, 5);
        assert_eq!(done.removed, 7);
        assert_eq!(doc.text(), "Call 456-123");
    }

    #[test]
    fn test_replace_next_backward() {
        let mut doc = TextDocument::new("a1 b2 c3");
        let mut search = RegexSearch::new();
        let request = SearchRequest::new(r"\d", 8, 0);
        replace_next(&mut search, &mut doc, &request, "#").unwrap();
        assert_eq!(doc.text(), "a1 b2 c#");
    }

    #[test]
    fn test_replace_next_no_match() {
        let mut doc = TextDocument::new("hello");
        let mut search = RegexSearch::new();
        let request = SearchRequest::new(r"\d", 0, 5);
        assert_eq!(replace_next(&mut search, &mut doc, &request, "#").unwrap(), None);
        assert_eq!(doc.text(), "hello");
    }

    #[test]
    fn test_replace_all_simple() {
        assert_eq!(run_all("a1b2c3", r"\d+", "NUM"), ("aNUMbNUMcNUM".to_string(), 3));
    }

    #[test]
    fn test_replace_all_growing_and_shrinking() {
        assert_eq!(run_all("aa aa", "a", "bbb"), ("bbbbbb bbbbbb".to_string(), 4));
        assert_eq!(run_all("xxxx yy", "xx", ""), (" yy".to_string(), 2));
    }

    #[test]
    fn test_replace_all_zero_length() {
        assert_eq!(run_all("ab", "x*", "-"), ("-a-b-".to_string(), 3));
        assert_eq!(run_all("a\nb", "^", "> "), ("> a\n> b".to_string(), 2));
    }

    #[test]
    fn test_replace_all_respects_range() {
        let mut doc = TextDocument::new("foo foo foo");
        let mut search = RegexSearch::new();
        let request = SearchRequest::new("foo", 4, 7);
        let done = replace_all(&mut search, &mut doc, &request, "X").unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(doc.text(), "foo X foo");
    }

    #[test]
    fn test_replace_all_legacy_groups() {
        assert_eq!(
            run_all("john smith, jane doe", r"(\w+) (\w+)", r"\2 \1"),
            ("smith john, doe jane".to_string(), 2)
        );
    }

    #[test]
    fn test_replace_all_line_ends_keeps_crlf_pairs() {
        assert_eq!(run_all("a\r\nb", "$", ";"), ("a;\r\nb;".to_string(), 2));
        assert_eq!(
            run_all("one\r\ntwo\r\n", "o$", "0"),
            ("on0\r\ntw0\r\n".to_string(), 2)
        );
    }
}
