//! Command-level operations behind `edrex find`, `replace`, `translate` and
//! `expand`: run the core over a whole input and shape the result for output.

use std::borrow::Cow;

use super::document::{Document, EolMode, TextDocument};
use super::engine::{compile, engine_source, EngineConfig, SearchError};
use super::expand::{expand, TemplateToken};
use super::replace::{replace_all, replace_next, Replacement};
use super::search::{FoundMatch, RegexSearch, SearchFlags, SearchRequest};
use super::translate::translate;
use crate::output::{
    Capture, ExpandResult, FindResult, Match, ReplaceResult, Splice, TemplatePart,
    TranslateResult,
};

/// Options shared by find and replace
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Start of the range (default: document start)
    pub min_pos: Option<usize>,
    /// End of the range (default: document end)
    pub max_pos: Option<usize>,
    /// Search from the end of the range toward its start
    pub backward: bool,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub word_start: bool,
    /// `.` matches line breaks
    pub dot_all: bool,
    /// Treat the pattern as plain text
    pub literal: bool,
    /// Every match instead of the next one
    pub all: bool,
    /// Cap on reported matches with `all`
    pub max_matches: usize,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            min_pos: None,
            max_pos: None,
            backward: false,
            case_sensitive: true,
            whole_word: false,
            word_start: false,
            dot_all: false,
            literal: false,
            all: false,
            max_matches: 100,
        }
    }
}

impl FindOptions {
    fn pattern<'a>(&self, pattern: &'a str) -> Cow<'a, str> {
        if self.literal {
            Cow::Owned(regex::escape(pattern))
        } else {
            Cow::Borrowed(pattern)
        }
    }

    fn request<'a>(&self, pattern: &'a str, doc_len: usize) -> SearchRequest<'a> {
        let mut min_pos = self.min_pos.unwrap_or(0);
        let mut max_pos = self.max_pos.unwrap_or(doc_len);
        if self.backward && min_pos < max_pos {
            std::mem::swap(&mut min_pos, &mut max_pos);
        }

        let flags = if self.dot_all {
            SearchFlags::DOT_MATCH_ALL
        } else {
            SearchFlags::empty()
        };

        SearchRequest::new(pattern, min_pos, max_pos)
            .case_sensitive(self.case_sensitive)
            .whole_word(self.whole_word)
            .word_start(self.word_start)
            .flags(flags)
    }
}

fn to_match(doc: &TextDocument, found: &FoundMatch) -> Match {
    let captures = found
        .groups
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(group, span)| {
            span.map(|(start, end)| Capture {
                group,
                text: doc.range_pointer(start, end - start).to_string(),
                start,
                end,
            })
        })
        .collect();

    Match {
        text: doc
            .range_pointer(found.result.position, found.result.length)
            .to_string(),
        start: found.result.position,
        length: found.result.length,
        captures,
    }
}

/// Find the next match (or all matches) of `pattern` in `doc`
pub fn find_in(
    search: &mut RegexSearch,
    doc: &TextDocument,
    pattern: &str,
    options: &FindOptions,
) -> Result<FindResult, SearchError> {
    let pattern_text = options.pattern(pattern);
    let request = options.request(&pattern_text, doc.length());
    let backward = request.is_backward() && !options.all;

    let found = if options.all {
        search.find_all(doc, &request, options.max_matches)?
    } else {
        search
            .find_text(doc, &request)?
            .map(|result| FoundMatch {
                result,
                groups: search.region().groups().to_vec(),
            })
            .into_iter()
            .collect()
    };

    let matches: Vec<Match> = found.iter().map(|m| to_match(doc, m)).collect();
    let (engine_pattern, engine_options) = if pattern_text.is_empty() {
        (String::new(), Vec::new())
    } else {
        (
            search.engine_pattern().to_string(),
            search.engine_options().names(),
        )
    };

    Ok(FindResult {
        pattern: pattern.to_string(),
        engine_pattern,
        options: engine_options,
        direction: if backward { "backward" } else { "forward" }.to_string(),
        eol_mode: doc.eol_mode().to_string(),
        range_start: request.min_pos.min(request.max_pos),
        range_end: request.min_pos.max(request.max_pos),
        matched: !matches.is_empty(),
        match_count: matches.len(),
        matches,
    })
}

/// Replace the next match (or all matches) of `pattern` in `doc`
pub fn replace_in(
    search: &mut RegexSearch,
    doc: &mut TextDocument,
    pattern: &str,
    template: &str,
    options: &FindOptions,
) -> Result<ReplaceResult, SearchError> {
    let pattern_text = options.pattern(pattern);
    let request = options.request(&pattern_text, doc.length());

    let replacements: Vec<Replacement> = if options.all {
        replace_all(search, doc, &request, template)?
    } else {
        replace_next(search, doc, &request, template)?
            .into_iter()
            .collect()
    };

    Ok(ReplaceResult {
        pattern: pattern.to_string(),
        template: template.to_string(),
        expanded_template: expand(template).into_string(),
        replacements_made: replacements.len(),
        replacements: replacements
            .into_iter()
            .map(|r| Splice {
                position: r.position,
                removed: r.removed,
                inserted: r.text,
            })
            .collect(),
        result: doc.text().to_string(),
        file_path: None,
        backup_path: None,
        written: false,
    })
}

/// Show how `pattern` reaches the engine for a whole-document search
pub fn translate_pattern(
    pattern: &str,
    options: &FindOptions,
    eol_mode: EolMode,
    config: &EngineConfig,
) -> TranslateResult {
    let pattern_text = options.pattern(pattern);
    let request = options.request(&pattern_text, 0);
    let translation = translate(
        &pattern_text,
        options.whole_word,
        options.word_start,
        eol_mode,
        request.engine_options(0, 0, 0),
    );

    let error = if pattern_text.is_empty() {
        Some("Empty pattern".to_string())
    } else {
        compile(&translation.text, translation.options, config)
            .err()
            .map(|e| e.to_string())
    };

    TranslateResult {
        pattern: pattern.to_string(),
        engine_source: engine_source(&translation.text, translation.options),
        options: translation.options.names(),
        translated: translation.text,
        eol_mode: eol_mode.to_string(),
        valid: error.is_none(),
        error,
    }
}

/// Expand a replacement template and list its parts
pub fn expand_template(template: &str) -> ExpandResult {
    let expanded = expand(template);
    let parts = expanded
        .tokens()
        .map(|token| match token {
            TemplateToken::Text(text) => TemplatePart::Text(text.to_string()),
            TemplateToken::Group(n) => TemplatePart::Group(n),
        })
        .collect();

    ExpandResult {
        template: template.to_string(),
        expanded: expanded.into_string(),
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_reports_captures() {
        let doc = TextDocument::new("call 123-4567 now");
        let mut search = RegexSearch::new();
        let result = find_in(&mut search, &doc, r"(\d{3})-(\d{4})", &FindOptions::default())
            .unwrap();
        assert!(result.matched);
        assert_eq!(result.direction, "forward");
        assert_eq!(result.matches[0].text, "123-4567");
        assert_eq!(result.matches[0].captures.len(), 2);
        assert_eq!(result.matches[0].captures[1].text, "4567");
    }

    #[test]
    fn test_find_in_backward_flag() {
        let doc = TextDocument::new("xx foo foo yy");
        let mut search = RegexSearch::new();
        let options = FindOptions {
            backward: true,
            ..FindOptions::default()
        };
        let result = find_in(&mut search, &doc, "foo", &options).unwrap();
        assert_eq!(result.direction, "backward");
        assert_eq!(result.matches[0].start, 7);
        assert_eq!((result.range_start, result.range_end), (0, 13));
    }

    #[test]
    fn test_find_in_literal() {
        let doc = TextDocument::new("axb a.b");
        let mut search = RegexSearch::new();
        let options = FindOptions {
            literal: true,
            ..FindOptions::default()
        };
        let result = find_in(&mut search, &doc, "a.b", &options).unwrap();
        assert_eq!(result.matches[0].start, 4);
    }

    #[test]
    fn test_find_in_all() {
        let doc = TextDocument::new("a1 b2 c3");
        let mut search = RegexSearch::new();
        let options = FindOptions {
            all: true,
            ..FindOptions::default()
        };
        let result = find_in(&mut search, &doc, r"\d", &options).unwrap();
        assert_eq!(result.match_count, 3);
    }

    #[test]
    fn test_replace_in_all() {
        let mut doc = TextDocument::new("a1b2c3");
        let mut search = RegexSearch::new();
        let options = FindOptions {
            all: true,
            ..FindOptions::default()
        };
        let result = replace_in(&mut search, &mut doc, r"\d", "<$0>", &options).unwrap();
        assert_eq!(result.result, "a<1>b<2>c<3>");
        assert_eq!(result.replacements_made, 3);
    }

    #[test]
    fn test_translate_pattern() {
        let options = FindOptions {
            whole_word: true,
            case_sensitive: false,
            ..FindOptions::default()
        };
        let result = translate_pattern("a.c", &options, EolMode::CrLf, &EngineConfig::default());
        assert!(result.valid);
        assert_eq!(result.translated, r"\ba\wc\b");
        assert_eq!(result.options, vec!["ignore_case", "newline_crlf"]);
        assert!(result.engine_source.starts_with("(?mi)"));

        let bad = translate_pattern("(x", &FindOptions::default(), EolMode::Lf, &EngineConfig::default());
        assert!(!bad.valid);
        assert!(bad.error.is_some());
    }

    #[test]
    fn test_expand_template() {
        let result = expand_template(r"\1-\t");
        assert_eq!(result.expanded, "$1-\t");
        assert!(matches!(result.parts[0], TemplatePart::Group(1)));
    }
}
