//! Find and substitute over a [`Document`]
//!
//! The engine can only answer "next match at or after here". Forward search
//! is one such call; backward search keeps asking from just past the previous
//! hit and reports the last one found inside the range.

use bitflags::bitflags;
use tracing::{debug, trace};

use super::cache::{MatchRegion, PatternCache};
use super::document::Document;
use super::engine::{EngineConfig, EngineOptions, SearchError};
use super::expand::{expand, TemplateToken};
use super::translate::translate;

bitflags! {
    /// Caller-side search flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SearchFlags: u32 {
        /// `.` also matches line breaks
        const DOT_MATCH_ALL = 1 << 0;
    }
}

/// One find call. `min_pos > max_pos` searches backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest<'a> {
    pub pattern: &'a str,
    pub min_pos: usize,
    pub max_pos: usize,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub word_start: bool,
    pub flags: SearchFlags,
}

impl<'a> SearchRequest<'a> {
    /// Case-sensitive, no word options, no flags
    pub fn new(pattern: &'a str, min_pos: usize, max_pos: usize) -> Self {
        Self {
            pattern,
            min_pos,
            max_pos,
            case_sensitive: true,
            whole_word: false,
            word_start: false,
            flags: SearchFlags::empty(),
        }
    }

    pub fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    pub fn whole_word(mut self, on: bool) -> Self {
        self.whole_word = on;
        self
    }

    pub fn word_start(mut self, on: bool) -> Self {
        self.word_start = on;
        self
    }

    pub fn flags(mut self, flags: SearchFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_backward(&self) -> bool {
        self.min_pos > self.max_pos
    }

    /// Options for searching `[lo, hi]` of a document `doc_len` bytes long,
    /// before the EOL mode is applied
    pub fn engine_options(&self, lo: usize, hi: usize, doc_len: usize) -> EngineOptions {
        let mut options = EngineOptions::empty();
        options.set(
            EngineOptions::DOT_ALL,
            self.flags.contains(SearchFlags::DOT_MATCH_ALL),
        );
        options.set(EngineOptions::IGNORE_CASE, !self.case_sensitive);
        options.set(EngineOptions::NOT_BOL, lo != 0);
        options.set(EngineOptions::NOT_EOL, hi != doc_len);
        options
    }
}

/// Position and length of a match, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub position: usize,
    pub length: usize,
}

/// A match together with its group offsets, as collected by [`RegexSearch::find_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundMatch {
    pub result: MatchResult,
    pub groups: Vec<Option<(usize, usize)>>,
}

/// Normalized bounds of a prepared search
#[derive(Debug, Clone, Copy)]
struct Bounds {
    lo: usize,
    hi: usize,
    backward: bool,
}

/// A search session: one cached pattern and the last match.
///
/// Not shareable between threads while in use; every call that touches
/// state takes `&mut self`.
#[derive(Debug, Default)]
pub struct RegexSearch {
    cache: PatternCache,
    config: EngineConfig,
    last_match: Option<MatchResult>,
}

impl RegexSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Most recent match, `None` after a find that did not match
    pub fn last_match(&self) -> Option<MatchResult> {
        self.last_match
    }

    /// Engine text of the cached pattern
    pub fn engine_pattern(&self) -> &str {
        self.cache.source()
    }

    pub fn engine_options(&self) -> EngineOptions {
        self.cache.options()
    }

    pub fn region(&self) -> &MatchRegion {
        self.cache.region()
    }

    /// Diagnostic of the last pattern that failed to compile
    pub fn error_info(&self) -> Option<&str> {
        self.cache.error_info()
    }

    /// Find `request.pattern` in `doc`.
    ///
    /// Forward: the first match starting in `[lo, hi]`. Backward: the last
    /// such match. `Ok(None)` means no match (or an empty pattern).
    pub fn find_text<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        request: &SearchRequest<'_>,
    ) -> Result<Option<MatchResult>, SearchError> {
        let Some(bounds) = self.prepare(doc, request)? else {
            return Ok(None);
        };
        let text = doc.range_pointer(0, doc.length());

        let found = if bounds.backward {
            self.scan_backward(doc, text, bounds.lo, bounds.hi)?
        } else {
            self.cache
                .search_from(text, bounds.lo, bounds.hi)?
                .map(|(start, end)| MatchResult {
                    position: start,
                    length: end - start,
                })
        };

        debug!(
            pattern = request.pattern,
            lo = bounds.lo,
            hi = bounds.hi,
            backward = bounds.backward,
            ?found,
            "find"
        );
        self.last_match = found;
        Ok(found)
    }

    /// Every match starting in the request's range, in document order, up to
    /// `max_matches`. The direction of the request is ignored.
    pub fn find_all<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        request: &SearchRequest<'_>,
        max_matches: usize,
    ) -> Result<Vec<FoundMatch>, SearchError> {
        let mut matches = Vec::new();
        let Some(bounds) = self.prepare(doc, request)? else {
            return Ok(matches);
        };
        let text = doc.range_pointer(0, doc.length());

        let mut from = bounds.lo;
        while matches.len() < max_matches {
            let Some((start, end)) = self.cache.search_from(text, from, bounds.hi)? else {
                break;
            };
            let result = MatchResult {
                position: start,
                length: end - start,
            };
            matches.push(FoundMatch {
                result,
                groups: self.cache.region().groups().to_vec(),
            });
            self.last_match = Some(result);

            let next = start + result.length.max(1);
            if next > bounds.hi {
                break;
            }
            from = doc.move_position_outside_char(next, 1, false);
        }

        debug!(pattern = request.pattern, count = matches.len(), "find all");
        Ok(matches)
    }

    /// Build the replacement text for the last match.
    ///
    /// `template` is expanded first; `$n` / `\n` pull group `n` from `doc`.
    /// Groups the pattern does not have expand to nothing.
    pub fn substitute_by_position<D: Document + ?Sized>(
        &self,
        doc: &D,
        template: &str,
    ) -> Result<String, SearchError> {
        if self.last_match.is_none() {
            return Err(SearchError::NoActiveMatch);
        }

        let expanded = expand(template);
        let region = self.cache.region();
        let mut out = String::with_capacity(expanded.as_str().len());

        for token in expanded.tokens() {
            match token {
                TemplateToken::Text(text) => out.push_str(text),
                TemplateToken::Group(n) => {
                    if let Some((beg, end)) = region.group(usize::from(n)) {
                        out.push_str(doc.range_pointer(beg, end - beg));
                    }
                }
            }
        }

        Ok(out)
    }

    /// Normalize the range, translate and compile. `None` for an empty pattern.
    fn prepare<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        request: &SearchRequest<'_>,
    ) -> Result<Option<Bounds>, SearchError> {
        self.last_match = None;
        if request.pattern.is_empty() {
            return Ok(None);
        }

        let doc_len = doc.length();
        let min_pos = doc.move_position_outside_char(request.min_pos.min(doc_len), 1, false);
        let max_pos = doc.move_position_outside_char(request.max_pos.min(doc_len), 1, false);
        let backward = min_pos > max_pos;
        let (lo, hi) = if backward {
            (max_pos, min_pos)
        } else {
            (min_pos, max_pos)
        };

        let translation = translate(
            request.pattern,
            request.whole_word,
            request.word_start,
            doc.eol_mode(),
            request.engine_options(lo, hi, doc_len),
        );
        self.cache
            .ensure_compiled(&translation.text, translation.options, &self.config)?;

        Ok(Some(Bounds { lo, hi, backward }))
    }

    /// Last match starting in `[lo, hi]`
    fn scan_backward<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        text: &str,
        lo: usize,
        hi: usize,
    ) -> Result<Option<MatchResult>, SearchError> {
        let mut last = None;
        let mut from = lo;

        while let Some((start, end)) = self.cache.search_from(text, from, hi)? {
            let hit = MatchResult {
                position: start,
                length: end - start,
            };
            trace!(position = start, length = hit.length, "backward scan hit");
            last = Some(hit);

            let next = start + hit.length.max(1);
            if next > hi {
                break;
            }
            from = doc.move_position_outside_char(next, 1, false);
        }

        Ok(last)
    }
}
