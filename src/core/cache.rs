//! Single-slot compiled pattern cache
//!
//! Editors call find over and over with the same pattern while the user
//! steps through matches, so the last compiled regex is kept and reused as
//! long as both the engine text and the options are unchanged.

use fancy_regex::{Captures, Regex};
use tracing::{debug, warn};

use super::engine::{compile, EngineConfig, EngineOptions, SearchError};

/// Per-group `(start, end)` byte offsets of the last match.
/// `None` marks a group that did not take part in the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRegion {
    groups: Vec<Option<(usize, usize)>>,
}

impl MatchRegion {
    /// Number of slots, group 0 included
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Offsets of group `n`, if it exists and participated
    pub fn group(&self, n: usize) -> Option<(usize, usize)> {
        self.groups.get(n).copied().flatten()
    }

    pub fn groups(&self) -> &[Option<(usize, usize)>] {
        &self.groups
    }

    fn reset(&mut self, group_count: usize) {
        self.groups.clear();
        self.groups.resize(group_count, None);
    }

    fn clear(&mut self) {
        self.groups = Vec::new();
    }

    fn fill(&mut self, caps: &Captures<'_>) {
        for (i, slot) in self.groups.iter_mut().enumerate() {
            *slot = caps.get(i).map(|m| (m.start(), m.end()));
        }
    }
}

/// The one live compiled pattern of a search session
#[derive(Debug, Default)]
pub struct PatternCache {
    source: String,
    options: EngineOptions,
    regex: Option<Regex>,
    region: MatchRegion,
    error_info: Option<String>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `text` under `options` is compiled, reusing the cached
    /// regex when both are byte-for-byte the same.
    ///
    /// A failed compile drops the previous regex but keeps the cached
    /// text/options, so repeating the same bad request compiles again.
    pub fn ensure_compiled(
        &mut self,
        text: &str,
        options: EngineOptions,
        config: &EngineConfig,
    ) -> Result<(), SearchError> {
        if self.regex.is_some() && self.options == options && self.source == text {
            return Ok(());
        }

        self.region.clear();
        self.regex = None;
        self.error_info = None;

        match compile(text, options, config) {
            Ok(regex) => {
                debug!(pattern = text, %options, groups = regex.captures_len(), "compiled pattern");
                self.region.reset(regex.captures_len());
                self.source = text.to_owned();
                self.options = options;
                self.regex = Some(regex);
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                debug!(pattern = text, error = %message, "pattern failed to compile");
                self.error_info = Some(message.clone());
                Err(SearchError::InvalidPattern(message))
            }
        }
    }

    /// Search `text` for the first match starting at or after `from` whose
    /// start is no later than `limit`.
    ///
    /// On a hit the region is refilled and `(start, end)` of group 0 is
    /// returned. A miss leaves the region as it was.
    pub fn search_from(
        &mut self,
        text: &str,
        from: usize,
        limit: usize,
    ) -> Result<Option<(usize, usize)>, SearchError> {
        let regex = self
            .regex
            .as_ref()
            .ok_or_else(|| SearchError::EngineFault("no compiled pattern".to_string()))?;

        let caps = match regex.captures_from_pos(text, from) {
            Ok(Some(caps)) => caps,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, from, "engine search failed");
                return Err(SearchError::EngineFault(e.to_string()));
            }
        };

        let Some(whole) = caps.get(0) else {
            return Ok(None);
        };
        if whole.start() > limit {
            return Ok(None);
        }

        let span = (whole.start(), whole.end());
        self.region.fill(&caps);
        Ok(Some(span))
    }

    pub fn is_compiled(&self) -> bool {
        self.regex.is_some()
    }

    /// Engine text of the cached pattern
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Group count of the compiled pattern, group 0 included
    pub fn group_count(&self) -> usize {
        self.regex.as_ref().map_or(0, Regex::captures_len)
    }

    pub fn region(&self) -> &MatchRegion {
        &self.region
    }

    /// Diagnostic from the last failed compile
    pub fn error_info(&self) -> Option<&str> {
        self.error_info.as_deref()
    }
}
