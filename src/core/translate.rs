//! Editor pattern dialect → engine pattern text
//!
//! Editors accept a few constructs the engine does not: `\<` / `\>` word
//! boundaries, whole-word and word-start toggles, and a `$` that means "before
//! a carriage return" in CR documents. Everything here is a single pass over
//! the pattern that knows about escape pairs and character classes, so one
//! rewrite can never see the output of another.

use super::document::EolMode;
use super::engine::EngineOptions;

/// Engine text for `\<`
pub const WORD_BEGIN: &str = r"(?<!\w)(?=\w)";
/// Engine text for `\>`
pub const WORD_END: &str = r"(?<=\w)(?!\w)";
/// Engine text for `$` in CR documents
pub const CR_LINE_END: &str = r"(?=\r)";
/// Replacement for `.` under whole-word / word-start matching
pub const WORD_CHAR: &str = r"\w";
/// Word-boundary assertion wrapped around whole-word patterns
pub const WORD_BOUNDARY: &str = r"\b";

/// Result of translating an editor pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Pattern text ready for the engine
    pub text: String,
    /// Options with the EOL-mode adjustments applied
    pub options: EngineOptions,
}

/// Which constructs [`rewrite`] replaces. `None` leaves a construct as-is.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Rewrites<'a> {
    pub word_shorthand: bool,
    pub dot: Option<&'a str>,
    pub line_start: Option<&'a str>,
    pub line_end: Option<&'a str>,
}

/// Translate an editor pattern into engine text.
///
/// `options` carries what the caller already decided (case, dot-all, not-BOL,
/// not-EOL); the EOL mode adds or clears [`EngineOptions::NEWLINE_CRLF`].
/// The caller rejects empty patterns before getting here.
pub fn translate(
    pattern: &str,
    whole_word: bool,
    word_start: bool,
    eol_mode: EolMode,
    mut options: EngineOptions,
) -> Translation {
    let word_mode = whole_word || word_start;

    let rules = Rewrites {
        word_shorthand: true,
        dot: word_mode.then_some(WORD_CHAR),
        line_start: None,
        line_end: (eol_mode == EolMode::Cr).then_some(CR_LINE_END),
    };
    let body = rewrite(pattern, &rules);

    let mut text = String::with_capacity(body.len() + 2 * WORD_BOUNDARY.len());
    if word_mode {
        text.push_str(WORD_BOUNDARY);
    }
    text.push_str(&body);
    if whole_word {
        text.push_str(WORD_BOUNDARY);
    }

    match eol_mode {
        EolMode::Lf | EolMode::Cr => options.remove(EngineOptions::NEWLINE_CRLF),
        EolMode::CrLf => options.insert(EngineOptions::NEWLINE_CRLF),
    }

    Translation { text, options }
}

/// Single-pass rewriter shared by the translator and the engine lowering.
///
/// Escape pairs are copied as a unit (so `\\<` and `\$` are never touched),
/// and nothing inside a character class is rewritten. Classes may nest.
pub(crate) fn rewrite(pattern: &str, rules: &Rewrites<'_>) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('<') if class_depth == 0 && rules.word_shorthand => out.push_str(WORD_BEGIN),
                Some('>') if class_depth == 0 && rules.word_shorthand => out.push_str(WORD_END),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                // Dangling backslash: leave it for the engine to reject.
                None => out.push('\\'),
            },
            '[' => {
                class_depth += 1;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('^');
                }
                // `]` right after the opening bracket is a literal member
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push(']');
                }
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(']');
            }
            '.' if class_depth == 0 => out.push_str(rules.dot.unwrap_or(".")),
            '^' if class_depth == 0 => out.push_str(rules.line_start.unwrap_or("^")),
            '$' if class_depth == 0 => out.push_str(rules.line_end.unwrap_or("$")),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(pattern: &str) -> String {
        translate(pattern, false, false, EolMode::Lf, EngineOptions::empty()).text
    }

    #[test]
    fn test_plain_pattern_untouched() {
        assert_eq!(plain(r"fo+\d[a-z]$"), r"fo+\d[a-z]$");
    }

    #[test]
    fn test_whole_word_wraps_and_rewrites_dot() {
        let t = translate("a.c", true, false, EolMode::Lf, EngineOptions::empty());
        assert_eq!(t.text, r"\ba\wc\b");
        assert!(t.text.starts_with(WORD_BOUNDARY));
        assert!(t.text.ends_with(WORD_BOUNDARY));
    }

    #[test]
    fn test_word_start_only_prefixes() {
        let t = translate("ab.", false, true, EolMode::Lf, EngineOptions::empty());
        assert_eq!(t.text, r"\bab\w");
    }

    #[test]
    fn test_dot_in_class_or_escaped_is_kept() {
        let t = translate(r"[.]\.x.", true, false, EolMode::Lf, EngineOptions::empty());
        assert_eq!(t.text, r"\b[.]\.x\w\b");
    }

    #[test]
    fn test_word_shorthand() {
        assert_eq!(plain(r"\<foo\>"), format!("{WORD_BEGIN}foo{WORD_END}"));
    }

    #[test]
    fn test_escaped_word_shorthand_round_trips() {
        assert_eq!(plain(r"\\<"), r"\\<");
        assert_eq!(plain(r"\\>"), r"\\>");
        assert_eq!(plain(r"a\\<b\<c"), format!(r"a\\<b{WORD_BEGIN}c"));
    }

    #[test]
    fn test_cr_mode_rewrites_line_end() {
        let t = translate(r"a$|b\$|[$]", false, false, EolMode::Cr, EngineOptions::empty());
        assert_eq!(t.text, r"a(?=\r)|b\$|[$]");
        assert!(!t.options.contains(EngineOptions::NEWLINE_CRLF));
    }

    #[test]
    fn test_crlf_mode_sets_option_only() {
        let t = translate("a$", false, false, EolMode::CrLf, EngineOptions::empty());
        assert_eq!(t.text, "a$");
        assert!(t.options.contains(EngineOptions::NEWLINE_CRLF));
    }

    #[test]
    fn test_lf_mode_clears_crlf_option() {
        let t = translate("a", false, false, EolMode::Lf, EngineOptions::NEWLINE_CRLF);
        assert!(!t.options.contains(EngineOptions::NEWLINE_CRLF));
    }

    #[test]
    fn test_caller_options_preserved() {
        let base = EngineOptions::IGNORE_CASE | EngineOptions::NOT_BOL;
        let t = translate("a", false, false, EolMode::CrLf, base);
        assert!(t.options.contains(EngineOptions::IGNORE_CASE));
        assert!(t.options.contains(EngineOptions::NOT_BOL));
    }

    #[test]
    fn test_nested_and_negated_classes() {
        let rules = Rewrites {
            dot: Some("X"),
            line_end: Some("E"),
            ..Rewrites::default()
        };
        assert_eq!(rewrite(r"[^]$.][[:alpha:].]..$", &rules), r"[^]$.][[:alpha:].]XXE");
    }

    #[test]
    fn test_dangling_backslash_kept() {
        assert_eq!(plain("ab\\"), "ab\\");
    }
}
