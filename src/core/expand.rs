//! Replacement template expansion
//!
//! A raw template goes through [`expand`] once per substitution. Escapes are
//! resolved to literal characters, the legacy `\1`..`\9` group syntax is
//! rewritten to `$1`..`$9`, and an escaped backslash is kept doubled so the
//! token pass that follows still sees it as a literal.

/// Canonical group-reference marker
pub const BACKREF_MARKER: char = '$';

/// A template after escape resolution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpandedTemplate(String);

/// One piece of an expanded template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken<'a> {
    /// Copied verbatim
    Text(&'a str),
    /// Text of capture group `n` (0 = whole match)
    Group(u8),
}

/// Resolve escapes in a raw replacement template.
///
/// Supported: `\a \b \f \n \r \t \v`, `\\`, `\xH[H]`, `\uH[HHH]` and the
/// legacy `\1`..`\9`. Unknown escapes yield the bare character; a trailing
/// lone backslash is dropped.
pub fn expand(raw: &str) -> ExpandedTemplate {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            break;
        };
        match esc {
            '1'..='9' => {
                out.push(BACKREF_MARKER);
                out.push(esc);
            }
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0C'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0B'),
            '\\' => out.push_str("\\\\"),
            'x' | 'u' => {
                let max_digits = if esc == 'x' { 2 } else { 4 };
                let mut value = 0u32;
                let mut digits = 0;
                while digits < max_digits {
                    match chars.peek().and_then(|d| d.to_digit(16)) {
                        Some(hex) => {
                            value = value * 16 + hex;
                            chars.next();
                            digits += 1;
                        }
                        None => break,
                    }
                }
                if value == 0 {
                    // no digits, or a NUL: keep the letter
                    out.push(esc);
                } else {
                    out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            other => out.push(other),
        }
    }

    ExpandedTemplate(out)
}

impl ExpandedTemplate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Split into literal text and group references.
    ///
    /// `$d` and `\d` are both `Group(d)`; `\\` is one literal backslash.
    pub fn tokens(&self) -> TemplateTokens<'_> {
        TemplateTokens {
            template: &self.0,
            pos: 0,
        }
    }
}

/// Iterator returned by [`ExpandedTemplate::tokens`]
#[derive(Debug, Clone)]
pub struct TemplateTokens<'a> {
    template: &'a str,
    pos: usize,
}

fn is_marker(b: u8) -> bool {
    b == b'$' || b == b'\\'
}

impl<'a> Iterator for TemplateTokens<'a> {
    type Item = TemplateToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.template[self.pos..];
        let bytes = rest.as_bytes();
        let first = *bytes.first()?;

        if is_marker(first) {
            match bytes.get(1) {
                Some(d) if d.is_ascii_digit() => {
                    self.pos += 2;
                    return Some(TemplateToken::Group(d - b'0'));
                }
                Some(b'\\') if first == b'\\' => {
                    self.pos += 2;
                    return Some(TemplateToken::Text(&rest[..1]));
                }
                _ if first == b'\\' => {
                    self.pos += 1;
                    return Some(TemplateToken::Text(&rest[..1]));
                }
                // a `$` without a digit is plain text
                _ => {}
            }
        }

        // Markers are ASCII, so every cut lands on a char boundary.
        let end = bytes[1..]
            .iter()
            .position(|&b| is_marker(b))
            .map_or(bytes.len(), |i| i + 1);
        self.pos += end;
        Some(TemplateToken::Text(&rest[..end]))
    }
}
