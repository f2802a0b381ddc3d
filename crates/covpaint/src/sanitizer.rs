//! Trusted Markup Sanitizer
//!
//! Source lines are embedded into the report as raw markup, so every line
//! goes through a [`Sanitizer`] first. The printer only depends on the trait;
//! which sanitizer runs is decided by whoever builds the printer.
//!
//! The input a sanitizer sees has already been whitespace-normalized, which
//! means it contains `&nbsp;` references that must survive unchanged.

/// Turns normalized source text into markup that is safe to embed verbatim
pub trait Sanitizer: Send + Sync {
    /// Render `text` as safe markup
    fn render(&self, text: &str) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, text: &str) -> String {
        self(text)
    }
}

/// Longest character reference body (without `&` and `;`) that is kept
const MAX_REFERENCE_LEN: usize = 32;

/// Default sanitizer: escapes markup, keeps character references.
///
/// `<`, `>`, `"` and `'` are always escaped. An `&` is kept only when it
/// starts a well-formed named (`&nbsp;`), decimal (`&#160;`) or hexadecimal
/// (`&#xA0;`) reference; every other `&` becomes `&amp;`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupSanitizer;

impl MarkupSanitizer {
    /// Create a new sanitizer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Sanitizer for MarkupSanitizer {
    fn render(&self, text: &str) -> String {
        let mut markup = String::with_capacity(text.len() + text.len() / 4);
        for (index, ch) in text.char_indices() {
            match ch {
                '<' => markup.push_str("&lt;"),
                '>' => markup.push_str("&gt;"),
                '"' => markup.push_str("&quot;"),
                '\'' => markup.push_str("&#39;"),
                '&' if starts_with_reference(&text[index + 1..]) => markup.push('&'),
                '&' => markup.push_str("&amp;"),
                _ => markup.push(ch),
            }
        }
        markup
    }
}

/// Sanitizer that returns its input unchanged.
///
/// Only for input that is already trusted markup, and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Check whether `rest` (the text after an `&`) begins with `name;`,
/// `#digits;` or `#xhex;`
fn starts_with_reference(rest: &str) -> bool {
    let Some(end) = rest
        .bytes()
        .take(MAX_REFERENCE_LEN + 1)
        .position(|b| b == b';')
    else {
        return false;
    };
    let body = &rest[..end];

    if let Some(number) = body.strip_prefix('#') {
        return match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) => !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()),
        };
    }

    let mut bytes = body.bytes();
    matches!(bytes.next(), Some(first) if first.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric())
}
