//! Turning incoming entry content into an editable-root fragment.

use std::sync::LazyLock;

use regex::Regex;

use super::inline::{entity_len, escape_char};

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(p|br|div|span|strong|em|mark|input)")
        .unwrap_or_else(|err| panic!("markup pattern: {err}"))
});

/// Content handed to the surface by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentInput {
    PlainText(String),
    Html(String),
}

impl ContentInput {
    /// Apply the markup heuristic: anything mentioning a recognized block or
    /// inline tag passes through as markup, everything else is normalized as
    /// text that may already carry character references.
    pub fn detect(raw: impl Into<String>) -> Self {
        Self::Html(normalize(&raw.into()))
    }

    pub fn into_html(self) -> String {
        match self {
            Self::PlainText(text) => plain_text_to_html(&text),
            Self::Html(html) => html,
        }
    }
}

pub fn looks_like_markup(content: &str) -> bool {
    MARKUP_TAG.is_match(content)
}

/// Normalize a raw content string, guessing whether it is markup.
///
/// Text that is not markup is escaped, except that an `&` already starting a
/// character reference is left alone so normalizing twice changes nothing.
pub fn normalize(content: &str) -> String {
    if looks_like_markup(content) {
        return content.to_string();
    }
    join_lines(content, |line| escape_line(line, true))
}

/// Escape known plain text and join its lines with explicit breaks. Every
/// `&` is escaped, so the decoded text is exactly `text`.
pub fn plain_text_to_html(text: &str) -> String {
    join_lines(text, |line| escape_line(line, false))
}

fn join_lines(text: &str, escape: impl Fn(&str) -> String) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                "<br />".to_string()
            } else {
                escape(line)
            }
        })
        .collect::<Vec<_>>()
        .join("<br />")
}

fn escape_line(line: &str, keep_references: bool) -> String {
    let mut out = String::with_capacity(line.len());
    for (idx, c) in line.char_indices() {
        if c == '&' && keep_references && entity_len(&line[idx..]).is_some() {
            out.push('&');
        } else {
            out.push_str(&escape_char(c));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InlineContent;
    use proptest::prelude::*;

    #[test]
    fn test_plain_text_lines_join_with_breaks() {
        assert_eq!(normalize("Hello\nworld"), "Hello<br />world");
    }

    #[test]
    fn test_empty_input_yields_empty_surface() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_empty_lines_become_breaks() {
        assert_eq!(normalize("a\n\nb"), "a<br /><br /><br />b");
    }

    #[test]
    fn test_markup_passes_through_unchanged() {
        let html = "<p>Already <strong>formatted</strong> &amp; escaped</p>";
        assert_eq!(normalize(html), html);
    }

    #[test]
    fn test_markup_detection_is_case_insensitive() {
        assert!(looks_like_markup("<P>shout</P>"));
        assert!(!looks_like_markup("a <b> tag is not one of ours"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        assert_eq!(normalize("1 < 2 & 3 > 0"), "1 &lt; 2 &amp; 3 &gt; 0");
    }

    #[test]
    fn test_crlf_counts_as_one_break() {
        assert_eq!(normalize("a\r\nb"), "a<br />b");
    }

    #[test]
    fn test_explicit_plain_text_skips_detection() {
        let input = ContentInput::PlainText("<p>".to_string());
        assert_eq!(input.into_html(), "&lt;p&gt;");
    }

    #[test]
    fn test_explicit_plain_text_escapes_every_ampersand() {
        let html = ContentInput::PlainText("AT&amp;T".to_string()).into_html();
        assert_eq!(html, "AT&amp;amp;T");
        assert_eq!(InlineContent::parse(&html).text(), "AT&amp;T");
    }

    #[test]
    fn test_heuristic_keeps_existing_references() {
        assert_eq!(normalize("AT&amp;T"), "AT&amp;T");
        assert_eq!(
            ContentInput::detect("AT&amp;T"),
            ContentInput::Html("AT&amp;T".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_plain_text_decodes_to_itself(text in "[a-zA-Z0-9 &<>;#]{0,40}") {
            let html = plain_text_to_html(&text);
            prop_assert_eq!(InlineContent::parse(&html).text(), text);
        }

        #[test]
        fn prop_normalize_is_idempotent(text in "[a-zA-Z0-9 &<>;#\n]{0,40}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
        }
    }
}
