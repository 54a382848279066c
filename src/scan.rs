// src/scan.rs
//
// Tolerant HTML event source.
//
// Walks the markup once and reports start tags, end tags and text chunks to a
// `MarkupSink`, in document order:
//   - Tag names are reported ASCII-lowercased; attributes are skipped (quote-aware).
//   - `<x/>` is reported as start + end.
//   - Comments, declarations (`<!DOCTYPE>`, `<![CDATA[`) and PIs produce nothing.
//   - script/style bodies are one undecoded text chunk up to the matching end tag.
//   - Other text has character references decoded.
//   - A `<` that doesn't open a tag is text. Nothing here ever fails.

use memchr::{memchr, memmem};

use crate::entities;

/// Receiver of markup events.
pub trait MarkupSink {
    /// `<name ...>`
    fn start_tag(&mut self, name: &str);
    /// `</name>`
    fn end_tag(&mut self, name: &str);
    /// Character data between tags, references already decoded.
    fn text(&mut self, text: &str);
}

/* ============================ Utility predicates ========================= */

#[inline]
pub(crate) fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0C'
}

/// Elements whose content is raw text: no tags, no references.
pub(crate) fn is_raw_text(name: &str) -> bool {
    name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
}

/// Does `s[i..]` (with `s[i] == b'<'`) look like the start of a start or end tag?
#[inline]
pub(crate) fn opens_tag(s: &[u8], i: usize) -> bool {
    match s.get(i + 1) {
        Some(b'/') => s.get(i + 2).is_some_and(|b| b.is_ascii_alphabetic()),
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

/* =============================== Tag parsing ============================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TagInfo<'a> {
    pub(crate) name: &'a str,
    pub(crate) is_end: bool,
    pub(crate) self_closing: bool,
}

/// Find the '>' for a tag starting at `i` (s[i] == '<'), being quote-aware.
pub(crate) fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut quote: u8 = 0;
    while i < n {
        let b = s[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Extract tag name, end/self-closing flags from raw `<...>` text.
pub(crate) fn parse_tag_info(tag: &str) -> TagInfo<'_> {
    let bytes = tag.as_bytes();
    let n = bytes.len();
    let mut i = 1;

    let mut is_end = false;
    if i < n && bytes[i] == b'/' {
        is_end = true;
        i += 1;
    }
    let start = i;
    while i < n && is_name_char(bytes[i]) {
        i += 1;
    }
    let name = &tag[start..i];

    // self-closing? check before '>'
    let mut j = n - 1;
    while j > 0 && is_ws(bytes[j - 1]) {
        j -= 1;
    }
    let self_closing = !is_end && j >= 2 && bytes[j - 1] == b'/';

    TagInfo {
        name,
        is_end,
        self_closing,
    }
}

/// Locate the end tag `</name>` at or after `from`.
/// Returns (start_of_end_tag, index_after_end_tag).
pub(crate) fn find_raw_text_end(s: &[u8], from: usize, name: &str) -> Option<(usize, usize)> {
    let n = s.len();
    let mut j = from;
    while j < n {
        let pos = j + memchr(b'<', &s[j..])?;
        if pos + 2 + name.len() <= n
            && s[pos + 1] == b'/'
            && s[pos + 2..pos + 2 + name.len()].eq_ignore_ascii_case(name.as_bytes())
            && s.get(pos + 2 + name.len()).map_or(true, |&b| !is_name_char(b))
        {
            let end = find_tag_end(s, pos)?;
            return Some((pos, end + 1));
        }
        j = pos + 1;
    }
    None
}

/// Index just past the `-->` closing a comment that starts at `i`.
fn find_comment_end(s: &[u8], i: usize) -> Option<usize> {
    memmem::find(&s[i + 4..], b"-->").map(|p| i + 4 + p + 3)
}

/* ================================ Scanner ================================ */

fn flush<S: MarkupSink + ?Sized>(text: &mut String, sink: &mut S) {
    if !text.is_empty() {
        sink.text(text);
        text.clear();
    }
}

/// Report every event of `src` to `sink`.
pub fn scan<S: MarkupSink + ?Sized>(src: &str, sink: &mut S) {
    let s = src.as_bytes();
    let n = s.len();
    let mut i = 0usize;
    let mut text = String::new();

    while i < n {
        if s[i] != b'<' {
            let next_lt = memchr(b'<', &s[i..]).map(|off| i + off).unwrap_or(n);
            text.push_str(&entities::decode(&src[i..next_lt]));
            i = next_lt;
            continue;
        }

        // Comments
        if s[i..].starts_with(b"<!--") {
            flush(&mut text, &mut *sink);
            match find_comment_end(s, i) {
                Some(next) => i = next,
                None => return,
            }
            continue;
        }

        // Declarations and processing instructions
        if s[i..].starts_with(b"<!") || s[i..].starts_with(b"<?") {
            flush(&mut text, &mut *sink);
            match memchr(b'>', &s[i..]) {
                Some(off) => i += off + 1,
                None => return,
            }
            continue;
        }

        if !opens_tag(s, i) {
            // literal '<'
            text.push('<');
            i += 1;
            continue;
        }

        let Some(j) = find_tag_end(s, i) else {
            // Unterminated tag to EOF; treat literally
            text.push_str(&src[i..]);
            break;
        };
        flush(&mut text, &mut *sink);

        let ti = parse_tag_info(&src[i..=j]);
        let name = ti.name.to_ascii_lowercase();
        i = j + 1;

        if ti.is_end {
            sink.end_tag(&name);
            continue;
        }
        sink.start_tag(&name);
        if ti.self_closing {
            sink.end_tag(&name);
            continue;
        }

        if is_raw_text(&name) {
            match find_raw_text_end(s, i, &name) {
                Some((content_end, next)) => {
                    if content_end > i {
                        sink.text(&src[i..content_end]);
                    }
                    sink.end_tag(&name);
                    i = next;
                }
                None => {
                    sink.text(&src[i..]);
                    return;
                }
            }
        }
    }

    flush(&mut text, &mut *sink);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Ev {
        Start(String),
        End(String),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder(Vec<Ev>);

    impl MarkupSink for Recorder {
        fn start_tag(&mut self, name: &str) {
            self.0.push(Ev::Start(name.to_string()));
        }
        fn end_tag(&mut self, name: &str) {
            self.0.push(Ev::End(name.to_string()));
        }
        fn text(&mut self, text: &str) {
            self.0.push(Ev::Text(text.to_string()));
        }
    }

    fn events(src: &str) -> Vec<Ev> {
        let mut rec = Recorder::default();
        scan(src, &mut rec);
        rec.0
    }

    fn start(s: &str) -> Ev {
        Ev::Start(s.into())
    }
    fn end(s: &str) -> Ev {
        Ev::End(s.into())
    }
    fn text(s: &str) -> Ev {
        Ev::Text(s.into())
    }

    #[test]
    fn reports_tags_and_text_in_order() {
        assert_eq!(
            events("<P class=\"a>b\">Hi <B>there</B></p>"),
            vec![start("p"), text("Hi "), start("b"), text("there"), end("b"), end("p")]
        );
    }

    #[test]
    fn self_closing_tag_is_start_then_end() {
        assert_eq!(events("a<br/>b"), vec![text("a"), start("br"), end("br"), text("b")]);
        assert_eq!(events("<br>"), vec![start("br")]);
    }

    #[test]
    fn skips_comments_and_declarations() {
        assert_eq!(
            events("<!DOCTYPE html><!-- <p>no</p> --><?xml x?>one"),
            vec![text("one")]
        );
        assert_eq!(events("a<!-- never closed"), vec![text("a")]);
    }

    #[test]
    fn script_body_is_raw_text() {
        assert_eq!(
            events("<script>if (a < b && c) { x = '</p>'; }</SCRIPT>done"),
            vec![
                start("script"),
                text("if (a < b && c) { x = '</p>'; }"),
                end("script"),
                text("done"),
            ]
        );
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(events("1 < 2 and 3 > 2"), vec![text("1 < 2 and 3 > 2")]);
        assert_eq!(events("x <b"), vec![text("x <b")]);
    }

    #[test]
    fn decodes_references_in_text_only() {
        assert_eq!(
            events("<p>Tom &amp; Jerry</p>"),
            vec![start("p"), text("Tom & Jerry"), end("p")]
        );
        assert_eq!(
            events("<style>a::after{content:'&amp;'}</style>"),
            vec![start("style"), text("a::after{content:'&amp;'}"), end("style")]
        );
    }

    #[test]
    fn parses_tag_info() {
        let ti = parse_tag_info("<img src='x' />");
        assert_eq!(ti.name, "img");
        assert!(!ti.is_end);
        assert!(ti.self_closing);

        let ti = parse_tag_info("</div >");
        assert_eq!(ti.name, "div");
        assert!(ti.is_end);
        assert!(!ti.self_closing);
    }
}
