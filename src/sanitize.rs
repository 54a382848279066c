// src/sanitize.rs
//
// Pre-filter: drop the parts of a page that are never rendered as text.
//
// - head, script, style elements are removed together with their content.
// - Everything else is copied through byte-for-byte.
// - An unclosed head ends at </head>, at <body>, or at the first start tag of
//   an element that cannot live in head (the browser moves it into body).
// - Unclosed script/style swallow the rest of the document.
// - Comments are copied verbatim and never searched for tags.

use memchr::memchr;

use crate::scan::{find_raw_text_end, find_tag_end, is_raw_text, opens_tag, parse_tag_info};

fn is_unreadable(name: &str) -> bool {
    name.eq_ignore_ascii_case("head") || is_raw_text(name)
}

fn is_head_content(name: &str) -> bool {
    ["title", "meta", "link", "base", "script", "style", "noscript", "template"]
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// Index just past the `-->` of a comment starting at `i`, or the input length.
fn skip_comment(s: &[u8], i: usize) -> usize {
    memchr::memmem::find(&s[i + 4..], b"-->")
        .map(|p| i + 4 + p + 3)
        .unwrap_or(s.len())
}

/// Where the content of a `head` element opened before `from` stops.
/// The returned index is the first byte to keep.
fn find_head_end(html: &str, from: usize) -> usize {
    let s = html.as_bytes();
    let n = s.len();
    let mut i = from;

    while let Some(off) = memchr(b'<', &s[i..]) {
        let lt = i + off;
        if s[lt..].starts_with(b"<!--") {
            i = skip_comment(s, lt);
            continue;
        }
        if !opens_tag(s, lt) {
            i = lt + 1;
            continue;
        }
        let Some(gt) = find_tag_end(s, lt) else {
            return n;
        };
        let ti = parse_tag_info(&html[lt..=gt]);

        if ti.is_end {
            if ti.name.eq_ignore_ascii_case("head") {
                return gt + 1;
            }
        } else if !is_head_content(ti.name) {
            // <body> or stray body content: keep it
            return lt;
        } else if is_raw_text(ti.name) && !ti.self_closing {
            match find_raw_text_end(s, gt + 1, ti.name) {
                Some((_, next)) => {
                    i = next;
                    continue;
                }
                None => return n,
            }
        }
        i = gt + 1;
    }
    n
}

/// Remove `head`, `script` and `style` elements from `html`.
pub fn strip_unreadable(html: &str) -> String {
    let s = html.as_bytes();
    let n = s.len();
    let mut out = String::with_capacity(html.len());
    let mut copied_from = 0usize;
    let mut i = 0usize;

    while i < n {
        let Some(off) = memchr(b'<', &s[i..]) else {
            break;
        };
        let lt = i + off;

        if s[lt..].starts_with(b"<!--") {
            i = skip_comment(s, lt);
            continue;
        }
        if !opens_tag(s, lt) {
            i = lt + 1;
            continue;
        }
        let Some(gt) = find_tag_end(s, lt) else {
            break;
        };
        let ti = parse_tag_info(&html[lt..=gt]);

        if ti.is_end || !is_unreadable(ti.name) {
            i = gt + 1;
            continue;
        }

        out.push_str(&html[copied_from..lt]);
        let resume = if ti.self_closing {
            gt + 1
        } else if ti.name.eq_ignore_ascii_case("head") {
            find_head_end(html, gt + 1)
        } else {
            find_raw_text_end(s, gt + 1, ti.name)
                .map(|(_, next)| next)
                .unwrap_or(n)
        };
        copied_from = resume;
        i = resume;
    }

    out.push_str(&html[copied_from..]);
    out
}
