// src/entities.rs
//
// Character-reference decoding for text chunks.
//
// - Named references: a small table of the ones that show up in real pages.
// - Numeric references: decimal (&#233;) and hex (&#xE9;).
// - Anything unknown or unterminated is copied through verbatim.

use memchr::memchr;
use std::borrow::Cow;

/// Longest reference body we try to resolve (`&` .. `;` exclusive).
const MAX_REF_LEN: usize = 10;

/// Decode character references in `text`.
///
/// Returns `Cow::Borrowed` when there is no `&` at all.
pub fn decode(text: &str) -> Cow<'_, str> {
    if memchr(b'&', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(decode_references(text))
}

fn decode_references(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0usize;

    while let Some(off) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + off;
        out.push_str(&text[pos..amp]);

        let window_end = (amp + 2 + MAX_REF_LEN).min(bytes.len());
        let resolved = memchr(b';', &bytes[amp + 1..window_end]).and_then(|semi| {
            let body = &text[amp + 1..amp + 1 + semi];
            resolve(body).map(|ch| (ch, amp + 1 + semi + 1))
        });

        match resolved {
            Some((ch, next)) => {
                out.push(ch);
                pos = next;
            }
            None => {
                out.push('&');
                pos = amp + 1;
            }
        }
    }
    out.push_str(&text[pos..]);
    out
}

fn resolve(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        // NUL and out-of-range map to the replacement character, like browsers do.
        return Some(match code {
            0 => '\u{FFFD}',
            c => char::from_u32(c).unwrap_or('\u{FFFD}'),
        });
    }
    named(body)
}

fn named(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{A0}',
        "copy" => '\u{A9}',
        "reg" => '\u{AE}',
        "trade" => '\u{2122}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '\u{AB}',
        "raquo" => '\u{BB}',
        "middot" => '\u{B7}',
        "bull" => '\u{2022}',
        "deg" => '\u{B0}',
        "euro" => '\u{20AC}',
        "pound" => '\u{A3}',
        "sect" => '\u{A7}',
        "times" => '\u{D7}',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through_borrowed() {
        assert!(matches!(decode("no references here"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode("Fish &amp; Chips"), "Fish & Chips");
        assert_eq!(decode("&lt;b&gt;"), "<b>");
        assert_eq!(decode("Hello&nbsp;World"), "Hello\u{A0}World");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode("caf&#233;"), "café");
        assert_eq!(decode("caf&#xE9;"), "café");
        assert_eq!(decode("&#0;"), "\u{FFFD}");
    }

    #[test]
    fn keeps_unknown_and_unterminated_references() {
        assert_eq!(decode("AT&T rocks"), "AT&T rocks");
        assert_eq!(decode("&bogus;"), "&bogus;");
        assert_eq!(decode("trailing &"), "trailing &");
        assert_eq!(decode("&amp"), "&amp");
    }
}
