// src/render.rs
//
// Token stream → text.
//
// `render_span` is the cleaned rendering used for the main text: words joined
// by single spaces, one line per line-break marker, each line trimmed.
// `render_all` is a raw join of every word in the document, kept unnormalized.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::span::Span;
use crate::tokenizer::Token;

static MULTI_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ ]+").expect("MULTI_SPACES regex should compile"));

fn join_words(tokens: &[Token]) -> String {
    let words: Vec<&str> = tokens.iter().filter_map(Token::as_word).collect();
    words.join(" ")
}

/// Words of `tokens[span]`, whitespace-normalized line by line.
pub fn render_span(tokens: &[Token], span: Span) -> String {
    let end = span.end.min(tokens.len());
    let start = span.start.min(end);
    let text = join_words(&tokens[start..end]);
    let text = MULTI_SPACES.replace_all(&text, " ");
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Every word of the document, space-joined, no cleanup.
pub fn render_all(tokens: &[Token]) -> String {
    join_words(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TagKind;

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    fn tag(name: &str) -> Token {
        Token::Tag {
            kind: TagKind::Open,
            name: name.to_string(),
        }
    }

    #[test]
    fn skips_tags_and_joins_words() {
        let tokens = [tag("p"), word("Hello"), tag("b"), word("world"), tag("p")];
        assert_eq!(render_span(&tokens, Span::new(0, 5)), "Hello world");
        assert_eq!(render_span(&tokens, Span::new(2, 4)), "world");
    }

    #[test]
    fn splits_and_trims_lines() {
        let tokens = [word("one"), word("two"), tag("p"), word("\nthree"), word("\nfour")];
        assert_eq!(render_span(&tokens, Span::new(0, 5)), "one two\nthree\nfour");
    }

    #[test]
    fn leading_break_leaves_an_empty_first_line() {
        let tokens = [word("\nonly")];
        assert_eq!(render_span(&tokens, Span::new(0, 1)), "\nonly");
    }

    #[test]
    fn full_text_is_a_raw_join() {
        let tokens = [word("one"), tag("p"), word("\ntwo"), word("three")];
        assert_eq!(render_all(&tokens), "one \ntwo three");
    }

    #[test]
    fn empty_span_renders_nothing() {
        assert_eq!(render_span(&[word("x")], Span::EMPTY), "");
        assert_eq!(render_all(&[]), "");
    }
}
