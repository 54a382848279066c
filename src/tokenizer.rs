// src/tokenizer.rs
//
// Markup events → token stream.
//
// Every start/end tag becomes one tag token (+1), every whitespace-separated
// piece of text becomes one word token (-1). The two sequences grow in lock
// step and are never reordered.

use std::fmt;

use crate::scan::MarkupSink;

/// Classification value of a tag token.
pub const TAG_TOKEN: i8 = 1;
/// Classification value of a word token.
pub const WORD_TOKEN: i8 = -1;

/* =============================== Core sets =============================== */

/// Elements whose end starts a new line in the rendered text.
pub const LINE_BREAK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "canvas", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "noscript", "ol", "output", "p", "pre", "section", "table", "tfoot",
    "ul", "video", "br",
];

fn is_line_break(name: &str) -> bool {
    LINE_BREAK_ELEMENTS.iter().any(|e| name.eq_ignore_ascii_case(e))
}

/// Line-break elements that never get an end tag.
fn is_void_line_break(name: &str) -> bool {
    name.eq_ignore_ascii_case("br") || name.eq_ignore_ascii_case("hr")
}

/* ================================= Tokens ================================ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Tag { kind: TagKind, name: String },
    /// One whitespace-delimited unit; may carry a leading `\n` from the
    /// line-break policy.
    Word(String),
}

impl Token {
    pub fn is_tag(&self) -> bool {
        matches!(self, Token::Tag { .. })
    }

    /// `TAG_TOKEN` or `WORD_TOKEN`.
    pub fn class(&self) -> i8 {
        if self.is_tag() {
            TAG_TOKEN
        } else {
            WORD_TOKEN
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            Token::Tag { .. } => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Tag { kind: TagKind::Open, name } => write!(f, "<{name}>"),
            Token::Tag { kind: TagKind::Close, name } => write!(f, "</{name}>"),
            Token::Word(w) => f.write_str(w),
        }
    }
}

/* =============================== Tokenizer =============================== */

/// Accumulates tokens for one document. Feed it events through
/// [`MarkupSink`], then call [`Tokenizer::finish`].
#[derive(Debug, Default)]
pub struct Tokenizer {
    tokens: Vec<Token>,
    classes: Vec<i8>,
    body_start: Option<usize>,
    line_breaks: bool,
    break_next: bool,
}

impl Tokenizer {
    pub fn new(line_breaks: bool) -> Self {
        Self {
            line_breaks,
            ..Self::default()
        }
    }

    fn push(&mut self, token: Token) {
        self.classes.push(token.class());
        self.tokens.push(token);
    }

    pub fn finish(self) -> TokenStream {
        debug_assert_eq!(self.tokens.len(), self.classes.len());
        TokenStream {
            tokens: self.tokens,
            classes: self.classes,
            body_start_index: self.body_start.unwrap_or(0),
        }
    }
}

impl MarkupSink for Tokenizer {
    fn start_tag(&mut self, name: &str) {
        self.push(Token::Tag {
            kind: TagKind::Open,
            name: name.to_string(),
        });
        if self.body_start.is_none() && name == "body" {
            self.body_start = Some(self.tokens.len());
        }
        if self.line_breaks && is_void_line_break(name) {
            self.break_next = true;
        }
    }

    fn end_tag(&mut self, name: &str) {
        self.push(Token::Tag {
            kind: TagKind::Close,
            name: name.to_string(),
        });
        if self.line_breaks && is_line_break(name) {
            self.break_next = true;
        }
    }

    fn text(&mut self, text: &str) {
        for (n, word) in text.split_whitespace().enumerate() {
            let word = if n == 0 && self.break_next {
                self.break_next = false;
                format!("\n{word}")
            } else {
                word.to_string()
            };
            self.push(Token::Word(word));
        }
    }
}

/* ============================== Token stream ============================= */

/// Finished tokenization of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    classes: Vec<i8>,
    body_start_index: usize,
}

impl TokenStream {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// +1/-1 per token, parallel to [`TokenStream::tokens`].
    pub fn classification(&self) -> &[i8] {
        &self.classes
    }

    /// Index of the token right after the first `<body>`, or 0.
    pub fn body_start_index(&self) -> usize {
        self.body_start_index
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tag_count(&self) -> usize {
        self.classes.iter().filter(|&&c| c == TAG_TOKEN).count()
    }
}
