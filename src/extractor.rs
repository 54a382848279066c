// src/extractor.rs
//
// One extraction session.
//
// `Extractor` is the feeding side: it only accepts input. `close` consumes it
// and runs the whole pipeline once, producing an `Extraction` that only
// answers queries. Feeding after close, or querying before it, does not
// compile.

use tracing::debug;

use crate::render::{render_all, render_span};
use crate::runs::{RunTable, TagTables};
use crate::sanitize::strip_unreadable;
use crate::scan::scan;
use crate::span::{find_optimal_span, Span};
use crate::tokenizer::{Token, TokenStream, Tokenizer};
use crate::Config;

/// Collects a document, possibly in pieces.
#[derive(Debug, Default)]
pub struct Extractor {
    config: Config,
    buffer: String,
}

impl Extractor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            buffer: String::new(),
        }
    }

    /// Append the next piece of the document. Pieces may split tags.
    pub fn feed(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }

    /// Finish input and tokenize the document.
    pub fn close(self) -> Extraction {
        let html = if self.config.strip_unreadable {
            strip_unreadable(&self.buffer)
        } else {
            self.buffer
        };

        let mut tokenizer = Tokenizer::new(self.config.line_breaks);
        scan(&html, &mut tokenizer);
        let stream = tokenizer.finish();

        let runs = RunTable::encode(stream.classification());
        let tags = TagTables::build(&runs);
        debug!(
            bytes = html.len(),
            tokens = stream.len(),
            tags = tags.total_tags(),
            runs = runs.len(),
            body_start = stream.body_start_index(),
            "document closed"
        );

        Extraction {
            stream,
            runs,
            tags,
            span: None,
        }
    }
}

/// A closed, tokenized document.
#[derive(Clone, Debug)]
pub struct Extraction {
    stream: TokenStream,
    runs: RunTable,
    tags: TagTables,
    span: Option<Span>,
}

impl Extraction {
    pub fn tokens(&self) -> &[Token] {
        self.stream.tokens()
    }

    pub fn classification(&self) -> &[i8] {
        self.stream.classification()
    }

    pub fn body_start_index(&self) -> usize {
        self.stream.body_start_index()
    }

    pub fn runs(&self) -> &RunTable {
        &self.runs
    }

    pub fn tables(&self) -> &TagTables {
        &self.tags
    }

    /// The main-text span, searched for on the first call and cached.
    pub fn optimal_span(&mut self) -> Span {
        if let Some(span) = self.span {
            return span;
        }
        let span = find_optimal_span(&self.runs, &self.tags, self.stream.body_start_index());
        self.span = Some(span);
        span
    }

    /// The main text of the document.
    pub fn body_text(&mut self) -> String {
        let span = self.optimal_span();
        render_span(self.stream.tokens(), span)
    }

    /// Every word of the document, unfiltered and uncleaned.
    pub fn full_text(&self) -> String {
        render_all(self.stream.tokens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(html: &str) -> Extraction {
        let mut extractor = Extractor::new(Config::default());
        extractor.feed(html);
        extractor.close()
    }

    #[test]
    fn chunk_boundaries_do_not_matter() {
        let html = "<html><body><div>menu</div><p>The quick brown fox jumps</p></body></html>";
        let mut whole = closed(html);

        let mut extractor = Extractor::new(Config::default());
        for piece in ["<html><bo", "dy><div>me", "nu</div><p>The qu", "ick brown fox jumps</p></body></html>"] {
            extractor.feed(piece);
        }
        let mut pieces = extractor.close();

        assert_eq!(whole.tokens(), pieces.tokens());
        assert_eq!(whole.body_text(), pieces.body_text());
    }

    #[test]
    fn span_is_cached_after_first_search() {
        let mut extraction = closed("<p>one two three</p>");
        assert_eq!(extraction.span, None);
        let span = extraction.optimal_span();
        assert_eq!(extraction.span, Some(span));
        assert_eq!(extraction.optimal_span(), span);
    }

    #[test]
    fn parallel_sequences_stay_aligned() {
        let extraction = closed("<ul><li>a b</li><li>c</li></ul> tail");
        assert_eq!(extraction.tokens().len(), extraction.classification().len());
        assert_eq!(extraction.runs().total_tokens(), extraction.tokens().len());
    }

    #[test]
    fn sanitizer_can_be_turned_off() {
        let html = "<p>a b</p><script>var x;</script>";

        let mut extractor = Extractor::new(Config::default().with_strip_unreadable(false));
        extractor.feed(html);
        assert_eq!(extractor.close().full_text(), "a b var x;");

        assert_eq!(closed(html).full_text(), "a b");
    }
}
