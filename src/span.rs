// src/span.rs
//
// Span scoring and the exhaustive optimal-span search.
//
// A candidate span runs from the start of word run `i` through the end of word
// run `j` (i <= j). Its score is
//
//     tags before run i + tags after run j + words inside runs i..=j
//
// i.e. the markup it leaves out plus the text it keeps. Tags that fall inside
// the span are not charged for beyond what the outside terms lose. Every term
// is an O(1) table lookup, so the search over all (i, j) pairs is O(R²) in the
// number of runs. A document that alternates tag/word on every token makes
// R ≈ N.

use std::ops::Range;

use tracing::{debug, trace};

use crate::runs::{RunTable, TagTables};

/// Half-open token range `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Score of the span covering word runs `i..=j`.
///
/// Both `i` and `j` must be word runs with `i <= j`.
pub fn score(table: &RunTable, tags: &TagTables, i: usize, j: usize) -> usize {
    debug_assert!(i <= j && table.is_word_run(i) && table.is_word_run(j));
    let before = table.tokens_before();
    let up_to = tags.tags_up_to();

    let tags_up_to_i = up_to[i];
    let tags_from_j = tags.tags_from()[j];
    let text_tokens_to_i = before[i] - up_to[i];
    let text_tokens_to_j = before[j] - up_to[j];
    let words_in_j = table.runs()[j].unsigned_abs() as usize;
    let text_between = text_tokens_to_j + words_in_j - text_tokens_to_i;

    tags_up_to_i + tags_from_j + text_between
}

/// Best-scoring span at or after `body_start_index`, as a token range.
///
/// Pairs are visited with `i` ascending, then `j` ascending, and the best is
/// replaced only on a strictly higher score, so the first maximizer wins. If
/// nothing beats 0 the span runs from the body start to the end.
pub fn find_optimal_span(table: &RunTable, tags: &TagTables, body_start_index: usize) -> Span {
    if table.total_tokens() == 0 {
        return Span::EMPTY;
    }

    let n = table.len();
    let body_run = table.run_of_token(body_start_index);
    let mut score_max = 0usize;
    let (mut i_max, mut j_max) = (body_run, n - 1);

    for i in body_run..n {
        if !table.is_word_run(i) {
            continue;
        }
        for j in i..n {
            if !table.is_word_run(j) {
                continue;
            }
            let s = score(table, tags, i, j);
            if s > score_max {
                trace!(i, j, score = s, "span improved");
                score_max = s;
                i_max = i;
                j_max = j;
            }
        }
    }

    let before = table.tokens_before();
    let span = Span::new(before[i_max], before[j_max + 1]);
    debug!(
        runs = n,
        body_run,
        i = i_max,
        j = j_max,
        score = score_max,
        start = span.start,
        end = span.end,
        "optimal span"
    );
    span
}
