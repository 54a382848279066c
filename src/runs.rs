// src/runs.rs
//
// Run-length encoding of the +1/-1 classification sequence, and the two
// cumulative tag-count tables built on top of it.
//
//   classification  +1 +1 -1 -1 -1 +1 -1
//   runs              2    -3      1  -1
//   tokens_before   0  2    5      6   7
//   tags_up_to        0    2      2   3
//   tags_from         3    1      1   0
//
// Signs of adjacent runs always alternate. An empty document encodes to the
// single zero run `[0]`.

/// Alternating signed run lengths plus the token count preceding each run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunTable {
    runs: Vec<i64>,
    /// `len(runs) + 1` entries; `[k]..[k + 1]` is the token range of run `k`.
    tokens_before: Vec<usize>,
}

impl RunTable {
    /// Encode `classes` in one forward pass.
    pub fn encode(classes: &[i8]) -> Self {
        let mut runs: Vec<i64> = vec![0];
        let mut counts: Vec<usize> = vec![0];
        let mut k = 0usize;

        for &c in classes {
            let v = i64::from(c);
            // a value that shrinks the current run starts the next one
            if (runs[k] + v).abs() < runs[k].abs() {
                runs.push(0);
                counts.push(counts[k]);
                k += 1;
            }
            runs[k] += v;
            counts[k] += 1;
        }

        // shift up one: tokens_before[k] counts the tokens of runs 0..k
        counts.insert(0, 0);

        Self {
            runs,
            tokens_before: counts,
        }
    }

    pub fn runs(&self) -> &[i64] {
        &self.runs
    }

    pub fn tokens_before(&self) -> &[usize] {
        &self.tokens_before
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn is_word_run(&self, k: usize) -> bool {
        self.runs[k] <= 0
    }

    pub fn total_tokens(&self) -> usize {
        self.tokens_before[self.runs.len()]
    }

    /// Run that contains token `token`; tokens at or past the end map to the last run.
    pub fn run_of_token(&self, token: usize) -> usize {
        // tokens_before[0] == 0, so at least one entry qualifies
        let after = self.tokens_before[..self.runs.len()].partition_point(|&t| t <= token);
        after.saturating_sub(1)
    }
}

/// `tags_up_to[k]`: tags in runs `0..k`. `tags_from[k]`: tags in runs `k..`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagTables {
    tags_up_to: Vec<usize>,
    tags_from: Vec<usize>,
}

impl TagTables {
    pub fn build(table: &RunTable) -> Self {
        let runs = table.runs();
        let tag_len = |r: i64| if r > 0 { r as usize } else { 0 };

        let mut tags_up_to = Vec::with_capacity(runs.len());
        let mut t = 0usize;
        for &r in runs {
            tags_up_to.push(t);
            t += tag_len(r);
        }

        let mut tags_from = vec![0usize; runs.len()];
        let mut t = 0usize;
        for (k, &r) in runs.iter().enumerate().rev() {
            t += tag_len(r);
            tags_from[k] = t;
        }

        Self {
            tags_up_to,
            tags_from,
        }
    }

    pub fn tags_up_to(&self) -> &[usize] {
        &self.tags_up_to
    }

    pub fn tags_from(&self) -> &[usize] {
        &self.tags_from
    }

    pub fn total_tags(&self) -> usize {
        self.tags_from.first().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_alternating_runs() {
        let table = RunTable::encode(&[1, 1, -1, -1, -1, 1, -1]);
        assert_eq!(table.runs(), [2, -3, 1, -1]);
        assert_eq!(table.tokens_before(), [0, 2, 5, 6, 7]);
        assert_eq!(table.total_tokens(), 7);
    }

    #[test]
    fn leading_words_form_the_first_run() {
        let table = RunTable::encode(&[-1, -1, 1]);
        assert_eq!(table.runs(), [-2, 1]);
        assert_eq!(table.tokens_before(), [0, 2, 3]);
    }

    #[test]
    fn empty_input_is_the_zero_sentinel() {
        let table = RunTable::encode(&[]);
        assert_eq!(table.runs(), [0]);
        assert_eq!(table.tokens_before(), [0, 0]);
        assert!(table.is_word_run(0));
        assert_eq!(TagTables::build(&table).total_tags(), 0);
    }

    #[test]
    fn builds_prefix_and_suffix_tag_counts() {
        let table = RunTable::encode(&[1, 1, -1, -1, -1, 1, -1]);
        let tables = TagTables::build(&table);
        assert_eq!(tables.tags_up_to(), [0, 2, 2, 3]);
        assert_eq!(tables.tags_from(), [3, 1, 1, 0]);
        assert_eq!(tables.total_tags(), 3);
    }

    #[test]
    fn maps_tokens_to_runs() {
        let table = RunTable::encode(&[1, 1, -1, -1, -1, 1, -1]);
        let runs: Vec<_> = (0..9).map(|t| table.run_of_token(t)).collect();
        assert_eq!(runs, [0, 0, 1, 1, 1, 2, 3, 3, 3]);
    }
}
