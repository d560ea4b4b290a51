//! Fuzzy subsequence search over symbol keys
//!
//! A candidate matches when every character of the query appears in its key,
//! in order and ignoring case. Matches are ranked by the smallest window of
//! the key that still contains the whole query.

/// When candidates are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Score and sort everything before [`finder`] returns
    Eager,
    /// Defer all scoring until the first result is requested
    Lazy,
}

/// Quality of one match, lower is better.
///
/// Field order is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchScore {
    /// Window length; equals the query length for a contiguous match
    pub span: usize,
    /// Window start
    pub start: usize,
    /// Key length in characters
    pub len: usize,
}

/// Score `key` against `query`, or `None` if the query is not a subsequence
pub fn score(query: &str, key: &str) -> Option<MatchScore> {
    let query: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    score_chars(&query, key)
}

fn score_chars(query: &[char], key: &str) -> Option<MatchScore> {
    let hay: Vec<char> = key.chars().flat_map(char::to_lowercase).collect();

    let Some(&first) = query.first() else {
        return Some(MatchScore {
            span: 0,
            start: 0,
            len: hay.len(),
        });
    };

    // (span, start) of the smallest window seen so far
    let mut best: Option<(usize, usize)> = None;

    for start in 0..hay.len() {
        if hay[start] != first {
            continue;
        }

        let mut matched = 1;
        let mut end = start;
        for (pos, &c) in hay.iter().enumerate().skip(start + 1) {
            if matched == query.len() {
                break;
            }
            if c == query[matched] {
                matched += 1;
                end = pos;
            }
        }

        // A later start cannot complete a query this one could not.
        if matched < query.len() {
            break;
        }

        let span = end - start + 1;
        if best.is_none_or(|(best_span, _)| span < best_span) {
            best = Some((span, start));
        }
        if span == query.len() {
            break;
        }
    }

    best.map(|(span, start)| MatchScore {
        span,
        start,
        len: hay.len(),
    })
}

/// Rank `candidates` against `query`, best first.
///
/// `key` picks the string each candidate is matched on. Candidates that do
/// not match are dropped; equal scores keep their input order.
pub fn finder<T, I, F>(query: &str, candidates: I, key: F, mode: Evaluation) -> Ranked<T, F>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let mut ranked = Ranked {
        pending: Some(Pending {
            query: query.chars().flat_map(char::to_lowercase).collect(),
            candidates: candidates.into_iter().collect(),
            key,
        }),
        ranked: Vec::new().into_iter(),
    };

    if mode == Evaluation::Eager {
        ranked.evaluate();
    }
    ranked
}

struct Pending<T, F> {
    query: Vec<char>,
    candidates: Vec<T>,
    key: F,
}

/// Ranked matches produced by [`finder`]
pub struct Ranked<T, F> {
    pending: Option<Pending<T, F>>,
    ranked: std::vec::IntoIter<T>,
}

impl<T, F> Ranked<T, F>
where
    F: Fn(&T) -> &str,
{
    fn evaluate(&mut self) {
        let Some(Pending {
            query,
            candidates,
            key,
        }) = self.pending.take()
        else {
            return;
        };

        let mut scored: Vec<(MatchScore, T)> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let score = score_chars(&query, key(&candidate))?;
                Some((score, candidate))
            })
            .collect();

        // Stable, so ties stay in input order.
        scored.sort_by_key(|(score, _)| *score);

        self.ranked = scored
            .into_iter()
            .map(|(_, candidate)| candidate)
            .collect::<Vec<_>>()
            .into_iter();
    }
}

impl<T, F> Iterator for Ranked<T, F>
where
    F: Fn(&T) -> &str,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.evaluate();
        self.ranked.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            Some(pending) => (0, Some(pending.candidates.len())),
            None => self.ranked.size_hint(),
        }
    }
}
