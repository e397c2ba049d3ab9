use std::fmt::Display;

use tracing::{debug, trace};

use crate::{Dfa, Map, MinimalRepresentatives, StateIndex, Symbol, TransitionSystem};

/// Number of words [`Dfa::enumerate_with`] collects unless configured otherwise.
pub const DEFAULT_LIMIT: usize = 10;
/// Length up to which words are explored unless configured otherwise.
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Bounds for an enumeration: at most `limit` words are collected, and no word longer than
/// `max_length` is considered.
///
/// ```
/// use dfa_sim::EnumerationConfig;
///
/// let config = EnumerationConfig::default().with_limit(5).with_max_length(8);
/// assert_eq!((config.limit(), config.max_length()), (5, 8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumerationConfig {
    limit: usize,
    max_length: usize,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl EnumerationConfig {
    /// Creates a configuration that collects `limit` words with the default length bound.
    pub fn new(limit: usize) -> Self {
        Self::default().with_limit(limit)
    }

    /// Sets the number of words to collect.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the maximal length of explored words.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// The number of words to collect.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The maximal length of explored words.
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

/// Attached to an [`EnumerationResult`] that holds fewer words than requested, because the search
/// ran out of words up to the length bound (or the language has no further words at all).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LimitNotReached {
    requested: usize,
    found: usize,
    max_length: usize,
}

impl LimitNotReached {
    /// How many words were requested.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// How many words were found.
    pub fn found(&self) -> usize {
        self.found
    }

    /// The length bound of the search.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Distinguishes finding nothing at all from finding fewer words than requested.
    pub fn found_none(&self) -> bool {
        self.found == 0
    }
}

impl Display for LimitNotReached {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.found_none() {
            write!(
                f,
                "no accepted word of length at most {} exists",
                self.max_length
            )
        } else {
            write!(
                f,
                "found only {} of {} requested words of length at most {}",
                self.found, self.requested, self.max_length
            )
        }
    }
}

/// The words found by an enumeration, ordered by length first and by the declaration order of
/// the alphabet second. Finding fewer words than requested is not an error, it is flagged through
/// [`EnumerationResult::limit_not_reached`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationResult {
    words: Vec<String>,
    limit_not_reached: Option<LimitNotReached>,
}

impl EnumerationResult {
    /// The accepted words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Consumes `self` and returns the accepted words.
    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    /// Returns the number of words found.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no word was found.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Is `Some` if fewer words than requested were found.
    pub fn limit_not_reached(&self) -> Option<&LimitNotReached> {
        self.limit_not_reached.as_ref()
    }

    /// Returns true if as many words as requested were found.
    pub fn is_complete(&self) -> bool {
        self.limit_not_reached.is_none()
    }
}

/// Iterator over the words accepted by a [`TransitionSystem`] in length-lexicographic order, where
/// symbols are ordered as they are declared in the alphabet. Words longer than `max_length` are
/// never produced.
///
/// The words of one length are produced by a depth-first search that only follows a symbol if some
/// accepting state can be reached in exactly the number of steps that remain. For this we maintain
/// a table whose `k`-th row marks the states from which a word of length `k` is accepted. A row
/// only depends on the previous one, so once a row repeats the rows are periodic and if the initial
/// state is not marked in any row of the period, no longer word can be accepted.
///
/// The order is exactly that of a breadth-first search over all words which extends each word by
/// the symbols in declaration order and keeps the accepted ones; the pruning only skips subtrees
/// that contain no accepted word of the current length.
#[derive(Clone, Debug)]
pub struct AcceptedWords<TS> {
    ts: TS,
    max_length: usize,
    length: usize,
    level_open: bool,
    live: Vec<Vec<bool>>,
    seen_rows: Map<Vec<bool>, usize>,
    stack: Vec<(StateIndex, usize)>,
    word: Vec<Symbol>,
    exhausted: bool,
}

impl<TS: TransitionSystem> AcceptedWords<TS> {
    /// Prepares the enumeration, nothing is explored before the first call to `next`.
    pub fn new(ts: TS, max_length: usize) -> Self {
        let exhausted = !MinimalRepresentatives::new(&ts).any(|(_, q)| ts.state_color(q));
        if exhausted {
            debug!("no accepting state is reachable, the language is empty");
        }
        Self {
            ts,
            max_length,
            length: 0,
            level_open: false,
            live: vec![],
            seen_rows: Map::default(),
            stack: vec![],
            word: vec![],
            exhausted,
        }
    }

    fn is_live(&self, state: StateIndex, length: usize) -> bool {
        self.live[length][state]
    }

    /// Computes the next row of the table and returns true if it repeats an earlier row such that
    /// the initial state is not marked in any row from that earlier one on.
    fn push_row(&mut self) -> bool {
        let row: Vec<bool> = match self.live.last() {
            None => self
                .ts
                .state_indices()
                .map(|q| self.ts.state_color(q))
                .collect(),
            Some(previous) => self
                .ts
                .state_indices()
                .map(|q| {
                    (0..self.ts.alphabet().size()).any(|a| previous[self.ts.successor(q, a)])
                })
                .collect(),
        };
        let k = self.live.len();
        let repeated = match self.seen_rows.get(&row) {
            Some(&j) => {
                trace!("row {k} repeats row {j}");
                !self.live[j..].iter().any(|r| r[self.ts.initial()])
            }
            None => {
                self.seen_rows.insert(row.clone(), k);
                false
            }
        };
        self.live.push(row);
        repeated
    }

    /// Moves on to the next length, returns false if there is nothing left to explore.
    fn open_level(&mut self) -> bool {
        if self.level_open {
            self.length += 1;
        }
        self.level_open = true;
        if self.length > self.max_length {
            debug!("reached the maximal length {}", self.max_length);
            return false;
        }
        if self.push_row() {
            debug!("no word of length {} or more is accepted", self.length);
            return false;
        }
        if self.is_live(self.ts.initial(), self.length) {
            trace!("exploring words of length {}", self.length);
            self.stack.push((self.ts.initial(), 0));
        } else {
            trace!("no word of length {} is accepted", self.length);
        }
        true
    }
}

impl<TS: TransitionSystem> Iterator for AcceptedWords<TS> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let Some(&(q, next)) = self.stack.last() else {
                if !self.open_level() {
                    self.exhausted = true;
                }
                continue;
            };
            let remaining = self.length - self.word.len();
            if remaining == 0 {
                let word = self.word.iter().collect();
                self.stack.pop();
                self.word.pop();
                return Some(word);
            }

            let found = (next..self.ts.alphabet().size())
                .find(|&a| self.is_live(self.ts.successor(q, a), remaining - 1));
            match found {
                Some(a) => {
                    if let Some(frame) = self.stack.last_mut() {
                        frame.1 = a + 1;
                    }
                    let p = self.ts.successor(q, a);
                    if let Some(symbol) = self.ts.alphabet().symbol(a) {
                        self.word.push(symbol);
                    }
                    self.stack.push((p, 0));
                }
                None => {
                    self.stack.pop();
                    self.word.pop();
                }
            }
        }
        None
    }
}

impl Dfa {
    /// Returns an iterator over all accepted words of length at most `max_length`, see
    /// [`AcceptedWords`].
    pub fn accepted_words(&self, max_length: usize) -> AcceptedWords<&Self> {
        AcceptedWords::new(self, max_length)
    }

    /// Collects the first `limit` accepted words in length-lexicographic order, exploring words up
    /// to the default length bound [`DEFAULT_MAX_LENGTH`].
    ///
    /// ```
    /// use dfa_sim::library;
    ///
    /// let dfa = library::load("ends in 01").unwrap();
    /// assert_eq!(dfa.enumerate(4).words(), ["01", "001", "101", "0001"]);
    /// ```
    pub fn enumerate(&self, limit: usize) -> EnumerationResult {
        self.enumerate_with(EnumerationConfig::new(limit))
    }

    /// Collects accepted words within the bounds given by `config`.
    pub fn enumerate_with(&self, config: EnumerationConfig) -> EnumerationResult {
        let words: Vec<String> = self
            .accepted_words(config.max_length)
            .take(config.limit)
            .collect();
        let limit_not_reached = (words.len() < config.limit).then(|| LimitNotReached {
            requested: config.limit,
            found: words.len(),
            max_length: config.max_length,
        });
        if let Some(missing) = &limit_not_reached {
            debug!("{missing}");
        }
        EnumerationResult {
            words,
            limit_not_reached,
        }
    }
}
