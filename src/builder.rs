use std::fmt::Display;

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{Alphabet, Dfa, Map, StateIndex, Symbol};

/// A single row of a transition table as it was entered, consisting of the source state, the
/// symbol and the target state. Nothing about the cells is known to be valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawTransition {
    /// Label of the source state.
    pub from: String,
    /// The symbol, which should consist of a single character.
    pub symbol: String,
    /// Label of the target state.
    pub to: String,
}

impl<P: Into<String>, A: Into<String>, Q: Into<String>> From<(P, A, Q)> for RawTransition {
    fn from((from, symbol, to): (P, A, Q)) -> Self {
        Self {
            from: from.into(),
            symbol: symbol.into(),
            to: to.into(),
        }
    }
}

/// Helper struct for the construction of a [`Dfa`] from raw user input. It accumulates state
/// labels, symbols, the start state, the accepting states and transition rows without checking
/// anything. Calling [`RawDefinition::validate`] then either produces a [`Dfa`] or the complete
/// list of problems, each one pointing to the offending state, symbol or transition row.
///
/// All entries are trimmed and blank entries are dropped. Entries that are repeated verbatim
/// (the same state twice, or two identical transition rows) are collapsed, whereas repetitions
/// that contradict each other are reported as errors.
///
/// Since symbols are trimmed as well, whitespace cannot be a symbol. An alphabet entry that
/// consists of whitespace only is reported as [`ValidationError::InvalidSymbol`], only entries
/// that are empty to begin with are dropped silently.
///
/// # Example
///
/// ```
/// use dfa_sim::prelude::*;
///
/// let result = RawDefinition::from_fields("q0, q1", "a, b", "q0", "q1")
///     .with_transitions([("q0", "a", "q1"), ("q0", "b", "q0"), ("q1", "a", "q1")])
///     .validate();
/// let errors = result.unwrap_err();
/// assert_eq!(
///     errors.iter().collect::<Vec<_>>(),
///     [&ValidationError::MissingTransition { state: "q1".into(), symbol: 'b' }]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDefinition {
    states: Vec<String>,
    symbols: Vec<String>,
    start: Option<String>,
    accepting: Vec<String>,
    transitions: Vec<RawTransition>,
}

/// Describes one reason for which a [`RawDefinition`] cannot be turned into a [`Dfa`]. Transition
/// rows are identified by their position (starting at `0`) among the rows that were added.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No state was given.
    #[error("the automaton has no states")]
    NoStates,
    /// No symbol was given.
    #[error("the alphabet is empty")]
    EmptyAlphabet,
    /// An alphabet entry does not consist of exactly one non-whitespace character.
    #[error("alphabet entry '{0}' is not a single non-whitespace character")]
    InvalidSymbol(String),
    /// No start state was given.
    #[error("no start state was given")]
    MissingStart,
    /// The start state is not among the states.
    #[error("start state '{0}' is not a state of the automaton")]
    UnknownStart(String),
    /// An accepting state is not among the states.
    #[error("accepting state '{0}' is not a state of the automaton")]
    UnknownAccepting(String),
    /// A transition row has some, but not all cells filled in.
    #[error("transition row {row} is incomplete")]
    IncompleteTransition {
        /// Position of the row.
        row: usize,
    },
    /// The source state of a transition row is not among the states.
    #[error("transition row {row} starts in unknown state '{state}'")]
    UnknownSource {
        /// Position of the row.
        row: usize,
        /// The given label.
        state: String,
    },
    /// The symbol of a transition row is not part of the alphabet.
    #[error("transition row {row} reads '{symbol}', which is not in the alphabet")]
    UnknownTransitionSymbol {
        /// Position of the row.
        row: usize,
        /// The given symbol.
        symbol: String,
    },
    /// The target state of a transition row is not among the states.
    #[error("transition row {row} leads to unknown state '{state}'")]
    UnknownTarget {
        /// Position of the row.
        row: usize,
        /// The given label.
        state: String,
    },
    /// Two transition rows give different targets for the same state and symbol.
    #[error("transition row {row} sends ({state}, '{symbol}') to '{second}', but it already goes to '{first}'")]
    ConflictingTransition {
        /// Position of the row that introduced the conflict.
        row: usize,
        /// The source state.
        state: String,
        /// The symbol.
        symbol: Symbol,
        /// The target given by an earlier row.
        first: String,
        /// The target given by `row`.
        second: String,
    },
    /// No transition row exists for this state and symbol.
    #[error("no transition for ({state}, '{symbol}')")]
    MissingTransition {
        /// The state.
        state: String,
        /// The symbol.
        symbol: Symbol,
    },
}

/// A non-empty collection of [`ValidationError`]s, ordered by the part of the definition they
/// concern (states, alphabet, start, accepting states, transitions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Iterates over the individual errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns the number of errors, which is never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, exists for completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `error` is among the errors.
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

/// Splits a comma separated text field into its trimmed, non-blank entries.
fn split_field(field: &str) -> impl Iterator<Item = String> + '_ {
    field
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
}

impl RawDefinition {
    /// Creates an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a definition from the text fields of a form: states, alphabet and accepting states
    /// are comma separated lists, `start` is a single label. Blank entries are dropped and a blank
    /// `start` counts as missing.
    pub fn from_fields(states: &str, alphabet: &str, start: &str, accepting: &str) -> Self {
        let start = start.trim();
        Self {
            states: split_field(states).collect(),
            symbols: split_field(alphabet).collect(),
            start: (!start.is_empty()).then(|| start.to_string()),
            accepting: split_field(accepting).collect(),
            transitions: vec![],
        }
    }

    /// Adds state labels.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds symbols to the alphabet, in the order in which they should be enumerated.
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Sets the start state, replacing a previously given one.
    pub fn with_start<S: Into<String>>(mut self, start: S) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I, S>(mut self, accepting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepting.extend(accepting.into_iter().map(Into::into));
        self
    }

    /// Removes all accepting states.
    pub fn without_accepting(mut self) -> Self {
        self.accepting.clear();
        self
    }

    /// Appends transition rows, which can be anything that converts into a [`RawTransition`],
    /// for example triples of string slices.
    pub fn with_transitions<X: Into<RawTransition>, T: IntoIterator<Item = X>>(
        mut self,
        iter: T,
    ) -> Self {
        self.transitions.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Appends a single transition row.
    pub fn add_transition<X: Into<RawTransition>>(&mut self, transition: X) {
        self.transitions.push(transition.into());
    }

    /// Returns the transition rows in the order in which they were added.
    pub fn transitions(&self) -> &[RawTransition] {
        &self.transitions
    }

    /// Checks the definition and turns it into a [`Dfa`]. If anything is wrong, every problem
    /// that was found is returned instead. `self` is left untouched either way, so it can be
    /// corrected and validated again.
    pub fn validate(&self) -> Result<Dfa, ValidationErrors> {
        let mut errors = vec![];

        let states = self.collect_states();
        if states.is_empty() {
            errors.push(ValidationError::NoStates);
        }
        let index: Map<&str, StateIndex> = states
            .iter()
            .enumerate()
            .map(|(i, q)| (q.as_str(), i))
            .collect();

        let alphabet = self.collect_alphabet(&mut errors);
        if alphabet.is_empty() {
            errors.push(ValidationError::EmptyAlphabet);
        }

        let initial = match self.start.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(ValidationError::MissingStart);
                None
            }
            Some(start) => match index.get(start) {
                Some(q) => Some(*q),
                None => {
                    errors.push(ValidationError::UnknownStart(start.to_string()));
                    None
                }
            },
        };

        let mut accepting = vec![false; states.len()];
        for label in self.accepting.iter().map(|q| q.trim()).filter(|q| !q.is_empty()) {
            match index.get(label) {
                Some(&q) => accepting[q] = true,
                None => {
                    let error = ValidationError::UnknownAccepting(label.to_string());
                    if !errors.contains(&error) {
                        errors.push(error);
                    }
                }
            }
        }

        let table = self.collect_table(&states, &index, &alphabet, &mut errors);
        let mut transitions = Vec::with_capacity(table.len());
        for (slot, target) in table.into_iter().enumerate() {
            match target {
                Some(p) => transitions.push(p),
                None => errors.push(ValidationError::MissingTransition {
                    state: states[slot / alphabet.size()].clone(),
                    symbol: alphabet
                        .symbol(slot % alphabet.size())
                        .expect("slot is within the table"),
                }),
            }
        }

        match initial {
            Some(initial) if errors.is_empty() => {
                trace!(
                    "validated automaton with {} states over {}",
                    states.len(),
                    alphabet
                );
                Ok(Dfa {
                    states,
                    alphabet,
                    initial,
                    accepting,
                    transitions,
                })
            }
            _ => {
                debug!("definition rejected with {} errors", errors.len());
                Err(ValidationErrors(errors))
            }
        }
    }

    fn collect_states(&self) -> Vec<String> {
        let mut states: Vec<String> = vec![];
        for label in self.states.iter().map(|q| q.trim()).filter(|q| !q.is_empty()) {
            if states.iter().any(|q| q == label) {
                debug!("state {label} is listed more than once, keeping one");
            } else {
                states.push(label.to_string());
            }
        }
        states
    }

    fn collect_alphabet(&self, errors: &mut Vec<ValidationError>) -> Alphabet {
        let mut symbols = vec![];
        for raw in self.symbols.iter().filter(|a| !a.is_empty()) {
            let entry = raw.trim();
            match single_char(entry) {
                Some(symbol) if symbols.contains(&symbol) => {
                    debug!("symbol {symbol} is listed more than once, keeping one")
                }
                Some(symbol) => symbols.push(symbol),
                None => {
                    let error = ValidationError::InvalidSymbol(raw.to_string());
                    if !errors.contains(&error) {
                        errors.push(error);
                    }
                }
            }
        }
        Alphabet::new(symbols)
    }

    /// Folds the transition rows into a table with one slot per state and symbol, reporting
    /// every row that is incomplete, refers to something unknown or contradicts an earlier row.
    fn collect_table(
        &self,
        states: &[String],
        index: &Map<&str, StateIndex>,
        alphabet: &Alphabet,
        errors: &mut Vec<ValidationError>,
    ) -> Vec<Option<StateIndex>> {
        let mut table: Vec<Option<StateIndex>> = vec![None; states.len() * alphabet.size()];
        for (row, transition) in self.transitions.iter().enumerate() {
            let cells = [
                transition.from.trim(),
                transition.symbol.trim(),
                transition.to.trim(),
            ];
            if cells.iter().all(|cell| cell.is_empty()) {
                trace!("skipping empty transition row {row}");
                continue;
            }
            if cells.iter().any(|cell| cell.is_empty()) {
                errors.push(ValidationError::IncompleteTransition { row });
                continue;
            }
            let [from, symbol, to] = cells;

            let source = index.get(from).copied();
            if source.is_none() {
                errors.push(ValidationError::UnknownSource {
                    row,
                    state: from.to_string(),
                });
            }
            let position = single_char(symbol).and_then(|a| alphabet.index_of(a));
            if position.is_none() {
                errors.push(ValidationError::UnknownTransitionSymbol {
                    row,
                    symbol: symbol.to_string(),
                });
            }
            let target = index.get(to).copied();
            if target.is_none() {
                errors.push(ValidationError::UnknownTarget {
                    row,
                    state: to.to_string(),
                });
            }

            let (Some(q), Some(a), Some(p)) = (source, position, target) else {
                continue;
            };
            let slot = &mut table[q * alphabet.size() + a];
            match *slot {
                None => *slot = Some(p),
                Some(existing) if existing == p => {
                    debug!("transition row {row} repeats ({from}, {symbol}) -> {to}, keeping one")
                }
                Some(existing) => errors.push(ValidationError::ConflictingTransition {
                    row,
                    state: from.to_string(),
                    symbol: alphabet.symbol(a).expect("index was looked up in alphabet"),
                    first: states[existing].clone(),
                    second: to.to_string(),
                }),
            }
        }
        table
    }
}

fn single_char(entry: &str) -> Option<Symbol> {
    let mut chars = entry.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{RawDefinition, ValidationError};
    use crate::TransitionSystem;

    fn ends_in_01() -> RawDefinition {
        RawDefinition::from_fields("q0, q1, q2", "0, 1", "q0", "q2").with_transitions([
            ("q0", "0", "q1"),
            ("q0", "1", "q0"),
            ("q1", "0", "q1"),
            ("q1", "1", "q2"),
            ("q2", "0", "q1"),
            ("q2", "1", "q0"),
        ])
    }

    #[test]
    fn valid_definition() {
        let dfa = ends_in_01().validate().unwrap();
        assert_eq!(dfa.size(), 3);
        assert_eq!(dfa.alphabet().size(), 2);
        assert_eq!(dfa.start(), "q0");
        assert_eq!(dfa.target("q1", '1'), Some("q2"));
    }

    #[test]
    fn fields_are_trimmed_and_blanks_dropped() {
        let dfa = RawDefinition::from_fields(" a ,, b ,", "x, ,", " a ", "b,")
            .with_transitions([("a", "x", "b"), (" b", "x ", " a"), ("", "", "")])
            .validate()
            .unwrap();
        assert_eq!(dfa.states().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn missing_transitions_are_reported_individually() {
        let mut raw = RawDefinition::from_fields("q0, q1", "a, b", "q0", "");
        raw.add_transition(("q0", "a", "q1"));
        let errors = raw.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        for (state, symbol) in [("q0", 'b'), ("q1", 'a'), ("q1", 'b')] {
            assert!(errors.contains(&ValidationError::MissingTransition {
                state: state.to_string(),
                symbol
            }));
        }
    }

    #[test]
    fn conflicting_rows_are_rejected() {
        let errors = ends_in_01()
            .with_transitions([("q0", "0", "q2")])
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            [ValidationError::ConflictingTransition {
                row: 6,
                state: "q0".into(),
                symbol: '0',
                first: "q1".into(),
                second: "q2".into(),
            }]
        );
    }

    #[test]
    fn identical_rows_and_labels_collapse() {
        let dfa = ends_in_01()
            .with_states(["q1"])
            .with_symbols(["1"])
            .with_accepting(["q2"])
            .with_transitions([("q0", "0", "q1")])
            .validate()
            .unwrap();
        assert_eq!(dfa, ends_in_01().validate().unwrap());
    }

    #[test]
    fn referential_integrity() {
        let errors = RawDefinition::from_fields("q0", "0, ab", "q9", "q0, qx")
            .with_transitions([("q0", "0", "q0"), ("q7", "2", "q8"), ("q0", "", "q0")])
            .validate()
            .unwrap_err();
        let expected = [
            ValidationError::InvalidSymbol("ab".into()),
            ValidationError::UnknownStart("q9".into()),
            ValidationError::UnknownAccepting("qx".into()),
            ValidationError::UnknownSource {
                row: 1,
                state: "q7".into(),
            },
            ValidationError::UnknownTransitionSymbol {
                row: 1,
                symbol: "2".into(),
            },
            ValidationError::UnknownTarget {
                row: 1,
                state: "q8".into(),
            },
            ValidationError::IncompleteTransition { row: 2 },
        ];
        assert_eq!(errors.iter().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn whitespace_is_not_a_symbol() {
        let errors = RawDefinition::from_fields("q0", "a", "q0", "")
            .with_symbols(["", " ", "\t"])
            .with_transitions([("q0", "a", "q0")])
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            [
                ValidationError::InvalidSymbol(" ".into()),
                ValidationError::InvalidSymbol("\t".into())
            ]
        );
    }

    #[test]
    fn empty_definition() {
        let errors = RawDefinition::new().validate().unwrap_err();
        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            [
                ValidationError::NoStates,
                ValidationError::EmptyAlphabet,
                ValidationError::MissingStart
            ]
        );
    }

    #[test]
    fn accepting_set_may_be_empty() {
        let dfa = ends_in_01().without_accepting().validate().unwrap();
        assert_eq!(dfa.accepting_states().count(), 0);
    }

    #[test]
    fn errors_display_one_per_line() {
        let errors = RawDefinition::from_fields("q0", "a", "q0", "")
            .with_transitions([("q0", "a", "q0"), ("q0", "a", "q1")])
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "transition row 1 leads to unknown state 'q1'"
        );
    }
}
