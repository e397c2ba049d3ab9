use std::{fmt::Display, str::Chars};

use thiserror::Error;
use tracing::trace;

use crate::{Dfa, StateIndex, Symbol, TransitionSystem};

/// Raised when a word contains a symbol that does not belong to the alphabet of the automaton it
/// is run on. `position` counts characters of the input, starting at `0`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("symbol '{symbol}' at position {position} is not in the alphabet")]
pub struct UnknownSymbol {
    /// The offending symbol.
    pub symbol: Symbol,
    /// Its position in the input.
    pub position: usize,
}

/// A transition that was taken during a run, consisting of source, symbol and target.
pub type Transition = (StateIndex, Symbol, StateIndex);

/// Runs a word on a [`TransitionSystem`] symbol by symbol, producing the taken [`Transition`] for
/// each consumed symbol. If a symbol is not part of the alphabet, the walker yields an
/// [`UnknownSymbol`] and stops.
#[derive(Clone, Debug)]
pub struct Walker<'w, TS> {
    ts: TS,
    input: Chars<'w>,
    state: StateIndex,
    position: usize,
    failed: bool,
}

impl<'w, TS: TransitionSystem> Walker<'w, TS> {
    /// Creates a walker that starts in the initial state of `ts`.
    pub fn new(ts: TS, input: &'w str) -> Self {
        let state = ts.initial();
        Self::new_from(ts, state, input)
    }

    /// Creates a walker that starts in the given state.
    pub fn new_from(ts: TS, state: StateIndex, input: &'w str) -> Self {
        Self {
            ts,
            input: input.chars(),
            state,
            position: 0,
            failed: false,
        }
    }

    /// The state the walker is currently in.
    pub fn state(&self) -> StateIndex {
        self.state
    }

    /// Consumes the rest of the input and returns the reached state.
    pub fn reached(mut self) -> Result<StateIndex, UnknownSymbol> {
        for step in self.by_ref() {
            step?;
        }
        Ok(self.state)
    }
}

impl<'w, TS: TransitionSystem> Iterator for Walker<'w, TS> {
    type Item = Result<Transition, UnknownSymbol>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let symbol = self.input.next()?;
        let position = self.position;
        self.position += 1;
        match self.ts.successor_on(self.state, symbol) {
            Some(target) => {
                trace!("{} --{}--> {}", self.state, symbol, target);
                let source = std::mem::replace(&mut self.state, target);
                Some(Ok((source, symbol, target)))
            }
            None => {
                trace!("{symbol} at position {position} is not in the alphabet");
                self.failed = true;
                Some(Err(UnknownSymbol { symbol, position }))
            }
        }
    }
}

/// One entry of a [`Trace`]: the state the automaton is in after consuming `symbol`. The first
/// entry of every trace has no symbol and holds the start state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// Label of the state.
    pub state: String,
    /// The symbol that was consumed to get there.
    pub symbol: Option<Symbol>,
}

/// The sequence of states visited while a word is consumed. For a word of length `n` a trace has
/// `n + 1` entries, see [`Step`]. A trace holds copies of the state labels and therefore stays
/// meaningful independently of the automaton that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Trace(Vec<Step>);

impl Trace {
    /// The number of entries, which is one more than the length of the consumed word.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true, as every trace contains at least the start state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }

    /// Iterates over the labels of the visited states, starting with the start state.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|step| step.state.as_str())
    }

    /// The label of the state that was reached at the end.
    pub fn final_state(&self) -> &str {
        self.0
            .last()
            .map(|step| step.state.as_str())
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (from, to)) in self.0.iter().zip(self.0.iter().skip(1)).enumerate() {
            if let Some(symbol) = to.symbol {
                writeln!(
                    f,
                    "{}. from ({}) reading '{}' go to ({})",
                    i + 1,
                    from.state,
                    symbol,
                    to.state
                )?;
            }
        }
        write!(f, "final state ({})", self.final_state())
    }
}

/// The outcome of running a word on a [`Dfa`]: the verdict together with the full [`Trace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    accepted: bool,
    trace: Trace,
}

impl Evaluation {
    /// Whether the word is accepted, i.e. the final state is accepting.
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// The trace of the run.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Splits `self` into verdict and trace.
    pub fn into_parts(self) -> (bool, Trace) {
        (self.accepted, self.trace)
    }
}

impl Dfa {
    /// Returns a [`Walker`] that consumes `input` starting from the initial state.
    pub fn walk<'w>(&self, input: &'w str) -> Walker<'w, &Self> {
        Walker::new(self, input)
    }

    /// Runs `input` from the start state and records every visited state. Acceptance and
    /// rejection are both regular outcomes; the only failure is an input symbol outside the
    /// alphabet, in which case no trace is produced at all.
    ///
    /// # Example
    /// ```
    /// use dfa_sim::library;
    ///
    /// let dfa = library::load("parity of 1s").unwrap();
    /// let evaluation = dfa.evaluate("101").unwrap();
    /// assert!(evaluation.accepted());
    /// assert_eq!(
    ///     evaluation.trace().states().collect::<Vec<_>>(),
    ///     ["q0", "q1", "q1", "q0"]
    /// );
    /// assert!(dfa.evaluate("12").is_err());
    /// ```
    pub fn evaluate(&self, input: &str) -> Result<Evaluation, UnknownSymbol> {
        trace!("evaluating {input:?}");
        let transitions = self.walk(input).collect::<Result<Vec<_>, _>>()?;
        let reached = transitions
            .last()
            .map(|(_, _, target)| *target)
            .unwrap_or(self.initial);

        let mut steps = Vec::with_capacity(transitions.len() + 1);
        steps.push(Step {
            state: self.states[self.initial].clone(),
            symbol: None,
        });
        steps.extend(transitions.into_iter().map(|(_, symbol, target)| Step {
            state: self.states[target].clone(),
            symbol: Some(symbol),
        }));

        Ok(Evaluation {
            accepted: self.state_color(reached),
            trace: Trace(steps),
        })
    }

    /// Checks whether `input` is accepted without recording a trace.
    pub fn accepts(&self, input: &str) -> Result<bool, UnknownSymbol> {
        let reached = self.walk(input).reached()?;
        Ok(self.state_color(reached))
    }
}

#[cfg(test)]
mod tests {
    use super::UnknownSymbol;
    use crate::{library, RawDefinition};

    #[test_log::test]
    fn parity_trace() {
        let dfa = library::load("parity of 1s").unwrap();
        let evaluation = dfa.evaluate("1101").unwrap();
        assert!(!evaluation.accepted());
        let trace = evaluation.trace();
        assert_eq!(trace.len(), 5);
        assert_eq!(
            trace.states().collect::<Vec<_>>(),
            ["q0", "q1", "q0", "q0", "q1"]
        );
        assert_eq!(trace.iter().next().unwrap().symbol, None);
        assert_eq!(
            trace.iter().filter_map(|step| step.symbol).collect::<String>(),
            "1101"
        );
        assert_eq!(trace.final_state(), "q1");
    }

    #[test]
    fn empty_input() {
        let dfa = library::load("parity of 1s").unwrap();
        let (accepted, trace) = dfa.evaluate("").unwrap().into_parts();
        assert!(accepted);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.final_state(), "q0");

        let rejecting = dfa.to_raw().without_accepting().validate().unwrap();
        assert!(!rejecting.evaluate("").unwrap().accepted());
    }

    #[test]
    fn ends_in_01() {
        let dfa = library::load("ends in 01").unwrap();
        assert!(dfa.evaluate("1001").unwrap().accepted());
        assert!(!dfa.evaluate("10").unwrap().accepted());
        assert_eq!(dfa.accepts("01"), Ok(true));
        assert_eq!(dfa.accepts("010"), Ok(false));
    }

    #[test]
    fn unknown_symbol_aborts() {
        let dfa = library::load("ends in 01").unwrap();
        assert_eq!(
            dfa.evaluate("01a1"),
            Err(UnknownSymbol {
                symbol: 'a',
                position: 2
            })
        );
        assert_eq!(
            dfa.accepts("2"),
            Err(UnknownSymbol {
                symbol: '2',
                position: 0
            })
        );
    }

    #[test]
    fn walker_stops_after_failure() {
        let dfa = library::load("ends in 01").unwrap();
        let mut walker = dfa.walk("0x1");
        assert_eq!(walker.next(), Some(Ok((0, '0', 1))));
        assert!(matches!(walker.next(), Some(Err(_))));
        assert_eq!(walker.next(), None);
        assert_eq!(walker.state(), 1);
    }

    #[test]
    fn trace_display() {
        let dfa = RawDefinition::from_fields("a, b", "x", "a", "b")
            .with_transitions([("a", "x", "b"), ("b", "x", "a")])
            .validate()
            .unwrap();
        assert_eq!(
            dfa.evaluate("xx").unwrap().trace().to_string(),
            "1. from (a) reading 'x' go to (b)\n2. from (b) reading 'x' go to (a)\nfinal state (a)"
        );
        assert_eq!(
            dfa.evaluate("").unwrap().trace().to_string(),
            "final state (a)"
        );
    }
}
