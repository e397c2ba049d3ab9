use itertools::Itertools;

use crate::{builder::RawDefinition, Alphabet, StateIndex, Symbol, TransitionSystem};

/// A deterministic finite automaton (DFA), i.e. a validated 5-tuple consisting of a non-empty
/// list of uniquely labelled states, a non-empty [`Alphabet`], an initial state, a set of
/// accepting states and a transition function that is defined for every pair of state and symbol.
///
/// A `Dfa` can only be created through [`RawDefinition::validate`] (or [`crate::decode`], which
/// validates as well), so all of the above is guaranteed for its whole lifetime. There is no way
/// to modify a `Dfa`; to change a definition, turn it into a [`RawDefinition`] with
/// [`Dfa::to_raw`], edit that and validate again, which yields a new and independent `Dfa`.
#[derive(Clone, Debug)]
pub struct Dfa {
    pub(crate) states: Vec<String>,
    pub(crate) alphabet: Alphabet,
    pub(crate) initial: StateIndex,
    pub(crate) accepting: Vec<bool>,
    /// Row-major table, the successor of `q` on the `a`-th symbol is stored at `q * |alphabet| + a`.
    pub(crate) transitions: Vec<StateIndex>,
}

impl Dfa {
    /// Iterates over the state labels in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(String::as_str)
    }

    /// Gives the label of the state with the given index.
    pub fn state_label(&self, state: StateIndex) -> Option<&str> {
        self.states.get(state).map(String::as_str)
    }

    /// Looks up the index of the state labelled `label`.
    pub fn state_index(&self, label: &str) -> Option<StateIndex> {
        self.states.iter().position(|q| q == label)
    }

    /// Returns the label of the initial state.
    pub fn start(&self) -> &str {
        &self.states[self.initial]
    }

    /// Iterates over the labels of all accepting states in declaration order.
    pub fn accepting_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states
            .iter()
            .zip(&self.accepting)
            .filter_map(|(q, accepting)| accepting.then_some(q.as_str()))
    }

    /// Returns true if the state labelled `label` exists and is accepting.
    pub fn is_accepting(&self, label: &str) -> bool {
        self.state_index(label)
            .map(|q| self.accepting[q])
            .unwrap_or(false)
    }

    /// Returns the label of the state that is reached from the state labelled `from` on `symbol`.
    pub fn target(&self, from: &str, symbol: Symbol) -> Option<&str> {
        let q = self.state_index(from)?;
        let p = self.successor_on(q, symbol)?;
        Some(&self.states[p])
    }

    /// Iterates over all transitions as `(from, symbol, to)` triples, ordered by the declaration
    /// order of states first and of symbols second.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, Symbol, &str)> + '_ {
        self.states.iter().enumerate().flat_map(move |(q, from)| {
            self.alphabet.universe().enumerate().map(move |(a, sym)| {
                (
                    from.as_str(),
                    sym,
                    self.states[self.successor(q, a)].as_str(),
                )
            })
        })
    }

    /// Produces a [`RawDefinition`] holding the same definition, which can be used as a draft for
    /// creating a modified copy of `self`.
    pub fn to_raw(&self) -> RawDefinition {
        RawDefinition::new()
            .with_states(self.states.iter().cloned())
            .with_symbols(self.alphabet.universe().map(String::from))
            .with_start(self.start())
            .with_accepting(self.accepting_states().map(String::from))
            .with_transitions(
                self.transitions()
                    .map(|(p, a, q)| (p.to_string(), a.to_string(), q.to_string())),
            )
    }
}

impl TransitionSystem for Dfa {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.states.len()
    }

    fn initial(&self) -> StateIndex {
        self.initial
    }

    fn successor(&self, state: StateIndex, symbol: usize) -> StateIndex {
        self.transitions[state * self.alphabet.size() + symbol]
    }

    fn state_color(&self, state: StateIndex) -> bool {
        self.accepting[state]
    }
}

/// Two automata are equal if they have the same states, symbols, initial state, accepting states
/// and transitions, regardless of the order in which states and symbols were declared.
impl PartialEq for Dfa {
    fn eq(&self, other: &Self) -> bool {
        self.states.len() == other.states.len()
            && self.states().all(|q| other.state_index(q).is_some())
            && self.alphabet.same_symbols(&other.alphabet)
            && self.start() == other.start()
            && self.accepting_states().sorted().eq(other.accepting_states().sorted())
            && self
                .transitions()
                .all(|(p, a, q)| other.target(p, a) == Some(q))
    }
}

impl Eq for Dfa {}

#[cfg(test)]
mod tests {
    use crate::{RawDefinition, TransitionSystem};

    fn parity(states: &str, alphabet: &str) -> crate::Dfa {
        RawDefinition::from_fields(states, alphabet, "even", "even")
            .with_transitions([
                ("even", "0", "even"),
                ("even", "1", "odd"),
                ("odd", "0", "odd"),
                ("odd", "1", "even"),
            ])
            .validate()
            .unwrap()
    }

    #[test]
    fn accessors() {
        let dfa = parity("even, odd", "0, 1");
        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.start(), "even");
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), ["even"]);
        assert!(dfa.is_accepting("even"));
        assert!(!dfa.is_accepting("odd"));
        assert!(!dfa.is_accepting("missing"));
        assert_eq!(dfa.target("odd", '1'), Some("even"));
        assert_eq!(dfa.target("odd", '2'), None);
        assert_eq!(dfa.transitions().count(), 4);
        assert_eq!(dfa.transitions().next(), Some(("even", '0', "even")));
    }

    #[test]
    fn equality_ignores_declaration_order() {
        let dfa = parity("even, odd", "0, 1");
        assert_eq!(dfa, parity("odd, even", "1, 0"));
        let other = dfa
            .to_raw()
            .with_accepting(["odd".to_string()])
            .validate()
            .unwrap();
        assert_ne!(dfa, other);
    }

    #[test]
    fn raw_round_trip() {
        let dfa = parity("even, odd", "0, 1");
        assert_eq!(dfa.to_raw().validate().unwrap(), dfa);
    }
}
