use std::collections::VecDeque;

use crate::{Dfa, Set, StateIndex, Symbol, TransitionSystem};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<Symbol>, StateIndex);

/// Struct that can return the minimal representatives of a transition system. A minimal representative
/// for a state `q` of some transition system is the length-lexicographically minimal word with which
/// `q` can be reached from the initial state, where symbols are ordered as they are declared in the
/// alphabet. States are produced in the order in which a breadth-first search discovers them.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<TS> {
    ts: TS,
    seen: Set<StateIndex>,
    queue: VecDeque<MinimalRepresentative>,
}

impl<TS: TransitionSystem> MinimalRepresentatives<TS> {
    /// Starts the search in the initial state of `ts`.
    pub fn new(ts: TS) -> Self {
        let origin = ts.initial();
        let seen = Set::from_iter([origin]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { ts, seen, queue }
    }
}

impl<TS: TransitionSystem> Iterator for MinimalRepresentatives<TS> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (a, symbol) in self.ts.alphabet().universe().enumerate() {
            let p = self.ts.successor(q, a);
            if self.seen.insert(p) {
                let mut extended = access.clone();
                extended.push(symbol);
                self.queue.push_back((extended, p));
            }
        }
        Some((access, q))
    }
}

/// Allows iterating over the indices of the states that are reachable from the initial state.
#[derive(Debug, Clone)]
pub struct ReachableStates<TS>(MinimalRepresentatives<TS>);

impl<TS: TransitionSystem> Iterator for ReachableStates<TS> {
    type Item = StateIndex;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, q)| q)
    }
}

impl Dfa {
    /// Returns the minimal representatives of all reachable states, see [`MinimalRepresentatives`].
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<&Self> {
        MinimalRepresentatives::new(self)
    }

    /// Iterates over the indices of all states that are reachable from the start state.
    pub fn reachable_states(&self) -> ReachableStates<&Self> {
        ReachableStates(self.minimal_representatives())
    }

    /// Returns the shortest accepted word (the length-lexicographically least one), or `None` if
    /// the accepted language is empty.
    pub fn give_word(&self) -> Option<String> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.state_color(q).then(|| word.into_iter().collect()))
    }

    /// Returns true if and only if no word is accepted.
    pub fn is_empty_language(&self) -> bool {
        !self.reachable_states().any(|q| self.state_color(q))
    }
}
