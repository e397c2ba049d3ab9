use crate::{Alphabet, Symbol};

/// States are referred to by their position in the declared list of states.
pub type StateIndex = usize;

/// Abstracts a complete deterministic transition system with a designated initial state and a
/// boolean state color, where `true` marks a state as accepting. Running words, searching for
/// reachable states and enumerating accepted words only need this view of an automaton.
///
/// Implementors guarantee that [`TransitionSystem::successor`] is defined for every state index
/// below [`TransitionSystem::size`] and every symbol index below the alphabet size.
#[impl_tools::autoimpl(for<T: trait + ?Sized> &T)]
pub trait TransitionSystem {
    /// Returns a reference to the alphabet.
    fn alphabet(&self) -> &Alphabet;

    /// The number of states, state indices range from `0` to `size() - 1`.
    fn size(&self) -> usize;

    /// The index of the initial state.
    fn initial(&self) -> StateIndex;

    /// Returns the state reached from `state` on the symbol at position `symbol` of the alphabet.
    fn successor(&self, state: StateIndex, symbol: usize) -> StateIndex;

    /// Returns true if `state` is accepting.
    fn state_color(&self, state: StateIndex) -> bool;

    /// Looks up the successor of `state` on the given [`Symbol`], which fails only if the symbol
    /// is not part of the alphabet.
    fn successor_on(&self, state: StateIndex, symbol: Symbol) -> Option<StateIndex> {
        self.alphabet()
            .index_of(symbol)
            .map(|index| self.successor(state, index))
    }

    /// Returns an iterator over all state indices.
    fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }
}
