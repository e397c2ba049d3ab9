use std::fmt::Display;

use itertools::Itertools;

/// A symbol of an alphabet, which is also the type of the symbols in a word. Input strings are
/// consumed one `char` at a time, so every symbol is a single character.
pub type Symbol = char;

/// An alphabet is a non-empty sequence of distinct [`Symbol`]s. The order in which the symbols are
/// declared is significant: it is the order in which words are enumerated, i.e. the word `"ab"`
/// precedes `"ba"` if and only if `'a'` is declared before `'b'`.
///
/// # Example
/// ```
/// use dfa_sim::Alphabet;
///
/// let alphabet = Alphabet::from_iter("ba".chars());
/// assert_eq!(alphabet.index_of('b'), Some(0));
/// assert!(!alphabet.contains('c'));
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Alphabet(Vec<Symbol>);

impl Alphabet {
    /// Creates a new [`Alphabet`] from an iterator over the symbols. Repeated symbols only
    /// keep their first occurrence.
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self(symbols.into_iter().unique().collect())
    }

    /// Returns an iterator over all symbols in declaration order.
    pub fn universe(&self) -> std::iter::Copied<std::slice::Iter<'_, Symbol>> {
        self.0.iter().copied()
    }

    /// Returns true if the given symbol is present in the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    /// Gives the position of `symbol` in the declaration order, if it is part of the alphabet.
    pub fn index_of(&self, symbol: Symbol) -> Option<usize> {
        self.0.iter().position(|s| *s == symbol)
    }

    /// Returns the symbol at position `index` of the declaration order.
    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        self.0.get(index).copied()
    }

    /// The number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols. A validated [`crate::Dfa`] never has an
    /// empty alphabet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether `self` and `other` consist of the same symbols, ignoring their order.
    pub fn same_symbols(&self, other: &Alphabet) -> bool {
        self.size() == other.size() && self.universe().all(|s| other.contains(s))
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::Alphabet;

    #[test]
    fn declaration_order_is_kept() {
        let alphabet = Alphabet::from_iter("cab".chars());
        assert_eq!(alphabet.universe().collect::<String>(), "cab");
        assert_eq!(alphabet.index_of('a'), Some(1));
        assert_eq!(alphabet.symbol(2), Some('b'));
        assert_eq!(alphabet.to_string(), "{c, a, b}");
    }

    #[test]
    fn repeated_symbols_collapse() {
        let alphabet = Alphabet::new(['0', '1', '0']);
        assert_eq!(alphabet.size(), 2);
        assert!(alphabet.same_symbols(&Alphabet::new(['1', '0'])));
        assert!(!alphabet.same_symbols(&Alphabet::new(['1'])));
    }
}
