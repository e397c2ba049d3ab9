//! Library for defining deterministic finite automata (DFAs) over a finite alphabet of
//! characters, running words on them with a full step trace and enumerating the words
//! they accept in length-lexicographic order.
//!
//! A [`Dfa`] can only be obtained through validation, either from raw user input collected
//! in a [`RawDefinition`] or from the JSON interchange format handled by [`codec`]. Once
//! built it is immutable, every operation on it takes `&self`.
//!
//! ```
//! use dfa_sim::prelude::*;
//!
//! let dfa = RawDefinition::from_fields("q0, q1", "0, 1", "q0", "q0")
//!     .with_transitions([
//!         ("q0", "0", "q0"),
//!         ("q0", "1", "q1"),
//!         ("q1", "0", "q1"),
//!         ("q1", "1", "q0"),
//!     ])
//!     .validate()
//!     .unwrap();
//!
//! let evaluation = dfa.evaluate("100").unwrap();
//! assert!(!evaluation.accepted());
//! assert_eq!(evaluation.trace().len(), 4);
//! assert_eq!(dfa.enumerate(3).words(), ["", "0", "00"]);
//! ```
#![warn(missing_docs)]

/// The alphabet of a [`Dfa`], an ordered collection of distinct characters.
pub mod alphabet;
pub use alphabet::{Alphabet, Symbol};

mod ts;
pub use ts::{StateIndex, TransitionSystem};

mod dfa;
pub use dfa::Dfa;

/// Collects raw user input and validates it into a [`Dfa`].
pub mod builder;
pub use builder::{RawDefinition, RawTransition, ValidationError, ValidationErrors};

/// Running words on a [`Dfa`] and recording the visited states.
pub mod run;
pub use run::{Evaluation, Step, Trace, UnknownSymbol};

/// Bounded enumeration of the words accepted by a [`Dfa`].
pub mod enumerate;
pub use enumerate::{AcceptedWords, EnumerationConfig, EnumerationResult, LimitNotReached};

mod reachable;
pub use reachable::{MinimalRepresentatives, ReachableStates};

/// Reading and writing the JSON interchange format.
pub mod codec;
pub use codec::{decode, encode, DecodeError};

/// A fixed set of named example automata.
pub mod library;

mod display;

/// Re-exports the types and functions needed for everyday use of the crate.
pub mod prelude {
    pub use super::{
        codec::{decode, encode, DecodeError},
        enumerate::{EnumerationConfig, EnumerationResult, LimitNotReached},
        library,
        run::{Evaluation, Step, Trace, UnknownSymbol},
        Alphabet, Dfa, RawDefinition, RawTransition, StateIndex, Symbol, TransitionSystem,
        ValidationError, ValidationErrors,
    };
}

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
#[cfg(feature = "ahash")]
pub type Set<S> = ahash::HashSet<S>;
/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
#[cfg(not(feature = "ahash"))]
pub type Set<S> = std::collections::HashSet<S>;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
#[cfg(feature = "ahash")]
pub type Map<K, V> = ahash::HashMap<K, V>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
#[cfg(not(feature = "ahash"))]
pub type Map<K, V> = std::collections::HashMap<K, V>;
