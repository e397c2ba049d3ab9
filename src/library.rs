use thiserror::Error;

use crate::{codec, DecodeError, Dfa};

const EXAMPLES: [(&str, &str); 4] = [
    (
        "parity of 1s",
        include_str!("../library/parity_of_ones.json"),
    ),
    ("ends in 01", include_str!("../library/ends_in_01.json")),
    ("only zeros", include_str!("../library/only_zeros.json")),
    (
        "at least one 1",
        include_str!("../library/at_least_one_1.json"),
    ),
];

/// Raised by [`load`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// There is no example with the given name.
    #[error("there is no example named '{0}'")]
    UnknownExample(String),
    /// The stored document could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Iterates over the names of all examples.
pub fn names() -> impl Iterator<Item = &'static str> {
    EXAMPLES.iter().map(|(name, _)| *name)
}

/// Returns the interchange document of the example called `name`.
pub fn source(name: &str) -> Option<&'static str> {
    EXAMPLES
        .iter()
        .find_map(|(n, text)| (*n == name).then_some(*text))
}

/// Decodes the example called `name` with [`codec::decode`], exactly like a user file.
pub fn load(name: &str) -> Result<Dfa, LoadError> {
    let text = source(name).ok_or_else(|| LoadError::UnknownExample(name.to_string()))?;
    Ok(codec::decode(text)?)
}

#[cfg(test)]
mod tests {
    use super::{load, names, LoadError};

    #[test]
    fn every_example_decodes() {
        assert_eq!(names().count(), 4);
        for name in names() {
            let dfa = load(name).unwrap();
            assert!(!dfa.is_empty_language(), "{name} accepts nothing");
        }
    }

    #[test]
    fn unknown_name() {
        assert!(matches!(
            load("palindromes"),
            Err(LoadError::UnknownExample(name)) if name == "palindromes"
        ));
    }

    #[test]
    fn example_languages() {
        let zeros = load("only zeros").unwrap();
        assert_eq!(zeros.enumerate(3).words(), ["", "0", "00"]);
        assert_eq!(zeros.accepts("010"), Ok(false));

        let ones = load("at least one 1").unwrap();
        assert_eq!(ones.accepts("0001"), Ok(true));
        assert_eq!(ones.accepts("000"), Ok(false));
    }
}
