//! The interchange format is a JSON document with five fields:
//!
//! ```json
//! {
//!   "states": ["q0", "q1"],
//!   "alphabet": ["0", "1"],
//!   "start": "q0",
//!   "accepting": ["q0"],
//!   "transitions": [
//!     { "state": "q0", "symbol": "0", "next_state": "q0" },
//!     { "state": "q0", "symbol": "1", "next_state": "q1" },
//!     { "state": "q1", "symbol": "0", "next_state": "q1" },
//!     { "state": "q1", "symbol": "1", "next_state": "q0" }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored. For compatibility with older files, `initial_state` and
//! `accepting_states` are understood as well, and `transitions` may also be given as a nested
//! table mapping each state to an object from symbols to target states.
use std::fmt;

use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{Dfa, RawDefinition, RawTransition, TransitionSystem, ValidationErrors};

/// Reasons for which [`decode`] can fail. A document that is well-formed but describes an invalid
/// automaton yields the same [`ValidationErrors`] as raw input entered by hand.
///
/// Fields are named by their path in the document, e.g. `transitions[2].next_state` for an
/// entry of the list form or `transitions.q0.a` for a cell of the table form.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not a JSON object.
    #[error("malformed document: {0}")]
    Syntax(#[from] serde_json::Error),
    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(String),
    /// A field is present but has the wrong shape.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        /// Path of the field.
        field: String,
        /// What was expected there.
        expected: &'static str,
    },
    /// The document describes an invalid automaton.
    #[error("invalid automaton:\n{0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Serialize)]
struct Entry<'a> {
    state: &'a str,
    symbol: String,
    next_state: &'a str,
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    states: Vec<&'a str>,
    alphabet: Vec<String>,
    start: &'a str,
    accepting: Vec<&'a str>,
    transitions: Vec<Entry<'a>>,
}

/// A JSON value whose objects keep their entries in document order, repeated keys included, so
/// that two cells for the same state and symbol both reach validation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Scalar,
    Text(String),
    List(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Node, E> {
        Ok(Node::Text(text.to_string()))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<Node, E> {
        Ok(Node::Text(text))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = vec![];
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = vec![];
        while let Some(entry) = map.next_entry::<String, Node>()? {
            entries.push(entry);
        }
        Ok(Node::Object(entries))
    }
}

#[derive(Debug, Deserialize)]
struct PartialDocument {
    states: Option<Node>,
    alphabet: Option<Node>,
    #[serde(alias = "initial_state")]
    start: Option<Node>,
    #[serde(alias = "accepting_states")]
    accepting: Option<Node>,
    transitions: Option<Node>,
}

fn invalid(field: impl Into<String>, expected: &'static str) -> DecodeError {
    DecodeError::InvalidField {
        field: field.into(),
        expected,
    }
}

fn required(field: Option<Node>, name: &str) -> Result<Node, DecodeError> {
    field.ok_or_else(|| DecodeError::MissingField(name.to_string()))
}

fn text(node: Node, path: &str) -> Result<String, DecodeError> {
    match node {
        Node::Text(text) => Ok(text),
        _ => Err(invalid(path, "a string")),
    }
}

fn texts(node: Node, path: &str) -> Result<Vec<String>, DecodeError> {
    let Node::List(items) = node else {
        return Err(invalid(path, "a list of strings"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| text(item, &format!("{path}[{i}]")))
        .collect()
}

/// Reads one entry `{"state": .., "symbol": .., "next_state": ..}` of the list form.
fn entry(node: Node, path: &str) -> Result<RawTransition, DecodeError> {
    let Node::Object(fields) = node else {
        return Err(invalid(path, "an object with `state`, `symbol` and `next_state`"));
    };
    let mut cells: [(&str, Option<String>); 3] =
        [("state", None), ("symbol", None), ("next_state", None)];
    for (key, value) in fields {
        if let Some((name, cell)) = cells.iter_mut().find(|(name, _)| *name == key) {
            let path = format!("{path}.{name}");
            if cell.is_some() {
                return Err(invalid(path, "given only once"));
            }
            *cell = Some(text(value, &path)?);
        }
    }
    let [from, symbol, to] = cells.map(|(name, cell)| {
        cell.ok_or_else(|| DecodeError::MissingField(format!("{path}.{name}")))
    });
    Ok(RawTransition::from((from?, symbol?, to?)))
}

/// Reads the nested `{state: {symbol: target}}` form, one row per cell in document order.
fn table(rows: Vec<(String, Node)>) -> Result<Vec<RawTransition>, DecodeError> {
    let mut transitions = vec![];
    for (from, row) in rows {
        let path = format!("transitions.{from}");
        let Node::Object(targets) = row else {
            return Err(invalid(path, "an object from symbols to states"));
        };
        for (symbol, to) in targets {
            let to = text(to, &format!("{path}.{symbol}"))?;
            transitions.push(RawTransition::from((from.clone(), symbol, to)));
        }
    }
    Ok(transitions)
}

/// Writes `dfa` as a pretty-printed JSON document. States and symbols keep their declaration
/// order and the transitions are listed state by state, symbol by symbol.
pub fn encode(dfa: &Dfa) -> String {
    let document = Document {
        states: dfa.states().collect(),
        alphabet: dfa.alphabet().universe().map(String::from).collect(),
        start: dfa.start(),
        accepting: dfa.accepting_states().collect(),
        transitions: dfa
            .transitions()
            .map(|(state, symbol, next_state)| Entry {
                state,
                symbol: symbol.to_string(),
                next_state,
            })
            .collect(),
    };
    trace!("encoding automaton with {} states", document.states.len());
    serde_json::to_string_pretty(&document).expect("a document of strings always serializes")
}

/// Reads a [`Dfa`] from a JSON document, see the [module documentation](self) for the format.
/// Nothing is filled in with defaults: every field must be present and the described automaton
/// must pass [`RawDefinition::validate`].
pub fn decode(text: &str) -> Result<Dfa, DecodeError> {
    let document: PartialDocument = serde_json::from_str(text)?;
    let raw = document.into_raw()?;
    debug!("decoded document with {} transition rows", raw.transitions().len());
    Ok(raw.validate()?)
}

impl PartialDocument {
    fn into_raw(self) -> Result<RawDefinition, DecodeError> {
        let states = texts(required(self.states, "states")?, "states")?;
        let alphabet = texts(required(self.alphabet, "alphabet")?, "alphabet")?;
        let start = text(required(self.start, "start")?, "start")?;
        let accepting = texts(required(self.accepting, "accepting")?, "accepting")?;
        let transitions = match required(self.transitions, "transitions")? {
            Node::List(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(i, node)| entry(node, &format!("transitions[{i}]")))
                .collect::<Result<Vec<_>, _>>()?,
            Node::Object(rows) => table(rows)?,
            _ => return Err(invalid("transitions", "a list of entries or a table")),
        };
        Ok(RawDefinition::new()
            .with_states(states)
            .with_symbols(alphabet)
            .with_start(start)
            .with_accepting(accepting)
            .with_transitions(transitions))
    }
}
