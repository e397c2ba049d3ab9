use dfa_sim::prelude::*;
use itertools::Itertools;

fn automata() -> Vec<Dfa> {
    let mut automata: Vec<Dfa> = library::names()
        .map(|name| library::load(name).unwrap())
        .collect();
    // divisibility by three of binary numbers, read most significant bit first
    automata.push(
        RawDefinition::from_fields("r0, r1, r2", "0, 1", "r0", "r0")
            .with_transitions([
                ("r0", "0", "r0"),
                ("r0", "1", "r1"),
                ("r1", "0", "r2"),
                ("r1", "1", "r0"),
                ("r2", "0", "r1"),
                ("r2", "1", "r2"),
            ])
            .validate()
            .unwrap(),
    );
    automata
}

/// All words over the alphabet of `dfa` up to the given length, in length-lexicographic order.
fn words_up_to(dfa: &Dfa, length: usize) -> Vec<String> {
    let symbols = dfa.alphabet().universe().collect_vec();
    let mut level = vec![String::new()];
    let mut words = level.clone();
    for _ in 0..length {
        level = level
            .iter()
            .flat_map(|w| symbols.iter().map(move |s| format!("{w}{s}")))
            .collect();
        words.extend(level.iter().cloned());
    }
    words
}

#[test]
fn traces_start_in_the_start_state_and_have_one_entry_per_symbol() {
    for dfa in automata() {
        for word in words_up_to(&dfa, 4) {
            let evaluation = dfa.evaluate(&word).unwrap();
            let trace = evaluation.trace();
            assert_eq!(trace.len(), word.chars().count() + 1);
            assert_eq!(trace.states().next(), Some(dfa.start()));
            assert_eq!(
                evaluation.accepted(),
                dfa.is_accepting(trace.final_state())
            );
        }
    }
}

#[test]
fn empty_word_is_accepted_iff_start_is_accepting() {
    for dfa in automata() {
        assert_eq!(
            dfa.evaluate("").unwrap().accepted(),
            dfa.is_accepting(dfa.start())
        );
    }
}

#[test]
fn codec_round_trip() {
    for dfa in automata() {
        assert_eq!(decode(&encode(&dfa)).unwrap(), dfa);
    }
}

#[test]
fn enumeration_matches_brute_force() {
    for dfa in automata() {
        let expected = words_up_to(&dfa, 6)
            .into_iter()
            .filter(|word| dfa.accepts(word).unwrap())
            .take(12)
            .collect_vec();
        let config = EnumerationConfig::new(12).with_max_length(6);
        let result = dfa.enumerate_with(config);
        assert_eq!(result.words(), expected);
        assert_eq!(result.is_complete(), expected.len() == 12);
    }
}

#[test]
fn enumeration_is_ordered() {
    for dfa in automata() {
        let result = dfa.enumerate(25);
        for (a, b) in result.words().iter().tuple_windows() {
            let [a_index, b_index] = [a, b]
                .map(|w| w.chars().map(|c| dfa.alphabet().index_of(c)).collect_vec());
            assert!(a.len() < b.len() || (a.len() == b.len() && a_index < b_index));
        }
    }
}

#[test]
fn incomplete_definitions_are_never_completed() {
    let dfa = library::load("ends in 01").unwrap();
    let raw = dfa.to_raw();
    for skipped in 0..raw.transitions().len() {
        let partial = RawDefinition::from_fields("q0, q1, q2", "0, 1", "q0", "q2").with_transitions(
            raw.transitions()
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skipped)
                .map(|(_, t)| t.clone()),
        );
        let missing = &raw.transitions()[skipped];
        let errors = partial.validate().unwrap_err();
        assert_eq!(
            errors.into_iter().collect_vec(),
            [ValidationError::MissingTransition {
                state: missing.from.clone(),
                symbol: missing.symbol.chars().next().unwrap(),
            }]
        );
    }
}

#[test]
fn edits_produce_independent_automata() {
    let original = library::load("parity of 1s").unwrap();
    let before = original.evaluate("11").unwrap();
    let edited = original
        .to_raw()
        .without_accepting()
        .with_accepting(["q1"])
        .validate()
        .unwrap();
    assert_ne!(edited, original);
    assert!(!edited.evaluate("11").unwrap().accepted());
    assert_eq!(original.evaluate("11").unwrap(), before);
    assert!(before.accepted());
}

#[test]
fn decoding_without_start_names_the_field() {
    let text = library::source("parity of 1s")
        .unwrap()
        .replace("\"start\"", "\"begin\"");
    let error = decode(&text).unwrap_err();
    assert!(matches!(&error, DecodeError::MissingField(field) if field == "start"));
    assert_eq!(error.to_string(), "missing field `start`");
}
