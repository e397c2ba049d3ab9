use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfa_sim::{Dfa, EnumerationConfig, RawDefinition};

const SYMBOLS: [&str; 4] = ["a", "b", "c", "d"];
const RANDOM: [usize; 3] = [3, 2, 7];

fn pseudorandom_sprout(states: usize, n: usize) -> Dfa {
    let labels: Vec<String> = (0..states).map(|i| format!("q{i}")).collect();
    let mut raw = RawDefinition::new()
        .with_states(labels.clone())
        .with_symbols(SYMBOLS)
        .with_start(labels[0].clone())
        .with_accepting(labels.iter().step_by(3).cloned());

    let mut c: usize = 0;
    for sym in SYMBOLS {
        for label in &labels {
            raw.add_transition((label.clone(), sym, labels[c].clone()));
            c = c.wrapping_add(n) % states;
        }
    }
    raw.validate().expect("every pair of state and symbol has a transition")
}

fn benchings(c: &mut Criterion) {
    let automata: Vec<Dfa> = RANDOM
        .iter()
        .map(|n| pseudorandom_sprout(16, *n))
        .collect();
    let word = "abcdacbdbadc".repeat(20);

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            for dfa in &automata {
                black_box(dfa.evaluate(black_box(&word)).unwrap());
            }
        })
    });
    c.bench_function("enumerate", |b| {
        b.iter(|| {
            for dfa in &automata {
                black_box(dfa.enumerate_with(EnumerationConfig::new(100).with_max_length(12)));
            }
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchings
}
criterion_main!(benches);
