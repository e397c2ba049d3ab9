use std::fmt::{Display, Formatter};

use owo_colors::OwoColorize;
use tabled::{builder::Builder, settings::Style};

use crate::{Dfa, TransitionSystem};

impl Dfa {
    fn annotate_state(&self, q: usize) -> String {
        let label = &self.states[q];
        let label = if self.state_color(q) {
            format!("{}*", label.green().bold())
        } else {
            label.blue().to_string()
        };
        if q == self.initial() {
            format!("→ {}", label.underline())
        } else {
            label
        }
    }
}

/// Renders the transition table: one row per state, one column per symbol. The initial state is
/// marked with an arrow and accepting states with a trailing `*`.
impl Display for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(
            std::iter::once("δ".bright_yellow().to_string()).chain(
                self.alphabet()
                    .universe()
                    .map(|symbol| symbol.purple().to_string()),
            ),
        );
        for q in self.state_indices() {
            builder.push_record(
                std::iter::once(self.annotate_state(q)).chain(
                    (0..self.alphabet().size()).map(|a| self.states[self.successor(q, a)].clone()),
                ),
            );
        }
        let mut transition_table = builder.build();
        transition_table.with(Style::modern());
        write!(f, "{}", transition_table)
    }
}
