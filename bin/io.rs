use std::io::Read;

use anyhow::Context;
use dfa_sim::{library, Dfa};

use crate::cli::Source;

pub fn from_file_or_stdin(maybe_file_name: Option<&str>) -> anyhow::Result<String> {
    match maybe_file_name {
        Some(f) if f != "-" => {
            tracing::debug!("Reading automaton from {f}");
            std::fs::read_to_string(f).with_context(|| format!("Unable to read file {f}"))
        }
        _ => {
            tracing::debug!("No input files specified, using stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Error when reading from stdin")?;
            Ok(buf)
        }
    }
}

pub fn load(source: &Source) -> anyhow::Result<Dfa> {
    let dfa = match &source.example {
        Some(name) => library::load(name)?,
        None => dfa_sim::decode(&from_file_or_stdin(source.input.as_deref())?)?,
    };
    tracing::info!(
        "Loaded automaton with {} states",
        dfa_sim::TransitionSystem::size(&dfa)
    );
    Ok(dfa)
}
