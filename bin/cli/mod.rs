use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct DfaSim {
    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub verbose: bool,
    /// Turn on debugging information
    #[arg(short, long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the automaton comes from: a JSON file, stdin or the bundled examples.
#[derive(Args)]
pub struct Source {
    /// File holding the automaton, reads from stdin if absent or `-`
    #[arg(short, long, conflicts_with = "example")]
    pub input: Option<String>,
    /// Name of a bundled example to use instead of a file
    #[arg(short, long)]
    pub example: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Validates an automaton and prints its transition table")]
    Check {
        #[command(flatten)]
        source: Source,
    },
    #[command(about = "Runs a word on an automaton and prints every step")]
    Run {
        #[command(flatten)]
        source: Source,
        /// The word to run, may be empty
        word: String,
    },
    #[command(about = "Prints the shortest words accepted by an automaton")]
    Enumerate {
        #[command(flatten)]
        source: Source,
        /// How many words to print
        #[arg(short = 'n', long, default_value_t = dfa_sim::enumerate::DEFAULT_LIMIT)]
        limit: usize,
        /// Longest word length to explore
        #[arg(short, long, default_value_t = dfa_sim::enumerate::DEFAULT_MAX_LENGTH)]
        max_length: usize,
    },
    #[command(about = "Lists the bundled example automata")]
    Examples,
    #[command(about = "Prints the JSON document of a bundled example")]
    Export { name: String },
}
