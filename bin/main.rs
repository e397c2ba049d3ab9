use anyhow::Context;
use clap::Parser;
use dfa_sim::{library, EnumerationConfig};
use tracing::Level;

mod cli;
mod io;

use cli::{Commands, DfaSim};

fn main() -> anyhow::Result<()> {
    let args = DfaSim::parse();

    let level = if args.verbose {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Could not install the logger")?;

    match args.command {
        Commands::Check { source } => {
            let dfa = io::load(&source)?;
            println!("{dfa}");
        }
        Commands::Run { source, word } => {
            let dfa = io::load(&source)?;
            let evaluation = dfa.evaluate(&word)?;
            println!("{}", evaluation.trace());
            println!(
                "{}",
                if evaluation.accepted() {
                    "ACCEPTED"
                } else {
                    "REJECTED"
                }
            );
        }
        Commands::Enumerate {
            source,
            limit,
            max_length,
        } => {
            let dfa = io::load(&source)?;
            let config = EnumerationConfig::new(limit).with_max_length(max_length);
            let result = dfa.enumerate_with(config);
            for word in result.words() {
                println!("{}", if word.is_empty() { "ε" } else { word.as_str() });
            }
            if let Some(missing) = result.limit_not_reached() {
                tracing::warn!("{missing}");
            }
        }
        Commands::Examples => {
            for name in library::names() {
                println!("{name}");
            }
        }
        Commands::Export { name } => {
            let text = library::source(&name)
                .with_context(|| format!("There is no example named '{name}'"))?;
            print!("{text}");
        }
    }
    Ok(())
}
