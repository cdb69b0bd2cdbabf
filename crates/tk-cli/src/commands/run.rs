use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use tk_engine::{Encounter, TrackerConfig};

use crate::console::CombatConsole;
use crate::roster::RosterFile;

pub fn run(seed: Option<u64>, roster: Option<&Path>) -> Result<(), String> {
    let mut config = TrackerConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut console = CombatConsole::new(&config);
    if let Some(path) = roster {
        let file = RosterFile::load(path).map_err(|e| format!("failed to load roster: {e}"))?;
        console = console.with_roster(&file);
    }

    println!("  {} Combat Tracker", "Starting".bold());
    match seed {
        Some(seed) => println!("  Seed: {seed}"),
        None => println!("  Seed: random"),
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let input = line.trim();
        if !input.is_empty() {
            match console.process(input) {
                Ok(output) if is_quit(input) => {
                    println!("{output}");
                    return Ok(());
                }
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{output}\n");
                    }
                    print_turn(console.encounter());
                }
                Err(e) => println!("{}\n", e.to_string().yellow()),
            }
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<(), String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())
}

fn is_quit(input: &str) -> bool {
    let cmd = input.split_whitespace().next().unwrap_or_default();
    cmd.eq_ignore_ascii_case("quit") || cmd.eq_ignore_ascii_case("q")
}

/// One-line reminder of whose turn it is, shown after each command.
fn print_turn(encounter: &Encounter) {
    if let Some(current) = encounter.current() {
        println!(
            "  {} round {} | {}\n",
            "Turn:".green().bold(),
            encounter.round(),
            current.name.bold()
        );
    }
}
