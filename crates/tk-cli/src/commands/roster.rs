use std::path::Path;

use tk_engine::ParticipantSource;

use crate::render;
use crate::roster::RosterFile;

pub fn run(file: &Path) -> Result<(), String> {
    let roster = RosterFile::load(file).map_err(|e| e.to_string())?;
    let candidates = roster.candidates();

    if candidates.is_empty() {
        println!("  No characters in roster.");
        return Ok(());
    }

    println!("{}", render::candidate_table(&candidates));
    println!();
    println!("  {} characters", candidates.len());

    Ok(())
}
