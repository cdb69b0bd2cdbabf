//! JSON roster files: the characters a game master can bring into combat.
//!
//! A roster is a JSON array of candidates:
//!
//! ```json
//! [{"characterId": 7, "name": "Grog", "isNpc": false,
//!   "defaults": {"maxHp": 45, "baseInitiative": 3}}]
//! ```

use std::fs;
use std::path::Path;

use tk_engine::{Candidate, ParticipantSource, TrackerError, TrackerResult};

/// Characters loaded from a roster file.
#[derive(Debug, Clone, Default)]
pub struct RosterFile {
    candidates: Vec<Candidate>,
}

impl RosterFile {
    /// Read and parse a roster file.
    pub fn load(path: &Path) -> TrackerResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| TrackerError::Roster(format!("cannot read {}: {e}", path.display())))?;
        let candidates: Vec<Candidate> = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), count = candidates.len(), "loaded roster");
        Ok(Self { candidates })
    }
}

impl ParticipantSource for RosterFile {
    fn candidates(&self) -> Vec<Candidate> {
        self.candidates.clone()
    }
}
