//! Versioned, serializable view of an encounter.
//!
//! The presentation layer reads `(participants, round)` after every
//! mutation; a snapshot packages that pair with a schema version so it
//! can be handed around as JSON.

use serde::{Deserialize, Serialize};

use crate::encounter::Encounter;
use crate::error::{TrackerError, TrackerResult};
use crate::participant::Participant;

/// Schema version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The state of an encounter at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    /// Schema version of this snapshot.
    pub version: u32,
    /// Participants in turn order.
    pub participants: Vec<Participant>,
    /// Round number.
    pub round: u32,
}

impl EncounterSnapshot {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Encounter {
    /// Capture the current participants and round.
    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            version: SNAPSHOT_VERSION,
            participants: self.participants().to_vec(),
            round: self.round(),
        }
    }

    /// Rebuild an encounter from a snapshot.
    ///
    /// A round of 0 is raised to 1, and only the first turn holder is kept.
    pub fn from_snapshot(snapshot: EncounterSnapshot) -> TrackerResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(TrackerError::UnsupportedSnapshotVersion(snapshot.version));
        }
        let mut encounter = Encounter::new().with_round(snapshot.round);
        encounter.replace_participants(snapshot.participants);
        Ok(encounter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{Category, ParticipantId};

    fn sample() -> Encounter {
        let mut enc = Encounter::new();
        enc.add(
            Participant::new(1, "Percy", 40)
                .with_hp_max(52)
                .with_modifier(4)
                .with_result(19),
        );
        enc.add(Participant::new(2, "Cultist", 9).with_category(Category::NpcEnemy));
        enc.add_status(ParticipantId(2), "frightened");
        enc.set_current(ParticipantId(1));
        enc.advance();
        enc.advance();
        enc
    }

    #[test]
    fn snapshot_captures_state() {
        let enc = sample();
        let snap = enc.snapshot();
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert_eq!(snap.round, 2);
        assert_eq!(snap.participants.len(), 2);
        assert!(snap.participants[0].has_turn);
    }

    #[test]
    fn json_restores_equal_encounter() {
        let enc = sample();
        let json = enc.snapshot().to_json().unwrap();
        assert!(json.contains("\"npc-enemy\""));
        assert!(json.contains("\"frightened\""));

        let restored = Encounter::from_snapshot(EncounterSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored, enc);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut snap = sample().snapshot();
        snap.version = 2;
        let err = Encounter::from_snapshot(snap).unwrap_err();
        assert!(matches!(err, TrackerError::UnsupportedSnapshotVersion(2)));
    }

    #[test]
    fn restore_repairs_double_holder() {
        let mut snap = sample().snapshot();
        for p in &mut snap.participants {
            p.has_turn = true;
        }
        let enc = Encounter::from_snapshot(snap).unwrap();
        assert_eq!(enc.participants().iter().filter(|p| p.has_turn).count(), 1);
        assert_eq!(enc.current().unwrap().id, ParticipantId(1));
    }

    #[test]
    fn restore_round_zero_starts_at_one() {
        let mut snap = sample().snapshot();
        snap.round = 0;
        assert_eq!(Encounter::from_snapshot(snap).unwrap().round(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            EncounterSnapshot::from_json("{\"version\": 1}"),
            Err(TrackerError::Serialization(_))
        ));
    }
}
