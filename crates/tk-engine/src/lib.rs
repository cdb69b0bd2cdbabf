//! Combat turn-order engine for Turnkeeper.
//!
//! Tracks the participants of an encounter, rolls initiative, moves a
//! single turn pointer round over round, and supports manual reordering.
//! Also provides the draft step that turns candidate characters into
//! participants, and the buffered HP input used by presentation layers.

pub mod config;
pub mod encounter;
pub mod error;
pub mod hp_input;
pub mod participant;
pub mod selection;
pub mod snapshot;

pub use config::TrackerConfig;
pub use encounter::{Encounter, InitiativeRoll};
pub use error::{TrackerError, TrackerResult};
pub use hp_input::{CommitOutcome, HpInput, HpInputEvent};
pub use participant::{Category, Participant, ParticipantId};
pub use selection::{Candidate, CandidateDefaults, Draft, DraftField, ParticipantSource, Selection};
pub use snapshot::{EncounterSnapshot, SNAPSHOT_VERSION};
