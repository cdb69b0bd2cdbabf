//! Turn-order state machine.
//!
//! An [`Encounter`] owns the ordered participant list and the round
//! counter. Exactly zero or one participant holds the turn at any time.
//! Mutators that receive an unknown id do nothing.

mod reorder;

use std::cmp::Reverse;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::participant::{Participant, ParticipantId};

/// Sides on the initiative die.
const INITIATIVE_DIE: i32 = 20;

/// The outcome of one participant's initiative roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeRoll {
    /// Who rolled.
    pub id: ParticipantId,
    /// The natural d20 value (1-20).
    pub natural: i32,
    /// The modifier that was added.
    pub modifier: i32,
    /// `natural + modifier`, stored as the participant's result.
    pub total: i32,
}

impl std::fmt::Display for InitiativeRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{}: d20 {} {:+} = {}",
            self.id, self.natural, self.modifier, self.total
        )
    }
}

/// The whole state of one combat tracking instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    participants: Vec<Participant>,
    round: u32,
}

impl Encounter {
    /// Create an empty encounter at round 1.
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            round: 1,
        }
    }

    pub(crate) fn with_round(mut self, round: u32) -> Self {
        self.round = round.max(1);
        self
    }

    /// Participants in turn order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Current round number (1-based).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns true if nobody is tracked.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Look up a participant by id.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Position of a participant in turn order.
    pub fn position(&self, id: ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    /// The participant currently holding the turn, if any.
    pub fn current(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.has_turn)
    }

    fn current_index(&self) -> Option<usize> {
        self.participants.iter().position(|p| p.has_turn)
    }

    fn find_mut(&mut self, id: ParticipantId, op: &str) -> Option<&mut Participant> {
        let found = self.participants.iter_mut().find(|p| p.id == id);
        if found.is_none() {
            tracing::debug!(%id, op, "no participant with this id, ignoring");
        }
        found
    }

    /// Append a participant to the end of the turn order.
    pub fn add(&mut self, entry: Participant) {
        tracing::trace!(id = %entry.id, name = %entry.name, "adding participant");
        self.participants.push(entry);
        self.repair_holders();
    }

    /// Replace the whole participant list at once. The round is kept.
    pub fn replace_participants(&mut self, entries: Vec<Participant>) {
        self.participants = entries;
        self.repair_holders();
    }

    /// Remove a participant. If it held the turn, nobody holds it afterwards.
    pub fn remove(&mut self, id: ParticipantId) {
        match self.position(id) {
            Some(index) => {
                let removed = self.participants.remove(index);
                if removed.has_turn {
                    tracing::debug!(%id, "removed the turn holder, turn is unseated");
                }
            }
            None => tracing::debug!(%id, op = "remove", "no participant with this id, ignoring"),
        }
    }

    /// Overwrite a participant's hit points. Negative values are kept as-is.
    pub fn edit_hp(&mut self, id: ParticipantId, new_hp: i32) {
        if let Some(p) = self.find_mut(id, "edit_hp") {
            p.hp = new_hp;
        }
    }

    /// Add `delta` to a participant's hit points.
    pub fn adjust_hp(&mut self, id: ParticipantId, delta: i32) {
        if let Some(hp) = self.get(id).map(|p| p.hp) {
            self.edit_hp(id, hp.saturating_add(delta));
        } else {
            tracing::debug!(%id, op = "adjust_hp", "no participant with this id, ignoring");
        }
    }

    /// Set (or clear) an initiative result without rolling.
    ///
    /// Call [`Encounter::sort_by_result`] afterwards to reorder.
    pub fn set_initiative_result(&mut self, id: ParticipantId, result: Option<i32>) {
        if let Some(p) = self.find_mut(id, "set_initiative_result") {
            p.initiative_result = result;
        }
    }

    /// Attach a status tag unless the participant already has it.
    pub fn add_status(&mut self, id: ParticipantId, tag: impl Into<String>) {
        let tag = tag.into();
        let Some(p) = self.find_mut(id, "add_status") else {
            return;
        };
        if !p.status_tags.contains(&tag) {
            p.status_tags.push(tag);
        }
    }

    /// Remove every occurrence of a status tag.
    pub fn remove_status(&mut self, id: ParticipantId, tag: &str) {
        if let Some(p) = self.find_mut(id, "remove_status") {
            p.status_tags.retain(|t| t != tag);
        }
    }

    /// Roll a d20 plus modifier for every participant, sort by the results,
    /// restart at round 1 and give the first participant the turn.
    ///
    /// Ties keep their previous relative order. Returns one roll per
    /// participant, in the order they were rolled.
    pub fn roll_initiative<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<InitiativeRoll> {
        if self.participants.is_empty() {
            tracing::debug!("roll_initiative on an empty encounter, ignoring");
            return Vec::new();
        }

        let rolls: Vec<InitiativeRoll> = self
            .participants
            .iter_mut()
            .map(|p| {
                let natural = rng.random_range(1..=INITIATIVE_DIE);
                let total = natural.saturating_add(p.initiative_modifier);
                p.initiative_result = Some(total);
                tracing::trace!(id = %p.id, natural, total, "rolled initiative");
                InitiativeRoll {
                    id: p.id,
                    natural,
                    modifier: p.initiative_modifier,
                    total,
                }
            })
            .collect();

        self.sort_by_result();
        self.round = 1;
        self.set_all_has_turn(false);
        self.participants[0].has_turn = true;
        rolls
    }

    /// Stable sort, highest initiative first. Participants without a result
    /// count as 0. Turn flags and the round are left alone.
    pub fn sort_by_result(&mut self) {
        self.participants.sort_by_key(|p| Reverse(p.sort_key()));
    }

    /// Pass the turn to the next participant, wrapping to the first.
    ///
    /// The round increments only when a seated holder at the last position
    /// wraps around. Advancing with no holder seats the first participant.
    pub fn advance(&mut self) {
        let len = self.participants.len();
        if len == 0 {
            tracing::debug!("advance on an empty encounter, ignoring");
            return;
        }

        let previous = self.current_index();
        let next = previous.map_or(0, |i| (i + 1) % len);
        if previous == Some(len - 1) && next == 0 {
            self.round += 1;
            tracing::debug!(round = self.round, "new round");
        }

        self.set_all_has_turn(false);
        self.participants[next].has_turn = true;
        tracing::trace!(id = %self.participants[next].id, "turn passed");
    }

    /// Give the turn to a specific participant.
    pub fn set_current(&mut self, id: ParticipantId) {
        let Some(index) = self.position(id) else {
            tracing::debug!(%id, op = "set_current", "no participant with this id, ignoring");
            return;
        };
        self.set_all_has_turn(false);
        self.participants[index].has_turn = true;
    }

    /// Set the turn flag on every participant to the same value.
    pub fn set_all_has_turn(&mut self, value: bool) {
        for p in &mut self.participants {
            p.has_turn = value;
        }
    }

    /// Drop every participant and return to round 1.
    pub fn clear(&mut self) {
        self.participants.clear();
        self.round = 1;
    }
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new()
    }
}
