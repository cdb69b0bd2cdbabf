//! Buffered hit-point editing.
//!
//! Keystrokes go into a text buffer; the encounter only changes when the
//! buffer is committed (blur or confirm). Text that is not an integer is
//! thrown away and the buffer falls back to the committed value.

use crate::encounter::Encounter;
use crate::participant::{Participant, ParticipantId};

/// What triggered a buffer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpInputEvent {
    /// The input lost focus. Commits.
    Blur,
    /// The confirm key was pressed. Commits.
    Confirm,
    /// The cancel key was pressed. Resets without committing.
    Cancel,
}

/// Result of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The encounter now holds this value.
    Committed(i32),
    /// Nothing was written: the buffer was not an integer, or the
    /// participant is no longer in the encounter.
    Discarded,
    /// The edit was cancelled.
    Cancelled,
}

/// Text buffer for editing one participant's hit points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpInput {
    id: ParticipantId,
    buffer: String,
    committed: i32,
}

impl HpInput {
    /// Start editing a participant, with the buffer showing its current HP.
    pub fn new(participant: &Participant) -> Self {
        Self {
            id: participant.id,
            buffer: participant.hp.to_string(),
            committed: participant.hp,
        }
    }

    /// Current buffer text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer text. The encounter is not touched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Reload the buffer if the participant's HP changed elsewhere.
    pub fn sync(&mut self, encounter: &Encounter) {
        let changed = encounter
            .get(self.id)
            .map(|p| p.hp)
            .filter(|&hp| hp != self.committed);
        if let Some(hp) = changed {
            self.reset_to(hp);
        }
    }

    /// Parse the buffer and write it to the encounter, or roll it back.
    ///
    /// Rollback uses the HP the encounter holds now, so a change made
    /// elsewhere since the last `sync` is never overwritten.
    pub fn commit(&mut self, encounter: &mut Encounter) -> CommitOutcome {
        let Some(current) = self.stored_hp(encounter) else {
            tracing::debug!(id = %self.id, "hp commit for a participant that is gone");
            self.reset_to(self.committed);
            return CommitOutcome::Discarded;
        };
        match self.buffer.trim().parse::<i32>() {
            Ok(value) => {
                encounter.edit_hp(self.id, value);
                self.reset_to(value);
                CommitOutcome::Committed(value)
            }
            Err(_) => {
                tracing::debug!(id = %self.id, text = %self.buffer, "discarding non-numeric hp");
                self.reset_to(current);
                CommitOutcome::Discarded
            }
        }
    }

    /// React to a focus or key event.
    pub fn handle(&mut self, event: HpInputEvent, encounter: &mut Encounter) -> CommitOutcome {
        match event {
            HpInputEvent::Blur | HpInputEvent::Confirm => self.commit(encounter),
            HpInputEvent::Cancel => {
                let hp = self.stored_hp(encounter).unwrap_or(self.committed);
                self.reset_to(hp);
                CommitOutcome::Cancelled
            }
        }
    }

    /// Add one hit point directly, skipping the buffer.
    pub fn increment(&mut self, encounter: &mut Encounter) {
        encounter.adjust_hp(self.id, 1);
        self.sync(encounter);
    }

    /// Remove one hit point directly, skipping the buffer.
    pub fn decrement(&mut self, encounter: &mut Encounter) {
        encounter.adjust_hp(self.id, -1);
        self.sync(encounter);
    }

    fn stored_hp(&self, encounter: &Encounter) -> Option<i32> {
        encounter.get(self.id).map(|p| p.hp)
    }

    fn reset_to(&mut self, hp: i32) {
        self.committed = hp;
        self.buffer = hp.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Encounter, HpInput) {
        let mut enc = Encounter::new();
        enc.add(Participant::new(1, "Keyleth", 30));
        let input = HpInput::new(enc.get(ParticipantId(1)).unwrap());
        (enc, input)
    }

    fn hp(enc: &Encounter) -> i32 {
        enc.get(ParticipantId(1)).unwrap().hp
    }

    #[test]
    fn buffer_starts_at_current_hp() {
        let (_, input) = setup();
        assert_eq!(input.text(), "30");
    }

    #[test]
    fn typing_does_not_touch_encounter() {
        let (enc, mut input) = setup();
        input.set_text("12");
        assert_eq!(hp(&enc), 30);
    }

    #[test]
    fn confirm_commits_parsed_value() {
        let (mut enc, mut input) = setup();
        input.set_text(" -4 ");
        assert_eq!(
            input.handle(HpInputEvent::Confirm, &mut enc),
            CommitOutcome::Committed(-4)
        );
        assert_eq!(hp(&enc), -4);
        assert_eq!(input.text(), "-4");
    }

    #[test]
    fn blur_commits() {
        let (mut enc, mut input) = setup();
        input.set_text("18");
        input.handle(HpInputEvent::Blur, &mut enc);
        assert_eq!(hp(&enc), 18);
    }

    #[test]
    fn invalid_text_rolls_back() {
        let (mut enc, mut input) = setup();
        input.set_text("2d6");
        let before = enc.clone();
        assert_eq!(input.commit(&mut enc), CommitOutcome::Discarded);
        assert_eq!(enc, before);
        assert_eq!(input.text(), "30");
    }

    #[test]
    fn empty_text_rolls_back() {
        let (mut enc, mut input) = setup();
        input.set_text("");
        assert_eq!(input.commit(&mut enc), CommitOutcome::Discarded);
        assert_eq!(input.text(), "30");
        assert_eq!(hp(&enc), 30);
    }

    #[test]
    fn cancel_resets_without_commit() {
        let (mut enc, mut input) = setup();
        input.set_text("1");
        assert_eq!(
            input.handle(HpInputEvent::Cancel, &mut enc),
            CommitOutcome::Cancelled
        );
        assert_eq!(input.text(), "30");
        assert_eq!(hp(&enc), 30);
    }

    #[test]
    fn increment_and_decrement_bypass_buffer() {
        let (mut enc, mut input) = setup();
        input.set_text("garbage");
        input.increment(&mut enc);
        assert_eq!(hp(&enc), 31);
        assert_eq!(input.text(), "31");

        input.decrement(&mut enc);
        input.decrement(&mut enc);
        assert_eq!(hp(&enc), 29);
        assert_eq!(input.text(), "29");
    }

    #[test]
    fn sync_picks_up_external_change() {
        let (mut enc, mut input) = setup();
        input.set_text("25");
        enc.edit_hp(ParticipantId(1), 10);
        input.sync(&enc);
        assert_eq!(input.text(), "10");
    }

    #[test]
    fn sync_keeps_typing_when_hp_unchanged() {
        let (enc, mut input) = setup();
        input.set_text("25");
        input.sync(&enc);
        assert_eq!(input.text(), "25");
    }

    #[test]
    fn rollback_after_external_change_uses_new_value() {
        let (mut enc, mut input) = setup();
        enc.edit_hp(ParticipantId(1), 5);
        input.sync(&enc);
        input.set_text("abc");
        input.commit(&mut enc);
        assert_eq!(input.text(), "5");
    }

    #[test]
    fn rollback_without_sync_keeps_external_change() {
        let (mut enc, mut input) = setup();
        enc.edit_hp(ParticipantId(1), 10);
        input.set_text("abc");
        assert_eq!(input.commit(&mut enc), CommitOutcome::Discarded);
        assert_eq!(input.text(), "10");
        assert_eq!(hp(&enc), 10);

        input.handle(HpInputEvent::Blur, &mut enc);
        assert_eq!(hp(&enc), 10);
    }

    #[test]
    fn cancel_without_sync_shows_external_change() {
        let (mut enc, mut input) = setup();
        enc.edit_hp(ParticipantId(1), 7);
        input.set_text("12");
        input.handle(HpInputEvent::Cancel, &mut enc);
        assert_eq!(input.text(), "7");
        assert_eq!(hp(&enc), 7);
    }

    #[test]
    fn commit_for_removed_participant_is_discarded() {
        let (mut enc, mut input) = setup();
        enc.remove(ParticipantId(1));
        input.set_text("9");
        assert_eq!(input.commit(&mut enc), CommitOutcome::Discarded);
        assert_eq!(input.text(), "30");
        assert!(enc.is_empty());
    }
}
