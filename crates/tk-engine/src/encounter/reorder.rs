//! Manual reordering and turn-holder repair.

use crate::participant::ParticipantId;

use super::Encounter;

impl Encounter {
    /// Swap a participant with the one before it. The turn flag moves
    /// with the participant. No-op for the first entry or an unknown id.
    pub fn move_up(&mut self, id: ParticipantId) {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.participants.swap(index, index - 1);
                self.repair_holders();
            }
            Some(_) => {}
            None => tracing::debug!(%id, op = "move_up", "no participant with this id, ignoring"),
        }
    }

    /// Swap a participant with the one after it. The turn flag moves
    /// with the participant. No-op for the last entry or an unknown id.
    pub fn move_down(&mut self, id: ParticipantId) {
        match self.position(id) {
            Some(index) if index + 1 < self.participants.len() => {
                self.participants.swap(index, index + 1);
                self.repair_holders();
            }
            Some(_) => {}
            None => {
                tracing::debug!(%id, op = "move_down", "no participant with this id, ignoring")
            }
        }
    }

    /// Take `moved` out of the list and put it right after `target`.
    ///
    /// No-op when both ids are the same or either is unknown.
    pub fn move_after(&mut self, moved: ParticipantId, target: ParticipantId) {
        if moved == target {
            return;
        }
        let (Some(from), Some(_)) = (self.position(moved), self.position(target)) else {
            tracing::debug!(%moved, %target, op = "move_after", "unknown id, ignoring");
            return;
        };

        let entry = self.participants.remove(from);
        let to = self
            .position(target)
            .map_or(self.participants.len(), |i| i + 1);
        self.participants.insert(to, entry);
        self.repair_holders();
    }

    /// Keep the first turn holder in list order and clear any others.
    ///
    /// Returns how many extra holders were cleared. Anything other than 0
    /// means an earlier mutation broke the single-holder invariant.
    pub fn normalize_holders(&mut self) -> usize {
        let mut seen = false;
        let mut cleared = 0;
        for p in self.participants.iter_mut().filter(|p| p.has_turn) {
            if seen {
                p.has_turn = false;
                cleared += 1;
            }
            seen = true;
        }
        cleared
    }

    pub(super) fn repair_holders(&mut self) {
        let cleared = self.normalize_holders();
        if cleared > 0 {
            tracing::warn!(cleared, "more than one turn holder found, kept the first");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::encounter::Encounter;
    use crate::participant::{Participant, ParticipantId};

    fn id(n: u64) -> ParticipantId {
        ParticipantId(n)
    }

    fn order(enc: &Encounter) -> Vec<u64> {
        enc.participants().iter().map(|p| p.id.0).collect()
    }

    fn holder_ids(enc: &Encounter) -> Vec<u64> {
        enc.participants()
            .iter()
            .filter(|p| p.has_turn)
            .map(|p| p.id.0)
            .collect()
    }

    fn abc() -> Encounter {
        let mut enc = Encounter::new();
        enc.add(Participant::new(1, "A", 10));
        enc.add(Participant::new(2, "B", 10));
        enc.add(Participant::new(3, "C", 10));
        enc
    }

    #[test]
    fn move_up_swaps_with_previous() {
        let mut enc = abc();
        enc.move_up(id(3));
        assert_eq!(order(&enc), vec![1, 3, 2]);
    }

    #[test]
    fn move_up_first_is_noop() {
        let mut enc = abc();
        let before = enc.clone();
        enc.move_up(id(1));
        assert_eq!(enc, before);
    }

    #[test]
    fn move_down_swaps_with_next() {
        let mut enc = abc();
        enc.move_down(id(1));
        assert_eq!(order(&enc), vec![2, 1, 3]);
    }

    #[test]
    fn move_down_last_is_noop() {
        let mut enc = abc();
        let before = enc.clone();
        enc.move_down(id(3));
        assert_eq!(enc, before);
    }

    #[test]
    fn moves_with_unknown_id_are_noops() {
        let mut enc = abc();
        enc.set_current(id(2));
        let before = enc.clone();
        enc.move_up(id(9));
        enc.move_down(id(9));
        enc.move_after(id(9), id(1));
        enc.move_after(id(1), id(9));
        assert_eq!(enc, before);
    }

    #[test]
    fn turn_flag_moves_with_entry() {
        let mut enc = abc();
        enc.set_current(id(2));
        enc.move_up(id(2));
        assert_eq!(order(&enc), vec![2, 1, 3]);
        assert_eq!(holder_ids(&enc), vec![2]);

        enc.move_down(id(1));
        assert_eq!(order(&enc), vec![2, 3, 1]);
        assert_eq!(holder_ids(&enc), vec![2]);
    }

    #[test]
    fn move_after_preserves_holder() {
        let mut enc = abc();
        enc.set_current(id(1));
        enc.move_after(id(1), id(3));
        assert_eq!(order(&enc), vec![2, 3, 1]);
        assert_eq!(holder_ids(&enc), vec![1]);
    }

    #[test]
    fn move_after_backwards() {
        let mut enc = abc();
        enc.add(Participant::new(4, "D", 10));
        enc.move_after(id(4), id(1));
        assert_eq!(order(&enc), vec![1, 4, 2, 3]);
    }

    #[test]
    fn move_after_self_is_noop() {
        let mut enc = abc();
        let before = enc.clone();
        enc.move_after(id(2), id(2));
        assert_eq!(enc, before);
    }

    #[test]
    fn reordering_never_needs_repair() {
        let mut enc = abc();
        enc.set_current(id(3));
        enc.move_up(id(3));
        enc.move_after(id(1), id(3));
        enc.move_down(id(2));
        assert_eq!(enc.normalize_holders(), 0);
    }

    #[test]
    fn normalize_keeps_first_holder() {
        let mut raw = vec![
            Participant::new(1, "A", 1),
            Participant::new(2, "B", 1),
            Participant::new(3, "C", 1),
        ];
        raw[1].has_turn = true;
        raw[2].has_turn = true;
        let mut enc = Encounter::new();
        enc.participants = raw;
        assert_eq!(enc.normalize_holders(), 1);
        assert_eq!(holder_ids(&enc), vec![2]);
    }
}
