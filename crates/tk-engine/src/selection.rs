//! Selecting candidate characters and turning them into participants.
//!
//! Candidates come from a [`ParticipantSource`]. Each becomes a [`Draft`]
//! whose numbers stay editable text until [`Selection::confirm`] parses
//! them. Unparseable text becomes 0 at that point.

use serde::{Deserialize, Serialize};

use crate::participant::{Category, Participant, ParticipantId};

/// Default values a candidate brings into the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDefaults {
    /// Maximum hit points, pre-filled as the draft's HP.
    pub max_hp: Option<i32>,
    /// Base initiative modifier, pre-filled as the draft's initiative.
    pub base_initiative: Option<i32>,
}

/// A character that may join an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Identifier, reused as the participant id.
    pub character_id: u64,
    /// Display name.
    pub name: String,
    /// Whether the character is played by the game master.
    #[serde(default)]
    pub is_npc: bool,
    /// Optional pre-filled values.
    #[serde(default)]
    pub defaults: Option<CandidateDefaults>,
}

impl Candidate {
    /// Create a candidate without defaults.
    pub fn new(character_id: u64, name: impl Into<String>, is_npc: bool) -> Self {
        Self {
            character_id,
            name: name.into(),
            is_npc,
            defaults: None,
        }
    }

    /// Attach default max HP and initiative modifier.
    pub fn with_defaults(mut self, max_hp: Option<i32>, base_initiative: Option<i32>) -> Self {
        self.defaults = Some(CandidateDefaults {
            max_hp,
            base_initiative,
        });
        self
    }
}

/// Supplies the characters a user can pick from.
pub trait ParticipantSource {
    /// All candidates, in display order.
    fn candidates(&self) -> Vec<Candidate>;
}

impl ParticipantSource for Vec<Candidate> {
    fn candidates(&self) -> Vec<Candidate> {
        self.clone()
    }
}

/// Which text field of a draft to overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Hit points.
    Hp,
    /// Initiative modifier.
    Initiative,
}

impl std::str::FromStr for DraftField {
    type Err = crate::error::TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hp" => Ok(Self::Hp),
            "init" | "initiative" => Ok(Self::Initiative),
            other => Err(crate::error::TrackerError::InvalidArgument(format!(
                "unknown draft field '{other}', use: hp, init"
            ))),
        }
    }
}

/// An editable, not yet committed participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Candidate identifier.
    pub character_id: u64,
    /// Display name.
    pub name: String,
    /// Whether the candidate is an NPC.
    pub is_npc: bool,
    /// Whether the user ticked this draft.
    pub selected: bool,
    /// Hit points as typed.
    pub hp: String,
    /// Initiative modifier as typed.
    pub initiative: String,
}

impl From<Candidate> for Draft {
    fn from(c: Candidate) -> Self {
        let defaults = c.defaults.unwrap_or_default();
        Self {
            character_id: c.character_id,
            name: c.name,
            is_npc: c.is_npc,
            selected: false,
            hp: defaults.max_hp.map(|v| v.to_string()).unwrap_or_default(),
            initiative: defaults
                .base_initiative
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

impl Draft {
    fn to_participant(&self) -> Participant {
        let hp = parse_or_zero(&self.hp);
        Participant {
            id: ParticipantId(self.character_id),
            name: self.name.clone(),
            hp,
            hp_max: Some(hp),
            initiative_modifier: parse_or_zero(&self.initiative),
            initiative_result: None,
            category: Category::from_npc_flag(self.is_npc),
            status_tags: Vec::new(),
            has_turn: false,
        }
    }
}

fn parse_or_zero(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}

/// The checklist of drafts shown before an encounter starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    drafts: Vec<Draft>,
}

impl Selection {
    /// Build drafts from a list of candidates.
    pub fn new(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        Self {
            drafts: candidates.into_iter().map(Draft::from).collect(),
        }
    }

    /// Build drafts from everything a source offers.
    pub fn from_source(source: &impl ParticipantSource) -> Self {
        Self::new(source.candidates())
    }

    /// All drafts, in candidate order.
    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    /// Look up a draft.
    pub fn get(&self, character_id: u64) -> Option<&Draft> {
        self.drafts.iter().find(|d| d.character_id == character_id)
    }

    fn get_mut(&mut self, character_id: u64) -> Option<&mut Draft> {
        let found = self
            .drafts
            .iter_mut()
            .find(|d| d.character_id == character_id);
        if found.is_none() {
            tracing::debug!(character_id, "no draft with this id, ignoring");
        }
        found
    }

    /// Flip the selection of one draft.
    pub fn toggle(&mut self, character_id: u64) {
        if let Some(d) = self.get_mut(character_id) {
            d.selected = !d.selected;
        }
    }

    /// Overwrite the HP or initiative text of one draft.
    pub fn set_field(&mut self, character_id: u64, field: DraftField, value: impl Into<String>) {
        if let Some(d) = self.get_mut(character_id) {
            match field {
                DraftField::Hp => d.hp = value.into(),
                DraftField::Initiative => d.initiative = value.into(),
            }
        }
    }

    /// Number of ticked drafts.
    pub fn selected_count(&self) -> usize {
        self.drafts.iter().filter(|d| d.selected).count()
    }

    /// Whether confirming would add anyone.
    pub fn can_confirm(&self) -> bool {
        self.selected_count() > 0
    }

    /// Turn the ticked drafts into participants.
    ///
    /// Does not touch any encounter; the caller adds the result.
    pub fn confirm(&self) -> Vec<Participant> {
        self.drafts
            .iter()
            .filter(|d| d.selected)
            .map(Draft::to_participant)
            .collect()
    }
}
