//! Participant entries and their classification.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Caller-assigned identifier of a participant, unique within an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a participant relates to the party. Does not affect turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A player character.
    #[default]
    Player,
    /// A hostile non-player character.
    NpcEnemy,
    /// A friendly non-player character.
    NpcAlly,
    /// A non-player character with no side.
    NpcNeutral,
}

impl Category {
    /// The canonical category for a candidate flagged (or not) as an NPC.
    pub fn from_npc_flag(is_npc: bool) -> Self {
        if is_npc { Self::NpcAlly } else { Self::Player }
    }

    /// Returns true for every non-player category.
    pub fn is_npc(self) -> bool {
        !matches!(self, Self::Player)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::NpcEnemy => write!(f, "npc-enemy"),
            Self::NpcAlly => write!(f, "npc-ally"),
            Self::NpcNeutral => write!(f, "npc-neutral"),
        }
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" | "pc" => Ok(Self::Player),
            "npc-enemy" | "enemy" => Ok(Self::NpcEnemy),
            "npc-ally" | "ally" => Ok(Self::NpcAlly),
            "npc-neutral" | "neutral" => Ok(Self::NpcNeutral),
            other => Err(TrackerError::UnknownCategory(other.to_string())),
        }
    }
}

/// One combatant tracked by an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Caller-assigned identifier.
    pub id: ParticipantId,
    /// Display label.
    pub name: String,
    /// Current hit points. May go negative.
    pub hp: i32,
    /// Reference maximum, shown next to `hp`. Never changed by the engine.
    pub hp_max: Option<i32>,
    /// Bonus added to the d20 when rolling initiative.
    pub initiative_modifier: i32,
    /// Rolled (or manually entered) initiative, if any.
    pub initiative_result: Option<i32>,
    /// Classification.
    pub category: Category,
    /// Free-text conditions such as "prone" or "stunned".
    pub status_tags: Vec<String>,
    /// Whether this participant currently acts.
    pub has_turn: bool,
}

impl Participant {
    /// Create a player participant with the given hit points and no modifier.
    pub fn new(id: u64, name: impl Into<String>, hp: i32) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
            hp,
            hp_max: None,
            initiative_modifier: 0,
            initiative_result: None,
            category: Category::Player,
            status_tags: Vec::new(),
            has_turn: false,
        }
    }

    /// Set the reference maximum hit points.
    pub fn with_hp_max(mut self, hp_max: i32) -> Self {
        self.hp_max = Some(hp_max);
        self
    }

    /// Set the initiative modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.initiative_modifier = modifier;
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set an initiative result directly.
    pub fn with_result(mut self, result: i32) -> Self {
        self.initiative_result = Some(result);
        self
    }

    /// Initiative used for ordering; participants without a result sort as 0.
    pub fn sort_key(&self) -> i32 {
        self.initiative_result.unwrap_or(0)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{}) HP {}", self.name, self.id, self.hp)?;
        if let Some(max) = self.hp_max {
            write!(f, "/{max}")?;
        }
        Ok(())
    }
}
