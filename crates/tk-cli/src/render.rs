//! Table rendering for encounters and rosters.

use comfy_table::{ContentArrangement, Table};
use tk_engine::{Candidate, Draft, Encounter};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn or_dash(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

/// Participants in turn order, with a marker on the turn holder.
pub fn participant_table(encounter: &Encounter) -> Table {
    let mut table = new_table(vec!["", "ID", "Name", "HP", "Init", "Mod", "Category", "Status"]);

    for p in encounter.participants() {
        let hp = match p.hp_max {
            Some(max) => format!("{}/{max}", p.hp),
            None => p.hp.to_string(),
        };
        let status = if p.status_tags.is_empty() {
            "—".to_string()
        } else {
            p.status_tags.join(", ")
        };
        table.add_row(vec![
            if p.has_turn { ">" } else { "" }.to_string(),
            p.id.to_string(),
            p.name.clone(),
            hp,
            or_dash(p.initiative_result),
            format!("{:+}", p.initiative_modifier),
            p.category.to_string(),
            status,
        ]);
    }

    table
}

/// The selection checklist.
pub fn draft_table(drafts: &[Draft]) -> Table {
    let mut table = new_table(vec!["", "ID", "Name", "NPC", "HP", "Init"]);
    for d in drafts {
        table.add_row(vec![
            if d.selected { "[x]" } else { "[ ]" }.to_string(),
            d.character_id.to_string(),
            d.name.clone(),
            if d.is_npc { "yes" } else { "no" }.to_string(),
            d.hp.clone(),
            d.initiative.clone(),
        ]);
    }
    table
}

/// Characters offered by a roster.
pub fn candidate_table(candidates: &[Candidate]) -> Table {
    let mut table = new_table(vec!["ID", "Name", "Type", "Max HP", "Init"]);
    for c in candidates {
        let defaults = c.defaults.clone().unwrap_or_default();
        table.add_row(vec![
            c.character_id.to_string(),
            c.name.clone(),
            if c.is_npc { "NPC" } else { "PC" }.to_string(),
            or_dash(defaults.max_hp),
            or_dash(defaults.base_initiative),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tk_engine::{Category, Participant, ParticipantId, Selection};

    #[test]
    fn participant_table_marks_holder() {
        let mut enc = Encounter::new();
        enc.add(Participant::new(1, "Vex", 30).with_hp_max(40).with_result(17));
        enc.add(Participant::new(2, "Ogre", 59).with_category(Category::NpcEnemy));
        enc.add_status(ParticipantId(2), "prone");
        enc.set_current(ParticipantId(1));

        let out = participant_table(&enc).to_string();
        assert!(out.contains("Vex"));
        assert!(out.contains("30/40"));
        assert!(out.contains("17"));
        assert!(out.contains("npc-enemy"));
        assert!(out.contains("prone"));
        assert!(out.contains('>'));
    }

    #[test]
    fn draft_table_shows_ticks() {
        let mut sel = Selection::new(vec![
            Candidate::new(1, "Grog", false).with_defaults(Some(45), Some(3)),
            Candidate::new(2, "Trinket", true),
        ]);
        sel.toggle(1);
        let out = draft_table(sel.drafts()).to_string();
        assert!(out.contains("[x]"));
        assert!(out.contains("[ ]"));
        assert!(out.contains("45"));
    }

    #[test]
    fn candidate_table_lists_types() {
        let out = candidate_table(&[
            Candidate::new(1, "Grog", false),
            Candidate::new(2, "Trinket", true),
        ])
        .to_string();
        assert!(out.contains("PC"));
        assert!(out.contains("NPC"));
        assert!(out.contains("Trinket"));
    }
}
