//! Line-based combat console.
//!
//! `CombatConsole` owns one encounter, the roster selection and the dice
//! RNG, and turns each line of user input into engine calls.

use rand::rngs::StdRng;

use tk_engine::{
    Category, CommitOutcome, DraftField, Encounter, HpInput, HpInputEvent, ParticipantId,
    ParticipantSource, Selection, TrackerConfig, TrackerError, TrackerResult,
};

use crate::render;

const HELP: &str = "\
Combat Tracker Commands
  add <id> <hp>[/<max>] <mod> <category> <name>   Add a participant
  remove <id>                 Remove a participant
  hp <id> <value>             Set hit points (non-numbers are ignored)
  inc <id> / dec <id>         Add or remove one hit point
  roll                        Roll initiative for everyone and start round 1
  init <id> <value|clear>     Enter an initiative result by hand
  sort                        Order by initiative results
  next                        Pass the turn
  turn <id>                   Give the turn to someone
  up <id> / down <id>         Move a participant one place
  after <id> <target>         Move a participant behind another
  tag <id> <label>            Add a status tag
  untag <id> <label>          Remove a status tag
  list                        Show the turn order
  status                      Round, turn holder and counts
  json                        Print the encounter as JSON
  clear                       End the encounter
  roster                      Show the roster checklist
  pick <character id>         Tick or untick a roster character
  draft <character id> hp|init <value>   Edit a roster character
  confirm                     Add the ticked characters
  quit                        Leave

Categories: player, npc-enemy, npc-ally, npc-neutral";

/// An interactive combat tracking session.
pub struct CombatConsole {
    encounter: Encounter,
    selection: Selection,
    rng: StdRng,
}

impl CombatConsole {
    /// Create a console with an empty encounter and roster.
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            encounter: Encounter::new(),
            selection: Selection::default(),
            rng: config.build_rng(),
        }
    }

    /// Offer the characters of a source in the selection checklist.
    pub fn with_roster(mut self, source: &impl ParticipantSource) -> Self {
        self.selection = Selection::from_source(source);
        self
    }

    /// The tracked encounter.
    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    /// Process one line of input and return the text to show.
    pub fn process(&mut self, input: &str) -> TrackerResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "remove" | "rm" => self.do_remove(rest),
            "hp" => self.do_hp(rest),
            "inc" => self.do_step_hp(rest, true),
            "dec" => self.do_step_hp(rest, false),
            "roll" => Ok(self.do_roll()),
            "init" => self.do_init(rest),
            "sort" => {
                self.encounter.sort_by_result();
                Ok(self.render_list())
            }
            "next" | "n" => Ok(self.do_next()),
            "turn" => self.do_turn(rest),
            "up" => self.do_move(rest, Encounter::move_up),
            "down" => self.do_move(rest, Encounter::move_down),
            "after" => self.do_after(rest),
            "tag" => self.do_tag(rest, true),
            "untag" => self.do_tag(rest, false),
            "list" | "ls" => Ok(self.render_list()),
            "status" => Ok(self.do_status()),
            "json" => self.encounter.snapshot().to_json(),
            "clear" => {
                self.encounter.clear();
                Ok("Encounter cleared.".to_string())
            }
            "roster" => Ok(self.do_roster()),
            "pick" => self.do_pick(rest),
            "draft" => self.do_draft(rest),
            "confirm" => self.do_confirm(),
            "help" | "?" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(TrackerError::UnknownCommand(other.to_string())),
        }
    }

    fn render_list(&self) -> String {
        if self.encounter.is_empty() {
            return "No participants.".to_string();
        }
        format!(
            "Round {}\n{}",
            self.encounter.round(),
            render::participant_table(&self.encounter)
        )
    }

    fn name_of(&self, id: ParticipantId) -> Option<String> {
        self.encounter.get(id).map(|p| p.name.clone())
    }

    fn do_add(&mut self, rest: &str) -> TrackerResult<String> {
        let usage = || {
            TrackerError::InvalidArgument(
                "usage: add <id> <hp>[/<max>] <mod> <category> <name>".to_string(),
            )
        };
        let mut words = rest.split_whitespace();
        let id = parse_id(words.next().ok_or_else(usage)?)?;
        let (hp, hp_max) = parse_hp(words.next().ok_or_else(usage)?)?;
        let modifier = parse_number(words.next().ok_or_else(usage)?, "modifier")?;
        let category: Category = words.next().ok_or_else(usage)?.parse()?;
        let name = words.collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return Err(usage());
        }
        if self.encounter.get(id).is_some() {
            return Err(TrackerError::InvalidArgument(format!(
                "participant #{id} already exists"
            )));
        }

        let mut entry = tk_engine::Participant::new(id.0, name, hp)
            .with_modifier(modifier)
            .with_category(category);
        entry.hp_max = hp_max;
        let out = format!("Added {entry}");
        self.encounter.add(entry);
        Ok(out)
    }

    fn do_remove(&mut self, rest: &str) -> TrackerResult<String> {
        let id = parse_id(rest)?;
        let Some(name) = self.name_of(id) else {
            return Ok(not_found(id));
        };
        let was_current = self.encounter.get(id).is_some_and(|p| p.has_turn);
        self.encounter.remove(id);
        let mut out = format!("Removed {name}.");
        if was_current {
            out.push_str(" Nobody has the turn; use 'next' or 'turn <id>'.");
        }
        Ok(out)
    }

    fn do_hp(&mut self, rest: &str) -> TrackerResult<String> {
        let (id_text, text) = rest.split_once(' ').unwrap_or((rest, ""));
        let id = parse_id(id_text)?;
        let Some(participant) = self.encounter.get(id) else {
            return Ok(not_found(id));
        };
        let name = participant.name.clone();
        let mut input = HpInput::new(participant);
        input.set_text(text.trim());

        match input.handle(HpInputEvent::Confirm, &mut self.encounter) {
            CommitOutcome::Committed(hp) => Ok(format!("{name} HP {hp}")),
            CommitOutcome::Discarded | CommitOutcome::Cancelled => Ok(format!(
                "'{}' is not a number, {name} keeps {} HP",
                text.trim(),
                input.text()
            )),
        }
    }

    fn do_step_hp(&mut self, rest: &str, up: bool) -> TrackerResult<String> {
        let id = parse_id(rest)?;
        let Some(participant) = self.encounter.get(id) else {
            return Ok(not_found(id));
        };
        let name = participant.name.clone();
        let mut input = HpInput::new(participant);
        if up {
            input.increment(&mut self.encounter);
        } else {
            input.decrement(&mut self.encounter);
        }
        Ok(format!("{name} HP {}", input.text()))
    }

    fn do_roll(&mut self) -> String {
        let rolls = self.encounter.roll_initiative(&mut self.rng);
        if rolls.is_empty() {
            return "No participants to roll for.".to_string();
        }
        let mut out = String::from("Initiative:\n");
        for roll in &rolls {
            let name = self.name_of(roll.id).unwrap_or_default();
            out.push_str(&format!(
                "  {name}: d20 {} {:+} = {}\n",
                roll.natural, roll.modifier, roll.total
            ));
        }
        out.push_str(&self.render_list());
        out
    }

    fn do_init(&mut self, rest: &str) -> TrackerResult<String> {
        let usage = || TrackerError::InvalidArgument("usage: init <id> <value|clear>".to_string());
        let mut words = rest.split_whitespace();
        let id = parse_id(words.next().ok_or_else(usage)?)?;
        let value = match words.next().ok_or_else(usage)? {
            "clear" | "-" => None,
            text => Some(parse_number(text, "initiative")?),
        };
        let Some(name) = self.name_of(id) else {
            return Ok(not_found(id));
        };
        self.encounter.set_initiative_result(id, value);
        Ok(match value {
            Some(v) => format!("{name} initiative {v}. Use 'sort' to reorder."),
            None => format!("{name} initiative cleared."),
        })
    }

    fn do_next(&mut self) -> String {
        self.encounter.advance();
        match self.encounter.current() {
            Some(p) => format!("Round {}: {}'s turn", self.encounter.round(), p.name),
            None => "No participants.".to_string(),
        }
    }

    fn do_turn(&mut self, rest: &str) -> TrackerResult<String> {
        let id = parse_id(rest)?;
        let Some(name) = self.name_of(id) else {
            return Ok(not_found(id));
        };
        self.encounter.set_current(id);
        Ok(format!("Round {}: {name}'s turn", self.encounter.round()))
    }

    fn do_move(&mut self, rest: &str, op: fn(&mut Encounter, ParticipantId)) -> TrackerResult<String> {
        let id = parse_id(rest)?;
        if self.encounter.get(id).is_none() {
            return Ok(not_found(id));
        }
        op(&mut self.encounter, id);
        Ok(self.render_list())
    }

    fn do_after(&mut self, rest: &str) -> TrackerResult<String> {
        let usage = || TrackerError::InvalidArgument("usage: after <id> <target id>".to_string());
        let mut words = rest.split_whitespace();
        let moved = parse_id(words.next().ok_or_else(usage)?)?;
        let target = parse_id(words.next().ok_or_else(usage)?)?;
        for id in [moved, target] {
            if self.encounter.get(id).is_none() {
                return Ok(not_found(id));
            }
        }
        self.encounter.move_after(moved, target);
        Ok(self.render_list())
    }

    fn do_tag(&mut self, rest: &str, add: bool) -> TrackerResult<String> {
        let (id_text, label) = rest.split_once(' ').unwrap_or((rest, ""));
        let label = label.trim();
        if label.is_empty() {
            return Err(TrackerError::InvalidArgument(
                "usage: tag|untag <id> <label>".to_string(),
            ));
        }
        let id = parse_id(id_text)?;
        let Some(name) = self.name_of(id) else {
            return Ok(not_found(id));
        };
        if add {
            self.encounter.add_status(id, label);
        } else {
            self.encounter.remove_status(id, label);
        }
        let tags = self
            .encounter
            .get(id)
            .map(|p| p.status_tags.join(", "))
            .unwrap_or_default();
        if tags.is_empty() {
            Ok(format!("{name}: no status"))
        } else {
            Ok(format!("{name}: {tags}"))
        }
    }

    fn do_status(&self) -> String {
        let current = self
            .encounter
            .current()
            .map(|p| p.name.as_str())
            .unwrap_or("nobody");
        let npcs = self
            .encounter
            .participants()
            .iter()
            .filter(|p| p.category.is_npc())
            .count();
        format!(
            "Round: {}\nTurn: {current}\nParticipants: {} ({npcs} NPC)\nRoster: {} selected of {}",
            self.encounter.round(),
            self.encounter.len(),
            self.selection.selected_count(),
            self.selection.drafts().len()
        )
    }

    fn do_roster(&self) -> String {
        if self.selection.drafts().is_empty() {
            return "No roster loaded.".to_string();
        }
        render::draft_table(self.selection.drafts()).to_string()
    }

    fn do_pick(&mut self, rest: &str) -> TrackerResult<String> {
        let character_id = parse_character_id(rest)?;
        let Some(name) = self.selection.get(character_id).map(|d| d.name.clone()) else {
            return Ok(format!("No character #{character_id} in the roster."));
        };
        self.selection.toggle(character_id);
        let selected = self
            .selection
            .get(character_id)
            .is_some_and(|d| d.selected);
        Ok(format!(
            "{name} {}",
            if selected { "selected" } else { "deselected" }
        ))
    }

    fn do_draft(&mut self, rest: &str) -> TrackerResult<String> {
        let usage =
            || TrackerError::InvalidArgument("usage: draft <character id> hp|init <value>".to_string());
        let mut words = rest.split_whitespace();
        let character_id = parse_character_id(words.next().ok_or_else(usage)?)?;
        let field: DraftField = words.next().ok_or_else(usage)?.parse()?;
        let value = words.collect::<Vec<_>>().join(" ");

        if self.selection.get(character_id).is_none() {
            return Ok(format!("No character #{character_id} in the roster."));
        }
        self.selection.set_field(character_id, field, value);
        Ok(self
            .selection
            .get(character_id)
            .map(|d| format!("{}: HP '{}', init '{}'", d.name, d.hp, d.initiative))
            .unwrap_or_default())
    }

    fn do_confirm(&mut self) -> TrackerResult<String> {
        if !self.selection.can_confirm() {
            return Err(TrackerError::InvalidArgument(
                "select at least one character with 'pick' first".to_string(),
            ));
        }

        let mut added = Vec::new();
        let mut skipped = Vec::new();
        for entry in self.selection.confirm() {
            self.selection.toggle(entry.id.0);
            if self.encounter.get(entry.id).is_some() {
                skipped.push(entry.name);
            } else {
                added.push(entry.name.clone());
                self.encounter.add(entry);
            }
        }

        let mut out = format!("Added {} participant(s): {}", added.len(), added.join(", "));
        if !skipped.is_empty() {
            out.push_str(&format!("\nAlready in the encounter: {}", skipped.join(", ")));
        }
        Ok(out)
    }
}

fn not_found(id: ParticipantId) -> String {
    format!("No participant #{id}.")
}

fn parse_id(text: &str) -> TrackerResult<ParticipantId> {
    parse_character_id(text).map(ParticipantId)
}

fn parse_character_id(text: &str) -> TrackerResult<u64> {
    let text = text.trim();
    text.parse()
        .map_err(|_| TrackerError::InvalidArgument(format!("expected an id, got '{text}'")))
}

fn parse_number(text: &str, what: &str) -> TrackerResult<i32> {
    text.parse().map_err(|_| {
        TrackerError::InvalidArgument(format!("{what} must be a whole number, got '{text}'"))
    })
}

fn parse_hp(text: &str) -> TrackerResult<(i32, Option<i32>)> {
    match text.split_once('/') {
        Some((hp, max)) => Ok((parse_number(hp, "hp")?, Some(parse_number(max, "max hp")?))),
        None => Ok((parse_number(text, "hp")?, None)),
    }
}
