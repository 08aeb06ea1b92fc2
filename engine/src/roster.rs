use std::io;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ArenaError;
use crate::warrior::{ItemDefinition, Loadout, StatGrowth, WarriorDefinition, WarriorType};

pub const WARRIOR_COLUMNS: [&str; 12] = [
    "name", "title", "type", "tough", "inctough", "dex", "incdex", "smart", "incsmart", "min_dmg",
    "max_dmg", "attack_time",
];

pub const ITEM_COLUMNS: [&str; 9] = [
    "name", "add_tough", "add_dex", "add_smart", "add_hp", "add_hp_regen", "add_dmg",
    "add_defense", "add_attack_speed",
];

/// One row of the warriors table, as stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct WarriorRecord {
    name: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
    tough: String,
    inctough: String,
    dex: String,
    incdex: String,
    smart: String,
    incsmart: String,
    min_dmg: String,
    max_dmg: String,
    attack_time: String,
}

/// One row of the items table, as stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ItemRecord {
    name: String,
    add_tough: String,
    add_dex: String,
    add_smart: String,
    add_hp: String,
    add_hp_regen: String,
    add_dmg: String,
    add_defense: String,
    add_attack_speed: String,
}

/// Blank cells read as zero.
fn parse_num(record: &str, field: &str, raw: &str) -> Result<f64, ArenaError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| ArenaError::invalid(record, field, format!("must be a number, got '{}'", raw)))
}

impl TryFrom<WarriorRecord> for WarriorDefinition {
    type Error = ArenaError;

    fn try_from(r: WarriorRecord) -> Result<Self, Self::Error> {
        let name = r.name.trim().to_string();
        let kind = WarriorType::from_str(&r.kind)
            .map_err(|reason| ArenaError::invalid(&name, "type", reason))?;
        let def = WarriorDefinition {
            title: r.title.trim().to_string(),
            kind,
            toughness: parse_num(&name, "tough", &r.tough)?,
            dexterity: parse_num(&name, "dex", &r.dex)?,
            intelligence: parse_num(&name, "smart", &r.smart)?,
            growth: StatGrowth {
                toughness: parse_num(&name, "inctough", &r.inctough)?,
                dexterity: parse_num(&name, "incdex", &r.incdex)?,
                intelligence: parse_num(&name, "incsmart", &r.incsmart)?,
            },
            min_base_damage: parse_num(&name, "min_dmg", &r.min_dmg)?,
            max_base_damage: parse_num(&name, "max_dmg", &r.max_dmg)?,
            base_attack_time: parse_num(&name, "attack_time", &r.attack_time)?,
            name,
        };
        def.validate()?;
        Ok(def)
    }
}

impl From<&WarriorDefinition> for WarriorRecord {
    fn from(w: &WarriorDefinition) -> Self {
        WarriorRecord {
            name: w.name.clone(),
            title: w.title.clone(),
            kind: w.kind.to_string(),
            tough: w.toughness.to_string(),
            inctough: w.growth.toughness.to_string(),
            dex: w.dexterity.to_string(),
            incdex: w.growth.dexterity.to_string(),
            smart: w.intelligence.to_string(),
            incsmart: w.growth.intelligence.to_string(),
            min_dmg: w.min_base_damage.to_string(),
            max_dmg: w.max_base_damage.to_string(),
            attack_time: w.base_attack_time.to_string(),
        }
    }
}

impl TryFrom<ItemRecord> for ItemDefinition {
    type Error = ArenaError;

    fn try_from(r: ItemRecord) -> Result<Self, Self::Error> {
        let name = r.name.trim().to_string();
        let def = ItemDefinition {
            add_toughness: parse_num(&name, "add_tough", &r.add_tough)?,
            add_dexterity: parse_num(&name, "add_dex", &r.add_dex)?,
            add_intelligence: parse_num(&name, "add_smart", &r.add_smart)?,
            add_hp: parse_num(&name, "add_hp", &r.add_hp)?,
            add_hp_regen: parse_num(&name, "add_hp_regen", &r.add_hp_regen)?,
            add_damage: parse_num(&name, "add_dmg", &r.add_dmg)?,
            add_defense: parse_num(&name, "add_defense", &r.add_defense)?,
            add_attack_speed: parse_num(&name, "add_attack_speed", &r.add_attack_speed)?,
            name,
        };
        def.validate()?;
        Ok(def)
    }
}

impl From<&ItemDefinition> for ItemRecord {
    fn from(i: &ItemDefinition) -> Self {
        ItemRecord {
            name: i.name.clone(),
            add_tough: i.add_toughness.to_string(),
            add_dex: i.add_dexterity.to_string(),
            add_smart: i.add_intelligence.to_string(),
            add_hp: i.add_hp.to_string(),
            add_hp_regen: i.add_hp_regen.to_string(),
            add_dmg: i.add_damage.to_string(),
            add_defense: i.add_defense.to_string(),
            add_attack_speed: i.add_attack_speed.to_string(),
        }
    }
}

/// A team slot as picked by a user: a warrior name and an optional item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSlot {
    pub warrior: String,
    #[serde(default)]
    pub item: Option<String>,
}

impl TeamSlot {
    pub fn new(warrior: impl Into<String>, item: Option<&str>) -> Self {
        Self {
            warrior: warrior.into(),
            item: item.map(str::to_string),
        }
    }
}

/// `Name` or `Name:Item`.
impl FromStr for TeamSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (warrior, item) = match s.split_once(':') {
            Some((w, i)) => (w.trim(), Some(i.trim()).filter(|i| !i.is_empty())),
            None => (s.trim(), None),
        };
        if warrior.is_empty() {
            return Err(format!("missing warrior name in '{}'", s));
        }
        Ok(TeamSlot::new(warrior, item))
    }
}

/// Warrior and item records keyed by name, in file order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    warriors: IndexMap<String, WarriorDefinition>,
    items: IndexMap<String, ItemDefinition>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self, ArenaError> {
        Self::from_csv_str(
            crate::content::builtin_warriors(),
            crate::content::builtin_items(),
        )
    }

    pub fn from_csv<W: io::Read, I: io::Read>(warriors: W, items: I) -> Result<Self, ArenaError> {
        let mut roster = Self::new();
        for w in read_warriors(warriors)? {
            if let Some(old) = roster.warriors.insert(w.name.clone(), w) {
                warn!(name = %old.name, "duplicate warrior record; keeping the later one");
            }
        }
        for i in read_items(items)? {
            if let Some(old) = roster.items.insert(i.name.clone(), i) {
                warn!(name = %old.name, "duplicate item record; keeping the later one");
            }
        }
        Ok(roster)
    }

    pub fn from_csv_str(warriors: &str, items: &str) -> Result<Self, ArenaError> {
        Self::from_csv(warriors.as_bytes(), items.as_bytes())
    }

    pub fn warrior(&self, name: &str) -> Option<&WarriorDefinition> {
        self.warriors.get(name)
    }

    pub fn item(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }

    pub fn warriors(&self) -> impl Iterator<Item = &WarriorDefinition> {
        self.warriors.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    /// Insert or replace a warrior. Returns the record it replaced.
    pub fn upsert_warrior(
        &mut self,
        warrior: WarriorDefinition,
    ) -> Result<Option<WarriorDefinition>, ArenaError> {
        warrior.validate()?;
        Ok(self.warriors.insert(warrior.name.clone(), warrior))
    }

    pub fn upsert_item(&mut self, item: ItemDefinition) -> Result<Option<ItemDefinition>, ArenaError> {
        item.validate()?;
        Ok(self.items.insert(item.name.clone(), item))
    }

    pub fn remove_warrior(&mut self, name: &str) -> Option<WarriorDefinition> {
        self.warriors.shift_remove(name)
    }

    pub fn remove_item(&mut self, name: &str) -> Option<ItemDefinition> {
        self.items.shift_remove(name)
    }

    pub fn write_warriors_csv<W: io::Write>(&self, out: W) -> Result<(), ArenaError> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        wtr.write_record(WARRIOR_COLUMNS)?;
        for w in self.warriors.values() {
            wtr.serialize(WarriorRecord::from(w))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_items_csv<W: io::Write>(&self, out: W) -> Result<(), ArenaError> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        wtr.write_record(ITEM_COLUMNS)?;
        for i in self.items.values() {
            wtr.serialize(ItemRecord::from(i))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn resolve_slot(&self, slot: &TeamSlot) -> Result<Loadout, ArenaError> {
        let warrior = self
            .warrior(&slot.warrior)
            .cloned()
            .ok_or_else(|| ArenaError::UnknownWarrior(slot.warrior.clone()))?;
        let item = match slot.item.as_deref() {
            None | Some("") => None,
            Some(name) => Some(
                self.item(name)
                    .cloned()
                    .ok_or_else(|| ArenaError::UnknownItem(name.to_string()))?,
            ),
        };
        let loadout = Loadout::new(warrior, item);
        loadout.validate()?;
        Ok(loadout)
    }

    pub fn resolve_team(&self, slots: &[TeamSlot]) -> Result<Vec<Loadout>, ArenaError> {
        slots.iter().map(|s| self.resolve_slot(s)).collect()
    }

    /// Resolve both teams. A warrior may fight on only one side, once.
    pub fn resolve_teams(
        &self,
        team1: &[TeamSlot],
        team2: &[TeamSlot],
    ) -> Result<(Vec<Loadout>, Vec<Loadout>), ArenaError> {
        let mut seen = Vec::with_capacity(team1.len() + team2.len());
        for slot in team1.iter().chain(team2) {
            if seen.contains(&slot.warrior.as_str()) {
                return Err(ArenaError::DuplicateWarrior(slot.warrior.clone()));
            }
            seen.push(slot.warrior.as_str());
        }
        Ok((self.resolve_team(team1)?, self.resolve_team(team2)?))
    }
}

pub fn read_warriors<R: io::Read>(reader: R) -> Result<Vec<WarriorDefinition>, ArenaError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize::<WarriorRecord>() {
        out.push(WarriorDefinition::try_from(row?)?);
    }
    Ok(out)
}

pub fn read_items<R: io::Read>(reader: R) -> Result<Vec<ItemDefinition>, ArenaError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize::<ItemRecord>() {
        out.push(ItemDefinition::try_from(row?)?);
    }
    Ok(out)
}
