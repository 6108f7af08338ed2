use serde::{Deserialize, Serialize};

use crate::provider::records::{PokemonRecord, StatEntry};

/// Stat value used when the provider omits a stat.
pub const DEFAULT_BASE_STAT: u32 = 50;

fn default_stat() -> u32 {
    DEFAULT_BASE_STAT
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseStats {
    #[serde(default = "default_stat")]
    pub hp: u32,
    #[serde(default = "default_stat")]
    pub attack: u32,
    #[serde(default = "default_stat")]
    pub defense: u32,
    #[serde(default = "default_stat")]
    pub special_attack: u32,
    #[serde(default = "default_stat")]
    pub special_defense: u32,
    #[serde(default = "default_stat")]
    pub speed: u32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: DEFAULT_BASE_STAT,
            attack: DEFAULT_BASE_STAT,
            defense: DEFAULT_BASE_STAT,
            special_attack: DEFAULT_BASE_STAT,
            special_defense: DEFAULT_BASE_STAT,
            speed: DEFAULT_BASE_STAT,
        }
    }
}

impl BaseStats {
    /// Picks stats out of the provider's `stats` array by name.
    pub fn from_entries(entries: &[StatEntry]) -> Self {
        let lookup = |name: &str| {
            entries
                .iter()
                .find(|entry| entry.stat.name == name)
                .map(|entry| entry.base_stat)
                .unwrap_or(DEFAULT_BASE_STAT)
        };
        Self {
            hp: lookup("hp"),
            attack: lookup("attack"),
            defense: lookup("defense"),
            special_attack: lookup("special-attack"),
            special_defense: lookup("special-defense"),
            speed: lookup("speed"),
        }
    }

    /// Saturates instead of overflowing on out-of-range provider data.
    pub fn total(&self) -> u32 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .iter()
        .fold(0u32, |sum, stat| sum.saturating_add(*stat))
    }
}

/// A creature as presented to the user. Built once from a provider record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Creature {
    pub id: u32,
    /// Provider slug, e.g. `mr-mime`.
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub base_experience: u32,
    pub sprite_url: Option<String>,
    pub description: Option<String>,
    pub stats: BaseStats,
    /// Move slugs in provider order.
    pub moves: Vec<String>,
}

impl Creature {
    pub fn from_record(record: PokemonRecord) -> Self {
        let stats = BaseStats::from_entries(&record.stats);
        Self {
            id: record.id,
            name: record.name.to_lowercase(),
            height: record.height,
            weight: record.weight,
            types: record.types.into_iter().map(|t| t.type_.name).collect(),
            abilities: record.abilities.into_iter().map(|a| a.ability.name).collect(),
            base_experience: record.base_experience.unwrap_or(0),
            sprite_url: record.sprites.and_then(|s| s.front_default),
            description: None,
            stats,
            moves: record.moves.into_iter().map(|m| m.move_.name).collect(),
        }
    }

    /// Attaches flavor text, flattening the provider's line and page breaks.
    pub fn with_description(mut self, text: &str) -> Self {
        let cleaned = text
            .replace(['\n', '\u{c}'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        self.description = if cleaned.is_empty() { None } else { Some(cleaned) };
        self
    }

    pub fn height_m(&self) -> f64 {
        self.height as f64 / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight as f64 / 10.0
    }

    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

/// `mr-mime` -> `Mr-Mime`; every alphabetic run starts upper-case.
pub fn title_case(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut start_of_word = true;
    for c in slug.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

/// `thunder-punch` -> `Thunder Punch`.
pub fn move_label(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}
