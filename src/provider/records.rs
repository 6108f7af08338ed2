//! Wire records returned by the creature-data provider.
//!
//! Every field is defaulted so a partial record still parses; the typed
//! entities in `crate::data` are built from these.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl NamedResource {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: None,
        }
    }
}

/// `GET /pokemon?limit&offset`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonListRecord {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type", default)]
    pub type_: NamedResource,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilitySlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub ability: NamedResource,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatEntry {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    #[serde(default)]
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveEntry {
    #[serde(rename = "move", default)]
    pub move_: NamedResource,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// `GET /pokemon/{name|id}`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    /// Null for some alternate forms.
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub sprites: Option<Sprites>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlavorTextEntry {
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub language: NamedResource,
}

/// `GET /pokemon-species/{id}`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl SpeciesRecord {
    /// First flavor text tagged with `locale`, if any.
    pub fn flavor_text(&self, locale: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == locale)
            .map(|entry| entry.flavor_text.as_str())
    }
}
