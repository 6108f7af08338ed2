#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use pokeview::provider::records::{
    AbilitySlot, FlavorTextEntry, MoveEntry, NamedResource, PokemonListRecord, PokemonRecord,
    SpeciesRecord, Sprites, StatEntry, TypeSlot,
};
use pokeview::{BaseStats, Combatant, DataProvider, ProviderError};

/// In-memory provider: an ordered roster of detail records plus optional
/// species entries, with switches for injecting failures.
#[derive(Default)]
pub struct FakeProvider {
    roster: Vec<PokemonRecord>,
    species: HashMap<u32, SpeciesRecord>,
    missing_details: HashSet<String>,
    delays: HashMap<String, Duration>,
    fail_listing: AtomicBool,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub detail_keys: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// `count` creatures named `mon1..monN` with ids `1..=N`.
    pub fn with_roster(count: u32) -> Self {
        let roster = (1..=count)
            .map(|id| record(id, &format!("mon{}", id), [45, 49, 49, 65, 65, 45]))
            .collect();
        Self {
            roster,
            ..Default::default()
        }
    }

    pub fn push(mut self, record: PokemonRecord) -> Self {
        self.roster.push(record);
        self
    }

    pub fn with_species(mut self, id: u32, entries: &[(&str, &str)]) -> Self {
        let flavor_text_entries = entries
            .iter()
            .map(|(lang, text)| FlavorTextEntry {
                flavor_text: text.to_string(),
                language: NamedResource::named(lang),
            })
            .collect();
        self.species.insert(id, SpeciesRecord { flavor_text_entries });
        self
    }

    /// Detail lookups for `name` fail with a 500.
    pub fn without_details(mut self, name: &str) -> Self {
        self.missing_details.insert(name.to_string());
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    fn link(&self, offset: u32, limit: u32) -> String {
        format!("https://fake.test/pokemon?offset={}&limit={}", offset, limit)
    }
}

#[async_trait]
impl DataProvider for FakeProvider {
    async fn list_pokemon(&self, limit: u32, offset: u32) -> Result<PokemonListRecord, ProviderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(ProviderError::transport("https://fake.test/pokemon", "connection refused"));
        }
        let count = self.roster.len() as u32;
        let results = self
            .roster
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|r| NamedResource::named(&r.name))
            .collect();
        let next = (offset.saturating_add(limit) < count).then(|| self.link(offset + limit, limit));
        let previous = (offset > 0).then(|| self.link(offset.saturating_sub(limit), limit));
        Ok(PokemonListRecord {
            count,
            next,
            previous,
            results,
        })
    }

    async fn pokemon(&self, name_or_id: &str) -> Result<PokemonRecord, ProviderError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut keys) = self.detail_keys.lock() {
            keys.push(name_or_id.to_string());
        }
        if let Some(delay) = self.delays.get(name_or_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.missing_details.contains(name_or_id) {
            return Err(ProviderError::Status {
                status: 500,
                url: format!("https://fake.test/pokemon/{}", name_or_id),
            });
        }
        self.roster
            .iter()
            .find(|r| r.name == name_or_id || r.id.to_string() == name_or_id)
            .cloned()
            .ok_or_else(|| ProviderError::not_found("pokemon", name_or_id))
    }

    async fn species(&self, id: u32) -> Result<SpeciesRecord, ProviderError> {
        self.species
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::not_found("pokemon-species", id))
    }
}

/// A detail record with stats in provider order:
/// hp, attack, defense, special-attack, special-defense, speed.
pub fn record(id: u32, name: &str, stats: [u32; 6]) -> PokemonRecord {
    let stat_names = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];
    PokemonRecord {
        id,
        name: name.to_string(),
        height: 7,
        weight: 69,
        base_experience: Some(64),
        types: vec![TypeSlot {
            slot: 1,
            type_: NamedResource::named("grass"),
        }],
        abilities: vec![AbilitySlot {
            slot: 1,
            is_hidden: false,
            ability: NamedResource::named("overgrow"),
        }],
        sprites: Some(Sprites {
            front_default: Some(format!("https://fake.test/sprites/{}.png", id)),
        }),
        stats: stat_names
            .iter()
            .zip(stats)
            .map(|(name, base_stat)| StatEntry {
                base_stat,
                effort: 0,
                stat: NamedResource::named(name),
            })
            .collect(),
        moves: ["razor-wind", "swords-dance", "cut", "bind", "vine-whip"]
            .iter()
            .map(|m| MoveEntry {
                move_: NamedResource::named(m),
            })
            .collect(),
    }
}

/// A full-HP combatant with the given core stats; speed fixed at 50.
pub fn fighter(name: &str, hp: u32, attack: u32, defense: u32, sp_atk: u32, sp_def: u32) -> Combatant {
    Combatant::new(
        name,
        BaseStats {
            hp,
            attack,
            defense,
            special_attack: sp_atk,
            special_defense: sp_def,
            speed: 50,
        },
        Vec::new(),
    )
}

/// Always returns `value`.
pub fn constant(value: f64) -> impl FnMut() -> f64 {
    move || value
}
