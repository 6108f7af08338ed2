pub mod pokeapi;
pub mod records;

use async_trait::async_trait;

use crate::error::ProviderError;
use records::{PokemonListRecord, PokemonRecord, SpeciesRecord};

pub use pokeapi::PokeApiClient;

/// Read-only access to the remote creature collection.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// One page of bare names plus the remote total and next/previous links.
    async fn list_pokemon(&self, limit: u32, offset: u32) -> Result<PokemonListRecord, ProviderError>;

    /// Full detail record, keyed by lowercase name or numeric id.
    async fn pokemon(&self, name_or_id: &str) -> Result<PokemonRecord, ProviderError>;

    async fn species(&self, id: u32) -> Result<SpeciesRecord, ProviderError>;
}
