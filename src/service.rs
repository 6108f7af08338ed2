//! Turns provider records into display-ready creatures.

use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::config::AppConfig;
use crate::core::factory::{create_combatant, CreateCombatantOptions};
use crate::core::state::Combatant;
use crate::data::creature::Creature;
use crate::data::pagination::{Page, PageCursor};
use crate::error::{LookupError, ProviderError};
use crate::provider::DataProvider;

#[derive(Clone, Debug)]
pub struct ServiceOptions {
    /// Minimum spacing between detail-request dispatches.
    pub request_delay: Duration,
    /// Maximum detail requests in flight.
    pub concurrency: usize,
    pub locale: String,
    pub moves_per_combatant: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ServiceOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_delay: config.request_delay(),
            concurrency: config.concurrency.max(1),
            locale: config.locale.clone(),
            moves_per_combatant: config.moves_per_combatant,
        }
    }
}

/// Cheap to clone; clones share the provider.
#[derive(Clone)]
pub struct CreatureService {
    provider: Arc<dyn DataProvider>,
    options: ServiceOptions,
}

impl CreatureService {
    pub fn new(provider: Arc<dyn DataProvider>, options: ServiceOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Loads `limit` creatures starting at `offset`.
    ///
    /// A failed listing yields an empty page with a zero-count cursor; a failed
    /// detail fetch drops that creature from the page.
    pub async fn compose_page(&self, offset: u32, limit: u32) -> Page {
        let limit = limit.max(1);
        let listing = match self.provider.list_pokemon(limit, offset).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(offset, limit, error = %e, "pokemon list unavailable");
                return Page::new(Vec::new(), PageCursor::empty(offset, limit));
            }
        };

        let cursor = PageCursor::from_record(&listing, offset, limit);
        let names: Vec<String> = listing.results.into_iter().map(|r| r.name).collect();
        let creatures = self.compose_creatures(&names).await;
        tracing::info!(
            offset,
            limit,
            requested = names.len(),
            loaded = creatures.len(),
            page = cursor.current_page(),
            total_pages = cursor.total_pages(),
            "page composed"
        );
        Page::new(creatures, cursor)
    }

    /// Fetches details for every name with bounded concurrency, keeping the
    /// input order.
    async fn compose_creatures(&self, names: &[String]) -> Vec<Creature> {
        let throttle = self.throttle();
        let throttle = &throttle;
        let results: Vec<Option<Creature>> = stream::iter(names.iter().cloned())
            .map(|name| async move {
                if let Some(ticker) = throttle {
                    ticker.lock().await.tick().await;
                }
                self.compose_creature(&name).await
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;
        results.into_iter().flatten().collect()
    }

    fn throttle(&self) -> Option<Mutex<Interval>> {
        if self.options.request_delay.is_zero() {
            return None;
        }
        let mut ticker = interval(self.options.request_delay);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(Mutex::new(ticker))
    }

    async fn compose_creature(&self, name: &str) -> Option<Creature> {
        match self.provider.pokemon(name).await {
            Ok(record) => Some(self.describe(Creature::from_record(record)).await),
            Err(e) => {
                tracing::warn!(name, error = %e, "skipping creature without details");
                None
            }
        }
    }

    /// Best-effort flavor text in the configured locale.
    async fn describe(&self, creature: Creature) -> Creature {
        match self.provider.species(creature.id).await {
            Ok(species) => match species.flavor_text(&self.options.locale) {
                Some(text) => creature.with_description(text),
                None => creature,
            },
            Err(e) => {
                tracing::debug!(id = creature.id, error = %e, "no species description");
                creature
            }
        }
    }

    async fn fetch_record(&self, query: &str) -> Result<Creature, LookupError> {
        let key = query.trim().to_lowercase();
        if key.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        match self.provider.pokemon(&key).await {
            Ok(record) => Ok(Creature::from_record(record)),
            Err(e) => {
                log_lookup_failure(&key, &e);
                Err(LookupError::NotFound(key))
            }
        }
    }

    /// Case-insensitive exact lookup by name or id, with description.
    pub async fn search_by_name(&self, query: &str) -> Result<Creature, LookupError> {
        let creature = self.fetch_record(query).await?;
        Ok(self.describe(creature).await)
    }

    /// First `limit` names of the collection; empty when the provider fails.
    pub async fn list_names(&self, limit: u32) -> Vec<String> {
        match self.provider.list_pokemon(limit.max(1), 0).await {
            Ok(listing) => listing.results.into_iter().map(|r| r.name).collect(),
            Err(e) => {
                tracing::warn!(limit, error = %e, "name list unavailable");
                Vec::new()
            }
        }
    }

    /// A full-HP combatant built from the creature's base stats.
    pub async fn battle_combatant(&self, query: &str) -> Result<Combatant, LookupError> {
        let creature = self.fetch_record(query).await?;
        Ok(create_combatant(
            &creature,
            CreateCombatantOptions {
                max_moves: self.options.moves_per_combatant,
                ..Default::default()
            },
        ))
    }
}

fn log_lookup_failure(key: &str, error: &ProviderError) {
    if error.is_not_found() {
        tracing::info!(key, "pokemon not found");
    } else {
        tracing::warn!(key, error = %error, "pokemon lookup failed");
    }
}
