//! PokeAPI client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::provider::records::{PokemonListRecord, PokemonRecord, SpeciesRecord};
use crate::provider::DataProvider;

#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
        resource: &'static str,
        key: &str,
    ) -> Result<T, ProviderError> {
        tracing::debug!(%url, "provider request");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::transport(&url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::not_found(resource, key));
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(&url, e))?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[async_trait]
impl DataProvider for PokeApiClient {
    async fn list_pokemon(&self, limit: u32, offset: u32) -> Result<PokemonListRecord, ProviderError> {
        let url = format!("{}/pokemon", self.base_url);
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        self.get_json(url, &query, "pokemon list", &offset.to_string())
            .await
    }

    async fn pokemon(&self, name_or_id: &str) -> Result<PokemonRecord, ProviderError> {
        let key = name_or_id.trim().to_lowercase();
        let url = format!("{}/pokemon/{}", self.base_url, key);
        self.get_json(url, &[], "pokemon", &key).await
    }

    async fn species(&self, id: u32) -> Result<SpeciesRecord, ProviderError> {
        let url = format!("{}/pokemon-species/{}", self.base_url, id);
        self.get_json(url, &[], "pokemon species", &id.to_string())
            .await
    }
}
