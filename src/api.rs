//! PokeAPI client: resolves catalog windows into display records

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::state::{DetailRecord, Summary, NO_DESCRIPTION};

const DESCRIPTION_LANGUAGE: &str = "en";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    sprites: Sprites,
    species: ApiResource,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct Language {
    pub name: String,
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
    catalog_limit: u32,
    concurrency: usize,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            catalog_limit: config.catalog_limit,
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Resolve one page window. Empty when the window itself cannot be fetched.
    pub async fn resolve_page(&self, page: u32) -> Vec<DetailRecord> {
        match self.try_resolve_page(page).await {
            Ok(records) => records,
            Err(err) => {
                warn!(page, error = %err, "failed to fetch catalog page");
                Vec::new()
            }
        }
    }

    /// Resolve the whole catalog. Empty when the list call fails.
    pub async fn resolve_all(&self) -> Vec<DetailRecord> {
        match self.try_resolve_all().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "failed to fetch full catalog");
                Vec::new()
            }
        }
    }

    pub async fn try_resolve_page(&self, page: u32) -> Result<Vec<DetailRecord>, ApiError> {
        let offset = page.saturating_mul(self.page_size);
        let summaries = self.fetch_window(offset, self.page_size).await?;
        Ok(self.resolve_summaries(summaries).await)
    }

    pub async fn try_resolve_all(&self) -> Result<Vec<DetailRecord>, ApiError> {
        let summaries = self.fetch_window(0, self.catalog_limit).await?;
        Ok(self.resolve_summaries(summaries).await)
    }

    pub async fn fetch_window(&self, offset: u32, limit: u32) -> Result<Vec<Summary>, ApiError> {
        let url = format!("{}/pokemon?offset={offset}&limit={limit}", self.base_url);
        let response: ListResponse = self.get_json(&url).await?;
        debug!(offset, limit, count = response.results.len(), "fetched catalog window");
        let dropped = response
            .results
            .iter()
            .filter(|entry| entry.name.is_empty())
            .count();
        if dropped > 0 {
            warn!(offset, dropped, "skipping unnamed catalog entries");
        }
        Ok(response
            .results
            .into_iter()
            .filter(|entry| !entry.name.is_empty())
            .take(limit as usize)
            .map(|entry| Summary {
                name: entry.name,
                reference: entry.url,
            })
            .collect())
    }

    /// Resolve details and description for one entry. Never fails: an entry
    /// that cannot be resolved becomes a placeholder record.
    pub async fn resolve_entry(&self, summary: Summary) -> DetailRecord {
        match self.fetch_entry(&summary).await {
            Ok(record) => record,
            Err(err) => {
                warn!(name = %summary.name, error = %err, "failed to resolve entry");
                DetailRecord::placeholder(summary.name)
            }
        }
    }

    pub async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(url).await
    }

    async fn fetch_entry(&self, summary: &Summary) -> Result<DetailRecord, ApiError> {
        let details: PokemonResponse = self.get_json(&summary.reference).await?;
        let species: SpeciesResponse = self.get_json(&details.species.url).await?;
        Ok(DetailRecord {
            name: summary.name.clone(),
            image_url: details.sprites.front_default.unwrap_or_default(),
            description: english_description(&species.flavor_text_entries),
        })
    }

    async fn resolve_summaries(&self, summaries: Vec<Summary>) -> Vec<DetailRecord> {
        let names: Vec<String> = summaries.iter().map(|s| s.name.clone()).collect();
        let client = self.clone();
        let resolved = join_bounded(summaries, self.concurrency, move |summary| {
            let client = client.clone();
            async move { client.resolve_entry(summary).await }
        })
        .await;

        resolved
            .into_iter()
            .zip(names)
            .map(|(record, name)| record.unwrap_or_else(|| DetailRecord::placeholder(name)))
            .collect()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let bytes = self.get_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Parse {
            url: url.to_string(),
            source,
        })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Run `resolve` over `items` with at most `limit` futures in flight.
///
/// Output order matches input order. A slot is `None` only if its task
/// panicked or was cancelled.
pub async fn join_bounded<T, R, F, Fut>(items: Vec<T>, limit: usize, resolve: F) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut join_set = JoinSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let task = resolve(item);
        join_set.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            (index, task.await)
        });
    }

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, value)) => {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = Some(value);
                }
            }
            Err(err) => warn!(error = %err, "resolution task did not complete"),
        }
    }
    slots
}

/// First English flavor text, cleaned, or the sentinel description.
pub fn english_description(entries: &[FlavorTextEntry]) -> String {
    entries
        .iter()
        .find(|entry| entry.language.name == DESCRIPTION_LANGUAGE)
        .map(|entry| clean_text(&entry.flavor_text))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Collapse newlines, form feeds and whitespace runs to single spaces, then trim.
pub fn clean_text(text: &str) -> String {
    text.split(char::is_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
