//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::config::Config;
use crate::query::{QueryCache, QueryEntry};
use crate::sprite::SpriteData;

/// Fallback description when no English flavor text can be resolved.
pub const NO_DESCRIPTION: &str = "No description available";

/// Clock advance per `Tick`, also the tick subscription interval.
pub const TICK_MS: u64 = 100;

/// One list entry prior to detail resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub name: String,
    /// Dereferenceable URL of the entry's detail resource.
    pub reference: String,
}

/// Fully resolved display unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailRecord {
    pub name: String,
    /// Front sprite URL, empty when unknown.
    pub image_url: String,
    pub description: String,
}

impl DetailRecord {
    /// Record for an entry whose details could not be resolved.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: String::new(),
            description: NO_DESCRIPTION.to_string(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    List,
    Search,
}

/// What the list area should show right now.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Error(&'a str),
    Records(Vec<&'a DetailRecord>),
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Pagination ---
    #[debug(section = "Pages", label = "Page", debug_fmt)]
    pub page: u32,

    #[debug(section = "Pages", label = "Page size", debug_fmt)]
    pub page_size: u32,

    /// Resolved pages keyed by page index.
    #[debug(skip)]
    pub pages: QueryCache<u32, Vec<DetailRecord>>,

    // --- Search ---
    #[debug(section = "Search", label = "Query", debug_fmt)]
    pub search_query: String,

    /// Whole catalog, resolved on demand for searching.
    #[debug(skip)]
    pub full_list: Vec<DetailRecord>,

    #[debug(section = "Search", label = "Loading", debug_fmt)]
    pub catalog_loading: bool,

    #[debug(section = "Search", label = "Error", debug_fmt)]
    pub catalog_error: Option<String>,

    /// Stamp of the latest search request; older completions are dropped.
    #[debug(section = "Search", label = "Generation", debug_fmt)]
    pub search_generation: u64,

    // --- Selection ---
    #[debug(section = "Selection", label = "Cursor", debug_fmt)]
    pub cursor: usize,

    #[debug(section = "Selection", label = "Focus", debug_fmt)]
    pub focus: Focus,

    #[debug(section = "Selection", label = "Selected", debug_fmt)]
    pub selected: Option<DetailRecord>,

    #[debug(skip)]
    pub sprite: DataResource<SpriteData>,

    // --- Runtime ---
    #[debug(section = "Runtime", label = "Clock (ms)", debug_fmt)]
    pub clock_ms: u64,

    #[debug(skip)]
    pub tick_count: u32,

    #[debug(section = "Runtime", label = "Message", debug_fmt)]
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let stale_after_ms = u64::try_from(config.cache_ttl.as_millis()).unwrap_or(u64::MAX);
        Self {
            page: 0,
            page_size: config.page_size,
            pages: QueryCache::new(stale_after_ms),
            search_query: String::new(),
            full_list: Vec::new(),
            catalog_loading: false,
            catalog_error: None,
            search_generation: 0,
            cursor: 0,
            focus: Focus::List,
            selected: None,
            sprite: DataResource::Empty,
            clock_ms: 0,
            tick_count: 0,
            message: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        !self.search_query.is_empty()
    }

    pub fn current_page(&self) -> Option<&QueryEntry<Vec<DetailRecord>>> {
        self.pages.get(&self.page)
    }

    /// Case-insensitive substring filter of the full catalog.
    pub fn filtered_records(&self) -> Vec<&DetailRecord> {
        let needle = self.search_query.to_lowercase();
        self.full_list
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Records the list displays: search results while searching, else the page.
    pub fn visible_records(&self) -> Vec<&DetailRecord> {
        if self.is_searching() {
            self.filtered_records()
        } else {
            self.current_page()
                .and_then(QueryEntry::data)
                .map(|records| records.iter().collect())
                .unwrap_or_default()
        }
    }

    pub fn list_view(&self) -> ListView<'_> {
        if self.is_searching() {
            if self.catalog_loading && self.full_list.is_empty() {
                return ListView::Loading;
            }
            if let Some(error) = self.catalog_error.as_deref() {
                return ListView::Error(error);
            }
            return ListView::Records(self.filtered_records());
        }

        match self.current_page() {
            None => ListView::Loading,
            Some(entry) if entry.is_loading() => ListView::Loading,
            Some(entry) => match entry.error() {
                Some(error) => ListView::Error(error),
                None => ListView::Records(self.visible_records()),
            },
        }
    }

    pub fn cursor_record(&self) -> Option<&DetailRecord> {
        self.visible_records().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_records().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 0
    }

    pub fn is_busy(&self) -> bool {
        self.catalog_loading
            || self.current_page().is_some_and(QueryEntry::is_fetching)
            || self.sprite.is_loading()
    }
}
