//! Actions for the catalog viewer

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::DetailRecord;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: request the first page
    Init,

    // ===== Page category =====
    PageNext,
    PagePrev,
    /// Result: page window resolved
    PageDidLoad { page: u32, records: Vec<DetailRecord> },
    /// Result: page window could not be fetched
    PageDidError { page: u32, error: String },

    // ===== Search category =====
    SearchFocus,
    SearchBlur,
    /// Clear the query and go back to the paginated view
    SearchClear,
    /// Search text changed (debounced full catalog resolution)
    SearchQueryChange(String),
    SearchQuerySubmit(String),

    // ===== Catalog category =====
    /// Result: full catalog resolved for the search request `generation`
    CatalogDidLoad { generation: u64, records: Vec<DetailRecord> },
    CatalogDidError { generation: u64, error: String },

    // ===== List / detail =====
    /// Move the list cursor to an index of the visible records
    ListSelect(usize),
    /// Open the detail modal for the record under the cursor
    DetailOpen,
    DetailClose,

    SpriteDidLoad { name: String, sprite: SpriteData },
    SpriteDidError { name: String, error: String },

    /// Force a re-render (cursor movement in the search input)
    Render,

    // ===== Global =====
    Tick,
    Quit,
}
