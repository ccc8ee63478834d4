//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Focus, TICK_MS};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => with_effects(request_page(state)),

        // ===== Page actions =====
        Action::PageNext => {
            state.page = state.page.saturating_add(1);
            state.cursor = 0;
            state.message = None;
            with_effects(request_page(state))
        }

        Action::PagePrev => {
            if !state.can_go_back() {
                return DispatchResult::unchanged();
            }
            state.page -= 1;
            state.cursor = 0;
            state.message = None;
            with_effects(request_page(state))
        }

        Action::PageDidLoad { page, records } => {
            if page > 0 && records.is_empty() && page == state.page {
                state.message = Some("End of catalog".to_string());
            }
            state.pages.resolve(page, records, state.clock_ms);
            if page == state.page {
                state.clamp_cursor();
            }
            DispatchResult::changed()
        }

        Action::PageDidError { page, error } => {
            state.pages.fail(page, error);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchFocus => {
            if state.focus == Focus::Search {
                return DispatchResult::unchanged();
            }
            state.focus = Focus::Search;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if state.focus == Focus::List {
                return DispatchResult::unchanged();
            }
            state.focus = Focus::List;
            DispatchResult::changed()
        }

        Action::SearchClear => {
            if !state.is_searching() && state.focus == Focus::List {
                return DispatchResult::unchanged();
            }
            state.focus = Focus::List;
            with_effects(apply_query(state, String::new()))
        }

        Action::SearchQueryChange(query) => {
            if query == state.search_query {
                return DispatchResult::unchanged();
            }
            with_effects(apply_query(state, query))
        }

        Action::SearchQuerySubmit(query) => {
            let query = query.trim().to_string();
            state.focus = Focus::List;
            if query == state.search_query {
                return DispatchResult::changed();
            }
            with_effects(apply_query(state, query))
        }

        // ===== Catalog results =====
        Action::CatalogDidLoad {
            generation,
            records,
        } => {
            if generation != state.search_generation {
                return DispatchResult::unchanged();
            }
            state.full_list = records;
            state.catalog_loading = false;
            state.catalog_error = None;
            state.clamp_cursor();
            DispatchResult::changed()
        }

        Action::CatalogDidError { generation, error } => {
            if generation != state.search_generation {
                return DispatchResult::unchanged();
            }
            state.catalog_loading = false;
            state.catalog_error = Some(error);
            DispatchResult::changed()
        }

        // ===== List / detail =====
        Action::ListSelect(index) => {
            if index < state.visible_records().len() && index != state.cursor {
                state.cursor = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::DetailOpen => {
            let Some(record) = state.cursor_record().cloned() else {
                return DispatchResult::unchanged();
            };
            state.focus = Focus::List;
            if record.has_image() {
                state.sprite = DataResource::Loading;
                let effect = Effect::LoadSprite {
                    name: record.name.clone(),
                    url: record.image_url.clone(),
                };
                state.selected = Some(record);
                DispatchResult::changed_with(effect)
            } else {
                state.sprite = DataResource::Empty;
                state.selected = Some(record);
                DispatchResult::changed()
            }
        }

        Action::DetailClose => {
            if state.selected.take().is_none() {
                return DispatchResult::unchanged();
            }
            state.sprite = DataResource::Empty;
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { name, sprite } => {
            if !is_selected(state, &name) {
                return DispatchResult::unchanged();
            }
            state.sprite = DataResource::Loaded(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { name, error } => {
            if !is_selected(state, &name) {
                return DispatchResult::unchanged();
            }
            state.sprite = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            state.clock_ms = state.clock_ms.saturating_add(TICK_MS);
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Ask the cache whether the current page needs a fetch.
fn request_page(state: &mut AppState) -> Vec<Effect> {
    let page = state.page;
    if state.pages.begin(page, state.clock_ms) {
        vec![Effect::ResolvePage { page }]
    } else {
        Vec::new()
    }
}

/// Store a new query. Non-empty text starts a new search generation; empty
/// text cancels any pending resolution and returns to the paginated view.
fn apply_query(state: &mut AppState, query: String) -> Vec<Effect> {
    state.search_query = query;
    state.cursor = 0;
    state.catalog_error = None;
    state.search_generation += 1;

    if state.is_searching() {
        state.catalog_loading = true;
        vec![Effect::ResolveAll {
            generation: state.search_generation,
        }]
    } else {
        state.catalog_loading = false;
        let mut effects = vec![Effect::CancelResolveAll];
        effects.extend(request_page(state));
        effects
    }
}

fn is_selected(state: &AppState, name: &str) -> bool {
    state
        .selected
        .as_ref()
        .is_some_and(|record| record.name == name)
}

fn with_effects(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}
