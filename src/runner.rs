//! Effect execution: turns reducer effects into keyed background tasks

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::CatalogClient;
use crate::effect::Effect;
use crate::sprite::decode_sprite;

/// Debounce key shared by every full-catalog resolution.
pub const CATALOG_TASK: &str = "catalog";
pub const SPRITE_TASK: &str = "sprite";

pub fn page_task(page: u32) -> TaskKey {
    TaskKey::new(format!("page_{page}"))
}

/// Schedule `effect` on `tasks`. Completions come back as actions.
pub fn run_effect(
    effect: Effect,
    tasks: &mut TaskManager<Action>,
    client: &Arc<CatalogClient>,
    debounce: Duration,
) {
    match effect {
        Effect::ResolvePage { page } => {
            // One key per page: a page left behind still lands in the cache.
            let client = Arc::clone(client);
            tasks.spawn(page_task(page), async move {
                debug!(page, "resolving page");
                match client.try_resolve_page(page).await {
                    Ok(records) => Action::PageDidLoad { page, records },
                    Err(error) => {
                        warn!(page, %error, "page resolution failed");
                        Action::PageDidError {
                            page,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::ResolveAll { generation } => {
            let client = Arc::clone(client);
            tasks.debounce(CATALOG_TASK, debounce, async move {
                debug!(generation, "resolving full catalog");
                match client.try_resolve_all().await {
                    Ok(records) => Action::CatalogDidLoad {
                        generation,
                        records,
                    },
                    Err(error) => {
                        warn!(generation, %error, "catalog resolution failed");
                        Action::CatalogDidError {
                            generation,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::CancelResolveAll => {
            tasks.cancel(&TaskKey::new(CATALOG_TASK));
        }
        Effect::LoadSprite { name, url } => {
            let client = Arc::clone(client);
            tasks.spawn(SPRITE_TASK, async move {
                let bytes = match client.fetch_sprite(&url).await {
                    Ok(bytes) => bytes,
                    Err(error) => {
                        return Action::SpriteDidError {
                            name,
                            error: error.to_string(),
                        }
                    }
                };
                match decode_sprite(&bytes) {
                    Ok(sprite) => Action::SpriteDidLoad { name, sprite },
                    Err(error) => Action::SpriteDidError {
                        name,
                        error: error.to_string(),
                    },
                }
            });
        }
    }
}
