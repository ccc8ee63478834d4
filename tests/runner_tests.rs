//! Effect runner tests: debounced catalog resolution on a paused clock

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use tui_dispatch::{TaskKey, TaskManager};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pokedex::action::Action;
use pokedex::api::CatalogClient;
use pokedex::config::Config;
use pokedex::effect::Effect;
use pokedex::runner::{run_effect, CATALOG_TASK};

const QUIET: Duration = Duration::from_millis(1000);

async fn empty_catalog() -> (MockServer, Arc<CatalogClient>) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;
    let config = Config {
        api_base: server.uri(),
        ..Config::default()
    };
    let client = Arc::new(CatalogClient::new(&config));
    (server, client)
}

async fn catalog_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn three_keystrokes_trigger_one_resolution() {
    let (server, client) = empty_catalog().await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);

    for generation in 1..=3 {
        run_effect(Effect::ResolveAll { generation }, &mut tasks, &client, QUIET);
        tokio::time::advance(Duration::from_millis(300)).await;
    }

    // Still inside the quiet period of the last keystroke.
    assert!(rx.try_recv().is_err());
    assert_eq!(catalog_requests(&server).await, 0);

    tokio::time::advance(QUIET).await;
    let action = rx.recv().await.expect("catalog resolution");
    assert_eq!(
        action,
        Action::CatalogDidLoad {
            generation: 3,
            records: Vec::new(),
        }
    );

    assert!(rx.try_recv().is_err());
    assert_eq!(catalog_requests(&server).await, 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_pending_resolution() {
    let (server, client) = empty_catalog().await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);

    run_effect(Effect::ResolveAll { generation: 1 }, &mut tasks, &client, QUIET);
    assert!(tasks.is_running(&TaskKey::new(CATALOG_TASK)));

    run_effect(Effect::CancelResolveAll, &mut tasks, &client, QUIET);
    assert!(!tasks.is_running(&TaskKey::new(CATALOG_TASK)));

    tokio::time::advance(QUIET * 2).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(catalog_requests(&server).await, 0);
}
