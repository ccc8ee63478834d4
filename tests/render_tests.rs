//! Render tests using RenderHarness

use tui_dispatch::{testing::*, DataResource};
use pokedex::{
    components::{Component, PokedexView, PokedexViewProps},
    sprite::SpriteData,
    state::{AppState, DetailRecord, Focus},
};

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut view = PokedexView::new();
    render.render_to_string_plain(|frame| {
        let props = PokedexViewProps {
            state,
            is_focused: true,
        };
        view.render(frame, frame.area(), props);
    })
}

fn with_page(records: Vec<DetailRecord>) -> AppState {
    let mut state = AppState::default();
    state.pages.begin(0, 0);
    state.pages.resolve(0, records, 0);
    state
}

fn bulbasaur() -> DetailRecord {
    DetailRecord {
        name: "bulbasaur".into(),
        image_url: "https://img.example/1.png".into(),
        description: "A strange seed was planted on its back at birth.".into(),
    }
}

#[test]
fn test_render_page_loading() {
    let mut state = AppState::default();
    state.pages.begin(0, 0);

    let output = render(&state, 120, 24);
    assert!(output.contains("Loading..."), "output:\n{output}");
    assert!(output.contains("Loading page 1..."), "output:\n{output}");
}

#[test]
fn test_render_page_error() {
    let mut state = AppState::default();
    state.pages.begin(0, 0);
    state.pages.fail(0, "connection refused".into());

    let output = render(&state, 80, 24);
    assert!(
        output.contains("Error: connection refused"),
        "output:\n{output}"
    );
}

#[test]
fn test_render_search_error() {
    let state = AppState {
        search_query: "mew".into(),
        catalog_error: Some("timed out".into()),
        ..Default::default()
    };

    let output = render(&state, 80, 24);
    assert!(output.contains("Error: timed out"), "output:\n{output}");
    assert!(output.contains("RESULTS"), "output:\n{output}");
}

#[test]
fn test_render_records_and_pager() {
    let state = with_page(vec![bulbasaur(), DetailRecord::placeholder("ivysaur")]);

    let output = render(&state, 80, 24);
    assert!(output.contains("bulbasaur"));
    assert!(output.contains("ivysaur"));
    assert!(output.contains("◀ Back"));
    assert!(output.contains("Page 1"));
    assert!(output.contains("Forward ▶"));
}

#[test]
fn test_render_empty_search() {
    let state = AppState {
        search_query: "zzz".into(),
        full_list: vec![bulbasaur()],
        ..Default::default()
    };

    let output = render(&state, 80, 24);
    assert!(output.contains("No matches"), "output:\n{output}");
    assert!(output.contains("0 matches"), "output:\n{output}");
}

#[test]
fn test_render_detail_modal() {
    let mut state = with_page(vec![bulbasaur()]);
    state.selected = Some(bulbasaur());
    state.sprite = DataResource::Loading;

    let output = render(&state, 100, 40);
    assert!(output.contains("BULBASAUR"), "output:\n{output}");
    assert!(
        output.contains("A strange seed was planted"),
        "output:\n{output}"
    );
    assert!(
        output.contains("https://img.example/1.png"),
        "output:\n{output}"
    );
    assert!(output.contains("[loading sprite]"), "output:\n{output}");
}

#[test]
fn test_render_detail_modal_sprite() {
    let mut state = with_page(vec![bulbasaur()]);
    state.selected = Some(bulbasaur());
    state.sprite = DataResource::Loaded(SpriteData {
        width: 2,
        height: 2,
        rgba: vec![255; 2 * 2 * 4],
    });

    let output = render(&state, 100, 40);
    assert!(output.contains("▀▀"), "output:\n{output}");
    assert!(!output.contains("[loading sprite]"));
}

#[test]
fn test_render_placeholder_record_without_image() {
    let mut state = with_page(vec![DetailRecord::placeholder("missingno")]);
    state.selected = Some(DetailRecord::placeholder("missingno"));

    let output = render(&state, 100, 40);
    assert!(output.contains("No description available"));
    assert!(output.contains("Image: none"));
    assert!(output.contains("[no sprite]"));
}

#[test]
fn test_render_search_focus_hints() {
    let state = AppState {
        focus: Focus::Search,
        ..with_page(vec![bulbasaur()])
    };

    let output = render(&state, 80, 24);
    assert!(output.contains("apply"), "output:\n{output}");
    assert!(output.contains("clear"), "output:\n{output}");
}
