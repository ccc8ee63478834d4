//! Root view: header, search bar, list, pager, status bar and detail modal

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, DetailModal, DetailModalProps, DexList, DexListProps, Pager, PagerProps,
    SearchBar, SearchBarProps, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM,
};
use crate::action::Action;
use crate::state::{AppState, Focus};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct PokedexViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Screen regions, shared with the event router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLayout {
    pub header: Rect,
    pub search: Rect,
    pub list: Rect,
    pub pager: Rect,
    pub status: Rect,
    pub modal: Rect,
}

impl ViewLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search
            Constraint::Min(3),    // List
            Constraint::Length(1), // Pager
            Constraint::Length(1), // Status bar
        ])
        .split(area);
        Self {
            header: chunks[0],
            search: chunks[1],
            list: chunks[2],
            pager: chunks[3],
            status: chunks[4],
            modal: super::detail_modal::modal_area(area),
        }
    }
}

pub struct PokedexView {
    list: DexList,
    search: SearchBar,
    detail: DetailModal,
    status_bar: StatusBar,
}

impl Default for PokedexView {
    fn default() -> Self {
        Self {
            list: DexList::new(),
            search: SearchBar::new(),
            detail: DetailModal::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl PokedexView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        self.list
            .handle_event(
                event,
                DexListProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    pub fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        self.search
            .handle_event(
                event,
                SearchBarProps {
                    query: &state.search_query,
                    is_focused: true,
                    on_change: Action::SearchQueryChange,
                    on_submit: Action::SearchQuerySubmit,
                },
            )
            .into_iter()
            .collect()
    }

    pub fn handle_detail_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        self.detail
            .handle_event(
                event,
                DetailModalProps {
                    record: state.selected.as_ref(),
                    sprite: &state.sprite,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![Span::styled(
            " POKEDEX ",
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        )];
        if state.is_busy() {
            let frame_idx = state.tick_count as usize % SPINNER.len();
            spans.push(Span::styled(
                SPINNER[frame_idx],
                Style::default().fg(ACCENT_GOLD),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = status_hints(state);
        let status = status_text(state);
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(TEXT_DIM),
        ))];
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::hints(&hints),
                center: StatusBarSection::empty(),
                right: StatusBarSection::items(&status_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.selected.is_some() {
        vec![StatusBarHint::new("Esc", "close")]
    } else if state.focus == Focus::Search {
        vec![
            StatusBarHint::new("Enter", "apply"),
            StatusBarHint::new("Esc", "clear"),
            StatusBarHint::new("↓", "list"),
        ]
    } else if state.is_searching() {
        vec![
            StatusBarHint::new("↑↓", "move"),
            StatusBarHint::new("Enter", "details"),
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("Esc", "clear"),
            StatusBarHint::new("q", "quit"),
        ]
    } else {
        vec![
            StatusBarHint::new("↑↓", "move"),
            StatusBarHint::new("Enter", "details"),
            StatusBarHint::new("←→", "page"),
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("q", "quit"),
        ]
    }
}

fn status_text(state: &AppState) -> String {
    if let Some(message) = state.message.as_ref() {
        return message.clone();
    }
    if state.catalog_loading {
        "Resolving catalog...".to_string()
    } else if state.current_page().is_some_and(|entry| entry.is_fetching()) {
        format!("Loading page {}...", state.page + 1)
    } else if state.sprite.is_loading() {
        "Loading sprite...".to_string()
    } else {
        String::new()
    }
}

impl Component<Action> for PokedexView {
    type Props<'a> = PokedexViewProps<'a>;

    /// Routes to the detail modal, the search bar or the list, in that order.
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        if state.selected.is_some() {
            self.handle_detail_event(event, state)
        } else if state.focus == Focus::Search {
            self.handle_search_event(event, state)
        } else {
            self.handle_list_event(event, state)
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let layout = ViewLayout::new(area);
        let modal_open = state.selected.is_some();

        Self::render_header(frame, layout.header, state);

        self.search.render(
            frame,
            layout.search,
            SearchBarProps {
                query: &state.search_query,
                is_focused: props.is_focused && !modal_open && state.focus == Focus::Search,
                on_change: Action::SearchQueryChange,
                on_submit: Action::SearchQuerySubmit,
            },
        );

        self.list.render(
            frame,
            layout.list,
            DexListProps {
                state,
                is_focused: props.is_focused && !modal_open && state.focus == Focus::List,
            },
        );

        let mut pager = Pager;
        pager.render(
            frame,
            layout.pager,
            PagerProps {
                page: state.page,
                can_go_back: state.can_go_back(),
                matches: state
                    .is_searching()
                    .then(|| state.filtered_records().len()),
            },
        );

        self.render_status(frame, layout.status, state);

        self.detail.render(
            frame,
            area,
            DetailModalProps {
                record: state.selected.as_ref(),
                sprite: &state.sprite,
                is_focused: props.is_focused && modal_open,
            },
        );
    }
}
