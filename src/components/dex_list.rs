use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    highlight_substring, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::{
    focus_border, Component, ACCENT_GOLD, BG_HIGHLIGHT, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, DetailRecord, ListView};

/// Marker shown next to entries that have a sprite.
const SPRITE_MARKER: &str = " ◆";

pub struct DexListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct DexList {
    list: SelectList,
}

impl Default for DexList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl DexList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(records: &[&DetailRecord], query: &str) -> Vec<Line<'static>> {
        let base = Style::default().fg(TEXT_MAIN);
        let highlight = Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD);
        records
            .iter()
            .map(|record| {
                let mut line = if query.is_empty() {
                    Line::styled(record.name.clone(), base)
                } else {
                    highlight_substring(&record.name, query, base, highlight)
                };
                if record.has_image() {
                    line.spans
                        .push(Span::styled(SPRITE_MARKER, Style::default().fg(TEXT_DIM)));
                }
                line
            })
            .collect()
    }

    fn style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: Some(TEXT_MAIN),
            },
            selection: SelectionStyle {
                style: Some(
                    Style::default()
                        .bg(BG_HIGHLIGHT)
                        .fg(TEXT_MAIN)
                        .add_modifier(Modifier::BOLD),
                ),
                marker: None,
                disabled: false,
            },
            ..SelectListStyle::default()
        }
    }
}

impl Component<Action> for DexList {
    type Props<'a> = DexListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let state = props.state;

        match key.code {
            KeyCode::Enter => return vec![Action::DetailOpen],
            KeyCode::Char('/') => return vec![Action::SearchFocus],
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Esc if state.is_searching() => return vec![Action::SearchClear],
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') if !state.is_searching() => {
                return vec![Action::PagePrev];
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') if !state.is_searching() => {
                return vec![Action::PageNext];
            }
            _ => {}
        }

        let records = state.visible_records();
        if records.is_empty() {
            return Vec::new();
        }
        let items = Self::items(&records, &state.search_query);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.cursor.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: Self::style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::ListSelect,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let title = if state.is_searching() {
            " RESULTS "
        } else {
            " POKEDEX "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let placeholder = |text: String, style: Style| {
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(style)
        };

        match state.list_view() {
            ListView::Loading => {
                let text = if state.is_searching() {
                    "Searching..."
                } else {
                    "Loading..."
                };
                frame.render_widget(
                    placeholder(text.to_string(), Style::default().fg(TEXT_DIM)),
                    inner,
                );
            }
            ListView::Error(error) => {
                frame.render_widget(
                    placeholder(format!("Error: {error}"), Style::default().fg(ERROR_RED)),
                    inner,
                );
            }
            ListView::Records(records) if records.is_empty() => {
                let text = if state.is_searching() {
                    "No matches"
                } else {
                    "No entries"
                };
                frame.render_widget(
                    placeholder(text.to_string(), Style::default().fg(TEXT_DIM)),
                    inner,
                );
            }
            ListView::Records(records) => {
                let items = Self::items(&records, &state.search_query);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.cursor.min(items.len().saturating_sub(1)),
                    is_focused: props.is_focused,
                    style: Self::style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::ListSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.render(frame, inner, list_props);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn page_state(names: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.pages.begin(0, 0);
        state.pages.resolve(
            0,
            names.iter().map(|name| DetailRecord::placeholder(*name)).collect(),
            0,
        );
        state
    }

    fn press(component: &mut DexList, state: &AppState, event: EventKind) -> Vec<Action> {
        component
            .handle_event(
                &event,
                DexListProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_paging_keys() {
        let mut component = DexList::new();
        let state = page_state(&["bulbasaur"]);

        press(&mut component, &state, EventKind::Key(key("l"))).assert_first(Action::PageNext);
        press(&mut component, &state, EventKind::Key(key("h"))).assert_first(Action::PagePrev);
        press(
            &mut component,
            &state,
            EventKind::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
        )
        .assert_first(Action::PageNext);
    }

    #[test]
    fn test_paging_keys_ignored_while_searching() {
        let mut component = DexList::new();
        let state = AppState {
            search_query: "pika".into(),
            ..page_state(&["bulbasaur"])
        };

        press(&mut component, &state, EventKind::Key(key("l"))).assert_empty();
        press(
            &mut component,
            &state,
            EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        )
        .assert_first(Action::SearchClear);
    }

    #[test]
    fn test_enter_opens_detail() {
        let mut component = DexList::new();
        let state = page_state(&["bulbasaur"]);

        let actions = press(
            &mut component,
            &state,
            EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        );
        actions.assert_count(1);
        actions.assert_first(Action::DetailOpen);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut component = DexList::new();
        let state = page_state(&["bulbasaur"]);
        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("q")),
                DexListProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_records_with_marker() {
        let mut render = RenderHarness::new(40, 8);
        let mut component = DexList::new();
        let mut state = page_state(&["bulbasaur"]);
        state.pages.resolve(
            0,
            vec![
                DetailRecord {
                    name: "bulbasaur".into(),
                    image_url: "https://img/1.png".into(),
                    description: "seed".into(),
                },
                DetailRecord::placeholder("missingno"),
            ],
            0,
        );

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                DexListProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("bulbasaur ◆"));
        assert!(output.contains("missingno"));
        assert!(!output.contains("missingno ◆"));
    }
}
