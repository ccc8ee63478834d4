use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

#[derive(Clone, Copy)]
pub struct PagerProps {
    pub page: u32,
    pub can_go_back: bool,
    /// Number of matches while searching; paging is hidden then.
    pub matches: Option<usize>,
}

/// Back / page indicator / Forward row under the list.
#[derive(Default)]
pub struct Pager;

impl Component<Action> for Pager {
    type Props<'a> = PagerProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = match props.matches {
            Some(count) => Line::from(Span::styled(
                format!("{count} matches"),
                Style::default().fg(ACCENT_GOLD),
            )),
            None => {
                let back_style = if props.can_go_back {
                    Style::default()
                        .fg(ACCENT_TEAL)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
                };
                Line::from(vec![
                    Span::styled("◀ Back", back_style),
                    Span::raw("   "),
                    Span::styled(
                        format!("Page {}", props.page + 1),
                        Style::default().fg(TEXT_MAIN),
                    ),
                    Span::raw("   "),
                    Span::styled(
                        "Forward ▶",
                        Style::default()
                            .fg(ACCENT_TEAL)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            }
        };
        frame.render_widget(Paragraph::new(line.centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn render(props: PagerProps) -> String {
        let mut harness = RenderHarness::new(40, 1);
        let mut pager = Pager;
        harness.render_to_string_plain(|frame| pager.render(frame, frame.area(), props))
    }

    #[test]
    fn test_shows_one_based_page() {
        let output = render(PagerProps {
            page: 0,
            can_go_back: false,
            matches: None,
        });
        assert!(output.contains("◀ Back"));
        assert!(output.contains("Page 1"));
        assert!(output.contains("Forward ▶"));
    }

    #[test]
    fn test_shows_match_count_while_searching() {
        let output = render(PagerProps {
            page: 3,
            can_go_back: true,
            matches: Some(2),
        });
        assert!(output.contains("2 matches"));
        assert!(!output.contains("Page"));
    }
}
