use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_MODAL, ERROR_RED, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::sprite::{HalfBlock, SpriteData};
use crate::state::DetailRecord;

const SPRITE_ROWS: u16 = 12;

pub struct DetailModalProps<'a> {
    pub record: Option<&'a DetailRecord>,
    pub sprite: &'a DataResource<SpriteData>,
    pub is_focused: bool,
}

pub struct DetailModal {
    modal: Modal,
}

impl Default for DetailModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Modal area used for both rendering and event routing.
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(70, 24, area)
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

fn cell(block: HalfBlock) -> Span<'static> {
    match (block.top, block.bottom) {
        (Some(top), Some(bottom)) => {
            Span::styled("▀", Style::default().fg(rgb(top)).bg(rgb(bottom)))
        }
        (Some(top), None) => Span::styled("▀", Style::default().fg(rgb(top))),
        (None, Some(bottom)) => Span::styled("▄", Style::default().fg(rgb(bottom))),
        (None, None) => Span::raw(" "),
    }
}

/// Half-block lines for `sprite`, sized to fit `cols` x `rows` cells.
pub fn sprite_lines(sprite: &SpriteData, cols: u16, rows: u16) -> Vec<Line<'static>> {
    sprite
        .half_blocks(cols, rows)
        .into_iter()
        .map(|row| Line::from(row.into_iter().map(cell).collect::<Vec<_>>()))
        .collect()
}

fn render_sprite(frame: &mut Frame, area: Rect, sprite: &DataResource<SpriteData>) {
    let status = |text: String, color: Color| {
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(color))
    };
    match sprite {
        DataResource::Loaded(sprite) => {
            let lines = sprite_lines(sprite, area.width, area.height);
            let offset = area.height.saturating_sub(lines.len() as u16) / 2;
            let area = Rect {
                y: area.y + offset,
                height: area.height - offset,
                ..area
            };
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        }
        DataResource::Loading => {
            frame.render_widget(status("[loading sprite]".into(), TEXT_DIM), area);
        }
        DataResource::Failed(error) => {
            frame.render_widget(status(format!("[sprite unavailable: {error}]"), ERROR_RED), area);
        }
        DataResource::Empty => {
            frame.render_widget(status("[no sprite]".into(), TEXT_DIM), area);
        }
    }
}

fn render_info(frame: &mut Frame, area: Rect, record: &DetailRecord) {
    let image = if record.has_image() {
        record.image_url.as_str()
    } else {
        "none"
    };
    let text = Text::from(vec![
        Line::from(Span::styled(
            record.name.to_uppercase(),
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::raw(""),
        Line::from(Span::styled(
            record.description.clone(),
            Style::default().fg(TEXT_MAIN),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Image: ", Style::default().fg(ACCENT_GOLD)),
            Span::styled(image.to_string(), Style::default().fg(TEXT_DIM)),
        ]),
    ]);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

impl Component<Action> for DetailModal {
    type Props<'a> = DetailModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.record.is_none() {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc
                | KeyCode::Enter
                | KeyCode::Backspace
                | KeyCode::Char('q')
                | KeyCode::Char('x') => Some(Action::DetailClose),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(record) = props.record else {
            return;
        };
        if area.width < 20 || area.height < 8 {
            return;
        }

        let sprite = props.sprite;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(SPRITE_ROWS.min(content_area.height / 2)),
                Constraint::Min(1),
            ])
            .split(content_area);
            render_sprite(frame, chunks[0], sprite);
            render_info(frame, chunks[1], record);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area(area),
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_MODAL),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DetailClose,
                render_content: &mut render_content,
            },
        );
    }
}
