pub mod detail_modal;
pub mod dex_list;
pub mod pager;
pub mod pokedex_view;
pub mod search_bar;

use ratatui::style::{Color, Modifier, Style};

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_modal::{DetailModal, DetailModalProps};
pub use dex_list::{DexList, DexListProps};
pub use pager::{Pager, PagerProps};
pub use pokedex_view::{PokedexView, PokedexViewProps, ViewLayout};
pub use search_bar::{SearchBar, SearchBarProps};

pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const BG_MODAL: Color = Color::Rgb(26, 40, 58);
pub(crate) const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(120, 138, 150);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const ERROR_RED: Color = Color::Rgb(232, 96, 96);

pub(crate) fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}
