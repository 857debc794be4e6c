use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{grid_display::*, session_display::*, session_stats_display::*};

mod grid_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(239, 68, 68);
    pub const GRAY: Color = Color::Rgb(229, 231, 235);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GREEN: Color = Color::Rgb(34, 197, 94);

    pub const YELLOW_200: Color = Color::Rgb(254, 240, 138);
    pub const YELLOW_300: Color = Color::Rgb(253, 224, 71);
    pub const YELLOW_400: Color = Color::Rgb(250, 204, 21);
    pub const YELLOW_500: Color = Color::Rgb(234, 179, 8);
    pub const YELLOW_600: Color = Color::Rgb(202, 138, 4);
    pub const YELLOW_700: Color = Color::Rgb(161, 98, 7);
    pub const YELLOW_800: Color = Color::Rgb(133, 77, 14);
    pub const YELLOW_900: Color = Color::Rgb(113, 63, 18);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_TILE: Style = fg_bg(color::DARK_GRAY, color::GRAY);
    pub const WIN_BANNER: Style = fg_bg(color::BLACK, color::GREEN);
    pub const GAME_OVER_BANNER: Style = fg_bg(color::WHITE, color::RED);

    /// Returns the style for a tile, banded by value.
    pub const fn tile(value: u32) -> Style {
        let style = match value {
            0 => return EMPTY_TILE,
            ..=4 => fg_bg(color::BLACK, color::YELLOW_200),
            ..=8 => fg_bg(color::BLACK, color::YELLOW_300),
            ..=16 => fg_bg(color::BLACK, color::YELLOW_400),
            ..=32 => fg_bg(color::BLACK, color::YELLOW_500),
            ..=64 => fg_bg(color::WHITE, color::YELLOW_600),
            ..=128 => fg_bg(color::WHITE, color::YELLOW_700),
            ..=256 => fg_bg(color::WHITE, color::YELLOW_800),
            ..=512 => fg_bg(color::WHITE, color::YELLOW_900),
            _ => fg_bg(color::WHITE, color::RED),
        };
        style.add_modifier(Modifier::BOLD)
    }
}

pub(crate) mod border {
    use ratatui::style::Color;
    use twenty48_engine::SessionState;

    use crate::view::widgets::color;

    pub const fn for_state(state: SessionState, won: bool) -> Color {
        match state {
            SessionState::GameOver => color::RED,
            SessionState::Playing if won => color::GREEN,
            SessionState::Playing => color::WHITE,
        }
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
