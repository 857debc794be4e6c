use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use twenty48_engine::{GameSession, SessionState};

use crate::view::widgets::{GridDisplay, SessionStatsDisplay, border, style};

/// The board with a stats panel beside it and a banner over the board once
/// the game is won or over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    best_score: u64,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, best_score: u64) -> Self {
        Self {
            session,
            best_score,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn grid_display(&self) -> GridDisplay<'a> {
        let border_style = border::for_state(self.session.session_state(), self.session.is_won());
        GridDisplay::new(self.session.grid()).block(
            Block::bordered()
                .title(Line::from("2048").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        )
    }

    fn stats_display(&self) -> SessionStatsDisplay<'a> {
        let border_style = border::for_state(self.session.session_state(), self.session.is_won());
        SessionStatsDisplay::new(self.session, self.best_score).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::symmetric(
                    self.horizontal_padding,
                    self.vertical_padding,
                ))
                .border_style(border_style)
                .style(style::DEFAULT),
        )
    }

    pub fn height(&self) -> u16 {
        u16::max(self.grid_display().height(), self.stats_display().height())
    }

    fn banner(&self) -> Option<(&'static str, Style)> {
        match (self.session.session_state(), self.session.is_won()) {
            (SessionState::Playing, false) => None,
            (SessionState::Playing, true) => Some(("YOU WIN!", style::WIN_BANNER)),
            (SessionState::GameOver, true) => Some(("YOU WON!", style::WIN_BANNER)),
            (SessionState::GameOver, false) => Some(("GAME OVER", style::GAME_OVER_BANNER)),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let grid_display = self.grid_display();
        let stats_display = self.stats_display();

        let [grid_column, stats_column] = Layout::horizontal([
            Constraint::Length(grid_display.width()),
            Constraint::Length(stats_display.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [grid_area] =
            Layout::vertical([Constraint::Length(grid_display.height())]).areas(grid_column);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_display.height())]).areas(stats_column);

        let grid_width = grid_display.width();
        grid_display.render(grid_area, buf);
        stats_display.render(stats_area, buf);

        if let Some((text, style)) = self.banner() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = grid_area.centered(Constraint::Length(grid_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
