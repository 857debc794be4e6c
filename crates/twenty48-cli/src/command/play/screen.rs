use crossterm::event::{self, Event, KeyCode};
use log::{debug, info};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use twenty48_engine::{Direction, SessionState, TileSeed};

use crate::{
    record::{RecordingSession, SessionHistory},
    view::widgets::SessionDisplay,
};

#[derive(Debug)]
pub struct PlayScreen {
    session: RecordingSession,
    best_score: u64,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(seed: Option<TileSeed>) -> Self {
        Self {
            session: RecordingSession::new(seed),
            best_score: 0,
            is_exiting: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.is_exiting {
            terminal.draw(|frame| self.draw(frame))?;
            let event = event::read()?;
            self.handle_event(&event);
        }
        Ok(())
    }

    pub fn into_history(self) -> SessionHistory {
        self.session.into_history()
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session, self.best_score);
        let help_text = match self.session.session_state() {
            SessionState::Playing => {
                "Controls: ← ↓ ↑ → / h j k l / a s w d (Move) | R (Restart) | Q (Quit)"
            }
            SessionState::GameOver => "Controls: R (Restart) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if !key.is_press() {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            KeyCode::Char('r') => self.restart(),
            code => {
                if let Some(direction) = direction_for_key(code) {
                    let outcome = self.session.apply_move(direction);
                    debug!("{direction}: {outcome:?}");
                    self.best_score = self.best_score.max(self.session.score());
                }
            }
        }
    }

    fn restart(&mut self) {
        info!(
            "restarting after {} turns with score {}",
            self.session.stats().turns(),
            self.session.score()
        );
        self.session = RecordingSession::new(None);
    }
}

fn direction_for_key(code: KeyCode) -> Option<Direction> {
    let direction = match code {
        KeyCode::Up | KeyCode::Char('k' | 'w') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j' | 's') => Direction::Down,
        KeyCode::Left | KeyCode::Char('h' | 'a') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l' | 'd') => Direction::Right,
        _ => return None,
    };
    Some(direction)
}
