use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use twenty48_engine::GameSession;

use crate::view::widgets::style;

/// Values shown in the stats panel.
#[derive(Debug, Clone, Copy)]
struct StatsSource<'a> {
    session: &'a GameSession,
    best_score: u64,
}

pub struct SessionStatsDisplay<'a> {
    source: StatsSource<'a>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession, best_score: u64) -> Self {
        Self {
            source: StatsSource {
                session,
                best_score,
            },
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap() + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(StatsSource<'_>) -> String),
    LabelValue(&'static str, &'static dyn Fn(StatsSource<'_>) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|src| src.session.score().to_string()),
    Row::FullLabel("BEST:"),
    Row::FullValue(&|src| src.best_score.to_string()),
    Row::Empty,
    Row::LabelValue("TURNS:", &|src| src.session.stats().turns().to_string()),
    Row::LabelValue("TILE:", &|src| src.session.stats().max_tile().to_string()),
    Row::LabelValue("FOURS:", &|src| {
        src.session.stats().spawned_fours().to_string()
    }),
    Row::Empty,
    Row::FullLabel("SEED:"),
    Row::FullValue(&|src| {
        let seed = src.session.seed().to_string();
        format!("{}…", &seed[..12])
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.source), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.source), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
