use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Paragraph, Widget},
};
use twenty48_engine::{GRID_SIZE, Grid};

use crate::view::widgets::style;

const TILE_WIDTH: u16 = 8;
const TILE_HEIGHT: u16 = 3;
#[expect(clippy::cast_possible_truncation)]
const GRID_SIDE: u16 = GRID_SIZE as u16;

#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        GRID_SIDE * TILE_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        GRID_SIDE * TILE_HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal =
            Layout::horizontal([Constraint::Length(TILE_WIDTH); GRID_SIZE]).flex(Flex::Center);
        let vertical = Layout::vertical([Constraint::Length(TILE_HEIGHT); GRID_SIZE]);

        let tile_areas = area
            .layout::<GRID_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<GRID_SIZE>(&horizontal));

        for (row_areas, row) in iter::zip(tile_areas, self.grid.rows()) {
            for (tile_area, &value) in iter::zip(row_areas, row) {
                render_tile(value, tile_area, buf);
            }
        }
    }
}

fn render_tile(value: u32, area: Rect, buf: &mut Buffer) {
    let label = if value == 0 {
        String::from("·")
    } else {
        value.to_string()
    };
    // Fill the whole tile, then put the label on the middle line.
    Paragraph::new("").style(style::tile(value)).render(area, buf);
    let label_area = area.centered_vertically(Constraint::Length(1));
    Line::from(label)
        .style(style::tile(value))
        .centered()
        .render(label_area, buf);
}
