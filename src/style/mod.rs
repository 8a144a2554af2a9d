use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, ContentStyle, Print, PrintStyledContent, Stylize},
};

use crate::engine::{CanvasPos, Cell, Grid, MARKER};

pub const CATALOGUE: &str = concat!(
    "CATALOGUE\n",
    "The program should work as follows:\n",
    "1. Create a new canvas \n",
    "2. Start drawing on the canvas by issuing various commands\n",
    "3. Quit\n",
    "\n",
    "Command \t\tDescription\n",
    "C w h           Should create a new canvas of width w and height h.\n",
    "L x1 y1 x2 y2   Should create a new line from (x1,y1) to (x2,y2). Currently only horizontal or vertical lines are supported. Horizontal and vertical lines will be drawn using the 'x' character.\n",
    "R x1 y1 x2 y2   Should create a new rectangle, whose upper left corner is (x1,y1) and lower right corner is (x2,y2). Horizontal and vertical lines will be drawn using the 'x' character.\n",
    "B x y c         Should fill the entire area connected to (x,y) with 'colour' c. The behaviour of this is the same as that of the 'bucket fill' tool in paint programs.\n",
    "Q               Should quit the program.",
);

/// Terminal colors used when the grid is rendered in color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    /// The border ring.
    pub border: Color,
    /// Line and rectangle cells.
    pub marker: Color,
    /// Filled cells.
    pub fill: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border: Color::DarkGrey,
            marker: Color::White,
            fill: Color::Cyan,
        }
    }
}

impl Palette {
    fn style_for(&self, cell: Cell, on_border: bool) -> ContentStyle {
        let style = ContentStyle::new();
        match cell {
            Cell::Empty => style,
            _ if on_border => style.with(self.border),
            Cell::Char(MARKER) => style.with(self.marker).attribute(Attribute::Bold),
            Cell::Char(_) => style.with(self.fill),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Plain,
    Colored(Palette),
}

/// Writes `grid` one row per line, top to bottom. Blank cells become spaces.
pub fn render_grid<W: Write>(out: &mut W, grid: &Grid, mode: RenderMode) -> io::Result<()> {
    match mode {
        RenderMode::Plain => {
            for line in grid.lines() {
                writeln!(out, "{line}")?;
            }
        }
        RenderMode::Colored(palette) => {
            for (y, row) in grid.row_slices().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    let on_border = !grid.is_interior(CanvasPos::new(x as i32, y as i32));
                    let style = palette.style_for(*cell, on_border);
                    queue!(out, PrintStyledContent(style.apply(cell.as_char())))?;
                }
                queue!(out, Print('\n'))?;
            }
        }
    }
    out.flush()
}

pub fn render_catalogue<W: Write>(out: &mut W, mode: RenderMode) -> io::Result<()> {
    match mode {
        RenderMode::Plain => writeln!(out, "{CATALOGUE}")?,
        RenderMode::Colored(_) => {
            let (title, body) = CATALOGUE.split_once('\n').unwrap_or((CATALOGUE, ""));
            queue!(out, PrintStyledContent(title.bold()), Print('\n'))?;
            writeln!(out, "{body}")?;
        }
    }
    out.flush()
}
