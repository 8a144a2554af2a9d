use std::fmt;

use glam::UVec2;

use super::CanvasPos;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Unset cell, rendered as a blank.
    #[default]
    Empty,
    Char(char),
}

impl Cell {
    pub fn as_char(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Char(c) => *c,
        }
    }

    pub fn is(&self, c: char) -> bool {
        *self == Cell::Char(c)
    }
}

/// Row-major character matrix, border ring included.
///
/// `size.x` counts columns and `size.y` counts rows. A grid without rows
/// stands for "no canvas".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    size: UVec2,
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Blank grid of `size`, or `None` when the cell count overflows or the
    /// buffer cannot be allocated.
    pub(super) fn try_from_size(size: UVec2) -> Option<Self> {
        let len = (size.x as usize).checked_mul(size.y as usize)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).ok()?;
        cells.resize(len, Cell::default());
        Some(Self { cells, size })
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.y as usize
    }

    pub fn columns(&self) -> usize {
        self.size.x as usize
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn bounds(&self, pos: CanvasPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.size.x && (pos.y as u32) < self.size.y
    }

    /// True when `pos` lies strictly inside the border ring.
    pub fn is_interior(&self, pos: CanvasPos) -> bool {
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        y >= 1 && y < i64::from(self.size.y) - 1 && x >= 1 && x < i64::from(self.size.x) - 1
    }

    pub fn at(&self, pos: CanvasPos) -> Option<Cell> {
        self.index_of(pos).and_then(|idx| self.cells.get(idx)).copied()
    }

    pub fn at_mut(&mut self, pos: CanvasPos) -> Option<&mut Cell> {
        let idx = self.index_of(pos)?;
        self.cells.get_mut(idx)
    }

    pub(super) fn index_of(&self, pos: CanvasPos) -> Option<usize> {
        if !self.bounds(pos) {
            return None;
        }
        Some(self.position_to_index(pos))
    }

    fn position_to_index(&self, pos: CanvasPos) -> usize {
        pos.y as usize * self.columns() + pos.x as usize
    }

    #[cfg(test)]
    fn index_to_position(&self, idx: usize) -> CanvasPos {
        CanvasPos::new((idx % self.columns()) as i32, (idx / self.columns()) as i32)
    }

    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns().max(1))
    }

    /// Rows rendered as strings, the empty sentinel as a space.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.row_slices()
            .map(|row| row.iter().map(Cell::as_char).collect::<String>())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}
