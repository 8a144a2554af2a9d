mod fill;
mod grid;

use glam::{IVec2, UVec2};
use line_drawing::Bresenham;
use log::debug;

use crate::error::{DrawError, DrawResult};

pub use fill::fill;
pub use grid::{Cell, Grid};

/// Column (`x`) and row (`y`) on the full grid; the interior starts at 1.
pub type CanvasPos = IVec2;

/// Character stamped by lines and rectangles. Fills never cross it.
pub const MARKER: char = 'x';
pub const HORIZONTAL_BORDER: char = '-';
pub const VERTICAL_BORDER: char = '|';

/// Holder of the single live canvas.
///
/// No validation happens here; the drawing functions in this module read the
/// current grid, check their arguments and hand a finished grid back through
/// [`CanvasStore::replace_grid`].
#[derive(Debug, Default)]
pub struct CanvasStore {
    grid: Grid,
}

impl CanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current grid, or an empty one before the first `create`.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn replace_grid(&mut self, grid: Grid) -> &Grid {
        self.grid = grid;
        &self.grid
    }

    pub fn has_canvas(&self) -> bool {
        !self.grid.is_empty()
    }
}

/// Replaces whatever canvas the store holds with a blank, bordered one of
/// `width` by `height` drawable cells.
///
/// The whole grid is allocated up front. Sizes whose border ring or cell
/// count does not fit, or whose buffer cannot be reserved, give
/// [`DrawError::CanvasTooLarge`] and leave the store as it was.
pub fn create(store: &mut CanvasStore, width: i32, height: i32) -> DrawResult<&Grid> {
    if width <= 0 || height <= 0 {
        return Err(DrawError::InvalidGeometry { width, height });
    }

    let too_large = DrawError::CanvasTooLarge { width, height };
    let (Some(columns), Some(rows)) = (width.checked_add(2), height.checked_add(2)) else {
        return Err(too_large);
    };
    let Some(mut grid) = Grid::try_from_size(UVec2::new(columns as u32, rows as u32)) else {
        return Err(too_large);
    };
    let last_column = columns - 1;
    let last_row = rows - 1;

    for x in 0..=last_column {
        for y in [0, last_row] {
            if let Some(cell) = grid.at_mut(CanvasPos::new(x, y)) {
                *cell = Cell::Char(HORIZONTAL_BORDER);
            }
        }
    }
    for y in 1..last_row {
        for x in [0, last_column] {
            if let Some(cell) = grid.at_mut(CanvasPos::new(x, y)) {
                *cell = Cell::Char(VERTICAL_BORDER);
            }
        }
    }

    debug!("created {width}x{height} canvas");
    Ok(store.replace_grid(grid))
}

/// Draws a horizontal or vertical segment from `start` to `end`, both
/// inclusive. Endpoints must already be in non-decreasing order.
pub fn line(store: &mut CanvasStore, start: CanvasPos, end: CanvasPos) -> DrawResult<&Grid> {
    let current = existing_canvas(store)?;
    ensure_interior(current, start)?;
    ensure_interior(current, end)?;

    if start.x > end.x || start.y > end.y || start == end {
        return Err(DrawError::InvalidOrder { start, end });
    }
    if start.x != end.x && start.y != end.y {
        return Err(DrawError::UnsupportedSlope { start, end });
    }

    let mut grid = current.clone();
    stamp(&mut grid, start, end);

    debug!("line {start} -> {end}");
    Ok(store.replace_grid(grid))
}

/// Draws the outline of the rectangle spanned by its top-left and
/// bottom-right corners. Zero-width or zero-height rectangles are rejected.
pub fn rectangle(
    store: &mut CanvasStore,
    top_left: CanvasPos,
    bottom_right: CanvasPos,
) -> DrawResult<&Grid> {
    let current = existing_canvas(store)?;
    ensure_interior(current, top_left)?;
    ensure_interior(current, bottom_right)?;

    if top_left.x >= bottom_right.x || top_left.y >= bottom_right.y {
        return Err(DrawError::InvalidOrder {
            start: top_left,
            end: bottom_right,
        });
    }

    let top_right = CanvasPos::new(bottom_right.x, top_left.y);
    let bottom_left = CanvasPos::new(top_left.x, bottom_right.y);

    let mut grid = current.clone();
    stamp(&mut grid, top_left, top_right);
    stamp(&mut grid, bottom_left, bottom_right);
    stamp(&mut grid, top_left, bottom_left);
    stamp(&mut grid, top_right, bottom_right);

    debug!("rectangle {top_left} -> {bottom_right}");
    Ok(store.replace_grid(grid))
}

fn stamp(grid: &mut Grid, start: CanvasPos, end: CanvasPos) {
    for (x, y) in Bresenham::new((start.x, start.y), (end.x, end.y)) {
        if let Some(cell) = grid.at_mut(CanvasPos::new(x, y)) {
            *cell = Cell::Char(MARKER);
        }
    }
}

fn existing_canvas(store: &CanvasStore) -> DrawResult<&Grid> {
    if store.has_canvas() {
        Ok(store.grid())
    } else {
        Err(DrawError::NoCanvas)
    }
}

fn ensure_interior(grid: &Grid, pos: CanvasPos) -> DrawResult<()> {
    if grid.is_interior(pos) {
        Ok(())
    } else {
        Err(DrawError::OutOfBounds { pos })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use rand::Rng;

    use super::*;

    pub(crate) fn pos(x: i32, y: i32) -> CanvasPos {
        CanvasPos::new(x, y)
    }

    pub(crate) fn canvas(width: i32, height: i32) -> CanvasStore {
        let mut store = CanvasStore::new();
        create(&mut store, width, height).unwrap();
        store
    }

    /// Cells that differ between two grids of the same size.
    pub(crate) fn changed_cells(before: &Grid, after: &Grid) -> Vec<CanvasPos> {
        assert_eq!(before.size(), after.size());
        let mut changed = vec![];
        for y in 0..before.rows() as i32 {
            for x in 0..before.columns() as i32 {
                if before.at(pos(x, y)) != after.at(pos(x, y)) {
                    changed.push(pos(x, y));
                }
            }
        }
        changed
    }

    #[test]
    fn store_starts_empty() {
        let store = CanvasStore::new();
        assert!(!store.has_canvas());
        assert!(store.grid().is_empty());
    }

    #[test]
    fn replace_grid_overwrites() {
        let mut store = canvas(3, 3);
        assert!(store.has_canvas());
        assert!(store.replace_grid(Grid::empty()).is_empty());
        assert!(!store.has_canvas());
    }

    #[test]
    fn create_stamps_borders() {
        let store = canvas(3, 2);
        let expected = ["-----", "|   |", "|   |", "-----"].join("\n");
        assert_eq!(store.grid().to_string(), expected);
    }

    #[test]
    fn create_random_sizes() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let width = rng.gen_range(1..=40);
            let height = rng.gen_range(1..=40);
            let store = canvas(width, height);
            let grid = store.grid();

            assert_eq!(grid.rows(), height as usize + 2);
            assert_eq!(grid.columns(), width as usize + 2);
            for y in 0..grid.rows() as i32 {
                for x in 0..grid.columns() as i32 {
                    let cell = grid.at(pos(x, y)).unwrap();
                    let expected = if y == 0 || y == height + 1 {
                        Cell::Char(HORIZONTAL_BORDER)
                    } else if x == 0 || x == width + 1 {
                        Cell::Char(VERTICAL_BORDER)
                    } else {
                        Cell::Empty
                    };
                    assert_eq!(cell, expected, "cell ({x}, {y}) of {width}x{height}");
                }
            }
        }
    }

    #[test]
    fn create_rejects_non_positive_sizes() {
        let mut store = CanvasStore::new();
        for (width, height) in [(0, 4), (4, 0), (0, 0), (-1, 4), (4, -3), (-5, -5)] {
            assert_eq!(
                create(&mut store, width, height),
                Err(DrawError::InvalidGeometry { width, height })
            );
        }
        assert!(!store.has_canvas());
    }

    #[test]
    fn create_refuses_sizes_that_cannot_be_allocated() {
        let mut store = canvas(3, 2);
        let before = store.grid().clone();
        for (width, height) in [
            (i32::MAX, 1),
            (1, i32::MAX - 1),
            (i32::MAX - 2, i32::MAX - 2),
        ] {
            assert_eq!(
                create(&mut store, width, height),
                Err(DrawError::CanvasTooLarge { width, height })
            );
        }
        assert_eq!(store.grid(), &before);
    }

    #[test]
    fn create_discards_previous_canvas() {
        let mut store = canvas(5, 5);
        line(&mut store, pos(1, 1), pos(5, 1)).unwrap();
        let grid = create(&mut store, 2, 1).unwrap();
        assert_eq!(grid.to_string(), ["----", "|  |", "----"].join("\n"));
    }

    #[test]
    fn drawing_requires_canvas() {
        let mut store = CanvasStore::new();
        assert_eq!(line(&mut store, pos(1, 1), pos(2, 1)), Err(DrawError::NoCanvas));
        assert_eq!(
            rectangle(&mut store, pos(1, 1), pos(2, 2)),
            Err(DrawError::NoCanvas)
        );
        assert_eq!(fill(&mut store, pos(1, 1), 'o'), Err(DrawError::NoCanvas));
    }

    #[test]
    fn horizontal_line_scenario() {
        let mut store = canvas(20, 4);
        let grid = line(&mut store, pos(5, 2), pos(18, 2)).unwrap();
        let expected = [
            "----------------------",
            "|                    |",
            "|    xxxxxxxxxxxxxx  |",
            "|                    |",
            "|                    |",
            "----------------------",
        ]
        .join("\n");
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn horizontal_line_marks_exactly_its_cells() {
        let mut store = canvas(10, 6);
        let before = store.grid().clone();
        let after = line(&mut store, pos(2, 3), pos(7, 3)).unwrap();
        let expected: Vec<_> = (2..=7).map(|x| pos(x, 3)).collect();
        assert_eq!(changed_cells(&before, after), expected);
        assert!(expected.iter().all(|p| after.at(*p) == Some(Cell::Char(MARKER))));
    }

    #[test]
    fn vertical_line_marks_exactly_its_cells() {
        let mut store = canvas(10, 6);
        let before = store.grid().clone();
        let after = line(&mut store, pos(4, 1), pos(4, 6)).unwrap();
        let expected: Vec<_> = (1..=6).map(|y| pos(4, y)).collect();
        assert_eq!(changed_cells(&before, after), expected);
    }

    #[test]
    fn line_touching_border_keeps_border() {
        let mut store = canvas(4, 3);
        let grid = line(&mut store, pos(1, 1), pos(4, 1)).unwrap();
        assert_eq!(
            grid.to_string(),
            ["------", "|xxxx|", "|    |", "|    |", "------"].join("\n")
        );
    }

    #[test]
    fn line_overwrites_fill() {
        let mut store = canvas(4, 2);
        fill(&mut store, pos(1, 1), 'o').unwrap();
        let grid = line(&mut store, pos(2, 1), pos(2, 2)).unwrap();
        assert_eq!(
            grid.to_string(),
            ["------", "|oxoo|", "|oxoo|", "------"].join("\n")
        );
    }

    #[test]
    fn diagonal_line_is_rejected() {
        let mut store = canvas(10, 5);
        assert_eq!(
            line(&mut store, pos(1, 2), pos(5, 3)),
            Err(DrawError::UnsupportedSlope {
                start: pos(1, 2),
                end: pos(5, 3)
            })
        );
    }

    #[test]
    fn line_order_is_not_normalized() {
        let mut store = canvas(10, 5);
        for (start, end) in [
            (pos(5, 2), pos(1, 2)),
            (pos(3, 4), pos(3, 1)),
            (pos(2, 2), pos(2, 2)),
        ] {
            assert_eq!(
                line(&mut store, start, end),
                Err(DrawError::InvalidOrder { start, end })
            );
        }
    }

    #[test]
    fn line_order_checked_before_slope() {
        let mut store = canvas(10, 5);
        assert!(matches!(
            line(&mut store, pos(5, 1), pos(1, 3)),
            Err(DrawError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn line_endpoints_must_be_interior() {
        let mut store = canvas(10, 5);
        for (start, end, bad) in [
            (pos(0, 1), pos(3, 1), pos(0, 1)),
            (pos(1, 1), pos(11, 1), pos(11, 1)),
            (pos(1, 0), pos(1, 3), pos(1, 0)),
            (pos(2, 2), pos(2, 6), pos(2, 6)),
            (pos(-3, 2), pos(2, 2), pos(-3, 2)),
        ] {
            assert_eq!(
                line(&mut store, start, end),
                Err(DrawError::OutOfBounds { pos: bad })
            );
        }
    }

    #[test]
    fn bounds_checked_before_order() {
        let mut store = canvas(10, 5);
        assert!(matches!(
            line(&mut store, pos(12, 1), pos(1, 1)),
            Err(DrawError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rectangle_marks_exactly_perimeter() {
        let mut store = canvas(20, 4);
        let before = store.grid().clone();
        let after = rectangle(&mut store, pos(14, 1), pos(18, 3)).unwrap();

        let changed = changed_cells(&before, after);
        for y in 1..=3 {
            for x in 14..=18 {
                let on_edge = x == 14 || x == 18 || y == 1 || y == 3;
                assert_eq!(changed.contains(&pos(x, y)), on_edge, "({x}, {y})");
            }
        }
        assert_eq!(changed.len(), 12);
        assert_eq!(after.at(pos(16, 2)), Some(Cell::Empty));
    }

    #[test]
    fn rectangle_scenario() {
        let mut store = canvas(20, 4);
        line(&mut store, pos(1, 2), pos(6, 2)).unwrap();
        line(&mut store, pos(6, 3), pos(6, 4)).unwrap();
        let grid = rectangle(&mut store, pos(14, 1), pos(18, 3)).unwrap();
        let expected = [
            "----------------------",
            "|             xxxxx  |",
            "|xxxxxx       x   x  |",
            "|     x       xxxxx  |",
            "|     x              |",
            "----------------------",
        ]
        .join("\n");
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn degenerate_rectangles_are_rejected() {
        let mut store = canvas(10, 5);
        for (top_left, bottom_right) in [
            (pos(2, 2), pos(6, 2)),
            (pos(3, 1), pos(3, 4)),
            (pos(4, 4), pos(4, 4)),
            (pos(6, 4), pos(2, 1)),
        ] {
            assert_eq!(
                rectangle(&mut store, top_left, bottom_right),
                Err(DrawError::InvalidOrder {
                    start: top_left,
                    end: bottom_right
                })
            );
        }
    }

    #[test]
    fn rectangle_corners_must_be_interior() {
        let mut store = canvas(10, 5);
        assert_eq!(
            rectangle(&mut store, pos(1, 1), pos(10, 6)),
            Err(DrawError::OutOfBounds { pos: pos(10, 6) })
        );
    }

    #[test]
    fn failures_leave_grid_untouched() {
        let mut store = canvas(8, 4);
        rectangle(&mut store, pos(2, 1), pos(5, 3)).unwrap();
        let before = store.grid().clone();

        assert!(line(&mut store, pos(1, 1), pos(3, 2)).is_err());
        assert!(line(&mut store, pos(1, 1), pos(9, 1)).is_err());
        assert!(rectangle(&mut store, pos(5, 3), pos(2, 1)).is_err());
        assert!(fill(&mut store, pos(1, 1), MARKER).is_err());
        assert!(fill(&mut store, pos(0, 0), 'o').is_err());
        assert!(create(&mut store, 0, 3).is_err());

        assert_eq!(store.grid(), &before);
    }

    #[test]
    fn repeated_operations_are_idempotent() {
        let mut once = canvas(12, 6);
        line(&mut once, pos(1, 3), pos(12, 3)).unwrap();
        rectangle(&mut once, pos(2, 1), pos(6, 5)).unwrap();
        fill(&mut once, pos(9, 1), 'c').unwrap();

        let mut twice = canvas(12, 6);
        create(&mut twice, 12, 6).unwrap();
        line(&mut twice, pos(1, 3), pos(12, 3)).unwrap();
        line(&mut twice, pos(1, 3), pos(12, 3)).unwrap();
        rectangle(&mut twice, pos(2, 1), pos(6, 5)).unwrap();
        rectangle(&mut twice, pos(2, 1), pos(6, 5)).unwrap();
        fill(&mut twice, pos(9, 1), 'c').unwrap();
        fill(&mut twice, pos(9, 1), 'c').unwrap();

        assert_eq!(once.grid(), twice.grid());
    }
}
