use std::collections::VecDeque;

use glam::IVec2;
use log::{debug, trace};

use super::{ensure_interior, existing_canvas, CanvasPos, CanvasStore, Cell, Grid, MARKER};
use crate::error::{DrawError, DrawResult};

const NEIGHBOURS: [IVec2; 4] = [IVec2::NEG_X, IVec2::Y, IVec2::X, IVec2::NEG_Y];

/// Bucket fill: paints every interior cell reachable from `seed` through
/// up/down/left/right steps with `color`, without crossing [`MARKER`] cells.
///
/// A seed sitting on a marker is not an error; the canvas is left as is and
/// nothing is written back to the store.
pub fn fill(store: &mut CanvasStore, seed: CanvasPos, color: char) -> DrawResult<&Grid> {
    let current = existing_canvas(store)?;
    if color == MARKER {
        return Err(DrawError::ReservedColor(color));
    }
    ensure_interior(current, seed)?;

    if current.at(seed).is_some_and(|cell| cell.is(MARKER)) {
        debug!("fill seed {seed} is on a line, nothing to fill");
        return Ok(store.grid());
    }

    let mut grid = current.clone();
    let painted = flood(&mut grid, seed, color);

    debug!("fill {seed} with '{color}'");
    trace!("fill painted {painted} cells");
    Ok(store.replace_grid(grid))
}

/// Breadth-first region growth. Each interior cell is queued at most once.
fn flood(grid: &mut Grid, seed: CanvasPos, color: char) -> usize {
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();

    let Some(seed_idx) = grid.index_of(seed) else {
        return 0;
    };
    visited[seed_idx] = true;
    queue.push_back(seed);

    let mut painted = 0;
    while let Some(pos) = queue.pop_front() {
        if let Some(cell) = grid.at_mut(pos) {
            *cell = Cell::Char(color);
            painted += 1;
        }

        for offset in NEIGHBOURS {
            let next = pos + offset;
            if !grid.is_interior(next) {
                continue;
            }
            let Some(idx) = grid.index_of(next) else {
                continue;
            };
            if visited[idx] || grid.at(next).is_some_and(|cell| cell.is(MARKER)) {
                continue;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }
    painted
}
