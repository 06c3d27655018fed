use heapless::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::constants::MAX_MAZE_CELLS;
use crate::error::MapError;
use crate::state::map::GridMap;

fn find_neighbors(index: usize, width: usize, height: usize) -> [Option<usize>; 4] {
    let num_cells = width * height;

    let down = if index + width < num_cells {
        Some(index + width)
    } else {
        None
    };

    let up = if index >= width {
        Some(index - width)
    } else {
        None
    };

    let left = if index % width != 0 {
        Some(index - 1)
    } else {
        None
    };

    let right = if (index + 1) % width != 0 {
        Some(index + 1)
    } else {
        None
    };

    [down, up, left, right]
}

/// Carves a perfect maze of `width` x `height` rooms into a `(2w+1)` x `(2h+1)` grid.
/// Rooms sit on odd coordinates; the border is always solid.
pub fn generate(width: usize, height: usize, rng: &mut SmallRng) -> Result<GridMap, MapError> {
    if width == 0 || height == 0 {
        return Err(MapError::Empty);
    }
    if width * height > MAX_MAZE_CELLS {
        return Err(MapError::TooLarge { width: 2 * width + 1, height: 2 * height + 1 });
    }

    let mut grid = GridMap::filled(2 * width + 1, 2 * height + 1, 1)?;
    let mut visited: Vec<bool, MAX_MAZE_CELLS> = Vec::new();
    visited
        .resize(width * height, false)
        .map_err(|_| MapError::TooLarge { width, height })?;
    let mut stack: Vec<usize, MAX_MAZE_CELLS> = Vec::new();

    // Start from the first room and walk until every room is reached.
    let start = 0;
    visited[start] = true;
    carve_room(&mut grid, start, width);
    let _ = stack.push(start);

    while let Some(&index) = stack.last() {
        let mut potential_passages: Vec<usize, 4> = find_neighbors(index, width, height)
            .into_iter()
            .flatten()
            .filter(|&n| !visited[n])
            .collect();

        if potential_passages.is_empty() {
            stack.pop();
            continue;
        }
        potential_passages.shuffle(rng);

        let next = potential_passages[0];
        visited[next] = true;
        carve_passage(&mut grid, index, next, width);
        carve_room(&mut grid, next, width);
        // Every room is pushed at most once, so the stack never exceeds the room count.
        let _ = stack.push(next);
    }

    Ok(grid)
}

fn room_origin(index: usize, width: usize) -> (usize, usize) {
    (2 * (index % width) + 1, 2 * (index / width) + 1)
}

fn carve_room(grid: &mut GridMap, index: usize, width: usize) {
    let (x, y) = room_origin(index, width);
    grid.set(x, y, 0);
}

fn carve_passage(grid: &mut GridMap, from: usize, to: usize, width: usize) {
    let (ax, ay) = room_origin(from, width);
    let (bx, by) = room_origin(to, width);
    grid.set((ax + bx) / 2, (ay + by) / 2, 0);
}
