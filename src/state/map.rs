use heapless::Vec;

use crate::constants::{MAX_CELLS, MAX_MAP_HEIGHT, MAX_MAP_WIDTH};
use crate::error::MapError;
use crate::util::{cell_of, get_index};

/// Rectangular occupancy grid. `0` is open floor, anything else a wall material.
/// Immutable once loaded; cells outside the grid behave as solid wall.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<u8, MAX_CELLS>,
}

impl GridMap {
    pub const fn new() -> GridMap {
        GridMap {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    pub fn from_rows(rows: &[&[u8]]) -> Result<GridMap, MapError> {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        let height = rows.len();
        if width > MAX_MAP_WIDTH || height > MAX_MAP_HEIGHT {
            return Err(MapError::TooLarge { width, height });
        }

        let mut cells = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            if line.len() != width {
                return Err(MapError::Ragged { row, expected: width, found: line.len() });
            }
            cells
                .extend_from_slice(line)
                .map_err(|_| MapError::TooLarge { width, height })?;
        }

        Ok(GridMap { width, height, cells })
    }

    /// Parses one row per non-empty line. `.`, ` ` and `0` are open,
    /// `#` is material 1 and `1`-`9` name a material directly. A line of
    /// spaces is a row of open floor, not a separator.
    pub fn parse(text: &str) -> Result<GridMap, MapError> {
        let mut cells = Vec::<u8, MAX_CELLS>::new();
        let mut width = 0;
        let mut height = 0;

        for line in text.lines().map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                continue;
            }
            let mut found = 0;
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '.' | ' ' | '0' => 0,
                    '#' => 1,
                    '1'..='9' => ch as u8 - b'0',
                    _ => return Err(MapError::UnknownTile { ch, row: height, col }),
                };
                if col >= MAX_MAP_WIDTH {
                    return Err(MapError::TooLarge { width: line.chars().count(), height: height + 1 });
                }
                cells
                    .push(tile)
                    .map_err(|_| MapError::TooLarge { width: col + 1, height: height + 1 })?;
                found += 1;
            }
            if height == 0 {
                width = found;
            } else if found != width {
                return Err(MapError::Ragged { row: height, expected: width, found });
            }
            height += 1;
        }

        if width == 0 {
            return Err(MapError::Empty);
        }
        if height > MAX_MAP_HEIGHT {
            return Err(MapError::TooLarge { width, height });
        }
        Ok(GridMap { width, height, cells })
    }

    /// A `width` x `height` grid of one material. Generators carve into it before handing it out.
    pub(crate) fn filled(width: usize, height: usize, tile: u8) -> Result<GridMap, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if width > MAX_MAP_WIDTH || height > MAX_MAP_HEIGHT {
            return Err(MapError::TooLarge { width, height });
        }
        let mut cells = Vec::new();
        cells
            .resize(width * height, tile)
            .map_err(|_| MapError::TooLarge { width, height })?;
        Ok(GridMap { width, height, cells })
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, tile: u8) {
        if x < self.width && y < self.height {
            let index = get_index(x, y, self.width);
            self.cells[index] = tile;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The material at a cell, or `None` outside the grid.
    pub fn cell(&self, cell_x: i32, cell_y: i32) -> Option<u8> {
        if cell_x < 0 || cell_y < 0 {
            return None;
        }
        let (x, y) = (cell_x as usize, cell_y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(get_index(x, y, self.width)).copied()
    }

    pub fn is_wall(&self, cell_x: i32, cell_y: i32) -> bool {
        !matches!(self.cell(cell_x, cell_y), Some(0))
    }

    /// Looks up the cell containing a world-space point.
    pub fn cell_at(&self, world_x: f32, world_y: f32, cell_size: f32) -> Option<u8> {
        self.cell(cell_of(world_x, cell_size), cell_of(world_y, cell_size))
    }

    /// Iterates `(cell_x, cell_y, material)` over every wall cell.
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != 0)
            .map(move |(index, &tile)| (index % width, index / width, tile))
    }

    /// The first open cell in reading order, used as a spawn point.
    pub fn first_open_cell(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&tile| tile == 0)
            .map(|index| (index % self.width, index / self.width))
    }
}

impl Default for GridMap {
    fn default() -> Self {
        GridMap::new()
    }
}
