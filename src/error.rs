use core::fmt;

/// Reasons a grid cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    TooLarge { width: usize, height: usize },
    UnknownTile { ch: char, row: usize, col: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map has no cells"),
            MapError::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            MapError::TooLarge { width, height } => write!(f, "map {width}x{height} exceeds capacity"),
            MapError::UnknownTile { ch, row, col } => {
                write!(f, "unknown tile {ch:?} at row {row}, col {col}")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    RayCount(usize),
    CellSize,
    FieldOfView,
    Screen,
    TickInterval,
    MinimapScale,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RayCount(n) => write!(f, "ray count {n} out of range"),
            ConfigError::CellSize => write!(f, "cell size must be positive"),
            ConfigError::FieldOfView => write!(f, "field of view must be within (0, 180) degrees"),
            ConfigError::Screen => write!(f, "screen must be at least 1x1"),
            ConfigError::TickInterval => write!(f, "tick interval must be positive"),
            ConfigError::MinimapScale => write!(f, "minimap scale must be positive"),
        }
    }
}
