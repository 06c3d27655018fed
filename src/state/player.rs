use libm::{cosf, sinf};

use crate::state::map::GridMap;
use crate::util::normalize_angle;

/// Where the player stands and which way they face. World units, y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

impl Pose {
    pub const fn new(x: f32, y: f32, angle: f32) -> Pose {
        Pose { x, y, angle }
    }

    /// Centre of a grid cell.
    pub fn at_cell(cell_x: usize, cell_y: usize, cell_size: f32, angle: f32) -> Pose {
        Pose::new(
            (cell_x as f32 + 0.5) * cell_size,
            (cell_y as f32 + 0.5) * cell_size,
            angle,
        )
    }
}

/// What the player wants to do this tick. Speeds are world units per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    pub forward: f32,
    pub strafe: f32,
    pub turn: f32,
}

/// Applies one tick of intent.
///
/// Turning always succeeds. The translation follows the new heading, with the strafe
/// axis rotated 90 degrees from it, and is dropped entirely (no sliding along walls)
/// when the target cell is solid or off the map.
pub fn move_player(pose: &Pose, intent: &Intent, map: &GridMap, cell_size: f32) -> Pose {
    let angle = normalize_angle(pose.angle + intent.turn);
    let (sin, cos) = (sinf(angle), cosf(angle));

    let next_x = pose.x + cos * intent.forward + sin * intent.strafe;
    let next_y = pose.y + sin * intent.forward - cos * intent.strafe;

    match map.cell_at(next_x, next_y, cell_size) {
        Some(0) => Pose::new(next_x, next_y, angle),
        _ => Pose::new(pose.x, pose.y, angle),
    }
}
