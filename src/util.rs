use core::f32::consts::PI;
use libm::{floorf, sqrtf};

use crate::constants::TAU;

pub fn distance(a: f32, b: f32) -> f32 {
    sqrtf((a * a) + (b * b))
}

/// Row-major index of a cell in a grid `width` cells wide.
pub fn get_index(x: usize, y: usize, width: usize) -> usize {
    x + y * width
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Wraps an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle - TAU * floorf(angle / TAU);
    // floorf can leave exactly TAU behind for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Grid index of a world coordinate: `floor(world / cell_size)`.
pub fn cell_of(world: f32, cell_size: f32) -> i32 {
    floorf(world / cell_size) as i32
}
