// The two-family grid intersection search follows
// [wasm4-raycaster](https://github.com/grantshandy/wasm4-raycaster),
// which carries an MIT License and is Copyright (c) 2023 Grant Handy.

use heapless::Vec;
use libm::{cosf, fabsf, floorf, sinf};

use crate::config::Config;
use crate::constants::{AXIS_EPSILON, MAX_RAYS};
use crate::error::ConfigError;
use crate::state::map::GridMap;
use crate::state::player::Pose;
use crate::util::{cell_of, distance};

/// Which family of grid lines the nearest hit came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Crossed a line `x = k * cell_size`; the face runs north-south.
    Vertical,
    /// Crossed a line `y = k * cell_size`; the face runs east-west.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Absolute heading of the ray, not relative to the player.
    pub angle: f32,
    /// Euclidean distance from the player to the hit point.
    pub distance: f32,
    pub orientation: Orientation,
    /// Position along the struck face: `y` for vertical hits, `x` for horizontal ones.
    pub hit_coordinate: f32,
    pub hit_x: f32,
    pub hit_y: f32,
    /// Material of the struck cell; `0` when the ray left the grid.
    pub material: u8,
}

/// One hit per screen slice, left to right.
pub type RayFan = Vec<RayHit, MAX_RAYS>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Crossing {
    x: f32,
    y: f32,
    distance: f32,
    material: u8,
}

/// Casts a single ray and returns the nearer of the vertical and horizontal hits.
pub fn cast_ray(map: &GridMap, origin_x: f32, origin_y: f32, angle: f32, cell_size: f32) -> RayHit {
    let vertical = vertical_intersection(map, origin_x, origin_y, angle, cell_size);
    let horizontal = horizontal_intersection(map, origin_x, origin_y, angle, cell_size);

    // Ties go to the vertical family.
    let (crossing, orientation) = match (vertical, horizontal) {
        (Some(v), Some(h)) if h.distance >= v.distance => (v, Orientation::Vertical),
        (_, Some(h)) => (h, Orientation::Horizontal),
        (Some(v), None) => (v, Orientation::Vertical),
        // cos and sin can't both vanish; stay total anyway.
        (None, None) => (
            Crossing { x: origin_x, y: origin_y, distance: 0.0, material: 0 },
            Orientation::Vertical,
        ),
    };

    RayHit {
        angle,
        distance: crossing.distance,
        orientation,
        hit_coordinate: match orientation {
            Orientation::Vertical => crossing.y,
            Orientation::Horizontal => crossing.x,
        },
        hit_x: crossing.x,
        hit_y: crossing.y,
        material: crossing.material,
    }
}

/// Refills `rays` with `config.ray_count` hits spread evenly across the field of view,
/// starting at the left edge `pose.angle - fov / 2`.
///
/// A ray count of zero or beyond the fan's capacity is rejected before anything is cast,
/// leaving `rays` empty; the fan is never truncated.
pub fn cast_fan(
    map: &GridMap,
    pose: &Pose,
    config: &Config,
    rays: &mut RayFan,
) -> Result<(), ConfigError> {
    rays.clear();
    if config.ray_count == 0 || config.ray_count > rays.capacity() {
        return Err(ConfigError::RayCount(config.ray_count));
    }

    let starting_angle = pose.angle - config.half_fov();
    let angle_step = config.angle_step();

    for idx in 0..config.ray_count {
        let angle = starting_angle + idx as f32 * angle_step;
        let hit = cast_ray(map, pose.x, pose.y, angle, config.cell_size);
        rays.push(hit).map_err(|_| ConfigError::RayCount(config.ray_count))?;
    }
    Ok(())
}

/// Walks the vertical grid lines (`x = k * cell_size`) along the ray.
///
/// Returns `None` when the ray runs parallel to them. Otherwise stops on the first
/// non-empty cell, or on the first crossing outside the grid, which stands in for
/// the implicit boundary wall.
fn vertical_intersection(
    map: &GridMap,
    origin_x: f32,
    origin_y: f32,
    angle: f32,
    cell_size: f32,
) -> Option<Crossing> {
    let cos = cosf(angle);
    if fabsf(cos) < AXIS_EPSILON {
        return None;
    }
    let right = cos > 0.0;
    let slope = sinf(angle) / cos;

    // First vertical line in the direction of travel.
    let first_x = if right {
        floorf(origin_x / cell_size) * cell_size + cell_size
    } else {
        floorf(origin_x / cell_size) * cell_size
    };
    let first_y = origin_y + (first_x - origin_x) * slope;

    let dx = if right { cell_size } else { -cell_size };
    let dy = dx * slope;

    let mut next_x = first_x;
    let mut next_y = first_y;
    let mut material = 0;

    // Every step crosses one more column, so the grid is left after width + 1 steps.
    for _ in 0..map.width() + 2 {
        // Going left, the cell being entered lies west of the line.
        let cell_x = if right {
            cell_of(next_x, cell_size)
        } else {
            cell_of(next_x, cell_size) - 1
        };
        let cell_y = cell_of(next_y, cell_size);

        match map.cell(cell_x, cell_y) {
            None => break,
            Some(0) => {
                next_x += dx;
                next_y += dy;
            }
            Some(tile) => {
                material = tile;
                break;
            }
        }
    }

    Some(Crossing {
        x: next_x,
        y: next_y,
        distance: distance(next_x - origin_x, next_y - origin_y),
        material,
    })
}

/// Walks the horizontal grid lines (`y = k * cell_size`) along the ray.
/// Mirror image of [`vertical_intersection`].
fn horizontal_intersection(
    map: &GridMap,
    origin_x: f32,
    origin_y: f32,
    angle: f32,
    cell_size: f32,
) -> Option<Crossing> {
    let sin = sinf(angle);
    if fabsf(sin) < AXIS_EPSILON {
        return None;
    }
    // y grows downwards, so a negative sine points up the screen.
    let up = sin < 0.0;
    let inverse_slope = cosf(angle) / sin;

    let first_y = if up {
        floorf(origin_y / cell_size) * cell_size
    } else {
        floorf(origin_y / cell_size) * cell_size + cell_size
    };
    let first_x = origin_x + (first_y - origin_y) * inverse_slope;

    let dy = if up { -cell_size } else { cell_size };
    let dx = dy * inverse_slope;

    let mut next_x = first_x;
    let mut next_y = first_y;
    let mut material = 0;

    for _ in 0..map.height() + 2 {
        let cell_x = cell_of(next_x, cell_size);
        let cell_y = if up {
            cell_of(next_y, cell_size) - 1
        } else {
            cell_of(next_y, cell_size)
        };

        match map.cell(cell_x, cell_y) {
            None => break,
            Some(0) => {
                next_x += dx;
                next_y += dy;
            }
            Some(tile) => {
                material = tile;
                break;
            }
        }
    }

    Some(Crossing {
        x: next_x,
        y: next_y,
        distance: distance(next_x - origin_x, next_y - origin_y),
        material,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    const CELL: f32 = 64.0;

    // 3x3 open room inside a one-cell ring; the east wall is material 2.
    fn room() -> GridMap {
        GridMap::parse(
            "\
#####
#...2
#...2
#...2
#####",
        )
        .unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        fabsf(a - b) < 1e-3
    }

    #[test]
    fn half_a_cell_from_the_face() {
        let map = room();
        // Centre of the easternmost open cell, looking east.
        let hit = cast_ray(&map, 224.0, 160.0, 0.0, CELL);
        assert!(close(hit.distance, 32.0), "distance {}", hit.distance);
        assert_eq!(hit.orientation, Orientation::Vertical);
        assert_eq!(hit.material, 2);
        assert!(close(hit.hit_x, 256.0));
        assert!(close(hit.hit_coordinate, 160.0));
    }

    #[test]
    fn axis_aligned_rays_from_room_centre() {
        let map = room();
        let cases = [
            (0.0, Orientation::Vertical),
            (FRAC_PI_2, Orientation::Horizontal),
            (PI, Orientation::Vertical),
            (3.0 * FRAC_PI_2, Orientation::Horizontal),
        ];
        for (angle, orientation) in cases {
            let hit = cast_ray(&map, 160.0, 160.0, angle, CELL);
            assert!(close(hit.distance, 96.0), "angle {angle}: distance {}", hit.distance);
            assert_eq!(hit.orientation, orientation, "angle {angle}");
            assert!(hit.distance.is_finite());
        }
    }

    #[test]
    fn unnormalized_angles_match_their_wrapped_form() {
        let map = room();
        let a = cast_ray(&map, 150.0, 130.0, 0.4, CELL);
        let b = cast_ray(&map, 150.0, 130.0, 0.4 + 2.0 * PI, CELL);
        let c = cast_ray(&map, 150.0, 130.0, 0.4 - 2.0 * PI, CELL);
        assert!(close(a.distance, b.distance));
        assert!(close(a.distance, c.distance));
        assert_eq!(a.orientation, b.orientation);
    }

    #[test]
    fn diagonal_ray_hits_the_nearer_family() {
        let map = room();
        // From the room centre at 45 degrees both families reach the south-east corner.
        let hit = cast_ray(&map, 160.0, 160.0, PI / 4.0, CELL);
        let expected = distance(96.0, 96.0);
        assert!(close(hit.distance, expected), "distance {}", hit.distance);
    }

    #[test]
    fn hit_point_lies_on_the_ray() {
        let map = room();
        for step in 0..64 {
            let angle = step as f32 * (2.0 * PI / 64.0) + 0.01;
            let hit = cast_ray(&map, 140.0, 170.0, angle, CELL);
            assert!(close(hit.hit_x, 140.0 + cosf(angle) * hit.distance));
            assert!(close(hit.hit_y, 170.0 + sinf(angle) * hit.distance));
            // Every face of the room is between half a cell and a diagonal away.
            assert!(hit.distance > 0.0 && hit.distance < 200.0);
        }
    }

    #[test]
    fn open_grid_escapes_at_the_boundary() {
        // No enclosing wall at all: rays must still stop at the grid edge.
        let map = GridMap::parse(
            "\
....
....
....",
        )
        .unwrap();
        for step in 0..32 {
            let angle = step as f32 * (2.0 * PI / 32.0);
            let hit = cast_ray(&map, 100.0, 90.0, angle, CELL);
            assert!(hit.distance.is_finite(), "angle {angle}");
            assert_eq!(hit.material, 0);
        }
        let east = cast_ray(&map, 100.0, 90.0, 0.0, CELL);
        assert!(close(east.distance, 156.0));
    }

    #[test]
    fn nearly_axis_aligned_rays_stay_finite() {
        let map = room();
        for angle in [1e-7, FRAC_PI_2 + 1e-7, PI - 1e-7, 3.0 * FRAC_PI_2 - 1e-7] {
            let hit = cast_ray(&map, 160.0, 160.0, angle, CELL);
            assert!(close(hit.distance, 96.0), "angle {angle}: distance {}", hit.distance);
        }
    }

    #[test]
    fn fan_has_configured_length_and_order() {
        let map = room();
        let pose = Pose::new(160.0, 160.0, 0.0);
        let config = Config { ray_count: 40, ..Config::new() };
        let mut rays = RayFan::new();
        cast_fan(&map, &pose, &config, &mut rays).unwrap();
        assert_eq!(rays.len(), 40);
        assert!(close(rays[0].angle, -config.half_fov()));
        assert!(rays.windows(2).all(|w| w[0].angle < w[1].angle));
        // The last ray stops one step short of the right edge.
        assert!(rays[39].angle < config.half_fov());

        cast_fan(&map, &pose, &config, &mut rays).unwrap();
        assert_eq!(rays.len(), 40);
    }

    #[test]
    fn fan_refuses_counts_it_cannot_hold() {
        let map = room();
        let pose = Pose::new(160.0, 160.0, 0.0);
        let mut rays = RayFan::new();

        let config = Config { ray_count: MAX_RAYS, ..Config::new() };
        cast_fan(&map, &pose, &config, &mut rays).unwrap();
        assert_eq!(rays.len(), MAX_RAYS);

        let config = Config { ray_count: MAX_RAYS + 80, ..Config::new() };
        assert_eq!(
            cast_fan(&map, &pose, &config, &mut rays),
            Err(ConfigError::RayCount(MAX_RAYS + 80))
        );
        assert!(rays.is_empty());

        let config = Config { ray_count: 0, ..Config::new() };
        assert_eq!(cast_fan(&map, &pose, &config, &mut rays), Err(ConfigError::RayCount(0)));
    }
}
