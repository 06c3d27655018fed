use libm::{cosf, fmaxf, fmodf, roundf, sinf};

use crate::config::Config;
use crate::constants::MIN_DISTANCE;
use crate::sink::{MinimapCell, MinimapPlayer, MinimapRay, RenderSink, WallColumn};
use crate::state::map::GridMap;
use crate::state::player::Pose;
use crate::state::raycast::RayHit;

/// Removes the fish-eye bulge: distance measured along the view direction
/// instead of along the ray.
pub fn fix_fish_eye(distance: f32, ray_angle: f32, player_angle: f32) -> f32 {
    distance * cosf(ray_angle - player_angle)
}

/// On-screen height of a wall one cell tall at `corrected_distance`.
/// Distances below `MIN_DISTANCE` are clamped so a camera touching a wall stays finite.
pub fn wall_height(corrected_distance: f32, cell_size: f32, screen_height: f32) -> f32 {
    (cell_size / fmaxf(corrected_distance, MIN_DISTANCE)) * screen_height
}

/// Offset along the struck face, wrapping every `cell_size` units into `[0, cell_size)`.
pub fn texture_coordinate(hit_coordinate: f32, cell_size: f32) -> f32 {
    let offset = fmodf(hit_coordinate, cell_size);
    let offset = if offset < 0.0 { offset + cell_size } else { offset };
    // -0.0001 % 64 + 64 rounds up to exactly 64
    if offset >= cell_size {
        0.0
    } else {
        offset
    }
}

/// Screen columns `x..x + width` belonging to ray `index`.
pub fn column_span(index: usize, ray_count: usize, screen_width: u32) -> (u32, u32) {
    let width = screen_width as usize;
    let start = index * width / ray_count;
    let end = (index + 1) * width / ray_count;
    (start as u32, (end - start).max(1) as u32)
}

pub fn project_column(index: usize, hit: &RayHit, player_angle: f32, config: &Config) -> WallColumn {
    let screen_height = config.screen_height as f32;
    let distance = fix_fish_eye(hit.distance, hit.angle, player_angle);
    let height = wall_height(distance, config.cell_size, screen_height);

    // Centred vertically on the view.
    let projected_top = (screen_height - height) * 0.5;
    let top = roundf(projected_top).clamp(0.0, screen_height) as u32;
    let bottom = roundf(projected_top + height).clamp(0.0, screen_height) as u32;

    let (x, width) = column_span(index, config.ray_count, config.screen_width);

    WallColumn {
        x,
        width,
        projected_top,
        projected_height: height,
        top,
        bottom,
        orientation: hit.orientation,
        texture_x: texture_coordinate(hit.hit_coordinate, config.cell_size),
        material: hit.material,
        distance,
    }
}

/// Draws the first-person view: ceiling, wall and floor for every ray.
pub fn render_walls<S: RenderSink>(rays: &[RayHit], pose: &Pose, config: &Config, sink: &mut S) {
    for (idx, hit) in rays.iter().enumerate() {
        let column = project_column(idx, hit, pose.angle, config);

        if column.top > 0 {
            sink.draw_ceiling_span(column.x, column.width, 0, column.top);
        }
        if column.bottom > column.top {
            sink.draw_wall_column(&column);
        }
        if column.bottom < config.screen_height {
            sink.draw_floor_span(column.x, column.width, column.bottom, config.screen_height);
        }
    }
}

/// Draws the overhead view: wall cells, the ray fan, then the player on top.
pub fn render_minimap<S: RenderSink>(
    map: &GridMap,
    pose: &Pose,
    rays: &[RayHit],
    config: &Config,
    sink: &mut S,
) {
    let scale = config.minimap_scale;
    let (origin_x, origin_y) = (config.minimap_x, config.minimap_y);
    let cell_size = scale * config.cell_size;
    let to_minimap = |x: f32, y: f32| (origin_x + x * scale, origin_y + y * scale);

    for (cell_x, cell_y, material) in map.walls() {
        sink.draw_minimap_cell(&MinimapCell {
            x: origin_x + cell_x as f32 * cell_size,
            y: origin_y + cell_y as f32 * cell_size,
            size: cell_size,
            material,
        });
    }

    let player = to_minimap(pose.x, pose.y);
    for hit in rays {
        sink.draw_minimap_ray(&MinimapRay {
            from: player,
            to: to_minimap(hit.hit_x, hit.hit_y),
        });
    }

    // Marker and heading tick are sized in minimap pixels so they stay visible at any scale.
    let heading_length = config.player_size * 2.0;
    sink.draw_minimap_player(&MinimapPlayer {
        x: player.0,
        y: player.1,
        size: config.player_size,
        heading_to: (
            player.0 + cosf(pose.angle) * heading_length,
            player.1 + sinf(pose.angle) * heading_length,
        ),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::raycast::Orientation;
    use core::f32::consts::PI;

    #[derive(Default)]
    struct Counter {
        walls: usize,
        floors: usize,
        ceilings: usize,
        cells: usize,
        rays: usize,
        players: usize,
        covered: u32,
    }

    impl RenderSink for Counter {
        fn draw_wall_column(&mut self, column: &WallColumn) {
            self.walls += 1;
            self.covered += column.width;
        }
        fn draw_floor_span(&mut self, _x: u32, _width: u32, _y0: u32, _y1: u32) {
            self.floors += 1;
        }
        fn draw_ceiling_span(&mut self, _x: u32, _width: u32, _y0: u32, _y1: u32) {
            self.ceilings += 1;
        }
        fn draw_minimap_cell(&mut self, _cell: &MinimapCell) {
            self.cells += 1;
        }
        fn draw_minimap_ray(&mut self, _ray: &MinimapRay) {
            self.rays += 1;
        }
        fn draw_minimap_player(&mut self, _player: &MinimapPlayer) {
            self.players += 1;
        }
    }

    fn hit(angle: f32, distance: f32) -> RayHit {
        RayHit {
            angle,
            distance,
            orientation: Orientation::Vertical,
            hit_coordinate: 100.0,
            hit_x: 0.0,
            hit_y: 0.0,
            material: 1,
        }
    }

    #[test]
    fn fish_eye_leaves_the_centre_ray_alone() {
        assert_eq!(fix_fish_eye(120.0, 0.7, 0.7), 120.0);
        let half_fov = PI / 6.0;
        assert!(fix_fish_eye(120.0, 0.7 + half_fov, 0.7) < 120.0);
        assert!(fix_fish_eye(120.0, 0.7 - half_fov, 0.7) < 120.0);
    }

    #[test]
    fn walls_shrink_with_distance() {
        let mut previous = f32::INFINITY;
        for step in 1..200 {
            let height = wall_height(step as f32 * 3.0, 64.0, 160.0);
            assert!(height < previous);
            previous = height;
        }
        assert_eq!(wall_height(64.0, 64.0, 160.0), 160.0);
    }

    #[test]
    fn zero_distance_is_clamped() {
        let height = wall_height(0.0, 64.0, 160.0);
        assert!(height.is_finite());
        assert_eq!(height, wall_height(MIN_DISTANCE, 64.0, 160.0));
        assert!(wall_height(-5.0, 64.0, 160.0).is_finite());
    }

    #[test]
    fn texture_wraps_every_cell() {
        assert_eq!(texture_coordinate(100.0, 64.0), 36.0);
        assert_eq!(texture_coordinate(128.0, 64.0), 0.0);
        assert_eq!(texture_coordinate(-10.0, 64.0), 54.0);
        let tiny = texture_coordinate(-1e-6, 64.0);
        assert!((0.0..64.0).contains(&tiny));
    }

    #[test]
    fn close_walls_are_clipped_to_the_view() {
        let config = Config::new();
        let column = project_column(0, &hit(0.0, 32.0), 0.0, &config);
        assert_eq!(column.projected_height, 320.0);
        assert_eq!(column.projected_top, -80.0);
        assert_eq!((column.top, column.bottom), (0, 160));
        assert_eq!(column.texture_x, 36.0);
    }

    #[test]
    fn far_walls_leave_floor_and_ceiling() {
        let config = Config::new();
        let column = project_column(5, &hit(0.0, 256.0), 0.0, &config);
        assert_eq!(column.projected_height, 40.0);
        assert_eq!((column.top, column.bottom), (60, 100));
        assert_eq!((column.x, column.width), (5, 1));
    }

    #[test]
    fn spans_tile_the_screen_for_any_ray_count() {
        for ray_count in [1, 7, 40, 160, 320] {
            let mut next = 0;
            for index in 0..ray_count {
                let (x, width) = column_span(index, ray_count, 160);
                assert!(x <= next, "ray_count {ray_count} index {index}");
                next = next.max(x + width);
            }
            assert_eq!(next, 160, "ray_count {ray_count}");
        }
    }

    #[test]
    fn renders_every_column() {
        let config = Config { ray_count: 40, ..Config::new() };
        let pose = Pose::new(0.0, 0.0, 0.0);
        let rays: Vec<RayHit> = (0..40).map(|i| hit(i as f32 * 0.01, 256.0)).collect();
        let mut counter = Counter::default();
        render_walls(&rays, &pose, &config, &mut counter);
        assert_eq!(counter.walls, 40);
        assert_eq!(counter.floors, 40);
        assert_eq!(counter.ceilings, 40);
        assert_eq!(counter.covered, 160);
    }

    #[test]
    fn minimap_draws_walls_rays_and_player() {
        let map = GridMap::parse("###\n#.#\n###").unwrap();
        let pose = Pose::new(96.0, 96.0, 0.0);
        let rays = [hit(0.0, 32.0), hit(0.1, 32.0)];
        let mut counter = Counter::default();
        render_minimap(&map, &pose, &rays, &Config::new(), &mut counter);
        assert_eq!(counter.cells, 8);
        assert_eq!(counter.rays, 2);
        assert_eq!(counter.players, 1);
    }
}
