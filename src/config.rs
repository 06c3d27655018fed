use crate::constants::{
    CELL_SIZE, FOV_DEGREES, MAX_RAYS, MINIMAP_SCALE, MOVE_SPEED, PLAYER_SIZE, SCREEN_SIZE,
    TICK_INTERVAL_MS,
};
use crate::error::ConfigError;
use crate::util::to_radians;

/// Tuning for one session. Ray count is independent of the screen width;
/// each ray covers `screen_width / ray_count` columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub tick_interval_ms: u32,
    pub fov_degrees: f32,
    pub cell_size: f32,
    pub player_size: f32,
    pub move_speed: f32,
    pub ray_count: usize,
    pub screen_width: u32,
    pub screen_height: u32,
    pub minimap_scale: f32,
    pub minimap_x: f32,
    pub minimap_y: f32,
}

impl Config {
    pub const fn new() -> Config {
        Config {
            tick_interval_ms: TICK_INTERVAL_MS,
            fov_degrees: FOV_DEGREES,
            cell_size: CELL_SIZE,
            player_size: PLAYER_SIZE,
            move_speed: MOVE_SPEED,
            ray_count: SCREEN_SIZE as usize,
            screen_width: SCREEN_SIZE,
            screen_height: SCREEN_SIZE,
            minimap_scale: MINIMAP_SCALE,
            minimap_x: 0.0,
            minimap_y: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 || self.ray_count > MAX_RAYS {
            return Err(ConfigError::RayCount(self.ray_count));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::CellSize);
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView);
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Screen);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        if !(self.minimap_scale > 0.0) {
            return Err(ConfigError::MinimapScale);
        }
        Ok(())
    }

    pub fn fov(&self) -> f32 {
        to_radians(self.fov_degrees)
    }

    pub fn half_fov(&self) -> f32 {
        self.fov() * 0.5
    }

    /// The angle between neighbouring rays.
    pub fn angle_step(&self) -> f32 {
        self.fov() / self.ray_count as f32
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.ray_count, 160);
        assert_eq!(config.cell_size, 64.0);
        assert_eq!(config.tick_interval_ms, 30);
    }

    #[test]
    fn rejects_ray_counts_outside_capacity() {
        let config = Config { ray_count: 0, ..Config::new() };
        assert_eq!(config.validate(), Err(ConfigError::RayCount(0)));
        let config = Config { ray_count: MAX_RAYS + 1, ..Config::new() };
        assert_eq!(config.validate(), Err(ConfigError::RayCount(MAX_RAYS + 1)));
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let config = Config { cell_size: 0.0, ..Config::new() };
        assert_eq!(config.validate(), Err(ConfigError::CellSize));
        let config = Config { fov_degrees: 180.0, ..Config::new() };
        assert_eq!(config.validate(), Err(ConfigError::FieldOfView));
        let config = Config { screen_height: 0, ..Config::new() };
        assert_eq!(config.validate(), Err(ConfigError::Screen));
    }
}
