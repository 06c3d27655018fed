pub mod map;
pub mod maze;
pub mod player;
pub mod raycast;

use crate::config::Config;
use crate::error::{ConfigError, MapError};
use crate::sink::RenderSink;
use crate::tracef;
use crate::view::{render_minimap, render_walls};

use map::GridMap;
use player::{move_player, Intent, Pose};
use raycast::{cast_fan, RayFan};

/// Everything one session mutates. Only the tick touches the pose and the ray fan;
/// the map is fixed once loaded.
pub struct State {
    pub config: Config,
    pub map: GridMap,
    pub pose: Pose,
    pub rays: RayFan,
    pub minimap_visible: bool,
}

impl State {
    pub const fn new(config: Config) -> State {
        State {
            config,
            map: GridMap::new(),
            pose: Pose::new(0.0, 0.0, 0.0),
            rays: RayFan::new(),
            minimap_visible: true,
        }
    }

    /// A session on `map` with the player at `pose`. The config is checked up front.
    pub fn with_map(config: Config, map: GridMap, pose: Pose) -> Result<State, ConfigError> {
        config.validate()?;
        let mut state = State::new(config);
        state.map = map;
        state.pose = pose;
        Ok(state)
    }

    /// Swaps in a new map and spawns the player in the centre of its first open cell.
    pub fn load_map(&mut self, map: GridMap) -> Result<(), MapError> {
        let (cell_x, cell_y) = map.first_open_cell().ok_or(MapError::Empty)?;
        self.pose = Pose::at_cell(cell_x, cell_y, self.config.cell_size, 0.0);
        tracef!("map {}x{} spawn {},{}", map.width(), map.height(), cell_x, cell_y);
        self.map = map;
        self.rays.clear();
        Ok(())
    }

    pub fn toggle_minimap(&mut self) {
        self.minimap_visible = !self.minimap_visible;
        tracef!("minimap {}", if self.minimap_visible { "on" } else { "off" });
    }

    /// Moves the player, then recasts the whole fan from the new pose.
    /// Fails without casting when `config.ray_count` does not fit the fan.
    pub fn tick(&mut self, intent: &Intent) -> Result<&RayFan, ConfigError> {
        self.pose = move_player(&self.pose, intent, &self.map, self.config.cell_size);
        cast_fan(&self.map, &self.pose, &self.config, &mut self.rays)?;
        Ok(&self.rays)
    }

    /// Draws the current fan: first-person view, then the minimap when it is shown.
    pub fn render<S: RenderSink>(&self, sink: &mut S) {
        render_walls(&self.rays, &self.pose, &self.config, sink);
        if self.minimap_visible {
            render_minimap(&self.map, &self.pose, &self.rays, &self.config, sink);
        }
    }

    /// One full cycle: move, cast, draw.
    pub fn step<S: RenderSink>(
        &mut self,
        intent: &Intent,
        sink: &mut S,
    ) -> Result<(), ConfigError> {
        self.tick(intent)?;
        self.render(sink);
        Ok(())
    }
}
