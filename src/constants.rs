use core::f32::consts::PI;

pub const SCREEN_SIZE: u32 = 160; // WASM-4 framebuffer is 160x160
pub const FRAME_MICROS: u32 = 16_667; // host calls update() at 60 Hz

pub const TICK_INTERVAL_MS: u32 = 30;
pub const FOV_DEGREES: f32 = 60.0;
pub const CELL_SIZE: f32 = 64.0; // world units per grid cell
pub const PLAYER_SIZE: f32 = 10.0;
pub const MOVE_SPEED: f32 = 2.0; // world units per tick
pub const TURN_STEP_DEGREES: f32 = 3.0; // per frame when turning with the gamepad

pub const MINIMAP_SCALE: f32 = 0.75;

pub const MAX_MAP_WIDTH: usize = 64;
pub const MAX_MAP_HEIGHT: usize = 64;
pub const MAX_CELLS: usize = MAX_MAP_WIDTH * MAX_MAP_HEIGHT;
pub const MAX_RAYS: usize = 320;

pub const MAZE_WIDTH: usize = 7; // carved cells, grid is 2w+1 wide
pub const MAZE_HEIGHT: usize = 7;
pub const MAX_MAZE_CELLS: usize = (MAX_MAP_WIDTH / 2) * (MAX_MAP_HEIGHT / 2);

pub const AXIS_EPSILON: f32 = 1e-6; // below this a ray is parallel to a grid-line family
pub const MIN_DISTANCE: f32 = 1e-3; // camera-in-wall clamp for projection

pub const TAU: f32 = 2.0 * PI;
