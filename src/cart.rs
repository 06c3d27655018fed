use core::panic::PanicInfo;

use rand::{rngs::SmallRng, SeedableRng};

use crate::config::Config;
use crate::constants::{CELL_SIZE, FRAME_MICROS, MAZE_HEIGHT, MAZE_WIDTH};
use crate::input::{Controls, Mailbox};
use crate::scheduler::TickScheduler;
use crate::sink::{MinimapCell, MinimapPlayer, MinimapRay, RenderSink, WallColumn};
use crate::state::maze;
use crate::state::player::Intent;
use crate::state::raycast::Orientation;
use crate::state::State;
use crate::tracef;
use crate::wasm4::{diskr, line, rect, trace, vline, DRAW_COLORS, GAMEPAD1, MOUSE_X, PALETTE};

// 15x15 maze at 4 px per cell fits in the top-left corner.
const CART_CONFIG: Config = Config {
    minimap_scale: 4.0 / CELL_SIZE,
    minimap_x: 2.0,
    minimap_y: 2.0,
    player_size: 3.0,
    ..Config::new()
};

const MORTAR_SPACING: f32 = CELL_SIZE / 4.0;
const MORTAR_WIDTH: f32 = 1.5;

static mut STATE: State = State::new(CART_CONFIG);
static mut SCHEDULER: TickScheduler = TickScheduler::new(CART_CONFIG.tick_interval_ms);
static mut MAILBOX: Mailbox<Intent> = Mailbox::new();
static mut CONTROLS: Controls = Controls::with_speed(CART_CONFIG.move_speed);

#[no_mangle]
unsafe fn start() {
    // ceiling, floor, wall, shaded wall
    *PALETTE = [0xffffff, 0xd52b1e, 0x013aa6, 0xffa500];

    if let Err(err) = STATE.config.validate() {
        tracef!("config: {}, using defaults", err);
        STATE.config = Config::new();
    }

    let mut buffer = [0u8; core::mem::size_of::<u32>()];
    diskr(buffer.as_mut_ptr(), buffer.len() as u32);
    let seed = u32::from_le_bytes(buffer);
    tracef!("maze seed {}", seed);

    let mut rng = SmallRng::seed_from_u64(seed as u64);
    let loaded = maze::generate(MAZE_WIDTH, MAZE_HEIGHT, &mut rng).and_then(|map| STATE.load_map(map));
    if let Err(err) = loaded {
        tracef!("map: {}", err);
    }
}

#[no_mangle]
unsafe fn update() {
    let sample = CONTROLS.sample(*GAMEPAD1, *MOUSE_X);
    MAILBOX.post(sample.intent);
    if sample.toggle_minimap {
        STATE.toggle_minimap();
    }

    // update() never re-enters, so the guard is always free here.
    if SCHEDULER.advance(FRAME_MICROS) {
        if let Some(_guard) = SCHEDULER.try_begin() {
            let intent = MAILBOX.take().unwrap_or_default();
            CONTROLS.clear_turn();
            if let Err(err) = STATE.tick(&intent) {
                tracef!("tick: {}", err);
            }
        }
    }

    // The framebuffer is cleared every frame, so redraw even between ticks.
    STATE.render(&mut Wasm4Sink);
}

/// Draws straight into the WASM-4 framebuffer with the palette set in `start`.
struct Wasm4Sink;

impl Wasm4Sink {
    fn vspan(color: u16, x: u32, width: u32, y0: u32, y1: u32) {
        unsafe { *DRAW_COLORS = color };
        for dx in 0..width {
            vline((x + dx) as i32, y0 as i32, y1.saturating_sub(y0));
        }
    }
}

impl RenderSink for Wasm4Sink {
    fn draw_wall_column(&mut self, column: &WallColumn) {
        let color = match column.orientation {
            Orientation::Vertical => 0x4,
            Orientation::Horizontal => 0x3,
        };
        let color = if column.is_mortar(MORTAR_SPACING, MORTAR_WIDTH) { 0x2 } else { color };
        Wasm4Sink::vspan(color, column.x, column.width, column.top, column.bottom);
    }

    fn draw_floor_span(&mut self, x: u32, width: u32, y0: u32, y1: u32) {
        Wasm4Sink::vspan(0x2, x, width, y0, y1);
    }

    fn draw_ceiling_span(&mut self, x: u32, width: u32, y0: u32, y1: u32) {
        Wasm4Sink::vspan(0x1, x, width, y0, y1);
    }

    fn draw_minimap_cell(&mut self, cell: &MinimapCell) {
        let size = (cell.size as u32).max(1);
        unsafe { *DRAW_COLORS = 0x3 };
        rect(cell.x as i32, cell.y as i32, size, size);
    }

    fn draw_minimap_ray(&mut self, ray: &MinimapRay) {
        unsafe { *DRAW_COLORS = 0x4 };
        line(ray.from.0 as i32, ray.from.1 as i32, ray.to.0 as i32, ray.to.1 as i32);
    }

    fn draw_minimap_player(&mut self, player: &MinimapPlayer) {
        let size = (player.size as u32).max(1);
        let half = player.size * 0.5;
        unsafe { *DRAW_COLORS = 0x2 };
        rect((player.x - half) as i32, (player.y - half) as i32, size, size);
        line(
            player.x as i32,
            player.y as i32,
            player.heading_to.0 as i32,
            player.heading_to.1 as i32,
        );
    }
}

#[panic_handler]
fn panic_handler(_panic_info: &PanicInfo<'_>) -> ! {
    trace("panic occurred");
    core::arch::wasm32::unreachable()
}
