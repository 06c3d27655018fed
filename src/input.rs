use core::cell::Cell;

use crate::constants::{MOVE_SPEED, TURN_STEP_DEGREES};
use crate::state::player::Intent;
use crate::util::to_radians;

// Gamepad bits as laid out in the WASM-4 GAMEPAD registers.
pub const BUTTON_1: u8 = 1;
pub const BUTTON_2: u8 = 2;
pub const BUTTON_LEFT: u8 = 16;
pub const BUTTON_RIGHT: u8 = 32;
pub const BUTTON_UP: u8 = 64;
pub const BUTTON_DOWN: u8 = 128;

/// Single-slot mailbox. Writers overwrite whatever is waiting; the reader takes the
/// latest value in one step, so a tick never sees half of an update.
pub struct Mailbox<T: Copy> {
    slot: Cell<Option<T>>,
}

impl<T: Copy> Mailbox<T> {
    pub const fn new() -> Mailbox<T> {
        Mailbox { slot: Cell::new(None) }
    }

    pub fn post(&self, value: T) {
        self.slot.set(Some(value));
    }

    pub fn take(&self) -> Option<T> {
        self.slot.take()
    }
}

impl<T: Copy> Default for Mailbox<T> {
    fn default() -> Self {
        Mailbox::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub intent: Intent,
    pub toggle_minimap: bool,
}

/// Turns raw gamepad and pointer state into an [`Intent`].
///
/// Directions are held states: each is ±`speed` while pressed and 0 when released.
/// Heading changes build up between ticks until [`Controls::clear_turn`] says a tick used them.
pub struct Controls {
    speed: f32,
    previous_buttons: u8,
    previous_mouse_x: Option<i16>,
    pending_turn: f32,
}

impl Controls {
    pub const fn new() -> Controls {
        Controls::with_speed(MOVE_SPEED)
    }

    pub const fn with_speed(speed: f32) -> Controls {
        Controls {
            speed,
            previous_buttons: 0,
            previous_mouse_x: None,
            pending_turn: 0.0,
        }
    }

    pub fn sample(&mut self, buttons: u8, mouse_x: i16) -> Sample {
        let pressed = buttons & (buttons ^ self.previous_buttons);
        self.previous_buttons = buttons;

        let held = |bit: u8| buttons & bit != 0;

        let mut forward = 0.0;
        if held(BUTTON_UP) {
            forward = self.speed;
        }
        if held(BUTTON_DOWN) {
            forward = -self.speed;
        }

        // With BUTTON_1 held, left/right turn instead of strafing.
        let mut strafe = 0.0;
        if held(BUTTON_1) {
            if held(BUTTON_LEFT) {
                self.pending_turn -= to_radians(TURN_STEP_DEGREES);
            }
            if held(BUTTON_RIGHT) {
                self.pending_turn += to_radians(TURN_STEP_DEGREES);
            }
        } else {
            if held(BUTTON_LEFT) {
                strafe = self.speed;
            }
            if held(BUTTON_RIGHT) {
                strafe = -self.speed;
            }
        }

        // One degree of heading per pixel of horizontal pointer travel.
        if let Some(previous) = self.previous_mouse_x {
            self.pending_turn += to_radians(mouse_x as f32 - previous as f32);
        }
        self.previous_mouse_x = Some(mouse_x);

        Sample {
            intent: Intent { forward, strafe, turn: self.pending_turn },
            toggle_minimap: pressed & BUTTON_2 != 0,
        }
    }

    /// Forgets the accumulated heading change once a tick has applied it.
    pub fn clear_turn(&mut self) {
        self.pending_turn = 0.0;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Controls::new()
    }
}
