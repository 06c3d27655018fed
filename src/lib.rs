// Initially based on [wasm4-raycaster](https://github.com/grantshandy/wasm4-raycaster)
// which carries an MIT License and is Copyright (c) 2023 Grant Handy.

#![cfg_attr(target_arch = "wasm32", no_std)]

pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod log;
pub mod scheduler;
pub mod sink;
pub mod state;
pub mod util;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod cart;
#[cfg(target_arch = "wasm32")]
mod wasm4;

pub use config::Config;
pub use error::{ConfigError, MapError};
pub use input::{Controls, Mailbox};
pub use scheduler::TickScheduler;
pub use sink::{MinimapCell, MinimapPlayer, MinimapRay, RenderSink, WallColumn};
pub use state::map::GridMap;
pub use state::player::{move_player, Intent, Pose};
pub use state::raycast::{cast_fan, cast_ray, Orientation, RayFan, RayHit};
pub use state::State;
