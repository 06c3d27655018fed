//! Draw commands handed to whatever owns the pixels.

use libm::fmodf;

use crate::state::raycast::Orientation;

/// One projected slice of the first-person view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallColumn {
    /// Leftmost screen column covered by this ray.
    pub x: u32,
    /// Number of screen columns covered, `screen_width / ray_count` rounded to whole pixels.
    pub width: u32,
    /// Top of the wall before clipping; negative when the wall overflows the view.
    pub projected_top: f32,
    pub projected_height: f32,
    /// Clipped wall rows, `top..bottom`.
    pub top: u32,
    pub bottom: u32,
    pub orientation: Orientation,
    /// Offset along the struck face in `[0, cell_size)`.
    pub texture_x: f32,
    pub material: u8,
    /// Fish-eye corrected distance.
    pub distance: f32,
}

impl WallColumn {
    /// True when this slice falls on a mortar line of a brick pattern repeating
    /// every `spacing` units along the face, each line `width` units thick.
    pub fn is_mortar(&self, spacing: f32, width: f32) -> bool {
        fmodf(self.texture_x, spacing) < width
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapCell {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub material: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapRay {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// Player marker: a square of `size` centred on `x, y`, plus a heading tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapPlayer {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub heading_to: (f32, f32),
}

/// Receives everything a frame draws. Spans are half-open row ranges `y0..y1`.
pub trait RenderSink {
    fn draw_wall_column(&mut self, column: &WallColumn);
    fn draw_floor_span(&mut self, x: u32, width: u32, y0: u32, y1: u32);
    fn draw_ceiling_span(&mut self, x: u32, width: u32, y0: u32, y1: u32);
    fn draw_minimap_cell(&mut self, cell: &MinimapCell);
    fn draw_minimap_ray(&mut self, ray: &MinimapRay);
    fn draw_minimap_player(&mut self, player: &MinimapPlayer);
}
