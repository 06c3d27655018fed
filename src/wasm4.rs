//! WASM-4 platform bindings used by the cartridge.
//! See https://wasm4.org/docs/reference/memory and /functions.

pub const PALETTE: *mut [u32; 4] = 0x04 as *mut [u32; 4];
pub const DRAW_COLORS: *mut u16 = 0x14 as *mut u16;
pub const GAMEPAD1: *const u8 = 0x16 as *const u8;
pub const MOUSE_X: *const i16 = 0x1a as *const i16;

pub fn vline(x: i32, y: i32, len: u32) {
    unsafe { extern_vline(x, y, len) }
}

pub fn rect(x: i32, y: i32, width: u32, height: u32) {
    unsafe { extern_rect(x, y, width, height) }
}

pub fn line(x1: i32, y1: i32, x2: i32, y2: i32) {
    unsafe { extern_line(x1, y1, x2, y2) }
}

pub fn trace<T: AsRef<str>>(text: T) {
    let text = text.as_ref();
    unsafe { extern_trace(text.as_ptr(), text.len()) }
}

extern "C" {
    #[link_name = "vline"]
    fn extern_vline(x: i32, y: i32, len: u32);

    #[link_name = "rect"]
    fn extern_rect(x: i32, y: i32, width: u32, height: u32);

    #[link_name = "line"]
    fn extern_line(x1: i32, y1: i32, x2: i32, y2: i32);

    #[link_name = "traceUtf8"]
    fn extern_trace(trace: *const u8, length: usize);

    /// Reads up to `size` bytes of persistent storage into `dest`.
    pub fn diskr(dest: *mut u8, size: u32) -> u32;
}
