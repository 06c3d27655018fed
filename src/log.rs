//! Debug output. On the cartridge this goes to the WASM-4 console, elsewhere to stderr.

/// Formats into a fixed-size buffer and traces it. Long messages are truncated.
#[macro_export]
macro_rules! tracef {
    ($($arg:tt)*) => {{
        let mut message = heapless::String::<64>::new();
        let _ = core::fmt::Write::write_fmt(&mut message, format_args!($($arg)*));
        $crate::log::trace(message.as_str());
    }};
}

#[cfg(target_arch = "wasm32")]
pub fn trace(message: &str) {
    crate::wasm4::trace(message);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn trace(message: &str) {
    std::eprintln!("{message}");
}
