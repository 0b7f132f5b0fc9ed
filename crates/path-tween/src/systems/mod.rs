#[cfg(feature = "debug-draw")]
pub mod debug;
