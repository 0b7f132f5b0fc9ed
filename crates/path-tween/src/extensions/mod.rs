// extensions/mod.rs
//
// Optional extension modules. Decoupled from the tween core: paths only see
// them through PathStyle.

pub mod easing;

pub use easing::Easing;
