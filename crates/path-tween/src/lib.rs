pub mod api;
pub mod core;
pub mod components;
pub mod path;
pub mod tween;
pub mod systems;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::TweenConfig;
pub use api::error::TweenError;
pub use api::types::{NodeId, TweenId, PathwayShape, PathStyle};
pub use components::node::Node;
pub use crate::core::host::TransformHost;
pub use crate::core::scene::Scene;
pub use path::{PathSample, PathTable, WaypointPath, WaypointSource, look_rotation};
pub use tween::{TweenManager, TweenView, PathTween, OnComplete};
pub use extensions::Easing;

#[cfg(feature = "debug-draw")]
pub use systems::debug::{debug_draw_paths, PathVertex, PathStrip};
