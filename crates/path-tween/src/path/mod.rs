//! Pure path math: waypoint sources, Catmull-Rom spans and arc-length lookup.

pub mod interpolator;
pub mod spline;
pub mod waypoints;

pub use interpolator::{look_rotation, PathSample, PathTable};
pub use waypoints::{WaypointPath, WaypointSource};
