//! Tween lifecycle: requests, pooled run state and the manager that pumps it.

mod instance;
pub mod manager;
mod pool;
pub mod request;

pub use manager::{TweenManager, TweenView};
pub use request::{OnComplete, PathTween};
