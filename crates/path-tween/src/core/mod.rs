pub mod host;
pub mod scene;
