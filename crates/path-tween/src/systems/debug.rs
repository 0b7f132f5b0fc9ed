//! Debug rendering — opt-in path visualization for editor gizmos.
//!
//! Read-only: flattens every active tween's path into line-strip vertices a
//! renderer can upload as-is. Nothing here mutates tween state.

use bytemuck::{Pod, Zeroable};
use crate::tween::manager::{TweenManager, TweenView};

/// One vertex of a debug line strip. 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PathVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// 0.0 at the path start, 1.0 at its end. Lets the renderer fade the
    /// part already travelled.
    pub t: f32,
}

impl PathVertex {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A contiguous strip inside the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStrip {
    pub first: u32,
    pub count: u32,
}

/// Rebuild `vertices` and `strips` from all active tweens.
///
/// Clears previous output. Call once per frame when gizmos are visible.
pub fn debug_draw_paths(
    tweens: &TweenManager,
    vertices: &mut Vec<PathVertex>,
    strips: &mut Vec<PathStrip>,
) {
    vertices.clear();
    strips.clear();
    for view in tweens.iter() {
        let first = vertices.len() as u32;
        push_path(&view, vertices);
        strips.push(PathStrip {
            first,
            count: vertices.len() as u32 - first,
        });
    }
}

fn push_path(view: &TweenView<'_>, vertices: &mut Vec<PathVertex>) {
    let last = view.path.len().saturating_sub(1).max(1) as f32;
    vertices.extend(view.path.iter().enumerate().map(|(i, p)| PathVertex {
        x: p.x,
        y: p.y,
        z: p.z,
        t: i as f32 / last,
    }));
}
