//! Clip-level types and frame range resolution.
//!
//! A clip is the set of actions active in the loaded scene. Its
//! authoritative last frame is the maximum boundary over every action
//! range, truncated to an integer.

use crate::util::{Error, Result};

/// A named keyframe time range contributing to a clip, in frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Action {
    pub start: f32,
    pub end: f32,
}

impl Action {
    /// Create an action covering `[start, end]`.
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }
}

/// Resolve the clip's last frame from the union of all action ranges.
///
/// Collects every `(start, end)` boundary, sorts, takes the maximum and
/// truncates it. The result is the exclusive sampling bound: frames
/// `0..last` are sampled, frame `last` itself is not.
///
/// Fails with [`Error::NoActionsFound`] when the scene has no actions;
/// no default range is assumed.
pub fn resolve_last_frame(actions: &[Action]) -> Result<u32> {
    if actions.is_empty() {
        return Err(Error::NoActionsFound);
    }
    let mut keys: Vec<f32> = actions
        .iter()
        .flat_map(|a| [a.start, a.end])
        .collect();
    keys.sort_by(|a, b| a.total_cmp(b));
    // Maximum boundary, truncated. Never empty here.
    Ok(keys[keys.len() - 1] as u32)
}
