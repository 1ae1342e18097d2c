//! Scene host abstraction.
//!
//! The compiler never talks to an authoring tool directly; it drives a
//! [`SceneHost`], one implementation per source format:
//!
//! - [`GltfHost`] - glTF 2.0 backed host (`.gltf` / `.glb`)
//! - [`FbxHost`] - FBX placeholder, import not yet supported
//! - [`ScriptedHost`] - deterministic in-memory host for tests
//!
//! A host owns process-wide mutable scene state: one scene at a time,
//! fully reset before each import. Assets are therefore compiled
//! strictly one after another.

mod fbx;
mod gltf;
mod scripted;

pub use fbx::*;
pub use gltf::*;
pub use scripted::*;

use std::path::Path;

use glam::Vec3;

use crate::clip::Action;
use crate::util::Result;

/// Opaque handle to one bone in the host's fixed selection order.
///
/// The wrapped index is the bone's position in the sequence returned by
/// [`SceneHost::select_all_bones`] and is its only identity; no name or
/// hierarchy information ever reaches the archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoneHandle(pub usize);

/// One bone's decomposed transform at the current frame: translation,
/// rotation as XYZ Euler angles in radians, scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseTransform {
    pub translation: Vec3,
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl PoseTransform {
    /// Identity pose: zero translation and rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Capabilities the compiler requires from an authoring-tool runtime.
///
/// All operations are synchronous and blocking; `set_current_frame`
/// and `force_evaluate` re-evaluate the scene's transform hierarchy.
/// Implementations must resolve parent transforms before children's
/// whenever [`SceneHost::force_evaluate`] returns.
pub trait SceneHost {
    /// Discard all scene state, returning to an empty scene.
    fn reset(&mut self);

    /// Load an asset file into the (empty) scene.
    fn import(&mut self, path: &Path) -> Result<()>;

    /// Switch to pose-evaluation mode.
    fn enter_pose_mode(&mut self);

    /// Select every bone in the scene and fix their iteration order for
    /// the remainder of the current record.
    fn select_all_bones(&mut self) -> Vec<BoneHandle>;

    /// Advance the scene's current time to the given frame.
    fn set_current_frame(&mut self, frame: u32);

    /// Re-evaluate the transform hierarchy at the current frame,
    /// parents before children.
    fn force_evaluate(&mut self);

    /// Decomposed transform of the bone's evaluated pose matrix.
    fn local_transform(&self, bone: BoneHandle) -> PoseTransform;

    /// Keyframe ranges of every action in the scene.
    fn list_actions(&self) -> Vec<Action>;

    /// File extensions (lowercase, without dot) this host can import.
    fn supported_extensions(&self) -> &[&str];
}
