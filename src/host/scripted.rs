//! Deterministic in-memory scene host for tests.
//!
//! Stands in for a real authoring-tool runtime: any import "loads" a
//! preprogrammed scene with a fixed bone count and action set, and
//! every pose transform is a pure function of (frame, bone) so tests
//! can verify sample ordering byte by byte.

use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::clip::Action;
use crate::util::Result;

use super::{BoneHandle, PoseTransform, SceneHost};

/// Test host with preprogrammed actions and per-frame transforms.
pub struct ScriptedHost {
    bones: usize,
    actions: Vec<Action>,
    loaded: bool,
    pose_mode: bool,
    frame: u32,
    evaluated: bool,
    /// Every path imported since construction, in order.
    pub imported: Vec<PathBuf>,
}

impl ScriptedHost {
    /// A host whose scenes have `bones` bones and the given actions.
    pub fn new(bones: usize, actions: Vec<Action>) -> Self {
        Self {
            bones,
            actions,
            loaded: false,
            pose_mode: false,
            frame: 0,
            evaluated: false,
            imported: Vec::new(),
        }
    }

    /// The transform this host reports for `bone` at `frame`.
    pub fn transform_at(frame: u32, bone: usize) -> PoseTransform {
        PoseTransform {
            translation: Vec3::new(frame as f32, bone as f32, 0.5),
            rotation_euler: Vec3::new(0.0, 0.0, (frame + bone as u32) as f32 * 0.1),
            scale: Vec3::ONE,
        }
    }
}

impl SceneHost for ScriptedHost {
    fn reset(&mut self) {
        self.loaded = false;
        self.pose_mode = false;
        self.frame = 0;
        self.evaluated = false;
    }

    fn import(&mut self, path: &Path) -> Result<()> {
        self.loaded = true;
        self.imported.push(path.to_path_buf());
        Ok(())
    }

    fn enter_pose_mode(&mut self) {
        self.pose_mode = true;
    }

    fn select_all_bones(&mut self) -> Vec<BoneHandle> {
        if !self.loaded {
            return Vec::new();
        }
        (0..self.bones).map(BoneHandle).collect()
    }

    fn set_current_frame(&mut self, frame: u32) {
        self.frame = frame;
        self.evaluated = false;
    }

    fn force_evaluate(&mut self) {
        self.evaluated = true;
    }

    fn local_transform(&self, bone: BoneHandle) -> PoseTransform {
        debug_assert!(self.evaluated, "transform read before evaluation");
        Self::transform_at(self.frame, bone.0)
    }

    fn list_actions(&self) -> Vec<Action> {
        if !self.loaded {
            return Vec::new();
        }
        self.actions.clone()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["gltf", "glb"]
    }
}
