//! glTF 2.0 backed scene host.
//!
//! Imports a `.gltf` / `.glb` file and exposes the first skin's joints
//! as the bone sequence, in skin joint order. Each glTF animation
//! becomes one action whose frame range is its keyframe time span
//! converted at the host's frame rate.

use std::collections::HashMap;
use std::path::Path;

use glam::{EulerRot, Mat4, Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use gltf::animation::Interpolation;

use crate::clip::Action;
use crate::util::{Error, Result};

use super::{BoneHandle, PoseTransform, SceneHost};

/// Frame rate used to convert glTF keyframe times (seconds) to frames.
/// Matches the authoring tool default the archive format grew up with.
pub const DEFAULT_FPS: f32 = 24.0;

/// Keyframe track for one animated property of one joint.
struct Track<T> {
    times: Vec<f32>,
    values: Vec<T>,
    step: bool,
}

/// One skin joint with its rest transform and animation tracks.
struct Joint {
    parent: Option<usize>,
    rest_translation: Vec3,
    rest_rotation: Quat,
    rest_scale: Vec3,
    translation: Option<Track<Vec3>>,
    rotation: Option<Track<Quat>>,
    scale: Option<Track<Vec3>>,
    /// Evaluated pose matrix in skeleton space, parent-chained.
    pose: Mat4,
}

struct LoadedScene {
    joints: Vec<Joint>,
    /// Joint indices ordered parents before children.
    eval_order: Vec<usize>,
    actions: Vec<Action>,
}

/// Scene host backed by the `gltf` importer.
pub struct GltfHost {
    fps: f32,
    scene: Option<LoadedScene>,
    pose_mode: bool,
    current_frame: u32,
}

impl GltfHost {
    /// Create a host converting keyframe times at [`DEFAULT_FPS`].
    pub fn new() -> Self {
        Self::with_fps(DEFAULT_FPS)
    }

    /// Create a host converting keyframe times at the given frame rate.
    pub fn with_fps(fps: f32) -> Self {
        Self {
            fps,
            scene: None,
            pose_mode: false,
            current_frame: 0,
        }
    }
}

impl Default for GltfHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHost for GltfHost {
    fn reset(&mut self) {
        self.scene = None;
        self.pose_mode = false;
        self.current_frame = 0;
    }

    fn import(&mut self, path: &Path) -> Result<()> {
        let (doc, buffers, _) =
            gltf::import(path).map_err(|e| Error::import(path, e.to_string()))?;

        let mut joints = Vec::new();
        let mut node_to_joint = HashMap::new();

        if let Some(skin) = doc.skins().next() {
            let skin_nodes: Vec<gltf::Node> = skin.joints().collect();
            for (slot, node) in skin_nodes.iter().enumerate() {
                node_to_joint.insert(node.index(), slot);
            }
            for node in &skin_nodes {
                let (t, r, s) = node.transform().decomposed();
                joints.push(Joint {
                    parent: parent_slot(&skin_nodes, node),
                    rest_translation: Vec3::from(t),
                    rest_rotation: Quat::from_array(r),
                    rest_scale: Vec3::from(s),
                    translation: None,
                    rotation: None,
                    scale: None,
                    pose: Mat4::IDENTITY,
                });
            }
        }

        let mut actions = Vec::new();
        for anim in doc.animations() {
            let mut min_t = f32::INFINITY;
            let mut max_t = f32::NEG_INFINITY;
            for channel in anim.channels() {
                let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
                let times: Vec<f32> = match reader.read_inputs() {
                    Some(inputs) => inputs.collect(),
                    None => continue,
                };
                if times.is_empty() {
                    continue;
                }
                min_t = min_t.min(times[0]);
                max_t = max_t.max(times[times.len() - 1]);

                let slot = match node_to_joint.get(&channel.target().node().index()) {
                    Some(slot) => *slot,
                    None => continue,
                };
                let interp = channel.sampler().interpolation();
                let step = interp == Interpolation::Step;
                let cubic = interp == Interpolation::CubicSpline;
                match reader.read_outputs() {
                    Some(ReadOutputs::Translations(it)) => {
                        let values = strip_tangents(it.map(Vec3::from).collect(), cubic);
                        joints[slot].translation = Some(Track { times, values, step });
                    }
                    Some(ReadOutputs::Rotations(r)) => {
                        let values = strip_tangents(
                            r.into_f32().map(Quat::from_array).collect(),
                            cubic,
                        );
                        joints[slot].rotation = Some(Track { times, values, step });
                    }
                    Some(ReadOutputs::Scales(it)) => {
                        let values = strip_tangents(it.map(Vec3::from).collect(), cubic);
                        joints[slot].scale = Some(Track { times, values, step });
                    }
                    _ => continue,
                }
            }
            if max_t >= min_t {
                actions.push(Action::new(min_t * self.fps, max_t * self.fps));
            }
        }

        let eval_order = topological_order(&joints);
        log::debug!(
            "imported {}: {} joints, {} actions",
            path.display(),
            joints.len(),
            actions.len()
        );
        self.scene = Some(LoadedScene {
            joints,
            eval_order,
            actions,
        });
        Ok(())
    }

    fn enter_pose_mode(&mut self) {
        self.pose_mode = true;
    }

    fn select_all_bones(&mut self) -> Vec<BoneHandle> {
        match &self.scene {
            Some(scene) => (0..scene.joints.len()).map(BoneHandle).collect(),
            None => Vec::new(),
        }
    }

    fn set_current_frame(&mut self, frame: u32) {
        self.current_frame = frame;
    }

    fn force_evaluate(&mut self) {
        let t = self.current_frame as f32 / self.fps;
        let Some(scene) = &mut self.scene else { return };
        for &i in &scene.eval_order {
            let joint = &scene.joints[i];
            let translation = joint
                .translation
                .as_ref()
                .map(|tr| tr.sample(t, Vec3::lerp))
                .unwrap_or(joint.rest_translation);
            let rotation = joint
                .rotation
                .as_ref()
                .map(|tr| tr.sample(t, |a, b, s| a.slerp(b, s)))
                .unwrap_or(joint.rest_rotation);
            let scale = joint
                .scale
                .as_ref()
                .map(|tr| tr.sample(t, Vec3::lerp))
                .unwrap_or(joint.rest_scale);
            let local = Mat4::from_scale_rotation_translation(scale, rotation, translation);
            // Parents precede children in eval_order, so the parent's
            // pose is already current for this frame.
            let parent_pose = match joint.parent {
                Some(p) => scene.joints[p].pose,
                None => Mat4::IDENTITY,
            };
            scene.joints[i].pose = parent_pose * local;
        }
    }

    fn local_transform(&self, bone: BoneHandle) -> PoseTransform {
        let Some(scene) = &self.scene else {
            return PoseTransform::identity();
        };
        let (scale, rotation, translation) =
            scene.joints[bone.0].pose.to_scale_rotation_translation();
        let (rx, ry, rz) = rotation.to_euler(EulerRot::XYZ);
        PoseTransform {
            translation,
            rotation_euler: Vec3::new(rx, ry, rz),
            scale,
        }
    }

    fn list_actions(&self) -> Vec<Action> {
        match &self.scene {
            Some(scene) => scene.actions.clone(),
            None => Vec::new(),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["gltf", "glb"]
    }
}

impl<T: Copy> Track<T> {
    /// Sample the track at time `t` (seconds), clamping outside the
    /// keyed range. Step tracks hold the left key.
    fn sample(&self, t: f32, lerp: impl Fn(T, T, f32) -> T) -> T {
        let times = &self.times;
        if t <= times[0] {
            return self.values[0];
        }
        let last = times.len() - 1;
        if t >= times[last] {
            return self.values[last];
        }
        let hi = times.partition_point(|&k| k <= t);
        let lo = hi - 1;
        if self.step {
            return self.values[lo];
        }
        let span = times[hi] - times[lo];
        let alpha = if span > 0.0 { (t - times[lo]) / span } else { 0.0 };
        lerp(self.values[lo], self.values[hi], alpha)
    }
}

/// For cubic-spline samplers the output holds in-tangent, value and
/// out-tangent per key; keep the values and sample them linearly.
fn strip_tangents<T: Copy>(values: Vec<T>, cubic: bool) -> Vec<T> {
    if !cubic {
        return values;
    }
    values.chunks(3).filter_map(|c| c.get(1).copied()).collect()
}

/// Slot of the joint whose node has `node` among its children.
fn parent_slot(skin_nodes: &[gltf::Node], node: &gltf::Node) -> Option<usize> {
    for (slot, candidate) in skin_nodes.iter().enumerate() {
        for child in candidate.children() {
            if child.index() == node.index() {
                return Some(slot);
            }
        }
    }
    None
}

/// Joint indices ordered so every parent precedes its children.
fn topological_order(joints: &[Joint]) -> Vec<usize> {
    let mut order = Vec::with_capacity(joints.len());
    let mut placed = vec![false; joints.len()];
    // Roots first, then repeated passes placing joints whose parent is
    // already placed. Joint counts are small (<= 255).
    while order.len() < joints.len() {
        let before = order.len();
        for (i, joint) in joints.iter().enumerate() {
            if placed[i] {
                continue;
            }
            let ready = match joint.parent {
                Some(p) => placed[p],
                None => true,
            };
            if ready {
                placed[i] = true;
                order.push(i);
            }
        }
        if order.len() == before {
            // Parent cycle in the source data; append the remainder in
            // slot order rather than looping forever.
            for (i, p) in placed.iter_mut().enumerate() {
                if !*p {
                    *p = true;
                    order.push(i);
                }
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(times: Vec<f32>, values: Vec<Vec3>, step: bool) -> Track<Vec3> {
        Track { times, values, step }
    }

    #[test]
    fn test_track_linear_interpolation() {
        let tr = track(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0)],
            false,
        );
        assert_eq!(tr.sample(0.5, Vec3::lerp), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_track_clamps_outside_range() {
        let tr = track(
            vec![1.0, 2.0],
            vec![Vec3::ONE, Vec3::splat(5.0)],
            false,
        );
        assert_eq!(tr.sample(0.0, Vec3::lerp), Vec3::ONE);
        assert_eq!(tr.sample(3.0, Vec3::lerp), Vec3::splat(5.0));
    }

    #[test]
    fn test_track_step_holds_left_key() {
        let tr = track(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::ONE],
            true,
        );
        assert_eq!(tr.sample(0.99, Vec3::lerp), Vec3::ZERO);
        assert_eq!(tr.sample(1.0, Vec3::lerp), Vec3::ONE);
    }

    #[test]
    fn test_strip_tangents() {
        let values: Vec<Vec3> = (0..9).map(|i| Vec3::splat(i as f32)).collect();
        let stripped = strip_tangents(values.clone(), true);
        assert_eq!(
            stripped,
            vec![Vec3::splat(1.0), Vec3::splat(4.0), Vec3::splat(7.0)]
        );
        assert_eq!(strip_tangents(values.clone(), false), values);
    }

    // Three-joint chain (root -> spine -> head) with one animation
    // moving the spine from origin to (1,2,3) over one second, buffer
    // embedded as a data URI.
    const RIG_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [
            {"name": "root", "children": [1]},
            {"name": "spine", "children": [2], "translation": [0, 1, 0]},
            {"name": "head", "translation": [0, 0.5, 0]}
        ],
        "skins": [{"joints": [0, 1, 2]}],
        "animations": [{
            "samplers": [{"input": 0, "output": 1, "interpolation": "LINEAR"}],
            "channels": [{"sampler": 0, "target": {"node": 1, "path": "translation"}}]
        }],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0]},
            {"bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3"}
        ],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 8},
            {"buffer": 0, "byteOffset": 8, "byteLength": 24}
        ],
        "buffers": [{"byteLength": 32, "uri": "data:application/octet-stream;base64,AAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAQAAAQEA="}]
    }"#;

    #[test]
    fn test_import_joint_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rig.gltf");
        std::fs::write(&path, RIG_GLTF).unwrap();

        let mut host = GltfHost::new();
        host.import(&path).unwrap();
        let bones = host.select_all_bones();
        let actions = host.list_actions();
        assert_eq!(bones, vec![BoneHandle(0), BoneHandle(1), BoneHandle(2)]);
        assert_eq!(actions, vec![Action::new(0.0, DEFAULT_FPS)]);

        // A second import/reset cycle yields the identical selection
        // order and action set: position is the only bone identity the
        // archive carries.
        host.reset();
        host.import(&path).unwrap();
        assert_eq!(host.select_all_bones(), bones);
        assert_eq!(host.list_actions(), actions);
    }

    #[test]
    fn test_import_evaluates_parents_before_children() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rig.gltf");
        std::fs::write(&path, RIG_GLTF).unwrap();

        let mut host = GltfHost::new();
        host.import(&path).unwrap();

        // Frame 0: the spine track overrides its rest translation with
        // the origin, so the head pose chains to (0, 0.5, 0).
        host.set_current_frame(0);
        host.force_evaluate();
        let head = host.local_transform(BoneHandle(2));
        assert!((head.translation - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5);

        // One second in, the spine reaches (1,2,3) and the head
        // follows its parent.
        host.set_current_frame(DEFAULT_FPS as u32);
        host.force_evaluate();
        let spine = host.local_transform(BoneHandle(1));
        let head = host.local_transform(BoneHandle(2));
        assert!((spine.translation - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((head.translation - Vec3::new(1.0, 2.5, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_empty_host_is_inert() {
        let mut host = GltfHost::new();
        assert!(host.select_all_bones().is_empty());
        assert!(host.list_actions().is_empty());
        host.set_current_frame(3);
        host.force_evaluate();
        assert_eq!(
            host.local_transform(BoneHandle(0)),
            PoseTransform::identity()
        );
    }
}
