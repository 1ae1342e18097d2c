//! Per-frame pose sampling.

use crate::host::{BoneHandle, SceneHost};
use crate::wire::Writer;

/// Sample every frame in `0..frames` and encode the poses immediately.
///
/// `bones` is the fixed iteration order selected before framing began;
/// it must not change for the remainder of the record. Each frame the
/// host is advanced and re-evaluated once (hosts resolve parents before
/// children), then every bone's transform is encoded in order:
/// translation, Euler rotation, scale.
pub fn sample_frames(
    host: &mut dyn SceneHost,
    bones: &[BoneHandle],
    frames: u32,
    writer: &mut Writer,
) {
    for frame in 0..frames {
        host.set_current_frame(frame);
        host.force_evaluate();
        for &bone in bones {
            let pose = host.local_transform(bone);
            writer.write_vec3(pose.translation);
            writer.write_vec3(pose.rotation_euler);
            writer.write_vec3(pose.scale);
        }
    }
}
