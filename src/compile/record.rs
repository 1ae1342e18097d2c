//! Animation record compiler and decoder.
//!
//! One record per clip, self-delimited by the `END` literal:
//! tag, clip name, bone count, frame count, then
//! `frame_count * bone_count` pose samples in frame-major order.

use std::path::Path;
use std::time::Instant;

use log::info;

use crate::clip::resolve_last_frame;
use crate::host::{PoseTransform, SceneHost};
use crate::util::{Error, Result};
use crate::wire::{Reader, Writer, TAG_ANIMATION, TERMINATOR};

use super::sampler::sample_frames;

/// Compile the currently imported scene into one animation record.
///
/// The sequence is strict and terminal on the first failure: tag, name
/// (asset file stem), pose context, bone selection, frame range
/// resolution, samples, terminator. A failure aborts the record with
/// the partial bytes left in the writer; batch policy discards them.
pub fn compile_record(host: &mut dyn SceneHost, path: &Path, writer: &mut Writer) -> Result<()> {
    let started = Instant::now();

    writer.write_byte_tag(TAG_ANIMATION);
    writer.write_string(&clip_name(path));

    host.enter_pose_mode();
    let bones = host.select_all_bones();
    let frames = resolve_last_frame(&host.list_actions())?;

    writer.write_u8(bones.len() as u32)?;
    writer.write_u32(frames);
    sample_frames(host, &bones, frames, writer);

    writer.write_raw(TERMINATOR);

    info!(
        "animation: {}, compiled in: {:.2} sec",
        path.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Clip name derived from the asset path: file name up to the first `.`.
pub fn clip_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split('.').next().unwrap_or("").to_string()
}

/// One decoded animation record.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRecord {
    pub name: String,
    /// Pose samples, frame-major: `frames[frame][bone]`.
    pub frames: Vec<Vec<PoseTransform>>,
}

impl AnimationRecord {
    pub fn bone_count(&self) -> usize {
        self.frames.first().map(Vec::len).unwrap_or(0)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Decode one record at the reader's current position.
pub fn read_record(reader: &mut Reader) -> Result<AnimationRecord> {
    let tag = reader.read_u8()?;
    if tag != TAG_ANIMATION {
        return Err(Error::UnknownRecordTag(tag));
    }
    let name = reader.read_string()?;
    let bones = reader.read_u8()? as usize;
    let frame_count = reader.read_u32()? as usize;

    let mut frames = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        let mut poses = Vec::with_capacity(bones);
        for _ in 0..bones {
            poses.push(PoseTransform {
                translation: reader.read_vec3()?,
                rotation_euler: reader.read_vec3()?,
                scale: reader.read_vec3()?,
            });
        }
        frames.push(poses);
    }
    reader.read_terminator(&name)?;

    Ok(AnimationRecord { name, frames })
}

/// Decode every record in an archive, in order.
pub fn read_archive(data: &[u8]) -> Result<Vec<AnimationRecord>> {
    let mut reader = Reader::new(data);
    let mut records = Vec::new();
    while !reader.finished() {
        records.push(read_record(&mut reader)?);
    }
    Ok(records)
}
