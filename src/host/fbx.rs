//! FBX scene host (placeholder).
//!
//! Discovery recognizes `.fbx`, but no FBX parser is wired up yet;
//! import fails with a clear error so a batch containing FBX assets
//! aborts instead of silently skipping them.
//! TODO: back this with an fbxcel-dom importer.

use std::path::Path;

use crate::clip::Action;
use crate::util::{Error, Result};

use super::{BoneHandle, PoseTransform, SceneHost};

/// Scene host for FBX assets. Import is not supported in this build.
#[derive(Default)]
pub struct FbxHost;

impl FbxHost {
    pub fn new() -> Self {
        Self
    }
}

impl SceneHost for FbxHost {
    fn reset(&mut self) {}

    fn import(&mut self, path: &Path) -> Result<()> {
        Err(Error::import(
            path,
            "FBX import is not supported in this build",
        ))
    }

    fn enter_pose_mode(&mut self) {}

    fn select_all_bones(&mut self) -> Vec<BoneHandle> {
        Vec::new()
    }

    fn set_current_frame(&mut self, _frame: u32) {}

    fn force_evaluate(&mut self) {}

    fn local_transform(&self, _bone: BoneHandle) -> PoseTransform {
        PoseTransform::identity()
    }

    fn list_actions(&self) -> Vec<Action> {
        Vec::new()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["fbx"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_fails_with_reason() {
        let mut host = FbxHost::new();
        let err = host.import(Path::new("rig.fbx")).unwrap_err();
        assert!(matches!(err, Error::ImportFailure { .. }));
        assert!(err.to_string().contains("not supported"));
    }
}
