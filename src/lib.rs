//! # animpack
//!
//! Compiler for skeletal animation clips into a compact, append-only
//! big-endian binary archive consumed by a runtime that cannot parse
//! the original authoring formats. The format is deliberately not
//! self-describing: no bone names, no record lengths, no version tag.
//! Both sides must agree on encoding order, byte width and endianness.
//!
//! ## Modules
//!
//! - [`util`] - Error handling
//! - [`wire`] - Archive wire format (encoder, decoder, constants)
//! - [`clip`] - Actions and frame range resolution
//! - [`host`] - Scene host abstraction and per-format implementations
//! - [`compile`] - Sampling, record compilation and batch runs
//!
//! ## Example
//!
//! ```ignore
//! use animpack::compile::Batch;
//! use animpack::host::GltfHost;
//!
//! let mut host = GltfHost::new();
//! let appended = Batch::new("assets/animations", "assets/compiled.bin")
//!     .run(&mut [&mut host])?;
//! ```

pub mod clip;
pub mod compile;
pub mod host;
pub mod util;
pub mod wire;

// Re-export commonly used types
pub use util::{Error, Result};
pub use wire::{Reader, Writer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clip::{resolve_last_frame, Action};
    pub use crate::compile::{compile_record, read_archive, read_record, AnimationRecord, Batch};
    pub use crate::host::{BoneHandle, FbxHost, GltfHost, PoseTransform, SceneHost, ScriptedHost};
    pub use crate::util::{Error, Result};
    pub use crate::wire::{Reader, Writer};
}
