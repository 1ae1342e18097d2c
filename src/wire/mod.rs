//! Archive wire format: encoder, decoder, and layout constants.
//!
//! The archive is an ordered concatenation of records with no header,
//! no index, and no version tag. Big-endian throughout.
//!
//! ```text
//! Archive  := Record*
//! Record   := Tag(1B='A') Name Bones(1B) FrameCount(4B)
//!             Sample{FrameCount*Bones} Terminator(3B="END")
//! Name     := UTF8-bytes '#'
//! Sample   := Vec3(translation) Vec3(eulerXYZ) Vec3(scale)   // 36 bytes
//! Vec3     := f32 f32 f32
//! ```
//!
//! Nothing in a record stores bone identity; a bone's position in the
//! fixed per-record iteration order is its only identity signal.

mod format;
mod reader;
mod writer;

pub use format::*;
pub use reader::*;
pub use writer::*;
