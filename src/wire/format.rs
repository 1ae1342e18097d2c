//! Archive format constants.

/// Tag byte identifying an animation record.
pub const TAG_ANIMATION: u8 = b'A';

/// Delimiter byte terminating every encoded string.
pub const STRING_DELIMITER: u8 = b'#';

/// Literal byte sequence terminating every record.
pub const TERMINATOR: &[u8; 3] = b"END";

/// Wire size of one f32.
pub const F32_SIZE: usize = 4;

/// Wire size of one pose sample: translation + euler rotation + scale,
/// three big-endian f32 each.
pub const POSE_SAMPLE_SIZE: usize = 3 * 3 * F32_SIZE;
