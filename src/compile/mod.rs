//! Compilation pipeline: pose sampling, record encoding, batch runs.

mod batch;
mod record;
mod sampler;

pub use batch::*;
pub use record::*;
pub use sampler::*;
