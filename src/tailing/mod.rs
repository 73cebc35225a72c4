pub mod source;

pub use source::{SourceChunk, TrackedSource};
