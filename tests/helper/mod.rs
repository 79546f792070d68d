pub mod source;

pub use source::{FakeSource, SourceCall};
