//! Graph mutation events and their sources.

pub(crate) mod source;

pub use source::{EventList, EventSource, GraphEvent, JsonLinesSource};
