//! Frame sinks.
//!
//! Sinks receive graph state in strictly increasing frame order and turn it into artifacts:
//! per-frame SVG/PNG files, a final Graphviz snapshot, or in-memory records for tests.

/// Graphviz DOT snapshot writer.
pub mod dot;
/// File-backed sink.
pub mod files;
/// Sink contract and the in-memory sink.
pub mod sink;
