//! Force-directed layout providers.
//!
//! The engine only depends on [`LayoutProvider`]: advance one iteration over the current
//! topology, then read positions back by value. Two strategies are available, both
//! deterministic for a given seed.

pub(crate) mod linlog;
pub(crate) mod provider;
pub(crate) mod quadtree;
pub(crate) mod springbox;

pub use provider::{LayoutParams, LayoutProvider, create_layout};
