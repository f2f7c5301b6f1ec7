//! Graph topology and per-node style state.

pub(crate) mod model;
pub(crate) mod style;
