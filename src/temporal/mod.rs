//! Per-node timing state derived from attribute events.

pub(crate) mod state;
