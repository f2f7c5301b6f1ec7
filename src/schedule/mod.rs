//! Step-boundary scheduling: frame counts, highlight decay, layout stepping and emission.

pub(crate) mod highlight;
pub(crate) mod scheduler;

pub use highlight::{highlight_multiplier, highlighted_size};
pub use scheduler::{AnimationScheduler, RunReport};
