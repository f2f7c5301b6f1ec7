//! Run configuration.
//!
//! Every field has a default, so a partial JSON file (or none at all) is a valid starting point.
//! The binary layers its command-line flags on top of whatever was loaded.

pub(crate) mod model;
