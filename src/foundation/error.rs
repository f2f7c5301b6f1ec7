/// Convenience result type used across the engine.
pub type AnimateResult<T> = Result<T, AnimateError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal: the run stops at the first error and nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum AnimateError {
    /// Missing or invalid configuration, detected before any event is consumed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The event stream violated an ordering requirement (e.g. a step boundary reached before
    /// the most recently added node received its frame metadata).
    #[error("event ordering error: {0}")]
    EventOrdering(String),

    /// An attribute value could not be converted to its semantic type.
    #[error("attribute parse error: {0}")]
    AttributeParse(String),

    /// A node or edge lookup failed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Output location unusable, or a layout position lookup failed.
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimateError {
    /// Build a [`AnimateError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`AnimateError::EventOrdering`] value.
    pub fn event_ordering(msg: impl Into<String>) -> Self {
        Self::EventOrdering(msg.into())
    }

    /// Build a [`AnimateError::AttributeParse`] value.
    pub fn attribute_parse(msg: impl Into<String>) -> Self {
        Self::AttributeParse(msg.into())
    }

    /// Build a [`AnimateError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`AnimateError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`AnimateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
