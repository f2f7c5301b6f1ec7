use crate::foundation::error::{AnimateError, AnimateResult};

pub use kurbo::{Point, Rect, Vec2};

/// Layout coordinates keyed by node id, in node insertion order.
pub type Positions = indexmap::IndexMap<String, Point>;

/// Global, run-wide frame index. Never reset between nodes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Zero-padded file stem component, so that names sort in emission order.
    pub fn padded(self, digits: usize) -> String {
        format!("{:0width$}", self.0, width = digits)
    }

    /// Whether the index fits in `digits` without widening the padded name.
    pub fn fits(self, digits: usize) -> bool {
        u32::try_from(digits)
            .ok()
            .and_then(|d| 10u64.checked_pow(d))
            .is_none_or(|limit| self.0 < limit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> AnimateResult<Self> {
        if width == 0 || height == 0 {
            return Err(AnimateError::configuration(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}
