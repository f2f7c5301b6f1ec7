//! Frame scenes and their SVG/PNG encodings.

pub(crate) mod raster;
pub(crate) mod scene;
pub(crate) mod svg;

pub use raster::{SvgRasterizer, write_png};
pub use scene::{FrameScene, SceneEdge, SceneNode, SceneStyle};
pub use svg::scene_to_svg;
