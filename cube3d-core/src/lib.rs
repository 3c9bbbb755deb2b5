/// cube3d Core Library - Cube geometry, transform pipeline and input mapping
///
/// This library holds the platform-free core of the cube viewer: the fixed
/// cube model, the scale/rotate/translate pipeline, perspective projection,
/// key dispatch, and frame assembly over the `LineRenderer` capability.

pub mod geometry;
pub mod input;
pub mod projection;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use geometry::{CubeModel, Edge, Face, Rgb};
pub use input::{Dispatch, InputCommand, InputController, KeyMap, UnknownCommand};
pub use projection::{Perspective, ScreenPoint};
pub use render::{render_frame, FrameStats, InputEvent, InputSource, LineRenderer, RenderOptions};
pub use transform::{transform, Axis, Field, TransformState};
