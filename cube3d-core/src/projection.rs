/// Perspective projection from world space to screen pixels
use nalgebra::{Point2, Point3};

use crate::transform::{transform, TransformState};

/// Integer pixel coordinate relative to the surface center
pub type ScreenPoint = Point2<i32>;

/// Pinhole projection with a fixed focal length and camera distance.
///
/// `scale = focal / (distance + z)`; there is no view matrix and no clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub focal: f32,
    pub distance: f32,
}

impl Perspective {
    pub const FOCAL: f32 = 500.0;
    pub const DISTANCE: f32 = 5.0;

    pub fn new(focal: f32, distance: f32) -> Self {
        Self { focal, distance }
    }

    /// Scale factor applied to x and y at depth `z`
    pub fn scale_at(&self, z: f32) -> f32 {
        self.focal / (self.distance + z)
    }

    /// Project a world-space point, truncating toward zero.
    ///
    /// Returns `None` when the point sits on the camera plane
    /// (`distance + z == 0`) or the result is not finite. Points behind the
    /// camera still project, mirrored through the origin.
    pub fn project(&self, point: &Point3<f32>) -> Option<ScreenPoint> {
        let depth = self.distance + point.z;
        if depth == 0.0 {
            return None;
        }

        let scale = self.focal / depth;
        let x = point.x * scale;
        let y = point.y * scale;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(ScreenPoint::new(x as i32, y as i32))
    }

    /// Transform a model-space vertex by `state`, then project it
    pub fn project_vertex(
        &self,
        vertex: &Point3<f32>,
        state: &TransformState,
    ) -> Option<ScreenPoint> {
        self.project(&transform(vertex, state))
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::new(Self::FOCAL, Self::DISTANCE)
    }
}
