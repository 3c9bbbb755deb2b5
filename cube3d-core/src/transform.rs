/// Transform state and the scale/rotate/translate pipeline
use nalgebra::{Point3, Vector3};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Which vector of the [`TransformState`] a mutation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Position,
    Rotation,
    Scaling,
}

/// Position, rotation (degrees) and per-axis scaling of the cube.
///
/// Values are never clamped or normalized: negative or zero scale and
/// angles past 360 are all accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scaling: Vector3<f32>,
}

impl TransformState {
    pub fn new() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn get(&self, field: Field, axis: Axis) -> f32 {
        self.vector(field)[axis.index()]
    }

    /// Add `delta` to a single component
    pub fn add(&mut self, field: Field, axis: Axis, delta: f32) {
        self.vector_mut(field)[axis.index()] += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn vector(&self, field: Field) -> &Vector3<f32> {
        match field {
            Field::Position => &self.position,
            Field::Rotation => &self.rotation,
            Field::Scaling => &self.scaling,
        }
    }

    fn vector_mut(&mut self, field: Field) -> &mut Vector3<f32> {
        match field {
            Field::Position => &mut self.position,
            Field::Rotation => &mut self.rotation,
            Field::Scaling => &mut self.scaling,
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotate about the X axis by `degrees`
pub fn rotate_x(v: Vector3<f32>, degrees: f32) -> Vector3<f32> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector3::new(v.x, cos * v.y - sin * v.z, sin * v.y + cos * v.z)
}

/// Rotate about the Y axis by `degrees`
pub fn rotate_y(v: Vector3<f32>, degrees: f32) -> Vector3<f32> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector3::new(cos * v.x + sin * v.z, v.y, -sin * v.x + cos * v.z)
}

/// Rotate about the Z axis by `degrees`
pub fn rotate_z(v: Vector3<f32>, degrees: f32) -> Vector3<f32> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector3::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y, v.z)
}

/// Map a model-space vertex into world space.
///
/// Scale first, then rotate about X, Y and Z in that order, then translate.
/// The rotation order is fixed; rotations do not commute.
pub fn transform(vertex: &Point3<f32>, state: &TransformState) -> Point3<f32> {
    let scaled = vertex.coords.component_mul(&state.scaling);

    let rotated = rotate_x(scaled, state.rotation.x);
    let rotated = rotate_y(rotated, state.rotation.y);
    let rotated = rotate_z(rotated, state.rotation.z);

    Point3::from(rotated + state.position)
}
