/// Fixed cube geometry: vertices, wireframe edges, faces and face colors
use nalgebra::Point3;

/// Index pair into [`VERTICES`] describing one wireframe edge
pub type Edge = [usize; 2];

/// Four indices into [`VERTICES`] describing one planar quad
pub type Face = [usize; 4];

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Cube corners, indices 0..=7
pub const VERTICES: [[f32; 3]; 8] = [
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

#[rustfmt::skip]
pub const EDGES: [Edge; 12] = [
    [0, 1], [1, 2], [2, 3], [3, 0],
    [4, 5], [5, 6], [6, 7], [7, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

pub const FACES: [Face; 6] = [
    [0, 1, 2, 3],
    [3, 2, 6, 7],
    [7, 6, 5, 4],
    [4, 5, 1, 0],
    [1, 5, 6, 2],
    [4, 0, 3, 7],
];

/// Fill color for each entry of [`FACES`], paired by index
pub const FACE_COLORS: [Rgb; 6] = [
    Rgb::RED,
    Rgb::GREEN,
    Rgb::BLUE,
    Rgb::MAGENTA,
    Rgb::YELLOW,
    Rgb::WHITE,
];

/// Read-only view over the cube tables.
///
/// Every instance exposes the same constants; there is nothing to mutate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubeModel;

impl CubeModel {
    pub fn new() -> Self {
        Self
    }

    pub fn vertex(&self, index: usize) -> Point3<f32> {
        Point3::from(VERTICES[index])
    }

    pub fn vertices(&self) -> [Point3<f32>; 8] {
        VERTICES.map(Point3::from)
    }

    pub fn edges(&self) -> &'static [Edge; 12] {
        &EDGES
    }

    pub fn faces(&self) -> &'static [Face; 6] {
        &FACES
    }

    pub fn face_colors(&self) -> &'static [Rgb; 6] {
        &FACE_COLORS
    }

    /// Faces zipped with their fill colors, in table order
    pub fn colored_faces(&self) -> impl Iterator<Item = (&'static Face, Rgb)> {
        FACES.iter().zip(FACE_COLORS.iter().copied())
    }
}
