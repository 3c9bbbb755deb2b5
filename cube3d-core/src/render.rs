/// Frame assembly over abstract drawing and input capabilities
use crate::geometry::{CubeModel, Rgb};
use crate::projection::{Perspective, ScreenPoint};
use crate::transform::TransformState;

/// Drawing surface with its origin at the center
pub trait LineRenderer {
    fn clear(&mut self);

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb);

    /// Fill a convex polygon given in winding order. Renderers without fill
    /// support may ignore the call.
    fn fill_polygon(&mut self, _points: &[ScreenPoint], _color: Rgb) {}
}

/// Events delivered by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    Resize(u16, u16),
    Quit,
}

/// Blocking source of discrete input events
pub trait InputSource {
    type Error;

    fn next_event(&mut self) -> Result<InputEvent, Self::Error>;
}

/// Half-length of the reference axes in surface units
pub const AXIS_LENGTH: i32 = 200;

/// Fixed reference axes, drawn flat without projection.
///
/// The third axis stands in for Z and is drawn along +X.
pub fn axes() -> [(ScreenPoint, ScreenPoint, Rgb); 3] {
    [
        (ScreenPoint::new(-AXIS_LENGTH, 0), ScreenPoint::new(AXIS_LENGTH, 0), Rgb::RED),
        (ScreenPoint::new(0, -AXIS_LENGTH), ScreenPoint::new(0, AXIS_LENGTH), Rgb::GREEN),
        (ScreenPoint::origin(), ScreenPoint::new(AXIS_LENGTH, 0), Rgb::BLUE),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub show_axes: bool,
    /// Paint faces in table order before the edges. There is no depth
    /// sorting, so back faces can land on top.
    pub fill_faces: bool,
    pub edge_color: Rgb,
    pub perspective: Perspective,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_axes: true,
            fill_faces: false,
            edge_color: Rgb::BLUE,
            perspective: Perspective::default(),
        }
    }
}

/// Counters for a single rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub edges_drawn: usize,
    pub edges_skipped: usize,
    pub faces_filled: usize,
}

/// Draw axes, optional faces and the cube wireframe for `state`.
///
/// Each vertex is projected once. Edges and faces touching a vertex that
/// cannot be projected are skipped.
pub fn render_frame<R: LineRenderer + ?Sized>(
    renderer: &mut R,
    state: &TransformState,
    options: &RenderOptions,
) -> FrameStats {
    let model = CubeModel::new();
    let projected = model
        .vertices()
        .map(|vertex| options.perspective.project_vertex(&vertex, state));

    let mut stats = FrameStats::default();
    renderer.clear();

    if options.show_axes {
        for (from, to, color) in axes() {
            renderer.draw_line(from, to, color);
        }
    }

    if options.fill_faces {
        for (face, color) in model.colored_faces() {
            let corners: Option<Vec<ScreenPoint>> = face.iter().map(|&i| projected[i]).collect();
            if let Some(corners) = corners {
                renderer.fill_polygon(&corners, color);
                stats.faces_filled += 1;
            }
        }
    }

    for &[a, b] in model.edges() {
        match (projected[a], projected[b]) {
            (Some(from), Some(to)) => {
                renderer.draw_line(from, to, options.edge_color);
                stats.edges_drawn += 1;
            }
            _ => stats.edges_skipped += 1,
        }
    }

    if stats.edges_skipped > 0 {
        tracing::debug!(
            skipped = stats.edges_skipped,
            "edges touch the camera plane and were not drawn"
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        lines: Vec<(ScreenPoint, ScreenPoint, Rgb)>,
        polygons: Vec<(Vec<ScreenPoint>, Rgb)>,
    }

    impl LineRenderer for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.lines.clear();
            self.polygons.clear();
        }

        fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
            self.lines.push((from, to, color));
        }

        fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
            self.polygons.push((points.to_vec(), color));
        }
    }

    struct LinesOnly(usize);

    impl LineRenderer for LinesOnly {
        fn clear(&mut self) {}

        fn draw_line(&mut self, _from: ScreenPoint, _to: ScreenPoint, _color: Rgb) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_default_frame() {
        let mut recorder = Recorder::default();
        let stats = render_frame(&mut recorder, &TransformState::new(), &RenderOptions::default());

        assert_eq!(recorder.clears, 1);
        assert_eq!(stats, FrameStats { edges_drawn: 12, edges_skipped: 0, faces_filled: 0 });
        assert_eq!(recorder.lines.len(), 15);
        assert_eq!(&recorder.lines[..3], &axes()[..]);
        assert!(recorder.polygons.is_empty());

        // Edge 0-1 runs from (1,1,-1) to (1,-1,-1), both at depth 4.
        let first_edge = recorder.lines[3];
        assert_eq!(first_edge.0, ScreenPoint::new(125, 125));
        assert_eq!(first_edge.1, ScreenPoint::new(125, -125));
        assert_eq!(first_edge.2, Rgb::BLUE);
    }

    #[test]
    fn test_axes_ignore_transform() {
        let mut state = TransformState::new();
        state.rotation = Vector3::new(45.0, 10.0, 90.0);
        state.scaling = Vector3::new(3.0, 3.0, 3.0);
        state.position = Vector3::new(1.0, -2.0, 0.5);

        let mut recorder = Recorder::default();
        render_frame(&mut recorder, &state, &RenderOptions::default());
        assert_eq!(&recorder.lines[..3], &axes()[..]);
    }

    #[test]
    fn test_faces_fill_in_table_order() {
        let options = RenderOptions {
            show_axes: false,
            fill_faces: true,
            edge_color: Rgb::WHITE,
            ..RenderOptions::default()
        };
        let mut recorder = Recorder::default();
        let stats = render_frame(&mut recorder, &TransformState::new(), &options);

        assert_eq!(stats.faces_filled, 6);
        assert_eq!(recorder.lines.len(), 12);
        let colors: Vec<Rgb> = recorder.polygons.iter().map(|(_, c)| *c).collect();
        assert_eq!(colors, crate::geometry::FACE_COLORS.to_vec());
        assert!(recorder.lines.iter().all(|(_, _, c)| *c == Rgb::WHITE));
    }

    #[test]
    fn test_fill_is_optional_for_renderers() {
        let options = RenderOptions {
            fill_faces: true,
            ..RenderOptions::default()
        };
        let mut renderer = LinesOnly(0);
        render_frame(&mut renderer, &TransformState::new(), &options);
        assert_eq!(renderer.0, 15);
    }

    #[test]
    fn test_camera_plane_skips_edges() {
        // Flatten the cube onto z = 0, then push it onto the camera plane.
        let mut state = TransformState::new();
        state.scaling.z = 0.0;
        state.position.z = -5.0;

        let options = RenderOptions {
            fill_faces: true,
            ..RenderOptions::default()
        };
        let mut recorder = Recorder::default();
        let stats = render_frame(&mut recorder, &state, &options);

        assert_eq!(stats.edges_drawn, 0);
        assert_eq!(stats.edges_skipped, 12);
        assert_eq!(stats.faces_filled, 0);
        assert_eq!(recorder.lines.len(), 3);
    }

    #[test]
    fn test_same_state_same_frame() {
        let mut state = TransformState::new();
        state.rotation = Vector3::new(15.0, -25.0, 35.0);
        let options = RenderOptions {
            fill_faces: true,
            ..RenderOptions::default()
        };

        let mut first = Recorder::default();
        let mut second = Recorder::default();
        render_frame(&mut first, &state, &options);
        render_frame(&mut second, &state, &options);
        assert_eq!(first.lines, second.lines);
        assert_eq!(first.polygons, second.polygons);
    }
}
