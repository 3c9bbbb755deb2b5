/// Character-cell rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cube3d_core::{LineRenderer, Rgb, ScreenPoint};
use std::io::Write;

/// Glyph used for filled faces
pub const FILL_GLYPH: char = ':';

/// Smallest logical surface edge; smaller requests are raised to this
pub const MIN_SURFACE: u32 = 800;

/// Fractional cell coordinates, column then row
pub type CellPoint = (f64, f64);

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Rgb>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: None,
    };
}

/// Logical drawing surface size, origin at the center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: MIN_SURFACE,
            height: MIN_SURFACE,
        }
    }
}

/// Maps the logical surface onto a grid of terminal cells
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    surface: Surface,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: usize, rows: usize, surface: Surface) -> Self {
        Self {
            cols,
            rows,
            surface,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols * rows];
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Glyphs of one row as a string
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .map(|cell| cell.glyph)
            .collect()
    }

    /// Convert a surface point to fractional cell coordinates
    pub fn to_cell(&self, point: ScreenPoint) -> CellPoint {
        let width = f64::from(self.surface.width);
        let height = f64::from(self.surface.height);
        let col = (f64::from(point.x) + width / 2.0) / width * self.cols as f64;
        let row = (f64::from(point.y) + height / 2.0) / height * self.rows as f64;
        (col, row)
    }

    fn plot(&mut self, col: i32, row: i32, glyph: char, color: Rgb) {
        if col >= 0 && (col as usize) < self.cols && row >= 0 && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = Cell {
                glyph,
                color: Some(color),
            };
        }
    }

    fn rasterize_line(&mut self, from: CellPoint, to: CellPoint, color: Rgb) {
        let glyph = line_glyph(to.0 - from.0, to.1 - from.1);

        // Clip first so far-off endpoints don't walk millions of cells.
        let bounds = (-1.0, -1.0, self.cols as f64 + 1.0, self.rows as f64 + 1.0);
        let Some((p0, p1)) = clip_segment(from, to, bounds) else {
            return;
        };

        let (x0, y0) = (p0.0.floor() as i32, p0.1.floor() as i32);
        let (x1, y1) = (p1.0.floor() as i32, p1.1.floor() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, glyph, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Even-odd scanline fill, sampling each cell at its center
    fn rasterize_polygon(&mut self, corners: &[CellPoint], color: Rgb) {
        let top = corners.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let bottom = corners.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let first_row = top.floor().max(0.0) as usize;
        let last_row = (bottom.ceil().min(self.rows as f64)).max(0.0) as usize;

        let mut crossings = Vec::with_capacity(corners.len());
        for row in first_row..last_row {
            let y = row as f64 + 0.5;
            crossings.clear();
            for (i, &a) in corners.iter().enumerate() {
                let b = corners[(i + 1) % corners.len()];
                // Half-open on y so a shared corner is counted once.
                if (a.1 <= y) != (b.1 <= y) {
                    crossings.push(a.0 + (y - a.1) / (b.1 - a.1) * (b.0 - a.0));
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let from = (span[0] - 0.5).ceil().max(0.0);
                let to = (span[1] - 0.5).floor().min(self.cols as f64 - 1.0);
                if from > to {
                    continue;
                }
                for col in from as i32..=to as i32 {
                    self.plot(col, row as i32, FILL_GLYPH, color);
                }
            }
        }
    }

    /// Queue the canvas to `writer`, starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;
        for row in 0..self.rows {
            writer.queue(MoveTo(0, top + row as u16))?;
            for col in 0..self.cols {
                let cell = self.cell(col, row);
                if cell.color != current {
                    match cell.color {
                        Some(Rgb { r, g, b }) => {
                            writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?
                        }
                        None => writer.queue(ResetColor)?,
                    };
                    current = cell.color;
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl LineRenderer for CellCanvas {
    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        let from = self.to_cell(from);
        let to = self.to_cell(to);
        self.rasterize_line(from, to, color);
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let corners: Vec<CellPoint> = points.iter().map(|&p| self.to_cell(p)).collect();
        self.rasterize_polygon(&corners, color);
    }
}

/// Pick a glyph that follows the line direction in cell space (y grows down)
fn line_glyph(dx: f64, dy: f64) -> char {
    // Cells are roughly twice as tall as they are wide.
    let (run, rise) = (dx.abs(), dy.abs() * 2.0);
    if rise <= run * 0.5 {
        '-'
    } else if run <= rise * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment against `(min_x, min_y, max_x, max_y)`
fn clip_segment(
    p0: CellPoint,
    p1: CellPoint,
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<(CellPoint, CellPoint)> {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, p0.0 - min_x),
        (dx, max_x - p0.0),
        (-dy, p0.1 - min_y),
        (dy, max_y - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CellCanvas {
        // 10 surface units per cell in both directions.
        CellCanvas::new(80, 80, Surface::default())
    }

    #[test]
    fn test_origin_maps_to_center() {
        let canvas = canvas();
        assert_eq!(canvas.to_cell(ScreenPoint::origin()), (40.0, 40.0));
        assert_eq!(canvas.to_cell(ScreenPoint::new(-400, -400)), (0.0, 0.0));
        assert_eq!(canvas.to_cell(ScreenPoint::new(200, 0)), (60.0, 40.0));
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = canvas();
        canvas.draw_line(ScreenPoint::new(-200, 0), ScreenPoint::new(200, 0), Rgb::RED);

        let row = canvas.row_text(40);
        assert_eq!(row.matches('-').count(), 41);
        assert_eq!(canvas.cell(20, 40).color, Some(Rgb::RED));
        assert_eq!(canvas.cell(60, 40).glyph, '-');
        assert_eq!(canvas.cell(61, 40), Cell::BLANK);
    }

    #[test]
    fn test_vertical_and_diagonal_glyphs() {
        let mut canvas = canvas();
        canvas.draw_line(ScreenPoint::new(0, -200), ScreenPoint::new(0, 200), Rgb::GREEN);
        assert_eq!(canvas.cell(40, 25).glyph, '|');

        assert_eq!(line_glyph(10.0, 5.0), '\\');
        assert_eq!(line_glyph(10.0, -5.0), '/');
        assert_eq!(line_glyph(-10.0, 5.0), '/');
    }

    #[test]
    fn test_far_line_is_clipped() {
        let mut canvas = canvas();
        canvas.draw_line(
            ScreenPoint::new(i32::MIN, 0),
            ScreenPoint::new(i32::MAX, 0),
            Rgb::WHITE,
        );
        assert_eq!(canvas.row_text(40).matches('-').count(), 80);

        canvas.clear();
        canvas.draw_line(
            ScreenPoint::new(1_000_000, 5),
            ScreenPoint::new(2_000_000, 5),
            Rgb::WHITE,
        );
        assert!((0..80).all(|row| canvas.row_text(row).trim().is_empty()));
    }

    #[test]
    fn test_fill_square() {
        let mut canvas = canvas();
        let square = [
            ScreenPoint::new(-100, -100),
            ScreenPoint::new(100, -100),
            ScreenPoint::new(100, 100),
            ScreenPoint::new(-100, 100),
        ];
        canvas.fill_polygon(&square, Rgb::YELLOW);

        assert_eq!(canvas.cell(40, 40).glyph, FILL_GLYPH);
        assert_eq!(canvas.cell(45, 33).color, Some(Rgb::YELLOW));
        assert_eq!(canvas.cell(33, 45).glyph, FILL_GLYPH);
        assert_eq!(canvas.cell(20, 40), Cell::BLANK);
    }

    #[test]
    fn test_fill_quad_covers_cell_centers() {
        let mut canvas = canvas();
        // Cells 10..=19 by 30..=34, a projected face seen at an angle.
        let quad = [
            ScreenPoint::new(-300, -100),
            ScreenPoint::new(-200, -100),
            ScreenPoint::new(-200, -50),
            ScreenPoint::new(-300, -50),
        ];
        canvas.fill_polygon(&quad, Rgb::MAGENTA);

        let filled = (0..80)
            .flat_map(|row| (0..80).map(move |col| (col, row)))
            .filter(|&(col, row)| canvas.cell(col, row).glyph == FILL_GLYPH)
            .count();
        assert_eq!(filled, 10 * 5);
        assert_eq!(canvas.cell(10, 30).color, Some(Rgb::MAGENTA));
        assert_eq!(canvas.cell(19, 34).color, Some(Rgb::MAGENTA));
        assert_eq!(canvas.cell(20, 30), Cell::BLANK);
        assert_eq!(canvas.cell(10, 35), Cell::BLANK);
    }

    #[test]
    fn test_fill_offscreen_polygon_is_clipped() {
        let mut canvas = canvas();
        let huge = [
            ScreenPoint::new(-1_000_000, -1_000_000),
            ScreenPoint::new(1_000_000, -1_000_000),
            ScreenPoint::new(0, 1_000_000),
        ];
        canvas.fill_polygon(&huge, Rgb::WHITE);
        assert_eq!(canvas.cell(40, 40).glyph, FILL_GLYPH);
        assert_eq!(canvas.cell(0, 0).glyph, FILL_GLYPH);
    }

    #[test]
    fn test_degenerate_polygon_ignored() {
        let mut canvas = canvas();
        let flat = [
            ScreenPoint::new(0, 0),
            ScreenPoint::new(50, 0),
            ScreenPoint::new(100, 0),
        ];
        canvas.fill_polygon(&flat, Rgb::BLUE);
        canvas.fill_polygon(&flat[..2], Rgb::BLUE);
        assert!((0..80).all(|row| canvas.row_text(row).trim().is_empty()));
    }

    #[test]
    fn test_draw_emits_glyphs() {
        let mut canvas = CellCanvas::new(8, 4, Surface::default());
        canvas.draw_line(ScreenPoint::new(-400, 0), ScreenPoint::new(399, 0), Rgb::BLUE);

        let mut out = Vec::new();
        canvas.draw(&mut out, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--------"));
    }
}
