/// Terminal front end: crossterm input, character-cell drawing, app loop
use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use cube3d_core::{
    render_frame, Dispatch, FrameStats, InputController, InputEvent, InputSource, KeyMap,
    RenderOptions, TransformState,
};
use std::io::{self, stdout, Write};

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod renderer;

pub use error::AppError;
pub use input::{TerminalInput, RESET_KEY};
pub use renderer::{CellCanvas, Surface};

/// Rows reserved above the canvas for the status line
const STATUS_ROWS: u16 = 1;

/// Resolved runtime settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub options: RenderOptions,
    pub surface: Surface,
    pub keymap: KeyMap,
}

/// Main application struct for the terminal cube viewer
pub struct TerminalApp {
    state: TransformState,
    controller: InputController,
    options: RenderOptions,
    renderer: CellCanvas,
    running: bool,
    frames: u64,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(settings: Settings) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(settings, cols, rows))
    }

    /// Build an app for a terminal of `cols` x `rows` cells
    pub fn with_size(settings: Settings, cols: u16, rows: u16) -> Self {
        Self {
            state: TransformState::new(),
            controller: InputController::new(settings.keymap),
            options: settings.options,
            renderer: CellCanvas::new(cols as usize, canvas_rows(rows), settings.surface),
            running: true,
            frames: 0,
            last_stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn canvas(&self) -> &CellCanvas {
        &self.renderer
    }

    /// Number of frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        tracing::info!(
            cols = self.renderer.cols(),
            rows = self.renderer.rows(),
            "terminal session started"
        );

        let mut input = TerminalInput::new();
        let result = self.main_loop(&mut input, &mut stdout());

        // Cleanup runs even when the loop failed.
        let raw = terminal::disable_raw_mode();
        let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        tracing::info!(frames = self.frames, "terminal session ended");

        result.and(raw).and(screen)
    }

    /// Draw once, then redraw after every event that changes the picture
    pub fn main_loop<S, W>(&mut self, input: &mut S, out: &mut W) -> io::Result<()>
    where
        S: InputSource<Error = io::Error>,
        W: Write,
    {
        self.render(out)?;
        while self.running {
            let event = input.next_event()?;
            if self.handle_event(event) {
                self.render(out)?;
            }
        }
        Ok(())
    }

    /// Apply one event; returns whether a redraw is needed
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Quit => {
                self.running = false;
                false
            }
            InputEvent::Resize(cols, rows) => {
                tracing::debug!(cols, rows, "terminal resized");
                self.renderer.resize(cols as usize, canvas_rows(rows));
                true
            }
            InputEvent::Key(RESET_KEY) => {
                self.state.reset();
                tracing::debug!("transform reset");
                true
            }
            InputEvent::Key(key) => {
                matches!(self.controller.dispatch(&mut self.state, key), Dispatch::Applied(_))
            }
        }
    }

    fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.last_stats = render_frame(&mut self.renderer, &self.state, &self.options);
        self.frames += 1;

        self.renderer.draw(out, STATUS_ROWS)?;

        // Draw UI overlay
        queue!(
            out,
            MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        out.flush()
    }

    /// Current transform and controls, cut to the terminal width
    pub fn status_line(&self) -> String {
        let p = self.state.position;
        let r = self.state.rotation;
        let s = self.state.scaling;
        let mut line = format!(
            "cube3d | pos {:.2} {:.2} {:.2} | rot {:.0} {:.0} {:.0} | scale {:.2} {:.2} {:.2}",
            p.x, p.y, p.z, r.x, r.y, r.z, s.x, s.y, s.z
        );
        line.push_str(" | 0=Reset Esc=Quit");
        if self.last_stats.edges_skipped > 0 {
            line.push_str(&format!(" | {} edges on camera plane", self.last_stats.edges_skipped));
        }
        line.chars().take(self.renderer.cols()).collect()
    }
}

fn canvas_rows(terminal_rows: u16) -> usize {
    terminal_rows.saturating_sub(STATUS_ROWS) as usize
}
