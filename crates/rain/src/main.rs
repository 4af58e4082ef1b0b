use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rain_core::{GLYPH_SIZE, RainAnimator, TICK_INTERVAL};
use ratatui::{DefaultTerminal, Frame, widgets::Paragraph};

mod canvas;

use crate::canvas::TermCanvas;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();
    let result = App::new().run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Surface dimensions and per-column fall counters.
    animator: RainAnimator,
    /// Terminal cell grid the animator paints into.
    canvas: TermCanvas,
    /// When the previous animation tick ran.
    last_tick: Instant,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        Self {
            running: false,
            animator: RainAnimator::new(),
            canvas: TermCanvas::new(),
            last_tick: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.resize_viewport(size.width, size.height);

        while self.running {
            if self.last_tick.elapsed() >= TICK_INTERVAL {
                self.animator.tick(&mut self.canvas, &mut rand::rng());
                self.last_tick = Instant::now();
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Paints the current canvas contents over the whole frame.
    fn render(&mut self, frame: &mut Frame) {
        frame.render_widget(Paragraph::new(self.canvas.lines()), frame.area());
    }

    /// Match the surface and canvas to the viewport and restart every
    /// column, discarding prior fall progress.
    fn resize_viewport(&mut self, cols: u16, rows: u16) {
        self.animator
            .resize_surface(u32::from(cols) * GLYPH_SIZE, u32::from(rows) * GLYPH_SIZE);
        self.animator.init_columns();
        self.canvas.resize(cols, rows);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a deadline so ticks keep their fixed 33ms period.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = TICK_INTERVAL.saturating_sub(self.last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.resize_viewport(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
