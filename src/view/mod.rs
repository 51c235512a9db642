//! Terminal demo host (impure shell).
//!
//! Drives a [`GridView`] from crossterm key and mouse events, ticks its
//! animations on a timer and renders the live tiles with ratatui.

pub mod constants;
pub mod demo;
pub mod host;
mod tiles;

pub use demo::{build_demo, Demo};
pub use host::{pixels_for_cells, to_cells, TerminalHost, Tile};
pub use tiles::{render_tiles, truncate_to_width};

use crate::config::{ConfigError, GridOptions, KeyBindings};
use crate::container::GridView;
use crate::model::{GridError, Insets, KeyAction, KeyInput, Orientation, PointerInput};
use crate::source::LayoutFileError;
use crate::state::GridEvent;
use crate::viewport::ViewHost;
use constants::{PIXELS_PER_COLUMN, PIXELS_PER_ROW, STATUS_BAR_HEIGHT, TICK_INTERVAL};
use crossterm::{
    event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Poll interval while nothing is animating.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Wheel notches are scrolled this many terminal cells.
const WHEEL_CELLS: i32 = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded or validated
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Layout definition file could not be loaded
    #[error("layout file error: {0}")]
    Layout(#[from] LayoutFileError),

    /// The grid rejected a value
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    grid: GridView,
    host: TerminalHost,
    key_bindings: KeyBindings,
    demo: Demo,
    /// Last item reported through the activation listener
    activated: Rc<Cell<Option<usize>>>,
    /// Area the grid was last measured against
    grid_area: Rect,
    started: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create the application on the real terminal.
    ///
    /// Sets up the terminal in raw mode with alternate screen and mouse capture.
    pub fn new(grid: GridView, options: &GridOptions, demo: Demo) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, grid, options, demo)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Ticks every [`TICK_INTERVAL`] while an
    /// animation runs and idles otherwise.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = if self.grid.is_animating() {
                TICK_INTERVAL
            } else {
                IDLE_INTERVAL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key, self.started.elapsed()) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            self.grid.tick(&mut self.host, self.started.elapsed());
            if self.host.take_dirty() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create the application on any backend.
    ///
    /// Measures the grid against the terminal size minus the status bar and
    /// then pushes `options` into it.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut grid: GridView,
        options: &GridOptions,
        demo: Demo,
    ) -> Result<Self, TuiError> {
        let mut host = TerminalHost::new();
        let size = terminal.size()?;
        let grid_area = grid_area_of(Rect::new(0, 0, size.width, size.height));
        grid.measure(
            &mut host,
            pixels_for_cells(grid_area.width, grid_area.height),
            Insets::default(),
        )?;
        options.apply(&mut grid, &mut host)?;

        let activated = Rc::new(Cell::new(None));
        let sink = Rc::clone(&activated);
        grid.subscribe(move |event| {
            if let GridEvent::ItemActivated { index } = event {
                sink.set(Some(*index));
            }
        });

        info!(demo = demo.title(), items = grid.item_count(), "tui started");
        Ok(Self {
            terminal,
            grid,
            host,
            key_bindings: KeyBindings::default(),
            demo,
            activated,
            grid_area,
            started: Instant::now(),
        })
    }

    /// Handle one key event at time `now`. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Duration) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "key action");

        match action {
            KeyAction::Move(direction) => {
                self.grid
                    .dispatch_key(&mut self.host, KeyInput::Direction(direction), now);
            }
            KeyAction::Activate => {
                self.grid.dispatch_key(&mut self.host, KeyInput::Activate, now);
            }
            KeyAction::SelectFirst => {
                if self.grid.item_count() > 0 {
                    self.grid.set_selected_position_smooth(&mut self.host, 0, now);
                }
            }
            KeyAction::SelectLast => {
                if let Some(last) = self.grid.item_count().checked_sub(1) {
                    self.grid
                        .set_selected_position_smooth(&mut self.host, last, now);
                }
            }
            KeyAction::ToggleOrientation => {
                let flipped = self.grid.orientation().flipped();
                if let Err(err) = self.grid.set_orientation(&mut self.host, flipped) {
                    warn!(%err, "orientation change failed");
                }
            }
            KeyAction::CycleStrategy => {
                let next = self.grid.focus_scroll_strategy().next();
                self.grid.set_focus_scroll_strategy(next);
            }
            KeyAction::Quit => return true,
        }
        // the status bar reflects every action
        self.host.invalidate();
        false
    }

    /// Forward clicks and wheel motion to the grid's pointer handling.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let area = self.grid_area;
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        if !inside {
            return;
        }

        let input = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerInput::Touch {
                x: i32::from(mouse.column - area.x) * PIXELS_PER_COLUMN + PIXELS_PER_COLUMN / 2,
                y: i32::from(mouse.row - area.y) * PIXELS_PER_ROW + PIXELS_PER_ROW / 2,
            },
            MouseEventKind::ScrollDown => self.wheel(1),
            MouseEventKind::ScrollUp => self.wheel(-1),
            _ => return,
        };
        self.grid.dispatch_pointer(&mut self.host, input);
    }

    /// Wheel motion along the scroll axis.
    fn wheel(&self, notches: i32) -> PointerInput {
        match self.grid.orientation() {
            Orientation::Horizontal => PointerInput::Motion {
                dx: notches * WHEEL_CELLS * PIXELS_PER_COLUMN,
                dy: 0,
            },
            Orientation::Vertical => PointerInput::Motion {
                dx: 0,
                dy: notches * WHEEL_CELLS * PIXELS_PER_ROW,
            },
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.grid_area = grid_area_of(Rect::new(0, 0, width, height));
        let size = pixels_for_cells(self.grid_area.width, self.grid_area.height);
        if let Err(err) = self.grid.measure(&mut self.host, size, Insets::default()) {
            warn!(%err, "relayout after resize failed");
        }
    }

    /// Status bar text.
    fn status(&self) -> String {
        let position = match self.grid.selected_position() {
            Some(index) => format!("item {}/{}", index + 1, self.grid.item_count()),
            None => "no items".to_string(),
        };
        let mut status = format!(
            "{} | {} | {} | {}",
            self.demo.title(),
            position,
            self.grid.focus_scroll_strategy(),
            self.grid.orientation()
        );
        if let Some(index) = self.activated.get() {
            status.push_str(&format!(" | activated {}", index + 1));
        }
        status
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let order = self.grid.child_drawing_order();
        let focused = self.grid.selected_position();
        let status = self.status();
        let host = &self.host;

        self.terminal.draw(|frame| {
            let [grid_area, status_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                    .areas(frame.area());
            render_tiles(frame, grid_area, host, &order, focused, &|index| {
                format!("Item {}", index)
            });
            frame.render_widget(
                Paragraph::new(status.as_str()).style(Style::default().fg(Color::Cyan)),
                status_area,
            );
        })?;
        Ok(())
    }
}

fn grid_area_of(frame: Rect) -> Rect {
    Rect::new(
        frame.x,
        frame.y,
        frame.width,
        frame.height.saturating_sub(STATUS_BAR_HEIGHT),
    )
}

// ===== Test Helpers =====
//
// Crate-internal hooks for tests and benches. Time is passed in explicitly
// so animations can be stepped deterministically.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Handle a key at an explicit time; returns true on quit.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Duration) -> bool {
        self.handle_key(key, now)
    }

    /// Handle a mouse event.
    pub fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse);
    }

    /// Advance animations to `now`.
    pub fn tick_at(&mut self, now: Duration) {
        self.grid.tick(&mut self.host, now);
    }

    /// Render one frame.
    pub fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// The grid being shown.
    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    /// The terminal, for buffer inspection.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Build the demo, run it on the real terminal and restore the terminal on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_demo(
    demo: Demo,
    options: &GridOptions,
    items: usize,
    layout_file: Option<&std::path::Path>,
) -> Result<(), TuiError> {
    let (grid, options) = build_demo(demo, options, items, layout_file)?;
    let mut app = TuiApp::new(grid, &options, demo)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn app(demo: Demo, items: usize) -> TuiApp<TestBackend> {
        let options = GridOptions::default();
        let (grid, options) = build_demo(demo, &options, items, None).unwrap();
        let terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        TuiApp::with_terminal(terminal, grid, &options, demo).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tui_error_from_io_error() {
        let err: TuiError = io::Error::other("boom").into();
        assert!(matches!(err, TuiError::Io(_)));
    }

    #[test]
    fn q_quits() {
        let mut app = app(Demo::Regular, 6);
        assert!(app.handle_key_at(key(KeyCode::Char('q')), Duration::ZERO));
        assert!(!app.handle_key_at(key(KeyCode::Char('x')), Duration::ZERO));
    }

    #[test]
    fn arrow_moves_focus_after_animation() {
        let mut app = app(Demo::Regular, 20);
        app.handle_key_at(key(KeyCode::Right), Duration::ZERO);
        app.tick_at(Duration::from_millis(200));
        assert_eq!(app.grid().selected_position(), Some(2));
    }

    #[test]
    fn enter_reports_activation_in_status() {
        let mut app = app(Demo::Regular, 6);
        app.handle_key_at(key(KeyCode::Enter), Duration::ZERO);
        assert!(app.status().ends_with("activated 1"));
    }

    #[test]
    fn s_cycles_strategy() {
        let mut app = app(Demo::Regular, 6);
        app.handle_key_at(key(KeyCode::Char('s')), Duration::ZERO);
        assert!(app.status().contains("item-visible"));
    }

    #[test]
    fn o_toggles_orientation() {
        let mut app = app(Demo::Regular, 6);
        app.handle_key_at(key(KeyCode::Char('o')), Duration::ZERO);
        assert_eq!(app.grid().orientation(), Orientation::Vertical);
    }

    #[test]
    fn click_selects_tile_under_pointer() {
        let mut app = app(Demo::Regular, 6);
        app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 45,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.grid().selected_position(), Some(5));
    }

    #[test]
    fn end_jumps_to_last_item() {
        let mut app = app(Demo::Regular, 20);
        app.handle_key_at(key(KeyCode::End), Duration::ZERO);
        app.tick_at(Duration::from_millis(250));
        assert_eq!(app.grid().selected_position(), Some(19));
    }
}
