//! Acceptance test harness for the terminal demo.
//!
//! Wraps `TuiApp<TestBackend>` with a virtual clock so key presses and
//! animation frames can be stepped deterministically.

use crate::config::GridOptions;
use crate::container::GridView;
use crate::view::{build_demo, Demo, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
pub struct GridTestHarness {
    app: TuiApp<TestBackend>,
    now: Duration,
    running: bool,
}

impl GridTestHarness {
    /// Build `demo` with default options on a terminal of the given size.
    pub fn new(demo: Demo, items: usize, width: u16, height: u16) -> Result<Self, TuiError> {
        Self::with_options(demo, &GridOptions::default(), items, width, height)
    }

    /// Build `demo` with explicit options.
    pub fn with_options(
        demo: Demo,
        options: &GridOptions,
        items: usize,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let (grid, options) = build_demo(demo, options, items, None)?;
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let app = TuiApp::with_terminal(terminal, grid, &options, demo)?;
        Ok(Self {
            app,
            now: Duration::ZERO,
            running: true,
        })
    }

    /// Send a single key at the current virtual time.
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.press_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn press_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        if self.app.handle_key_at(KeyEvent::new(key, mods), self.now) {
            self.running = false;
        }
        !self.running
    }

    /// Press each key in turn, letting animations finish in between.
    pub fn press_all_settled(&mut self, keys: &[KeyCode]) {
        for &key in keys {
            if self.press(key) {
                break;
            }
            self.settle();
        }
    }

    /// Advance the virtual clock by `ms` and tick the grid once.
    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.app.tick_at(self.now);
    }

    /// Tick in 16ms frames until no animation is running.
    pub fn settle(&mut self) {
        // bounded so a stuck animation fails the test instead of hanging it
        for _ in 0..200 {
            if !self.app.grid().is_animating() {
                return;
            }
            self.advance(16);
        }
    }

    /// Left click at a terminal cell.
    pub fn click_at(&mut self, column: u16, row: u16) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// The grid under test.
    pub fn grid(&self) -> &GridView {
        self.app.grid()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
