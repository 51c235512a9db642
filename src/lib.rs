//! tvgrid
//!
//! Layout and focus core for a D-pad navigated grid of tiles, as used on
//! television-style interfaces, plus a terminal host that demonstrates it.
//!
//! The library follows a Pure Core / Impure Shell split: layout engines,
//! the selection state machine and animations are plain data driven by
//! explicit inputs and time, while `view` owns the terminal, the clock and
//! the event loop.

pub mod animation;
pub mod config;
pub mod container;
pub mod layout;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod viewport;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
