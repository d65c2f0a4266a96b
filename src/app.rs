//! Application module: the view model rendered by the terminal UI.
//!
//! `App` mirrors what the `Player` publishes plus the shell's own cursor and
//! status line.

mod model;

pub use model::*;
