//! Folder ingestion and file-type helpers.
//!
//! Tracks are plain paths; this module decides which paths are playable audio
//! and turns a folder into an ordered list of them.

mod display;
mod scan;

pub use display::*;
pub use scan::*;
