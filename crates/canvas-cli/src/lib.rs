//! Library side of the `canvas-css` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
