//! CLI library components for the DataSnail workbench.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
