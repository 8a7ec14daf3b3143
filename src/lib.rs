//! Random grid mazes: generation, a depth-first connectivity check, and a
//! player session that walks from the entrance to the exit.

pub mod config;
pub mod engine;
pub mod map;
pub mod tui;
