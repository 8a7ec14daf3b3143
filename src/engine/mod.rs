pub mod action;
pub mod error;
pub mod game_loop;
pub mod world;
