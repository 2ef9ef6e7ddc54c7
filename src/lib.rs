pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
