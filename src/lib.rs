pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod obstacle;
pub mod renderer;
pub mod snake;
pub mod spawner;
pub mod terminal_runtime;
pub mod ui;
