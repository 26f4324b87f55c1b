//! Headless simulation core for a grid-based Snake arcade game.
//!
//! The crate models the movement, collision, and food-spawning rules only:
//! a bounded toroidal [`grid::Grid`], a bounded [`history::MoveHistory`] of
//! per-tick (position, direction) records, and a fixed-tick
//! [`game::GameState`] machine. Rendering, input devices, and menus are the
//! caller's concern; the simulation reports what happened through
//! [`game::GameEvent`]s and exposes per-segment positions and angles for
//! whatever draws them.

pub mod config;
pub mod game;
pub mod grid;
pub mod history;
pub mod input;
pub mod maps;
pub mod score;
pub mod snake;
pub mod timing;
