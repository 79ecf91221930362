pub mod camera;
pub mod config;
pub mod engine;
pub mod grid;
pub mod life;
pub mod state;

pub mod prelude {
    use bevy::{color::Color, math::Vec2};

    pub const ROWS: usize = 60;
    pub const COLS: usize = 125;
    pub const TICK_INTERVAL_MS: u64 = 200;
    pub const RANDOM_ALIVE_PROBABILITY: f64 = 0.5;
    /// one entity is spawned per cell, so boards stay well below this
    pub const MAX_CELLS: usize = 1 << 20;

    pub const BG_COLOR: Color = Color::srgb(0.0, 0.1, 0.3);

    pub const BOARD_POS: Vec2 = Vec2::ZERO;
    pub const BORDER_WIDTH_PX: f32 = 8.0;
    pub const BORDER_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

    pub const CELL_SIZE_PX: Vec2 = Vec2::splat(14.0);
    pub const CELL_SCALE: Vec2 = Vec2::splat(0.9);
    pub const CELL_ALIVE_COLOR: Color = Color::srgb(0.2, 1.0, 0.2);
    pub const CELL_DEAD_COLOR: Color = Color::srgb(0.05, 0.15, 0.4);
    pub const CELL_HOVERED_ALIVE_COLOR: Color = Color::srgb(0.2, 0.4, 1.0);
    pub const CELL_HOVERED_DEAD_COLOR: Color = Color::srgb(0.7, 0.1, 0.1);

    pub use crate::config::LifeConfig;
    pub use crate::engine::{RunState, Simulation};
    pub use crate::grid::{CellState, GridError, GridState};
}
