use bevy::prelude::*;

/// App lifecycle. Whether the simulation is stepping lives in the engine's
/// `RunState`, not here.
#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Load,
    Ready,
}
