use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::WindowResolution,
};
use clap::Parser;
use life_grid::{camera::CamPlugin, config::LifeConfig, life::LifePlugin, state::GameState};

/// Rejected configs are reported on stderr, before any log subscriber exists.
fn validated(config: LifeConfig) -> Result<LifeConfig, AppExit> {
    config.validate().map(|()| config).map_err(|err| {
        eprintln!("invalid configuration: {err}");
        AppExit::error()
    })
}

fn main() -> AppExit {
    let config = match validated(LifeConfig::parse()) {
        Ok(config) => config,
        Err(exit) => return exit,
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(ImagePlugin::default_nearest())
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Game of Life".into(),
                    resizable: true,
                    focused: true,
                    present_mode: bevy::window::PresentMode::AutoNoVsync,
                    mode: bevy::window::WindowMode::Windowed,
                    resolution: WindowResolution::new(1800., 900.),
                    ..default()
                }),
                ..default()
            }),
    )
    .add_plugins(MeshPickingPlugin);
    if config.diagnostics {
        app.add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()));
    }
    app.init_state::<GameState>()
        .add_plugins((CamPlugin, LifePlugin { config }))
        .run()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_config_exits_with_error() {
        let exit = validated(LifeConfig {
            probability: 2.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(exit.is_error());

        let config = LifeConfig::default();
        assert_eq!(Some(config.clone()), validated(config).ok());
    }
}
