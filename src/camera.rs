use bevy::{prelude::*, window::PrimaryWindow};
use bevy_pancam::{PanCam, PanCamPlugin};

use crate::{
    life::Board,
    prelude::{BG_COLOR, BORDER_WIDTH_PX},
    state::GameState,
};

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .insert_resource(ClearColor(BG_COLOR))
            .add_systems(OnEnter(GameState::Load), spawn_cam);
    }
}

// Init
fn spawn_cam(
    mut commands: Commands,
    board: Res<Board>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let window_size = windows
        .get_single()
        .map(|w| w.size())
        .unwrap_or(Vec2::splat(1000.0));
    let scale = fit_scale(board.pixel_size() + Vec2::splat(4.0 * BORDER_WIDTH_PX), window_size);

    commands.spawn((
        Camera2d,
        PanCam {
            // left click toggles cells, so panning is keyboard/scroll only
            grab_buttons: vec![],
            ..default()
        },
        OrthographicProjection {
            scaling_mode: bevy::render::camera::ScalingMode::WindowSize,
            scale,
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Msaa::Off,
    ));
}

/// projection scale that shows all of `content` inside `window`
fn fit_scale(content: Vec2, window: Vec2) -> f32 {
    let ratio = content / window.max(Vec2::ONE);
    ratio.max_element().max(f32::EPSILON)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scale_fits_the_wider_axis() {
        assert_eq!(2.0, fit_scale(Vec2::new(2000.0, 500.0), Vec2::new(1000.0, 1000.0)));
        assert_eq!(0.5, fit_scale(Vec2::new(400.0, 500.0), Vec2::new(1000.0, 1000.0)));
    }
}
