#![allow(clippy::type_complexity)]

use bevy::{
    ecs::system::SystemState,
    math::vec2,
    picking::pointer::PointerButton,
    prelude::*,
    window::PrimaryWindow,
};

use crate::{prelude::*, state::GameState};

/// Presentation layer: draws the board, maps clicks and keys onto engine
/// commands and drives the periodic step through `FixedUpdate`.
pub struct LifePlugin {
    pub config: LifeConfig,
}

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();
        app.insert_resource(Life(Simulation::with_rng(
            config.rows,
            config.cols,
            config.rng(),
        )))
        .insert_resource(Board::new(config.rows, config.cols))
        .insert_resource(Time::<Fixed>::from_duration(config.tick_interval()))
        .insert_resource(config)
        .add_systems(
            OnEnter(GameState::Load),
            (load_meshes_and_materials, load_cell_board).chain(),
        )
        .add_systems(
            FixedUpdate,
            tick_simulation.run_if(in_state(GameState::Ready).and(simulation_running)),
        )
        .add_systems(
            Update,
            (handle_keyboard, redraw_cells, update_window_title)
                .chain()
                .run_if(in_state(GameState::Ready)),
        );
    }
}

// ——> SYSTEMS

/// initialize meshes and materials in a resource
fn load_meshes_and_materials(
    world: &mut World,
    params: &mut SystemState<(
        ResMut<Assets<Mesh>>,
        ResMut<Assets<ColorMaterial>>,
        Res<Board>,
    )>,
) {
    let (mut meshes, mut materials, board) = params.get_mut(world);
    let cell = meshes.add(Rectangle::from_size(board.cell_size));
    let border_vert = meshes.add(Rectangle::new(
        BORDER_WIDTH_PX,
        board.pixel_size().y + 2.0 * BORDER_WIDTH_PX,
    ));
    let border_horiz = meshes.add(Rectangle::new(
        board.pixel_size().x + 2.0 * BORDER_WIDTH_PX,
        BORDER_WIDTH_PX,
    ));

    let meshes_and_mats = MeshAndMats {
        cell,
        border_vert,
        border_horiz,
        border: materials.add(ColorMaterial::from_color(BORDER_COLOR)),
        alive: materials.add(ColorMaterial::from_color(CELL_ALIVE_COLOR)),
        dead: materials.add(ColorMaterial::from_color(CELL_DEAD_COLOR)),
        hovered_alive: materials.add(ColorMaterial::from_color(CELL_HOVERED_ALIVE_COLOR)),
        hovered_dead: materials.add(ColorMaterial::from_color(CELL_HOVERED_DEAD_COLOR)),
    };
    world.insert_resource(meshes_and_mats);
}

/// spawn one entity per grid coordinate plus the four border bars
fn load_cell_board(
    world: &mut World,
    params: &mut SystemState<(Res<MeshAndMats>, Res<Board>, ResMut<NextState<GameState>>)>,
) {
    let (meshes_and_mats, board, _) = params.get_mut(world);
    let board = *board;
    let meshes_and_mats = meshes_and_mats.clone();

    let cells_to_spawn = (0..board.cell_count())
        .map(|idx| {
            let coord = board.idx_to_cell_coord(idx);
            (
                coord,
                Mesh2d(meshes_and_mats.cell.clone()),
                MeshMaterial2d(meshes_and_mats.dead.clone()),
                Transform::from_translation(board.cell_coord_to_translation(coord))
                    .with_scale(board.cell_scale.extend(1.0)),
            )
        })
        .collect::<Vec<_>>();
    world.spawn_batch(cells_to_spawn);

    world.add_observer(set_hovered_on::<Pointer<Over>>(true));
    world.add_observer(set_hovered_on::<Pointer<Out>>(false));
    world.add_observer(toggle_cell_on_click);

    let half = board.pixel_size() * 0.5;
    let offset_x = Vec2::new(half.x + BORDER_WIDTH_PX * 0.5, 0.0);
    let offset_y = Vec2::new(0.0, half.y + BORDER_WIDTH_PX * 0.5);
    let borders = [
        (meshes_and_mats.border_vert.clone(), board.center - offset_x),
        (meshes_and_mats.border_vert.clone(), board.center + offset_x),
        (meshes_and_mats.border_horiz.clone(), board.center + offset_y),
        (meshes_and_mats.border_horiz.clone(), board.center - offset_y),
    ]
    .map(|(mesh, pos)| {
        (
            Border,
            Mesh2d(mesh),
            MeshMaterial2d(meshes_and_mats.border.clone()),
            Transform::from_translation(pos.extend(0.0)),
        )
    });
    world.spawn_batch(borders);

    let (_, _, mut game_state) = params.get_mut(world);
    game_state.set(GameState::Ready);
    info!(rows = board.rows, cols = board.cols, "board ready");
}

/// Returns an observer that marks the cell under the pointer as hovered or not.
fn set_hovered_on<E>(hovered: bool) -> impl Fn(Trigger<E>, Query<&mut Hovered, With<CellCoord>>) {
    move |trigger, mut query| {
        if let Ok(mut h) = query.get_mut(trigger.entity()) {
            h.0 = hovered;
        }
    }
}

fn toggle_cell_on_click(
    trigger: Trigger<Pointer<Down>>,
    cells: Query<&CellCoord>,
    mut life: ResMut<Life>,
) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    let Ok(coord) = cells.get(trigger.entity()) else {
        return;
    };
    if let Err(err) = life.toggle(coord.row, coord.col) {
        error!("cell click rejected: {err}");
    }
}

fn handle_keyboard(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    config: Res<LifeConfig>,
    mut life: ResMut<Life>,
    mut fixed_time: ResMut<Time<Fixed>>,
) {
    let start = keyboard_input.just_pressed(KeyCode::KeyS)
        || (keyboard_input.just_pressed(KeyCode::Enter) && !life.is_running());
    let stop = keyboard_input.just_pressed(KeyCode::Escape)
        || (keyboard_input.just_pressed(KeyCode::Enter) && life.is_running());

    if start && life.start() {
        // the next periodic step is a full interval away from the immediate one
        let overstep = fixed_time.overstep();
        fixed_time.discard_overstep(overstep);
        info!(generation = life.generation(), "running");
    } else if stop && life.stop() {
        info!(generation = life.generation(), "stopped");
    }

    if keyboard_input.just_pressed(KeyCode::Space) {
        life.step();
    }
    if keyboard_input.just_pressed(KeyCode::KeyC) {
        life.clear();
    }
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        life.randomize(config.probability);
    }
}

fn simulation_running(life: Res<Life>) -> bool {
    life.is_running()
}

fn tick_simulation(mut life: ResMut<Life>) {
    life.tick();
}

/// Re-reads every coordinate after the engine changed, or only the cells whose
/// hover state changed otherwise.
fn redraw_cells(
    mut cell_query: Query<(&CellCoord, Ref<Hovered>, &mut MeshMaterial2d<ColorMaterial>)>,
    meshes_and_mats: Res<MeshAndMats>,
    life: Res<Life>,
) {
    let full = life.is_changed();
    for (coord, hovered, mut material) in cell_query.iter_mut() {
        if !full && !hovered.is_changed() {
            continue;
        }
        let state = life.grid()[(coord.row, coord.col)];
        let handle = meshes_and_mats.cell_material(state, hovered.0);
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }
}

fn update_window_title(life: Res<Life>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if !life.is_changed() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let state = match life.run_state() {
        RunState::Running => "running",
        RunState::Stopped => "stopped",
    };
    window.title = format!(
        "Game of Life | generation {} | alive {} | {state}",
        life.generation(),
        life.grid().alive_count(),
    );
}

// ——> COMPONENTS

/// grid coordinate a cell entity displays
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[require(Hovered, Mesh2d)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

#[derive(Component, Debug, Default, Deref, DerefMut)]
struct Hovered(bool);

#[derive(Component)]
#[require(Mesh2d)]
struct Border;

// ——> RESOURCES

/// The simulation engine as seen by the app.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct Life(pub Simulation);

/// hold handles for meshes and materials
#[derive(Resource, Clone)]
struct MeshAndMats {
    cell: Handle<Mesh>,
    border_vert: Handle<Mesh>,
    border_horiz: Handle<Mesh>,
    border: Handle<ColorMaterial>,
    alive: Handle<ColorMaterial>,
    dead: Handle<ColorMaterial>,
    hovered_alive: Handle<ColorMaterial>,
    hovered_dead: Handle<ColorMaterial>,
}

impl MeshAndMats {
    fn cell_material(&self, state: CellState, hovered: bool) -> &Handle<ColorMaterial> {
        match (state, hovered) {
            (CellState::Alive, false) => &self.alive,
            (CellState::Dead, false) => &self.dead,
            (CellState::Alive, true) => &self.hovered_alive,
            (CellState::Dead, true) => &self.hovered_dead,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct Board {
    /// the center of the board
    pub center: Vec2,
    pub rows: usize,
    pub cols: usize,
    /// the size of each individual cell
    pub cell_size: Vec2,
    /// scale of each individual cell (should be 0.0 - 1.0)
    pub cell_scale: Vec2,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            center: BOARD_POS,
            rows,
            cols,
            cell_size: CELL_SIZE_PX,
            cell_scale: CELL_SCALE,
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// computes full size of the board in pixels
    #[inline]
    pub fn pixel_size(&self) -> Vec2 {
        vec2(
            self.cols as f32 * self.cell_size.x,
            self.rows as f32 * self.cell_size.y,
        )
    }

    /// Row 0 is drawn at the top, column 0 on the left.
    #[inline]
    pub fn cell_coord_to_translation(&self, coord: CellCoord) -> Vec3 {
        let top_left = self.center + vec2(-0.5, 0.5) * self.pixel_size();
        let offset = vec2(coord.col as f32, coord.row as f32) * self.cell_size;
        (top_left + vec2(offset.x, -offset.y) + vec2(0.5, -0.5) * self.cell_size).extend(10.0)
    }

    #[inline]
    pub fn idx_to_cell_coord(&self, idx: usize) -> CellCoord {
        CellCoord {
            row: idx / self.cols,
            col: idx % self.cols,
        }
    }
}

#[cfg(test)]
mod test {
    use bevy::math::vec3;

    use super::*;

    #[test]
    fn board_works() {
        let board = Board {
            center: Vec2::ZERO,
            cell_size: Vec2::splat(8.0),
            cell_scale: Vec2::splat(0.9),
            rows: 4,
            cols: 8,
        };

        assert_eq!(32, board.cell_count());
        assert_eq!(vec2(64., 32.), board.pixel_size());

        let coord = CellCoord { row: 1, col: 3 };
        assert_eq!(coord, board.idx_to_cell_coord(11));
        assert_eq!(CellCoord { row: 0, col: 0 }, board.idx_to_cell_coord(0));
        assert_eq!(CellCoord { row: 3, col: 7 }, board.idx_to_cell_coord(31));

        assert_eq!(
            vec3(-28.0, 12.0, 10.),
            board.cell_coord_to_translation(CellCoord { row: 0, col: 0 })
        );
        assert_eq!(
            vec3(28.0, -12.0, 10.),
            board.cell_coord_to_translation(CellCoord { row: 3, col: 7 })
        );
    }

    fn keyboard_app(config: LifeConfig) -> App {
        let mut app = App::new();
        app.insert_resource(Life(Simulation::with_rng(
            config.rows,
            config.cols,
            config.rng(),
        )))
        .insert_resource(config)
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<Time<Fixed>>()
        .add_systems(Update, handle_keyboard);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        input.clear();
        input.press(key);
        app.update();
    }

    #[test]
    fn keys_drive_the_engine() {
        let mut app = keyboard_app(LifeConfig {
            rows: 12,
            cols: 12,
            probability: 1.0,
            seed: Some(5),
            ..Default::default()
        });

        press(&mut app, KeyCode::KeyR);
        assert_eq!(144, app.world().resource::<Life>().grid().alive_count());

        press(&mut app, KeyCode::KeyC);
        assert_eq!(0, app.world().resource::<Life>().grid().alive_count());

        press(&mut app, KeyCode::Enter);
        let life = app.world().resource::<Life>();
        assert!(life.is_running());
        assert_eq!(1, life.generation());

        press(&mut app, KeyCode::KeyS);
        assert_eq!(1, app.world().resource::<Life>().generation());

        press(&mut app, KeyCode::Enter);
        assert_eq!(RunState::Stopped, app.world().resource::<Life>().run_state());

        press(&mut app, KeyCode::Space);
        let life = app.world().resource::<Life>();
        assert_eq!(2, life.generation());
        assert!(!life.is_running());
    }
}
