use tracing::{debug, trace};

use crate::grid::{CellState, GridError, GridState};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Conway's rule: survival on 2 or 3 neighbours, birth on exactly 3.
#[inline]
pub fn next_state(current: CellState, alive_neighbors: u8) -> CellState {
    match (current, alive_neighbors) {
        (CellState::Alive, 2 | 3) | (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}

/// Advances a [`GridState`] one generation at a time and tracks whether the
/// driver should be stepping it periodically.
///
/// The engine owns no timer. A driver calls [`Simulation::tick`] on its own
/// schedule and the engine only steps while [`RunState::Running`].
#[derive(Debug)]
pub struct Simulation {
    grid: GridState,
    run_state: RunState,
    generation: u64,
    rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_rng(rows, cols, fastrand::Rng::new())
    }

    pub fn with_rng(rows: usize, cols: usize, rng: fastrand::Rng) -> Self {
        Self {
            grid: GridState::new(rows, cols),
            run_state: RunState::Stopped,
            generation: 0,
            rng,
        }
    }

    #[inline]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// number of steps committed since the board was last cleared or randomized
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Computes and commits one generation.
    ///
    /// Every cell is evaluated against the current generation only; results go
    /// to the scratch buffer and become visible together on commit.
    pub fn step(&mut self) {
        self.compute_next().expect("step only visits in-bounds cells");
        self.grid.commit();
        self.generation += 1;
        trace!(generation = self.generation, "committed generation");
    }

    fn compute_next(&mut self) -> Result<(), GridError> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        for row in 0..rows {
            for col in 0..cols {
                let current = self.grid.get(row, col)?;
                let next = next_state(current, self.grid.alive_neighbors(row, col)?);
                self.grid.set_next(row, col, next)?;
            }
        }
        Ok(())
    }

    /// Steps once and switches to `Running`. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.step();
        self.run_state = RunState::Running;
        debug!(generation = self.generation, "simulation started");
        true
    }

    /// Switches to `Stopped`. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.run_state = RunState::Stopped;
        debug!(generation = self.generation, "simulation stopped");
        true
    }

    /// Periodic callback for the driver's timer. Steps only while running and
    /// reports whether it did.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.step();
        }
        self.is_running()
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState, GridError> {
        self.grid.toggle(row, col)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        debug!("board cleared");
    }

    pub fn randomize(&mut self, probability: f64) {
        self.grid.randomize_with(&mut self.rng, probability);
        self.generation = 0;
        debug!(
            probability,
            alive = self.grid.alive_count(),
            "board randomized"
        );
    }
}
