use std::ops::Index;

use thiserror::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Two generations of a fixed-size board.
///
/// `current` is the observable generation. `next` is the scratch buffer that a
/// step writes into; it only becomes visible through [`GridState::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    rows: usize,
    cols: usize,
    current: Vec<CellState>,
    next: Vec<CellState>,
}

impl GridState {
    /// All cells start dead.
    ///
    /// # Panics
    ///
    /// If `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("a {rows}x{cols} grid does not fit in memory"));
        Self {
            rows,
            cols,
            current: vec![CellState::Dead; len],
            next: vec![CellState::Dead; len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        self.idx(row, col).map(|i| self.current[i])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), GridError> {
        let i = self.idx(row, col)?;
        self.current[i] = state;
        Ok(())
    }

    /// Writes into the scratch generation. Not observable until `commit`.
    pub fn set_next(&mut self, row: usize, col: usize, state: CellState) -> Result<(), GridError> {
        let i = self.idx(row, col)?;
        self.next[i] = state;
        Ok(())
    }

    /// Makes the scratch generation current and leaves a dead scratch buffer behind.
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.fill(CellState::Dead);
    }

    /// Flips a single cell and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState, GridError> {
        let i = self.idx(row, col)?;
        self.current[i] = self.current[i].flipped();
        Ok(self.current[i])
    }

    pub fn clear(&mut self) {
        self.current.fill(CellState::Dead);
    }

    /// Randomizes the current generation from the thread-local generator.
    pub fn randomize(&mut self, probability: f64) {
        self.randomize_with(&mut fastrand::Rng::new(), probability);
    }

    /// Each cell becomes alive with `probability`, independently of the others.
    ///
    /// `fastrand` yields values in `[0, 1)`, so `1.0` fills the board and `0.0`
    /// (or anything non-positive) empties it.
    pub fn randomize_with(&mut self, rng: &mut fastrand::Rng, probability: f64) {
        for cell in self.current.iter_mut() {
            *cell = CellState::from(rng.f64() < probability);
        }
    }

    pub fn alive_count(&self) -> usize {
        self.current.iter().filter(|c| c.is_alive()).count()
    }

    /// Counts live cells among the in-bounds neighbours of `(row, col)`.
    /// Positions past the edges are absent, the board does not wrap.
    pub fn alive_neighbors(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.idx(row, col)?;
        // row < rows, so row + 2 cannot overflow
        let rows = self.rows.min(row + 2);
        let cols = self.cols.min(col + 2);
        let mut count = 0;
        for r in row.saturating_sub(1)..rows {
            for c in col.saturating_sub(1)..cols {
                if (r, c) != (row, col) && self.current[r * self.cols + c].is_alive() {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    /// iterate over the current generation in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        let cols = self.cols;
        self.current
            .iter()
            .enumerate()
            .map(move |(i, state)| ((i / cols, i % cols), *state))
    }
}

impl Index<(usize, usize)> for GridState {
    type Output = CellState;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        match self.idx(row, col) {
            Ok(i) => &self.current[i],
            Err(err) => panic!("{err}"),
        }
    }
}
