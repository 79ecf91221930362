use std::time::Duration;

use bevy::prelude::Resource;
use clap::Parser;
use thiserror::Error;

use crate::prelude::{COLS, MAX_CELLS, RANDOM_ALIVE_PROBABILITY, ROWS, TICK_INTERVAL_MS};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("a {rows}x{cols} grid exceeds the limit of {max} cells", max = MAX_CELLS)]
    GridTooLarge { rows: usize, cols: usize },

    #[error("random alive probability must be within [0, 1], got {0}")]
    Probability(f64),

    #[error("tick interval must be at least 1 ms")]
    ZeroInterval,
}

/// Game of Life on a fixed board
#[derive(Parser, Resource, Debug, Clone, PartialEq)]
#[command(name = "life-grid")]
#[command(about = "Conway's Game of Life on a fixed-size board")]
pub struct LifeConfig {
    /// Number of rows on the board
    #[arg(long, default_value_t = ROWS)]
    pub rows: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = COLS)]
    pub cols: usize,

    /// Milliseconds between generations while running
    #[arg(long, default_value_t = TICK_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Chance of a cell being alive when the board is randomized
    #[arg(long, default_value_t = RANDOM_ALIVE_PROBABILITY)]
    pub probability: f64,

    /// Seed for reproducible random boards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log frame time diagnostics
    #[arg(long, default_value_t = false)]
    pub diagnostics: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            interval_ms: TICK_INTERVAL_MS,
            probability: RANDOM_ALIVE_PROBABILITY,
            seed: None,
            diagnostics: false,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.rows.checked_mul(self.cols).is_some_and(|n| n <= MAX_CELLS) {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::Probability(self.probability));
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_cli() {
        let parsed = LifeConfig::parse_from(["life-grid"]);
        assert_eq!(LifeConfig::default(), parsed);
        assert_eq!(60, parsed.rows);
        assert_eq!(125, parsed.cols);
        assert_eq!(Duration::from_millis(200), parsed.tick_interval());
        assert_eq!(0.5, parsed.probability);
        assert_eq!(Ok(()), parsed.validate());
    }

    #[test]
    fn cli_overrides() {
        let parsed = LifeConfig::parse_from([
            "life-grid",
            "--rows",
            "10",
            "--cols",
            "20",
            "--interval-ms",
            "50",
            "--probability",
            "0.25",
            "--seed",
            "3",
        ]);
        assert_eq!(10, parsed.rows);
        assert_eq!(20, parsed.cols);
        assert_eq!(Duration::from_millis(50), parsed.tick_interval());
        assert_eq!(0.25, parsed.probability);
        assert_eq!(Some(3), parsed.seed);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = LifeConfig {
            rows: 0,
            ..Default::default()
        };
        assert_eq!(
            Err(ConfigError::EmptyGrid { rows: 0, cols: 125 }),
            config.validate()
        );

        config.rows = 5;
        config.probability = 1.5;
        assert_eq!(Err(ConfigError::Probability(1.5)), config.validate());

        config.probability = f64::NAN;
        assert!(config.validate().is_err());

        config.probability = 1.0;
        config.interval_ms = 0;
        assert_eq!(Err(ConfigError::ZeroInterval), config.validate());
    }

    #[test]
    fn rejects_huge_grids() {
        let mut config = LifeConfig {
            rows: 1 << 33,
            cols: 1 << 31,
            ..Default::default()
        };
        assert_eq!(
            Err(ConfigError::GridTooLarge {
                rows: 1 << 33,
                cols: 1 << 31
            }),
            config.validate()
        );

        config.rows = usize::MAX;
        config.cols = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));

        config.rows = MAX_CELLS + 1;
        config.cols = 1;
        assert!(config.validate().is_err());

        config.rows = MAX_CELLS;
        assert_eq!(Ok(()), config.validate());
    }

    #[test]
    fn seeded_rng_repeats() {
        let config = LifeConfig {
            seed: Some(11),
            ..Default::default()
        };
        assert_eq!(config.rng().u64(..), config.rng().u64(..));
    }
}
