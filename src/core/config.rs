//! Board configuration.
//!
//! Games configure the engine at startup with a `BoardConfig`:
//! - Grid dimensions (`columns` x `rows`)
//! - Attempt budget
//! - Number of distinct symbols
//! - Reveal delay used by front-ends before a turn is resolved
//!
//! Configs can be built in code or read from a JSON file. Missing JSON
//! fields take their default values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: usize = 9;

/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 5;

/// Default attempt budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 25;

/// Default time both cards stay visible before a turn resolves.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 500;

/// Card ids are `u16`, which bounds the grid size.
pub const MAX_CELLS: usize = u16::MAX as usize;

/// Complete board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of columns in the grid.
    pub columns: usize,

    /// Number of rows in the grid.
    pub rows: usize,

    /// Attempt budget. Also the cap for the refund on a match.
    pub max_attempts: u32,

    /// How long front-ends show two open cards before resolving.
    pub reveal_delay_ms: u64,

    /// Number of distinct symbols. `None` gives every pair its own symbol.
    ///
    /// With fewer symbols than pairs, several pairs share a symbol.
    pub symbol_count: Option<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            symbol_count: None,
        }
    }
}

impl BoardConfig {
    /// Create a configuration with the default 9x5 board.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_reveal_delay_ms(mut self, delay: u64) -> Self {
        self.reveal_delay_ms = delay;
        self
    }

    #[must_use]
    pub fn with_symbol_count(mut self, count: usize) -> Self {
        self.symbol_count = Some(count);
        self
    }

    /// Total number of grid cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Number of pairs dealt. An odd cell count leaves one cell empty.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cell_count() / 2
    }

    /// Number of distinct symbols actually used by the deal.
    #[must_use]
    pub fn effective_symbol_count(&self) -> usize {
        self.symbol_count
            .map_or(self.pair_count(), |n| n.min(self.pair_count()))
    }

    /// Check that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }

        let cells = self.columns.saturating_mul(self.rows);
        if cells < 2 {
            return Err(ConfigError::TooFewCells { cells });
        }
        if cells > MAX_CELLS {
            return Err(ConfigError::TooManyCells { cells, max: MAX_CELLS });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if self.symbol_count == Some(0) {
            return Err(ConfigError::ZeroSymbols);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
