use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count, validated so at least one cell is safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub fn validate(self) -> Result<Self> {
        let (columns, rows) = self.size;
        if columns == 0 || rows == 0 {
            return Err(GameError::EmptyBoard);
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(self)
    }

    pub const fn columns(&self) -> Coord {
        self.size.0
    }

    pub const fn rows(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Parses the `columns rows mines` format, any whitespace between values.
    pub fn parse_cfg(text: &str) -> core::result::Result<Self, ConfigError> {
        let mut tokens = text.split_whitespace();
        let columns = next_number(&mut tokens, "columns")?;
        let rows = next_number(&mut tokens, "rows")?;
        let mines = next_number(&mut tokens, "mines")?;

        if let Some(extra) = tokens.next() {
            return Err(ConfigError::Trailing(extra.to_string()));
        }

        let columns = narrow(columns, "columns")?;
        let rows = narrow(rows, "rows")?;
        Ok(Self::new((columns, rows), mines)?)
    }

    pub fn load(path: impl AsRef<Path>) -> core::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::parse_cfg(&text)?;
        log::debug!("Loaded {:?} from {}", config, path.display());
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

fn next_number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> core::result::Result<CellCount, ConfigError> {
    let token = tokens.next().ok_or(ConfigError::Missing(name))?;
    token
        .parse::<CellCount>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: token.to_string(),
        })
}

fn narrow(value: CellCount, name: &'static str) -> core::result::Result<Coord, ConfigError> {
    Coord::try_from(value).map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}
