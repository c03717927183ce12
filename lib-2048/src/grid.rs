use std::fmt;

use thiserror::Error;

pub const SIZE: usize = 4;
pub const WINNING_VALUE: u32 = 2048;

/// Value shown for a tile of the given rank; rank 0 is an empty cell.
pub const fn tile_value(rank: u8) -> u32 {
    if rank == 0 {
        0
    } else {
        1 << rank
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Every position in grid order: columns outer, rows inner.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SIZE).flat_map(|x| (0..SIZE).map(move |y| Self::new(x, y)))
    }

    /// The caller keeps the result on the board.
    pub(crate) const fn offset(self, dx: isize, dy: isize) -> Self {
        Self::new(self.x.wrapping_add_signed(dx), self.y.wrapping_add_signed(dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("{value} at {position} is not a tile value")]
    InvalidValue { value: u32, position: Position },
}

/// Tile ranks stored row by row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [[u8; SIZE]; SIZE],
}

impl Grid {
    pub const fn from_ranks(rows: [[u8; SIZE]; SIZE]) -> Self {
        Self { rows }
    }

    /// Builds a grid from tile values written the way the board is shown.
    pub fn from_values(rows: [[u32; SIZE]; SIZE]) -> Result<Self, GridError> {
        let mut grid = Self::default();

        for position in Position::all() {
            let value = rows[position.y][position.x];

            let rank = match value {
                0 => 0,
                2.. if value.is_power_of_two() => value.trailing_zeros() as u8,
                _ => return Err(GridError::InvalidValue { value, position }),
            };

            grid.set(position, rank);
        }

        Ok(grid)
    }

    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        self.rows.map(|row| row.map(tile_value))
    }

    pub const fn rank(&self, position: Position) -> u8 {
        self.rows[position.y][position.x]
    }

    pub fn set(&mut self, position: Position, rank: u8) {
        self.rows[position.y][position.x] = rank;
    }

    pub fn row(&self, y: usize) -> [u8; SIZE] {
        self.rows[y]
    }

    pub fn occupied(&self) -> usize {
        self.rows.iter().flatten().filter(|&&rank| rank != 0).count()
    }

    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|&position| self.rank(position) == 0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows {
            for (x, rank) in row.into_iter().enumerate() {
                if x != 0 {
                    f.write_str(" ")?;
                }

                match rank {
                    0 => write!(f, "{:>5}", ".")?,
                    _ => write!(f, "{:>5}", tile_value(rank))?,
                }
            }

            f.write_str("\n")?;
        }

        Ok(())
    }
}
