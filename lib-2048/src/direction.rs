use crate::grid::{Position, SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Up, Self::Down, Self::Right, Self::Left].into_iter()
    }

    /// Offset from a cell to the neighbour that slides (or merges) into it.
    pub const fn pull_offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Right => (-1, 0),
            Self::Left => (1, 0),
        }
    }

    /// Cell/neighbour pairs in the order both gravity and merging visit them.
    ///
    /// The outer loop walks the move axis starting at the edge tiles travel
    /// towards, the inner loop walks the cross axis from 0.
    pub fn scan(self) -> impl Iterator<Item = (Position, Position)> {
        let (dx, dy) = self.pull_offset();
        let towards_origin = dx + dy > 0;
        let horizontal = dx != 0;

        (0..SIZE - 1)
            .map(move |i| if towards_origin { i } else { SIZE - 1 - i })
            .flat_map(move |lead| {
                (0..SIZE).map(move |cross| {
                    let cell = if horizontal {
                        Position::new(lead, cross)
                    } else {
                        Position::new(cross, lead)
                    };

                    (cell, cell.offset(dx, dy))
                })
            })
    }
}
