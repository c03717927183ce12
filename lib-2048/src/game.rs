use std::convert::Infallible;

use log::{debug, trace};
use rand::Rng;

use crate::{
    direction::Direction,
    grid::{tile_value, Grid, Position, SIZE, WINNING_VALUE},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndCondition {
    Win,
    Lose,
    Continue,
}

/// Board plus the score bookkeeping that goes with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Game {
    grid: Grid,
    total_score: u32,
    score_last_move: u32,
    blocks_in_play: usize,
    has_moved: bool,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            blocks_in_play: grid.occupied(),
            grid,
            ..Self::default()
        }
    }

    /// Empty board seeded with two tiles.
    pub fn start(rng: &mut impl Rng) -> Self {
        let mut game = Self::new();

        game.maybe_spawn_tile(rng);
        game.maybe_spawn_tile(rng);

        game
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn total_score(&self) -> u32 {
        self.total_score
    }

    pub const fn score_last_move(&self) -> u32 {
        self.score_last_move
    }

    pub const fn blocks_in_play(&self) -> usize {
        self.blocks_in_play
    }

    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn apply_move(&mut self, direction: Direction) -> bool {
        match self.apply_move_animated(direction, |_| Ok::<_, Infallible>(())) {
            Ok(moved) => moved,
            Err(never) => match never {},
        }
    }

    /// Settles, merges and settles again towards `direction`.
    ///
    /// `on_step` sees the board after every gravity sub-step that moved a
    /// tile. An error from it abandons the move part way through.
    pub fn apply_move_animated<E>(
        &mut self,
        direction: Direction,
        mut on_step: impl FnMut(&Self) -> Result<(), E>,
    ) -> Result<bool, E> {
        self.has_moved = false;

        self.settle(direction, &mut on_step)?;
        self.merge(direction);
        self.settle(direction, &mut on_step)?;

        debug!(
            "{direction:?}: moved {}, scored {}, total {}",
            self.has_moved, self.score_last_move, self.total_score
        );

        Ok(self.has_moved)
    }

    /// Whether moving towards `direction` would change the board.
    pub fn has_legal_move(&self, direction: Direction) -> bool {
        self.clone().apply_move(direction)
    }

    fn gravity_step(&mut self, direction: Direction) -> bool {
        let mut changed = false;

        for (cell, neighbour) in direction.scan() {
            let rank = self.grid.rank(neighbour);

            if self.grid.rank(cell) == 0 && rank != 0 {
                self.grid.set(cell, rank);
                self.grid.set(neighbour, 0);
                changed = true;
            }
        }

        changed
    }

    /// Repeats gravity steps until nothing slides.
    fn settle<E>(
        &mut self,
        direction: Direction,
        on_step: &mut impl FnMut(&Self) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut steps = 0;

        while self.gravity_step(direction) {
            self.has_moved = true;
            steps += 1;

            on_step(self)?;
        }

        trace!("settled {direction:?} in {steps} steps");

        Ok(())
    }

    fn merge(&mut self, direction: Direction) {
        self.score_last_move = 0;

        for (cell, neighbour) in direction.scan() {
            let rank = self.grid.rank(cell);

            if rank != 0 && rank == self.grid.rank(neighbour) {
                let merged = rank + 1;
                let value = tile_value(merged);

                self.grid.set(cell, merged);
                self.grid.set(neighbour, 0);
                self.blocks_in_play -= 1;

                self.score_last_move += value;
                self.total_score += value;
                self.has_moved = true;

                trace!("merged {neighbour} into {cell} for {value}");
            }
        }
    }

    /// Drops a 2 (or, one time in ten, a 4) on a random empty cell.
    pub fn maybe_spawn_tile(&mut self, rng: &mut impl Rng) -> Option<Position> {
        let slot_count = SIZE * SIZE - self.blocks_in_play;

        if slot_count == 0 {
            return None;
        }

        let roll = rng.gen_range(0..(slot_count * 10));

        let slot_idx = roll / 10;
        let rank = if roll % 10 == 0 { 2 } else { 1 };

        let position = self.grid.empty_positions().nth(slot_idx)?;

        self.grid.set(position, rank);
        self.blocks_in_play += 1;

        debug!("spawned {} at {position}", tile_value(rank));

        Some(position)
    }

    /// Win on a 2048 tile, otherwise lose unless some cell is empty or
    /// equals its right or lower neighbour.
    pub fn check_end_condition(&self) -> EndCondition {
        let mut can_move = false;

        for position in Position::all() {
            let rank = self.grid.rank(position);

            if tile_value(rank) == WINNING_VALUE {
                return EndCondition::Win;
            }

            let Position { x, y } = position;

            can_move |= rank == 0
                || (x + 1 < SIZE && rank == self.grid.rank(Position::new(x + 1, y)))
                || (y + 1 < SIZE && rank == self.grid.rank(Position::new(x, y + 1)));
        }

        if can_move {
            EndCondition::Continue
        } else {
            EndCondition::Lose
        }
    }
}
