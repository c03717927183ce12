use std::io;

use lib_2048::{Command, Direction, Game, InputSource};
use rand::{seq::IteratorRandom, Rng};

/// Plays a uniformly random legal move each turn.
pub struct RandomPlayer<R> {
    rng: R,
}

impl<R> RandomPlayer<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R> InputSource for RandomPlayer<R>
where
    R: Rng,
{
    fn next_command(&mut self, game: &Game) -> io::Result<Option<Command>> {
        let direction = Direction::iter()
            .filter(|&direction| game.has_legal_move(direction))
            .choose(&mut self.rng);

        Ok(direction.map(Command::Move))
    }
}
