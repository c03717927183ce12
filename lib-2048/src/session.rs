use std::io;

use log::info;
use rand::Rng;

use crate::{
    direction::Direction,
    game::{EndCondition, Game},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    Lost,
    Quit,
}

/// Where moves come from. Sources skip input they don't understand;
/// `None` means there is nothing more to read.
pub trait InputSource {
    fn next_command(&mut self, game: &Game) -> io::Result<Option<Command>>;
}

pub trait DisplaySink {
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Shows one gravity sub-step and holds it long enough to be seen.
    fn settle_frame(&mut self, game: &Game) -> io::Result<()>;

    fn announce(&mut self, outcome: SessionOutcome) -> io::Result<()>;
}

pub fn play(
    game: &mut Game,
    rng: &mut impl Rng,
    input: &mut impl InputSource,
    display: &mut impl DisplaySink,
) -> io::Result<SessionOutcome> {
    display.render(game)?;

    loop {
        let direction = match input.next_command(game)? {
            Some(Command::Move(direction)) => direction,
            Some(Command::Quit) | None => return Ok(SessionOutcome::Quit),
        };

        if game.apply_move_animated(direction, |game| display.settle_frame(game))? {
            game.maybe_spawn_tile(rng);
        }

        display.render(game)?;

        let outcome = match game.check_end_condition() {
            EndCondition::Win => SessionOutcome::Won,
            EndCondition::Lose => SessionOutcome::Lost,
            EndCondition::Continue => continue,
        };

        info!("game over: {outcome:?} with score {}", game.total_score());
        display.announce(outcome)?;

        return Ok(outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::grid::Grid;

    struct Scripted(VecDeque<Command>);

    impl InputSource for Scripted {
        fn next_command(&mut self, _game: &Game) -> io::Result<Option<Command>> {
            Ok(self.0.pop_front())
        }
    }

    #[derive(Default)]
    struct Recorder {
        renders: Vec<Game>,
        frames: usize,
        announced: Option<SessionOutcome>,
    }

    impl DisplaySink for Recorder {
        fn render(&mut self, game: &Game) -> io::Result<()> {
            self.renders.push(game.clone());
            Ok(())
        }

        fn settle_frame(&mut self, _game: &Game) -> io::Result<()> {
            self.frames += 1;
            Ok(())
        }

        fn announce(&mut self, outcome: SessionOutcome) -> io::Result<()> {
            self.announced = Some(outcome);
            Ok(())
        }
    }

    fn run(rows: [[u32; 4]; 4], commands: &[Command]) -> (SessionOutcome, Game, Recorder) {
        let mut game = Game::with_grid(Grid::from_values(rows).unwrap());
        let mut input = Scripted(commands.iter().copied().collect());
        let mut display = Recorder::default();

        let outcome = play(
            &mut game,
            &mut ChaCha8Rng::seed_from_u64(0),
            &mut input,
            &mut display,
        )
        .unwrap();

        (outcome, game, display)
    }

    #[test]
    fn quit_ends_silently() {
        let (outcome, game, display) = run(
            [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
            &[Command::Quit, Command::Move(Direction::Right)],
        );

        assert_eq!(outcome, SessionOutcome::Quit);
        assert_eq!(display.renders.len(), 1);
        assert_eq!(display.announced, None);
        assert_eq!(game.blocks_in_play(), 1);
    }

    #[test]
    fn exhausted_input_quits() {
        let (outcome, _, display) = run([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], &[]);

        assert_eq!(outcome, SessionOutcome::Quit);
        assert_eq!(display.announced, None);
    }

    #[test]
    fn move_spawns_and_renders() {
        let (_, game, display) = run(
            [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
            &[Command::Move(Direction::Right)],
        );

        assert_eq!(display.frames, 3);
        assert_eq!(display.renders.len(), 2);
        assert_eq!(game.blocks_in_play(), 2);
        assert_eq!(display.renders[1], game);
    }

    #[test]
    fn blocked_move_does_not_spawn() {
        let (_, game, display) = run(
            [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
            &[Command::Move(Direction::Left), Command::Move(Direction::Up)],
        );

        assert_eq!(display.frames, 0);
        assert_eq!(display.renders.len(), 3);
        assert_eq!(game.blocks_in_play(), 1);
    }

    #[test]
    fn forming_2048_wins() {
        let (outcome, game, display) = run(
            [[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]],
            &[Command::Move(Direction::Left), Command::Quit],
        );

        assert_eq!(outcome, SessionOutcome::Won);
        assert_eq!(display.announced, Some(SessionOutcome::Won));
        assert_eq!(game.score_last_move(), 2048);
    }

    #[test]
    fn filling_the_last_gap_loses() {
        let (outcome, game, display) = run(
            [[2, 4, 2, 4], [4, 2, 4, 16], [0, 8, 16, 8], [4, 2, 4, 32]],
            &[Command::Move(Direction::Left), Command::Quit],
        );

        assert_eq!(game.blocks_in_play(), 16);
        assert_eq!(game.grid().values()[2][..3], [8, 16, 8]);
        assert_eq!(outcome, SessionOutcome::Lost);
        assert_eq!(display.announced, Some(SessionOutcome::Lost));
    }
}
