use std::convert::Infallible;

use lib_2048::{Direction, EndCondition, Game, Grid, Position, SIZE};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn directions() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Right),
        Just(Direction::Left),
    ]
}

/// Ranks kept low enough that no 2048 tile can appear during a test.
fn grids() -> impl Strategy<Value = Grid> {
    prop::array::uniform4(prop::array::uniform4(0u8..=6)).prop_map(Grid::from_ranks)
}

proptest! {
    #[test]
    fn blocks_in_play_tracks_occupied_cells(
        grid in grids(),
        moves in prop::collection::vec(directions(), 1..40),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = Game::with_grid(grid);

        for direction in moves {
            if game.apply_move(direction) {
                game.maybe_spawn_tile(&mut rng);
            }

            prop_assert_eq!(game.blocks_in_play(), game.grid().occupied());
            prop_assert!(game.blocks_in_play() <= SIZE * SIZE);
        }
    }

    #[test]
    fn total_score_never_drops(
        grid in grids(),
        moves in prop::collection::vec(directions(), 1..40),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = Game::with_grid(grid);
        let mut total = 0;

        for direction in moves {
            let blocks_before = game.blocks_in_play();
            game.apply_move(direction);

            prop_assert!(game.total_score() >= total);
            prop_assert_eq!(game.total_score() - total, game.score_last_move());
            prop_assert!(game.score_last_move() <= game.total_score());

            if game.blocks_in_play() == blocks_before {
                prop_assert_eq!(game.score_last_move(), 0);
            }

            total = game.total_score();
            game.maybe_spawn_tile(&mut rng);
        }
    }

    #[test]
    fn settled_board_needs_no_gravity(grid in grids(), direction in directions()) {
        let mut game = Game::with_grid(grid);
        game.apply_move(direction);
        let settled = *game.grid();
        let blocks = game.blocks_in_play();

        let mut steps = 0;
        let moved = game
            .apply_move_animated(direction, |_| {
                steps += 1;
                Ok::<_, Infallible>(())
            })
            .unwrap();

        // Without a merge there is nothing left to slide.
        if game.blocks_in_play() == blocks {
            prop_assert!(!moved);
            prop_assert_eq!(steps, 0);
            prop_assert_eq!(game.grid(), &settled);
        }
    }

    #[test]
    fn spawn_only_touches_an_empty_cell(grid in grids(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = Game::with_grid(grid);
        let before = *game.grid();

        match game.maybe_spawn_tile(&mut rng) {
            Some(spawned) => {
                prop_assert_eq!(before.rank(spawned), 0);
                prop_assert!(matches!(game.grid().rank(spawned), 1 | 2));
                prop_assert_eq!(game.blocks_in_play(), before.occupied() + 1);

                for position in Position::all().filter(|&p| p != spawned) {
                    prop_assert_eq!(game.grid().rank(position), before.rank(position));
                }
            }
            None => {
                prop_assert_eq!(before.occupied(), SIZE * SIZE);
                prop_assert_eq!(game.grid(), &before);
            }
        }
    }

    #[test]
    fn any_2048_tile_wins(grid in grids(), x in 0..SIZE, y in 0..SIZE) {
        let mut grid = grid;
        grid.set(Position::new(x, y), 11);

        prop_assert_eq!(Game::with_grid(grid).check_end_condition(), EndCondition::Win);
    }

    #[test]
    fn continuing_board_has_a_legal_move(grid in grids()) {
        let game = Game::with_grid(grid);

        if game.check_end_condition() == EndCondition::Continue && game.blocks_in_play() > 0 {
            prop_assert!(Direction::iter().any(|d| game.has_legal_move(d)));
        }
    }
}
