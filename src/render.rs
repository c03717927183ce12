use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use lib_2048::{tile_value, DisplaySink, Game, Grid, SessionOutcome, SIZE};

const SQUARE_HEIGHT: usize = 3;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPERATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();
const COLOUR_TABLE: [u8; 11] = [37, 33, 31, 32, 36, 34, 35, 93, 91, 92, 96];

/// Lines from the score line down to the line below the board.
const SCORE_LINE: usize = SQUARE_HEIGHT * SIZE + SIZE + 2;

fn colour(rank: u8) -> Option<u8> {
    rank.checked_sub(1).map(|i| COLOUR_TABLE[i as usize % COLOUR_TABLE.len()])
}

fn draw_padding_line(out: &mut impl Write, row: [u8; SIZE]) -> io::Result<()> {
    for rank in row {
        if let Some(colour) = colour(rank) {
            write!(out, "┃\x1b[{}m       \x1b[m", colour + 10)?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    Ok(())
}

fn draw_board_row(out: &mut impl Write, row: [u8; SIZE]) -> io::Result<()> {
    for _ in 0..((SQUARE_HEIGHT - 1) / 2) {
        draw_padding_line(out, row)?;
        out.write_all(b"\x1b[E")?;
    }

    for rank in row {
        if let Some(colour) = colour(rank) {
            let num = tile_value(rank);

            write!(out, "┃\x1b[7m\x1b[{colour}m{num:^7}\x1b[m")?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    for _ in 0..((SQUARE_HEIGHT - 1).div_ceil(2)) {
        out.write_all(b"\x1b[E")?;
        draw_padding_line(out, row)?;
    }

    Ok(())
}

fn write_score(out: &mut impl Write, total: u32, last_move: u32) -> io::Result<()> {
    write!(out, "Score: {total}")?;

    if last_move != 0 {
        write!(out, " (+{last_move})")?;
    }

    out.write_all(b"\x1b[K")
}

/// Draws the board under a score line and leaves the cursor below it.
pub fn draw_board(out: &mut impl Write, game: &Game) -> io::Result<()> {
    out.write_all(b"\n")?;
    write_score(out, game.total_score(), game.score_last_move())?;
    out.write_all(b"\n")?;
    out.write_all(TOP_ROW)?;

    for i in 0..SIZE {
        if i != 0 {
            out.write_all(SEPERATOR_ROW)?;
        }

        for _ in 0..SQUARE_HEIGHT {
            out.write_all(EMPTY_ROW)?;
        }
    }

    out.write_all(BOTTOM_ROW)?;

    redraw_board(out, &Grid::default(), None, game)
}

/// Rewrites the score line and the rows that differ from `old_grid`.
///
/// Expects the cursor below the board and puts it back there.
pub fn redraw_board(
    out: &mut impl Write,
    old_grid: &Grid,
    old_score: Option<(u32, u32)>,
    game: &Game,
) -> io::Result<()> {
    let new_grid = game.grid();
    let new_score = (game.total_score(), game.score_last_move());

    let mut current_line = if old_score.is_some_and(|score| score != new_score) {
        write!(out, "\x1b[{SCORE_LINE}F")?;
        write_score(out, new_score.0, new_score.1)?;

        SCORE_LINE
    } else {
        0
    };

    let changed_rows = (0..SIZE).filter(|&y| old_grid.row(y) != new_grid.row(y));

    for row in changed_rows {
        let final_row_to_end = (SQUARE_HEIGHT - 1).div_ceil(2) + 2;
        let between_rows = SQUARE_HEIGHT + 1;
        let target_line = final_row_to_end + between_rows * (SIZE - 1 - row) + 1;

        if target_line > current_line {
            write!(out, "\x1b[{}F", target_line - current_line)?;
        } else {
            write!(out, "\x1b[{}E", current_line - target_line)?;
        }

        draw_board_row(out, new_grid.row(row))?;
        current_line = target_line - (SQUARE_HEIGHT - 1);
    }

    if current_line != 0 {
        write!(out, "\x1b[{current_line}E")?;
    }

    out.flush()
}

/// What is currently on screen.
struct Shown {
    grid: Grid,
    score: (u32, u32),
}

pub struct TerminalDisplay<W> {
    out: W,
    frame_delay: Duration,
    shown: Option<Shown>,
}

impl<W> TerminalDisplay<W>
where
    W: Write,
{
    pub const fn new(out: W, frame_delay: Duration) -> Self {
        Self {
            out,
            frame_delay,
            shown: None,
        }
    }
}

impl<W> DisplaySink for TerminalDisplay<W>
where
    W: Write,
{
    fn render(&mut self, game: &Game) -> io::Result<()> {
        match &self.shown {
            None => draw_board(&mut self.out, game)?,
            Some(shown) => redraw_board(&mut self.out, &shown.grid, Some(shown.score), game)?,
        }

        self.shown = Some(Shown {
            grid: *game.grid(),
            score: (game.total_score(), game.score_last_move()),
        });

        Ok(())
    }

    fn settle_frame(&mut self, game: &Game) -> io::Result<()> {
        self.render(game)?;

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }

        Ok(())
    }

    fn announce(&mut self, outcome: SessionOutcome) -> io::Result<()> {
        match outcome {
            SessionOutcome::Won => self.out.write_all(b"You won!\n")?,
            SessionOutcome::Lost => self.out.write_all(b"You lost!\n")?,
            SessionOutcome::Quit => {}
        }

        self.out.flush()
    }
}
