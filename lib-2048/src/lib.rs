pub mod direction;
pub mod game;
pub mod grid;
pub mod session;

pub use direction::Direction;
pub use game::{EndCondition, Game};
pub use grid::{tile_value, Grid, GridError, Position, SIZE, WINNING_VALUE};
pub use session::{play, Command, DisplaySink, InputSource, SessionOutcome};
