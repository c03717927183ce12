//! 2048 in the terminal.
//!
//! Slide with the arrow keys, `hjkl` or `wasd`; `q` quits.

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use lib_2048::{play, Game, SessionOutcome};
use log::{error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod autoplay;
mod error;
mod input;
mod render;
mod terminal;

use error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "term-2048", version, about = "Play 2048 in the terminal")]
struct Args {
    /// Let a random player make the moves
    #[arg(short, long)]
    random: bool,

    /// Seed for tile placement, for repeatable games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pause between animation frames while tiles slide, in milliseconds
    #[arg(long, default_value_t = 40)]
    frame_delay_ms: u64,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| Error::LogFile {
            path: path.clone(),
            source,
        })?;

        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();

    Ok(())
}

fn play_interactive(
    out: &mut impl Write,
    rng: &mut ChaCha8Rng,
    frame_delay: Duration,
) -> Result<SessionOutcome> {
    let stdin = io::stdin();
    let _raw_mode = terminal::RawMode::enable(&stdin)?;

    let mut input = input::KeyReader::new(stdin.lock())?;
    let mut display = render::TerminalDisplay::new(out, frame_delay);
    let mut game = Game::start(rng);

    Ok(play(&mut game, rng, &mut input, &mut display)?)
}

fn play_random(
    out: &mut impl Write,
    rng: &mut ChaCha8Rng,
    frame_delay: Duration,
) -> Result<SessionOutcome> {
    let mut player = autoplay::RandomPlayer::new(ChaCha8Rng::seed_from_u64(rng.gen()));
    let mut display = render::TerminalDisplay::new(out, frame_delay);
    let mut game = Game::start(rng);

    Ok(play(&mut game, rng, &mut player, &mut display)?)
}

fn run(args: Args) -> Result<SessionOutcome> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("starting session with seed {seed}");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let frame_delay = Duration::from_millis(args.frame_delay_ms);
    let mut stdout = io::stdout().lock();

    if args.random {
        play_random(&mut stdout, &mut rng, frame_delay)
    } else {
        play_interactive(&mut stdout, &mut rng, frame_delay)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_ref()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(outcome) => {
            info!("session ended: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("fatal error: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
