use std::{collections::VecDeque, io::Read};

use aho_corasick::{AhoCorasick, MatchKind};
use lib_2048::{Command, Direction, Game, InputSource};
use log::trace;

use crate::error::Result;

const KEYS: [(&[u8], Command); 15] = [
    (b"\x1b[A", Command::Move(Direction::Up)),
    (b"\x1b[B", Command::Move(Direction::Down)),
    (b"\x1b[C", Command::Move(Direction::Right)),
    (b"\x1b[D", Command::Move(Direction::Left)),
    (b"k", Command::Move(Direction::Up)),
    (b"j", Command::Move(Direction::Down)),
    (b"l", Command::Move(Direction::Right)),
    (b"h", Command::Move(Direction::Left)),
    (b"w", Command::Move(Direction::Up)),
    (b"s", Command::Move(Direction::Down)),
    (b"d", Command::Move(Direction::Right)),
    (b"a", Command::Move(Direction::Left)),
    (b"q", Command::Quit),
    // Ctrl-C and Ctrl-D, since raw mode swallows the signals.
    (b"\x03", Command::Quit),
    (b"\x04", Command::Quit),
];

/// Turns keyboard bytes into commands, ignoring anything unrecognised.
pub struct KeyReader<R> {
    input: R,
    searcher: AhoCorasick,
    buf: [u8; 128],
    buf_len: usize,
    pending: VecDeque<Command>,
}

impl<R> KeyReader<R>
where
    R: Read,
{
    pub fn new(input: R) -> Result<Self> {
        let searcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(KEYS.map(|(pattern, _)| pattern))?;

        Ok(Self {
            input,
            searcher,
            buf: [0; 128],
            buf_len: 0,
            pending: VecDeque::new(),
        })
    }

    fn decode(&mut self) {
        let keys = self
            .searcher
            .find_iter(&self.buf[..self.buf_len])
            .map(|m| KEYS[m.pattern().as_usize()].1);

        self.pending.extend(keys);

        // Keep a half-read escape sequence for the next read.
        self.buf_len = match &self.buf[..self.buf_len] {
            [.., 0x1b, b'['] => {
                self.buf[..2].copy_from_slice(b"\x1b[");
                2
            }
            [.., 0x1b] => {
                self.buf[0] = 0x1b;
                1
            }
            _ => 0,
        }
    }
}

impl<R> InputSource for KeyReader<R>
where
    R: Read,
{
    fn next_command(&mut self, _game: &Game) -> std::io::Result<Option<Command>> {
        loop {
            if let Some(command) = self.pending.pop_front() {
                trace!("key {command:?}");
                return Ok(Some(command));
            }

            let read = self.input.read(&mut self.buf[self.buf_len..])?;

            if read == 0 {
                return Ok(None);
            }

            self.buf_len += read;
            self.decode();
        }
    }
}
