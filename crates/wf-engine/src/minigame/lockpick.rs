//! Console lockpick: guess a three-digit code within a limited number of tries.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use wf_core::Game;

use super::{MiniGame, MiniGameOutcome};
use crate::error::MiniGameError;
use crate::state::GameState;

/// Default RNG seed; every play with the same seed draws the same code.
pub const DEFAULT_SEED: u64 = 2212;

/// Default number of guesses.
pub const DEFAULT_MAX_TRIES: u32 = 5;

const CODE_LEN: usize = 3;

/// Settings for [`LockpickGame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockpickConfig {
    /// Seed for drawing the code.
    pub seed: u64,
    /// Number of well-formed guesses allowed.
    pub max_tries: u32,
}

impl Default for LockpickConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl LockpickConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of tries (at least 1).
    pub fn with_max_tries(mut self, tries: u32) -> Self {
        self.max_tries = tries.max(1);
        self
    }

    /// The code every play with this config has to guess.
    pub fn code(&self) -> u32 {
        StdRng::seed_from_u64(self.seed).random_range(100..1000)
    }
}

/// Lockpick minigame reading guesses from `R` and writing prompts to `W`.
pub struct LockpickGame<R, W> {
    id: String,
    config: LockpickConfig,
    input: R,
    output: W,
}

impl LockpickGame<BufReader<Stdin>, Stdout> {
    /// A lockpick game on the process console.
    pub fn console(id: impl Into<String>, config: LockpickConfig) -> Self {
        // Stdin is buffered already; a one-byte buffer here leaves unread
        // lines to whoever reads the console next.
        Self::new(id, config, BufReader::with_capacity(1, io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> LockpickGame<R, W> {
    /// A lockpick game over arbitrary streams.
    pub fn new(id: impl Into<String>, config: LockpickConfig, input: R, output: W) -> Self {
        Self {
            id: id.into(),
            config,
            input,
            output,
        }
    }

    /// Consume the game, returning its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn run(&mut self) -> Result<MiniGameOutcome, MiniGameError> {
        let code = self.config.code().to_string();
        let max = self.config.max_tries;
        writeln!(
            self.output,
            "[Lockpick] Guess the 3-digit code. You have {max} tries."
        )?;

        let mut attempt = 1;
        while attempt <= max {
            write!(self.output, "Try {attempt}/{max}: ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("lockpick input closed");
                break;
            }
            let guess = line.trim();
            if guess.len() != CODE_LEN || !guess.bytes().all(|b| b.is_ascii_digit()) {
                writeln!(self.output, "Enter exactly 3 digits.")?;
                continue;
            }
            if guess == code {
                return Ok(MiniGameOutcome::win("You hear a satisfying click."));
            }
            let placed = code
                .bytes()
                .zip(guess.bytes())
                .filter(|(a, b)| a == b)
                .count();
            writeln!(self.output, "Close... digits in correct position: {placed}")?;
            attempt += 1;
        }
        Ok(MiniGameOutcome::loss("The pick snaps. The lock holds."))
    }
}

impl<R, W> MiniGame for LockpickGame<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn play(&mut self, _game: &Game, _state: &GameState) -> Result<MiniGameOutcome, MiniGameError> {
        self.run()
    }
}
