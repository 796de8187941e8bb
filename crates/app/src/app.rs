//! Tricube application show loop.

use tricube_core::{DropDownState, Player};

use crate::{movies, Board, Configuration, TricubeResult};

/// Tricube application runner.
pub struct App<B: Board> {
    player: Player<'static, B::Wiring, B::Timer>,
    config: Configuration,
    // Shared by all drop-down entries so the motion continues between them.
    drop_down: DropDownState,
    // Keep the board alive while its components are in use.
    _board: B,
}

impl<B: Board> App<B> {
    /// Creates a new application instance with the board configuration.
    pub fn new(mut board: B) -> TricubeResult<Self> {
        let config = board.config()?;
        config.validate()?;

        let (buffer, timer) = board
            .take_components()
            .expect("Board components has been already taken");

        log::info!(
            "Starting show with {} playlist entries at {}",
            config.playlist.len(),
            config.tick_rate
        );
        Ok(Self {
            player: Player::new(buffer, timer),
            config,
            drop_down: DropDownState::new(),
            _board: board,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Plays the whole playlist once.
    pub fn run_once(&mut self) -> TricubeResult<()> {
        for entry in &self.config.playlist {
            let movie = movies::by_id(entry.movie)?;
            log::info!(
                "Playing \"{}\" as {} {} times",
                movie.name(),
                entry.style,
                entry.repeat
            );

            for _ in 0..entry.repeat {
                self.player.play(movie, entry.style, &mut self.drop_down);
            }
        }
        Ok(())
    }

    /// Runs the show forever.
    pub fn run(mut self) -> TricubeResult<()> {
        loop {
            self.run_once()?;
        }
    }
}
