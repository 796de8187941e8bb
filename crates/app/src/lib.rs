//! Tricube application

#![cfg_attr(not(any(feature = "std", test)), no_std)]

use embedded_hal::timer::CountDown;
use serde::{Deserialize, Serialize};
pub use tricube_core::{Error as TricubeError, Result as TricubeResult};
use tricube_core::{Hertz, PlayStyle, ScanBuffer, ScanCycles, Wiring};

pub use crate::app::App;

mod app;
pub mod movies;

/// Maximum number of entries in the playlist.
pub const MAX_PLAYLIST_LEN: usize = 8;

/// Default refresh tick rate, a bit more than 300 scan cycles per second.
pub const DEFAULT_TICK_RATE: Hertz = Hertz(960);

/// Board-specific components
///
/// Including the cube scan buffer and the frame timer, which is expected to be driven by
/// the refresh tick running on the board.
pub trait Board {
    /// Type maps the logical layer masks to the board outputs.
    type Wiring: Wiring + 'static;
    /// Type provides a frame timer counting full scan cycles.
    type Timer: CountDown<Time = ScanCycles>;
    /// Returns all board components.
    ///
    /// This method brings the component ownership to the caller and can be invoked only once.
    fn take_components(&mut self) -> Option<(&'static ScanBuffer<Self::Wiring>, Self::Timer)>;
    /// Returns the show configuration.
    fn config(&self) -> TricubeResult<Configuration>;
}

/// Identifier of a movie in the built-in library.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovieId(pub u8);

impl core::fmt::Display for MovieId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single playlist position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub movie: MovieId,
    pub style: PlayStyle,
    /// How many times the movie is played in a row.
    pub repeat: u16,
}

/// A global application configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Refresh tick rate of the board timer.
    pub tick_rate: Hertz,
    /// Movies to show, in order.
    pub playlist: heapless::Vec<PlaylistEntry, MAX_PLAYLIST_LEN>,
}

impl Configuration {
    /// Creates a configuration with an empty playlist.
    pub fn new(tick_rate: Hertz) -> Self {
        Self {
            tick_rate,
            playlist: heapless::Vec::new(),
        }
    }

    /// Appends an entry to the playlist.
    pub fn push(&mut self, entry: PlaylistEntry) -> TricubeResult<()> {
        self.playlist
            .push(entry)
            .map_err(|_| TricubeError::PlaylistFull)
    }

    /// Checks that every playlist entry refers to an existing movie.
    pub fn validate(&self) -> TricubeResult<()> {
        if self.playlist.is_empty() {
            return Err(TricubeError::EmptyPlaylist);
        }
        self.playlist
            .iter()
            .try_for_each(|entry| movies::by_id(entry.movie).map(drop))
    }

    /// Returns the total number of scan cycles a single pass of the playlist takes.
    ///
    /// Saturates at `u32::MAX` for very long playlists.
    pub fn scan_cycles(&self) -> TricubeResult<u32> {
        self.playlist.iter().try_fold(0_u32, |total, entry| {
            let movie = movies::by_id(entry.movie)?;
            let cycles = movie
                .scan_cycles(entry.style)
                .saturating_mul(u32::from(entry.repeat));
            Ok(total.saturating_add(cycles))
        })
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let mut config = Self::new(DEFAULT_TICK_RATE);
        for (movie, style, repeat) in [
            (movies::PULSE_ID, PlayStyle::Sequence, 2),
            (movies::SPIN_ID, PlayStyle::Sequence, 4),
            (movies::RAIN_ID, PlayStyle::DropDown, 3),
            (movies::FILL_ID, PlayStyle::Sequence, 1),
        ] {
            config
                .playlist
                .push(PlaylistEntry {
                    movie,
                    style,
                    repeat,
                })
                .ok();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use tricube_core::PlayStyle;

    use crate::{movies, Configuration, MovieId, PlaylistEntry, TricubeError, MAX_PLAYLIST_LEN};

    #[test]
    fn test_default_configuration_is_valid() {
        let config = Configuration::default();
        assert!(config.validate().is_ok());
        assert!(config.scan_cycles().unwrap() > 0);
    }

    #[test]
    fn test_playlist_limits() {
        let mut config = Configuration::new(crate::DEFAULT_TICK_RATE);
        assert_eq!(config.validate(), Err(TricubeError::EmptyPlaylist));

        let entry = PlaylistEntry {
            movie: movies::SPIN_ID,
            style: PlayStyle::Sequence,
            repeat: 1,
        };
        for _ in 0..MAX_PLAYLIST_LEN {
            config.push(entry).unwrap();
        }
        assert_eq!(config.push(entry), Err(TricubeError::PlaylistFull));
    }

    #[test]
    fn test_scan_cycles_with_max_repeats() {
        let mut config = Configuration::new(crate::DEFAULT_TICK_RATE);
        let mut expected = 0_u64;
        for (movie, style) in [
            (movies::RAIN_ID, PlayStyle::DropDown),
            (movies::FILL_ID, PlayStyle::Sequence),
        ]
        .into_iter()
        .cycle()
        .take(MAX_PLAYLIST_LEN)
        {
            config
                .push(PlaylistEntry {
                    movie,
                    style,
                    repeat: u16::MAX,
                })
                .unwrap();
            let single = movies::by_id(movie).unwrap().scan_cycles(style);
            expected += u64::from(single) * u64::from(u16::MAX);
        }

        let expected = u32::try_from(expected).unwrap_or(u32::MAX);
        assert_eq!(config.scan_cycles(), Ok(expected));
    }

    #[test]
    fn test_unknown_movie() {
        let mut config = Configuration::new(crate::DEFAULT_TICK_RATE);
        config
            .push(PlaylistEntry {
                movie: MovieId(200),
                style: PlayStyle::DropDown,
                repeat: 1,
            })
            .unwrap();
        assert_eq!(config.validate(), Err(TricubeError::UnknownMovie));
    }
}
