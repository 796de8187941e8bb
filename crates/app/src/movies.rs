//! Built-in movies.
//!
//! Bit `row * 3 + column` of a layer mask is the LED in the given row and column.

use tricube_core::{frame, Movie, PackedFrame};

use crate::{MovieId, TricubeError, TricubeResult};

const NONE: u16 = 0;
const ALL: u16 = 0b111_111_111;
const CENTER: u16 = 0b000_010_000;
const CROSS: u16 = 0b010_111_010;
const RING: u16 = 0b111_101_111;

const PULSE: [PackedFrame; 6] = [
    frame!([NONE, CENTER, NONE], 3),
    frame!([CENTER, CROSS, CENTER], 3),
    frame!([CROSS, ALL, CROSS], 3),
    frame!([ALL, ALL, ALL], 6),
    frame!([CROSS, ALL, CROSS], 3),
    frame!([CENTER, CROSS, CENTER], 3),
];

// A vertical plane rotating around the central column.
const SPIN: [PackedFrame; 4] = [
    frame!([0b000_111_000, 0b000_111_000, 0b000_111_000], 2),
    frame!([0b100_010_001, 0b100_010_001, 0b100_010_001], 2),
    frame!([0b010_010_010, 0b010_010_010, 0b010_010_010], 2),
    frame!([0b001_010_100, 0b001_010_100, 0b001_010_100], 2),
];

// Single drops entering the top layer, to be played as a drop-down.
const RAIN: [PackedFrame; 8] = [
    frame!([NONE, NONE, 0b000_000_001], 2),
    frame!([NONE, 0b000_100_000, NONE], 2),
    frame!([NONE, NONE, 0b010_000_000], 2),
    frame!([0b000_010_000, NONE, 0b000_000_100], 2),
    frame!([NONE, NONE, 0b100_000_000], 2),
    frame!([NONE, 0b000_000_010, NONE], 2),
    frame!([NONE, NONE, 0b001_000_000], 2),
    frame!([0b000_001_000, NONE, NONE], 2),
];

const FILL: [PackedFrame; 5] = [
    frame!([ALL, NONE, NONE], 4),
    frame!([ALL, ALL, NONE], 4),
    frame!([ALL, ALL, ALL], 8),
    frame!([RING, RING, RING], 4),
    frame!([NONE, NONE, NONE], 4),
];

pub const PULSE_ID: MovieId = MovieId(0);
pub const SPIN_ID: MovieId = MovieId(1);
pub const RAIN_ID: MovieId = MovieId(2);
pub const FILL_ID: MovieId = MovieId(3);

/// All built-in movies, indexed by [`MovieId`].
pub static LIBRARY: [Movie; 4] = [
    Movie::from_frames("pulse", &PULSE),
    Movie::from_frames("spin", &SPIN),
    Movie::from_frames("rain", &RAIN),
    Movie::from_frames("fill", &FILL),
];

/// Returns the movie with the given identifier.
pub fn by_id(id: MovieId) -> TricubeResult<&'static Movie> {
    LIBRARY
        .get(usize::from(id.0))
        .ok_or(TricubeError::UnknownMovie)
}

/// Finds a movie by its name.
pub fn by_name(name: &str) -> TricubeResult<(MovieId, &'static Movie)> {
    LIBRARY
        .iter()
        .enumerate()
        .find(|(_, movie)| movie.name() == name)
        .map(|(index, movie)| (MovieId(index as u8), movie))
        .ok_or(TricubeError::UnknownMovie)
}
