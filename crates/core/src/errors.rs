use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// A specialized result type for the Tricube driver.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur on the checked edges of the driver.
///
/// The playback hot path never returns them: clamping is defined behavior and
/// table bounds are a caller contract.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Debug, Serialize, Deserialize)]
#[repr(u16)]
pub enum Error {
    /// The layer index is not in the range 0..3.
    LayerOutOfRange = 1,
    /// The movie does not contain any frames.
    EmptyMovie = 2,
    /// The declared movie length exceeds the frame table.
    LengthMismatch = 3,
    /// The frame index is greater than the movie length.
    FrameOutOfRange = 4,
    /// There is no movie with the given identifier.
    UnknownMovie = 5,
    /// The playlist cannot hold more entries.
    PlaylistFull = 6,
    /// The play style name is not recognized.
    UnknownPlayStyle = 7,
    /// The playlist does not contain any entries.
    EmptyPlaylist = 8,
    /// Unspecified or unknown error.
    Unspecified(u16),
}

impl Error {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::LayerOutOfRange,
            2 => Self::EmptyMovie,
            3 => Self::LengthMismatch,
            4 => Self::FrameOutOfRange,
            5 => Self::UnknownMovie,
            6 => Self::PlaylistFull,
            7 => Self::UnknownPlayStyle,
            8 => Self::EmptyPlaylist,

            other => Self::Unspecified(other),
        }
    }

    pub fn into_code(self) -> u16 {
        match self {
            Error::LayerOutOfRange => 1,
            Error::EmptyMovie => 2,
            Error::LengthMismatch => 3,
            Error::FrameOutOfRange => 4,
            Error::UnknownMovie => 5,
            Error::PlaylistFull => 6,
            Error::UnknownPlayStyle => 7,
            Error::EmptyPlaylist => 8,

            Error::Unspecified(other) => other,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_codes() {
        for code in 1..=8 {
            assert_eq!(Error::from_code(code).into_code(), code);
        }
        assert_eq!(Error::from_code(42), Error::Unspecified(42));
        assert_eq!(Error::Unspecified(42).into_code(), 42);
    }
}
