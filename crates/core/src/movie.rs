use crate::{
    frame::{Frame, PackedFrame},
    player::PlayStyle,
    Error, Result, LAYERS,
};

/// A named frame table together with the number of frames to play.
///
/// Players take a raw table and a length and trust them to match; a movie checks this
/// once, when it is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Movie {
    name: &'static str,
    frames: &'static [PackedFrame],
}

impl Movie {
    /// Creates a movie that plays the whole table.
    ///
    /// Panics if the table is empty, which turns into a compile error for `const` movies.
    pub const fn from_frames(name: &'static str, frames: &'static [PackedFrame]) -> Self {
        assert!(!frames.is_empty(), "movie must contain at least one frame");
        Self { name, frames }
    }

    /// Creates a movie that plays the first `len` frames of the table.
    pub fn new(name: &'static str, frames: &'static [PackedFrame], len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyMovie);
        }
        let frames = frames.get(..len).ok_or(Error::LengthMismatch)?;
        Ok(Self { name, frames })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn frames(&self) -> &'static [PackedFrame] {
        self.frames
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns the unpacked frame with the given index.
    pub fn frame(&self, index: usize) -> Result<Frame> {
        self.frames
            .get(index)
            .map(|frame| frame.unpack())
            .ok_or(Error::FrameOutOfRange)
    }

    /// Returns the total number of scan cycles one playback takes in the given style.
    pub fn scan_cycles(&self, style: PlayStyle) -> u32 {
        self.frames
            .iter()
            .map(|frame| {
                let delay = u32::from(frame.delay().0);
                match style {
                    PlayStyle::Sequence => delay,
                    PlayStyle::DropDown => (delay >> 1) * LAYERS as u32,
                }
            })
            .sum()
    }
}
