//! Animation playback.
//!
//! Both playback styles write frames into the [`ScanBuffer`] and then hold them on
//! the cube by starting a [`CountDown`] and busy-waiting until it elapses.

use core::{fmt::Display, str::FromStr};

use embedded_hal::timer::CountDown;
use serde::{Deserialize, Serialize};

pub use self::drop_down::DropDownState;
use crate::{movie::Movie, scan::ScanBuffer, time::ScanCycles, wiring::Wiring};

mod drop_down;
mod sequence;

/// How a movie is shown on the cube.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum PlayStyle {
    /// Every frame is shown once, as is.
    #[default]
    Sequence,
    /// Frames enter the cube from the top and shift down one layer per step.
    DropDown,
}

impl Display for PlayStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlayStyle::Sequence => f.write_str("sequence"),
            PlayStyle::DropDown => f.write_str("drop-down"),
        }
    }
}

impl FromStr for PlayStyle {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequence" => Ok(Self::Sequence),
            "drop-down" => Ok(Self::DropDown),
            _ => Err(crate::Error::UnknownPlayStyle),
        }
    }
}

/// Foreground animation driver.
pub struct Player<'a, W, T> {
    buffer: &'a ScanBuffer<W>,
    timer: T,
}

impl<'a, W, T> Player<'a, W, T>
where
    W: Wiring,
    T: CountDown<Time = ScanCycles>,
{
    pub fn new(buffer: &'a ScanBuffer<W>, timer: T) -> Self {
        Self { buffer, timer }
    }

    /// Returns the timer back.
    pub fn into_timer(self) -> T {
        self.timer
    }

    /// Plays the whole movie once in the given style.
    ///
    /// The drop-down state is used only by the [`PlayStyle::DropDown`] style.
    pub fn play(&mut self, movie: &Movie, style: PlayStyle, state: &mut DropDownState) {
        match style {
            PlayStyle::Sequence => self.play_sequence(movie.frames(), movie.len()),
            PlayStyle::DropDown => self.play_drop_down(state, movie.frames(), movie.len()),
        }
    }

    /// Holds the current buffer contents for the given number of scan cycles.
    fn hold(&mut self, cycles: ScanCycles) {
        self.timer.start(cycles);
        nb::block!(self.timer.wait()).ok();
    }
}
