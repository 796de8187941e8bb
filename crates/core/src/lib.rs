//! Driver core for a 3×3×3 multiplexed LED cube.
//!
//! Only one layer of the cube is lit at a time. The [`RefreshScheduler`] switches the
//! layers on every tick of a periodic timer fast enough to make all of them look lit,
//! while a [`Player`] in the foreground writes animation frames into the shared
//! [`ScanBuffer`] and holds each of them by the shared [`FrameCountdown`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub use crate::{
    countdown::{CountdownTimer, FrameCountdown},
    errors::{Error, Result},
    frame::{pack, unpack, Frame, PackedFrame},
    layer::Layer,
    movie::Movie,
    player::{DropDownState, PlayStyle, Player},
    refresh::RefreshScheduler,
    scan::ScanBuffer,
    time::{Hertz, ScanCycles},
    wiring::{OutputStage, PortBytes, StandardWiring, Wiring},
};

pub mod countdown;
pub mod errors;
pub mod frame;
pub mod layer;
pub mod movie;
pub mod player;
pub mod refresh;
pub mod scan;
pub mod time;
pub mod wiring;

#[cfg(any(test, feature = "std"))]
pub mod test_utils;

/// Number of layers in the cube.
pub const LAYERS: usize = 3;
/// Number of LEDs in a single layer.
pub const LEDS_PER_LAYER: usize = 9;
