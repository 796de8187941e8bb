use embedded_hal::timer::CountDown;

use super::Player;
use crate::{
    frame::{unpack, Frame, PackedFrame},
    layer::Layer,
    time::ScanCycles,
    wiring::Wiring,
    LAYERS,
};

/// Number of staging slots, two generations of layers.
pub const STAGING_SLOTS: usize = 2 * LAYERS;

/// Continuation state of the drop-down effect.
///
/// The state outlives a single movie, so playing the effect again continues the
/// shifting motion instead of starting from an empty cube. Each cube keeps its own
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropDownState {
    pos: usize,
    slots: [u16; STAGING_SLOTS],
}

impl DropDownState {
    /// Creates a state with empty staging slots.
    pub const fn new() -> Self {
        Self {
            pos: 0,
            slots: [0; STAGING_SLOTS],
        }
    }

    /// Returns the index of the slot shown on the bottom layer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the masks visible at the current position, bottom layer first.
    pub fn visible(&self) -> [u16; LAYERS] {
        core::array::from_fn(|offset| self.slots[(self.pos + offset) % STAGING_SLOTS])
    }

    /// Places the frame into the generation which is not visible right now.
    ///
    /// The top layer goes first, so it is the first to enter the cube from above and
    /// the one that falls to the bottom.
    fn stage(&mut self, frame: &Frame) {
        let order = [Layer::Top, Layer::Middle, Layer::Bottom];
        for (offset, layer) in order.into_iter().enumerate() {
            let slot = (self.pos + LAYERS + offset) % STAGING_SLOTS;
            self.slots[slot] = frame.layer(layer);
        }
    }

    fn advance(&mut self) {
        self.pos = (self.pos + 1) % STAGING_SLOTS;
    }
}

impl<'a, W, T> Player<'a, W, T>
where
    W: Wiring,
    T: CountDown<Time = ScanCycles>,
{
    /// Shifts the first `length` frames down through the cube.
    ///
    /// Every frame takes three steps, one per layer, and each step lasts half of the
    /// frame delay.
    pub fn play_drop_down(
        &mut self,
        state: &mut DropDownState,
        frames: &[PackedFrame],
        length: usize,
    ) {
        log::debug!(
            "Playing {} frames as drop-down from position {}",
            length,
            state.position()
        );

        for index in 0..length {
            let frame = unpack(frames, index);
            state.stage(&frame);

            let step = ScanCycles(frame.delay_ticks >> 1);
            for _ in 0..LAYERS {
                self.buffer.set_layers(state.visible());
                self.hold(step);
                state.advance();
            }
        }
    }
}
