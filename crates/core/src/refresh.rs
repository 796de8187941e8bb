use crate::{
    countdown::FrameCountdown,
    layer::Layer,
    scan::ScanBuffer,
    wiring::{OutputStage, Wiring},
};

/// Layer multiplexing state machine, driven by a periodic tick.
///
/// Every tick lights the next layer; every third tick, when the scan wraps around
/// to the bottom layer, counts the frame countdown down. Thus the countdown unit is
/// a full scan cycle and the animation timing does not depend on the layer count.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    current: Layer,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshScheduler {
    /// Creates a scheduler which stands at the bottom layer, so the first full scan
    /// cycle ends at the third tick.
    pub const fn new() -> Self {
        Self {
            current: Layer::Bottom,
        }
    }

    /// Returns the layer lit by the last tick.
    pub fn current_layer(&self) -> Layer {
        self.current
    }

    /// Runs a single refresh tick. Never blocks.
    pub fn tick<W, O>(&mut self, buffer: &ScanBuffer<W>, countdown: &FrameCountdown, output: &mut O)
    where
        W: Wiring,
        O: OutputStage,
    {
        self.current = self.current.next();
        // Blank the outputs before switching, otherwise the previous layer pattern
        // flashes on the new layer while the ports are being updated.
        output.clear();
        output.write(buffer.layer(self.current));

        if self.current == Layer::Bottom {
            countdown.decrement();
        }
    }
}
