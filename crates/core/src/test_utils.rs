//! Test helpers

use embedded_hal::timer::CountDown;
use void::Void;

use crate::{
    countdown::FrameCountdown,
    layer::{Layer, LAYER_MASK},
    refresh::RefreshScheduler,
    scan::ScanBuffer,
    time::ScanCycles,
    wiring::{OutputStage, PortBytes, Wiring},
    LAYERS,
};

/// Wiring that keeps the logical value as is, little endian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalWiring;

impl LogicalWiring {
    /// Restores the logical value from the port bytes.
    pub fn logical(bytes: PortBytes) -> u16 {
        u16::from_le_bytes([bytes.0[0], bytes.0[1]])
    }
}

impl Wiring for LogicalWiring {
    fn map(&self, logical: u16) -> PortBytes {
        let [lo, hi] = logical.to_le_bytes();
        PortBytes([lo, hi, 0])
    }
}

/// Output stage operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputEvent {
    Clear,
    Write(PortBytes),
}

/// Output stage that remembers every operation.
#[derive(Clone, Debug, Default)]
pub struct RecordingOutput {
    events: Vec<OutputEvent>,
}

impl RecordingOutput {
    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    /// Returns the port values currently driven, if any.
    pub fn lit(&self) -> Option<PortBytes> {
        match self.events.last()? {
            OutputEvent::Clear => None,
            OutputEvent::Write(bytes) => Some(*bytes),
        }
    }
}

impl OutputStage for RecordingOutput {
    fn write(&mut self, bytes: PortBytes) {
        self.events.push(OutputEvent::Write(bytes));
    }

    fn clear(&mut self) {
        self.events.push(OutputEvent::Clear);
    }
}

/// Cube contents captured at the moment a countdown has been started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hold {
    pub cycles: ScanCycles,
    /// LED masks bottom first, without layer-select bits.
    pub layers: [u16; LAYERS],
}

/// A timer that captures the scan buffer on every start and elapses immediately.
#[derive(Debug)]
pub struct SnapshotTimer<'a> {
    buffer: &'a ScanBuffer<LogicalWiring>,
    holds: Vec<Hold>,
}

impl<'a> SnapshotTimer<'a> {
    pub fn new(buffer: &'a ScanBuffer<LogicalWiring>) -> Self {
        Self {
            buffer,
            holds: Vec::new(),
        }
    }

    pub fn into_holds(self) -> Vec<Hold> {
        self.holds
    }
}

impl CountDown for SnapshotTimer<'_> {
    type Time = ScanCycles;

    fn start<T>(&mut self, count: T)
    where
        T: Into<Self::Time>,
    {
        let snapshot = self.buffer.snapshot();
        let layers = core::array::from_fn(|i| {
            let logical = LogicalWiring::logical(snapshot[i]);
            assert_ne!(
                logical & Layer::ALL[i].select_bit(),
                0,
                "layer {i} is not selected"
            );
            logical & LAYER_MASK
        });
        self.holds.push(Hold {
            cycles: count.into(),
            layers,
        });
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        Ok(())
    }
}

/// A timer that runs the refresh scheduler every time the foreground polls it,
/// as if the tick interrupt fired between two polls.
pub struct TickingTimer<'a, W, O> {
    buffer: &'a ScanBuffer<W>,
    countdown: &'a FrameCountdown,
    scheduler: RefreshScheduler,
    output: O,
    ticks: u32,
    history: Vec<u8>,
}

impl<'a, W, O> TickingTimer<'a, W, O>
where
    W: Wiring,
    O: OutputStage,
{
    pub fn new(buffer: &'a ScanBuffer<W>, countdown: &'a FrameCountdown, output: O) -> Self {
        Self {
            buffer,
            countdown,
            scheduler: RefreshScheduler::new(),
            output,
            ticks: 0,
            history: Vec::new(),
        }
    }

    /// Total number of refresh ticks.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Total number of countdown decrements.
    pub fn decrements(&self) -> usize {
        self.history.len()
    }

    /// Countdown values observed after each decrement.
    pub fn into_history(self) -> Vec<u8> {
        self.history
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<W, O> CountDown for TickingTimer<'_, W, O>
where
    W: Wiring,
    O: OutputStage,
{
    type Time = ScanCycles;

    fn start<T>(&mut self, count: T)
    where
        T: Into<Self::Time>,
    {
        self.countdown.set(count.into());
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        if self.countdown.is_elapsed() {
            return Ok(());
        }

        let before = self.countdown.remaining();
        self.scheduler
            .tick(self.buffer, self.countdown, &mut self.output);
        self.ticks += 1;

        let after = self.countdown.remaining();
        if after != before {
            assert!(after < before, "countdown wrapped from {before} to {after}");
            self.history.push(after.0);
        }
        Err(nb::Error::WouldBlock)
    }
}
