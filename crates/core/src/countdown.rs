//! Frame display countdown, the only channel between the playback and the refresh contexts.
//!
//! The foreground sets the countdown and then polls it; the refresh tick decrements
//! it once per scan cycle. Neither side ever does the other's job, so a plain atomic
//! value is enough and the set is the only operation guarded by a critical section.

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::timer::CountDown;
use void::Void;

use crate::time::ScanCycles;

/// The shared frame countdown.
#[derive(Debug, Default)]
pub struct FrameCountdown {
    remaining: AtomicU8,
}

impl FrameCountdown {
    /// Creates an elapsed countdown, suitable for a `static` item.
    pub const fn new() -> Self {
        Self {
            remaining: AtomicU8::new(0),
        }
    }

    /// Starts a new countdown. Foreground context only.
    pub fn set(&self, cycles: ScanCycles) {
        critical_section::with(|_| self.remaining.store(cycles.0, Ordering::Release));
    }

    /// Counts one scan cycle down, if the countdown is still running.
    /// Refresh context only.
    ///
    /// Returns `true` if the value has been changed.
    pub fn decrement(&self) -> bool {
        let remaining = self.remaining.load(Ordering::Acquire);
        if remaining == 0 {
            return false;
        }
        self.remaining.store(remaining - 1, Ordering::Release);
        true
    }

    pub fn remaining(&self) -> ScanCycles {
        ScanCycles(self.remaining.load(Ordering::Acquire))
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining.load(Ordering::Acquire) == 0
    }

    /// Returns a timer that waits on this countdown.
    pub fn timer(&self) -> CountdownTimer<'_> {
        CountdownTimer { countdown: self }
    }
}

/// A [`CountDown`] timer backed by the shared frame countdown.
///
/// The waiting side is a busy poll, it never yields.
#[derive(Debug, Clone, Copy)]
pub struct CountdownTimer<'a> {
    countdown: &'a FrameCountdown,
}

impl CountDown for CountdownTimer<'_> {
    type Time = ScanCycles;

    fn start<T>(&mut self, count: T)
    where
        T: Into<Self::Time>,
    {
        self.countdown.set(count.into());
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        if self.countdown.is_elapsed() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
