use core::{fmt::Display, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::LAYERS;

/// Number of refresh ticks in the single scan cycle.
pub const TICKS_PER_CYCLE: u32 = LAYERS as u32;

/// Refresh tick rate.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord, Hash, Default,
)]
pub struct Hertz(pub u32);

impl FromStr for Hertz {
    type Err = <u32 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str(s).map(Self)
    }
}

impl From<u32> for Hertz {
    fn from(inner: u32) -> Self {
        Self(inner)
    }
}

impl From<Hertz> for Duration {
    fn from(value: Hertz) -> Self {
        Duration::from_nanos(1_000_000_000 / u64::from(value.0.max(1)))
    }
}

impl Display for Hertz {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// Time measured in full scan cycles, the unit of the frame countdown.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord, Hash, Default,
)]
pub struct ScanCycles(pub u8);

impl ScanCycles {
    /// Returns the wall clock time these cycles take at the given tick rate.
    pub fn at_rate(self, tick_rate: Hertz) -> Duration {
        let ticks = u64::from(self.0) * u64::from(TICKS_PER_CYCLE);
        Duration::from_micros(ticks * 1_000_000 / u64::from(tick_rate.0.max(1)))
    }
}

impl From<u8> for ScanCycles {
    fn from(inner: u8) -> Self {
        Self(inner)
    }
}

impl Display for ScanCycles {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{Hertz, ScanCycles};

    #[test]
    fn test_scan_cycles_duration() {
        // 32 cycles of 3 ticks at 960Hz is exactly 100ms.
        assert_eq!(
            ScanCycles(32).at_rate(Hertz(960)),
            Duration::from_millis(100)
        );
        assert_eq!(ScanCycles(0).at_rate(Hertz(960)), Duration::ZERO);
    }

    #[test]
    fn test_hertz_period() {
        assert_eq!(Duration::from(Hertz(1000)), Duration::from_millis(1));
        assert_eq!("300".parse::<Hertz>().unwrap(), Hertz(300));
    }
}
