//! The boundary between logical layer masks and the physical output stage.
//!
//! Porting the cube to a different board means providing another [`Wiring`]
//! and [`OutputStage`], the rest of the driver stays the same.

use serde::{Deserialize, Serialize};

/// Output port values that light a single layer.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct PortBytes(pub [u8; 3]);

impl PortBytes {
    /// Port values with every line released.
    pub const OFF: Self = Self([0; 3]);
}

/// Maps a 12-bit logical value to the output port values.
///
/// Bits `0..9` of the logical value are the LEDs of a layer, bits `9..12` are
/// the layer-select lines.
pub trait Wiring {
    fn map(&self, logical: u16) -> PortBytes;
}

impl<F> Wiring for F
where
    F: Fn(u16) -> PortBytes,
{
    fn map(&self, logical: u16) -> PortBytes {
        self(logical)
    }
}

/// The reference board wiring.
///
/// - LEDs 0..6 are on port D pins 2..8 (pins 0 and 1 are kept for the serial port);
/// - LEDs 6..9 are on port B pins 0..3;
/// - layer-select lines are on port C pins 0..3.
///
/// The resulting bytes are ordered as `[B, C, D]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardWiring;

impl Wiring for StandardWiring {
    #[inline]
    fn map(&self, logical: u16) -> PortBytes {
        let port_b = (logical >> 6) as u8 & 0b0000_0111;
        let port_c = (logical >> 9) as u8 & 0b0000_0111;
        let port_d = (logical as u8 & 0b0011_1111) << 2;
        PortBytes([port_b, port_c, port_d])
    }
}

/// Hardware stage that drives the cube outputs.
pub trait OutputStage {
    /// Writes port values to the outputs.
    fn write(&mut self, bytes: PortBytes);
    /// Releases every layer-select line, so no LED is lit.
    fn clear(&mut self);
}

impl<T: ?Sized + OutputStage> OutputStage for &mut T {
    fn write(&mut self, bytes: PortBytes) {
        T::write(self, bytes);
    }

    fn clear(&mut self) {
        T::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::{PortBytes, StandardWiring, Wiring};

    #[test]
    fn test_standard_wiring_leds() {
        let wiring = StandardWiring;
        assert_eq!(wiring.map(0b000_000_001), PortBytes([0, 0, 0b0000_0100]));
        assert_eq!(wiring.map(0b000_100_000), PortBytes([0, 0, 0b1000_0000]));
        assert_eq!(wiring.map(0b111_000_000), PortBytes([0b111, 0, 0]));
    }

    #[test]
    fn test_standard_wiring_select_lines() {
        let wiring = StandardWiring;
        assert_eq!(wiring.map(1 << 9), PortBytes([0, 0b001, 0]));
        assert_eq!(wiring.map(1 << 11), PortBytes([0, 0b100, 0]));
        // Unused upper bits never reach the ports.
        assert_eq!(wiring.map(0xf000), PortBytes::OFF);
    }

    #[test]
    fn test_closure_wiring() {
        let swapped = |logical: u16| PortBytes([(logical >> 8) as u8, logical as u8, 0]);
        assert_eq!(swapped.map(0x0201), PortBytes([0x02, 0x01, 0]));
    }
}
