use core::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, LEDS_PER_LAYER};

/// Bit mask of the nine LEDs of a single layer.
pub const LAYER_MASK: u16 = 0x01ff;

/// A horizontal 3×3 plane of the cube.
#[repr(u8)]
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum Layer {
    Bottom = 0,
    Middle = 1,
    Top = 2,
}

impl Layer {
    /// All layers in the scan order.
    pub const ALL: [Self; 3] = [Self::Bottom, Self::Middle, Self::Top];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the layer that follows this one in the scan order, wrapping top to bottom.
    pub const fn next(self) -> Self {
        match self {
            Self::Bottom => Self::Middle,
            Self::Middle => Self::Top,
            Self::Top => Self::Bottom,
        }
    }

    /// The layer-select bit that activates the common line of this layer.
    pub const fn select_bit(self) -> u16 {
        1 << (LEDS_PER_LAYER as u16 + self as u16)
    }
}

impl TryFrom<u8> for Layer {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Bottom),
            1 => Ok(Self::Middle),
            2 => Ok(Self::Top),
            _ => Err(Error::LayerOutOfRange),
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Layer::Bottom => f.write_str("bottom"),
            Layer::Middle => f.write_str("middle"),
            Layer::Top => f.write_str("top"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Layer;
    use crate::Error;

    #[test]
    fn test_layer_scan_order() {
        assert_eq!(Layer::Bottom.next(), Layer::Middle);
        assert_eq!(Layer::Middle.next(), Layer::Top);
        assert_eq!(Layer::Top.next(), Layer::Bottom);
    }

    #[test]
    fn test_layer_select_bits() {
        assert_eq!(Layer::Bottom.select_bit(), 1 << 9);
        assert_eq!(Layer::Middle.select_bit(), 1 << 10);
        assert_eq!(Layer::Top.select_bit(), 1 << 11);
    }

    #[test]
    fn test_layer_from_index() {
        assert_eq!(Layer::try_from(1), Ok(Layer::Middle));
        assert_eq!(Layer::try_from(3), Err(Error::LayerOutOfRange));
    }
}
