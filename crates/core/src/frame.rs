//! Packed animation frame records.
//!
//! A single 32-bit record holds the whole frame:
//!
//! | bits   | field           |
//! |--------|-----------------|
//! | 0..9   | bottom layer    |
//! | 9..18  | middle layer    |
//! | 18..27 | top layer       |
//! | 27..32 | duration code   |
//!
//! The duration code is stored in units of eight scan cycles, trading resolution for range.

use serde::{Deserialize, Serialize};

use crate::{
    layer::{Layer, LAYER_MASK},
    time::ScanCycles,
    LAYERS, LEDS_PER_LAYER,
};

/// The largest duration code that fits into a packed record.
pub const MAX_DURATION_CODE: u8 = 31;
/// The longest delay a frame can request.
pub const MAX_DELAY_TICKS: u8 = MAX_DURATION_CODE << DURATION_SCALE_SHIFT;

const DURATION_SHIFT: u32 = (LEDS_PER_LAYER * LAYERS) as u32;
const DURATION_SCALE_SHIFT: u32 = 3;

/// A packed animation frame.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct PackedFrame(pub u32);

/// An animation frame expanded for playback.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct Frame {
    /// LED masks of the bottom, middle and top layers.
    pub layers: [u16; LAYERS],
    /// Display time in scan cycles.
    pub delay_ticks: u8,
}

/// Packs the layer masks and the display duration into a single record.
///
/// Durations above [`MAX_DURATION_CODE`] saturate. Masks are expected to fit nine bits,
/// wider masks lose their upper bits.
pub const fn pack(layer1: u16, layer2: u16, layer3: u16, duration_units: u8) -> PackedFrame {
    let duration = if duration_units > MAX_DURATION_CODE {
        MAX_DURATION_CODE
    } else {
        duration_units
    };

    PackedFrame(
        (layer1 & LAYER_MASK) as u32
            | ((layer2 & LAYER_MASK) as u32) << LEDS_PER_LAYER
            | ((layer3 & LAYER_MASK) as u32) << (2 * LEDS_PER_LAYER)
            | (duration as u32) << DURATION_SHIFT,
    )
}

/// Reads the frame at `index` and expands it for playback.
///
/// Panics if `index` is out of the table bounds.
#[inline]
pub fn unpack(frames: &[PackedFrame], index: usize) -> Frame {
    frames[index].unpack()
}

impl PackedFrame {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the LED mask of the given layer.
    pub const fn layer(self, layer: Layer) -> u16 {
        (self.0 >> (layer as usize * LEDS_PER_LAYER)) as u16 & LAYER_MASK
    }

    pub const fn duration_code(self) -> u8 {
        (self.0 >> DURATION_SHIFT) as u8
    }

    pub const fn delay(self) -> ScanCycles {
        ScanCycles(self.duration_code() << DURATION_SCALE_SHIFT)
    }

    pub const fn unpack(self) -> Frame {
        Frame {
            layers: [
                self.layer(Layer::Bottom),
                self.layer(Layer::Middle),
                self.layer(Layer::Top),
            ],
            delay_ticks: self.delay().0,
        }
    }
}

impl From<u32> for PackedFrame {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl Frame {
    pub const fn layer(&self, layer: Layer) -> u16 {
        self.layers[layer as usize]
    }

    pub const fn delay(&self) -> ScanCycles {
        ScanCycles(self.delay_ticks)
    }

    /// Returns the number of lit LEDs in the whole frame.
    pub const fn lit_count(&self) -> u32 {
        self.layers[0].count_ones() + self.layers[1].count_ones() + self.layers[2].count_ones()
    }
}

/// Builds a packed frame from the bottom, middle and top layer masks and a duration.
///
/// ```
/// use tricube_core::{frame, PackedFrame};
///
/// static BLINK: [PackedFrame; 2] = [
///     frame!([0b111_111_111, 0, 0b111_111_111], 4),
///     frame!([0, 0b111_111_111, 0], 4),
/// ];
/// assert_eq!(BLINK[1].unpack().delay_ticks, 32);
/// ```
#[macro_export]
macro_rules! frame {
    ([$bottom:expr, $middle:expr, $top:expr], $duration:expr) => {
        $crate::frame::pack($bottom, $middle, $top, $duration)
    };
}

#[cfg(test)]
mod tests {
    use super::{pack, unpack, Frame, PackedFrame, MAX_DELAY_TICKS};
    use crate::layer::Layer;

    #[test]
    fn test_pack_field_layout() {
        let packed = pack(0b1, 0b1, 0b1, 1);
        assert_eq!(packed.raw(), 1 | 1 << 9 | 1 << 18 | 1 << 27);
    }

    #[test]
    fn test_unpack_scenario() {
        let frames = [pack(0b111_000_000, 0, 0, 4)];
        assert_eq!(
            unpack(&frames, 0),
            Frame {
                layers: [0b111_000_000, 0, 0],
                delay_ticks: 32,
            }
        );
    }

    #[test]
    fn test_duration_saturates() {
        assert_eq!(pack(0, 0, 0, 31).unpack().delay_ticks, MAX_DELAY_TICKS);
        assert_eq!(pack(0, 0, 0, 32).unpack().delay_ticks, 248);
        assert_eq!(pack(0, 0, 0, u8::MAX).duration_code(), 31);
    }

    #[test]
    fn test_wide_masks_do_not_leak_into_neighbours() {
        let packed = pack(0xffff, 0, 0, 0);
        assert_eq!(packed.layer(Layer::Bottom), 0x1ff);
        assert_eq!(packed.layer(Layer::Middle), 0);
        assert_eq!(packed.duration_code(), 0);
    }

    #[test]
    fn test_frame_macro_is_const() {
        const FRAMES: [PackedFrame; 1] = [frame!([0b000_010_000, 0b010_111_010, 0b000_010_000], 2)];
        let frame = FRAMES[0].unpack();
        assert_eq!(frame.layer(Layer::Middle), 0b010_111_010);
        assert_eq!(frame.lit_count(), 7);
        assert_eq!(frame.delay_ticks, 16);
    }
}
