//! Scan buffer shared between the playback and the refresh contexts.

use core::cell::Cell;

use critical_section::Mutex;

use crate::{
    frame::Frame,
    layer::{Layer, LAYER_MASK},
    wiring::{PortBytes, Wiring},
    LAYERS,
};

/// Hardware-ready state of the three cube layers.
///
/// Playback writes layers, the refresh mechanism reads them. Every slot is replaced
/// as a whole, so a reader never observes a partially written layer.
pub struct ScanBuffer<W> {
    wiring: W,
    slots: [Mutex<Cell<PortBytes>>; LAYERS],
}

impl<W> ScanBuffer<W> {
    /// Creates a dark scan buffer, suitable for a `static` item.
    pub const fn new(wiring: W) -> Self {
        Self {
            wiring,
            slots: [
                Mutex::new(Cell::new(PortBytes::OFF)),
                Mutex::new(Cell::new(PortBytes::OFF)),
                Mutex::new(Cell::new(PortBytes::OFF)),
            ],
        }
    }

    /// Returns the port values of the given layer.
    pub fn layer(&self, layer: Layer) -> PortBytes {
        critical_section::with(|cs| self.slots[layer.index()].borrow(cs).get())
    }

    /// Returns the port values of all layers, bottom first.
    pub fn snapshot(&self) -> [PortBytes; LAYERS] {
        critical_section::with(|cs| {
            [
                self.slots[0].borrow(cs).get(),
                self.slots[1].borrow(cs).get(),
                self.slots[2].borrow(cs).get(),
            ]
        })
    }
}

impl<W: Wiring> ScanBuffer<W> {
    /// Replaces the layer contents with the given LED mask.
    ///
    /// The layer-select bit is always added to the mask before mapping, the layer never
    /// lights without it.
    pub fn set_layer(&self, layer: Layer, mask: u16) {
        let bytes = self.wiring.map((mask & LAYER_MASK) | layer.select_bit());
        critical_section::with(|cs| self.slots[layer.index()].borrow(cs).set(bytes));
    }

    /// Writes the frame layers bottom to top.
    pub fn set_frame(&self, frame: &Frame) {
        self.set_layers(frame.layers);
    }

    /// Writes the bottom, middle and top masks in this order.
    pub fn set_layers(&self, masks: [u16; LAYERS]) {
        for (layer, mask) in Layer::ALL.into_iter().zip(masks) {
            self.set_layer(layer, mask);
        }
    }

    /// Turns every LED off.
    pub fn blank(&self) {
        self.set_layers([0; LAYERS]);
    }
}

impl<W> core::fmt::Debug for ScanBuffer<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScanBuffer")
            .field("layers", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ScanBuffer;
    use crate::{
        layer::Layer,
        test_utils::LogicalWiring,
        wiring::{PortBytes, StandardWiring},
    };

    #[test]
    fn test_new_buffer_is_dark() {
        let buffer = ScanBuffer::new(StandardWiring);
        assert_eq!(buffer.snapshot(), [PortBytes::OFF; 3]);
    }

    #[test]
    fn test_select_bit_is_always_set() {
        let buffer = ScanBuffer::new(LogicalWiring);
        for layer in Layer::ALL {
            for mask in [0, 0b1_0101_0101, 0x1ff, 0xffff] {
                buffer.set_layer(layer, mask);
                let logical = LogicalWiring::logical(buffer.layer(layer));
                assert_ne!(logical & layer.select_bit(), 0, "{layer} {mask:#x}");
            }
        }
    }

    #[test]
    fn test_foreign_select_bits_are_dropped() {
        let buffer = ScanBuffer::new(LogicalWiring);
        buffer.set_layer(Layer::Bottom, Layer::Top.select_bit() | 0b11);
        assert_eq!(
            LogicalWiring::logical(buffer.layer(Layer::Bottom)),
            Layer::Bottom.select_bit() | 0b11
        );
    }

    #[test]
    fn test_set_layer_overwrites() {
        let buffer = ScanBuffer::new(StandardWiring);
        buffer.set_layer(Layer::Middle, 0x1ff);
        buffer.set_layer(Layer::Middle, 0b000_000_001);
        assert_eq!(buffer.layer(Layer::Middle), PortBytes([0, 0b010, 0b0000_0100]));
        assert_eq!(buffer.layer(Layer::Bottom), PortBytes::OFF);
    }

    #[test]
    fn test_blank_keeps_select_lines() {
        let buffer = ScanBuffer::new(StandardWiring);
        buffer.set_layers([0x1ff; 3]);
        buffer.blank();
        assert_eq!(
            buffer.snapshot(),
            [
                PortBytes([0, 0b001, 0]),
                PortBytes([0, 0b010, 0]),
                PortBytes([0, 0b100, 0])
            ]
        );
    }
}
