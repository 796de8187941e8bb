use embedded_hal::timer::CountDown;

use super::Player;
use crate::{
    frame::{unpack, PackedFrame},
    time::ScanCycles,
    wiring::Wiring,
};

impl<'a, W, T> Player<'a, W, T>
where
    W: Wiring,
    T: CountDown<Time = ScanCycles>,
{
    /// Shows the first `length` frames once, in order, each for its own delay.
    ///
    /// A frame with zero delay is written and immediately replaced by the next one.
    pub fn play_sequence(&mut self, frames: &[PackedFrame], length: usize) {
        log::debug!("Playing {} frames in sequence", length);

        for index in 0..length {
            let frame = unpack(frames, index);
            self.buffer.set_frame(&frame);
            // The countdown must only start once all three layers are in place.
            self.hold(frame.delay());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        countdown::FrameCountdown,
        frame::{pack, PackedFrame},
        player::Player,
        scan::ScanBuffer,
        test_utils::{Hold, LogicalWiring, RecordingOutput, SnapshotTimer, TickingTimer},
        time::ScanCycles,
        wiring::{PortBytes, StandardWiring},
    };

    #[test]
    fn test_sequence_order() {
        let frames: Vec<PackedFrame> = (0..10_u16)
            .map(|i| pack(i, i + 100, i + 200, (i % 4) as u8))
            .collect();

        let buffer = ScanBuffer::new(LogicalWiring);
        let mut player = Player::new(&buffer, SnapshotTimer::new(&buffer));
        player.play_sequence(&frames, frames.len());

        let holds = player.into_timer().into_holds();
        let expected = (0..10_u16)
            .map(|i| Hold {
                cycles: ScanCycles((i % 4) as u8 * 8),
                layers: [i, i + 100, i + 200],
            })
            .collect::<Vec<_>>();
        assert_eq!(holds, expected);
    }

    #[test]
    fn test_sequence_respects_length() {
        let frames = [pack(1, 1, 1, 1), pack(2, 2, 2, 1), pack(3, 3, 3, 1)];

        let buffer = ScanBuffer::new(LogicalWiring);
        let mut player = Player::new(&buffer, SnapshotTimer::new(&buffer));
        player.play_sequence(&frames, 2);

        let holds = player.into_timer().into_holds();
        assert_eq!(holds.len(), 2);
        assert_eq!(holds[1].layers, [2, 2, 2]);
    }

    #[test]
    fn test_single_frame_scenario() {
        let _ = env_logger::try_init();

        let frames = [pack(0b111_000_000, 0, 0, 4)];

        let buffer = ScanBuffer::new(StandardWiring);
        let countdown = FrameCountdown::new();
        let timer = TickingTimer::new(&buffer, &countdown, RecordingOutput::default());
        let mut player = Player::new(&buffer, timer);
        player.play_sequence(&frames, frames.len());

        // LEDs 6, 7 and 8 of the bottom layer plus the layer-select lines.
        assert_eq!(
            buffer.snapshot(),
            [
                PortBytes([0b111, 0b001, 0]),
                PortBytes([0, 0b010, 0]),
                PortBytes([0, 0b100, 0]),
            ]
        );

        let timer = player.into_timer();
        assert_eq!(timer.decrements(), 32);
        assert_eq!(timer.ticks(), 32 * 3);
        assert!(countdown.is_elapsed());
        // The last tick completes a scan cycle, so the bottom layer stays lit.
        assert_eq!(timer.output().lit(), Some(PortBytes([0b111, 0b001, 0])));
    }

    #[test]
    fn test_countdown_strictly_decreases() {
        let frames = [pack(0, 0, 0x1ff, 3), pack(0x1ff, 0, 0, 31)];

        let buffer = ScanBuffer::new(StandardWiring);
        let countdown = FrameCountdown::new();
        let timer = TickingTimer::new(&buffer, &countdown, RecordingOutput::default());
        let mut player = Player::new(&buffer, timer);
        player.play_sequence(&frames, frames.len());

        let history = player.into_timer().into_history();
        let (first, second) = history.split_at(24);
        assert_eq!(first, (0..24).rev().collect::<Vec<u8>>());
        assert_eq!(second, (0..248).rev().collect::<Vec<u8>>());
    }

    #[test]
    fn test_zero_delay_does_not_wait() {
        let frames = [pack(0x1ff, 0x1ff, 0x1ff, 0)];

        let buffer = ScanBuffer::new(StandardWiring);
        let countdown = FrameCountdown::new();
        let timer = TickingTimer::new(&buffer, &countdown, RecordingOutput::default());
        let mut player = Player::new(&buffer, timer);
        player.play_sequence(&frames, frames.len());

        assert_eq!(player.into_timer().ticks(), 0);
    }
}
