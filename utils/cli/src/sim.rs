//! A cube simulated on the host, drawn in the terminal.

use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::JoinHandle,
    time::Duration,
};

use tricube_app::{Board, Configuration, TricubeResult};
use tricube_core::{
    layer::LAYER_MASK, CountdownTimer, FrameCountdown, Hertz, Layer, OutputStage, PortBytes,
    RefreshScheduler, ScanBuffer, StandardWiring, LAYERS,
};

static BUFFER: ScanBuffer<StandardWiring> = ScanBuffer::new(StandardWiring);
static COUNTDOWN: FrameCountdown = FrameCountdown::new();

/// How many times per second the cube is redrawn.
const REDRAW_RATE: u32 = 20;

/// Board with the scan buffer and the countdown in static memory.
pub struct SimBoard {
    config: Configuration,
    taken: bool,
}

impl SimBoard {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            taken: false,
        }
    }
}

impl Board for SimBoard {
    type Wiring = StandardWiring;
    type Timer = CountdownTimer<'static>;

    fn take_components(&mut self) -> Option<(&'static ScanBuffer<StandardWiring>, Self::Timer)> {
        if self.taken {
            return None;
        }
        self.taken = true;
        Some((&BUFFER, COUNTDOWN.timer()))
    }

    fn config(&self) -> TricubeResult<Configuration> {
        Ok(self.config.clone())
    }
}

/// Restores the logical value from the [`StandardWiring`] port bytes.
fn unmap(bytes: PortBytes) -> u16 {
    let [port_b, port_c, port_d] = bytes.0.map(u16::from);
    (port_d >> 2) | (port_b << 6) | (port_c << 9)
}

/// Output stage that latches every lit layer, like an eye with a long persistence.
#[derive(Debug, Default)]
struct LatchOutput {
    layers: [u16; LAYERS],
}

impl OutputStage for LatchOutput {
    fn write(&mut self, bytes: PortBytes) {
        let logical = unmap(bytes);
        let select = logical >> 9;
        if select.count_ones() != 1 {
            log::warn!("Invalid layer-select lines: {:03b}", select);
            return;
        }

        match Layer::try_from(select.trailing_zeros() as u8) {
            Ok(layer) => self.layers[layer.index()] = logical & LAYER_MASK,
            Err(err) => log::warn!("{}", err),
        }
    }

    fn clear(&mut self) {}
}

fn draw(layers: &[u16; LAYERS]) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    // Move to the top left corner and clear the screen.
    write!(out, "\x1b[H\x1b[2J")?;
    writeln!(out, "top    middle bottom")?;
    for row in 0..3 {
        for layer in Layer::ALL.into_iter().rev() {
            for column in 0..3 {
                let lit = layers[layer.index()] & (1 << (row * 3 + column)) != 0;
                write!(out, "{} ", if lit { '#' } else { '.' })?;
            }
            write!(out, " ")?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Background refresh tick of the simulated cube.
pub struct Refresh {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<u64>,
}

impl Refresh {
    /// Starts ticking at the given rate.
    pub fn spawn(tick_rate: Hertz) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let period = Duration::from(tick_rate);
        let redraw_every = u64::from((tick_rate.0 / REDRAW_RATE).max(1));

        let handle = std::thread::spawn({
            let stop = stop.clone();
            move || {
                let mut scheduler = RefreshScheduler::new();
                let mut output = LatchOutput::default();
                let mut drawn = None;
                let mut draw_failed = false;

                let mut ticks = 0;
                while !stop.load(Ordering::Relaxed) {
                    scheduler.tick(&BUFFER, &COUNTDOWN, &mut output);
                    ticks += 1;

                    if ticks % redraw_every == 0 && drawn != Some(output.layers) {
                        if let Err(err) = draw(&output.layers) {
                            if !draw_failed {
                                log::warn!("Unable to draw the cube: {}", err);
                                draw_failed = true;
                            }
                        }
                        drawn = Some(output.layers);
                    }
                    std::thread::sleep(period);
                }
                ticks
            }
        });

        Self { stop, handle }
    }

    /// Stops the tick and returns the number of ticks done.
    pub fn stop(self) -> u64 {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.join().unwrap_or_default()
    }
}
