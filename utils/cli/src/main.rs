use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tricube_app::{movies, App, Configuration, PlaylistEntry};
use tricube_core::{Hertz, Layer, PackedFrame, PlayStyle};

use crate::sim::{Refresh, SimBoard};

mod sim;

/// Tricube LED cube simulator
///
/// A command line application that plays the built-in cube animations in the terminal
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = false)]
struct Cli {
    /// Refresh tick rate of the simulated board
    #[arg(short, long, default_value = "960", value_name = "Hz")]
    rate: Hertz,
    /// Actual command
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in movies
    List,
    /// Play a single movie
    Play {
        /// Movie name
        movie: String,
        /// Playback style, "sequence" or "drop-down"
        #[arg(short, long, default_value = "sequence")]
        style: PlayStyle,
        /// How many times to play the movie
        #[arg(short = 'n', long, default_value = "1")]
        repeat: u16,
    },
    /// Run the default show
    Show {
        /// Play the playlist once instead of forever
        #[arg(long)]
        once: bool,
    },
    /// Decode a packed frame
    Decode {
        /// Packed frame in hex
        frame: String,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let rate = cli.rate;
    match cli.command {
        Command::List => {
            for (id, movie) in movies::LIBRARY.iter().enumerate() {
                let sequence = movie.scan_cycles(PlayStyle::Sequence);
                let drop_down = movie.scan_cycles(PlayStyle::DropDown);
                println!(
                    "{id}: {:<8}{:>3} frames, {:>5} cycles as sequence, {:>5} cycles as drop-down",
                    movie.name(),
                    movie.len(),
                    sequence,
                    drop_down
                );
            }
        }
        Command::Play {
            movie,
            style,
            repeat,
        } => {
            let (id, _) = movies::by_name(&movie)
                .with_context(|| format!("There is no movie named \"{movie}\""))?;

            let mut config = Configuration::new(rate);
            config.push(PlaylistEntry {
                movie: id,
                style,
                repeat,
            })?;
            log::info!("Playing {} as {} at {} Hz", movie, style, rate);
            play(config, true)?;
        }
        Command::Show { once } => {
            let config = Configuration {
                tick_rate: rate,
                ..Configuration::default()
            };
            play(config, once)?;
        }
        Command::Decode { frame } => {
            let raw = u32::from_str_radix(frame.trim_start_matches("0x"), 16)
                .with_context(|| format!("Unable to parse frame \"{frame}\""))?;
            let frame = PackedFrame::from_raw(raw).unpack();

            for layer in Layer::ALL.into_iter().rev() {
                println!("{:<6} {:09b}", layer, frame.layer(layer));
            }
            println!(
                "delay  {} cycles, {:?} at {} Hz",
                frame.delay_ticks,
                frame.delay().at_rate(rate),
                rate
            );
        }

        Command::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }

    Ok(())
}

fn play(config: Configuration, once: bool) -> anyhow::Result<()> {
    let refresh = Refresh::spawn(config.tick_rate);
    let mut app = App::new(SimBoard::new(config))?;

    let result = if once { app.run_once() } else { app.run() };
    let ticks = refresh.stop();
    log::debug!("Stopped after {} refresh ticks", ticks);
    Ok(result?)
}
