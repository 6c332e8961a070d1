//! AM/FM modulation visualizer
//!
//! Applies slider, parameter and scroll-zoom events to a session, prints a
//! summary of the resulting plots and optionally saves them as a PNG.
//!
//! Examples:
//!   # Default parameters, save the four plots
//!   modsim --output modulation.png
//!
//!   # Overmodulated AM, wide FM, zoomed into the AM spectrum around the carrier
//!   modsim --am-index 1.3 --fm-index 12 --zoom am-spectrum:20,50:in --zoom am-spectrum:20,50:in -o zoomed.png

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use snafu::{ResultExt, Snafu};
use tracing::error;

use modsim::constants::{HZ_PER_KHZ, HZ_PER_MHZ};
use modsim::render::export_png;
use modsim::session::ParsePlotIdError;
use modsim::viewport::ParseZoomDirectionError;
use modsim::tracing_init::init_tracing;
use modsim::{FrequencyInput, PlotId, Session, SimulationConfig, ZoomDirection, ZoomEvent};

/// AM and FM modulation simulator
#[derive(Parser)]
#[command(name = "modsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AM modulation index μ (slider range 0 to 1.5)
    #[arg(long)]
    am_index: Option<f64>,

    /// FM modulation index β (slider range 0 to 15)
    #[arg(long)]
    fm_index: Option<f64>,

    /// AM message frequency in kHz
    #[arg(long)]
    am_message_khz: Option<String>,

    /// FM message frequency in kHz
    #[arg(long)]
    fm_message_khz: Option<String>,

    /// Carrier frequency in MHz, shared by AM and FM
    #[arg(long)]
    carrier_mhz: Option<String>,

    /// Scroll tick over a plot: <plot>:<x>,<y>:<in|out>, in plot units (µs or MHz)
    #[arg(long = "zoom", value_name = "PLOT:X,Y:DIR")]
    zooms: Vec<ScrollArg>,

    /// Reset indices and zoom after applying the other options
    #[arg(long)]
    reset: bool,

    /// Save the plots to this PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Debug, Snafu)]
enum ParseScrollError {
    #[snafu(display("expected PLOT:X,Y:DIR, got \"{value}\""))]
    InvalidFormat { value: String },

    #[snafu(display("cursor must be two numbers X,Y, got \"{value}\""))]
    InvalidCursor { value: String },

    #[snafu(display("{source}"))]
    Plot { source: ParsePlotIdError },

    #[snafu(display("{source}"))]
    Direction { source: ParseZoomDirectionError },
}

/// A scroll event given on the command line
#[derive(Debug, Clone)]
struct ScrollArg {
    plot: PlotId,
    event: ZoomEvent,
}

impl FromStr for ScrollArg {
    type Err = ParseScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [plot, cursor, direction] = parts.as_slice() else {
            return InvalidFormatSnafu { value: s }.fail();
        };

        let invalid_cursor = || ParseScrollError::InvalidCursor { value: cursor.to_string() };
        let (x, y) = cursor.split_once(',').ok_or_else(invalid_cursor)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid_cursor())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid_cursor())?;

        Ok(ScrollArg {
            plot: plot.parse::<PlotId>().context(PlotSnafu)?,
            event: ZoomEvent {
                cursor: (x, y),
                direction: direction.parse::<ZoomDirection>().context(DirectionSnafu)?,
            },
        })
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = SimulationConfig::default();
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Some(value) = cli.am_index {
        report(session.set_am_index(value).map(|_| ()));
    }
    if let Some(value) = cli.fm_index {
        report(session.set_fm_index(value).map(|_| ()));
    }

    if cli.am_message_khz.is_some() || cli.fm_message_khz.is_some() || cli.carrier_mhz.is_some() {
        // Unedited fields keep their current text, as in the parameter form
        let am = session.am_parameters().message_frequency() / HZ_PER_KHZ;
        let fm = session.fm_parameters().message_frequency() / HZ_PER_KHZ;
        let carrier = session.am_parameters().carrier_frequency() / HZ_PER_MHZ;
        let am_text = cli.am_message_khz.clone().unwrap_or_else(|| am.to_string());
        let fm_text = cli.fm_message_khz.clone().unwrap_or_else(|| fm.to_string());
        let carrier_text = cli.carrier_mhz.clone().unwrap_or_else(|| carrier.to_string());

        report(session.update_frequencies(&FrequencyInput {
            am_message_khz: &am_text,
            fm_message_khz: &fm_text,
            carrier_mhz: &carrier_text,
        }));
    }

    let mut frame = match session.frame() {
        Ok(frame) => frame,
        Err(err) => {
            error!(%err, "failed to compute plots");
            return ExitCode::FAILURE;
        }
    };

    for scroll in &cli.zooms {
        if session.scroll(scroll.plot, scroll.event, &frame).is_none() {
            eprintln!("Ignored zoom on {} at {:?}", scroll.plot, scroll.event.cursor);
        }
    }

    if cli.reset {
        session.reset();
        frame = match session.frame() {
            Ok(frame) => frame,
            Err(err) => {
                error!(%err, "failed to compute plots");
                return ExitCode::FAILURE;
            }
        };
    }

    print_summary(&session, &frame);

    if let Some(path) = &cli.output {
        let (default_width, default_height) = session.config().export_size;
        let size = (cli.width.unwrap_or(default_width), cli.height.unwrap_or(default_height));
        let viewports = session.viewports(&frame);

        if let Err(err) = export_png(path, &frame, &viewports, size) {
            error!(%err, path = %path.display(), "failed to save plot");
            return ExitCode::FAILURE;
        }
        println!("Plot saved to {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Rejected edits are reported and the previous values stay in effect
fn report(result: Result<(), modsim::SessionError>) {
    if let Err(err) = result {
        eprintln!("Invalid input: {}", err);
    }
}

fn print_summary(session: &Session, frame: &modsim::Frame) {
    let am = session.am_parameters();
    let fm = session.fm_parameters();

    println!("Carrier:            {:.3} MHz", frame.carrier_mhz);
    println!(
        "AM:                 μ={:.2}, message {:.1} kHz",
        frame.am_index,
        am.message_frequency() / HZ_PER_KHZ
    );
    println!(
        "FM:                 β={:.2}, message {:.1} kHz",
        frame.fm_index,
        fm.message_frequency() / HZ_PER_KHZ
    );

    for (label, trace) in [("AM spectrum peak", &frame.am_spectrum), ("FM spectrum peak", &frame.fm_spectrum)] {
        match trace.peak() {
            Some((mhz, magnitude)) => println!("{:<20}{:.4} MHz (|X| = {:.1})", format!("{}:", label), mhz, magnitude),
            None => println!("{:<20}-", format!("{}:", label)),
        }
    }

    println!();
    for plot in PlotId::ALL {
        let bounds = session.viewport(plot, frame);
        println!(
            "{:<12} x [{:.4}, {:.4}]  y [{:.4}, {:.4}]{}",
            plot.name(),
            bounds.x.min,
            bounds.x.max,
            bounds.y.min,
            bounds.y.max,
            if session.is_zoomed(plot) { "  (zoomed)" } else { "" }
        );
    }
}
