//! PNG export of the four plots
//!
//! Lays the plots out on a 2×2 grid: AM time and spectrum on top, FM time
//! and spectrum below. Each plot is drawn inside the viewport handed in, so a
//! zoomed session exports what it currently shows.

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use snafu::Snafu;
use tracing::info;

use crate::session::{Frame, PlotId, SpectrumTrace, TimeTrace};
use crate::viewport::ViewportBounds;

const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);
const FOREST_GREEN: RGBColor = RGBColor(34, 139, 34);
const SIGNAL_GREEN: RGBColor = RGBColor(0, 128, 0);

#[derive(Debug, Snafu)]
pub enum RenderError {
    #[snafu(display("failed to draw plot: {source}"))]
    Draw { source: Box<dyn Error + Send + Sync> },
}

fn draw_err<E: Error + Send + Sync + 'static>(err: E) -> RenderError {
    RenderError::Draw { source: Box::new(err) }
}

/// Line styling and labels of one time-domain plot
struct TimeStyle<'a> {
    title: String,
    message_label: &'a str,
    signal_label: &'a str,
    signal_color: RGBColor,
    legend_position: SeriesLabelPosition,
}

/// Draw `frame` as a PNG at `path`
///
/// `viewports` are in `PlotId::ALL` order, as returned by `Session::viewports`.
pub fn export_png<P: AsRef<Path>>(
    path: P,
    frame: &Frame,
    viewports: &[ViewportBounds; 4],
    size: (u32, u32),
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let panels = root.split_evenly((2, 2));
    for (plot, (area, bounds)) in PlotId::ALL.iter().zip(panels.iter().zip(viewports.iter())) {
        match plot {
            PlotId::AmTime => draw_time(
                area,
                &frame.am_time,
                bounds,
                TimeStyle {
                    title: format!("AM Modulation (μ={:.2})", frame.am_index),
                    message_label: "AM Message",
                    signal_label: "AM Signal",
                    signal_color: BLUE,
                    legend_position: SeriesLabelPosition::UpperRight,
                },
            )?,
            PlotId::AmSpectrum => draw_spectrum(area, &frame.am_spectrum, bounds, "AM Signal Spectrum", ROYAL_BLUE)?,
            PlotId::FmTime => draw_time(
                area,
                &frame.fm_time,
                bounds,
                TimeStyle {
                    title: format!("FM Modulation (β={:.2})", frame.fm_index),
                    message_label: "FM Message",
                    signal_label: "FM Signal",
                    signal_color: SIGNAL_GREEN,
                    legend_position: SeriesLabelPosition::LowerRight,
                },
            )?,
            PlotId::FmSpectrum => draw_spectrum(area, &frame.fm_spectrum, bounds, "FM Signal Spectrum", FOREST_GREEN)?,
        }
    }

    root.present().map_err(draw_err)?;
    info!(path = %path.display(), width = size.0, height = size.1, "plot exported");

    Ok(())
}

fn draw_time<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    trace: &TimeTrace,
    bounds: &ViewportBounds,
    style: TimeStyle<'_>,
) -> Result<(), RenderError>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(&style.title, ("sans-serif", 28).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x.min..bounds.x.max, bounds.y.min..bounds.y.max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Time (μs)")
        .y_desc("Amplitude")
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.3))
        .draw()
        .map_err(draw_err)?;

    let message = trace.time_us.iter().copied().zip(trace.message.iter().copied());
    chart
        .draw_series(LineSeries::new(message, RED.stroke_width(2)))
        .map_err(draw_err)?
        .label(style.message_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    let signal_color = style.signal_color;
    let signal = trace.time_us.iter().copied().zip(trace.signal.iter().copied());
    chart
        .draw_series(LineSeries::new(signal, signal_color.mix(0.7).stroke_width(1)))
        .map_err(draw_err)?
        .label(style.signal_label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], signal_color.mix(0.7).stroke_width(1)));

    chart
        .configure_series_labels()
        .position(style.legend_position)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

fn draw_spectrum<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    trace: &SpectrumTrace,
    bounds: &ViewportBounds,
    title: &str,
    color: RGBColor,
) -> Result<(), RenderError>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 28).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(bounds.x.min..bounds.x.max, bounds.y.min..bounds.y.max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Frequency (MHz)")
        .y_desc("Magnitude")
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.3))
        .draw()
        .map_err(draw_err)?;

    let points = trace.frequency_mhz.iter().copied().zip(trace.magnitude.iter().copied());
    chart
        .draw_series(LineSeries::new(points, color.stroke_width(2)))
        .map_err(draw_err)?;

    Ok(())
}
