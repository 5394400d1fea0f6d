//! Figure sinks: PDF files for save mode, a plain-text summary otherwise.
//!
//! Figures are drawn with plotters into an in-memory SVG document, which
//! svg2pdf then converts into a single-page PDF.

use super::helpers::figure_file_name;
use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use plotters_backend::{BackendCoord, DrawingErrorKind};
use std::error::Error;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use trans_core::common::LegendLocation;
use trans_core::domain::{AxisRange, TransError, TransResult};
use trans_core::modules::{LineStyle, PlotEmitter, PlottedSeries, TransitionFigure};

/// A4 landscape (11.89 x 8.27 in) at `FIGURE_DPI`.
const FIGURE_SIZE_PX: (u32, u32) = (1189, 827);
const FIGURE_DPI: f32 = 100.0;
const LINE_WIDTH: u32 = 2;
const LINEAR_MARGIN_FRACTION: f64 = 0.05;
/// Dash, gap, dot, gap (px).
const DASH_DOT_PATTERN_PX: [f64; 4] = [12.0, 5.0, 2.0, 5.0];

pub(super) struct PdfFigureEmitter {
    output_dir: PathBuf,
    description: String,
    date: String,
    written: Vec<PathBuf>,
}

impl PdfFigureEmitter {
    pub(super) fn new(
        output_dir: impl Into<PathBuf>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            description: description.into(),
            date: date.into(),
            written: Vec::new(),
        }
    }

    pub(super) fn figure_path(&self, figure: &TransitionFigure) -> PathBuf {
        self.output_dir.join(figure_file_name(
            &figure.file_stem(),
            &self.description,
            &self.date,
        ))
    }
}

impl PlotEmitter for PdfFigureEmitter {
    fn emit(&mut self, figure: &TransitionFigure) -> TransResult<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| {
            TransError::io_system(
                "IO.FIGURE_OUTPUT_DIRECTORY",
                format!(
                    "failed to create figure directory '{}': {}",
                    self.output_dir.display(),
                    source
                ),
            )
        })?;

        let path = self.figure_path(figure);
        write_pdf(&path, figure).map_err(|error| {
            TransError::io_system(
                "IO.FIGURE_WRITE",
                format!("failed to render figure '{}': {}", path.display(), error),
            )
        })?;

        tracing::info!(transition = %figure.pair, path = %path.display(), "figure written");
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> TransResult<()> {
        tracing::debug!(figures = self.written.len(), "all figures saved");
        Ok(())
    }
}

fn write_pdf(path: &Path, figure: &TransitionFigure) -> Result<(), Box<dyn Error>> {
    let svg = render_svg(figure)?;
    let pdf = svg_to_pdf(&svg)?;
    fs::write(path, pdf)?;
    Ok(())
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)?;

    let mut page = svg2pdf::PageOptions::default();
    page.dpi = FIGURE_DPI;
    let pdf = svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|error| format!("PDF conversion failed: {}", error))?;
    Ok(pdf)
}

fn render_svg(figure: &TransitionFigure) -> Result<String, Box<dyn Error>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, FIGURE_SIZE_PX).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present()?;
    }
    Ok(svg)
}

fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    figure: &TransitionFigure,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let x = axis_extent(
        figure.series.iter().flat_map(|plotted| plotted.series.x().iter().copied()),
        figure.log_x,
        figure.bounds.x,
    );
    let y = axis_extent(
        figure.series.iter().flat_map(|plotted| plotted.series.y().iter().copied()),
        figure.log_y,
        figure.bounds.y,
    );

    match (figure.log_x, figure.log_y) {
        (false, false) => draw_overlay(root, figure, x, y)?,
        (true, false) => draw_overlay(root, figure, x.log_scale(), y)?,
        (false, true) => draw_overlay(root, figure, x, y.log_scale())?,
        (true, true) => draw_overlay(root, figure, x.log_scale(), y.log_scale())?,
    }
    Ok(())
}

fn draw_overlay<DB, X, Y>(
    root: &DrawingArea<DB, Shift>,
    figure: &TransitionFigure,
    x_range: X,
    y_range: Y,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(figure.axis_labels.x)
        .y_desc(figure.axis_labels.y)
        .draw()?;

    for plotted in &figure.series {
        let (red, green, blue) = plotted.style.color.rgb();
        let stroke = RGBColor(red, green, blue)
            .mix(plotted.style.opacity)
            .stroke_width(LINE_WIDTH);
        let points = drawable_points(plotted, figure.log_x, figure.log_y);

        let annotation = match plotted.style.line {
            LineStyle::Solid => chart.draw_series(LineSeries::new(points, stroke))?,
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(points, 12, 6, stroke))?,
            LineStyle::DashDot => {
                chart.draw_series(std::iter::once(DashDotPath::new(points, stroke)))?
            }
            LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(points, 2, 4, stroke))?,
            LineStyle::HorizontalTick => chart.draw_series(points.into_iter().map(|point| {
                EmptyElement::at(point) + PathElement::new(vec![(-5, 0), (5, 0)], stroke)
            }))?,
        };
        annotation
            .label(plotted.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
    }

    if !figure.is_empty() {
        chart
            .configure_series_labels()
            .position(legend_position(figure.legend_location))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// Polyline stroked with `DASH_DOT_PATTERN_PX`, measured along the path in
/// backend pixels.
struct DashDotPath {
    points: Vec<(f64, f64)>,
    style: ShapeStyle,
}

impl DashDotPath {
    fn new(points: Vec<(f64, f64)>, style: ShapeStyle) -> Self {
        Self { points, style }
    }
}

impl<'a> PointCollection<'a, (f64, f64)> for &'a DashDotPath {
    type Point = &'a (f64, f64);
    type IntoIter = &'a [(f64, f64)];

    fn point_iter(self) -> Self::IntoIter {
        &self.points
    }
}

impl<DB: DrawingBackend> Drawable<DB> for DashDotPath {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        points: I,
        backend: &mut DB,
        _: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let pixels = points
            .map(|(x, y)| (f64::from(x), f64::from(y)))
            .collect::<Vec<_>>();
        for stroke in dash_pattern_strokes(&pixels, &DASH_DOT_PATTERN_PX) {
            let path = stroke
                .into_iter()
                .map(|(x, y)| (x.round() as i32, y.round() as i32))
                .collect::<Vec<_>>();
            backend.draw_path(path, &self.style)?;
        }
        Ok(())
    }
}

/// Splits a polyline into the visible strokes of a repeating on/off pattern.
/// Even entries of `pattern` are drawn, odd entries are gaps; all entries
/// must be positive.
fn dash_pattern_strokes(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut strokes = Vec::new();
    let Some(&first) = points.first() else {
        return strokes;
    };
    if pattern.is_empty() || !pattern.iter().all(|length| *length > 0.0) {
        return strokes;
    }

    let mut phase = 0;
    let mut remaining = pattern[0];
    let mut current = vec![first];

    for window in points.windows(2) {
        let (mut start, end) = (window[0], window[1]);
        loop {
            let distance = (end.0 - start.0).hypot(end.1 - start.1);
            if distance == 0.0 {
                break;
            }
            let drawing = phase % 2 == 0;
            if distance < remaining {
                remaining -= distance;
                if drawing {
                    current.push(end);
                }
                break;
            }

            let t = remaining / distance;
            let split = (start.0 + (end.0 - start.0) * t, start.1 + (end.1 - start.1) * t);
            current.push(split);
            if drawing {
                strokes.push(std::mem::take(&mut current));
            }
            phase = (phase + 1) % pattern.len();
            remaining = pattern[phase];
            start = split;
        }
    }

    if phase % 2 == 0 && current.len() > 1 {
        strokes.push(current);
    }
    strokes
}

/// Log axes cannot show non-positive samples; those points are dropped.
fn drawable_points(plotted: &PlottedSeries, log_x: bool, log_y: bool) -> Vec<(f64, f64)> {
    plotted
        .series
        .points()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .filter(|(x, y)| (!log_x || *x > 0.0) && (!log_y || *y > 0.0))
        .collect()
}

/// Display range for one axis. Log axes take the padded bounds, with a
/// non-positive lower limit replaced by a decade below the smallest positive
/// sample.
fn axis_extent(
    values: impl Iterator<Item = f64>,
    log: bool,
    padded: Option<AxisRange>,
) -> Range<f64> {
    let finite = values
        .filter(|value| value.is_finite() && (!log || *value > 0.0))
        .collect::<Vec<_>>();
    let observed = finite.iter().copied().fold(None, |range: Option<AxisRange>, value| {
        Some(match range {
            Some(range) => AxisRange {
                min: range.min.min(value),
                max: range.max.max(value),
            },
            None => AxisRange {
                min: value,
                max: value,
            },
        })
    });

    if log {
        let upper = padded
            .map(|bounds| bounds.max)
            .filter(|max| *max > 0.0)
            .or_else(|| observed.map(|range| range.max * 10.0))
            .unwrap_or(10.0);
        let lower = padded
            .map(|bounds| bounds.min)
            .filter(|min| *min > 0.0)
            .or_else(|| observed.map(|range| range.min / 10.0))
            .unwrap_or(upper / 1.0e3);
        return if lower < upper {
            lower..upper
        } else {
            lower..lower * 10.0
        };
    }

    match observed {
        Some(range) if range.max > range.min => {
            let margin = (range.max - range.min) * LINEAR_MARGIN_FRACTION;
            (range.min - margin)..(range.max + margin)
        }
        Some(range) => {
            let half_width = if range.min == 0.0 { 1.0 } else { range.min.abs() * 0.5 };
            (range.min - half_width)..(range.max + half_width)
        }
        None => 0.0..1.0,
    }
}

fn legend_position(location: LegendLocation) -> SeriesLabelPosition {
    match location {
        LegendLocation::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendLocation::UpperCenter => SeriesLabelPosition::UpperMiddle,
        LegendLocation::UpperRight | LegendLocation::Best => SeriesLabelPosition::UpperRight,
        LegendLocation::CenterLeft => SeriesLabelPosition::MiddleLeft,
        LegendLocation::Center => SeriesLabelPosition::MiddleMiddle,
        LegendLocation::CenterRight | LegendLocation::Right => SeriesLabelPosition::MiddleRight,
        LegendLocation::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendLocation::LowerCenter => SeriesLabelPosition::LowerMiddle,
        LegendLocation::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Prints each finished figure as a short text block.
pub(super) struct ConsoleFigureEmitter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleFigureEmitter<W> {
    pub(super) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_figure(&mut self, figure: &TransitionFigure) -> std::io::Result<()> {
        writeln!(self.out, "{} [{}]", figure.title, figure.file_stem())?;
        writeln!(
            self.out,
            "  x: {}{}",
            figure.axis_labels.x,
            log_suffix(figure.log_x, figure.bounds.x)
        )?;
        writeln!(
            self.out,
            "  y: {}{}",
            figure.axis_labels.y,
            log_suffix(figure.log_y, figure.bounds.y)
        )?;
        writeln!(self.out, "  legend: {}", figure.legend_location.as_str())?;

        if figure.is_empty() {
            writeln!(self.out, "  (no matching result files)")?;
        }
        for plotted in &figure.series {
            writeln!(
                self.out,
                "  {:<10} {:<6} {:<12} alpha={:.1} n={}{}",
                plotted.label,
                plotted.style.color.name(),
                plotted.style.line.name(),
                plotted.style.opacity,
                plotted.series.len(),
                series_extent(plotted)
            )?;
        }
        Ok(())
    }
}

impl<W: Write> PlotEmitter for ConsoleFigureEmitter<W> {
    fn emit(&mut self, figure: &TransitionFigure) -> TransResult<()> {
        self.write_figure(figure).map_err(console_error)
    }

    fn finish(&mut self) -> TransResult<()> {
        self.out.flush().map_err(console_error)
    }
}

fn console_error(source: std::io::Error) -> TransError {
    TransError::io_system(
        "IO.CONSOLE_WRITE",
        format!("failed to write figure summary: {}", source),
    )
}

fn log_suffix(log: bool, bounds: Option<AxisRange>) -> String {
    match (log, bounds) {
        (true, Some(bounds)) => format!(" (log, {:.4e}..{:.4e})", bounds.min, bounds.max),
        (true, None) => " (log)".to_string(),
        (false, _) => String::new(),
    }
}

fn series_extent(plotted: &PlottedSeries) -> String {
    let (x, y) = (plotted.series.x(), plotted.series.y());
    match (x.first(), x.last(), y.first(), y.last()) {
        (Some(x_first), Some(x_last), Some(y_first), Some(y_last)) => format!(
            "  x=[{:.4e}..{:.4e}]  y=[{:.4e}..{:.4e}]",
            x_first, x_last, y_first, y_last
        ),
        _ => String::new(),
    }
}
