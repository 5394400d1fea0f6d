use super::CliError;
use super::helpers::{RunReport, date_stamp, load_level_labels, write_report};
use super::render::{ConsoleFigureEmitter, PdfFigureEmitter};
use std::path::PathBuf;
use trans_core::common::{LegendLocation, PlotOptions};
use trans_core::domain::{QuantityKind, ScaledMode};
use trans_core::modules::{OverlayPipeline, parse_transition_pairs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum QuantityArg {
    /// Collision strengths (om-*.trns / om-*.burg)
    #[value(name = "om")]
    Omega,
    /// Effective collision strengths (ups-*.trns / ups-*.burg)
    #[value(name = "ups")]
    Upsilon,
}

impl From<QuantityArg> for QuantityKind {
    fn from(value: QuantityArg) -> Self {
        match value {
            QuantityArg::Omega => Self::Omega,
            QuantityArg::Upsilon => Self::Upsilon,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub(super) struct PlotArgs {
    /// Transitions as pairs of level indices, lower level then upper level
    #[arg(value_name = "LEVEL", required = true, num_args = 1.., allow_negative_numbers = true)]
    trans: Vec<String>,

    /// Plot Burgess-Tully scaled data (.burg files) instead of the raw results
    #[arg(short = 'b')]
    burgess_tully: bool,

    /// Quantity to plot
    #[arg(short = 't', value_enum, default_value = "om")]
    quantity: QuantityArg,

    /// Save one figure per transition, using this text as the file description
    #[arg(short = 'o', long = "outfile", value_name = "DESCRIPTION")]
    outfile: Option<String>,

    /// Legend location, e.g. "upper left" or "lower right"
    #[arg(short = 'l', long = "location", default_value = "upper left")]
    location: String,

    /// Log-scale the x axis
    #[arg(long)]
    logx: bool,

    /// Log-scale the y axis
    #[arg(long)]
    logy: bool,

    /// Smooth with a normalised Gaussian of this FWHM (Ryd)
    #[arg(
        short = 'c',
        long = "conv",
        value_name = "FWHM",
        num_args = 0..=1,
        default_missing_value = "2.205"
    )]
    conv: Option<f64>,

    /// Convert collision strengths to cross sections using this statistical weight
    #[arg(
        short = 'x',
        long = "xsec",
        value_name = "WEIGHT",
        num_args = 0..=1,
        default_missing_value = "1"
    )]
    xsec: Option<u32>,

    /// JSON object mapping level indices to term labels, used in figure titles
    #[arg(long, value_name = "JSON")]
    levels: Option<PathBuf>,

    /// Directory holding the result files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Directory for figures and convolution tables
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Write a JSON summary of the run to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

impl PlotArgs {
    fn plot_options(&self) -> Result<PlotOptions, CliError> {
        Ok(PlotOptions {
            quantity: self.quantity.into(),
            scaled: ScaledMode::from_flag(self.burgess_tully),
            convolution_width: self.conv,
            statistical_weight: self.xsec,
            log_x: self.logx,
            log_y: self.logy,
            legend_location: self.location.parse::<LegendLocation>()?,
            data_dir: self.data_dir.clone(),
            artifact_dir: self.output_dir.clone(),
        })
    }
}

pub(super) fn run_plot_command(args: PlotArgs) -> Result<i32, CliError> {
    let pairs = parse_transition_pairs(&args.trans)?;
    let options = args.plot_options()?;
    let labels = load_level_labels(args.levels.as_deref())?;
    let pipeline = OverlayPipeline::new(options, labels)?;

    let (summary, sink) = match &args.outfile {
        Some(description) => {
            let mut emitter = PdfFigureEmitter::new(&args.output_dir, description, date_stamp());
            let summary = pipeline.run(&pairs, &mut emitter)?;
            (summary, "pdf")
        }
        None => {
            let stdout = std::io::stdout();
            let mut emitter = ConsoleFigureEmitter::new(stdout.lock());
            let summary = pipeline.run(&pairs, &mut emitter)?;
            (summary, "console")
        }
    };

    tracing::info!(
        figures = summary.figures,
        series = summary.series,
        artifacts = summary.artifacts.len(),
        "run complete"
    );

    if let Some(path) = &args.report {
        write_report(path, &RunReport::new(&pairs, &summary, sink))?;
    }

    Ok(0)
}
