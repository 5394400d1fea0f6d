use super::labels::{AxisLabels, axis_labels, transition_title};
use super::loader::SeriesLoader;
use super::range::{LogAxisBounds, RangeAccumulator};
use super::resolver::FileResolver;
use super::style::{SeriesStyle, StyleCycle};
use super::transform::{ConvolutionArtifactWriter, Transformer};
use crate::common::constants::UNSMOOTHED_OMEGA_OPACITY;
use crate::common::{LegendLocation, LevelLabels, PlotOptions};
use crate::domain::{QuantityKind, Series, TransResult, TransitionPair};
use std::path::PathBuf;

/// One curve of a figure, in plotting order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub label: String,
    pub series: Series,
    pub style: SeriesStyle,
    pub source: PathBuf,
    pub artifact: Option<PathBuf>,
}

/// Everything a sink needs to render the overlay of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionFigure {
    pub pair: TransitionPair,
    pub quantity: QuantityKind,
    pub title: String,
    pub axis_labels: AxisLabels,
    pub series: Vec<PlottedSeries>,
    pub log_x: bool,
    pub log_y: bool,
    pub bounds: LogAxisBounds,
    pub legend_location: LegendLocation,
}

impl TransitionFigure {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn file_stem(&self) -> String {
        self.pair.file_stem(self.quantity)
    }
}

/// Sink for finished figures. `finish` runs once after the last figure.
pub trait PlotEmitter {
    fn emit(&mut self, figure: &TransitionFigure) -> TransResult<()>;

    fn finish(&mut self) -> TransResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub figures: usize,
    pub series: usize,
    pub artifacts: Vec<PathBuf>,
    pub empty_transitions: Vec<TransitionPair>,
}

#[derive(Debug, Clone)]
pub struct OverlayPipeline {
    options: PlotOptions,
    labels: LevelLabels,
    resolver: FileResolver,
    loader: SeriesLoader,
    transformer: Transformer,
    artifacts: ConvolutionArtifactWriter,
}

impl OverlayPipeline {
    pub fn new(options: PlotOptions, labels: LevelLabels) -> TransResult<Self> {
        options.validate()?;

        Ok(Self {
            resolver: FileResolver::new(&options.data_dir, options.quantity, options.scaled),
            loader: SeriesLoader::new(options.quantity, options.scaled),
            transformer: Transformer::new(options.statistical_weight, options.convolution_width),
            artifacts: ConvolutionArtifactWriter::new(&options.artifact_dir, options.quantity),
            options,
            labels,
        })
    }

    /// Builds every figure first and only then hands them to the sink, so a
    /// failing transition leaves no partial set of figures behind.
    pub fn run<E>(&self, pairs: &[TransitionPair], emitter: &mut E) -> TransResult<RunSummary>
    where
        E: PlotEmitter + ?Sized,
    {
        let mut summary = RunSummary::default();
        let mut figures = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let figure = self.build_figure(pair)?;
            if figure.is_empty() {
                summary.empty_transitions.push(pair.clone());
            }
            summary.series += figure.series.len();
            summary.artifacts.extend(
                figure
                    .series
                    .iter()
                    .filter_map(|plotted| plotted.artifact.clone()),
            );
            figures.push(figure);
        }

        for figure in &figures {
            emitter.emit(figure)?;
            summary.figures += 1;
        }
        emitter.finish()?;

        Ok(summary)
    }

    pub fn build_figure(&self, pair: &TransitionPair) -> TransResult<TransitionFigure> {
        let files = self.resolver.resolve(pair)?;
        if files.is_empty() {
            tracing::warn!(
                transition = %pair,
                pattern = %self.resolver.pattern(pair),
                data_dir = %self.resolver.data_dir().display(),
                "no result files matched"
            );
        } else {
            tracing::info!(transition = %pair, files = files.len(), "processing transition");
        }

        let mut styles = StyleCycle::new();
        let mut ranges = RangeAccumulator::new(self.options.log_x, self.options.log_y);
        let mut plotted = Vec::with_capacity(files.len());

        for path in files.iter().rev() {
            let loaded = self.loader.load(path)?;
            let origin = path.display().to_string();
            let transformed = self.transformer.apply(&loaded.series, &origin)?;

            let artifact = match &transformed.convolution {
                Some(result) => Some(self.artifacts.write(pair, &loaded.provenance, result)?),
                None => None,
            };

            let opacity =
                if self.options.quantity == QuantityKind::Omega && !transformed.is_smoothed() {
                    UNSMOOTHED_OMEGA_OPACITY
                } else {
                    1.0
                };

            if ranges.is_active() {
                ranges.observe(&transformed.series);
            }

            tracing::info!(
                file = %origin,
                provenance = %loaded.provenance,
                points = transformed.series.len(),
                "series ready"
            );

            plotted.push(PlottedSeries {
                label: loaded.provenance.tag().to_string(),
                series: transformed.series,
                style: styles.next_style(opacity),
                source: loaded.source,
                artifact,
            });
        }

        Ok(TransitionFigure {
            pair: pair.clone(),
            quantity: self.options.quantity,
            title: transition_title(pair, &self.labels),
            axis_labels: axis_labels(
                self.options.quantity,
                self.options.scaled,
                self.options.converts_to_cross_section(),
            ),
            series: plotted,
            log_x: self.options.log_x,
            log_y: self.options.log_y,
            bounds: ranges.finish(),
            legend_location: self.options.legend_location,
        })
    }
}
