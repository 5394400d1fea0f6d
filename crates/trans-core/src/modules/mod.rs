pub mod labels;
pub mod loader;
pub mod pipeline;
pub mod range;
pub mod resolver;
pub mod style;
pub mod transform;
pub mod transition;

pub use labels::{AxisLabels, axis_labels, transition_title};
pub use loader::{LoadedSeries, SeriesLoader};
pub use pipeline::{OverlayPipeline, PlotEmitter, PlottedSeries, RunSummary, TransitionFigure};
pub use range::{LogAxisBounds, RangeAccumulator};
pub use resolver::FileResolver;
pub use style::{LineStyle, PaletteColor, SeriesStyle, StyleCycle};
pub use transform::{ConvolutionArtifactWriter, TransformedSeries, Transformer};
pub use transition::parse_transition_pairs;
