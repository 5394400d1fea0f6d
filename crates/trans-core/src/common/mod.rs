pub mod config;
pub mod constants;
pub mod levels;

pub use config::{LegendLocation, PlotOptions};
pub use levels::LevelLabels;
