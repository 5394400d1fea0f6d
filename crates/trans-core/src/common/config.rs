use crate::domain::{QuantityKind, ScaledMode, TransError, TransResult};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub quantity: QuantityKind,
    pub scaled: ScaledMode,
    /// Gaussian FWHM in Ryd; `None` disables smoothing.
    pub convolution_width: Option<f64>,
    /// Statistical weight of the initial level; `None` keeps collision strengths.
    pub statistical_weight: Option<u32>,
    pub log_x: bool,
    pub log_y: bool,
    pub legend_location: LegendLocation,
    pub data_dir: PathBuf,
    pub artifact_dir: PathBuf,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            quantity: QuantityKind::Omega,
            scaled: ScaledMode::Unscaled,
            convolution_width: None,
            statistical_weight: None,
            log_x: false,
            log_y: false,
            legend_location: LegendLocation::default(),
            data_dir: PathBuf::from("."),
            artifact_dir: PathBuf::from("."),
        }
    }
}

impl PlotOptions {
    pub fn validate(&self) -> TransResult<()> {
        if let Some(width) = self.convolution_width
            && (!width.is_finite() || width <= 0.0)
        {
            return Err(TransError::format(
                "INPUT.CONVOLUTION_WIDTH",
                format!("convolution width must be finite and > 0, got {}", width),
            ));
        }

        if self.statistical_weight == Some(0) {
            return Err(TransError::format(
                "INPUT.STATISTICAL_WEIGHT",
                "statistical weight must be a positive integer, got 0",
            ));
        }

        Ok(())
    }

    pub const fn converts_to_cross_section(&self) -> bool {
        self.statistical_weight.is_some()
    }

}

/// Legend anchor, named the way matplotlib names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegendLocation {
    Best,
    UpperRight,
    #[default]
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl LegendLocation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::UpperRight => "upper right",
            Self::UpperLeft => "upper left",
            Self::LowerLeft => "lower left",
            Self::LowerRight => "lower right",
            Self::Right => "right",
            Self::CenterLeft => "center left",
            Self::CenterRight => "center right",
            Self::LowerCenter => "lower center",
            Self::UpperCenter => "upper center",
            Self::Center => "center",
        }
    }
}

impl FromStr for LegendLocation {
    type Err = TransError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        let location = match normalized.as_str() {
            "best" => Self::Best,
            "upper right" => Self::UpperRight,
            "upper left" => Self::UpperLeft,
            "lower left" => Self::LowerLeft,
            "lower right" => Self::LowerRight,
            "right" => Self::Right,
            "center left" => Self::CenterLeft,
            "center right" => Self::CenterRight,
            "lower center" => Self::LowerCenter,
            "upper center" => Self::UpperCenter,
            "center" => Self::Center,
            _ => {
                return Err(TransError::format(
                    "INPUT.LEGEND_LOCATION",
                    format!("unknown legend location '{}'", token),
                ));
            }
        };
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::{LegendLocation, PlotOptions};
    use crate::domain::TransErrorCategory;

    #[test]
    fn defaults_match_plain_omega_plot() {
        let options = PlotOptions::default();
        options.validate().expect("defaults should validate");
        assert!(options.convolution_width.is_none());
        assert!(!options.converts_to_cross_section());
        assert!(!options.log_x && !options.log_y);
        assert_eq!(options.legend_location, LegendLocation::UpperLeft);
    }

    #[test]
    fn validate_rejects_degenerate_transform_parameters() {
        let options = PlotOptions {
            convolution_width: Some(0.0),
            ..PlotOptions::default()
        };
        let error = options.validate().expect_err("zero width should fail");
        assert_eq!(error.category(), TransErrorCategory::FormatError);
        assert_eq!(error.placeholder(), "INPUT.CONVOLUTION_WIDTH");

        let options = PlotOptions {
            statistical_weight: Some(0),
            ..PlotOptions::default()
        };
        let error = options.validate().expect_err("zero weight should fail");
        assert_eq!(error.placeholder(), "INPUT.STATISTICAL_WEIGHT");
    }

    #[test]
    fn legend_location_parses_matplotlib_names() {
        assert_eq!(
            "Lower  Right".parse::<LegendLocation>().expect("known location"),
            LegendLocation::LowerRight
        );
        assert_eq!(LegendLocation::CenterLeft.as_str(), "center left");
        assert!("nowhere".parse::<LegendLocation>().is_err());
    }
}
