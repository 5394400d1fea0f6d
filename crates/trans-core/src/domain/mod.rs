pub mod errors;

pub use errors::{
    ExitStatusPlaceholder, FormatResult, ParseResult, TransError, TransErrorCategory, TransResult,
};

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantityKind {
    #[default]
    Omega,
    Upsilon,
}

impl QuantityKind {
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Omega => "om",
            Self::Upsilon => "ups",
        }
    }

    pub fn from_prefix(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "om" => Some(Self::Omega),
            "ups" => Some(Self::Upsilon),
            _ => None,
        }
    }
}

impl Display for QuantityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).file_prefix())
    }
}

/// Raw result tables versus Burgess-Tully reduced-variable tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaledMode {
    #[default]
    Unscaled,
    BurgessTully,
}

impl ScaledMode {
    pub const fn from_flag(scaled: bool) -> Self {
        if scaled {
            Self::BurgessTully
        } else {
            Self::Unscaled
        }
    }

    pub const fn is_scaled(self) -> bool {
        matches!(self, Self::BurgessTully)
    }

    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Unscaled => "trns",
            Self::BurgessTully => "burg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPair {
    lower_token: String,
    upper_token: String,
    lower: u32,
    upper: u32,
}

impl TransitionPair {
    pub fn new(
        lower_token: impl Into<String>,
        upper_token: impl Into<String>,
        lower: u32,
        upper: u32,
    ) -> Self {
        Self {
            lower_token: lower_token.into(),
            upper_token: upper_token.into(),
            lower,
            upper,
        }
    }

    pub fn lower_token(&self) -> &str {
        &self.lower_token
    }

    pub fn upper_token(&self) -> &str {
        &self.upper_token
    }

    pub const fn lower(&self) -> u32 {
        self.lower
    }

    pub const fn upper(&self) -> u32 {
        self.upper
    }

    /// `{prefix}-{lower}_{upper}`, the shared stem of every file for this transition.
    pub fn file_stem(&self, kind: QuantityKind) -> String {
        format!(
            "{}-{}_{}",
            kind.file_prefix(),
            self.lower_token,
            self.upper_token
        )
    }
}

impl Display for TransitionPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lower_token, self.upper_token)
    }
}

pub const AS_DW_TAG: &str = "AS_DW";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    AsDw,
    Other(String),
}

impl Provenance {
    pub fn from_tag(tag: &str) -> Self {
        if tag == AS_DW_TAG {
            Self::AsDw
        } else {
            Self::Other(tag.to_string())
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::AsDw => AS_DW_TAG,
            Self::Other(tag) => tag,
        }
    }

    pub const fn is_as_dw(&self) -> bool {
        matches!(self, Self::AsDw)
    }
}

impl Display for Provenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> TransResult<Self> {
        if x.len() != y.len() {
            return Err(TransError::internal(
                "RUN.SERIES_SHAPE",
                format!(
                    "series columns must have equal length, got x={} y={}",
                    x.len(),
                    y.len()
                ),
            ));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn map_x(self, mut transform: impl FnMut(f64) -> f64) -> Self {
        Self {
            x: self.x.into_iter().map(&mut transform).collect(),
            y: self.y,
        }
    }
}

/// Smoothed series on the padded grid; the first `padding_len` samples are the
/// synthesized zero region below the first retained energy.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionResult {
    pub series: Series,
    pub padding_len: usize,
    pub kernel_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::{Provenance, QuantityKind, ScaledMode, Series, TransitionPair};

    #[test]
    fn file_stem_uses_original_level_tokens() {
        let pair = TransitionPair::new("002", "3", 2, 3);
        assert_eq!(pair.file_stem(QuantityKind::Omega), "om-002_3");
        assert_eq!(pair.file_stem(QuantityKind::Upsilon), "ups-002_3");
        assert_eq!(pair.to_string(), "002-3");
    }

    #[test]
    fn scaled_mode_selects_extension() {
        assert_eq!(ScaledMode::from_flag(false).file_extension(), "trns");
        assert_eq!(ScaledMode::from_flag(true).file_extension(), "burg");
        assert!(ScaledMode::BurgessTully.is_scaled());
    }

    #[test]
    fn provenance_distinguishes_as_dw() {
        assert!(Provenance::from_tag("AS_DW").is_as_dw());
        assert!(!Provenance::from_tag("as_dw").is_as_dw());
        assert_eq!(Provenance::from_tag("ICFT").tag(), "ICFT");
    }

    #[test]
    fn series_rejects_mismatched_columns() {
        let error = Series::new(vec![1.0, 2.0], vec![1.0]).expect_err("shape mismatch");
        assert_eq!(error.placeholder(), "RUN.SERIES_SHAPE");
        assert_eq!(QuantityKind::from_prefix("UPS"), Some(QuantityKind::Upsilon));
    }
}
