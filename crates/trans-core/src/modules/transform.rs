use crate::common::constants::PI_A0_SQUARED;
use crate::domain::{
    ConvolutionResult, Provenance, QuantityKind, Series, TransError, TransResult, TransitionPair,
};
use crate::numerics::{ConvolutionError, GaussianSmoothingInput, smooth_gaussian};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformedSeries {
    pub series: Series,
    pub convolution: Option<ConvolutionResult>,
}

impl TransformedSeries {
    pub const fn is_smoothed(&self) -> bool {
        self.convolution.is_some()
    }
}

/// Cross-section conversion followed by Gaussian smoothing, each optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transformer {
    statistical_weight: Option<u32>,
    convolution_width: Option<f64>,
}

impl Transformer {
    pub const fn new(statistical_weight: Option<u32>, convolution_width: Option<f64>) -> Self {
        Self {
            statistical_weight,
            convolution_width,
        }
    }

    pub fn apply(&self, series: &Series, origin: &str) -> TransResult<TransformedSeries> {
        let mut current = series.clone();

        if let Some(weight) = self.statistical_weight {
            current = convert_to_cross_section(&current, weight, origin)?;
        }

        let convolution = match self.convolution_width {
            Some(width) => {
                let result = convolve_series(&current, width, origin)?;
                current = result.series.clone();
                Some(result)
            }
            None => None,
        };

        Ok(TransformedSeries {
            series: current,
            convolution,
        })
    }
}

/// `sigma = pi a0^2 * omega / (g * E)` in cm^2.
pub fn convert_to_cross_section(series: &Series, weight: u32, origin: &str) -> TransResult<Series> {
    let weight = f64::from(weight);
    let mut cross_sections = Vec::with_capacity(series.len());

    for (index, (energy, omega)) in series.points().enumerate() {
        let denominator = weight * energy;
        if denominator == 0.0 {
            return Err(TransError::numeric(
                "RUN.XSEC_DIVIDE_BY_ZERO",
                format!(
                    "'{}': cross-section conversion divides by zero at sample {} (x={}, g={})",
                    origin, index, energy, weight
                ),
            ));
        }
        cross_sections.push(PI_A0_SQUARED * omega / denominator);
    }

    Series::new(series.x().to_vec(), cross_sections)
}

pub fn convolve_series(series: &Series, fwhm: f64, origin: &str) -> TransResult<ConvolutionResult> {
    let smoothed = smooth_gaussian(GaussianSmoothingInput::new(series.x(), series.y(), fwhm))
        .map_err(|error| convolution_error(origin, error))?;
    tracing::debug!(
        origin,
        padding = smoothed.padding_len,
        kernel = smoothed.kernel_len,
        "gaussian smoothing applied"
    );

    Ok(ConvolutionResult {
        series: Series::new(smoothed.energies, smoothed.values)?,
        padding_len: smoothed.padding_len,
        kernel_len: smoothed.kernel_len,
    })
}

fn convolution_error(origin: &str, error: ConvolutionError) -> TransError {
    TransError::numeric("RUN.CONVOLUTION", format!("'{}': {}", origin, error))
}

/// Writes smoothed series as two-column text next to the other outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvolutionArtifactWriter {
    output_dir: PathBuf,
    quantity: QuantityKind,
}

impl ConvolutionArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>, quantity: QuantityKind) -> Self {
        Self {
            output_dir: output_dir.into(),
            quantity,
        }
    }

    /// `{om|ups}-{lower}_{upper}-CONV_{provenance}`
    pub fn artifact_name(&self, pair: &TransitionPair, provenance: &Provenance) -> String {
        format!("{}-CONV_{}", pair.file_stem(self.quantity), provenance.tag())
    }

    pub fn write(
        &self,
        pair: &TransitionPair,
        provenance: &Provenance,
        result: &ConvolutionResult,
    ) -> TransResult<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|source| {
            TransError::io_system(
                "IO.CONVOLUTION_OUTPUT_DIRECTORY",
                format!(
                    "failed to create output directory '{}': {}",
                    self.output_dir.display(),
                    source
                ),
            )
        })?;

        let path = self.output_dir.join(self.artifact_name(pair, provenance));
        write_two_column_table(&path, &result.series)?;
        Ok(path)
    }
}

fn write_two_column_table(path: &Path, series: &Series) -> TransResult<()> {
    let mut content = String::with_capacity(series.len() * 52);
    for (x, y) in series.points() {
        let _ = writeln!(content, "{} {}", format_scientific(x), format_scientific(y));
    }

    fs::write(path, content).map_err(|source| {
        TransError::io_system(
            "IO.CONVOLUTION_OUTPUT_WRITE",
            format!(
                "failed to write convolution artifact '{}': {}",
                path.display(),
                source
            ),
        )
    })
}

/// C-style `%.18e`, e.g. `1.500000000000000000e+00`.
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.18e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let exponent = exponent.parse::<i32>().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}
