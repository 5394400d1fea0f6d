use crate::common::constants::{
    FWHM_TO_SIGMA, KERNEL_HALF_WIDTH_SIGMAS, MAX_CONVOLUTION_SAMPLES,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSmoothingInput<'a> {
    pub energies: &'a [f64],
    pub values: &'a [f64],
    /// Full width at half maximum, in the energy unit of `energies`.
    pub fwhm: f64,
}

impl<'a> GaussianSmoothingInput<'a> {
    pub fn new(energies: &'a [f64], values: &'a [f64], fwhm: f64) -> Self {
        Self {
            energies,
            values,
            fwhm,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianSmoothing {
    pub energies: Vec<f64>,
    pub values: Vec<f64>,
    pub padding_len: usize,
    pub kernel_len: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvolutionError {
    #[error("gaussian smoothing requires at least 3 energy points, got {actual}")]
    InsufficientPoints { actual: usize },
    #[error("smoothing input length mismatch: energy={energy}, values={values}")]
    LengthMismatch { energy: usize, values: usize },
    #[error("energy spacing between samples 1 and 2 must be finite and > 0, got {spacing}")]
    InvalidSpacing { spacing: f64 },
    #[error("gaussian width must be finite and > 0, got {value}")]
    InvalidWidth { value: f64 },
    #[error("{what} needs {count} samples, above the limit of {limit}")]
    TooManySamples {
        what: &'static str,
        count: f64,
        limit: usize,
    },
}

pub const fn fwhm_to_standard_deviation(fwhm: f64) -> f64 {
    fwhm / FWHM_TO_SIGMA
}

/// Symmetric Gaussian sampled at `6 * floor(sdev / spacing) + 1` points on
/// `[-3 sdev, 3 sdev]`, normalized to unit sum. A single-point kernel is the
/// identity.
pub fn gaussian_kernel(sdev: f64, spacing: f64) -> Result<Vec<f64>, ConvolutionError> {
    if !sdev.is_finite() || sdev <= 0.0 {
        return Err(ConvolutionError::InvalidWidth { value: sdev });
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(ConvolutionError::InvalidSpacing { spacing });
    }

    let half_count = sample_count("gaussian kernel", (sdev / spacing).floor())?;
    let point_count = half_count
        .checked_mul(6)
        .and_then(|count| count.checked_add(1))
        .filter(|count| *count <= MAX_CONVOLUTION_SAMPLES)
        .ok_or(ConvolutionError::TooManySamples {
            what: "gaussian kernel",
            count: 6.0 * half_count as f64 + 1.0,
            limit: MAX_CONVOLUTION_SAMPLES,
        })?;
    if point_count == 1 {
        return Ok(vec![1.0]);
    }

    let start = -KERNEL_HALF_WIDTH_SIGMAS * sdev;
    let step = (2.0 * KERNEL_HALF_WIDTH_SIGMAS * sdev) / (point_count - 1) as f64;
    let two_variance = 2.0 * sdev * sdev;

    let mut kernel = (0..point_count)
        .map(|index| {
            let offset = if index == point_count - 1 {
                KERNEL_HALF_WIDTH_SIGMAS * sdev
            } else {
                start + step * index as f64
            };
            (-(offset * offset) / two_variance).exp()
        })
        .collect::<Vec<_>>();

    let total = kernel.iter().sum::<f64>();
    for weight in &mut kernel {
        *weight /= total;
    }

    Ok(kernel)
}

/// Discrete convolution truncated to the signal length and centred on the
/// kernel midpoint (`numpy.convolve(..., mode="same")` for kernels no longer
/// than the signal).
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let signal_len = signal.len();
    let kernel_len = kernel.len();
    if signal_len == 0 || kernel_len == 0 {
        return vec![0.0; signal_len];
    }

    let offset = (kernel_len - 1) / 2;
    (0..signal_len)
        .map(|index| {
            let full_index = index + offset;
            let first = full_index.saturating_sub(kernel_len - 1);
            let last = full_index.min(signal_len - 1);
            (first..=last)
                .map(|source| signal[source] * kernel[full_index - source])
                .sum()
        })
        .collect()
}

/// Drops the first sample and prepends `floor(x[1] / spacing)` zero-valued
/// samples evenly spaced on `[0, x[1])`, with `spacing = x[2] - x[1]`.
pub fn pad_from_zero_energy(
    energies: &[f64],
    values: &[f64],
) -> Result<(Vec<f64>, Vec<f64>, usize), ConvolutionError> {
    validate_samples(energies, values)?;

    let spacing = energies[2] - energies[1];
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(ConvolutionError::InvalidSpacing { spacing });
    }

    let first_retained = energies[1];
    let padding_len =
        sample_count("zero padding", (first_retained / spacing).floor().max(0.0))?;
    let padding_step = if padding_len > 0 {
        first_retained / padding_len as f64
    } else {
        0.0
    };

    let retained = energies.len() - 1;
    let total = padding_len
        .checked_add(retained)
        .filter(|count| *count <= MAX_CONVOLUTION_SAMPLES)
        .ok_or(ConvolutionError::TooManySamples {
            what: "padded signal",
            count: padding_len as f64 + retained as f64,
            limit: MAX_CONVOLUTION_SAMPLES,
        })?;
    let mut padded_energies = Vec::with_capacity(total);
    let mut padded_values = Vec::with_capacity(total);
    for index in 0..padding_len {
        padded_energies.push(padding_step * index as f64);
        padded_values.push(0.0);
    }
    padded_energies.extend_from_slice(&energies[1..]);
    padded_values.extend_from_slice(&values[1..]);

    Ok((padded_energies, padded_values, padding_len))
}

pub fn smooth_gaussian(
    input: GaussianSmoothingInput<'_>,
) -> Result<GaussianSmoothing, ConvolutionError> {
    if !input.fwhm.is_finite() || input.fwhm <= 0.0 {
        return Err(ConvolutionError::InvalidWidth { value: input.fwhm });
    }

    let (energies, padded_values, padding_len) =
        pad_from_zero_energy(input.energies, input.values)?;
    let spacing = input.energies[2] - input.energies[1];
    let kernel = gaussian_kernel(fwhm_to_standard_deviation(input.fwhm), spacing)?;
    let values = convolve_same(&padded_values, &kernel);

    Ok(GaussianSmoothing {
        energies,
        values,
        padding_len,
        kernel_len: kernel.len(),
    })
}

/// Converts a floored sample count to `usize`, rejecting NaN, infinities and
/// counts above `MAX_CONVOLUTION_SAMPLES`.
fn sample_count(what: &'static str, count: f64) -> Result<usize, ConvolutionError> {
    if count.is_finite() && (0.0..=MAX_CONVOLUTION_SAMPLES as f64).contains(&count) {
        Ok(count as usize)
    } else {
        Err(ConvolutionError::TooManySamples {
            what,
            count,
            limit: MAX_CONVOLUTION_SAMPLES,
        })
    }
}

fn validate_samples(energies: &[f64], values: &[f64]) -> Result<(), ConvolutionError> {
    if energies.len() != values.len() {
        return Err(ConvolutionError::LengthMismatch {
            energy: energies.len(),
            values: values.len(),
        });
    }
    if energies.len() < 3 {
        return Err(ConvolutionError::InsufficientPoints {
            actual: energies.len(),
        });
    }
    Ok(())
}
