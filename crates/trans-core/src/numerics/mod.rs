pub mod gaussian;

pub use gaussian::{
    ConvolutionError, GaussianSmoothing, GaussianSmoothingInput, convolve_same,
    fwhm_to_standard_deviation, gaussian_kernel, pad_from_zero_energy, smooth_gaussian,
};
