//! Physical and numerical constants shared by the transform stages.

pub const PI: f64 = std::f64::consts::PI;
/// Bohr radius in centimetres.
pub const BOHR_RADIUS_CM: f64 = 0.529_177_210_92e-8;
pub const PI_A0_SQUARED: f64 = PI * BOHR_RADIUS_CM * BOHR_RADIUS_CM;
/// FWHM = 2 sqrt(2 ln 2) sigma.
pub const FWHM_TO_SIGMA: f64 = 2.354_820_045_030_949_3;
pub const DEFAULT_CONVOLUTION_WIDTH_RYD: f64 = 2.205;
pub const DEFAULT_STATISTICAL_WEIGHT: u32 = 1;
pub const KERNEL_HALF_WIDTH_SIGMAS: f64 = 3.0;
/// Upper limit on padded-signal and kernel lengths in Gaussian smoothing.
pub const MAX_CONVOLUTION_SAMPLES: usize = 1 << 24;
pub const STYLE_CYCLE_LENGTH: usize = 5;
/// Unsmoothed collision strengths are drawn faded behind smoothed overlays.
pub const UNSMOOTHED_OMEGA_OPACITY: f64 = 0.3;

#[cfg(test)]
mod tests {
    use super::{BOHR_RADIUS_CM, FWHM_TO_SIGMA, PI, PI_A0_SQUARED};

    #[test]
    fn fwhm_constant_matches_closed_form() {
        let closed_form = 2.0 * (2.0 * 2.0_f64.ln()).sqrt();
        assert!((FWHM_TO_SIGMA - closed_form).abs() <= 1.0e-15);
    }

    #[test]
    fn cross_section_prefactor_is_pi_a0_squared() {
        assert!((PI_A0_SQUARED - PI * BOHR_RADIUS_CM.powi(2)).abs() <= 1.0e-32);
        assert!((PI_A0_SQUARED - 8.797_355_43e-17).abs() <= 1.0e-25);
    }
}
