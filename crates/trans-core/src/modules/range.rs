use crate::domain::{AxisRange, Series};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Padded limits for the log-scaled axes of one figure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogAxisBounds {
    pub x: Option<AxisRange>,
    pub y: Option<AxisRange>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisAccumulator {
    axis: Axis,
    observed: Option<AxisRange>,
}

impl AxisAccumulator {
    const fn new(axis: Axis) -> Self {
        Self {
            axis,
            observed: None,
        }
    }

    fn observe(&mut self, values: &[f64]) {
        for value in values.iter().copied().filter(|value| value.is_finite()) {
            self.observed = Some(match self.observed {
                Some(range) => AxisRange {
                    min: range.min.min(value),
                    max: range.max.max(value),
                },
                None => AxisRange {
                    min: value,
                    max: value,
                },
            });
        }
    }

    fn bounds(&self) -> Option<AxisRange> {
        self.observed
            .map(|observed| padded_log_bounds(observed, self.axis == Axis::Y))
    }
}

/// Running min/max over every series of one transition, for the axes that
/// are drawn on a log scale. A fresh accumulator is built per transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeAccumulator {
    x: Option<AxisAccumulator>,
    y: Option<AxisAccumulator>,
}

impl RangeAccumulator {
    pub fn new(log_x: bool, log_y: bool) -> Self {
        Self {
            x: log_x.then(|| AxisAccumulator::new(Axis::X)),
            y: log_y.then(|| AxisAccumulator::new(Axis::Y)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    pub fn observe(&mut self, series: &Series) {
        if let Some(accumulator) = self.x.as_mut() {
            accumulator.observe(series.x());
        }
        if let Some(accumulator) = self.y.as_mut() {
            accumulator.observe(series.y());
        }
    }

    pub fn finish(&self) -> LogAxisBounds {
        LogAxisBounds {
            x: self.x.and_then(|accumulator| accumulator.bounds()),
            y: self.y.and_then(|accumulator| accumulator.bounds()),
        }
    }
}

/// `max + 10^floor(log10 max)` and `min - 10^floor(log10 min)`. With
/// `clamp_rounded_zero` a minimum that rounds (half to even) to zero pins the
/// lower limit at 0. Non-positive extrema get no padding.
pub fn padded_log_bounds(observed: AxisRange, clamp_rounded_zero: bool) -> AxisRange {
    let max = observed.max + decade_below(observed.max);
    let min = if clamp_rounded_zero && observed.min.round_ties_even() == 0.0 {
        0.0
    } else {
        observed.min - decade_below(observed.min)
    };
    AxisRange { min, max }
}

fn decade_below(value: f64) -> f64 {
    if value > 0.0 {
        10.0_f64.powi(value.log10().floor() as i32)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeAccumulator, padded_log_bounds};
    use crate::domain::{AxisRange, Series};

    fn assert_close(label: &str, expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() <= 1.0e-12 * expected.abs().max(1.0),
            "{label}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn bounds_pad_by_one_decade_unit() {
        let bounds = padded_log_bounds(AxisRange { min: 0.004, max: 150.0 }, false);
        assert_close("upper", 250.0, bounds.max);
        assert_close("lower", 0.003, bounds.min);
    }

    #[test]
    fn y_axis_lower_bound_clamps_when_minimum_rounds_to_zero() {
        let bounds = padded_log_bounds(AxisRange { min: 0.004, max: 150.0 }, true);
        assert_eq!(bounds.min, 0.0);
        assert_close("upper", 250.0, bounds.max);

        let bounds = padded_log_bounds(AxisRange { min: 0.5, max: 3.0 }, true);
        assert_eq!(bounds.min, 0.0, "0.5 rounds half to even");

        let bounds = padded_log_bounds(AxisRange { min: 2.0, max: 3.0 }, true);
        assert_close("lower", 1.0, bounds.min);
    }

    #[test]
    fn non_positive_extrema_are_not_padded() {
        let bounds = padded_log_bounds(AxisRange { min: 0.0, max: 0.0 }, false);
        assert_eq!(bounds, AxisRange { min: 0.0, max: 0.0 });
        let bounds = padded_log_bounds(AxisRange { min: -2.0, max: 5.0 }, false);
        assert_eq!(bounds.min, -2.0);
        assert_close("upper", 6.0, bounds.max);
    }

    #[test]
    fn accumulator_tracks_every_series_per_axis() {
        let mut accumulator = RangeAccumulator::new(true, true);
        accumulator
            .observe(&Series::new(vec![0.004, 1.0, 2.0], vec![3.0, 150.0, 20.0]).expect("series"));
        accumulator.observe(&Series::new(vec![5.0, 90.0], vec![0.7, 4.0]).expect("series"));

        let bounds = accumulator.finish();
        let x = bounds.x.expect("log x bounds");
        let y = bounds.y.expect("log y bounds");
        assert_close("x lower", 0.003, x.min);
        assert_close("x upper", 100.0, x.max);
        assert_close("y lower", 0.6, y.min);
        assert_close("y upper", 250.0, y.max);
    }

    #[test]
    fn inactive_axes_produce_no_bounds() {
        let mut accumulator = RangeAccumulator::new(false, true);
        accumulator.observe(&Series::new(vec![1.0], vec![2.0]).expect("series"));
        let bounds = accumulator.finish();
        assert!(bounds.x.is_none());
        assert!(bounds.y.is_some());

        let idle = RangeAccumulator::new(false, false);
        assert!(!idle.is_active());
        assert_eq!(idle.finish().y, None);
    }

    #[test]
    fn empty_transition_has_no_observed_range() {
        let accumulator = RangeAccumulator::new(true, true);
        assert!(accumulator.finish().x.is_none());
        assert!(accumulator.finish().y.is_none());
    }
}
