use crate::common::LevelLabels;
use crate::domain::{QuantityKind, ScaledMode, TransitionPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: &'static str,
    pub y: &'static str,
}

pub const fn axis_labels(
    quantity: QuantityKind,
    scaled: ScaledMode,
    cross_section: bool,
) -> AxisLabels {
    match (quantity, scaled, cross_section) {
        (QuantityKind::Upsilon, ScaledMode::BurgessTully, _) => AxisLabels {
            x: "T_r, Reduced Temperature",
            y: "Υ_r, Reduced Effective Collision Strength",
        },
        (QuantityKind::Upsilon, ScaledMode::Unscaled, _) => AxisLabels {
            x: "T (K)",
            y: "Υ, Effective Collision Strength",
        },
        (QuantityKind::Omega, ScaledMode::BurgessTully, _) => AxisLabels {
            x: "E_r, Reduced Scattering Energy",
            y: "Ω_r, Reduced Collision Strength",
        },
        (QuantityKind::Omega, ScaledMode::Unscaled, true) => AxisLabels {
            x: "E, Scattering Energy (Ryd)",
            y: "σ, Cross Section (cm²)",
        },
        (QuantityKind::Omega, ScaledMode::Unscaled, false) => AxisLabels {
            x: "E, Scattering Energy (Ryd)",
            y: "Ω, Collision Strength",
        },
    }
}

/// `Transition 2-3, <lower term> → <upper term>`; the term part is left out
/// when either level has no configured label.
pub fn transition_title(pair: &TransitionPair, labels: &LevelLabels) -> String {
    match (labels.label(pair.lower()), labels.label(pair.upper())) {
        (Some(lower), Some(upper)) => format!("Transition {}, {} → {}", pair, lower, upper),
        _ => {
            tracing::warn!(
                transition = %pair,
                "no term label configured for one of the levels; title shows indices only"
            );
            format!("Transition {}", pair)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{axis_labels, transition_title};
    use crate::common::LevelLabels;
    use crate::domain::{QuantityKind, ScaledMode, TransitionPair};
    use std::collections::BTreeMap;

    #[test]
    fn labels_follow_quantity_scaling_and_units() {
        let labels = axis_labels(QuantityKind::Omega, ScaledMode::Unscaled, false);
        assert_eq!(labels.y, "Ω, Collision Strength");
        assert_eq!(labels.x, "E, Scattering Energy (Ryd)");

        let labels = axis_labels(QuantityKind::Omega, ScaledMode::Unscaled, true);
        assert!(labels.y.starts_with("σ, Cross Section"));

        let labels = axis_labels(QuantityKind::Omega, ScaledMode::BurgessTully, true);
        assert_eq!(labels.y, "Ω_r, Reduced Collision Strength");

        let labels = axis_labels(QuantityKind::Upsilon, ScaledMode::Unscaled, false);
        assert_eq!(labels.x, "T (K)");

        let labels = axis_labels(QuantityKind::Upsilon, ScaledMode::BurgessTully, false);
        assert_eq!(labels.x, "T_r, Reduced Temperature");
    }

    #[test]
    fn title_uses_injected_term_labels() {
        let labels = LevelLabels::new(BTreeMap::from([
            (1, "3d10 4s2 1S0".to_string()),
            (2, "3d10 4s 4p 3P0".to_string()),
        ]));
        let pair = TransitionPair::new("1", "2", 1, 2);
        assert_eq!(
            transition_title(&pair, &labels),
            "Transition 1-2, 3d10 4s2 1S0 → 3d10 4s 4p 3P0"
        );

        let unlabelled = TransitionPair::new("1", "9", 1, 9);
        assert_eq!(transition_title(&unlabelled, &labels), "Transition 1-9");
    }
}
