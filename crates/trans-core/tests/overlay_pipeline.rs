use std::fs;
use std::path::Path;
use tempfile::TempDir;
use trans_core::common::{LevelLabels, PlotOptions};
use trans_core::domain::{QuantityKind, ScaledMode, TransResult};
use trans_core::modules::{
    OverlayPipeline, PlotEmitter, TransitionFigure, parse_transition_pairs,
};

#[derive(Default)]
struct CollectingEmitter {
    figures: Vec<TransitionFigure>,
}

impl PlotEmitter for CollectingEmitter {
    fn emit(&mut self, figure: &TransitionFigure) -> TransResult<()> {
        self.figures.push(figure.clone());
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("fixture should be written");
}

fn assert_close(label: &str, expected: &[f64], actual: &[f64]) {
    assert_eq!(expected.len(), actual.len(), "{label}: length");
    for (index, (expected, actual)) in expected.iter().zip(actual).enumerate() {
        assert!(
            (expected - actual).abs() <= 1.0e-12 * expected.abs().max(1.0),
            "{label}[{index}]: expected {expected}, got {actual}"
        );
    }
}

#[test]
fn unscaled_omega_overlay_applies_column_table_and_threshold_offset() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("om-2_3-AS_DW.trns"),
        "# Excitation threshold = 1.5 Ryd\n0 1 0 2\n0.1 1 0.1 2.2\n0.2 1 0.2 2.4\n",
    );
    write_file(
        &temp.path().join("om-2_3-ICFT.trns"),
        "0 0 0.05 2.1\n0 0 0.15 2.3\n0 0 0.25 2.5\n",
    );

    let pairs = parse_transition_pairs(["2", "3"]).expect("pairs");
    let options = PlotOptions {
        data_dir: temp.path().to_path_buf(),
        artifact_dir: temp.path().to_path_buf(),
        ..PlotOptions::default()
    };
    let pipeline =
        OverlayPipeline::new(options, LevelLabels::default()).expect("pipeline should build");
    let mut emitter = CollectingEmitter::default();

    let summary = pipeline.run(&pairs, &mut emitter).expect("run should succeed");
    assert_eq!(summary.figures, 1);
    assert_eq!(summary.series, 2);
    assert!(summary.artifacts.is_empty());

    let figure = &emitter.figures[0];
    let as_dw = figure
        .series
        .iter()
        .find(|plotted| plotted.label == "AS_DW")
        .expect("AS_DW series");
    assert_close("AS_DW x", &[1.5, 1.6], as_dw.series.x());
    assert_close("AS_DW y", &[1.0, 1.0], as_dw.series.y());

    let icft = figure
        .series
        .iter()
        .find(|plotted| plotted.label == "ICFT")
        .expect("ICFT series");
    assert_close("ICFT x", &[0.0, 0.0], icft.series.x());
    assert_close("ICFT y", &[2.1, 2.3], icft.series.y());
}

#[test]
fn burgess_tully_overlay_keeps_every_row() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("ups-1_4-AS_DW.burg"),
        "0 0 0.1 0.4\n0 0 0.5 0.6\n0 0 0.9 0.8\n",
    );
    write_file(
        &temp.path().join("ups-1_4-RM.burg"),
        "0.1 0.41 9 9\n0.5 0.62 9 9\n0.9 0.79 9 9\n",
    );

    let options = PlotOptions {
        quantity: QuantityKind::Upsilon,
        scaled: ScaledMode::BurgessTully,
        data_dir: temp.path().to_path_buf(),
        artifact_dir: temp.path().to_path_buf(),
        ..PlotOptions::default()
    };
    let pipeline =
        OverlayPipeline::new(options, LevelLabels::default()).expect("pipeline should build");
    let pairs = parse_transition_pairs(["1", "4"]).expect("pairs");
    let figure = pipeline.build_figure(&pairs[0]).expect("figure");

    let labels = figure
        .series
        .iter()
        .map(|plotted| plotted.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, ["RM", "AS_DW"]);
    assert_close("RM x", &[0.1, 0.5, 0.9], figure.series[0].series.x());
    assert_close("RM y", &[0.41, 0.62, 0.79], figure.series[0].series.y());
    assert_close("AS_DW y", &[0.4, 0.6, 0.8], figure.series[1].series.y());
    assert!(figure.series.iter().all(|plotted| plotted.style.opacity == 1.0));
    assert_eq!(figure.axis_labels.y, "Υ_r, Reduced Effective Collision Strength");
}

#[test]
fn cross_section_and_smoothing_feed_log_bounds() {
    let temp = TempDir::new().expect("tempdir should be created");
    let rows = (1..=16)
        .map(|index| format!("0 {:.2} 0 {:.1}\n", 0.25 * index as f64, 10.0))
        .collect::<String>();
    write_file(&temp.path().join("om-1_2-BPRM.trns"), &rows);

    let options = PlotOptions {
        statistical_weight: Some(2),
        convolution_width: Some(1.0),
        log_y: true,
        data_dir: temp.path().to_path_buf(),
        artifact_dir: temp.path().join("conv"),
        ..PlotOptions::default()
    };
    let pipeline =
        OverlayPipeline::new(options, LevelLabels::default()).expect("pipeline should build");
    let mut emitter = CollectingEmitter::default();
    let summary = pipeline
        .run(&parse_transition_pairs(["1", "2"]).expect("pairs"), &mut emitter)
        .expect("run should succeed");

    assert_eq!(summary.artifacts, vec![temp.path().join("conv").join("om-1_2-CONV_BPRM")]);

    let figure = &emitter.figures[0];
    let plotted = &figure.series[0];
    assert_eq!(plotted.style.opacity, 1.0);
    assert_eq!(figure.axis_labels.y, "σ, Cross Section (cm²)");

    let y = figure.bounds.y.expect("log y bounds");
    assert_eq!(y.min, 0.0, "zero padding rounds to zero");
    let peak = plotted
        .series
        .y()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let decade = 10.0_f64.powi(peak.log10().floor() as i32);
    assert!((y.max - (peak + decade)).abs() <= 1.0e-12 * y.max);
    assert!(figure.bounds.x.is_none());
}
