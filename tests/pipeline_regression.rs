//! Pipeline Regression Tests
//!
//! End-to-end runs through `MemPipeline` with synthetic wells. Asserts on
//! the published reference scenarios, array alignment, fallback behaviour
//! and the JSON output contract.

use mem_pipeline::config::HorizontalStressConfig;
use mem_pipeline::physics_engine::{horizontal_stress_at, FrictionalLimits};
use mem_pipeline::types::{FallbackReason, FractureGradientMethodName, PorePressureMethodName};
use mem_pipeline::{
    silent, MechanicalProperties, MemInputs, MemPipeline, PressureData, RegimeLabel, RunResult,
    StressProfile, StressRegime, WellLogCurve,
};

fn mechanics(regime: StressRegime) -> MechanicalProperties {
    MechanicalProperties {
        poisson_ratio: 0.25,
        friction_angle: 30.0,
        stress_regime: regime,
    }
}

/// A synthetic well from surface down in 500 ft steps.
fn synthetic_well(n: usize) -> MemInputs {
    let depth: Vec<f64> = (0..n).map(|i| 500.0 * i as f64).collect();
    let density: Vec<f64> = (0..n).map(|i| 2.2 + 0.02 * i as f64).collect();
    let sonic: Vec<f64> = (0..n).map(|i| 95.0 - 2.0 * i as f64).collect();
    MemInputs {
        depth,
        curves: vec![
            WellLogCurve::new("rhob", "g/cc", density),
            WellLogCurve::new("DTCO", "us/ft", sonic),
        ],
        mechanical_properties: Some(mechanics(StressRegime::NormalFaulting)),
        pressure_data: PressureData::default(),
    }
}

fn run_ok(inputs: &MemInputs) -> (StressProfile, RunResult) {
    let result = MemPipeline::default().run(inputs, &mut silent());
    assert!(result.success, "run failed: {:?}", result.error);
    let profile = result.results.clone().expect("successful run has results");
    (profile, result)
}

#[test]
fn test_all_curves_share_depth_length() {
    for method in [
        PorePressureMethodName::Eaton,
        PorePressureMethodName::HottmanJohnson,
        PorePressureMethodName::ConstantGradient,
    ] {
        let mut well = synthetic_well(12);
        well.pressure_data.pore_pressure_method = method;
        let (profile, _) = run_ok(&well);
        for curve in profile.curves() {
            assert_eq!(curve.len(), well.depth.len(), "method {method}");
        }
        assert_eq!(profile.stress_regime_profile.len(), well.depth.len());
    }
}

#[test]
fn test_sv_non_decreasing_with_valid_density() {
    let (profile, _) = run_ok(&synthetic_well(20));
    for pair in profile.sv.windows(2) {
        assert!(pair[1] >= pair[0], "Sv decreased: {pair:?}");
    }
    assert!(profile.diagnostics.held_over_samples.is_empty());
}

#[test]
fn test_bad_density_holds_over_and_completes() {
    let mut well = synthetic_well(6);
    well.curves[0].values[3] = f64::NAN;
    well.curves[0].values[4] = -3.0;
    let (profile, result) = run_ok(&well);
    // Intervals 2-3, 3-4 and 4-5 all touch a bad sample
    assert_eq!(profile.diagnostics.held_over_samples, vec![3, 4, 5]);
    assert_eq!(profile.sv[2], profile.sv[5]);
    assert_eq!(result.summary.map(|s| s.held_over_points), Some(3));
}

#[test]
fn test_scenario_constant_density() {
    let inputs = MemInputs {
        depth: vec![0.0, 100.0, 200.0],
        curves: vec![WellLogCurve::new("DEN", "g/cc", vec![2.3, 2.3, 2.3])],
        mechanical_properties: Some(mechanics(StressRegime::NormalFaulting)),
        pressure_data: PressureData::default(),
    };
    let (profile, _) = run_ok(&inputs);
    let expected = [0.0, 99.59, 199.18];
    for (got, want) in profile.sv.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "Sv {got} != {want}");
    }
    assert!((profile.sv_gradient - 0.9959).abs() < 1e-9);
}

#[test]
fn test_scenario_constant_gradient_pore_pressure() {
    let inputs = MemInputs {
        depth: vec![1000.0],
        curves: vec![WellLogCurve::new("RHOB", "g/cc", vec![2.3])],
        mechanical_properties: Some(mechanics(StressRegime::NormalFaulting)),
        pressure_data: PressureData {
            pore_pressure_method: PorePressureMethodName::ConstantGradient,
            constant_gradient: Some(0.45),
            ..PressureData::default()
        },
    };
    let (profile, _) = run_ok(&inputs);
    assert_eq!(profile.len(), 1);
    assert!((profile.pp[0] - 450.0).abs() < 1e-9);
    assert!((profile.pp_gradient - 0.45).abs() < 1e-12);
}

#[test]
fn test_scenario_strike_slip_ordering() {
    let props = mechanics(StressRegime::StrikeSlip);
    let limits = FrictionalLimits::from_friction_angle(props.friction_angle);
    let (shmin, shmax) = horizontal_stress_at(
        10_000.0,
        4_000.0,
        &props,
        limits,
        &HorizontalStressConfig::default(),
    )
    .expect("Sv > Pp resolves");

    let active = limits.active * 6_000.0 + 4_000.0;
    let passive = limits.passive * 6_000.0 + 4_000.0;
    assert!((shmin - active).abs() < 1e-9);
    assert!((shmax - passive).abs() < 1e-9);
    assert!(shmax > shmin);
}

#[test]
fn test_missing_density_curve_fails() {
    let mut well = synthetic_well(4);
    well.curves.retain(|c| c.name != "rhob");
    let result = MemPipeline::default().run(&well, &mut silent());
    assert!(!result.success);
    assert!(result.error.as_deref().is_some_and(|e| e.contains("Density curve")));
}

#[test]
fn test_eaton_without_sonic_matches_fallback_gradient() {
    let mut eaton = synthetic_well(10);
    eaton.curves.retain(|c| c.name == "rhob");
    eaton.pressure_data.pore_pressure_method = PorePressureMethodName::Eaton;

    let mut constant = eaton.clone();
    constant.pressure_data.pore_pressure_method = PorePressureMethodName::ConstantGradient;
    constant.pressure_data.constant_gradient = Some(0.465);

    let (a, _) = run_ok(&eaton);
    let (b, _) = run_ok(&constant);
    assert_eq!(a.pp, b.pp);
    assert_eq!(a.diagnostics.fallbacks[0].reason, FallbackReason::MissingSonicCurve);
    assert!(b.diagnostics.fallbacks.is_empty());
}

#[test]
fn test_hottman_johnson_is_audited() {
    let mut well = synthetic_well(5);
    well.pressure_data.pore_pressure_method = PorePressureMethodName::HottmanJohnson;
    let (profile, _) = run_ok(&well);
    let fallback = &profile.diagnostics.fallbacks[0];
    assert_eq!(fallback.reason, FallbackReason::NotImplemented);
    assert_eq!(fallback.requested, "Hottman-Johnson");
}

#[test]
fn test_eaton_with_sonic_never_below_hydrostatic() {
    let mut well = synthetic_well(10);
    well.pressure_data.pore_pressure_method = PorePressureMethodName::Eaton;
    let (profile, _) = run_ok(&well);
    assert!(profile.diagnostics.fallbacks.is_empty());
    for (pp, z) in profile.pp.iter().zip(&profile.depth) {
        assert!(*pp >= 0.433 * z - 1e-9, "Pp {pp} below hydrostatic at {z}");
    }
}

#[test]
fn test_eaton_with_slow_sonic_evaluates_formula() {
    // Slower than the 100 us/ft normal trend from sample 3 down: overpressure
    let n = 10;
    let sonic: Vec<f64> = (0..n).map(|i| 90.0 + 5.0 * i as f64).collect();
    let mut well = synthetic_well(n);
    well.curves[1].values.clone_from(&sonic);
    well.pressure_data.pore_pressure_method = PorePressureMethodName::Eaton;
    well.pressure_data.eaton_exponent = Some(3.0);
    let (profile, _) = run_ok(&well);

    assert!(profile.diagnostics.fallbacks.is_empty());
    let clamped = &profile.diagnostics.clamped_pore_pressure_samples;
    for i in 3..n {
        assert!(!clamped.contains(&i), "sample {i} should not be clamped");
        let pn = 0.433 * profile.depth[i];
        let expected = profile.sv[i] - (profile.sv[i] - pn) * (100.0 / sonic[i]).powf(3.0);
        assert!((profile.pp[i] - expected).abs() < 1e-6, "sample {i}");
        assert!(profile.pp[i] > pn, "sample {i} should be overpressured");
    }
    // Faster than the trend at sample 1: formula falls below Pn and is clamped
    assert!(clamped.contains(&1));
}

#[test]
fn test_unused_parameters_do_not_abort() {
    let mut eaton = synthetic_well(6);
    eaton.curves.retain(|c| c.name == "rhob");
    eaton.pressure_data.pore_pressure_method = PorePressureMethodName::Eaton;
    eaton.pressure_data.eaton_exponent = Some(0.0);
    eaton.pressure_data.matthews_kelly_coeff = Some(0.0);

    let mut constant = eaton.clone();
    constant.pressure_data.pore_pressure_method = PorePressureMethodName::ConstantGradient;
    constant.pressure_data.constant_gradient = Some(0.465);

    let (a, _) = run_ok(&eaton);
    let (b, _) = run_ok(&constant);
    assert_eq!(a.pp, b.pp);
}

#[test]
fn test_fracture_gradient_eaton_alias_matches_hubbert_willis() {
    let mut alias = synthetic_well(6);
    alias.pressure_data.fracture_gradient_method = FractureGradientMethodName::Eaton;
    let hubbert = synthetic_well(6);

    let (a, _) = run_ok(&alias);
    let (b, _) = run_ok(&hubbert);
    assert_eq!(a.fg, b.fg);
    assert!(a
        .diagnostics
        .fallbacks
        .iter()
        .any(|f| f.reason == FallbackReason::MethodAlias));
}

#[test]
fn test_overpressure_produces_unknown_regime() {
    // Pp gradient above the overburden gradient
    let mut well = synthetic_well(4);
    well.pressure_data.constant_gradient = Some(1.5);
    let (profile, result) = run_ok(&well);
    assert!(profile
        .stress_regime_profile
        .iter()
        .all(|r| *r == RegimeLabel::Unknown));
    assert!(profile.shmin.iter().all(|v| v.is_nan()));
    assert!(profile.ratios.is_none());
    let report = result.quality_report.expect("report present");
    assert!(report.score < 100.0);
    assert!((0.0..=100.0).contains(&report.score));
}

#[test]
fn test_normal_well_only_loses_surface_sample() {
    // Sv = Pp = 0 at surface leaves Shmin / SHmax unresolved there
    let n = 8;
    let (profile, result) = run_ok(&synthetic_well(n));
    assert_eq!(profile.diagnostics.unknown_regime_samples, vec![0]);

    let report = result.quality_report.expect("report present");
    assert_eq!(report.warnings.len(), 1, "warnings: {:?}", report.warnings);
    assert_eq!(report.summary.mw_inversions, 0);
    assert_eq!(report.summary.stress_anomalies, 0);
    assert_eq!(report.summary.nan_points, 2);
    let expected = 100.0 - 15.0 * 2.0 / (5.0 * n as f64);
    assert!((report.score - expected).abs() < 1e-9, "score {}", report.score);
}

#[test]
fn test_success_json_contract() {
    let (_, result) = run_ok(&synthetic_well(3));
    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["success"], true);
    assert!(json.get("error").is_none());
    for key in [
        "depth",
        "Sv",
        "Sv_gradient",
        "Pp",
        "Pp_gradient",
        "Shmin",
        "SHmax",
        "Fg",
        "Fg_gradient",
        "ratios",
        "stressRegimeProfile",
    ] {
        assert!(json["results"].get(key).is_some(), "missing results.{key}");
    }
    assert!(json["qualityReport"]["score"].is_number());
    assert!(json["summary"]["mwInversions"].is_number());
    assert!(json["timestamp"].is_string());
}

#[test]
fn test_failure_json_contract() {
    let mut well = synthetic_well(3);
    well.mechanical_properties = None;
    let result = MemPipeline::default().run(&well, &mut silent());
    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Log data or mechanical properties are missing.");
    assert!(json["results"].is_null());
    assert!(json["qualityReport"].is_null());
    assert!(json["summary"].is_null());
}

#[test]
fn test_input_json_contract() {
    let raw = r#"{
        "depth": [0, 1000, 2000],
        "curves": [
            { "name": "RHOB", "values": [2.3, 2.35, null] },
            { "name": "DT", "values": [90, 88, 86] }
        ],
        "mechanicalProperties": { "poissonRatio": 0.25, "frictionAngle": 30, "stressRegime": "Strike-Slip" },
        "pressureData": { "porePressureMethod": "Eaton", "fractureGradientMethod": "Matthews-Kelly", "eatonExponent": 3.0 }
    }"#;
    let inputs: MemInputs = serde_json::from_str(raw).expect("valid input document");
    assert!(inputs.curves[0].values[2].is_nan());

    let (profile, _) = run_ok(&inputs);
    assert_eq!(profile.len(), 3);
    assert_eq!(profile.diagnostics.held_over_samples, vec![2]);
    assert_eq!(profile.stress_regime_profile[0], RegimeLabel::Unknown);
    assert_eq!(profile.stress_regime_profile[1], RegimeLabel::StrikeSlip);
}

#[test]
fn test_batch_matches_individual_runs() {
    let wells: Vec<MemInputs> = (3..8).map(synthetic_well).collect();
    let pipeline = MemPipeline::default();
    let batch = pipeline.run_batch(&wells);
    for (well, batched) in wells.iter().zip(&batch) {
        let single = pipeline.run(well, &mut silent());
        let single_profile = single.results.as_ref().expect("single run succeeds");
        let batched_profile = batched.results.as_ref().expect("batched run succeeds");
        // Surface Shmin / SHmax are NaN, so compare the JSON form (NaN as null)
        assert!(single_profile.shmin[0].is_nan());
        assert_eq!(
            serde_json::to_value(single_profile).expect("serializes"),
            serde_json::to_value(batched_profile).expect("serializes")
        );
        assert_eq!(single.quality_report, batched.quality_report);
    }
}
