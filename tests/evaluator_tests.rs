use approx::{assert_abs_diff_eq, assert_relative_eq};
use binomial_explorer::core::{
    DistributionEvaluation, DistributionParams, EvaluatorConfig, QuantileBounds, evaluate,
};

fn evaluate_default(trials: u64, probability: f64) -> DistributionEvaluation {
    let params = DistributionParams::new(trials, probability).expect("valid params");
    evaluate(params, &EvaluatorConfig::default()).expect("evaluation")
}

#[test]
fn small_binomial_matches_reference_scenario() {
    let evaluation = evaluate_default(5, 0.4);

    assert_eq!(evaluation.mean, 5.0 * 0.4);
    assert_eq!(evaluation.variance, 5.0 * 0.4 * (1.0 - 0.4));
    assert_relative_eq!(evaluation.mean, 2.0);
    assert_relative_eq!(evaluation.variance, 1.2, max_relative = 1e-12);

    let outcomes: Vec<u64> = evaluation.discrete.iter().map(|sample| sample.x).collect();
    assert_eq!(outcomes, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn small_binomial_pmf_and_cdf_match_closed_form() {
    let evaluation = evaluate_default(5, 0.4);

    // P(Y = 2) = C(5, 2) * 0.4^2 * 0.6^3
    let pmf_two = 10.0 * 0.4f64.powi(2) * 0.6f64.powi(3);
    assert_relative_eq!(evaluation.discrete[2].pmf, pmf_two, max_relative = 1e-10);
    assert_relative_eq!(evaluation.discrete[0].cdf, 0.6f64.powi(5), max_relative = 1e-10);
    assert_relative_eq!(evaluation.discrete[5].cdf, 1.0, max_relative = 1e-12);

    let total: f64 = evaluation.discrete.iter().map(|sample| sample.pmf).sum();
    assert_relative_eq!(total, 1.0, max_relative = 1e-10);
}

#[test]
fn large_binomial_supports_follow_percentile_cutoffs() {
    let evaluation = evaluate_default(100, 0.4);

    assert_relative_eq!(evaluation.mean, 40.0, max_relative = 1e-12);
    assert_relative_eq!(evaluation.variance, 24.0, max_relative = 1e-12);

    let first = evaluation.discrete.first().expect("discrete support");
    let last = evaluation.discrete.last().expect("discrete support");
    assert_eq!(first.x, 29);
    assert_eq!(last.x, 52);
    assert_eq!(evaluation.discrete.len(), 24);
    assert!(last.cdf >= 0.99);

    assert_eq!(evaluation.continuous.len(), 100);
    let start = evaluation.continuous.first().expect("continuous support").x;
    let end = evaluation.continuous.last().expect("continuous support").x;
    assert_abs_diff_eq!(start, 28.603269488783017, epsilon = 1e-6);
    assert_abs_diff_eq!(end, 51.39673051121699, epsilon = 1e-6);
}

#[test]
fn discrete_support_brackets_lower_and_upper_quantiles() {
    let evaluation = evaluate_default(100, 0.4);
    let first = evaluation.discrete[0];

    // The first point is the smallest outcome covering 1%: its predecessor does not.
    assert!(first.cdf >= 0.01);
    assert!(first.cdf - first.pmf < 0.01);

    let last = evaluation.discrete[evaluation.discrete.len() - 1];
    assert!(last.cdf >= 0.99);
    assert!(last.cdf - last.pmf < 0.99);
}

#[test]
fn continuous_support_is_evenly_spaced() {
    let evaluation = evaluate_default(30, 0.25);
    let xs: Vec<f64> = evaluation.continuous.iter().map(|sample| sample.x).collect();
    let step = xs[1] - xs[0];
    for pair in xs.windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], step, epsilon = 1e-9);
    }
}

#[test]
fn continuity_corrected_curve_is_shifted_normal_cdf() {
    let evaluation = evaluate_default(20, 0.3);
    for sample in &evaluation.continuous {
        let expected = evaluation
            .normal_cdf_at(sample.x + 0.5)
            .expect("normal cdf");
        assert_eq!(sample.corrected_cdf, expected);
        assert!(sample.corrected_cdf >= sample.cdf);
    }
}

#[test]
fn normal_density_at_mean_matches_closed_form() {
    let evaluation = evaluate_default(5, 0.4);
    let pdf = evaluation.normal_pdf_at(2.0).expect("pdf");
    assert_relative_eq!(pdf, 0.36418281019735976, max_relative = 1e-9);
}

#[test]
fn custom_quantiles_and_sample_count_reshape_supports() {
    let params = DistributionParams::new(100, 0.4).expect("params");
    let narrow = EvaluatorConfig {
        quantiles: QuantileBounds::new(0.25, 0.75).expect("bounds"),
        continuous_sample_count: 11,
        continuity_correction: 0.5,
    };
    let wide = EvaluatorConfig::default();

    let narrow_eval = evaluate(params, &narrow).expect("narrow");
    let wide_eval = evaluate(params, &wide).expect("wide");

    assert_eq!(narrow_eval.continuous.len(), 11);
    assert!(narrow_eval.discrete.len() < wide_eval.discrete.len());
    assert!(narrow_eval.discrete[0].x > wide_eval.discrete[0].x);
}

#[test]
fn continuity_correction_offset_is_configurable() {
    let params = DistributionParams::new(10, 0.5).expect("params");
    let config = EvaluatorConfig {
        continuity_correction: 0.0,
        ..EvaluatorConfig::default()
    };
    let evaluation = evaluate(params, &config).expect("evaluation");
    for sample in &evaluation.continuous {
        assert_eq!(sample.corrected_cdf, sample.cdf);
    }
}

#[test]
fn invalid_evaluator_config_is_rejected() {
    let params = DistributionParams::new(10, 0.5).expect("params");
    let config = EvaluatorConfig {
        continuous_sample_count: 1,
        ..EvaluatorConfig::default()
    };
    assert!(evaluate(params, &config).is_err());
}

#[test]
fn x_extent_covers_both_supports() {
    let evaluation = evaluate_default(100, 0.4);
    let (min, max) = evaluation.x_extent().expect("extent");
    assert_abs_diff_eq!(min, 28.603269488783017, epsilon = 1e-6);
    assert_eq!(max, 52.0);
}
