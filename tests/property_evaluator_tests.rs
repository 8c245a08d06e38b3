use binomial_explorer::api::{ExplorerConfig, run_pipeline};
use binomial_explorer::core::{DistributionParams, EvaluatorConfig, evaluate};
use binomial_explorer::interaction::ControlSnapshot;
use proptest::prelude::*;

proptest! {
    #[test]
    fn moments_are_closed_form(
        trials in 1u64..2_000,
        probability in 0.01f64..=0.99
    ) {
        let params = DistributionParams::new(trials, probability).expect("params");
        let evaluation = evaluate(params, &EvaluatorConfig::default()).expect("evaluation");

        prop_assert_eq!(evaluation.mean, trials as f64 * probability);
        prop_assert_eq!(evaluation.variance, trials as f64 * probability * (1.0 - probability));
        prop_assert_eq!(evaluation.std_dev, evaluation.variance.sqrt());
    }

    #[test]
    fn discrete_support_is_contiguous_and_reaches_upper_quantile(
        trials in 1u64..2_000,
        probability in 0.01f64..=0.99
    ) {
        let params = DistributionParams::new(trials, probability).expect("params");
        let evaluation = evaluate(params, &EvaluatorConfig::default()).expect("evaluation");

        prop_assert!(!evaluation.discrete.is_empty());
        for pair in evaluation.discrete.windows(2) {
            prop_assert_eq!(pair[1].x, pair[0].x + 1);
        }
        let last = evaluation.discrete[evaluation.discrete.len() - 1];
        prop_assert!(last.cdf >= 0.99);
        prop_assert!(last.x <= trials);
    }

    #[test]
    fn normal_cdf_is_non_decreasing_over_continuous_support(
        trials in 1u64..2_000,
        probability in 0.01f64..=0.99
    ) {
        let params = DistributionParams::new(trials, probability).expect("params");
        let evaluation = evaluate(params, &EvaluatorConfig::default()).expect("evaluation");

        for pair in evaluation.continuous.windows(2) {
            prop_assert!(pair[1].x > pair[0].x);
            prop_assert!(pair[1].cdf >= pair[0].cdf);
            prop_assert!(pair[1].corrected_cdf >= pair[0].corrected_cdf);
        }
    }

    #[test]
    fn pipeline_is_idempotent_for_identical_snapshots(
        trials in 1u64..500,
        probability in 0.01f64..=0.99,
        cursor_ratio in 0.0f64..=1.0
    ) {
        let snapshot = ControlSnapshot::clamped(trials, probability, trials as f64 * cursor_ratio);
        let config = ExplorerConfig::default();

        let first = run_pipeline(snapshot, &config).expect("first pass");
        let second = run_pipeline(snapshot, &config).expect("second pass");
        prop_assert_eq!(first, second);
    }
}
