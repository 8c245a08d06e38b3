use binomial_explorer::api::{
    FIGURE_JSON_SCHEMA_V1, FigureJsonContractV1, FigureLayout, run_pipeline,
};
use binomial_explorer::core::QuantileBounds;
use binomial_explorer::interaction::ControlSnapshot;
use binomial_explorer::{ExplorerConfig, ExplorerError};

#[test]
fn empty_document_loads_defaults() {
    let config = ExplorerConfig::from_json_str("{}").expect("config");
    assert_eq!(config, ExplorerConfig::default());
    assert_eq!(config.continuous_sample_count, 100);
    assert_eq!(config.continuity_correction, 0.5);
    assert_eq!(config.controls.trials, 5);
    assert_eq!(config.controls.probability, 0.4);
    assert_eq!(config.layout.height_px, 700);
}

#[test]
fn partial_document_overrides_only_named_fields() {
    let config = ExplorerConfig::from_json_str(
        r#"{ "continuous_sample_count": 250, "layout": { "height_px": 900 } }"#,
    )
    .expect("config");

    assert_eq!(config.continuous_sample_count, 250);
    assert_eq!(config.layout.height_px, 900);
    assert_eq!(config.layout.width_px, FigureLayout::default().width_px);
    assert_eq!(config.quantiles, QuantileBounds::default());
}

#[test]
fn config_round_trips_through_json() {
    let config = ExplorerConfig::default()
        .with_continuous_sample_count(64)
        .with_summary_precision(3);
    let json = config.to_json_pretty().expect("serialize");
    let restored = ExplorerConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn invalid_documents_are_rejected() {
    for input in [
        r#"{ "continuous_sample_count": 1 }"#,
        r#"{ "quantiles": { "lower": 0.9, "upper": 0.1 } }"#,
        r#"{ "layout": { "vertical_spacing": 1.5 } }"#,
        r#"{ "summary_precision": 40 }"#,
        "not json",
    ] {
        let err = ExplorerConfig::from_json_str(input).expect_err(input);
        assert!(matches!(err, ExplorerError::InvalidConfig(_)), "{input}: {err}");
    }
}

#[test]
fn figure_contract_carries_schema_and_summary() {
    let output =
        run_pipeline(ControlSnapshot::at_mean(5, 0.4), &ExplorerConfig::default()).expect("pass");
    let json = output.to_json_contract_v1_pretty().expect("contract");
    assert!(json.contains("\"schema_version\": 1"));
    assert!(json.contains("E[Y]=2.0"));

    let contract = FigureJsonContractV1::from_json_str(&json).expect("parse contract");
    assert_eq!(contract.schema_version, FIGURE_JSON_SCHEMA_V1);
    assert_eq!(contract.snapshot, output.snapshot);
    assert_eq!(contract.summary, output.summary);
    assert_eq!(contract.figure.panels.len(), 2);
    assert_eq!(contract.figure.series_count(), output.figure.series_count());
}

#[test]
fn figure_contract_rejects_unknown_schema_version() {
    let output =
        run_pipeline(ControlSnapshot::at_mean(5, 0.4), &ExplorerConfig::default()).expect("pass");
    let mut contract = output.to_contract_v1();
    contract.schema_version = 2;
    let json = serde_json::to_string(&contract).expect("serialize");

    let err = FigureJsonContractV1::from_json_str(&json).expect_err("version mismatch");
    assert!(err.to_string().contains("unsupported figure schema version"));
}
