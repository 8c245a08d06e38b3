use binomial_explorer::api::{
    ExplorerConfig, build_render_frame, panel_rects, panel_y_domain, run_pipeline,
    shared_x_domain,
};
use binomial_explorer::core::Viewport;
use binomial_explorer::interaction::ControlSnapshot;
use binomial_explorer::render::{LineStrokeStyle, NullRenderer, Renderer};

fn default_output() -> binomial_explorer::api::PipelineOutput {
    run_pipeline(ControlSnapshot::at_mean(5, 0.4), &ExplorerConfig::default()).expect("pipeline")
}

#[test]
fn panels_are_stacked_with_eight_percent_spacing() {
    let rects = panel_rects(Viewport::new(960, 700), 2, 0.08).expect("rects");
    assert_eq!(rects.len(), 2);

    let plot_height = rects[1].bottom() - rects[0].top;
    let gap = rects[1].top - rects[0].bottom();
    assert!((gap - plot_height * 0.08).abs() <= 1e-9);
    assert!((rects[0].height - rects[1].height).abs() <= 1e-9);
    assert_eq!(rects[0].left, rects[1].left);
    assert_eq!(rects[0].width, rects[1].width);
}

#[test]
fn tiny_viewport_is_rejected() {
    assert!(panel_rects(Viewport::new(60, 60), 2, 0.08).is_err());
    assert!(panel_rects(Viewport::new(0, 700), 2, 0.08).is_err());
}

#[test]
fn frame_contains_markers_for_each_binomial_point() {
    let output = default_output();
    let frame = build_render_frame(&output.figure, Viewport::new(960, 700)).expect("frame");

    // Six PMF markers, six CDF markers and one legend sample.
    assert_eq!(frame.markers.len(), 13);
    assert!(frame.validate().is_ok());
}

#[test]
fn cursor_segments_render_dashed() {
    let output = default_output();
    let frame = build_render_frame(&output.figure, Viewport::new(960, 700)).expect("frame");

    let dashed = frame
        .lines
        .iter()
        .filter(|line| line.stroke_style == LineStrokeStyle::Dashed)
        .count();
    // One segment per panel plus the legend sample.
    assert_eq!(dashed, 3);
}

#[test]
fn frame_labels_include_panel_titles_and_legend_names() {
    let output = default_output();
    let frame = build_render_frame(&output.figure, Viewport::new(960, 700)).expect("frame");
    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();

    for expected in [
        "Probability Mass Function / Probability Density Function",
        "Cumulative Distribution Function",
        "binom",
        "norm",
        "continuity correction",
        "y",
    ] {
        assert!(texts.contains(&expected), "missing label `{expected}`");
    }
}

#[test]
fn axis_domains_cover_all_series() {
    let output = default_output();
    let (x_min, x_max) = shared_x_domain(&output.figure);
    let (x_extent_min, x_extent_max) = output.figure.x_extent().expect("extent");
    assert!(x_min < x_extent_min);
    assert!(x_max > x_extent_max);

    let (cdf_low, cdf_high) = panel_y_domain(&output.figure.panels[1]);
    assert_eq!(cdf_low, 0.0);
    assert!(cdf_high > 1.0);
}

#[test]
fn same_figure_rasterizes_at_any_viewport() {
    let output = default_output();
    let small = build_render_frame(&output.figure, Viewport::new(480, 360)).expect("small");
    let large = build_render_frame(&output.figure, Viewport::new(1920, 1080)).expect("large");
    assert_eq!(small.markers.len(), large.markers.len());

    let mut renderer = NullRenderer::default();
    renderer.render(&small).expect("render small");
    renderer.render(&large).expect("render large");
    assert_eq!(renderer.frames_rendered, 2);
}
