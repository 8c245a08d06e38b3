#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use binomial_explorer::api::ExplorerSession;
use binomial_explorer::core::Viewport;
use binomial_explorer::interaction::InputEvent;
use binomial_explorer::render::CairoRenderer;
use binomial_explorer::{ExplorerConfig, ExplorerError};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ExplorerError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_markers_for_both_panels() {
    let config = ExplorerConfig::default();
    let renderer = CairoRenderer::new(960, 700).expect("renderer");
    let session = ExplorerSession::new(renderer, config).expect("session");
    let frame_markers = session.frame().markers.len();

    let renderer = session.into_renderer();
    let stats = renderer.last_stats();
    assert_eq!(stats.markers_drawn, frame_markers);
    assert!(stats.lines_drawn > 0);
    assert!(stats.texts_drawn > 0);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let mut session = ExplorerSession::new(renderer, ExplorerConfig::default()).expect("session");
    session
        .handle(InputEvent::SetTrials(30))
        .expect("set trials");

    let surface = ImageSurface::create(Format::ARgb32, 800, 500).expect("surface");
    let context = Context::new(&surface).expect("context");
    session
        .render_on_cairo_context(&context, Viewport::new(800, 500))
        .expect("render on context");

    assert!(session.renderer().last_stats().markers_drawn > 0);
}
