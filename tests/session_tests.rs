use binomial_explorer::api::{ExplorerSession, SessionPhase, SessionUpdate};
use binomial_explorer::interaction::InputEvent;
use binomial_explorer::render::{NullRenderer, RenderFrame, Renderer};
use binomial_explorer::{ExplorerConfig, ExplorerError, ExplorerResult};

#[derive(Debug, Default)]
struct FlakyRenderer {
    fail_next: bool,
    frames: usize,
}

impl Renderer for FlakyRenderer {
    fn render(&mut self, _frame: &RenderFrame) -> ExplorerResult<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(ExplorerError::InvalidData("backend unavailable".to_owned()));
        }
        self.frames += 1;
        Ok(())
    }
}

#[test]
fn new_session_renders_the_default_snapshot() {
    let session =
        ExplorerSession::new(NullRenderer::default(), ExplorerConfig::default()).expect("session");

    assert_eq!(session.passes(), 1);
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.renderer().frames_rendered, 1);

    let output = session.output();
    assert_eq!(output.snapshot.trials, 5);
    assert_eq!(output.snapshot.cursor(), 2.0);
    assert_eq!(output.summary.lines(), ["E[Y]=2.0", "V[Y]=1.2"]);
    assert_eq!(output.figure.panels.len(), 2);
    assert!(!session.frame().is_empty());
}

#[test]
fn changing_trials_reruns_the_pipeline_and_resets_cursor() {
    let mut session =
        ExplorerSession::new(NullRenderer::default(), ExplorerConfig::default()).expect("session");

    let update = session.handle(InputEvent::SetTrials(100)).expect("update");
    assert_eq!(update, SessionUpdate::Rendered);
    assert_eq!(session.passes(), 2);
    assert_eq!(session.renderer().frames_rendered, 2);

    let output = session.output();
    assert_eq!(output.summary.lines(), ["E[Y]=40.0", "V[Y]=24.0"]);
    assert_eq!(output.snapshot.cursor(), 100.0 * 0.4);
    assert_eq!(output.evaluation.discrete.first().map(|s| s.x), Some(29));
    assert_eq!(output.evaluation.discrete.last().map(|s| s.x), Some(52));
}

#[test]
fn cursor_only_change_keeps_distribution_output() {
    let mut session =
        ExplorerSession::new(NullRenderer::default(), ExplorerConfig::default()).expect("session");
    let before = session.output().evaluation.clone();

    let update = session.handle(InputEvent::SetCursor(3.5)).expect("update");
    assert_eq!(update, SessionUpdate::Rendered);
    assert_eq!(session.snapshot().cursor(), 3.5);
    assert_eq!(session.output().evaluation, before);
}

#[test]
fn unchanged_event_skips_recompute() {
    let mut session =
        ExplorerSession::new(NullRenderer::default(), ExplorerConfig::default()).expect("session");

    let update = session.handle(InputEvent::SetTrials(5)).expect("update");
    assert_eq!(update, SessionUpdate::Unchanged);
    assert_eq!(session.passes(), 1);
    assert_eq!(session.renderer().frames_rendered, 1);
}

#[test]
fn returning_to_a_snapshot_reproduces_its_output() {
    let mut session =
        ExplorerSession::new(NullRenderer::default(), ExplorerConfig::default()).expect("session");
    let initial = session.output().clone();

    session.handle(InputEvent::SetProbability(0.7)).expect("probability");
    session.handle(InputEvent::SetProbability(0.4)).expect("probability back");

    assert_eq!(session.output(), &initial);
    assert_eq!(session.passes(), 3);
}

#[test]
fn failed_pass_keeps_previous_output_and_session_recovers() {
    let mut session =
        ExplorerSession::new(FlakyRenderer::default(), ExplorerConfig::default()).expect("session");
    let before = session.output().clone();

    session.renderer_mut().fail_next = true;
    let err = session
        .handle(InputEvent::SetTrials(20))
        .expect_err("render failure must surface");
    assert!(matches!(err, ExplorerError::InvalidData(_)));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.output(), &before);
    assert_eq!(session.passes(), 1);

    // Controls already moved; the next event renders normally.
    assert_eq!(session.snapshot().trials, 20);
    let update = session.handle(InputEvent::SetCursor(7.0)).expect("recovered");
    assert_eq!(update, SessionUpdate::Rendered);
    assert_eq!(session.output().snapshot.trials, 20);
    assert_eq!(session.renderer().frames, 2);
}

#[test]
fn invalid_config_is_rejected_before_first_pass() {
    let config = ExplorerConfig::default().with_continuous_sample_count(1);
    assert!(ExplorerSession::new(NullRenderer::default(), config).is_err());
}

#[test]
fn frame_for_viewport_reuses_current_figure() {
    let session =
        ExplorerSession::new(NullRenderer::default(), ExplorerConfig::default()).expect("session");
    let frame = session
        .frame_for_viewport(binomial_explorer::core::Viewport::new(640, 480))
        .expect("frame");
    assert_eq!(frame.viewport.width, 640);
    assert_eq!(frame.markers.len(), session.frame().markers.len());
    assert_eq!(session.passes(), 1);
}
