use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Viewport;
use crate::error::ExplorerResult;
use crate::interaction::{ControlChange, ControlSnapshot, ControlState, InputEvent};
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::config::ExplorerConfig;
use super::frame_builder::build_render_frame;
use super::pipeline::{PipelineOutput, run_pipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Showing the output of the last successful pass.
    Idle,
    /// A pass is running; never observed from outside `handle`.
    Recomputing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionUpdate {
    /// The event changed the snapshot and a new output replaced the old one.
    Rendered,
    /// The event left every control as it was; nothing was recomputed.
    Unchanged,
}

/// One interactive explorer session.
///
/// Every snapshot-changing event reruns evaluator, composer, rasterizer and
/// renderer top to bottom. A failed pass leaves the previous output in place
/// and returns the error; the session accepts the next event normally.
pub struct ExplorerSession<R: Renderer> {
    renderer: R,
    config: ExplorerConfig,
    controls: ControlState,
    phase: SessionPhase,
    output: PipelineOutput,
    frame: RenderFrame,
    passes: u64,
}

impl<R: Renderer> ExplorerSession<R> {
    /// Validates `config` and runs the initial pass.
    pub fn new(mut renderer: R, config: ExplorerConfig) -> ExplorerResult<Self> {
        config.validate()?;
        let controls = ControlState::new(config.controls)?;
        let (output, frame) = render_pass(&mut renderer, controls.snapshot(), &config)?;
        debug!(
            trials = controls.trials(),
            probability = controls.probability(),
            "explorer session started"
        );
        Ok(Self {
            renderer,
            config,
            controls,
            phase: SessionPhase::Idle,
            output,
            frame,
            passes: 1,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    #[must_use]
    pub fn snapshot(&self) -> ControlSnapshot {
        self.controls.snapshot()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Output of the last successful pass.
    #[must_use]
    pub fn output(&self) -> &PipelineOutput {
        &self.output
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// Number of successful passes, the initial one included.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn handle(&mut self, event: InputEvent) -> ExplorerResult<SessionUpdate> {
        match self.controls.apply(event) {
            ControlChange::Unchanged => Ok(SessionUpdate::Unchanged),
            ControlChange::CursorMoved | ControlChange::ParamsChanged => {
                self.refresh()?;
                Ok(SessionUpdate::Rendered)
            }
        }
    }

    /// Reruns the full pass for the current snapshot.
    pub fn refresh(&mut self) -> ExplorerResult<()> {
        self.phase = SessionPhase::Recomputing;
        let result = render_pass(&mut self.renderer, self.controls.snapshot(), &self.config);
        self.phase = SessionPhase::Idle;

        match result {
            Ok((output, frame)) => {
                self.output = output;
                self.frame = frame;
                self.passes += 1;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, snapshot = ?self.controls.snapshot(), "pipeline pass failed");
                Err(err)
            }
        }
    }

    /// Rasterizes the current figure for a different viewport without
    /// recomputing distributions.
    pub fn frame_for_viewport(&self, viewport: Viewport) -> ExplorerResult<RenderFrame> {
        build_render_frame(&self.output.figure, viewport)
    }

    /// Draws the current figure into an external cairo context sized `viewport`.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        viewport: Viewport,
    ) -> ExplorerResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.frame_for_viewport(viewport)?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}

fn render_pass<R: Renderer>(
    renderer: &mut R,
    snapshot: ControlSnapshot,
    config: &ExplorerConfig,
) -> ExplorerResult<(PipelineOutput, RenderFrame)> {
    let output = run_pipeline(snapshot, config)?;
    let frame = build_render_frame(&output.figure, config.viewport())?;
    renderer.render(&frame)?;
    Ok((output, frame))
}
