mod composer;
mod config;
mod figure;
mod frame_builder;
mod json_contract;
mod pipeline;
mod session;
mod summary;
mod ticks;

pub use composer::{
    BINOMIAL_SERIES, CONTINUITY_SERIES, CUMULATIVE_PANEL_TITLE, CURSOR_SERIES,
    DENSITY_PANEL_TITLE, NORMAL_SERIES, compose_figure,
};
pub use config::ExplorerConfig;
pub use figure::{Figure, FigureLayout, Panel, Series, SeriesMode, SeriesStyle};
pub use frame_builder::{
    PanelRect, build_render_frame, panel_rects, panel_y_domain, shared_x_domain,
};
pub use json_contract::{FIGURE_JSON_SCHEMA_V1, FigureJsonContractV1};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use session::{ExplorerSession, SessionPhase, SessionUpdate};
pub use summary::{FORMULA_LINES, MomentSummary, PAGE_TITLE, format_moment};
