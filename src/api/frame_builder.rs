use tracing::trace;

use crate::core::{DataPoint, LinearScale, Viewport};
use crate::error::{ExplorerError, ExplorerResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::figure::{Figure, FigureLayout, Panel, Series, SeriesMode, SeriesStyle};
use super::ticks::{
    AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX, axis_tick_target_count, format_tick,
    nice_ticks,
};

const MARGIN_LEFT_PX: f64 = 64.0;
const MARGIN_TOP_PX: f64 = 40.0;
const MARGIN_BOTTOM_PX: f64 = 40.0;
const LEGEND_WIDTH_PX: f64 = 180.0;
const LEGEND_ROW_HEIGHT_PX: f64 = 22.0;
const LEGEND_SAMPLE_WIDTH_PX: f64 = 26.0;
const MIN_PLOT_SPAN_PX: f64 = 40.0;
const TITLE_FONT_PX: f64 = 14.0;
const TICK_FONT_PX: f64 = 11.0;
const LEGEND_FONT_PX: f64 = 12.0;
const X_PADDING_RATIO: f64 = 0.04;
const Y_HEADROOM_RATIO: f64 = 0.06;

const PLOT_BACKGROUND: Color = Color::rgb(0.898, 0.925, 0.965);
const GRID_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);
const TEXT_COLOR: Color = Color::rgb(0.165, 0.247, 0.373);
const MARKER_OUTLINE: Color = Color::rgb(0.267, 0.267, 0.267);

/// Pixel rectangle of one panel's plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelRect {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Splits the viewport into stacked panel rects separated by
/// `vertical_spacing` of the plotting height, leaving room for the legend.
pub fn panel_rects(
    viewport: Viewport,
    panel_count: usize,
    vertical_spacing: f64,
) -> ExplorerResult<Vec<PanelRect>> {
    if !viewport.is_valid() {
        return Err(ExplorerError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if panel_count == 0 {
        return Ok(Vec::new());
    }

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let legend_width = LEGEND_WIDTH_PX.min(width * 0.25);
    let plot_width = width - MARGIN_LEFT_PX - legend_width;
    let plot_height = height - MARGIN_TOP_PX - MARGIN_BOTTOM_PX;
    if plot_width < MIN_PLOT_SPAN_PX || plot_height < MIN_PLOT_SPAN_PX {
        return Err(ExplorerError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let gap = plot_height * vertical_spacing;
    let gaps = gap * (panel_count - 1) as f64;
    let panel_height = (plot_height - gaps) / panel_count as f64;
    if panel_height <= 0.0 {
        return Err(ExplorerError::InvalidConfig(format!(
            "vertical spacing {vertical_spacing} leaves no room for {panel_count} panels"
        )));
    }

    Ok((0..panel_count)
        .map(|index| PanelRect {
            left: MARGIN_LEFT_PX,
            top: MARGIN_TOP_PX + index as f64 * (panel_height + gap),
            width: plot_width,
            height: panel_height,
        })
        .collect())
}

/// Shared x domain: the figure's x extent padded on both sides.
#[must_use]
pub fn shared_x_domain(figure: &Figure) -> (f64, f64) {
    let (min, max) = figure.x_extent().unwrap_or((0.0, 1.0));
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * X_PADDING_RATIO, max + span * X_PADDING_RATIO)
}

/// Panel y domain anchored at zero with headroom above the tallest value.
#[must_use]
pub fn panel_y_domain(panel: &Panel) -> (f64, f64) {
    let (min, max) = panel.y_extent().unwrap_or((0.0, 1.0));
    let low = min.min(0.0);
    let high = if max > low { max } else { low + 1.0 };
    (low, high + (high - low) * Y_HEADROOM_RATIO)
}

/// Projects a figure into backend-agnostic primitives for `viewport`.
///
/// Non-finite points are skipped; an empty series contributes nothing.
pub fn build_render_frame(figure: &Figure, viewport: Viewport) -> ExplorerResult<RenderFrame> {
    let layout = figure.layout;
    let rects = panel_rects(viewport, figure.panels.len(), layout.vertical_spacing)?;
    let mut frame = RenderFrame::new(viewport);

    let x_domain = shared_x_domain(figure);
    let last_index = figure.panels.len().saturating_sub(1);

    for (index, (panel, rect)) in figure.panels.iter().zip(rects.iter().copied()).enumerate() {
        let x_scale = LinearScale::new(x_domain, (rect.left, rect.right()))?;
        let y_scale = LinearScale::new(panel_y_domain(panel), (rect.bottom(), rect.top))?;

        frame.push_rect(RectPrimitive::new(
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            PLOT_BACKGROUND,
        ));
        push_grid(&mut frame, rect, x_scale, y_scale, index == last_index)?;
        frame.push_text(TextPrimitive::new(
            panel.title.clone(),
            rect.left + rect.width / 2.0,
            rect.top - TITLE_FONT_PX * 1.8,
            TITLE_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Center,
        ));

        for series in &panel.series {
            push_series(&mut frame, series, layout, x_scale, y_scale)?;
        }
    }

    if let Some(first) = rects.first() {
        push_legend(&mut frame, figure, layout, first.right() + 16.0, first.top);
    }

    trace!(
        lines = frame.lines.len(),
        markers = frame.markers.len(),
        texts = frame.texts.len(),
        "built figure render frame"
    );
    Ok(frame)
}

fn push_grid(
    frame: &mut RenderFrame,
    rect: PanelRect,
    x_scale: LinearScale,
    y_scale: LinearScale,
    draw_x_labels: bool,
) -> ExplorerResult<()> {
    let x_count = axis_tick_target_count(rect.width, AXIS_X_TARGET_SPACING_PX, 2, 12);
    let (x_ticks, x_step) = nice_ticks(x_scale.domain(), x_count);
    for value in x_ticks {
        let x = x_scale.to_pixel(value)?;
        frame.push_line(LinePrimitive::new(x, rect.top, x, rect.bottom(), 1.0, GRID_COLOR));
        if draw_x_labels {
            frame.push_text(TextPrimitive::new(
                format_tick(value, x_step),
                x,
                rect.bottom() + 6.0,
                TICK_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }
    }

    let y_count = axis_tick_target_count(rect.height, AXIS_Y_TARGET_SPACING_PX, 2, 8);
    let (y_ticks, y_step) = nice_ticks(y_scale.domain(), y_count);
    for value in y_ticks {
        let y = y_scale.to_pixel(value)?;
        frame.push_line(LinePrimitive::new(rect.left, y, rect.right(), y, 1.0, GRID_COLOR));
        frame.push_text(TextPrimitive::new(
            format_tick(value, y_step),
            rect.left - 6.0,
            y - TICK_FONT_PX * 0.7,
            TICK_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Right,
        ));
    }
    Ok(())
}

fn push_series(
    frame: &mut RenderFrame,
    series: &Series,
    layout: FigureLayout,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ExplorerResult<()> {
    let mut projected = Vec::with_capacity(series.points.len());
    for point in series.points.iter().copied().filter(|point| point.is_finite()) {
        projected.push(project(point, x_scale, y_scale)?);
    }

    match series.mode {
        SeriesMode::Lines => {
            for pair in projected.windows(2) {
                frame.push_line(
                    LinePrimitive::new(
                        pair[0].0,
                        pair[0].1,
                        pair[1].0,
                        pair[1].1,
                        layout.line_width_px,
                        series.style.color,
                    )
                    .with_stroke_style(series.style.stroke),
                );
            }
        }
        SeriesMode::Markers => {
            for (x, y) in projected {
                frame.push_marker(
                    RectPrimitive::circle(x, y, layout.marker_size_px, series.style.color)
                        .with_border(layout.marker_outline_px, MARKER_OUTLINE),
                );
            }
        }
    }
    Ok(())
}

fn project(
    point: DataPoint,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ExplorerResult<(f64, f64)> {
    Ok((x_scale.to_pixel(point.x)?, y_scale.to_pixel(point.y)?))
}

fn push_legend(
    frame: &mut RenderFrame,
    figure: &Figure,
    layout: FigureLayout,
    left: f64,
    top: f64,
) {
    for (row, (name, (mode, style))) in figure.legend().into_iter().enumerate() {
        let center_y = top + LEGEND_ROW_HEIGHT_PX * (row as f64 + 0.5);
        push_legend_sample(frame, mode, style, layout, left, center_y);
        frame.push_text(TextPrimitive::new(
            name,
            left + LEGEND_SAMPLE_WIDTH_PX + 8.0,
            center_y - LEGEND_FONT_PX * 0.7,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Left,
        ));
    }
}

fn push_legend_sample(
    frame: &mut RenderFrame,
    mode: SeriesMode,
    style: SeriesStyle,
    layout: FigureLayout,
    left: f64,
    center_y: f64,
) {
    match mode {
        SeriesMode::Lines => frame.push_line(
            LinePrimitive::new(
                left,
                center_y,
                left + LEGEND_SAMPLE_WIDTH_PX,
                center_y,
                layout.line_width_px,
                style.color,
            )
            .with_stroke_style(style.stroke),
        ),
        SeriesMode::Markers => frame.push_marker(
            RectPrimitive::circle(
                left + LEGEND_SAMPLE_WIDTH_PX / 2.0,
                center_y,
                layout.marker_size_px,
                style.color,
            )
            .with_border(layout.marker_outline_px, MARKER_OUTLINE),
        ),
    }
}
