use tracing::trace;

use crate::core::{DataPoint, DistributionEvaluation};
use crate::error::ExplorerResult;
use crate::render::{Color, LineStrokeStyle};

use super::figure::{Figure, FigureLayout, Panel, Series, SeriesMode, SeriesStyle};

pub const DENSITY_PANEL_TITLE: &str =
    "Probability Mass Function / Probability Density Function";
pub const CUMULATIVE_PANEL_TITLE: &str = "Cumulative Distribution Function";

pub const BINOMIAL_SERIES: &str = "binom";
pub const NORMAL_SERIES: &str = "norm";
pub const CONTINUITY_SERIES: &str = "continuity correction";
pub const CURSOR_SERIES: &str = "y";

const BINOMIAL_COLOR: u32 = 0x636efa;
const NORMAL_COLOR: u32 = 0xef553b;
const CONTINUITY_COLOR: u32 = 0x00cc96;

fn cursor_style() -> SeriesStyle {
    SeriesStyle {
        color: Color::rgb(1.0, 0.0, 0.0),
        stroke: LineStrokeStyle::Dashed,
    }
}

fn solid(rgb: u32) -> SeriesStyle {
    SeriesStyle {
        color: Color::from_hex(rgb),
        stroke: LineStrokeStyle::Solid,
    }
}

/// Assembles the two-panel figure for one evaluation and cursor position.
///
/// Panel 0 holds the PMF markers, the normal PDF curve and the cursor segment
/// up to the PDF. Panel 1 holds the CDF markers, the normal CDF, the
/// continuity-corrected CDF and a full-height cursor segment.
pub fn compose_figure(
    evaluation: &DistributionEvaluation,
    cursor: f64,
    layout: FigureLayout,
) -> ExplorerResult<Figure> {
    let mut figure = Figure::new(layout);

    let mut density = Panel::new(DENSITY_PANEL_TITLE);
    density.push(
        Series::new(BINOMIAL_SERIES, SeriesMode::Markers, solid(BINOMIAL_COLOR)).with_points(
            evaluation
                .discrete
                .iter()
                .map(|sample| DataPoint::new(sample.x as f64, sample.pmf))
                .collect(),
        ),
    );
    density.push(
        Series::new(NORMAL_SERIES, SeriesMode::Lines, solid(NORMAL_COLOR)).with_points(
            evaluation
                .continuous
                .iter()
                .map(|sample| DataPoint::new(sample.x, sample.pdf))
                .collect(),
        ),
    );
    density.push(cursor_segment(cursor, evaluation.normal_pdf_at(cursor)?));

    let mut cumulative = Panel::new(CUMULATIVE_PANEL_TITLE);
    cumulative.push(
        Series::new(BINOMIAL_SERIES, SeriesMode::Markers, solid(BINOMIAL_COLOR)).with_points(
            evaluation
                .discrete
                .iter()
                .map(|sample| DataPoint::new(sample.x as f64, sample.cdf))
                .collect(),
        ),
    );
    cumulative.push(
        Series::new(NORMAL_SERIES, SeriesMode::Lines, solid(NORMAL_COLOR)).with_points(
            evaluation
                .continuous
                .iter()
                .map(|sample| DataPoint::new(sample.x, sample.cdf))
                .collect(),
        ),
    );
    cumulative.push(
        Series::new(CONTINUITY_SERIES, SeriesMode::Lines, solid(CONTINUITY_COLOR)).with_points(
            evaluation
                .continuous
                .iter()
                .map(|sample| DataPoint::new(sample.x, sample.corrected_cdf))
                .collect(),
        ),
    );
    cumulative.push(cursor_segment(cursor, 1.0));

    figure.panels.push(density);
    figure.panels.push(cumulative);

    trace!(
        series = figure.series_count(),
        cursor,
        "composed binomial figure"
    );
    Ok(figure)
}

fn cursor_segment(cursor: f64, top: f64) -> Series {
    Series::new(CURSOR_SERIES, SeriesMode::Lines, cursor_style())
        .with_points(vec![DataPoint::new(cursor, 0.0), DataPoint::new(cursor, top)])
}
