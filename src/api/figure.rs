use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::DataPoint;
use crate::error::{ExplorerError, ExplorerResult};
use crate::render::{Color, LineStrokeStyle};

/// Fixed layout numbers for the two-panel figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    #[serde(default = "default_width_px")]
    pub width_px: u32,
    #[serde(default = "default_height_px")]
    pub height_px: u32,
    /// Gap between stacked panels as a fraction of the plotting height.
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f64,
    #[serde(default = "default_marker_size_px")]
    pub marker_size_px: f64,
    #[serde(default = "default_marker_outline_px")]
    pub marker_outline_px: f64,
    #[serde(default = "default_line_width_px")]
    pub line_width_px: f64,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            width_px: default_width_px(),
            height_px: default_height_px(),
            vertical_spacing: default_vertical_spacing(),
            marker_size_px: default_marker_size_px(),
            marker_outline_px: default_marker_outline_px(),
            line_width_px: default_line_width_px(),
        }
    }
}

impl FigureLayout {
    pub fn validate(self) -> ExplorerResult<()> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(ExplorerError::InvalidViewport {
                width: self.width_px,
                height: self.height_px,
            });
        }
        if !self.vertical_spacing.is_finite() || !(0.0..1.0).contains(&self.vertical_spacing) {
            return Err(ExplorerError::InvalidConfig(format!(
                "vertical spacing must be in [0, 1), got {}",
                self.vertical_spacing
            )));
        }
        for (name, value) in [
            ("marker size", self.marker_size_px),
            ("line width", self.line_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExplorerError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.marker_outline_px.is_finite() || self.marker_outline_px < 0.0 {
            return Err(ExplorerError::InvalidConfig(
                "marker outline must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_width_px() -> u32 {
    960
}

fn default_height_px() -> u32 {
    700
}

fn default_vertical_spacing() -> f64 {
    0.08
}

fn default_marker_size_px() -> f64 {
    12.0
}

fn default_marker_outline_px() -> f64 {
    2.0
}

fn default_line_width_px() -> f64 {
    2.0
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesMode {
    /// One marker per point, no connecting line.
    Markers,
    /// Adjacent points joined by line segments.
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub stroke: LineStrokeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub mode: SeriesMode,
    pub style: SeriesStyle,
    pub points: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, mode: SeriesMode, style: SeriesStyle) -> Self {
        Self {
            name: name.into(),
            mode,
            style,
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self
    }

    /// `(min, max)` over every finite y value.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        finite_extent(self.points.iter().map(|point| point.y))
    }

    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        finite_extent(self.points.iter().map(|point| point.x))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub series: SmallVec<[Series; 4]>,
}

impl Panel {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: SmallVec::new(),
        }
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    #[must_use]
    pub fn series_named(&self, name: &str) -> Vec<&Series> {
        self.series.iter().filter(|series| series.name == name).collect()
    }

    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        merge_extents(self.series.iter().filter_map(Series::y_extent))
    }

    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        merge_extents(self.series.iter().filter_map(Series::x_extent))
    }
}

/// Vertically stacked panels sharing one x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub layout: FigureLayout,
    pub panels: SmallVec<[Panel; 2]>,
}

impl Figure {
    #[must_use]
    pub fn new(layout: FigureLayout) -> Self {
        Self {
            layout,
            panels: SmallVec::new(),
        }
    }

    /// Shared x range across every panel.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        merge_extents(self.panels.iter().filter_map(Panel::x_extent))
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.panels.iter().map(|panel| panel.series.len()).sum()
    }

    /// Unique series names in first-appearance order with the style of the
    /// first series carrying that name.
    #[must_use]
    pub fn legend(&self) -> IndexMap<String, (SeriesMode, SeriesStyle)> {
        let mut entries = IndexMap::new();
        for series in self.panels.iter().flat_map(|panel| panel.series.iter()) {
            entries
                .entry(series.name.clone())
                .or_insert((series.mode, series.style));
        }
        entries
    }
}

fn finite_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

fn merge_extents(extents: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    extents.fold(None, |merged, (min, max)| match merged {
        None => Some((min, max)),
        Some((merged_min, merged_max)) => Some((merged_min.min(min), merged_max.max(max))),
    })
}
