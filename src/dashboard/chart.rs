//! Chart models and their pixel layout.
//!
//! Layout is pure so it can be checked without a canvas; the browser build
//! only strokes and fills what these functions return.

/// Plot margins inside the canvas, in pixels.
pub const MARGIN_LEFT: f64 = 48.0;
pub const MARGIN_RIGHT: f64 = 48.0;
pub const MARGIN_TOP: f64 = 36.0;
pub const MARGIN_BOTTOM: f64 = 36.0;

pub const SPEED_COLOR: &str = "#4A90E2";
pub const ACCURACY_COLOR: &str = "#7ED321";

/// Bar fill/border pairs, cycled per bar.
pub const BAR_PALETTE: [(&str, &str); 5] = [
    ("rgba(74, 144, 226, 0.8)", "#4A90E2"),
    ("rgba(126, 211, 33, 0.8)", "#7ED321"),
    ("rgba(245, 166, 35, 0.8)", "#F5A623"),
    ("rgba(208, 2, 27, 0.8)", "#D0021B"),
    ("rgba(156, 39, 176, 0.8)", "#9C27B0"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub color: &'static str,
    pub axis: Axis,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Fixed top of the value axis.
    pub y_max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub fn plot_area(canvas_width: f64, canvas_height: f64) -> PlotArea {
    PlotArea {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: (canvas_width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0),
        height: (canvas_height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
    }
}

/// Rounded-up axis maximum for `values`; never zero so scaling stays finite.
pub fn axis_max(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    (max / magnitude).ceil() * magnitude
}

/// Canvas points of one series. A single point is centred horizontally.
pub fn line_points(area: PlotArea, values: &[f64], y_max: f64) -> Vec<(f64, f64)> {
    let step = if values.len() > 1 {
        area.width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if values.len() > 1 {
                area.left + step * i as f64
            } else {
                area.left + area.width / 2.0
            };
            (x, scale_y(area, *v, y_max))
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One rectangle per value, each centred in an equal slot with a gap of a
/// fifth of the slot on either side.
pub fn bar_rects(area: PlotArea, values: &[f64], y_max: f64) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let slot = area.width / values.len() as f64;
    let gap = slot / 5.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let y = scale_y(area, *v, y_max);
            BarRect {
                x: area.left + slot * i as f64 + gap,
                y,
                width: slot - 2.0 * gap,
                height: area.bottom() - y,
            }
        })
        .collect()
}

pub fn bar_colors(index: usize) -> (&'static str, &'static str) {
    BAR_PALETTE[index % BAR_PALETTE.len()]
}

fn scale_y(area: PlotArea, value: f64, y_max: f64) -> f64 {
    let ratio = if y_max > 0.0 { (value / y_max).clamp(0.0, 1.0) } else { 0.0 };
    area.bottom() - ratio * area.height
}
