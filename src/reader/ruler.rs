//! Reading ruler placement.

/// Client-space rectangle, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Where the ruler overlay sits, in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulerPlacement {
    pub top: f64,
    pub left: f64,
    pub width: f64,
}

/// Distance between the pointer and the ruler's top edge.
pub const RULER_OFFSET_PX: f64 = 20.0;

/// Placement for a pointer at `(x, y)`, or `None` when the ruler should stay
/// where it is.
pub fn place_ruler(text_region: Rect, x: f64, y: f64) -> Option<RulerPlacement> {
    if !text_region.contains(x, y) {
        return None;
    }
    Some(RulerPlacement {
        top: y - RULER_OFFSET_PX,
        left: text_region.left,
        width: text_region.width,
    })
}
