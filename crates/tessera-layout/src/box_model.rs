//! Box model types.
//!
//! A [`BoxRequest`] describes what a child asks for (configured and natural
//! size, bounds, flex, margins); a [`BoxResult`] is what a solver hands back.
//! Both are rebuilt on every layout pass and never persisted.

use serde::Serialize;

pub use tessera_component::{Rect, Sides, Size};

/// Axis along which a linear box layout arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Orientation {
    /// hbox: the main axis is horizontal.
    #[default]
    Horizontal,
    /// vbox: the main axis is vertical.
    Vertical,
}

impl Orientation {
    /// Main-axis component of a size.
    #[must_use]
    pub const fn main(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Cross-axis component of a size.
    #[must_use]
    pub const fn cross(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Build a size from main and cross lengths.
    #[must_use]
    pub const fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Leading spacing on the main axis (left or top).
    #[must_use]
    pub const fn main_start(self, sides: Sides) -> i32 {
        match self {
            Self::Horizontal => sides.left,
            Self::Vertical => sides.top,
        }
    }

    /// Trailing spacing on the main axis (right or bottom).
    #[must_use]
    pub const fn main_end(self, sides: Sides) -> i32 {
        match self {
            Self::Horizontal => sides.right,
            Self::Vertical => sides.bottom,
        }
    }

    /// Leading spacing on the cross axis (top or left).
    #[must_use]
    pub const fn cross_start(self, sides: Sides) -> i32 {
        match self {
            Self::Horizontal => sides.top,
            Self::Vertical => sides.left,
        }
    }

    /// Total spacing on the main axis.
    #[must_use]
    pub const fn main_sides(self, sides: Sides) -> i32 {
        match self {
            Self::Horizontal => sides.horizontal(),
            Self::Vertical => sides.vertical(),
        }
    }

    /// Total spacing on the cross axis.
    #[must_use]
    pub const fn cross_sides(self, sides: Sides) -> i32 {
        match self {
            Self::Horizontal => sides.vertical(),
            Self::Vertical => sides.horizontal(),
        }
    }
}

/// Clamp `value` to optional bounds; the lower bound wins when they conflict.
#[must_use]
pub fn constrain(value: i32, min: Option<i32>, max: Option<i32>) -> i32 {
    let capped = max.map_or(value, |max| value.min(max));
    min.map_or(capped, |min| capped.max(min))
}

/// A child's sizing request for one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxRequest {
    /// Configured width; `None` means auto.
    pub width: Option<i32>,
    /// Configured height; `None` means auto.
    pub height: Option<i32>,
    /// Measured intrinsic size, used on auto axes.
    pub natural: Size,
    /// Lower width bound.
    pub min_width: Option<i32>,
    /// Lower height bound.
    pub min_height: Option<i32>,
    /// Upper width bound.
    pub max_width: Option<i32>,
    /// Upper height bound.
    pub max_height: Option<i32>,
    /// Relative weight for leftover main-axis space; 0 is fixed.
    pub flex: f64,
    /// Outer spacing.
    pub margins: Sides,
}

impl BoxRequest {
    /// A box with a configured width and height.
    #[must_use]
    pub fn fixed(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            natural: Size::new(width, height),
            ..Self::default()
        }
    }

    /// An auto-sized box whose intrinsic size is `natural`.
    #[must_use]
    pub fn natural(natural: Size) -> Self {
        Self {
            natural,
            ..Self::default()
        }
    }

    /// Builder: flex weight.
    #[must_use]
    pub const fn with_flex(mut self, flex: f64) -> Self {
        self.flex = flex;
        self
    }

    /// Builder: margins.
    #[must_use]
    pub const fn with_margins(mut self, margins: Sides) -> Self {
        self.margins = margins;
        self
    }

    /// Builder: width bounds.
    #[must_use]
    pub const fn with_width_bounds(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Builder: height bounds.
    #[must_use]
    pub const fn with_height_bounds(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Configured main-axis size.
    #[must_use]
    pub const fn main_size(&self, orientation: Orientation) -> Option<i32> {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Configured cross-axis size.
    #[must_use]
    pub const fn cross_size(&self, orientation: Orientation) -> Option<i32> {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }

    /// Main-axis bounds `(min, max)`.
    #[must_use]
    pub const fn main_bounds(&self, orientation: Orientation) -> (Option<i32>, Option<i32>) {
        match orientation {
            Orientation::Horizontal => (self.min_width, self.max_width),
            Orientation::Vertical => (self.min_height, self.max_height),
        }
    }

    /// Cross-axis bounds `(min, max)`.
    #[must_use]
    pub const fn cross_bounds(&self, orientation: Orientation) -> (Option<i32>, Option<i32>) {
        match orientation {
            Orientation::Horizontal => (self.min_height, self.max_height),
            Orientation::Vertical => (self.min_width, self.max_width),
        }
    }

    /// Whether leftover main-axis space is shared with this box.
    ///
    /// A configured main size always wins over flex.
    #[must_use]
    pub fn is_flexed(&self, orientation: Orientation) -> bool {
        self.flex > 0.0 && self.main_size(orientation).is_none()
    }

    /// Main size before any distribution: configured or natural, clamped.
    #[must_use]
    pub fn resolved_main(&self, orientation: Orientation) -> i32 {
        let (min, max) = self.main_bounds(orientation);
        let size = self
            .main_size(orientation)
            .unwrap_or_else(|| orientation.main(self.natural));
        constrain(size, min, max)
    }

    /// Cross size before alignment: configured or natural, clamped.
    #[must_use]
    pub fn resolved_cross(&self, orientation: Orientation) -> i32 {
        let (min, max) = self.cross_bounds(orientation);
        let size = self
            .cross_size(orientation)
            .unwrap_or_else(|| orientation.cross(self.natural));
        constrain(size, min, max)
    }

    /// Smallest main size the box may be shrunk to.
    ///
    /// Flexed boxes can shrink to their minimum (or nothing); fixed boxes to
    /// their minimum, or not at all when they declare none.
    #[must_use]
    pub fn floor_main(&self, orientation: Orientation) -> i32 {
        let (min, _) = self.main_bounds(orientation);
        if self.is_flexed(orientation) {
            min.unwrap_or(0)
        } else {
            min.unwrap_or_else(|| self.resolved_main(orientation))
        }
    }

    /// This box's contribution to the layout's minimum main length.
    #[must_use]
    pub fn minimum_outer_main(&self, orientation: Orientation) -> i32 {
        self.floor_main(orientation) + orientation.main_sides(self.margins)
    }
}

/// Computed geometry of one box, relative to the container's content origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxResult {
    /// Left edge of the border box.
    pub left: i32,
    /// Top edge of the border box.
    pub top: i32,
    /// Computed width.
    pub width: i32,
    /// Computed height.
    pub height: i32,
}

impl BoxResult {
    /// The result as a rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}
