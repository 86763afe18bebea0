//! Border layout regions.
//!
//! Every non-center region runs a small state machine:
//!
//! ```text
//! Expanded --collapse--> Collapsed --slide_out--> Floating
//!    ^                      |  ^                     |
//!    +-------expand---------+  +--slide_in/outside---+
//!    +-------expand-----------------------------------+
//! ```
//!
//! A collapse or expand started with animation stays pending until the host
//! reports the animation finished; no other transition is accepted meanwhile.

use serde::Serialize;
use tessera_component::{ComponentId, Rect, RegionName, Sides};

use crate::error::LayoutError;

/// Thickness of a collapsed region's placeholder.
pub const DEFAULT_COLLAPSED_SIZE: i32 = 25;
/// Thickness of a splitter bar.
pub const DEFAULT_SPLIT_SIZE: i32 = 5;
/// Smallest size a splitter can drag a region to.
pub const DEFAULT_MIN_SIZE: i32 = 50;
/// Largest size a splitter can drag a region to.
pub const DEFAULT_MAX_SIZE: i32 = 500;
/// Smallest size the center keeps when a splitter moves.
pub const DEFAULT_CENTER_MIN: i32 = 50;

/// Margins of a collapsed region when it configures no `cmargins`.
#[must_use]
pub const fn default_cmargins(region: RegionName) -> Sides {
    match region {
        RegionName::North | RegionName::South | RegionName::Center => Sides::uniform(5),
        RegionName::East | RegionName::West => Sides::new(0, 5, 0, 5),
    }
}

/// Where a region is in its collapse cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegionState {
    /// Full size, taking space from the center.
    Expanded,
    /// Reduced to a placeholder.
    Collapsed,
    /// Collapsed, with the component shown as an overlay.
    Floating,
}

/// A collapse or expand in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Transition {
    /// Going to [`RegionState::Collapsed`].
    Collapse,
    /// Going to [`RegionState::Expanded`].
    Expand,
}

impl Transition {
    const fn name(self) -> &'static str {
        match self {
            Self::Collapse => "collapse",
            Self::Expand => "expand",
        }
    }

    const fn target(self) -> RegionState {
        match self {
            Self::Collapse => RegionState::Collapsed,
            Self::Expand => RegionState::Expanded,
        }
    }
}

/// Persistent state of one non-center region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    name: RegionName,
    #[serde(skip)]
    component: ComponentId,
    state: RegionState,
    pending: Option<Transition>,
    /// Size set through the splitter, overriding the natural size.
    size: Option<i32>,
    /// Last component geometry (expanded or floating).
    pub rect: Option<Rect>,
    /// Last placeholder geometry while collapsed or floating.
    pub placeholder: Option<Rect>,
    /// Last splitter geometry while expanded.
    pub splitter: Option<Rect>,
}

impl Region {
    /// A region for `component`, collapsed or expanded as configured.
    #[must_use]
    pub const fn new(name: RegionName, component: ComponentId, collapsed: bool) -> Self {
        Self {
            name,
            component,
            state: if collapsed {
                RegionState::Collapsed
            } else {
                RegionState::Expanded
            },
            pending: None,
            size: None,
            rect: None,
            placeholder: None,
            splitter: None,
        }
    }

    /// Which slot this is.
    #[must_use]
    pub const fn name(&self) -> RegionName {
        self.name
    }

    /// The component in the slot.
    #[must_use]
    pub const fn component(&self) -> ComponentId {
        self.component
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RegionState {
        self.state
    }

    /// Transition waiting for its animation.
    #[must_use]
    pub const fn pending(&self) -> Option<Transition> {
        self.pending
    }

    /// Splitter-set size.
    #[must_use]
    pub const fn size(&self) -> Option<i32> {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: i32) {
        self.size = Some(size);
    }

    fn invalid(&self, operation: &'static str) -> LayoutError {
        LayoutError::InvalidRegionState {
            region: self.name,
            state: self.state,
            operation,
        }
    }

    /// Check that `transition` may start from the current state.
    ///
    /// # Errors
    /// [`LayoutError::InvalidRegionState`] when the region is already in (or
    /// moving to) the target state, or another transition is pending.
    pub fn check(&self, transition: Transition) -> Result<(), LayoutError> {
        let allowed = self.pending.is_none()
            && match transition {
                Transition::Collapse => self.state == RegionState::Expanded,
                Transition::Expand => self.state != RegionState::Expanded,
            };
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(transition.name()))
        }
    }

    /// Start an animated transition.
    pub(crate) fn begin(&mut self, transition: Transition) {
        self.pending = Some(transition);
    }

    /// Finish a transition, animated or not.
    pub(crate) fn finish(&mut self, transition: Transition) {
        self.pending = None;
        self.state = transition.target();
    }

    /// Finish the pending transition, if any.
    pub(crate) fn complete_pending(&mut self) -> Option<Transition> {
        let transition = self.pending.take()?;
        self.state = transition.target();
        Some(transition)
    }

    /// Drop a pending transition without applying it.
    pub(crate) fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// `Collapsed -> Floating`.
    pub(crate) fn slide_out(&mut self) -> Result<(), LayoutError> {
        if self.pending.is_some() || self.state != RegionState::Collapsed {
            return Err(self.invalid("slide out"));
        }
        self.state = RegionState::Floating;
        Ok(())
    }

    /// `Floating -> Collapsed`.
    pub(crate) fn slide_in(&mut self) -> Result<(), LayoutError> {
        if self.pending.is_some() || self.state != RegionState::Floating {
            return Err(self.invalid("slide in"));
        }
        self.state = RegionState::Collapsed;
        Ok(())
    }
}

/// Bounds for a splitter move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBounds {
    /// Region's `minSize`.
    pub min_size: i32,
    /// Region's `maxSize`.
    pub max_size: i32,
    /// Region's current thickness.
    pub region: i32,
    /// Center's current length on the same axis.
    pub center: i32,
    /// Center's minimum length on the same axis.
    pub center_min: i32,
}

impl SplitBounds {
    /// Clamp a requested size.
    ///
    /// The upper bound is `min(maxSize, region + center - center_min)` and
    /// wins over `minSize`, so the center never drops below its minimum.
    #[must_use]
    pub fn clamp(&self, requested: i32) -> i32 {
        let upper = self
            .max_size
            .min(self.region + self.center - self.center_min);
        requested.max(self.min_size).min(upper).max(0)
    }
}
