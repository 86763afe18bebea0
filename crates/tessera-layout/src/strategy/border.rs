//! `border` layout: five regions around a mandatory center.
//!
//! North and south span the full width and take their natural height; west
//! and east take their natural width between them; the center gets whatever
//! is left. Collapsed regions shrink to a placeholder, floating ones are
//! drawn as an overlay beside their placeholder without moving anything else.

use std::collections::{HashMap, HashSet};

use tessera_common::warning::warn_once;
use tessera_component::{ComponentId, ComponentTree, LayoutKind, Rect, RegionName, Sides};

use super::{inset, LayoutContext, LayoutStrategy};
use crate::error::LayoutError;
use crate::host::LayoutEvent;
use crate::region::{
    default_cmargins, Region, RegionState, SplitBounds, Transition, DEFAULT_CENTER_MIN,
    DEFAULT_COLLAPSED_SIZE, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_SPLIT_SIZE,
};
use crate::sides::parse_sides;

/// Regions carved out of the content box, in this order.
const EDGES: [RegionName; 4] = [
    RegionName::North,
    RegionName::South,
    RegionName::West,
    RegionName::East,
];

/// Result of starting a collapse or expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// A `Before*` listener cancelled it.
    Vetoed,
    /// Waiting for the animation to complete.
    Pending,
    /// The region changed state.
    Applied,
}

/// Border layout state: the regions found among the container's children.
#[derive(Debug, Clone, Default)]
pub struct BorderLayout {
    regions: HashMap<RegionName, Region>,
    center: Option<ComponentId>,
    center_rect: Option<Rect>,
}

impl BorderLayout {
    /// State of a non-center region.
    #[must_use]
    pub fn region(&self, name: RegionName) -> Option<&Region> {
        self.regions.get(&name)
    }

    /// The center component, as of the last pass.
    #[must_use]
    pub const fn center(&self) -> Option<ComponentId> {
        self.center
    }

    /// The center's last geometry.
    #[must_use]
    pub const fn center_rect(&self) -> Option<Rect> {
        self.center_rect
    }

    /// Pick up region children added or removed since the last pass.
    fn sync(&mut self, tree: &mut ComponentTree, container: ComponentId) {
        let children = tree.children(container).to_vec();
        self.regions
            .retain(|_, region| children.contains(&region.component()));
        self.center = None;

        let mut seen = HashSet::new();
        for child in children {
            let config = tree.config(child);
            let Some(name) = config.region else {
                let _ = warn_once("BorderLayout", "child without a region is not laid out");
                continue;
            };
            if !seen.insert(name) {
                let _ = warn_once(
                    "BorderLayout",
                    &format!("more than one {name} region; only the first is used"),
                );
                continue;
            }
            if name == RegionName::Center {
                if tree.is_visible(child) {
                    self.center = Some(child);
                }
                continue;
            }
            let known = self
                .regions
                .get(&name)
                .is_some_and(|region| region.component() == child);
            if !known {
                let collapsed = config.collapsed;
                let _ = self
                    .regions
                    .insert(name, Region::new(name, child, collapsed));
                if collapsed {
                    tree.set_hidden(child, true);
                }
            }
        }
    }

    fn region_mut(
        &mut self,
        container: ComponentId,
        name: RegionName,
        operation: &'static str,
    ) -> Result<&mut Region, LayoutError> {
        if name == RegionName::Center {
            return Err(LayoutError::InvalidRegionState {
                region: name,
                state: RegionState::Expanded,
                operation,
            });
        }
        self.regions
            .get_mut(&name)
            .ok_or(LayoutError::NoSuchRegion {
                container,
                region: name,
            })
    }

    /// Start collapsing or expanding a region.
    pub(crate) fn begin_transition(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
        name: RegionName,
        transition: Transition,
        animate: bool,
    ) -> Result<TransitionStep, LayoutError> {
        self.sync(cx.tree, container);
        let operation = match transition {
            Transition::Collapse => "collapse",
            Transition::Expand => "expand",
        };
        let region = self.region_mut(container, name, operation)?;
        let collapsible = cx.tree.config(region.component()).collapsible;
        if transition == Transition::Collapse && !collapsible {
            return Err(LayoutError::InvalidRegionState {
                region: name,
                state: region.state(),
                operation,
            });
        }
        region.check(transition)?;

        let before = match transition {
            Transition::Collapse => LayoutEvent::BeforeCollapse(name),
            Transition::Expand => LayoutEvent::BeforeExpand(name),
        };
        if !cx.notify(region.component(), before) {
            log::debug!("{operation} of {name} region vetoed");
            return Ok(TransitionStep::Vetoed);
        }
        if animate {
            region.begin(transition);
            return Ok(TransitionStep::Pending);
        }
        region.finish(transition);
        sync_visibility(cx.tree, region);
        Ok(TransitionStep::Applied)
    }

    /// Apply a pending transition whose animation finished.
    pub(crate) fn complete_animation(
        &mut self,
        tree: &mut ComponentTree,
        container: ComponentId,
        name: RegionName,
    ) -> Result<Option<Transition>, LayoutError> {
        let region = self.region_mut(container, name, "complete animation")?;
        let transition = region.complete_pending();
        if transition.is_some() {
            sync_visibility(tree, region);
        }
        Ok(transition)
    }

    /// Drop every pending transition. Returns how many were cancelled.
    pub(crate) fn cancel_animations(&mut self) -> usize {
        self.regions
            .values_mut()
            .map(Region::cancel_pending)
            .filter(|cancelled| *cancelled)
            .count()
    }

    /// Show a collapsed region as an overlay.
    pub(crate) fn slide_out(
        &mut self,
        tree: &mut ComponentTree,
        container: ComponentId,
        name: RegionName,
    ) -> Result<(), LayoutError> {
        self.sync(tree, container);
        let region = self.region_mut(container, name, "slide out")?;
        region.slide_out()?;
        sync_visibility(tree, region);
        Ok(())
    }

    /// Return a floating region to its placeholder.
    pub(crate) fn slide_in(
        &mut self,
        tree: &mut ComponentTree,
        container: ComponentId,
        name: RegionName,
    ) -> Result<(), LayoutError> {
        let region = self.region_mut(container, name, "slide in")?;
        region.slide_in()?;
        sync_visibility(tree, region);
        Ok(())
    }

    /// Slide in every floating region.
    pub(crate) fn outside_click(&mut self, tree: &mut ComponentTree) -> Vec<RegionName> {
        let mut closed = Vec::new();
        for name in EDGES {
            let Some(region) = self.regions.get_mut(&name) else {
                continue;
            };
            if region.state() == RegionState::Floating && region.slide_in().is_ok() {
                sync_visibility(tree, region);
                closed.push(name);
            }
        }
        closed
    }

    /// Resize a region as its splitter would, keeping the center at or above
    /// its minimum. Returns the size applied.
    pub(crate) fn split_move(
        &mut self,
        tree: &ComponentTree,
        container: ComponentId,
        name: RegionName,
        requested: i32,
    ) -> Result<i32, LayoutError> {
        let along_height = name.is_horizontal_band();
        let length = |rect: Rect| if along_height { rect.height } else { rect.width };
        let center = self.center_rect.map_or(0, length);
        let center_min = self
            .center
            .and_then(|id| {
                let config = tree.config(id);
                if along_height {
                    config.min_height
                } else {
                    config.min_width
                }
            })
            .unwrap_or(DEFAULT_CENTER_MIN);

        let region = self.region_mut(container, name, "resize")?;
        if region.state() != RegionState::Expanded || region.pending().is_some() {
            return Err(LayoutError::InvalidRegionState {
                region: name,
                state: region.state(),
                operation: "resize",
            });
        }
        let config = tree.config(region.component());
        let bounds = SplitBounds {
            min_size: config.min_size.unwrap_or(DEFAULT_MIN_SIZE),
            max_size: config.max_size.unwrap_or(DEFAULT_MAX_SIZE),
            region: region.size().or(region.rect.map(length)).unwrap_or(0),
            center,
            center_min,
        };
        let size = bounds.clamp(requested);
        log::debug!("split {name}: requested={requested} applied={size} bounds={bounds:?}");
        region.set_size(size);
        Ok(size)
    }
}

fn sync_visibility(tree: &mut ComponentTree, region: &Region) {
    tree.set_hidden(region.component(), region.state() == RegionState::Collapsed);
}

/// Split `area` into the region's rectangle, its splitter bar and what is
/// left for the rest.
fn carve(area: Rect, name: RegionName, thickness: i32, margins: Sides, split: i32) -> (Rect, Rect, Rect) {
    let thickness = thickness.max(0);
    match name {
        RegionName::North | RegionName::South => {
            let used = thickness + margins.vertical() + split;
            let width = (area.width - margins.horizontal()).max(0);
            let rest_height = (area.height - used).max(0);
            if name == RegionName::North {
                let rect = Rect::new(area.x + margins.left, area.y + margins.top, width, thickness);
                let bar = Rect::new(area.x, rect.bottom() + margins.bottom, area.width, split);
                (rect, bar, Rect::new(area.x, area.y + used, area.width, rest_height))
            } else {
                let y = area.bottom() - margins.bottom - thickness;
                let rect = Rect::new(area.x + margins.left, y, width, thickness);
                let bar = Rect::new(area.x, y - margins.top - split, area.width, split);
                (rect, bar, Rect::new(area.x, area.y, area.width, rest_height))
            }
        }
        RegionName::West | RegionName::East => {
            let used = thickness + margins.horizontal() + split;
            let height = (area.height - margins.vertical()).max(0);
            let rest_width = (area.width - used).max(0);
            if name == RegionName::West {
                let rect = Rect::new(area.x + margins.left, area.y + margins.top, thickness, height);
                let bar = Rect::new(rect.right() + margins.right, area.y, split, area.height);
                (rect, bar, Rect::new(area.x + used, area.y, rest_width, area.height))
            } else {
                let x = area.right() - margins.right - thickness;
                let rect = Rect::new(x, area.y + margins.top, thickness, height);
                let bar = Rect::new(x - margins.left - split, area.y, split, area.height);
                (rect, bar, Rect::new(area.x, area.y, rest_width, area.height))
            }
        }
        RegionName::Center => (inset(area, margins), Rect::default(), area),
    }
}

/// Where a floating region is drawn: beside its placeholder, toward the
/// center, at its expanded thickness.
fn float_beside(placeholder: Rect, name: RegionName, thickness: i32) -> Rect {
    let Rect {
        x,
        y,
        width,
        height,
    } = placeholder;
    match name {
        RegionName::North => Rect::new(x, placeholder.bottom(), width, thickness),
        RegionName::South => Rect::new(x, y - thickness, width, thickness),
        RegionName::West => Rect::new(placeholder.right(), y, thickness, height),
        RegionName::East => Rect::new(x - thickness, y, thickness, height),
        RegionName::Center => placeholder,
    }
}

impl LayoutStrategy for BorderLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Border
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        self.sync(cx.tree, container);
        let center = self
            .center
            .ok_or(LayoutError::MissingCenterRegion { container })?;

        let mut area = cx.content_box(container, &config);
        let mut placed = Vec::with_capacity(EDGES.len() + 1);
        for name in EDGES {
            let Some(region) = self.regions.get_mut(&name) else {
                continue;
            };
            region.rect = None;
            region.placeholder = None;
            region.splitter = None;

            let id = region.component();
            if region.state() == RegionState::Expanded && cx.tree.state(id).hidden {
                continue;
            }
            let natural = cx.natural_size(id);
            let thickness = region.size().unwrap_or(if name.is_horizontal_band() {
                natural.height
            } else {
                natural.width
            });

            match region.state() {
                RegionState::Expanded => {
                    let margins = cx.margins_of(&config, id);
                    let item = cx.tree.config(id);
                    let split = if item.split {
                        item.split_size.unwrap_or(DEFAULT_SPLIT_SIZE).max(0)
                    } else {
                        0
                    };
                    let (rect, bar, rest) = carve(area, name, thickness, margins, split);
                    region.rect = Some(rect);
                    region.splitter = (split > 0).then_some(bar);
                    placed.push((id, rect));
                    area = rest;
                }
                RegionState::Collapsed | RegionState::Floating => {
                    let item = cx.tree.config(id);
                    let cmargins = item
                        .cmargins
                        .as_ref()
                        .map_or_else(|| default_cmargins(name), parse_sides);
                    let size = item.collapsed_size.unwrap_or(DEFAULT_COLLAPSED_SIZE);
                    let (placeholder, _, rest) = carve(area, name, size, cmargins, 0);
                    region.placeholder = Some(placeholder);
                    if region.state() == RegionState::Floating {
                        let overlay = float_beside(placeholder, name, thickness);
                        region.rect = Some(overlay);
                        placed.push((id, overlay));
                    }
                    area = rest;
                }
            }
        }

        let center_rect = inset(area, cx.margins_of(&config, center));
        self.center_rect = Some(center_rect);
        placed.push((center, center_rect));
        log::trace!("border {container:?}: center={center_rect:?}");

        let _ = cx.apply(&placed);
        Ok(())
    }
}
