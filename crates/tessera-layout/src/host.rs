//! The rendering layer seam.
//!
//! The engine never measures or paints anything itself. A [`LayoutHost`]
//! supplies intrinsic sizes and container target sizes, creates elements for
//! children that are about to be laid out, and receives notifications.

use serde::Serialize;
use tessera_component::{ComponentId, ComponentTree, ItemConfig, RegionName, Size};

/// Notifications emitted during layout.
///
/// `Before*` notifications can be vetoed by returning `false` from
/// [`LayoutHost::notify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayoutEvent {
    /// A container is about to be laid out.
    BeforeLayout,
    /// A container finished laying out.
    AfterLayout,
    /// A card or accordion child became active.
    Activate,
    /// A card or accordion child stopped being active.
    Deactivate,
    /// A border region is about to collapse.
    BeforeCollapse(RegionName),
    /// A border region collapsed.
    Collapse(RegionName),
    /// A border region is about to expand.
    BeforeExpand(RegionName),
    /// A border region expanded.
    Expand(RegionName),
    /// A box layout's overflow state flipped.
    OverflowChange {
        /// New state.
        overflowing: bool,
    },
}

impl LayoutEvent {
    /// Whether a `false` from [`LayoutHost::notify`] cancels the action.
    #[must_use]
    pub const fn is_vetoable(self) -> bool {
        matches!(
            self,
            Self::BeforeLayout | Self::BeforeCollapse(_) | Self::BeforeExpand(_)
        )
    }
}

/// Callbacks into the rendering layer.
pub trait LayoutHost {
    /// Intrinsic size of a component.
    fn measure(&mut self, tree: &ComponentTree, id: ComponentId) -> Size {
        measure_from_config(tree.config(id))
    }

    /// Size available to a container's children, padding included.
    fn target_size(&self, tree: &ComponentTree, id: ComponentId) -> Size {
        tree.state(id).rect.size()
    }

    /// Create the component's element. Called once before its first layout.
    fn render(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        tree.state_mut(id).rendered = true;
    }

    /// Deliver a notification about `id`. Returning `false` vetoes `Before*`
    /// events and is ignored otherwise.
    fn notify(&mut self, tree: &ComponentTree, id: ComponentId, event: LayoutEvent) -> bool {
        let _ = (tree, id, event);
        true
    }
}

/// Size from `intrinsicWidth`/`intrinsicHeight`, else the configured size,
/// else zero.
#[must_use]
pub fn measure_from_config(config: &ItemConfig) -> Size {
    Size::new(
        config.intrinsic_width.or(config.width).unwrap_or(0),
        config.intrinsic_height.or(config.height).unwrap_or(0),
    )
}

/// A host that measures from configuration and accepts every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHost;

impl LayoutHost for DefaultHost {}

/// A configuration-measuring host that records notifications and vetoes
/// selected ones.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// Notifications in delivery order.
    pub events: Vec<(ComponentId, LayoutEvent)>,
    vetoes: Vec<(Option<ComponentId>, LayoutEvent)>,
}

impl RecordingHost {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Veto `event`, for `id` only or for every component.
    pub fn veto(&mut self, id: Option<ComponentId>, event: LayoutEvent) {
        self.vetoes.push((id, event));
    }

    /// Stop vetoing everything.
    pub fn clear_vetoes(&mut self) {
        self.vetoes.clear();
    }

    /// Recorded events about `id`.
    #[must_use]
    pub fn events_for(&self, id: ComponentId) -> Vec<LayoutEvent> {
        self.events
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, event)| *event)
            .collect()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl LayoutHost for RecordingHost {
    fn notify(&mut self, _tree: &ComponentTree, id: ComponentId, event: LayoutEvent) -> bool {
        self.events.push((id, event));
        !(event.is_vetoable()
            && self
                .vetoes
                .iter()
                .any(|(target, vetoed)| *vetoed == event && target.is_none_or(|t| t == id)))
    }
}
