//! `card` layout: one child visible at a time, filling the container.

use tessera_component::{ActiveItem, ComponentId, ComponentTree, LayoutKind};

use super::fit::fit_child;
use super::{LayoutContext, LayoutStrategy};
use crate::error::LayoutError;

/// Stack of cards.
#[derive(Debug, Clone, Default)]
pub struct CardLayout {
    active: Option<ComponentId>,
}

impl CardLayout {
    /// The visible card, once resolved by a pass or set explicitly.
    #[must_use]
    pub const fn active(&self) -> Option<ComponentId> {
        self.active
    }

    pub(crate) fn set_active(&mut self, id: ComponentId) {
        self.active = Some(id);
    }
}

impl LayoutStrategy for CardLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Card
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let children = cx.tree.children(container).to_vec();
        let active = self
            .active
            .filter(|id| children.contains(id))
            .or_else(|| resolve_item(cx.tree, container, config.active_item.as_ref()))
            .or_else(|| children.first().copied());
        self.active = active;

        for &child in &children {
            cx.tree.set_hidden(child, Some(child) != active);
        }
        if let Some(active) = active {
            fit_child(cx, &config, container, active);
        }
        Ok(())
    }
}

/// Resolve an `activeItem` reference (index or item id) to a child.
#[must_use]
pub fn resolve_item(
    tree: &ComponentTree,
    container: ComponentId,
    item: Option<&ActiveItem>,
) -> Option<ComponentId> {
    match item? {
        ActiveItem::Index(index) => tree.children(container).get(*index).copied(),
        ActiveItem::Id(item_id) => tree
            .lookup(item_id)
            .filter(|&id| tree.parent(id) == Some(container)),
    }
}
