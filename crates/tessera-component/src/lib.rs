//! Component tree for the Tessera layout engine.
//!
//! This crate provides an arena-based tree of components: containers that
//! declare a layout, and leaves that only report a size. Layout strategies read
//! each component's [`ItemConfig`] and write the computed geometry back into its
//! [`ComponentState`].
//!
//! # Design
//!
//! The tree uses arena allocation with [`ComponentId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. The tree doubles as the component registry: components with an
//! `itemId` are indexed by it and can be looked up, registered and
//! unregistered explicitly.

pub mod config;
pub mod geometry;

use std::collections::HashMap;

pub use config::{
    ActiveItem, Align, AnchorSize, BufferResize, ItemConfig, LabelAlign, LayoutConfig, LayoutKind,
    OverflowKind, Pack, RegionName, SidesSource,
};
pub use geometry::{Rect, Sides, Size};

/// A type-safe index into the component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub usize);

impl ComponentId {
    /// The root component is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Runtime state written by the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentState {
    /// Hidden either by configuration or by a layout (card, overflow, collapse).
    pub hidden: bool,
    /// The rendering layer has created this component's element.
    pub rendered: bool,
    /// Last applied geometry, relative to the parent's content origin.
    pub rect: Rect,
    /// Whether any geometry has been applied yet.
    pub sized: bool,
    /// Geometry changed since the rendering layer last consumed it.
    pub dirty: bool,
    /// Form layout: geometry of the field label.
    pub label_rect: Option<Rect>,
}

/// A component and its relationships.
#[derive(Debug, Clone)]
pub struct Component {
    /// Declarative configuration.
    pub config: ItemConfig,
    /// Runtime layout state.
    pub state: ComponentState,
    /// Owning container, if attached.
    pub parent: Option<ComponentId>,
    /// Children in source order.
    pub children: Vec<ComponentId>,
}

/// Arena-based component tree with O(1) access and traversal.
///
/// All components are stored in a contiguous vector, using indices for all
/// relationships. Detached components keep their slot; ids are never reused.
#[derive(Debug, Clone)]
pub struct ComponentTree {
    nodes: Vec<Component>,
    registry: HashMap<String, ComponentId>,
}

impl ComponentTree {
    /// Create a tree whose root is a component with the given configuration.
    ///
    /// Nested `items` are not expanded; see [`ComponentTree::from_config`].
    #[must_use]
    pub fn new(root: ItemConfig) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            registry: HashMap::new(),
        };
        let _ = tree.alloc(root);
        tree
    }

    /// Build a tree from a configuration, expanding nested `items` recursively.
    ///
    /// The resulting components' configs have empty `items`; the children live
    /// in the tree instead.
    #[must_use]
    pub fn from_config(mut root: ItemConfig) -> Self {
        let items = std::mem::take(&mut root.items);
        let mut tree = Self::new(root);
        tree.append_configs(ComponentId::ROOT, items);
        tree
    }

    fn append_configs(&mut self, parent: ComponentId, items: Vec<ItemConfig>) {
        for mut item in items {
            let nested = std::mem::take(&mut item.items);
            let id = self.alloc(item);
            self.append_child(parent, id);
            self.append_configs(id, nested);
        }
    }

    /// Get the root component ID.
    #[must_use]
    pub const fn root(&self) -> ComponentId {
        ComponentId::ROOT
    }

    /// Get a component by its ID.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a component by its ID.
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.nodes.get_mut(id.0)
    }

    /// Whether `id` refers to a component of this tree.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Get the number of components ever allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new component and return its ID.
    ///
    /// The component is not yet attached to the tree. If its config carries an
    /// `itemId` it is registered under it, replacing any previous holder.
    pub fn alloc(&mut self, config: ItemConfig) -> ComponentId {
        let id = ComponentId(self.nodes.len());
        if let Some(item_id) = config.item_id.clone() {
            let _ = self.registry.insert(item_id, id);
        }
        let hidden = config.hidden;
        self.nodes.push(Component {
            config,
            state: ComponentState {
                hidden,
                ..ComponentState::default()
            },
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Register `id` under `item_id`, returning the component it replaced.
    pub fn register(&mut self, item_id: &str, id: ComponentId) -> Option<ComponentId> {
        self.registry.insert(item_id.to_string(), id)
    }

    /// Remove `item_id` from the registry.
    pub fn unregister(&mut self, item_id: &str) -> Option<ComponentId> {
        self.registry.remove(item_id)
    }

    /// Find a component by its registered `itemId`.
    #[must_use]
    pub fn lookup(&self, item_id: &str) -> Option<ComponentId> {
        self.registry.get(item_id).copied()
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// A child that is already attached elsewhere is detached first.
    pub fn append_child(&mut self, parent: ComponentId, child: ComponentId) {
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detaches `child` from `parent`. Does nothing if it is not a child.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) {
        let Some(position) = self.nodes[parent.0].children.iter().position(|&c| c == child)
        else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(position);
        self.nodes[child.0].parent = None;
    }

    /// Get the parent of a component.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a component.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Children that currently take part in layout.
    #[must_use]
    pub fn visible_children(&self, id: ComponentId) -> Vec<ComponentId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_visible(c))
            .collect()
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: ComponentId, ancestor: ComponentId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a component, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: ComponentId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// The component's configuration.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this tree.
    #[must_use]
    pub fn config(&self, id: ComponentId) -> &ItemConfig {
        &self.nodes[id.0].config
    }

    /// The component's runtime state.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this tree.
    #[must_use]
    pub fn state(&self, id: ComponentId) -> &ComponentState {
        &self.nodes[id.0].state
    }

    /// Mutable runtime state.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this tree.
    pub fn state_mut(&mut self, id: ComponentId) -> &mut ComponentState {
        &mut self.nodes[id.0].state
    }

    /// The component's layout configuration, if it is a container.
    #[must_use]
    pub fn layout_config(&self, id: ComponentId) -> Option<&LayoutConfig> {
        self.get(id).and_then(|n| n.config.layout.as_ref())
    }

    /// Whether the component takes part in layout.
    #[must_use]
    pub fn is_visible(&self, id: ComponentId) -> bool {
        self.get(id).is_some_and(|n| !n.state.hidden)
    }

    /// Show or hide a component.
    pub fn set_hidden(&mut self, id: ComponentId, hidden: bool) {
        if let Some(node) = self.get_mut(id) {
            node.state.hidden = hidden;
        }
    }

    /// Write computed geometry, marking the component dirty when it changed.
    ///
    /// Returns whether the geometry changed.
    pub fn apply_rect(&mut self, id: ComponentId, rect: Rect) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let changed = !node.state.sized || node.state.rect != rect;
        node.state.rect = rect;
        node.state.sized = true;
        node.state.dirty |= changed;
        changed
    }

    /// Ids of components whose geometry changed, clearing their dirty flags.
    pub fn take_dirty(&mut self) -> Vec<ComponentId> {
        let mut dirty = Vec::new();
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if node.state.dirty {
                node.state.dirty = false;
                dirty.push(ComponentId(i));
            }
        }
        dirty
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new(ItemConfig::default())
    }
}

/// Iterator over ancestors of a component.
pub struct AncestorIterator<'a> {
    tree: &'a ComponentTree,
    current: Option<ComponentId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
