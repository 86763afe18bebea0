//! Container layout coordinator.
//!
//! The [`Coordinator`] drives the render, measure, solve and apply cycle for
//! containers. It keeps one [`Strategy`] per container so stateful layouts
//! (cards, anchors, border regions, overflow) survive between passes, and
//! one [`ResizeBuffer`] per container that buffers resize-driven requests.
//!
//! A pass over a container:
//!
//! 1. `BeforeLayout` is sent; a veto skips the pass.
//! 2. Children without an element are rendered through the host.
//! 3. The container's strategy computes and applies every child rectangle.
//! 4. Visible child containers are laid out the same way.
//! 5. `AfterLayout` is sent.

use std::collections::HashMap;
use std::time::Instant;

use tessera_component::{
    BufferResize, ComponentId, ComponentTree, LayoutConfig, Rect, RegionName, Size,
};

use crate::buffer::ResizeBuffer;
use crate::error::LayoutError;
use crate::host::{LayoutEvent, LayoutHost};
use crate::overflow::OverflowHandler;
use crate::region::{RegionState, Transition};
use crate::strategy::border::TransitionStep;
use crate::strategy::card::resolve_item;
use crate::strategy::{BorderLayout, LayoutContext, LayoutStrategy, Strategy};

/// Owns per-container layout state and runs layout passes.
#[derive(Debug, Default)]
pub struct Coordinator {
    strategies: HashMap<ComponentId, Strategy>,
    buffers: HashMap<ComponentId, ResizeBuffer>,
}

fn container_config(
    tree: &ComponentTree,
    container: ComponentId,
) -> Result<LayoutConfig, LayoutError> {
    if !tree.contains(container) {
        return Err(LayoutError::UnknownComponent(container));
    }
    tree.layout_config(container)
        .cloned()
        .ok_or(LayoutError::NotAContainer(container))
}

impl Coordinator {
    /// A coordinator with no state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The strategy kept for a container, once it has been laid out.
    #[must_use]
    pub fn strategy(&self, container: ComponentId) -> Option<&Strategy> {
        self.strategies.get(&container)
    }

    /// The strategy for `container`, created from its config when missing or
    /// when the config now names a different layout.
    fn strategy_mut(
        &mut self,
        tree: &ComponentTree,
        container: ComponentId,
    ) -> Result<&mut Strategy, LayoutError> {
        let config = container_config(tree, container)?;
        let strategy = self
            .strategies
            .entry(container)
            .or_insert_with(|| Strategy::for_config(&config));
        if strategy.kind() != config.kind {
            log::debug!(
                "{container:?} switched from {} to {} layout",
                strategy.kind(),
                config.kind
            );
            *strategy = Strategy::for_config(&config);
        }
        Ok(strategy)
    }

    /// Size the root and lay out the whole tree.
    ///
    /// # Errors
    /// Propagates the first strategy error.
    pub fn layout_root(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        root: ComponentId,
        size: Size,
    ) -> Result<(), LayoutError> {
        let _ = tree.apply_rect(root, Rect::new(0, 0, size.width, size.height));
        self.layout(tree, host, root)
    }

    /// Lay out a container and its descendants now, cancelling any buffered
    /// request for it.
    ///
    /// # Errors
    /// [`LayoutError::UnknownComponent`] and [`LayoutError::NotAContainer`]
    /// for bad ids, [`LayoutError::MissingCenterRegion`] for a border layout
    /// without a center.
    pub fn layout(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        if let Some(buffer) = self.buffers.get_mut(&container) {
            let _ = buffer.cancel();
        }
        self.run(tree, host, container)
    }

    fn run(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = container_config(tree, container)?;
        if !host.notify(tree, container, LayoutEvent::BeforeLayout) {
            log::debug!("layout of {container:?} vetoed");
            return Ok(());
        }

        for child in tree.children(container).to_vec() {
            if !tree.state(child).rendered {
                host.render(tree, child);
            }
        }

        // The strategy is taken out of the map for the pass so nested passes
        // can borrow the coordinator.
        let mut strategy = self
            .strategies
            .remove(&container)
            .filter(|strategy| strategy.kind() == config.kind)
            .unwrap_or_else(|| Strategy::for_config(&config));
        let result = strategy.on_layout(&mut LayoutContext::new(tree, host), container);
        let _ = self.strategies.insert(container, strategy);
        result?;

        for child in tree.visible_children(container) {
            if tree.config(child).is_container() {
                self.run(tree, host, child)?;
            }
        }

        let _ = host.notify(tree, container, LayoutEvent::AfterLayout);
        Ok(())
    }

    // Card and accordion.

    /// The active child of a card or accordion container.
    #[must_use]
    pub fn active_item(&self, container: ComponentId) -> Option<ComponentId> {
        match self.strategies.get(&container)? {
            Strategy::Card(card) => card.active(),
            Strategy::Accordion(accordion) => accordion.active(),
            _ => None,
        }
    }

    /// Make `item` the active child of a card or accordion container.
    ///
    /// Sends `Deactivate` to the previously active child, lays the container
    /// out again, then sends `Activate` to `item`. Returns `false` when `item`
    /// was already active.
    ///
    /// # Errors
    /// [`LayoutError::UnsupportedOperation`] for other layouts,
    /// [`LayoutError::NotAChild`] when `item` is not a child of `container`.
    pub fn set_active_item(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        item: ComponentId,
    ) -> Result<bool, LayoutError> {
        let config = container_config(tree, container)?;
        if tree.parent(item) != Some(container) {
            return Err(LayoutError::NotAChild {
                container,
                child: item,
            });
        }
        let fallback = resolve_item(tree, container, config.active_item.as_ref())
            .or_else(|| tree.visible_children(container).first().copied());

        let previous = match self.strategy_mut(tree, container)? {
            Strategy::Card(card) => {
                let previous = card.active().or(fallback);
                card.set_active(item);
                previous
            }
            Strategy::Accordion(accordion) => {
                let previous = accordion.active().or(fallback);
                accordion.set_active(item);
                previous
            }
            other => {
                return Err(LayoutError::UnsupportedOperation {
                    operation: "set_active_item",
                    kind: other.kind(),
                });
            }
        };
        if previous == Some(item) {
            return Ok(false);
        }

        if let Some(previous) = previous {
            let _ = host.notify(tree, previous, LayoutEvent::Deactivate);
        }
        self.layout(tree, host, container)?;
        let _ = host.notify(tree, item, LayoutEvent::Activate);
        Ok(true)
    }

    // Border regions.

    /// Border layout state of a container, once laid out.
    #[must_use]
    pub fn border(&self, container: ComponentId) -> Option<&BorderLayout> {
        match self.strategies.get(&container)? {
            Strategy::Border(border) => Some(border),
            _ => None,
        }
    }

    /// State of a border region.
    #[must_use]
    pub fn region_state(&self, container: ComponentId, region: RegionName) -> Option<RegionState> {
        self.border(container)?.region(region).map(|r| r.state())
    }

    fn border_mut(
        &mut self,
        tree: &ComponentTree,
        container: ComponentId,
        operation: &'static str,
    ) -> Result<&mut BorderLayout, LayoutError> {
        match self.strategy_mut(tree, container)? {
            Strategy::Border(border) => Ok(border),
            other => Err(LayoutError::UnsupportedOperation {
                operation,
                kind: other.kind(),
            }),
        }
    }

    /// Collapse a border region.
    ///
    /// # Errors
    /// [`LayoutError::NoSuchRegion`] and [`LayoutError::InvalidRegionState`]
    /// for regions that cannot collapse.
    pub fn collapse(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
        animate: bool,
    ) -> Result<TransitionStep, LayoutError> {
        self.transition(tree, host, container, region, Transition::Collapse, animate)
    }

    /// Expand a collapsed or floating border region.
    ///
    /// # Errors
    /// [`LayoutError::NoSuchRegion`] and [`LayoutError::InvalidRegionState`]
    /// for regions that cannot expand.
    pub fn expand(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
        animate: bool,
    ) -> Result<TransitionStep, LayoutError> {
        self.transition(tree, host, container, region, Transition::Expand, animate)
    }

    fn transition(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
        transition: Transition,
        animate: bool,
    ) -> Result<TransitionStep, LayoutError> {
        let operation = match transition {
            Transition::Collapse => "collapse",
            Transition::Expand => "expand",
        };
        let border = self.border_mut(tree, container, operation)?;
        let step = border.begin_transition(
            &mut LayoutContext::new(tree, host),
            container,
            region,
            transition,
            animate,
        )?;
        if step == TransitionStep::Applied {
            self.finish_transition(tree, host, container, region, transition)?;
        }
        Ok(step)
    }

    fn finish_transition(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
        transition: Transition,
    ) -> Result<(), LayoutError> {
        let component = self
            .border(container)
            .and_then(|border| border.region(region))
            .map(|r| r.component());
        self.layout(tree, host, container)?;
        if let Some(component) = component {
            let event = match transition {
                Transition::Collapse => LayoutEvent::Collapse(region),
                Transition::Expand => LayoutEvent::Expand(region),
            };
            let _ = host.notify(tree, component, event);
        }
        Ok(())
    }

    /// Finish an animated collapse or expand. Returns the transition applied,
    /// or `None` when nothing was pending.
    ///
    /// # Errors
    /// [`LayoutError::NoSuchRegion`] for unknown regions.
    pub fn complete_animation(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
    ) -> Result<Option<Transition>, LayoutError> {
        let transition = self
            .border_mut(tree, container, "complete_animation")?
            .complete_animation(tree, container, region)?;
        if let Some(transition) = transition {
            self.finish_transition(tree, host, container, region, transition)?;
        }
        Ok(transition)
    }

    /// Show a collapsed region as a floating overlay.
    ///
    /// # Errors
    /// [`LayoutError::InvalidRegionState`] unless the region is collapsed.
    pub fn slide_out(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
    ) -> Result<(), LayoutError> {
        self.border_mut(tree, container, "slide_out")?
            .slide_out(tree, container, region)?;
        self.layout(tree, host, container)
    }

    /// Return a floating region to its collapsed placeholder.
    ///
    /// # Errors
    /// [`LayoutError::InvalidRegionState`] unless the region is floating.
    pub fn slide_in(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
    ) -> Result<(), LayoutError> {
        self.border_mut(tree, container, "slide_in")?
            .slide_in(tree, container, region)?;
        self.layout(tree, host, container)
    }

    /// A click outside any floating region: slide them all back in.
    ///
    /// # Errors
    /// [`LayoutError::UnsupportedOperation`] for non-border containers.
    pub fn outside_click(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
    ) -> Result<Vec<RegionName>, LayoutError> {
        let closed = self
            .border_mut(tree, container, "outside_click")?
            .outside_click(tree);
        if !closed.is_empty() {
            self.layout(tree, host, container)?;
        }
        Ok(closed)
    }

    /// Drag a region's splitter to `requested`; returns the clamped size.
    ///
    /// # Errors
    /// [`LayoutError::InvalidRegionState`] unless the region is expanded.
    pub fn split_move(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        region: RegionName,
        requested: i32,
    ) -> Result<i32, LayoutError> {
        let size = self
            .border_mut(tree, container, "split_move")?
            .split_move(tree, container, region, requested)?;
        self.layout(tree, host, container)?;
        Ok(size)
    }

    // Overflow.

    /// The overflow handler of a box container.
    #[must_use]
    pub fn overflow(&self, container: ComponentId) -> Option<&dyn OverflowHandler> {
        match self.strategies.get(&container)? {
            Strategy::Box(boxes) => boxes.overflow(),
            _ => None,
        }
    }

    /// Scroll a scrolling box container by `delta`. Returns whether the
    /// position changed.
    ///
    /// # Errors
    /// Propagates layout errors from the re-layout.
    pub fn scroll_by(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        delta: i32,
    ) -> Result<bool, LayoutError> {
        let changed = match self.strategies.get_mut(&container) {
            Some(Strategy::Box(boxes)) => boxes
                .overflow_mut()
                .is_some_and(|handler| handler.scroll_by(delta)),
            _ => false,
        };
        if changed {
            self.layout(tree, host, container)?;
        }
        Ok(changed)
    }

    // Resize buffering.

    /// Ask for a layout of `container` at `now`.
    ///
    /// Containers configured with `bufferResize` only record the request; it
    /// runs from [`Coordinator::poll`] once the window has passed without
    /// further requests. Others are laid out immediately. Returns whether the
    /// layout ran.
    ///
    /// # Errors
    /// Propagates layout errors when the layout runs immediately.
    pub fn request_layout(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        container: ComponentId,
        now: Instant,
    ) -> Result<bool, LayoutError> {
        let config = container_config(tree, container)?;
        match config.buffer_resize.and_then(BufferResize::window) {
            Some(window) => {
                let buffer = self
                    .buffers
                    .entry(container)
                    .or_insert_with(|| ResizeBuffer::new(window));
                let deadline = buffer.request(now);
                log::trace!("buffered layout of {container:?} until {deadline:?}");
                Ok(false)
            }
            None => {
                self.layout(tree, host, container)?;
                Ok(true)
            }
        }
    }

    /// Whether a buffered layout is waiting for `container`.
    #[must_use]
    pub fn is_pending(&self, container: ComponentId) -> bool {
        self.buffers
            .get(&container)
            .is_some_and(ResizeBuffer::is_pending)
    }

    /// Earliest deadline among buffered layouts.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.buffers.values().filter_map(ResizeBuffer::deadline).min()
    }

    /// Run buffered layouts whose window has passed. Returns the containers
    /// laid out.
    ///
    /// # Errors
    /// Propagates the first layout error.
    pub fn poll(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
        now: Instant,
    ) -> Result<Vec<ComponentId>, LayoutError> {
        let mut due: Vec<ComponentId> = self
            .buffers
            .iter_mut()
            .filter_map(|(&id, buffer)| buffer.take_due(now).then_some(id))
            .collect();
        due.sort_unstable();
        for &container in &due {
            self.run(tree, host, container)?;
        }
        Ok(due)
    }

    /// Run every buffered layout now, regardless of deadlines.
    ///
    /// # Errors
    /// Propagates the first layout error.
    pub fn flush(
        &mut self,
        tree: &mut ComponentTree,
        host: &mut dyn LayoutHost,
    ) -> Result<Vec<ComponentId>, LayoutError> {
        let mut pending: Vec<ComponentId> = self
            .buffers
            .iter_mut()
            .filter_map(|(&id, buffer)| buffer.cancel().then_some(id))
            .collect();
        pending.sort_unstable();
        for &container in &pending {
            self.run(tree, host, container)?;
        }
        Ok(pending)
    }

    /// Tear down a container and its descendants: drop buffered layouts,
    /// cancel region animations and forget their layout state.
    pub fn destroy(&mut self, tree: &ComponentTree, container: ComponentId) {
        let doomed = |id: ComponentId| id == container || tree.is_descendant_of(id, container);

        let before = self.buffers.len();
        self.buffers.retain(|&id, _| !doomed(id));
        let buffers = before - self.buffers.len();

        let mut animations = 0;
        self.strategies.retain(|&id, strategy| {
            if !doomed(id) {
                return true;
            }
            if let Strategy::Border(border) = strategy {
                animations += border.cancel_animations();
            }
            false
        });
        log::debug!(
            "destroyed {container:?}: {buffers} buffered layout(s), {animations} animation(s) cancelled"
        );
    }
}
