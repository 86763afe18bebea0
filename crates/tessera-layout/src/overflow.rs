//! Box layout overflow handling.
//!
//! When a box layout's children cannot fit even at their minimum sizes, an
//! [`OverflowHandler`] decides what to do: hide trailing children behind a
//! menu trigger ([`MenuOverflow`]) or clip them and scroll ([`ScrollOverflow`]).
//!
//! The coordinator solves the run, asks the handler to handle (too narrow) or
//! clear (fits) the overflow, applies the returned visibility changes, then
//! re-solves at most once against the space left after [`Reserved`]
//! affordances.

use std::fmt;

use serde::Serialize;
use tessera_component::{ComponentId, LayoutConfig, OverflowKind, Size};

use crate::box_model::BoxRequest;
use crate::box_solver::{solve, BoxParams, BoxSolution};

/// One solved pass of a box layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRun {
    /// The box container.
    pub container: ComponentId,
    /// Visible children in source order.
    pub items: Vec<ComponentId>,
    /// One request per item.
    pub requests: Vec<BoxRequest>,
    /// Container inputs.
    pub params: BoxParams,
    /// Solver output.
    pub solution: BoxSolution,
}

impl LayoutRun {
    /// Solve `requests` and keep everything together.
    #[must_use]
    pub fn solve(
        container: ComponentId,
        items: Vec<ComponentId>,
        requests: Vec<BoxRequest>,
        params: BoxParams,
    ) -> Self {
        let solution = solve(&requests, &params);
        Self {
            container,
            items,
            requests,
            params,
            solution,
        }
    }

    /// Main length available to the children.
    #[must_use]
    pub fn inner_main(&self) -> i32 {
        self.params.inner_main()
    }

    /// Whether the children do not fit at their minimum sizes.
    #[must_use]
    pub const fn is_too_narrow(&self) -> bool {
        self.solution.meta.too_narrow
    }
}

/// What the coordinator should do after a handler ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverflowOutcome {
    /// Solve against this size instead of the container's target size.
    pub target_size: Option<Size>,
    /// Visibility changed; solve again before applying.
    pub recalculate: bool,
    /// Children to hide.
    pub hide: Vec<ComponentId>,
    /// Children to show again.
    pub show: Vec<ComponentId>,
}

/// Main-axis space taken by overflow affordances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reserved {
    /// Before the first child.
    pub leading: i32,
    /// After the last child.
    pub trailing: i32,
}

impl Reserved {
    /// Nothing reserved.
    pub const NONE: Self = Self {
        leading: 0,
        trailing: 0,
    };

    /// Total reserved length.
    #[must_use]
    pub const fn total(self) -> i32 {
        self.leading + self.trailing
    }
}

/// Reacts to a box layout running out of main-axis space.
pub trait OverflowHandler: fmt::Debug {
    /// The run is too narrow.
    fn handle_overflow(&mut self, run: &LayoutRun) -> OverflowOutcome;

    /// The run fits; undo earlier overflow handling where possible.
    fn clear_overflow(&mut self, run: &LayoutRun) -> OverflowOutcome;

    /// Space to keep free for affordances in the final solve.
    fn reserved(&self) -> Reserved;

    /// Forget state held for components that are no longer among `children`.
    fn retain_children(&mut self, children: &[ComponentId]) {
        let _ = children;
    }

    /// Whether overflow handling is currently in effect.
    fn is_overflowing(&self) -> bool;

    /// Children currently hidden by the handler, in source order.
    fn hidden_items(&self) -> Vec<ComponentId> {
        Vec::new()
    }

    /// Main-axis scroll position.
    fn scroll_offset(&self) -> i32 {
        0
    }

    /// Scroll to `position`, clamped. Returns whether the position changed.
    fn scroll_to(&mut self, position: i32) -> bool {
        let _ = position;
        false
    }

    /// Scroll by `delta`, clamped. Returns whether the position changed.
    fn scroll_by(&mut self, delta: i32) -> bool {
        self.scroll_to(self.scroll_offset().saturating_add(delta))
    }

    /// Whether scrolling toward the start is possible.
    fn can_scroll_backward(&self) -> bool {
        false
    }

    /// Whether scrolling toward the end is possible.
    fn can_scroll_forward(&self) -> bool {
        false
    }
}

/// Build the handler a layout config asks for.
#[must_use]
pub fn handler_for(kind: OverflowKind, config: &LayoutConfig) -> Box<dyn OverflowHandler> {
    match kind {
        OverflowKind::Menu => Box::new(MenuOverflow::new(config.trigger_size)),
        OverflowKind::Scroll => Box::new(ScrollOverflow::new(config.scroller_size)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HiddenItem {
    id: ComponentId,
    /// Minimum outer main length when it was hidden.
    outer: i32,
}

/// Hides trailing children behind a menu trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuOverflow {
    trigger_size: i32,
    hidden: Vec<HiddenItem>,
}

impl MenuOverflow {
    /// A handler whose trigger button is `trigger_size` long.
    #[must_use]
    pub const fn new(trigger_size: i32) -> Self {
        Self {
            trigger_size,
            hidden: Vec::new(),
        }
    }

    /// Main length of the trigger button.
    #[must_use]
    pub const fn trigger_size(&self) -> i32 {
        self.trigger_size
    }

    /// Length that must be freed so the rest plus the trigger fits.
    fn excess(&self, run: &LayoutRun) -> i32 {
        run.solution.meta.minimum_main + self.trigger_size - run.inner_main()
    }

    /// Hide from the trailing end until at least `delta` has been freed.
    fn hide_trailing(&mut self, run: &LayoutRun, delta: i32) -> OverflowOutcome {
        let orientation = run.params.orientation;
        let mut freed = 0;
        let mut newly_hidden = Vec::new();
        for (&id, request) in run.items.iter().zip(&run.requests).rev() {
            if freed >= delta {
                break;
            }
            let outer = request.minimum_outer_main(orientation);
            freed += outer;
            newly_hidden.push(HiddenItem { id, outer });
        }
        newly_hidden.reverse();

        let hide: Vec<ComponentId> = newly_hidden.iter().map(|item| item.id).collect();
        log::debug!(
            "menu overflow on {:?}: delta={delta} freed={freed} hiding {} item(s)",
            run.container,
            hide.len()
        );
        // Visible items precede every already hidden one in source order.
        let _ = self.hidden.splice(0..0, newly_hidden);
        OverflowOutcome {
            recalculate: !hide.is_empty(),
            hide,
            ..OverflowOutcome::default()
        }
    }
}

impl OverflowHandler for MenuOverflow {
    fn handle_overflow(&mut self, run: &LayoutRun) -> OverflowOutcome {
        let delta = self.excess(run);
        if delta <= 0 {
            return OverflowOutcome::default();
        }
        self.hide_trailing(run, delta)
    }

    fn clear_overflow(&mut self, run: &LayoutRun) -> OverflowOutcome {
        if self.hidden.is_empty() {
            return OverflowOutcome::default();
        }
        // The visible items fit, but not next to the trigger.
        let delta = self.excess(run);
        if delta > 0 {
            return self.hide_trailing(run, delta);
        }

        let inner = run.inner_main();
        let mut used = run.solution.meta.minimum_main;
        let mut count = 0;
        for (index, item) in self.hidden.iter().enumerate() {
            let still_hidden = self.hidden.len() - index - 1;
            let trigger = if still_hidden > 0 { self.trigger_size } else { 0 };
            if used + item.outer + trigger > inner {
                break;
            }
            used += item.outer;
            count += 1;
        }

        let show: Vec<ComponentId> = self.hidden.drain(..count).map(|item| item.id).collect();
        OverflowOutcome {
            recalculate: !show.is_empty(),
            show,
            ..OverflowOutcome::default()
        }
    }

    fn retain_children(&mut self, children: &[ComponentId]) {
        self.hidden.retain(|item| children.contains(&item.id));
    }

    fn reserved(&self) -> Reserved {
        if self.hidden.is_empty() {
            Reserved::NONE
        } else {
            Reserved {
                leading: 0,
                trailing: self.trigger_size,
            }
        }
    }

    fn is_overflowing(&self) -> bool {
        !self.hidden.is_empty()
    }

    fn hidden_items(&self) -> Vec<ComponentId> {
        self.hidden.iter().map(|item| item.id).collect()
    }
}

/// Clips children and scrolls them between two scroller buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollOverflow {
    scroller_size: i32,
    position: i32,
    extent: i32,
    overflowing: bool,
}

impl ScrollOverflow {
    /// A handler whose scroller buttons are `scroller_size` long.
    #[must_use]
    pub const fn new(scroller_size: i32) -> Self {
        Self {
            scroller_size,
            position: 0,
            extent: 0,
            overflowing: false,
        }
    }

    /// Largest scroll position.
    #[must_use]
    pub const fn extent(&self) -> i32 {
        self.extent
    }
}

impl OverflowHandler for ScrollOverflow {
    fn handle_overflow(&mut self, run: &LayoutRun) -> OverflowOutcome {
        let viewport = (run.inner_main() - 2 * self.scroller_size).max(0);
        let newly = !self.overflowing;
        self.overflowing = true;
        self.extent = (run.solution.meta.minimum_main - viewport).max(0);
        self.position = self.position.clamp(0, self.extent);
        OverflowOutcome {
            recalculate: newly,
            ..OverflowOutcome::default()
        }
    }

    fn clear_overflow(&mut self, _run: &LayoutRun) -> OverflowOutcome {
        if !self.overflowing {
            return OverflowOutcome::default();
        }
        *self = Self::new(self.scroller_size);
        OverflowOutcome {
            recalculate: true,
            ..OverflowOutcome::default()
        }
    }

    fn reserved(&self) -> Reserved {
        if self.overflowing {
            Reserved {
                leading: self.scroller_size,
                trailing: self.scroller_size,
            }
        } else {
            Reserved::NONE
        }
    }

    fn is_overflowing(&self) -> bool {
        self.overflowing
    }

    fn scroll_offset(&self) -> i32 {
        self.position
    }

    fn scroll_to(&mut self, position: i32) -> bool {
        let clamped = position.clamp(0, self.extent);
        let changed = clamped != self.position;
        self.position = clamped;
        changed
    }

    fn can_scroll_backward(&self) -> bool {
        self.overflowing && self.position > 0
    }

    fn can_scroll_forward(&self) -> bool {
        self.overflowing && self.position < self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_model::Orientation;

    fn run(widths: &[i32], available: i32) -> LayoutRun {
        let items = (1..=widths.len()).map(ComponentId).collect();
        let requests = widths.iter().map(|&w| BoxRequest::fixed(w, 10)).collect();
        let params = BoxParams {
            orientation: Orientation::Horizontal,
            available: Size::new(available, 10),
            ..BoxParams::default()
        };
        LayoutRun::solve(ComponentId(0), items, requests, params)
    }

    #[test]
    fn test_menu_hides_only_what_is_needed() {
        let mut menu = MenuOverflow::new(0);
        // minimum 250, inner 180: 70 must go, two 50s cover it.
        let outcome = menu.handle_overflow(&run(&[50; 5], 180));
        assert!(outcome.recalculate);
        assert_eq!(outcome.hide, vec![ComponentId(4), ComponentId(5)]);
        assert_eq!(menu.hidden_items(), outcome.hide);
        assert!(menu.is_overflowing());
    }

    #[test]
    fn test_menu_counts_trigger() {
        let mut menu = MenuOverflow::new(30);
        // 250 + 30 - 240 = 40: one 50 suffices.
        let outcome = menu.handle_overflow(&run(&[50; 5], 240));
        assert_eq!(outcome.hide, vec![ComponentId(5)]);
        assert_eq!(menu.reserved(), Reserved { leading: 0, trailing: 30 });
    }

    #[test]
    fn test_menu_hidden_list_stays_in_source_order() {
        let mut menu = MenuOverflow::new(0);
        let _ = menu.handle_overflow(&run(&[50; 5], 220));
        assert_eq!(menu.hidden_items(), vec![ComponentId(5)]);

        // Next pass only items 1..=4 are visible and space shrank further.
        let _ = menu.handle_overflow(&run(&[50; 4], 120));
        assert_eq!(
            menu.hidden_items(),
            vec![ComponentId(3), ComponentId(4), ComponentId(5)]
        );
    }

    #[test]
    fn test_menu_reshows_greedily_from_front() {
        let mut menu = MenuOverflow::new(0);
        let _ = menu.handle_overflow(&run(&[50; 5], 120));
        assert_eq!(menu.hidden_items().len(), 3);

        // Two visible items (100) in 210: room for two of the three.
        let wider = run(&[50; 2], 210);
        let outcome = menu.clear_overflow(&wider);
        assert_eq!(outcome.show, vec![ComponentId(3), ComponentId(4)]);
        assert_eq!(menu.hidden_items(), vec![ComponentId(5)]);

        let outcome = menu.clear_overflow(&run(&[50; 4], 250));
        assert_eq!(outcome.show, vec![ComponentId(5)]);
        assert!(!menu.is_overflowing());
        assert_eq!(menu.reserved(), Reserved::NONE);
    }

    #[test]
    fn test_menu_clear_without_hidden_is_noop() {
        let mut menu = MenuOverflow::new(10);
        assert_eq!(menu.clear_overflow(&run(&[50], 100)), OverflowOutcome::default());
    }

    #[test]
    fn test_scroll_clamps_position() {
        let mut scroll = ScrollOverflow::new(20);
        // content 300, viewport 200 - 40 = 160, extent 140.
        let outcome = scroll.handle_overflow(&run(&[100; 3], 200));
        assert!(outcome.recalculate);
        assert_eq!(scroll.extent(), 140);
        assert_eq!(scroll.reserved().total(), 40);
        assert!(!scroll.can_scroll_backward());
        assert!(scroll.can_scroll_forward());

        assert!(scroll.scroll_by(500));
        assert_eq!(scroll.scroll_offset(), 140);
        assert!(!scroll.can_scroll_forward());
        assert!(scroll.scroll_to(-5));
        assert_eq!(scroll.scroll_offset(), 0);
        assert!(!scroll.scroll_by(-1));
    }

    #[test]
    fn test_scroll_clear_resets() {
        let mut scroll = ScrollOverflow::new(20);
        let _ = scroll.handle_overflow(&run(&[100; 3], 200));
        let _ = scroll.scroll_to(50);
        let outcome = scroll.clear_overflow(&run(&[100; 3], 400));
        assert!(outcome.recalculate);
        assert!(!scroll.is_overflowing());
        assert_eq!(scroll.scroll_offset(), 0);
        assert_eq!(scroll.reserved(), Reserved::NONE);
    }
}
